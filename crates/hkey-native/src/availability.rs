//! Process-wide flag telling whether the registry facility may be used.
//!
//! The default answer is the compile-time host answer and never changes for
//! the life of the process; [`force_available`] overrides it unconditionally,
//! which is meant for tests that substitute the native capability.

use std::sync::atomic::{AtomicU8, Ordering};

const UNSET: u8 = 0;
const FORCED_ON: u8 = 1;
const FORCED_OFF: u8 = 2;

static OVERRIDE: AtomicU8 = AtomicU8::new(UNSET);

/// Whether the registry facility is present on this host.
pub fn is_available() -> bool {
    match OVERRIDE.load(Ordering::Relaxed) {
        FORCED_ON => true,
        FORCED_OFF => false,
        _ => cfg!(windows),
    }
}

/// Overrides the availability answer for the rest of the process (or until
/// the next call). Intended for test scenarios only.
pub fn force_available(available: bool) {
    let state = if available { FORCED_ON } else { FORCED_OFF };
    OVERRIDE.store(state, Ordering::Relaxed);
}

#[cfg(test)]
mod tests {
    use super::*;

    // Single test: the override is process-wide state and must not be
    // toggled concurrently from several tests.
    #[test]
    fn force_overrides_the_host_answer_both_ways() {
        force_available(true);
        assert!(is_available());

        force_available(false);
        assert!(!is_available());

        force_available(true);
        assert!(is_available());
    }
}
