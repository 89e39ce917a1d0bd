use std::fmt;
use std::sync::Arc;

use hkey_native::{consts, NativeApi, RawHandle};

use crate::error::{ensure_available, RegistryError};
use crate::query;
use crate::value::RawValue;

/// Access requested when opening a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// Read-only access (`KEY_READ`).
    Read,
    /// Write access (`KEY_WRITE`).
    Write,
}

impl Access {
    /// Mask handed to the facility. The 64-bit registry view flag is always
    /// applied.
    fn mask(self) -> u32 {
        let base = match self {
            Access::Read => consts::KEY_READ,
            Access::Write => consts::KEY_WRITE,
        };
        base | consts::KEY_WOW64_64KEY
    }

    fn describe(self) -> &'static str {
        match self {
            Access::Read => "reading",
            Access::Write => "writing",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum KeyKind {
    /// Well-known root whose handle is a fixed constant the process does not
    /// own and must never release.
    Predefined,
    /// Handle obtained from a successful open; owned and released exactly
    /// once.
    Owned,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum KeyState {
    Open,
    Closed,
}

/// An open location in the registry tree, owning exactly one native handle.
///
/// A key is a single-owner resource. Closing happens at most once: through
/// [`Key::close`] when the caller wants the facility's answer, or through
/// `Drop` on every other exit path. Once closed, every further operation
/// fails deterministically.
pub struct Key {
    native: Arc<dyn NativeApi>,
    handle: RawHandle,
    kind: KeyKind,
    state: KeyState,
}

impl Key {
    /// The predefined `HKEY_CURRENT_USER` root over the given capability.
    pub fn current_user(native: Arc<dyn NativeApi>) -> Key {
        Key::predefined(consts::HKEY_CURRENT_USER, native)
    }

    /// The predefined `HKEY_LOCAL_MACHINE` root over the given capability.
    pub fn local_machine(native: Arc<dyn NativeApi>) -> Key {
        Key::predefined(consts::HKEY_LOCAL_MACHINE, native)
    }

    fn predefined(handle: RawHandle, native: Arc<dyn NativeApi>) -> Key {
        Key {
            native,
            handle,
            kind: KeyKind::Predefined,
            state: KeyState::Open,
        }
    }

    fn owned(handle: RawHandle, native: Arc<dyn NativeApi>) -> Key {
        Key {
            native,
            handle,
            kind: KeyKind::Owned,
            state: KeyState::Open,
        }
    }

    /// Raw handle value; the 0 sentinel once the key has been closed.
    pub fn raw_handle(&self) -> RawHandle {
        self.handle
    }

    /// Whether this key is one of the predefined roots.
    pub fn is_predefined(&self) -> bool {
        self.kind == KeyKind::Predefined
    }

    /// Whether the key still holds its handle.
    pub fn is_open(&self) -> bool {
        self.state == KeyState::Open
    }

    fn ensure_open(&self) -> Result<(), RegistryError> {
        if self.is_open() {
            Ok(())
        } else {
            // The facility's own answer for a stale handle.
            Err(RegistryError::Native {
                code: consts::ERROR_INVALID_HANDLE,
                message: "key has been closed".into(),
            })
        }
    }

    /// Opens a sub-key of this key for reading.
    pub fn open_subkey(&self, sub_path: &str) -> Result<Key, RegistryError> {
        self.open_subkey_with(sub_path, Access::Read)
    }

    /// Opens a sub-key of this key with the requested access.
    ///
    /// `sub_path` uses the portable `/` separator and is translated to the
    /// native form before reaching the facility.
    pub fn open_subkey_with(&self, sub_path: &str, access: Access) -> Result<Key, RegistryError> {
        ensure_available()?;
        self.ensure_open()?;

        let path = to_native_path(sub_path);
        let handle = self
            .native
            .open_key(
                self.handle,
                &path,
                consts::REG_OPTION_OPEN_LINK,
                access.mask(),
            )
            .map_err(|status| {
                RegistryError::from_status(
                    status,
                    format!(
                        "could not open registry key '{sub_path}' for {}",
                        access.describe()
                    ),
                )
            })?;
        log::debug!("opened registry key '{sub_path}' (hKey = {handle:#x})");
        Ok(Key::owned(handle, Arc::clone(&self.native)))
    }

    /// Closes the key, releasing the native handle.
    ///
    /// Closing an already-closed key is a no-op, as is closing a predefined
    /// root: those handles are not owned by the process and have nothing to
    /// release. Local bookkeeping is cleared before the native call, so the
    /// handle reads as released on every path; a native close failure is
    /// still reported after cleanup.
    pub fn close(&mut self) -> Result<(), RegistryError> {
        if self.kind == KeyKind::Predefined || self.state == KeyState::Closed {
            return Ok(());
        }

        let handle = std::mem::replace(&mut self.handle, 0);
        self.state = KeyState::Closed;

        ensure_available()?;
        self.native
            .close_key(handle)
            .map_err(|status| RegistryError::from_status(status, "could not close key"))
    }

    fn query_raw(&self, value_name: &str) -> Result<RawValue, RegistryError> {
        ensure_available()?;
        self.ensure_open()?;
        query::query_raw(self.native.as_ref(), self.handle, value_name)
    }

    /// Queries a named textual value (`REG_SZ` or `REG_EXPAND_SZ`).
    ///
    /// `None` means the value exists but carries no data, which is distinct
    /// from an empty string.
    pub fn query_string_value(&self, value_name: &str) -> Result<Option<String>, RegistryError> {
        self.query_raw(value_name)?.decode_string()
    }

    /// Like [`Key::query_string_value`], but substitutes `fallback` when the
    /// value does not exist. Every other error propagates unchanged.
    pub fn query_string_value_or(
        &self,
        value_name: &str,
        fallback: Option<&str>,
    ) -> Result<Option<String>, RegistryError> {
        match self.query_string_value(value_name) {
            Err(RegistryError::NotFound) => Ok(fallback.map(str::to_owned)),
            other => other,
        }
    }

    /// Queries a named 32-bit integer value (`REG_DWORD` or
    /// `REG_DWORD_BIG_ENDIAN`).
    pub fn query_int_value(&self, value_name: &str) -> Result<i32, RegistryError> {
        self.query_raw(value_name)?.decode_int()
    }

    /// Like [`Key::query_int_value`], but substitutes `fallback` when the
    /// value does not exist. Every other error propagates unchanged.
    pub fn query_int_value_or(
        &self,
        value_name: &str,
        fallback: Option<i32>,
    ) -> Result<Option<i32>, RegistryError> {
        match self.query_int_value(value_name) {
            Ok(value) => Ok(Some(value)),
            Err(RegistryError::NotFound) => Ok(fallback),
            Err(e) => Err(e),
        }
    }

    /// Queries the unnamed (default) value of this key.
    pub fn query_unnamed_value(&self) -> Result<Option<String>, RegistryError> {
        self.query_string_value("")
    }

    /// Like [`Key::query_unnamed_value`], but substitutes `fallback` when
    /// the key has no unnamed value.
    pub fn query_unnamed_value_or(
        &self,
        fallback: Option<&str>,
    ) -> Result<Option<String>, RegistryError> {
        self.query_string_value_or("", fallback)
    }
}

impl fmt::Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Key")
            .field("handle", &format_args!("{:#x}", self.handle))
            .field("kind", &self.kind)
            .field("state", &self.state)
            .finish()
    }
}

impl Drop for Key {
    fn drop(&mut self) {
        if let Err(e) = self.close() {
            log::warn!("failed to close registry key: {e}");
        }
    }
}

/// Translates a portable `/`-separated sub-path into the native separator
/// form.
fn to_native_path(sub_path: &str) -> String {
    sub_path.replace('/', "\\")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sub_paths_translate_to_the_native_separator() {
        assert_eq!(to_native_path("Windows/CurrentVersion"), "Windows\\CurrentVersion");
        assert_eq!(to_native_path("a/b/c"), "a\\b\\c");
        assert_eq!(to_native_path("NoSeparator"), "NoSeparator");
    }

    #[test]
    fn the_wide_view_flag_rides_on_every_mask() {
        assert_eq!(Access::Read.mask(), consts::KEY_READ | consts::KEY_WOW64_64KEY);
        assert_eq!(Access::Write.mask(), consts::KEY_WRITE | consts::KEY_WOW64_64KEY);
    }
}
