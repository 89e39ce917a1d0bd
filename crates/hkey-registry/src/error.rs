use hkey_native::consts;
use hkey_native::NativeStatus;
use thiserror::Error;

/// An error raised while accessing the registry.
///
/// The taxonomy is closed: callers can match exhaustively instead of
/// comparing numeric codes. For interoperability with the facility's own
/// diagnostics, [`RegistryError::code`] still exposes the numeric
/// convention: native status codes are non-negative, conditions detected in
/// this crate are negative.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// The registry facility is not present on this host.
    #[error("registry is not available")]
    Unavailable,

    /// The requested key or value does not exist.
    #[error("registry key or value not found")]
    NotFound,

    /// The stored value type is incompatible with the requested decode.
    #[error("actual value type does not match the requested one")]
    TypeMismatch,

    /// Any other non-success status reported by the facility.
    #[error("{message} (code {code})")]
    Native {
        /// Raw status code exactly as the facility reported it.
        code: NativeStatus,
        /// Description of the operation that failed.
        message: String,
    },
}

impl RegistryError {
    /// Numeric code of this error.
    pub fn code(&self) -> i32 {
        match self {
            RegistryError::Unavailable => -1,
            RegistryError::TypeMismatch => -2,
            RegistryError::NotFound => consts::ERROR_NOT_FOUND as i32,
            RegistryError::Native { code, .. } => *code as i32,
        }
    }

    /// Translates a non-success native status into the taxonomy. The mapping
    /// is total: anything that is not the not-found status surfaces as
    /// [`RegistryError::Native`] with the raw code preserved.
    pub(crate) fn from_status(status: NativeStatus, message: impl Into<String>) -> Self {
        match status {
            consts::ERROR_NOT_FOUND => RegistryError::NotFound,
            code => RegistryError::Native {
                code,
                message: message.into(),
            },
        }
    }
}

/// Gate consulted before every native call; when it reports the facility
/// absent, no call is attempted.
pub(crate) fn ensure_available() -> Result<(), RegistryError> {
    if hkey_native::availability::is_available() {
        Ok(())
    } else {
        Err(RegistryError::Unavailable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn internal_codes_are_negative() {
        assert_eq!(RegistryError::Unavailable.code(), -1);
        assert_eq!(RegistryError::TypeMismatch.code(), -2);
    }

    #[test]
    fn native_codes_pass_through_unchanged() {
        assert_eq!(RegistryError::NotFound.code(), 2);
        let err = RegistryError::from_status(consts::ERROR_ACCESS_DENIED, "query failed");
        assert_eq!(err.code(), 5);
    }

    #[test]
    fn not_found_status_translates_to_its_own_variant() {
        let err = RegistryError::from_status(consts::ERROR_NOT_FOUND, "ignored");
        assert!(matches!(err, RegistryError::NotFound));
    }

    #[test]
    fn native_display_carries_message_and_code() {
        let err = RegistryError::from_status(consts::ERROR_MORE_DATA, "could not fetch value 'v'");
        assert_eq!(err.to_string(), "could not fetch value 'v' (code 234)");
    }
}
