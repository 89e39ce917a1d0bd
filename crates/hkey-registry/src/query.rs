//! The two-phase probe-then-fetch protocol for reading one value.

use hkey_native::{NativeApi, RawHandle};

use crate::error::RegistryError;
use crate::value::{RawValue, ValueDescriptor, ValueType};

/// Reads the raw bytes of one value via two sequential native calls.
///
/// The probe carries no buffer and yields the stored type and the exact byte
/// length; the fetch fills a buffer of exactly that many bytes. The fetch
/// re-reports the type tag, which takes precedence over the probe's. A value
/// that grew in between makes the facility report its insufficient-buffer
/// status; that status surfaces to the caller untranslated into a retry.
pub(crate) fn query_raw(
    native: &dyn NativeApi,
    handle: RawHandle,
    value_name: &str,
) -> Result<RawValue, RegistryError> {
    let probe = native
        .query_value(handle, value_name, None)
        .map_err(|status| {
            RegistryError::from_status(status, format!("failed to query value '{value_name}'"))
        })?;

    let mut bytes = vec![0u8; probe.byte_len as usize];
    let fetched = native
        .query_value(handle, value_name, Some(&mut bytes))
        .map_err(|status| {
            RegistryError::from_status(status, format!("failed to fetch value '{value_name}'"))
        })?;

    let descriptor = ValueDescriptor {
        value_type: ValueType::from_raw(fetched.type_tag),
        byte_len: bytes.len(),
    };
    Ok(RawValue { descriptor, bytes })
}
