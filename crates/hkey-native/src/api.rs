//! The three-operation contract of the underlying registry facility.
//!
//! Implementations translate nothing: every error is the facility's own raw
//! status code. Turning those codes into a typed error taxonomy is the job of
//! `hkey-registry`.

/// Opaque identifier of an open native resource. The value 0 is the
/// "no resource" sentinel and is never a valid handle.
pub type RawHandle = usize;

/// Raw, untranslated status code reported by the facility. See
/// [`crate::consts`] for the codes this crate gives names to.
pub type NativeStatus = u32;

/// What the facility reports about one value: its type tag and the exact
/// number of bytes its raw data occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValueInfo {
    /// Raw type tag (`REG_SZ`, `REG_DWORD`, ...).
    pub type_tag: u32,
    /// Size of the value's raw data in bytes.
    pub byte_len: u32,
}

/// Injected capability giving access to the native registry facility.
///
/// An `Err` from any operation carries the facility's own status code,
/// untouched; `Ok` corresponds to `ERROR_SUCCESS`.
pub trait NativeApi: Send + Sync {
    /// Opens the key at `sub_path` (native `\`-separated form) relative to
    /// `root`, returning the new handle.
    fn open_key(
        &self,
        root: RawHandle,
        sub_path: &str,
        options: u32,
        access: u32,
    ) -> Result<RawHandle, NativeStatus>;

    /// Queries one value of an open key.
    ///
    /// With `data: None` this is a probe: the facility reports the value's
    /// type and exact byte length without transferring data. With
    /// `data: Some(buf)` the facility fills `buf` and re-reports both fields;
    /// a buffer smaller than the value's current data yields the
    /// insufficient-buffer status ([`crate::consts::ERROR_MORE_DATA`]).
    fn query_value(
        &self,
        handle: RawHandle,
        value_name: &str,
        data: Option<&mut [u8]>,
    ) -> Result<ValueInfo, NativeStatus>;

    /// Releases an open handle.
    fn close_key(&self, handle: RawHandle) -> Result<(), NativeStatus>;
}
