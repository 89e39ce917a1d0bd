//! `advapi32`-backed implementation of the [`NativeApi`] contract.
//!
//! Uses the ANSI entry points; value names and paths cross the boundary as
//! NUL-terminated narrow strings.

use std::ffi::CString;
use std::ptr;

use windows_sys::Win32::Foundation::ERROR_INVALID_PARAMETER;
use windows_sys::Win32::System::Registry::{
    HKEY, RegCloseKey, RegOpenKeyExA, RegQueryValueExA,
};

use crate::api::{NativeApi, NativeStatus, RawHandle, ValueInfo};
use crate::consts::ERROR_SUCCESS;

/// The live registry facility of the running Windows host.
pub struct Advapi;

fn to_c_string(s: &str) -> Result<CString, NativeStatus> {
    // An interior NUL can never name a real key or value.
    CString::new(s).map_err(|_| ERROR_INVALID_PARAMETER)
}

impl NativeApi for Advapi {
    fn open_key(
        &self,
        root: RawHandle,
        sub_path: &str,
        options: u32,
        access: u32,
    ) -> Result<RawHandle, NativeStatus> {
        let sub_path = to_c_string(sub_path)?;
        let mut out: HKEY = ptr::null_mut();
        let status = unsafe {
            RegOpenKeyExA(
                root as HKEY,
                sub_path.as_ptr().cast(),
                options,
                access,
                &mut out,
            )
        };
        if status == ERROR_SUCCESS {
            Ok(out as RawHandle)
        } else {
            Err(status)
        }
    }

    fn query_value(
        &self,
        handle: RawHandle,
        value_name: &str,
        data: Option<&mut [u8]>,
    ) -> Result<ValueInfo, NativeStatus> {
        let value_name = to_c_string(value_name)?;
        let mut type_tag: u32 = 0;
        let (data_ptr, mut byte_len) = match data {
            Some(buf) => (buf.as_mut_ptr(), buf.len() as u32),
            None => (ptr::null_mut(), 0),
        };
        let status = unsafe {
            RegQueryValueExA(
                handle as HKEY,
                value_name.as_ptr().cast(),
                ptr::null(),
                &mut type_tag,
                data_ptr,
                &mut byte_len,
            )
        };
        if status == ERROR_SUCCESS {
            Ok(ValueInfo { type_tag, byte_len })
        } else {
            Err(status)
        }
    }

    fn close_key(&self, handle: RawHandle) -> Result<(), NativeStatus> {
        let status = unsafe { RegCloseKey(handle as HKEY) };
        if status == ERROR_SUCCESS {
            Ok(())
        } else {
            Err(status)
        }
    }
}
