//! Numeric constants of the Win32 registry surface.
//!
//! These values are part of the operating system's ABI and must be reproduced
//! bit-exactly when talking to a real Windows host.

use crate::api::{NativeStatus, RawHandle};

// Status codes

/// Operation succeeded.
pub const ERROR_SUCCESS: NativeStatus = 0;
/// The requested key or value does not exist.
pub const ERROR_NOT_FOUND: NativeStatus = 2;
/// The caller lacks the requested access.
pub const ERROR_ACCESS_DENIED: NativeStatus = 5;
/// The supplied handle does not refer to an open resource.
pub const ERROR_INVALID_HANDLE: NativeStatus = 6;
/// The supplied buffer is smaller than the value's data.
pub const ERROR_MORE_DATA: NativeStatus = 234;

// Predefined key handles

/// Predefined root for the current user's hive.
pub const HKEY_CURRENT_USER: RawHandle = 0x8000_0001;
/// Predefined root for the machine-wide hive.
pub const HKEY_LOCAL_MACHINE: RawHandle = 0x8000_0002;

// Value types

/// Null-terminated text.
pub const REG_SZ: u32 = 1;
/// Null-terminated text with embedded environment references.
pub const REG_EXPAND_SZ: u32 = 2;
/// 32-bit little-endian integer.
pub const REG_DWORD: u32 = 4;
/// 32-bit big-endian integer.
pub const REG_DWORD_BIG_ENDIAN: u32 = 5;

// Key access masks

/// Force the 64-bit registry view regardless of process bitness.
pub const KEY_WOW64_64KEY: u32 = 0x100;
/// Read access mask.
pub const KEY_READ: u32 = 0x2_0019;
/// Write access mask.
pub const KEY_WRITE: u32 = 0x2_0006;

// Key open options

/// Open-key option applied to every open: open the key itself even if it is
/// a symbolic link.
pub const REG_OPTION_OPEN_LINK: u32 = 0x8;
