#![doc = include_str!("../README.md")]

/// Error taxonomy and native status translation.
pub mod error;

/// Key handle resource: open, query, guaranteed close.
pub mod key;

/// The public registry surface and its predefined roots.
pub mod registry;

/// Value descriptors, raw values and typed decoding.
pub mod value;

mod query;

pub use error::RegistryError;
pub use hkey_native::availability::{force_available, is_available};
pub use hkey_native::{NativeApi, NativeStatus, RawHandle, ValueInfo};
pub use key::{Access, Key};
pub use registry::Registry;
pub use value::{RawValue, ValueDescriptor, ValueType};
