#![doc = include_str!("../README.md")]

pub mod api;
pub mod availability;
pub mod consts;

#[cfg(windows)]
mod advapi;

#[cfg(windows)]
pub use advapi::Advapi;
pub use api::{NativeApi, NativeStatus, RawHandle, ValueInfo};
