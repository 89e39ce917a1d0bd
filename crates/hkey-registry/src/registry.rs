use std::sync::Arc;

use hkey_native::NativeApi;

use crate::error::RegistryError;
use crate::key::{Access, Key};

/// Entry point to the registry.
///
/// A `Registry` is constructed over an explicitly injected native capability
/// and owns the two predefined root keys for its lifetime. Every operation
/// is also available as a method on [`Key`]; the forms are equivalent and
/// produce identical results, the `Registry` methods merely delegating.
pub struct Registry {
    current_user: Key,
    local_machine: Key,
}

impl Registry {
    /// Creates a registry surface over the given native capability.
    pub fn new(native: Arc<dyn NativeApi>) -> Self {
        Registry {
            current_user: Key::current_user(Arc::clone(&native)),
            local_machine: Key::local_machine(native),
        }
    }

    /// Registry surface wired to the running host's own facility.
    #[cfg(windows)]
    pub fn system() -> Self {
        Self::new(Arc::new(hkey_native::Advapi))
    }

    /// Whether the registry facility may be used on this host.
    pub fn is_available(&self) -> bool {
        hkey_native::availability::is_available()
    }

    /// The predefined `HKEY_CURRENT_USER` root.
    pub fn current_user(&self) -> &Key {
        &self.current_user
    }

    /// The predefined `HKEY_LOCAL_MACHINE` root.
    pub fn local_machine(&self) -> &Key {
        &self.local_machine
    }

    /// Opens a key for reading; equivalent to `root.open_subkey(sub_path)`.
    pub fn open_key(&self, root: &Key, sub_path: &str) -> Result<Key, RegistryError> {
        root.open_subkey(sub_path)
    }

    /// Opens a key with the requested access; equivalent to
    /// `root.open_subkey_with(sub_path, access)`.
    pub fn open_key_with(
        &self,
        root: &Key,
        sub_path: &str,
        access: Access,
    ) -> Result<Key, RegistryError> {
        root.open_subkey_with(sub_path, access)
    }

    /// Closes a key; equivalent to `key.close()`.
    pub fn close_key(&self, key: &mut Key) -> Result<(), RegistryError> {
        key.close()
    }

    /// Queries a named textual value; equivalent to
    /// `key.query_string_value(value_name)`.
    pub fn query_string_value(
        &self,
        key: &Key,
        value_name: &str,
    ) -> Result<Option<String>, RegistryError> {
        key.query_string_value(value_name)
    }

    /// Defaulting flavor of [`Registry::query_string_value`].
    pub fn query_string_value_or(
        &self,
        key: &Key,
        value_name: &str,
        fallback: Option<&str>,
    ) -> Result<Option<String>, RegistryError> {
        key.query_string_value_or(value_name, fallback)
    }

    /// Queries a named 32-bit integer value; equivalent to
    /// `key.query_int_value(value_name)`.
    pub fn query_int_value(&self, key: &Key, value_name: &str) -> Result<i32, RegistryError> {
        key.query_int_value(value_name)
    }

    /// Defaulting flavor of [`Registry::query_int_value`].
    pub fn query_int_value_or(
        &self,
        key: &Key,
        value_name: &str,
        fallback: Option<i32>,
    ) -> Result<Option<i32>, RegistryError> {
        key.query_int_value_or(value_name, fallback)
    }

    /// Queries the unnamed (default) value of a key; equivalent to
    /// `key.query_unnamed_value()`.
    pub fn query_unnamed_value(&self, key: &Key) -> Result<Option<String>, RegistryError> {
        key.query_unnamed_value()
    }

    /// Defaulting flavor of [`Registry::query_unnamed_value`].
    pub fn query_unnamed_value_or(
        &self,
        key: &Key,
        fallback: Option<&str>,
    ) -> Result<Option<String>, RegistryError> {
        key.query_unnamed_value_or(fallback)
    }
}
