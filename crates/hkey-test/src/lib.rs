#![doc = include_str!("../README.md")]

use std::collections::HashMap;
use std::sync::Mutex;

use hkey_native::consts;
use hkey_native::{NativeApi, NativeStatus, RawHandle, ValueInfo};

/// One recorded call to [`NativeApi::open_key`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenRequest {
    /// Sub-path exactly as the core handed it to the facility.
    pub sub_path: String,
    /// Open options word.
    pub options: u32,
    /// Access mask.
    pub access: u32,
}

struct FakeValue {
    type_tag: u32,
    bytes: Vec<u8>,
    denied: bool,
    grows: bool,
}

#[derive(Default)]
struct FakeKey {
    values: HashMap<String, FakeValue>,
}

struct State {
    keys: HashMap<String, FakeKey>,
    open: HashMap<RawHandle, String>,
    next_handle: RawHandle,
    calls: usize,
    opens: Vec<OpenRequest>,
}

/// In-memory stand-in for the registry facility.
///
/// The fake exposes a single key tree reachable from either predefined root
/// and hands out handles starting at 42. Status behavior follows the real
/// facility: unknown paths and values report `ERROR_NOT_FOUND`, a fetch
/// buffer smaller than the value's data reports `ERROR_MORE_DATA`, and
/// stale or foreign handles report `ERROR_INVALID_HANDLE`.
pub struct FakeAdvApi {
    state: Mutex<State>,
}

impl FakeAdvApi {
    /// Creates an empty fake with no keys registered.
    pub fn new() -> Self {
        FakeAdvApi {
            state: Mutex::new(State {
                keys: HashMap::new(),
                open: HashMap::new(),
                next_handle: 42,
                calls: 0,
                opens: Vec::new(),
            }),
        }
    }

    fn with_value(self, path: &str, name: &str, value: FakeValue) -> Self {
        {
            let mut state = self.state.lock().expect("mutex should not be poisoned");
            state
                .keys
                .entry(native_path(path))
                .or_default()
                .values
                .insert(name.to_owned(), value);
        }
        self
    }

    /// Registers a key at the given path. Builders accept the portable `/`
    /// separator and store the native `\` form.
    pub fn with_key(self, path: &str) -> Self {
        {
            let mut state = self.state.lock().expect("mutex should not be poisoned");
            state.keys.entry(native_path(path)).or_default();
        }
        self
    }

    /// Registers a `REG_SZ` value, stored NUL-terminated the way the
    /// facility keeps text.
    pub fn with_string_value(self, path: &str, name: &str, value: &str) -> Self {
        let mut bytes = value.as_bytes().to_vec();
        bytes.push(0);
        self.with_raw_value(path, name, consts::REG_SZ, &bytes)
    }

    /// Registers a `REG_DWORD` (little-endian) value.
    pub fn with_dword_value(self, path: &str, name: &str, value: i32) -> Self {
        self.with_raw_value(path, name, consts::REG_DWORD, &value.to_le_bytes())
    }

    /// Registers a `REG_DWORD_BIG_ENDIAN` value.
    pub fn with_big_endian_dword_value(self, path: &str, name: &str, value: i32) -> Self {
        self.with_raw_value(
            path,
            name,
            consts::REG_DWORD_BIG_ENDIAN,
            &value.to_be_bytes(),
        )
    }

    /// Registers a value with an arbitrary type tag and raw data.
    pub fn with_raw_value(self, path: &str, name: &str, type_tag: u32, bytes: &[u8]) -> Self {
        self.with_value(
            path,
            name,
            FakeValue {
                type_tag,
                bytes: bytes.to_vec(),
                denied: false,
                grows: false,
            },
        )
    }

    /// Registers a value whose every query reports `ERROR_ACCESS_DENIED`.
    pub fn with_denied_value(self, path: &str, name: &str) -> Self {
        self.with_value(
            path,
            name,
            FakeValue {
                type_tag: consts::REG_SZ,
                bytes: Vec::new(),
                denied: true,
                grows: false,
            },
        )
    }

    /// Registers a `REG_SZ` value that grows between the probe and the
    /// fetch: the probe reports a size, the fetch always answers
    /// `ERROR_MORE_DATA`.
    pub fn with_growing_value(self, path: &str, name: &str, value: &str) -> Self {
        let mut bytes = value.as_bytes().to_vec();
        bytes.push(0);
        self.with_value(
            path,
            name,
            FakeValue {
                type_tag: consts::REG_SZ,
                bytes,
                denied: false,
                grows: true,
            },
        )
    }

    /// Number of handles currently open.
    pub fn open_handle_count(&self) -> usize {
        self.state
            .lock()
            .expect("mutex should not be poisoned")
            .open
            .len()
    }

    /// Total number of calls that reached the fake, across all three
    /// operations.
    pub fn total_calls(&self) -> usize {
        self.state
            .lock()
            .expect("mutex should not be poisoned")
            .calls
    }

    /// Every `open_key` request observed, in order.
    pub fn recorded_opens(&self) -> Vec<OpenRequest> {
        self.state
            .lock()
            .expect("mutex should not be poisoned")
            .opens
            .clone()
    }
}

impl Default for FakeAdvApi {
    fn default() -> Self {
        Self::new()
    }
}

fn native_path(path: &str) -> String {
    path.replace('/', "\\")
}

fn is_predefined(handle: RawHandle) -> bool {
    handle == consts::HKEY_CURRENT_USER || handle == consts::HKEY_LOCAL_MACHINE
}

fn resolve_base(state: &State, root: RawHandle) -> Result<String, NativeStatus> {
    if is_predefined(root) {
        Ok(String::new())
    } else if let Some(path) = state.open.get(&root) {
        Ok(path.clone())
    } else {
        Err(consts::ERROR_INVALID_HANDLE)
    }
}

impl NativeApi for FakeAdvApi {
    fn open_key(
        &self,
        root: RawHandle,
        sub_path: &str,
        options: u32,
        access: u32,
    ) -> Result<RawHandle, NativeStatus> {
        let mut state = self.state.lock().expect("mutex should not be poisoned");
        state.calls += 1;
        state.opens.push(OpenRequest {
            sub_path: sub_path.to_owned(),
            options,
            access,
        });

        let base = resolve_base(&state, root)?;
        let full = if base.is_empty() {
            sub_path.to_owned()
        } else {
            format!("{base}\\{sub_path}")
        };
        if !state.keys.contains_key(&full) {
            return Err(consts::ERROR_NOT_FOUND);
        }

        let handle = state.next_handle;
        state.next_handle += 1;
        state.open.insert(handle, full);
        Ok(handle)
    }

    fn query_value(
        &self,
        handle: RawHandle,
        value_name: &str,
        data: Option<&mut [u8]>,
    ) -> Result<ValueInfo, NativeStatus> {
        let mut state = self.state.lock().expect("mutex should not be poisoned");
        state.calls += 1;

        let path = if is_predefined(handle) {
            String::new()
        } else {
            state
                .open
                .get(&handle)
                .cloned()
                .ok_or(consts::ERROR_INVALID_HANDLE)?
        };
        let value = state
            .keys
            .get(&path)
            .and_then(|key| key.values.get(value_name))
            .ok_or(consts::ERROR_NOT_FOUND)?;
        if value.denied {
            return Err(consts::ERROR_ACCESS_DENIED);
        }

        let info = ValueInfo {
            type_tag: value.type_tag,
            byte_len: value.bytes.len() as u32,
        };
        match data {
            None => Ok(info),
            Some(buf) => {
                if value.grows || buf.len() < value.bytes.len() {
                    return Err(consts::ERROR_MORE_DATA);
                }
                buf[..value.bytes.len()].copy_from_slice(&value.bytes);
                Ok(info)
            }
        }
    }

    fn close_key(&self, handle: RawHandle) -> Result<(), NativeStatus> {
        let mut state = self.state.lock().expect("mutex should not be poisoned");
        state.calls += 1;

        if is_predefined(handle) {
            return Ok(());
        }
        if state.open.remove(&handle).is_some() {
            Ok(())
        } else {
            Err(consts::ERROR_INVALID_HANDLE)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handles_start_at_42_and_increment() {
        let fake = FakeAdvApi::new()
            .with_key("Windows/CurrentVersion")
            .with_key("Windows/CurrentVersion/Explorer");

        let first = fake
            .open_key(consts::HKEY_CURRENT_USER, "Windows\\CurrentVersion", 0, 0)
            .unwrap();
        let second = fake.open_key(first, "Explorer", 0, 0).unwrap();
        assert_eq!(first, 42);
        assert_eq!(second, 43);
        assert_eq!(fake.open_handle_count(), 2);
    }

    #[test]
    fn unknown_path_reports_not_found() {
        let fake = FakeAdvApi::new();
        let status = fake
            .open_key(consts::HKEY_LOCAL_MACHINE, "Nope", 0, 0)
            .unwrap_err();
        assert_eq!(status, consts::ERROR_NOT_FOUND);
    }

    #[test]
    fn close_releases_the_handle_exactly_once() {
        let fake = FakeAdvApi::new().with_key("K");
        let handle = fake.open_key(consts::HKEY_CURRENT_USER, "K", 0, 0).unwrap();

        assert_eq!(fake.close_key(handle), Ok(()));
        assert_eq!(fake.open_handle_count(), 0);
        assert_eq!(fake.close_key(handle), Err(consts::ERROR_INVALID_HANDLE));
    }

    #[test]
    fn short_buffer_reports_more_data() {
        let fake = FakeAdvApi::new().with_string_value("K", "v", "longish");
        let handle = fake.open_key(consts::HKEY_CURRENT_USER, "K", 0, 0).unwrap();

        let probe = fake.query_value(handle, "v", None).unwrap();
        assert_eq!(probe.byte_len as usize, "longish".len() + 1);

        let mut short = vec![0u8; 2];
        let status = fake.query_value(handle, "v", Some(&mut short)).unwrap_err();
        assert_eq!(status, consts::ERROR_MORE_DATA);
    }

    #[test]
    fn denied_value_reports_access_denied() {
        let fake = FakeAdvApi::new().with_denied_value("K", "secret");
        let handle = fake.open_key(consts::HKEY_CURRENT_USER, "K", 0, 0).unwrap();

        let status = fake.query_value(handle, "secret", None).unwrap_err();
        assert_eq!(status, consts::ERROR_ACCESS_DENIED);
    }
}
