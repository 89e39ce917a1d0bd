use hkey_native::consts;

use crate::error::RegistryError;

/// Type tag of a stored registry value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueType {
    /// NUL-terminated text (`REG_SZ`).
    String,
    /// NUL-terminated text with embedded environment references
    /// (`REG_EXPAND_SZ`).
    ExpandableString,
    /// 32-bit little-endian integer (`REG_DWORD`).
    Dword,
    /// 32-bit big-endian integer (`REG_DWORD_BIG_ENDIAN`).
    DwordBigEndian,
    /// Any other tag, carried raw and not decodable by this crate.
    Other(u32),
}

impl ValueType {
    /// Maps the facility's raw tag onto the enum.
    pub fn from_raw(tag: u32) -> Self {
        match tag {
            consts::REG_SZ => ValueType::String,
            consts::REG_EXPAND_SZ => ValueType::ExpandableString,
            consts::REG_DWORD => ValueType::Dword,
            consts::REG_DWORD_BIG_ENDIAN => ValueType::DwordBigEndian,
            other => ValueType::Other(other),
        }
    }

    fn is_text(self) -> bool {
        matches!(self, ValueType::String | ValueType::ExpandableString)
    }
}

/// Result of a probe: the stored type and the exact number of bytes required
/// to fetch the value's raw data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValueDescriptor {
    /// Stored type tag.
    pub value_type: ValueType,
    /// Exact size of the raw data in bytes.
    pub byte_len: usize,
}

/// Raw bytes of one value, paired with the descriptor that sized them.
/// Built fresh per query and never cached; re-query for a current view.
#[derive(Debug, Clone)]
pub struct RawValue {
    /// Descriptor the facility reported for this value.
    pub descriptor: ValueDescriptor,
    /// Raw data, exactly `descriptor.byte_len` bytes.
    pub bytes: Vec<u8>,
}

impl RawValue {
    /// Decodes a textual value (`REG_SZ` or `REG_EXPAND_SZ`).
    ///
    /// The text is exactly the bytes preceding the first NUL; bytes after it
    /// are ignored. An empty byte sequence decodes to `None`, which is
    /// distinct from an empty string.
    pub fn decode_string(&self) -> Result<Option<String>, RegistryError> {
        if !self.descriptor.value_type.is_text() {
            return Err(RegistryError::TypeMismatch);
        }
        if self.bytes.is_empty() {
            return Ok(None);
        }
        let end = self
            .bytes
            .iter()
            .position(|&b| b == 0)
            .unwrap_or(self.bytes.len());
        Ok(Some(String::from_utf8_lossy(&self.bytes[..end]).into_owned()))
    }

    /// Decodes a 32-bit integer value (`REG_DWORD` or
    /// `REG_DWORD_BIG_ENDIAN`), honoring the byte order the tag prescribes.
    ///
    /// The raw data must be exactly 4 bytes; any other length is a contract
    /// violation by the native layer and reports as a type mismatch.
    pub fn decode_int(&self) -> Result<i32, RegistryError> {
        let big_endian = match self.descriptor.value_type {
            ValueType::Dword => false,
            ValueType::DwordBigEndian => true,
            _ => return Err(RegistryError::TypeMismatch),
        };
        let data: [u8; 4] = self
            .bytes
            .as_slice()
            .try_into()
            .map_err(|_| RegistryError::TypeMismatch)?;
        Ok(if big_endian {
            i32::from_be_bytes(data)
        } else {
            i32::from_le_bytes(data)
        })
    }
}
