//! Tagged values: a runtime-typed value whose wire bytes depend on its tag.
//!
//! On the wire a tagged value is split in two, like every variable field:
//! the `u8` tag and `u32` byte length sit in the fixed portion of a packet,
//! and the raw bytes follow in the variable region.

use std::fmt;

use bytes::{Buf, BufMut};
use serde::{Deserialize, Serialize};

use crate::error::{CodecError, Result};
use crate::writer::length_prefix;

/// Wire tag identifying how a tagged value's bytes are laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum ValueTag {
    /// UTF-8 text of any length.
    String = 0x01,
    /// 4-byte big-endian two's-complement integer.
    Int32 = 0x02,
    /// 4-byte big-endian IEEE-754 float.
    Float32 = 0x03,
    /// 1 byte, 0 or 1.
    Bool = 0x04,
}

impl ValueTag {
    /// The tag byte written on the wire.
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Required byte length for fixed-width tags, `None` for strings.
    pub fn fixed_width(self) -> Option<usize> {
        match self {
            ValueTag::String => None,
            ValueTag::Int32 | ValueTag::Float32 => Some(4),
            ValueTag::Bool => Some(1),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ValueTag::String => "string",
            ValueTag::Int32 => "int32",
            ValueTag::Float32 => "float32",
            ValueTag::Bool => "bool",
        }
    }
}

impl TryFrom<u8> for ValueTag {
    type Error = CodecError;

    fn try_from(byte: u8) -> Result<Self> {
        match byte {
            0x01 => Ok(ValueTag::String),
            0x02 => Ok(ValueTag::Int32),
            0x03 => Ok(ValueTag::Float32),
            0x04 => Ok(ValueTag::Bool),
            other => Err(CodecError::InvalidTagEncoding(format!(
                "unknown value tag {other:#04x}"
            ))),
        }
    }
}

/// A value carried with its runtime type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaggedValue {
    String(String),
    Int32(i32),
    Float32(f32),
    Bool(bool),
}

impl TaggedValue {
    pub fn tag(&self) -> ValueTag {
        match self {
            TaggedValue::String(_) => ValueTag::String,
            TaggedValue::Int32(_) => ValueTag::Int32,
            TaggedValue::Float32(_) => ValueTag::Float32,
            TaggedValue::Bool(_) => ValueTag::Bool,
        }
    }

    /// Byte length of the raw value bytes (not counting tag or length prefix).
    pub fn encoded_len(&self) -> usize {
        match self {
            TaggedValue::String(text) => text.len(),
            other => other.tag().fixed_width().unwrap_or(0),
        }
    }

    /// Write the raw value bytes.
    pub fn write_value<B: BufMut>(&self, dst: &mut B) {
        match self {
            TaggedValue::String(text) => dst.put_slice(text.as_bytes()),
            TaggedValue::Int32(value) => dst.put_i32(*value),
            TaggedValue::Float32(value) => dst.put_f32(*value),
            TaggedValue::Bool(value) => dst.put_u8(u8::from(*value)),
        }
    }

    /// Encode the value as `(byte_length, raw_bytes)`.
    ///
    /// Fails with `MessageTooLarge` if the length does not fit its `u32`
    /// prefix.
    pub fn encode(&self) -> Result<(u32, Vec<u8>)> {
        let len = length_prefix(self.encoded_len())?;
        let mut raw = Vec::with_capacity(self.encoded_len());
        self.write_value(&mut raw);
        Ok((len, raw))
    }

    /// Reinterpret `raw` according to `tag`.
    ///
    /// Fixed-width tags must receive exactly their width; strings accept any
    /// length but must be valid UTF-8.
    pub fn decode(tag: ValueTag, raw: &[u8]) -> Result<Self> {
        if let Some(width) = tag.fixed_width() {
            if raw.len() != width {
                return Err(CodecError::InvalidTagEncoding(format!(
                    "{} value must be {width} bytes, found {}",
                    tag.name(),
                    raw.len()
                )));
            }
        }

        let mut src = raw;
        let value = match tag {
            ValueTag::String => {
                let text = std::str::from_utf8(raw).map_err(|source| CodecError::InvalidUtf8 {
                    field: "value",
                    source,
                })?;
                TaggedValue::String(text.to_owned())
            }
            ValueTag::Int32 => TaggedValue::Int32(src.get_i32()),
            ValueTag::Float32 => TaggedValue::Float32(src.get_f32()),
            ValueTag::Bool => TaggedValue::Bool(bool_from_byte(src.get_u8())?),
        };
        Ok(value)
    }
}

/// The single bool rule of the wire format: `0` is false, `1` is true.
pub(crate) fn bool_from_byte(byte: u8) -> Result<bool> {
    match byte {
        0 => Ok(false),
        1 => Ok(true),
        other => Err(CodecError::InvalidTagEncoding(format!(
            "bool value must be 0 or 1, found {other}"
        ))),
    }
}

impl fmt::Display for TaggedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaggedValue::String(text) => write!(f, "{text}"),
            TaggedValue::Int32(value) => write!(f, "{value}"),
            TaggedValue::Float32(value) => write!(f, "{value}"),
            TaggedValue::Bool(value) => write!(f, "{value}"),
        }
    }
}

impl From<&str> for TaggedValue {
    fn from(value: &str) -> Self {
        TaggedValue::String(value.to_owned())
    }
}

impl From<String> for TaggedValue {
    fn from(value: String) -> Self {
        TaggedValue::String(value)
    }
}

impl From<i32> for TaggedValue {
    fn from(value: i32) -> Self {
        TaggedValue::Int32(value)
    }
}

impl From<f32> for TaggedValue {
    fn from(value: f32) -> Self {
        TaggedValue::Float32(value)
    }
}

impl From<bool> for TaggedValue {
    fn from(value: bool) -> Self {
        TaggedValue::Bool(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_each_tag() {
        assert_eq!(
            TaggedValue::from("127.0.0.1").encode().unwrap(),
            (9, b"127.0.0.1".to_vec())
        );
        assert_eq!(
            TaggedValue::from(8000).encode().unwrap(),
            (4, vec![0x00, 0x00, 0x1F, 0x40])
        );
        assert_eq!(
            TaggedValue::from(25.8f32).encode().unwrap(),
            (4, vec![0x41, 0xCE, 0x66, 0x66])
        );
        assert_eq!(TaggedValue::from(true).encode().unwrap(), (1, vec![0x01]));
    }

    #[test]
    fn encode_length_goes_through_u32_prefix() {
        let value = TaggedValue::from("Grüße");
        let (len, raw) = value.encode().unwrap();
        assert_eq!(len as usize, raw.len());
        assert_eq!(len, length_prefix(value.encoded_len()).unwrap());
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn lengths_past_u32_are_too_large() {
        let len = u32::MAX as usize + 1;
        assert_eq!(
            length_prefix(len).unwrap_err(),
            CodecError::MessageTooLarge {
                size: len,
                max: u32::MAX as usize,
            }
        );
    }

    #[test]
    fn bool_rule_accepts_only_zero_and_one() {
        assert!(!bool_from_byte(0).unwrap());
        assert!(bool_from_byte(1).unwrap());
        for byte in [2u8, 0x7F, 0xFF] {
            assert!(matches!(
                bool_from_byte(byte),
                Err(CodecError::InvalidTagEncoding(_))
            ));
        }
    }

    #[test]
    fn decodes_with_expected_tag() {
        assert_eq!(
            TaggedValue::decode(ValueTag::Int32, &[0xFF, 0xFF, 0xFF, 0xFE]).unwrap(),
            TaggedValue::Int32(-2)
        );
        assert_eq!(
            TaggedValue::decode(ValueTag::Float32, &[0x41, 0xCE, 0x66, 0x66]).unwrap(),
            TaggedValue::Float32(25.8)
        );
        assert_eq!(
            TaggedValue::decode(ValueTag::Bool, &[0x00]).unwrap(),
            TaggedValue::Bool(false)
        );
        assert_eq!(
            TaggedValue::decode(ValueTag::String, "héllo".as_bytes()).unwrap(),
            TaggedValue::from("héllo")
        );
    }

    #[test]
    fn wrong_width_is_rejected() {
        assert!(matches!(
            TaggedValue::decode(ValueTag::Int32, &[0x00, 0x01]),
            Err(CodecError::InvalidTagEncoding(_))
        ));
        assert!(matches!(
            TaggedValue::decode(ValueTag::Bool, &[0x00, 0x01, 0x00, 0x00]),
            Err(CodecError::InvalidTagEncoding(_))
        ));
        assert!(matches!(
            TaggedValue::decode(ValueTag::Float32, &[]),
            Err(CodecError::InvalidTagEncoding(_))
        ));
    }

    #[test]
    fn bool_outside_zero_one_is_rejected() {
        assert!(matches!(
            TaggedValue::decode(ValueTag::Bool, &[0x02]),
            Err(CodecError::InvalidTagEncoding(_))
        ));
    }

    #[test]
    fn invalid_utf8_string_is_rejected() {
        assert!(matches!(
            TaggedValue::decode(ValueTag::String, &[0xC3, 0x28]),
            Err(CodecError::InvalidUtf8 { field: "value", .. })
        ));
    }

    #[test]
    fn unknown_tag_byte_is_rejected() {
        assert!(matches!(
            ValueTag::try_from(0x00),
            Err(CodecError::InvalidTagEncoding(_))
        ));
        assert_eq!(ValueTag::try_from(0x03).unwrap(), ValueTag::Float32);
        assert_eq!(ValueTag::Bool.as_u8(), 0x04);
    }

    #[test]
    fn encoded_len_counts_utf8_bytes() {
        assert_eq!(TaggedValue::from("héllo").encoded_len(), 6);
        assert_eq!(TaggedValue::from(false).encoded_len(), 1);
    }

    #[test]
    fn serializes_externally_tagged() {
        let json = serde_json::to_string(&TaggedValue::Int32(8000)).unwrap();
        assert_eq!(json, r#"{"int32":8000}"#);
        let back: TaggedValue = serde_json::from_str(r#"{"string":"x"}"#).unwrap();
        assert_eq!(back, TaggedValue::from("x"));
    }
}
