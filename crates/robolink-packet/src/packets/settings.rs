//! Configuration packets.

use bytes::Bytes;
use robolink_codec::{PacketReader, PacketWriter, Result, TaggedValue, LENGTH_PREFIX_SIZE};
use serde::{Deserialize, Serialize};

use crate::identifier::{CONFIG_ENTRY, SLICER_SETTING};
use crate::packet::{current_timestamp, Packet};

/// Key length, value tag, value length.
const CONFIG_FIXED_LEN: usize = LENGTH_PREFIX_SIZE + 1 + LENGTH_PREFIX_SIZE;

/// A single configuration key with a typed value.
///
/// Layout after the header:
/// ```text
/// ┌────────────┬──────────┬────────────┬──────────┬────────────┐
/// │ key_len    │ tag (1B) │ value_len  │ key      │ value      │
/// │ (4B BE)    │          │ (4B BE)    │ (UTF-8)  │ (per tag)  │
/// └────────────┴──────────┴────────────┴──────────┴────────────┘
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigEntry {
    #[serde(default = "current_timestamp")]
    pub timestamp: u32,
    pub key: String,
    pub value: TaggedValue,
}

impl ConfigEntry {
    pub fn new(key: impl Into<String>, value: impl Into<TaggedValue>) -> Self {
        Self {
            timestamp: current_timestamp(),
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn with_timestamp(self, timestamp: u32) -> Self {
        Self { timestamp, ..self }
    }
}

impl Packet for ConfigEntry {
    const IDENTIFIER: u8 = CONFIG_ENTRY;
    const NAME: &'static str = "config_entry";

    fn timestamp(&self) -> u32 {
        self.timestamp
    }

    fn encode(&self) -> Result<Bytes> {
        let payload_len = CONFIG_FIXED_LEN + self.key.len() + self.value.encoded_len();
        let mut writer = PacketWriter::new(Self::IDENTIFIER, self.timestamp, payload_len)?;
        writer.put_len(self.key.len())?;
        writer.put_tag_header(&self.value)?;
        writer.put_bytes(self.key.as_bytes());
        writer.put_tagged(&self.value);
        writer.finish()
    }

    fn decode(buf: &[u8]) -> Result<Self> {
        let mut reader = PacketReader::open(buf, Self::IDENTIFIER)?;
        let key_len = reader.read_len()?;
        let (tag, value_len) = reader.read_tag_header()?;
        let key = reader.read_str(key_len, "key")?.to_owned();
        let value = reader.read_tagged(tag, value_len)?;
        let timestamp = reader.timestamp();
        reader.finish()?;
        Ok(Self {
            timestamp,
            key,
            value,
        })
    }
}

/// A slicer setting action (`get`, `set`, `default`, ...) on one key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlicerSetting {
    #[serde(default = "current_timestamp")]
    pub timestamp: u32,
    pub action: String,
    pub key: String,
    pub value: String,
}

impl SlicerSetting {
    pub fn new(action: impl Into<String>, key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            timestamp: current_timestamp(),
            action: action.into(),
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn with_timestamp(self, timestamp: u32) -> Self {
        Self { timestamp, ..self }
    }
}

impl Packet for SlicerSetting {
    const IDENTIFIER: u8 = SLICER_SETTING;
    const NAME: &'static str = "slicer_setting";

    fn timestamp(&self) -> u32 {
        self.timestamp
    }

    fn encode(&self) -> Result<Bytes> {
        let payload_len =
            3 * LENGTH_PREFIX_SIZE + self.action.len() + self.key.len() + self.value.len();
        let mut writer = PacketWriter::new(Self::IDENTIFIER, self.timestamp, payload_len)?;
        writer.put_len(self.action.len())?;
        writer.put_len(self.key.len())?;
        writer.put_len(self.value.len())?;
        writer.put_bytes(self.action.as_bytes());
        writer.put_bytes(self.key.as_bytes());
        writer.put_bytes(self.value.as_bytes());
        writer.finish()
    }

    fn decode(buf: &[u8]) -> Result<Self> {
        let mut reader = PacketReader::open(buf, Self::IDENTIFIER)?;
        let action_len = reader.read_len()?;
        let key_len = reader.read_len()?;
        let value_len = reader.read_len()?;
        let action = reader.read_str(action_len, "action")?.to_owned();
        let key = reader.read_str(key_len, "key")?.to_owned();
        let value = reader.read_str(value_len, "value")?.to_owned();
        let timestamp = reader.timestamp();
        reader.finish()?;
        Ok(Self {
            timestamp,
            action,
            key,
            value,
        })
    }
}

#[cfg(test)]
mod tests {
    use robolink_codec::{CodecError, ValueTag};

    use super::*;

    const TS: u32 = 1_762_330_645;

    #[test]
    fn string_entry_layout() {
        let bytes = ConfigEntry::new("server.host", "127.0.0.1")
            .with_timestamp(TS)
            .encode()
            .unwrap();

        let mut expected = vec![
            0x00, 0x00, 0x00, 0x26, // size (38)
            0x04, // identifier
            0x69, 0x0B, 0x08, 0x15, // timestamp
            0x00, 0x00, 0x00, 0x0B, // key length
            0x01, // value tag (string)
            0x00, 0x00, 0x00, 0x09, // value length
        ];
        expected.extend_from_slice(b"server.host");
        expected.extend_from_slice(b"127.0.0.1");
        assert_eq!(bytes.as_ref(), expected.as_slice());
    }

    #[test]
    fn every_tag_roundtrips() {
        let entries = [
            ConfigEntry::new("server.host", "127.0.0.1"),
            ConfigEntry::new("server.port", 8000),
            ConfigEntry::new("server.enabled", true),
            ConfigEntry::new("server.interval", 25.8f32),
        ];

        for entry in entries {
            let entry = entry.with_timestamp(TS);
            let decoded = ConfigEntry::decode(&entry.encode().unwrap()).unwrap();
            assert_eq!(decoded, entry);
        }
    }

    #[test]
    fn int_entry_bytes() {
        let bytes = ConfigEntry::new("server.port", 8000)
            .with_timestamp(TS)
            .encode()
            .unwrap();
        assert_eq!(bytes.len(), 9 + CONFIG_FIXED_LEN + 11 + 4);
        assert_eq!(bytes[13], ValueTag::Int32.as_u8());
        assert_eq!(&bytes[bytes.len() - 4..], &[0x00, 0x00, 0x1F, 0x40]);
    }

    #[test]
    fn float_entry_bytes() {
        let bytes = ConfigEntry::new("server.interval", 25.8f32)
            .with_timestamp(TS)
            .encode()
            .unwrap();
        assert_eq!(bytes[13], ValueTag::Float32.as_u8());
        assert_eq!(&bytes[bytes.len() - 4..], &[0x41, 0xCE, 0x66, 0x66]);
    }

    #[test]
    fn unknown_tag_is_rejected() {
        let mut bytes = ConfigEntry::new("k", "v").encode().unwrap().to_vec();
        bytes[13] = 0x7F;
        assert!(matches!(
            ConfigEntry::decode(&bytes),
            Err(CodecError::InvalidTagEncoding(_))
        ));
    }

    #[test]
    fn bool_tag_with_wide_value_is_rejected() {
        let mut bytes = ConfigEntry::new("k", 1).encode().unwrap().to_vec();
        bytes[13] = ValueTag::Bool.as_u8();
        assert!(matches!(
            ConfigEntry::decode(&bytes),
            Err(CodecError::InvalidTagEncoding(_))
        ));
    }

    #[test]
    fn slicer_setting_roundtrip() {
        let packet = SlicerSetting::new("set", "layer_height", "0.2").with_timestamp(TS);
        let bytes = packet.encode().unwrap();

        assert_eq!(&bytes[9..13], &3u32.to_be_bytes());
        assert_eq!(&bytes[13..17], &12u32.to_be_bytes());
        assert_eq!(&bytes[17..21], &3u32.to_be_bytes());
        assert_eq!(&bytes[21..], b"setlayer_height0.2");
        assert_eq!(SlicerSetting::decode(&bytes).unwrap(), packet);
    }

    #[test]
    fn slicer_setting_with_empty_value() {
        let packet = SlicerSetting::new("get", "infill", "").with_timestamp(1);
        assert_eq!(SlicerSetting::decode(&packet.encode().unwrap()).unwrap(), packet);
    }
}
