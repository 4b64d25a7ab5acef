//! Fixed-width scalar packets.

use bytes::Bytes;
use robolink_codec::{PacketReader, PacketWriter, Result};
use serde::{Deserialize, Serialize};

use crate::identifier::{PROGRESS, ROLL_EVENT, TEMPERATURE};
use crate::packet::{current_timestamp, Packet};

/// Job progress in percent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Progress {
    #[serde(default = "current_timestamp")]
    pub timestamp: u32,
    pub progress: f64,
}

impl Progress {
    pub fn new(progress: f64) -> Self {
        Self {
            timestamp: current_timestamp(),
            progress,
        }
    }

    pub fn with_timestamp(self, timestamp: u32) -> Self {
        Self { timestamp, ..self }
    }
}

impl Packet for Progress {
    const IDENTIFIER: u8 = PROGRESS;
    const NAME: &'static str = "progress";

    fn timestamp(&self) -> u32 {
        self.timestamp
    }

    fn encode(&self) -> Result<Bytes> {
        let mut writer = PacketWriter::new(Self::IDENTIFIER, self.timestamp, 8)?;
        writer.put_f64(self.progress);
        writer.finish()
    }

    fn decode(buf: &[u8]) -> Result<Self> {
        let mut reader = PacketReader::open(buf, Self::IDENTIFIER)?;
        let progress = reader.read_f64()?;
        let timestamp = reader.timestamp();
        reader.finish()?;
        Ok(Self {
            timestamp,
            progress,
        })
    }
}

/// Temperature reading in degrees Celsius.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Temperature {
    #[serde(default = "current_timestamp")]
    pub timestamp: u32,
    pub temperature: f64,
}

impl Temperature {
    pub fn new(temperature: f64) -> Self {
        Self {
            timestamp: current_timestamp(),
            temperature,
        }
    }

    pub fn with_timestamp(self, timestamp: u32) -> Self {
        Self { timestamp, ..self }
    }
}

impl Packet for Temperature {
    const IDENTIFIER: u8 = TEMPERATURE;
    const NAME: &'static str = "temperature";

    fn timestamp(&self) -> u32 {
        self.timestamp
    }

    fn encode(&self) -> Result<Bytes> {
        let mut writer = PacketWriter::new(Self::IDENTIFIER, self.timestamp, 8)?;
        writer.put_f64(self.temperature);
        writer.finish()
    }

    fn decode(buf: &[u8]) -> Result<Self> {
        let mut reader = PacketReader::open(buf, Self::IDENTIFIER)?;
        let temperature = reader.read_f64()?;
        let timestamp = reader.timestamp();
        reader.finish()?;
        Ok(Self {
            timestamp,
            temperature,
        })
    }
}

/// Roll rotation of the end effector, in signed degrees.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollEvent {
    #[serde(default = "current_timestamp")]
    pub timestamp: u32,
    pub degrees: i32,
}

impl RollEvent {
    pub fn new(degrees: i32) -> Self {
        Self {
            timestamp: current_timestamp(),
            degrees,
        }
    }

    pub fn with_timestamp(self, timestamp: u32) -> Self {
        Self { timestamp, ..self }
    }
}

impl Packet for RollEvent {
    const IDENTIFIER: u8 = ROLL_EVENT;
    const NAME: &'static str = "roll_event";

    fn timestamp(&self) -> u32 {
        self.timestamp
    }

    fn encode(&self) -> Result<Bytes> {
        let mut writer = PacketWriter::new(Self::IDENTIFIER, self.timestamp, 4)?;
        writer.put_i32(self.degrees);
        writer.finish()
    }

    fn decode(buf: &[u8]) -> Result<Self> {
        let mut reader = PacketReader::open(buf, Self::IDENTIFIER)?;
        let degrees = reader.read_i32()?;
        let timestamp = reader.timestamp();
        reader.finish()?;
        Ok(Self { timestamp, degrees })
    }
}

#[cfg(test)]
mod tests {
    use robolink_codec::CodecError;

    use super::*;

    const PROGRESS_BYTES: [u8; 17] = [
        0x00, 0x00, 0x00, 0x11, // size
        0x01, // identifier
        0x69, 0x0B, 0x08, 0x15, // timestamp 1762330645
        0x40, 0x45, 0xE6, 0x66, 0x66, 0x66, 0x66, 0x66, // 43.8
    ];

    #[test]
    fn progress_matches_reference_bytes() {
        let packet = Progress::new(43.8).with_timestamp(1_762_330_645);
        assert_eq!(packet.encode().unwrap().as_ref(), &PROGRESS_BYTES);

        let decoded = Progress::decode(&PROGRESS_BYTES).unwrap();
        assert_eq!(decoded.timestamp, 1_762_330_645);
        assert_eq!(decoded.progress, 43.8);
    }

    #[test]
    fn temperature_uses_its_own_identifier() {
        let bytes = Temperature::new(43.8)
            .with_timestamp(1_762_330_645)
            .encode()
            .unwrap();
        assert_eq!(bytes.len(), 17);
        assert_eq!(bytes[4], TEMPERATURE);
        assert_eq!(&bytes[9..], &PROGRESS_BYTES[9..]);

        let decoded = Temperature::decode(&bytes).unwrap();
        assert_eq!(decoded.temperature, 43.8);
    }

    #[test]
    fn progress_bytes_are_not_a_temperature() {
        assert_eq!(
            Temperature::decode(&PROGRESS_BYTES).unwrap_err(),
            CodecError::UnexpectedIdentifier {
                expected: TEMPERATURE,
                found: PROGRESS,
            }
        );
    }

    #[test]
    fn roll_event_keeps_sign() {
        let packet = RollEvent::new(-90).with_timestamp(5);
        let bytes = packet.encode().unwrap();
        assert_eq!(&bytes[9..], &[0xFF, 0xFF, 0xFF, 0xA6]);
        assert_eq!(RollEvent::decode(&bytes).unwrap(), packet);
    }

    #[test]
    fn default_timestamp_is_fresh() {
        let before = current_timestamp();
        let packet = Progress::new(1.0);
        let after = current_timestamp();
        assert!(packet.timestamp >= before && packet.timestamp <= after);
    }

    #[test]
    fn missing_timestamp_in_json_uses_now() {
        let packet: Temperature = serde_json::from_str(r#"{"temperature":21.5}"#).unwrap();
        assert!(packet.timestamp > 0);
        assert_eq!(packet.temperature, 21.5);
    }
}
