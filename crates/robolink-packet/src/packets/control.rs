use bytes::Bytes;
use robolink_codec::{PacketReader, PacketWriter, Result};
use serde::{Deserialize, Serialize};

use crate::identifier::{BUTTON_EVENT, CONFIRMATION};
use crate::packet::{current_timestamp, Packet};

/// Acknowledges that the request identified by `(confirmed_request_id,
/// confirmed_request_timestamp)` completed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Confirmation {
    #[serde(default = "current_timestamp")]
    pub timestamp: u32,
    pub confirmed_request_id: u8,
    pub confirmed_request_timestamp: u32,
}

impl Confirmation {
    pub fn new(confirmed_request_id: u8, confirmed_request_timestamp: u32) -> Self {
        Self {
            timestamp: current_timestamp(),
            confirmed_request_id,
            confirmed_request_timestamp,
        }
    }

    /// Confirmation for a packet that was just decoded.
    pub fn for_packet<P: Packet>(packet: &P) -> Self {
        Self::new(P::IDENTIFIER, packet.timestamp())
    }

    pub fn with_timestamp(self, timestamp: u32) -> Self {
        Self { timestamp, ..self }
    }
}

impl Packet for Confirmation {
    const IDENTIFIER: u8 = CONFIRMATION;
    const NAME: &'static str = "confirmation";

    fn timestamp(&self) -> u32 {
        self.timestamp
    }

    fn encode(&self) -> Result<Bytes> {
        let mut writer = PacketWriter::new(Self::IDENTIFIER, self.timestamp, 1 + 4)?;
        writer.put_u8(self.confirmed_request_id);
        writer.put_u32(self.confirmed_request_timestamp);
        writer.finish()
    }

    fn decode(buf: &[u8]) -> Result<Self> {
        let mut reader = PacketReader::open(buf, Self::IDENTIFIER)?;
        let confirmed_request_id = reader.read_u8()?;
        let confirmed_request_timestamp = reader.read_u32()?;
        let timestamp = reader.timestamp();
        reader.finish()?;
        Ok(Self {
            timestamp,
            confirmed_request_id,
            confirmed_request_timestamp,
        })
    }
}

/// A UI button press. The name fills the rest of the packet, unprefixed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ButtonEvent {
    #[serde(default = "current_timestamp")]
    pub timestamp: u32,
    pub button_name: String,
}

impl ButtonEvent {
    pub fn new(button_name: impl Into<String>) -> Self {
        Self {
            timestamp: current_timestamp(),
            button_name: button_name.into(),
        }
    }

    pub fn with_timestamp(self, timestamp: u32) -> Self {
        Self { timestamp, ..self }
    }
}

impl Packet for ButtonEvent {
    const IDENTIFIER: u8 = BUTTON_EVENT;
    const NAME: &'static str = "button_event";

    fn timestamp(&self) -> u32 {
        self.timestamp
    }

    fn encode(&self) -> Result<Bytes> {
        let mut writer =
            PacketWriter::new(Self::IDENTIFIER, self.timestamp, self.button_name.len())?;
        writer.put_bytes(self.button_name.as_bytes());
        writer.finish()
    }

    fn decode(buf: &[u8]) -> Result<Self> {
        let mut reader = PacketReader::open(buf, Self::IDENTIFIER)?;
        let button_name = reader.read_rest_str("button_name")?.to_owned();
        let timestamp = reader.timestamp();
        reader.finish()?;
        Ok(Self {
            timestamp,
            button_name,
        })
    }
}
