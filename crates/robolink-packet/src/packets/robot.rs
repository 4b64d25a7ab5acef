use bytes::Bytes;
use robolink_codec::{PacketReader, PacketWriter, Result, LENGTH_PREFIX_SIZE};
use serde::{Deserialize, Serialize};

use crate::identifier::{ROBOT_DESCRIPTOR, ROBOT_LIST_REQUEST, SELECTED_ROBOT};
use crate::packet::{current_timestamp, Packet};

/// Fixed payload width: two length prefixes, four `u32` specs, one `f32`.
const DESCRIPTOR_FIXED_LEN: usize = 2 * LENGTH_PREFIX_SIZE + 4 * 4 + 4;

/// Description of a robot arm available on the device.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RobotDescriptor {
    #[serde(default = "current_timestamp")]
    pub timestamp: u32,
    pub model: String,
    pub brand: String,
    /// Number of axes.
    pub axis: u32,
    /// Reach in millimetres.
    pub reach: u32,
    /// Rated payload in grams.
    pub payload: u32,
    /// Robot weight in grams.
    pub weight: u32,
    /// Repeatability in millimetres.
    pub accuracy: f32,
}

impl RobotDescriptor {
    pub fn new(model: impl Into<String>, brand: impl Into<String>) -> Self {
        Self {
            timestamp: current_timestamp(),
            model: model.into(),
            brand: brand.into(),
            axis: 0,
            reach: 0,
            payload: 0,
            weight: 0,
            accuracy: 0.0,
        }
    }

    pub fn with_timestamp(self, timestamp: u32) -> Self {
        Self { timestamp, ..self }
    }

    pub fn with_specs(self, axis: u32, reach: u32, payload: u32, weight: u32) -> Self {
        Self {
            axis,
            reach,
            payload,
            weight,
            ..self
        }
    }

    pub fn with_accuracy(self, accuracy: f32) -> Self {
        Self { accuracy, ..self }
    }
}

impl Packet for RobotDescriptor {
    const IDENTIFIER: u8 = ROBOT_DESCRIPTOR;
    const NAME: &'static str = "robot_descriptor";

    fn timestamp(&self) -> u32 {
        self.timestamp
    }

    fn encode(&self) -> Result<Bytes> {
        let payload_len = DESCRIPTOR_FIXED_LEN + self.model.len() + self.brand.len();
        let mut writer = PacketWriter::new(Self::IDENTIFIER, self.timestamp, payload_len)?;
        writer.put_len(self.model.len())?;
        writer.put_len(self.brand.len())?;
        writer.put_u32(self.axis);
        writer.put_u32(self.reach);
        writer.put_u32(self.payload);
        writer.put_u32(self.weight);
        writer.put_f32(self.accuracy);
        writer.put_bytes(self.model.as_bytes());
        writer.put_bytes(self.brand.as_bytes());
        writer.finish()
    }

    fn decode(buf: &[u8]) -> Result<Self> {
        let mut reader = PacketReader::open(buf, Self::IDENTIFIER)?;
        let model_len = reader.read_len()?;
        let brand_len = reader.read_len()?;
        let axis = reader.read_u32()?;
        let reach = reader.read_u32()?;
        let payload = reader.read_u32()?;
        let weight = reader.read_u32()?;
        let accuracy = reader.read_f32()?;
        let model = reader.read_str(model_len, "model")?.to_owned();
        let brand = reader.read_str(brand_len, "brand")?.to_owned();
        let timestamp = reader.timestamp();
        reader.finish()?;

        Ok(Self {
            timestamp,
            model,
            brand,
            axis,
            reach,
            payload,
            weight,
            accuracy,
        })
    }
}

/// The robot the operator picked, as `"<model> <brand>"` or similar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedRobot {
    #[serde(default = "current_timestamp")]
    pub timestamp: u32,
    pub model_brand: String,
}

impl SelectedRobot {
    pub fn new(model_brand: impl Into<String>) -> Self {
        Self {
            timestamp: current_timestamp(),
            model_brand: model_brand.into(),
        }
    }

    pub fn with_timestamp(self, timestamp: u32) -> Self {
        Self { timestamp, ..self }
    }
}

impl Packet for SelectedRobot {
    const IDENTIFIER: u8 = SELECTED_ROBOT;
    const NAME: &'static str = "selected_robot";

    fn timestamp(&self) -> u32 {
        self.timestamp
    }

    fn encode(&self) -> Result<Bytes> {
        let payload_len = LENGTH_PREFIX_SIZE + self.model_brand.len();
        let mut writer = PacketWriter::new(Self::IDENTIFIER, self.timestamp, payload_len)?;
        writer.put_len(self.model_brand.len())?;
        writer.put_bytes(self.model_brand.as_bytes());
        writer.finish()
    }

    fn decode(buf: &[u8]) -> Result<Self> {
        let mut reader = PacketReader::open(buf, Self::IDENTIFIER)?;
        let len = reader.read_len()?;
        let model_brand = reader.read_str(len, "model_brand")?.to_owned();
        let timestamp = reader.timestamp();
        reader.finish()?;
        Ok(Self {
            timestamp,
            model_brand,
        })
    }
}

/// Asks the device to send a [`RobotDescriptor`] for every loaded robot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RobotListRequest {
    #[serde(default = "current_timestamp")]
    pub timestamp: u32,
}

impl RobotListRequest {
    pub fn new() -> Self {
        Self {
            timestamp: current_timestamp(),
        }
    }

    pub fn with_timestamp(self, timestamp: u32) -> Self {
        Self { timestamp }
    }
}

impl Default for RobotListRequest {
    fn default() -> Self {
        Self::new()
    }
}

impl Packet for RobotListRequest {
    const IDENTIFIER: u8 = ROBOT_LIST_REQUEST;
    const NAME: &'static str = "robot_list_request";

    fn timestamp(&self) -> u32 {
        self.timestamp
    }

    fn encode(&self) -> Result<Bytes> {
        PacketWriter::new(Self::IDENTIFIER, self.timestamp, 0)?.finish()
    }

    fn decode(buf: &[u8]) -> Result<Self> {
        let reader = PacketReader::open(buf, Self::IDENTIFIER)?;
        let timestamp = reader.timestamp();
        reader.finish()?;
        Ok(Self { timestamp })
    }
}
