//! Packets that carry a single blob or text body as their last field.

use bytes::Bytes;
use robolink_codec::{PacketReader, PacketWriter, Result, LENGTH_PREFIX_SIZE};
use serde::{Deserialize, Serialize};

use crate::identifier::{CONSOLE_TEXT, FILE_BLOB, SLICER_CONFIG_FILE};
use crate::packet::{current_timestamp, Packet};

/// Binary file contents, e.g. an STL model.
///
/// The blob is length-prefixed and must end the packet. Bytes are carried
/// verbatim; no text decoding is applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileBlob {
    #[serde(default = "current_timestamp")]
    pub timestamp: u32,
    pub blob: Vec<u8>,
}

impl FileBlob {
    pub fn new(blob: impl Into<Vec<u8>>) -> Self {
        Self {
            timestamp: current_timestamp(),
            blob: blob.into(),
        }
    }

    pub fn with_timestamp(self, timestamp: u32) -> Self {
        Self { timestamp, ..self }
    }
}

impl Packet for FileBlob {
    const IDENTIFIER: u8 = FILE_BLOB;
    const NAME: &'static str = "file_blob";

    fn timestamp(&self) -> u32 {
        self.timestamp
    }

    fn encode(&self) -> Result<Bytes> {
        let payload_len = LENGTH_PREFIX_SIZE + self.blob.len();
        let mut writer = PacketWriter::new(Self::IDENTIFIER, self.timestamp, payload_len)?;
        writer.put_len(self.blob.len())?;
        writer.put_bytes(&self.blob);
        writer.finish()
    }

    fn decode(buf: &[u8]) -> Result<Self> {
        let mut reader = PacketReader::open(buf, Self::IDENTIFIER)?;
        let blob_len = reader.read_len()?;
        let blob = reader.read_bytes(blob_len)?.to_vec();
        let timestamp = reader.timestamp();
        reader.finish()?;
        Ok(Self { timestamp, blob })
    }
}

/// Raw console output from the device.
///
/// Laid out like [`FileBlob`]: a `u32` length, then the bytes, which must end
/// the packet. The text is not required to be UTF-8.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsoleText {
    #[serde(default = "current_timestamp")]
    pub timestamp: u32,
    pub text: Vec<u8>,
}

impl ConsoleText {
    pub fn new(text: impl Into<Vec<u8>>) -> Self {
        Self {
            timestamp: current_timestamp(),
            text: text.into(),
        }
    }

    pub fn with_timestamp(self, timestamp: u32) -> Self {
        Self { timestamp, ..self }
    }

    /// The text with invalid UTF-8 sequences replaced.
    pub fn to_string_lossy(&self) -> String {
        String::from_utf8_lossy(&self.text).into_owned()
    }
}

impl Packet for ConsoleText {
    const IDENTIFIER: u8 = CONSOLE_TEXT;
    const NAME: &'static str = "console_text";

    fn timestamp(&self) -> u32 {
        self.timestamp
    }

    fn encode(&self) -> Result<Bytes> {
        let payload_len = LENGTH_PREFIX_SIZE + self.text.len();
        let mut writer = PacketWriter::new(Self::IDENTIFIER, self.timestamp, payload_len)?;
        writer.put_len(self.text.len())?;
        writer.put_bytes(&self.text);
        writer.finish()
    }

    fn decode(buf: &[u8]) -> Result<Self> {
        let mut reader = PacketReader::open(buf, Self::IDENTIFIER)?;
        let text_len = reader.read_len()?;
        let text = reader.read_bytes(text_len)?.to_vec();
        let timestamp = reader.timestamp();
        reader.finish()?;
        Ok(Self { timestamp, text })
    }
}

/// Full contents of the slicer configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlicerConfigFile {
    #[serde(default = "current_timestamp")]
    pub timestamp: u32,
    pub content: String,
}

impl SlicerConfigFile {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            timestamp: current_timestamp(),
            content: content.into(),
        }
    }

    pub fn with_timestamp(self, timestamp: u32) -> Self {
        Self { timestamp, ..self }
    }
}

impl Packet for SlicerConfigFile {
    const IDENTIFIER: u8 = SLICER_CONFIG_FILE;
    const NAME: &'static str = "slicer_config_file";

    fn timestamp(&self) -> u32 {
        self.timestamp
    }

    fn encode(&self) -> Result<Bytes> {
        let payload_len = LENGTH_PREFIX_SIZE + self.content.len();
        let mut writer = PacketWriter::new(Self::IDENTIFIER, self.timestamp, payload_len)?;
        writer.put_len(self.content.len())?;
        writer.put_bytes(self.content.as_bytes());
        writer.finish()
    }

    fn decode(buf: &[u8]) -> Result<Self> {
        let mut reader = PacketReader::open(buf, Self::IDENTIFIER)?;
        let content_len = reader.read_len()?;
        let content = reader.read_str(content_len, "content")?.to_owned();
        let timestamp = reader.timestamp();
        reader.finish()?;
        Ok(Self { timestamp, content })
    }
}
