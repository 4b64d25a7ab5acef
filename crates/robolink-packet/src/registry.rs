use std::fmt;

use bytes::Bytes;
use robolink_codec::{peek_identifier, CodecError, Result};
use tracing::{debug, trace};

use crate::config::RegistryConfig;
use crate::message::Message;
use crate::packet::Packet;
use crate::packets::{
    ButtonEvent, ConfigEntry, Confirmation, ConsoleText, FileBlob, Progress, RobotDescriptor,
    RobotListRequest, RollEvent, SelectedRobot, SlicerConfigFile, SlicerSetting, Temperature,
};

/// Decoder stored for each registered identifier.
pub type DecodeFn = fn(&[u8]) -> Result<Message>;

/// One row of the identifier table.
#[derive(Clone, Copy)]
pub struct RegistryEntry {
    identifier: u8,
    name: &'static str,
    decode: DecodeFn,
}

impl RegistryEntry {
    const fn of<P: Packet + Into<Message>>() -> Self {
        Self {
            identifier: P::IDENTIFIER,
            name: P::NAME,
            decode: decode_as::<P>,
        }
    }

    pub fn identifier(&self) -> u8 {
        self.identifier
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Decode `buf` as this entry's packet type.
    pub fn decode(&self, buf: &[u8]) -> Result<Message> {
        (self.decode)(buf)
    }
}

impl fmt::Debug for RegistryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistryEntry")
            .field("identifier", &format_args!("{:#04x}", self.identifier))
            .field("name", &self.name)
            .finish()
    }
}

fn decode_as<P: Packet + Into<Message>>(buf: &[u8]) -> Result<Message> {
    P::decode(buf).map(Into::into)
}

/// Protocol version 1 table, sorted by identifier.
static PACKETS: [RegistryEntry; 13] = [
    RegistryEntry::of::<Progress>(),
    RegistryEntry::of::<Temperature>(),
    RegistryEntry::of::<FileBlob>(),
    RegistryEntry::of::<ConfigEntry>(),
    RegistryEntry::of::<RobotDescriptor>(),
    RegistryEntry::of::<RobotListRequest>(),
    RegistryEntry::of::<Confirmation>(),
    RegistryEntry::of::<ButtonEvent>(),
    RegistryEntry::of::<ConsoleText>(),
    RegistryEntry::of::<SlicerSetting>(),
    RegistryEntry::of::<SlicerConfigFile>(),
    RegistryEntry::of::<SelectedRobot>(),
    RegistryEntry::of::<RollEvent>(),
];

/// Identifier-keyed dispatch table from raw buffers to typed packets.
///
/// The table is fixed at compile time; a registry only adds size limits on
/// top of it, so it is cheap to copy and safe to share across threads.
#[derive(Debug, Clone)]
pub struct PacketRegistry {
    entries: &'static [RegistryEntry],
    config: RegistryConfig,
}

impl PacketRegistry {
    /// Create a registry with default config.
    pub fn new() -> Self {
        Self::with_config(RegistryConfig::default())
    }

    /// Create a registry with explicit config.
    pub fn with_config(config: RegistryConfig) -> Self {
        Self {
            entries: &PACKETS,
            config,
        }
    }

    /// Decode one packet, dispatching on the identifier at byte 4.
    pub fn get_message_type(&self, buf: &[u8]) -> Result<Message> {
        if buf.len() > self.config.max_message_size {
            debug!(
                size = buf.len(),
                max = self.config.max_message_size,
                "rejecting oversized packet"
            );
            return Err(CodecError::MessageTooLarge {
                size: buf.len(),
                max: self.config.max_message_size,
            });
        }

        let identifier = peek_identifier(buf)?;
        let entry = self.entry(identifier).ok_or_else(|| {
            debug!(identifier, size = buf.len(), "no packet registered for identifier");
            CodecError::UnknownIdentifier(identifier)
        })?;

        trace!(identifier, packet = entry.name, size = buf.len(), "decoding packet");
        entry.decode(buf).inspect_err(|err| {
            debug!(identifier, packet = entry.name, error = %err, "packet decode failed");
        })
    }

    /// Alias of [`PacketRegistry::get_message_type`].
    pub fn decode(&self, buf: &[u8]) -> Result<Message> {
        self.get_message_type(buf)
    }

    /// Encode a message, enforcing the configured size limit.
    pub fn encode(&self, message: &Message) -> Result<Bytes> {
        let bytes = message.encode()?;
        if bytes.len() > self.config.max_message_size {
            return Err(CodecError::MessageTooLarge {
                size: bytes.len(),
                max: self.config.max_message_size,
            });
        }
        trace!(
            identifier = message.identifier(),
            packet = message.name(),
            size = bytes.len(),
            "encoded packet"
        );
        Ok(bytes)
    }

    /// Look up the table row for an identifier.
    pub fn entry(&self, identifier: u8) -> Option<&RegistryEntry> {
        self.entries
            .binary_search_by_key(&identifier, |entry| entry.identifier)
            .ok()
            .map(|index| &self.entries[index])
    }

    /// All rows, sorted by identifier.
    pub fn entries(&self) -> &[RegistryEntry] {
        self.entries
    }

    /// Registered identifiers in ascending order.
    pub fn identifiers(&self) -> Vec<u8> {
        self.entries.iter().map(|entry| entry.identifier).collect()
    }

    /// Check if an identifier is registered.
    pub fn contains(&self, identifier: u8) -> bool {
        self.entry(identifier).is_some()
    }

    /// Get registry configuration.
    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }
}

impl Default for PacketRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Decode one packet with a default-configured registry.
pub fn get_message_type(buf: &[u8]) -> Result<Message> {
    PacketRegistry::new().get_message_type(buf)
}
