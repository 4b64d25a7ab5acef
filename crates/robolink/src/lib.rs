//! Binary message codec for robot controller/device links.
//!
//! robolink encodes and decodes the fixed-header packets exchanged between a
//! controller application and a device: progress and temperature readings,
//! file blobs, configuration entries, robot descriptors, confirmations and
//! console output.
//!
//! # Crate Structure
//!
//! - [`codec`]: header, scalar, length-prefixed and tagged-value codecs
//! - [`packet`]: typed packets, the [`Message`] enum and [`PacketRegistry`]
//!
//! The `robolink` binary (feature `cli`) encodes JSON into packets and
//! decodes packets back into JSON for inspection.

/// Re-export wire-level codec types.
pub mod codec {
    pub use robolink_codec::*;
}

/// Re-export packet types and the registry.
pub mod packet {
    pub use robolink_packet::*;
}

pub use robolink_packet::{
    get_identifier, get_message_type, CodecError, Message, Packet, PacketRegistry,
    RegistryConfig, Result,
};
