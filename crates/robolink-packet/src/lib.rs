//! Typed robolink packets and the registry that routes raw buffers to them.
//!
//! Each packet type implements [`Packet`] with a fixed identifier and its own
//! payload layout. [`PacketRegistry`] reads the identifier byte of an
//! incoming buffer and decodes it into the matching [`Message`] variant.
//!
//! ```
//! use robolink_packet::{get_message_type, Message, Packet, Progress};
//!
//! let bytes = Progress::new(43.8).with_timestamp(1_762_330_645).encode()?;
//! assert_eq!(bytes.len(), 17);
//!
//! match get_message_type(&bytes)? {
//!     Message::Progress(p) => assert_eq!(p.progress, 43.8),
//!     other => panic!("unexpected {}", other.name()),
//! }
//! # Ok::<(), robolink_packet::CodecError>(())
//! ```

pub mod config;
pub mod identifier;
pub mod message;
pub mod packet;
pub mod packets;
pub mod registry;

pub use config::{RegistryConfig, DEFAULT_MAX_MESSAGE_SIZE};
pub use message::Message;
pub use packet::{current_timestamp, get_identifier, Packet};
pub use packets::*;
pub use registry::{get_message_type, DecodeFn, PacketRegistry, RegistryEntry};
pub use robolink_codec::{CodecError, Result, TaggedValue, ValueTag, HEADER_SIZE};
