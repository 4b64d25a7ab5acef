//! Wire-level building blocks for robolink packets.
//!
//! Every packet starts with the same 9-byte header:
//! - A 4-byte big-endian total size (header included)
//! - A 1-byte identifier selecting the packet type
//! - A 4-byte big-endian timestamp in unsigned seconds
//!
//! The payload that follows is built from fixed-width big-endian scalars,
//! `u32` length-prefixed byte/text fields, an optional trailing
//! rest-of-buffer field, and self-describing tagged values. All length
//! prefixes are grouped in the fixed portion; the variable bytes follow in
//! the same order.
//!
//! This crate never performs I/O: it turns one packet's bytes into fields and
//! back.

pub mod error;
pub mod header;
pub mod reader;
pub mod tagged;
pub mod writer;

pub use error::{CodecError, Result};
pub use header::{
    peek_identifier, read_header, total_size, write_header, Header, HEADER_SIZE,
    IDENTIFIER_OFFSET, MAX_WIRE_SIZE,
};
pub use reader::{PacketReader, LENGTH_PREFIX_SIZE};
pub use tagged::{TaggedValue, ValueTag};
pub use writer::{length_prefix, PacketWriter};
