use std::time::{SystemTime, UNIX_EPOCH};

use bytes::Bytes;
use robolink_codec::Result;

/// A packet type with a fixed identifier and its own payload layout.
///
/// `encode` produces exactly one packet's bytes; `decode` accepts exactly one
/// packet's bytes and is all-or-nothing.
pub trait Packet: Sized {
    /// Identifier byte written at offset 4.
    const IDENTIFIER: u8;

    /// Stable snake_case name, used in logs and CLI output.
    const NAME: &'static str;

    /// Producer-assigned timestamp.
    fn timestamp(&self) -> u32;

    /// Serialize this packet, header included.
    fn encode(&self) -> Result<Bytes>;

    /// Parse one packet of this type.
    fn decode(buf: &[u8]) -> Result<Self>;
}

/// Identifier of a packet type, without needing an instance.
pub fn get_identifier<P: Packet>() -> u8 {
    P::IDENTIFIER
}

/// Current time in unsigned seconds, evaluated on every call.
pub fn current_timestamp() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| u32::try_from(d.as_secs()).unwrap_or(u32::MAX))
        .unwrap_or(0)
}
