use bytes::{Buf, BufMut};

use crate::error::{CodecError, Result};

/// Header: size (4) + identifier (1) + timestamp (4) = 9 bytes.
pub const HEADER_SIZE: usize = 9;

/// Byte offset of the identifier inside every packet.
pub const IDENTIFIER_OFFSET: usize = 4;

/// Largest total size the 4-byte size field can describe.
pub const MAX_WIRE_SIZE: usize = u32::MAX as usize;

/// The fixed prefix shared by every packet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    /// Exact byte length of the whole packet, header included.
    pub total_size: u32,
    /// Packet type selector.
    pub identifier: u8,
    /// Producer-assigned timestamp in unsigned seconds.
    pub timestamp: u32,
}

impl Header {
    /// Payload length implied by the declared total size.
    pub fn payload_len(&self) -> usize {
        (self.total_size as usize).saturating_sub(HEADER_SIZE)
    }
}

/// Write a packet header for a payload of `payload_len` bytes.
///
/// Wire format:
/// ```text
/// ┌──────────────┬────────────┬──────────────┬─────────────────┐
/// │ Size (4B BE) │ Id (1B)    │ Timestamp    │ Payload         │
/// │ header +     │            │ (4B BE)      │ (payload_len)   │
/// │ payload      │            │              │                 │
/// └──────────────┴────────────┴──────────────┴─────────────────┘
/// ```
///
/// Returns the total size written into the size field.
pub fn write_header<B: BufMut>(
    dst: &mut B,
    identifier: u8,
    timestamp: u32,
    payload_len: usize,
) -> Result<u32> {
    let total = total_size(payload_len)?;
    dst.put_u32(total);
    dst.put_u8(identifier);
    dst.put_u32(timestamp);
    Ok(total)
}

/// Total wire size of a packet carrying `payload_len` payload bytes.
pub fn total_size(payload_len: usize) -> Result<u32> {
    let total = HEADER_SIZE
        .checked_add(payload_len)
        .filter(|total| *total <= MAX_WIRE_SIZE)
        .ok_or(CodecError::MessageTooLarge {
            size: HEADER_SIZE.saturating_add(payload_len),
            max: MAX_WIRE_SIZE,
        })?;
    Ok(total as u32)
}

/// Read and validate the header at the start of `buf`.
///
/// `buf` must hold exactly one packet: the declared total size has to equal
/// `buf.len()`.
pub fn read_header(buf: &[u8]) -> Result<Header> {
    if buf.len() < HEADER_SIZE {
        return Err(CodecError::TruncatedBuffer {
            needed: HEADER_SIZE,
            remaining: buf.len(),
        });
    }

    let mut src = &buf[..HEADER_SIZE];
    let header = Header {
        total_size: src.get_u32(),
        identifier: src.get_u8(),
        timestamp: src.get_u32(),
    };

    if header.total_size as usize != buf.len() {
        return Err(CodecError::SizeMismatch {
            declared: header.total_size as usize,
            actual: buf.len(),
        });
    }

    Ok(header)
}

/// Peek at the identifier byte without validating anything else.
pub fn peek_identifier(buf: &[u8]) -> Result<u8> {
    buf.get(IDENTIFIER_OFFSET)
        .copied()
        .ok_or(CodecError::TruncatedBuffer {
            needed: IDENTIFIER_OFFSET + 1,
            remaining: buf.len(),
        })
}

#[cfg(test)]
mod tests {
    use bytes::BytesMut;

    use super::*;

    #[test]
    fn header_layout_is_big_endian() {
        let mut buf = BytesMut::new();
        let total = write_header(&mut buf, 0x01, 1_762_330_645, 8).unwrap();

        assert_eq!(total, 17);
        assert_eq!(
            buf.as_ref(),
            &[0x00, 0x00, 0x00, 0x11, 0x01, 0x69, 0x0B, 0x08, 0x15]
        );
    }

    #[test]
    fn read_header_accepts_exact_buffer() {
        let mut buf = BytesMut::new();
        write_header(&mut buf, 0x06, 42, 0).unwrap();

        let header = read_header(&buf).unwrap();
        assert_eq!(
            header,
            Header {
                total_size: 9,
                identifier: 0x06,
                timestamp: 42,
            }
        );
        assert_eq!(header.payload_len(), 0);
    }

    #[test]
    fn read_header_rejects_short_buffer() {
        let err = read_header(&[0x00, 0x00, 0x00, 0x09, 0x06]).unwrap_err();
        assert_eq!(
            err,
            CodecError::TruncatedBuffer {
                needed: HEADER_SIZE,
                remaining: 5,
            }
        );
    }

    #[test]
    fn read_header_rejects_size_mismatch() {
        let mut buf = BytesMut::new();
        write_header(&mut buf, 0x01, 0, 8).unwrap();

        let err = read_header(&buf).unwrap_err();
        assert_eq!(
            err,
            CodecError::SizeMismatch {
                declared: 17,
                actual: 9,
            }
        );
    }

    #[test]
    fn oversized_payload_is_rejected() {
        let mut buf = BytesMut::new();
        let err = write_header(&mut buf, 0x03, 0, MAX_WIRE_SIZE).unwrap_err();
        assert!(matches!(err, CodecError::MessageTooLarge { .. }));
        assert!(buf.is_empty());
    }

    #[test]
    fn peek_identifier_needs_five_bytes() {
        assert_eq!(peek_identifier(&[0, 0, 0, 9, 0x0A]).unwrap(), 0x0A);
        assert!(matches!(
            peek_identifier(&[0, 0, 0, 9]),
            Err(CodecError::TruncatedBuffer { needed: 5, .. })
        ));
    }
}
