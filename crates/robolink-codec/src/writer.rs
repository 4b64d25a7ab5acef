use bytes::{BufMut, Bytes, BytesMut};

use crate::error::{CodecError, Result};
use crate::header::{total_size, write_header, MAX_WIRE_SIZE};
use crate::tagged::TaggedValue;

/// Builds one packet into a single buffer.
///
/// The header is written up front from the payload length the caller
/// computed; [`PacketWriter::finish`] checks that exactly that many payload
/// bytes were written.
#[derive(Debug)]
pub struct PacketWriter {
    buf: BytesMut,
    total: usize,
}

impl PacketWriter {
    /// Start a packet whose payload will be `payload_len` bytes long.
    pub fn new(identifier: u8, timestamp: u32, payload_len: usize) -> Result<Self> {
        let total = total_size(payload_len)? as usize;
        let mut buf = BytesMut::with_capacity(total);
        write_header(&mut buf, identifier, timestamp, payload_len)?;
        Ok(Self { buf, total })
    }

    pub fn put_u8(&mut self, value: u8) {
        self.buf.put_u8(value);
    }

    pub fn put_u32(&mut self, value: u32) {
        self.buf.put_u32(value);
    }

    pub fn put_i32(&mut self, value: i32) {
        self.buf.put_i32(value);
    }

    pub fn put_f32(&mut self, value: f32) {
        self.buf.put_f32(value);
    }

    pub fn put_f64(&mut self, value: f64) {
        self.buf.put_f64(value);
    }

    pub fn put_bool(&mut self, value: bool) {
        self.buf.put_u8(u8::from(value));
    }

    /// Write a `u32` length prefix for a field of `len` bytes.
    pub fn put_len(&mut self, len: usize) -> Result<()> {
        self.buf.put_u32(length_prefix(len)?);
        Ok(())
    }

    /// Write raw bytes with no prefix.
    pub fn put_bytes(&mut self, bytes: &[u8]) {
        self.buf.put_slice(bytes);
    }

    /// Write a tagged value's tag byte and length into the fixed portion.
    pub fn put_tag_header(&mut self, value: &TaggedValue) -> Result<()> {
        self.buf.put_u8(value.tag().as_u8());
        self.put_len(value.encoded_len())
    }

    /// Write a tagged value's raw bytes into the variable region.
    pub fn put_tagged(&mut self, value: &TaggedValue) {
        value.write_value(&mut self.buf);
    }

    /// Seal the packet and hand out its bytes.
    pub fn finish(self) -> Result<Bytes> {
        if self.buf.len() != self.total {
            return Err(CodecError::SizeMismatch {
                declared: self.total,
                actual: self.buf.len(),
            });
        }
        Ok(self.buf.freeze())
    }
}

/// Convert a field length into its `u32` wire prefix.
pub fn length_prefix(len: usize) -> Result<u32> {
    u32::try_from(len).map_err(|_| CodecError::MessageTooLarge {
        size: len,
        max: MAX_WIRE_SIZE,
    })
}
