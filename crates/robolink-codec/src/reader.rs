use bytes::Buf;

use crate::error::{CodecError, Result};
use crate::header::{read_header, Header, HEADER_SIZE};
use crate::tagged::{bool_from_byte, TaggedValue, ValueTag};

/// Width of a `u32` length prefix.
pub const LENGTH_PREFIX_SIZE: usize = 4;

/// Cursor over the payload of one packet.
///
/// Every read is bounds-checked against the declared total size, so a short
/// or inconsistent buffer fails with an error instead of a partial value.
#[derive(Debug)]
pub struct PacketReader<'a> {
    header: Header,
    buf: &'a [u8],
    pos: usize,
}

impl<'a> PacketReader<'a> {
    /// Validate the header of `buf` and position the cursor on its payload.
    ///
    /// Fails with `UnexpectedIdentifier` if the packet is not of type
    /// `expected`.
    pub fn open(buf: &'a [u8], expected: u8) -> Result<Self> {
        let header = read_header(buf)?;
        if header.identifier != expected {
            return Err(CodecError::UnexpectedIdentifier {
                expected,
                found: header.identifier,
            });
        }

        Ok(Self {
            header,
            buf,
            pos: HEADER_SIZE,
        })
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn timestamp(&self) -> u32 {
        self.header.timestamp
    }

    /// Bytes not yet consumed.
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    fn take(&mut self, len: usize) -> Result<&'a [u8]> {
        if len > self.remaining() {
            return Err(CodecError::TruncatedBuffer {
                needed: len,
                remaining: self.remaining(),
            });
        }
        let bytes = &self.buf[self.pos..self.pos + len];
        self.pos += len;
        Ok(bytes)
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.take(1)?.get_u8())
    }

    pub fn read_u32(&mut self) -> Result<u32> {
        Ok(self.take(4)?.get_u32())
    }

    pub fn read_i32(&mut self) -> Result<i32> {
        Ok(self.take(4)?.get_i32())
    }

    pub fn read_f32(&mut self) -> Result<f32> {
        Ok(self.take(4)?.get_f32())
    }

    pub fn read_f64(&mut self) -> Result<f64> {
        Ok(self.take(8)?.get_f64())
    }

    /// Read a bool byte; anything other than `0` or `1` is rejected.
    pub fn read_bool(&mut self) -> Result<bool> {
        bool_from_byte(self.read_u8()?)
    }

    /// Read a `u32` length prefix.
    pub fn read_len(&mut self) -> Result<usize> {
        Ok(self.read_u32()? as usize)
    }

    /// Read exactly `len` raw bytes.
    pub fn read_bytes(&mut self, len: usize) -> Result<&'a [u8]> {
        self.take(len)
    }

    /// Read exactly `len` bytes and decode them as UTF-8.
    pub fn read_str(&mut self, len: usize, field: &'static str) -> Result<&'a str> {
        let bytes = self.take(len)?;
        std::str::from_utf8(bytes).map_err(|source| CodecError::InvalidUtf8 { field, source })
    }

    /// Consume every remaining byte. Only valid for the last field of a packet.
    pub fn read_rest(&mut self) -> &'a [u8] {
        let rest = &self.buf[self.pos..];
        self.pos = self.buf.len();
        rest
    }

    /// Consume every remaining byte as UTF-8 text.
    pub fn read_rest_str(&mut self, field: &'static str) -> Result<&'a str> {
        let rest = self.read_rest();
        std::str::from_utf8(rest).map_err(|source| CodecError::InvalidUtf8 { field, source })
    }

    /// Read a tagged value's tag byte and length from the fixed portion.
    pub fn read_tag_header(&mut self) -> Result<(ValueTag, usize)> {
        let tag = ValueTag::try_from(self.read_u8()?)?;
        let len = self.read_len()?;
        if let Some(width) = tag.fixed_width() {
            if len != width {
                return Err(CodecError::InvalidTagEncoding(format!(
                    "{} value must be {width} bytes, declared {len}",
                    tag.name()
                )));
            }
        }
        Ok((tag, len))
    }

    /// Read a tagged value's raw bytes from the variable region.
    pub fn read_tagged(&mut self, tag: ValueTag, len: usize) -> Result<TaggedValue> {
        let raw = self.take(len)?;
        TaggedValue::decode(tag, raw)
    }

    /// Finish decoding; every byte of the packet must have been consumed.
    pub fn finish(self) -> Result<()> {
        if self.pos != self.buf.len() {
            return Err(CodecError::SizeMismatch {
                declared: self.pos,
                actual: self.buf.len(),
            });
        }
        Ok(())
    }
}
