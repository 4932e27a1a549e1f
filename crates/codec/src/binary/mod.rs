//! Binary primitives shared by the compact and portable formats
//!
//! # Primitive Encoding
//!
//! All integers are little-endian.
//!
//! ```text
//! text:           u32 byte length + UTF-8 bytes
//! optional text:  u8 presence flag (0 = absent, 1 = present) + text
//! i32:            4 bytes
//! sequence:       u32 element count + elements
//! ```
//!
//! [`ByteSink`] appends primitives to a growable buffer. [`ByteCursor`] reads
//! them back with bounds checks: running off the end, a length prefix past
//! the end of the buffer, or invalid UTF-8 is a `MalformedEncoding`.

pub mod field;
pub mod records;
pub mod registry;

pub use field::{ErasedFieldCodec, FieldCodec};
pub use records::{AddressCodec, AnimalCodec, PersonCodec};
pub use registry::{global_registry, install_global_registry, CodecRegistry};

use std::io::{self, Read};

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};

use kvcodec_core::{CodecError, CodecResult};

/// Growable byte buffer with typed primitive writes
///
/// A write that fails leaves the buffer in an unspecified state. Callers
/// drop the whole sink on error and never reuse it.
#[derive(Debug, Default)]
pub struct ByteSink {
    buf: Vec<u8>,
    codec: &'static str,
}

impl ByteSink {
    /// Create an empty sink; `codec` names the format in errors
    pub fn new(codec: &'static str) -> Self {
        ByteSink {
            buf: Vec::new(),
            codec,
        }
    }

    /// Bytes written so far
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// True if nothing has been written
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Borrow the written bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Take the written bytes
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    fn io_err(&self, e: io::Error) -> CodecError {
        CodecError::malformed(self.codec, format!("write failed: {}", e))
    }

    /// Append a single byte
    pub fn write_u8(&mut self, value: u8) -> CodecResult<()> {
        self.buf.write_u8(value).map_err(|e| self.io_err(e))
    }

    /// Append a u16
    pub fn write_u16(&mut self, value: u16) -> CodecResult<()> {
        self.buf
            .write_u16::<LittleEndian>(value)
            .map_err(|e| self.io_err(e))
    }

    /// Append a u32
    pub fn write_u32(&mut self, value: u32) -> CodecResult<()> {
        self.buf
            .write_u32::<LittleEndian>(value)
            .map_err(|e| self.io_err(e))
    }

    /// Append an i32
    pub fn write_i32(&mut self, value: i32) -> CodecResult<()> {
        self.buf
            .write_i32::<LittleEndian>(value)
            .map_err(|e| self.io_err(e))
    }

    /// Append an i64
    pub fn write_i64(&mut self, value: i64) -> CodecResult<()> {
        self.buf
            .write_i64::<LittleEndian>(value)
            .map_err(|e| self.io_err(e))
    }

    /// Append raw bytes with no prefix
    pub fn write_raw(&mut self, bytes: &[u8]) -> CodecResult<()> {
        self.buf.extend_from_slice(bytes);
        Ok(())
    }

    /// Append a u32 length or element count
    pub fn write_len(&mut self, len: usize) -> CodecResult<()> {
        let len = u32::try_from(len)
            .map_err(|_| CodecError::malformed(self.codec, format!("length {} exceeds u32", len)))?;
        self.write_u32(len)
    }

    /// Append length-prefixed UTF-8 text
    pub fn write_text(&mut self, value: &str) -> CodecResult<()> {
        self.write_len(value.len())?;
        self.write_raw(value.as_bytes())
    }

    /// Append a presence flag followed by the text if present
    pub fn write_optional_text(&mut self, value: Option<&str>) -> CodecResult<()> {
        match value {
            Some(text) => {
                self.write_u8(1)?;
                self.write_text(text)
            }
            None => self.write_u8(0),
        }
    }
}

/// Bounds-checked reader over an encoded buffer
#[derive(Debug)]
pub struct ByteCursor<'a> {
    data: &'a [u8],
    pos: usize,
    codec: &'static str,
}

impl<'a> ByteCursor<'a> {
    /// Create a cursor at the start of `data`; `codec` names the format in errors
    pub fn new(data: &'a [u8], codec: &'static str) -> Self {
        ByteCursor {
            data,
            pos: 0,
            codec,
        }
    }

    /// Current read offset
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Bytes left to read
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    /// True once every byte has been consumed
    pub fn is_exhausted(&self) -> bool {
        self.remaining() == 0
    }

    /// Build a malformed-encoding error for this cursor's format
    pub fn malformed(&self, detail: impl Into<String>) -> CodecError {
        CodecError::malformed(self.codec, detail)
    }

    /// Consume the next `len` bytes
    pub fn take(&mut self, len: usize) -> CodecResult<&'a [u8]> {
        if len > self.remaining() {
            return Err(self.malformed(format!(
                "unexpected end of input: need {} bytes at offset {}, {} remaining",
                len,
                self.pos,
                self.remaining()
            )));
        }
        let bytes = &self.data[self.pos..self.pos + len];
        self.pos += len;
        Ok(bytes)
    }

    fn io_err(&self, e: io::Error) -> CodecError {
        self.malformed(format!("read failed: {}", e))
    }

    /// Read a single byte
    pub fn read_u8(&mut self) -> CodecResult<u8> {
        let mut bytes = self.take(1)?;
        bytes.read_u8().map_err(|e| self.io_err(e))
    }

    /// Read a u16
    pub fn read_u16(&mut self) -> CodecResult<u16> {
        let mut bytes = self.take(2)?;
        bytes
            .read_u16::<LittleEndian>()
            .map_err(|e| self.io_err(e))
    }

    /// Read a u32
    pub fn read_u32(&mut self) -> CodecResult<u32> {
        let mut bytes = self.take(4)?;
        bytes
            .read_u32::<LittleEndian>()
            .map_err(|e| self.io_err(e))
    }

    /// Read an i32
    pub fn read_i32(&mut self) -> CodecResult<i32> {
        let mut bytes = self.take(4)?;
        bytes
            .read_i32::<LittleEndian>()
            .map_err(|e| self.io_err(e))
    }

    /// Read an i64
    pub fn read_i64(&mut self) -> CodecResult<i64> {
        let mut bytes = self.take(8)?;
        bytes
            .read_i64::<LittleEndian>()
            .map_err(|e| self.io_err(e))
    }

    /// Read a u32 length or element count
    pub fn read_len(&mut self) -> CodecResult<usize> {
        Ok(self.read_u32()? as usize)
    }

    /// Read length-prefixed UTF-8 text
    pub fn read_text(&mut self) -> CodecResult<String> {
        let len = self.read_len()?;
        if len > self.remaining() {
            return Err(self.malformed(format!(
                "text length {} at offset {} exceeds {} remaining bytes",
                len,
                self.pos,
                self.remaining()
            )));
        }
        let mut buf = Vec::with_capacity(len);
        let mut bytes = self.take(len)?;
        bytes.read_to_end(&mut buf).map_err(|e| self.io_err(e))?;
        String::from_utf8(buf).map_err(|_| self.malformed("text is not valid UTF-8"))
    }

    /// Read a presence flag followed by the text if present
    pub fn read_optional_text(&mut self) -> CodecResult<Option<String>> {
        match self.read_u8()? {
            0 => Ok(None),
            1 => self.read_text().map(Some),
            flag => Err(self.malformed(format!("invalid presence flag {:#04x}", flag))),
        }
    }

    /// Require that every byte has been consumed
    pub fn finish(&self) -> CodecResult<()> {
        if self.is_exhausted() {
            Ok(())
        } else {
            Err(self.malformed(format!(
                "{} trailing bytes after offset {}",
                self.remaining(),
                self.pos
            )))
        }
    }
}
