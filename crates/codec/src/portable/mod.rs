//! Portable structural binary format
//!
//! A self-describing encoding of a whole record graph. Unlike the compact
//! format, it needs no registry to decode: every record carries its kind and
//! every field its name.
//!
//! # Envelope Layout (Version 1)
//!
//! ```text
//! ┌──────────────┬────────────┬────────────┬──────────────┬────────────────┬───────────┐
//! │ Magic "KVPB" │ Version u8 │ Kind tag u8│ Body len u32 │ Body (root node)│ CRC32 u32 │
//! └──────────────┴────────────┴────────────┴──────────────┴────────────────┴───────────┘
//! ```
//!
//! All integers are little-endian. The CRC covers the body only. The body is
//! a single record node (see [`node`]) whose kind matches the envelope's.
//!
//! Decode checks, in order: magic, version, total length, CRC, then the
//! envelope kind against the requested kind (`TypeMismatch`), then the body.

pub mod node;
pub mod records;

pub use node::{FieldReader, Node, RecordNode};
pub use records::{record_from_node, record_to_node, PortableRecord};

use crc32fast::Hasher;

use kvcodec_core::{CodecError, CodecResult, RecordKind};

use crate::binary::{ByteCursor, ByteSink};

/// Identifier reported in portable-format errors
pub const CODEC_ID: &str = "portable";

/// Magic bytes opening every envelope
pub const PORTABLE_MAGIC: [u8; 4] = *b"KVPB";

/// Current envelope format version
pub const PORTABLE_FORMAT_VERSION: u8 = 1;

/// Deepest node nesting accepted on decode
pub const MAX_NESTING_DEPTH: usize = 16;

/// magic(4) + version(1) + kind(1) + body_len(4)
const HEADER_SIZE: usize = 10;

/// crc32(4)
const TRAILER_SIZE: usize = 4;

fn crc32(bytes: &[u8]) -> u32 {
    let mut hasher = Hasher::new();
    hasher.update(bytes);
    hasher.finalize()
}

/// Write a root record node into a complete envelope
pub fn encode_envelope(root: &RecordNode) -> CodecResult<Vec<u8>> {
    let mut body = ByteSink::new(CODEC_ID);
    root.write(&mut body)?;
    let body = body.into_bytes();

    let mut sink = ByteSink::new(CODEC_ID);
    sink.write_raw(&PORTABLE_MAGIC)?;
    sink.write_u8(PORTABLE_FORMAT_VERSION)?;
    sink.write_u8(root.kind.tag())?;
    sink.write_len(body.len())?;
    sink.write_raw(&body)?;
    sink.write_u32(crc32(&body))?;
    Ok(sink.into_bytes())
}

/// Read the kind tag out of an envelope header without validating the body
pub fn peek_kind(bytes: &[u8]) -> CodecResult<RecordKind> {
    let mut cursor = ByteCursor::new(bytes, CODEC_ID);
    read_header(&mut cursor).map(|(kind, _)| kind)
}

fn read_header(cursor: &mut ByteCursor<'_>) -> CodecResult<(RecordKind, usize)> {
    if cursor.remaining() < HEADER_SIZE + TRAILER_SIZE {
        return Err(cursor.malformed(format!(
            "envelope of {} bytes is shorter than the minimum {}",
            cursor.remaining(),
            HEADER_SIZE + TRAILER_SIZE
        )));
    }
    let magic = cursor.take(4)?;
    if magic != PORTABLE_MAGIC.as_slice() {
        return Err(cursor.malformed(format!("bad magic {:02x?}", magic)));
    }
    let version = cursor.read_u8()?;
    if version != PORTABLE_FORMAT_VERSION {
        return Err(cursor.malformed(format!(
            "unsupported format version {} (expected {})",
            version, PORTABLE_FORMAT_VERSION
        )));
    }
    let tag = cursor.read_u8()?;
    let kind = RecordKind::from_tag(tag)
        .ok_or_else(|| cursor.malformed(format!("unknown record kind tag {:#04x}", tag)))?;
    let body_len = cursor.read_len()?;
    Ok((kind, body_len))
}

/// Validate an envelope and return its root record node
///
/// # Errors
///
/// - `MalformedEncoding` for a bad header, length, checksum, or body
/// - `TypeMismatch` if the envelope holds a kind other than `expected`
pub fn decode_envelope(bytes: &[u8], expected: RecordKind) -> CodecResult<RecordNode> {
    let mut cursor = ByteCursor::new(bytes, CODEC_ID);
    let (kind, body_len) = read_header(&mut cursor)?;

    if cursor.remaining() != body_len + TRAILER_SIZE {
        return Err(cursor.malformed(format!(
            "body length {} does not match {} bytes after header",
            body_len,
            cursor.remaining().saturating_sub(TRAILER_SIZE)
        )));
    }
    let body = cursor.take(body_len)?;
    let stored_crc = cursor.read_u32()?;
    let computed_crc = crc32(body);
    if stored_crc != computed_crc {
        return Err(cursor.malformed(format!(
            "checksum mismatch: stored {:#010x}, computed {:#010x}",
            stored_crc, computed_crc
        )));
    }

    if kind != expected {
        return Err(CodecError::TypeMismatch {
            expected,
            actual: kind,
        });
    }

    let mut body_cursor = ByteCursor::new(body, CODEC_ID);
    let root = Node::read(&mut body_cursor, 1)?.into_record("<root>", kind)?;
    body_cursor.finish()?;
    Ok(root)
}
