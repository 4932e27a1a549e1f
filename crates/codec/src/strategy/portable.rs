//! Portable strategy: structural envelope, then base-64

use tracing::trace;

use kvcodec_core::{CodecResult, RecordKind, RecordRef, RecordValue};

use super::CodecStrategy;
use crate::portable::{self, decode_envelope, encode_envelope, record_from_node, record_to_node};
use crate::transform::{from_text, to_text};

/// Self-describing structural strategy
///
/// Needs no registry: the payload names its own kind and fields.
#[derive(Debug, Clone, Copy, Default)]
pub struct PortableStrategy;

impl CodecStrategy for PortableStrategy {
    fn name(&self) -> &'static str {
        portable::CODEC_ID
    }

    fn encode_record(&self, record: RecordRef<'_>) -> CodecResult<String> {
        let bytes = encode_envelope(&record_to_node(record))?;
        trace!(kind = %record.kind(), bytes = bytes.len(), "Encoded portable envelope");
        Ok(to_text(&bytes))
    }

    fn decode_record(&self, text: &str, kind: RecordKind) -> CodecResult<RecordValue> {
        let bytes = from_text(text)?;
        let root = decode_envelope(&bytes, kind)?;
        record_from_node(root)
    }
}
