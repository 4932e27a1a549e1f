//! Compact strategy: registry field codecs, then base-64
//!
//! The payload carries no type information. The caller names the kind on
//! decode, and the whole payload must be consumed by that kind's codec.

use std::sync::Arc;

use tracing::trace;

use kvcodec_core::{CodecResult, RecordKind, RecordRef, RecordValue};

use super::CodecStrategy;
use crate::binary::{global_registry, ByteCursor, ByteSink, CodecRegistry};
use crate::transform::{from_text, to_text};

pub(super) const CODEC_ID: &str = "compact";

/// Field-codec strategy backed by a [`CodecRegistry`]
#[derive(Debug, Clone)]
pub struct CompactStrategy {
    registry: Arc<CodecRegistry>,
}

impl CompactStrategy {
    /// Strategy over the process-wide registry
    pub fn new() -> Self {
        Self::with_registry(global_registry())
    }

    /// Strategy over a specific registry
    pub fn with_registry(registry: Arc<CodecRegistry>) -> Self {
        CompactStrategy { registry }
    }

    /// The registry in use
    pub fn registry(&self) -> &CodecRegistry {
        &self.registry
    }
}

impl Default for CompactStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl CodecStrategy for CompactStrategy {
    fn name(&self) -> &'static str {
        CODEC_ID
    }

    fn encode_record(&self, record: RecordRef<'_>) -> CodecResult<String> {
        let codec = self.registry.lookup(record.kind())?;
        let mut sink = ByteSink::new(CODEC_ID);
        codec.write_record(&mut sink, record)?;
        trace!(kind = %record.kind(), bytes = sink.len(), "Encoded compact payload");
        Ok(to_text(sink.as_bytes()))
    }

    fn decode_record(&self, text: &str, kind: RecordKind) -> CodecResult<RecordValue> {
        let codec = self.registry.lookup(kind)?;
        let bytes = from_text(text)?;
        let mut cursor = ByteCursor::new(&bytes, CODEC_ID);
        let value = codec.read_record(&mut cursor)?;
        cursor.finish()?;
        Ok(value)
    }
}
