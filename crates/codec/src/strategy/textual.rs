//! JSON strategy
//!
//! Field names follow the records' serde attributes: camelCase, with
//! `Animal::kind` written as `type`. Unknown fields are rejected; optional
//! address fields may be left out.

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::trace;

use kvcodec_core::{
    Address, Animal, CodecError, CodecResult, Person, RecordKind, RecordRef, RecordValue,
};

use super::CodecStrategy;

pub(super) const CODEC_ID: &str = "json";

/// JSON document strategy
#[derive(Debug, Clone, Copy, Default)]
pub struct TextualStrategy;

fn to_json<T: Serialize>(record: &T) -> CodecResult<String> {
    serde_json::to_string(record)
        .map_err(|e| CodecError::malformed(CODEC_ID, format!("serialize failed: {}", e)))
}

fn from_json<T: DeserializeOwned>(text: &str) -> CodecResult<T> {
    serde_json::from_str(text).map_err(|e| CodecError::malformed(CODEC_ID, e.to_string()))
}

impl CodecStrategy for TextualStrategy {
    fn name(&self) -> &'static str {
        CODEC_ID
    }

    fn encode_record(&self, record: RecordRef<'_>) -> CodecResult<String> {
        let text = match record {
            RecordRef::Address(a) => to_json(a)?,
            RecordRef::Person(p) => to_json(p)?,
            RecordRef::Animal(a) => to_json(a)?,
        };
        trace!(kind = %record.kind(), len = text.len(), "Encoded JSON");
        Ok(text)
    }

    fn decode_record(&self, text: &str, kind: RecordKind) -> CodecResult<RecordValue> {
        match kind {
            RecordKind::Address => from_json::<Address>(text).map(RecordValue::Address),
            RecordKind::Person => from_json::<Person>(text).map(RecordValue::Person),
            RecordKind::Animal => from_json::<Animal>(text).map(RecordValue::Animal),
        }
    }
}
