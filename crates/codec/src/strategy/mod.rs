//! Codec strategies
//!
//! A strategy turns a record into text a store can hold, and back. Three
//! are provided:
//!
//! - [`TextualStrategy`] (`json`): a JSON document with camelCase field names
//! - [`PortableStrategy`] (`portable`): the self-describing envelope of
//!   [`crate::portable`], then base-64
//! - [`CompactStrategy`] (`compact`): registry field codecs, then base-64
//!
//! # Usage
//!
//! ```ignore
//! use kvcodec_codec::strategy::{StrategyExt, StrategyKind};
//!
//! let strategy = StrategyKind::Compact.build();
//! let text = strategy.encode(&dog)?;
//! let back: Animal = strategy.decode(&text)?;
//! ```

mod compact;
mod portable;
mod textual;

pub use compact::CompactStrategy;
pub use portable::PortableStrategy;
pub use textual::TextualStrategy;

use std::fmt;
use std::str::FromStr;

use kvcodec_core::{CodecError, CodecResult, DomainRecord, RecordKind, RecordRef, RecordValue};

use crate::config::ConfigError;

/// Record-to-text codec
///
/// Implementations are pure: no state changes on encode or decode, and a
/// failed decode produces no record.
pub trait CodecStrategy: Send + Sync {
    /// Short identifier used in keys and logs
    fn name(&self) -> &'static str;

    /// Encode a record as text
    ///
    /// # Errors
    ///
    /// `UnsupportedType` if the strategy cannot handle the record's kind.
    fn encode_record(&self, record: RecordRef<'_>) -> CodecResult<String>;

    /// Decode text as a record of `kind`
    ///
    /// # Errors
    ///
    /// - `MalformedEncoding` if the text is not a valid payload
    /// - `UnsupportedType` if the strategy cannot handle `kind`
    /// - `TypeMismatch` if the payload carries a different kind
    fn decode_record(&self, text: &str, kind: RecordKind) -> CodecResult<RecordValue>;
}

/// Typed helpers over any [`CodecStrategy`]
pub trait StrategyExt: CodecStrategy {
    /// Encode a concrete record
    fn encode<R: DomainRecord>(&self, record: &R) -> CodecResult<String> {
        self.encode_record(record.as_record_ref())
    }

    /// Decode text as a concrete record type
    fn decode<R: DomainRecord>(&self, text: &str) -> CodecResult<R> {
        let value = self.decode_record(text, R::KIND)?;
        R::from_record_value(value).map_err(|other| CodecError::TypeMismatch {
            expected: R::KIND,
            actual: other.kind(),
        })
    }
}

impl<S: CodecStrategy + ?Sized> StrategyExt for S {}

/// The built-in strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StrategyKind {
    /// JSON document
    Textual,
    /// Self-describing structural binary
    Portable,
    /// Registry field codecs
    Compact,
}

impl StrategyKind {
    /// Every built-in strategy
    pub const ALL: [StrategyKind; 3] = [
        StrategyKind::Textual,
        StrategyKind::Portable,
        StrategyKind::Compact,
    ];

    /// Identifier of the strategy this kind builds
    pub const fn name(self) -> &'static str {
        match self {
            StrategyKind::Textual => textual::CODEC_ID,
            StrategyKind::Portable => crate::portable::CODEC_ID,
            StrategyKind::Compact => compact::CODEC_ID,
        }
    }

    /// Build the strategy
    ///
    /// The compact strategy reads the global registry.
    pub fn build(self) -> Box<dyn CodecStrategy> {
        match self {
            StrategyKind::Textual => Box::new(TextualStrategy),
            StrategyKind::Portable => Box::new(PortableStrategy),
            StrategyKind::Compact => Box::new(CompactStrategy::new()),
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

impl FromStr for StrategyKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" | "textual" => Ok(StrategyKind::Textual),
            "portable" => Ok(StrategyKind::Portable),
            "compact" | "kryo" => Ok(StrategyKind::Compact),
            _ => Err(ConfigError::UnknownStrategy(s.to_string())),
        }
    }
}
