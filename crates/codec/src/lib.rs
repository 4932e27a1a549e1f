//! Record codecs for KVCodec
//!
//! This crate turns domain records into text a key-value store can hold:
//! - binary: per-type field codecs, the codec registry, byte primitives
//! - portable: the self-describing structural envelope
//! - transform: the one base-64 text transform for binary payloads
//! - strategy: the three codec strategies (json, portable, compact)
//! - verifier: store round trips and their reports
//! - config: verifier configuration

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod binary;
pub mod config;
pub mod portable;
pub mod strategy;
pub mod transform;
pub mod verifier;

pub use binary::{
    global_registry, install_global_registry, AddressCodec, AnimalCodec, CodecRegistry,
    ErasedFieldCodec, FieldCodec, PersonCodec,
};
pub use config::{ConfigError, VerifierConfig};
pub use strategy::{
    CodecStrategy, CompactStrategy, PortableStrategy, StrategyExt, StrategyKind, TextualStrategy,
};
pub use transform::{from_text, to_text};
pub use verifier::{RoundTripOutcome, RoundTripReport, RoundTripVerifier};
