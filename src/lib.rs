//! KVCodec - pluggable record codecs over string key-value stores
//!
//! Domain records (Address, Person, Animal) are encoded to text by one of
//! three strategies, written to a key-value store, and read back:
//! - `json`: a JSON document with camelCase field names
//! - `portable`: a self-describing, checksummed binary envelope as base-64
//! - `compact`: registry field codecs as base-64
//!
//! # Quick Start
//!
//! ```ignore
//! use kvcodec::{Animal, CompactStrategy, InMemoryStore, RoundTripVerifier};
//!
//! let store = InMemoryStore::new();
//! let dog = Animal::new("Dog", "Aimee", "Black", 5);
//!
//! let verifier = RoundTripVerifier::default();
//! assert!(verifier.verify_with_key(&dog, &CompactStrategy::new(), &store, "kryo-animal")?);
//! ```

pub use kvcodec_codec::*;
pub use kvcodec_core::*;
pub use kvcodec_storage::*;
