//! Storage adapter for KVCodec
//!
//! This crate defines the string key-value store the codec layer writes to:
//! - KeyValueStore: the minimal `set`/`get`/`delete` seam
//! - InMemoryStore: thread-safe map-backed implementation
//!
//! The codec layer only ever reads and writes text values; binary payloads
//! are made text-safe before they reach a store.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod memory;
pub mod traits;

pub use memory::InMemoryStore;
pub use traits::KeyValueStore;
