//! Core types for KVCodec
//!
//! This crate defines the foundational types used throughout the workspace:
//! - Domain records: Address, Person, Animal
//! - RecordKind: type identity of a record
//! - RecordValue / RecordRef: tagged record variants for dispatch
//! - DomainRecord: compile-time link from a record type to its kind
//! - Error: codec and store error taxonomy

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod record;

pub use error::{CodecError, CodecResult, StoreError, StoreResult};
pub use record::{Address, Animal, DomainRecord, Person, RecordKind, RecordRef, RecordValue};
