//! Round-trip verifier
//!
//! Encodes a record, writes the text to a store, reads it back, decodes it
//! as the same kind, and compares with the original.
//!
//! ## Outcomes
//!
//! - `Ok(true)`: the decoded record equals the original
//! - `Ok(false)`: decoding succeeded but the records differ
//! - `Err(..)`: a codec error, or a store error wrapped as `StorageFailure`
//!
//! A key that reads back as absent is `StorageFailure(StoreError::Missing)`.

use tracing::{debug, info, warn};

use kvcodec_core::{CodecResult, DomainRecord, RecordKind, RecordRef, RecordValue, StoreError};
use kvcodec_storage::KeyValueStore;

use crate::config::{ConfigError, VerifierConfig};
use crate::strategy::CodecStrategy;

/// Result of one round trip
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundTripOutcome {
    /// Kind of the record checked
    pub kind: RecordKind,
    /// Strategy name
    pub strategy: &'static str,
    /// Key the text was stored under
    pub key: String,
    /// Length of the stored text in bytes
    pub encoded_len: usize,
    /// True if the decoded record equals the original
    pub matched: bool,
}

/// Outcomes of a `verify_all` run, in execution order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoundTripReport {
    /// One entry per record and strategy
    pub outcomes: Vec<RoundTripOutcome>,
}

impl RoundTripReport {
    /// True if every round trip matched
    pub fn all_matched(&self) -> bool {
        self.outcomes.iter().all(|o| o.matched)
    }

    /// Outcomes that did not match
    pub fn mismatches(&self) -> impl Iterator<Item = &RoundTripOutcome> {
        self.outcomes.iter().filter(|o| !o.matched)
    }

    /// Number of outcomes
    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    /// True if nothing was checked
    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }
}

/// Runs records through strategies and a store
#[derive(Debug, Clone, Default)]
pub struct RoundTripVerifier {
    config: VerifierConfig,
}

impl RoundTripVerifier {
    /// Create a verifier from a validated configuration
    pub fn new(config: VerifierConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(RoundTripVerifier { config })
    }

    /// The configuration in use
    pub fn config(&self) -> &VerifierConfig {
        &self.config
    }

    /// Round-trip `record` under the derived key `{prefix}{strategy}-{kind}`
    pub fn verify<R: DomainRecord>(
        &self,
        record: &R,
        strategy: &dyn CodecStrategy,
        store: &dyn KeyValueStore,
    ) -> CodecResult<bool> {
        self.check(record.as_record_ref(), strategy, store)
            .map(|outcome| outcome.matched)
    }

    /// Round-trip `record` under an explicit key
    pub fn verify_with_key<R: DomainRecord>(
        &self,
        record: &R,
        strategy: &dyn CodecStrategy,
        store: &dyn KeyValueStore,
        key: &str,
    ) -> CodecResult<bool> {
        self.check_with_key(record.as_record_ref(), strategy, store, key)
            .map(|outcome| outcome.matched)
    }

    /// Run every configured strategy over every record
    ///
    /// Stops at the first codec or store error.
    pub fn verify_all(
        &self,
        records: &[RecordValue],
        store: &dyn KeyValueStore,
    ) -> CodecResult<RoundTripReport> {
        let mut report = RoundTripReport::default();
        for kind in &self.config.strategies {
            let strategy = kind.build();
            for record in records {
                let outcome = self.check(record.as_record_ref(), strategy.as_ref(), store)?;
                report.outcomes.push(outcome);
            }
        }
        info!(
            checked = report.len(),
            mismatched = report.mismatches().count(),
            "Round-trip run complete"
        );
        Ok(report)
    }

    /// Round-trip a type-erased record under its derived key
    pub fn check(
        &self,
        record: RecordRef<'_>,
        strategy: &dyn CodecStrategy,
        store: &dyn KeyValueStore,
    ) -> CodecResult<RoundTripOutcome> {
        let key = self.config.key_for(strategy.name(), record.kind().name());
        self.check_with_key(record, strategy, store, &key)
    }

    /// Round-trip a type-erased record under `key`
    pub fn check_with_key(
        &self,
        record: RecordRef<'_>,
        strategy: &dyn CodecStrategy,
        store: &dyn KeyValueStore,
        key: &str,
    ) -> CodecResult<RoundTripOutcome> {
        let kind = record.kind();
        let text = strategy.encode_record(record)?;
        debug!(%kind, strategy = strategy.name(), key, len = text.len(), "Encoded record");

        store.set(key, &text)?;
        let result = read_back(record, strategy, store, key);

        if self.config.cleanup {
            let removed = store.delete(key);
            debug!(key, ?removed, "Cleaned up key");
            // A read-back error outranks a cleanup error.
            let matched = result?;
            removed?;
            return Ok(self.outcome(kind, strategy, key, text.len(), matched));
        }

        let matched = result?;
        Ok(self.outcome(kind, strategy, key, text.len(), matched))
    }

    fn outcome(
        &self,
        kind: RecordKind,
        strategy: &dyn CodecStrategy,
        key: &str,
        encoded_len: usize,
        matched: bool,
    ) -> RoundTripOutcome {
        if matched {
            info!(%kind, strategy = strategy.name(), key, "Round trip matched");
        } else {
            warn!(%kind, strategy = strategy.name(), key, "Round trip mismatch");
        }
        RoundTripOutcome {
            kind,
            strategy: strategy.name(),
            key: key.to_string(),
            encoded_len,
            matched,
        }
    }
}

fn read_back(
    record: RecordRef<'_>,
    strategy: &dyn CodecStrategy,
    store: &dyn KeyValueStore,
    key: &str,
) -> CodecResult<bool> {
    let stored = store
        .get(key)?
        .ok_or_else(|| StoreError::Missing(key.to_string()))?;
    let decoded = strategy.decode_record(&stored, record.kind())?;
    Ok(decoded.as_record_ref() == record)
}
