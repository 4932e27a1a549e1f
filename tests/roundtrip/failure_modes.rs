//! Failure modes: every failure is an error value and produces no record.

use std::sync::Arc;

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};

use kvcodec::{
    from_text, to_text, AnimalCodec, CodecError, CodecRegistry, CodecStrategy, CompactStrategy,
    InMemoryStore, KeyValueStore, Person, PortableStrategy, RecordKind, RoundTripVerifier,
    StoreError, StrategyExt, StrategyKind, TextualStrategy,
};

use crate::test_utils::*;

// ============================================================================
// Unsupported type
// ============================================================================

#[test]
fn compact_without_codec_is_unsupported() {
    let mut registry = CodecRegistry::new();
    registry.register(AnimalCodec);
    let strategy = CompactStrategy::with_registry(Arc::new(registry));

    let err = strategy.encode(&jonathan_parker()).unwrap_err();
    assert_eq!(err, CodecError::UnsupportedType(RecordKind::Person));

    let valid = CompactStrategy::new().encode(&jonathan_parker()).unwrap();
    let err = strategy.decode::<Person>(&valid).unwrap_err();
    assert_eq!(err, CodecError::UnsupportedType(RecordKind::Person));
}

#[test]
fn unsupported_type_writes_nothing() {
    let store = InMemoryStore::new();
    let strategy = CompactStrategy::with_registry(Arc::new(CodecRegistry::new()));
    let err = RoundTripVerifier::default()
        .verify(&aimee(), &strategy, &store)
        .unwrap_err();
    assert_eq!(err, CodecError::UnsupportedType(RecordKind::Animal));
    assert!(store.is_empty());
}

// ============================================================================
// Truncation and trailing bytes
// ============================================================================

#[test]
fn every_truncated_compact_payload_is_malformed() {
    let strategy = CompactStrategy::new();
    let bytes = from_text(&strategy.encode(&jonathan_parker()).unwrap()).unwrap();
    for len in 0..bytes.len() {
        let err = strategy
            .decode::<Person>(&to_text(&bytes[..len]))
            .unwrap_err();
        assert!(err.is_malformed(), "prefix of {} bytes: {:?}", len, err);
    }
}

#[test]
fn every_truncated_portable_payload_is_malformed() {
    let bytes = from_text(&PortableStrategy.encode(&jonathan_parker()).unwrap()).unwrap();
    for len in 0..bytes.len() {
        let err = PortableStrategy
            .decode::<Person>(&to_text(&bytes[..len]))
            .unwrap_err();
        assert!(err.is_malformed(), "prefix of {} bytes: {:?}", len, err);
    }
}

#[test]
fn trailing_bytes_are_malformed() {
    for kind in [StrategyKind::Portable, StrategyKind::Compact] {
        let strategy = kind.build();
        let mut bytes = from_text(&strategy.encode(&aimee()).unwrap()).unwrap();
        bytes.extend_from_slice(&[0, 0]);
        let err = strategy
            .decode_record(&to_text(&bytes), RecordKind::Animal)
            .unwrap_err();
        assert!(err.is_malformed(), "strategy {}: {:?}", kind, err);
    }
}

#[test]
fn truncated_json_is_malformed() {
    let text = TextualStrategy.encode(&jonathan_parker()).unwrap();
    let err = TextualStrategy
        .decode::<Person>(&text[..text.len() / 2])
        .unwrap_err();
    assert!(err.is_malformed());
}

// ============================================================================
// Type mismatch
// ============================================================================

#[test]
fn portable_animal_decoded_as_person_is_type_mismatch() {
    let text = PortableStrategy.encode(&aimee()).unwrap();
    let err = PortableStrategy.decode::<Person>(&text).unwrap_err();
    assert_eq!(
        err,
        CodecError::TypeMismatch {
            expected: RecordKind::Person,
            actual: RecordKind::Animal,
        }
    );
}

#[test]
fn compact_animal_decoded_as_person_fails() {
    // The compact payload carries no type; reading it as a Person consumes
    // the wrong shape.
    let strategy = CompactStrategy::new();
    let text = strategy.encode(&aimee()).unwrap();
    assert!(strategy.decode::<Person>(&text).is_err());
}

// ============================================================================
// Text transform
// ============================================================================

#[test]
fn every_byte_value_survives_transform() {
    let bytes: Vec<u8> = (0..=255).collect();
    assert_eq!(from_text(&to_text(&bytes)).unwrap(), bytes);
}

#[test]
fn non_ascii_records_survive_binary_strategies() {
    let person = Person::new("Zoë", "Ångström", 30)
        .with_address(kvcodec::Address::default().with_city("Zürich"))
        .with_phone_number("☎ +41 44 000 00 00");
    for kind in [StrategyKind::Portable, StrategyKind::Compact] {
        let strategy = kind.build();
        let text = strategy.encode(&person).unwrap();
        assert_eq!(strategy.decode::<Person>(&text).unwrap(), person, "strategy {}", kind);
    }
}

#[test]
fn foreign_alphabet_is_malformed_not_wrong_record() {
    for kind in [StrategyKind::Portable, StrategyKind::Compact] {
        let strategy = kind.build();
        let bytes = from_text(&strategy.encode(&jonathan_parker()).unwrap()).unwrap();
        let foreign = URL_SAFE_NO_PAD.encode(&bytes);
        match strategy.decode_record(&foreign, RecordKind::Person) {
            Err(err) => assert!(err.is_malformed(), "strategy {}: {:?}", kind, err),
            Ok(value) => panic!("strategy {} decoded {:?}", kind, value),
        }
    }
}

// ============================================================================
// Store failures
// ============================================================================

#[test]
fn rejected_write_is_storage_failure() {
    let err = RoundTripVerifier::default()
        .verify(&aimee(), &TextualStrategy, &RejectingStore)
        .unwrap_err();
    assert_eq!(
        err,
        CodecError::StorageFailure(StoreError::Rejected {
            key: "json-animal".to_string(),
            reason: "read-only replica".to_string(),
        })
    );
}

#[test]
fn failed_read_is_storage_failure_and_cleans_up() {
    let store = UnreadableStore::default();
    let err = RoundTripVerifier::default()
        .verify(&aimee(), &CompactStrategy::new(), &store)
        .unwrap_err();
    assert_eq!(
        err,
        CodecError::StorageFailure(StoreError::Unavailable("connection reset".to_string()))
    );
    assert!(store.is_empty());
}

#[test]
fn verify_all_stops_at_first_store_failure() {
    let records = sample_records();
    let err = RoundTripVerifier::default()
        .verify_all(&records, &RejectingStore)
        .unwrap_err();
    assert!(matches!(err, CodecError::StorageFailure(StoreError::Rejected { .. })));
}
