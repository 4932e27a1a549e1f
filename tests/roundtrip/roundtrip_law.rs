//! Round-trip law: decode(encode(r)) == r for every record and strategy.

use proptest::prelude::*;

use kvcodec::{
    CodecStrategy, InMemoryStore, KeyValueStore, RoundTripVerifier, StrategyExt, StrategyKind,
    VerifierConfig,
};

use crate::test_utils::*;

// ============================================================================
// Direct encode/decode
// ============================================================================

#[test]
fn every_sample_decodes_to_itself() {
    for kind in StrategyKind::ALL {
        let strategy = kind.build();
        for record in sample_records() {
            let text = strategy.encode_record(record.as_record_ref()).unwrap();
            let back = strategy.decode_record(&text, record.kind()).unwrap();
            assert_eq!(back, record, "strategy {}", kind);
        }
    }
}

#[test]
fn encoded_text_is_deterministic() {
    for kind in StrategyKind::ALL {
        let strategy = kind.build();
        let first = strategy.encode(&jonathan_parker()).unwrap();
        let second = strategy.encode(&jonathan_parker()).unwrap();
        assert_eq!(first, second, "strategy {}", kind);
    }
}

#[test]
fn binary_strategies_produce_ascii_text() {
    for kind in [StrategyKind::Portable, StrategyKind::Compact] {
        let text = kind.build().encode(&jonathan_parker()).unwrap();
        assert!(text.is_ascii());
        assert!(!text.contains(char::is_whitespace));
    }
}

// ============================================================================
// Through a store
// ============================================================================

#[test]
fn verify_all_matches_every_sample() {
    let store = InMemoryStore::new();
    let records = sample_records();
    let report = RoundTripVerifier::default()
        .verify_all(&records, &store)
        .unwrap();

    assert_eq!(report.len(), records.len() * StrategyKind::ALL.len());
    assert!(report.all_matched());
    assert_eq!(report.mismatches().count(), 0);
    assert!(store.is_empty());
}

#[test]
fn verify_leaves_text_in_store_without_cleanup() {
    let store = InMemoryStore::new();
    let verifier = RoundTripVerifier::new(VerifierConfig::default().with_cleanup(false)).unwrap();
    for kind in StrategyKind::ALL {
        assert!(verifier.verify(&aimee(), kind.build().as_ref(), &store).unwrap());
    }
    assert_eq!(
        store.keys(),
        vec!["compact-animal", "json-animal", "portable-animal"]
    );

    let stored = store.get("json-animal").unwrap().unwrap();
    assert_eq!(
        stored,
        r#"{"type":"Dog","name":"Aimee","color":"Black","age":5}"#
    );
}

#[test]
fn store_round_trip_follows_set_get_delete() {
    let store = RecordingStore::default();
    let strategy = StrategyKind::Portable.build();
    assert!(RoundTripVerifier::default()
        .verify(&aimee(), strategy.as_ref(), &store)
        .unwrap());
    assert_eq!(
        *store.log.lock(),
        vec![
            "set portable-animal".to_string(),
            "get portable-animal".to_string(),
            "delete portable-animal".to_string(),
        ]
    );
}

// ============================================================================
// Property-based
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_roundtrip_law(record in arb_record()) {
        for kind in StrategyKind::ALL {
            let strategy = kind.build();
            let text = strategy.encode_record(record.as_record_ref()).unwrap();
            let back = strategy.decode_record(&text, record.kind()).unwrap();
            prop_assert_eq!(&back, &record, "strategy {}", kind);
        }
    }

    #[test]
    fn prop_roundtrip_through_store(person in arb_person()) {
        let store = InMemoryStore::new();
        let verifier = RoundTripVerifier::default();
        for kind in StrategyKind::ALL {
            prop_assert!(verifier.verify(&person, kind.build().as_ref(), &store).unwrap());
        }
        prop_assert!(store.is_empty());
    }

    #[test]
    fn prop_reordered_phone_numbers_are_distinct(mut person in arb_person()) {
        prop_assume!(person.phone_numbers.len() >= 2);
        prop_assume!(person.phone_numbers[0] != person.phone_numbers[1]);
        let original = person.clone();
        person.phone_numbers.swap(0, 1);

        let strategy = StrategyKind::Compact.build();
        let text = strategy.encode(&person).unwrap();
        let back: kvcodec::Person = strategy.decode(&text).unwrap();
        prop_assert_ne!(back, original);
    }
}
