//! Sample scenarios: the Animal under `kryo-animal`, the Person via portable.

use kvcodec::{
    CompactStrategy, InMemoryStore, KeyValueStore, Person, PortableStrategy, RoundTripVerifier,
    StrategyExt, VerifierConfig,
};

use crate::test_utils::*;

#[test]
fn animal_through_compact_under_kryo_animal() {
    let store = InMemoryStore::new();
    let verifier = RoundTripVerifier::new(VerifierConfig::default().with_cleanup(false)).unwrap();
    let strategy = CompactStrategy::new();

    assert!(verifier
        .verify_with_key(&aimee(), &strategy, &store, "kryo-animal")
        .unwrap());

    let stored = store.get("kryo-animal").unwrap().unwrap();
    let back: kvcodec::Animal = strategy.decode(&stored).unwrap();
    assert_eq!(back, aimee());
    assert_eq!(back.kind, "Dog");
    assert_eq!(back.age, 5);
}

#[test]
fn person_through_portable() {
    let store = InMemoryStore::new();
    let verifier = RoundTripVerifier::new(VerifierConfig::default().with_cleanup(false)).unwrap();

    assert!(verifier
        .verify(&jonathan_parker(), &PortableStrategy, &store)
        .unwrap());

    let stored = store.get("portable-person").unwrap().unwrap();
    let back: Person = PortableStrategy.decode(&stored).unwrap();
    assert_eq!(back.addresses.len(), 2);
    assert_eq!(back.addresses[0].street_name.as_deref(), Some("8528 Harris Avenue"));
    assert_eq!(back.addresses[1].city.as_deref(), Some("Owings Mills"));
    assert_eq!(back.phone_numbers, vec!["410-668-5636", "443-604-2821"]);
}

#[test]
fn person_order_survives_every_strategy() {
    for kind in kvcodec::StrategyKind::ALL {
        let strategy = kind.build();
        let text = strategy.encode(&jonathan_parker()).unwrap();
        let back: Person = strategy.decode(&text).unwrap();

        let mut reordered = jonathan_parker();
        reordered.addresses.reverse();
        assert_eq!(back, jonathan_parker());
        assert_ne!(back, reordered, "strategy {}", kind);
    }
}

#[test]
fn prefixed_keys() {
    let store = InMemoryStore::new();
    let config = VerifierConfig::default()
        .with_key_prefix("run7:")
        .with_cleanup(false);
    let verifier = RoundTripVerifier::new(config).unwrap();
    assert!(verifier.verify(&aimee(), &CompactStrategy::new(), &store).unwrap());
    assert_eq!(store.keys(), vec!["run7:compact-animal"]);
}
