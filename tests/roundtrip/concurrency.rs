//! Strategies and stores shared across threads.

use std::sync::Arc;
use std::thread;

use kvcodec::{
    CodecStrategy, InMemoryStore, KeyValueStore, Person, RoundTripVerifier, StrategyExt,
    StrategyKind, VerifierConfig,
};

use crate::test_utils::*;

#[test]
fn concurrent_round_trips_on_shared_store() {
    let store = Arc::new(InMemoryStore::new());
    let config = VerifierConfig::default().with_cleanup(false);
    let verifier = Arc::new(RoundTripVerifier::new(config).unwrap());

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let store = Arc::clone(&store);
            let verifier = Arc::clone(&verifier);
            thread::spawn(move || {
                let person = jonathan_parker().with_phone_number(format!("555-{:04}", i));
                let key = format!("thread-{}", i);
                for kind in StrategyKind::ALL {
                    let strategy = kind.build();
                    assert!(verifier
                        .verify_with_key(&person, strategy.as_ref(), store.as_ref(), &key)
                        .unwrap());
                }
                person
            })
        })
        .collect();

    let people: Vec<Person> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(store.len(), people.len());

    // Compact ran last, so each key holds that thread's compact payload.
    let compact = StrategyKind::Compact.build();
    for (i, person) in people.iter().enumerate() {
        let text = store.get(&format!("thread-{}", i)).unwrap().unwrap();
        assert_eq!(&compact.decode::<Person>(&text).unwrap(), person);
    }
}

#[test]
fn one_strategy_many_threads() {
    let strategy: Arc<dyn CodecStrategy> = Arc::from(StrategyKind::Portable.build());
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let strategy = Arc::clone(&strategy);
            thread::spawn(move || {
                let dog = kvcodec::Animal::new("Dog", format!("Aimee {}", i), "Black", i);
                let text = strategy.encode(&dog).unwrap();
                assert_eq!(strategy.decode::<kvcodec::Animal>(&text).unwrap(), dog);
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }
}
