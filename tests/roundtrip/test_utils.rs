//! Shared records, generators, and stores for the round-trip suite.

#![allow(dead_code)]

use parking_lot::Mutex;
use proptest::prelude::*;

use kvcodec::{
    Address, Animal, InMemoryStore, KeyValueStore, Person, RecordValue, StoreError, StoreResult,
};

// ============================================================================
// Sample records
// ============================================================================

pub fn aimee() -> Animal {
    Animal::new("Dog", "Aimee", "Black", 5)
}

pub fn jonathan_parker() -> Person {
    Person::new("Jonathan", "Parker", 63)
        .with_address(Address::new("8528 Harris Avenue", "Baltimore", "MD", "21234"))
        .with_address(Address::new("324 Lantana Drive", "Owings Mills", "MD", "21117"))
        .with_phone_number("410-668-5636")
        .with_phone_number("443-604-2821")
}

pub fn sample_records() -> Vec<RecordValue> {
    vec![
        RecordValue::from(Address::new("8528 Harris Avenue", "Baltimore", "MD", "21234")),
        RecordValue::from(Address::default()),
        RecordValue::from(Address::default().with_state("MD")),
        RecordValue::from(jonathan_parker()),
        RecordValue::from(Person::default()),
        RecordValue::from(aimee()),
        RecordValue::from(Animal::new("", "", "", i32::MIN)),
    ]
}

// ============================================================================
// Generators
// ============================================================================

fn text() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-zA-Z0-9 .-]{0,16}",
        any::<String>().prop_map(|s| s.chars().take(12).collect()),
    ]
}

pub fn arb_address() -> impl Strategy<Value = Address> {
    (
        proptest::option::of(text()),
        proptest::option::of(text()),
        proptest::option::of(text()),
        proptest::option::of(text()),
    )
        .prop_map(|(street_name, city, state, zip_code)| Address {
            street_name,
            city,
            state,
            zip_code,
        })
}

pub fn arb_person() -> impl Strategy<Value = Person> {
    (
        text(),
        text(),
        any::<i32>(),
        proptest::collection::vec(arb_address(), 0..4),
        proptest::collection::vec(text(), 0..4),
    )
        .prop_map(|(first_name, last_name, age, addresses, phone_numbers)| Person {
            first_name,
            last_name,
            age,
            addresses,
            phone_numbers,
        })
}

pub fn arb_animal() -> impl Strategy<Value = Animal> {
    (text(), text(), text(), any::<i32>()).prop_map(|(kind, name, color, age)| Animal {
        kind,
        name,
        color,
        age,
    })
}

pub fn arb_record() -> impl Strategy<Value = RecordValue> {
    prop_oneof![
        arb_address().prop_map(RecordValue::from),
        arb_person().prop_map(RecordValue::from),
        arb_animal().prop_map(RecordValue::from),
    ]
}

// ============================================================================
// Stores
// ============================================================================

/// Store whose writes always fail
pub struct RejectingStore;

impl KeyValueStore for RejectingStore {
    fn set(&self, key: &str, _value: &str) -> StoreResult<()> {
        Err(StoreError::Rejected {
            key: key.to_string(),
            reason: "read-only replica".to_string(),
        })
    }

    fn get(&self, _key: &str) -> StoreResult<Option<String>> {
        Ok(None)
    }

    fn delete(&self, _key: &str) -> StoreResult<bool> {
        Ok(false)
    }

    fn len(&self) -> usize {
        0
    }
}

/// Store whose reads fail after writes succeed
#[derive(Default)]
pub struct UnreadableStore {
    inner: InMemoryStore,
}

impl KeyValueStore for UnreadableStore {
    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        self.inner.set(key, value)
    }

    fn get(&self, _key: &str) -> StoreResult<Option<String>> {
        Err(StoreError::Unavailable("connection reset".to_string()))
    }

    fn delete(&self, key: &str) -> StoreResult<bool> {
        self.inner.delete(key)
    }

    fn len(&self) -> usize {
        self.inner.len()
    }
}

/// Store that records every operation it sees
#[derive(Default)]
pub struct RecordingStore {
    inner: InMemoryStore,
    pub log: Mutex<Vec<String>>,
}

impl KeyValueStore for RecordingStore {
    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        self.log.lock().push(format!("set {}", key));
        self.inner.set(key, value)
    }

    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        self.log.lock().push(format!("get {}", key));
        self.inner.get(key)
    }

    fn delete(&self, key: &str) -> StoreResult<bool> {
        self.log.lock().push(format!("delete {}", key));
        self.inner.delete(key)
    }

    fn len(&self) -> usize {
        self.inner.len()
    }
}
