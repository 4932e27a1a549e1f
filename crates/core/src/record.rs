//! Domain records
//!
//! The fixed set of record shapes the codec layer knows how to carry:
//! - `Address`: four optional text fields
//! - `Person`: names, age, and ordered address / phone number lists
//! - `Animal`: type, name, color, and age
//!
//! Records are plain values. Equality and hashing are derived over every
//! field; list order is significant.
//!
//! Dispatch across records never goes through runtime reflection. Each
//! concrete type implements [`DomainRecord`], which ties it to a
//! [`RecordKind`] at compile time and converts it to and from the tagged
//! variants [`RecordValue`] / [`RecordRef`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Type identity of a domain record
///
/// The tag byte and name are stable: they are written into encoded payloads
/// and used to derive storage keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RecordKind {
    /// [`Address`]
    Address,
    /// [`Person`]
    Person,
    /// [`Animal`]
    Animal,
}

impl RecordKind {
    /// All record kinds, in tag order
    pub const ALL: [RecordKind; 3] = [RecordKind::Address, RecordKind::Person, RecordKind::Animal];

    /// Stable one-byte tag
    pub const fn tag(self) -> u8 {
        match self {
            RecordKind::Address => 1,
            RecordKind::Person => 2,
            RecordKind::Animal => 3,
        }
    }

    /// Resolve a tag byte back to a kind
    pub fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            1 => Some(RecordKind::Address),
            2 => Some(RecordKind::Person),
            3 => Some(RecordKind::Animal),
            _ => None,
        }
    }

    /// Stable lowercase name
    pub const fn name(self) -> &'static str {
        match self {
            RecordKind::Address => "address",
            RecordKind::Person => "person",
            RecordKind::Animal => "animal",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

impl FromStr for RecordKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "address" => Ok(RecordKind::Address),
            "person" => Ok(RecordKind::Person),
            "animal" => Ok(RecordKind::Animal),
            other => Err(format!("unknown record kind: {}", other)),
        }
    }
}

/// A postal address. Every field may be absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Address {
    /// Street name and number
    pub street_name: Option<String>,
    /// City
    pub city: Option<String>,
    /// State or province
    pub state: Option<String>,
    /// Postal code
    pub zip_code: Option<String>,
}

impl Address {
    /// Create an address with every field present
    pub fn new(
        street_name: impl Into<String>,
        city: impl Into<String>,
        state: impl Into<String>,
        zip_code: impl Into<String>,
    ) -> Self {
        Address {
            street_name: Some(street_name.into()),
            city: Some(city.into()),
            state: Some(state.into()),
            zip_code: Some(zip_code.into()),
        }
    }

    /// Set the street name
    pub fn with_street_name(mut self, street_name: impl Into<String>) -> Self {
        self.street_name = Some(street_name.into());
        self
    }

    /// Set the city
    pub fn with_city(mut self, city: impl Into<String>) -> Self {
        self.city = Some(city.into());
        self
    }

    /// Set the state
    pub fn with_state(mut self, state: impl Into<String>) -> Self {
        self.state = Some(state.into());
        self
    }

    /// Set the zip code
    pub fn with_zip_code(mut self, zip_code: impl Into<String>) -> Self {
        self.zip_code = Some(zip_code.into());
        self
    }
}

/// A person with an ordered list of addresses and phone numbers
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Person {
    /// Given name
    pub first_name: String,
    /// Family name
    pub last_name: String,
    /// Age in years
    pub age: i32,
    /// Addresses, in significance order
    pub addresses: Vec<Address>,
    /// Phone numbers, in significance order
    pub phone_numbers: Vec<String>,
}

impl Person {
    /// Create a person with no addresses or phone numbers
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>, age: i32) -> Self {
        Person {
            first_name: first_name.into(),
            last_name: last_name.into(),
            age,
            addresses: Vec::new(),
            phone_numbers: Vec::new(),
        }
    }

    /// Append an address
    pub fn with_address(mut self, address: Address) -> Self {
        self.addresses.push(address);
        self
    }

    /// Append a phone number
    pub fn with_phone_number(mut self, phone_number: impl Into<String>) -> Self {
        self.phone_numbers.push(phone_number.into());
        self
    }
}

/// An animal
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Animal {
    /// Species, e.g. "Dog". Serialized as `type`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Name
    pub name: String,
    /// Color
    pub color: String,
    /// Age in years
    pub age: i32,
}

impl Animal {
    /// Create an animal
    pub fn new(
        kind: impl Into<String>,
        name: impl Into<String>,
        color: impl Into<String>,
        age: i32,
    ) -> Self {
        Animal {
            kind: kind.into(),
            name: name.into(),
            color: color.into(),
            age,
        }
    }
}

/// Owned record of any kind
///
/// Values of different kinds are never equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RecordValue {
    /// An address
    Address(Address),
    /// A person
    Person(Person),
    /// An animal
    Animal(Animal),
}

impl RecordValue {
    /// Kind of the wrapped record
    pub fn kind(&self) -> RecordKind {
        match self {
            RecordValue::Address(_) => RecordKind::Address,
            RecordValue::Person(_) => RecordKind::Person,
            RecordValue::Animal(_) => RecordKind::Animal,
        }
    }

    /// Borrow as a [`RecordRef`]
    pub fn as_record_ref(&self) -> RecordRef<'_> {
        match self {
            RecordValue::Address(a) => RecordRef::Address(a),
            RecordValue::Person(p) => RecordRef::Person(p),
            RecordValue::Animal(a) => RecordRef::Animal(a),
        }
    }
}

impl From<Address> for RecordValue {
    fn from(value: Address) -> Self {
        RecordValue::Address(value)
    }
}

impl From<Person> for RecordValue {
    fn from(value: Person) -> Self {
        RecordValue::Person(value)
    }
}

impl From<Animal> for RecordValue {
    fn from(value: Animal) -> Self {
        RecordValue::Animal(value)
    }
}

/// Borrowed record of any kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordRef<'a> {
    /// An address
    Address(&'a Address),
    /// A person
    Person(&'a Person),
    /// An animal
    Animal(&'a Animal),
}

impl RecordRef<'_> {
    /// Kind of the referenced record
    pub fn kind(&self) -> RecordKind {
        match self {
            RecordRef::Address(_) => RecordKind::Address,
            RecordRef::Person(_) => RecordKind::Person,
            RecordRef::Animal(_) => RecordKind::Animal,
        }
    }

    /// Clone into an owned [`RecordValue`]
    pub fn to_record_value(&self) -> RecordValue {
        match *self {
            RecordRef::Address(a) => RecordValue::Address(a.clone()),
            RecordRef::Person(p) => RecordValue::Person(p.clone()),
            RecordRef::Animal(a) => RecordValue::Animal(a.clone()),
        }
    }
}

/// A concrete domain record type
///
/// Links the type to its [`RecordKind`] and to the tagged record variants.
/// Implemented for [`Address`], [`Person`] and [`Animal`] only.
pub trait DomainRecord: Clone + fmt::Debug + PartialEq + Send + Sync + 'static {
    /// Kind of this record type
    const KIND: RecordKind;

    /// Borrow as a tagged reference
    fn as_record_ref(&self) -> RecordRef<'_>;

    /// Wrap into a tagged value
    fn into_record_value(self) -> RecordValue;

    /// Unwrap from a tagged value
    ///
    /// Hands the value back unchanged when it holds a different kind.
    fn from_record_value(value: RecordValue) -> Result<Self, RecordValue>;

    /// Borrow out of a tagged reference of the same kind
    fn from_record_ref<'a>(record: RecordRef<'a>) -> Option<&'a Self>;
}

macro_rules! impl_domain_record {
    ($ty:ident) => {
        impl DomainRecord for $ty {
            const KIND: RecordKind = RecordKind::$ty;

            fn as_record_ref(&self) -> RecordRef<'_> {
                RecordRef::$ty(self)
            }

            fn into_record_value(self) -> RecordValue {
                RecordValue::$ty(self)
            }

            fn from_record_value(value: RecordValue) -> Result<Self, RecordValue> {
                match value {
                    RecordValue::$ty(inner) => Ok(inner),
                    other => Err(other),
                }
            }

            fn from_record_ref<'a>(record: RecordRef<'a>) -> Option<&'a Self> {
                match record {
                    RecordRef::$ty(inner) => Some(inner),
                    _ => None,
                }
            }
        }
    };
}

impl_domain_record!(Address);
impl_domain_record!(Person);
impl_domain_record!(Animal);
