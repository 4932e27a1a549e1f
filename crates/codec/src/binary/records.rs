//! Field codecs for the built-in records
//!
//! # Field Order
//!
//! ```text
//! Address: street_name?, city?, state?, zip_code?        (optional text)
//! Animal:  kind, name, color (text), age (i32)
//! Person:  first_name, last_name (text), age (i32),
//!          addresses (u32 count + Address fields each),
//!          phone_numbers (u32 count + text each)
//! ```

use kvcodec_core::{Address, Animal, CodecResult, Person};

use super::field::FieldCodec;
use super::{ByteCursor, ByteSink};

/// Field codec for [`Address`]
#[derive(Debug, Clone, Copy, Default)]
pub struct AddressCodec;

impl FieldCodec for AddressCodec {
    type Record = Address;

    fn write(&self, sink: &mut ByteSink, address: &Address) -> CodecResult<()> {
        sink.write_optional_text(address.street_name.as_deref())?;
        sink.write_optional_text(address.city.as_deref())?;
        sink.write_optional_text(address.state.as_deref())?;
        sink.write_optional_text(address.zip_code.as_deref())
    }

    fn read(&self, cursor: &mut ByteCursor<'_>) -> CodecResult<Address> {
        Ok(Address {
            street_name: cursor.read_optional_text()?,
            city: cursor.read_optional_text()?,
            state: cursor.read_optional_text()?,
            zip_code: cursor.read_optional_text()?,
        })
    }
}

/// Field codec for [`Animal`]
#[derive(Debug, Clone, Copy, Default)]
pub struct AnimalCodec;

impl FieldCodec for AnimalCodec {
    type Record = Animal;

    fn write(&self, sink: &mut ByteSink, animal: &Animal) -> CodecResult<()> {
        sink.write_text(&animal.kind)?;
        sink.write_text(&animal.name)?;
        sink.write_text(&animal.color)?;
        sink.write_i32(animal.age)
    }

    fn read(&self, cursor: &mut ByteCursor<'_>) -> CodecResult<Animal> {
        Ok(Animal {
            kind: cursor.read_text()?,
            name: cursor.read_text()?,
            color: cursor.read_text()?,
            age: cursor.read_i32()?,
        })
    }
}

/// Field codec for [`Person`]
///
/// Nested addresses are written with [`AddressCodec`].
#[derive(Debug, Clone, Copy, Default)]
pub struct PersonCodec;

impl FieldCodec for PersonCodec {
    type Record = Person;

    fn write(&self, sink: &mut ByteSink, person: &Person) -> CodecResult<()> {
        sink.write_text(&person.first_name)?;
        sink.write_text(&person.last_name)?;
        sink.write_i32(person.age)?;

        sink.write_len(person.addresses.len())?;
        for address in &person.addresses {
            AddressCodec.write(sink, address)?;
        }

        sink.write_len(person.phone_numbers.len())?;
        for number in &person.phone_numbers {
            sink.write_text(number)?;
        }
        Ok(())
    }

    fn read(&self, cursor: &mut ByteCursor<'_>) -> CodecResult<Person> {
        let first_name = cursor.read_text()?;
        let last_name = cursor.read_text()?;
        let age = cursor.read_i32()?;

        // Every element takes at least one byte, so the remaining length
        // bounds any honest count.
        let count = cursor.read_len()?;
        let mut addresses = Vec::with_capacity(count.min(cursor.remaining()));
        for _ in 0..count {
            addresses.push(AddressCodec.read(cursor)?);
        }

        let count = cursor.read_len()?;
        let mut phone_numbers = Vec::with_capacity(count.min(cursor.remaining()));
        for _ in 0..count {
            phone_numbers.push(cursor.read_text()?);
        }

        Ok(Person {
            first_name,
            last_name,
            age,
            addresses,
            phone_numbers,
        })
    }
}
