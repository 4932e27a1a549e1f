//! Structural mapping for the built-in records
//!
//! Field names match the textual encoding (`streetName`, `firstName`,
//! `type`, ...), so the same record reads the same in every format.

use kvcodec_core::{
    Address, Animal, CodecResult, DomainRecord, Person, RecordKind, RecordRef, RecordValue,
};

use super::node::{Node, RecordNode};

/// A record that lowers to and rebuilds from a [`RecordNode`]
pub trait PortableRecord: DomainRecord {
    /// Lower to a record node
    fn to_node(&self) -> RecordNode;

    /// Rebuild from a record node of this record's kind
    ///
    /// Missing fields, unknown fields, and wrong node types are
    /// `MalformedEncoding`.
    fn from_node(node: RecordNode) -> CodecResult<Self>;
}

impl PortableRecord for Address {
    fn to_node(&self) -> RecordNode {
        RecordNode::new(Self::KIND)
            .with_field("streetName", Node::optional_text(self.street_name.as_deref()))
            .with_field("city", Node::optional_text(self.city.as_deref()))
            .with_field("state", Node::optional_text(self.state.as_deref()))
            .with_field("zipCode", Node::optional_text(self.zip_code.as_deref()))
    }

    fn from_node(node: RecordNode) -> CodecResult<Self> {
        let mut fields = node.into_reader();
        let address = Address {
            street_name: fields.take("streetName")?.into_optional_text("streetName")?,
            city: fields.take("city")?.into_optional_text("city")?,
            state: fields.take("state")?.into_optional_text("state")?,
            zip_code: fields.take("zipCode")?.into_optional_text("zipCode")?,
        };
        fields.finish()?;
        Ok(address)
    }
}

impl PortableRecord for Person {
    fn to_node(&self) -> RecordNode {
        let addresses = self
            .addresses
            .iter()
            .map(|a| Node::Record(a.to_node()))
            .collect();
        let phone_numbers = self.phone_numbers.iter().map(|n| Node::text(n)).collect();

        RecordNode::new(Self::KIND)
            .with_field("firstName", Node::text(&self.first_name))
            .with_field("lastName", Node::text(&self.last_name))
            .with_field("age", Node::Int(i64::from(self.age)))
            .with_field("addresses", Node::Seq(addresses))
            .with_field("phoneNumbers", Node::Seq(phone_numbers))
    }

    fn from_node(node: RecordNode) -> CodecResult<Self> {
        let mut fields = node.into_reader();
        let first_name = fields.take("firstName")?.into_text("firstName")?;
        let last_name = fields.take("lastName")?.into_text("lastName")?;
        let age = fields.take("age")?.into_i32("age")?;

        let addresses = fields
            .take("addresses")?
            .into_seq("addresses")?
            .into_iter()
            .map(|item| Address::from_node(item.into_record("addresses", Address::KIND)?))
            .collect::<CodecResult<Vec<_>>>()?;

        let phone_numbers = fields
            .take("phoneNumbers")?
            .into_seq("phoneNumbers")?
            .into_iter()
            .map(|item| item.into_text("phoneNumbers"))
            .collect::<CodecResult<Vec<_>>>()?;

        fields.finish()?;
        Ok(Person {
            first_name,
            last_name,
            age,
            addresses,
            phone_numbers,
        })
    }
}

impl PortableRecord for Animal {
    fn to_node(&self) -> RecordNode {
        RecordNode::new(Self::KIND)
            .with_field("type", Node::text(&self.kind))
            .with_field("name", Node::text(&self.name))
            .with_field("color", Node::text(&self.color))
            .with_field("age", Node::Int(i64::from(self.age)))
    }

    fn from_node(node: RecordNode) -> CodecResult<Self> {
        let mut fields = node.into_reader();
        let animal = Animal {
            kind: fields.take("type")?.into_text("type")?,
            name: fields.take("name")?.into_text("name")?,
            color: fields.take("color")?.into_text("color")?,
            age: fields.take("age")?.into_i32("age")?,
        };
        fields.finish()?;
        Ok(animal)
    }
}

/// Lower any record to a record node
pub fn record_to_node(record: RecordRef<'_>) -> RecordNode {
    match record {
        RecordRef::Address(a) => a.to_node(),
        RecordRef::Person(p) => p.to_node(),
        RecordRef::Animal(a) => a.to_node(),
    }
}

/// Rebuild a record from a node, dispatching on the node's kind
pub fn record_from_node(node: RecordNode) -> CodecResult<RecordValue> {
    match node.kind {
        RecordKind::Address => Address::from_node(node).map(RecordValue::Address),
        RecordKind::Person => Person::from_node(node).map(RecordValue::Person),
        RecordKind::Animal => Animal::from_node(node).map(RecordValue::Animal),
    }
}
