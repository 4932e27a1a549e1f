//! Structural node tree
//!
//! A record graph is lowered to a tree of [`Node`]s before it is written.
//! Every record node carries its kind tag and named fields, so the payload
//! describes itself without any out-of-band schema.
//!
//! # Node Encoding
//!
//! ```text
//! 0x00 Absent
//! 0x01 Text    u32 len + UTF-8
//! 0x02 Int     i64 LE
//! 0x03 Seq     u32 count + nodes
//! 0x04 Record  kind tag u8 + u16 field count + fields
//!              (u16 name len + UTF-8 name + node)
//! ```

use kvcodec_core::{CodecError, CodecResult, RecordKind};

use super::{CODEC_ID, MAX_NESTING_DEPTH};
use crate::binary::{ByteCursor, ByteSink};

const TAG_ABSENT: u8 = 0x00;
const TAG_TEXT: u8 = 0x01;
const TAG_INT: u8 = 0x02;
const TAG_SEQ: u8 = 0x03;
const TAG_RECORD: u8 = 0x04;

/// A value in the structural tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Missing optional value
    Absent,
    /// UTF-8 text
    Text(String),
    /// Signed integer
    Int(i64),
    /// Ordered sequence
    Seq(Vec<Node>),
    /// Nested record
    Record(RecordNode),
}

/// A record in the structural tree: kind plus named fields in write order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordNode {
    /// Kind of the record
    pub kind: RecordKind,
    /// Named fields
    pub fields: Vec<(String, Node)>,
}

fn malformed(detail: impl Into<String>) -> CodecError {
    CodecError::malformed(CODEC_ID, detail)
}

impl Node {
    /// Text node
    pub fn text(value: &str) -> Node {
        Node::Text(value.to_string())
    }

    /// Text node, or `Absent` for `None`
    pub fn optional_text(value: Option<&str>) -> Node {
        value.map_or(Node::Absent, Node::text)
    }

    fn describe(&self) -> &'static str {
        match self {
            Node::Absent => "absent",
            Node::Text(_) => "text",
            Node::Int(_) => "int",
            Node::Seq(_) => "seq",
            Node::Record(_) => "record",
        }
    }

    /// Unwrap a text node
    pub fn into_text(self, field: &str) -> CodecResult<String> {
        match self {
            Node::Text(s) => Ok(s),
            other => Err(malformed(format!("field {} expected text, found {}", field, other.describe()))),
        }
    }

    /// Unwrap a text or absent node
    pub fn into_optional_text(self, field: &str) -> CodecResult<Option<String>> {
        match self {
            Node::Absent => Ok(None),
            Node::Text(s) => Ok(Some(s)),
            other => Err(malformed(format!(
                "field {} expected optional text, found {}",
                field,
                other.describe()
            ))),
        }
    }

    /// Unwrap an int node that must fit an i32
    pub fn into_i32(self, field: &str) -> CodecResult<i32> {
        match self {
            Node::Int(v) => i32::try_from(v)
                .map_err(|_| malformed(format!("field {} value {} out of i32 range", field, v))),
            other => Err(malformed(format!("field {} expected int, found {}", field, other.describe()))),
        }
    }

    /// Unwrap a sequence node
    pub fn into_seq(self, field: &str) -> CodecResult<Vec<Node>> {
        match self {
            Node::Seq(items) => Ok(items),
            other => Err(malformed(format!("field {} expected seq, found {}", field, other.describe()))),
        }
    }

    /// Unwrap a record node of the given kind
    pub fn into_record(self, field: &str, kind: RecordKind) -> CodecResult<RecordNode> {
        match self {
            Node::Record(record) if record.kind == kind => Ok(record),
            Node::Record(record) => Err(malformed(format!(
                "field {} expected {} record, found {}",
                field, kind, record.kind
            ))),
            other => Err(malformed(format!("field {} expected record, found {}", field, other.describe()))),
        }
    }

    /// Append this node to `sink`
    pub fn write(&self, sink: &mut ByteSink) -> CodecResult<()> {
        match self {
            Node::Absent => sink.write_u8(TAG_ABSENT),
            Node::Text(s) => {
                sink.write_u8(TAG_TEXT)?;
                sink.write_text(s)
            }
            Node::Int(v) => {
                sink.write_u8(TAG_INT)?;
                sink.write_i64(*v)
            }
            Node::Seq(items) => {
                sink.write_u8(TAG_SEQ)?;
                sink.write_len(items.len())?;
                for item in items {
                    item.write(sink)?;
                }
                Ok(())
            }
            Node::Record(record) => record.write(sink),
        }
    }

    /// Read one node from `cursor`
    ///
    /// `depth` is the nesting level of this node; the root is 1.
    pub fn read(cursor: &mut ByteCursor<'_>, depth: usize) -> CodecResult<Node> {
        if depth > MAX_NESTING_DEPTH {
            return Err(cursor.malformed(format!("nesting deeper than {}", MAX_NESTING_DEPTH)));
        }
        match cursor.read_u8()? {
            TAG_ABSENT => Ok(Node::Absent),
            TAG_TEXT => cursor.read_text().map(Node::Text),
            TAG_INT => cursor.read_i64().map(Node::Int),
            TAG_SEQ => {
                let count = cursor.read_len()?;
                let mut items = Vec::with_capacity(count.min(cursor.remaining()));
                for _ in 0..count {
                    items.push(Node::read(cursor, depth + 1)?);
                }
                Ok(Node::Seq(items))
            }
            TAG_RECORD => RecordNode::read_body(cursor, depth).map(Node::Record),
            tag => Err(cursor.malformed(format!(
                "unknown node tag {:#04x} at offset {}",
                tag,
                cursor.position() - 1
            ))),
        }
    }
}

impl RecordNode {
    /// Empty record node
    pub fn new(kind: RecordKind) -> Self {
        RecordNode {
            kind,
            fields: Vec::new(),
        }
    }

    /// Append a field
    pub fn with_field(mut self, name: &str, node: Node) -> Self {
        self.fields.push((name.to_string(), node));
        self
    }

    /// Start reading fields by name
    pub fn into_reader(self) -> FieldReader {
        FieldReader {
            kind: self.kind,
            fields: self.fields,
        }
    }

    /// Append this record as a node to `sink`
    pub fn write(&self, sink: &mut ByteSink) -> CodecResult<()> {
        sink.write_u8(TAG_RECORD)?;
        sink.write_u8(self.kind.tag())?;
        let count = u16::try_from(self.fields.len())
            .map_err(|_| malformed(format!("{} fields exceed u16", self.fields.len())))?;
        sink.write_u16(count)?;
        for (name, node) in &self.fields {
            let len = u16::try_from(name.len())
                .map_err(|_| malformed(format!("field name of {} bytes exceeds u16", name.len())))?;
            sink.write_u16(len)?;
            sink.write_raw(name.as_bytes())?;
            node.write(sink)?;
        }
        Ok(())
    }

    fn read_body(cursor: &mut ByteCursor<'_>, depth: usize) -> CodecResult<RecordNode> {
        let tag = cursor.read_u8()?;
        let kind = RecordKind::from_tag(tag)
            .ok_or_else(|| cursor.malformed(format!("unknown record kind tag {:#04x}", tag)))?;
        let count = cursor.read_u16()? as usize;
        let mut fields = Vec::with_capacity(count.min(cursor.remaining()));
        for _ in 0..count {
            let len = cursor.read_u16()? as usize;
            let name = std::str::from_utf8(cursor.take(len)?)
                .map_err(|_| cursor.malformed("field name is not valid UTF-8"))?
                .to_string();
            let node = Node::read(cursor, depth + 1)?;
            fields.push((name, node));
        }
        Ok(RecordNode { kind, fields })
    }
}

/// Pulls named fields out of a record node
///
/// Every field must be taken exactly once; anything left over when
/// [`FieldReader::finish`] is called is an unknown field.
#[derive(Debug)]
pub struct FieldReader {
    kind: RecordKind,
    fields: Vec<(String, Node)>,
}

impl FieldReader {
    /// Remove and return the named field
    pub fn take(&mut self, name: &str) -> CodecResult<Node> {
        let idx = self
            .fields
            .iter()
            .position(|(n, _)| n == name)
            .ok_or_else(|| malformed(format!("{} record is missing field {}", self.kind, name)))?;
        Ok(self.fields.remove(idx).1)
    }

    /// Require that no fields remain
    pub fn finish(self) -> CodecResult<()> {
        match self.fields.first() {
            None => Ok(()),
            Some((name, _)) => Err(malformed(format!(
                "{} record has unknown field {}",
                self.kind, name
            ))),
        }
    }
}
