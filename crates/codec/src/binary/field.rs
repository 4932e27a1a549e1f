//! Binary field codec traits
//!
//! A field codec is bound to exactly one record type. It writes that type's
//! fields in a fixed order and reads them back in the same order.
//!
//! [`FieldCodec`] is the typed form implementors write. [`ErasedFieldCodec`]
//! is the object-safe form the registry stores; every `FieldCodec` gets it
//! through a blanket impl.

use kvcodec_core::{CodecError, CodecResult, DomainRecord, RecordKind, RecordRef, RecordValue};

use super::{ByteCursor, ByteSink};

/// Per-type binary field codec
///
/// Invariant: `read` consumes exactly the bytes `write` produced for the
/// same record.
pub trait FieldCodec: Send + Sync + 'static {
    /// Record type this codec handles
    type Record: DomainRecord;

    /// Append the record's fields to `sink`
    fn write(&self, sink: &mut ByteSink, record: &Self::Record) -> CodecResult<()>;

    /// Read a fresh record from `cursor`
    fn read(&self, cursor: &mut ByteCursor<'_>) -> CodecResult<Self::Record>;
}

/// Object-safe field codec keyed by [`RecordKind`]
pub trait ErasedFieldCodec: Send + Sync {
    /// Kind this codec handles
    fn kind(&self) -> RecordKind;

    /// Append a record's fields to `sink`
    ///
    /// Fails with `TypeMismatch` if `record` is of another kind.
    fn write_record(&self, sink: &mut ByteSink, record: RecordRef<'_>) -> CodecResult<()>;

    /// Read a fresh record from `cursor`
    fn read_record(&self, cursor: &mut ByteCursor<'_>) -> CodecResult<RecordValue>;
}

impl<C: FieldCodec> ErasedFieldCodec for C {
    fn kind(&self) -> RecordKind {
        C::Record::KIND
    }

    fn write_record(&self, sink: &mut ByteSink, record: RecordRef<'_>) -> CodecResult<()> {
        let typed = C::Record::from_record_ref(record).ok_or(CodecError::TypeMismatch {
            expected: C::Record::KIND,
            actual: record.kind(),
        })?;
        self.write(sink, typed)
    }

    fn read_record(&self, cursor: &mut ByteCursor<'_>) -> CodecResult<RecordValue> {
        self.read(cursor).map(DomainRecord::into_record_value)
    }
}
