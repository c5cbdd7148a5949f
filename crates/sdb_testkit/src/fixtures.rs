//! Fixture writers for synthetic byte streams.
//!
//! These produce the exact layouts the decoders read, so tests can build
//! inputs from decoded values and compare field by field. They are test
//! helpers only; the format crate has no writers.

use sdb_format::{
    Binaries, Graph, Index, Record, Segment, SegmentId, HEADER_SIZE, REFERENCE_SIZE,
    SEGMENT_MAGIC,
};

/// Writes a value in its on-disk layout.
pub trait ToFixtureBytes {
    /// Appends the encoded value to `buf`.
    fn write_to(&self, buf: &mut Vec<u8>);

    /// Returns the encoded value.
    fn to_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        self.write_to(&mut buf);
        buf
    }
}

fn put_u32(buf: &mut Vec<u8>, value: u32) {
    buf.extend_from_slice(&value.to_be_bytes());
}

fn put_count(buf: &mut Vec<u8>, len: usize) {
    put_u32(buf, u32::try_from(len).expect("fixture count exceeds u32"));
}

fn put_id(buf: &mut Vec<u8>, id: SegmentId) {
    buf.extend_from_slice(&id.high().to_be_bytes());
    buf.extend_from_slice(&id.low().to_be_bytes());
}

/// Writes a segment header with explicit counts.
pub fn write_segment_header(
    buf: &mut Vec<u8>,
    version: u8,
    generation: u32,
    reference_count: u32,
    record_count: u32,
) {
    let start = buf.len();
    buf.extend_from_slice(&SEGMENT_MAGIC);
    buf.push(version);
    buf.extend_from_slice(&[0; 6]);
    put_u32(buf, generation);
    put_u32(buf, reference_count);
    put_u32(buf, record_count);
    buf.extend_from_slice(&[0; 10]);
    debug_assert_eq!(buf.len() - start, HEADER_SIZE);
}

fn write_record(buf: &mut Vec<u8>, number: u32, tag: u8, offset: u32) {
    put_u32(buf, number);
    buf.push(tag);
    put_u32(buf, offset);
}

impl ToFixtureBytes for Segment {
    fn write_to(&self, buf: &mut Vec<u8>) {
        write_segment_header(
            buf,
            self.version,
            self.generation,
            u32::try_from(self.references.len()).expect("too many references"),
            u32::try_from(self.records.len()).expect("too many records"),
        );
        for reference in &self.references {
            put_id(buf, *reference);
        }
        for Record {
            number,
            kind,
            offset,
        } in &self.records
        {
            write_record(buf, *number, kind.tag(), *offset);
        }
    }
}

impl ToFixtureBytes for Graph {
    fn write_to(&self, buf: &mut Vec<u8>) {
        put_count(buf, self.entries.len());
        for entry in &self.entries {
            put_id(buf, entry.id);
            put_count(buf, entry.references.len());
            for reference in &entry.references {
                put_id(buf, *reference);
            }
        }
    }
}

impl ToFixtureBytes for Index {
    fn write_to(&self, buf: &mut Vec<u8>) {
        put_count(buf, self.entries.len());
        for entry in &self.entries {
            put_id(buf, entry.id);
            buf.extend_from_slice(&entry.position.to_be_bytes());
            put_u32(buf, entry.size);
            put_u32(buf, entry.generation);
        }
    }
}

impl ToFixtureBytes for Binaries {
    fn write_to(&self, buf: &mut Vec<u8>) {
        put_count(buf, self.generations.len());
        for generation in &self.generations {
            put_u32(buf, generation.generation);
            put_count(buf, generation.segments.len());
            for segment in &generation.segments {
                put_id(buf, segment.id);
                put_count(buf, segment.references.len());
                for reference in &segment.references {
                    put_count(buf, reference.len());
                    buf.extend_from_slice(reference.as_bytes());
                }
            }
        }
    }
}

/// Builder for segment streams with raw record tags.
///
/// Unlike encoding a [`Segment`], this can write any version byte and any
/// tag, including ones the decoder rejects or does not know.
#[derive(Debug, Clone)]
pub struct SegmentFixture {
    version: u8,
    generation: u32,
    references: Vec<(u64, u64)>,
    records: Vec<(u32, u8, u32)>,
    trailer: Vec<u8>,
}

impl SegmentFixture {
    /// Creates an empty segment fixture.
    #[must_use]
    pub fn new(version: u8, generation: u32) -> Self {
        Self {
            version,
            generation,
            references: Vec::new(),
            records: Vec::new(),
            trailer: Vec::new(),
        }
    }

    /// Adds a reference.
    #[must_use]
    pub fn reference(mut self, high: u64, low: u64) -> Self {
        self.references.push((high, low));
        self
    }

    /// Adds a record with a raw tag byte.
    #[must_use]
    pub fn record(mut self, number: u32, tag: u8, offset: u32) -> Self {
        self.records.push((number, tag, offset));
        self
    }

    /// Appends bytes after the record table, standing in for record data.
    #[must_use]
    pub fn trailer(mut self, bytes: &[u8]) -> Self {
        self.trailer.extend_from_slice(bytes);
        self
    }

    /// Length of the header plus both tables.
    #[must_use]
    pub fn tables_len(&self) -> usize {
        HEADER_SIZE
            + self.references.len() * REFERENCE_SIZE
            + self.records.len() * Record::ENCODED_SIZE
    }

    /// Encodes the fixture.
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(self.tables_len() + self.trailer.len());
        write_segment_header(
            &mut buf,
            self.version,
            self.generation,
            u32::try_from(self.references.len()).expect("too many references"),
            u32::try_from(self.records.len()).expect("too many records"),
        );
        for &(high, low) in &self.references {
            put_id(&mut buf, SegmentId::new(high, low));
        }
        for &(number, tag, offset) in &self.records {
            write_record(&mut buf, number, tag, offset);
        }
        buf.extend_from_slice(&self.trailer);
        buf
    }
}
