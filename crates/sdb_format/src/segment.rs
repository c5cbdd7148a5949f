//! Segment header, reference table and record table.
//!
//! ## Layout
//!
//! ```text
//! offset  size  field
//!      0     3  magic "0aK"
//!      3     1  version
//!      4     6  reserved
//!     10     4  generation
//!     14     4  reference count R
//!     18     4  record count N
//!     22    10  reserved
//!     32  16*R  references (high u64, low u64)
//!      .   9*N  records (number u32, tag u8, offset u32)
//! ```
//!
//! All integers are big-endian. Decoding stops after the record table: the
//! record payloads that follow are not read.

use crate::config::DecodeOptions;
use crate::error::{FormatError, FormatResult};
use crate::id::SegmentId;
use crate::reader::FormatReader;
use crate::record::{Record, RecordKind};
use crate::Decode;
use std::io::Read;
use std::ops::RangeInclusive;

/// Magic bytes at the start of every segment.
pub const SEGMENT_MAGIC: [u8; 3] = *b"0aK";

/// Segment versions this crate can decode.
pub const SUPPORTED_VERSIONS: RangeInclusive<u8> = 12..=13;

/// Size of the fixed segment header.
pub const HEADER_SIZE: usize = 32;

/// Size of one reference table entry.
pub const REFERENCE_SIZE: usize = 16;

/// A decoded segment header with its reference and record tables.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Segment {
    /// Format version from the header.
    pub version: u8,
    /// Storage generation the segment was written in.
    pub generation: u32,
    /// Outbound references, in table order. Duplicates are kept.
    pub references: Vec<SegmentId>,
    /// Record table, in table order.
    pub records: Vec<Record>,
}

impl Segment {
    /// Returns the referenced segment for a 1-based reference number, as
    /// record ids inside the segment address them.
    #[must_use]
    pub fn reference(&self, number: usize) -> Option<SegmentId> {
        number
            .checked_sub(1)
            .and_then(|index| self.references.get(index).copied())
    }

    /// Returns the first record with the given number.
    #[must_use]
    pub fn record(&self, number: u32) -> Option<&Record> {
        self.records.iter().find(|r| r.number == number)
    }

    /// Number of bytes the header and both tables occupy.
    #[must_use]
    pub fn tables_size(&self) -> usize {
        HEADER_SIZE
            + self.references.len() * REFERENCE_SIZE
            + self.records.len() * Record::ENCODED_SIZE
    }
}

impl Decode for Segment {
    fn decode_with<R: Read + ?Sized>(
        reader: &mut R,
        options: &DecodeOptions,
    ) -> FormatResult<(Self, u64)> {
        let mut r = FormatReader::new(reader, options);

        let magic = r.read_fixed::<3>("segment magic")?;
        if magic != SEGMENT_MAGIC {
            return Err(FormatError::InvalidMagic { found: magic });
        }

        // Nothing past the version byte is interpreted for an unknown version.
        let version = r.read_u8("segment version")?;
        if !SUPPORTED_VERSIONS.contains(&version) {
            return Err(FormatError::UnsupportedVersion { version });
        }

        r.read_fixed::<6>("segment header")?;
        let generation = r.read_u32("segment generation")?;
        let reference_count = r.read_count("segment reference count")?;
        let record_count = r.read_count("segment record count")?;
        r.read_fixed::<10>("segment header")?;

        let references = r.read_repeated(reference_count, |r| {
            r.read_segment_id("segment reference")
        })?;

        let records = r.read_repeated(record_count, |r| {
            let number = r.read_u32("record number")?;
            let kind = RecordKind::from_tag(r.read_u8("record type")?);
            let offset = r.read_u32("record offset")?;
            Ok(Record::new(number, kind, offset))
        })?;

        let consumed = r.consumed();
        tracing::trace!(
            version,
            generation,
            references = references.len(),
            records = records.len(),
            consumed,
            "decoded segment"
        );

        Ok((
            Self {
                version,
                generation,
                references,
                records,
            },
            consumed,
        ))
    }
}
