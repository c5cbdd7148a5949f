//! Index of segment locations inside a container.
//!
//! Layout (big-endian):
//!
//! ```text
//! u32 entry count
//! per entry: high u64, low u64, position u64, size u32, generation u32
//! ```
//!
//! Entries are neither sorted nor unique. Choosing between duplicate
//! identities is left to whoever resolves locations.

use crate::config::DecodeOptions;
use crate::error::FormatResult;
use crate::id::{SegmentId, SegmentKind};
use crate::reader::FormatReader;
use crate::Decode;
use std::io::Read;

/// Location of one segment inside a container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IndexEntry {
    /// Segment identifier.
    pub id: SegmentId,
    /// Byte offset of the segment within the container.
    pub position: u64,
    /// Length of the segment in bytes. Zero is valid.
    pub size: u32,
    /// Generation the segment was written in.
    pub generation: u32,
}

impl IndexEntry {
    /// Size of one encoded entry: id (16) + position (8) + size (4) + generation (4).
    pub const ENCODED_SIZE: usize = 32;

    /// Classifies the entry's segment.
    #[must_use]
    pub const fn kind(&self) -> SegmentKind {
        self.id.kind()
    }

    /// Byte range of the segment within the container.
    #[must_use]
    pub fn byte_range(&self) -> std::ops::Range<u64> {
        self.position..self.position.saturating_add(u64::from(self.size))
    }
}

/// A decoded index, entries in stream order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Index {
    /// Index entries.
    pub entries: Vec<IndexEntry>,
}

impl Index {
    /// Returns every entry for `id`, in stream order.
    pub fn entries_for(&self, id: SegmentId) -> impl Iterator<Item = &IndexEntry> + '_ {
        self.entries.iter().filter(move |e| e.id == id)
    }
}

impl Decode for Index {
    fn decode_with<R: Read + ?Sized>(
        reader: &mut R,
        options: &DecodeOptions,
    ) -> FormatResult<(Self, u64)> {
        let mut r = FormatReader::new(reader, options);

        let count = r.read_count("index entry count")?;
        let entries = r.read_repeated(count, |r| {
            Ok(IndexEntry {
                id: r.read_segment_id("index entry id")?,
                position: r.read_u64("index entry position")?,
                size: r.read_u32("index entry size")?,
                generation: r.read_u32("index entry generation")?,
            })
        })?;

        let consumed = r.consumed();
        tracing::trace!(entries = entries.len(), consumed, "decoded index");

        Ok((Self { entries }, consumed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FormatError;

    fn encode(entries: &[IndexEntry]) -> Vec<u8> {
        let mut buf = Vec::new();
        buf.extend_from_slice(&(entries.len() as u32).to_be_bytes());
        for e in entries {
            buf.extend_from_slice(&e.id.high().to_be_bytes());
            buf.extend_from_slice(&e.id.low().to_be_bytes());
            buf.extend_from_slice(&e.position.to_be_bytes());
            buf.extend_from_slice(&e.size.to_be_bytes());
            buf.extend_from_slice(&e.generation.to_be_bytes());
        }
        buf
    }

    #[test]
    fn duplicates_are_passed_through_in_order() {
        let a = SegmentId::new(0x1234, 0xb000_0000_0000_0001);
        let entries = [
            IndexEntry {
                id: a,
                position: 100,
                size: 50,
                generation: 1,
            },
            IndexEntry {
                id: a,
                position: 300,
                size: 20,
                generation: 2,
            },
        ];
        let data = encode(&entries);

        let (index, consumed) = Index::decode(&mut &data[..]).unwrap();

        assert_eq!(index.entries, entries.to_vec());
        assert_eq!(consumed, 4 + 2 * IndexEntry::ENCODED_SIZE as u64);
        assert_eq!(index.entries_for(a).count(), 2);
        assert_eq!(index.entries[0].kind(), SegmentKind::Bulk);
    }

    #[test]
    fn zero_size_and_unsorted_entries() {
        let entries = [
            IndexEntry {
                id: SegmentId::new(9, 9),
                position: u64::MAX - 1,
                size: 0,
                generation: 3,
            },
            IndexEntry {
                id: SegmentId::new(1, 1),
                position: 0,
                size: u32::MAX,
                generation: 0,
            },
        ];
        let data = encode(&entries);

        let (index, _) = Index::decode(&mut &data[..]).unwrap();

        assert_eq!(index.entries, entries.to_vec());
        assert!(index.entries[0].byte_range().is_empty());
        assert_eq!(index.entries[1].byte_range(), 0..u64::from(u32::MAX));
    }

    #[test]
    fn truncated_at_every_boundary() {
        let data = encode(&[IndexEntry {
            id: SegmentId::new(1, 2),
            position: 3,
            size: 4,
            generation: 5,
        }]);

        for len in 0..data.len() {
            assert!(
                matches!(
                    Index::decode(&mut &data[..len]),
                    Err(FormatError::TruncatedInput { .. })
                ),
                "length {len}"
            );
        }
    }
}
