//! Segment-to-segment reference graph.
//!
//! The graph records which segments reference which others, so reachability
//! can be computed without opening every segment. Layout (big-endian):
//!
//! ```text
//! u32 entry count
//! per entry: id (16), u32 reference count, references (16 each)
//! ```

use crate::config::DecodeOptions;
use crate::error::FormatResult;
use crate::id::SegmentId;
use crate::reader::FormatReader;
use crate::Decode;
use std::io::Read;

/// Outbound edges of one segment.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GraphEntry {
    /// The referencing segment.
    pub id: SegmentId,
    /// Referenced segments, in stream order. May be empty, may contain
    /// duplicates or `id` itself.
    pub references: Vec<SegmentId>,
}

/// A decoded reference graph, entries in stream order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Graph {
    /// Graph entries.
    pub entries: Vec<GraphEntry>,
}

impl Graph {
    /// Returns the references of the first entry for `id`.
    #[must_use]
    pub fn references_of(&self, id: SegmentId) -> Option<&[SegmentId]> {
        self.entries
            .iter()
            .find(|e| e.id == id)
            .map(|e| e.references.as_slice())
    }

    /// Total number of edges across all entries.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.entries.iter().map(|e| e.references.len()).sum()
    }
}

impl Decode for Graph {
    fn decode_with<R: Read + ?Sized>(
        reader: &mut R,
        options: &DecodeOptions,
    ) -> FormatResult<(Self, u64)> {
        let mut r = FormatReader::new(reader, options);

        let count = r.read_count("graph entry count")?;
        let entries = r.read_repeated(count, |r| {
            let id = r.read_segment_id("graph entry id")?;
            let reference_count = r.read_count("graph reference count")?;
            let references =
                r.read_repeated(reference_count, |r| r.read_segment_id("graph reference"))?;
            Ok(GraphEntry { id, references })
        })?;

        let graph = Self { entries };
        let consumed = r.consumed();
        tracing::trace!(
            entries = graph.entries.len(),
            edges = graph.edge_count(),
            consumed,
            "decoded graph"
        );

        Ok((graph, consumed))
    }
}
