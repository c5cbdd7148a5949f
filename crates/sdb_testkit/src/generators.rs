//! Property-based test generators using proptest.
//!
//! Provides strategies for decoded values of every format. Encoding a
//! generated value with [`crate::fixtures::ToFixtureBytes`] gives a valid
//! stream for it.

use proptest::prelude::*;
use sdb_format::{
    Binaries, GenerationBinaries, Graph, GraphEntry, Index, IndexEntry, Record, RecordKind,
    Segment, SegmentBinaries, SegmentId, SUPPORTED_VERSIONS,
};

/// Strategy for arbitrary segment IDs.
pub fn segment_id_strategy() -> impl Strategy<Value = SegmentId> {
    (any::<u64>(), any::<u64>()).prop_map(|(high, low)| SegmentId::new(high, low))
}

/// Strategy for record kinds, known and unknown, by raw tag.
pub fn record_kind_strategy() -> impl Strategy<Value = RecordKind> {
    any::<u8>().prop_map(RecordKind::from_tag)
}

/// Strategy for record table entries.
pub fn record_strategy() -> impl Strategy<Value = Record> {
    (any::<u32>(), record_kind_strategy(), any::<u32>())
        .prop_map(|(number, kind, offset)| Record::new(number, kind, offset))
}

/// Strategy for segments with a supported version.
pub fn segment_strategy(max_len: usize) -> impl Strategy<Value = Segment> {
    (
        SUPPORTED_VERSIONS,
        any::<u32>(),
        prop::collection::vec(segment_id_strategy(), 0..=max_len),
        prop::collection::vec(record_strategy(), 0..=max_len),
    )
        .prop_map(|(version, generation, references, records)| Segment {
            version,
            generation,
            references,
            records,
        })
}

/// Strategy for reference graphs.
pub fn graph_strategy(max_len: usize) -> impl Strategy<Value = Graph> {
    prop::collection::vec(
        (
            segment_id_strategy(),
            prop::collection::vec(segment_id_strategy(), 0..=max_len),
        )
            .prop_map(|(id, references)| GraphEntry { id, references }),
        0..=max_len,
    )
    .prop_map(|entries| Graph { entries })
}

/// Strategy for index entries.
pub fn index_entry_strategy() -> impl Strategy<Value = IndexEntry> {
    (
        segment_id_strategy(),
        any::<u64>(),
        any::<u32>(),
        any::<u32>(),
    )
        .prop_map(|(id, position, size, generation)| IndexEntry {
            id,
            position,
            size,
            generation,
        })
}

/// Strategy for indexes.
pub fn index_strategy(max_len: usize) -> impl Strategy<Value = Index> {
    prop::collection::vec(index_entry_strategy(), 0..=max_len).prop_map(|entries| Index { entries })
}

/// Strategy for binary reference strings.
pub fn binary_reference_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[0-9a-f]{0,40}(#[0-9]{1,6})?").expect("Invalid regex")
}

/// Strategy for binaries.
pub fn binaries_strategy(max_len: usize) -> impl Strategy<Value = Binaries> {
    let segment = (
        segment_id_strategy(),
        prop::collection::vec(binary_reference_strategy(), 0..=max_len),
    )
        .prop_map(|(id, references)| SegmentBinaries { id, references });
    let generation = (any::<u32>(), prop::collection::vec(segment, 0..=max_len))
        .prop_map(|(generation, segments)| GenerationBinaries {
            generation,
            segments,
        });
    prop::collection::vec(generation, 0..=max_len).prop_map(|generations| Binaries { generations })
}

/// Configuration for property tests.
#[derive(Debug, Clone)]
pub struct PropTestConfig {
    /// Number of test cases to run.
    pub cases: u32,
    /// Maximum shrink iterations.
    pub max_shrink_iters: u32,
}

impl Default for PropTestConfig {
    fn default() -> Self {
        Self {
            cases: 256,
            max_shrink_iters: 1000,
        }
    }
}

impl PropTestConfig {
    /// Creates a configuration for quick tests.
    #[must_use]
    pub fn quick() -> Self {
        Self {
            cases: 32,
            max_shrink_iters: 100,
        }
    }

    /// Creates a configuration for thorough tests.
    #[must_use]
    pub fn thorough() -> Self {
        Self {
            cases: 1024,
            max_shrink_iters: 10000,
        }
    }

    /// Converts to proptest config.
    #[must_use]
    pub fn to_proptest_config(&self) -> ProptestConfig {
        ProptestConfig {
            cases: self.cases,
            max_shrink_iters: self.max_shrink_iters,
            ..ProptestConfig::default()
        }
    }
}
