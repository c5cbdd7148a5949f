//! External binary references, grouped by generation and segment.
//!
//! Layout (big-endian):
//!
//! ```text
//! u32 generation count
//! per generation: u32 generation, u32 segment count
//!   per segment: id (16), u32 reference count
//!     per reference: u32 length, UTF-8 bytes
//! ```

use crate::config::DecodeOptions;
use crate::error::FormatResult;
use crate::id::SegmentId;
use crate::reader::FormatReader;
use crate::Decode;
use std::io::Read;

/// Binary references reachable from one segment.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SegmentBinaries {
    /// The segment holding the references.
    pub id: SegmentId,
    /// Opaque references to external binary values, in stream order.
    pub references: Vec<String>,
}

/// Binary references written in one generation.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GenerationBinaries {
    /// The generation.
    pub generation: u32,
    /// Segments of this generation, in stream order.
    pub segments: Vec<SegmentBinaries>,
}

/// Decoded binary references. Every level keeps stream order.
///
/// A reference whose declared length exceeds
/// [`DecodeOptions::max_string_len`] or whose bytes are not UTF-8 fails with
/// [`FormatError::MalformedString`](crate::FormatError::MalformedString); a
/// stream that ends inside a reference fails with
/// [`FormatError::TruncatedInput`](crate::FormatError::TruncatedInput).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Binaries {
    /// Generations, in stream order.
    pub generations: Vec<GenerationBinaries>,
}

impl Binaries {
    /// Iterates over every reference as `(generation, segment, reference)`.
    pub fn iter_references(&self) -> impl Iterator<Item = (u32, SegmentId, &str)> + '_ {
        self.generations.iter().flat_map(|g| {
            g.segments.iter().flat_map(move |s| {
                s.references
                    .iter()
                    .map(move |reference| (g.generation, s.id, reference.as_str()))
            })
        })
    }

    /// Total number of references.
    #[must_use]
    pub fn reference_count(&self) -> usize {
        self.generations
            .iter()
            .flat_map(|g| &g.segments)
            .map(|s| s.references.len())
            .sum()
    }
}

impl Decode for Binaries {
    fn decode_with<R: Read + ?Sized>(
        reader: &mut R,
        options: &DecodeOptions,
    ) -> FormatResult<(Self, u64)> {
        let mut r = FormatReader::new(reader, options);

        let generation_count = r.read_count("binaries generation count")?;
        let generations = r.read_repeated(generation_count, |r| {
            let generation = r.read_u32("binaries generation")?;
            let segment_count = r.read_count("binaries segment count")?;
            let segments = r.read_repeated(segment_count, |r| {
                let id = r.read_segment_id("binaries segment id")?;
                let reference_count = r.read_count("binaries reference count")?;
                let references =
                    r.read_repeated(reference_count, |r| r.read_string("binary reference"))?;
                Ok(SegmentBinaries { id, references })
            })?;
            Ok(GenerationBinaries {
                generation,
                segments,
            })
        })?;

        let binaries = Self { generations };
        let consumed = r.consumed();
        tracing::trace!(
            generations = binaries.generations.len(),
            references = binaries.reference_count(),
            consumed,
            "decoded binaries"
        );

        Ok((binaries, consumed))
    }
}
