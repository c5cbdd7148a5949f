//! # sdb format
//!
//! Decoders for the binary formats of a segment store.
//!
//! This crate reads four formats:
//! - **Segments**: header, reference table and record table of one segment
//! - **Graphs**: segment-to-segment references collected across segments
//! - **Indexes**: where each segment lives inside a container
//! - **Binaries**: external binary references per generation and segment
//!
//! All four share the segment identifier encoding in [`SegmentId`].
//!
//! ## Decoding rules
//!
//! - Decoding is total-or-nothing: a value is returned fully populated or
//!   not at all
//! - Source order is preserved at every level; nothing is sorted or
//!   deduplicated
//! - Decoders read only what the declared counts require and leave any
//!   trailing bytes in the stream
//! - The stream is borrowed, never owned
//!
//! ## Usage
//!
//! ```
//! use sdb_format::{Decode, Index};
//!
//! // One entry: id (1, 2) at position 100, 50 bytes, generation 1.
//! let mut bytes = 1u32.to_be_bytes().to_vec();
//! bytes.extend_from_slice(&1u64.to_be_bytes());
//! bytes.extend_from_slice(&2u64.to_be_bytes());
//! bytes.extend_from_slice(&100u64.to_be_bytes());
//! bytes.extend_from_slice(&50u32.to_be_bytes());
//! bytes.extend_from_slice(&1u32.to_be_bytes());
//!
//! let (index, consumed) = Index::decode(&mut &bytes[..]).unwrap();
//! assert_eq!(consumed, bytes.len() as u64);
//! assert_eq!(
//!     index.entries[0].id.to_string(),
//!     "00000000000000010000000000000002"
//! );
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod binaries;
mod config;
mod error;
mod graph;
mod id;
mod index;
mod reader;
mod record;
mod segment;

pub use binaries::{Binaries, GenerationBinaries, SegmentBinaries};
pub use config::DecodeOptions;
pub use error::{FormatError, FormatResult, ParseSegmentIdError};
pub use graph::{Graph, GraphEntry};
pub use id::{entry_name_to_segment_id, normalize, SegmentId, SegmentKind};
pub use index::{Index, IndexEntry};
pub use record::{Record, RecordKind};
pub use segment::{Segment, HEADER_SIZE, REFERENCE_SIZE, SEGMENT_MAGIC, SUPPORTED_VERSIONS};

use std::io::Read;

/// Trait for values decoded from a segment store byte stream.
pub trait Decode: Sized {
    /// Decode a value from `reader` with explicit limits.
    ///
    /// Returns the value and the number of bytes consumed. Bytes past the
    /// end of the value are left in the stream.
    ///
    /// # Errors
    ///
    /// Returns an error if the stream ends early, a field is invalid, or the
    /// stream itself fails. No partial value is returned.
    fn decode_with<R: Read + ?Sized>(
        reader: &mut R,
        options: &DecodeOptions,
    ) -> FormatResult<(Self, u64)>;

    /// Decode a value from `reader` with default limits.
    ///
    /// # Errors
    ///
    /// See [`Decode::decode_with`].
    fn decode<R: Read + ?Sized>(reader: &mut R) -> FormatResult<(Self, u64)> {
        Self::decode_with(reader, &DecodeOptions::default())
    }

    /// Decode a value from the start of `bytes`, ignoring trailing bytes.
    ///
    /// # Errors
    ///
    /// See [`Decode::decode_with`].
    fn from_bytes(bytes: &[u8]) -> FormatResult<Self> {
        let mut stream = bytes;
        Self::decode(&mut stream).map(|(value, _)| value)
    }
}
