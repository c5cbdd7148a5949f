//! # sdb testkit
//!
//! Test utilities for the sdb format decoders.
//!
//! This crate provides:
//! - Fixture writers that produce synthetic byte streams for every format
//! - Property-based test generators using proptest
//! - Hex test vectors shared with other implementations
//! - Fuzz targets that must never panic
//!
//! ## Usage
//!
//! ```rust
//! use sdb_format::{Decode, Segment};
//! use sdb_testkit::prelude::*;
//!
//! let segment = SegmentFixture::new(13, 7).reference(1, 2).record(1, 7, 0x40);
//! let bytes = segment.to_bytes();
//! let (decoded, _) = Segment::decode(&mut &bytes[..]).unwrap();
//! assert_eq!(decoded.generation, 7);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod fixtures;
pub mod fuzz;
pub mod generators;
pub mod vectors;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::fixtures::*;
    pub use crate::fuzz::*;
    pub use crate::generators::*;
    pub use crate::vectors::*;
}

pub use fixtures::*;
pub use fuzz::*;
pub use generators::*;
pub use vectors::*;
