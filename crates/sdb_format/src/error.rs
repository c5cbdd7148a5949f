//! Error types for the format crate.

use std::io;
use thiserror::Error;

/// Result type for decoding operations.
pub type FormatResult<T> = Result<T, FormatError>;

/// Errors that can occur while decoding a segment store format.
///
/// Every variant is terminal for the decode call that produced it. Decoders
/// never retry and never hand back a partially built value.
#[derive(Debug, Error)]
pub enum FormatError {
    /// The stream ended before a declared count or length was satisfied.
    #[error("truncated input: stream ended while reading {context} ({expected} bytes expected)")]
    TruncatedInput {
        /// The field being read when the stream ended.
        context: &'static str,
        /// Number of bytes the field needed.
        expected: usize,
    },

    /// The segment header declares a version this crate cannot decode.
    #[error("unsupported segment version: {version}")]
    UnsupportedVersion {
        /// The version byte found in the header.
        version: u8,
    },

    /// A length-prefixed string could not be decoded.
    #[error("malformed string in {context}: {message}")]
    MalformedString {
        /// The field being read.
        context: &'static str,
        /// Description of the problem.
        message: String,
    },

    /// The segment header does not start with the segment magic.
    #[error("invalid segment magic: {found:02x?}")]
    InvalidMagic {
        /// The bytes found where the magic was expected.
        found: [u8; 3],
    },

    /// The underlying stream failed or was cancelled.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl FormatError {
    /// Create a truncated input error.
    pub fn truncated(context: &'static str, expected: usize) -> Self {
        Self::TruncatedInput { context, expected }
    }

    /// Create a malformed string error.
    pub fn malformed_string(context: &'static str, message: impl Into<String>) -> Self {
        Self::MalformedString {
            context,
            message: message.into(),
        }
    }

    /// Maps a read failure, turning an early end of stream into
    /// [`FormatError::TruncatedInput`].
    pub(crate) fn from_read(err: io::Error, context: &'static str, expected: usize) -> Self {
        if err.kind() == io::ErrorKind::UnexpectedEof {
            Self::truncated(context, expected)
        } else {
            Self::Io(err)
        }
    }

    /// Returns `true` if this is a [`FormatError::TruncatedInput`].
    #[must_use]
    pub fn is_truncated(&self) -> bool {
        matches!(self, Self::TruncatedInput { .. })
    }
}

/// Error returned when text cannot be parsed into a segment identifier.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid segment id: {input:?}")]
pub struct ParseSegmentIdError {
    /// The normalized input that failed to parse.
    pub input: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eof_maps_to_truncated() {
        let err = FormatError::from_read(io::Error::from(io::ErrorKind::UnexpectedEof), "count", 4);
        assert!(err.is_truncated());
        assert!(matches!(
            err,
            FormatError::TruncatedInput {
                context: "count",
                expected: 4
            }
        ));
    }

    #[test]
    fn other_read_failures_stay_io() {
        let err = FormatError::from_read(io::Error::from(io::ErrorKind::TimedOut), "count", 4);
        assert!(matches!(err, FormatError::Io(ref e) if e.kind() == io::ErrorKind::TimedOut));
    }

    #[test]
    fn display_messages() {
        let err = FormatError::UnsupportedVersion { version: 99 };
        assert_eq!(err.to_string(), "unsupported segment version: 99");

        let err = FormatError::InvalidMagic { found: *b"abc" };
        assert_eq!(err.to_string(), "invalid segment magic: [61, 62, 63]");
    }
}
