//! Segment identifier.

use crate::error::ParseSegmentIdError;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Top nibble of `low` that marks a bulk segment.
const BULK_NIBBLE: u64 = 0xb;

/// Canonical 128-bit identifier of a segment.
///
/// Segment IDs are:
/// - Stored on the wire as two big-endian `u64` halves, `high` then `low`
/// - Rendered as 32 lowercase hex digits with no separators
/// - Compared by exact bit equality
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SegmentId {
    high: u64,
    low: u64,
}

/// What a segment holds, derived from its identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum SegmentKind {
    /// Large binary content.
    Bulk,
    /// Structural records.
    Data,
}

impl SegmentKind {
    /// Returns the lowercase name used in reports.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Bulk => "bulk",
            Self::Data => "data",
        }
    }
}

impl fmt::Display for SegmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl SegmentId {
    /// Creates a segment ID from its two halves.
    #[inline]
    #[must_use]
    pub const fn new(high: u64, low: u64) -> Self {
        Self { high, low }
    }

    /// Returns the most significant half.
    #[inline]
    #[must_use]
    pub const fn high(&self) -> u64 {
        self.high
    }

    /// Returns the least significant half.
    #[inline]
    #[must_use]
    pub const fn low(&self) -> u64 {
        self.low
    }

    /// Returns the 32-character lowercase hex form.
    #[must_use]
    pub fn to_canonical_string(&self) -> String {
        self.to_string()
    }

    /// Classifies the segment as bulk or data.
    ///
    /// A segment is bulk when the 17th character of its canonical string,
    /// which is the top nibble of `low`, is `b`.
    #[must_use]
    pub const fn kind(&self) -> SegmentKind {
        if self.low >> 60 == BULK_NIBBLE {
            SegmentKind::Bulk
        } else {
            SegmentKind::Data
        }
    }

    /// Returns `true` for a bulk segment.
    #[must_use]
    pub const fn is_bulk(&self) -> bool {
        matches!(self.kind(), SegmentKind::Bulk)
    }

    /// Returns `true` for a data segment.
    #[must_use]
    pub const fn is_data(&self) -> bool {
        !self.is_bulk()
    }

    /// Returns the ID as a single 128-bit integer.
    #[must_use]
    pub const fn as_u128(&self) -> u128 {
        ((self.high as u128) << 64) | self.low as u128
    }

    /// Converts to a UUID.
    #[must_use]
    pub fn to_uuid(&self) -> Uuid {
        Uuid::from_u128(self.as_u128())
    }

    /// Parses an identifier that may carry hyphens, surrounding whitespace or
    /// uppercase digits.
    ///
    /// # Errors
    ///
    /// Returns an error if the normalized text is not a 128-bit hex value.
    pub fn parse(raw: &str) -> Result<Self, ParseSegmentIdError> {
        raw.parse()
    }
}

impl From<u128> for SegmentId {
    fn from(value: u128) -> Self {
        Self::new((value >> 64) as u64, value as u64)
    }
}

impl From<SegmentId> for u128 {
    fn from(id: SegmentId) -> Self {
        id.as_u128()
    }
}

impl From<Uuid> for SegmentId {
    fn from(uuid: Uuid) -> Self {
        Self::from(uuid.as_u128())
    }
}

impl From<SegmentId> for Uuid {
    fn from(id: SegmentId) -> Self {
        id.to_uuid()
    }
}

impl FromStr for SegmentId {
    type Err = ParseSegmentIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = normalize(s);
        if normalized.len() != 32 || !normalized.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ParseSegmentIdError { input: normalized });
        }
        Uuid::parse_str(&normalized)
            .map(Self::from)
            .map_err(|_| ParseSegmentIdError { input: normalized })
    }
}

impl fmt::Debug for SegmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SegmentId({self})")
    }
}

impl fmt::Display for SegmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}{:016x}", self.high, self.low)
    }
}

/// Normalizes an identifier found in a file or entry name.
///
/// Trims surrounding whitespace, removes every `-` and lowercases. Any input
/// produces some output; whether it names a real segment is up to the caller.
#[must_use]
pub fn normalize(raw: &str) -> String {
    raw.replace('-', "").trim().to_lowercase()
}

/// Extracts the normalized identifier from a container entry name such as
/// `2f1b5bb3-8f8b-4a3c-b0d4-d9a4f5b1e0c2.7a3e91f0`.
///
/// Everything from the first `.` on is dropped.
#[must_use]
pub fn entry_name_to_segment_id(name: &str) -> String {
    let stem = name.split_once('.').map_or(name, |(stem, _)| stem);
    normalize(stem)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn canonical_string_is_zero_padded() {
        let id = SegmentId::new(0x1, 0x2);
        assert_eq!(id.to_canonical_string(), "00000000000000010000000000000002");
    }

    #[test]
    fn canonical_string_is_lowercase() {
        let id = SegmentId::new(0xABCD_EF01_2345_6789, u64::MAX);
        assert_eq!(id.to_canonical_string(), "abcdef0123456789ffffffffffffffff");
    }

    #[test]
    fn bulk_classification() {
        let bulk = SegmentId::new(0, 0xb000_0000_0000_0000);
        let data = SegmentId::new(0xbbbb_bbbb_bbbb_bbbb, 0xa000_0000_0000_000b);

        assert_eq!(bulk.kind(), SegmentKind::Bulk);
        assert!(bulk.is_bulk());
        assert_eq!(data.kind(), SegmentKind::Data);
        assert!(data.is_data());
        assert_eq!(bulk.kind().to_string(), "bulk");
        assert_eq!(data.kind().to_string(), "data");
    }

    #[test]
    fn normalize_strips_hyphens_whitespace_and_case() {
        assert_eq!(
            normalize("  2F1B5BB3-8F8B-4A3C-B0D4-D9A4F5B1E0C2\n"),
            "2f1b5bb38f8b4a3cb0d4d9a4f5b1e0c2"
        );
    }

    #[test]
    fn normalize_never_fails() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("---"), "");
        assert_eq!(normalize("Not An Id"), "not an id");
    }

    #[test]
    fn entry_name_drops_suffix() {
        assert_eq!(
            entry_name_to_segment_id("2f1b5bb3-8f8b-4a3c-b0d4-d9a4f5b1e0c2.7a3e91f0"),
            "2f1b5bb38f8b4a3cb0d4d9a4f5b1e0c2"
        );
        assert_eq!(entry_name_to_segment_id("ABC"), "abc");
    }

    #[test]
    fn parse_accepts_hyphenated_and_plain() {
        let id = SegmentId::new(0x2f1b_5bb3_8f8b_4a3c, 0xb0d4_d9a4_f5b1_e0c2);
        assert_eq!(
            SegmentId::parse("2f1b5bb3-8f8b-4a3c-b0d4-d9a4f5b1e0c2").unwrap(),
            id
        );
        assert_eq!(
            "2F1B5BB38F8B4A3CB0D4D9A4F5B1E0C2".parse::<SegmentId>().unwrap(),
            id
        );
        assert!(id.is_bulk());
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(SegmentId::parse("").is_err());
        assert!(SegmentId::parse("xyz").is_err());
        assert!(SegmentId::parse("0000000000000001000000000000000").is_err());
        assert!(SegmentId::parse("g0000000000000010000000000000002").is_err());
    }

    #[test]
    fn uuid_conversion() {
        let id = SegmentId::new(0x0123_4567_89ab_cdef, 0xfedc_ba98_7654_3210);
        let uuid = id.to_uuid();
        assert_eq!(uuid.to_string(), "01234567-89ab-cdef-fedc-ba9876543210");
        assert_eq!(SegmentId::from(uuid), id);
        assert_eq!(SegmentId::from(u128::from(id)), id);
    }

    #[test]
    fn debug_shows_canonical_form() {
        let id = SegmentId::new(1, 2);
        assert_eq!(
            format!("{id:?}"),
            "SegmentId(00000000000000010000000000000002)"
        );
    }

    #[test]
    fn ordering_follows_halves() {
        assert!(SegmentId::new(0, u64::MAX) < SegmentId::new(1, 0));
        assert!(SegmentId::new(1, 0) < SegmentId::new(1, 1));
    }

    proptest! {
        #[test]
        fn parse_inverts_canonical_string(high in any::<u64>(), low in any::<u64>()) {
            let id = SegmentId::new(high, low);
            let text = id.to_canonical_string();

            prop_assert_eq!(text.len(), 32);
            prop_assert_eq!(SegmentId::parse(&text).unwrap(), id);
            prop_assert_eq!(SegmentId::parse(&text.to_uppercase()).unwrap(), id);
        }

        #[test]
        fn kind_follows_17th_character(high in any::<u64>(), low in any::<u64>()) {
            let id = SegmentId::new(high, low);
            let is_b = id.to_canonical_string().as_bytes()[16] == b'b';
            prop_assert_eq!(id.is_bulk(), is_b);
        }
    }
}
