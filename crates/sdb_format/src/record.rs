//! Record kinds and record table entries.

use std::fmt;

/// Kind of a record stored in a segment.
///
/// The table is closed: tags this crate does not know decode to
/// [`RecordKind::Unknown`], which keeps the raw tag, instead of failing.
/// Newer format revisions may add kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RecordKind {
    /// Leaf of a map.
    MapLeaf,
    /// Branch of a map.
    MapBranch,
    /// Bucket of a list.
    ListBucket,
    /// List head.
    List,
    /// Value.
    Value,
    /// Block of binary data.
    Block,
    /// Node template.
    Template,
    /// Node.
    Node,
    /// Tag not in the table.
    Unknown(u8),
}

impl RecordKind {
    /// Tag of [`RecordKind::MapLeaf`].
    pub const MAP_LEAF_TAG: u8 = 0;
    /// Tag of [`RecordKind::MapBranch`].
    pub const MAP_BRANCH_TAG: u8 = 1;
    /// Tag of [`RecordKind::ListBucket`].
    pub const LIST_BUCKET_TAG: u8 = 2;
    /// Tag of [`RecordKind::List`].
    pub const LIST_TAG: u8 = 3;
    /// Tag of [`RecordKind::Value`].
    pub const VALUE_TAG: u8 = 4;
    /// Tag of [`RecordKind::Block`].
    pub const BLOCK_TAG: u8 = 5;
    /// Tag of [`RecordKind::Template`].
    pub const TEMPLATE_TAG: u8 = 6;
    /// Tag of [`RecordKind::Node`].
    pub const NODE_TAG: u8 = 7;

    /// Looks up the kind for a raw tag byte.
    #[must_use]
    pub const fn from_tag(tag: u8) -> Self {
        match tag {
            Self::MAP_LEAF_TAG => Self::MapLeaf,
            Self::MAP_BRANCH_TAG => Self::MapBranch,
            Self::LIST_BUCKET_TAG => Self::ListBucket,
            Self::LIST_TAG => Self::List,
            Self::VALUE_TAG => Self::Value,
            Self::BLOCK_TAG => Self::Block,
            Self::TEMPLATE_TAG => Self::Template,
            Self::NODE_TAG => Self::Node,
            other => Self::Unknown(other),
        }
    }

    /// Returns the raw tag byte.
    #[must_use]
    pub const fn tag(self) -> u8 {
        match self {
            Self::MapLeaf => Self::MAP_LEAF_TAG,
            Self::MapBranch => Self::MAP_BRANCH_TAG,
            Self::ListBucket => Self::LIST_BUCKET_TAG,
            Self::List => Self::LIST_TAG,
            Self::Value => Self::VALUE_TAG,
            Self::Block => Self::BLOCK_TAG,
            Self::Template => Self::TEMPLATE_TAG,
            Self::Node => Self::NODE_TAG,
            Self::Unknown(tag) => tag,
        }
    }

    /// Returns `true` for a tag not in the table.
    #[must_use]
    pub const fn is_unknown(self) -> bool {
        matches!(self, Self::Unknown(_))
    }

    /// Returns the short name used in segment reports.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::MapLeaf => "leaf",
            Self::MapBranch => "branch",
            Self::ListBucket => "bucket",
            Self::List => "list",
            Self::Value => "value",
            Self::Block => "block",
            Self::Template => "template",
            Self::Node => "node",
            Self::Unknown(_) => "unknown",
        }
    }
}

impl From<u8> for RecordKind {
    fn from(tag: u8) -> Self {
        Self::from_tag(tag)
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An entry of a segment's record table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Record {
    /// Record number, unique within its segment.
    pub number: u32,
    /// Record kind.
    pub kind: RecordKind,
    /// Offset of the payload within the segment's data region.
    pub offset: u32,
}

impl Record {
    /// Size of a record table entry: number (4) + tag (1) + offset (4).
    pub const ENCODED_SIZE: usize = 9;

    /// Creates a record table entry.
    #[must_use]
    pub const fn new(number: u32, kind: RecordKind, offset: u32) -> Self {
        Self {
            number,
            kind,
            offset,
        }
    }
}
