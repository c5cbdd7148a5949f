//! Hex test vectors for the segment store formats.
//!
//! Each vector pairs an input stream with the outcome a decoder must
//! produce, so other implementations can check themselves against the same
//! bytes.

use serde::{Deserialize, Serialize};

/// Format a vector targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VectorFormat {
    /// Segment header and tables.
    Segment,
    /// Reference graph.
    Graph,
    /// Segment index.
    Index,
    /// Binary references.
    Binaries,
}

/// A test vector that can be shared across implementations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestVector {
    /// Unique identifier for this vector.
    pub id: String,
    /// Human-readable description.
    pub description: String,
    /// Format the input is decoded as.
    pub format: VectorFormat,
    /// Input data (hex-encoded).
    pub input_hex: String,
    /// Expected decoded value as JSON, if decoding succeeds.
    pub expected_json: Option<String>,
    /// Expected error kind, if decoding fails.
    pub expected_error: Option<String>,
}

/// Segment test vectors.
pub fn segment_vectors() -> Vec<TestVector> {
    vec![
        TestVector {
            id: "segment_single_node".into(),
            description: "Version 13, generation 7, reference (1, 2), node record at 0x40".into(),
            format: VectorFormat::Segment,
            input_hex: concat!(
                "30614b0d",
                "000000000000",
                "00000007",
                "00000001",
                "00000001",
                "00000000000000000000",
                "0000000000000001",
                "0000000000000002",
                "00000001",
                "07",
                "00000040",
            )
            .into(),
            expected_json: Some(
                r#"{"version":13,"generation":7,"references":[{"high":1,"low":2}],"records":[{"number":1,"kind":"Node","offset":64}]}"#
                    .into(),
            ),
            expected_error: None,
        },
        TestVector {
            id: "segment_unknown_tag".into(),
            description: "Record with tag 0x2a decodes as Unknown".into(),
            format: VectorFormat::Segment,
            input_hex: concat!(
                "30614b0c",
                "000000000000",
                "00000001",
                "00000000",
                "00000001",
                "00000000000000000000",
                "00000005",
                "2a",
                "00000000",
            )
            .into(),
            expected_json: Some(
                r#"{"version":12,"generation":1,"references":[],"records":[{"number":5,"kind":{"Unknown":42},"offset":0}]}"#
                    .into(),
            ),
            expected_error: None,
        },
        TestVector {
            id: "segment_version_99".into(),
            description: "Unsupported version is rejected".into(),
            format: VectorFormat::Segment,
            input_hex: "30614b63".into(),
            expected_json: None,
            expected_error: Some("UnsupportedVersion".into()),
        },
        TestVector {
            id: "segment_truncated_header".into(),
            description: "Header cut after the generation".into(),
            format: VectorFormat::Segment,
            input_hex: "30614b0d00000000000000000007".into(),
            expected_json: None,
            expected_error: Some("TruncatedInput".into()),
        },
    ]
}

/// Index test vectors.
pub fn index_vectors() -> Vec<TestVector> {
    vec![TestVector {
        id: "index_duplicate_ids".into(),
        description: "Two entries for the same id stay in stream order".into(),
        format: VectorFormat::Index,
        input_hex: concat!(
            "00000002",
            "0000000000000001",
            "0000000000000002",
            "0000000000000064",
            "00000032",
            "00000001",
            "0000000000000001",
            "0000000000000002",
            "000000000000012c",
            "00000014",
            "00000002",
        )
        .into(),
        expected_json: Some(
            r#"{"entries":[{"id":{"high":1,"low":2},"position":100,"size":50,"generation":1},{"id":{"high":1,"low":2},"position":300,"size":20,"generation":2}]}"#
                .into(),
        ),
        expected_error: None,
    }]
}

/// Graph test vectors.
pub fn graph_vectors() -> Vec<TestVector> {
    vec![TestVector {
        id: "graph_self_reference".into(),
        description: "Entry referencing itself, then an entry with no edges".into(),
        format: VectorFormat::Graph,
        input_hex: concat!(
            "00000002",
            "0000000000000001",
            "0000000000000002",
            "00000001",
            "0000000000000001",
            "0000000000000002",
            "0000000000000003",
            "0000000000000004",
            "00000000",
        )
        .into(),
        expected_json: Some(
            r#"{"entries":[{"id":{"high":1,"low":2},"references":[{"high":1,"low":2}]},{"id":{"high":3,"low":4},"references":[]}]}"#
                .into(),
        ),
        expected_error: None,
    }]
}

/// Binaries test vectors.
pub fn binaries_vectors() -> Vec<TestVector> {
    vec![
        TestVector {
            id: "binaries_one_reference".into(),
            description: "Generation 3, one segment, one reference \"ab\"".into(),
            format: VectorFormat::Binaries,
            input_hex: concat!(
                "00000001",
                "00000003",
                "00000001",
                "0000000000000001",
                "0000000000000002",
                "00000001",
                "00000002",
                "6162",
            )
            .into(),
            expected_json: Some(
                r#"{"generations":[{"generation":3,"segments":[{"id":{"high":1,"low":2},"references":["ab"]}]}]}"#
                    .into(),
            ),
            expected_error: None,
        },
        TestVector {
            id: "binaries_invalid_utf8".into(),
            description: "Reference bytes that are not UTF-8".into(),
            format: VectorFormat::Binaries,
            input_hex: concat!(
                "00000001",
                "00000003",
                "00000001",
                "0000000000000001",
                "0000000000000002",
                "00000001",
                "00000002",
                "c328",
            )
            .into(),
            expected_json: None,
            expected_error: Some("MalformedString".into()),
        },
    ]
}

/// Generate all test vectors as JSON for cross-language use.
pub fn all_vectors_json() -> String {
    let vectors = AllTestVectors {
        segment: segment_vectors(),
        graph: graph_vectors(),
        index: index_vectors(),
        binaries: binaries_vectors(),
    };

    serde_json::to_string_pretty(&vectors).expect("Failed to serialize vectors")
}

#[derive(Debug, Serialize, Deserialize)]
struct AllTestVectors {
    segment: Vec<TestVector>,
    graph: Vec<TestVector>,
    index: Vec<TestVector>,
    binaries: Vec<TestVector>,
}

/// Encode bytes as lowercase hex.
pub fn hex_encode(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

/// Decode a hex string. Panics on invalid input.
pub fn hex_decode(hex: &str) -> Vec<u8> {
    assert!(hex.len() % 2 == 0, "odd-length hex string");
    (0..hex.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&hex[i..i + 2], 16).expect("Invalid hex"))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use sdb_format::{Binaries, Decode, FormatError, Graph, Index, Segment};

    fn error_name(err: &FormatError) -> &'static str {
        match err {
            FormatError::TruncatedInput { .. } => "TruncatedInput",
            FormatError::UnsupportedVersion { .. } => "UnsupportedVersion",
            FormatError::MalformedString { .. } => "MalformedString",
            FormatError::InvalidMagic { .. } => "InvalidMagic",
            FormatError::Io(_) => "IOError",
        }
    }

    fn decode_to_json(format: VectorFormat, input: &[u8]) -> Result<String, FormatError> {
        let json = match format {
            VectorFormat::Segment => serde_json::to_string(&Segment::from_bytes(input)?),
            VectorFormat::Graph => serde_json::to_string(&Graph::from_bytes(input)?),
            VectorFormat::Index => serde_json::to_string(&Index::from_bytes(input)?),
            VectorFormat::Binaries => serde_json::to_string(&Binaries::from_bytes(input)?),
        };
        Ok(json.expect("decoded values serialize"))
    }

    #[test]
    fn vectors_decode_as_described() {
        let all = segment_vectors()
            .into_iter()
            .chain(graph_vectors())
            .chain(index_vectors())
            .chain(binaries_vectors());

        for vector in all {
            let input = hex_decode(&vector.input_hex);
            match (decode_to_json(vector.format, &input), &vector.expected_json) {
                (Ok(actual), Some(expected)) => {
                    assert_eq!(&actual, expected, "Vector {} failed", vector.id);
                }
                (Err(err), None) => {
                    assert_eq!(
                        Some(error_name(&err)),
                        vector.expected_error.as_deref(),
                        "Vector {} failed",
                        vector.id
                    );
                }
                (result, _) => panic!("Vector {} unexpected result: {result:?}", vector.id),
            }
        }
    }

    #[test]
    fn hex_roundtrip() {
        let bytes = vec![0x00, 0x0f, 0xab, 0xff];
        assert_eq!(hex_encode(&bytes), "000fabff");
        assert_eq!(hex_decode("000fabff"), bytes);
    }

    #[test]
    fn test_all_vectors_json() {
        let json = all_vectors_json();
        assert!(json.contains("segment_single_node"));
        assert!(json.contains("binaries_invalid_utf8"));

        let parsed: AllTestVectors = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.segment.len(), segment_vectors().len());
    }
}
