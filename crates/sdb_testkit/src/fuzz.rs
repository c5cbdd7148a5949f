//! Fuzz testing harnesses.
//!
//! These targets can be driven by cargo-fuzz or any other fuzzer. Each one
//! feeds arbitrary bytes to a decoder and checks that it either returns a
//! value or an error, never panics, and never reports consuming more bytes
//! than it was given.

use sdb_format::{
    entry_name_to_segment_id, normalize, Binaries, Decode, DecodeOptions, Graph, Index, Segment,
    SegmentId,
};

fn check_consumed<T: Decode>(data: &[u8]) {
    // Small limits keep hostile counts from turning into long runs.
    let options = DecodeOptions::new()
        .max_string_len(4096)
        .preallocation_limit(64);
    let mut stream = data;
    if let Ok((_, consumed)) = T::decode_with(&mut stream, &options) {
        assert_eq!(consumed as usize, data.len() - stream.len());
    }
}

/// Fuzz target for segment decoding.
pub fn fuzz_segment(data: &[u8]) {
    check_consumed::<Segment>(data);
}

/// Fuzz target for graph decoding.
pub fn fuzz_graph(data: &[u8]) {
    check_consumed::<Graph>(data);
}

/// Fuzz target for index decoding.
pub fn fuzz_index(data: &[u8]) {
    check_consumed::<Index>(data);
}

/// Fuzz target for binaries decoding.
pub fn fuzz_binaries(data: &[u8]) {
    check_consumed::<Binaries>(data);
}

/// Fuzz target for identifier text handling.
///
/// Normalizing never fails, and any identifier that parses renders back to
/// the normalized text.
pub fn fuzz_segment_id_text(data: &[u8]) {
    let text = String::from_utf8_lossy(data);
    let normalized = normalize(&text);
    let _ = entry_name_to_segment_id(&text);

    if let Ok(id) = normalized.parse::<SegmentId>() {
        assert_eq!(id.to_canonical_string(), normalized);
    }
}
