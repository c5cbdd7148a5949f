//! Byte-counting reader shared by all decoders.
//!
//! This is the only piece of machinery the decoders have in common: reading
//! fixed-width big-endian fields and length-prefixed blocks while tracking
//! how many bytes were consumed. Domain semantics stay in each decoder.

use crate::config::DecodeOptions;
use crate::error::{FormatError, FormatResult};
use crate::id::SegmentId;
use std::io::Read;

/// Reads fixed-width fields from a borrowed stream.
///
/// The reader never owns the stream: opening and closing it stays with the
/// caller on every exit path.
pub(crate) struct FormatReader<'a, R: Read + ?Sized> {
    inner: &'a mut R,
    consumed: u64,
    options: &'a DecodeOptions,
}

impl<'a, R: Read + ?Sized> FormatReader<'a, R> {
    pub(crate) fn new(inner: &'a mut R, options: &'a DecodeOptions) -> Self {
        Self {
            inner,
            consumed: 0,
            options,
        }
    }

    /// Total bytes consumed so far.
    pub(crate) fn consumed(&self) -> u64 {
        self.consumed
    }

    #[inline]
    fn read_array<const N: usize>(&mut self, context: &'static str) -> FormatResult<[u8; N]> {
        let mut buf = [0u8; N];
        self.inner
            .read_exact(&mut buf)
            .map_err(|e| FormatError::from_read(e, context, N))?;
        self.consumed += N as u64;
        Ok(buf)
    }

    pub(crate) fn read_u8(&mut self, context: &'static str) -> FormatResult<u8> {
        Ok(self.read_array::<1>(context)?[0])
    }

    pub(crate) fn read_u32(&mut self, context: &'static str) -> FormatResult<u32> {
        Ok(u32::from_be_bytes(self.read_array(context)?))
    }

    pub(crate) fn read_u64(&mut self, context: &'static str) -> FormatResult<u64> {
        Ok(u64::from_be_bytes(self.read_array(context)?))
    }

    pub(crate) fn read_fixed<const N: usize>(
        &mut self,
        context: &'static str,
    ) -> FormatResult<[u8; N]> {
        self.read_array(context)
    }

    /// Reads a `(high, low)` pair.
    pub(crate) fn read_segment_id(&mut self, context: &'static str) -> FormatResult<SegmentId> {
        let high = self.read_u64(context)?;
        let low = self.read_u64(context)?;
        Ok(SegmentId::new(high, low))
    }

    /// Reads a `u32` count prefix.
    pub(crate) fn read_count(&mut self, context: &'static str) -> FormatResult<usize> {
        Ok(self.read_u32(context)? as usize)
    }

    /// Creates a vector for `count` declared elements without trusting the
    /// count for the allocation size.
    pub(crate) fn vec_for<T>(&self, count: usize) -> Vec<T> {
        Vec::with_capacity(count.min(self.options.preallocation_limit))
    }

    /// Reads `count` elements with `read_one`, in stream order.
    pub(crate) fn read_repeated<T>(
        &mut self,
        count: usize,
        mut read_one: impl FnMut(&mut Self) -> FormatResult<T>,
    ) -> FormatResult<Vec<T>> {
        let mut items = self.vec_for(count);
        for _ in 0..count {
            items.push(read_one(self)?);
        }
        Ok(items)
    }

    /// Reads a `u32` length followed by that many UTF-8 bytes.
    ///
    /// A length above the configured maximum or invalid UTF-8 is a
    /// [`FormatError::MalformedString`]; running out of bytes inside the
    /// body is a [`FormatError::TruncatedInput`].
    pub(crate) fn read_string(&mut self, context: &'static str) -> FormatResult<String> {
        let len = self.read_u32(context)? as usize;
        if len > self.options.max_string_len {
            return Err(FormatError::malformed_string(
                context,
                format!(
                    "declared length {len} exceeds maximum {}",
                    self.options.max_string_len
                ),
            ));
        }

        // Read through `take` so a hostile length cannot force a large
        // allocation before the bytes actually arrive.
        let mut bytes = Vec::with_capacity(len.min(self.options.preallocation_limit));
        let read = (&mut *self.inner)
            .take(len as u64)
            .read_to_end(&mut bytes)
            .map_err(|e| FormatError::from_read(e, context, len))?;
        self.consumed += read as u64;
        if read < len {
            return Err(FormatError::truncated(context, len));
        }

        String::from_utf8(bytes)
            .map_err(|e| FormatError::malformed_string(context, e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> DecodeOptions {
        DecodeOptions::default()
    }

    #[test]
    fn reads_big_endian_and_counts() {
        let data = [0x01, 0x00, 0x00, 0x00, 0x02, 0xff];
        let options = options();
        let mut stream = &data[..];
        let mut reader = FormatReader::new(&mut stream, &options);

        assert_eq!(reader.read_u8("a").unwrap(), 1);
        assert_eq!(reader.read_u32("b").unwrap(), 2);
        assert_eq!(reader.consumed(), 5);
        assert_eq!(stream, &[0xff]);
    }

    #[test]
    fn short_field_is_truncated() {
        let data = [0x00, 0x01];
        let options = options();
        let mut stream = &data[..];
        let mut reader = FormatReader::new(&mut stream, &options);

        let err = reader.read_u32("count").unwrap_err();
        assert!(matches!(
            err,
            FormatError::TruncatedInput {
                context: "count",
                expected: 4
            }
        ));
    }

    #[test]
    fn string_roundtrip() {
        let mut data = 5u32.to_be_bytes().to_vec();
        data.extend_from_slice(b"hello");
        let options = options();
        let mut stream = &data[..];
        let mut reader = FormatReader::new(&mut stream, &options);

        assert_eq!(reader.read_string("ref").unwrap(), "hello");
        assert_eq!(reader.consumed(), 9);
    }

    #[test]
    fn string_body_cut_short_is_truncated() {
        let mut data = 5u32.to_be_bytes().to_vec();
        data.extend_from_slice(b"he");
        let options = options();
        let mut stream = &data[..];
        let mut reader = FormatReader::new(&mut stream, &options);

        assert!(reader.read_string("ref").unwrap_err().is_truncated());
    }

    #[test]
    fn string_longer_than_limit_is_malformed() {
        let data = 100u32.to_be_bytes();
        let options = DecodeOptions::new().max_string_len(10);
        let mut stream = &data[..];
        let mut reader = FormatReader::new(&mut stream, &options);

        assert!(matches!(
            reader.read_string("ref"),
            Err(FormatError::MalformedString { .. })
        ));
    }

    #[test]
    fn invalid_utf8_is_malformed() {
        let mut data = 2u32.to_be_bytes().to_vec();
        data.extend_from_slice(&[0xff, 0xfe]);
        let options = options();
        let mut stream = &data[..];
        let mut reader = FormatReader::new(&mut stream, &options);

        assert!(matches!(
            reader.read_string("ref"),
            Err(FormatError::MalformedString { .. })
        ));
    }

    #[test]
    fn huge_count_does_not_preallocate() {
        let options = DecodeOptions::new().preallocation_limit(8);
        let data: [u8; 0] = [];
        let mut stream = &data[..];
        let reader = FormatReader::new(&mut stream, &options);

        let v: Vec<u64> = reader.vec_for(usize::MAX);
        assert!(v.capacity() < 1024);
    }
}
