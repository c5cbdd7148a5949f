//! Decoder configuration.

/// Limits applied while decoding untrusted streams.
///
/// None of these options change a successfully decoded value; they only
/// bound what a decoder is willing to allocate or accept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Longest binary reference string accepted, in bytes.
    pub max_string_len: usize,

    /// Upper bound on the capacity reserved up front for a declared count.
    ///
    /// Collections still grow past this as elements are actually read.
    pub preallocation_limit: usize,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            max_string_len: 64 * 1024 * 1024, // 64 MB
            preallocation_limit: 4096,
        }
    }
}

impl DecodeOptions {
    /// Creates options with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum accepted string length.
    #[must_use]
    pub const fn max_string_len(mut self, len: usize) -> Self {
        self.max_string_len = len;
        self
    }

    /// Sets the preallocation limit.
    #[must_use]
    pub const fn preallocation_limit(mut self, limit: usize) -> Self {
        self.preallocation_limit = limit;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_options() {
        let options = DecodeOptions::default();
        assert_eq!(options.max_string_len, 64 * 1024 * 1024);
        assert_eq!(options.preallocation_limit, 4096);
    }

    #[test]
    fn builder_pattern() {
        let options = DecodeOptions::new()
            .max_string_len(16)
            .preallocation_limit(2);

        assert_eq!(options.max_string_len, 16);
        assert_eq!(options.preallocation_limit, 2);
    }
}
