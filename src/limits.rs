//! Resource limits for parsing.
//!
//! The parser and serializer both recurse once per nesting level, so the
//! nesting depth is always bounded. Input size is unbounded by default.

use serde::{Deserialize, Serialize};

/// Default maximum nesting depth for arrays/objects.
pub const DEFAULT_MAX_NESTING_DEPTH: usize = 512;

/// Resource limits applied while parsing.
///
/// Deserializable so it can be embedded in a caller's configuration; missing
/// fields fall back to [`Limits::standard`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Limits {
    /// Maximum total input size in bytes
    pub max_input_size: usize,
    /// Maximum nesting depth for arrays/objects
    pub max_nesting_depth: usize,
}

impl Limits {
    /// Limits used by [`crate::parse`].
    pub const fn standard() -> Self {
        Self {
            max_input_size: usize::MAX,
            max_nesting_depth: DEFAULT_MAX_NESTING_DEPTH,
        }
    }

    /// Tight limits for untrusted input.
    pub const fn strict() -> Self {
        Self {
            max_input_size: 1024 * 1024, // 1 MiB
            max_nesting_depth: 64,
        }
    }
}

impl Default for Limits {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_limits() {
        let limits = Limits::standard();
        assert_eq!(limits.max_input_size, usize::MAX);
        assert_eq!(limits.max_nesting_depth, DEFAULT_MAX_NESTING_DEPTH);
        assert_eq!(Limits::default(), limits);
    }

    #[test]
    fn test_strict_limits() {
        let limits = Limits::strict();
        assert_eq!(limits.max_input_size, 1024 * 1024);
        assert!(limits.max_nesting_depth < Limits::standard().max_nesting_depth);
    }

    #[test]
    fn test_deserialize_partial_config() {
        let limits: Limits = serde_json::from_str(r#"{"max_nesting_depth": 8}"#).unwrap();
        assert_eq!(limits.max_nesting_depth, 8);
        assert_eq!(limits.max_input_size, usize::MAX);
    }

    #[test]
    fn test_serialize_round_trip() {
        let text = serde_json::to_string(&Limits::strict()).unwrap();
        let back: Limits = serde_json::from_str(&text).unwrap();
        assert_eq!(back, Limits::strict());
    }
}
