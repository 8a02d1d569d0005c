//! Scalar types shared by the tree and its readers.

use std::fmt;

/// Kind of a JSON node, as reported by `type_of`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeTag {
    /// `true` or `false`
    Bool,
    /// `null`
    Null,
    /// `[...]`
    Array,
    /// Any number literal
    Number,
    /// `"..."`
    String,
    /// `{...}`
    Object,
    /// The path did not resolve.
    Unknown,
}

impl TypeTag {
    /// Returns the type name for messages.
    pub fn name(&self) -> &'static str {
        match self {
            TypeTag::Bool => "boolean",
            TypeTag::Null => "null",
            TypeTag::Array => "array",
            TypeTag::Number => "number",
            TypeTag::String => "string",
            TypeTag::Object => "object",
            TypeTag::Unknown => "unknown",
        }
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The numeric interpretations of a number literal.
///
/// Every literal has a double. Integer literals (no fraction, no exponent)
/// additionally carry exact `i64` and/or `u64` values when they fit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Number {
    int: Option<i64>,
    uint: Option<u64>,
    float: f64,
}

impl Number {
    pub(crate) fn new(int: Option<i64>, uint: Option<u64>, float: f64) -> Self {
        Self { int, uint, float }
    }

    /// Exact signed value, if the literal is an integer within `i64`.
    pub fn as_i64(&self) -> Option<i64> {
        self.int
    }

    /// Exact unsigned value, if the literal is a non-negative integer within `u64`.
    pub fn as_u64(&self) -> Option<u64> {
        self.uint
    }

    /// Nearest double.
    pub fn as_f64(&self) -> f64 {
        self.float
    }

    /// Whether an exact 64-bit integer interpretation exists.
    pub fn is_integer(&self) -> bool {
        self.int.is_some() || self.uint.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_names() {
        assert_eq!(TypeTag::Bool.name(), "boolean");
        assert_eq!(TypeTag::Null.to_string(), "null");
        assert_eq!(TypeTag::Unknown.to_string(), "unknown");
    }

    #[test]
    fn test_number_interpretations() {
        let n = Number::new(Some(-3), None, -3.0);
        assert_eq!(n.as_i64(), Some(-3));
        assert_eq!(n.as_u64(), None);
        assert!(n.is_integer());

        let f = Number::new(None, None, 0.5);
        assert!(!f.is_integer());
        assert_eq!(f.as_f64(), 0.5);
    }
}
