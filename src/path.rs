//! Path resolution.
//!
//! A path is a sequence of object member names applied left to right from a
//! starting node. Matching is exact and case-sensitive, and there is no array
//! indexing: a segment applied to anything but an object fails.

use std::fmt;

use crate::error::PathError;
use crate::value::Value;

/// Walk `path` from `root`, one member lookup per segment.
pub fn resolve<'doc, V: Value<'doc>>(root: V, path: &[&str]) -> Result<V, PathError> {
    let mut current = root;
    for (depth, segment) in path.iter().enumerate() {
        current = current.child(segment).ok_or_else(|| {
            tracing::trace!(
                depth,
                segment = *segment,
                found = current.type_tag().name(),
                "path did not resolve"
            );
            PathError::new(path)
        })?;
    }
    Ok(current)
}

/// An owned copy of a path, kept by errors.
///
/// Displays with segments joined by `/`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct KeyPath(Vec<String>);

impl KeyPath {
    /// The segments in order.
    pub fn segments(&self) -> &[String] {
        &self.0
    }

    /// Whether this is the empty path.
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&[&str]> for KeyPath {
    fn from(path: &[&str]) -> Self {
        Self(path.iter().map(|s| (*s).to_owned()).collect())
    }
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join("/"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;
    use crate::types::TypeTag;

    #[test]
    fn test_empty_path_is_identity() {
        let doc = parse("[1]").unwrap();
        let root = doc.root();
        assert_eq!(resolve(root, &[]).unwrap().type_tag(), TypeTag::Array);
    }

    #[test]
    fn test_nested_resolution() {
        let doc = parse(r#"{"a":{"b":{"c":"deep"}}}"#).unwrap();
        let c = resolve(doc.root(), &["a", "b", "c"]).unwrap();
        assert_eq!(c.as_str(), Some("deep"));

        // Resolving from an inner node is relative to it.
        let b = resolve(doc.root(), &["a", "b"]).unwrap();
        assert_eq!(resolve(b, &["c"]).unwrap().as_str(), Some("deep"));
    }

    #[test]
    fn test_case_sensitive() {
        let doc = parse(r#"{"Name":1}"#).unwrap();
        assert!(resolve(doc.root(), &["Name"]).is_ok());
        assert!(resolve(doc.root(), &["name"]).is_err());
    }

    #[test]
    fn test_no_array_indexing() {
        let doc = parse(r#"{"a":[{"b":1}]}"#).unwrap();
        let err = resolve(doc.root(), &["a", "0", "b"]).unwrap_err();
        assert_eq!(err.to_string(), "Could not find a child at a/0/b");
    }

    #[test]
    fn test_through_scalar_fails() {
        let doc = parse(r#"{"a":"text"}"#).unwrap();
        assert!(resolve(doc.root(), &["a", "length"]).is_err());
    }

    #[test]
    fn test_key_path() {
        let path = KeyPath::from(&["a", "b"][..]);
        assert_eq!(path.to_string(), "a/b");
        assert!(!path.is_root());
        assert!(KeyPath::default().is_root());
        assert_eq!(KeyPath::default().to_string(), "");
    }
}
