//! Reading values out of a document.
//!
//! [`Value`] is the capability set every backend exposes: a handful of
//! node-level primitives, with path resolution, typed accessors and
//! serialization provided on top of them. [`ValueRef`] is the implementation
//! over [`Document`].

use std::fmt;
use std::iter::FusedIterator;
use std::slice;

use crate::document::{Document, Member, Node, NodeId};
use crate::error::{Accessor, PathError, ValueError};
use crate::path;
use crate::types::{Number, TypeTag};
use crate::writer;

/// Read access to a JSON node borrowed from a document with lifetime `'doc`.
///
/// Implementors supply the node-level primitives; everything that takes a
/// path is provided and behaves identically for every implementation.
pub trait Value<'doc>: Copy + Sized {
    /// Ordered view of an array's elements.
    type Array: IntoIterator<Item = Self>;
    /// Ordered view of an object's members.
    type Object: IntoIterator<Item = (&'doc str, Self)>;

    /// Kind of this node. Never [`TypeTag::Unknown`].
    fn type_tag(&self) -> TypeTag;

    /// Member named exactly `name`, if this is an object that has one.
    fn child(&self, name: &str) -> Option<Self>;

    /// Boolean value, if this is a boolean.
    fn as_bool(&self) -> Option<bool>;

    /// Numeric interpretations, if this is a number.
    fn as_number(&self) -> Option<Number>;

    /// Number literal as written in the source, if this is a number.
    fn number_text(&self) -> Option<&'doc str>;

    /// String contents, if this is a string.
    fn as_str(&self) -> Option<&'doc str>;

    /// Elements, if this is an array.
    fn as_array(&self) -> Option<Self::Array>;

    /// Members, if this is an object.
    fn as_object(&self) -> Option<Self::Object>;

    /// Resolve `path` (object member names, left to right) from this node.
    ///
    /// The empty path returns this node.
    fn get(&self, path: &[&str]) -> Result<Self, PathError> {
        path::resolve(*self, path)
    }

    /// Kind of the node at `path`, or [`TypeTag::Unknown`] if it does not resolve.
    fn type_of(&self, path: &[&str]) -> TypeTag {
        self.get(path).map_or(TypeTag::Unknown, |v| v.type_tag())
    }

    /// Integer at `path`. Requires an integer literal within `i64`.
    fn get_int(&self, path: &[&str]) -> Result<i64, ValueError> {
        extract(self, path, Accessor::Int, |v| v.as_number()?.as_i64())
    }

    /// Unsigned integer at `path`. Requires a non-negative integer literal within `u64`.
    fn get_uint(&self, path: &[&str]) -> Result<u64, ValueError> {
        extract(self, path, Accessor::Uint, |v| v.as_number()?.as_u64())
    }

    /// Double value of any number at `path`.
    fn get_float(&self, path: &[&str]) -> Result<f64, ValueError> {
        extract(self, path, Accessor::Float, |v| Some(v.as_number()?.as_f64()))
    }

    /// Boolean at `path`.
    fn get_bool(&self, path: &[&str]) -> Result<bool, ValueError> {
        extract(self, path, Accessor::Bool, |v| v.as_bool())
    }

    /// String at `path`, borrowed from the document.
    fn get_string(&self, path: &[&str]) -> Result<&'doc str, ValueError> {
        extract(self, path, Accessor::String, |v| v.as_str())
    }

    /// Array at `path`.
    fn get_array(&self, path: &[&str]) -> Result<Self::Array, ValueError> {
        extract(self, path, Accessor::Array, |v| v.as_array())
    }

    /// Object at `path`.
    fn get_object(&self, path: &[&str]) -> Result<Self::Object, ValueError> {
        extract(self, path, Accessor::Object, |v| v.as_object())
    }

    /// Compact JSON text of the node at `path`.
    fn stringify(&self, path: &[&str]) -> Result<String, ValueError> {
        let value = self.get(path)?;
        Ok(writer::to_string(value))
    }
}

fn extract<'doc, V, T>(
    value: &V,
    path: &[&str],
    accessor: Accessor,
    read: impl FnOnce(V) -> Option<T>,
) -> Result<T, ValueError>
where
    V: Value<'doc>,
{
    let Ok(node) = value.get(path) else {
        return Err(ValueError::not_found(accessor, path));
    };
    read(node).ok_or_else(|| {
        tracing::trace!(
            accessor = accessor.as_str(),
            found = node.type_tag().name(),
            "value kind mismatch"
        );
        ValueError::not_found(accessor, path)
    })
}

/// A node inside a [`Document`].
#[derive(Clone, Copy)]
pub struct ValueRef<'doc> {
    doc: &'doc Document,
    id: NodeId,
}

impl<'doc> ValueRef<'doc> {
    pub(crate) fn new(doc: &'doc Document, id: NodeId) -> Self {
        Self { doc, id }
    }

    fn node(&self) -> &'doc Node {
        self.doc.node(self.id)
    }

    /// Whether this is `null`.
    pub fn is_null(&self) -> bool {
        matches!(self.node(), Node::Null)
    }
}

impl<'doc> Value<'doc> for ValueRef<'doc> {
    type Array = ArrayRef<'doc>;
    type Object = ObjectRef<'doc>;

    fn type_tag(&self) -> TypeTag {
        self.node().type_tag()
    }

    fn child(&self, name: &str) -> Option<Self> {
        self.as_object()?.get(name)
    }

    fn as_bool(&self) -> Option<bool> {
        match self.node() {
            Node::Bool(b) => Some(*b),
            _ => None,
        }
    }

    fn as_number(&self) -> Option<Number> {
        match self.node() {
            Node::Number { value, .. } => Some(*value),
            _ => None,
        }
    }

    fn number_text(&self) -> Option<&'doc str> {
        match self.node() {
            Node::Number { text, .. } => Some(self.doc.str(*text)),
            _ => None,
        }
    }

    fn as_str(&self) -> Option<&'doc str> {
        match self.node() {
            Node::String(span) => Some(self.doc.str(*span)),
            _ => None,
        }
    }

    fn as_array(&self) -> Option<ArrayRef<'doc>> {
        match self.node() {
            Node::Array(slot) => Some(ArrayRef {
                doc: self.doc,
                elements: self.doc.elements(*slot),
            }),
            _ => None,
        }
    }

    fn as_object(&self) -> Option<ObjectRef<'doc>> {
        match self.node() {
            Node::Object(slot) => Some(ObjectRef {
                doc: self.doc,
                members: self.doc.members(*slot),
            }),
            _ => None,
        }
    }
}

impl fmt::Display for ValueRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&writer::to_string(*self))
    }
}

impl fmt::Debug for ValueRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ValueRef({self})")
    }
}

/// Ordered, zero-copy view of an array's elements.
#[derive(Clone, Copy)]
pub struct ArrayRef<'doc> {
    doc: &'doc Document,
    elements: &'doc [NodeId],
}

impl<'doc> ArrayRef<'doc> {
    /// Number of elements.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Whether the array is empty.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Element at `index`.
    pub fn get(&self, index: usize) -> Option<ValueRef<'doc>> {
        self.elements
            .get(index)
            .map(|&id| ValueRef::new(self.doc, id))
    }

    /// Iterate over the elements in order.
    pub fn iter(&self) -> Elements<'doc> {
        Elements {
            doc: self.doc,
            inner: self.elements.iter(),
        }
    }

    /// Collect the elements.
    pub fn to_vec(&self) -> Vec<ValueRef<'doc>> {
        self.iter().collect()
    }
}

impl<'doc> IntoIterator for ArrayRef<'doc> {
    type Item = ValueRef<'doc>;
    type IntoIter = Elements<'doc>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Debug for ArrayRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

/// Iterator over array elements.
#[derive(Clone)]
pub struct Elements<'doc> {
    doc: &'doc Document,
    inner: slice::Iter<'doc, NodeId>,
}

impl<'doc> Iterator for Elements<'doc> {
    type Item = ValueRef<'doc>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|&id| ValueRef::new(self.doc, id))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl DoubleEndedIterator for Elements<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|&id| ValueRef::new(self.doc, id))
    }
}

impl ExactSizeIterator for Elements<'_> {}
impl FusedIterator for Elements<'_> {}

/// Ordered, zero-copy view of an object's members.
///
/// Names are unique; duplicates were collapsed during the parse.
#[derive(Clone, Copy)]
pub struct ObjectRef<'doc> {
    doc: &'doc Document,
    members: &'doc [Member],
}

impl<'doc> ObjectRef<'doc> {
    /// Number of members.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Whether the object has no members.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Value of the member named exactly `name` (case-sensitive).
    pub fn get(&self, name: &str) -> Option<ValueRef<'doc>> {
        self.members
            .iter()
            .find(|m| self.doc.str(m.name) == name)
            .map(|m| ValueRef::new(self.doc, m.value))
    }

    /// Whether a member named `name` exists.
    pub fn contains_key(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Member names in order.
    pub fn keys(&self) -> impl Iterator<Item = &'doc str> + 'doc {
        let (doc, members) = (self.doc, self.members);
        members.iter().map(move |m| doc.str(m.name))
    }

    /// Iterate over `(name, value)` pairs in order.
    pub fn iter(&self) -> Members<'doc> {
        Members {
            doc: self.doc,
            inner: self.members.iter(),
        }
    }
}

impl<'doc> IntoIterator for ObjectRef<'doc> {
    type Item = (&'doc str, ValueRef<'doc>);
    type IntoIter = Members<'doc>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Debug for ObjectRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// Iterator over object members.
#[derive(Clone)]
pub struct Members<'doc> {
    doc: &'doc Document,
    inner: slice::Iter<'doc, Member>,
}

impl<'doc> Iterator for Members<'doc> {
    type Item = (&'doc str, ValueRef<'doc>);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner
            .next()
            .map(|m| (self.doc.str(m.name), ValueRef::new(self.doc, m.value)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl DoubleEndedIterator for Members<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner
            .next_back()
            .map(|m| (self.doc.str(m.name), ValueRef::new(self.doc, m.value)))
    }
}

impl ExactSizeIterator for Members<'_> {}
impl FusedIterator for Members<'_> {}
