//! Parsed document storage.
//!
//! A [`Document`] is a flat arena: every node, child list, member list and
//! string lives in one of a handful of vectors, addressed by index. Dropping
//! the document frees those vectors in one step regardless of tree shape, and
//! nothing in it is mutated after the parse, so a shared `&Document` can be
//! read from any number of threads.

use std::fmt;
use std::ops::Range;
use std::str::FromStr;

use ahash::AHashMap;

use crate::error::{ParseError, PathError, ValueError};
use crate::types::{Number, TypeTag};
use crate::value::{Value, ValueRef};

/// Objects wider than this collapse duplicate names through a hash map
/// instead of a linear scan.
const DEDUP_SCAN_LIMIT: usize = 16;

/// Index of a node in the arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct NodeId(usize);

/// Range of bytes in the document's string storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Span {
    start: usize,
    len: usize,
}

impl Span {
    fn range(self) -> Range<usize> {
        self.start..self.start + self.len
    }
}

/// Contiguous run of entries in `elements` or `members`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Slot {
    start: usize,
    len: usize,
}

impl Slot {
    fn range(self) -> Range<usize> {
        self.start..self.start + self.len
    }
}

/// One object member: name and value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Member {
    pub(crate) name: Span,
    pub(crate) value: NodeId,
}

/// A node of the value tree.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Node {
    Null,
    Bool(bool),
    Number { text: Span, value: Number },
    String(Span),
    Array(Slot),
    Object(Slot),
}

impl Node {
    pub(crate) fn type_tag(&self) -> TypeTag {
        match self {
            Node::Null => TypeTag::Null,
            Node::Bool(_) => TypeTag::Bool,
            Node::Number { .. } => TypeTag::Number,
            Node::String(_) => TypeTag::String,
            Node::Array(_) => TypeTag::Array,
            Node::Object(_) => TypeTag::Object,
        }
    }
}

/// An immutable parsed JSON document.
///
/// Owns the whole value tree. [`ValueRef`]s obtained from it borrow it and
/// cannot outlive it.
pub struct Document {
    nodes: Vec<Node>,
    elements: Vec<NodeId>,
    members: Vec<Member>,
    strings: String,
    root: NodeId,
}

impl Document {
    /// The root value.
    pub fn root(&self) -> ValueRef<'_> {
        ValueRef::new(self, self.root)
    }

    /// Resolve a path from the root.
    pub fn get(&self, path: &[&str]) -> Result<ValueRef<'_>, PathError> {
        self.root().get(path)
    }

    /// Kind of the node at `path` from the root, or [`TypeTag::Unknown`].
    pub fn type_of(&self, path: &[&str]) -> TypeTag {
        self.root().type_of(path)
    }

    /// Compact JSON text for the node at `path` from the root.
    pub fn stringify(&self, path: &[&str]) -> Result<String, ValueError> {
        self.root().stringify(path)
    }

    /// Number of nodes allocated by the parse, including values replaced by
    /// later duplicate keys.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub(crate) fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub(crate) fn str(&self, span: Span) -> &str {
        &self.strings[span.range()]
    }

    pub(crate) fn elements(&self, slot: Slot) -> &[NodeId] {
        &self.elements[slot.range()]
    }

    pub(crate) fn members(&self, slot: Slot) -> &[Member] {
        &self.members[slot.range()]
    }
}

impl FromStr for Document {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        crate::parser::parse(s)
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.root(), f)
    }
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Document")
            .field("root", &self.node(self.root).type_tag())
            .field("nodes", &self.nodes.len())
            .field("string_bytes", &self.strings.len())
            .finish()
    }
}

/// Accumulates the arena while the parser walks the input.
///
/// Children of an open container are staged on a stack and moved into the
/// arena as one contiguous run when the container closes, so nested
/// containers never interleave.
#[derive(Debug, Default)]
pub(crate) struct Builder {
    nodes: Vec<Node>,
    elements: Vec<NodeId>,
    members: Vec<Member>,
    strings: String,
    element_stack: Vec<NodeId>,
    member_stack: Vec<Member>,
}

impl Builder {
    pub(crate) fn with_capacity(input_len: usize) -> Self {
        Self {
            strings: String::with_capacity(input_len),
            ..Self::default()
        }
    }

    fn intern(&mut self, s: &str) -> Span {
        let start = self.strings.len();
        self.strings.push_str(s);
        Span { start, len: s.len() }
    }

    pub(crate) fn push(&mut self, node: Node) -> NodeId {
        self.nodes.push(node);
        NodeId(self.nodes.len() - 1)
    }

    pub(crate) fn push_string(&mut self, s: &str) -> NodeId {
        let span = self.intern(s);
        self.push(Node::String(span))
    }

    pub(crate) fn push_number(&mut self, text: &str, value: Number) -> NodeId {
        let text = self.intern(text);
        self.push(Node::Number { text, value })
    }

    pub(crate) fn open_array(&self) -> usize {
        self.element_stack.len()
    }

    pub(crate) fn push_element(&mut self, value: NodeId) {
        self.element_stack.push(value);
    }

    pub(crate) fn close_array(&mut self, mark: usize) -> NodeId {
        let start = self.elements.len();
        self.elements.extend(self.element_stack.drain(mark..));
        let slot = Slot {
            start,
            len: self.elements.len() - start,
        };
        self.push(Node::Array(slot))
    }

    pub(crate) fn open_object(&self) -> usize {
        self.member_stack.len()
    }

    pub(crate) fn push_member(&mut self, name: &str, value: NodeId) {
        let name = self.intern(name);
        self.member_stack.push(Member { name, value });
    }

    /// Close an object, collapsing duplicate names: the member keeps the
    /// position of the first occurrence and the value of the last.
    pub(crate) fn close_object(&mut self, mark: usize) -> NodeId {
        let start = self.members.len();
        let strings = &self.strings;
        let staged = self.member_stack.drain(mark..);

        if staged.len() <= DEDUP_SCAN_LIMIT {
            for member in staged {
                let name = &strings[member.name.range()];
                let existing = self.members[start..]
                    .iter_mut()
                    .find(|m| &strings[m.name.range()] == name);
                match existing {
                    Some(m) => m.value = member.value,
                    None => self.members.push(member),
                }
            }
        } else {
            let mut seen: AHashMap<&str, usize> = AHashMap::with_capacity(staged.len());
            for member in staged {
                let name = &strings[member.name.range()];
                match seen.get(name) {
                    Some(&index) => self.members[index].value = member.value,
                    None => {
                        seen.insert(name, self.members.len());
                        self.members.push(member);
                    }
                }
            }
        }

        let slot = Slot {
            start,
            len: self.members.len() - start,
        };
        self.push(Node::Object(slot))
    }

    pub(crate) fn finish(self, root: NodeId) -> Document {
        Document {
            nodes: self.nodes,
            elements: self.elements,
            members: self.members,
            strings: self.strings,
            root,
        }
    }
}
