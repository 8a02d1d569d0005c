//! Error handling for the JSON engine.
//!
//! Parse failures carry the character offset and the exact message text of the
//! failure, since callers match on both. Read failures carry the requested path.

use std::fmt;

use thiserror::Error;

use crate::path::KeyPath;

/// Result type for parsing operations.
pub type ParseResult<T> = Result<T, ParseError>;

/// A failed parse: where it failed and why.
///
/// Displays as `[<offset>] <message>`, e.g. `[0] The document is empty.`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("[{offset}] {kind}")]
pub struct ParseError {
    offset: usize,
    kind: ParseErrorKind,
}

impl ParseError {
    pub(crate) fn new(kind: ParseErrorKind, offset: usize) -> Self {
        Self { offset, kind }
    }

    /// 0-based character offset into the source text.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// What went wrong.
    pub fn kind(&self) -> ParseErrorKind {
        self.kind
    }

    /// The message text, including the trailing period.
    pub fn message(&self) -> String {
        self.kind.to_string()
    }
}

/// Every way a parse can fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum ParseErrorKind {
    /// No value before end of input
    #[error("The document is empty.")]
    DocumentEmpty,
    /// Content after a complete root value
    #[error("The document root must not follow by other values.")]
    RootNotSingular,
    /// Unrecognized literal or token in value position
    #[error("Invalid value.")]
    ValueInvalid,
    /// Object member does not start with a string
    #[error("Missing a name for object member.")]
    ObjectMissName,
    /// Object member name not followed by `:`
    #[error("Missing a colon after a name of object member.")]
    ObjectMissColon,
    /// Object member not followed by `,` or `}`
    #[error("Missing a comma or '}}' after an object member.")]
    ObjectMissCommaOrCurlyBracket,
    /// Array element not followed by `,` or `]`
    #[error("Missing a comma or ']' after an array element.")]
    ArrayMissCommaOrSquareBracket,
    /// Non-hex character inside a `\u` escape
    #[error("Incorrect hex digit after \\u escape in string.")]
    StringUnicodeEscapeInvalidHex,
    /// Unpaired or mismatched UTF-16 surrogate
    #[error("The surrogate pair in string is invalid.")]
    StringUnicodeSurrogateInvalid,
    /// Unknown character after a backslash
    #[error("Invalid escape character in string.")]
    StringEscapeInvalid,
    /// Unterminated string or raw control character
    #[error("Missing a closing quotation mark in string.")]
    StringMissQuotationMark,
    /// Input bytes are not UTF-8
    #[error("Invalid encoding in string.")]
    StringInvalidEncoding,
    /// Number magnitude exceeds the double range
    #[error("Number too big to be stored in double.")]
    NumberTooBig,
    /// Decimal point without digits
    #[error("Miss fraction part in number.")]
    NumberMissFraction,
    /// Exponent marker without digits
    #[error("Miss exponent in number.")]
    NumberMissExponent,
    /// Input larger than `Limits::max_input_size`
    #[error("The document exceeds the size limit.")]
    InputTooLarge,
    /// Nesting deeper than `Limits::max_nesting_depth`
    #[error("The document exceeds the nesting depth limit.")]
    NestingTooDeep,
}

/// Coarse grouping of parse failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Malformed token: bad escape, bad surrogate, unterminated string, bad number.
    Lexical,
    /// Structurally invalid token sequence.
    Grammar,
    /// A configured limit was exceeded.
    Limit,
}

impl ParseErrorKind {
    /// The category this failure belongs to.
    pub fn category(&self) -> ErrorCategory {
        match self {
            ParseErrorKind::StringUnicodeEscapeInvalidHex
            | ParseErrorKind::StringUnicodeSurrogateInvalid
            | ParseErrorKind::StringEscapeInvalid
            | ParseErrorKind::StringMissQuotationMark
            | ParseErrorKind::StringInvalidEncoding
            | ParseErrorKind::NumberTooBig
            | ParseErrorKind::NumberMissFraction
            | ParseErrorKind::NumberMissExponent => ErrorCategory::Lexical,
            ParseErrorKind::DocumentEmpty
            | ParseErrorKind::RootNotSingular
            | ParseErrorKind::ValueInvalid
            | ParseErrorKind::ObjectMissName
            | ParseErrorKind::ObjectMissColon
            | ParseErrorKind::ObjectMissCommaOrCurlyBracket
            | ParseErrorKind::ArrayMissCommaOrSquareBracket => ErrorCategory::Grammar,
            ParseErrorKind::InputTooLarge | ParseErrorKind::NestingTooDeep => ErrorCategory::Limit,
        }
    }
}

/// A path that does not resolve to any node.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Could not find a child at {path}")]
pub struct PathError {
    path: KeyPath,
}

impl PathError {
    pub(crate) fn new(path: &[&str]) -> Self {
        Self {
            path: KeyPath::from(path),
        }
    }

    /// The path that was requested.
    pub fn path(&self) -> &KeyPath {
        &self.path
    }
}

/// The typed read that was attempted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Accessor {
    /// `get_int`
    Int,
    /// `get_uint`
    Uint,
    /// `get_float`
    Float,
    /// `get_bool`
    Bool,
    /// `get_string`
    String,
    /// `get_array`
    Array,
    /// `get_object`
    Object,
}

impl Accessor {
    /// Name used in error messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            Accessor::Int => "int",
            Accessor::Uint => "uint",
            Accessor::Float => "float",
            Accessor::Bool => "bool",
            Accessor::String => "string",
            Accessor::Array => "array",
            Accessor::Object => "object",
        }
    }
}

impl fmt::Display for Accessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A typed read that failed.
///
/// A missing path and a node of the wrong kind are deliberately
/// indistinguishable here; use `type_of` first when the difference matters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueError {
    /// No node of the requested kind at the path.
    #[error("Could not find {accessor} value at {path}")]
    NotFound {
        /// The accessor that was called
        accessor: Accessor,
        /// The requested path
        path: KeyPath,
    },
    /// Stringify was called on a path that does not resolve.
    #[error("Could not stringify value at {path}")]
    Stringify {
        /// The requested path
        path: KeyPath,
    },
}

impl ValueError {
    pub(crate) fn not_found(accessor: Accessor, path: &[&str]) -> Self {
        ValueError::NotFound {
            accessor,
            path: KeyPath::from(path),
        }
    }

    /// The path the failed read was given.
    pub fn path(&self) -> &KeyPath {
        match self {
            ValueError::NotFound { path, .. } | ValueError::Stringify { path } => path,
        }
    }
}

impl From<PathError> for ValueError {
    fn from(err: PathError) -> Self {
        ValueError::Stringify { path: err.path }
    }
}

/// Any error produced by this crate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Parsing failed
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// A path did not resolve
    #[error(transparent)]
    Path(#[from] PathError),
    /// A typed read failed
    #[error(transparent)]
    Value(#[from] ValueError),
}
