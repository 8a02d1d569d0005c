//! jog - read-only JSON documents with path queries.
//!
//! Parses JSON text into an immutable, arena-backed [`Document`] and reads
//! typed values out of it by key path. Parse errors report the same character
//! offsets and messages as RapidJSON.
//!
//! # Architecture
//!
//! - [`lexer`] - Tokenizer with escape, surrogate and number handling
//! - [`parser`] - Recursive descent parser building the document
//! - [`document`] - Arena storage for the value tree
//! - [`value`] - The [`Value`] read interface and its typed accessors
//! - [`path`] - Key path resolution
//! - [`writer`] - Compact serialization
//! - [`limits`] - Input size and nesting limits
//! - [`error`] - Parse, path and accessor errors
//!
//! # Example
//!
//! ```
//! use jog::{parse, TypeTag, Value};
//!
//! let doc = parse(r#"{"details":{"age":36,"tags":["nisi","sint"]}}"#)?;
//!
//! assert_eq!(doc.root().get_int(&["details", "age"])?, 36);
//! assert_eq!(doc.type_of(&["details", "tags"]), TypeTag::Array);
//! assert_eq!(doc.type_of(&["details", "name"]), TypeTag::Unknown);
//! assert_eq!(doc.stringify(&["details", "tags"])?, r#"["nisi","sint"]"#);
//!
//! let err = parse("nulL").unwrap_err();
//! assert_eq!(err.to_string(), "[3] Invalid value.");
//! # Ok::<(), jog::Error>(())
//! ```

// Library code reports failures through Result and never aborts.
// Tests are checked separately with `cargo test`.
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(missing_docs)]

pub mod document;
pub mod error;
pub mod lexer;
pub mod limits;
pub mod parser;
pub mod path;
pub mod types;
pub mod value;
pub mod writer;

// Re-export commonly used types
pub use document::Document;
pub use error::{
    Accessor, Error, ErrorCategory, ParseError, ParseErrorKind, ParseResult, PathError, ValueError,
};
pub use limits::Limits;
pub use parser::{parse, parse_slice, parse_with_limits};
pub use path::KeyPath;
pub use types::{Number, TypeTag};
pub use value::{ArrayRef, Elements, Members, ObjectRef, Value, ValueRef};
