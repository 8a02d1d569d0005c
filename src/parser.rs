//! Recursive descent JSON parser.
//!
//! Builds a [`Document`] in one pass over the input. The first error aborts
//! the parse and is reported with the character offset where it was detected,
//! using the same positions and messages as RapidJSON.
//!
//! Objects and arrays are read straight off the lexer cursor rather than
//! through whole tokens, because the grammar errors (missing name, colon,
//! comma) are positioned relative to single characters.

use crate::document::{Builder, Document, Node, NodeId};
use crate::error::{ParseError, ParseErrorKind, ParseResult};
use crate::lexer::{Lexer, Token};
use crate::limits::Limits;

/// JSON parser producing a [`Document`].
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    builder: Builder,
    limits: Limits,
    depth: usize,
}

impl<'a> Parser<'a> {
    /// Create a new parser for the given input.
    pub fn new(input: &'a str, limits: Limits) -> ParseResult<Self> {
        if input.len() > limits.max_input_size {
            return Err(ParseError::new(ParseErrorKind::InputTooLarge, 0));
        }
        Ok(Self {
            lexer: Lexer::new(input),
            builder: Builder::with_capacity(input.len()),
            limits,
            depth: 0,
        })
    }

    /// Parse the whole input as exactly one JSON value.
    pub fn parse(mut self) -> ParseResult<Document> {
        self.lexer.skip_whitespace();
        if self.lexer.is_eof() {
            return Err(ParseError::new(
                ParseErrorKind::DocumentEmpty,
                self.lexer.offset(),
            ));
        }

        let root = self.parse_value()?;

        // Ensure no trailing content
        self.lexer.skip_whitespace();
        if !self.lexer.is_eof() {
            return Err(ParseError::new(
                ParseErrorKind::RootNotSingular,
                self.lexer.offset(),
            ));
        }

        Ok(self.builder.finish(root))
    }

    /// Parse a single JSON value.
    fn parse_value(&mut self) -> ParseResult<NodeId> {
        self.lexer.skip_whitespace();
        let at = self.lexer.offset();
        match self.lexer.next_token()? {
            Token::Null => Ok(self.builder.push(Node::Null)),
            Token::True => Ok(self.builder.push(Node::Bool(true))),
            Token::False => Ok(self.builder.push(Node::Bool(false))),
            Token::String(s) => Ok(self.builder.push_string(&s)),
            Token::Number { text, value } => Ok(self.builder.push_number(text, value)),
            Token::LeftBrace => self.parse_object(at),
            Token::LeftBracket => self.parse_array(at),
            Token::RightBrace
            | Token::RightBracket
            | Token::Colon
            | Token::Comma
            | Token::Eof => Err(ParseError::new(ParseErrorKind::ValueInvalid, at)),
        }
    }

    /// Enter a container opened at `at`, enforcing the nesting limit.
    fn enter(&mut self, at: usize) -> ParseResult<()> {
        self.depth += 1;
        if self.depth > self.limits.max_nesting_depth {
            return Err(ParseError::new(ParseErrorKind::NestingTooDeep, at));
        }
        Ok(())
    }

    /// Parse a JSON object. The opening brace is already consumed.
    fn parse_object(&mut self, at: usize) -> ParseResult<NodeId> {
        self.enter(at)?;
        let mark = self.builder.open_object();

        self.lexer.skip_whitespace();
        if self.lexer.peek() == Some(b'}') {
            self.lexer.bump();
        } else {
            loop {
                if self.lexer.peek() != Some(b'"') {
                    return Err(ParseError::new(
                        ParseErrorKind::ObjectMissName,
                        self.lexer.offset(),
                    ));
                }
                let name = self.lexer.read_string()?;

                self.lexer.skip_whitespace();
                let colon = self.lexer.bump();
                if colon != Some(':') {
                    return Err(ParseError::new(
                        ParseErrorKind::ObjectMissColon,
                        self.lexer.offset_after(colon),
                    ));
                }

                let value = self.parse_value()?;
                self.builder.push_member(&name, value);

                self.lexer.skip_whitespace();
                match self.lexer.bump() {
                    Some(',') => self.lexer.skip_whitespace(),
                    Some('}') => break,
                    other => {
                        return Err(ParseError::new(
                            ParseErrorKind::ObjectMissCommaOrCurlyBracket,
                            self.lexer.offset_after(other),
                        ))
                    }
                }
            }
        }

        self.depth -= 1;
        Ok(self.builder.close_object(mark))
    }

    /// Parse a JSON array. The opening bracket is already consumed.
    fn parse_array(&mut self, at: usize) -> ParseResult<NodeId> {
        self.enter(at)?;
        let mark = self.builder.open_array();

        self.lexer.skip_whitespace();
        if self.lexer.peek() == Some(b']') {
            self.lexer.bump();
        } else {
            loop {
                let element = self.parse_value()?;
                self.builder.push_element(element);

                self.lexer.skip_whitespace();
                match self.lexer.bump() {
                    Some(',') => {}
                    Some(']') => break,
                    other => {
                        return Err(ParseError::new(
                            ParseErrorKind::ArrayMissCommaOrSquareBracket,
                            self.lexer.offset_after(other),
                        ))
                    }
                }
            }
        }

        self.depth -= 1;
        Ok(self.builder.close_array(mark))
    }
}

/// Parse JSON text with [`Limits::standard`].
pub fn parse(input: &str) -> ParseResult<Document> {
    parse_with_limits(input, Limits::standard())
}

/// Parse JSON text with custom limits.
pub fn parse_with_limits(input: &str, limits: Limits) -> ParseResult<Document> {
    let result = Parser::new(input, limits).and_then(Parser::parse);
    match &result {
        Ok(doc) => tracing::debug!(
            bytes = input.len(),
            nodes = doc.node_count(),
            "parsed document"
        ),
        Err(err) => tracing::debug!(
            offset = err.offset(),
            error = %err.kind(),
            "rejected document"
        ),
    }
    result
}

/// Parse JSON from bytes, which must be valid UTF-8.
pub fn parse_slice(input: &[u8]) -> ParseResult<Document> {
    let text = std::str::from_utf8(input).map_err(|e| {
        let offset = std::str::from_utf8(&input[..e.valid_up_to()])
            .map_or(0, |valid| valid.chars().count());
        tracing::debug!(offset, "rejected document: invalid UTF-8");
        ParseError::new(ParseErrorKind::StringInvalidEncoding, offset)
    })?;
    parse(text)
}
