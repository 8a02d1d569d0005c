//! JSON lexer/tokenizer.
//!
//! Converts source text into tokens for the parser, tracking the character
//! offset of the cursor for error reporting. The parser drives the lexer
//! directly (peek, bump) where the grammar needs to report a position before
//! a full token can be read.

use std::borrow::Cow;

use crate::error::{ParseError, ParseErrorKind, ParseResult};
use crate::types::Number;

/// Token types produced by the lexer.
#[derive(Debug, Clone, PartialEq)]
pub enum Token<'a> {
    /// Left brace `{`
    LeftBrace,
    /// Right brace `}`
    RightBrace,
    /// Left bracket `[`
    LeftBracket,
    /// Right bracket `]`
    RightBracket,
    /// Colon `:`
    Colon,
    /// Comma `,`
    Comma,
    /// Null literal
    Null,
    /// True literal
    True,
    /// False literal
    False,
    /// String value (unescaped; borrowed when the literal had no escapes)
    String(Cow<'a, str>),
    /// Number literal with its source text
    Number {
        /// Literal exactly as written
        text: &'a str,
        /// Parsed interpretations
        value: Number,
    },
    /// End of input
    Eof,
}

/// JSON lexer over a UTF-8 string.
pub struct Lexer<'a> {
    input: &'a str,
    bytes: &'a [u8],
    /// Byte position.
    pos: usize,
    /// Character offset of `pos`.
    chars: usize,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given input.
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            bytes: input.as_bytes(),
            pos: 0,
            chars: 0,
        }
    }

    /// Character offset of the cursor.
    pub fn offset(&self) -> usize {
        self.chars
    }

    /// Whether the cursor is at end of input.
    pub fn is_eof(&self) -> bool {
        self.pos >= self.bytes.len()
    }

    /// Peek at the current byte without consuming it.
    pub fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn peek_char(&self) -> Option<char> {
        self.input.get(self.pos..)?.chars().next()
    }

    /// Consume and return the current character.
    pub fn bump(&mut self) -> Option<char> {
        let c = self.peek_char()?;
        self.pos += c.len_utf8();
        self.chars += 1;
        Some(c)
    }

    /// Offset just past a character returned by [`Lexer::bump`].
    ///
    /// A take at end of input still counts as one position.
    pub fn offset_after(&self, taken: Option<char>) -> usize {
        self.chars + usize::from(taken.is_none())
    }

    /// Consume one ASCII byte.
    fn advance(&mut self) {
        self.pos += 1;
        self.chars += 1;
    }

    /// Skip whitespace characters.
    pub fn skip_whitespace(&mut self) {
        while let Some(b' ' | b'\t' | b'\n' | b'\r') = self.peek() {
            self.advance();
        }
    }

    /// Read the next token from the input.
    pub fn next_token(&mut self) -> ParseResult<Token<'a>> {
        self.skip_whitespace();

        let Some(b) = self.peek() else {
            return Ok(Token::Eof);
        };
        let token = match b {
            b'{' => Token::LeftBrace,
            b'}' => Token::RightBrace,
            b'[' => Token::LeftBracket,
            b']' => Token::RightBracket,
            b':' => Token::Colon,
            b',' => Token::Comma,
            b'"' => return self.read_string().map(Token::String),
            b'-' | b'0'..=b'9' => return self.read_number(),
            b't' => return self.read_literal("true", Token::True),
            b'f' => return self.read_literal("false", Token::False),
            b'n' => return self.read_literal("null", Token::Null),
            _ => return Err(ParseError::new(ParseErrorKind::ValueInvalid, self.offset())),
        };
        self.advance();
        Ok(token)
    }

    /// Read a `true`/`false`/`null` literal.
    fn read_literal(&mut self, word: &'static str, token: Token<'a>) -> ParseResult<Token<'a>> {
        // First character already matched by the caller's dispatch.
        self.advance();
        for expected in word.chars().skip(1) {
            let taken = self.bump();
            if taken != Some(expected) {
                return Err(ParseError::new(
                    ParseErrorKind::ValueInvalid,
                    self.offset_after(taken) - 1,
                ));
            }
        }
        Ok(token)
    }

    /// Read a string literal starting at the opening quote, handling escapes.
    pub fn read_string(&mut self) -> ParseResult<Cow<'a, str>> {
        let input = self.input;
        self.advance();
        let start = self.pos;
        let mut unescaped: Option<String> = None;

        loop {
            let Some(c) = self.peek_char() else {
                return Err(self.unterminated_string());
            };
            match c {
                '"' => {
                    let end = self.pos;
                    self.advance();
                    return Ok(match unescaped {
                        Some(s) => Cow::Owned(s),
                        None => Cow::Borrowed(&input[start..end]),
                    });
                }
                '\\' => {
                    let buf = unescaped.get_or_insert_with(|| input[start..self.pos].to_owned());
                    self.advance();
                    buf.push(self.read_escape_sequence()?);
                }
                c if u32::from(c) < 0x20 => return Err(self.unterminated_string()),
                c => {
                    if let Some(buf) = unescaped.as_mut() {
                        buf.push(c);
                    }
                    self.pos += c.len_utf8();
                    self.chars += 1;
                }
            }
        }
    }

    fn unterminated_string(&self) -> ParseError {
        ParseError::new(
            ParseErrorKind::StringMissQuotationMark,
            self.offset().saturating_sub(1),
        )
    }

    /// Read an escape sequence after a backslash.
    fn read_escape_sequence(&mut self) -> ParseResult<char> {
        let taken = self.bump();
        match taken {
            Some('"') => Ok('"'),
            Some('\\') => Ok('\\'),
            Some('/') => Ok('/'),
            Some('b') => Ok('\x08'),
            Some('f') => Ok('\x0C'),
            Some('n') => Ok('\n'),
            Some('r') => Ok('\r'),
            Some('t') => Ok('\t'),
            Some('u') => self.read_unicode_escape(),
            _ => Err(ParseError::new(
                ParseErrorKind::StringEscapeInvalid,
                self.offset_after(taken) - 1,
            )),
        }
    }

    /// Read a `\uXXXX` escape, combining a surrogate pair when present.
    fn read_unicode_escape(&mut self) -> ParseResult<char> {
        let codepoint = self.read_hex4()?;

        match codepoint {
            0xD800..=0xDBFF => {
                let backslash = self.bump();
                if backslash != Some('\\') {
                    return Err(invalid_surrogate(self.offset_after(backslash)));
                }
                let u = self.bump();
                if u != Some('u') {
                    return Err(invalid_surrogate(self.offset_after(u)));
                }
                let low = self.read_hex4()?;
                if !(0xDC00..=0xDFFF).contains(&low) {
                    return Err(invalid_surrogate(self.offset()));
                }
                let combined = 0x10000 + ((codepoint - 0xD800) << 10) + (low - 0xDC00);
                char::from_u32(combined).ok_or_else(|| invalid_surrogate(self.offset()))
            }
            0xDC00..=0xDFFF => Err(invalid_surrogate(self.offset())),
            _ => char::from_u32(codepoint).ok_or_else(|| invalid_surrogate(self.offset())),
        }
    }

    /// Read 4 hex digits and return the value.
    fn read_hex4(&mut self) -> ParseResult<u32> {
        let mut value = 0;
        for _ in 0..4 {
            let taken = self.bump();
            let digit = taken.and_then(|c| c.to_digit(16)).ok_or_else(|| {
                ParseError::new(
                    ParseErrorKind::StringUnicodeEscapeInvalidHex,
                    self.offset_after(taken) - 1,
                )
            })?;
            value = (value << 4) | digit;
        }
        Ok(value)
    }

    /// Read a number token.
    ///
    /// Grammar: `-?(0|[1-9][0-9]*)(\.[0-9]+)?([eE][+-]?[0-9]+)?`. A leading
    /// zero ends the integer part; following digits belong to the next token.
    fn read_number(&mut self) -> ParseResult<Token<'a>> {
        let start = self.pos;

        let negative = self.peek() == Some(b'-');
        if negative {
            self.advance();
        }

        // Integer part. Exact while it fits u64, then tracked as a double
        // only to detect magnitudes past the double range.
        let mut significand = Some(0u64);
        let mut magnitude = 0f64;
        match self.peek() {
            Some(b'0') => self.advance(),
            Some(b'1'..=b'9') => {
                while let Some(d @ b'0'..=b'9') = self.peek() {
                    let digit = d - b'0';
                    match significand.and_then(|acc| acc.checked_mul(10)?.checked_add(u64::from(digit))) {
                        Some(acc) => significand = Some(acc),
                        None => {
                            if let Some(acc) = significand.take() {
                                magnitude = acc as f64;
                            }
                            if magnitude >= f64::MAX / 10.0 {
                                return Err(ParseError::new(ParseErrorKind::NumberTooBig, self.offset()));
                            }
                            magnitude = magnitude * 10.0 + f64::from(digit);
                        }
                    }
                    self.advance();
                }
            }
            _ => return Err(ParseError::new(ParseErrorKind::ValueInvalid, self.offset())),
        }

        let mut is_integer = true;

        // Fraction
        if self.peek() == Some(b'.') {
            self.advance();
            if !matches!(self.peek(), Some(b'0'..=b'9')) {
                return Err(ParseError::new(ParseErrorKind::NumberMissFraction, self.offset()));
            }
            while let Some(b'0'..=b'9') = self.peek() {
                self.advance();
            }
            is_integer = false;
        }

        // Exponent
        if let Some(b'e' | b'E') = self.peek() {
            self.advance();
            let mut exp_negative = false;
            match self.peek() {
                Some(b'+') => self.advance(),
                Some(b'-') => {
                    self.advance();
                    exp_negative = true;
                }
                _ => {}
            }
            let Some(first @ b'0'..=b'9') = self.peek() else {
                return Err(ParseError::new(ParseErrorKind::NumberMissExponent, self.offset()));
            };
            self.advance();
            let mut exp = u32::from(first - b'0');
            while let Some(d @ b'0'..=b'9') = self.peek() {
                self.advance();
                exp = exp.saturating_mul(10).saturating_add(u32::from(d - b'0'));
                if exp > 308 && !exp_negative {
                    return Err(ParseError::new(ParseErrorKind::NumberTooBig, self.offset()));
                }
            }
            is_integer = false;
        }

        let text = &self.input[start..self.pos];
        let float: f64 = text
            .parse()
            .map_err(|_| ParseError::new(ParseErrorKind::ValueInvalid, self.offset()))?;
        if !float.is_finite() {
            return Err(ParseError::new(ParseErrorKind::NumberTooBig, self.offset()));
        }

        let (int, uint) = match significand.filter(|_| is_integer) {
            Some(acc) => {
                let signed = if negative {
                    -i128::from(acc)
                } else {
                    i128::from(acc)
                };
                (i64::try_from(signed).ok(), u64::try_from(signed).ok())
            }
            None => (None, None),
        };

        Ok(Token::Number {
            text,
            value: Number::new(int, uint, float),
        })
    }
}

/// Surrogate errors point two characters back from the cursor.
fn invalid_surrogate(past: usize) -> ParseError {
    ParseError::new(
        ParseErrorKind::StringUnicodeSurrogateInvalid,
        past.saturating_sub(2),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex(input: &str) -> ParseResult<Vec<Token<'_>>> {
        let mut lexer = Lexer::new(input);
        let mut tokens = Vec::new();
        loop {
            let token = lexer.next_token()?;
            if token == Token::Eof {
                break;
            }
            tokens.push(token);
        }
        Ok(tokens)
    }

    fn number(input: &str) -> Number {
        match Lexer::new(input).next_token().unwrap() {
            Token::Number { value, .. } => value,
            other => panic!("expected number, got {other:?}"),
        }
    }

    fn lex_err(input: &str) -> (usize, ParseErrorKind) {
        let err = lex(input).unwrap_err();
        (err.offset(), err.kind())
    }

    #[test]
    fn test_structural_tokens() {
        let tokens = lex("{}[],:").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::LeftBrace,
                Token::RightBrace,
                Token::LeftBracket,
                Token::RightBracket,
                Token::Comma,
                Token::Colon,
            ]
        );
    }

    #[test]
    fn test_literals() {
        let tokens = lex("null true false").unwrap();
        assert_eq!(tokens, vec![Token::Null, Token::True, Token::False]);
    }

    #[test]
    fn test_literal_mismatch_offset() {
        assert_eq!(lex_err("nulL"), (3, ParseErrorKind::ValueInvalid));
        assert_eq!(lex_err("tru"), (3, ParseErrorKind::ValueInvalid));
        assert_eq!(lex_err("  x"), (2, ParseErrorKind::ValueInvalid));
    }

    #[test]
    fn test_string_borrowed_without_escapes() {
        let tokens = lex(r#""hello""#).unwrap();
        assert!(matches!(tokens[0], Token::String(Cow::Borrowed(s)) if s == "hello"));
    }

    #[test]
    fn test_string_escapes() {
        let tokens = lex(r#""a\nb\tc\/\"""#).unwrap();
        assert_eq!(tokens, vec![Token::String("a\nb\tc/\"".into())]);
    }

    #[test]
    fn test_unicode_escape() {
        let tokens = lex(r#""\u0041\u00e9""#).unwrap();
        assert_eq!(tokens, vec![Token::String("Aé".into())]);
    }

    #[test]
    fn test_surrogate_pair() {
        let tokens = lex(r#""\uD83D\uDE00""#).unwrap();
        assert_eq!(tokens, vec![Token::String("\u{1F600}".into())]);
    }

    #[test]
    fn test_invalid_surrogates() {
        assert_eq!(
            lex_err(r#""\uD800X""#),
            (6, ParseErrorKind::StringUnicodeSurrogateInvalid)
        );
        assert_eq!(
            lex_err(r#""\uD800\uD800""#),
            (11, ParseErrorKind::StringUnicodeSurrogateInvalid)
        );
        assert_eq!(
            lex_err(r#""\uDC00""#),
            (5, ParseErrorKind::StringUnicodeSurrogateInvalid)
        );
    }

    #[test]
    fn test_non_ascii_offsets_count_characters() {
        // Two multi-byte characters before the bad escape.
        assert_eq!(
            lex_err(r#""éé\q""#),
            (4, ParseErrorKind::StringEscapeInvalid)
        );
    }

    #[test]
    fn test_control_character_in_string() {
        assert_eq!(
            lex_err("\"ab\ncd\""),
            (2, ParseErrorKind::StringMissQuotationMark)
        );
    }

    #[test]
    fn test_number() {
        let tokens = lex("42 -123 0").unwrap();
        let texts: Vec<&str> = tokens
            .iter()
            .map(|t| match t {
                Token::Number { text, .. } => *text,
                _ => "",
            })
            .collect();
        assert_eq!(texts, vec!["42", "-123", "0"]);
    }

    #[test]
    fn test_integer_interpretations() {
        let n = number("-42");
        assert_eq!(n.as_i64(), Some(-42));
        assert_eq!(n.as_u64(), None);
        assert_eq!(n.as_f64(), -42.0);

        let n = number("18446744073709551615");
        assert_eq!(n.as_i64(), None);
        assert_eq!(n.as_u64(), Some(u64::MAX));

        let n = number("-9223372036854775808");
        assert_eq!(n.as_i64(), Some(i64::MIN));

        let n = number("18446744073709551616");
        assert!(!n.is_integer());
        assert_eq!(n.as_f64(), 18446744073709551616.0);
    }

    #[test]
    fn test_fraction_and_exponent() {
        let n = number("-59.816976");
        assert!(!n.is_integer());
        assert_eq!(n.as_f64(), -59.816976);

        let n = number("1E+2");
        assert!(!n.is_integer());
        assert_eq!(n.as_f64(), 100.0);

        assert_eq!(number("1e-400").as_f64(), 0.0);
    }

    #[test]
    fn test_leading_zero_ends_number() {
        let tokens = lex("01").unwrap();
        assert_eq!(tokens.len(), 2);
    }

    #[test]
    fn test_number_errors() {
        assert_eq!(lex_err("1."), (2, ParseErrorKind::NumberMissFraction));
        assert_eq!(lex_err("1.a"), (2, ParseErrorKind::NumberMissFraction));
        assert_eq!(lex_err("1e"), (2, ParseErrorKind::NumberMissExponent));
        assert_eq!(lex_err("1e+"), (3, ParseErrorKind::NumberMissExponent));
        assert_eq!(lex_err("-"), (1, ParseErrorKind::ValueInvalid));
        assert_eq!(lex_err("1e309"), (5, ParseErrorKind::NumberTooBig));
        assert_eq!(lex_err("2e308"), (5, ParseErrorKind::NumberTooBig));
    }

    #[test]
    fn test_number_too_big() {
        let big = format!("1{}", "0".repeat(310));
        assert_eq!(lex_err(&big), (309, ParseErrorKind::NumberTooBig));

        let fits = format!("1{}", "0".repeat(300));
        assert_eq!(number(&fits).as_f64(), 1e300);
    }
}
