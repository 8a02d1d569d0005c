//! Compact JSON serialization.
//!
//! Emits no insignificant whitespace. Object members keep document order,
//! numbers are written exactly as they appeared in the source, and strings
//! are escaped minimally: quote, backslash and control characters only.
//! Forward slash and non-ASCII text are written as-is.

use crate::value::Value;

const HEX: &[u8; 16] = b"0123456789ABCDEF";

/// Serialize a value to a compact JSON string.
pub fn to_string<'doc, V: Value<'doc>>(value: V) -> String {
    let mut output = String::new();
    write_value(value, &mut output);
    output
}

/// Append the compact JSON text of `value` to `output`.
pub fn write_value<'doc, V: Value<'doc>>(value: V, output: &mut String) {
    if let Some(b) = value.as_bool() {
        output.push_str(if b { "true" } else { "false" });
    } else if let Some(text) = value.number_text() {
        output.push_str(text);
    } else if let Some(s) = value.as_str() {
        write_string(s, output);
    } else if let Some(items) = value.as_array() {
        write_array::<V>(items, output);
    } else if let Some(members) = value.as_object() {
        write_object::<V>(members, output);
    } else {
        output.push_str("null");
    }
}

/// Append `s` as a quoted, escaped JSON string.
pub fn write_string(s: &str, output: &mut String) {
    output.push('"');
    let mut start = 0;
    for (i, b) in s.bytes().enumerate() {
        let escape = match b {
            b'"' => "\\\"",
            b'\\' => "\\\\",
            0x08 => "\\b",
            0x0C => "\\f",
            b'\n' => "\\n",
            b'\r' => "\\r",
            b'\t' => "\\t",
            0x00..=0x1F => "",
            _ => continue,
        };
        output.push_str(&s[start..i]);
        if escape.is_empty() {
            output.push_str("\\u00");
            output.push(char::from(HEX[usize::from(b >> 4)]));
            output.push(char::from(HEX[usize::from(b & 0x0F)]));
        } else {
            output.push_str(escape);
        }
        start = i + 1;
    }
    output.push_str(&s[start..]);
    output.push('"');
}

fn write_array<'doc, V: Value<'doc>>(items: V::Array, output: &mut String) {
    output.push('[');
    for (i, item) in items.into_iter().enumerate() {
        if i > 0 {
            output.push(',');
        }
        write_value(item, output);
    }
    output.push(']');
}

fn write_object<'doc, V: Value<'doc>>(members: V::Object, output: &mut String) {
    output.push('{');
    for (i, (name, value)) in members.into_iter().enumerate() {
        if i > 0 {
            output.push(',');
        }
        write_string(name, output);
        output.push(':');
        write_value(value, output);
    }
    output.push('}');
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    fn escaped(s: &str) -> String {
        let mut out = String::new();
        write_string(s, &mut out);
        out
    }

    #[test]
    fn test_string_escaping() {
        assert_eq!(escaped("plain"), r#""plain""#);
        assert_eq!(escaped("a\"b\\c"), r#""a\"b\\c""#);
        assert_eq!(escaped("\u{8}\u{c}\n\r\t"), r#""\b\f\n\r\t""#);
        assert_eq!(escaped("\u{0}\u{1f}"), r#""\u0000\u001F""#);
    }

    #[test]
    fn test_slash_and_unicode_unescaped() {
        assert_eq!(escaped("a/b"), r#""a/b""#);
        assert_eq!(escaped("héllo \u{1F600}"), "\"héllo \u{1F600}\"");
        assert_eq!(escaped("\u{7f}"), "\"\u{7f}\"");
    }

    #[test]
    fn test_compact_output() {
        let doc = parse("{ \"a\" : [ true , false , null ] , \"b\" : \"x\" }").unwrap();
        assert_eq!(to_string(doc.root()), r#"{"a":[true,false,null],"b":"x"}"#);
    }

    #[test]
    fn test_member_order_preserved() {
        let doc = parse(r#"{"z":1,"a":2,"m":3}"#).unwrap();
        assert_eq!(to_string(doc.root()), r#"{"z":1,"a":2,"m":3}"#);
    }

    #[test]
    fn test_number_text_preserved() {
        let doc = parse("[1.0, 1e2, -0, 0.10]").unwrap();
        assert_eq!(to_string(doc.root()), "[1.0,1e2,-0,0.10]");
    }

    #[test]
    fn test_escaped_input_reescaped() {
        let doc = parse(r#"["a\/b","\u0001","\u00e9"]"#).unwrap();
        assert_eq!(to_string(doc.root()), "[\"a/b\",\"\\u0001\",\"é\"]");
    }

    #[test]
    fn test_output_reparses_identically() {
        let input = r#"{"s":"tab\there","n":[0,-1.5e-3],"o":{"k":null}}"#;
        let once = to_string(parse(input).unwrap().root());
        let twice = to_string(parse(&once).unwrap().root());
        assert_eq!(once, twice);
    }
}
