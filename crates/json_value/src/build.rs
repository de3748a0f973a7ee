use json_emit::escape;
use json_parser::{Error, ErrorCode, Event, EventKind, LexerParser, Token, TokenKind};

use crate::Variant;

/// Parses a complete JSON document into a [`Variant`] tree, driving a
/// [`LexerParser`] event by event. A trailing value is not enough on its
/// own: callers that want "exactly one value, then end of input" should use
/// [`crate::parse`] rather than this directly.
pub fn build(lp: &mut LexerParser<'_>) -> Result<Variant, Error> {
    let event = lp.next_event()?;
    build_value(lp, event)
}

fn build_value<'a>(lp: &mut LexerParser<'a>, event: Event<'a>) -> Result<Variant, Error> {
    match event.kind {
        EventKind::ValueLiteral => Ok(literal_to_variant(event.token)),
        EventKind::ObjectBegin => build_object(lp),
        EventKind::ListBegin => build_list(lp),
        EventKind::ObjectEnd | EventKind::ListEnd | EventKind::ObjectKey | EventKind::Invalid => {
            Err(Error::new(
                ErrorCode::InternalError,
                event.token.location,
                "unexpected event kind at value position",
            ))
        }
    }
}

fn build_object(lp: &mut LexerParser<'_>) -> Result<Variant, Error> {
    let mut pairs = Vec::new();
    loop {
        let event = lp.next_event()?;
        match event.kind {
            EventKind::ObjectEnd => return Ok(Variant::Object(pairs)),
            EventKind::ObjectKey => {
                let key = decode_string_token(event.token);
                let value_event = lp.next_event()?;
                let value = build_value(lp, value_event)?;
                pairs.push((key, value));
            }
            _ => {
                return Err(Error::new(
                    ErrorCode::InternalError,
                    event.token.location,
                    "expected an object key or closing brace",
                ))
            }
        }
    }
}

fn build_list(lp: &mut LexerParser<'_>) -> Result<Variant, Error> {
    let mut items = Vec::new();
    loop {
        let event = lp.next_event()?;
        if event.kind == EventKind::ListEnd {
            return Ok(Variant::List(items));
        }
        items.push(build_value(lp, event)?);
    }
}

fn literal_to_variant(token: Token<'_>) -> Variant {
    match token.kind {
        TokenKind::StringLiteral => Variant::String(decode_string_token(token)),
        TokenKind::BooleanLiteral => Variant::Bool(token.spelling == "true"),
        TokenKind::NullLiteral => Variant::Null,
        TokenKind::NumericLiteral => {
            if is_integer_spelling(token.spelling) {
                token
                    .spelling
                    .parse::<i64>()
                    .map(Variant::Integer)
                    .unwrap_or_else(|_| Variant::Real(token.spelling.parse().unwrap_or(0.0)))
            } else {
                Variant::Real(token.spelling.parse().unwrap_or(0.0))
            }
        }
        _ => unreachable!("scanner/parser never emit a ValueLiteral with this token kind"),
    }
}

/// A numeric token is an integer iff it has no `.` and no exponent marker;
/// anything with a fractional or exponent part is a real, even `1e0`.
fn is_integer_spelling(spelling: &str) -> bool {
    !spelling.bytes().any(|b| matches!(b, b'.' | b'e' | b'E'))
}

fn decode_string_token(token: Token<'_>) -> String {
    let inner = &token.spelling[1..token.spelling.len() - 1];
    escape::decode(inner)
}

#[cfg(test)]
mod test {
    use super::*;

    fn parse_all(source: &str) -> Variant {
        let mut lp = LexerParser::new(source);
        build(&mut lp).unwrap()
    }

    #[test]
    fn scenario_1_builds_nested_object_and_list() {
        let value = parse_all(r#"{"a": [1, 2, 3], "b": {"c": true}}"#);
        assert_eq!(value.get("a").at(1), &Variant::Integer(2));
        assert_eq!(value.get("b").get("c"), &Variant::Bool(true));
    }

    #[test]
    fn disambiguates_integer_and_real() {
        let value = parse_all("[1, 1.0, 1e1, -3]");
        assert_eq!(value.at(0), &Variant::Integer(1));
        assert_eq!(value.at(1), &Variant::Real(1.0));
        assert_eq!(value.at(2), &Variant::Real(10.0));
        assert_eq!(value.at(3), &Variant::Integer(-3));
    }

    #[test]
    fn decodes_escaped_string_literals() {
        let value = parse_all(r#""a\nb""#);
        assert_eq!(value.as_str(), Some("a\nb"));
    }

    #[test]
    fn object_keys_are_unescaped_too() {
        let value = parse_all(r#"{"a\tb": 1}"#);
        assert_eq!(value.get("a\tb"), &Variant::Integer(1));
    }
}
