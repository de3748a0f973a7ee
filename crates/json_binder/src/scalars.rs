use json_emit::{escape, Emitter};
use json_lexer::{Token, TokenKind};

use crate::error::BindError;
use crate::traits::JsonScalar;

/// A numeric token is an integer iff it has no `.` and no exponent marker
/// — matches the same disambiguation rule `json_value`/`json_tree` use.
fn is_integer_spelling(spelling: &str) -> bool {
    !spelling.bytes().any(|b| matches!(b, b'.' | b'e' | b'E'))
}

impl JsonScalar for i64 {
    fn parse_token(token: Token) -> Result<Self, BindError> {
        match token.kind {
            TokenKind::NumericLiteral if is_integer_spelling(token.spelling) => token
                .spelling
                .parse()
                .map_err(|_| BindError::new(format!("'{}' is not a valid i64", token.spelling))),
            _ => Err(BindError::new(format!(
                "expected an integer literal, found {:?}",
                token.kind
            ))),
        }
    }

    fn dump_scalar<W: std::io::Write>(&self, emitter: &mut Emitter<W>) -> std::io::Result<()> {
        emitter.write_int(*self)
    }
}

impl JsonScalar for f64 {
    fn parse_token(token: Token) -> Result<Self, BindError> {
        match token.kind {
            TokenKind::NumericLiteral => token
                .spelling
                .parse()
                .map_err(|_| BindError::new(format!("'{}' is not a valid f64", token.spelling))),
            _ => Err(BindError::new(format!(
                "expected a numeric literal, found {:?}",
                token.kind
            ))),
        }
    }

    fn dump_scalar<W: std::io::Write>(&self, emitter: &mut Emitter<W>) -> std::io::Result<()> {
        emitter.write_real(*self)
    }
}

impl JsonScalar for bool {
    fn parse_token(token: Token) -> Result<Self, BindError> {
        match token.kind {
            TokenKind::BooleanLiteral => Ok(token.spelling == "true"),
            // spec §9 open question (ii): try string-to-bool coercion and
            // warn on failure, rather than strictly rejecting it.
            TokenKind::StringLiteral => {
                let inner = &token.spelling[1..token.spelling.len() - 1];
                match inner {
                    "true" => Ok(true),
                    "false" => Ok(false),
                    _ => Err(BindError::new(format!(
                        "'{inner}' does not coerce to a boolean"
                    ))),
                }
            }
            _ => Err(BindError::new(format!(
                "expected a boolean literal, found {:?}",
                token.kind
            ))),
        }
    }

    fn dump_scalar<W: std::io::Write>(&self, emitter: &mut Emitter<W>) -> std::io::Result<()> {
        emitter.write_bool(*self)
    }
}

impl JsonScalar for String {
    fn parse_token(token: Token) -> Result<Self, BindError> {
        match token.kind {
            TokenKind::StringLiteral => {
                Ok(escape::decode(&token.spelling[1..token.spelling.len() - 1]))
            }
            _ => Err(BindError::new(format!(
                "expected a string literal, found {:?}",
                token.kind
            ))),
        }
    }

    fn dump_scalar<W: std::io::Write>(&self, emitter: &mut Emitter<W>) -> std::io::Result<()> {
        emitter.write_string(self)
    }
}
