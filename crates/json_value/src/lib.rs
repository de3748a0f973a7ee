//! A dynamic tagged JSON value ([`Variant`]) with deep-copy semantics,
//! built from and serialized through [`json_parser`]/[`json_emit`]'s event
//! and emitter primitives respectively.

mod build;
mod emit;
mod value;

pub use build::build;
pub use value::Variant;

use json_parser::{Error, ErrorCode, LexerParser};

/// Parses `source` as a single complete JSON document into a [`Variant`]
/// tree. Trailing non-trivia input after the value is rejected.
pub fn parse(source: &str) -> Result<Variant, Error> {
    let mut lp = LexerParser::new(source);
    let value = build(&mut lp)?;
    match lp.next_event() {
        Err(e) if e.code == ErrorCode::LexInputFinished => Ok(value),
        Err(e) => Err(e),
        Ok(event) => Err(Error::new(
            ErrorCode::ParseUnexpectedToken,
            event.token.location,
            "trailing content after the top-level value",
        )),
    }
}
