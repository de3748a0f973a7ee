//! Convenience entry points over the lexer/parser/value/tree/binder
//! crates — spec §6's `verify`, `parse`, `parse_into`, `dump`, `dump_with`.
//!
//! Wrappers here should only cast types and call into one of the leaf
//! crates; any logic that needs more than that belongs in the crate that
//! owns it, not here.

use json_parser::{ErrorCode, LexerParser};

pub use json_binder::{
    registry, sink_from_event, sink_value, BinderWarning, FieldDumper, FieldOutcome,
    ignore_warnings, JsonObject, JsonScalar,
};
pub use json_emit::EmitOptions;
pub use json_hash::hash_key;
pub use json_parser::{Error, ErrorCode as Code, Event, EventKind, SourceLocation, Token};
pub use json_tree::{DocumentTree, Item, ItemId, ItemKind, ItemRef};
pub use json_value::Variant;

/// Parses `source` as a single complete JSON document into a dynamic
/// [`Variant`] tree. Trailing non-trivia content after the value is
/// rejected, matching [`verify`].
pub fn parse(source: &str) -> Result<Variant, Error> {
    json_value::parse(source)
}

/// Checks that `source` is exactly one well-formed JSON value with nothing
/// but trailing whitespace after it, without building any output value.
/// `verify(s).is_ok() == parse(s).is_ok()` for every `s`.
pub fn verify(source: &str) -> Result<(), Error> {
    let mut lp = LexerParser::new(source);
    let event = lp.next_event()?;
    json_binder::sink_from_event(&mut lp, event)?;
    reject_trailing_content(&mut lp)
}

/// Parses `source` into a [`DocumentTree`] backed by `buffer`, the arena a
/// caller pre-allocates to bound parse memory. Fails with
/// [`ErrorCode::ParseOom`](json_parser::ErrorCode::ParseOom) if `buffer` is
/// too small.
pub fn parse_into_tree<'arena, 'a>(
    buffer: &'arena mut [Item<'a>],
    source: &'a str,
) -> Result<DocumentTree<'arena, 'a>, Error> {
    DocumentTree::parse(buffer, source)
}

/// Parses `source` directly into a registered user record type `T`, via
/// [`json_binder::parse_object`]. Unknown keys and shape mismatches are
/// reported to `warn` and recovered from rather than aborting the parse —
/// see [`json_binder::BinderWarning`].
pub fn parse_into<T: JsonObject>(
    source: &str,
    warn: &mut dyn FnMut(BinderWarning),
) -> Result<T, Error> {
    let mut lp = LexerParser::new(source);
    let value = json_binder::parse_object(&mut lp, warn)?;
    reject_trailing_content(&mut lp)?;
    Ok(value)
}

fn reject_trailing_content(lp: &mut LexerParser<'_>) -> Result<(), Error> {
    match lp.next_event() {
        Err(e) if e.code == ErrorCode::LexInputFinished => Ok(()),
        Err(e) => Err(e),
        Ok(event) => Err(Error::new(
            ErrorCode::ParseUnexpectedToken,
            event.token.location,
            "trailing content after the top-level value",
        )),
    }
}

/// Serializes `value` with [`EmitOptions::default`] (2-space indent).
pub fn dump(value: &Variant) -> String {
    value.dump(&EmitOptions::default())
}

/// Serializes `value` with caller-supplied `options` (e.g.
/// [`EmitOptions::compact`]).
pub fn dump_with(value: &Variant, options: &EmitOptions) -> String {
    value.dump(options)
}

/// Serializes a registered user record type `T` via
/// [`json_binder::dump_object`], through the same two-pass
/// size-then-write scheme [`dump`] uses for [`Variant`].
pub fn dump_object<T: JsonObject>(value: &T, options: &EmitOptions) -> String {
    let mut counter = json_emit::Emitter::new(json_emit::counting_printer(), options.clone());
    json_binder::dump_object(value, &mut counter).expect("writing to io::sink() never fails");
    let size = counter.bytes_written();

    let mut writer = json_emit::Emitter::new(Vec::with_capacity(size), options.clone());
    json_binder::dump_object(value, &mut writer).expect("writing to a Vec<u8> never fails");
    String::from_utf8(writer.into_inner()).expect("emitter only ever writes valid UTF-8")
}
