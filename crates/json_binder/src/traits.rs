use json_lexer::{SourceLocation, Token};
use json_parser::Error;

use crate::error::BindError;
use crate::field_dumper::FieldDumper;
use crate::stream::EventSource;
use crate::warning::BinderWarning;

/// A "leaf" record type: one JSON value-literal token converts directly to
/// and from `Self`. Implemented for the primitive types in
/// [`crate::scalars`]; user enums/newtypes implement it directly.
pub trait JsonScalar: Sized {
    /// Converts a `value-literal` token's spelling to `Self`. Returning
    /// `Err` reports a recoverable [`BinderWarning::InvalidScalar`] at the
    /// call site, not a fatal parse error — the spec's failure policy for
    /// the binder never aborts on a bad field value.
    fn parse_token(token: Token) -> Result<Self, BindError>;

    fn dump_scalar<W: std::io::Write>(&self, emitter: &mut json_emit::Emitter<W>)
        -> std::io::Result<()>;
}

/// Outcome of [`JsonObject::parse_field`]: `Handled` on a successful field
/// assignment, `UnknownKeySunk` when the key didn't match any field and
/// the value that followed it was sunk instead — spec §4.7's "return 0 on
/// success, non-zero to mean unknown key sunk", as a proper enum rather
/// than an integer code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldOutcome {
    Handled,
    UnknownKeySunk,
}

/// An object-typed record: fields are dispatched by name, one key/value
/// pair at a time, rather than by a single monolithic deserialize call.
/// This is the trait form of spec §4.7's "(parse, dump) pair per user
/// type", resolved at compile time through ordinary Rust trait dispatch —
/// the "interface/trait implemented per user type" alternative spec §9
/// sanctions in place of the source's void-pointer registry.
pub trait JsonObject: Sized + Default {
    /// Receives one already-unwrapped (no surrounding quotes) object key,
    /// that key token's source location (for warnings — spec §3 says every
    /// error/warning carries one), and a stream positioned just after the
    /// key. Implementations dispatch on `key` — typically via a
    /// `match json_hash::hash_key(key.as_bytes())` whose arms
    /// constant-fold, mirroring spec §4.8's compile-time hash dispatch —
    /// and must consume exactly one complete value from `stream` per call,
    /// either by assigning a field or by calling [`crate::sink_value`]
    /// (see [`crate::sink_unknown_field`] for the common "unknown key"
    /// case).
    fn parse_field<'a>(
        &mut self,
        key: &str,
        key_location: SourceLocation,
        stream: &mut dyn EventSource<'a>,
        warn: &mut dyn FnMut(BinderWarning),
    ) -> Result<FieldOutcome, Error>;

    /// Calls `dumper.dump_*_field("name", &self.field)` once per declared
    /// field, in the order they should appear in the output.
    fn dump_fields<W: std::io::Write>(&self, dumper: &mut FieldDumper<'_, W>) -> std::io::Result<()>;
}
