//! Dispatches parse/dump operations for arbitrary user record types
//! without centralized knowledge of those types — spec §4.7's
//! `TypedBinder`.
//!
//! Two independent dispatch paths share the same [`JsonScalar`]/
//! [`JsonObject`] trait implementations and the same recoverable-failure
//! policy (unknown keys and shape mismatches are sunk and warned about,
//! never fatal):
//!
//! - [`parse_object`]/[`parse_scalar`]/[`dump_object`]/[`dump_scalar`] and
//!   their `_list` counterparts resolve entirely at compile time through
//!   ordinary Rust generics — the common case, and the ["interface/trait
//!   implemented per user type"](https://en.wikipedia.org/wiki/Trait_(computer_programming))
//!   alternative spec §9 sanctions in place of the source's void-pointer
//!   registry.
//! - [`registry`] is spec §4.7's literal "process-wide registry keyed by
//!   type identity", for the one case compile-time generics can't cover: a
//!   caller holding a value only known by `TypeId` at runtime.

mod dispatch;
mod error;
mod field_dumper;
pub mod registry;
mod scalars;
mod sink;
mod stream;
mod traits;
mod warning;

pub use dispatch::{
    dump_object, dump_scalar, parse_object, parse_object_list, parse_scalar, parse_scalar_list,
    sink_unknown_field,
};
pub use error::BindError;
pub use field_dumper::FieldDumper;
pub use sink::{sink_from_event, sink_value};
pub use stream::EventSource;
pub use traits::{FieldOutcome, JsonObject, JsonScalar};
pub use warning::{ignore_warnings, BinderWarning};

pub use json_parser::{Error, ErrorCode, Event, EventKind, LexerParser, SourceLocation, Token};
