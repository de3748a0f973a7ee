use std::io::{self, Write};

use json_emit::Emitter;
use json_emit::escape;
use json_parser::{Error, ErrorCode, Event, EventKind};

use crate::field_dumper::FieldDumper;
use crate::sink::sink_from_event;
use crate::stream::EventSource;
use crate::traits::{FieldOutcome, JsonObject, JsonScalar};
use crate::warning::BinderWarning;

fn decode_key(token: json_lexer::Token) -> String {
    escape::decode(&token.spelling[1..token.spelling.len() - 1])
}

/// spec §4.7 dispatch, scalar case: pull one event expected to be
/// `value-literal` and hand its token to `T::parse_token`. A shape or
/// value mismatch is recoverable: the value is sunk, a
/// [`BinderWarning`] is raised, and `T::default()` is substituted so the
/// enclosing parse continues — see spec §7's "type mismatch... produces a
/// warning and the value is sunk".
pub fn parse_scalar<'a, T: JsonScalar + Default>(
    stream: &mut dyn EventSource<'a>,
    warn: &mut dyn FnMut(BinderWarning),
) -> Result<T, Error> {
    let event = stream.next_event()?;
    parse_scalar_from_event(event, stream, warn)
}

fn parse_scalar_from_event<'a, T: JsonScalar + Default>(
    event: Event<'a>,
    stream: &mut dyn EventSource<'a>,
    warn: &mut dyn FnMut(BinderWarning),
) -> Result<T, Error> {
    if event.kind != EventKind::ValueLiteral {
        warn(BinderWarning::TypeMismatch {
            expected: "scalar",
            location: event.token.location,
        });
        sink_from_event(stream, event)?;
        return Ok(T::default());
    }
    match T::parse_token(event.token) {
        Ok(value) => Ok(value),
        Err(e) => {
            warn(BinderWarning::InvalidScalar {
                reason: e.0,
                location: event.token.location,
            });
            Ok(T::default())
        }
    }
}

/// spec §4.7 dispatch, object case: pull one event expected to be
/// `object-begin`, then loop pulling `object-key`/`object-end` events,
/// routing each key to `T::parse_field` until the object closes.
pub fn parse_object<'a, T: JsonObject>(
    stream: &mut dyn EventSource<'a>,
    warn: &mut dyn FnMut(BinderWarning),
) -> Result<T, Error> {
    let event = stream.next_event()?;
    parse_object_from_event(event, stream, warn)
}

fn parse_object_from_event<'a, T: JsonObject>(
    event: Event<'a>,
    stream: &mut dyn EventSource<'a>,
    warn: &mut dyn FnMut(BinderWarning),
) -> Result<T, Error> {
    if event.kind != EventKind::ObjectBegin {
        warn(BinderWarning::TypeMismatch {
            expected: "object",
            location: event.token.location,
        });
        sink_from_event(stream, event)?;
        return Ok(T::default());
    }

    let mut out = T::default();
    loop {
        let event = stream.next_event()?;
        match event.kind {
            EventKind::ObjectEnd => return Ok(out),
            EventKind::ObjectKey => {
                let key = decode_key(event.token);
                match out.parse_field(&key, event.token.location, stream, warn)? {
                    FieldOutcome::Handled | FieldOutcome::UnknownKeySunk => {}
                }
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

/// Routes an unknown field name to [`crate::sink_value`], raises
/// [`BinderWarning::UnknownKey`], and reports
/// [`FieldOutcome::UnknownKeySunk`] — the fallback arm a `JsonObject`
/// impl's `parse_field` match should route to for every key it doesn't
/// recognize.
pub fn sink_unknown_field<'a>(
    key: &str,
    key_location: json_lexer::SourceLocation,
    stream: &mut dyn EventSource<'a>,
    warn: &mut dyn FnMut(BinderWarning),
) -> Result<FieldOutcome, Error> {
    warn(BinderWarning::UnknownKey {
        key: key.to_string(),
        location: key_location,
    });
    crate::sink_value(stream)?;
    Ok(FieldOutcome::UnknownKeySunk)
}

/// spec §4.7's "fixed-length T-array" case, generalized to a dynamic
/// `Vec<T>`: expects `list-begin`, then repeatedly parses an element until
/// `list-end`. Each element mismatch is handled the same recoverable way
/// as [`parse_object`]/[`parse_scalar`] — it doesn't abort the list.
pub fn parse_object_list<'a, T: JsonObject>(
    stream: &mut dyn EventSource<'a>,
    warn: &mut dyn FnMut(BinderWarning),
) -> Result<Vec<T>, Error> {
    let begin = stream.next_event()?;
    if begin.kind != EventKind::ListBegin {
        warn(BinderWarning::TypeMismatch {
            expected: "list",
            location: begin.token.location,
        });
        sink_from_event(stream, begin)?;
        return Ok(Vec::new());
    }
    let mut out = Vec::new();
    loop {
        let event = stream.next_event()?;
        if event.kind == EventKind::ListEnd {
            return Ok(out);
        }
        out.push(parse_object_from_event(event, stream, warn)?);
    }
}

pub fn parse_scalar_list<'a, T: JsonScalar + Default>(
    stream: &mut dyn EventSource<'a>,
    warn: &mut dyn FnMut(BinderWarning),
) -> Result<Vec<T>, Error> {
    let begin = stream.next_event()?;
    if begin.kind != EventKind::ListBegin {
        warn(BinderWarning::TypeMismatch {
            expected: "list",
            location: begin.token.location,
        });
        sink_from_event(stream, begin)?;
        return Ok(Vec::new());
    }
    let mut out = Vec::new();
    loop {
        let event = stream.next_event()?;
        if event.kind == EventKind::ListEnd {
            return Ok(out);
        }
        out.push(parse_scalar_from_event(event, stream, warn)?);
    }
}

/// spec §4.7 emission, object case: `object-begin`, `dump_fields`,
/// `object-end`. Empty (no fields actually written) collapses to the
/// compact `{}` spelling the Emitter uses for empty containers elsewhere.
pub fn dump_object<T: JsonObject, W: Write>(value: &T, emitter: &mut Emitter<W>) -> io::Result<()> {
    let mut dumper = FieldDumper::new(emitter)?;
    value.dump_fields(&mut dumper)?;
    dumper.finish()
}

/// spec §4.7 emission, scalar case: invoke the scalar dumper directly.
pub fn dump_scalar<T: JsonScalar, W: Write>(value: &T, emitter: &mut Emitter<W>) -> io::Result<()> {
    value.dump_scalar(emitter)
}
