use json_parser::{Error, ErrorCode, Event, EventKind};

use crate::stream::EventSource;

/// Consumes exactly one complete value from `stream`, recursively, per spec
/// §4.7.1. This is how the binder skips an unknown field or a
/// shape-mismatched value without aborting the enclosing parse.
pub fn sink_value<'a>(stream: &mut dyn EventSource<'a>) -> Result<(), Error> {
    let event = stream.next_event()?;
    sink_from_event(stream, event)
}

/// Same as [`sink_value`], but starting from an event already pulled off
/// the stream (the common case: a dispatcher peeked ahead to decide shape,
/// then needs to sink what it saw instead of the *next* thing).
pub fn sink_from_event<'a>(stream: &mut dyn EventSource<'a>, event: Event<'a>) -> Result<(), Error> {
    match event.kind {
        EventKind::ValueLiteral => Ok(()),
        EventKind::ObjectBegin => loop {
            let next = stream.next_event()?;
            match next.kind {
                EventKind::ObjectEnd => return Ok(()),
                EventKind::ObjectKey => {
                    let value_event = stream.next_event()?;
                    sink_from_event(stream, value_event)?;
                }
                _ => {
                    return Err(Error::new(
                        ErrorCode::InternalError,
                        next.token.location,
                        "expected an object key or closing brace while sinking",
                    ))
                }
            }
        },
        EventKind::ListBegin => loop {
            let next = stream.next_event()?;
            if next.kind == EventKind::ListEnd {
                return Ok(());
            }
            sink_from_event(stream, next)?;
        },
        EventKind::ObjectEnd | EventKind::ListEnd | EventKind::Invalid => Err(Error::new(
            ErrorCode::InternalError,
            event.token.location,
            "sink_value called with an event that cannot start a value",
        )),
    }
}
