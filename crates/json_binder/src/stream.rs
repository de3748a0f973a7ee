use json_parser::{Error, Event, LexerParser};

/// The event source a [`crate::JsonObject`]/[`crate::JsonScalar`] impl's
/// `parse_field`/`parse_token` pulls from. Exists as a trait (rather than
/// taking `&mut LexerParser` directly) so the binder's dispatch functions
/// can be called as `&mut dyn EventSource` — the type-erased entry point
/// [`crate::registry`] needs, since its function-pointer table can't be
/// generic over a concrete lexer lifetime per call site.
pub trait EventSource<'a> {
    fn next_event(&mut self) -> Result<Event<'a>, Error>;
}

impl<'a> EventSource<'a> for LexerParser<'a> {
    fn next_event(&mut self) -> Result<Event<'a>, Error> {
        LexerParser::next_event(self)
    }
}

impl<'a, T: EventSource<'a> + ?Sized> EventSource<'a> for &mut T {
    fn next_event(&mut self) -> Result<Event<'a>, Error> {
        (**self).next_event()
    }
}
