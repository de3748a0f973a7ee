use json_lexer::{Error, ErrorCode, Scanner, ScannerOptions, SourceLocation};

use crate::event::Event;
use crate::parser::Parser;

/// Fuses a [`Scanner`] and [`Parser`] into a single event stream: call
/// [`LexerParser::next_event`] in a loop to drive a parse, or implement the
/// same loop with [`LexerParser::peek_event`] first to look ahead without
/// consuming.
pub struct LexerParser<'a> {
    scanner: Scanner<'a>,
    parser: Parser,
}

impl<'a> LexerParser<'a> {
    pub fn new(source: &'a str) -> Self {
        Self::with_options(source, ScannerOptions::default())
    }

    pub fn with_options(source: &'a str, options: ScannerOptions) -> Self {
        let mut scanner = Scanner::new(options);
        scanner.begin(source);
        Self {
            scanner,
            parser: Parser::new(),
        }
    }

    pub fn location(&self) -> SourceLocation {
        self.scanner.location()
    }

    pub fn is_ready_for_next_value(&self) -> bool {
        self.parser.is_ready_for_next_value()
    }

    /// Pumps tokens and feeds them to the parser until one produces an
    /// event, or the scanner reports input-finished (propagated to the
    /// caller as `Err` with `ErrorCode::LexInputFinished`, the normal
    /// terminal condition for a streaming consumer).
    pub fn next_event(&mut self) -> Result<Event<'a>, Error> {
        loop {
            let token = self.scanner.pump()?;
            if let Some(event) = self.parser.handle_token(token, false)? {
                return Ok(event);
            }
        }
    }

    /// Same loop as [`Self::next_event`], but the token that would produce
    /// the event is only `peek`ed, and fed to the parser in dry-run mode —
    /// so neither the scanner nor the parser advances past it. Any
    /// intermediate non-event-producing tokens (trivia) *are* consumed;
    /// that's the only way to skip them without losing the peek property
    /// for the next actionable token.
    pub fn peek_event(&mut self) -> Result<Event<'a>, Error> {
        loop {
            let token = self.scanner.peek()?;
            if let Some(event) = self.parser.handle_token(token, true)? {
                return Ok(event);
            }
            // That token was trivia; actually consume it for real before
            // looking at the next one.
            self.scanner.pump()?;
        }
    }
}

impl<'a> Iterator for LexerParser<'a> {
    type Item = Result<Event<'a>, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.next_event() {
            Ok(event) => Some(Ok(event)),
            Err(e) if e.code == ErrorCode::LexInputFinished => None,
            Err(e) => Some(Err(e)),
        }
    }
}
