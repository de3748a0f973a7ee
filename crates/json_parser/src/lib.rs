//! Token → semantic event translation: a pushdown automaton ([`Parser`])
//! over a group stack, and a fused scanner+parser front end
//! ([`LexerParser`]) that drives it to produce an [`Event`] stream.

mod event;
mod lexer_parser;
mod parser;
mod state;

pub use event::{Event, EventKind};
pub use json_lexer::{Error, ErrorCode, Result, SourceLocation, Token, TokenKind};
pub use lexer_parser::LexerParser;
pub use parser::Parser;
pub use state::{GroupKind, ParserState};
