//! Streaming tokenizer for the grammar `json_parser` builds events from:
//! JSON per RFC 8259, extended with optional `//` and `#` line comments.
//!
//! Tokens are non-owning views (`&'a str`) into the caller's source buffer
//! and never allocate; see [`Scanner`].

mod error;
mod location;
mod scanner;
mod token;

pub use error::{Error, ErrorCode, Result};
pub use location::SourceLocation;
pub use scanner::{Scanner, ScannerOptions, SizeHints};
pub use token::{Punctuation, Token, TokenKind};
