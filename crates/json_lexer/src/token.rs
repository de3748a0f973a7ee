use crate::location::SourceLocation;

/// The lexical class of a [`Token`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TokenKind {
    StringLiteral,
    NumericLiteral,
    BooleanLiteral,
    NullLiteral,
    Whitespace,
    Punctuation(Punctuation),
    Comment,
}

/// The six single-character structural bytes the scanner special-cases
/// before falling back to the ordered pattern list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Punctuation {
    Colon,
    Comma,
    ObjectOpen,
    ObjectClose,
    ListOpen,
    ListClose,
}

impl Punctuation {
    pub(crate) fn from_byte(byte: u8) -> Option<Self> {
        Some(match byte {
            b':' => Self::Colon,
            b',' => Self::Comma,
            b'{' => Self::ObjectOpen,
            b'}' => Self::ObjectClose,
            b'[' => Self::ListOpen,
            b']' => Self::ListClose,
            _ => return None,
        })
    }
}

/// A single token: a lexical class, a non-owning view into the source
/// buffer, and the location that view starts at.
///
/// Tokens never allocate and never outlive the `&'a str` they borrow from.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub spelling: &'a str,
    pub location: SourceLocation,
}

impl<'a> Token<'a> {
    pub(crate) fn new(kind: TokenKind, spelling: &'a str, location: SourceLocation) -> Self {
        Self {
            kind,
            spelling,
            location,
        }
    }

    /// True for whitespace/comment tokens the [`crate::Parser`] absorbs
    /// without producing an event.
    pub fn is_trivia(&self) -> bool {
        matches!(self.kind, TokenKind::Whitespace | TokenKind::Comment)
    }
}
