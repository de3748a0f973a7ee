use json_lexer::Token;

/// The Parser's output alphabet. Whitespace, comments, colons and commas are
/// absorbed by [`crate::Parser`] without ever reaching this type.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EventKind {
    ObjectBegin,
    ObjectKey,
    ObjectEnd,
    ListBegin,
    ListEnd,
    ValueLiteral,
    /// Reserved tombstone kind, analogous to a placeholder `Start` event in
    /// a marker-based tree builder. The transition table in this crate never
    /// produces it; it exists so downstream consumers (e.g. a future
    /// node-wrapping pass) have a designated "nothing here yet" marker to
    /// overwrite, matching spec's Event kind set.
    Invalid,
}

/// `{ kind, token }`: a semantic action plus the token that produced it.
/// `ObjectEnd`/`ListEnd` carry the closing-bracket token; `ObjectBegin`/
/// `ListBegin` carry the opening-bracket token; `ObjectKey`/`ValueLiteral`
/// carry the key/value token itself.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Event<'a> {
    pub kind: EventKind,
    pub token: Token<'a>,
}

impl<'a> Event<'a> {
    pub(crate) fn new(kind: EventKind, token: Token<'a>) -> Self {
        Self { kind, token }
    }
}
