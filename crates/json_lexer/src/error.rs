use thiserror::Error as ThisError;

use crate::location::SourceLocation;

/// The full error taxonomy shared by the scanner, the parser, the
/// document-tree builder and the typed binder.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorCode {
    /// An implementation invariant was violated; should be impossible in a
    /// released build.
    InternalError,
    /// The scanner's input is exhausted. A normal terminal condition for
    /// streaming consumers, an error for fixed-shape parsers expecting more.
    LexInputFinished,
    /// No pattern matched at the current position.
    LexInvalidToken,
    /// A valid token was encountered but is disallowed in the parser's
    /// current state.
    ParseUnexpectedToken,
    /// The document-tree arena's capacity was exceeded.
    ParseOom,
    /// A call was made after a prior fatal parse error; the instance is
    /// poisoned until the caller stops using it.
    ParseBadState,
}

impl ErrorCode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::InternalError => "INTERNAL_ERROR",
            Self::LexInputFinished => "LEX_INPUT_FINISHED",
            Self::LexInvalidToken => "LEX_INVALID_TOKEN",
            Self::ParseUnexpectedToken => "PARSE_UNEXPECTED_TOKEN",
            Self::ParseOom => "PARSE_OOM",
            Self::ParseBadState => "PARSE_BAD_STATE",
        }
    }
}

/// `{ code, location, message }` as spec'd in §3/§7 of the design.
#[derive(Clone, Debug, PartialEq, ThisError)]
#[error("{code:?} at line {}, col {}: {message}", location.lineno, location.colno)]
pub struct Error {
    pub code: ErrorCode,
    pub location: SourceLocation,
    pub message: String,
}

impl Error {
    pub fn new(code: ErrorCode, location: SourceLocation, message: impl Into<String>) -> Self {
        Self {
            code,
            location,
            message: message.into(),
        }
    }

    pub fn input_finished(location: SourceLocation) -> Self {
        Self::new(ErrorCode::LexInputFinished, location, "input exhausted")
    }

    pub fn invalid_token(location: SourceLocation) -> Self {
        Self::new(
            ErrorCode::LexInvalidToken,
            location,
            "no pattern matched at this position",
        )
    }
}

pub type Result<T> = core::result::Result<T, Error>;
