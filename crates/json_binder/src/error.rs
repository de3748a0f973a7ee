use std::fmt;

/// A scalar token failed to convert to its target type (e.g. a string
/// literal where a number was expected, or a numeric literal out of an
/// enum's valid range). Carries no location: the caller always has one
/// already, from the [`json_parser::Token`] that produced it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct BindError(pub String);

impl BindError {
    pub fn new(message: impl fmt::Display) -> Self {
        Self(message.to_string())
    }
}
