use json_lexer::SourceLocation;

/// A recoverable binder failure, per spec §4.7/§7: unknown keys and shape
/// mismatches never abort the enclosing parse. The offending value is sunk
/// (parse) or written as `null` (dump) and a `BinderWarning` is handed to
/// the caller-supplied `&mut dyn FnMut(BinderWarning)` sink so it can log,
/// collect, or ignore them — the same "caller owns the sink" shape spec §6
/// uses for errors.
#[derive(Debug, Clone, PartialEq)]
pub enum BinderWarning {
    /// An object field name had no match in the type's `parse_field`
    /// dispatch. The value that followed it was sunk.
    UnknownKey {
        key: String,
        location: SourceLocation,
    },
    /// The next event's shape didn't match what the registered type
    /// expected (e.g. a list where an object was registered). The value
    /// was sunk (parse) or a default substituted.
    TypeMismatch {
        expected: &'static str,
        location: SourceLocation,
    },
    /// A scalar token matched the expected shape but failed to convert
    /// (e.g. an out-of-range enum discriminant).
    InvalidScalar {
        reason: String,
        location: SourceLocation,
    },
    /// No registry entry exists for the type a runtime (`TypeId`-keyed)
    /// lookup was asked to parse or dump.
    UnregisteredType { type_name: &'static str },
}

/// A no-op warning sink, for callers that don't care about recoverable
/// issues and just want the best-effort result.
pub fn ignore_warnings(_warning: BinderWarning) {}
