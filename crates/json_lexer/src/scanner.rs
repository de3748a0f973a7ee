use crate::error::{Error, ErrorCode, Result};
use crate::location::SourceLocation;
use crate::token::{Punctuation, Token, TokenKind};

/// Build-time-ish configuration for which non-RFC-8259 extensions the
/// scanner recognizes. Unlike the source this was distilled from (where this
/// was a compile-time choice), this is a runtime flag — there is no reason
/// in Rust to force a rebuild to get strict RFC-8259 lexing.
#[derive(Clone, Copy, Debug)]
pub struct ScannerOptions {
    /// Recognize `//...\n` and `#...\n` line comments. When `false`, a `/`
    /// or `#` byte at a token boundary is lexed as `LEX_INVALID_TOKEN`
    /// instead.
    pub allow_line_comments: bool,
}

impl Default for ScannerOptions {
    fn default() -> Self {
        Self {
            allow_line_comments: true,
        }
    }
}

/// Advisory sizing hints accumulated while scanning, for callers sizing a
/// [`json_tree::DocumentTree`] arena ahead of time. Not authoritative.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SizeHints {
    /// Bytes needed to hold all numeric tokens seen so far, assuming 64-bit
    /// aligned storage per value.
    pub numeric_bytes: usize,
    /// Bytes needed to hold all string tokens seen so far, including a
    /// terminator per string.
    pub string_bytes: usize,
}

/// A byte-slice tokenizer. Constructed "uninitialized"; call [`Scanner::init`]
/// then [`Scanner::begin`] before pumping tokens (or just call `begin`, which
/// implies `init`).
pub struct Scanner<'a> {
    source: &'a str,
    cursor: usize,
    location: SourceLocation,
    options: ScannerOptions,
    hints: SizeHints,
    initialized: bool,
}

impl<'a> Scanner<'a> {
    /// Constructs a scanner in the uninitialized state, bound to no input.
    pub fn new(options: ScannerOptions) -> Self {
        Self {
            source: "",
            cursor: 0,
            location: SourceLocation::start(),
            options,
            hints: SizeHints::default(),
            initialized: false,
        }
    }

    /// Idempotent. Kept for API parity with the two-phase
    /// uninitialized-then-bound lifecycle the spec describes; there is no
    /// pattern-match set to precompile here since the grammar is fixed.
    pub fn init(&mut self) {
        self.initialized = true;
    }

    /// (Re)binds the scanner to `source`, resetting location and hints.
    pub fn begin(&mut self, source: &'a str) {
        self.init();
        self.source = source;
        self.cursor = 0;
        self.location = SourceLocation::start();
        self.hints = SizeHints::default();
    }

    pub fn location(&self) -> SourceLocation {
        self.location
    }

    pub fn hints(&self) -> SizeHints {
        self.hints
    }

    pub fn is_at_end(&self) -> bool {
        self.cursor >= self.source.len()
    }

    fn remaining(&self) -> &'a str {
        &self.source[self.cursor..]
    }

    /// Matches the next token without consuming input. Returns the matched
    /// kind and its byte length within `remaining()`.
    fn match_next(&self) -> Result<(TokenKind, usize)> {
        let rest = self.remaining();
        if rest.is_empty() {
            return Err(Error::input_finished(self.location));
        }
        let bytes = rest.as_bytes();
        let first = bytes[0];

        if let Some(p) = Punctuation::from_byte(first) {
            return Ok((TokenKind::Punctuation(p), 1));
        }

        let matched = match first {
            b'"' => match_string_literal(bytes),
            b'-' | b'0'..=b'9' => match_numeric_literal(bytes),
            b't' => match_literal(bytes, "true").map(|len| (TokenKind::BooleanLiteral, len)),
            b'f' => match_literal(bytes, "false").map(|len| (TokenKind::BooleanLiteral, len)),
            b'n' => match_literal(bytes, "null").map(|len| (TokenKind::NullLiteral, len)),
            b' ' | b'\t' | b'\n' | b'\r' | 0x0B | 0x0C => Some((
                TokenKind::Whitespace,
                bytes
                    .iter()
                    .take_while(|b| matches!(b, b' ' | b'\t' | b'\n' | b'\r' | 0x0B | 0x0C))
                    .count(),
            )),
            b'/' if self.options.allow_line_comments => match_line_comment(bytes, b'/'),
            b'#' if self.options.allow_line_comments => match_line_comment(bytes, b'#'),
            _ => None,
        };

        matched.ok_or_else(|| Error::invalid_token(self.location))
    }

    /// Matches the next token, advances the cursor and location past it, and
    /// records size hints.
    pub fn pump(&mut self) -> Result<Token<'a>> {
        let (kind, len) = self.match_next()?;
        let start_location = self.location;
        let spelling = &self.remaining()[..len];

        match kind {
            TokenKind::NumericLiteral => self.hints.numeric_bytes += 8,
            TokenKind::StringLiteral => self.hints.string_bytes += spelling.len() + 1,
            _ => {}
        }

        self.location.advance_past(spelling);
        self.cursor += len;
        Ok(Token::new(kind, spelling, start_location))
    }

    /// Matches the next token without advancing the cursor. Implemented as
    /// `pump` followed by a rewind, so size hints are *not* double counted
    /// when the same token is later pumped for real.
    pub fn peek(&mut self) -> Result<Token<'a>> {
        let saved_cursor = self.cursor;
        let saved_location = self.location;
        let saved_hints = self.hints;
        let token = self.pump()?;
        self.cursor = saved_cursor;
        self.location = saved_location;
        self.hints = saved_hints;
        Ok(token)
    }
}

fn match_literal(bytes: &[u8], literal: &str) -> Option<usize> {
    let literal_bytes = literal.as_bytes();
    if bytes.len() >= literal_bytes.len() && &bytes[..literal_bytes.len()] == literal_bytes {
        Some(literal_bytes.len())
    } else {
        None
    }
}

/// Scans a string literal's contents via `memchr2`, jumping straight to the
/// next `"` or `\` instead of testing every byte in between — the common
/// case of a long run of ordinary string bytes is a single SIMD-accelerated
/// scan rather than a per-byte match.
fn match_string_literal(bytes: &[u8]) -> Option<(TokenKind, usize)> {
    debug_assert_eq!(bytes[0], b'"');
    let mut i = 1;
    while i < bytes.len() {
        match memchr::memchr2(b'"', b'\\', &bytes[i..]) {
            Some(offset) if bytes[i + offset] == b'"' => {
                return Some((TokenKind::StringLiteral, i + offset + 1))
            }
            Some(offset) if i + offset + 1 < bytes.len() => i += offset + 2,
            _ => break,
        }
    }
    None
}

fn match_numeric_literal(bytes: &[u8]) -> Option<(TokenKind, usize)> {
    let mut i = 0;
    if bytes[i] == b'-' {
        i += 1;
    }
    let digits_start = i;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    if i == digits_start {
        return None;
    }

    if i < bytes.len() && bytes[i] == b'.' {
        let frac_digits_start = i + 1;
        let mut j = frac_digits_start;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        if j > frac_digits_start {
            i = j;
        }
    }

    if i < bytes.len() && (bytes[i] == b'e' || bytes[i] == b'E') {
        let mut j = i + 1;
        if j < bytes.len() && (bytes[j] == b'+' || bytes[j] == b'-') {
            j += 1;
        }
        let exp_digits_start = j;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        if j > exp_digits_start {
            i = j;
        }
    }

    Some((TokenKind::NumericLiteral, i))
}

fn match_line_comment(bytes: &[u8], marker: u8) -> Option<(TokenKind, usize)> {
    if marker == b'/' && (bytes.len() < 2 || bytes[1] != b'/') {
        return None;
    }
    memchr::memchr(b'\n', bytes).map(|newline_index| (TokenKind::Comment, newline_index + 1))
}

#[cfg(test)]
mod test {
    use super::*;

    fn tokens(src: &str) -> Vec<Token> {
        let mut scanner = Scanner::new(ScannerOptions::default());
        scanner.begin(src);
        let mut out = vec![];
        loop {
            match scanner.pump() {
                Ok(token) => out.push(token),
                Err(e) if e.code == ErrorCode::LexInputFinished => break,
                Err(e) => panic!("unexpected lex error: {:?}", e),
            }
        }
        out
    }

    #[test]
    fn scenario_2_tokenizes_object_with_exponent_number() {
        let src = r#"{"foo":12.34e+10}"#;
        let kinds: Vec<_> = tokens(src).into_iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::Punctuation(Punctuation::ObjectOpen),
                TokenKind::StringLiteral,
                TokenKind::Punctuation(Punctuation::Colon),
                TokenKind::NumericLiteral,
                TokenKind::Punctuation(Punctuation::ObjectClose),
            ]
        );
    }

    #[test]
    fn scenario_3_reports_invalid_token_location() {
        let src = "{\n\"foo\" : 1,\n\"bar\": 12.3.4}";
        let mut scanner = Scanner::new(ScannerOptions::default());
        scanner.begin(src);
        let mut last_err = None;
        loop {
            match scanner.pump() {
                Ok(_) => continue,
                Err(e) => {
                    last_err = Some(e);
                    break;
                }
            }
        }
        let err = last_err.unwrap();
        assert_eq!(err.code, ErrorCode::LexInvalidToken);
        assert_eq!(err.location.lineno, 2);
        assert_eq!(err.location.colno, 11);
        assert_eq!(err.location.offset, 24);
    }

    #[test]
    fn peek_does_not_advance() {
        let mut scanner = Scanner::new(ScannerOptions::default());
        scanner.begin("true false");
        let peeked = scanner.peek().unwrap();
        assert_eq!(peeked.spelling, "true");
        let pumped = scanner.pump().unwrap();
        assert_eq!(pumped.spelling, "true");
        let next = scanner.peek().unwrap();
        assert_eq!(next.spelling, " ");
    }

    #[test]
    fn line_comments_are_recognized_by_default() {
        let src = "// comment\n1";
        let kinds: Vec<_> = tokens(src).into_iter().map(|t| t.kind).collect();
        assert_eq!(kinds, vec![TokenKind::Comment, TokenKind::NumericLiteral]);
    }

    #[test]
    fn hash_comments_are_recognized() {
        let src = "#comment\nnull";
        let kinds: Vec<_> = tokens(src).into_iter().map(|t| t.kind).collect();
        assert_eq!(kinds, vec![TokenKind::Comment, TokenKind::NullLiteral]);
    }

    #[test]
    fn disabling_comments_rejects_them() {
        let mut scanner = Scanner::new(ScannerOptions {
            allow_line_comments: false,
        });
        scanner.begin("// nope\n");
        let err = scanner.pump().unwrap_err();
        assert_eq!(err.code, ErrorCode::LexInvalidToken);
    }

    #[test]
    fn disambiguates_integer_from_real() {
        let mut scanner = Scanner::new(ScannerOptions::default());
        scanner.begin("-12 3.0 4e1");
        let a = scanner.pump().unwrap();
        assert_eq!(a.spelling, "-12");
        scanner.pump().unwrap(); // whitespace
        let b = scanner.pump().unwrap();
        assert_eq!(b.spelling, "3.0");
        scanner.pump().unwrap(); // whitespace
        let c = scanner.pump().unwrap();
        assert_eq!(c.spelling, "4e1");
    }

    #[test]
    fn size_hints_accumulate() {
        let mut scanner = Scanner::new(ScannerOptions::default());
        scanner.begin(r#"{"a": 1, "bb": 2.5}"#);
        loop {
            match scanner.pump() {
                Ok(_) => continue,
                Err(_) => break,
            }
        }
        let hints = scanner.hints();
        assert_eq!(hints.numeric_bytes, 16);
        assert!(hints.string_bytes > 0);
    }
}
