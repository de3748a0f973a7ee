//! Encode/decode JSON string-literal escapes.
//!
//! The lookup table and escaping approach are adapted from
//! `keyless_json::string`'s `write_escaped_str_contents`, which only
//! encodes; the decoder is new, written in the same table-driven style.
use std::io::{self, Write};

const BB: u8 = b'b';
const TT: u8 = b't';
const NN: u8 = b'n';
const FF: u8 = b'f';
const RR: u8 = b'r';
const QU: u8 = b'"';
const BS: u8 = b'\\';
const UU: u8 = b'u';
const __: u8 = 0;

/// A value of `b'x'` at index `i` means byte `i` is escaped as `"\x"`. `0`
/// means byte `i` passes through unescaped.
static ESCAPE: [u8; 256] = [
    //   0   1   2   3   4   5   6   7   8   9   A   B   C   D   E   F
    UU, UU, UU, UU, UU, UU, UU, UU, BB, TT, NN, UU, FF, RR, UU, UU, // 0
    UU, UU, UU, UU, UU, UU, UU, UU, UU, UU, UU, UU, UU, UU, UU, UU, // 1
    __, __, QU, __, __, __, __, __, __, __, __, __, __, __, __, __, // 2
    __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // 3
    __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // 4
    __, __, __, __, __, __, __, __, __, __, __, __, BS, __, __, __, // 5
    __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // 6
    __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // 7
    __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // 8
    __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // 9
    __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // A
    __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // B
    __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // C
    __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // D
    __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // E
    __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // F
];

static HEX_DIGITS: [u8; 16] = *b"0123456789abcdef";

/// Writes `value`'s contents escaped per spec §6, *without* the surrounding
/// quotes (callers that want a full JSON string literal add those).
pub fn write_escaped<W: ?Sized + Write>(writer: &mut W, value: &str) -> io::Result<()> {
    let bytes = value.as_bytes();
    let mut start = 0;

    for (i, &byte) in bytes.iter().enumerate() {
        let escape = ESCAPE[byte as usize];
        if escape == 0 {
            continue;
        }
        if start < i {
            writer.write_all(&bytes[start..i])?;
        }
        match escape {
            BB => writer.write_all(b"\\b")?,
            TT => writer.write_all(b"\\t")?,
            NN => writer.write_all(b"\\n")?,
            FF => writer.write_all(b"\\f")?,
            RR => writer.write_all(b"\\r")?,
            QU => writer.write_all(b"\\\"")?,
            BS => writer.write_all(b"\\\\")?,
            UU => {
                let hex = [
                    b'\\',
                    b'u',
                    b'0',
                    b'0',
                    HEX_DIGITS[(byte >> 4) as usize],
                    HEX_DIGITS[(byte & 0xF) as usize],
                ];
                writer.write_all(&hex)?;
            }
            _ => unreachable!(),
        }
        start = i + 1;
    }

    if start < bytes.len() {
        writer.write_all(&bytes[start..])?;
    }
    Ok(())
}

/// Encodes `value` to an owned `String`, without surrounding quotes.
pub fn encode(value: &str) -> String {
    let mut out = Vec::with_capacity(value.len());
    write_escaped(&mut out, value).expect("writing to a Vec<u8> never fails");
    String::from_utf8(out).expect("escaping never produces invalid UTF-8")
}

/// Decodes a string that may contain the escapes [`write_escaped`] produces.
/// `\uXXXX` decodes to a single byte equal to the low byte of the hex value
/// (surrogate pairs are out of scope, per spec §1).
pub fn decode(value: &str) -> String {
    let bytes = value.as_bytes();
    let mut out = String::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] != b'\\' {
            // Copy the run of plain bytes up to (not including) the next
            // backslash in one slice, preserving multi-byte UTF-8 chars
            // instead of reinterpreting each byte on its own.
            let run_start = i;
            while i < bytes.len() && bytes[i] != b'\\' {
                i += 1;
            }
            out.push_str(&value[run_start..i]);
            continue;
        }
        if i + 1 >= bytes.len() {
            // Trailing lone backslash with nothing to escape; pass it through.
            out.push('\\');
            i += 1;
            continue;
        }
        match bytes[i + 1] {
            b'"' => {
                out.push('"');
                i += 2;
            }
            b'\\' => {
                out.push('\\');
                i += 2;
            }
            b'/' => {
                out.push('/');
                i += 2;
            }
            b'b' => {
                out.push('\u{8}');
                i += 2;
            }
            b'f' => {
                out.push('\u{C}');
                i += 2;
            }
            b'n' => {
                out.push('\n');
                i += 2;
            }
            b'r' => {
                out.push('\r');
                i += 2;
            }
            b't' => {
                out.push('\t');
                i += 2;
            }
            b'u' if i + 6 <= bytes.len() => {
                let hex = std::str::from_utf8(&bytes[i + 2..i + 6]).unwrap_or("0000");
                let code = u32::from_str_radix(hex, 16).unwrap_or(0);
                out.push((code & 0xFF) as u8 as char);
                i += 6;
            }
            other => {
                out.push(other as char);
                i += 2;
            }
        }
    }
    out
}
