use std::io::{self, Write};

use crate::escape::write_escaped;
use crate::options::EmitOptions;
use crate::printer::BufPrinter;

/// Writes "begin/end/key/value" output for a container/primitive walk that
/// the caller drives (e.g. `json_value::Variant`'s own recursive writer, or
/// `json_binder`'s `dump_fields` loop). `Emitter` owns indentation depth and
/// separator bookkeeping; it does not know the shape of the value being
/// serialized.
pub struct Emitter<W> {
    printer: BufPrinter<W>,
    options: EmitOptions,
    depth: u32,
}

impl<W: Write> Emitter<W> {
    pub fn new(writer: W, options: EmitOptions) -> Self {
        Self {
            printer: BufPrinter::new(writer),
            options,
            depth: 0,
        }
    }

    pub fn bytes_written(&self) -> usize {
        self.printer.bytes_written()
    }

    pub fn into_inner(self) -> W {
        self.printer.into_inner()
    }

    fn write_indent(&mut self) -> io::Result<()> {
        if self.options.indent == 0 {
            return Ok(());
        }
        self.printer.write_all(b"\n")?;
        for _ in 0..(self.options.indent * self.depth) {
            self.printer.write_all(b" ")?;
        }
        Ok(())
    }

    /// Call once, before the first item/field, if the container is
    /// non-empty (if empty, skip straight to `end_object`/`end_list`).
    pub fn begin_object(&mut self) -> io::Result<()> {
        self.printer.write_all(b"{")?;
        self.depth += 1;
        Ok(())
    }

    pub fn begin_list(&mut self) -> io::Result<()> {
        self.printer.write_all(b"[")?;
        self.depth += 1;
        Ok(())
    }

    pub fn end_object(&mut self, had_items: bool) -> io::Result<()> {
        self.depth -= 1;
        if had_items {
            self.write_indent()?;
        }
        self.printer.write_all(b"}")
    }

    pub fn end_list(&mut self, had_items: bool) -> io::Result<()> {
        self.depth -= 1;
        if had_items {
            self.write_indent()?;
        }
        self.printer.write_all(b"]")
    }

    /// Call before every item in a container, passing whether it's the
    /// first one. Writes `sep_item` (if not first) followed by
    /// indentation (if `indent > 0`).
    pub fn item_prefix(&mut self, is_first: bool) -> io::Result<()> {
        if !is_first {
            self.printer.write_all(self.options.sep_item.as_bytes())?;
        }
        self.write_indent()
    }

    pub fn write_key(&mut self, key: &str) -> io::Result<()> {
        self.write_string(key)?;
        self.printer.write_all(self.options.sep_kv.as_bytes())
    }

    pub fn write_string(&mut self, value: &str) -> io::Result<()> {
        self.printer.write_all(b"\"")?;
        write_escaped(&mut self.printer, value)?;
        self.printer.write_all(b"\"")
    }

    pub fn write_int(&mut self, value: i64) -> io::Result<()> {
        let mut buf = itoa::Buffer::new();
        self.printer.write_all(buf.format(value).as_bytes())
    }

    pub fn write_real(&mut self, value: f64) -> io::Result<()> {
        let mut buf = ryu::Buffer::new();
        self.printer.write_all(buf.format(value).as_bytes())
    }

    pub fn write_bool(&mut self, value: bool) -> io::Result<()> {
        self.printer
            .write_all(if value { b"true" } else { b"false" })
    }

    pub fn write_null(&mut self) -> io::Result<()> {
        self.printer.write_all(b"null")
    }

    pub fn write_empty_object(&mut self) -> io::Result<()> {
        self.printer.write_all(b"{}")
    }

    pub fn write_empty_list(&mut self) -> io::Result<()> {
        self.printer.write_all(b"[]")
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn compact_object_matches_spec_separators() {
        let mut emitter = Emitter::new(Vec::new(), EmitOptions::compact());
        emitter.begin_object().unwrap();
        emitter.item_prefix(true).unwrap();
        emitter.write_key("a").unwrap();
        emitter.write_int(1).unwrap();
        emitter.item_prefix(false).unwrap();
        emitter.write_key("b").unwrap();
        emitter.write_bool(true).unwrap();
        emitter.end_object(true).unwrap();
        let out = String::from_utf8(emitter.into_inner()).unwrap();
        assert_eq!(out, r#"{"a":1,"b":true}"#);
    }

    #[test]
    fn empty_containers_stay_on_one_line() {
        let mut emitter = Emitter::new(Vec::new(), EmitOptions::default());
        emitter.write_empty_object().unwrap();
        emitter.write_empty_list().unwrap();
        let out = String::from_utf8(emitter.into_inner()).unwrap();
        assert_eq!(out, "{}[]");
    }

    #[test]
    fn indented_object_uses_newlines_and_depth_spacing() {
        let mut emitter = Emitter::new(Vec::new(), EmitOptions::default().with_indent(2));
        emitter.begin_object().unwrap();
        emitter.item_prefix(true).unwrap();
        emitter.write_key("x").unwrap();
        emitter.write_int(1).unwrap();
        emitter.end_object(true).unwrap();
        let out = String::from_utf8(emitter.into_inner()).unwrap();
        assert_eq!(out, "{\n  \"x\": 1\n}");
    }

    #[test]
    fn counting_pass_matches_real_write_length() {
        let options = EmitOptions::compact();
        let mut counter = Emitter::new(io::sink(), options.clone());
        counter.begin_object().unwrap();
        counter.item_prefix(true).unwrap();
        counter.write_key("hello").unwrap();
        counter.write_string("world").unwrap();
        counter.end_object(true).unwrap();
        let counted = counter.bytes_written();

        let mut real = Emitter::new(Vec::new(), options);
        real.begin_object().unwrap();
        real.item_prefix(true).unwrap();
        real.write_key("hello").unwrap();
        real.write_string("world").unwrap();
        real.end_object(true).unwrap();
        assert_eq!(real.into_inner().len(), counted);
    }
}
