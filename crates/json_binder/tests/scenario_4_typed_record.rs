//! spec §8 scenario 4: a registered record type with fields that keep
//! their struct defaults when the source omits them, and sink+warn on an
//! object field it doesn't recognize.

use std::io;

use json_binder::{
    parse_object, BinderWarning, Error, EventSource, FieldDumper, FieldOutcome, JsonObject,
    LexerParser, SourceLocation,
};

#[derive(Debug, Clone, PartialEq)]
struct Foo {
    a: i64,
    b: f64,
    e: f64,
    f: i64,
}

impl Default for Foo {
    fn default() -> Self {
        Self {
            a: 0,
            b: 3.14,
            e: 0.0,
            f: 3,
        }
    }
}

impl JsonObject for Foo {
    fn parse_field<'a>(
        &mut self,
        key: &str,
        key_location: SourceLocation,
        stream: &mut dyn EventSource<'a>,
        warn: &mut dyn FnMut(BinderWarning),
    ) -> Result<FieldOutcome, Error> {
        const A: u64 = json_hash::hash_key(b"a");
        const B: u64 = json_hash::hash_key(b"b");
        const E: u64 = json_hash::hash_key(b"e");
        const F: u64 = json_hash::hash_key(b"f");
        match json_hash::hash_key(key.as_bytes()) {
            A => {
                self.a = json_binder::parse_scalar(stream, warn)?;
                Ok(FieldOutcome::Handled)
            }
            B => {
                self.b = json_binder::parse_scalar(stream, warn)?;
                Ok(FieldOutcome::Handled)
            }
            E => {
                self.e = json_binder::parse_scalar(stream, warn)?;
                Ok(FieldOutcome::Handled)
            }
            F => {
                self.f = json_binder::parse_scalar(stream, warn)?;
                Ok(FieldOutcome::Handled)
            }
            _ => json_binder::sink_unknown_field(key, key_location, stream, warn),
        }
    }

    fn dump_fields<W: io::Write>(&self, dumper: &mut FieldDumper<'_, W>) -> io::Result<()> {
        dumper.dump_scalar_field("a", &self.a)?;
        dumper.dump_scalar_field("b", &self.b)?;
        dumper.dump_scalar_field("e", &self.e)?;
        dumper.dump_scalar_field("f", &self.f)
    }
}

#[derive(Debug, Clone, PartialEq)]
struct Bar {
    c: i64,
    d: f64,
}

impl Default for Bar {
    fn default() -> Self {
        Self { c: 2, d: 0.0 }
    }
}

impl JsonObject for Bar {
    fn parse_field<'a>(
        &mut self,
        key: &str,
        key_location: SourceLocation,
        stream: &mut dyn EventSource<'a>,
        warn: &mut dyn FnMut(BinderWarning),
    ) -> Result<FieldOutcome, Error> {
        const C: u64 = json_hash::hash_key(b"c");
        const D: u64 = json_hash::hash_key(b"d");
        match json_hash::hash_key(key.as_bytes()) {
            C => {
                self.c = json_binder::parse_scalar(stream, warn)?;
                Ok(FieldOutcome::Handled)
            }
            D => {
                self.d = json_binder::parse_scalar(stream, warn)?;
                Ok(FieldOutcome::Handled)
            }
            _ => json_binder::sink_unknown_field(key, key_location, stream, warn),
        }
    }

    fn dump_fields<W: io::Write>(&self, dumper: &mut FieldDumper<'_, W>) -> io::Result<()> {
        dumper.dump_scalar_field("c", &self.c)?;
        dumper.dump_scalar_field("d", &self.d)
    }
}

#[derive(Debug, Clone, PartialEq)]
struct Boz {
    a: i64,
    b: f64,
}

impl Default for Boz {
    fn default() -> Self {
        Self { a: 1, b: 1.0 }
    }
}

impl JsonObject for Boz {
    fn parse_field<'a>(
        &mut self,
        key: &str,
        key_location: SourceLocation,
        stream: &mut dyn EventSource<'a>,
        warn: &mut dyn FnMut(BinderWarning),
    ) -> Result<FieldOutcome, Error> {
        const A: u64 = json_hash::hash_key(b"a");
        const B: u64 = json_hash::hash_key(b"b");
        match json_hash::hash_key(key.as_bytes()) {
            A => {
                self.a = json_binder::parse_scalar(stream, warn)?;
                Ok(FieldOutcome::Handled)
            }
            B => {
                self.b = json_binder::parse_scalar(stream, warn)?;
                Ok(FieldOutcome::Handled)
            }
            _ => json_binder::sink_unknown_field(key, key_location, stream, warn),
        }
    }

    fn dump_fields<W: io::Write>(&self, dumper: &mut FieldDumper<'_, W>) -> io::Result<()> {
        dumper.dump_scalar_field("a", &self.a)?;
        dumper.dump_scalar_field("b", &self.b)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
struct TestA {
    foo: Foo,
    bar: Bar,
    boz: Vec<Boz>,
}

impl JsonObject for TestA {
    fn parse_field<'a>(
        &mut self,
        key: &str,
        key_location: SourceLocation,
        stream: &mut dyn EventSource<'a>,
        warn: &mut dyn FnMut(BinderWarning),
    ) -> Result<FieldOutcome, Error> {
        const FOO: u64 = json_hash::hash_key(b"foo");
        const BAR: u64 = json_hash::hash_key(b"bar");
        const BOZ: u64 = json_hash::hash_key(b"boz");
        match json_hash::hash_key(key.as_bytes()) {
            FOO => {
                self.foo = parse_object(stream, warn)?;
                Ok(FieldOutcome::Handled)
            }
            BAR => {
                self.bar = parse_object(stream, warn)?;
                Ok(FieldOutcome::Handled)
            }
            BOZ => {
                self.boz = json_binder::parse_object_list(stream, warn)?;
                Ok(FieldOutcome::Handled)
            }
            _ => json_binder::sink_unknown_field(key, key_location, stream, warn),
        }
    }

    fn dump_fields<W: io::Write>(&self, dumper: &mut FieldDumper<'_, W>) -> io::Result<()> {
        dumper.dump_object_field("foo", &self.foo)?;
        dumper.dump_object_field("bar", &self.bar)?;
        dumper.dump_object_list_field("boz", &self.boz)
    }
}

#[test]
fn scenario_4_unset_fields_keep_their_defaults() {
    let source = r#"{"foo":{"a":2,"e":42.0},"bar":{"d":6.1},"boz":[{"a":2,"b":3.0},{"b":1.0}]}"#;
    let mut lp = LexerParser::new(source);
    let mut warnings = vec![];
    let value: TestA = parse_object(&mut lp, &mut |w| warnings.push(w)).unwrap();

    assert_eq!(value.foo.a, 2);
    assert_eq!(value.foo.b, 3.14);
    assert_eq!(value.foo.e, 42.0);
    assert_eq!(value.foo.f, 3);
    assert_eq!(value.bar.c, 2);
    assert_eq!(value.bar.d, 6.1);
    assert_eq!(value.boz, vec![Boz { a: 2, b: 3.0 }, Boz { a: 1, b: 1.0 }]);
    assert!(warnings.is_empty());
}

#[test]
fn unknown_key_is_sunk_and_warned_about_but_parse_continues() {
    let source = r#"{"foo":{"a":1,"nope":{"deep":[1,2,3]}},"bar":{"c":5,"d":1.0},"boz":[]}"#;
    let mut lp = LexerParser::new(source);
    let mut warnings = vec![];
    let value: TestA = parse_object(&mut lp, &mut |w| warnings.push(w)).unwrap();

    assert_eq!(value.foo.a, 1);
    assert_eq!(value.bar.c, 5);
    assert_eq!(warnings.len(), 1);
    match &warnings[0] {
        BinderWarning::UnknownKey { key, .. } => assert_eq!(key, "nope"),
        other => panic!("expected an UnknownKey warning, got {other:?}"),
    }
}

#[test]
fn dump_then_parse_round_trips_every_shared_field() {
    let original = TestA {
        foo: Foo {
            a: 9,
            b: 1.5,
            e: 2.5,
            f: 7,
        },
        bar: Bar { c: 1, d: 2.0 },
        boz: vec![Boz { a: 1, b: 1.0 }, Boz { a: 2, b: 2.0 }],
    };

    let mut buf = Vec::new();
    {
        let mut emitter = json_emit::Emitter::new(&mut buf, json_emit::EmitOptions::compact());
        json_binder::dump_object(&original, &mut emitter).unwrap();
    }
    let dumped = String::from_utf8(buf).unwrap();

    let mut lp = LexerParser::new(&dumped);
    let reparsed: TestA = parse_object(&mut lp, &mut json_binder::ignore_warnings).unwrap();
    assert_eq!(original, reparsed);
}
