use std::io::{self, Write};

use json_emit::{counting_printer, EmitOptions, Emitter};

use crate::Variant;

impl Variant {
    /// Serializes `self` to a `String` using `options`, via the two-pass
    /// "size then write" scheme from spec §4.6: a first pass over
    /// `io::sink()` establishes the exact byte count, then a second pass
    /// writes into a buffer allocated to that size exactly once.
    pub fn dump(&self, options: &EmitOptions) -> String {
        let mut counter = Emitter::new(counting_printer(), options.clone());
        self.write_to(&mut counter)
            .expect("writing to io::sink() never fails");
        let size = counter.bytes_written();

        let mut writer = Emitter::new(Vec::with_capacity(size), options.clone());
        self.write_to(&mut writer)
            .expect("writing to a Vec<u8> never fails");
        String::from_utf8(writer.into_inner()).expect("emitter only ever writes valid UTF-8")
    }

    /// Drives `emitter` through this value's shape. `Invalid` (a
    /// default-constructed value that was never assigned) has no JSON
    /// representation of its own and serializes as `null`, the same as an
    /// explicit `Null` — there is no "undefined" in JSON.
    pub fn write_to<W: Write>(&self, emitter: &mut Emitter<W>) -> io::Result<()> {
        match self {
            Variant::Invalid | Variant::Null => emitter.write_null(),
            Variant::Bool(b) => emitter.write_bool(*b),
            Variant::Integer(i) => emitter.write_int(*i),
            Variant::Real(r) => emitter.write_real(*r),
            Variant::String(s) => emitter.write_string(s),
            Variant::List(items) => {
                if items.is_empty() {
                    return emitter.write_empty_list();
                }
                emitter.begin_list()?;
                for (i, item) in items.iter().enumerate() {
                    emitter.item_prefix(i == 0)?;
                    item.write_to(emitter)?;
                }
                emitter.end_list(true)
            }
            Variant::Object(pairs) => {
                if pairs.is_empty() {
                    return emitter.write_empty_object();
                }
                emitter.begin_object()?;
                for (i, (key, value)) in pairs.iter().enumerate() {
                    emitter.item_prefix(i == 0)?;
                    emitter.write_key(key)?;
                    value.write_to(emitter)?;
                }
                emitter.end_object(true)
            }
        }
    }
}
