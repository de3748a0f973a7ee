use std::io::{self, Write};

use json_emit::Emitter;

use crate::traits::{JsonObject, JsonScalar};

/// The "dumper" spec §4.7's `dump_fields(value, dumper)` writes through:
/// owns the emitter for the duration of one object's fields and tracks
/// whether any field has been written yet, so the right `sep_item` and
/// indentation land between fields without `JsonObject::dump_fields`
/// having to track that bookkeeping itself.
///
/// Writes the opening `{` eagerly on construction (there's no cheap way to
/// know in advance whether a record has zero fields); [`Self::finish`]
/// closes it, collapsing to a bracket-only `{}` if nothing was ever
/// written.
pub struct FieldDumper<'e, W> {
    emitter: &'e mut Emitter<W>,
    wrote_any: bool,
}

impl<'e, W: Write> FieldDumper<'e, W> {
    pub(crate) fn new(emitter: &'e mut Emitter<W>) -> io::Result<Self> {
        emitter.begin_object()?;
        Ok(Self {
            emitter,
            wrote_any: false,
        })
    }

    pub(crate) fn finish(self) -> io::Result<()> {
        self.emitter.end_object(self.wrote_any)
    }

    fn prefix(&mut self, name: &str) -> io::Result<()> {
        self.emitter.item_prefix(!self.wrote_any)?;
        self.wrote_any = true;
        self.emitter.write_key(name)
    }

    pub fn dump_scalar_field<T: JsonScalar>(&mut self, name: &str, value: &T) -> io::Result<()> {
        self.prefix(name)?;
        value.dump_scalar(self.emitter)
    }

    pub fn dump_object_field<T: JsonObject>(&mut self, name: &str, value: &T) -> io::Result<()> {
        self.prefix(name)?;
        crate::dispatch::dump_object(value, self.emitter)
    }

    pub fn dump_scalar_list_field<T: JsonScalar>(&mut self, name: &str, values: &[T]) -> io::Result<()> {
        self.prefix(name)?;
        dump_list(self.emitter, values, |item, emitter| item.dump_scalar(emitter))
    }

    pub fn dump_object_list_field<T: JsonObject>(&mut self, name: &str, values: &[T]) -> io::Result<()> {
        self.prefix(name)?;
        dump_list(self.emitter, values, crate::dispatch::dump_object)
    }
}

fn dump_list<T, W: Write>(
    emitter: &mut Emitter<W>,
    values: &[T],
    mut write_one: impl FnMut(&T, &mut Emitter<W>) -> io::Result<()>,
) -> io::Result<()> {
    if values.is_empty() {
        return emitter.write_empty_list();
    }
    emitter.begin_list()?;
    for (i, value) in values.iter().enumerate() {
        emitter.item_prefix(i == 0)?;
        write_one(value, emitter)?;
    }
    emitter.end_list(true)
}
