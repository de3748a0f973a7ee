//! Two-pass size-then-write JSON serialization support: [`Emitter`] writes
//! begin/end/key/value output through a [`BufPrinter`], [`escape`] encodes
//! and decodes JSON string escapes, and [`EmitOptions`] carries the
//! indent/separator knobs from spec §6.

mod emitter;
mod options;
mod printer;

pub mod escape;

pub use emitter::Emitter;
pub use options::EmitOptions;
pub use printer::{counting_printer, BufPrinter};
