//! An arena-backed flat JSON node tree: [`DocumentTree::parse`] drives a
//! [`json_parser::LexerParser`] over a caller-supplied buffer of
//! [`Item`]s, so a parse never allocates beyond that one buffer. Use this
//! instead of [`json_value::Variant`] when the caller wants a hard,
//! pre-committed bound on parse memory.

mod item;
mod tree;

pub use item::{Item, ItemId, ItemKind};
pub use tree::{DocumentTree, ItemRef};
