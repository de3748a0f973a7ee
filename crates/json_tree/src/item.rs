/// An index into a [`crate::DocumentTree`]'s arena. `INVALID` is a reserved
/// out-of-range sentinel id that never corresponds to an allocated slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ItemId(u32);

impl ItemId {
    pub const INVALID: ItemId = ItemId(u32::MAX);

    pub(crate) fn new(index: usize) -> Self {
        Self(index as u32)
    }

    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }

    pub fn is_invalid(self) -> bool {
        self == Self::INVALID
    }
}

/// Mirrors [`json_value::Variant`]'s discriminant set, plus an internal
/// `Key` kind that threads key/value pairs as alternating siblings within
/// an `Object` group.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ItemKind {
    Invalid,
    Null,
    Bool,
    Integer,
    Real,
    String,
    Key,
    Object,
    List,
}

/// Head/tail sibling-chain pointers for an `Object` or `List` item's
/// children. Appending is O(1) via the tail pointer.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct Group {
    pub head: Option<ItemId>,
    pub tail: Option<ItemId>,
}

#[derive(Clone, Copy, Debug)]
pub(crate) enum Payload<'a> {
    None,
    Bool(bool),
    Integer(i64),
    Real(f64),
    /// The raw spelling of a string/key token with surrounding quotes
    /// stripped, but escapes *not* decoded. Escape decoding is deferred to
    /// accessor time so that building the tree itself allocates nothing
    /// beyond the caller's arena.
    Text(&'a str),
    Group(Group),
}

/// One arena slot: `{ kind, payload, next_sibling }`, per spec §3.
#[derive(Clone, Copy, Debug)]
pub struct Item<'a> {
    pub kind: ItemKind,
    pub(crate) payload: Payload<'a>,
    pub next_sibling: Option<ItemId>,
}

impl<'a> Default for Item<'a> {
    /// A placeholder slot, for filling the `&mut [Item]` buffer a caller
    /// allocates before handing it to [`crate::DocumentTree::parse`].
    /// `DocumentTree` overwrites every slot it actually uses, so the
    /// placeholder's contents never surface.
    fn default() -> Self {
        Self {
            kind: ItemKind::Invalid,
            payload: Payload::None,
            next_sibling: None,
        }
    }
}

impl<'a> Item<'a> {
    pub(crate) fn group(kind: ItemKind) -> Self {
        Self {
            kind,
            payload: Payload::Group(Group::default()),
            next_sibling: None,
        }
    }

    pub(crate) fn text(kind: ItemKind, spelling: &'a str) -> Self {
        Self {
            kind,
            payload: Payload::Text(spelling),
            next_sibling: None,
        }
    }

    pub(crate) fn scalar(kind: ItemKind, payload: Payload<'a>) -> Self {
        Self {
            kind,
            payload,
            next_sibling: None,
        }
    }
}
