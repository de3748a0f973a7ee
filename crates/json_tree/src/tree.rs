use json_emit::escape;
use json_parser::{Error, ErrorCode, Event, EventKind, LexerParser, SourceLocation, Token, TokenKind};

use crate::item::{Group, Item, ItemId, ItemKind, Payload};

/// A flat arena of [`Item`]s allocated from a caller-supplied buffer of
/// fixed capacity. Parsing a document performs zero heap allocations beyond
/// whatever the caller used to create that buffer (e.g. `vec![...; cap]`
/// allocates once, up front; the tree itself never grows it).
pub struct DocumentTree<'arena, 'a> {
    items: &'arena mut [Item<'a>],
    len: usize,
    root: Option<ItemId>,
}

impl<'arena, 'a> DocumentTree<'arena, 'a> {
    /// Parses `source` as a single complete JSON document into `buffer`.
    /// Fails with `PARSE_OOM` if `buffer` is too small to hold every node
    /// the document needs.
    pub fn parse(buffer: &'arena mut [Item<'a>], source: &'a str) -> Result<Self, Error> {
        let mut tree = Self {
            items: buffer,
            len: 0,
            root: None,
        };
        let mut lp = LexerParser::new(source);
        let event = lp.next_event()?;
        let root = tree.build_value(&mut lp, event)?;
        tree.root = Some(root);
        Ok(tree)
    }

    pub fn root(&self) -> ItemRef<'_, 'arena, 'a> {
        ItemRef {
            tree: self,
            id: self.root.unwrap_or(ItemId::INVALID),
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    fn item(&self, id: ItemId) -> &Item<'a> {
        &self.items[id.index()]
    }

    fn alloc(&mut self, item: Item<'a>, location: SourceLocation) -> Result<ItemId, Error> {
        if self.len >= self.items.len() {
            return Err(Error::new(
                ErrorCode::ParseOom,
                location,
                "document arena exhausted",
            ));
        }
        let id = ItemId::new(self.len);
        self.items[self.len] = item;
        self.len += 1;
        Ok(id)
    }

    fn append_child(&mut self, parent: ItemId, child: ItemId) {
        let Payload::Group(Group { head, tail }) = &mut self.items[parent.index()].payload else {
            unreachable!("append_child called on a non-group item")
        };
        if head.is_none() {
            *head = Some(child);
        }
        if let Some(prev_tail) = *tail {
            self.items[prev_tail.index()].next_sibling = Some(child);
        }
        *tail = Some(child);
    }

    fn build_value(&mut self, lp: &mut LexerParser<'a>, event: Event<'a>) -> Result<ItemId, Error> {
        match event.kind {
            EventKind::ValueLiteral => self.alloc_literal(event.token),
            EventKind::ObjectBegin => self.build_object(lp, event.token.location),
            EventKind::ListBegin => self.build_list(lp, event.token.location),
            EventKind::ObjectEnd | EventKind::ListEnd | EventKind::ObjectKey | EventKind::Invalid => {
                Err(Error::new(
                    ErrorCode::InternalError,
                    event.token.location,
                    "unexpected event kind at value position",
                ))
            }
        }
    }

    fn build_object(
        &mut self,
        lp: &mut LexerParser<'a>,
        location: SourceLocation,
    ) -> Result<ItemId, Error> {
        let obj_id = self.alloc(Item::group(ItemKind::Object), location)?;
        loop {
            let event = lp.next_event()?;
            match event.kind {
                EventKind::ObjectEnd => return Ok(obj_id),
                EventKind::ObjectKey => {
                    let key_text = strip_quotes(event.token);
                    let key_id = self.alloc(
                        Item::text(ItemKind::Key, key_text),
                        event.token.location,
                    )?;
                    self.append_child(obj_id, key_id);
                    let value_event = lp.next_event()?;
                    let value_id = self.build_value(lp, value_event)?;
                    self.append_child(obj_id, value_id);
                }
                _ => {
                    return Err(Error::new(
                        ErrorCode::InternalError,
                        event.token.location,
                        "expected an object key or closing brace",
                    ))
                }
            }
        }
    }

    fn build_list(
        &mut self,
        lp: &mut LexerParser<'a>,
        location: SourceLocation,
    ) -> Result<ItemId, Error> {
        let list_id = self.alloc(Item::group(ItemKind::List), location)?;
        loop {
            let event = lp.next_event()?;
            if event.kind == EventKind::ListEnd {
                return Ok(list_id);
            }
            let value_id = self.build_value(lp, event)?;
            self.append_child(list_id, value_id);
        }
    }

    fn alloc_literal(&mut self, token: Token<'a>) -> Result<ItemId, Error> {
        let item = match token.kind {
            TokenKind::StringLiteral => {
                Item::text(ItemKind::String, strip_quotes(token))
            }
            TokenKind::BooleanLiteral => {
                Item::scalar(ItemKind::Bool, Payload::Bool(token.spelling == "true"))
            }
            TokenKind::NullLiteral => Item::scalar(ItemKind::Null, Payload::None),
            TokenKind::NumericLiteral => {
                if is_integer_spelling(token.spelling) {
                    let value = token.spelling.parse::<i64>().unwrap_or(0);
                    Item::scalar(ItemKind::Integer, Payload::Integer(value))
                } else {
                    let value = token.spelling.parse::<f64>().unwrap_or(0.0);
                    Item::scalar(ItemKind::Real, Payload::Real(value))
                }
            }
            _ => {
                return Err(Error::new(
                    ErrorCode::InternalError,
                    token.location,
                    "value-literal event carried an unexpected token kind",
                ))
            }
        };
        self.alloc(item, token.location)
    }
}

fn strip_quotes<'x>(token: Token<'x>) -> &'x str {
    &token.spelling[1..token.spelling.len() - 1]
}

fn is_integer_spelling(spelling: &str) -> bool {
    !spelling.bytes().any(|b| matches!(b, b'.' | b'e' | b'E'))
}

/// A handle to one node of a [`DocumentTree`], bundling a borrow of the tree
/// with an [`ItemId`]. Indexing a miss (wrong kind, absent key, out-of-range
/// index) yields an `ItemRef` pointing at the `ItemId::INVALID` sentinel,
/// whose `kind()` reads as [`ItemKind::Invalid`] without touching the arena.
#[derive(Clone, Copy)]
pub struct ItemRef<'t, 'arena, 'a> {
    tree: &'t DocumentTree<'arena, 'a>,
    id: ItemId,
}

impl<'t, 'arena, 'a> ItemRef<'t, 'arena, 'a> {
    fn invalid(tree: &'t DocumentTree<'arena, 'a>) -> Self {
        Self {
            tree,
            id: ItemId::INVALID,
        }
    }

    pub fn kind(&self) -> ItemKind {
        if self.id.is_invalid() {
            ItemKind::Invalid
        } else {
            self.tree.item(self.id).kind
        }
    }

    pub fn is_invalid(&self) -> bool {
        self.kind() == ItemKind::Invalid
    }

    pub fn as_bool(&self) -> Option<bool> {
        match (self.kind(), &self.tree.item(self.id).payload) {
            (ItemKind::Bool, Payload::Bool(b)) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match (self.kind(), &self.tree.item(self.id).payload) {
            (ItemKind::Integer, Payload::Integer(i)) => Some(*i),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match (self.kind(), &self.tree.item(self.id).payload) {
            (ItemKind::Real, Payload::Real(r)) => Some(*r),
            (ItemKind::Integer, Payload::Integer(i)) => Some(*i as f64),
            _ => None,
        }
    }

    /// Decodes the node's string escapes. Returns `None` if this node is
    /// not a `String`. Allocates (unlike building the tree itself).
    pub fn as_string(&self) -> Option<String> {
        match (self.kind(), &self.tree.item(self.id).payload) {
            (ItemKind::String, Payload::Text(raw)) => Some(escape::decode(raw)),
            _ => None,
        }
    }

    /// The raw (still-escaped) spelling of a `String` or `Key` node.
    pub fn raw_text(&self) -> Option<&'a str> {
        match &self.tree.item(self.id).payload {
            Payload::Text(raw) => Some(raw),
            _ => None,
        }
    }

    /// Walks an `Object` node's alternating key/value siblings for `key`.
    /// Returns an invalid `ItemRef` if `self` is not an object or the key
    /// is absent.
    pub fn get(&self, key: &str) -> ItemRef<'t, 'arena, 'a> {
        if self.kind() != ItemKind::Object {
            return Self::invalid(self.tree);
        }
        let Payload::Group(Group { head, .. }) = &self.tree.item(self.id).payload else {
            return Self::invalid(self.tree);
        };
        let mut cursor = *head;
        while let Some(key_id) = cursor {
            let key_item = self.tree.item(key_id);
            let value_id = key_item
                .next_sibling
                .expect("object key without a paired value");
            if let Payload::Text(raw) = &key_item.payload {
                if escape::decode(raw) == key {
                    return ItemRef {
                        tree: self.tree,
                        id: value_id,
                    };
                }
            }
            cursor = self.tree.item(value_id).next_sibling;
        }
        Self::invalid(self.tree)
    }

    /// Walks a `List` node's siblings to the `index`th element. Returns an
    /// invalid `ItemRef` if `self` is not a list or `index` is out of
    /// range.
    pub fn at(&self, index: usize) -> ItemRef<'t, 'arena, 'a> {
        if self.kind() != ItemKind::List {
            return Self::invalid(self.tree);
        }
        let Payload::Group(Group { head, .. }) = &self.tree.item(self.id).payload else {
            return Self::invalid(self.tree);
        };
        let mut cursor = *head;
        for _ in 0..index {
            let Some(id) = cursor else {
                return Self::invalid(self.tree);
            };
            cursor = self.tree.item(id).next_sibling;
        }
        match cursor {
            Some(id) => ItemRef {
                tree: self.tree,
                id,
            },
            None => Self::invalid(self.tree),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn scenario_6_arena_bounded_parse_reaches_nested_real() {
        let source = r#"{"foo":{"bar":1,"baz":["a",1,12.3,true,false,null]}}"#;
        let mut buffer = vec![Item::default(); 255];
        let tree = DocumentTree::parse(&mut buffer, source).unwrap();
        let value = tree.root().get("foo").get("baz").at(2);
        assert_eq!(value.kind(), ItemKind::Real);
        assert_eq!(value.as_f64(), Some(12.3));
    }

    #[test]
    fn exhausted_arena_reports_parse_oom() {
        let source = r#"{"a": 1, "b": 2}"#;
        let mut buffer = vec![Item::default(); 2];
        let err = DocumentTree::parse(&mut buffer, source).unwrap_err();
        assert_eq!(err.code, ErrorCode::ParseOom);
    }

    #[test]
    fn missing_key_and_out_of_range_index_are_invalid() {
        let source = r#"{"a": [1, 2]}"#;
        let mut buffer = vec![Item::default(); 16];
        let tree = DocumentTree::parse(&mut buffer, source).unwrap();
        assert!(tree.root().get("missing").is_invalid());
        assert!(tree.root().get("a").at(9).is_invalid());
    }

    #[test]
    fn scalar_root_has_no_children() {
        let source = "42";
        let mut buffer = vec![Item::default(); 4];
        let tree = DocumentTree::parse(&mut buffer, source).unwrap();
        assert_eq!(tree.root().as_i64(), Some(42));
        assert!(tree.root().get("x").is_invalid());
    }
}
