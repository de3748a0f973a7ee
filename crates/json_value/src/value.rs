/// A dynamic tagged JSON value. Default-constructed is [`Variant::Invalid`].
/// Copying (`Clone`) is always a deep copy, since every variant owns its
/// payload outright (no shared/reference-counted storage).
#[derive(Clone, Debug, PartialEq, Default)]
pub enum Variant {
    #[default]
    Invalid,
    Null,
    Bool(bool),
    Integer(i64),
    Real(f64),
    String(String),
    /// Ordered sequence of child values.
    List(Vec<Variant>),
    /// Insertion-ordered key → value mapping; keys are unique. Spec permits
    /// an implementation to not preserve insertion order, but doing so is
    /// strictly more useful and costs nothing extra here.
    Object(Vec<(String, Variant)>),
}

impl Variant {
    /// The shared sentinel returned by read-through indexing on a miss.
    /// Documented per spec §4.4: this *is* the one shared, and therefore
    /// effectively immutable from the caller's perspective, instance — not
    /// a freshly produced one.
    pub const INVALID: Variant = Variant::Invalid;

    pub fn is_invalid(&self) -> bool {
        matches!(self, Variant::Invalid)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Variant::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Variant::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Variant::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Variant::Real(r) => Some(*r),
            Variant::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Variant::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Variant]> {
        match self {
            Variant::List(items) => Some(items.as_slice()),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&[(String, Variant)]> {
        match self {
            Variant::Object(pairs) => Some(pairs.as_slice()),
            _ => None,
        }
    }

    /// Read-through lookup by key. Returns the shared [`Variant::INVALID`]
    /// sentinel if `self` is not an object or the key is absent.
    pub fn get(&self, key: &str) -> &Variant {
        match self {
            Variant::Object(pairs) => pairs
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v)
                .unwrap_or(&Variant::INVALID),
            _ => &Variant::INVALID,
        }
    }

    /// Read-through lookup by index. Returns the shared [`Variant::INVALID`]
    /// sentinel if `self` is not a list or the index is out of range.
    pub fn at(&self, index: usize) -> &Variant {
        match self {
            Variant::List(items) => items.get(index).unwrap_or(&Variant::INVALID),
            _ => &Variant::INVALID,
        }
    }

    /// Write-through lookup by key: converts `self` to an object in place
    /// if it wasn't one already, then inserts a default (`Invalid`) entry
    /// for `key` if absent.
    pub fn get_or_insert(&mut self, key: &str) -> &mut Variant {
        if !matches!(self, Variant::Object(_)) {
            *self = Variant::Object(Vec::new());
        }
        let Variant::Object(pairs) = self else {
            unreachable!()
        };
        if let Some(pos) = pairs.iter().position(|(k, _)| k == key) {
            &mut pairs[pos].1
        } else {
            pairs.push((key.to_string(), Variant::Invalid));
            let last = pairs.len() - 1;
            &mut pairs[last].1
        }
    }

    /// Write-through lookup by index: converts `self` to a list in place if
    /// it wasn't one already, growing it with `Invalid` entries up to
    /// `index` if needed.
    pub fn at_or_grow(&mut self, index: usize) -> &mut Variant {
        if !matches!(self, Variant::List(_)) {
            *self = Variant::List(Vec::new());
        }
        let Variant::List(items) = self else {
            unreachable!()
        };
        while items.len() <= index {
            items.push(Variant::Invalid);
        }
        &mut items[index]
    }
}

impl From<bool> for Variant {
    fn from(value: bool) -> Self {
        Variant::Bool(value)
    }
}

impl From<i64> for Variant {
    fn from(value: i64) -> Self {
        Variant::Integer(value)
    }
}

impl From<f64> for Variant {
    fn from(value: f64) -> Self {
        Variant::Real(value)
    }
}

impl From<String> for Variant {
    fn from(value: String) -> Self {
        Variant::String(value)
    }
}

impl From<&str> for Variant {
    fn from(value: &str) -> Self {
        Variant::String(value.to_string())
    }
}
