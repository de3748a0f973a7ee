/// Serialization options, per spec §6.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EmitOptions {
    /// `0` means compact (no newlines or indentation); `n > 0` means a
    /// newline after every separator and `n * depth` spaces of indentation.
    pub indent: u32,
    /// Written between a key and its value. 1-2 bytes.
    pub sep_kv: String,
    /// Written between consecutive items/fields. 1-2 bytes.
    pub sep_item: String,
}

impl Default for EmitOptions {
    fn default() -> Self {
        Self {
            indent: 2,
            sep_kv: ": ".to_string(),
            sep_item: ",".to_string(),
        }
    }
}

impl EmitOptions {
    /// `indent=0, sep_kv=":", sep_item=","`.
    pub fn compact() -> Self {
        Self {
            indent: 0,
            sep_kv: ":".to_string(),
            sep_item: ",".to_string(),
        }
    }

    pub fn with_indent(mut self, indent: u32) -> Self {
        self.indent = indent;
        self
    }

    pub fn with_sep_kv(mut self, sep_kv: impl Into<String>) -> Self {
        self.sep_kv = sep_kv.into();
        self
    }

    pub fn with_sep_item(mut self, sep_item: impl Into<String>) -> Self {
        self.sep_item = sep_item.into();
        self
    }
}
