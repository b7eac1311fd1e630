/// One bibliographic record.
///
/// Entries are opaque field bags: beyond the citation key nothing is
/// required, and a `doi` field is used for content identity when present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BibEntry {
    /// Citation key. An empty key means the source entry had none.
    pub key: String,
    /// Entry type without the leading `@` (`article`, `misc`, ...).
    pub entry_type: String,
    /// Field name → value pairs, lowercase names, stable order.
    pub fields: Vec<(String, String)>,
}

impl BibEntry {
    pub fn new(
        key: impl Into<String>,
        entry_type: impl Into<String>,
        fields: Vec<(String, String)>,
    ) -> Self {
        Self {
            key: key.into(),
            entry_type: entry_type.into(),
            fields,
        }
    }

    /// Look up a field value by its lowercase name.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// The entry's DOI, if it carries one.
    pub fn doi(&self) -> Option<&str> {
        self.field("doi")
    }
}
