//! Bibliographic entry and collection types.

use std::fmt;

/// A single named field on a bibliographic entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    /// Field name as it appeared in the source (case preserved).
    pub name: String,
    /// Field value with delimiters stripped.
    pub value: String,
}

/// One bibliographic record: citation key, entry type, and named fields.
///
/// Field names are case-insensitive for lookup; the stored casing is whatever
/// the source (or a later transform) provided. Field order is preserved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Citation key after `@type{`, original casing preserved.
    pub key: String,
    /// Entry type tag (`article`, `inproceedings`, ...), lowercased.
    pub entry_type: String,
    fields: Vec<Field>,
}

impl Entry {
    /// Creates an entry with no fields.
    #[must_use]
    pub fn new(key: impl Into<String>, entry_type: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            entry_type: entry_type.into(),
            fields: Vec::new(),
        }
    }

    /// Returns the value of `name`, if present (case-insensitive).
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|field| field.name.eq_ignore_ascii_case(name))
            .map(|field| field.value.as_str())
    }

    /// Returns the value of `name`, or `""` when the field is absent.
    #[must_use]
    pub fn field_or_empty(&self, name: &str) -> &str {
        self.field(name).unwrap_or("")
    }

    /// Returns true if the field exists, even with an empty value.
    #[must_use]
    pub fn has_field(&self, name: &str) -> bool {
        self.field(name).is_some()
    }

    /// Sets `name` to `value`, replacing an existing field (case-insensitive
    /// match, position kept) or appending a new one.
    pub fn set_field(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self
            .fields
            .iter_mut()
            .find(|field| field.name.eq_ignore_ascii_case(&name))
        {
            Some(field) => field.value = value,
            None => self.fields.push(Field { name, value }),
        }
    }

    /// Iterates fields in stored order.
    pub fn fields(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter()
    }

    /// Number of fields on the entry.
    #[must_use]
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "@{}{{{}}} ({} fields)",
            self.entry_type,
            self.key,
            self.fields.len()
        )
    }
}

/// An ordered sequence of entries from one file.
///
/// Insertion order is file order. Citation-key uniqueness is not enforced
/// here; transforms that care about key collisions handle them explicitly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Collection {
    /// Entries in source order.
    pub entries: Vec<Entry>,
}

impl Collection {
    /// Creates an empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps a pre-built entry list.
    #[must_use]
    pub fn from_entries(entries: Vec<Entry>) -> Self {
        Self { entries }
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true when the collection holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Appends an entry.
    pub fn push(&mut self, entry: Entry) {
        self.entries.push(entry);
    }

    /// Iterates entries in order.
    pub fn iter(&self) -> impl Iterator<Item = &Entry> {
        self.entries.iter()
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} entries", self.entries.len())
    }
}
