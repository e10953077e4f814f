// Structured records: an ordered list of (field, value) pairs
//
// A field may occur several times in one record (e.g. every 2-gram of a word
// under `gram2`). Only stored fields can be read back through a searcher;
// every field is indexed.

use hashbrown::HashSet;

/// A record submitted to an index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    fields: Vec<(String, String)>,
    stored: HashSet<String>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an indexed, non-stored value.
    pub fn add(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.fields.push((field.into(), value.into()));
    }

    /// Add an indexed value and mark the field as stored.
    pub fn add_stored(&mut self, field: impl Into<String>, value: impl Into<String>) {
        let field = field.into();
        self.stored.insert(field.clone());
        self.fields.push((field, value.into()));
    }

    /// Builder form of [`Record::add`].
    pub fn with(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.add(field, value);
        self
    }

    /// Builder form of [`Record::add_stored`].
    pub fn with_stored(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.add_stored(field, value);
        self
    }

    /// All (field, value) pairs in insertion order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(f, v)| (f.as_str(), v.as_str()))
    }

    /// Values of one field in insertion order.
    pub fn values<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.fields
            .iter()
            .filter(move |(f, _)| f == field)
            .map(|(_, v)| v.as_str())
    }

    pub fn is_stored(&self, field: &str) -> bool {
        self.stored.contains(field)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
