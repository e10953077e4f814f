// Reference-index field selection for popularity lookups
//
// A popularity lookup names either one field, a comma-separated list of
// fields, or the sentinel "all" (every field of the reference index). In the
// multi-field cases document frequencies are summed across the fields.

/// Which fields of a reference index contribute to a term's frequency.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldSelector {
    /// A single named field.
    Single(String),
    /// An explicit list of fields; frequencies are summed.
    List(Vec<String>),
    /// Every field present in the reference index; frequencies are summed.
    All,
}

impl FieldSelector {
    /// The sentinel selecting every field.
    pub const ALL: &'static str = "all";

    /// Interpret a field specification.
    ///
    /// `"all"` (any case) selects every field, a spec containing a comma is
    /// split into a list, anything else names a single field. List entries
    /// are kept verbatim, including surrounding whitespace and empty entries.
    pub fn parse(spec: &str) -> Self {
        if spec.eq_ignore_ascii_case(Self::ALL) {
            FieldSelector::All
        } else if spec.contains(',') {
            FieldSelector::List(spec.split(',').map(str::to_string).collect())
        } else {
            FieldSelector::Single(spec.to_string())
        }
    }

    /// Resolve the selector to concrete field names. `all_fields` is only
    /// invoked for [`FieldSelector::All`].
    pub fn resolve<E>(
        &self,
        all_fields: impl FnOnce() -> Result<Vec<String>, E>,
    ) -> Result<Vec<String>, E> {
        match self {
            FieldSelector::Single(field) => Ok(vec![field.clone()]),
            FieldSelector::List(fields) => Ok(fields.clone()),
            FieldSelector::All => all_fields(),
        }
    }
}

impl From<&str> for FieldSelector {
    fn from(spec: &str) -> Self {
        FieldSelector::parse(spec)
    }
}
