// Filter query parameters built from submitted form fields
use std::collections::BTreeMap;

/// Filter-field name → value mapping for an aggregate query.
///
/// Fields with an empty value are dropped at construction: an empty filter
/// means "no filter on this field" and must not reach the endpoint as `key=`.
/// Entries are kept sorted by field name so the produced query string is
/// deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    entries: BTreeMap<String, String>,
}

impl QueryParams {
    /// Build params from raw form fields, omitting empty values.
    pub fn from_fields<'a, I>(fields: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let entries = fields
            .into_iter()
            .filter(|(_, value)| !value.is_empty())
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect();
        Self { entries }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Percent-encoded `name=value&...` in canonical (sorted) field order.
    /// Empty when no filter is active.
    pub fn to_query_string(&self) -> String {
        self.entries
            .iter()
            .map(|(name, value)| {
                format!("{}={}", urlencoding::encode(name), urlencoding::encode(value))
            })
            .collect::<Vec<_>>()
            .join("&")
    }
}
