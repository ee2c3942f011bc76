//! Query parameter normalization.
//!
//! Query strings are built from an ordered list of `(key, value)` pairs.
//! Before a list goes on the wire, entries whose value is `null` or the empty
//! string are removed so the backend never sees a meaningless filter such as
//! an empty search term.

use serde_json::Value;

/// Ordered query parameters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryParams {
    entries: Vec<(String, Value)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a parameter. Values are kept as given; filtering happens in
    /// [`QueryParams::filtered`].
    pub fn insert(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.entries.push((key.into(), value.into()));
        self
    }

    /// Append a parameter only when it is present.
    pub fn insert_opt<V: Into<Value>>(self, key: impl Into<String>, value: Option<V>) -> Self {
        match value {
            Some(v) => self.insert(key, v),
            None => self,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Drop every entry whose value is `null` or `""`, keeping the rest in
    /// their original order.
    pub fn filtered(self) -> Self {
        filter_params(self.entries)
    }

    /// Render to wire pairs. Arrays expand to one pair per element
    /// (`tags=a&tags=b`), nulls inside arrays are skipped.
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::with_capacity(self.entries.len());
        for (key, value) in &self.entries {
            match value {
                Value::Array(items) => {
                    for item in items.iter().filter(|v| !v.is_null()) {
                        pairs.push((key.clone(), render_scalar(item)));
                    }
                }
                other => pairs.push((key.clone(), render_scalar(other))),
            }
        }
        pairs
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for QueryParams {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

impl From<serde_json::Map<String, Value>> for QueryParams {
    fn from(map: serde_json::Map<String, Value>) -> Self {
        map.into_iter().collect()
    }
}

impl From<Vec<(String, Value)>> for QueryParams {
    fn from(entries: Vec<(String, Value)>) -> Self {
        Self { entries }
    }
}

/// Keep only the entries whose value is neither `null` nor `""`.
///
/// Absent values never reach this point: optional fields are skipped when
/// the list is built (see [`QueryParams::insert_opt`]).
pub fn filter_params<K, I>(params: I) -> QueryParams
where
    K: Into<String>,
    I: IntoIterator<Item = (K, Value)>,
{
    params
        .into_iter()
        .filter(|(_, value)| !is_blank(value))
        .collect()
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

fn render_scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
