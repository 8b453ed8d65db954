use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A flat launch parameter value: either a single string or a list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Text(String),
    List(Vec<String>),
}

impl ParamValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ParamValue::Text(text) => Some(text.as_str()),
            ParamValue::List(_) => None,
        }
    }

    /// Wire form of the value. Lists are comma-joined.
    pub fn to_text(&self) -> String {
        match self {
            ParamValue::Text(text) => text.clone(),
            ParamValue::List(items) => items.join(","),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            ParamValue::Text(text) => text.is_empty(),
            ParamValue::List(items) => items.is_empty(),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Text(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::Text(value)
    }
}

impl From<&String> for ParamValue {
    fn from(value: &String) -> Self {
        ParamValue::Text(value.clone())
    }
}

impl From<Vec<String>> for ParamValue {
    fn from(value: Vec<String>) -> Self {
        ParamValue::List(value)
    }
}

/// Insertion-ordered flat parameter set. Later writes replace earlier ones in place.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParameterMap {
    entries: IndexMap<String, ParamValue>,
}

impl ParameterMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<ParamValue>) {
        self.entries.insert(key.into(), value.into());
    }

    /// Inserts only when the value is non-empty.
    pub fn insert_non_empty(&mut self, key: impl Into<String>, value: impl Into<ParamValue>) {
        let value = value.into();
        if !value.is_empty() {
            self.entries.insert(key.into(), value);
        }
    }

    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.entries.get(key)
    }

    pub fn get_text(&self, key: &str) -> Option<String> {
        self.entries.get(key).map(ParamValue::to_text)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<ParamValue> {
        self.entries.shift_remove(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.entries.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &ParamValue)> {
        self.entries.iter()
    }

    /// Merges `other` into `self`; keys in `other` win.
    pub fn merge(&mut self, other: ParameterMap) {
        for (key, value) in other.entries {
            self.entries.insert(key, value);
        }
    }

    pub fn to_string_map(&self) -> IndexMap<String, String> {
        self.entries
            .iter()
            .map(|(key, value)| (key.clone(), value.to_text()))
            .collect()
    }
}

impl<K, V> FromIterator<(K, V)> for ParameterMap
where
    K: Into<String>,
    V: Into<ParamValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = ParameterMap::new();
        for (key, value) in iter {
            map.insert(key, value);
        }
        map
    }
}

impl IntoIterator for ParameterMap {
    type Item = (String, ParamValue);
    type IntoIter = indexmap::map::IntoIter<String, ParamValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
