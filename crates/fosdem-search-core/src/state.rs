//! Search state model: the record of active query and filter selections.
//!
//! A [`SearchState`] maps filter-dimension names (`query`, `track`, `room`, ...)
//! to a [`StateValue`]. Entries keep insertion order so that encoding is
//! stable; equality is plain mapping equality and ignores that order.

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Value stored under a state key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StateValue {
    /// Single string value (`query`, `page`, a single refinement).
    Scalar(String),
    /// Ordered sequence of strings (multi-select refinements).
    List(Vec<String>),
    /// Nested mapping (refinement lists, range and menu filters).
    Map(SearchState),
}

impl StateValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            StateValue::Scalar(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            StateValue::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&SearchState> {
        match self {
            StateValue::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Scalar or list contents as a list of strings; `None` for mappings.
    pub fn to_strings(&self) -> Option<Vec<String>> {
        match self {
            StateValue::Scalar(s) => Some(vec![s.clone()]),
            StateValue::List(items) => Some(items.clone()),
            StateValue::Map(_) => None,
        }
    }
}

impl From<&str> for StateValue {
    fn from(s: &str) -> Self {
        StateValue::Scalar(s.to_string())
    }
}

impl From<String> for StateValue {
    fn from(s: String) -> Self {
        StateValue::Scalar(s)
    }
}

impl From<Vec<String>> for StateValue {
    fn from(items: Vec<String>) -> Self {
        StateValue::List(items)
    }
}

impl From<Vec<&str>> for StateValue {
    fn from(items: Vec<&str>) -> Self {
        StateValue::List(items.into_iter().map(str::to_string).collect())
    }
}

impl From<SearchState> for StateValue {
    fn from(map: SearchState) -> Self {
        StateValue::Map(map)
    }
}

/// Insertion-ordered mapping from filter-dimension name to value.
#[derive(Debug, Clone, Default, Eq)]
pub struct SearchState {
    entries: Vec<(String, StateValue)>,
}

impl SearchState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&StateValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut StateValue> {
        self.entries
            .iter_mut()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// Scalar value under `key`, if the entry exists and is a scalar.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(StateValue::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Inserts `value` under `key`. An existing entry keeps its position and
    /// its previous value is returned.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<StateValue>,
    ) -> Option<StateValue> {
        let key = key.into();
        let value = value.into();
        match self.get_mut(&key) {
            Some(slot) => Some(std::mem::replace(slot, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    pub fn remove(&mut self, key: &str) -> Option<StateValue> {
        let pos = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(pos).1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &StateValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }
}

impl PartialEq for SearchState {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|(k, v)| other.get(k) == Some(v))
    }
}

impl<K: Into<String>, V: Into<StateValue>> FromIterator<(K, V)> for SearchState {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut state = SearchState::new();
        for (k, v) in iter {
            state.insert(k, v);
        }
        state
    }
}

impl IntoIterator for SearchState {
    type Item = (String, StateValue);
    type IntoIter = std::vec::IntoIter<(String, StateValue)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl Serialize for SearchState {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (k, v) in self.iter() {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

struct SearchStateVisitor;

impl<'de> Visitor<'de> for SearchStateVisitor {
    type Value = SearchState;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of filter names to strings, string arrays or maps")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut state = SearchState::new();
        while let Some((key, value)) = access.next_entry::<String, StateValue>()? {
            state.insert(key, value);
        }
        Ok(state)
    }
}

impl<'de> Deserialize<'de> for SearchState {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(SearchStateVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_replaces_in_place() {
        let mut state = SearchState::new();
        state.insert("query", "rust");
        state.insert("track", "Go");
        let old = state.insert("query", "wasm");
        assert_eq!(old, Some(StateValue::from("rust")));
        assert_eq!(state.keys().collect::<Vec<_>>(), vec!["query", "track"]);
        assert_eq!(state.get_str("query"), Some("wasm"));
    }

    #[test]
    fn equality_ignores_order() {
        let a: SearchState = [("query", "x"), ("track", "Go")].into_iter().collect();
        let b: SearchState = [("track", "Go"), ("query", "x")].into_iter().collect();
        assert_eq!(a, b);
        let c: SearchState = [("track", "Go")].into_iter().collect();
        assert_ne!(a, c);
    }

    #[test]
    fn remove_entry() {
        let mut state: SearchState = [("page", "2"), ("day", "Sunday")].into_iter().collect();
        assert_eq!(state.remove("page"), Some(StateValue::from("2")));
        assert_eq!(state.remove("page"), None);
        assert_eq!(state.len(), 1);
    }

    #[test]
    fn json_shape() {
        let mut refinements = SearchState::new();
        refinements.insert("room", vec!["K.1.1", "H.1309"]);
        let mut state = SearchState::new();
        state.insert("query", "rust");
        state.insert("refinementList", refinements);

        let json = serde_json::to_string(&state).unwrap();
        assert_eq!(
            json,
            r#"{"query":"rust","refinementList":{"room":["K.1.1","H.1309"]}}"#
        );
        let back: SearchState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, state);
    }

    #[test]
    fn json_preserves_key_order() {
        let state: SearchState = serde_json::from_str(r#"{"z":"1","a":"2","m":["3"]}"#).unwrap();
        assert_eq!(state.keys().collect::<Vec<_>>(), vec!["z", "a", "m"]);
    }

    #[test]
    fn json_rejects_numbers() {
        assert!(serde_json::from_str::<SearchState>(r#"{"page":2}"#).is_err());
    }
}
