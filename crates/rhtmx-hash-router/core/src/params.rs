//! Ordered parameter mapping produced by a successful match

use std::ops::Index;

use serde::ser::{Serialize, SerializeMap, Serializer};

/// Placeholder names bound to captured values, in template order
///
/// Values are always the raw captured strings; no type coercion happens here.
///
/// # Examples
///
/// ```
/// use rhtmx_hash_router::RoutePattern;
///
/// let pattern = RoutePattern::parse("/users/:id/:action").unwrap();
/// let params = pattern.matches("users/42/edit").unwrap();
///
/// assert_eq!(params.get("id"), Some("42"));
/// assert_eq!(params.names().collect::<Vec<_>>(), vec!["id", "action"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params(Vec<(String, String)>);

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Value captured for `name`, if the template declared it
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates `(name, value)` pairs in template order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(k, _)| k.as_str())
    }

    pub fn into_inner(self) -> Vec<(String, String)> {
        self.0
    }
}

impl<K, V> FromIterator<(K, V)> for Params
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Params(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl Index<&str> for Params {
    type Output = str;

    /// # Panics
    ///
    /// Panics if `name` was not captured, like `HashMap`'s index.
    fn index(&self, name: &str) -> &str {
        match self.get(name) {
            Some(value) => value,
            None => panic!("no route parameter named `{}`", name),
        }
    }
}

impl Serialize for Params {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, value) in &self.0 {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}
