//! Flat `key=value;key=value` property bags.
//!
//! Properties are passed through to step invocations untouched. The only
//! behavior the runner relies on is parsing and merging: parsing tolerates
//! a trailing separator and maps an empty string to an empty bag, and merging
//! lets the overriding bag win on key collision while keeping first-seen key
//! order.

use std::fmt;

use serde::de::{self, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// An insertion-ordered string map.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Properties {
    entries: Vec<(String, String)>,
}

impl Properties {
    /// Create an empty property bag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a `;`-separated list of `key=value` pairs.
    ///
    /// Empty segments are skipped, so `"a=b;"` and `""` are both accepted.
    /// A segment without `=` becomes a key with an empty value. Only the
    /// first `=` splits, so values may themselves contain `=`.
    pub fn parse(input: &str) -> Self {
        let mut props = Self::new();
        for segment in input.split(';') {
            let segment = segment.trim();
            if segment.is_empty() {
                continue;
            }
            let (key, value) = match segment.split_once('=') {
                Some((k, v)) => (k.trim(), v.trim()),
                None => (segment, ""),
            };
            if key.is_empty() {
                continue;
            }
            props.insert(key, value);
        }
        props
    }

    /// Insert or replace a value. Replacing keeps the key's original position.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Look up a value by key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Check whether a key is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the bag is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Apply every entry of `overrides` on top of `self`.
    pub fn extend_from(&mut self, overrides: &Properties) {
        for (k, v) in overrides.iter() {
            self.insert(k, v);
        }
    }

    /// Return a new bag with `overrides` applied on top of `self`.
    pub fn merged(&self, overrides: &Properties) -> Properties {
        let mut result = self.clone();
        result.extend_from(overrides);
        result
    }
}

impl fmt::Display for Properties {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined: Vec<String> = self
            .entries
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect();
        write!(f, "{}", joined.join(";"))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Properties {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut props = Properties::new();
        for (k, v) in iter {
            props.insert(k, v);
        }
        props
    }
}

impl Serialize for Properties {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Properties {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct PropertiesVisitor;

        impl<'de> Visitor<'de> for PropertiesVisitor {
            type Value = Properties;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a \"key=value;key=value\" string or a mapping of strings")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<Properties, E> {
                Ok(Properties::parse(v))
            }

            fn visit_unit<E: de::Error>(self) -> std::result::Result<Properties, E> {
                Ok(Properties::new())
            }

            fn visit_map<A: MapAccess<'de>>(
                self,
                mut map: A,
            ) -> std::result::Result<Properties, A::Error> {
                let mut props = Properties::new();
                while let Some((k, v)) = map.next_entry::<String, serde_yaml::Value>()? {
                    let value = match v {
                        serde_yaml::Value::String(s) => s,
                        serde_yaml::Value::Bool(b) => b.to_string(),
                        serde_yaml::Value::Number(n) => n.to_string(),
                        serde_yaml::Value::Null => String::new(),
                        _ => {
                            return Err(de::Error::custom(format!(
                                "property '{}' must be a scalar",
                                k
                            )))
                        }
                    };
                    props.insert(k, value);
                }
                Ok(props)
            }
        }

        deserializer.deserialize_any(PropertiesVisitor)
    }
}
