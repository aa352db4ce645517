use std::{collections::HashMap, rc::Rc};

use crate::interpreter::value::core::Value;

/// A string-keyed map that remembers insertion order.
///
/// Re-inserting an existing key replaces its value in place, so the key keeps
/// its original position. Iteration always follows first insertion.
///
/// # Example
/// ```
/// use puf::interpreter::value::{core::Value, mapping::Mapping};
///
/// let mut mapping = Mapping::new();
/// mapping.insert("b", Value::Integer(1));
/// mapping.insert("a", Value::Integer(2));
/// mapping.insert("b", Value::Integer(3));
///
/// let keys: Vec<&str> = mapping.keys().collect();
/// assert_eq!(keys, ["b", "a"]);
/// assert_eq!(mapping.get("b"), Some(&Value::Integer(3)));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Mapping {
    entries: Vec<(Rc<str>, Value)>,
    index:   HashMap<Rc<str>, usize>,
}

impl Mapping {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces the value stored under `key`.
    pub fn insert(&mut self, key: &str, value: Value) {
        if let Some(&position) = self.index.get(key) {
            self.entries[position].1 = value;
            return;
        }
        let key: Rc<str> = Rc::from(key);
        self.index.insert(Rc::clone(&key), self.entries.len());
        self.entries.push((key, value));
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.index.get(key).map(|&position| &self.entries[position].1)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over `(key, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(key, value)| (&**key, value))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| &**key)
    }

    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.entries.iter().map(|(_, value)| value)
    }
}

impl PartialEq for Mapping {
    /// Two mappings are equal when they hold the same keys with equal values,
    /// regardless of order.
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
        && self.iter()
               .all(|(key, value)| other.get(key).is_some_and(|v| v == value))
    }
}

impl<K: AsRef<str>> FromIterator<(K, Value)> for Mapping {
    fn from_iter<T: IntoIterator<Item = (K, Value)>>(iter: T) -> Self {
        let mut mapping = Self::new();
        for (key, value) in iter {
            mapping.insert(key.as_ref(), value);
        }
        mapping
    }
}
