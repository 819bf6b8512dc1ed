//! Flat dictionary of dotted parameter paths
//!
//! A [`ConfigDict`] is what a parse hands back to the caller. Entries keep the
//! order in which they appeared in the source.

use crate::parser::DuplicatePathBehavior;
use crate::value::TypedValue;
use indexmap::IndexMap;
use indexmap::map::{IntoIter, Iter, Keys};
use serde::Serialize;
use std::fmt;
use std::ops::Index;

/// Mapping from dotted paths such as `glossary.GlossDiv.title` to values.
///
/// Serializes as a flat map in source order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ConfigDict {
    entries: IndexMap<String, TypedValue>,
}

impl ConfigDict {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Inserts a leaf value, returning false if an existing entry was kept
    pub(crate) fn insert(
        &mut self,
        path: &str,
        value: TypedValue,
        behavior: DuplicatePathBehavior,
    ) -> bool {
        match behavior {
            DuplicatePathBehavior::Override => {
                self.entries.insert(path.to_string(), value);
                true
            }
            DuplicatePathBehavior::KeepFirst => {
                if self.entries.contains_key(path) {
                    false
                } else {
                    self.entries.insert(path.to_string(), value);
                    true
                }
            }
        }
    }

    pub fn get(&self, path: &str) -> Option<&TypedValue> {
        self.entries.get(path)
    }

    pub fn contains_key(&self, path: &str) -> bool {
        self.entries.contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> Keys<'_, String, TypedValue> {
        self.entries.keys()
    }

    pub fn iter(&self) -> Iter<'_, String, TypedValue> {
        self.entries.iter()
    }

    /// Returns the boolean stored at `path` if it is a single boolean
    pub fn get_bool(&self, path: &str) -> Option<bool> {
        self.get(path)?.as_bool()
    }

    /// Returns the integer stored at `path` if it is a single integer
    pub fn get_integer(&self, path: &str) -> Option<i64> {
        self.get(path)?.as_integer()
    }

    /// Returns the float stored at `path` if it is a single float
    pub fn get_float(&self, path: &str) -> Option<f64> {
        self.get(path)?.as_float()
    }

    /// Returns the string stored at `path` if it is a single string
    pub fn get_str(&self, path: &str) -> Option<&str> {
        self.get(path)?.as_str()
    }

    /// Iterates over every entry nested below `prefix`.
    ///
    /// Yields paths relative to the prefix, so `children("glossary")` yields
    /// `("title", ..)` for `glossary.title`. An empty prefix yields everything.
    pub fn children<'a>(
        &'a self,
        prefix: &'a str,
    ) -> impl Iterator<Item = (&'a str, &'a TypedValue)> + 'a {
        self.entries.iter().filter_map(move |(path, value)| {
            if prefix.is_empty() {
                return Some((path.as_str(), value));
            }
            path.strip_prefix(prefix)?
                .strip_prefix('.')
                .map(|rest| (rest, value))
        })
    }

    /// Returns the dictionary with its entries ordered by path
    pub fn sorted(mut self) -> Self {
        self.entries.sort_keys();
        self
    }

    pub fn into_inner(self) -> IndexMap<String, TypedValue> {
        self.entries
    }
}

impl Index<&str> for ConfigDict {
    type Output = TypedValue;

    fn index(&self, path: &str) -> &TypedValue {
        match self.entries.get(path) {
            Some(value) => value,
            None => panic!("no configuration entry for path '{}'", path),
        }
    }
}

impl IntoIterator for ConfigDict {
    type Item = (String, TypedValue);
    type IntoIter = IntoIter<String, TypedValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a ConfigDict {
    type Item = (&'a String, &'a TypedValue);
    type IntoIter = Iter<'a, String, TypedValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Lists one `path = <T>value` line per entry
impl fmt::Display for ConfigDict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (path, value) in &self.entries {
            writeln!(f, "{} = <{}>{}", path, value.value_type().tag(), value)?;
        }
        Ok(())
    }
}
