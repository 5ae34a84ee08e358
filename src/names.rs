//! Insertion-ordered, name-keyed collections used throughout the document model.

use crate::error::{EagleError, Result};
use indexmap::IndexMap;
use std::fmt::Display;
use std::hash::Hash;
use std::ops::Deref;

/// An `IndexMap<String, T>` that refuses duplicate names.
///
/// Read access goes through `Deref`, so lookups (`get`), ordered iteration
/// and positional access (`get_index`) come straight from `IndexMap`.
#[derive(Debug, Clone, PartialEq)]
pub struct NamedMap<T> {
    kind: &'static str,
    entries: IndexMap<String, T>,
}

impl<T> NamedMap<T> {
    pub fn new(kind: &'static str) -> Self {
        Self {
            kind,
            entries: IndexMap::new(),
        }
    }

    /// What the entries are, e.g. `"package"`; used in error messages
    pub fn kind(&self) -> &'static str {
        self.kind
    }

    pub(crate) fn insert_unique(&mut self, name: impl Into<String>, value: T) -> Result<()> {
        let name = name.into();
        if self.entries.contains_key(&name) {
            return Err(EagleError::DuplicateName {
                kind: self.kind,
                name,
            });
        }
        self.entries.insert(name, value);
        Ok(())
    }
}

/// Collect key/value pairs into an `IndexMap`, failing on the first repeated key.
///
/// Used for the plain string tables (attributes, params, settings) and for
/// number-keyed tables that do not warrant a [`NamedMap`].
pub(crate) fn collect_unique<K, V>(
    kind: &'static str,
    entries: impl IntoIterator<Item = (K, V)>,
) -> Result<IndexMap<K, V>>
where
    K: Hash + Eq + Display,
{
    let mut map = IndexMap::new();
    for (key, value) in entries {
        if map.contains_key(&key) {
            return Err(EagleError::DuplicateName {
                kind,
                name: key.to_string(),
            });
        }
        map.insert(key, value);
    }
    Ok(map)
}

impl<T> Deref for NamedMap<T> {
    type Target = IndexMap<String, T>;

    fn deref(&self) -> &Self::Target {
        &self.entries
    }
}

impl<'a, T> IntoIterator for &'a NamedMap<T> {
    type Item = (&'a String, &'a T);
    type IntoIter = indexmap::map::Iter<'a, String, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_name_is_rejected() {
        let mut map = NamedMap::new("net");
        map.insert_unique("GND", 1).unwrap();
        let err = map.insert_unique("GND", 2).unwrap_err();
        assert!(matches!(err, EagleError::DuplicateName { kind: "net", ref name } if name == "GND"));
        assert_eq!(map.get("GND"), Some(&1));
    }

    #[test]
    fn test_collect_unique_rejects_repeated_keys() {
        let map = collect_unique("param", [("a", 1), ("b", 2)]).unwrap();
        assert_eq!(map.get_index(1), Some((&"b", &2)));

        let err = collect_unique("param", [("a", 1), ("a", 2)]).unwrap_err();
        assert!(matches!(err, EagleError::DuplicateName { kind: "param", ref name } if name == "a"));

        let err = collect_unique("layer", [(1, "Top"), (1, "Bottom")]).unwrap_err();
        assert!(matches!(err, EagleError::DuplicateName { kind: "layer", ref name } if name == "1"));
    }

    #[test]
    fn test_iteration_follows_insertion_order() {
        let mut map = NamedMap::new("symbol");
        for name in ["Z", "A", "M"] {
            map.insert_unique(name, ()).unwrap();
        }
        let keys: Vec<_> = map.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["Z", "A", "M"]);
    }
}
