//! Edit and patch set containers.
//!
//! Both are ordered maps so that serialized output and application order are
//! stable across runs.

use std::collections::BTreeMap;
use std::collections::btree_map;

use serde::Serialize;

/// Literal search text → literal replacement text for one target file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct EditSet(BTreeMap<String, String>);

impl EditSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Single-edit set.
    pub fn one(search: impl Into<String>, replace: impl Into<String>) -> Self {
        let mut edits = Self::new();
        edits.insert(search, replace);
        edits
    }

    /// Build from a constant `(search, replace)` table.
    pub fn from_pairs(pairs: &[(&str, &str)]) -> Self {
        pairs
            .iter()
            .map(|(search, replace)| (search.to_string(), replace.to_string()))
            .collect()
    }

    pub fn insert(&mut self, search: impl Into<String>, replace: impl Into<String>) {
        self.0.insert(search.into(), replace.into());
    }

    /// Key-level union; entries from `other` win on identical search text.
    ///
    /// Only used to combine edits aimed at the same file.
    pub fn extend(&mut self, other: EditSet) {
        self.0.extend(other.0);
    }

    pub fn with(mut self, other: EditSet) -> Self {
        self.extend(other);
        self
    }

    pub fn get(&self, search: &str) -> Option<&str> {
        self.0.get(search).map(String::as_str)
    }

    pub fn contains(&self, search: &str) -> bool {
        self.0.contains_key(search)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, String> {
        self.0.iter()
    }
}

impl FromIterator<(String, String)> for EditSet {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a EditSet {
    type Item = (&'a String, &'a String);
    type IntoIter = btree_map::Iter<'a, String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Target file path (relative to the runtime source root) → its edits.
///
/// No file ever maps to an empty [`EditSet`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PatchSet(BTreeMap<String, EditSet>);

impl PatchSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Single-file fragment.
    pub fn one(file: impl Into<String>, edits: EditSet) -> Self {
        let mut set = Self::new();
        set.insert(file, edits);
        set
    }

    /// Insert or replace the edits for `file`. Empty edit sets are dropped.
    pub fn insert(&mut self, file: impl Into<String>, edits: EditSet) {
        if edits.is_empty() {
            return;
        }
        self.0.insert(file.into(), edits);
    }

    /// Merge `overlay` over `self`, last writer wins per file.
    ///
    /// A file present in both keeps only the overlay's edit set; the two edit
    /// sets are never unioned. Files only in the overlay are added.
    pub fn overlay(mut self, overlay: PatchSet) -> Self {
        for (file, edits) in overlay.0 {
            self.insert(file, edits);
        }
        self
    }

    pub fn get(&self, file: &str) -> Option<&EditSet> {
        self.0.get(file)
    }

    pub fn contains(&self, file: &str) -> bool {
        self.0.contains_key(file)
    }

    pub fn files(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, EditSet> {
        self.0.iter()
    }
}

impl<'a> IntoIterator for &'a PatchSet {
    type Item = (&'a String, &'a EditSet);
    type IntoIter = btree_map::Iter<'a, String, EditSet>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
