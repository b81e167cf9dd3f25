//! Derived validation state: failing messages keyed by field path.

use crate::path::FieldPath;
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::BTreeMap;

/// Messages of every failing rule, grouped by path in rule order.
///
/// The first message of a path is its primary error; that is what a
/// form shows. The rest stay available through [`Self::messages`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationResult {
    errors: BTreeMap<FieldPath, Vec<String>>,
}

impl ValidationResult {
    pub(crate) fn push(&mut self, path: FieldPath, message: String) {
        self.errors.entry(path).or_default().push(message);
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Primary error at `path`.
    pub fn get(&self, path: &FieldPath) -> Option<&str> {
        self.errors
            .get(path)
            .and_then(|messages| messages.first())
            .map(String::as_str)
    }

    /// All messages at `path`, primary first.
    pub fn messages(&self, path: &FieldPath) -> &[String] {
        self.errors.get(path).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Paths with at least one failing rule.
    pub fn paths(&self) -> impl Iterator<Item = &FieldPath> {
        self.errors.keys()
    }

    /// `(path, primary message)` pairs in path order.
    pub fn primary(&self) -> impl Iterator<Item = (&FieldPath, &str)> {
        self.errors
            .iter()
            .filter_map(|(path, messages)| messages.first().map(|m| (path, m.as_str())))
    }

    /// Number of paths with errors.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Total failing rules across all paths.
    pub fn message_count(&self) -> usize {
        self.errors.values().map(Vec::len).sum()
    }
}

/// Serialises as `{ "<path>": "<primary message>" }`.
impl Serialize for ValidationResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.errors.len()))?;
        for (path, message) in self.primary() {
            map.serialize_entry(&path.to_string(), message)?;
        }
        map.end()
    }
}
