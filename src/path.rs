//! Key path resolution
//!
//! Turns a dotted key such as `Params.Author.Name` into the folded segments
//! `["params", "author", "name"]` used to walk the tree. A dot is always a
//! separator; there is no escaping.

use std::fmt;

/// Fold a single key to its canonical (lower-case) form.
pub fn fold_key(key: &str) -> String {
    key.to_lowercase()
}

/// Ordered, case-folded segments addressing a node. Empty means the root.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct KeyPath {
    segments: Vec<String>,
}

impl KeyPath {
    /// The zero-length path.
    pub fn root() -> Self {
        Self::default()
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Split into the final segment and its parent segments.
    ///
    /// Returns `None` for the root path.
    pub fn split_last(&self) -> Option<(&String, &[String])> {
        self.segments.split_last()
    }
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join("."))
    }
}

impl From<&str> for KeyPath {
    fn from(key: &str) -> Self {
        resolve(key)
    }
}

/// Resolve a dotted key into a folded path.
pub fn resolve(key: &str) -> KeyPath {
    if key.is_empty() {
        return KeyPath::root();
    }

    KeyPath {
        segments: key.split('.').map(fold_key).collect(),
    }
}
