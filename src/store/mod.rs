//! Configuration Store
//!
//! A case-insensitive tree of [`Params`] behind a single lock. Keys are dotted
//! paths (`params.author.name`); the empty key addresses the root.
//!
//! Writes normalize the incoming value before taking the lock and then run to
//! completion under the write guard, intermediate node creation included.
//! Reads clone out under the read guard, so callers never hold references into
//! the tree and `get("")` is a consistent snapshot.
//!
//! Share a store between threads with `Arc<Store>`.

mod typed;

use crate::error::{NormalizeError, StoreError};
use crate::merge::{self, MergeStrategy};
use crate::normalize::{normalize, normalize_raw};
use crate::path::{self, KeyPath};
use crate::value::{Params, RawValue, Value};
use parking_lot::RwLock;
use serde::de::DeserializeOwned;
use tracing::{debug, trace, warn};

/// Thread-safe hierarchical configuration store.
#[derive(Debug, Default)]
pub struct Store {
    root: RwLock<Params>,
}

impl Store {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `value` at `key`.
    ///
    /// Missing intermediate nodes are created. When both the current value and
    /// `value` are maps they are upserted (incoming keys win, others are kept);
    /// otherwise the value is replaced.
    pub fn set(&self, key: &str, value: impl Into<Value>) {
        let path = path::resolve(key);
        let value = normalize(value.into());
        let mut root = self.root.write();
        set_at(&mut root, &path, value);
    }

    /// [`Store::set`] for any-keyed input. Fails without touching the tree if a
    /// key cannot be folded.
    pub fn set_raw(&self, key: &str, value: RawValue) -> Result<(), NormalizeError> {
        let value = normalize_raw(value)?;
        let path = path::resolve(key);
        let mut root = self.root.write();
        set_at(&mut root, &path, value);
        Ok(())
    }

    /// Value at `key`, or the whole tree for the empty key.
    pub fn get(&self, key: &str) -> Option<Value> {
        let path = path::resolve(key);
        let root = self.root.read();
        if path.is_root() {
            return Some(Value::Map(root.clone()));
        }
        lookup(&root, &path).cloned()
    }

    /// Merge the map `value` into the node at `key`.
    ///
    /// Existing values win. The node's own `_merge` marker decides whether
    /// shared map keys are merged recursively (default) or left alone
    /// (`shallow`). A missing node is created empty first; an existing leaf
    /// at `key` is kept and the merge does nothing.
    pub fn merge(&self, key: &str, value: impl Into<Value>) {
        let path = path::resolve(key);
        match normalize(value.into()) {
            Value::Map(incoming) => {
                let mut root = self.root.write();
                merge_at(&mut root, &path, incoming);
            }
            other => {
                warn!(key = %path, kind = other.kind(), "Ignoring merge of non-map value");
            }
        }
    }

    /// [`Store::merge`] for any-keyed input.
    pub fn merge_raw(&self, key: &str, value: RawValue) -> Result<(), NormalizeError> {
        let value = normalize_raw(value)?;
        self.merge(key, value);
        Ok(())
    }

    /// Add top-level keys that are not set yet. Nothing is merged below the
    /// top level and the root marker is ignored.
    pub fn set_defaults(&self, defaults: impl Into<Value>) {
        match normalize(defaults.into()) {
            Value::Map(incoming) => {
                let mut root = self.root.write();
                trace!(keys = incoming.len(), "set defaults");
                merge::merge_with(&mut root, incoming, MergeStrategy::Shallow);
            }
            other => {
                warn!(kind = other.kind(), "Ignoring non-map defaults");
            }
        }
    }

    /// Whether anything is stored at `key`. An empty map counts.
    pub fn is_set(&self, key: &str) -> bool {
        let path = path::resolve(key);
        if path.is_root() {
            return true;
        }
        lookup(&self.root.read(), &path).is_some()
    }

    /// Top-level keys, sorted.
    pub fn keys(&self) -> Vec<String> {
        self.root.read().keys().cloned().collect()
    }

    /// Deserialize the subtree at `key` into `T`.
    pub fn decode<T: DeserializeOwned>(&self, key: &str) -> Result<T, StoreError> {
        let value = self
            .get(key)
            .ok_or_else(|| StoreError::KeyNotFound(key.to_string()))?;
        let json = serde_json::to_value(&value).map_err(|source| StoreError::Decode {
            key: key.to_string(),
            source,
        })?;
        serde_json::from_value(json).map_err(|source| StoreError::Decode {
            key: key.to_string(),
            source,
        })
    }

    /// Run `f` against the value at `key` under the read guard.
    fn with_value<R>(&self, key: &str, f: impl FnOnce(Option<&Value>) -> R) -> R {
        let path = path::resolve(key);
        let root = self.root.read();
        if path.is_root() {
            let whole = Value::Map(root.clone());
            return f(Some(&whole));
        }
        f(lookup(&root, &path))
    }
}

fn lookup<'a>(root: &'a Params, path: &KeyPath) -> Option<&'a Value> {
    let (last, parents) = path.split_last()?;
    let mut current = root;
    for segment in parents {
        current = current.get(segment)?.as_map()?;
    }
    current.get(last)
}

/// Walk to the node holding `segments`, optionally creating missing maps.
///
/// Returns `None` when a leaf sits on the path.
fn descend_mut<'a>(root: &'a mut Params, segments: &[String], create: bool) -> Option<&'a mut Params> {
    let mut current = root;
    for segment in segments {
        let next = if create {
            current
                .entry(segment.clone())
                .or_insert_with(|| Value::Map(Params::new()))
        } else {
            current.get_mut(segment)?
        };
        current = match next {
            Value::Map(node) => node,
            _ => return None,
        };
    }
    Some(current)
}

fn set_at(root: &mut Params, path: &KeyPath, value: Value) {
    trace!(key = %path, kind = value.kind(), "set");

    let Some((last, parents)) = path.split_last() else {
        match value {
            Value::Map(incoming) => merge::upsert(root, incoming),
            other => warn!(kind = other.kind(), "Ignoring non-map value set at the root"),
        }
        return;
    };

    let Some(parent) = descend_mut(root, parents, true) else {
        warn!(key = %path, "Ignoring set below an existing leaf");
        return;
    };

    match value {
        Value::Map(incoming) => {
            if let Some(Value::Map(existing)) = parent.get_mut(last) {
                merge::upsert(existing, incoming);
            } else {
                parent.insert(last.clone(), Value::Map(incoming));
            }
        }
        leaf => {
            parent.insert(last.clone(), leaf);
        }
    }
}

fn merge_at(root: &mut Params, path: &KeyPath, incoming: Params) {
    trace!(key = %path, keys = incoming.len(), "merge");

    let target = match path.split_last() {
        None => root,
        Some((last, parents)) => {
            let Some(parent) = descend_mut(root, parents, true) else {
                warn!(key = %path, "Ignoring merge below an existing leaf");
                return;
            };
            match parent
                .entry(last.clone())
                .or_insert_with(|| Value::Map(Params::new()))
            {
                Value::Map(node) => node,
                existing => {
                    debug!(key = %path, kind = existing.kind(), "Existing leaf wins over merged map");
                    return;
                }
            }
        }
    };

    merge::merge(target, incoming);
}
