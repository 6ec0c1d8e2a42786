//! Merge rules
//!
//! Two ways of combining an existing node with an incoming map:
//!
//! - [`merge`]: existing values win. Incoming keys only fill gaps. How far it
//!   descends is decided per node by the `_merge` marker.
//! - [`upsert`]: incoming values win. Keys absent from the incoming map are
//!   kept. Used when a map is `Set` onto an existing map.
//!
//! Both expect already-normalized input.

use crate::value::{Params, Value};
use std::fmt;
use std::str::FromStr;

/// Reserved key selecting the merge strategy of the node it sits in.
pub const MERGE_STRATEGY_KEY: &str = "_merge";

/// How a node takes incoming keys during [`merge`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum MergeStrategy {
    /// Fill absent keys and recurse where both sides are maps.
    #[default]
    Deep,
    /// Fill absent keys only; shared keys are left untouched.
    Shallow,
    /// Take nothing.
    None,
}

impl MergeStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            MergeStrategy::Deep => "deep",
            MergeStrategy::Shallow => "shallow",
            MergeStrategy::None => "none",
        }
    }

    /// Strategy declared directly on `node`. Ancestors play no part.
    pub fn of(node: &Params) -> Self {
        node.get(MERGE_STRATEGY_KEY)
            .and_then(Value::as_str)
            .and_then(|s| s.parse().ok())
            .unwrap_or_default()
    }
}

impl fmt::Display for MergeStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MergeStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "deep" => Ok(MergeStrategy::Deep),
            "shallow" => Ok(MergeStrategy::Shallow),
            "none" => Ok(MergeStrategy::None),
            other => Err(format!(
                "Unknown merge strategy: {} (must be 'deep', 'shallow' or 'none')",
                other
            )),
        }
    }
}

impl Params {
    pub fn merge_strategy(&self) -> MergeStrategy {
        MergeStrategy::of(self)
    }

    /// Tag this node with `strategy` by writing the marker key.
    pub fn set_merge_strategy(&mut self, strategy: MergeStrategy) {
        self.insert(MERGE_STRATEGY_KEY, strategy.as_str());
    }
}

/// Merge `incoming` into `existing` using the strategy declared on `existing`.
pub fn merge(existing: &mut Params, incoming: Params) {
    let strategy = existing.merge_strategy();
    merge_with(existing, incoming, strategy);
}

/// Merge with an explicit strategy for this node. Child nodes still use their
/// own marker.
pub fn merge_with(existing: &mut Params, incoming: Params, strategy: MergeStrategy) {
    match strategy {
        MergeStrategy::None => {}
        MergeStrategy::Shallow => {
            for (key, value) in incoming {
                existing.entry(key).or_insert(value);
            }
        }
        MergeStrategy::Deep => {
            for (key, value) in incoming {
                match existing.get_mut(&key) {
                    None => {
                        existing.insert(key, value);
                    }
                    Some(Value::Map(node)) => {
                        if let Value::Map(incoming_node) = value {
                            merge(node, incoming_node);
                        }
                    }
                    // existing leaf wins
                    Some(_) => {}
                }
            }
        }
    }
}

/// Write `incoming` into `existing`, overwriting conflicting leaves.
///
/// Where both sides hold a map for the same key the maps are upserted in turn,
/// so sibling keys set earlier survive.
pub fn upsert(existing: &mut Params, incoming: Params) {
    for (key, value) in incoming {
        match value {
            Value::Map(incoming_node) => {
                if let Some(Value::Map(node)) = existing.get_mut(&key) {
                    upsert(node, incoming_node);
                } else {
                    existing.insert(key, Value::Map(incoming_node));
                }
            }
            leaf => {
                existing.insert(key, leaf);
            }
        }
    }
}
