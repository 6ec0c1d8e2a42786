//! cfgtree: Case-Insensitive Hierarchical Configuration Store
//!
//! An in-memory tree of configuration values addressed by dotted keys, safe to
//! share between threads. Keys are folded to lower case at every depth. Maps
//! can be combined two ways: `set` upserts (incoming values win), `merge`
//! fills gaps (existing values win), with a per-node `_merge` marker selecting
//! a shallow merge.
//!
//! ```
//! use cfgtree::Store;
//! use serde_json::json;
//!
//! let store = Store::new();
//! store.set("Params", json!({"Author": "jane"}));
//! store.merge("params", json!({"author": "ignored", "lang": "en"}));
//!
//! assert_eq!(store.get_string("params.AUTHOR"), "jane");
//! assert_eq!(store.get_string("params.lang"), "en");
//! ```

pub mod error;
pub mod logging;
pub mod merge;
pub mod normalize;
pub mod path;
pub mod store;
pub mod value;

pub use error::{NormalizeError, StoreError};
pub use merge::{MergeStrategy, MERGE_STRATEGY_KEY};
pub use path::KeyPath;
pub use store::Store;
pub use value::{Params, RawValue, Value};
