//! Durable per-client key/value storage.
//!
//! Controllers persist their selections through [`DurableStore`]. Every
//! operation is fallible because real storage can be disabled or sandboxed;
//! callers in the theme core absorb these errors and keep going with
//! in-memory state.

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::{MemoryStore, UnavailableStore};

use anyhow::Result;

/// Storage key for the selected palette name.
pub const THEME_KEY: &str = "theme";

/// Storage key for the selected color mode.
pub const COLOR_MODE_KEY: &str = "colorMode";

/// Storage key for the selected layout variant.
pub const LAYOUT_KEY: &str = "layout";

/// String-valued key/value storage that survives across sessions.
///
/// Implementations use interior mutability so a single store can be shared
/// between controllers behind an `Arc`.
pub trait DurableStore: Send + Sync {
    /// Reads the value for `key`, or `None` when nothing is stored.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<()>;
}
