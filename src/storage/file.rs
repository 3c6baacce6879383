//! JSON-file backed durable store.
//!
//! All keys live in one flat JSON object. Writes use the temp file + rename
//! pattern so a crash mid-write never leaves a truncated file behind. A file
//! that no longer parses is replaced on the next write.

use anyhow::{anyhow, Context, Result};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::warn;

use super::DurableStore;
use crate::config::Config;

/// File name of the preferences store inside the config directory.
pub const PREFERENCES_FILE: &str = "preferences.json";

/// Durable store persisted as a JSON object on disk.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    // Serializes read-modify-write cycles from this process.
    write_lock: Mutex<()>,
}

impl FileStore {
    /// Creates a store backed by `path`. The file is created on first write.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Creates a store at the default location inside the config directory.
    pub fn open_default() -> Result<Self> {
        Ok(Self::new(Config::config_dir()?.join(PREFERENCES_FILE)))
    }

    /// Returns the backing file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_content(&self) -> Result<Option<String>> {
        if !self.path.exists() {
            return Ok(None);
        }

        fs::read_to_string(&self.path)
            .map(Some)
            .context(format!(
                "Failed to read preferences file: {}",
                self.path.display()
            ))
    }

    fn parse(&self, content: &str) -> Result<BTreeMap<String, String>> {
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        serde_json::from_str(content).context(format!(
            "Failed to parse preferences file: {}",
            self.path.display()
        ))
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>> {
        match self.read_content()? {
            Some(content) => self.parse(&content),
            None => Ok(BTreeMap::new()),
        }
    }

    fn write_all(&self, values: &BTreeMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).context(format!(
                "Failed to create preferences directory: {}",
                parent.display()
            ))?;
        }

        let content =
            serde_json::to_string_pretty(values).context("Failed to serialize preferences")?;

        let temp_path = self.path.with_extension("json.tmp");
        fs::write(&temp_path, content).context(format!(
            "Failed to write temp preferences file: {}",
            temp_path.display()
        ))?;

        fs::rename(&temp_path, &self.path).context(format!(
            "Failed to rename temp preferences file to: {}",
            self.path.display()
        ))?;

        Ok(())
    }
}

impl DurableStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| anyhow!("preferences write lock poisoned"))?;

        let mut values = match self.read_content()? {
            Some(content) => self.parse(&content).unwrap_or_else(|e| {
                warn!(error = %format!("{e:#}"), "Replacing unreadable preferences file");
                BTreeMap::new()
            }),
            None => BTreeMap::new(),
        };
        values.insert(key.to_string(), value.to_string());
        self.write_all(&values)
    }
}
