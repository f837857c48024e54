//! Mapping store: the persistent action-to-key table
//!
//! The rebind engine mutates bindings through the [`MappingStore`]
//! interface, injected at container construction so tests can use
//! in-memory doubles. Per committed rebind the container calls, in this
//! order: remove the old mapping, add the new one, `persist`, then
//! `rebuild_runtime_tables`.
//!
//! Two implementations ship with the crate:
//!
//! - [`FileMappingStore`]: file-backed, with timestamped backups and
//!   atomic writes (temp-file-then-rename). A failed write leaves the
//!   original file untouched.
//! - [`MemoryMappingStore`]: in-memory, for tests and embedded hosts
//!   that persist elsewhere.
//!
//! # Example
//!
//! ```no_run
//! use rebind_manager::store::{FileMappingStore, MappingStore};
//!
//! let store = FileMappingStore::open("/tmp/inputmap.conf".into())?;
//! let jump = store.mappings_for_action("Jump");
//! println!("Jump has {} bindings", jump.len());
//! # Ok::<(), rebind_manager::store::StoreError>(())
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;
use thiserror::Error;

use crate::core::collision::KeyUsageIndex;
use crate::core::parser::{parse_mapping_file, render_mapping_file, ParseError};
use crate::core::types::ActionMapping;

pub mod transaction;

pub use transaction::StoreTransaction;

#[cfg(test)]
mod tests;

/// Errors that can occur in the mapping store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Mapping config file does not exist.
    #[error("Mapping config not found: {0}")]
    NotFound(PathBuf),

    /// Backup directory cannot be created or written to.
    #[error("Backup directory not writable: {0}")]
    BackupDirNotWritable(PathBuf),

    /// Failed to create backup file.
    #[error("Failed to create backup: {0}")]
    BackupFailed(String),

    /// Atomic write operation failed.
    #[error("Atomic write failed: {0}")]
    WriteFailed(String),

    /// Mapping config could not be parsed.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Generic I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// The action-to-key mapping table the rebind engine mutates.
///
/// Mutations per committed rebind follow a fixed order: remove old entry,
/// add new entry, persist, rebuild runtime tables. The in-memory table
/// must reflect a change even when `persist` fails (best-effort
/// persistence; callers report the error upward).
pub trait MappingStore {
    /// Returns every mapping for `action`, in registration order.
    fn mappings_for_action(&self, action: &str) -> Vec<ActionMapping>;

    /// Appends a mapping (most recent registration last).
    fn add_mapping(&mut self, mapping: ActionMapping);

    /// Removes the first mapping equal to `mapping`, if present.
    fn remove_mapping(&mut self, mapping: &ActionMapping);

    /// Writes the table to durable storage.
    fn persist(&mut self) -> Result<(), StoreError>;

    /// Rebuilds the runtime key-usage tables after a change.
    fn rebuild_runtime_tables(&mut self);
}

/// Supplies the factory-default mappings used by reset-to-defaults.
///
/// A provider may define zero, one or several defaults per action.
pub trait DefaultsProvider {
    /// Returns the default mappings for `action`, in registration order.
    fn default_mappings_for_action(&self, action: &str) -> Vec<ActionMapping>;
}

/// Defaults provider backed by an in-memory mapping list.
#[derive(Clone, Debug, Default)]
pub struct StaticDefaults {
    mappings: Vec<ActionMapping>,
}

impl StaticDefaults {
    /// Creates a provider from a flat mapping list.
    pub fn new(mappings: Vec<ActionMapping>) -> Self {
        Self { mappings }
    }
}

impl DefaultsProvider for StaticDefaults {
    fn default_mappings_for_action(&self, action: &str) -> Vec<ActionMapping> {
        self.mappings
            .iter()
            .filter(|m| m.action == action)
            .cloned()
            .collect()
    }
}

/// File-backed mapping store with atomic writes and backup support.
///
/// Reads the whole config at `open`, keeps the working set in memory and
/// rewrites the file on `persist` through a [`StoreTransaction`]
/// (timestamped backup, then atomic write).
#[derive(Debug)]
pub struct FileMappingStore {
    /// Path to the mapping config file.
    config_path: PathBuf,
    /// Directory receiving timestamped backups, sibling of the config.
    backup_dir: PathBuf,
    /// Working set, in file (registration) order.
    mappings: Vec<ActionMapping>,
    /// Runtime key-usage table, rebuilt after every committed change.
    index: KeyUsageIndex,
}

impl FileMappingStore {
    /// Opens a mapping config file.
    ///
    /// Validates that the file exists, creates the `backups/` directory
    /// next to it and parses the full mapping table. If the config is a
    /// symlink a warning is logged but the operation continues.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the config file doesn't exist,
    /// `StoreError::BackupDirNotWritable` if the backup directory cannot
    /// be created, or `StoreError::Parse` for malformed content.
    pub fn open(config_path: PathBuf) -> Result<Self, StoreError> {
        if !config_path.exists() {
            return Err(StoreError::NotFound(config_path));
        }

        if config_path.read_link().is_ok() {
            log::warn!(
                "mapping config is a symlink: {}",
                config_path.display()
            );
        }

        let backup_dir = config_path
            .parent()
            .ok_or_else(|| {
                StoreError::BackupDirNotWritable(PathBuf::from(
                    "Config file has no parent directory",
                ))
            })?
            .join("backups");

        if !backup_dir.exists() {
            fs::create_dir_all(&backup_dir)
                .map_err(|_| StoreError::BackupDirNotWritable(backup_dir.clone()))?;
        }

        if backup_dir.metadata()?.permissions().readonly() {
            return Err(StoreError::BackupDirNotWritable(backup_dir));
        }

        let content = fs::read_to_string(&config_path)?;
        let mappings = parse_mapping_file(&content)?;
        let index = KeyUsageIndex::from_mappings(&mappings);

        Ok(Self {
            config_path,
            backup_dir,
            mappings,
            index,
        })
    }

    /// Returns the full working set in registration order.
    pub fn mappings(&self) -> &[ActionMapping] {
        &self.mappings
    }

    /// Returns the runtime key-usage table.
    pub fn usage_index(&self) -> &KeyUsageIndex {
        &self.index
    }

    /// Path to the mapping config file.
    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Renders the working set into config file content.
    fn render(&self) -> String {
        render_mapping_file(&self.mappings)
    }

    /// Copies the current config into the backup directory.
    ///
    /// Backup name: `<file>.<YYYY-MM-DD_HHMMSS>`.
    pub(crate) fn create_timestamped_backup(&self) -> Result<PathBuf, StoreError> {
        let content = fs::read_to_string(&self.config_path)?;

        let timestamp = Local::now().format("%Y-%m-%d_%H%M%S");

        let original_name = self
            .config_path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| {
                StoreError::BackupFailed(format!(
                    "config path has no valid file name: {}",
                    self.config_path.display()
                ))
            })?;

        let backup_filename = format!("{}.{}", original_name, timestamp);
        let backup_path = self.backup_dir.join(&backup_filename);

        fs::write(&backup_path, &content)?;

        Ok(backup_path)
    }
}

impl MappingStore for FileMappingStore {
    fn mappings_for_action(&self, action: &str) -> Vec<ActionMapping> {
        self.mappings
            .iter()
            .filter(|m| m.action == action)
            .cloned()
            .collect()
    }

    fn add_mapping(&mut self, mapping: ActionMapping) {
        self.mappings.push(mapping);
    }

    fn remove_mapping(&mut self, mapping: &ActionMapping) {
        if let Some(pos) = self.mappings.iter().position(|m| m == mapping) {
            self.mappings.remove(pos);
        }
    }

    fn persist(&mut self) -> Result<(), StoreError> {
        let content = self.render();
        StoreTransaction::begin(self)?.commit(&content)
    }

    fn rebuild_runtime_tables(&mut self) {
        self.index = KeyUsageIndex::from_mappings(&self.mappings);
        log::debug!(
            "rebuilt runtime tables: {} mappings",
            self.index.total_mappings()
        );
    }
}

/// In-memory mapping store.
///
/// `persist` is a no-op; useful for tests and for hosts that own their
/// persistence.
#[derive(Debug, Default)]
pub struct MemoryMappingStore {
    mappings: Vec<ActionMapping>,
    index: KeyUsageIndex,
}

impl MemoryMappingStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store seeded with the given mappings.
    pub fn with_mappings(mappings: Vec<ActionMapping>) -> Self {
        let index = KeyUsageIndex::from_mappings(&mappings);
        Self { mappings, index }
    }

    /// Returns the full working set in registration order.
    pub fn mappings(&self) -> &[ActionMapping] {
        &self.mappings
    }

    /// Returns the runtime key-usage table.
    pub fn usage_index(&self) -> &KeyUsageIndex {
        &self.index
    }
}

impl MappingStore for MemoryMappingStore {
    fn mappings_for_action(&self, action: &str) -> Vec<ActionMapping> {
        self.mappings
            .iter()
            .filter(|m| m.action == action)
            .cloned()
            .collect()
    }

    fn add_mapping(&mut self, mapping: ActionMapping) {
        self.mappings.push(mapping);
    }

    fn remove_mapping(&mut self, mapping: &ActionMapping) {
        if let Some(pos) = self.mappings.iter().position(|m| m == mapping) {
            self.mappings.remove(pos);
        }
    }

    fn persist(&mut self) -> Result<(), StoreError> {
        Ok(())
    }

    fn rebuild_runtime_tables(&mut self) {
        self.index = KeyUsageIndex::from_mappings(&self.mappings);
    }
}
