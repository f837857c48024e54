// Copyright 2025 Eric Jingryd (tidynest@proton.me)
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Mapping-config transaction with automatic backups
//!
//! Provides atomic write operations so the mapping table is never left
//! half-written on disk.

use atomic_write_file::AtomicWriteFile;
use std::{fs, io::Write, path::PathBuf};

use crate::store::{FileMappingStore, StoreError};

/// Atomic mapping-config transaction with automatic backup.
///
/// # Lifecycle
///
/// 1. `begin()` - Creates a timestamped backup immediately (the rollback
///    point exists before any modification is attempted)
/// 2. Caller renders the new content in memory
/// 3. `commit()` - Writes atomically, or `rollback()` - Restores the
///    backup
///
/// # Example
///
/// ```no_run
/// use rebind_manager::store::{FileMappingStore, StoreTransaction};
///
/// let store = FileMappingStore::open("/tmp/inputmap.conf".into())?;
/// let tx = StoreTransaction::begin(&store)?;
/// tx.commit("# Input mappings\ninput = Jump, , SpaceBar\n")?;
/// # Ok::<(), rebind_manager::store::StoreError>(())
/// ```
pub struct StoreTransaction<'a> {
    store: &'a FileMappingStore,
    backup_path: Option<PathBuf>,
}

impl<'a> StoreTransaction<'a> {
    /// Begins a new transaction by creating a timestamped backup.
    ///
    /// # Errors
    ///
    /// Returns an error if the current config cannot be read or the
    /// backup file cannot be written. No changes have been made in that
    /// case.
    pub fn begin(store: &'a FileMappingStore) -> Result<Self, StoreError> {
        let backup_path = store.create_timestamped_backup()?;

        Ok(Self {
            store,
            backup_path: Some(backup_path),
        })
    }

    /// Commits the transaction by atomically writing the new content.
    ///
    /// The write is atomic at the filesystem level (temp file + rename),
    /// so the config is never in a partially-written state. The backup
    /// created during `begin()` remains available for manual rollback.
    ///
    /// Consumes the transaction, preventing accidental double-commits.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::WriteFailed` if the temp file cannot be
    /// created, written or renamed. The original config is unchanged and
    /// the backup still exists.
    pub fn commit(self, new_content: &str) -> Result<(), StoreError> {
        let mut file = AtomicWriteFile::open(self.store.config_path())
            .map_err(|e| StoreError::WriteFailed(e.to_string()))?;

        file.write_all(new_content.as_bytes())
            .map_err(|e| StoreError::WriteFailed(e.to_string()))?;

        file.commit()
            .map_err(|e| StoreError::WriteFailed(e.to_string()))?;

        Ok(())
    }

    /// Restores the backup created at `begin()`, discarding any changes
    /// committed since.
    ///
    /// Consumes the transaction.
    pub fn rollback(self) -> Result<(), StoreError> {
        let Some(backup_path) = self.backup_path else {
            return Ok(());
        };

        let backup_content = fs::read_to_string(&backup_path)
            .map_err(|e| StoreError::BackupFailed(e.to_string()))?;

        let mut file = AtomicWriteFile::open(self.store.config_path())
            .map_err(|e| StoreError::WriteFailed(e.to_string()))?;

        file.write_all(backup_content.as_bytes())
            .map_err(|e| StoreError::WriteFailed(e.to_string()))?;

        file.commit()
            .map_err(|e| StoreError::WriteFailed(e.to_string()))?;

        Ok(())
    }

    /// Path of the backup created when the transaction began.
    pub fn backup_path(&self) -> Option<&std::path::Path> {
        self.backup_path.as_deref()
    }
}
