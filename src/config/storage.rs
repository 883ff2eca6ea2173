//! Storage Config

use std::path::PathBuf;

use clap::Args;

use crate::storage::{DEFAULT_STORAGE_KEY, FileStorage};

/// Cart storage settings.
#[derive(Debug, Args)]
pub struct StorageConfig {
    /// Directory holding the cart slot file
    #[arg(
        long,
        env = "AMBER_STORAGE_DIR",
        default_value = ".amber",
        global = true
    )]
    pub storage_dir: PathBuf,

    /// Name of the cart slot
    #[arg(
        long,
        env = "AMBER_STORAGE_KEY",
        default_value = DEFAULT_STORAGE_KEY,
        global = true
    )]
    pub storage_key: String,
}

impl StorageConfig {
    /// File slot for the configured directory and key.
    #[must_use]
    pub fn file_storage(&self) -> FileStorage {
        FileStorage::new(&self.storage_dir, &self.storage_key)
    }
}
