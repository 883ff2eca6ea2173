//! File-backed storage slot.

use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use crate::{
    cart::CartLine,
    storage::{
        CartStorage, StorageError,
        codec::{decode_lines, encode_lines},
    },
};

/// A storage slot kept as `<dir>/<key>.json`.
///
/// Writes go to a sibling temporary file which then replaces the slot, so a
/// failed write leaves the previous contents intact.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    /// Creates a slot for `key` inside `dir`. Nothing is touched until the first
    /// load or save.
    #[must_use]
    pub fn new(dir: impl AsRef<Path>, key: &str) -> Self {
        Self {
            path: dir.as_ref().join(format!("{key}.json")),
        }
    }

    /// Path of the slot file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temporary_path(&self) -> PathBuf {
        self.path.with_extension("json.tmp")
    }
}

impl CartStorage for FileStorage {
    fn load_lines(&self) -> Result<Vec<CartLine>, StorageError> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => decode_lines(&contents),
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(Vec::new()),
            Err(error) => Err(error.into()),
        }
    }

    fn save_lines(&self, lines: &[CartLine]) -> Result<(), StorageError> {
        let encoded = encode_lines(lines)?;

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let temporary = self.temporary_path();

        fs::write(&temporary, encoded)?;
        fs::rename(&temporary, &self.path)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{cart::LineId, catalog::MenuItem, storage::DEFAULT_STORAGE_KEY};

    use super::*;

    #[test]
    fn slot_path_uses_key() {
        let storage = FileStorage::new("/tmp/amber", DEFAULT_STORAGE_KEY);

        assert_eq!(storage.path(), Path::new("/tmp/amber/amber_cartItems.json"));
    }

    #[test]
    fn missing_file_loads_nothing() -> TestResult {
        let dir = tempfile::tempdir()?;

        let storage = FileStorage::new(dir.path(), DEFAULT_STORAGE_KEY);

        assert!(storage.load_lines()?.is_empty());

        Ok(())
    }

    #[test]
    fn save_creates_directory_and_round_trips() -> TestResult {
        let dir = tempfile::tempdir()?;
        let storage = FileStorage::new(dir.path().join("nested"), DEFAULT_STORAGE_KEY);

        let item = MenuItem::new("pass", "Weekly Pass", 500);
        let lines = vec![CartLine::new(LineId::generate("pass"), &item, 3, None, &[])];

        storage.save_lines(&lines)?;

        assert!(storage.path().exists());
        assert!(!storage.temporary_path().exists());
        assert_eq!(storage.load_lines()?, lines);

        Ok(())
    }
}
