//! In-process storage slot.

use std::{cell::RefCell, rc::Rc};

use crate::{
    cart::CartLine,
    storage::{
        CartStorage, StorageError,
        codec::{decode_lines, encode_lines},
    },
};

/// A storage slot held in memory as encoded JSON.
///
/// Clones share the slot, so a test can keep a handle to inspect what a cart
/// wrote or to seed what the next cart will read.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    slot: Rc<RefCell<Option<String>>>,
}

impl MemoryStorage {
    /// Creates an empty slot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a slot that already holds the given contents.
    #[must_use]
    pub fn with_contents(contents: impl Into<String>) -> Self {
        Self {
            slot: Rc::new(RefCell::new(Some(contents.into()))),
        }
    }

    /// The raw slot contents.
    pub fn contents(&self) -> Option<String> {
        self.slot.borrow().clone()
    }

    /// Empties the slot.
    pub fn clear(&self) {
        self.slot.replace(None);
    }
}

impl CartStorage for MemoryStorage {
    fn load_lines(&self) -> Result<Vec<CartLine>, StorageError> {
        match self.slot.borrow().as_deref() {
            Some(contents) => decode_lines(contents),
            None => Ok(Vec::new()),
        }
    }

    fn save_lines(&self, lines: &[CartLine]) -> Result<(), StorageError> {
        let encoded = encode_lines(lines)?;

        self.slot.replace(Some(encoded));

        Ok(())
    }
}
