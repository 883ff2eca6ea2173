//! Cart persistence
//!
//! The cart is persisted wholesale as a JSON array in a single string-keyed
//! slot, overwritten after every change.

use std::io;

use thiserror::Error;

use crate::cart::CartLine;

pub mod codec;
mod file;
mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

/// Slot key the storefront keeps its cart under.
pub const DEFAULT_STORAGE_KEY: &str = "amber_cartItems";

/// Errors reading or writing persisted cart state.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The slot could not be read or written.
    #[error("cart storage IO failed: {0}")]
    Io(#[from] io::Error),

    /// The slot contents could not be encoded or decoded.
    #[error("cart storage contents are invalid: {0}")]
    Json(#[from] serde_json::Error),
}

/// Durable storage for the cart's lines.
pub trait CartStorage {
    /// Reads the stored lines. An empty or absent slot is an empty cart.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the slot cannot be read or decoded.
    fn load_lines(&self) -> Result<Vec<CartLine>, StorageError>;

    /// Replaces the stored lines.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the lines cannot be encoded or written.
    fn save_lines(&self, lines: &[CartLine]) -> Result<(), StorageError>;
}
