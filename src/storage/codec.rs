//! JSON encoding of the stored cart.

use tracing::warn;

use crate::{
    cart::{CartLine, StoredLine},
    storage::StorageError,
};

/// Encodes lines as a JSON array.
///
/// # Errors
///
/// Returns [`StorageError::Json`] if encoding fails.
pub fn encode_lines(lines: &[CartLine]) -> Result<String, StorageError> {
    Ok(serde_json::to_string(lines)?)
}

/// Decodes a JSON array of lines.
///
/// Blank input is an empty cart. Individual lines that cannot be restored are
/// dropped with a warning; anything else that fails to parse is an error.
///
/// # Errors
///
/// Returns [`StorageError::Json`] if the input is not an array of lines.
pub fn decode_lines(json: &str) -> Result<Vec<CartLine>, StorageError> {
    if json.trim().is_empty() {
        return Ok(Vec::new());
    }

    let stored: Vec<StoredLine> = serde_json::from_str(json)?;

    let lines = stored
        .into_iter()
        .filter_map(|stored| match stored.into_line() {
            Ok(line) => Some(line),
            Err(reason) => {
                warn!(%reason, "dropping stored cart line");
                None
            }
        })
        .collect();

    Ok(lines)
}
