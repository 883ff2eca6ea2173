//! Cart
//!
//! Cart state, line identity and live pricing.

use thiserror::Error;

use crate::pricing::PricingError;

pub mod identity;
mod line;
mod store;

pub use identity::{AddOnSelection, IdentityKey, add_ons_signature, normalize_add_ons};
pub(crate) use line::StoredLine;
pub use line::{CartLine, InvalidStoredLine, LineId, PricedLine};
pub use store::CartStore;

/// Errors related to cart changes.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CartError {
    /// Lines cannot be added with a quantity of zero.
    #[error("quantity must be at least one")]
    InvalidQuantity,

    /// A merge would take the line quantity past its maximum.
    #[error("line {0} cannot hold any more units")]
    QuantityOverflow(LineId),

    /// The configuration could not be priced.
    #[error(transparent)]
    Pricing(#[from] PricingError),
}
