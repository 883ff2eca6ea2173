//! Pricing
//!
//! Tiered unit prices. Nothing here caches: callers resolve against the member
//! context at the moment the price is read.

use thiserror::Error;

use crate::{
    catalog::{AddOn, Variation},
    members::{MemberContext, PriceTier},
};

/// Errors that can occur while calculating prices.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PricingError {
    /// Minor-unit arithmetic overflowed.
    #[error("price arithmetic overflowed")]
    Overflow,
}

/// Resolves the price contribution of a variation for a price tier.
///
/// No variation contributes nothing. Resellers get the reseller override and end
/// users the member override when the variation defines one; every other case
/// falls back to the variation's own price.
pub fn resolve_variation_price(variation: Option<&Variation>, tier: PriceTier) -> i64 {
    let Some(variation) = variation else {
        return 0;
    };

    match tier {
        PriceTier::Reseller => variation.reseller_price.unwrap_or(variation.price),
        PriceTier::Member => variation.member_price.unwrap_or(variation.price),
        PriceTier::Base => variation.price,
    }
}

/// Resolves the price contribution of a variation for the current member.
pub fn resolve_variation_price_for<C: MemberContext + ?Sized>(
    variation: Option<&Variation>,
    context: &C,
) -> i64 {
    resolve_variation_price(variation, PriceTier::for_context(context))
}

/// Sums the price of a set of add-ons, each multiplied by its quantity.
///
/// # Errors
///
/// Returns [`PricingError::Overflow`] if the sum does not fit in minor units.
pub fn add_ons_price(add_ons: &[AddOn]) -> Result<i64, PricingError> {
    add_ons.iter().try_fold(0_i64, |total, add_on| {
        add_on
            .price
            .checked_mul(i64::from(add_on.effective_quantity()))
            .and_then(|price| total.checked_add(price))
            .ok_or(PricingError::Overflow)
    })
}

/// Calculates the unit price of a configured item: base price, plus the resolved
/// variation price, plus the add-ons.
///
/// # Errors
///
/// Returns [`PricingError::Overflow`] if the sum does not fit in minor units.
pub fn unit_price(
    base_price: i64,
    variation: Option<&Variation>,
    add_ons: &[AddOn],
    tier: PriceTier,
) -> Result<i64, PricingError> {
    let add_ons = add_ons_price(add_ons)?;

    base_price
        .checked_add(resolve_variation_price(variation, tier))
        .and_then(|price| price.checked_add(add_ons))
        .ok_or(PricingError::Overflow)
}

/// Multiplies a unit price by a quantity.
///
/// # Errors
///
/// Returns [`PricingError::Overflow`] if the product does not fit in minor units.
pub fn extended_price(unit_price: i64, quantity: u32) -> Result<i64, PricingError> {
    unit_price
        .checked_mul(i64::from(quantity))
        .ok_or(PricingError::Overflow)
}
