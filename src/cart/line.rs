//! Cart lines

use std::fmt::{self, Display, Formatter};

use jiff::Timestamp;
use rand::Rng;
use rusty_money::{Money, iso::Currency};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    cart::identity::{AddOnSelection, IdentityKey, normalize_add_ons},
    catalog::{AddOn, MenuItem, Variation},
    members::PriceTier,
    pricing::{PricingError, extended_price, unit_price},
};

const RANDOM_SUFFIX_LEN: usize = 9;

/// Synthetic cart line identifier.
///
/// Generated ids take the form `{catalogItemId}:::CART:::{millis}-{random}` so
/// several lines for the same catalog item never share an id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LineId(String);

impl LineId {
    /// Separator between the catalog item id and the unique suffix.
    pub const SEPARATOR: &'static str = ":::CART:::";

    /// Wraps an existing line id.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generates a fresh line id for a catalog item.
    pub fn generate(catalog_item_id: &str) -> Self {
        let millis = Timestamp::now().as_millisecond();
        let mut rng = rand::thread_rng();

        let suffix: String = (0..RANDOM_SUFFIX_LEN)
            .map(|_| char::from_digit(rng.gen_range(0..36), 36).unwrap_or('0'))
            .collect();

        let separator = Self::SEPARATOR;

        Self(format!("{catalog_item_id}{separator}{millis}-{suffix}"))
    }

    /// Get the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The catalog item id encoded before the separator, if the id has one.
    pub fn encoded_catalog_item_id(&self) -> Option<&str> {
        self.0
            .split_once(Self::SEPARATOR)
            .map(|(catalog_item_id, _)| catalog_item_id)
    }
}

impl Display for LineId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for LineId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for LineId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// One row of the cart: a purchasable configuration and a quantity.
///
/// Prices are stored as add-time snapshots of the catalog. Totals are never
/// stored; see [`PricedLine`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    id: LineId,
    catalog_item_id: String,
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    image: Option<String>,
    quantity: u32,
    base_price: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    selected_variation: Option<Variation>,
    selected_add_ons: AddOnSelection,
}

impl CartLine {
    /// Snapshots a menu item configuration into a new line.
    pub fn new(
        id: LineId,
        item: &MenuItem,
        quantity: u32,
        variation: Option<&Variation>,
        add_ons: &[AddOn],
    ) -> Self {
        Self {
            id,
            catalog_item_id: item.id.clone(),
            name: item.name.clone(),
            image: item.image.clone(),
            quantity,
            base_price: item.base_price,
            selected_variation: variation.cloned(),
            selected_add_ons: normalize_add_ons(add_ons),
        }
    }

    /// Line identifier
    pub fn id(&self) -> &LineId {
        &self.id
    }

    /// Id of the catalog item this line was created from.
    pub fn catalog_item_id(&self) -> &str {
        &self.catalog_item_id
    }

    /// Item display name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Item image URL
    pub fn image(&self) -> Option<&str> {
        self.image.as_deref()
    }

    /// Quantity, always at least one while the line is in a cart.
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub(crate) fn set_quantity(&mut self, quantity: u32) {
        self.quantity = quantity;
    }

    /// Base price of the item at add time, in minor units.
    pub fn base_price(&self) -> i64 {
        self.base_price
    }

    /// Snapshot of the selected variation.
    pub fn selected_variation(&self) -> Option<&Variation> {
        self.selected_variation.as_ref()
    }

    /// Normalized add-on selection.
    pub fn selected_add_ons(&self) -> &[AddOn] {
        &self.selected_add_ons
    }

    /// Identity key of the line's configuration.
    pub fn identity_key(&self) -> IdentityKey {
        IdentityKey::new(
            &self.catalog_item_id,
            self.selected_variation.as_ref(),
            &self.selected_add_ons,
        )
    }

    /// Unit price of the line for a price tier, in minor units.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::Overflow`] if the price does not fit in minor units.
    pub fn unit_price(&self, tier: PriceTier) -> Result<i64, PricingError> {
        unit_price(
            self.base_price,
            self.selected_variation.as_ref(),
            &self.selected_add_ons,
            tier,
        )
    }
}

/// Why a stored line could not be restored.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InvalidStoredLine {
    /// Neither a catalog item id nor a separator-encoded line id was stored.
    #[error("line {0} has no recoverable catalog item id")]
    MissingCatalogItemId(String),

    /// The stored quantity was zero or negative.
    #[error("line {0} has a non-positive quantity")]
    NonPositiveQuantity(String),
}

/// Persisted form of a cart line.
///
/// Accepts lines written before the catalog item id was stored explicitly, and
/// ignores any stored `totalPrice`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct StoredLine {
    id: LineId,
    #[serde(default)]
    catalog_item_id: Option<String>,
    #[serde(default)]
    name: String,
    #[serde(default)]
    image: Option<String>,
    quantity: i64,
    #[serde(default)]
    base_price: i64,
    #[serde(default)]
    selected_variation: Option<Variation>,
    #[serde(default)]
    selected_add_ons: Vec<AddOn>,
}

impl StoredLine {
    /// Restores the cart line, recovering the catalog item id from the line id
    /// when it was not stored. Quantities beyond `u32::MAX` saturate.
    pub(crate) fn into_line(self) -> Result<CartLine, InvalidStoredLine> {
        if self.quantity <= 0 {
            return Err(InvalidStoredLine::NonPositiveQuantity(self.id.0));
        }

        let quantity = u32::try_from(self.quantity).unwrap_or(u32::MAX);

        let catalog_item_id = match self.catalog_item_id {
            Some(catalog_item_id) if !catalog_item_id.is_empty() => catalog_item_id,
            _ => self
                .id
                .encoded_catalog_item_id()
                .map(str::to_string)
                .ok_or_else(|| InvalidStoredLine::MissingCatalogItemId(self.id.0.clone()))?,
        };

        Ok(CartLine {
            id: self.id,
            catalog_item_id,
            name: self.name,
            image: self.image,
            quantity,
            base_price: self.base_price,
            selected_variation: self.selected_variation,
            selected_add_ons: normalize_add_ons(&self.selected_add_ons),
        })
    }
}

/// A cart line priced for the member context at the time it was read.
#[derive(Debug, Clone, Copy)]
pub struct PricedLine<'a> {
    line: &'a CartLine,
    unit_price: Money<'static, Currency>,
    line_total: Money<'static, Currency>,
}

impl<'a> PricedLine<'a> {
    /// Prices a line for a tier.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::Overflow`] if the price does not fit in minor units.
    pub fn new(
        line: &'a CartLine,
        tier: PriceTier,
        currency: &'static Currency,
    ) -> Result<Self, PricingError> {
        let unit = line.unit_price(tier)?;
        let total = extended_price(unit, line.quantity)?;

        Ok(Self {
            line,
            unit_price: Money::from_minor(unit, currency),
            line_total: Money::from_minor(total, currency),
        })
    }

    /// The underlying line.
    pub fn line(&self) -> &'a CartLine {
        self.line
    }

    /// Live unit price of the configuration.
    pub fn unit_price(&self) -> Money<'static, Currency> {
        self.unit_price
    }

    /// Live unit price multiplied by the line quantity.
    pub fn line_total(&self) -> Money<'static, Currency> {
        self.line_total
    }
}
