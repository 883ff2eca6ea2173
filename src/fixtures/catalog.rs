//! Catalog Fixtures

use rustc_hash::FxHashMap;
use serde::Deserialize;

use crate::{
    catalog::{AddOn, MenuItem, Variation},
    fixtures::{FixtureError, PriceReader},
};

/// Wrapper for menu items in YAML
#[derive(Debug, Deserialize)]
pub struct CatalogFixture {
    /// Map of menu item id -> menu item fixture
    pub items: FxHashMap<String, MenuItemFixture>,
}

/// Menu Item Fixture
#[derive(Debug, Deserialize)]
pub struct MenuItemFixture {
    /// Item name
    pub name: String,

    /// Item description
    #[serde(default)]
    pub description: Option<String>,

    /// Item image URL
    #[serde(default)]
    pub image: Option<String>,

    /// Item category
    #[serde(default)]
    pub category: Option<String>,

    /// Base price (e.g., "100 PHP")
    pub price: String,

    /// Featured flag
    #[serde(default)]
    pub popular: bool,

    /// Whether the item can be ordered
    #[serde(default = "available_by_default")]
    pub available: bool,

    /// Variations, in display order
    #[serde(default)]
    pub variations: Vec<VariationFixture>,

    /// Add-ons, in display order
    #[serde(default)]
    pub add_ons: Vec<AddOnFixture>,
}

fn available_by_default() -> bool {
    true
}

/// Variation Fixture
#[derive(Debug, Deserialize)]
pub struct VariationFixture {
    /// Variation id
    pub id: String,

    /// Variation name
    pub name: String,

    /// Regular price (e.g., "20 PHP")
    pub price: String,

    /// Price for signed-in end users
    #[serde(default)]
    pub member_price: Option<String>,

    /// Price for resellers
    #[serde(default)]
    pub reseller_price: Option<String>,
}

/// Add-on Fixture
#[derive(Debug, Deserialize)]
pub struct AddOnFixture {
    /// Add-on id
    pub id: String,

    /// Add-on name
    pub name: String,

    /// Price per unit (e.g., "3 PHP")
    pub price: String,

    /// Default quantity
    #[serde(default)]
    pub quantity: Option<u32>,
}

impl MenuItemFixture {
    /// Builds the menu item, reading every price through `prices`.
    ///
    /// # Errors
    ///
    /// Returns an error if a price is malformed or in a different currency.
    pub fn into_menu_item(
        self,
        id: String,
        prices: &mut PriceReader,
    ) -> Result<MenuItem, FixtureError> {
        let variations = self
            .variations
            .into_iter()
            .map(|variation| variation.into_variation(prices))
            .collect::<Result<Vec<_>, _>>()?;

        let add_ons = self
            .add_ons
            .into_iter()
            .map(|add_on| add_on.into_add_on(prices))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(MenuItem {
            id,
            name: self.name,
            description: self.description,
            image: self.image,
            category: self.category,
            base_price: prices.read(&self.price)?,
            popular: self.popular,
            available: self.available,
            variations,
            add_ons,
        })
    }
}

impl VariationFixture {
    fn into_variation(self, prices: &mut PriceReader) -> Result<Variation, FixtureError> {
        Ok(Variation {
            id: self.id,
            name: self.name,
            price: prices.read(&self.price)?,
            member_price: self
                .member_price
                .as_deref()
                .map(|price| prices.read(price))
                .transpose()?,
            reseller_price: self
                .reseller_price
                .as_deref()
                .map(|price| prices.read(price))
                .transpose()?,
        })
    }
}

impl AddOnFixture {
    fn into_add_on(self, prices: &mut PriceReader) -> Result<AddOn, FixtureError> {
        Ok(AddOn {
            id: self.id,
            name: self.name,
            price: prices.read(&self.price)?,
            quantity: self.quantity,
        })
    }
}
