//! Catalog
//!
//! Menu items, their variations and add-ons. The cart copies fields out of these
//! at add time and never mutates them.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use slotmap::{SlotMap, new_key_type};

new_key_type! {
    /// Menu Item Key
    pub struct MenuItemKey;
}

/// A purchasable catalog entry, such as a bundle of in-game currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    /// Stable, externally assigned identifier.
    pub id: String,

    /// Display name
    pub name: String,

    /// Longer description shown on the product card.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Image URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    /// Category the item is listed under.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    /// Base price in minor units.
    pub base_price: i64,

    /// Whether the item is featured in the popular section.
    #[serde(default)]
    pub popular: bool,

    /// Whether the item can currently be bought.
    #[serde(default = "available_by_default")]
    pub available: bool,

    /// Selectable variations, at most one per cart line.
    #[serde(default)]
    pub variations: Vec<Variation>,

    /// Optional extras.
    #[serde(default)]
    pub add_ons: Vec<AddOn>,
}

fn available_by_default() -> bool {
    true
}

impl MenuItem {
    /// Creates an available menu item with no variations or add-ons.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>, base_price: i64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
            image: None,
            category: None,
            base_price,
            popular: false,
            available: true,
            variations: Vec::new(),
            add_ons: Vec::new(),
        }
    }

    /// Adds a variation to the item.
    #[must_use]
    pub fn with_variation(mut self, variation: Variation) -> Self {
        self.variations.push(variation);
        self
    }

    /// Adds an add-on to the item.
    #[must_use]
    pub fn with_add_on(mut self, add_on: AddOn) -> Self {
        self.add_ons.push(add_on);
        self
    }

    /// Looks up one of the item's variations by id.
    pub fn variation(&self, id: &str) -> Option<&Variation> {
        self.variations.iter().find(|variation| variation.id == id)
    }

    /// Looks up one of the item's add-ons by id.
    pub fn add_on(&self, id: &str) -> Option<&AddOn> {
        self.add_ons.iter().find(|add_on| add_on.id == id)
    }
}

/// A named option of a menu item with its own price and optional tier overrides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variation {
    /// Variation identifier, unique within its menu item.
    pub id: String,

    /// Display name
    pub name: String,

    /// Price added to the item's base price, in minor units.
    pub price: i64,

    /// Override price for signed-in end users.
    #[serde(
        default,
        alias = "memberPrice",
        skip_serializing_if = "Option::is_none"
    )]
    pub member_price: Option<i64>,

    /// Override price for resellers.
    #[serde(
        default,
        alias = "resellerPrice",
        skip_serializing_if = "Option::is_none"
    )]
    pub reseller_price: Option<i64>,
}

impl Variation {
    /// Creates a variation without tier overrides.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>, price: i64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            member_price: None,
            reseller_price: None,
        }
    }

    /// Sets the end-user member price.
    #[must_use]
    pub fn with_member_price(mut self, price: i64) -> Self {
        self.member_price = Some(price);
        self
    }

    /// Sets the reseller price.
    #[must_use]
    pub fn with_reseller_price(mut self, price: i64) -> Self {
        self.reseller_price = Some(price);
        self
    }
}

/// A named extra, priced per unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddOn {
    /// Add-on identifier
    pub id: String,

    /// Display name
    pub name: String,

    /// Unit price in minor units.
    pub price: i64,

    /// Units selected. Absent means one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u32>,
}

impl AddOn {
    /// Creates an add-on with an unspecified quantity.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>, price: i64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            quantity: None,
        }
    }

    /// Sets the selected quantity.
    #[must_use]
    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = Some(quantity);
        self
    }

    /// Returns the selected quantity, treating an absent or zero quantity as one.
    pub fn effective_quantity(&self) -> u32 {
        self.quantity.filter(|quantity| *quantity > 0).unwrap_or(1)
    }
}

/// An indexed collection of menu items.
#[derive(Debug, Default)]
pub struct Catalog {
    items: SlotMap<MenuItemKey, MenuItem>,
    index: FxHashMap<String, MenuItemKey>,
}

impl Catalog {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a menu item, replacing any existing item with the same id.
    pub fn insert(&mut self, item: MenuItem) -> MenuItemKey {
        if let Some(&key) = self.index.get(&item.id)
            && let Some(existing) = self.items.get_mut(key)
        {
            *existing = item;
            return key;
        }

        let id = item.id.clone();
        let key = self.items.insert(item);

        self.index.insert(id, key);

        key
    }

    /// Returns the item stored under a key.
    pub fn get(&self, key: MenuItemKey) -> Option<&MenuItem> {
        self.items.get(key)
    }

    /// Looks up an item by its catalog id.
    pub fn item(&self, id: &str) -> Option<&MenuItem> {
        let key = self.index.get(id)?;

        self.items.get(*key)
    }

    /// Looks up a variation of an item by their ids.
    pub fn variation(&self, item_id: &str, variation_id: &str) -> Option<&Variation> {
        self.item(item_id)?.variation(variation_id)
    }

    /// Looks up an add-on of an item by their ids.
    pub fn add_on(&self, item_id: &str, add_on_id: &str) -> Option<&AddOn> {
        self.item(item_id)?.add_on(add_on_id)
    }

    /// Iterate over the items in the catalog.
    pub fn iter(&self) -> impl Iterator<Item = &MenuItem> {
        self.items.values()
    }

    /// Get the number of items in the catalog.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl FromIterator<MenuItem> for Catalog {
    fn from_iter<I: IntoIterator<Item = MenuItem>>(iter: I) -> Self {
        let mut catalog = Self::new();

        for item in iter {
            catalog.insert(item);
        }

        catalog
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn diamonds() -> MenuItem {
        let variation = Variation::new("86", "86 Diamonds", 20).with_member_price(10);

        MenuItem::new("diamonds", "Diamonds", 100)
            .with_variation(variation)
            .with_add_on(AddOn::new("gift", "Gift Wrap", 3))
    }

    #[test]
    fn effective_quantity_defaults_to_one() {
        let add_on = AddOn::new("gift", "Gift Wrap", 3);

        assert_eq!(add_on.effective_quantity(), 1);
        assert_eq!(add_on.clone().with_quantity(0).effective_quantity(), 1);
        assert_eq!(add_on.with_quantity(4).effective_quantity(), 4);
    }

    #[test]
    fn item_looks_up_variations_and_add_ons() -> TestResult {
        let item = diamonds();

        let variation = item.variation("86").ok_or("missing variation")?;

        assert_eq!(variation.member_price, Some(10));
        assert_eq!(variation.reseller_price, None);
        assert!(item.add_on("gift").is_some());
        assert!(item.variation("missing").is_none());

        Ok(())
    }

    #[test]
    fn catalog_indexes_by_id() -> TestResult {
        let catalog: Catalog = [diamonds(), MenuItem::new("pass", "Weekly Pass", 500)]
            .into_iter()
            .collect();

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.item("pass").ok_or("missing pass")?.base_price, 500);
        assert!(catalog.item("unknown").is_none());
        assert!(catalog.variation("diamonds", "86").is_some());
        assert!(catalog.add_on("diamonds", "gift").is_some());
        assert!(catalog.variation("pass", "86").is_none());

        Ok(())
    }

    #[test]
    fn insert_replaces_item_with_same_id() -> TestResult {
        let mut catalog = Catalog::new();

        let first = catalog.insert(MenuItem::new("pass", "Weekly Pass", 500));
        let second = catalog.insert(MenuItem::new("pass", "Weekly Pass", 450));

        assert_eq!(first, second);
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get(first).ok_or("missing pass")?.base_price, 450);

        Ok(())
    }

    #[test]
    fn menu_item_deserializes_with_defaults() -> TestResult {
        let item: MenuItem =
            serde_json::from_str(r#"{"id":"pass","name":"Pass","basePrice":500}"#)?;

        assert!(item.available);
        assert!(!item.popular);
        assert!(item.variations.is_empty());

        Ok(())
    }

    #[test]
    fn variation_tier_prices_accept_both_spellings() -> TestResult {
        let snake: Variation = serde_json::from_str(
            r#"{"id":"86","name":"86 Diamonds","price":20,"member_price":10,"reseller_price":5}"#,
        )?;
        let camel: Variation = serde_json::from_str(
            r#"{"id":"86","name":"86 Diamonds","price":20,"memberPrice":10,"resellerPrice":5}"#,
        )?;

        assert_eq!(snake.member_price, Some(10));
        assert_eq!(snake.reseller_price, Some(5));
        assert_eq!(snake, camel);

        let json = serde_json::to_value(&snake)?;

        let member_price = json.get("member_price").and_then(serde_json::Value::as_i64);

        assert_eq!(member_price, Some(10));

        Ok(())
    }
}
