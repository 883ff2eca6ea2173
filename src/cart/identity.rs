//! Line identity
//!
//! Two add-to-cart calls describe the same purchasable configuration when their
//! [`IdentityKey`]s are equal.

use std::fmt::{self, Display, Formatter};

use smallvec::SmallVec;

use crate::catalog::{AddOn, Variation};

/// Canonical add-on selection: one entry per id, sorted by id, each carrying an
/// explicit quantity.
pub type AddOnSelection = SmallVec<[AddOn; 4]>;

const NONE: &str = "none";

/// Groups add-ons by id, summing their quantities, and sorts them by id.
///
/// The first occurrence of an id supplies the name and price of the group.
pub fn normalize_add_ons(add_ons: &[AddOn]) -> AddOnSelection {
    let mut grouped = AddOnSelection::new();

    for add_on in add_ons {
        let quantity = add_on.effective_quantity();

        if let Some(existing) = grouped.iter_mut().find(|group| group.id == add_on.id) {
            existing.quantity = Some(existing.effective_quantity().saturating_add(quantity));
        } else {
            grouped.push(AddOn {
                quantity: Some(quantity),
                ..add_on.clone()
            });
        }
    }

    grouped.sort_by(|a, b| a.id.cmp(&b.id));

    grouped
}

/// Renders add-ons as `id:quantity` pairs joined by commas, or `none`.
pub fn add_ons_signature(add_ons: &[AddOn]) -> String {
    let normalized = normalize_add_ons(add_ons);

    if normalized.is_empty() {
        return NONE.to_string();
    }

    normalized
        .iter()
        .map(|add_on| format!("{}:{}", add_on.id, add_on.effective_quantity()))
        .collect::<Vec<_>>()
        .join(",")
}

/// Catalog id, variation id and add-on signature of a cart configuration.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IdentityKey {
    catalog_item_id: String,
    variation: String,
    add_ons: String,
}

impl IdentityKey {
    /// Derives the identity key of a configuration.
    pub fn new(catalog_item_id: &str, variation: Option<&Variation>, add_ons: &[AddOn]) -> Self {
        let variation = variation
            .map(|variation| variation.id.as_str())
            .filter(|id| !id.is_empty())
            .unwrap_or(NONE);

        Self {
            catalog_item_id: catalog_item_id.to_string(),
            variation: variation.to_string(),
            add_ons: add_ons_signature(add_ons),
        }
    }

    /// The catalog item id component.
    pub fn catalog_item_id(&self) -> &str {
        &self.catalog_item_id
    }

    /// The variation id component, `none` when no variation is selected.
    pub fn variation(&self) -> &str {
        &self.variation
    }

    /// The add-on signature component.
    pub fn add_ons(&self) -> &str {
        &self.add_ons
    }
}

impl Display for IdentityKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let Self {
            catalog_item_id,
            variation,
            add_ons,
        } = self;

        write!(f, "{catalog_item_id}|{variation}|{add_ons}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn add_on(id: &str) -> AddOn {
        AddOn::new(id, id.to_uppercase(), 3)
    }

    #[test]
    fn duplicates_are_grouped_and_sorted() {
        let flat = [add_on("x"), add_on("x"), add_on("y")];
        let grouped = [add_on("y"), add_on("x").with_quantity(2)];

        let normalized = normalize_add_ons(&flat);

        assert_eq!(normalized, normalize_add_ons(&grouped));

        let summary: Vec<(&str, Option<u32>)> = normalized
            .iter()
            .map(|add_on| (add_on.id.as_str(), add_on.quantity))
            .collect();

        assert_eq!(summary, [("x", Some(2)), ("y", Some(1))]);
    }

    #[test]
    fn explicit_quantities_are_summed() {
        let x = add_on("x");
        let normalized = normalize_add_ons(&[x.clone().with_quantity(2), x.with_quantity(3)]);
        let quantity = normalized.first().and_then(|add_on| add_on.quantity);

        assert_eq!(quantity, Some(5));
    }

    #[test]
    fn signature_of_nothing_is_none() {
        assert_eq!(add_ons_signature(&[]), "none");
    }

    #[test]
    fn signature_lists_sorted_pairs() {
        let signature = add_ons_signature(&[add_on("y"), add_on("x"), add_on("x")]);

        assert_eq!(signature, "x:2,y:1");
    }

    #[test]
    fn key_renders_all_components() {
        let variation = Variation::new("v86", "86 Diamonds", 20);

        let key = IdentityKey::new("diamonds", Some(&variation), &[add_on("x")]);

        assert_eq!(key.to_string(), "diamonds|v86|x:1");
        assert_eq!(
            IdentityKey::new("diamonds", None, &[]).to_string(),
            "diamonds|none|none"
        );
    }

    #[test]
    fn keys_differ_by_variation_and_add_ons() {
        let small = Variation::new("small", "Small", 10);
        let large = Variation::new("large", "Large", 20);

        let base = IdentityKey::new("diamonds", Some(&small), &[]);

        assert_ne!(base, IdentityKey::new("diamonds", Some(&large), &[]));
        assert_ne!(
            base,
            IdentityKey::new("diamonds", Some(&small), &[add_on("x")])
        );
        assert_ne!(
            IdentityKey::new("diamonds", None, &[add_on("x")]),
            IdentityKey::new("diamonds", None, &[add_on("x").with_quantity(2)])
        );
    }
}
