//! Cart store

use rusty_money::{Money, iso::Currency};
use tracing::{Span, debug, error, info, warn};

use crate::{
    cart::{CartError, CartLine, LineId, PricedLine, identity::IdentityKey, normalize_add_ons},
    catalog::{AddOn, MenuItem, Variation},
    members::{MemberContext, PriceTier},
    pricing::{PricingError, extended_price, unit_price},
    storage::CartStorage,
};

/// The shopping cart.
///
/// Lines are kept newest first. Every change is written through to `storage`;
/// a failed write is logged and the in-memory cart stays authoritative. Prices
/// are resolved against `members` each time they are read.
#[derive(Debug)]
pub struct CartStore<S, M> {
    lines: Vec<CartLine>,
    storage: S,
    members: M,
    currency: &'static Currency,
    open: bool,
}

impl<S: CartStorage, M: MemberContext> CartStore<S, M> {
    /// Restores the cart from storage.
    ///
    /// Unreadable stored state is discarded and the cart starts empty.
    pub fn restore(storage: S, members: M, currency: &'static Currency) -> Self {
        let lines = match storage.load_lines() {
            Ok(lines) => lines,
            Err(error) => {
                warn!(%error, "discarding unreadable stored cart");
                Vec::new()
            }
        };

        debug!(lines = lines.len(), "restored cart");

        Self {
            lines,
            storage,
            members,
            currency,
            open: false,
        }
    }

    /// Adds a configured menu item to the cart.
    ///
    /// Add-ons are normalized first. If a line already holds the same
    /// configuration its quantity grows in place; otherwise a new line is placed
    /// at the head of the cart. Returns the id of the line holding the
    /// configuration.
    ///
    /// # Errors
    ///
    /// - [`CartError::InvalidQuantity`]: `quantity` was zero.
    /// - [`CartError::QuantityOverflow`]: the merged quantity does not fit.
    /// - [`CartError::Pricing`]: the configuration cannot be priced.
    #[tracing::instrument(
        name = "cart.add_to_cart",
        skip(self, item, variation, add_ons),
        fields(
            catalog_item_id = %item.id,
            line_id = tracing::field::Empty,
            merged = tracing::field::Empty
        ),
        err
    )]
    pub fn add_to_cart(
        &mut self,
        item: &MenuItem,
        quantity: u32,
        variation: Option<&Variation>,
        add_ons: &[AddOn],
    ) -> Result<LineId, CartError> {
        if quantity == 0 {
            return Err(CartError::InvalidQuantity);
        }

        let add_ons = normalize_add_ons(add_ons);

        // Priced once at add time so an unpriceable configuration never enters the cart.
        let snapshot_price = unit_price(item.base_price, variation, &add_ons, self.tier())?;
        let key = IdentityKey::new(&item.id, variation, &add_ons);

        let span = Span::current();

        if let Some(line) = self
            .lines
            .iter_mut()
            .find(|line| line.identity_key() == key)
        {
            let merged = line
                .quantity()
                .checked_add(quantity)
                .ok_or_else(|| CartError::QuantityOverflow(line.id().clone()))?;

            line.set_quantity(merged);

            let id = line.id().clone();

            span.record("line_id", tracing::field::display(&id));
            span.record("merged", true);

            debug!(%key, quantity = merged, "merged into existing line");

            self.persist();

            return Ok(id);
        }

        let id = self.fresh_line_id(&item.id);

        span.record("line_id", tracing::field::display(&id));
        span.record("merged", false);

        let line = CartLine::new(id.clone(), item, quantity, variation, &add_ons);

        self.lines.insert(0, line);

        debug!(%key, snapshot_price, "added new line");

        self.persist();

        Ok(id)
    }

    /// Sets a line's quantity. A quantity of zero or less removes the line.
    ///
    /// Quantities beyond `u32::MAX` saturate. Returns whether a line was
    /// changed or removed.
    #[tracing::instrument(name = "cart.update_quantity", skip(self, id), fields(line_id = %id))]
    pub fn update_quantity(&mut self, id: &LineId, quantity: i64) -> bool {
        if quantity <= 0 {
            return self.remove_from_cart(id);
        }

        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);

        let Some(line) = self.lines.iter_mut().find(|line| line.id() == id) else {
            debug!("no line to update");
            return false;
        };

        line.set_quantity(quantity);

        debug!(quantity, "updated line quantity");

        self.persist();

        true
    }

    /// Removes a line. Returns whether a line was removed.
    #[tracing::instrument(name = "cart.remove_from_cart", skip(self, id), fields(line_id = %id))]
    pub fn remove_from_cart(&mut self, id: &LineId) -> bool {
        let len_before = self.lines.len();

        self.lines.retain(|line| line.id() != id);

        let removed = self.lines.len() < len_before;

        if removed {
            debug!("removed line");
            self.persist();
        }

        removed
    }

    /// Empties the cart.
    #[tracing::instrument(name = "cart.clear_cart", skip(self))]
    pub fn clear_cart(&mut self) {
        let cleared = self.lines.len();

        self.lines.clear();

        info!(cleared, "cleared cart");

        self.persist();
    }

    /// Lines priced for the current member, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::Overflow`] if a line cannot be priced.
    pub fn lines(&self) -> Result<Vec<PricedLine<'_>>, PricingError> {
        let tier = self.tier();

        self.lines
            .iter()
            .map(|line| PricedLine::new(line, tier, self.currency))
            .collect()
    }

    /// Total price of the cart for the current member.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::Overflow`] if the total does not fit in minor units.
    pub fn total_price(&self) -> Result<Money<'static, Currency>, PricingError> {
        let tier = self.tier();

        let total = self.lines.iter().try_fold(0_i64, |total, line| {
            let line_total = extended_price(line.unit_price(tier)?, line.quantity())?;

            total.checked_add(line_total).ok_or(PricingError::Overflow)
        })?;

        Ok(Money::from_minor(total, self.currency))
    }

    /// Total number of units across all lines.
    pub fn total_items(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity())).sum()
    }

    /// Looks up a line by id.
    pub fn line(&self, id: &LineId) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.id() == id)
    }

    /// Iterate over the stored lines, without prices.
    pub fn iter(&self) -> impl Iterator<Item = &CartLine> {
        self.lines.iter()
    }

    /// Get the number of lines in the cart.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Check if the cart is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Get the currency of the cart.
    #[must_use]
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    /// The member context prices are resolved against.
    pub fn members(&self) -> &M {
        &self.members
    }

    /// Whether the cart panel is shown.
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Shows the cart panel.
    pub fn open_cart(&mut self) {
        self.open = true;
    }

    /// Hides the cart panel.
    pub fn close_cart(&mut self) {
        self.open = false;
    }

    fn tier(&self) -> PriceTier {
        PriceTier::for_context(&self.members)
    }

    fn fresh_line_id(&self, catalog_item_id: &str) -> LineId {
        loop {
            let id = LineId::generate(catalog_item_id);

            if self.line(&id).is_none() {
                return id;
            }
        }
    }

    fn persist(&self) {
        if let Err(error) = self.storage.save_lines(&self.lines) {
            error!(%error, lines = self.lines.len(), "failed to persist cart");
        }
    }
}
