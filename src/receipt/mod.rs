//! Receipt

use std::io;

use rusty_money::{Money, iso::Currency};
use tabled::{
    builder::Builder,
    settings::{
        Alignment, Style,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::{
    cart::{CartLine, CartStore, PricedLine},
    members::MemberContext,
    pricing::PricingError,
    storage::CartStorage,
};

/// Errors that can occur when rendering a receipt.
#[derive(Debug, Error)]
pub enum ReceiptError {
    /// The cart could not be priced.
    #[error(transparent)]
    Pricing(#[from] PricingError),

    /// IO error
    #[error("IO error")]
    IO,
}

/// Snapshot of a priced cart, ready to render.
#[derive(Debug, Clone)]
pub struct Receipt<'a> {
    lines: Vec<PricedLine<'a>>,

    /// Sum of every line total
    total: Money<'static, Currency>,

    /// Units across all lines
    total_items: u64,
}

impl<'a> Receipt<'a> {
    /// Prices the cart for its current member.
    ///
    /// # Errors
    ///
    /// Returns [`ReceiptError::Pricing`] if the cart cannot be priced.
    pub fn from_cart<S: CartStorage, M: MemberContext>(
        cart: &'a CartStore<S, M>,
    ) -> Result<Self, ReceiptError> {
        Ok(Self {
            lines: cart.lines()?,
            total: cart.total_price()?,
            total_items: cart.total_items(),
        })
    }

    /// Priced lines, newest first
    pub fn lines(&self) -> &[PricedLine<'a>] {
        &self.lines
    }

    /// Cart total
    pub fn total(&self) -> Money<'static, Currency> {
        self.total
    }

    /// Units across all lines
    pub fn total_items(&self) -> u64 {
        self.total_items
    }

    /// Writes the receipt as a table followed by the totals.
    ///
    /// # Errors
    ///
    /// Returns [`ReceiptError::IO`] if writing fails.
    pub fn write_to(&self, mut out: impl io::Write) -> Result<(), ReceiptError> {
        if self.lines.is_empty() {
            return writeln!(out, "cart is empty").map_err(|_err| ReceiptError::IO);
        }

        let mut builder = Builder::default();

        builder.push_record(["Line", "Item", "Options", "Qty", "Unit Price", "Total"]);

        for priced in &self.lines {
            let line = priced.line();

            builder.push_record([
                line.id().to_string(),
                line.name().to_string(),
                describe_options(line),
                line.quantity().to_string(),
                priced.unit_price().to_string(),
                priced.line_total().to_string(),
            ]);
        }

        let mut table = builder.build();

        table.with(Style::modern_rounded());
        table.modify(Columns::new(3..6), Alignment::right());
        table.modify(Rows::first(), Alignment::center());

        writeln!(out, "{table}").map_err(|_err| ReceiptError::IO)?;
        writeln!(out, " Items: {}", self.total_items).map_err(|_err| ReceiptError::IO)?;
        writeln!(out, " Total: {}", self.total).map_err(|_err| ReceiptError::IO)
    }
}

/// Variation name followed by each add-on and its quantity.
fn describe_options(line: &CartLine) -> String {
    let variation = line.selected_variation().map(|variation| variation.name.clone());

    let add_ons = line
        .selected_add_ons()
        .iter()
        .map(|add_on| format!("{} x{}", add_on.name, add_on.effective_quantity()));

    let options: Vec<String> = variation.into_iter().chain(add_ons).collect();

    if options.is_empty() {
        "-".to_string()
    } else {
        options.join(", ")
    }
}
