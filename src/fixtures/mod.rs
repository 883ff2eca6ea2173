//! Fixtures

use std::{fs, path::Path};

use rust_decimal::{Decimal, prelude::ToPrimitive};
use rusty_money::iso::{Currency, EUR, GBP, PHP, USD};
use thiserror::Error;

use crate::{catalog::Catalog, fixtures::catalog::CatalogFixture};

pub mod catalog;

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid price format
    #[error("Invalid price format: {0}")]
    InvalidPrice(String),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// Currency mismatch between prices
    #[error("Currency mismatch: expected {0}, found {1}")]
    CurrencyMismatch(String, String),

    /// No prices read; currency unknown
    #[error("No items loaded; currency unknown")]
    NoCurrency,
}

/// A catalog loaded from YAML, with the one currency its prices share.
#[derive(Debug)]
pub struct Fixture {
    catalog: Catalog,
    currency: &'static Currency,
}

impl Fixture {
    /// Load a catalog fixture file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if its prices
    /// are malformed or disagree on currency.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, FixtureError> {
        let contents = fs::read_to_string(path)?;

        Self::from_yaml(&contents)
    }

    /// Parse a catalog fixture from YAML.
    ///
    /// Items are inserted in id order so catalog iteration is stable.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML cannot be parsed, if its prices are
    /// malformed or disagree on currency, or if it lists no items.
    pub fn from_yaml(yaml: &str) -> Result<Self, FixtureError> {
        let fixture: CatalogFixture = serde_norway::from_str(yaml)?;

        let mut items: Vec<_> = fixture.items.into_iter().collect();
        items.sort_by(|(a, _), (b, _)| a.cmp(b));

        let mut prices = PriceReader::default();
        let mut catalog = Catalog::new();

        for (id, item) in items {
            catalog.insert(item.into_menu_item(id, &mut prices)?);
        }

        let currency = prices.currency().ok_or(FixtureError::NoCurrency)?;

        Ok(Self { catalog, currency })
    }

    /// The loaded catalog
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Currency shared by every price in the fixture
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    /// Take ownership of the catalog.
    pub fn into_catalog(self) -> Catalog {
        self.catalog
    }
}

/// Reads prices while checking they all share one currency.
#[derive(Debug, Default)]
pub struct PriceReader {
    currency: Option<&'static Currency>,
}

impl PriceReader {
    /// Parse a price into minor units.
    ///
    /// # Errors
    ///
    /// Returns an error if the price is malformed, or if its currency differs
    /// from the prices read before it.
    pub fn read(&mut self, price: &str) -> Result<i64, FixtureError> {
        let (minor_units, currency) = parse_price(price)?;

        match self.currency {
            Some(existing) if existing != currency => {
                return Err(FixtureError::CurrencyMismatch(
                    existing.iso_alpha_code.to_string(),
                    currency.iso_alpha_code.to_string(),
                ));
            }
            Some(_) => {}
            None => self.currency = Some(currency),
        }

        Ok(minor_units)
    }

    /// Currency of the prices read so far
    pub fn currency(&self) -> Option<&'static Currency> {
        self.currency
    }
}

/// Parse price string (e.g., "2.99 PHP") into minor units and currency
///
/// # Errors
///
/// Returns an error if the string is not in the format "AMOUNT CURRENCY",
/// if the amount cannot be parsed as a decimal, or if the currency code
/// is not recognized.
pub fn parse_price(s: &str) -> Result<(i64, &'static Currency), FixtureError> {
    let parts: Vec<&str> = s.split_whitespace().collect();

    let [amount, currency_code] = parts.as_slice() else {
        return Err(FixtureError::InvalidPrice(format!(
            "Expected format 'AMOUNT CURRENCY', got: {s}"
        )));
    };

    let amount = amount
        .parse::<Decimal>()
        .map_err(|_err| FixtureError::InvalidPrice(s.to_string()))?;

    let minor_units = amount
        .checked_mul(Decimal::new(100, 0))
        .and_then(|value| value.round_dp(0).to_i64())
        .ok_or_else(|| FixtureError::InvalidPrice(s.to_string()))?;

    Ok((minor_units, currency_from_code(currency_code)?))
}

/// Look up a supported ISO currency by its alphabetic code.
///
/// # Errors
///
/// Returns [`FixtureError::UnknownCurrency`] for unsupported codes.
pub fn currency_from_code(code: &str) -> Result<&'static Currency, FixtureError> {
    match code.trim().to_ascii_uppercase().as_str() {
        "PHP" => Ok(PHP),
        "GBP" => Ok(GBP),
        "USD" => Ok(USD),
        "EUR" => Ok(EUR),
        _ => Err(FixtureError::UnknownCurrency(code.to_string())),
    }
}
