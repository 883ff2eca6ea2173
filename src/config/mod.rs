//! Cart configuration

use clap::Args;
use rusty_money::iso::Currency;

use crate::{
    config::{logging::LoggingConfig, member::MemberArg, storage::StorageConfig},
    fixtures::{FixtureError, currency_from_code},
};

pub mod logging;
pub mod member;
pub mod storage;

/// Amber cart configuration.
///
/// Every setting can also come from the environment, including a `.env` file
/// loaded by the binary.
#[derive(Debug, Args)]
pub struct CartConfig {
    /// Cart storage settings.
    #[command(flatten)]
    pub storage: StorageConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// ISO code of the currency cart totals are shown in
    #[arg(long, env = "AMBER_CURRENCY", default_value = "PHP", global = true)]
    pub currency: String,

    /// Path to the YAML menu catalog
    #[arg(
        long,
        env = "AMBER_CATALOG",
        default_value = "fixtures/catalog/storefront.yml",
        global = true
    )]
    pub catalog: std::path::PathBuf,

    /// Who the cart is priced for
    #[arg(
        long,
        env = "AMBER_MEMBER",
        value_enum,
        default_value_t = MemberArg::Anonymous,
        global = true
    )]
    pub member: MemberArg,
}

impl CartConfig {
    /// The configured currency.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError::UnknownCurrency`] for unsupported codes.
    pub fn currency(&self) -> Result<&'static Currency, FixtureError> {
        currency_from_code(&self.currency)
    }
}
