use std::{io, path::PathBuf};

use amber_cart::{
    cart::{CartError, CartStore},
    config::CartConfig,
    fixtures::FixtureError,
    members::MemberSession,
    observability::{ObservabilityError, init_logging},
    receipt::ReceiptError,
    storage::FileStorage,
};
use clap::{Parser, Subcommand};
use thiserror::Error;

mod add;
mod remove;
mod show;
mod update;

type Store = CartStore<FileStorage, MemberSession>;

#[derive(Debug, Parser)]
#[command(name = "amber-cart", about = "Amber storefront cart", long_about = None)]
pub(crate) struct Cli {
    #[command(flatten)]
    config: CartConfig,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Add a menu item to the cart
    Add(add::AddArgs),

    /// Set the quantity of a cart line
    Update(update::UpdateArgs),

    /// Remove a cart line
    Remove(remove::RemoveArgs),

    /// Empty the cart
    Clear,

    /// Show the cart and its total
    Show,
}

#[derive(Debug, Error)]
pub(crate) enum CliError {
    #[error(transparent)]
    Observability(#[from] ObservabilityError),

    #[error("failed to load catalog {}: {source}", path.display())]
    Catalog { path: PathBuf, source: FixtureError },

    #[error(transparent)]
    Currency(#[from] FixtureError),

    #[error("catalog is priced in {catalog} but the cart is in {cart}")]
    CurrencyMismatch { catalog: String, cart: String },

    #[error("no menu item {0} in the catalog")]
    UnknownItem(String),

    #[error("menu item {0} is not available")]
    UnavailableItem(String),

    #[error("menu item {item} has no variation {variation}")]
    UnknownVariation { item: String, variation: String },

    #[error("menu item {item} has no add-on {add_on}")]
    UnknownAddOn { item: String, add_on: String },

    #[error("no cart line {0}")]
    LineNotFound(String),

    #[error(transparent)]
    Cart(#[from] CartError),

    #[error(transparent)]
    Receipt(#[from] ReceiptError),

    #[error("failed to write output: {0}")]
    Io(#[from] io::Error),
}

impl Cli {
    pub(crate) fn run(self) -> Result<(), CliError> {
        let Self { config, command } = self;

        init_logging(&config.logging)?;

        let mut cart = CartStore::restore(
            config.storage.file_storage(),
            config.member.session(),
            config.currency()?,
        );

        match command {
            Commands::Add(args) => add::run(&config, &mut cart, &args),
            Commands::Update(args) => update::run(&mut cart, &args),
            Commands::Remove(args) => remove::run(&mut cart, &args),
            Commands::Clear => {
                cart.clear_cart();
                Ok(())
            }
            Commands::Show => show::run(&cart),
        }
    }
}
