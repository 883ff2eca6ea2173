use std::io::{self, Write};

use amber_cart::{catalog::AddOn, config::CartConfig, fixtures::Fixture};
use clap::Args;

use super::{CliError, Store};

#[derive(Debug, Args)]
pub(crate) struct AddArgs {
    /// Catalog id of the menu item
    item_id: String,

    /// Number of units to add
    #[arg(short, long, default_value_t = 1)]
    quantity: u32,

    /// Variation id
    #[arg(long)]
    variation: Option<String>,

    /// Add-on id; repeat to add more than one unit
    #[arg(long = "add-on")]
    add_ons: Vec<String>,
}

pub(crate) fn run(config: &CartConfig, cart: &mut Store, args: &AddArgs) -> Result<(), CliError> {
    let fixture = Fixture::from_path(&config.catalog).map_err(|source| CliError::Catalog {
        path: config.catalog.clone(),
        source,
    })?;

    if fixture.currency() != cart.currency() {
        return Err(CliError::CurrencyMismatch {
            catalog: fixture.currency().iso_alpha_code.to_string(),
            cart: cart.currency().iso_alpha_code.to_string(),
        });
    }

    let item = fixture
        .catalog()
        .item(&args.item_id)
        .ok_or_else(|| CliError::UnknownItem(args.item_id.clone()))?;

    if !item.available {
        return Err(CliError::UnavailableItem(item.id.clone()));
    }

    let variation = args
        .variation
        .as_deref()
        .map(|id| {
            item.variation(id).ok_or_else(|| CliError::UnknownVariation {
                item: item.id.clone(),
                variation: id.to_string(),
            })
        })
        .transpose()?;

    let add_ons = args
        .add_ons
        .iter()
        .map(|id| {
            item.add_on(id).cloned().ok_or_else(|| CliError::UnknownAddOn {
                item: item.id.clone(),
                add_on: id.clone(),
            })
        })
        .collect::<Result<Vec<AddOn>, _>>()?;

    let id = cart.add_to_cart(item, args.quantity, variation, &add_ons)?;

    writeln!(io::stdout().lock(), "{id}")?;

    Ok(())
}
