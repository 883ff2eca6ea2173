use amber_cart::cart::LineId;
use clap::Args;

use super::{CliError, Store};

#[derive(Debug, Args)]
pub(crate) struct UpdateArgs {
    /// Cart line id, as printed by `add`
    line_id: String,

    /// New quantity; zero or less removes the line
    #[arg(allow_negative_numbers = true)]
    quantity: i64,
}

pub(crate) fn run(cart: &mut Store, args: &UpdateArgs) -> Result<(), CliError> {
    if cart.update_quantity(&LineId::new(args.line_id.as_str()), args.quantity) {
        Ok(())
    } else {
        Err(CliError::LineNotFound(args.line_id.clone()))
    }
}
