use amber_cart::cart::LineId;
use clap::Args;

use super::{CliError, Store};

#[derive(Debug, Args)]
pub(crate) struct RemoveArgs {
    /// Cart line id, as printed by `add`
    line_id: String,
}

pub(crate) fn run(cart: &mut Store, args: &RemoveArgs) -> Result<(), CliError> {
    if cart.remove_from_cart(&LineId::new(args.line_id.as_str())) {
        Ok(())
    } else {
        Err(CliError::LineNotFound(args.line_id.clone()))
    }
}
