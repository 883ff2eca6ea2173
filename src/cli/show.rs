use std::io;

use amber_cart::receipt::Receipt;

use super::{CliError, Store};

pub(crate) fn run(cart: &Store) -> Result<(), CliError> {
    Receipt::from_cart(cart)?.write_to(io::stdout().lock())?;

    Ok(())
}
