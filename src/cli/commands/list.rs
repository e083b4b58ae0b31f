//! Listing — show every registered database entry by name.

use crate::cli::{output, prompt_password};
use crate::config::Paths;
use crate::errors::Result;
use crate::vault::VaultStore;

/// Print all database names, one per line, under a header.
pub fn run(paths: &Paths) -> Result<()> {
    let password = prompt_password()?;
    let store = VaultStore::open(&paths.vault_file, &password)?;

    output::print_database_names(&store.database_names());

    Ok(())
}
