//! Path display — show the target path(s) stored for one entry.

use crate::cli::prompt_password;
use crate::config::Paths;
use crate::errors::Result;
use crate::vault::VaultStore;

/// Print the entry's target URL and, when present, its key-file path.
pub fn run(paths: &Paths, name: &str) -> Result<()> {
    let password = prompt_password()?;
    let store = VaultStore::open(&paths.vault_file, &password)?;

    let entry = store.entry(name)?;
    let url = entry.url()?;

    println!("{} PATH: {url}", name.to_uppercase());
    if let Some(key_file) = &entry.key_file {
        println!("{} KEY: {key_file}", name.to_uppercase());
    }

    Ok(())
}
