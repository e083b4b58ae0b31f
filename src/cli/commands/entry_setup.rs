//! Entry setup wizard — add or replace one named database entry.

use crate::cli::output;
use crate::cli::{confirm, prompt_input, prompt_password, prompt_secret};
use crate::config::Paths;
use crate::errors::Result;
use crate::vault::VaultStore;

/// Run the wizard for `name`.
pub fn run(paths: &Paths, name: &str) -> Result<()> {
    output::info(&format!("START: Setup {name} database entry."));

    let password = prompt_password()?;
    let mut store = VaultStore::open(&paths.vault_file, &password)?;

    // 1. Replace-or-keep decision for an existing entry or group.
    //    Nothing is deleted until the user has answered.
    if store.is_registered(name) {
        output::warning(&format!(
            "An entry for {name} already exists — replacing it will delete the stored credentials."
        ));
        if !confirm("Replace it?")? {
            store.save()?;
            output::success(&format!("DONE: {name} entry left unchanged."));
            return Ok(());
        }
        store.remove_entry(name)?;
        store.save()?;
    }

    // 2. Collect the target and its secret; the secret never echoes.
    let url = prompt_input(&format!("Set {name} database path/URL"))?;
    let secret = prompt_secret(&format!("Set {name} database password"))?;
    store.add_entry(name, &url, &secret);
    store.save()?;

    // 3. Optional key file. Reopen the vault so we mutate an entry that
    //    reflects the save above, not the stale pre-save handle.
    if confirm("Does this database use a key file?")? {
        let key_file = prompt_input("Set key file (file path + file name)")?;
        let mut store = VaultStore::open(&paths.vault_file, &password)?;
        store.set_key_file(name, &key_file)?;
        store.save()?;
    }

    output::success(&format!("DONE: {name} database entry setup."));
    output::tip(&format!(
        "Try launching with `keylaunch open {name}`, or `keylaunch all`"
    ));

    Ok(())
}
