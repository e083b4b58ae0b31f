//! `keylaunch all` — launch every configured database entry, prompting
//! for the master password exactly once.

use crate::cli::{output, prompt_password};
use crate::config::Paths;
use crate::errors::Result;
use crate::vault::VaultStore;

use super::launch;

/// Execute the `all` command.
///
/// Launches run sequentially, in-process, reusing the one collected
/// password; a failed entry is reported and the rest still launch.
pub fn execute(test: bool) -> Result<()> {
    let paths = Paths::resolve(test)?;

    let password = prompt_password()?;
    let store = VaultStore::open(&paths.vault_file, &password)?;

    let names = store.database_names();
    if names.is_empty() {
        output::info("No entries created yet.");
        output::tip("Use `keylaunch open <new_name> -s` to get started.");
        return Ok(());
    }

    for name in &names {
        match launch::launch_entry(&paths, &store, name) {
            Ok(()) => output::success(&format!("STATUS: {name} database launched.")),
            Err(e) => output::error(&e.to_string()),
        }
    }

    Ok(())
}
