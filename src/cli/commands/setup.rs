//! `keylaunch setup` — create the app folder, install the launcher, and
//! create a fresh vault.

use std::fs;
use std::io::ErrorKind;

use crate::cli::output;
use crate::cli::{confirm, prompt_new_password};
use crate::config::Paths;
use crate::errors::{KeyLaunchError, Result};
use crate::vault::VaultStore;

/// Execute the `setup` command.
pub fn execute(test: bool) -> Result<()> {
    let paths = Paths::resolve(test)?;

    // 1. First run: create the app folder and copy the bundled launcher
    //    executable into it.
    if !paths.launcher_exe.exists() {
        fs::create_dir_all(&paths.app_dir)?;

        let bundled = Paths::bundled_launcher()?;
        fs::copy(&bundled, &paths.launcher_exe).map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                KeyLaunchError::LauncherMissing(bundled.clone())
            } else {
                KeyLaunchError::Io(e)
            }
        })?;

        output::info(&format!(
            "Installed launcher executable at {}",
            paths.launcher_exe.display()
        ));
    }

    // 2. Re-running setup over an existing vault destroys it; make the
    //    user say so. Declining is the one abort that exits non-zero.
    if paths.vault_file.exists() {
        output::warning(
            "A keylaunch vault already exists — continuing will delete it and create a fresh one.",
        );
        if !confirm("Proceed?")? {
            return Err(KeyLaunchError::UserCancelled);
        }
    }

    // 3. New master password, then create and verify the vault.
    output::info("STEP 1: Create the keylaunch vault.");
    let password = prompt_new_password()?;
    VaultStore::create(&paths.vault_file, &password)?;

    output::success(&format!(
        "keylaunch vault created at {}",
        paths.vault_file.display()
    ));
    output::tip("Set up database entries using `keylaunch open <new_name> -s`");

    Ok(())
}
