//! `keylaunch uninstall` — remove the app folder, its vault, and the
//! installed launcher executable.

use std::fs;
use std::io::ErrorKind;

use crate::cli::{confirm, output};
use crate::config::Paths;
use crate::errors::Result;

/// Execute the `uninstall` command.
pub fn execute(test: bool) -> Result<()> {
    let paths = Paths::resolve(test)?;

    if !paths.app_dir.exists() {
        output::info("No action — keylaunch folder not found.");
        return Ok(());
    }

    output::warning(&format!(
        "This will remove the keylaunch vault and launcher from {}",
        paths.app_dir.display()
    ));
    if !confirm("Continue?")? {
        output::info("Removal cancelled.");
        return Ok(());
    }

    match fs::remove_dir_all(&paths.app_dir) {
        Ok(()) => {
            output::success("Files associated with keylaunch have been removed.");
            Ok(())
        }
        Err(e) if e.kind() == ErrorKind::PermissionDenied => {
            output::error("Unable to remove the keylaunch folder — permission denied.");
            output::tip("If the vault is currently open, close it and try again.");
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}
