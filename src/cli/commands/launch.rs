//! Entry launcher — decrypt the vault and hand one entry's credentials
//! to the external viewer executable.

use std::process::{Command, Stdio};

use zeroize::Zeroizing;

use crate::cli::prompt_password;
use crate::config::Paths;
use crate::errors::{KeyLaunchError, Result};
use crate::vault::{VaultEntry, VaultStore};

/// Execute a single launch, prompting for the master password unless
/// one was supplied via `-i`.
pub fn run(paths: &Paths, name: &str, input_password: Option<&str>) -> Result<()> {
    let password = match input_password {
        Some(pw) => Zeroizing::new(pw.to_string()),
        None => prompt_password()?,
    };

    let store = VaultStore::open(&paths.vault_file, &password)?;
    launch_entry(paths, &store, name)
}

/// Launch the viewer for one entry from an already-open vault.
///
/// Fire-and-forget: the child is spawned detached from our standard
/// streams and we never wait on it. `all` calls this in-process so the
/// master password stays in memory instead of appearing in argv.
pub fn launch_entry(paths: &Paths, store: &VaultStore, name: &str) -> Result<()> {
    let entry = store.entry(name)?;
    let args = launch_args(&entry)?;

    Command::new(&paths.launcher_exe)
        .args(&args)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|e| KeyLaunchError::SpawnFailed(e.to_string()))?;

    Ok(())
}

/// Build the viewer's argument list: target URL, `-pw:` switch, and the
/// `-keyfile:` switch only when the entry carries one.
fn launch_args(entry: &VaultEntry) -> Result<Vec<String>> {
    let url = entry.url()?;
    let secret = entry.secret()?;

    let mut args = vec![url.to_string(), format!("-pw:{secret}")];
    if let Some(key_file) = &entry.key_file {
        args.push(format!("-keyfile:{key_file}"));
    }

    Ok(args)
}
