//! CLI module — Clap argument parser, output helpers, and command implementations.

pub mod commands;
pub mod output;

use clap::Parser;

use zeroize::Zeroizing;

use crate::errors::{KeyLaunchError, Result};

/// keylaunch CLI: open every KeePass database with one password.
#[derive(Parser)]
#[command(
    name = "keylaunch",
    about = "KeePass database launcher — one password to open them all",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// All available subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Initial setup of the keylaunch vault
    Setup {
        /// Use the test root instead of the home directory
        #[arg(short = 't', long, hide = true)]
        test: bool,
    },

    /// Launch, inspect, or configure a single database entry
    Open {
        /// Name of the database entry (omit to list what's available)
        database: Option<String>,

        /// Add or replace the requested database entry
        #[arg(short = 's', long)]
        setup: bool,

        /// Show the path(s) stored for the requested database entry
        #[arg(short = 'p', long)]
        path: bool,

        /// List the database entries available
        #[arg(short = 'o', long)]
        options: bool,

        /// Supply the master password instead of prompting.
        /// Visible in process listings — avoid using this interactively.
        #[arg(short = 'i', long, value_name = "PASSWORD", hide = true)]
        input_password: Option<String>,

        /// Use the test root instead of the home directory
        #[arg(short = 't', long, hide = true)]
        test: bool,
    },

    /// Launch every configured database entry, prompting once
    All {
        /// Use the test root instead of the home directory
        #[arg(short = 't', long, hide = true)]
        test: bool,
    },

    /// Remove the keylaunch folder and everything in it
    Uninstall {
        /// Use the test root instead of the home directory
        #[arg(short = 't', long, hide = true)]
        test: bool,
    },
}

// ---------------------------------------------------------------------------
// Shared helpers used by multiple commands
// ---------------------------------------------------------------------------

/// Environment variable consulted before any interactive password prompt.
pub const PASSWORD_ENV_VAR: &str = "KEYLAUNCH_PASSWORD";

/// Get the master password, trying in order:
/// 1. `KEYLAUNCH_PASSWORD` env var (scripts, tests)
/// 2. Interactive non-echoing prompt
///
/// Returns `Zeroizing<String>` so the password is wiped from memory on drop.
pub fn prompt_password() -> Result<Zeroizing<String>> {
    if let Ok(pw) = std::env::var(PASSWORD_ENV_VAR) {
        if !pw.is_empty() {
            return Ok(Zeroizing::new(pw));
        }
    }

    let pw = dialoguer::Password::new()
        .with_prompt("keylaunch password")
        .interact()
        .map_err(|e| KeyLaunchError::PromptFailed(format!("password prompt: {e}")))?;
    Ok(Zeroizing::new(pw))
}

/// Prompt for a new master password with confirmation (used during `setup`).
///
/// Also respects `KEYLAUNCH_PASSWORD` for scripted usage.
///
/// Returns `Zeroizing<String>` so the password is wiped from memory on drop.
pub fn prompt_new_password() -> Result<Zeroizing<String>> {
    if let Ok(pw) = std::env::var(PASSWORD_ENV_VAR) {
        if !pw.is_empty() {
            return Ok(Zeroizing::new(pw));
        }
    }

    let pw = dialoguer::Password::new()
        .with_prompt("Create a keylaunch password")
        .with_confirmation("Confirm keylaunch password", "Passwords do not match, try again")
        .interact()
        .map_err(|e| KeyLaunchError::PromptFailed(format!("password prompt: {e}")))?;
    Ok(Zeroizing::new(pw))
}

/// Prompt for an entry's secret without echoing.
///
/// Unlike the master-password prompts this never reads the environment
/// variable — it is always a fresh, per-entry value.
pub fn prompt_secret(prompt: &str) -> Result<Zeroizing<String>> {
    let pw = dialoguer::Password::new()
        .with_prompt(prompt)
        .interact()
        .map_err(|e| KeyLaunchError::PromptFailed(format!("password prompt: {e}")))?;
    Ok(Zeroizing::new(pw))
}

/// Environment variable consulted before any interactive confirmation.
/// Accepts `y`/`yes` or `n`/`no`; anything else falls through to the
/// prompt.
pub const CONFIRM_ENV_VAR: &str = "KEYLAUNCH_CONFIRM";

/// Ask a yes/no question, defaulting to "no".
///
/// Honors `KEYLAUNCH_CONFIRM` first, same as the password prompts honor
/// `KEYLAUNCH_PASSWORD`, so scripted runs can answer the destructive
/// confirmations too.
pub fn confirm(prompt: &str) -> Result<bool> {
    if let Ok(answer) = std::env::var(CONFIRM_ENV_VAR) {
        match answer.to_ascii_lowercase().as_str() {
            "y" | "yes" => return Ok(true),
            "n" | "no" => return Ok(false),
            _ => {}
        }
    }

    dialoguer::Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()
        .map_err(|e| KeyLaunchError::PromptFailed(format!("confirm prompt: {e}")))
}

/// Ask for a free-form line of input (echoed; not for secrets).
pub fn prompt_input(prompt: &str) -> Result<String> {
    dialoguer::Input::<String>::new()
        .with_prompt(prompt)
        .interact_text()
        .map_err(|e| KeyLaunchError::PromptFailed(format!("input prompt: {e}")))
}

/// Print a handled error with its remediation hint and pick the exit code.
///
/// Everything keylaunch catches is a normal outcome for the user: the
/// message is printed and the process exits 0. Only an explicit decline
/// of the setup confirmation aborts with a non-zero code.
pub fn report_error(err: &KeyLaunchError) -> i32 {
    output::error(&err.to_string());

    match err {
        KeyLaunchError::UserCancelled => return 1,
        KeyLaunchError::VaultNotFound(_) => {
            output::tip("Run `keylaunch setup` to get started.");
        }
        KeyLaunchError::EntryNotFound(name)
        | KeyLaunchError::MissingField { entry: name, .. } => {
            output::tip(&format!("Set up this entry using `keylaunch open {name} -s`"));
        }
        KeyLaunchError::LauncherMissing(_) => {
            output::tip("Run `keylaunch setup` from the keylaunch install folder.");
        }
        _ => {}
    }

    0
}
