use std::path::PathBuf;
use thiserror::Error;

/// All errors that can occur in keylaunch.
///
/// Callers branch on the variant, never on message text. Every variant
/// except `UserCancelled` is a handled outcome: `main` prints it and
/// exits 0.
#[derive(Debug, Error)]
pub enum KeyLaunchError {
    // --- Vault errors ---
    #[error("keylaunch login information invalid — wrong master password")]
    InvalidCredentials,

    #[error("keylaunch vault not found at {0}")]
    VaultNotFound(PathBuf),

    #[error("Failed to write vault: {0}")]
    VaultWrite(String),

    // --- Entry errors ---
    #[error("No entry named '{0}' exists in the vault")]
    EntryNotFound(String),

    #[error("Entry '{entry}' has no {field} configured")]
    MissingField {
        entry: String,
        field: &'static str,
    },

    // --- Launcher errors ---
    #[error("Bundled launcher executable not found at {0}")]
    LauncherMissing(PathBuf),

    #[error("Failed to start launcher process: {0}")]
    SpawnFailed(String),

    // --- CLI errors ---
    #[error("Prompt failed: {0}")]
    PromptFailed(String),

    #[error("User cancelled operation")]
    UserCancelled,

    // --- Environment errors ---
    #[error("Could not determine the user's home directory")]
    NoHomeDir,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for keylaunch results.
pub type Result<T> = std::result::Result<T, KeyLaunchError>;
