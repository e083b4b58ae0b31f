//! Filesystem layout of the keylaunch installation.
//!
//! Everything keylaunch persists lives in one private folder: the copied
//! launcher executable and the KDBX vault. The folder sits under the
//! user's home directory, or under `<cwd>/test` when the hidden test
//! flag is set so the test harness never touches a real installation.

use std::path::{Path, PathBuf};

use crate::errors::{KeyLaunchError, Result};

/// Name of the private application folder.
const APP_DIR_NAME: &str = ".keylaunch";

/// File name of the launcher executable inside the app folder.
const LAUNCHER_EXE: &str = "keepass.exe";

/// File name of the vault inside the app folder.
const VAULT_FILE: &str = "keylaunch.kdbx";

/// Resolved on-disk locations for one invocation.
///
/// Built once per command from the test-mode flag and passed by
/// parameter; nothing here is cached between invocations.
#[derive(Debug, Clone)]
pub struct Paths {
    /// The private application folder (`~/.keylaunch` or `<cwd>/test/.keylaunch`).
    pub app_dir: PathBuf,

    /// The launcher executable copied into the app folder at setup time.
    pub launcher_exe: PathBuf,

    /// The encrypted vault file.
    pub vault_file: PathBuf,
}

impl Paths {
    /// Resolve all paths for this invocation.
    ///
    /// `test_mode` redirects the root from the home directory to a
    /// `test` subdirectory of the current working directory.
    pub fn resolve(test_mode: bool) -> Result<Self> {
        let root = if test_mode {
            std::env::current_dir()?.join("test")
        } else {
            dirs::home_dir().ok_or(KeyLaunchError::NoHomeDir)?
        };

        Ok(Self::under(&root))
    }

    /// Build the path triple under an explicit root.
    pub fn under(root: &Path) -> Self {
        let app_dir = root.join(APP_DIR_NAME);
        let launcher_exe = app_dir.join(LAUNCHER_EXE);
        let vault_file = app_dir.join(VAULT_FILE);

        Paths {
            app_dir,
            launcher_exe,
            vault_file,
        }
    }

    /// Location of the launcher executable shipped alongside the
    /// installer, relative to the directory `setup` is run from.
    pub fn bundled_launcher() -> Result<PathBuf> {
        Ok(std::env::current_dir()?
            .join("thirdparty")
            .join("keepass_portable")
            .join(LAUNCHER_EXE))
    }
}
