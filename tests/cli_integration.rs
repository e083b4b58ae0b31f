//! Integration tests for the keylaunch CLI.
//!
//! These exercise the binary end-to-end using `assert_cmd`. Interactive
//! prompts can't run without a terminal, so every test either stays on
//! non-interactive surfaces (--help, usage errors) or supplies the
//! master password through `KEYLAUNCH_PASSWORD` and the hidden `-t`
//! flag, with the test root pointed at a temp directory.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

use keylaunch::vault::VaultStore;

const PASSWORD: &str = "integration-pw";

/// Helper: get a Command pointing at the keylaunch binary, with the
/// password env var pinned so no prompt is ever attempted.
fn keylaunch() -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("keylaunch").expect("binary should exist");
    cmd.env("KEYLAUNCH_PASSWORD", PASSWORD);
    cmd
}

/// Helper: pre-create a vault at `<tmp>/test/.keylaunch/keylaunch.kdbx`
/// (where `-t` resolves to) and hand back an open store for seeding.
fn seed_vault(tmp: &TempDir) -> VaultStore {
    let app_dir = tmp.path().join("test").join(".keylaunch");
    std::fs::create_dir_all(&app_dir).unwrap();
    VaultStore::create(&app_dir.join("keylaunch.kdbx"), PASSWORD).unwrap()
}

// ---------------------------------------------------------------------------
// Surface checks
// ---------------------------------------------------------------------------

#[test]
fn help_flag_shows_subcommands() {
    keylaunch()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("KeePass database launcher"))
        .stdout(predicate::str::contains("setup"))
        .stdout(predicate::str::contains("open"))
        .stdout(predicate::str::contains("all"))
        .stdout(predicate::str::contains("uninstall"));
}

#[test]
fn version_flag_shows_version() {
    keylaunch()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("keylaunch"));
}

#[test]
fn no_args_shows_usage() {
    keylaunch()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_flag_is_hidden_from_help() {
    keylaunch()
        .args(["open", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--test").not());
}

// ---------------------------------------------------------------------------
// Missing-vault handling: printed hint, exit 0
// ---------------------------------------------------------------------------

#[test]
fn open_without_vault_prints_setup_hint_and_exits_zero() {
    let tmp = TempDir::new().unwrap();

    keylaunch()
        .args(["open", "-o", "-t"])
        .current_dir(tmp.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("vault not found"))
        .stdout(predicate::str::contains("keylaunch setup"));
}

#[test]
fn all_without_vault_prints_setup_hint_and_exits_zero() {
    let tmp = TempDir::new().unwrap();

    keylaunch()
        .args(["all", "-t"])
        .current_dir(tmp.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("vault not found"))
        .stdout(predicate::str::contains("keylaunch setup"));
}

// ---------------------------------------------------------------------------
// Wrong password: login-invalid message, exit 0, no stack trace
// ---------------------------------------------------------------------------

#[test]
fn wrong_password_prints_login_invalid_and_exits_zero() {
    let tmp = TempDir::new().unwrap();
    seed_vault(&tmp);

    keylaunch()
        .env("KEYLAUNCH_PASSWORD", "definitely-wrong")
        .args(["open", "-o", "-t"])
        .current_dir(tmp.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("login information invalid"))
        .stderr(predicate::str::contains("panicked").not());
}

// ---------------------------------------------------------------------------
// Listing and path display
// ---------------------------------------------------------------------------

#[test]
fn listing_prints_entry_names_under_header() {
    let tmp = TempDir::new().unwrap();
    let mut store = seed_vault(&tmp);
    store.add_entry("alpha", "C:/a.kdbx", "a-secret");
    store.add_entry("beta", "C:/b.kdbx", "b-secret");
    store.save().unwrap();

    keylaunch()
        .args(["open", "-t"])
        .current_dir(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("ENTRIES AVAILABLE:"))
        .stdout(predicate::str::contains("alpha"))
        .stdout(predicate::str::contains("beta"));
}

#[test]
fn path_display_reports_url() {
    let tmp = TempDir::new().unwrap();
    let mut store = seed_vault(&tmp);
    store.add_entry("alpha", "C:/vaults/alpha.kdbx", "a-secret");
    store.save().unwrap();

    keylaunch()
        .args(["open", "alpha", "-p", "-t"])
        .current_dir(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("ALPHA PATH: C:/vaults/alpha.kdbx"))
        .stdout(predicate::str::contains("ALPHA KEY:").not());
}

#[test]
fn path_display_reports_key_file_when_set() {
    let tmp = TempDir::new().unwrap();
    let mut store = seed_vault(&tmp);
    store.add_entry("alpha", "C:/vaults/alpha.kdbx", "a-secret");
    store.save().unwrap();
    store.set_key_file("alpha", "C:/vaults/alpha.key").unwrap();
    store.save().unwrap();

    keylaunch()
        .args(["open", "alpha", "-p", "-t"])
        .current_dir(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("ALPHA PATH: C:/vaults/alpha.kdbx"))
        .stdout(predicate::str::contains("ALPHA KEY: C:/vaults/alpha.key"));
}

// ---------------------------------------------------------------------------
// Missing entries: same remediation hint for launch and path display
// ---------------------------------------------------------------------------

#[test]
fn launching_unknown_entry_prints_remediation_hint() {
    let tmp = TempDir::new().unwrap();
    seed_vault(&tmp);

    keylaunch()
        .args(["open", "ghost", "-t"])
        .current_dir(tmp.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("No entry named 'ghost'"))
        .stdout(predicate::str::contains("keylaunch open ghost -s"));
}

#[test]
fn path_display_for_unknown_entry_prints_same_hint() {
    let tmp = TempDir::new().unwrap();
    seed_vault(&tmp);

    keylaunch()
        .args(["open", "ghost", "-p", "-t"])
        .current_dir(tmp.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("No entry named 'ghost'"))
        .stdout(predicate::str::contains("keylaunch open ghost -s"));
}

// ---------------------------------------------------------------------------
// Launching
// ---------------------------------------------------------------------------

#[test]
fn launch_with_missing_executable_prints_spawn_error_and_exits_zero() {
    let tmp = TempDir::new().unwrap();
    let mut store = seed_vault(&tmp);
    store.add_entry("alpha", "C:/vaults/alpha.kdbx", "a-secret");
    store.save().unwrap();

    // No keepass.exe was ever installed into the test app dir.
    keylaunch()
        .args(["open", "alpha", "-t"])
        .current_dir(tmp.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("Failed to start launcher"));
}

/// Install a fake viewer executable that appends every argument it
/// receives, one per line, to a log file next to itself. Returns the
/// log path.
#[cfg(unix)]
fn install_fake_launcher(tmp: &TempDir) -> std::path::PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let app_dir = tmp.path().join("test").join(".keylaunch");
    let exe = app_dir.join("keepass.exe");
    let log = app_dir.join("launches.log");
    std::fs::write(
        &exe,
        format!("#!/bin/sh\nprintf '%s\\n' \"$@\" >> \"{}\"\n", log.display()),
    )
    .unwrap();
    std::fs::set_permissions(&exe, std::fs::Permissions::from_mode(0o755)).unwrap();
    log
}

/// The viewer is spawned fire-and-forget, so poll until the log carries
/// everything we expect (or give up).
#[cfg(unix)]
fn wait_for_launch_log(log: &std::path::Path, needles: &[&str]) -> String {
    for _ in 0..50 {
        if let Ok(contents) = std::fs::read_to_string(log) {
            if needles.iter().all(|n| contents.contains(n)) {
                return contents;
            }
        }
        std::thread::sleep(std::time::Duration::from_millis(100));
    }
    panic!("launcher was not invoked with the expected arguments");
}

#[cfg(unix)]
#[test]
fn launch_invokes_viewer_with_url_and_password() {
    let tmp = TempDir::new().unwrap();
    let mut store = seed_vault(&tmp);
    store.add_entry("alpha", "C:/vaults/alpha.kdbx", "a-secret");
    store.save().unwrap();
    let log = install_fake_launcher(&tmp);

    // `-i` supplies the password, so no prompt and no env var needed.
    keylaunch()
        .env_remove("KEYLAUNCH_PASSWORD")
        .args(["open", "alpha", "-i", PASSWORD, "-t"])
        .current_dir(tmp.path())
        .assert()
        .success();

    let contents = wait_for_launch_log(&log, &["C:/vaults/alpha.kdbx", "-pw:a-secret"]);
    assert!(!contents.contains("-keyfile:"));
}

#[cfg(unix)]
#[test]
fn launch_passes_key_file_argument_when_set() {
    let tmp = TempDir::new().unwrap();
    let mut store = seed_vault(&tmp);
    store.add_entry("alpha", "C:/vaults/alpha.kdbx", "a-secret");
    store.save().unwrap();
    store.set_key_file("alpha", "C:/vaults/alpha.key").unwrap();
    store.save().unwrap();
    let log = install_fake_launcher(&tmp);

    keylaunch()
        .args(["open", "alpha", "-t"])
        .current_dir(tmp.path())
        .assert()
        .success();

    wait_for_launch_log(
        &log,
        &[
            "C:/vaults/alpha.kdbx",
            "-pw:a-secret",
            "-keyfile:C:/vaults/alpha.key",
        ],
    );
}

// ---------------------------------------------------------------------------
// Batch launching
// ---------------------------------------------------------------------------

#[test]
fn all_with_zero_entries_prints_notice() {
    let tmp = TempDir::new().unwrap();
    seed_vault(&tmp);

    keylaunch()
        .args(["all", "-t"])
        .current_dir(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("No entries created yet."))
        .stdout(predicate::str::contains("STATUS:").not());
}

#[cfg(unix)]
#[test]
fn all_prints_one_status_line_per_entry() {
    let tmp = TempDir::new().unwrap();
    let mut store = seed_vault(&tmp);
    store.add_entry("alpha", "C:/a.kdbx", "a-secret");
    store.add_entry("beta", "C:/b.kdbx", "b-secret");
    store.save().unwrap();
    store.set_key_file("beta", "C:/b.key").unwrap();
    store.save().unwrap();
    let log = install_fake_launcher(&tmp);

    keylaunch()
        .args(["all", "-t"])
        .current_dir(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("STATUS: alpha database launched."))
        .stdout(predicate::str::contains("STATUS: beta database launched."));

    // Both viewers got their own credentials, beta with its key file.
    wait_for_launch_log(
        &log,
        &[
            "C:/a.kdbx",
            "-pw:a-secret",
            "C:/b.kdbx",
            "-pw:b-secret",
            "-keyfile:C:/b.key",
        ],
    );
}

// ---------------------------------------------------------------------------
// Setup and uninstall
// ---------------------------------------------------------------------------

#[test]
fn setup_installs_launcher_and_creates_vault() {
    let tmp = TempDir::new().unwrap();

    // The bundled launcher the installer ships, relative to the cwd.
    let bundled = tmp.path().join("thirdparty").join("keepass_portable");
    std::fs::create_dir_all(&bundled).unwrap();
    std::fs::write(bundled.join("keepass.exe"), b"not a real exe").unwrap();

    keylaunch()
        .args(["setup", "-t"])
        .current_dir(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("vault created"));

    let app_dir = tmp.path().join("test").join(".keylaunch");
    assert!(app_dir.join("keepass.exe").exists());
    assert!(app_dir.join("keylaunch.kdbx").exists());

    // The fresh vault opens with the same password and has no entries.
    keylaunch()
        .args(["open", "-t"])
        .current_dir(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("No entries created yet."));
}

#[test]
fn setup_decline_leaves_vault_unchanged_and_exits_nonzero() {
    let tmp = TempDir::new().unwrap();
    let mut store = seed_vault(&tmp);
    store.add_entry("alpha", "C:/a.kdbx", "a-secret");
    store.save().unwrap();

    // Launcher already installed, so setup goes straight to the
    // overwrite confirmation.
    let app_dir = tmp.path().join("test").join(".keylaunch");
    std::fs::write(app_dir.join("keepass.exe"), b"installed").unwrap();

    keylaunch()
        .env("KEYLAUNCH_PASSWORD", "a-different-password")
        .env("KEYLAUNCH_CONFIRM", "n")
        .args(["setup", "-t"])
        .current_dir(tmp.path())
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("cancelled"));

    // The original master password still opens the vault and the entry
    // survived untouched.
    let store = VaultStore::open(&app_dir.join("keylaunch.kdbx"), PASSWORD).unwrap();
    assert_eq!(store.database_names(), vec!["alpha".to_string()]);
    let entry = store.entry("alpha").unwrap();
    assert_eq!(entry.url().unwrap(), "C:/a.kdbx");
    assert_eq!(entry.secret().unwrap(), "a-secret");
}

#[test]
fn wizard_decline_leaves_entry_unchanged() {
    let tmp = TempDir::new().unwrap();
    let mut store = seed_vault(&tmp);
    store.add_entry("alpha", "C:/old.kdbx", "old-secret");
    store.save().unwrap();

    keylaunch()
        .env("KEYLAUNCH_CONFIRM", "n")
        .args(["open", "alpha", "-s", "-t"])
        .current_dir(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("left unchanged"));

    let vault = tmp
        .path()
        .join("test")
        .join(".keylaunch")
        .join("keylaunch.kdbx");
    let store = VaultStore::open(&vault, PASSWORD).unwrap();
    let entry = store.entry("alpha").unwrap();
    assert_eq!(entry.url().unwrap(), "C:/old.kdbx");
    assert_eq!(entry.secret().unwrap(), "old-secret");
}

#[test]
fn setup_without_bundled_launcher_prints_hint_and_exits_zero() {
    let tmp = TempDir::new().unwrap();

    keylaunch()
        .args(["setup", "-t"])
        .current_dir(tmp.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("launcher executable not found"));
}

#[test]
fn uninstall_without_install_is_a_noop() {
    let tmp = TempDir::new().unwrap();

    keylaunch()
        .args(["uninstall", "-t"])
        .current_dir(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("keylaunch folder not found"));
}
