//! Vault module — the KDBX credential store.
//!
//! The vault format itself (crypto, key derivation, integrity checks,
//! whole-file save) is owned by the `keepass` crate. This module only
//! adapts it: one group per registered database, one entry per group,
//! typed errors instead of the library's open/save error types.

pub mod store;

// Re-export the most commonly used items.
pub use store::{VaultEntry, VaultStore};
