//! One module per command flow.

pub mod all;
pub mod entry_setup;
pub mod launch;
pub mod list;
pub mod open;
pub mod path;
pub mod setup;
pub mod uninstall;
