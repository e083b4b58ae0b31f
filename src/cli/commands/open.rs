//! `keylaunch open` — dispatch between the setup wizard, path display,
//! listing, and launching for a single named entry.

use crate::config::Paths;
use crate::errors::Result;

use super::{entry_setup, launch, list, path};

/// Execute the `open` command.
///
/// With no entry name there is nothing to set up, show, or launch, so
/// every flag combination falls back to the listing.
#[allow(clippy::fn_params_excessive_bools)]
pub fn execute(
    database: Option<&str>,
    setup: bool,
    show_path: bool,
    options: bool,
    input_password: Option<&str>,
    test: bool,
) -> Result<()> {
    let paths = Paths::resolve(test)?;

    let Some(name) = database.filter(|n| !n.is_empty()) else {
        return list::run(&paths);
    };

    if setup {
        entry_setup::run(&paths, name)
    } else if options {
        list::run(&paths)
    } else if show_path {
        path::run(&paths, name)
    } else {
        launch::run(&paths, name, input_password)
    }
}
