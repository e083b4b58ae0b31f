use clap::Parser;
use keylaunch::cli::{report_error, Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Setup { test } => keylaunch::cli::commands::setup::execute(test),
        Commands::Open {
            ref database,
            setup,
            path,
            options,
            ref input_password,
            test,
        } => keylaunch::cli::commands::open::execute(
            database.as_deref(),
            setup,
            path,
            options,
            input_password.as_deref(),
            test,
        ),
        Commands::All { test } => keylaunch::cli::commands::all::execute(test),
        Commands::Uninstall { test } => keylaunch::cli::commands::uninstall::execute(test),
    };

    if let Err(e) = result {
        let code = report_error(&e);
        std::process::exit(code);
    }
}
