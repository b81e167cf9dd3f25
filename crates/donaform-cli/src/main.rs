//! Donaform CLI: the `donaform` command.

mod cli;
mod commands;
mod support;

use clap::Parser;
use cli::{Cli, Commands};

fn main() {
    support::init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Init { path, force, json } => commands::init::run(path, force, json),

        Commands::Validate {
            values,
            config,
            json,
        } => commands::validate::run(values, config, json),

        Commands::Submit {
            values,
            config,
            delay_ms,
            json,
        } => commands::submit::run(values, config, delay_ms, json),

        Commands::Replay {
            events,
            values,
            config,
            delay_ms,
            json,
        } => commands::replay::run(commands::replay::Args {
            events,
            values,
            config,
            delay_ms,
            json,
        }),
    }
}
