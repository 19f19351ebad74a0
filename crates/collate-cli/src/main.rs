//! Collate CLI: the `collate` command.

mod cli;
mod commands;
mod support;
mod telemetry;

use clap::Parser;
use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();
    telemetry::init(cli.verbose);

    let config = support::load_config_or_exit(cli.config.as_deref());

    match cli.command {
        Commands::Iterate { input } => commands::iterate::run(&config, input),
        Commands::Count { input } => commands::count::run(&config, input),
        Commands::Filter {
            input,
            field,
            equals,
        } => commands::filter::run(&config, input, field, equals),
        Commands::Flatten { input, field } => commands::flatten::run(&config, input, field),
        Commands::Merge { inputs } => commands::merge::run(&config, inputs),
        Commands::Config => commands::config::run(&config),
    }
}
