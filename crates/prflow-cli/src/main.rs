//! prflow CLI - pull request automation for GitHub Actions workflows.

use clap::Parser;

mod commands;
mod logging;
mod output;
mod services;

use commands::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    output::set_quiet(cli.quiet);
    logging::init(cli.verbose);

    let globals = cli.globals();

    let result = match cli.command {
        Commands::Rebase(args) => commands::rebase::run(&globals, &args),
        Commands::Merge(args) => commands::merge::run(&globals, &args),
        Commands::Vet(args) => commands::vet::run(&globals, &args),
        Commands::Note(args) => commands::note::run(&args),
        Commands::Say(args) => commands::say::run(&globals, &args),
        Commands::Exec(args) => commands::exec::run(&globals, &args),
        Commands::Checks(args) => commands::checks::run(&globals, &args),
        Commands::Completions { shell } => commands::completions::run(shell),
    };

    if let Err(e) = result {
        output::error(&format!("{e:#}"));
        std::process::exit(1);
    }
}
