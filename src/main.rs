mod cli;
mod client;
mod commands;
mod config;
mod diff;
mod error;
mod output;
mod review;
mod vcs;

use clap::Parser;

use cli::{Cli, Commands};
use config::GerritConfig;

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    if let Err(err) = run(&cli) {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let config = GerritConfig::from_env()?;

    match &cli.command {
        Commands::List(args) => commands::run_list(&config, args),
        Commands::Show(args) => commands::run_show(&config, args),
        Commands::Comment(args) => commands::run_comment(&config, args),
        Commands::Review(args) => commands::run_review(&config, args),
        Commands::Checkout(args) => commands::run_checkout(&config, args),
    }
}
