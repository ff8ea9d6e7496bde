mod classifier;
mod cli;
mod config;
mod error;
mod exporter;
mod filter;
mod fmt;
mod importer;
mod models;
mod reports;

use clap::Parser;

use cli::{Cli, Commands};

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Inactivity {
            common,
            years,
            types,
            low,
            medium,
            high,
            branch,
            customer_type,
            tier,
            amount,
        } => cli::inactivity::run(
            &common,
            years,
            types,
            low,
            medium,
            high,
            branch,
            customer_type,
            tier,
            amount,
        ),
        Commands::Maturity {
            common,
            status,
            branch,
        } => cli::maturity::run(&common, status, branch),
        Commands::Transfer { common } => cli::transfer::run(&common),
        Commands::Freeze { common } => cli::freeze::run(&common),
        Commands::Ledger { common, category } => cli::ledger::run(&common, category),
        Commands::Violations {
            common,
            type_contains,
            years,
        } => cli::violations::run(&common, &type_contains, years),
        Commands::Unreachable { common } => cli::unreachable::run(&common),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
