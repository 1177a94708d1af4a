//! # kc
//!
//! Command-line tool for inspecting protocol mappers and previewing claims.

#![forbid(unsafe_code)]

use clap::Parser;
use kc_cli::{
    CliResult,
    cli::{Cli, Command},
    commands::{registry, run_evaluate, run_mappers},
    output::error,
};

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        error(&e.to_string());
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> CliResult<()> {
    // Load configuration
    let mut config = kc_core::Config::from_env()?;
    if let Some(issuer) = cli.issuer {
        config.issuance.issuer = issuer;
    }
    if cli.verbose {
        config.logging.level = "debug".to_string();
    }

    kc_core::logging::init(&config.logging)?;

    let registry = registry();

    // Execute command
    match cli.command {
        Command::Mappers(cmd) => run_mappers(cmd, &registry, cli.output),
        Command::Evaluate(args) => run_evaluate(args, &config.issuance, &registry, cli.output),
    }
}
