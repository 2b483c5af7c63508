//! ocelot-config - resolve the Ocelot build configuration

use std::io::IsTerminal;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use ocelot_config::ConfigError;

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();
    let color = !cli.no_color && std::io::stderr().is_terminal();

    if let Err(e) = run(cli) {
        match e.downcast_ref::<ConfigError>() {
            Some(err) => eprint!("{}", err.render(color)),
            None => eprintln!("error: {:#}", e),
        }
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    // Set up logging
    let filter = if cli.verbose {
        EnvFilter::new("ocelot_config=debug")
    } else {
        EnvFilter::new("ocelot_config=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    let source_root = cli.source_root;

    match cli.command {
        Commands::Resolve(args) => commands::resolve::execute(args, source_root.as_deref()),
        Commands::Flags(args) => commands::flags::execute(args, source_root.as_deref()),
        Commands::Deps(args) => commands::deps::execute(args, source_root.as_deref()),
        Commands::Version => commands::version::execute(source_root.as_deref()),
        Commands::Options(args) => commands::options::execute(args, source_root.as_deref()),
        Commands::Completions(args) => commands::completions::execute(args),
    }
}
