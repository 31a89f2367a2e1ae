mod cli;
mod commands;

use cli::{Cli, Commands};
use commands::{fetch, list, map};
use tracing_subscriber::EnvFilter;

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

pub fn run() -> anyhow::Result<()> {
    use clap::Parser;

    let cli = Cli::parse();
    init_logging(cli.verbose);
    match &cli.command {
        Commands::Fetch(args) => fetch::run(&cli, args),
        Commands::List(args) => list::run(&cli, args),
        Commands::Map(args) => map::run(&cli, args),
    }
}

fn main() -> anyhow::Result<()> { run() }
