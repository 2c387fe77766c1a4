use clap::Parser;
use tracing_subscriber::EnvFilter;

use qrsnap::cli::{Cli, Command};
use qrsnap::commands;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Generate(args) => commands::generate(args)?,
        Command::Watch(args) => commands::watch(args)?,
        Command::History { command } => commands::history(command)?,
        Command::Templates { command } => commands::templates(command)?,
    }

    Ok(())
}
