use clap::Parser;
use content_relay::cli::{self, Cli, Command};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Dispatch(args) => cli::dispatch::run(args),
        Command::Inspect(args) => cli::inspect::run(args),
    }
}
