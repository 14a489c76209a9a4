mod cmd;

use anyhow::Result;
use clap::Parser;

/// nmt: subword tokenization and beam search translation.
#[derive(Parser)]
#[command(name = "nmt", version, about)]
struct Cli {
    #[command(subcommand)]
    command: cmd::Command,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    cmd::run(cli.command)
}
