use clap::Parser;
use credlock::cli::{self, Cli, Command};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Hash(args) => cli::hash::run(args).await,
        Command::Verify(args) => cli::verify::run(args).await,
    }
}
