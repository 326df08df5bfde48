use clap::Parser;
use nutrition_insights::cli::{self, Cli, Command};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Serve => cli::serve::run().await,
        Command::Process { file } => cli::process::run(file).await,
    }
}
