use clap::Parser;
use inmet_processor::cli::{run, Cli};
use inmet_processor::error::Result;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    run(cli).await
}
