use clap::Parser;
use refuge_fetch::cli::{run, Cli};
use refuge_fetch::error::Result;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    run(cli).await
}
