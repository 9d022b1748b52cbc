use anyhow::Result;
use clap::Parser;

use aircesfam_engine::cli::{run, Cli};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    run(cli).await?;
    Ok(())
}
