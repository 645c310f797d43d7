use clap::Parser;
use eyre::Result;

use rehab_cli::cli::Cli;
use rehab_cli::{commands, logging};

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    logging::init(cli.json);

    commands::run(cli).await
}
