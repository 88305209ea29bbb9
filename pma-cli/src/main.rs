//! PMA CLI - Command line tool for fetching and inspecting the PM2.5
//! exposure datasets behind the chart apps.

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "pma-cli",
    version,
    about = "PM2.5 Exposure Atlas dataset toolkit"
)]
struct Cli {
    #[command(subcommand)]
    command: pma_cmd::Command,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    pma_cmd::run(cli.command).await
}
