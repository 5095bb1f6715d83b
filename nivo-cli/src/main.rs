//! nivo-cli - aggregates nivo snow and temperature tables into chart-ready JSON.

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "nivo-cli",
    version,
    about = "Snow height and temperature aggregation toolkit"
)]
struct Cli {
    #[command(subcommand)]
    command: nivo_cmd::Command,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    nivo_cmd::run(cli.command).await
}
