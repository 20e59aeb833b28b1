// src/bin/recruitai.rs
use anyhow::Result;
use clap::Parser;
use recruitai_dashboard::dashboard_cli::{handle_dashboard_command, DashboardCli};
use recruitai_dashboard::logging::init_cli_logging;

#[tokio::main]
async fn main() -> Result<()> {
    init_cli_logging()?;
    let cli = DashboardCli::parse();
    handle_dashboard_command(cli).await
}
