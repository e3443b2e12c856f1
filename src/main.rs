mod app;
mod classifier;
mod config;
mod domain;
mod infrastructure;
mod overlay;
mod page;
mod scan;

use anyhow::Result;
use clap::Parser;

use app::{Cli, ToxScanApp};
use infrastructure::logging;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = config::load_config()?;
    logging::init_tracing(&config)?;

    let app = ToxScanApp::initialize(config)?;
    app.run(cli).await
}
