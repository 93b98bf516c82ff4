//! Binary entry point: configuration, logging, HTTP server.

use anyhow::Result;
use roastery_scraper::config::Config;
use roastery_scraper::server;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("roastery_scraper=info".parse()?),
        )
        .init();

    let config = Config::from_env();
    server::serve(config).await
}
