use clap::Parser;
use tracing::info;

use welcome::{Config, Server, api, logging};

#[tokio::main]
async fn main() -> Result<(), welcome::Error> {
    let config = Config::parse();
    logging::init(&config.log_filter)?;

    info!(addr = %config.addr, "welcome v{} starting", env!("CARGO_PKG_VERSION"));

    Server::bind(config.addr).serve(api::routes()).await
}
