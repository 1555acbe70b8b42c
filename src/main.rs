use dotenv::dotenv;
use human_panic::setup_panic;
use tracing::{info, warn};

use rust_deanery::config::AppConfig;
use rust_deanery::runtime::{http, lifetime, logging};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    setup_panic!();

    let started = std::time::Instant::now();
    let config = AppConfig::init()
        .map_err(|e| std::io::Error::other(format!("Invalid configuration: {e}")))?;
    let _log_guard = logging::init_tracing(config);

    warn!(
        "Starting {} v{} ({})",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        config.app.environment
    );

    let startup = lifetime::startup::prepare_server_startup()
        .await
        .map_err(std::io::Error::other)?;

    info!(
        "Startup completed in {} ms, serving with {} worker(s)",
        started.elapsed().as_millis(),
        config.server.workers
    );

    http::serve(startup.storage, config).await
}
