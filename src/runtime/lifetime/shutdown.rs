use tokio::signal;
use tracing::warn;

/// 等待 Ctrl+C（unix 下同时监听 SIGTERM）
pub async fn listen_for_shutdown() {
    #[cfg(unix)]
    {
        let mut terminate = match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(stream) => stream,
            Err(e) => {
                warn!("Failed to listen for SIGTERM: {}, falling back to Ctrl+C", e);
                wait_ctrl_c().await;
                return;
            }
        };
        tokio::select! {
            _ = wait_ctrl_c() => {}
            _ = terminate.recv() => {}
        }
    }

    #[cfg(not(unix))]
    wait_ctrl_c().await;

    warn!("Shutdown signal received, initiating graceful shutdown...");
}

async fn wait_ctrl_c() {
    if let Err(e) = signal::ctrl_c().await {
        warn!("Failed to listen for Ctrl+C: {}", e);
        std::future::pending::<()>().await;
    }
}
