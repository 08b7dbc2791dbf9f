//! Signal handling for graceful shutdown

use tracing::info;

/// Wait for shutdown signals (SIGTERM, SIGINT, SIGHUP)
#[cfg(unix)]
pub async fn shutdown_signal() {
    use futures::stream::StreamExt;
    use signal_hook_tokio::Signals;
    use tracing::warn;

    let mut signals = match Signals::new([
        signal_hook::consts::SIGTERM,
        signal_hook::consts::SIGINT,
        signal_hook::consts::SIGHUP,
    ]) {
        Ok(signals) => signals,
        Err(e) => {
            warn!("Failed to register signal handlers: {}", e);
            return std::future::pending().await;
        }
    };

    if let Some(signal) = signals.next().await {
        info!("Received signal: {}", signal);
    }
}

/// Wait for Ctrl+C
#[cfg(not(unix))]
pub async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Received Ctrl+C");
    } else {
        std::future::pending::<()>().await;
    }
}
