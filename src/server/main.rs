//! This server keeps text notes in memory and exposes them over a small
//! JSON API, along with per-method request counts at `/metrics`.
use anyhow::Context;
use notes::{config::ServerConfig, state::AppState};
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, EnvFilter, Registry};

/// Installs the global subscriber. The returned guard flushes the log file
/// writer when dropped, so it must live as long as the server.
fn init_logging(config: &ServerConfig) -> anyhow::Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_new(&config.log_filter)
        .with_context(|| format!("invalid log filter {:?}", config.log_filter))?;
    let stdout = fmt::layer().with_target(false);

    match &config.log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "server.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let subscriber = Registry::default()
                .with(filter)
                .with(stdout)
                .with(fmt::layer().with_ansi(false).with_writer(writer));

            tracing::subscriber::set_global_default(subscriber)
                .context("failed to set global default")?;

            Ok(Some(guard))
        }
        None => {
            let subscriber = Registry::default().with(filter).with(stdout);

            tracing::subscriber::set_global_default(subscriber)
                .context("failed to set global default")?;

            Ok(None)
        }
    }
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for ctrl-c: {:?}", err);
        std::future::pending::<()>().await;
    }

    info!("shutting down");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::load().context("failed to load config")?;
    let _guard = init_logging(&config)?;
    let addr = config.addr().context("failed to build listen address")?;
    let app = notes::app(AppState::shared());

    let server = axum::Server::try_bind(&addr)
        .with_context(|| format!("failed to bind {addr}"))?
        .serve(app.into_make_service());

    info!("listening on {}", server.local_addr());

    server
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")
}
