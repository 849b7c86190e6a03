use clap::Parser;
use shippy_server::server::{
    config::{CliArgs, ServerConfig},
    repository::MemoryRepository,
    runtime::{bind_tcp, serve_with_incoming},
    telemetry::init_telemetry,
};
#[cfg(unix)]
use shippy_server::server::runtime::bind_uds;
use std::sync::Arc;
use tokio::signal;

// Using mimalloc for better performance under contention, especially in musl
// environments.
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load from .env
    let _ = dotenvy::dotenv();
    let args = CliArgs::parse();
    let config = ServerConfig::try_from(args)?;

    let repository = Arc::new(MemoryRepository::with_capacity(config.initial_capacity));

    // Telemetry starts only once the listener is bound; providers are flushed
    // on every exit after that point.
    if config.uds {
        #[cfg(unix)]
        {
            let incoming = bind_uds(&config.server_addr)?;
            let providers = init_telemetry()?;
            log_startup_info(&config.server_addr, &config);
            let res = serve_with_incoming(
                repository,
                incoming,
                config.shutdown_timeout,
                shutdown_signal(),
            )
            .await;
            let _ = std::fs::remove_file(&config.server_addr);
            providers.shutdown();
            res
        }
        #[cfg(not(unix))]
        {
            anyhow::bail!("Unix domain sockets are not supported on this platform");
        }
    } else {
        let incoming = bind_tcp(&config.server_addr).await?;
        let providers = init_telemetry()?;
        log_startup_info(&config.server_addr, &config);
        let res = serve_with_incoming(
            repository,
            incoming,
            config.shutdown_timeout,
            shutdown_signal(),
        )
        .await;
        providers.shutdown();
        res
    }
}

fn log_startup_info(_addr: &str, _config: &ServerConfig) {
    #[cfg(feature = "tracing")]
    tracing::info!("Starting shipping service on {} with {:?}", _addr, _config);
}

async fn shutdown_signal() {
    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(_e) => {
                #[cfg(feature = "tracing")]
                tracing::error!("Failed to install SIGTERM handler: {}", _e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    let ctrl_c = async {
        if let Err(_e) = signal::ctrl_c().await {
            #[cfg(feature = "tracing")]
            tracing::error!("Failed to install Ctrl+C handler: {}", _e);
            std::future::pending::<()>().await;
        }
    };

    tokio::select! {
        () = ctrl_c => {
            #[cfg(feature = "tracing")]
            tracing::info!("Received Ctrl+C signal");
        },
        () = terminate => {
            #[cfg(feature = "tracing")]
            tracing::info!("Received SIGTERM signal");
        },
    }
}
