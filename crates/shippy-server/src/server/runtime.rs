//! Router assembly and listener lifecycle.
//!
//! [`serve_with_incoming`] mounts the shipping service next to gRPC health and
//! reflection, serves until `signal` resolves, then drains in-flight calls for
//! at most the configured shutdown timeout. The listener itself is created by
//! the caller, which keeps the binding a runtime decision.

use crate::server::{repository::Repository, service::handler::ConsignmentService};
use anyhow::Context;
use core::time::Duration;
use futures::Stream;
use shippy_core::proto::{FILE_DESCRIPTOR_SET, shipping_service_server::ShippingServiceServer};
use std::sync::Arc;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::TcpListener;
use tokio_stream::wrappers::TcpListenerStream;
use tokio_util::sync::CancellationToken;
use tonic::transport::server::Connected;
use tonic::{codec::CompressionEncoding, transport::Server};
use tonic_reflection::server::Builder;
use tonic_web::GrpcWebLayer;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};

/// Binds a TCP listener on `addr`.
///
/// # Errors
///
/// Fails with the address in the message if the socket cannot be bound.
pub async fn bind_tcp(addr: &str) -> anyhow::Result<TcpListenerStream> {
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to listen on {addr}"))?;
    Ok(TcpListenerStream::new(listener))
}

/// Binds a Unix domain socket at `path`.
///
/// # Errors
///
/// Fails with the path in the message if the socket cannot be bound.
#[cfg(unix)]
pub fn bind_uds(path: &str) -> anyhow::Result<tokio_stream::wrappers::UnixListenerStream> {
    let listener = tokio::net::UnixListener::bind(path)
        .with_context(|| format!("failed to bind unix socket {path}"))?;
    Ok(tokio_stream::wrappers::UnixListenerStream::new(listener))
}

/// Serves the consignment API on `incoming` until `signal` completes.
///
/// Health is reported as `SERVING` before the first connection is accepted and
/// flipped to `NOT_SERVING` as soon as `signal` fires. If in-flight calls have
/// not finished within `shutdown_timeout`, the server is dropped and the
/// function returns anyway.
///
/// # Errors
///
/// Returns an error if reflection cannot be built from the descriptor set or
/// the transport fails while serving.
pub async fn serve_with_incoming<R, I, IO, IE, F>(
    repository: Arc<R>,
    incoming: I,
    shutdown_timeout: Duration,
    signal: F,
) -> anyhow::Result<()>
where
    R: Repository,
    I: Stream<Item = Result<IO, IE>>,
    IO: AsyncRead + AsyncWrite + Connected + Unpin + Send + 'static,
    IE: Into<tower::BoxError>,
    F: Future<Output = ()>,
{
    let (health_reporter, health_service) = tonic_health::server::health_reporter();
    health_reporter
        .set_serving::<ShippingServiceServer<ConsignmentService<R>>>()
        .await;

    let service = ConsignmentService::new(Arc::clone(&repository));

    let reflection = Builder::configure()
        .register_encoded_file_descriptor_set(FILE_DESCRIPTOR_SET)
        .build_v1()?;

    let draining = CancellationToken::new();
    let shutdown = {
        let draining = draining.clone();
        async move {
            signal.await;
            #[cfg(feature = "tracing")]
            tracing::info!("Shutdown signal received, draining in-flight calls");
            health_reporter
                .set_not_serving::<ShippingServiceServer<ConsignmentService<R>>>()
                .await;
            draining.cancel();
        }
    };

    let server = Server::builder()
        .accept_http1(true)
        .http2_adaptive_window(Some(true))
        .layer(
            ServiceBuilder::new()
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods(Any)
                        .allow_headers(Any),
                )
                .layer(GrpcWebLayer::new()),
        )
        .add_service(health_service)
        .add_service(reflection)
        .add_service(build_shipping_service(service))
        .serve_with_incoming_shutdown(incoming, shutdown);

    let drain_deadline = async {
        draining.cancelled().await;
        tokio::time::sleep(shutdown_timeout).await;
    };

    tokio::select! {
        res = server => res?,
        () = drain_deadline => {
            #[cfg(feature = "tracing")]
            tracing::warn!(
                "Graceful drain timed out after {:?}, dropping remaining calls",
                shutdown_timeout
            );
        }
    }

    #[cfg(feature = "tracing")]
    tracing::info!(stored = repository.len(), "Service shut down successfully");
    Ok(())
}

fn build_shipping_service<R: Repository>(
    service: ConsignmentService<R>,
) -> ShippingServiceServer<ConsignmentService<R>> {
    ShippingServiceServer::new(service)
        .send_compressed(CompressionEncoding::Zstd)
        .send_compressed(CompressionEncoding::Gzip)
        .send_compressed(CompressionEncoding::Deflate)
        .accept_compressed(CompressionEncoding::Zstd)
        .accept_compressed(CompressionEncoding::Gzip)
        .accept_compressed(CompressionEncoding::Deflate)
}
