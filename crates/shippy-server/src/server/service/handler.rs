//! gRPC service implementation for consignment ingestion.
//!
//! [`ConsignmentService`] implements the generated [`ShippingService`] trait.
//! It is a thin call-through: the decoded consignment goes to the
//! [`Repository`] untouched, and the stored value comes back in a
//! [`proto::Response`]. Repository failures are converted into a
//! [`Status`] and returned as-is; no response is built on that path.

use crate::server::{
    repository::Repository,
    telemetry::{increment_consignments_created, increment_create_errors, record_create},
};
use shippy_core::proto::{self, Consignment, shipping_service_server::ShippingService};
use std::sync::Arc;
use tonic::{Request, Response, Status};

/// gRPC handler for the `ShippingService` API.
///
/// Holds no per-call state; everything that outlives a call lives in the
/// shared repository.
pub struct ConsignmentService<R> {
    repository: Arc<R>,
}

impl<R: Repository> ConsignmentService<R> {
    /// Creates a handler that stores into `repository`.
    pub const fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// The repository this handler writes to.
    pub fn repository(&self) -> &Arc<R> {
        &self.repository
    }
}

impl<R> Clone for ConsignmentService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

#[tonic::async_trait]
impl<R: Repository> ShippingService for ConsignmentService<R> {
    /// Stores the consignment and echoes it back with `created = true`.
    ///
    /// If `metrics` is enabled, records the outcome, the container count, and
    /// the time spent in the repository.
    #[cfg_attr(feature = "tracing", tracing::instrument(
        skip_all,
        fields(
            weight = req.get_ref().weight,
            containers = req.get_ref().containers.len(),
        )
    ))]
    async fn create_consignment(
        &self,
        req: Request<Consignment>,
    ) -> Result<Response<proto::Response>, Status> {
        let start = std::time::Instant::now();
        let consignment = req.into_inner();
        let containers = consignment.containers.len();

        let stored = match self.repository.create(consignment) {
            Ok(stored) => stored,
            Err(e) => {
                increment_create_errors();
                #[cfg(feature = "tracing")]
                tracing::warn!("Failed to store consignment: {}", e);
                return Err(e.into());
            }
        };

        increment_consignments_created();
        record_create(containers as f64, start.elapsed().as_secs_f64() * 1000.0);

        #[cfg(feature = "tracing")]
        tracing::debug!(stored = self.repository.len(), "Consignment stored");

        Ok(Response::new(proto::Response {
            created: true,
            consignment: Some(Consignment::clone(&stored)),
        }))
    }
}
