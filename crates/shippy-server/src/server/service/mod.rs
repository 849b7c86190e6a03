//! gRPC service implementation.
//!
//! - [`handler`] - `ShippingService` entry point (`ConsignmentService`).

pub mod handler;
