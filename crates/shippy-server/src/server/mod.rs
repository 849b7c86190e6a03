//! Server-side components of the shippy consignment service.
//!
//! - [`config`] - CLI/environment configuration and its validation.
//! - [`repository`] - The [`Repository`](repository::Repository) abstraction
//!   and the in-memory store.
//! - [`service`] - The `ShippingService` gRPC handler.
//! - [`runtime`] - Router assembly, health, reflection, and graceful
//!   shutdown.
//! - [`telemetry`] - Logging and optional OpenTelemetry export.

pub mod config;
pub mod repository;
pub mod runtime;
pub mod service;
pub mod telemetry;
