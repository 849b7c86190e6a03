//! Shared wire types and errors for the shippy service.
//!
//! - [`error`] - The service error type and its mapping onto `tonic::Status`.
//! - [`proto`] - Messages and gRPC stubs generated from
//!   `proto/consignment.proto`.

pub mod error;
pub use error::{Error, Result};

/// gRPC service and message definitions generated from
/// `proto/consignment.proto`.
///
/// ## Service
///
/// - `ShippingService.CreateConsignment` - stores a [`Consignment`] and replies
///   with a [`Response`] carrying the stored value.
///
/// The messages also derive `serde` traits (every field optional in JSON), so
/// a manifest can be read from a file:
///
/// ```rust
/// use shippy_core::proto::Consignment;
///
/// let consignment: Consignment =
///     serde_json::from_str(r#"{"description": "electronics", "weight": 450}"#).unwrap();
/// assert_eq!(consignment.weight, 450);
/// assert!(consignment.containers.is_empty());
/// ```
///
/// [`Consignment`]: proto::Consignment
/// [`Response`]: proto::Response
pub mod proto {
    tonic::include_proto!("consignment");

    /// Encoded file descriptor set for gRPC server reflection.
    pub const FILE_DESCRIPTOR_SET: &[u8] =
        tonic::include_file_descriptor_set!("consignment_descriptor");
}
