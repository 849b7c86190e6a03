//! Error types for the consignment service.
//!
//! [`Error`] is what a repository hands back when it refuses a write. The
//! handler never inspects or rewrites it: the value is converted into a
//! `tonic::Status` and returned to the caller as a method-level error.

use tonic::Status;

pub type Result<T> = core::result::Result<T, Error>;

/// Unified error type for the consignment service.
#[derive(Clone, thiserror::Error, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// The repository could not store the consignment.
    #[error("Repository error: {reason}")]
    Repository { reason: String },
}

impl From<Error> for Status {
    fn from(err: Error) -> Self {
        match err {
            Error::Repository { .. } => Status::internal(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tonic::Code;

    #[test]
    fn repository_error_becomes_internal_status_with_reason() {
        let err = Error::Repository {
            reason: "storage exhausted".to_string(),
        };
        let status = Status::from(err.clone());

        assert_eq!(status.code(), Code::Internal);
        assert_eq!(status.message(), err.to_string());
        assert!(status.message().contains("storage exhausted"));
    }
}
