use common::diagnostics::{RemoteError, StoreError};
use thiserror::Error;

/// Failure of an API call made outside the normalizer.
#[derive(Debug, Error)]
pub enum ApiCallError {
    #[error(transparent)]
    Remote(#[from] RemoteError),
    #[error("{endpoint} answered {status}")]
    Status { endpoint: &'static str, status: u16 },
    #[error("could not keep the session: {0}")]
    Storage(#[from] StoreError),
}

impl From<gloo_net::Error> for ApiCallError {
    fn from(err: gloo_net::Error) -> Self {
        Self::Remote(RemoteError::Transport(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_failure_is_not_reported_as_transport() {
        let err = ApiCallError::from(StoreError::Unavailable);
        assert!(matches!(err, ApiCallError::Storage(_)));
        assert_eq!(err.to_string(), "could not keep the session: storage unavailable");
    }

    #[test]
    fn status_names_the_endpoint() {
        let err = ApiCallError::Status {
            endpoint: "sign-up",
            status: 500,
        };
        assert_eq!(err.to_string(), "sign-up answered 500");
    }
}
