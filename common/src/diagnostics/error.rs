use crate::model::history::NoMatchingYear;
use crate::model::stored::DecodeError;
use thiserror::Error;

/// Failure reaching the API. Callers fold it into the local fallback.
#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("request failed: {0}")]
    Transport(String),
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage unavailable")]
    Unavailable,
    #[error("could not write key {key}: {reason}")]
    Write { key: String, reason: String },
}

#[derive(Debug, Error)]
pub enum NormalizerError {
    #[error(transparent)]
    NoMatchingYear(#[from] NoMatchingYear),
    #[error("local storage: {0}")]
    Storage(#[from] StoreError),
    #[error("encoding diagnostics: {0}")]
    Encode(#[from] DecodeError),
}
