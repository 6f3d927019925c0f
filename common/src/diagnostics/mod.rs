//! Diagnostic Normalizer: one canonical `DiagnosticPair` out of whatever data
//! is available (remote API, browser storage in either format, or nothing),
//! and the reverse path when saving.
//!
//! The browser-specific pieces are reached only through the traits in
//! `ports`, so the same logic runs against `localStorage` in the frontend and
//! against in-memory fakes in tests.

mod error;
mod normalizer;
pub mod ports;

pub use error::{NormalizerError, RemoteError, StoreError};
pub use normalizer::{
    DiagnosticNormalizer, DiagnosticsResult, NormalizerConfig, SaveOutcome, LOCAL_FLAT_KEY,
    LOCAL_LEGACY_KEY,
};
