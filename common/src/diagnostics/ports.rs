//! Capabilities the normalizer needs from its environment.

use super::error::{RemoteError, StoreError};
use crate::requests::SaveDiagnosticsRequest;
use async_trait::async_trait;

/// String-keyed persistence, `localStorage` in the browser.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&self, key: &str);

    /// A key counts as present only with a non-empty value.
    fn contains(&self, key: &str) -> bool {
        self.get(key).is_some_and(|value| !value.is_empty())
    }
}

/// Source of the bearer token of the signed-in user.
pub trait TokenProvider {
    fn token(&self) -> Option<String>;
}

/// HTTP status and raw body of a response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteReply {
    pub status: u16,
    pub body: String,
}

#[async_trait(?Send)]
pub trait DiagnosticsRemote {
    /// `GET get-diagnostics-by-canteen`.
    async fn fetch_diagnostics(&self, token: &str) -> Result<RemoteReply, RemoteError>;

    /// `POST save-diagnostics`, returning the status code.
    async fn save_diagnostics(
        &self,
        token: &str,
        request: &SaveDiagnosticsRequest,
    ) -> Result<u16, RemoteError>;
}
