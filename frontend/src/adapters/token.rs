use super::BrowserStorage;
use crate::config::JWT_KEY;
use common::diagnostics::ports::{KeyValueStore, TokenProvider};

#[derive(Debug, Clone, Copy, Default)]
pub struct StoredJwt;

impl TokenProvider for StoredJwt {
    fn token(&self) -> Option<String> {
        BrowserStorage
            .get(JWT_KEY)
            .filter(|token| !token.trim().is_empty())
    }
}
