//! Browser implementations of the normalizer capabilities.
//!
//! - `storage`: `localStorage` as a `KeyValueStore`.
//! - `token`: the `jwt` entry as a `TokenProvider`.
//! - `remote`: `gloo-net` requests against the diagnostics API.
//! - `session`: sign-up, magic-link requests and the login-token exchange.
//! - `canteens`: the public canteen list.

mod canteens;
mod error;
mod remote;
mod session;
mod storage;
mod token;

pub use canteens::fetch_canteens;
pub use error::ApiCallError;
pub use remote::HttpDiagnosticsRemote;
pub use session::{exchange_login_token, request_login_link, sign_out, sign_up, SignUpOutcome};
pub use storage::BrowserStorage;
pub use token::StoredJwt;

use common::diagnostics::DiagnosticNormalizer;

pub type BrowserNormalizer = DiagnosticNormalizer<BrowserStorage, StoredJwt, HttpDiagnosticsRemote>;

pub fn normalizer() -> BrowserNormalizer {
    DiagnosticNormalizer::new(BrowserStorage, StoredJwt, HttpDiagnosticsRemote::default())
}
