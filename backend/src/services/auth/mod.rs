//! # Authentication
//!
//! Passwordless login in two steps:
//!
//! 1. `POST /login-token` with an email. A known user gets a fresh single-use
//!    token by magic link (`{PUBLIC_URL}/?token=...`); an unknown address gets
//!    a sign-up link. The response is the same either way.
//! 2. `POST /login` with that token. A live token is exchanged for a session
//!    token that the frontend keeps as `jwt` and sends as `Bearer` on every
//!    diagnostics request. The login token is consumed whatever the outcome.
//!
//! `POST /sign-up` creates a canteen with its manager and sends the first
//! login link.

mod login;
mod login_token;
mod session;
mod sign_up;

pub use session::AuthenticatedUser;

use crate::error::ApiError;
use actix_web::web::{self, post};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use regex::Regex;
use std::sync::LazyLock;
use uuid::Uuid;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/sign-up", post().to(sign_up::process))
        .route("/login-token", post().to(login_token::process))
        .route("/login", post().to(login::process));
}

/// 32 random bytes, URL-safe base64 so it can sit in a query string as is.
pub(crate) fn generate_token() -> String {
    let mut bytes = Vec::with_capacity(32);
    bytes.extend_from_slice(Uuid::new_v4().as_bytes());
    bytes.extend_from_slice(Uuid::new_v4().as_bytes());
    URL_SAFE_NO_PAD.encode(bytes)
}

static EMAIL_RE: LazyLock<Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$"));

/// Trims and lowercases an address, rejecting anything that is not shaped
/// like `local@domain.tld`.
pub(crate) fn normalize_email(raw: &str) -> Result<String, ApiError> {
    let email = raw.trim().to_lowercase();
    let email_re = EMAIL_RE
        .as_ref()
        .map_err(|e| ApiError::Internal(format!("Regex error: {e}")))?;
    if email_re.is_match(&email) {
        Ok(email)
    } else {
        Err(ApiError::MalformedPayload(format!("invalid email {raw:?}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_are_url_safe_and_unique() {
        let a = generate_token();
        let b = generate_token();
        assert_ne!(a, b);
        assert_eq!(a.len(), 43);
        assert!(a.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
    }

    #[test]
    fn emails_are_normalized() {
        assert_eq!(normalize_email("  Chef@Cantine.FR ").unwrap(), "chef@cantine.fr");
        assert!(normalize_email("chef@cantine").is_err());
        assert!(normalize_email("chef cantine@x.fr").is_err());
    }

    mod flow {
        use crate::config::Config;
        use crate::database::Database;
        use crate::links::LinkSender;
        use crate::services::configure_app;
        use crate::services::test_support::RecordingSender;
        use actix_web::http::StatusCode;
        use actix_web::{test, App};
        use serde_json::{json, Value};
        use std::sync::Arc;

        #[actix_web::test]
        async fn sign_up_then_login_with_magic_link() {
            let db = Database::open_in_memory().unwrap();
            let sender = Arc::new(RecordingSender::default());
            let links: Arc<dyn LinkSender> = sender.clone();
            let app = test::init_service(App::new().configure(|cfg| {
                configure_app(cfg, db.clone(), Config::default(), links.clone())
            }))
            .await;

            let req = test::TestRequest::post()
                .uri("/api/sign-up")
                .set_json(json!({
                    "email": "Gerante@Cantine.fr",
                    "canteen": {
                        "name": "Cuisine centrale",
                        "city": "Nantes",
                        "sector": "scolaire"
                    }
                }))
                .to_request();
            assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);

            let token = sender.last_token().unwrap();
            assert_eq!(sender.login_links.lock().unwrap()[0].0, "gerante@cantine.fr");

            let req = test::TestRequest::post()
                .uri("/api/login")
                .set_json(json!({ "token": token }))
                .to_request();
            let body: Value = test::call_and_read_body_json(&app, req).await;
            let session = body["token"].as_str().unwrap().to_string();

            let req = test::TestRequest::get()
                .uri("/api/get-diagnostics-by-canteen")
                .insert_header(("Authorization", format!("Bearer {session}")))
                .to_request();
            assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

            // Login tokens are single use.
            let req = test::TestRequest::post()
                .uri("/api/login")
                .set_json(json!({ "token": token }))
                .to_request();
            assert_eq!(test::call_service(&app, req).await.status(), StatusCode::UNAUTHORIZED);
        }

        #[actix_web::test]
        async fn login_token_answers_ok_for_unknown_address() {
            let db = Database::open_in_memory().unwrap();
            let sender = Arc::new(RecordingSender::default());
            let links: Arc<dyn LinkSender> = sender.clone();
            let app = test::init_service(App::new().configure(|cfg| {
                configure_app(cfg, db.clone(), Config::default(), links.clone())
            }))
            .await;

            let req = test::TestRequest::post()
                .uri("/api/login-token")
                .set_json(json!({ "email": "inconnu@cantine.fr" }))
                .to_request();
            assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
            assert!(sender.login_links.lock().unwrap().is_empty());
            assert_eq!(
                sender.sign_up_links.lock().unwrap()[0],
                (
                    "inconnu@cantine.fr".to_string(),
                    "http://127.0.0.1:8080/inscription".to_string()
                )
            );
        }

        #[actix_web::test]
        async fn sign_up_for_known_address_sends_a_new_login_link() {
            let db = Database::open_in_memory().unwrap();
            let sender = Arc::new(RecordingSender::default());
            let links: Arc<dyn LinkSender> = sender.clone();
            let app = test::init_service(App::new().configure(|cfg| {
                configure_app(cfg, db.clone(), Config::default(), links.clone())
            }))
            .await;
            let body = json!({
                "email": "gerante@cantine.fr",
                "canteen": { "name": "Cuisine centrale", "city": "Nantes", "sector": "scolaire" }
            });

            let req = test::TestRequest::post()
                .uri("/api/sign-up")
                .set_json(body.clone())
                .to_request();
            assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);
            let first = sender.last_token().unwrap();

            let req = test::TestRequest::post()
                .uri("/api/sign-up")
                .set_json(body)
                .to_request();
            assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
            assert_eq!(sender.login_links.lock().unwrap().len(), 2);
            assert_ne!(sender.last_token().unwrap(), first);
            assert_eq!(db.list_canteens().unwrap().len(), 1);
        }

        #[actix_web::test]
        async fn sign_up_rejects_blank_canteen_fields() {
            let db = Database::open_in_memory().unwrap();
            let app = test::init_service(App::new().configure(|cfg| {
                configure_app(
                    cfg,
                    db.clone(),
                    Config::default(),
                    Arc::new(RecordingSender::default()),
                )
            }))
            .await;

            let req = test::TestRequest::post()
                .uri("/api/sign-up")
                .set_json(json!({
                    "email": "chef@cantine.fr",
                    "canteen": { "name": " ", "city": "Nantes", "sector": "scolaire" }
                }))
                .to_request();
            assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);
            assert!(db.find_user_by_email("chef@cantine.fr").unwrap().is_none());
        }
    }
}
