//! HTTP API, mounted under `/api`.
//!
//! - `auth`: sign-up, magic-link request, login-token exchange, and the
//!   bearer-session extractor used by the other modules.
//! - `diagnostics`: diagnostics of the signed-in user's canteen.
//! - `canteens`: public canteen summaries.

pub mod auth;
mod canteens;
mod diagnostics;

use crate::config::Config;
use crate::database::Database;
use crate::error::ApiError;
use crate::links::LinkSender;
use actix_web::web::{self, scope};
use actix_web::Scope;
use std::sync::Arc;

const API_PATH: &str = "/api";

/// Largest accepted JSON body.
const JSON_LIMIT: usize = 1024 * 1024;

pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .configure(auth::configure_routes)
        .configure(diagnostics::configure_routes)
        .configure(canteens::configure_routes)
}

/// Registers shared state and every API route.
pub fn configure_app(
    cfg: &mut web::ServiceConfig,
    database: Database,
    config: Config,
    sender: Arc<dyn LinkSender>,
) {
    let json_config = web::JsonConfig::default()
        .limit(JSON_LIMIT)
        .error_handler(|err, _| ApiError::MalformedPayload(err.to_string()).into());

    cfg.app_data(json_config)
        .app_data(web::Data::new(database))
        .app_data(web::Data::new(config))
        .app_data(web::Data::from(sender))
        .service(configure_routes());
}
