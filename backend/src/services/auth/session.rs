use crate::database::{now_secs, Database, User};
use crate::error::ApiError;
use actix_web::dev::Payload;
use actix_web::http::header::AUTHORIZATION;
use actix_web::{web, FromRequest, HttpRequest};
use futures_util::future::{ready, Ready};

/// The user behind the request's `Authorization: Bearer <token>` header.
/// Extraction fails with `401` when the header is missing or the session is
/// unknown or expired.
#[derive(Debug)]
pub struct AuthenticatedUser(pub User);

impl AuthenticatedUser {
    pub fn canteen_id(&self) -> Result<i64, ApiError> {
        self.0.canteen_id.ok_or(ApiError::CanteenNotFound)
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(authenticate(req))
    }
}

fn authenticate(req: &HttpRequest) -> Result<AuthenticatedUser, ApiError> {
    let db = req
        .app_data::<web::Data<Database>>()
        .ok_or_else(|| ApiError::Internal("database not configured".to_string()))?;
    let token = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or(ApiError::Unauthorized)?;

    db.user_for_session(token, now_secs())?
        .map(AuthenticatedUser)
        .ok_or(ApiError::Unauthorized)
}
