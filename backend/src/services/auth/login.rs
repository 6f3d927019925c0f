use super::generate_token;
use crate::config::Config;
use crate::database::{now_secs, Database};
use crate::error::ApiError;
use actix_web::{web, HttpResponse};
use common::requests::{LoginRequest, LoginResponse};
use log::info;

pub(crate) async fn process(
    db: web::Data<Database>,
    config: web::Data<Config>,
    payload: web::Json<LoginRequest>,
) -> Result<HttpResponse, ApiError> {
    let now = now_secs();
    let user = db
        .take_login_token(payload.token.trim(), now)?
        .ok_or(ApiError::Unauthorized)?;

    let session = generate_token();
    db.create_session(user.id, &session, now + config.session_ttl_secs())?;
    info!("user {} signed in", user.id);

    Ok(HttpResponse::Ok().json(LoginResponse { token: session }))
}
