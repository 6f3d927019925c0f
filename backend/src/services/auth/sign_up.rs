use super::login_token::initiate_magic_link_login;
use super::normalize_email;
use crate::config::Config;
use crate::database::Database;
use crate::error::ApiError;
use crate::links::LinkSender;
use actix_web::{web, HttpResponse};
use common::requests::SignUpRequest;

/// `201` with a login link for a new account; an address that already has an
/// account just gets a new login link and `200`.
pub(crate) async fn process(
    db: web::Data<Database>,
    config: web::Data<Config>,
    sender: web::Data<dyn LinkSender>,
    payload: web::Json<SignUpRequest>,
) -> Result<HttpResponse, ApiError> {
    let SignUpRequest { email, canteen } = payload.into_inner();
    let email = normalize_email(&email)?;

    if db.find_user_by_email(&email)?.is_some() {
        initiate_magic_link_login(&db, &config, &**sender, &email)?;
        return Ok(HttpResponse::Ok().finish());
    }

    if [&canteen.name, &canteen.city, &canteen.sector]
        .iter()
        .any(|field| field.trim().is_empty())
    {
        return Err(ApiError::MalformedPayload(
            "canteen name, city and sector are required".to_string(),
        ));
    }

    db.create_canteen_with_manager(&email, &canteen)?;
    initiate_magic_link_login(&db, &config, &**sender, &email)?;
    Ok(HttpResponse::Created().finish())
}
