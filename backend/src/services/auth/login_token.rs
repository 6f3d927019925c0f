use super::{generate_token, normalize_email};
use crate::config::Config;
use crate::database::{now_secs, Database};
use crate::error::ApiError;
use crate::links::{login_link, sign_up_link, LinkSender};
use actix_web::{web, HttpResponse};
use common::requests::LoginTokenRequest;
use log::info;

pub(crate) async fn process(
    db: web::Data<Database>,
    config: web::Data<Config>,
    sender: web::Data<dyn LinkSender>,
    payload: web::Json<LoginTokenRequest>,
) -> Result<HttpResponse, ApiError> {
    let email = normalize_email(&payload.email)?;
    initiate_magic_link_login(&db, &config, &**sender, &email)?;
    Ok(HttpResponse::Ok().finish())
}

/// Sends a login link to a known user, a sign-up link otherwise.
pub(crate) fn initiate_magic_link_login(
    db: &Database,
    config: &Config,
    sender: &dyn LinkSender,
    email: &str,
) -> Result<(), ApiError> {
    match db.find_user_by_email(email)? {
        Some(user) => {
            let token = generate_token();
            // The token must be stored before the link goes out.
            db.save_login_token(user.id, &token, now_secs() + config.login_token_ttl_secs())?;
            sender.send_login_link(email, &login_link(&config.public_url, &token));
        }
        None => {
            info!("login requested for unknown address, sending sign-up link");
            sender.send_sign_up_link(email, &sign_up_link(&config.public_url));
        }
    }
    Ok(())
}
