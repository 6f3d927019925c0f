use super::{ApiCallError, BrowserStorage};
use crate::config::{api_url, JWT_KEY};
use common::diagnostics::ports::KeyValueStore;
use common::requests::{LoginRequest, LoginResponse, LoginTokenRequest, SignUpRequest};
use gloo_net::http::Request;
use log::info;

/// How the API answered a sign-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignUpOutcome {
    Created,
    AlreadyRegistered,
}

/// Asks the API to email a magic link to `email`.
pub async fn request_login_link(email: &str) -> Result<(), ApiCallError> {
    let response = Request::post(&format!("{}/login-token", api_url()))
        .json(&LoginTokenRequest {
            email: email.to_string(),
        })?
        .send()
        .await?;
    if response.ok() {
        Ok(())
    } else {
        Err(ApiCallError::Status {
            endpoint: "login-token",
            status: response.status(),
        })
    }
}

/// Creates an account and its canteen. Both outcomes send a login link.
pub async fn sign_up(request: &SignUpRequest) -> Result<SignUpOutcome, ApiCallError> {
    let response = Request::post(&format!("{}/sign-up", api_url()))
        .json(request)?
        .send()
        .await?;
    match response.status() {
        201 => Ok(SignUpOutcome::Created),
        200 => Ok(SignUpOutcome::AlreadyRegistered),
        status => Err(ApiCallError::Status {
            endpoint: "sign-up",
            status,
        }),
    }
}

/// Trades the token of a magic link for a session token, kept under `jwt`.
pub async fn exchange_login_token(token: &str) -> Result<(), ApiCallError> {
    let response = Request::post(&format!("{}/login", api_url()))
        .json(&LoginRequest {
            token: token.to_string(),
        })?
        .send()
        .await?;
    if response.status() != 200 {
        return Err(ApiCallError::Status {
            endpoint: "login",
            status: response.status(),
        });
    }

    let session: LoginResponse = response.json().await?;
    BrowserStorage.set(JWT_KEY, &session.token)?;
    info!("signed in");
    Ok(())
}

pub fn sign_out() {
    BrowserStorage.remove(JWT_KEY);
}
