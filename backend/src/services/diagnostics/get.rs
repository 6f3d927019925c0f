use crate::database::Database;
use crate::error::ApiError;
use crate::services::auth::AuthenticatedUser;
use actix_web::{web, HttpResponse};
use common::requests::CanteenDiagnosticsResponse;

pub(crate) async fn process(
    user: AuthenticatedUser,
    db: web::Data<Database>,
) -> Result<HttpResponse, ApiError> {
    let canteen_id = user.canteen_id()?;
    let response = match db.diagnostics_for_canteen(canteen_id)?.pair() {
        Some(pair) => CanteenDiagnosticsResponse {
            latest: Some(pair.latest),
            previous: pair.previous,
        },
        None => CanteenDiagnosticsResponse::default(),
    };
    Ok(HttpResponse::Ok().json(response))
}
