use crate::database::Database;
use crate::error::ApiError;
use crate::services::auth::AuthenticatedUser;
use actix_web::{web, HttpResponse};
use common::model::diagnostic::{preprocess_diagnostics, DiagnosticRecord};
use common::requests::SaveDiagnosticsRequest;
use log::info;
use serde::Serialize;
use std::collections::HashSet;
use std::ops::RangeInclusive;

const PLAUSIBLE_YEARS: RangeInclusive<i32> = 2000..=2100;

#[derive(Serialize)]
struct SaveDiagnosticsResponse {
    saved: usize,
}

pub(crate) async fn process(
    user: AuthenticatedUser,
    db: web::Data<Database>,
    payload: web::Json<SaveDiagnosticsRequest>,
) -> Result<HttpResponse, ApiError> {
    let canteen_id = user.canteen_id()?;
    let diagnostics = preprocess_diagnostics(payload.into_inner().diagnostics);
    validate(&diagnostics)?;

    db.upsert_diagnostics(canteen_id, &diagnostics)?;
    info!("canteen {canteen_id}: saved {} diagnostics", diagnostics.len());
    Ok(HttpResponse::Created().json(SaveDiagnosticsResponse {
        saved: diagnostics.len(),
    }))
}

fn validate(diagnostics: &[DiagnosticRecord]) -> Result<(), ApiError> {
    if diagnostics.is_empty() {
        return Err(ApiError::MalformedPayload("no diagnostics to save".to_string()));
    }
    let mut years = HashSet::new();
    for diagnostic in diagnostics {
        if !PLAUSIBLE_YEARS.contains(&diagnostic.year) {
            return Err(ApiError::MalformedPayload(format!(
                "year {} out of range",
                diagnostic.year
            )));
        }
        if !years.insert(diagnostic.year) {
            return Err(ApiError::MalformedPayload(format!(
                "year {} appears twice",
                diagnostic.year
            )));
        }
    }
    Ok(())
}
