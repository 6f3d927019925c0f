use crate::config::Config;
use crate::database::Database;
use crate::error::ApiError;
use actix_web::{web, HttpResponse};
use common::model::canteen::CanteenSummary;

pub(crate) async fn process(
    db: web::Data<Database>,
    config: web::Data<Config>,
) -> Result<HttpResponse, ApiError> {
    let summaries: Vec<CanteenSummary> = db
        .list_canteens()?
        .iter()
        .map(|canteen| CanteenSummary::from_canteen(canteen, config.reporting_year))
        .collect();
    Ok(HttpResponse::Ok().json(summaries))
}
