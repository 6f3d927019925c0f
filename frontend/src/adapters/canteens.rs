use super::ApiCallError;
use crate::config::api_url;
use common::model::canteen::CanteenSummary;
use gloo_net::http::Request;

/// Public canteen list with the reporting-year diagnostic of each.
pub async fn fetch_canteens() -> Result<Vec<CanteenSummary>, ApiCallError> {
    let response = Request::get(&format!("{}/canteens", api_url())).send().await?;
    if !response.ok() {
        return Err(ApiCallError::Status {
            endpoint: "canteens",
            status: response.status(),
        });
    }
    Ok(response.json().await?)
}
