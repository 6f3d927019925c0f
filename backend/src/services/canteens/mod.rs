//! Public canteen summaries: `GET /canteens` lists every canteen with its
//! diagnostic for the configured reporting year. No session required.

mod list;

use actix_web::web::{self, get};

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/canteens", get().to(list::process));
}

#[cfg(test)]
mod tests {
    use crate::config::Config;
    use crate::database::Database;
    use crate::services::configure_app;
    use crate::services::test_support::RecordingSender;
    use actix_web::{test, App};
    use common::model::diagnostic::DiagnosticRecord;
    use common::requests::NewCanteen;
    use serde_json::{json, Value};
    use std::sync::Arc;

    fn canteen(name: &str) -> NewCanteen {
        NewCanteen {
            name: name.to_string(),
            city: "Lyon".to_string(),
            sector: "scolaire".to_string(),
        }
    }

    #[actix_web::test]
    async fn lists_canteens_with_reporting_year_diagnostic() {
        let db = Database::open_in_memory().unwrap();
        let first = db.create_canteen(&canteen("Collège Jean Moulin")).unwrap();
        db.create_canteen(&canteen("Annexe")).unwrap();

        let mut reported = DiagnosticRecord::new(2020);
        reported.value_bio = Some(14.0);
        let mut other = DiagnosticRecord::new(2021);
        other.value_bio = Some(40.0);
        db.upsert_diagnostics(first, &[reported, other]).unwrap();

        let app = test::init_service(App::new().configure(|cfg| {
            configure_app(cfg, db.clone(), Config::default(), Arc::new(RecordingSender::default()))
        }))
        .await;

        let req = test::TestRequest::get().uri("/api/canteens").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        let list = body.as_array().unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0]["name"], "Annexe");
        assert_eq!(list[0]["diagnostic"], Value::Null);
        assert_eq!(list[1]["name"], "Collège Jean Moulin");
        assert_eq!(list[1]["diagnostic"], json!({ "year": 2020, "valueBio": 14 }));
    }
}
