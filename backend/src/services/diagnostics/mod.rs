//! # Diagnostics Service
//!
//! Diagnostics of the signed-in user's canteen. Both routes require a bearer
//! session (`AuthenticatedUser`).
//!
//! *   **`GET /get-diagnostics-by-canteen`**: `200` with `{ latest, previous }`,
//!     the two most recent years, each `null` when missing.
//! *   **`POST /save-diagnostics`**: body `{ diagnostics: [...] }`. Records are
//!     upserted by year and the handler answers `201 Created`; an empty list,
//!     a repeated year or an implausible year is a `400`.

mod get;
mod save;

use actix_web::web::{self, get, post};

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/get-diagnostics-by-canteen", get().to(get::process))
        .route("/save-diagnostics", post().to(save::process));
}

#[cfg(test)]
mod tests {
    use crate::config::Config;
    use crate::database::{now_secs, Database};
    use crate::services::configure_app;
    use crate::services::test_support::RecordingSender;
    use actix_web::http::StatusCode;
    use actix_web::{test, App};
    use common::requests::NewCanteen;
    use serde_json::{json, Value};
    use std::sync::Arc;

    fn signed_in(db: &Database) -> String {
        let user = db
            .create_canteen_with_manager(
                "chef@cantine.fr",
                &NewCanteen {
                    name: "Restaurant scolaire".to_string(),
                    city: "Tours".to_string(),
                    sector: "scolaire".to_string(),
                },
            )
            .unwrap();
        db.create_session(user.id, "session-token", now_secs() + 3600)
            .unwrap();
        "Bearer session-token".to_string()
    }

    #[actix_web::test]
    async fn save_then_get_returns_the_two_latest_years() {
        let db = Database::open_in_memory().unwrap();
        let auth = signed_in(&db);
        let app = test::init_service(App::new().configure(|cfg| {
            configure_app(cfg, db.clone(), Config::default(), Arc::new(RecordingSender::default()))
        }))
        .await;

        let req = test::TestRequest::post()
            .uri("/api/save-diagnostics")
            .insert_header(("Authorization", auth.as_str()))
            .set_json(json!({ "diagnostics": [
                { "year": 2019, "valueBio": 5 },
                { "year": "2021", "valueBio": 30, "vegetarianMenuType": "" },
                { "year": 2020, "valueBio": 12 }
            ]}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);

        let req = test::TestRequest::get()
            .uri("/api/get-diagnostics-by-canteen")
            .insert_header(("Authorization", auth.as_str()))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(
            body,
            json!({
                "latest": { "year": 2021, "valueBio": 30 },
                "previous": { "year": 2020, "valueBio": 12 }
            })
        );
    }

    #[actix_web::test]
    async fn canteen_without_diagnostics_returns_nulls() {
        let db = Database::open_in_memory().unwrap();
        let auth = signed_in(&db);
        let app = test::init_service(App::new().configure(|cfg| {
            configure_app(cfg, db.clone(), Config::default(), Arc::new(RecordingSender::default()))
        }))
        .await;

        let req = test::TestRequest::get()
            .uri("/api/get-diagnostics-by-canteen")
            .insert_header(("Authorization", auth.as_str()))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body, json!({ "latest": null, "previous": null }));
    }

    #[actix_web::test]
    async fn requests_without_session_are_unauthorized() {
        let db = Database::open_in_memory().unwrap();
        let app = test::init_service(App::new().configure(|cfg| {
            configure_app(cfg, db.clone(), Config::default(), Arc::new(RecordingSender::default()))
        }))
        .await;

        let req = test::TestRequest::get()
            .uri("/api/get-diagnostics-by-canteen")
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::UNAUTHORIZED);

        let req = test::TestRequest::post()
            .uri("/api/save-diagnostics")
            .insert_header(("Authorization", "Bearer unknown"))
            .set_json(json!({ "diagnostics": [{ "year": 2020 }] }))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn invalid_payloads_are_rejected() {
        let db = Database::open_in_memory().unwrap();
        let auth = signed_in(&db);
        let app = test::init_service(App::new().configure(|cfg| {
            configure_app(cfg, db.clone(), Config::default(), Arc::new(RecordingSender::default()))
        }))
        .await;

        for body in [
            json!({ "diagnostics": [] }),
            json!({ "diagnostics": [{ "year": 2020 }, { "year": "2020" }] }),
            json!({ "diagnostics": [{ "year": 1850 }] }),
            json!({ "diagnostics": [{ "valueBio": 3 }] }),
        ] {
            let req = test::TestRequest::post()
                .uri("/api/save-diagnostics")
                .insert_header(("Authorization", auth.as_str()))
                .set_json(body)
                .to_request();
            assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);
        }
    }

    #[actix_web::test]
    async fn user_without_canteen_gets_not_found() {
        let db = Database::open_in_memory().unwrap();
        let user = db.create_user("seul@cantine.fr", None).unwrap();
        db.create_session(user.id, "lonely", now_secs() + 3600).unwrap();
        let app = test::init_service(App::new().configure(|cfg| {
            configure_app(cfg, db.clone(), Config::default(), Arc::new(RecordingSender::default()))
        }))
        .await;

        let req = test::TestRequest::get()
            .uri("/api/get-diagnostics-by-canteen")
            .insert_header(("Authorization", "Bearer lonely"))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
    }
}
