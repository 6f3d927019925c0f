mod config;
mod database;
mod error;
mod links;
mod services;

use crate::config::Config;
use crate::database::Database;
use crate::links::{LinkSender, LogLinkSender};
use actix_web::{web, App, HttpRequest, HttpResponse, HttpServer};
use env_logger::Env;
use include_dir::{include_dir, Dir};
use log::info;
use mime_guess::from_path;
use std::io;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

static STATIC_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/static/dist");

/// Serves the bundled frontend; unknown paths fall back to `index.html` so
/// client-side routes such as `/inscription` resolve.
async fn serve_embedded(req: HttpRequest) -> HttpResponse {
    let path = req.path().trim_start_matches('/');
    let file_path = if path.is_empty() { "index.html" } else { path };

    match STATIC_DIR.get_file(file_path) {
        Some(file) => {
            let mime = from_path(file_path).first_or_octet_stream();
            HttpResponse::Ok()
                .content_type(mime.as_ref())
                .body(file.contents().to_vec())
        }
        None => match STATIC_DIR.get_file("index.html") {
            Some(index) => HttpResponse::Ok()
                .content_type("text/html; charset=utf-8")
                .body(index.contents().to_vec()),
            None => HttpResponse::NotFound().body("Not Found"),
        },
    }
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    env_logger::init_from_env(Env::default().default_filter_or("info"));
    let config = Config::load();
    let database = Database::open(&config.database_path)
        .map_err(|e| io::Error::other(e.to_string()))?;
    let sender: Arc<dyn LinkSender> = Arc::new(LogLinkSender);

    let url = format!("http://{}:{}", config.host, config.port);
    if config.open_browser {
        let url = url.clone();
        thread::spawn(move || {
            thread::sleep(Duration::from_millis(500));
            let _ = webbrowser::open(&url);
        });
    }

    info!("Server running at {}", url);
    info!("Database at {}", config.database_path);

    let bind = (config.host.clone(), config.port);
    HttpServer::new(move || {
        App::new()
            .configure(|cfg| {
                services::configure_app(cfg, database.clone(), config.clone(), sender.clone())
            })
            .default_service(web::route().to(serve_embedded))
    })
        .bind(bind)?
        .run()
        .await
}
