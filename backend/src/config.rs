//! Runtime configuration read from the environment.
//!
//! Every setting has a default so the server starts on a developer machine
//! with no environment at all; each fallback is logged.

use log::{info, warn};
use std::{env, fmt::Display, str::FromStr};

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// SQLite database file.
    pub database_path: String,
    /// Base URL put in magic links, without trailing slash.
    pub public_url: String,
    pub login_token_ttl_minutes: i64,
    pub session_ttl_days: i64,
    /// Year whose diagnostic is shown on public canteen summaries.
    pub reporting_year: i32,
    /// Open the app in the default browser once the server is up.
    pub open_browser: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            database_path: "macantine.sqlite".to_string(),
            public_url: "http://127.0.0.1:8080".to_string(),
            login_token_ttl_minutes: 60,
            session_ttl_days: 7,
            reporting_year: 2020,
            open_browser: false,
        }
    }
}

impl Config {
    pub fn load() -> Self {
        let defaults = Self::default();
        let host: String = try_load("HOST", defaults.host);
        let port: u16 = try_load("PORT", defaults.port);
        Self {
            public_url: try_load("PUBLIC_URL", format!("http://{host}:{port}"))
                .trim_end_matches('/')
                .to_string(),
            host,
            port,
            database_path: try_load("DATABASE_PATH", defaults.database_path),
            login_token_ttl_minutes: try_load(
                "LOGIN_TOKEN_TTL_MINUTES",
                defaults.login_token_ttl_minutes,
            ),
            session_ttl_days: try_load("SESSION_TTL_DAYS", defaults.session_ttl_days),
            reporting_year: try_load("REPORTING_YEAR", defaults.reporting_year),
            open_browser: try_load("OPEN_BROWSER", defaults.open_browser),
        }
    }

    pub fn login_token_ttl_secs(&self) -> i64 {
        self.login_token_ttl_minutes * 60
    }

    pub fn session_ttl_secs(&self) -> i64 {
        self.session_ttl_days * 24 * 60 * 60
    }
}

fn try_load<T>(key: &str, default: T) -> T
where
    T: FromStr + Display,
    T::Err: Display,
{
    match env::var(key) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|e| {
            warn!("Invalid {key} value {raw:?}: {e}, using default: {default}");
            default
        }),
        Err(_) => {
            info!("{key} not set, using default: {default}");
            default
        }
    }
}
