//! SQLite persistence for canteens, users, login tokens, sessions and
//! diagnostics.
//!
//! A single `rusqlite::Connection` is shared behind a mutex; handlers call the
//! repository methods defined in the submodules, each of which runs inside
//! `with_conn`.

mod canteens;
mod diagnostics;
mod sessions;
mod users;

pub use users::User;

use crate::error::ApiError;
use rusqlite::Connection;
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS canteens (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        city TEXT NOT NULL,
        sector TEXT NOT NULL
    );
    CREATE TABLE IF NOT EXISTS users (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        email TEXT NOT NULL UNIQUE,
        canteen_id INTEGER REFERENCES canteens(id)
    );
    CREATE TABLE IF NOT EXISTS login_tokens (
        token TEXT PRIMARY KEY,
        user_id INTEGER NOT NULL REFERENCES users(id),
        expires_at INTEGER NOT NULL
    );
    CREATE TABLE IF NOT EXISTS sessions (
        token TEXT PRIMARY KEY,
        user_id INTEGER NOT NULL REFERENCES users(id),
        expires_at INTEGER NOT NULL
    );
    CREATE TABLE IF NOT EXISTS diagnostics (
        canteen_id INTEGER NOT NULL REFERENCES canteens(id),
        year INTEGER NOT NULL,
        payload TEXT NOT NULL,
        PRIMARY KEY (canteen_id, year)
    );
";

#[derive(Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, ApiError> {
        Self::init(Connection::open(path)?)
    }

    #[cfg(test)]
    pub fn open_in_memory() -> Result<Self, ApiError> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self, ApiError> {
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    fn with_conn<T>(
        &self,
        f: impl FnOnce(&mut Connection) -> Result<T, ApiError>,
    ) -> Result<T, ApiError> {
        let mut conn = self
            .conn
            .lock()
            .map_err(|_| ApiError::Internal("database lock poisoned".to_string()))?;
        f(&mut conn)
    }
}

/// Seconds since the Unix epoch, the unit of every `expires_at` column.
pub fn now_secs() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs() as i64)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::requests::NewCanteen;

    #[test]
    fn schema_survives_reopening_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("macantine.sqlite");

        let db = Database::open(&path).unwrap();
        let canteen = db
            .create_canteen(&NewCanteen {
                name: "Cantine".to_string(),
                city: "Nantes".to_string(),
                sector: "scolaire".to_string(),
            })
            .unwrap();
        drop(db);

        let reopened = Database::open(&path).unwrap();
        let canteens = reopened.list_canteens().unwrap();
        assert_eq!(canteens.len(), 1);
        assert_eq!(canteens[0].id, canteen);
    }
}
