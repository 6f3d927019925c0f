use super::Database;
use crate::error::ApiError;
use rusqlite::{params, OptionalExtension, Row};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub canteen_id: Option<i64>,
}

impl User {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            email: row.get(1)?,
            canteen_id: row.get(2)?,
        })
    }
}

impl Database {
    pub fn find_user_by_email(&self, email: &str) -> Result<Option<User>, ApiError> {
        self.with_conn(|conn| {
            Ok(conn
                .query_row(
                    "SELECT id, email, canteen_id FROM users WHERE email = ?1",
                    params![email],
                    User::from_row,
                )
                .optional()?)
        })
    }

    #[cfg(test)]
    pub fn create_user(&self, email: &str, canteen_id: Option<i64>) -> Result<User, ApiError> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO users (email, canteen_id) VALUES (?1, ?2)",
                params![email, canteen_id],
            )?;
            Ok(User {
                id: conn.last_insert_rowid(),
                email: email.to_string(),
                canteen_id,
            })
        })
    }
}
