//! Single-use login tokens (magic links) and the bearer sessions they are
//! exchanged for.

use super::{Database, User};
use crate::error::ApiError;
use rusqlite::{params, OptionalExtension};

impl Database {
    /// Stores a login token for `user_id`, dropping any token issued before.
    pub fn save_login_token(
        &self,
        user_id: i64,
        token: &str,
        expires_at: i64,
    ) -> Result<(), ApiError> {
        self.with_conn(|conn| {
            let tx = conn.transaction()?;
            tx.execute("DELETE FROM login_tokens WHERE user_id = ?1", params![user_id])?;
            tx.execute(
                "INSERT INTO login_tokens (token, user_id, expires_at) VALUES (?1, ?2, ?3)",
                params![token, user_id, expires_at],
            )?;
            tx.commit()?;
            Ok(())
        })
    }

    /// Consumes a login token. The token is deleted whether or not it had
    /// expired; the user is returned only for a live token.
    pub fn take_login_token(&self, token: &str, now: i64) -> Result<Option<User>, ApiError> {
        self.with_conn(|conn| {
            let tx = conn.transaction()?;
            let entry = tx
                .query_row(
                    "SELECT u.id, u.email, u.canteen_id, t.expires_at
                     FROM login_tokens t JOIN users u ON u.id = t.user_id
                     WHERE t.token = ?1",
                    params![token],
                    |row| {
                        Ok((
                            User {
                                id: row.get(0)?,
                                email: row.get(1)?,
                                canteen_id: row.get(2)?,
                            },
                            row.get::<_, i64>(3)?,
                        ))
                    },
                )
                .optional()?;
            tx.execute("DELETE FROM login_tokens WHERE token = ?1", params![token])?;
            tx.commit()?;

            Ok(entry.and_then(|(user, expires_at)| (expires_at > now).then_some(user)))
        })
    }

    pub fn create_session(
        &self,
        user_id: i64,
        token: &str,
        expires_at: i64,
    ) -> Result<(), ApiError> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO sessions (token, user_id, expires_at) VALUES (?1, ?2, ?3)",
                params![token, user_id, expires_at],
            )?;
            Ok(())
        })
    }

    /// The user owning a live session, expired sessions being purged on the way.
    pub fn user_for_session(&self, token: &str, now: i64) -> Result<Option<User>, ApiError> {
        self.with_conn(|conn| {
            conn.execute("DELETE FROM sessions WHERE expires_at <= ?1", params![now])?;
            Ok(conn
                .query_row(
                    "SELECT u.id, u.email, u.canteen_id
                     FROM sessions s JOIN users u ON u.id = s.user_id
                     WHERE s.token = ?1",
                    params![token],
                    |row| {
                        Ok(User {
                            id: row.get(0)?,
                            email: row.get(1)?,
                            canteen_id: row.get(2)?,
                        })
                    },
                )
                .optional()?)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn db_with_user() -> (Database, User) {
        let db = Database::open_in_memory().unwrap();
        let user = db.create_user("gestion@cantine.fr", None).unwrap();
        (db, user)
    }

    #[test]
    fn login_token_is_single_use() {
        let (db, user) = db_with_user();
        db.save_login_token(user.id, "abc", 1_000).unwrap();

        assert_eq!(db.take_login_token("abc", 500).unwrap(), Some(user));
        assert_eq!(db.take_login_token("abc", 500).unwrap(), None);
    }

    #[test]
    fn expired_login_token_is_rejected_and_removed() {
        let (db, user) = db_with_user();
        db.save_login_token(user.id, "abc", 1_000).unwrap();

        assert_eq!(db.take_login_token("abc", 1_000).unwrap(), None);
        assert_eq!(db.take_login_token("abc", 0).unwrap(), None);
    }

    #[test]
    fn new_login_token_replaces_the_previous_one() {
        let (db, user) = db_with_user();
        db.save_login_token(user.id, "first", 1_000).unwrap();
        db.save_login_token(user.id, "second", 1_000).unwrap();

        assert_eq!(db.take_login_token("first", 0).unwrap(), None);
        assert!(db.take_login_token("second", 0).unwrap().is_some());
    }

    #[test]
    fn sessions_expire() {
        let (db, user) = db_with_user();
        db.create_session(user.id, "session", 100).unwrap();

        assert_eq!(db.user_for_session("session", 99).unwrap(), Some(user));
        assert_eq!(db.user_for_session("session", 100).unwrap(), None);
    }
}
