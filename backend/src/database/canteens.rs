use super::Database;
use crate::error::ApiError;
use common::model::canteen::Canteen;
use common::requests::NewCanteen;
use rusqlite::params;

impl Database {
    #[cfg(test)]
    pub fn create_canteen(&self, canteen: &NewCanteen) -> Result<i64, ApiError> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO canteens (name, city, sector) VALUES (?1, ?2, ?3)",
                params![canteen.name.trim(), canteen.city.trim(), canteen.sector.trim()],
            )?;
            Ok(conn.last_insert_rowid())
        })
    }

    /// Creates a canteen and its manager in one transaction.
    pub fn create_canteen_with_manager(
        &self,
        email: &str,
        canteen: &NewCanteen,
    ) -> Result<super::User, ApiError> {
        self.with_conn(|conn| {
            let tx = conn.transaction()?;
            tx.execute(
                "INSERT INTO canteens (name, city, sector) VALUES (?1, ?2, ?3)",
                params![canteen.name.trim(), canteen.city.trim(), canteen.sector.trim()],
            )?;
            let canteen_id = tx.last_insert_rowid();
            tx.execute(
                "INSERT INTO users (email, canteen_id) VALUES (?1, ?2)",
                params![email, canteen_id],
            )?;
            let user_id = tx.last_insert_rowid();
            tx.commit()?;
            Ok(super::User {
                id: user_id,
                email: email.to_string(),
                canteen_id: Some(canteen_id),
            })
        })
    }

    /// Every canteen with all of its diagnostics, ordered by name.
    pub fn list_canteens(&self) -> Result<Vec<Canteen>, ApiError> {
        let mut canteens: Vec<Canteen> = self.with_conn(|conn| {
            let mut stmt =
                conn.prepare("SELECT id, name, city, sector FROM canteens ORDER BY name, id")?;
            let rows = stmt.query_map([], |row| {
                Ok(Canteen {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    city: row.get(2)?,
                    sector: row.get(3)?,
                    diagnostics: Vec::new(),
                })
            })?;
            Ok(rows.collect::<Result<Vec<_>, _>>()?)
        })?;

        for canteen in &mut canteens {
            canteen.diagnostics = self.diagnostics_for_canteen(canteen.id)?.into_records();
        }
        Ok(canteens)
    }
}
