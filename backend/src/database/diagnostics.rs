//! Diagnostics are stored one row per canteen and year, the record itself
//! being kept as its JSON serialization.

use super::Database;
use crate::error::ApiError;
use common::model::diagnostic::DiagnosticRecord;
use common::model::history::DiagnosticHistory;
use rusqlite::params;

impl Database {
    pub fn diagnostics_for_canteen(&self, canteen_id: i64) -> Result<DiagnosticHistory, ApiError> {
        let payloads: Vec<String> = self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT payload FROM diagnostics WHERE canteen_id = ?1 ORDER BY year DESC",
            )?;
            let rows = stmt.query_map(params![canteen_id], |row| row.get::<_, String>(0))?;
            Ok(rows.collect::<Result<Vec<_>, _>>()?)
        })?;

        let records = payloads
            .iter()
            .map(|payload| serde_json::from_str::<DiagnosticRecord>(payload))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| ApiError::Internal(format!("corrupt diagnostic row: {e}")))?;
        Ok(DiagnosticHistory::from_records(records))
    }

    /// Inserts or replaces the diagnostics of a canteen, keyed by year.
    pub fn upsert_diagnostics(
        &self,
        canteen_id: i64,
        diagnostics: &[DiagnosticRecord],
    ) -> Result<(), ApiError> {
        let rows = diagnostics
            .iter()
            .map(|record| serde_json::to_string(record).map(|payload| (record.year, payload)))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| ApiError::Internal(e.to_string()))?;

        self.with_conn(|conn| {
            let tx = conn.transaction()?;
            for (year, payload) in &rows {
                tx.execute(
                    "INSERT OR REPLACE INTO diagnostics (canteen_id, year, payload)
                     VALUES (?1, ?2, ?3)",
                    params![canteen_id, year, payload],
                )?;
            }
            tx.commit()?;
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::requests::NewCanteen;

    fn canteen(db: &Database) -> i64 {
        db.create_canteen(&NewCanteen {
            name: "Self du lycée".to_string(),
            city: "Rennes".to_string(),
            sector: "scolaire".to_string(),
        })
        .unwrap()
    }

    #[test]
    fn upsert_replaces_same_year() {
        let db = Database::open_in_memory().unwrap();
        let id = canteen(&db);

        let mut first = DiagnosticRecord::new(2020);
        first.value_bio = Some(10.0);
        db.upsert_diagnostics(id, &[first, DiagnosticRecord::new(2019)]).unwrap();

        let mut second = DiagnosticRecord::new(2020);
        second.value_bio = Some(25.0);
        db.upsert_diagnostics(id, &[second]).unwrap();

        let history = db.diagnostics_for_canteen(id).unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history.get(2020).unwrap().value_bio, Some(25.0));
    }

    #[test]
    fn diagnostics_are_scoped_to_their_canteen() {
        let db = Database::open_in_memory().unwrap();
        let a = canteen(&db);
        let b = canteen(&db);
        db.upsert_diagnostics(a, &[DiagnosticRecord::new(2021)]).unwrap();

        assert!(db.diagnostics_for_canteen(b).unwrap().is_empty());
        let stored: usize = db
            .list_canteens()
            .unwrap()
            .iter()
            .map(|c| c.diagnostics.len())
            .sum();
        assert_eq!(stored, 1);
    }
}
