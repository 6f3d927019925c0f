use super::diagnostic::DiagnosticRecord;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("no diagnostic for year {0}")]
pub struct NoMatchingYear(pub i32);

/// The two most recent diagnostics, as the form and dashboard show them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagnosticPair {
    pub latest: DiagnosticRecord,
    pub previous: Option<DiagnosticRecord>,
}

impl DiagnosticPair {
    /// `[latest, previous]`, skipping a missing previous year.
    pub fn into_records(self) -> Vec<DiagnosticRecord> {
        std::iter::once(self.latest).chain(self.previous).collect()
    }
}

/// Diagnostics of one canteen keyed by year.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DiagnosticHistory {
    by_year: BTreeMap<i32, DiagnosticRecord>,
}

impl DiagnosticHistory {
    /// Builds a history; when two records share a year the later one is kept.
    pub fn from_records(records: impl IntoIterator<Item = DiagnosticRecord>) -> Self {
        Self {
            by_year: records
                .into_iter()
                .map(|record| (record.year, record))
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.by_year.is_empty()
    }

    pub fn len(&self) -> usize {
        self.by_year.len()
    }

    pub fn get(&self, year: i32) -> Option<&DiagnosticRecord> {
        self.by_year.get(&year)
    }

    /// Up to `n` records, newest first.
    pub fn most_recent(&self, n: usize) -> Vec<&DiagnosticRecord> {
        self.by_year.values().rev().take(n).collect()
    }

    pub fn pair(&self) -> Option<DiagnosticPair> {
        let mut recent = self.most_recent(2).into_iter().cloned();
        let latest = recent.next()?;
        Some(DiagnosticPair {
            latest,
            previous: recent.next(),
        })
    }

    /// Replaces the record for `record.year`, which must already be tracked.
    pub fn replace(&mut self, record: DiagnosticRecord) -> Result<(), NoMatchingYear> {
        match self.by_year.get_mut(&record.year) {
            Some(slot) => {
                *slot = record;
                Ok(())
            }
            None => Err(NoMatchingYear(record.year)),
        }
    }

    /// Records newest first.
    pub fn into_records(self) -> Vec<DiagnosticRecord> {
        self.by_year.into_values().rev().collect()
    }
}

impl From<DiagnosticPair> for DiagnosticHistory {
    fn from(pair: DiagnosticPair) -> Self {
        Self::from_records(pair.into_records())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(year: i32, value_bio: f64) -> DiagnosticRecord {
        let mut record = DiagnosticRecord::new(year);
        record.value_bio = Some(value_bio);
        record
    }

    #[test]
    fn pair_takes_the_two_newest_years() {
        let history = DiagnosticHistory::from_records([
            record(2019, 1.0),
            record(2022, 4.0),
            record(2020, 2.0),
        ]);

        let pair = history.pair().unwrap();
        assert_eq!(pair.latest.year, 2022);
        assert_eq!(pair.previous.unwrap().year, 2020);
    }

    #[test]
    fn single_record_has_no_previous() {
        let pair = DiagnosticHistory::from_records([record(2021, 3.0)]).pair().unwrap();
        assert_eq!(pair.latest.year, 2021);
        assert!(pair.previous.is_none());
        assert!(DiagnosticHistory::default().pair().is_none());
    }

    #[test]
    fn duplicate_years_keep_the_last_record() {
        let history = DiagnosticHistory::from_records([record(2020, 1.0), record(2020, 9.0)]);
        assert_eq!(history.len(), 1);
        assert_eq!(history.get(2020).unwrap().value_bio, Some(9.0));
    }

    #[test]
    fn replace_rejects_unknown_year() {
        let mut history = DiagnosticHistory::from_records([record(2019, 1.0), record(2020, 2.0)]);

        assert_eq!(history.replace(record(2031, 5.0)), Err(NoMatchingYear(2031)));
        assert_eq!(history.get(2020).unwrap().value_bio, Some(2.0));

        history.replace(record(2020, 7.0)).unwrap();
        assert_eq!(history.get(2020).unwrap().value_bio, Some(7.0));
        assert_eq!(
            history.into_records().iter().map(|r| r.year).collect::<Vec<_>>(),
            vec![2020, 2019]
        );
    }
}
