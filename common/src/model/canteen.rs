use super::diagnostic::DiagnosticRecord;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Canteen {
    pub id: i64,
    pub name: String,
    pub city: String,
    pub sector: String,
    #[serde(default)]
    pub diagnostics: Vec<DiagnosticRecord>,
}

impl Canteen {
    /// The diagnostic reported for `time_period`, used on public summaries.
    pub fn diagnostic_for_year(&self, time_period: i32) -> Option<&DiagnosticRecord> {
        self.diagnostics
            .iter()
            .find(|diagnostic| diagnostic.year == time_period)
    }
}

/// Public listing entry: a canteen with at most the diagnostic of the
/// reporting year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanteenSummary {
    pub id: i64,
    pub name: String,
    pub city: String,
    pub sector: String,
    pub time_period: i32,
    pub diagnostic: Option<DiagnosticRecord>,
}

impl CanteenSummary {
    pub fn from_canteen(canteen: &Canteen, time_period: i32) -> Self {
        Self {
            id: canteen.id,
            name: canteen.name.clone(),
            city: canteen.city.clone(),
            sector: canteen.sector.clone(),
            time_period,
            diagnostic: canteen.diagnostic_for_year(time_period).cloned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_keeps_only_the_reporting_year() {
        let canteen = Canteen {
            id: 3,
            name: "Collège Jean Moulin".to_string(),
            city: "Lyon".to_string(),
            sector: "scolaire".to_string(),
            diagnostics: vec![DiagnosticRecord::new(2019), DiagnosticRecord::new(2020)],
        };

        let summary = CanteenSummary::from_canteen(&canteen, 2020);
        assert_eq!(summary.diagnostic.map(|d| d.year), Some(2020));
        assert!(canteen.diagnostic_for_year(2024).is_none());
    }
}
