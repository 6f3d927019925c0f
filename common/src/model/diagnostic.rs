//! The flat, one-record-per-year diagnostic representation.
//!
//! A `DiagnosticRecord` is what the diagnostic form edits, what the backend
//! stores per canteen and year, and what the browser keeps under the
//! `flatDiagnostics` key when the user is not signed in. Every measure field
//! is optional: an unanswered question is absent, never `null` or `""`, and
//! absent fields are skipped when serializing.

use super::lenient;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Years used for the empty form when no diagnostic exists anywhere.
pub const DEFAULT_YEARS: [i32; 2] = [2019, 2020];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosticRecord {
    #[serde(deserialize_with = "lenient::year")]
    pub year: i32,

    // qualite-des-produits
    #[serde(
        default,
        deserialize_with = "lenient::optional_number",
        serialize_with = "lenient::whole_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub value_bio: Option<f64>,
    #[serde(
        default,
        deserialize_with = "lenient::optional_number",
        serialize_with = "lenient::whole_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub value_fair_trade: Option<f64>,
    #[serde(
        default,
        deserialize_with = "lenient::optional_number",
        serialize_with = "lenient::whole_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub value_sustainable: Option<f64>,
    #[serde(
        default,
        deserialize_with = "lenient::optional_number",
        serialize_with = "lenient::whole_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub value_total: Option<f64>,

    // gaspillage-alimentaire
    #[serde(
        default,
        deserialize_with = "lenient::optional_flag",
        skip_serializing_if = "Option::is_none"
    )]
    pub has_made_waste_diagnostic: Option<bool>,
    #[serde(
        default,
        deserialize_with = "lenient::optional_flag",
        skip_serializing_if = "Option::is_none"
    )]
    pub has_made_waste_plan: Option<bool>,
    #[serde(
        default,
        deserialize_with = "lenient::string_set",
        skip_serializing_if = "BTreeSet::is_empty"
    )]
    pub waste_actions: BTreeSet<String>,
    #[serde(
        default,
        deserialize_with = "lenient::optional_flag",
        skip_serializing_if = "Option::is_none"
    )]
    pub has_donation_agreement: Option<bool>,

    // diversification-des-menus
    #[serde(
        default,
        deserialize_with = "lenient::optional_flag",
        skip_serializing_if = "Option::is_none"
    )]
    pub has_made_diversification_plan: Option<bool>,
    #[serde(
        default,
        deserialize_with = "lenient::optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub vegetarian_frequency: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient::optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub vegetarian_menu_type: Option<String>,

    // interdiction-du-plastique
    #[serde(
        default,
        deserialize_with = "lenient::optional_flag",
        skip_serializing_if = "Option::is_none"
    )]
    pub cooking_food_containers_substituted: Option<bool>,
    #[serde(
        default,
        deserialize_with = "lenient::optional_flag",
        skip_serializing_if = "Option::is_none"
    )]
    pub service_food_containers_substituted: Option<bool>,
    #[serde(
        default,
        deserialize_with = "lenient::optional_flag",
        skip_serializing_if = "Option::is_none"
    )]
    pub water_bottles_substituted: Option<bool>,
    #[serde(
        default,
        deserialize_with = "lenient::optional_flag",
        skip_serializing_if = "Option::is_none"
    )]
    pub disposable_utensils_substituted: Option<bool>,

    // information-des-usagers
    #[serde(
        default,
        deserialize_with = "lenient::string_set",
        skip_serializing_if = "BTreeSet::is_empty"
    )]
    pub communication_supports: BTreeSet<String>,
    #[serde(
        default,
        deserialize_with = "lenient::optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub communication_support_link: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient::optional_flag",
        skip_serializing_if = "Option::is_none"
    )]
    pub communicate_on_food_plan: Option<bool>,
}

impl DiagnosticRecord {
    /// A record carrying only its year.
    pub fn new(year: i32) -> Self {
        Self {
            year,
            value_bio: None,
            value_fair_trade: None,
            value_sustainable: None,
            value_total: None,
            has_made_waste_diagnostic: None,
            has_made_waste_plan: None,
            waste_actions: BTreeSet::new(),
            has_donation_agreement: None,
            has_made_diversification_plan: None,
            vegetarian_frequency: None,
            vegetarian_menu_type: None,
            cooking_food_containers_substituted: None,
            service_food_containers_substituted: None,
            water_bottles_substituted: None,
            disposable_utensils_substituted: None,
            communication_supports: BTreeSet::new(),
            communication_support_link: None,
            communicate_on_food_plan: None,
        }
    }

    /// The blank form entry: every yes/no question answered "no", every
    /// value left empty.
    pub fn default_for_year(year: i32) -> Self {
        Self {
            has_made_waste_diagnostic: Some(false),
            has_made_waste_plan: Some(false),
            has_donation_agreement: Some(false),
            has_made_diversification_plan: Some(false),
            cooking_food_containers_substituted: Some(false),
            service_food_containers_substituted: Some(false),
            water_bottles_substituted: Some(false),
            disposable_utensils_substituted: Some(false),
            communicate_on_food_plan: Some(false),
            ..Self::new(year)
        }
    }

    /// Drops values that stand for "no answer" so they never reach storage.
    pub fn normalize(&mut self) {
        for value in [
            &mut self.value_bio,
            &mut self.value_fair_trade,
            &mut self.value_sustainable,
            &mut self.value_total,
        ] {
            if value.is_some_and(|v| !v.is_finite()) {
                *value = None;
            }
        }
        for text in [
            &mut self.vegetarian_frequency,
            &mut self.vegetarian_menu_type,
            &mut self.communication_support_link,
        ] {
            if text.as_deref().is_some_and(|t| t.trim().is_empty()) {
                *text = None;
            }
        }
        self.waste_actions.retain(|action| !action.trim().is_empty());
        self.communication_supports
            .retain(|support| !support.trim().is_empty());
    }

    /// Percentage of `value_total` spent on organic products.
    pub fn bio_share(&self) -> Option<f64> {
        percentage(self.value_bio?, self.value_total?)
    }

    /// Percentage of `value_total` spent on quality products, organic
    /// included.
    pub fn sustainable_share(&self) -> Option<f64> {
        let quality = self.value_bio.unwrap_or(0.0) + self.value_sustainable?;
        percentage(quality, self.value_total?)
    }
}

fn percentage(part: f64, total: f64) -> Option<f64> {
    (total > 0.0).then(|| part / total * 100.0)
}

/// Built-in records for the default reporting window.
pub fn default_diagnostics(years: &[i32]) -> Vec<DiagnosticRecord> {
    years
        .iter()
        .map(|&year| DiagnosticRecord::default_for_year(year))
        .collect()
}

/// Normalizes every record in place and hands the same vector back.
pub fn preprocess_diagnostics(mut records: Vec<DiagnosticRecord>) -> Vec<DiagnosticRecord> {
    records.iter_mut().for_each(DiagnosticRecord::normalize);
    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn reads_string_year_and_drops_empty_values() {
        let record: DiagnosticRecord = serde_json::from_value(json!({
            "year": "2021",
            "valueBio": "",
            "valueTotal": "1200.5",
            "vegetarianFrequency": "",
            "communicationSupportLink": null,
            "wasteActions": null,
            "hasMadeWastePlan": true
        }))
        .unwrap();

        assert_eq!(record.year, 2021);
        assert_eq!(record.value_bio, None);
        assert_eq!(record.value_total, Some(1200.5));
        assert_eq!(record.vegetarian_frequency, None);
        assert!(record.waste_actions.is_empty());
        assert_eq!(record.has_made_waste_plan, Some(true));
    }

    #[test]
    fn absent_fields_are_not_serialized() {
        let mut record = DiagnosticRecord::new(2024);
        record.value_bio = Some(10.0);

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value, json!({ "year": 2024, "valueBio": 10 }));
    }

    #[test]
    fn default_record_answers_no_to_every_question() {
        let value = serde_json::to_value(DiagnosticRecord::default_for_year(2019)).unwrap();
        let object = value.as_object().unwrap();

        assert_eq!(object["year"], json!(2019));
        assert!(object.iter().all(|(key, v)| key == "year" || v == &json!(false)));
        assert_eq!(object.len(), 10);
    }

    #[test]
    fn preprocess_is_idempotent() {
        let mut record = DiagnosticRecord::new(2020);
        record.vegetarian_menu_type = Some("  ".to_string());
        record.value_fair_trade = Some(f64::NAN);
        record.communication_supports.insert(String::new());
        record.communication_supports.insert("email".to_string());
        record.value_bio = Some(42.0);

        let once = preprocess_diagnostics(vec![record, DiagnosticRecord::default_for_year(2019)]);
        let twice = preprocess_diagnostics(once.clone());

        assert_eq!(once, twice);
        assert_eq!(once[0].vegetarian_menu_type, None);
        assert_eq!(once[0].value_fair_trade, None);
        assert_eq!(once[0].value_bio, Some(42.0));
        assert_eq!(once[0].communication_supports.len(), 1);
    }

    #[test]
    fn rejects_non_numeric_year() {
        let result = serde_json::from_value::<DiagnosticRecord>(json!({ "year": "soon" }));
        assert!(result.is_err());
    }

    #[test]
    fn shares_need_a_positive_total() {
        let mut record = DiagnosticRecord::new(2021);
        record.value_bio = Some(250.0);
        record.value_sustainable = Some(250.0);
        assert_eq!(record.bio_share(), None);

        record.value_total = Some(1000.0);
        assert_eq!(record.bio_share(), Some(25.0));
        assert_eq!(record.sustainable_share(), Some(50.0));

        record.value_total = Some(0.0);
        assert_eq!(record.sustainable_share(), None);
    }
}
