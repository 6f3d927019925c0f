//! The deprecated nested diagnostic document, kept only as a migration source.
//!
//! Early versions of the form stored one object per key measure under the
//! `diagnostics` key. Only `qualite-des-produits` was split by year; all other
//! categories implicitly belonged to a single default year. Each category is
//! typed here and knows which fields of a `DiagnosticRecord` it fills, so a
//! flattened record can be assembled without key collisions.

use super::diagnostic::{DiagnosticRecord, preprocess_diagnostics};
use super::lenient;
use log::warn;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// One key-measure category of the legacy document.
pub trait MeasureCategory {
    /// Category key in the legacy document, also the key-measure id.
    const KEY: &'static str;

    /// Copies this category's answers onto `record`.
    fn apply_to(&self, record: &mut DiagnosticRecord);
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QualityMeasures {
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
}

impl MeasureCategory for QualityMeasures {
    const KEY: &'static str = "qualite-des-produits";

    fn apply_to(&self, record: &mut DiagnosticRecord) {
        record.value_bio = self.value_bio;
        record.value_fair_trade = self.value_fair_trade;
        record.value_sustainable = self.value_sustainable;
        record.value_total = self.value_total;
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WasteMeasures {
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
    /// Former name of `has_donation_agreement`; `Some(None)` when the key
    /// was written as `null`.
    #[serde(
        default,
        deserialize_with = "lenient::present_flag",
        skip_serializing_if = "Option::is_none"
    )]
    pub has_covenant: Option<Option<bool>>,
}

impl MeasureCategory for WasteMeasures {
    const KEY: &'static str = "gaspillage-alimentaire";

    fn apply_to(&self, record: &mut DiagnosticRecord) {
        record.has_made_waste_diagnostic = self.has_made_waste_diagnostic;
        record.has_made_waste_plan = self.has_made_waste_plan;
        record.waste_actions = self.waste_actions.clone();
        record.has_donation_agreement = self.has_donation_agreement;
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiversificationMeasures {
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
}

impl MeasureCategory for DiversificationMeasures {
    const KEY: &'static str = "diversification-des-menus";

    fn apply_to(&self, record: &mut DiagnosticRecord) {
        record.has_made_diversification_plan = self.has_made_diversification_plan;
        record.vegetarian_frequency = self.vegetarian_frequency.clone();
        record.vegetarian_menu_type = self.vegetarian_menu_type.clone();
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlasticMeasures {
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
}

impl MeasureCategory for PlasticMeasures {
    const KEY: &'static str = "interdiction-du-plastique";

    fn apply_to(&self, record: &mut DiagnosticRecord) {
        record.cooking_food_containers_substituted = self.cooking_food_containers_substituted;
        record.service_food_containers_substituted = self.service_food_containers_substituted;
        record.water_bottles_substituted = self.water_bottles_substituted;
        record.disposable_utensils_substituted = self.disposable_utensils_substituted;
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InformationMeasures {
    #[serde(
        default,
        deserialize_with = "lenient::string_set",
        skip_serializing_if = "BTreeSet::is_empty"
    )]
    pub communication_supports: BTreeSet<String>,
    /// Former name of `communication_supports`, kept even when empty.
    #[serde(
        default,
        deserialize_with = "lenient::present_string_set",
        skip_serializing_if = "Option::is_none"
    )]
    pub communication_support: Option<BTreeSet<String>>,
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

impl MeasureCategory for InformationMeasures {
    const KEY: &'static str = "information-des-usagers";

    fn apply_to(&self, record: &mut DiagnosticRecord) {
        record.communication_supports = self.communication_supports.clone();
        record.communication_support_link = self.communication_support_link.clone();
        record.communicate_on_food_plan = self.communicate_on_food_plan;
    }
}

/// The nested document as it was saved under the `diagnostics` key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LegacyDiagnosticDocument {
    /// Quality answers keyed by year string.
    #[serde(rename = "qualite-des-produits", default, skip_serializing_if = "BTreeMap::is_empty")]
    pub quality: BTreeMap<String, QualityMeasures>,
    #[serde(rename = "gaspillage-alimentaire", default, skip_serializing_if = "Option::is_none")]
    pub waste: Option<WasteMeasures>,
    #[serde(rename = "diversification-des-menus", default, skip_serializing_if = "Option::is_none")]
    pub diversification: Option<DiversificationMeasures>,
    #[serde(rename = "interdiction-du-plastique", default, skip_serializing_if = "Option::is_none")]
    pub plastic: Option<PlasticMeasures>,
    #[serde(rename = "information-des-usagers", default, skip_serializing_if = "Option::is_none")]
    pub information: Option<InformationMeasures>,
}

impl LegacyDiagnosticDocument {
    /// Quality answers with parsed years, ascending. Keys that are not years
    /// are skipped.
    pub fn quality_by_year(&self) -> Vec<(i32, &QualityMeasures)> {
        let mut by_year: Vec<(i32, &QualityMeasures)> = self
            .quality
            .iter()
            .filter_map(|(key, measures)| match key.trim().parse::<i32>() {
                Ok(year) => Some((year, measures)),
                Err(_) => {
                    warn!("ignoring legacy quality entry with year key {key:?}");
                    None
                }
            })
            .collect();
        by_year.sort_by_key(|(year, _)| *year);
        by_year
    }

    /// Moves answers stored under retired field names onto their current
    /// names. A key present under the old name replaces the new one, even
    /// when its value is empty.
    pub fn apply_legacy_renames(&mut self) {
        if let Some(waste) = &mut self.waste {
            if let Some(covenant) = waste.has_covenant.take() {
                waste.has_donation_agreement = covenant;
            }
        }
        if let Some(information) = &mut self.information {
            if let Some(supports) = information.communication_support.take() {
                information.communication_supports = supports;
            }
        }
    }
}

/// Flattens a legacy document into one record per year.
///
/// The record for `default_year` comes first and collects every category that
/// is not split by year. Each other year found under `qualite-des-produits`
/// gets its own record, in ascending year order.
pub fn flatten_diagnostics(
    document: &LegacyDiagnosticDocument,
    default_year: i32,
) -> Vec<DiagnosticRecord> {
    let mut accumulator = DiagnosticRecord::new(default_year);
    let mut other_years = Vec::new();

    for (year, quality) in document.quality_by_year() {
        if year == default_year {
            quality.apply_to(&mut accumulator);
        } else {
            let mut record = DiagnosticRecord::new(year);
            quality.apply_to(&mut record);
            other_years.push(record);
        }
    }

    if let Some(waste) = &document.waste {
        waste.apply_to(&mut accumulator);
    }
    if let Some(diversification) = &document.diversification {
        diversification.apply_to(&mut accumulator);
    }
    if let Some(plastic) = &document.plastic {
        plastic.apply_to(&mut accumulator);
    }
    if let Some(information) = &document.information {
        information.apply_to(&mut accumulator);
    }

    let mut flattened = Vec::with_capacity(other_years.len() + 1);
    flattened.push(accumulator);
    flattened.extend(other_years);
    preprocess_diagnostics(flattened)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn document(value: serde_json::Value) -> LegacyDiagnosticDocument {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn other_quality_years_become_their_own_records() {
        let doc = document(json!({
            "qualite-des-produits": {
                "2019": { "valueBio": 5, "valueTotal": "" },
                "2020": { "valueBio": 12, "valueTotal": 100 }
            },
            "gaspillage-alimentaire": { "hasMadeWastePlan": true }
        }));

        let flat = flatten_diagnostics(&doc, 2020);

        assert_eq!(flat.len(), 2);
        assert_eq!(flat[0].year, 2020);
        assert_eq!(flat[0].value_bio, Some(12.0));
        assert_eq!(flat[0].has_made_waste_plan, Some(true));

        let mut expected = DiagnosticRecord::new(2019);
        expected.value_bio = Some(5.0);
        assert_eq!(flat[1], expected);
    }

    #[test]
    fn without_quality_category_a_single_default_record_is_produced() {
        let doc = document(json!({
            "diversification-des-menus": {
                "vegetarianFrequency": "weekly",
                "vegetarianMenuType": ""
            },
            "interdiction-du-plastique": { "waterBottlesSubstituted": true }
        }));

        let flat = flatten_diagnostics(&doc, 2020);

        assert_eq!(flat.len(), 1);
        assert_eq!(flat[0].year, 2020);
        assert_eq!(flat[0].vegetarian_frequency.as_deref(), Some("weekly"));
        assert_eq!(flat[0].vegetarian_menu_type, None);
        assert_eq!(flat[0].water_bottles_substituted, Some(true));
    }

    #[test]
    fn empty_document_flattens_to_bare_default_year() {
        let flat = flatten_diagnostics(&LegacyDiagnosticDocument::default(), 2020);
        assert_eq!(flat, vec![DiagnosticRecord::new(2020)]);
    }

    #[test]
    fn quality_years_are_ordered_numerically_and_bad_keys_skipped() {
        let doc = document(json!({
            "qualite-des-produits": {
                "2021": { "valueBio": 3 },
                "année": { "valueBio": 1 },
                "2018": { "valueBio": 2 }
            }
        }));

        let years: Vec<i32> = flatten_diagnostics(&doc, 2020).iter().map(|r| r.year).collect();
        assert_eq!(years, vec![2020, 2018, 2021]);
    }

    #[test]
    fn retired_field_names_are_renamed() {
        let mut doc = document(json!({
            "gaspillage-alimentaire": { "hasCovenant": true },
            "information-des-usagers": { "communicationSupport": ["affichage", "site"] }
        }));

        doc.apply_legacy_renames();
        let flat = flatten_diagnostics(&doc, 2020);

        assert_eq!(flat[0].has_donation_agreement, Some(true));
        assert!(flat[0].communication_supports.contains("affichage"));
        assert!(flat[0].communication_supports.contains("site"));

        let serialized = serde_json::to_value(&doc).unwrap();
        assert!(serialized["gaspillage-alimentaire"].get("hasCovenant").is_none());
        assert!(serialized["information-des-usagers"].get("communicationSupport").is_none());
    }

    #[test]
    fn retired_keys_written_empty_still_replace_the_new_ones() {
        let mut doc = document(json!({
            "gaspillage-alimentaire": { "hasDonationAgreement": true, "hasCovenant": null },
            "information-des-usagers": {
                "communicationSupports": ["site"],
                "communicationSupport": []
            }
        }));

        doc.apply_legacy_renames();
        let flat = flatten_diagnostics(&doc, 2020);

        assert_eq!(flat[0].has_donation_agreement, None);
        assert!(flat[0].communication_supports.is_empty());
    }

    #[test]
    fn one_unreadable_answer_keeps_the_rest_of_the_document() {
        let doc = document(json!({
            "qualite-des-produits": {
                "2019": { "valueBio": 4 },
                "2020": { "valueBio": 9, "valueTotal": "100 €" }
            },
            "gaspillage-alimentaire": { "hasMadeWastePlan": true }
        }));

        let flat = flatten_diagnostics(&doc, 2020);

        assert_eq!(flat.iter().map(|r| r.year).collect::<Vec<_>>(), vec![2020, 2019]);
        assert_eq!(flat[0].value_bio, Some(9.0));
        assert_eq!(flat[0].value_total, None);
        assert_eq!(flat[0].has_made_waste_plan, Some(true));
        assert_eq!(flat[1].value_bio, Some(4.0));
    }
}
