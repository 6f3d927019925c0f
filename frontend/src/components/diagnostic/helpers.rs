//! Field editing and dirty tracking for the diagnostic form.
//!
//! Every input in the view maps to one `FieldEdit`; `apply_edit` writes it
//! into the record so the update function stays a flat match. Blank inputs
//! clear the field instead of storing `""`.

use common::model::diagnostic::DiagnosticRecord;
use js_sys::Reflect;
use wasm_bindgen::JsValue;

pub use crate::components::toast::show_toast;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmountField {
    Bio,
    FairTrade,
    Sustainable,
    Total,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagField {
    WasteDiagnostic,
    WastePlan,
    DonationAgreement,
    DiversificationPlan,
    CookingFoodContainers,
    ServiceFoodContainers,
    WaterBottles,
    DisposableUtensils,
    CommunicateOnFoodPlan,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FieldEdit {
    Amount(AmountField, String),
    Flag(FlagField, bool),
    WasteAction(String, bool),
    VegetarianFrequency(String),
    VegetarianMenuType(String),
    CommunicationSupport(String, bool),
    CommunicationSupportLink(String),
}

pub const WASTE_ACTIONS: [(&str, &str); 5] = [
    ("INSCRIPTION", "Pré-inscription des convives"),
    ("AWARENESS", "Sensibilisation par affichage ou autre média"),
    ("TRAINING", "Formation du personnel"),
    ("DISTRIBUTION", "Réorganisation de la distribution des composantes du repas"),
    ("PORTIONS", "Choix des portions (grande faim, petite faim)"),
];

pub const VEGETARIAN_FREQUENCIES: [(&str, &str); 5] = [
    ("", "Non renseigné"),
    ("LOW", "Moins d'une fois par semaine"),
    ("MID", "Une fois par semaine"),
    ("HIGH", "Plusieurs fois par semaine"),
    ("DAILY", "De façon quotidienne"),
];

pub const VEGETARIAN_MENU_TYPES: [(&str, &str); 4] = [
    ("", "Non renseigné"),
    ("UNIQUE", "Un menu végétarien en plat unique, sans choix"),
    ("SEVERAL", "Un menu végétarien composé de plats au choix"),
    ("ALTERNATIVES", "Un menu végétarien en alternative à d'autres plats"),
];

pub const COMMUNICATION_SUPPORTS: [(&str, &str); 4] = [
    ("EMAIL", "Envoi d'e-mail aux convives ou à leurs représentants"),
    ("DISPLAY", "Par affichage sur le lieu de restauration"),
    ("WEBSITE", "Sur site internet ou intranet"),
    ("OTHER", "Autres moyens d'affichage et de communication électronique"),
];

/// Accepts `12,5` as well as `12.5`; anything unparsable clears the amount.
pub fn parse_amount(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .trim()
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| if c == ',' { '.' } else { c })
        .collect();
    cleaned.parse::<f64>().ok().filter(|value| value.is_finite())
}

fn optional_text(raw: String) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

pub fn amount(record: &DiagnosticRecord, field: AmountField) -> Option<f64> {
    match field {
        AmountField::Bio => record.value_bio,
        AmountField::FairTrade => record.value_fair_trade,
        AmountField::Sustainable => record.value_sustainable,
        AmountField::Total => record.value_total,
    }
}

pub fn flag(record: &DiagnosticRecord, field: FlagField) -> bool {
    let value = match field {
        FlagField::WasteDiagnostic => record.has_made_waste_diagnostic,
        FlagField::WastePlan => record.has_made_waste_plan,
        FlagField::DonationAgreement => record.has_donation_agreement,
        FlagField::DiversificationPlan => record.has_made_diversification_plan,
        FlagField::CookingFoodContainers => record.cooking_food_containers_substituted,
        FlagField::ServiceFoodContainers => record.service_food_containers_substituted,
        FlagField::WaterBottles => record.water_bottles_substituted,
        FlagField::DisposableUtensils => record.disposable_utensils_substituted,
        FlagField::CommunicateOnFoodPlan => record.communicate_on_food_plan,
    };
    value.unwrap_or(false)
}

pub fn apply_edit(record: &mut DiagnosticRecord, edit: FieldEdit) {
    match edit {
        FieldEdit::Amount(field, raw) => {
            let value = parse_amount(&raw);
            match field {
                AmountField::Bio => record.value_bio = value,
                AmountField::FairTrade => record.value_fair_trade = value,
                AmountField::Sustainable => record.value_sustainable = value,
                AmountField::Total => record.value_total = value,
            }
        }
        FieldEdit::Flag(field, value) => {
            let slot = match field {
                FlagField::WasteDiagnostic => &mut record.has_made_waste_diagnostic,
                FlagField::WastePlan => &mut record.has_made_waste_plan,
                FlagField::DonationAgreement => &mut record.has_donation_agreement,
                FlagField::DiversificationPlan => &mut record.has_made_diversification_plan,
                FlagField::CookingFoodContainers => &mut record.cooking_food_containers_substituted,
                FlagField::ServiceFoodContainers => &mut record.service_food_containers_substituted,
                FlagField::WaterBottles => &mut record.water_bottles_substituted,
                FlagField::DisposableUtensils => &mut record.disposable_utensils_substituted,
                FlagField::CommunicateOnFoodPlan => &mut record.communicate_on_food_plan,
            };
            *slot = Some(value);
        }
        FieldEdit::WasteAction(action, checked) => {
            if checked {
                record.waste_actions.insert(action);
            } else {
                record.waste_actions.remove(&action);
            }
        }
        FieldEdit::VegetarianFrequency(raw) => record.vegetarian_frequency = optional_text(raw),
        FieldEdit::VegetarianMenuType(raw) => record.vegetarian_menu_type = optional_text(raw),
        FieldEdit::CommunicationSupport(support, checked) => {
            if checked {
                record.communication_supports.insert(support);
            } else {
                record.communication_supports.remove(&support);
            }
        }
        FieldEdit::CommunicationSupportLink(raw) => {
            record.communication_support_link = optional_text(raw)
        }
    }
}

/// Hex MD5 digest, used to compare the form against its last saved state.
pub fn compute_md5(input: &str) -> String {
    format!("{:x}", md5::compute(input))
}

/// Mirrors unsaved changes into `window.app_dirty` for the unload guard.
pub fn set_window_dirty_flag(dirty: bool) {
    if let Some(window) = web_sys::window() {
        let _ = Reflect::set(
            &window,
            &JsValue::from_str("app_dirty"),
            &JsValue::from_bool(dirty),
        );
    }
}
