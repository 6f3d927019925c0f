//! The five EGAlim key measures and their sub-measures.
//!
//! Measure ids double as the category keys of the legacy diagnostic document.

use crate::model::legacy::{
    DiversificationMeasures, InformationMeasures, MeasureCategory, PlasticMeasures,
    QualityMeasures, WasteMeasures,
};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SubMeasure {
    pub id: &'static str,
    pub title: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyMeasure {
    pub id: &'static str,
    pub title: &'static str,
    pub sub_measures: &'static [SubMeasure],
}

pub static KEY_MEASURES: [KeyMeasure; 5] = [
    KeyMeasure {
        id: QualityMeasures::KEY,
        title: "Au moins 50 % de produits de qualité et durables dont 20 % de bio",
        sub_measures: &[
            SubMeasure {
                id: "qualite-des-produits-1",
                title: "Proposer au moins 50 % de produits de qualité et durables",
            },
            SubMeasure {
                id: "qualite-des-produits-2",
                title: "Dont au moins 20 % de produits issus de l'agriculture biologique",
            },
        ],
    },
    KeyMeasure {
        id: WasteMeasures::KEY,
        title: "Lutte contre le gaspillage alimentaire et dons alimentaires",
        sub_measures: &[
            SubMeasure {
                id: "gaspillage-alimentaire-1",
                title: "Réaliser un diagnostic du gaspillage alimentaire",
            },
            SubMeasure {
                id: "gaspillage-alimentaire-2",
                title: "Mettre en place une démarche de lutte contre le gaspillage",
            },
            SubMeasure {
                id: "gaspillage-alimentaire-3",
                title: "Proposer une convention de dons alimentaires",
            },
        ],
    },
    KeyMeasure {
        id: DiversificationMeasures::KEY,
        title: "Diversification des sources de protéines et menus végétariens",
        sub_measures: &[
            SubMeasure {
                id: "diversification-des-menus-1",
                title: "Mettre en place un plan pluriannuel de diversification des protéines",
            },
            SubMeasure {
                id: "diversification-des-menus-2",
                title: "Proposer un menu végétarien au moins une fois par semaine",
            },
        ],
    },
    KeyMeasure {
        id: PlasticMeasures::KEY,
        title: "Substitution des plastiques",
        sub_measures: &[
            SubMeasure {
                id: "interdiction-du-plastique-1",
                title: "Interdire les contenants alimentaires de cuisson et de service en plastique",
            },
            SubMeasure {
                id: "interdiction-du-plastique-2",
                title: "Interdire les bouteilles d'eau plate en plastique",
            },
            SubMeasure {
                id: "interdiction-du-plastique-3",
                title: "Interdire les ustensiles à usage unique en plastique",
            },
        ],
    },
    KeyMeasure {
        id: InformationMeasures::KEY,
        title: "Information des usagers et des convives",
        sub_measures: &[
            SubMeasure {
                id: "information-des-usagers-1",
                title: "Informer les convives sur la part de produits de qualité et durables",
            },
            SubMeasure {
                id: "information-des-usagers-2",
                title: "Informer sur le plan alimentaire pluriannuel",
            },
        ],
    },
];

pub fn find_key_measure(id: &str) -> Option<&'static KeyMeasure> {
    KEY_MEASURES.iter().find(|measure| measure.id == id)
}

pub fn find_sub_measure(id: &str) -> Option<&'static SubMeasure> {
    KEY_MEASURES
        .iter()
        .flat_map(|measure| measure.sub_measures.iter())
        .find(|sub_measure| sub_measure.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_sub_measure_in_any_measure() {
        let sub = find_sub_measure("interdiction-du-plastique-2").unwrap();
        assert!(sub.title.contains("bouteilles"));
        assert!(find_sub_measure("inconnue").is_none());
    }

    #[test]
    fn measure_ids_match_legacy_categories() {
        assert_eq!(find_key_measure("qualite-des-produits").unwrap().sub_measures.len(), 2);
        assert!(find_key_measure(InformationMeasures::KEY).is_some());
    }
}
