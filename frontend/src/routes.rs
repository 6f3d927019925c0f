//! Client-side pages and the paths they live at.

use common::key_measures::find_key_measure;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Dashboard,
    Diagnostic,
    Poster,
    Login,
    SignUp,
    Canteens,
    /// `None` lists every key measure; `Some(id)` shows one.
    KeyMeasures(Option<&'static str>),
}

impl Page {
    /// Unknown paths and unknown measure ids open the dashboard.
    pub fn from_path(path: &str) -> Self {
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        match segments.as_slice() {
            [] => Page::Dashboard,
            ["diagnostic"] => Page::Diagnostic,
            ["creation-affiche"] => Page::Poster,
            ["connexion"] => Page::Login,
            ["inscription"] => Page::SignUp,
            ["nos-cantines"] => Page::Canteens,
            ["mesures-phares"] => Page::KeyMeasures(None),
            ["mesures-phares", id] => match find_key_measure(id) {
                Some(measure) => Page::KeyMeasures(Some(measure.id)),
                None => Page::KeyMeasures(None),
            },
            _ => Page::Dashboard,
        }
    }

    pub fn path(self) -> String {
        match self {
            Page::Dashboard => "/".to_string(),
            Page::Diagnostic => "/diagnostic".to_string(),
            Page::Poster => "/creation-affiche".to_string(),
            Page::Login => "/connexion".to_string(),
            Page::SignUp => "/inscription".to_string(),
            Page::Canteens => "/nos-cantines".to_string(),
            Page::KeyMeasures(None) => "/mesures-phares".to_string(),
            Page::KeyMeasures(Some(id)) => format!("/mesures-phares/{id}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_resolve_to_pages() {
        assert_eq!(Page::from_path("/"), Page::Dashboard);
        assert_eq!(Page::from_path("/inscription"), Page::SignUp);
        assert_eq!(Page::from_path("/nos-cantines/"), Page::Canteens);
        assert_eq!(
            Page::from_path("/mesures-phares/gaspillage-alimentaire"),
            Page::KeyMeasures(Some("gaspillage-alimentaire"))
        );
        assert_eq!(Page::from_path("/ailleurs"), Page::Dashboard);
    }

    #[test]
    fn unknown_measure_falls_back_to_the_list() {
        assert_eq!(
            Page::from_path("/mesures-phares/inconnue"),
            Page::KeyMeasures(None)
        );
    }

    #[test]
    fn every_page_reads_back_from_its_path() {
        let pages = [
            Page::Dashboard,
            Page::Diagnostic,
            Page::Poster,
            Page::Login,
            Page::SignUp,
            Page::Canteens,
            Page::KeyMeasures(None),
            Page::KeyMeasures(Some("qualite-des-produits")),
        ];
        for page in pages {
            assert_eq!(Page::from_path(&page.path()), page);
        }
    }
}
