//! Component state for the diagnostic form.

use common::model::diagnostic::DiagnosticRecord;
use common::model::history::DiagnosticPair;

use super::helpers::compute_md5;

pub struct DiagnosticForm {
    /// Diagnostics being edited; `None` until the first load completes.
    pub pair: Option<DiagnosticPair>,

    /// Year shown in the form.
    pub active_year: Option<i32>,

    /// A save request is in flight.
    pub saving: bool,

    /// Guard for the first-render load.
    pub loaded: bool,

    /// MD5 of the pair at last load or save, for dirty tracking.
    pub original_md5: Option<String>,
}

impl DiagnosticForm {
    pub fn new() -> Self {
        Self {
            pair: None,
            active_year: None,
            saving: false,
            loaded: false,
            original_md5: None,
        }
    }

    pub fn years(&self) -> Vec<i32> {
        self.pair
            .as_ref()
            .map(|pair| {
                std::iter::once(pair.latest.year)
                    .chain(pair.previous.as_ref().map(|p| p.year))
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn active_record(&self) -> Option<&DiagnosticRecord> {
        let pair = self.pair.as_ref()?;
        let year = self.active_year?;
        if pair.latest.year == year {
            Some(&pair.latest)
        } else {
            pair.previous.as_ref().filter(|p| p.year == year)
        }
    }

    pub fn active_record_mut(&mut self) -> Option<&mut DiagnosticRecord> {
        let year = self.active_year?;
        let pair = self.pair.as_mut()?;
        if pair.latest.year == year {
            Some(&mut pair.latest)
        } else {
            pair.previous.as_mut().filter(|p| p.year == year)
        }
    }

    /// Checksum of the serialized pair.
    pub fn current_md5(&self) -> Option<String> {
        let pair = self.pair.as_ref()?;
        serde_json::to_string(pair).ok().map(|json| compute_md5(&json))
    }

    pub fn is_dirty(&self) -> bool {
        match (&self.original_md5, self.current_md5()) {
            (Some(original), Some(current)) => *original != current,
            _ => false,
        }
    }
}
