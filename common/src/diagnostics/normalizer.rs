use super::error::NormalizerError;
use super::ports::{DiagnosticsRemote, KeyValueStore, TokenProvider};
use crate::model::diagnostic::{
    DEFAULT_YEARS, DiagnosticRecord, default_diagnostics, preprocess_diagnostics,
};
use crate::model::history::{DiagnosticHistory, DiagnosticPair};
use crate::model::stored::StoredDiagnostics;
use crate::requests::{CanteenDiagnosticsResponse, SaveDiagnosticsRequest};
use log::{debug, info, warn};

/// Storage key of the current flat format.
pub const LOCAL_FLAT_KEY: &str = "flatDiagnostics";
/// Storage key of the nested format, read only to migrate it.
pub const LOCAL_LEGACY_KEY: &str = "diagnostics";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizerConfig {
    /// Years of the blank form shown when nothing is stored anywhere.
    pub default_years: Vec<i32>,
    /// Year that the non year-keyed legacy categories belong to.
    pub legacy_default_year: i32,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            default_years: DEFAULT_YEARS.to_vec(),
            legacy_default_year: 2020,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DiagnosticsResult {
    pub diagnostics: DiagnosticPair,
    /// The API returned saved data, or something is stored locally.
    pub has_results: bool,
}

/// Where a save ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Remote,
    Local,
}

pub struct DiagnosticNormalizer<S, T, R> {
    store: S,
    tokens: T,
    remote: R,
    config: NormalizerConfig,
}

impl<S, T, R> DiagnosticNormalizer<S, T, R>
where
    S: KeyValueStore,
    T: TokenProvider,
    R: DiagnosticsRemote,
{
    pub fn new(store: S, tokens: T, remote: R) -> Self {
        Self::with_config(store, tokens, remote, NormalizerConfig::default())
    }

    pub fn with_config(store: S, tokens: T, remote: R, config: NormalizerConfig) -> Self {
        Self {
            store,
            tokens,
            remote,
            config,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn remote(&self) -> &R {
        &self.remote
    }

    /// Saved remote diagnostics when available, otherwise local data, otherwise
    /// the blank default years. Never fails: the form always has something to
    /// render.
    pub async fn get_diagnostics(&self) -> DiagnosticsResult {
        if let Some(diagnostics) = self.fetch_remote().await {
            return DiagnosticsResult {
                diagnostics,
                has_results: true,
            };
        }

        let records = self
            .get_local_diagnostics()
            .unwrap_or_else(|| default_diagnostics(&self.config.default_years));
        let diagnostics = DiagnosticHistory::from_records(records)
            .pair()
            .unwrap_or_else(|| self.default_pair());

        DiagnosticsResult {
            diagnostics,
            has_results: self.store.contains(LOCAL_FLAT_KEY)
                || self.store.contains(LOCAL_LEGACY_KEY),
        }
    }

    /// Flat records from browser storage, migrating the nested format if that
    /// is all there is. `None` means nothing usable is stored.
    pub fn get_local_diagnostics(&self) -> Option<Vec<DiagnosticRecord>> {
        self.read_local()
            .map(|stored| stored.into_records(self.config.legacy_default_year))
    }

    /// Replaces the diagnostic with the same year in the current pair and saves
    /// the pair.
    pub async fn save_diagnostic(
        &self,
        diagnostic: DiagnosticRecord,
    ) -> Result<SaveOutcome, NormalizerError> {
        let current = self.get_diagnostics().await.diagnostics;
        let mut history = DiagnosticHistory::from(current);
        history.replace(diagnostic)?;
        self.save_records(history.into_records()).await
    }

    pub async fn save_diagnostics(
        &self,
        diagnostics: DiagnosticPair,
    ) -> Result<SaveOutcome, NormalizerError> {
        self.save_records(diagnostics.into_records()).await
    }

    /// `None` when there is nothing saved yet, so the dashboard can say so.
    pub async fn get_diagnostics_for_dashboard(&self) -> Option<DiagnosticPair> {
        let result = self.get_diagnostics().await;
        result.has_results.then_some(result.diagnostics)
    }

    /// Always a pair, the blank defaults when nothing is saved.
    pub async fn get_diagnostics_for_diagnostic_form(&self) -> DiagnosticPair {
        self.get_diagnostics().await.diagnostics
    }

    pub async fn get_diagnostics_for_poster(&self) -> DiagnosticRecord {
        self.get_diagnostics().await.diagnostics.latest
    }

    pub fn delete_local_diagnostics(&self) {
        self.store.remove(LOCAL_FLAT_KEY);
        self.store.remove(LOCAL_LEGACY_KEY);
    }

    async fn save_records(
        &self,
        records: Vec<DiagnosticRecord>,
    ) -> Result<SaveOutcome, NormalizerError> {
        let request = SaveDiagnosticsRequest {
            diagnostics: preprocess_diagnostics(records),
        };

        if let Some(token) = self.token() {
            match self.remote.save_diagnostics(&token, &request).await {
                Ok(201) => {
                    self.delete_local_diagnostics();
                    info!("saved {} diagnostics remotely", request.diagnostics.len());
                    return Ok(SaveOutcome::Remote);
                }
                Ok(status) => warn!("save-diagnostics answered {status}, keeping a local copy"),
                Err(err) => warn!("{err}, keeping a local copy"),
            }
        }

        let encoded = StoredDiagnostics::flat(request.diagnostics).encode()?;
        self.store.set(LOCAL_FLAT_KEY, &encoded)?;
        debug!("saved diagnostics to {LOCAL_FLAT_KEY}");
        Ok(SaveOutcome::Local)
    }

    async fn fetch_remote(&self) -> Option<DiagnosticPair> {
        let token = self.token()?;
        let reply = match self.remote.fetch_diagnostics(&token).await {
            Ok(reply) => reply,
            Err(err) => {
                warn!("{err}, falling back to local diagnostics");
                return None;
            }
        };
        if reply.status != 200 {
            info!("get-diagnostics-by-canteen answered {}", reply.status);
            return None;
        }

        match serde_json::from_str::<CanteenDiagnosticsResponse>(&reply.body) {
            Ok(CanteenDiagnosticsResponse {
                latest: Some(latest),
                previous,
            }) => Some(DiagnosticPair { latest, previous }),
            Ok(_) => {
                debug!("no saved diagnostics for this canteen");
                None
            }
            Err(err) => {
                warn!("unreadable diagnostics response: {err}");
                None
            }
        }
    }

    fn read_local(&self) -> Option<StoredDiagnostics> {
        if let Some(raw) = self.non_empty(LOCAL_FLAT_KEY) {
            match StoredDiagnostics::decode_flat(&raw) {
                Ok(stored) => return Some(stored),
                Err(err) => warn!("ignoring {LOCAL_FLAT_KEY}: {err}"),
            }
        }

        let raw = self.non_empty(LOCAL_LEGACY_KEY)?;
        match StoredDiagnostics::decode_legacy(&raw) {
            Ok(stored) => Some(stored),
            Err(err) => {
                warn!("ignoring {LOCAL_LEGACY_KEY}: {err}");
                None
            }
        }
    }

    fn non_empty(&self, key: &str) -> Option<String> {
        self.store.get(key).filter(|raw| !raw.is_empty())
    }

    fn token(&self) -> Option<String> {
        self.tokens.token().filter(|token| !token.is_empty())
    }

    fn default_pair(&self) -> DiagnosticPair {
        DiagnosticHistory::from_records(default_diagnostics(&self.config.default_years))
            .pair()
            .unwrap_or_else(|| DiagnosticPair {
                latest: DiagnosticRecord::default_for_year(self.config.legacy_default_year),
                previous: None,
            })
    }
}
