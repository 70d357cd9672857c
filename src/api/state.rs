use std::sync::Arc;

use tokio::sync::RwLock;

use crate::{
    config::{Config, PipelineSettings},
    error::AppResult,
    preferences::{FilePreferenceStore, PreferenceStore, Theme, ThemePreference},
    services::{
        detail::DetailSession,
        providers::{MetadataProvider, OmdbProvider},
        search::SearchSession,
    },
};

/// Shared application state handed to the view layer
///
/// Views get fresh sessions from here; the provider and theme are shared.
#[derive(Clone)]
pub struct AppState {
    pub provider: Arc<dyn MetadataProvider>,
    pub settings: PipelineSettings,
    pub theme: Arc<RwLock<ThemePreference>>,
}

impl AppState {
    pub fn new(
        provider: Arc<dyn MetadataProvider>,
        settings: PipelineSettings,
        store: Arc<dyn PreferenceStore>,
        prefers_dark: bool,
    ) -> Self {
        Self {
            provider,
            settings,
            theme: Arc::new(RwLock::new(ThemePreference::load(store, prefers_dark))),
        }
    }

    /// Wires OMDb and the file-backed theme preference from configuration
    pub fn from_config(config: &Config, prefers_dark: bool) -> Self {
        let provider = Arc::new(OmdbProvider::from_config(config));
        let store = Arc::new(FilePreferenceStore::new(config.preferences_path.clone()));

        tracing::info!(
            api_url = %config.omdb_api_url,
            debounce_ms = config.debounce_ms,
            min_query_length = config.min_query_length,
            "Application state initialized"
        );

        Self::new(provider, config.pipeline(), store, prefers_dark)
    }

    /// Starts a search view
    pub fn search_session(&self) -> SearchSession {
        SearchSession::new(self.provider.clone(), self.settings)
    }

    /// Starts a detail view
    pub fn detail_session(&self) -> DetailSession {
        DetailSession::new(self.provider.clone())
    }

    pub async fn theme(&self) -> Theme {
        self.theme.read().await.current()
    }

    pub async fn toggle_theme(&self) -> AppResult<Theme> {
        self.theme.write().await.toggle()
    }
}
