use std::sync::Arc;

use serde::Serialize;
use tokio::{sync::RwLock, task::JoinHandle};
use uuid::Uuid;

use crate::{
    config::PipelineSettings,
    error::ErrorKind,
    models::{MovieDetail, PlotLength, ResultPage, SearchResultItem},
    services::{
        cancellation::{RequestController, RequestToken},
        debounce::Debouncer,
        providers::MetadataProvider,
        status,
    },
};

/// What the view layer renders for a search screen
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SearchView {
    /// Raw input, untrimmed
    pub query: String,
    pub status: String,
    pub results: Vec<SearchResultItem>,
    pub total_results: usize,
    pub page: u32,
    pub can_load_more: bool,
    pub is_searching: bool,
    pub is_loading_more: bool,
    /// Id of the title open in the quick-view dialog
    pub preview_id: Option<String>,
    /// Short-plot record, or a placeholder when the lookup failed
    pub preview: Option<MovieDetail>,
    pub is_loading_preview: bool,
}

#[derive(Debug, Default)]
struct SearchState {
    query: String,
    /// Query the accumulated results belong to
    active_query: Option<String>,
    status: String,
    results: Vec<SearchResultItem>,
    total_results: usize,
    page: u32,
    is_searching: bool,
    is_loading_more: bool,
    preview_id: Option<String>,
    preview: Option<MovieDetail>,
    is_loading_preview: bool,
}

impl SearchState {
    fn can_load_more(&self) -> bool {
        !self.results.is_empty() && self.total_results > self.results.len()
    }

    fn discard_results(&mut self) {
        self.results.clear();
        self.total_results = 0;
        self.page = 1;
        self.active_query = None;
    }
}

/// Search screen state plus the requests that feed it
///
/// Fetch sites with independent token lifetimes: the debounce timer, the
/// page-1 search, load-more and the quick-view preview. Cloning shares state
/// and sites.
#[derive(Clone)]
pub struct SearchSession {
    session_id: Uuid,
    provider: Arc<dyn MetadataProvider>,
    settings: PipelineSettings,
    state: Arc<RwLock<SearchState>>,
    debouncer: Debouncer,
    search_site: RequestController,
    load_more_site: RequestController,
    preview_site: RequestController,
}

impl SearchSession {
    pub fn new(provider: Arc<dyn MetadataProvider>, settings: PipelineSettings) -> Self {
        let state = SearchState {
            status: status::too_short(settings.min_query_length),
            page: 1,
            ..SearchState::default()
        };

        Self {
            session_id: Uuid::new_v4(),
            provider,
            settings,
            state: Arc::new(RwLock::new(state)),
            debouncer: Debouncer::new(settings.debounce),
            search_site: RequestController::new("search"),
            load_more_site: RequestController::new("load_more"),
            preview_site: RequestController::new("preview"),
        }
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub async fn snapshot(&self) -> SearchView {
        let state = self.state.read().await;
        SearchView {
            query: state.query.clone(),
            status: state.status.clone(),
            results: state.results.clone(),
            total_results: state.total_results,
            page: state.page,
            can_load_more: state.can_load_more(),
            is_searching: state.is_searching,
            is_loading_more: state.is_loading_more,
            preview_id: state.preview_id.clone(),
            preview: state.preview.clone(),
            is_loading_preview: state.is_loading_preview,
        }
    }

    /// Handles one keystroke worth of input
    ///
    /// Invalidates whatever was pending or in flight. Returns the debounced
    /// search task, or `None` when the input is too short to search.
    pub async fn set_query(&self, value: &str) -> Option<JoinHandle<Option<ResultPage>>> {
        // Token and debounce slot are claimed under the state lock so that
        // overlapping calls agree on which one is newest
        let (token, pending) = {
            let mut state = self.state.write().await;
            let token = self.search_site.begin();
            self.load_more_site.cancel();
            let pending = self.debouncer.push(value.trim().to_string());

            if !self.record_input(&mut state, value) {
                return None;
            }
            (token, pending)
        };

        let session = self.clone();
        Some(tokio::spawn(async move {
            let query = pending.settle().await?;
            session.run_search(&query, token).await
        }))
    }

    /// Searches `query` immediately, replacing the accumulated results
    pub async fn search(&self, query: &str) -> Option<ResultPage> {
        let token = {
            let mut state = self.state.write().await;
            self.debouncer.cancel();
            let token = self.search_site.begin();
            self.load_more_site.cancel();

            if !self.record_input(&mut state, query) {
                return None;
            }
            token
        };

        self.run_search(query.trim(), token).await
    }

    /// Fetches the next page of the active query and appends it
    ///
    /// No-op while another load-more is in flight or when everything the
    /// API declared has already been accumulated.
    pub async fn load_more(&self) -> Option<ResultPage> {
        let (query, next_page, token) = {
            let mut state = self.state.write().await;
            if state.is_loading_more || !state.can_load_more() {
                tracing::debug!(session = %self.session_id, "Load more skipped");
                return None;
            }
            let Some(query) = state.active_query.clone() else {
                return None;
            };
            state.is_loading_more = true;
            (query, state.page + 1, self.load_more_site.begin())
        };

        let result = token
            .run(async { self.provider.search_titles(&query, next_page).await })
            .await;

        let mut state = self.state.write().await;
        if !token.is_current() {
            tracing::debug!(
                session = %self.session_id,
                site = token.site(),
                generation = token.id(),
                "Discarding stale response"
            );
            return None;
        }

        match result {
            Ok(page) => {
                state.is_loading_more = false;
                state.results.extend(page.items.iter().cloned());
                state.page = next_page;
                let message = status::showing(state.results.len(), state.total_results);
                state.status = message;

                tracing::info!(
                    session = %self.session_id,
                    query = %query,
                    page = next_page,
                    shown = state.results.len(),
                    total = state.total_results,
                    "Loaded more results"
                );
                Some(page)
            }
            Err(e) => {
                match e.kind() {
                    ErrorKind::Cancelled => return None,
                    ErrorKind::ApiReported => {
                        state.status = status::no_more_results(e.api_message());
                    }
                    ErrorKind::Transport | ErrorKind::Internal => {
                        tracing::warn!(session = %self.session_id, error = %e, "Load more failed");
                        state.status = status::LOAD_MORE_NETWORK_ERROR.to_string();
                    }
                }
                state.is_loading_more = false;
                None
            }
        }
    }

    /// Opens the quick-view dialog for `id` with a short-plot lookup
    ///
    /// The dialog opens whatever the outcome: a failed lookup leaves a
    /// placeholder record in its place. Closing or reopening the dialog
    /// drops an in-flight lookup silently.
    pub async fn open_details(&self, id: &str) -> Option<MovieDetail> {
        let id = id.trim();
        if id.is_empty() {
            return None;
        }

        let token = {
            let mut state = self.state.write().await;
            let token = self.preview_site.begin();
            state.preview_id = Some(id.to_string());
            state.preview = None;
            state.is_loading_preview = true;
            token
        };

        let result = token
            .run(async { self.provider.lookup_title(id, PlotLength::Short).await })
            .await;

        let mut state = self.state.write().await;
        if !token.is_current() {
            tracing::debug!(
                session = %self.session_id,
                site = token.site(),
                generation = token.id(),
                "Discarding stale response"
            );
            return None;
        }

        let preview = match result {
            Ok(detail) => detail,
            Err(e) => match e.kind() {
                ErrorKind::Cancelled => return None,
                ErrorKind::ApiReported => MovieDetail::placeholder(
                    id,
                    status::PREVIEW_UNAVAILABLE,
                    e.api_message().unwrap_or(status::PREVIEW_NO_DETAILS),
                ),
                ErrorKind::Transport | ErrorKind::Internal => {
                    tracing::warn!(session = %self.session_id, title_id = %id, error = %e, "Preview lookup failed");
                    MovieDetail::placeholder(
                        id,
                        status::PREVIEW_NETWORK_ERROR,
                        status::PREVIEW_CHECK_CONNECTION,
                    )
                }
            },
        };

        state.preview = Some(preview.clone());
        state.is_loading_preview = false;
        Some(preview)
    }

    /// Closes the quick-view dialog, dropping any lookup still in flight
    pub async fn close_details(&self) {
        self.preview_site.cancel();
        let mut state = self.state.write().await;
        state.preview_id = None;
        state.preview = None;
        state.is_loading_preview = false;
    }

    /// Empties the input and results, cancelling everything outstanding
    pub async fn clear(&self) {
        self.cancel_all();
        let mut state = self.state.write().await;
        *state = SearchState {
            status: status::cleared(self.settings.min_query_length),
            page: 1,
            ..SearchState::default()
        };
    }

    /// Cancels outstanding requests when the owning view goes away
    pub fn close(&self) {
        self.cancel_all();
        tracing::debug!(session = %self.session_id, "Search session closed");
    }

    fn cancel_all(&self) {
        self.debouncer.cancel();
        self.search_site.cancel();
        self.load_more_site.cancel();
        self.preview_site.cancel();
    }

    /// Records the new input; false when there is nothing to fetch
    fn record_input(&self, state: &mut SearchState, value: &str) -> bool {
        let min_length = self.settings.min_query_length;
        state.query = value.to_string();
        state.total_results = 0;
        state.page = 1;
        state.is_loading_more = false;

        if value.trim().chars().count() < min_length {
            state.discard_results();
            state.is_searching = false;
            state.status = status::too_short(min_length);
            return false;
        }

        state.is_searching = true;
        state.status = status::SEARCHING.to_string();
        true
    }

    async fn run_search(&self, query: &str, token: RequestToken) -> Option<ResultPage> {
        let result = token
            .run(async { self.provider.search_titles(query, 1).await })
            .await;

        let mut state = self.state.write().await;
        if !token.is_current() {
            tracing::debug!(
                session = %self.session_id,
                site = token.site(),
                generation = token.id(),
                "Discarding stale response"
            );
            return None;
        }

        match result {
            Ok(page) => {
                state.is_searching = false;
                state.results = page.items.clone();
                state.total_results = page.total_results;
                state.page = page.page;
                state.active_query = Some(query.to_string());
                state.status = status::found(page.total_results, page.len());

                tracing::info!(
                    session = %self.session_id,
                    query = %query,
                    results = page.len(),
                    total = page.total_results,
                    provider = self.provider.name(),
                    "Search applied"
                );
                Some(page)
            }
            Err(e) => {
                match e.kind() {
                    ErrorKind::Cancelled => return None,
                    ErrorKind::ApiReported => {
                        state.status = status::search_failed(e.api_message());
                    }
                    ErrorKind::Transport | ErrorKind::Internal => {
                        tracing::warn!(session = %self.session_id, query = %query, error = %e, "Search failed");
                        state.status = status::NETWORK_ERROR.to_string();
                    }
                }
                state.is_searching = false;
                state.discard_results();
                None
            }
        }
    }
}
