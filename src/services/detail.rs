use std::sync::Arc;

use serde::Serialize;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{
    error::ErrorKind,
    models::{MovieDetail, PlotLength, RecommendationSet},
    services::{
        cancellation::{RequestController, RequestToken},
        providers::MetadataProvider,
        recommendations, status,
    },
};

/// What the view layer renders for a detail screen
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct DetailView {
    pub id: Option<String>,
    /// Empty once the detail has loaded
    pub status: String,
    pub movie: Option<MovieDetail>,
    pub recommendations: RecommendationSet,
    pub is_loading_recommendations: bool,
}

/// Detail screen state: one title plus titles derived from it
///
/// The detail lookup and the recommendation chain own separate token
/// lifetimes; loading a new id or closing the view cancels both.
#[derive(Clone)]
pub struct DetailSession {
    session_id: Uuid,
    provider: Arc<dyn MetadataProvider>,
    state: Arc<RwLock<DetailView>>,
    detail_site: RequestController,
    recommendation_site: RequestController,
}

impl DetailSession {
    pub fn new(provider: Arc<dyn MetadataProvider>) -> Self {
        Self {
            session_id: Uuid::new_v4(),
            provider,
            state: Arc::new(RwLock::new(DetailView::default())),
            detail_site: RequestController::new("detail"),
            recommendation_site: RequestController::new("recommendations"),
        }
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub async fn snapshot(&self) -> DetailView {
        self.state.read().await.clone()
    }

    /// Loads `id` with the full plot, then derives recommendations for it
    pub async fn load(&self, id: &str) -> Option<MovieDetail> {
        let id = id.trim();
        let token = self.detail_site.begin();
        self.recommendation_site.cancel();

        {
            let mut state = self.state.write().await;
            if !token.is_current() {
                return None;
            }
            *state = DetailView {
                id: Some(id.to_string()).filter(|id| !id.is_empty()),
                status: status::LOADING_DETAIL.to_string(),
                ..DetailView::default()
            };
            if id.is_empty() {
                state.status = status::MISSING_DETAIL_ID.to_string();
                return None;
            }
        }

        let result = token
            .run(async { self.provider.lookup_title(id, PlotLength::Full).await })
            .await;

        let detail = {
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
                Ok(detail) => {
                    state.movie = Some(detail.clone());
                    state.status.clear();
                    detail
                }
                Err(e) => {
                    match e.kind() {
                        ErrorKind::Cancelled => {}
                        ErrorKind::ApiReported => {
                            state.status = status::detail_failed(e.api_message());
                        }
                        ErrorKind::Transport | ErrorKind::Internal => {
                            tracing::warn!(session = %self.session_id, title_id = %id, error = %e, "Detail load failed");
                            state.status = status::DETAIL_NETWORK_ERROR.to_string();
                        }
                    }
                    return None;
                }
            }
        };

        tracing::info!(session = %self.session_id, title_id = %detail.id, "Detail loaded");

        self.derive(&detail, Some(&token)).await;
        Some(detail)
    }

    /// Runs the recommendation chain for `detail`, superseding any running one
    pub async fn recommend(&self, detail: &MovieDetail) -> Option<RecommendationSet> {
        self.derive(detail, None).await
    }

    /// Cancels outstanding requests when the owning view goes away
    pub fn close(&self) {
        self.detail_site.cancel();
        self.recommendation_site.cancel();
        tracing::debug!(session = %self.session_id, "Detail session closed");
    }

    /// `parent` is the detail load that triggered the chain, if any; its
    /// result is dropped once that load is no longer current either
    async fn derive(
        &self,
        detail: &MovieDetail,
        parent: Option<&RequestToken>,
    ) -> Option<RecommendationSet> {
        let token = self.recommendation_site.begin();
        {
            let mut state = self.state.write().await;
            if !token.is_current() || parent.is_some_and(|p| !p.is_current()) {
                return None;
            }
            state.recommendations = RecommendationSet::default();
            state.is_loading_recommendations = true;
        }

        let result = recommendations::recommend(self.provider.as_ref(), detail, &token).await;

        let mut state = self.state.write().await;
        if !token.is_current() || parent.is_some_and(|p| !p.is_current()) {
            tracing::debug!(
                session = %self.session_id,
                site = token.site(),
                generation = token.id(),
                "Discarding stale response"
            );
            return None;
        }

        state.is_loading_recommendations = false;
        match result {
            Ok(set) => {
                state.recommendations = set.clone();
                Some(set)
            }
            Err(e) => {
                if e.kind() != ErrorKind::Cancelled {
                    tracing::warn!(session = %self.session_id, subject = %detail.id, error = %e, "Recommendations failed");
                }
                state.recommendations = RecommendationSet::default();
                None
            }
        }
    }
}
