//! Fixtures and a scripted provider shared by the session tests.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
    time::Duration,
};

use chrono::Utc;

use crate::{
    error::{AppError, AppResult},
    models::{MovieDetail, PlotLength, ResultPage, SearchResultItem, TitleType},
    services::providers::MetadataProvider,
};

pub(crate) fn item(id: &str) -> SearchResultItem {
    SearchResultItem {
        id: id.to_string(),
        title: format!("Title {}", id),
        year: "2001".to_string(),
        poster_url: None,
        title_type: TitleType::Movie,
    }
}

/// `count` items with ids `{prefix}0`, `{prefix}1`, ...
pub(crate) fn items(prefix: &str, count: usize) -> Vec<SearchResultItem> {
    (0..count).map(|i| item(&format!("{}{}", prefix, i))).collect()
}

pub(crate) fn page(items: Vec<SearchResultItem>, total_results: usize, page: u32) -> ResultPage {
    ResultPage::new(items, total_results, page)
}

pub(crate) fn detail(
    id: &str,
    title: &str,
    director: Option<&str>,
    genre: Option<&str>,
) -> MovieDetail {
    MovieDetail {
        id: id.to_string(),
        title: title.to_string(),
        plot: Some("A plot.".to_string()),
        poster_url: None,
        year: Some("2001".to_string()),
        rated: None,
        runtime: None,
        genre: genre.map(str::to_string),
        director: director.map(str::to_string),
        actors: None,
        rating: None,
        fetched_at: Utc::now(),
    }
}

#[derive(Clone, Debug)]
pub(crate) enum Reply<T> {
    Ok(T),
    ApiError(Option<String>),
    Transport,
}

impl<T> Reply<T> {
    fn into_result(self) -> AppResult<T> {
        match self {
            Reply::Ok(value) => Ok(value),
            Reply::ApiError(message) => Err(AppError::ApiReported(message)),
            Reply::Transport => Err(AppError::ExternalApi(
                "OMDb API returned status 503 Service Unavailable".to_string(),
            )),
        }
    }
}

/// Provider whose replies and latencies are fixed up front
///
/// A call is recorded when its future is first polled, i.e. when the
/// request would hit the wire. Unscripted searches answer "Movie not found!".
#[derive(Default)]
pub(crate) struct ScriptedProvider {
    searches: HashMap<(String, u32), (Duration, Reply<ResultPage>)>,
    lookups: HashMap<String, (Duration, Reply<MovieDetail>)>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedProvider {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn search(
        mut self,
        query: &str,
        page: u32,
        delay: Duration,
        reply: Reply<ResultPage>,
    ) -> Self {
        self.searches
            .insert((query.to_string(), page), (delay, reply));
        self
    }

    pub(crate) fn lookup(mut self, id: &str, delay: Duration, reply: Reply<MovieDetail>) -> Self {
        self.lookups.insert(id.to_string(), (delay, reply));
        self
    }

    pub(crate) fn shared(self) -> Arc<Self> {
        Arc::new(self)
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl MetadataProvider for ScriptedProvider {
    async fn search_titles(&self, query: &str, page: u32) -> AppResult<ResultPage> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("search:{}:{}", query, page));

        let (delay, reply) = self
            .searches
            .get(&(query.to_string(), page))
            .cloned()
            .unwrap_or((
                Duration::ZERO,
                Reply::ApiError(Some("Movie not found!".to_string())),
            ));

        tokio::time::sleep(delay).await;
        reply.into_result()
    }

    async fn lookup_title(&self, id: &str, _plot: PlotLength) -> AppResult<MovieDetail> {
        self.calls.lock().unwrap().push(format!("lookup:{}", id));

        let (delay, reply) = self.lookups.get(id).cloned().unwrap_or((
            Duration::ZERO,
            Reply::ApiError(Some("Incorrect IMDb ID.".to_string())),
        ));

        tokio::time::sleep(delay).await;
        reply.into_result()
    }

    fn name(&self) -> &'static str {
        "scripted"
    }
}
