/// OMDb API provider
///
/// Both operations hit the same endpoint and are distinguished by query
/// parameters:
/// 1. Title Search: `?s={query}&page={n}` → up to 10 items plus a string total
/// 2. Lookup: `?i={imdb_id}&plot={short|full}` → a single record
///
/// Failures are signalled in-band with `"Response": "False"` and an `Error`
/// message, which is mapped to `AppError::ApiReported`.
use crate::{
    config::Config,
    error::{AppError, AppResult},
    models::{MovieDetail, OmdbDetailResponse, OmdbSearchResponse, PlotLength, ResultPage},
    services::providers::MetadataProvider,
};
use reqwest::Client as HttpClient;
use serde::de::DeserializeOwned;

#[derive(Clone)]
pub struct OmdbProvider {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
}

impl OmdbProvider {
    pub fn new(api_key: String, api_url: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_key,
            api_url,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.omdb_api_key.clone(), config.omdb_api_url.clone())
    }

    fn endpoint(&self) -> String {
        format!("{}/", self.api_url.trim_end_matches('/'))
    }

    async fn get<T: DeserializeOwned>(&self, params: &[(&str, &str)]) -> AppResult<T> {
        let response = self
            .http_client
            .get(self.endpoint())
            .query(&[("apikey", self.api_key.as_str())])
            .query(params)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "OMDb API returned status {}: {}",
                status, body
            )));
        }

        Ok(response.json::<T>().await?)
    }
}

#[async_trait::async_trait]
impl MetadataProvider for OmdbProvider {
    async fn search_titles(&self, query: &str, page: u32) -> AppResult<ResultPage> {
        if query.trim().is_empty() {
            return Err(AppError::InvalidInput(
                "Search query cannot be empty".to_string(),
            ));
        }

        let page_param = page.max(1).to_string();
        let response: OmdbSearchResponse = self
            .get(&[("s", query.trim()), ("page", page_param.as_str())])
            .await?;
        let result = response.into_page(page.max(1));

        if let Ok(result_page) = &result {
            tracing::info!(
                query = %query,
                page = page,
                results = result_page.len(),
                total = result_page.total_results,
                provider = self.name(),
                "Title search completed"
            );
        }

        result
    }

    async fn lookup_title(&self, id: &str, plot: PlotLength) -> AppResult<MovieDetail> {
        if id.trim().is_empty() {
            return Err(AppError::InvalidInput("Title id cannot be empty".to_string()));
        }

        let response: OmdbDetailResponse = self
            .get(&[("i", id.trim()), ("plot", plot.as_str())])
            .await?;
        let detail = response.into_detail(id.trim())?;

        tracing::info!(
            title_id = %detail.id,
            provider = self.name(),
            "Title lookup completed"
        );

        Ok(detail)
    }

    fn name(&self) -> &'static str {
        "omdb"
    }
}
