/// Title metadata provider abstraction
///
/// The pipeline only ever talks to the remote API through this trait, so
/// sessions can be driven by OMDb in production and by fakes in tests.
use crate::{
    error::AppResult,
    models::{MovieDetail, PlotLength, ResultPage},
};

pub mod omdb;

pub use omdb::OmdbProvider;

/// Trait for title metadata providers
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait MetadataProvider: Send + Sync {
    /// Search titles by free text
    ///
    /// `page` is 1-based. An API-reported failure (including "no results")
    /// comes back as `AppError::ApiReported`.
    async fn search_titles(&self, query: &str, page: u32) -> AppResult<ResultPage>;

    /// Fetch the full record for one external id
    async fn lookup_title(&self, id: &str, plot: PlotLength) -> AppResult<MovieDetail>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}
