pub mod detail;
pub mod omdb;
pub mod title;

pub use detail::{MovieDetail, PlotLength};
pub use omdb::{OmdbDetailResponse, OmdbSearchResponse};
pub use title::{RecommendationSet, ResultPage, SearchResultItem, TitleType};
