// ============================================================================
// OMDb API Types
// ============================================================================

use serde::Deserialize;

use crate::{
    error::{AppError, AppResult},
    models::{MovieDetail, ResultPage, SearchResultItem, TitleType},
};

/// OMDb uses "N/A" for absent values
fn present(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty() && v != "N/A")
}

fn is_success(flag: &str) -> bool {
    flag.eq_ignore_ascii_case("true")
}

/// Raw response from `?s=...&page=...`
#[derive(Debug, Clone, Deserialize)]
pub struct OmdbSearchResponse {
    #[serde(rename = "Response")]
    pub response: String,
    #[serde(rename = "Search", default)]
    pub search: Option<Vec<OmdbSearchItem>>,
    #[serde(rename = "totalResults", default)]
    pub total_results: Option<String>,
    #[serde(rename = "Error", default)]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OmdbSearchItem {
    #[serde(rename = "imdbID")]
    pub imdb_id: String,
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Year", default)]
    pub year: String,
    #[serde(rename = "Type", default)]
    pub title_type: String,
    #[serde(rename = "Poster", default)]
    pub poster: Option<String>,
}

impl From<OmdbSearchItem> for SearchResultItem {
    fn from(item: OmdbSearchItem) -> Self {
        SearchResultItem {
            id: item.imdb_id,
            title: item.title,
            year: item.year,
            poster_url: present(item.poster),
            title_type: TitleType::parse(&item.title_type),
        }
    }
}

impl OmdbSearchResponse {
    /// Converts the payload into a page, or the API-reported failure
    ///
    /// An unparseable total falls back to the page length. A successful
    /// response with no items is treated as "no results".
    pub fn into_page(self, page: u32) -> AppResult<ResultPage> {
        if !is_success(&self.response) {
            return Err(AppError::ApiReported(present(self.error)));
        }

        let items: Vec<SearchResultItem> = match self.search {
            Some(items) if !items.is_empty() => {
                items.into_iter().map(SearchResultItem::from).collect()
            }
            _ => return Err(AppError::ApiReported(present(self.error))),
        };

        let total_results = self
            .total_results
            .as_deref()
            .and_then(|raw| raw.trim().parse::<usize>().ok())
            .unwrap_or(items.len());

        Ok(ResultPage::new(items, total_results, page))
    }
}

/// Raw response from `?i=...&plot=...`
#[derive(Debug, Clone, Deserialize)]
pub struct OmdbDetailResponse {
    #[serde(rename = "Response")]
    pub response: String,
    #[serde(rename = "Error", default)]
    pub error: Option<String>,
    #[serde(rename = "imdbID", default)]
    pub imdb_id: Option<String>,
    #[serde(rename = "Title", default)]
    pub title: Option<String>,
    #[serde(rename = "Plot", default)]
    pub plot: Option<String>,
    #[serde(rename = "Poster", default)]
    pub poster: Option<String>,
    #[serde(rename = "Year", default)]
    pub year: Option<String>,
    #[serde(rename = "Rated", default)]
    pub rated: Option<String>,
    #[serde(rename = "Runtime", default)]
    pub runtime: Option<String>,
    #[serde(rename = "Genre", default)]
    pub genre: Option<String>,
    #[serde(rename = "Director", default)]
    pub director: Option<String>,
    #[serde(rename = "Actors", default)]
    pub actors: Option<String>,
    #[serde(rename = "imdbRating", default)]
    pub imdb_rating: Option<String>,
}

impl OmdbDetailResponse {
    /// `requested_id` fills in the id when the payload omits it
    pub fn into_detail(self, requested_id: &str) -> AppResult<MovieDetail> {
        if !is_success(&self.response) {
            return Err(AppError::ApiReported(present(self.error)));
        }

        Ok(MovieDetail {
            id: present(self.imdb_id).unwrap_or_else(|| requested_id.to_string()),
            title: self.title.unwrap_or_default(),
            plot: present(self.plot),
            poster_url: present(self.poster),
            year: present(self.year),
            rated: present(self.rated),
            runtime: present(self.runtime),
            genre: present(self.genre),
            director: present(self.director),
            actors: present(self.actors),
            rating: present(self.imdb_rating),
            fetched_at: chrono::Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_search_response_deserialization() {
        let json = r#"{
            "Search": [
                {"Title": "Fast Five", "Year": "2011", "imdbID": "tt1596343", "Type": "movie", "Poster": "https://m.media-amazon.com/images/fast5.jpg"},
                {"Title": "Fast & Furious", "Year": "2009", "imdbID": "tt1013752", "Type": "movie", "Poster": "N/A"}
            ],
            "totalResults": "12",
            "Response": "True"
        }"#;

        let response: OmdbSearchResponse = serde_json::from_str(json).unwrap();
        let page = response.into_page(1).unwrap();

        assert_eq!(page.total_results, 12);
        assert_eq!(page.page, 1);
        assert_eq!(page.len(), 2);
        assert_eq!(page.items[0].id, "tt1596343");
        assert_eq!(
            page.items[0].poster_url.as_deref(),
            Some("https://m.media-amazon.com/images/fast5.jpg")
        );
        assert_eq!(page.items[0].title_type, TitleType::Movie);
        assert_eq!(page.items[1].poster_url, None);
    }

    #[test]
    fn test_search_response_unparseable_total_uses_page_length() {
        let json = r#"{
            "Search": [{"Title": "Heat", "Year": "1995", "imdbID": "tt0113277", "Type": "movie", "Poster": "N/A"}],
            "totalResults": "lots",
            "Response": "True"
        }"#;

        let response: OmdbSearchResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.into_page(1).unwrap().total_results, 1);
    }

    #[test]
    fn test_search_response_api_error() {
        let json = r#"{"Response": "False", "Error": "Movie not found!"}"#;

        let response: OmdbSearchResponse = serde_json::from_str(json).unwrap();
        let err = response.into_page(1).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::ApiReported);
        assert_eq!(err.api_message(), Some("Movie not found!"));
    }

    #[test]
    fn test_search_response_success_without_items() {
        let json = r#"{"Response": "True", "Search": [], "totalResults": "0"}"#;

        let response: OmdbSearchResponse = serde_json::from_str(json).unwrap();
        let err = response.into_page(1).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::ApiReported);
        assert_eq!(err.api_message(), None);
    }

    #[test]
    fn test_detail_response_conversion() {
        let json = r#"{
            "Title": "The Fast and the Furious",
            "Year": "2001",
            "Rated": "PG-13",
            "Runtime": "106 min",
            "Genre": "Action, Crime, Thriller",
            "Director": "Rob Cohen",
            "Actors": "Paul Walker, Vin Diesel, Michelle Rodriguez",
            "Plot": "Los Angeles police officer Brian O'Conner must decide where his loyalty really lies.",
            "Poster": "N/A",
            "imdbRating": "6.8",
            "imdbID": "tt0232500",
            "Response": "True"
        }"#;

        let response: OmdbDetailResponse = serde_json::from_str(json).unwrap();
        let detail = response.into_detail("tt0232500").unwrap();

        assert_eq!(detail.id, "tt0232500");
        assert_eq!(detail.title, "The Fast and the Furious");
        assert_eq!(detail.director.as_deref(), Some("Rob Cohen"));
        assert_eq!(detail.genre.as_deref(), Some("Action, Crime, Thriller"));
        assert_eq!(detail.rating.as_deref(), Some("6.8"));
        assert_eq!(detail.poster_url, None);
    }

    #[test]
    fn test_detail_response_na_fields_and_missing_id() {
        let json = r#"{"Title": "Obscure Short", "Director": "N/A", "Genre": "", "Response": "True"}"#;

        let response: OmdbDetailResponse = serde_json::from_str(json).unwrap();
        let detail = response.into_detail("tt9999999").unwrap();

        assert_eq!(detail.id, "tt9999999");
        assert_eq!(detail.director, None);
        assert_eq!(detail.genre, None);
    }

    #[test]
    fn test_detail_response_api_error() {
        let json = r#"{"Response": "False", "Error": "Incorrect IMDb ID."}"#;

        let response: OmdbDetailResponse = serde_json::from_str(json).unwrap();
        let err = response.into_detail("bogus").unwrap_err();

        assert_eq!(err.api_message(), Some("Incorrect IMDb ID."));
    }
}
