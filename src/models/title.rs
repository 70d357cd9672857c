use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kind of title as reported by the metadata API
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TitleType {
    Movie,
    Series,
    Episode,
    Game,
    #[serde(other)]
    Unknown,
}

impl TitleType {
    pub(crate) fn parse(raw: &str) -> Self {
        match raw.to_lowercase().as_str() {
            "movie" => TitleType::Movie,
            "series" => TitleType::Series,
            "episode" => TitleType::Episode,
            "game" => TitleType::Game,
            _ => TitleType::Unknown,
        }
    }
}

/// One entry of a title search
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchResultItem {
    /// External id (IMDb id, e.g. "tt0232500")
    pub id: String,
    pub title: String,
    pub year: String,
    pub poster_url: Option<String>,
    pub title_type: TitleType,
}

/// One page of title search results
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResultPage {
    pub items: Vec<SearchResultItem>,
    /// Total matches declared by the API, across all pages
    pub total_results: usize,
    /// 1-based page number
    pub page: u32,
    pub fetched_at: DateTime<Utc>,
}

impl ResultPage {
    pub fn new(items: Vec<SearchResultItem>, total_results: usize, page: u32) -> Self {
        Self {
            items,
            total_results,
            page,
            fetched_at: Utc::now(),
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Titles suggested alongside a detail view
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RecommendationSet {
    pub items: Vec<SearchResultItem>,
}

impl RecommendationSet {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn ids(&self) -> Vec<&str> {
        self.items.iter().map(|item| item.id.as_str()).collect()
    }
}
