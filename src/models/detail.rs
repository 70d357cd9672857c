use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// How much plot text a lookup should return
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PlotLength {
    Short,
    #[default]
    Full,
}

impl PlotLength {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlotLength::Short => "short",
            PlotLength::Full => "full",
        }
    }
}

/// Full record for a single title, fetched per detail view
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieDetail {
    pub id: String,
    pub title: String,
    pub plot: Option<String>,
    pub poster_url: Option<String>,
    pub year: Option<String>,
    pub rated: Option<String>,
    pub runtime: Option<String>,
    pub genre: Option<String>,
    pub director: Option<String>,
    pub actors: Option<String>,
    /// IMDb rating as reported, e.g. "7.9"
    pub rating: Option<String>,
    pub fetched_at: DateTime<Utc>,
}

impl MovieDetail {
    /// Stand-in record shown when a lookup fails; only title and plot are set
    pub fn placeholder(id: &str, title: &str, plot: &str) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            plot: Some(plot.to_string()),
            poster_url: None,
            year: None,
            rated: None,
            runtime: None,
            genre: None,
            director: None,
            actors: None,
            rating: None,
            fetched_at: Utc::now(),
        }
    }

    /// Year, rating, runtime and genre joined for a one-line summary
    pub fn meta_line(&self) -> String {
        [&self.year, &self.rated, &self.runtime, &self.genre]
            .into_iter()
            .filter_map(|field| field.as_deref())
            .collect::<Vec<_>>()
            .join(" · ")
    }
}
