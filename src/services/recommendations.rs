use std::collections::HashSet;

use crate::{
    error::{AppResult, ErrorKind},
    models::{MovieDetail, RecommendationSet, SearchResultItem},
    services::{cancellation::RequestToken, providers::MetadataProvider},
};

/// Keyword searches stop once the pool holds this many candidates
const POOL_TARGET: usize = 8;
const MAX_KEYWORDS: usize = 6;
const MAX_RECOMMENDATIONS: usize = 5;

/// Title words worth searching: alphanumeric runs longer than two characters
pub fn keyword_candidates(title: &str) -> Vec<String> {
    title
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|word| word.len() > 2)
        .take(MAX_KEYWORDS)
        .map(str::to_string)
        .collect()
}

/// Last whitespace-delimited token of the director field
pub fn director_surname(director: &str) -> Option<&str> {
    director.split_whitespace().last()
}

/// Text before the first comma of the genre field
pub fn primary_genre(genre: &str) -> Option<&str> {
    genre
        .split(',')
        .next()
        .map(str::trim)
        .filter(|g| !g.is_empty())
}

/// Drops the subject and repeated ids, keeping first occurrences, capped at 5
pub fn finalize(pool: Vec<SearchResultItem>, subject_id: &str) -> RecommendationSet {
    let mut seen = HashSet::new();
    let items = pool
        .into_iter()
        .filter(|item| !item.id.is_empty() && item.id != subject_id)
        .filter(|item| seen.insert(item.id.clone()))
        .take(MAX_RECOMMENDATIONS)
        .collect();

    RecommendationSet { items }
}

/// One step of the chain; an API-reported failure is just an empty batch
async fn search_batch(
    provider: &dyn MetadataProvider,
    query: &str,
    token: &RequestToken,
) -> AppResult<Vec<SearchResultItem>> {
    match token
        .run(async { provider.search_titles(query, 1).await })
        .await
    {
        Ok(page) => Ok(page.items),
        Err(e) if e.kind() == ErrorKind::ApiReported => Ok(Vec::new()),
        Err(e) => Err(e),
    }
}

/// Derives recommendations for `detail` by re-searching the metadata API
///
/// Fallback chain, each step tried only while the pool is still empty:
/// keywords from the title, the director's surname, then the first genre.
/// Transport failures and cancellation end the chain with an error.
pub async fn recommend(
    provider: &dyn MetadataProvider,
    detail: &MovieDetail,
    token: &RequestToken,
) -> AppResult<RecommendationSet> {
    let mut pool: Vec<SearchResultItem> = Vec::new();

    for keyword in keyword_candidates(&detail.title) {
        pool.extend(search_batch(provider, &keyword, token).await?);
        if pool.len() >= POOL_TARGET {
            break;
        }
    }

    if pool.is_empty() {
        if let Some(surname) = detail.director.as_deref().and_then(director_surname) {
            tracing::debug!(subject = %detail.id, surname = %surname, "Falling back to director search");
            pool.extend(search_batch(provider, surname, token).await?);
        }
    }

    if pool.is_empty() {
        if let Some(genre) = detail.genre.as_deref().and_then(primary_genre) {
            tracing::debug!(subject = %detail.id, genre = %genre, "Falling back to genre search");
            pool.extend(search_batch(provider, genre, token).await?);
        }
    }

    let candidates = pool.len();
    let recommendations = finalize(pool, &detail.id);

    tracing::info!(
        subject = %detail.id,
        candidates = candidates,
        recommendations = recommendations.len(),
        provider = provider.name(),
        "Recommendations derived"
    );

    Ok(recommendations)
}
