//! Status text announced by the view layer after each fetch.

pub const SEARCHING: &str = "Searching…";
pub const NO_RESULTS: &str = "No results found.";
pub const NETWORK_ERROR: &str = "Network error. Check your connection.";
pub const LOAD_MORE_NETWORK_ERROR: &str = "Network error while loading more.";
pub const LOADING_DETAIL: &str = "Loading…";
pub const DETAIL_UNAVAILABLE: &str = "Unable to load movie.";
pub const DETAIL_NETWORK_ERROR: &str = "Network error while loading movie.";
pub const MISSING_DETAIL_ID: &str = "No movie id provided.";

// Quick-view placeholders: title, then plot
pub const PREVIEW_UNAVAILABLE: &str = "Details unavailable";
pub const PREVIEW_NO_DETAILS: &str = "No details available.";
pub const PREVIEW_NETWORK_ERROR: &str = "Network error";
pub const PREVIEW_CHECK_CONNECTION: &str = "Please check your connection and try again.";

fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{} {}", count, noun)
    } else {
        format!("{} {}s", count, noun)
    }
}

pub fn too_short(min_query_length: usize) -> String {
    format!("Type at least {} characters to search.", min_query_length)
}

pub fn cleared(min_query_length: usize) -> String {
    format!("Cleared. {}", too_short(min_query_length))
}

/// Status after the first page of a search arrives
pub fn found(total_results: usize, shown: usize) -> String {
    if total_results > 0 {
        format!("Found {}. Showing {}.", plural(total_results, "result"), shown)
    } else {
        format!("Found {}.", plural(shown, "result"))
    }
}

/// Status after another page has been appended
pub fn showing(shown: usize, total_results: usize) -> String {
    format!("Showing {} of {}.", shown, total_results)
}

/// Initial search came back empty or the API reported a failure
pub fn search_failed(api_message: Option<&str>) -> String {
    api_message.unwrap_or(NO_RESULTS).to_string()
}

/// Load-more ran past the end, as reported by the API
pub fn no_more_results(api_message: Option<&str>) -> String {
    match api_message {
        Some(message) => format!("No more results. ({})", message),
        None => "No more results.".to_string(),
    }
}

pub fn detail_failed(api_message: Option<&str>) -> String {
    api_message.unwrap_or(DETAIL_UNAVAILABLE).to_string()
}
