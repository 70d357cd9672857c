/// Coarse classification of pipeline failures
///
/// Fetch sites branch on this rather than on individual variants when
/// deciding which status text to surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The API answered but its payload signals failure
    ApiReported,
    /// Network unreachable, non-2xx status or an unparseable payload
    Transport,
    /// A newer request superseded this one; never surfaced
    Cancelled,
    /// Local failures (preference storage, invalid input)
    Internal,
}

/// Application-level errors
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("External API error: {0}")]
    ExternalApi(String),

    #[error("API reported failure: {}", .0.as_deref().unwrap_or("no message"))]
    ApiReported(Option<String>),

    #[error("Request cancelled")]
    Cancelled,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Preference storage error: {0}")]
    Storage(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl AppError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::HttpClient(_) | AppError::ExternalApi(_) => ErrorKind::Transport,
            AppError::ApiReported(_) => ErrorKind::ApiReported,
            AppError::Cancelled => ErrorKind::Cancelled,
            AppError::InvalidInput(_) | AppError::Storage(_) | AppError::Serialization(_) => {
                ErrorKind::Internal
            }
        }
    }

    /// Message supplied by the API, if this is an API-reported failure
    pub fn api_message(&self) -> Option<&str> {
        match self {
            AppError::ApiReported(message) => message.as_deref(),
            _ => None,
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
