// Error types for the reports application.
// Covers HTTP-status failures, connectivity failures, and configuration errors.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportsError {
    #[error("No user found with the name '{0}'")]
    NonexistentUser(String),

    #[error(
        "Authentication failed. Please configure a valid access token in the \
         GITHUB_TOKEN environment variable."
    )]
    AuthenticationFailure,

    #[error("Request failed: {0}")]
    RequestFailure(String),

    #[error("Could not create content: {0}")]
    ContentCreation(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Pagination of '{url}' failed with status {status}")]
    PaginationFailed { url: String, status: u16 },

    #[error("Connection error: {0}")]
    Connection(#[from] reqwest::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ReportsError>;
