use thiserror::Error;

#[derive(Error, Debug)]
pub enum BrufileError {
    #[error("API request failed: {0}")]
    Api(#[from] reqwest::Error),

    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Formula not found: {0}")]
    FormulaNotFound(String),

    #[error("Cask not found: {0}")]
    CaskNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid line pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("Invalid Brewfile location: {0}")]
    InvalidLocation(String),

    #[error("Command failed: {0}")]
    CommandFailed(String),

    #[error("Error: {0}")]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, BrufileError>;
