use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("No taxonomy records found: every row was empty or missing a category, subcategory or item name")]
    DataEmpty,

    #[error("Failed to load taxonomy data from {}: {source}", path.display())]
    DataFetchFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    #[error("Configuration JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// True for failures that mean "the file was read, but holds nothing usable".
    pub fn is_data_empty(&self) -> bool {
        matches!(self, Self::DataEmpty)
    }
}
