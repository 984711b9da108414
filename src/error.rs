use thiserror::Error;

/// Why a lesson list could not be shown. Each is terminal for that mount.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("attribute {attribute} not found on #{container}")]
    MissingSource { container: String, attribute: String },

    #[error("invalid data path {path}: {source}")]
    InvalidPath {
        path: String,
        #[source]
        source: url::ParseError,
    },

    #[error("Falha ao carregar {path}. Status: {status}")]
    Status { path: String, status: u16 },

    #[error("{message}")]
    Transport { path: String, message: String },

    #[error(transparent)]
    Parse(#[from] serde_json::Error),
}

impl LoadError {
    /// Whether the fetch was never attempted.
    pub fn is_config(&self) -> bool {
        matches!(self, LoadError::MissingSource { .. } | LoadError::InvalidPath { .. })
    }
}
