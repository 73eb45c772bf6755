//! Error types for the Jenkins launcher.

/// Top-level error type for a query-and-render run.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Jenkins API error: {0}")]
    Api(#[from] ApiError),

    #[error("Cache error: {0}")]
    Cache(#[from] CacheError),

    #[error("Output error: {0}")]
    Output(#[from] OutputError),
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {key}. {hint}")]
    MissingRequired { key: String, hint: String },

    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// Jenkins status-API errors.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Jenkins returned HTTP {status} for {url}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("Failed to decode Jenkins response: {0}")]
    Decode(#[source] reqwest::Error),
}

/// Query-cache errors. Only the write path surfaces errors; missing,
/// stale, or unreadable entries are cache misses.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("IO error on cache file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to encode cache entry: {0}")]
    Encode(#[source] serde_json::Error),
}

/// Launcher output errors.
#[derive(Debug, thiserror::Error)]
pub enum OutputError {
    #[error("Failed to encode launcher items: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("Failed to write launcher output: {0}")]
    Write(#[from] std::io::Error),
}

/// Result type alias for the launcher.
pub type Result<T> = std::result::Result<T, Error>;
