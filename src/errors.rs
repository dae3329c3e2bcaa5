//! Typed error hierarchy for the admin client.
//!
//! Two enums cover the two failure surfaces:
//! - `ClientError`: REST calls against the backend
//! - `ConfigError`: loading and layering configuration

use thiserror::Error;

/// Errors from the REST client.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("{resource} {id} not found")]
    NotFound { resource: &'static str, id: i64 },

    #[error("Backend returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Not signed in or credentials rejected")]
    Unauthorized,

    #[error("Request failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("Failed to decode {resource} response: {source}")]
    Decode {
        resource: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("Cannot update a {resource} record without an identifier")]
    MissingIdentifier { resource: &'static str },

    #[error("Invalid base URL '{url}'")]
    InvalidBaseUrl { url: String },
}

impl ClientError {
    /// True for the not-found case, which resolvers turn into a redirect.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Errors from configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {source}")]
    Read {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    Parse {
        path: std::path::PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}
