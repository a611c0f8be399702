//! Error types for language packs and pack sources.

use std::path::PathBuf;
use thiserror::Error;

/// A language pack or language code rejected at registration time.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PackError {
    #[error("invalid language code: '{0}'")]
    InvalidLanguageCode(String),

    #[error("status text '{field}' must not be empty")]
    EmptyStatusText { field: &'static str },

    #[error("message for '{category}' in bucket '{bucket}' must not be empty")]
    EmptyCategoryMessage { bucket: &'static str, category: String },

    #[error("message for error code {code} must not be empty")]
    EmptyErrorMessage { code: u32 },
}

/// Failure while loading packs from a [`PackSource`](crate::i18n::PackSource).
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse language pack {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("language pack {path} rejected: {source}")]
    Invalid {
        path: PathBuf,
        #[source]
        source: PackError,
    },
}
