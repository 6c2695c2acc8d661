//! Error types for the recipe catalog.

use serde::Serialize;
use thiserror::Error;

/// Result type alias using the catalog's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for catalog operations.
///
/// Rejected filter input (bad numbers, unknown sort fields, unknown presets)
/// never becomes an `Error`; it is dropped where it is parsed.
#[derive(Error, Debug)]
pub enum Error {
    /// Store connection or query failed (wraps sqlx::Error)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Recipe not found
    #[error("Recipe with ID {0} not found")]
    RecipeNotFound(i64),

    /// Natural-language translator failed or returned nothing usable
    #[error("Translator error: {0}")]
    Translator(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// HTTP/network request failed
    #[error("Request error: {0}")]
    Request(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Coarse error class reported to callers so they can branch on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    NotFound,
    StoreUnavailable,
    TranslatorFailure,
    InvalidRequest,
    Internal,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::NotFound => "not_found",
            ErrorKind::StoreUnavailable => "store_unavailable",
            ErrorKind::TranslatorFailure => "translator_failure",
            ErrorKind::InvalidRequest => "invalid_request",
            ErrorKind::Internal => "internal",
        }
    }
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Database(sqlx::Error::RowNotFound) => ErrorKind::NotFound,
            Error::Database(_) => ErrorKind::StoreUnavailable,
            Error::NotFound(_) | Error::RecipeNotFound(_) => ErrorKind::NotFound,
            Error::Translator(_) | Error::Request(_) => ErrorKind::TranslatorFailure,
            Error::InvalidInput(_) => ErrorKind::InvalidRequest,
            Error::Serialization(_) | Error::Config(_) | Error::Internal(_) => ErrorKind::Internal,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::Request(e.to_string())
    }
}
