//! Error types for the BEA API client.

use thiserror::Error;

/// Errors that can occur when using the BEA API.
#[derive(Debug, Error)]
pub enum BeaError {
    /// Missing or empty API key.
    #[error("BEA_API_TOKEN environment variable not set or empty")]
    MissingApiKey,

    /// The configured base URL could not be parsed.
    #[error("Invalid base URL {url:?}: {reason}")]
    InvalidBaseUrl {
        /// The rejected URL.
        url: String,
        /// Parser message.
        reason: String,
    },

    /// A caller-supplied parameter would override a key the client sets itself.
    #[error("Parameter {0:?} is reserved and set by the client")]
    ReservedParameter(String),

    /// HTTP request failed before a response was received.
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Server answered with a non-success status and no BEA error payload.
    #[error("HTTP {status}: {body}")]
    Http {
        /// Response status code.
        status: u16,
        /// Raw response body.
        body: String,
    },

    /// JSON parsing failed.
    #[error("Failed to parse JSON response: {0}")]
    Json(#[from] serde_json::Error),

    /// API returned an error payload.
    #[error("BEA API error: {description}")]
    Api {
        /// `APIErrorCode`, when present.
        code: Option<String>,
        /// `APIErrorDescription`.
        description: String,
        /// `AdditionalDetail`, pretty-printed.
        detail: Option<String>,
    },

    /// The response decoded but lacked an expected node.
    #[error("Unexpected response shape: {0}")]
    UnexpectedShape(String),

    /// Building a result table failed.
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),
}
