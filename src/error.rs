// src/error.rs
//! Application error types with structured error handling.
//!
//! The traversal-facing kinds (`InvalidReference`, `ResourceNotFound`,
//! `PartialObject`, `RemoteFetch`, `NoDataSource`) name what went wrong for
//! which resource. The remaining variants are the raw material the HTTP
//! layer produces before a failure is attributed to a reference.

use crate::types::{NotionId, ValidationError};
use std::fmt;
use thiserror::Error;

/// Notion API error codes as a typed vocabulary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotionErrorCode {
    /// API rate limit exceeded; back off and retry
    RateLimited,
    /// The requested object does not exist or is not shared with the integration
    ObjectNotFound,
    /// API token is invalid or expired
    Unauthorized,
    /// API token lacks permission for this resource
    RestrictedResource,
    InvalidJson,
    /// Request parameters failed Notion's validation
    ValidationFailed,
    Conflict,
    InternalError,
    ServiceUnavailable,
    /// HTTP status code fallback when the error body is unparseable
    HttpStatus(u16),
    /// An error code this client doesn't recognize yet
    Unknown(String),
}

impl NotionErrorCode {
    pub fn from_api_response(code: &str) -> Self {
        match code {
            "rate_limited" => Self::RateLimited,
            "object_not_found" => Self::ObjectNotFound,
            "unauthorized" => Self::Unauthorized,
            "restricted_resource" => Self::RestrictedResource,
            "invalid_json" => Self::InvalidJson,
            "validation_error" => Self::ValidationFailed,
            "conflict_error" => Self::Conflict,
            "internal_server_error" => Self::InternalError,
            "service_unavailable" => Self::ServiceUnavailable,
            other => Self::Unknown(other.to_string()),
        }
    }

    /// Create from an HTTP status code when the error body is unparseable.
    pub fn from_http_status(status: u16) -> Self {
        match status {
            404 => Self::ObjectNotFound,
            429 => Self::RateLimited,
            other => Self::HttpStatus(other),
        }
    }

    /// Whether this error is transient and worth retrying.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::RateLimited | Self::ServiceUnavailable | Self::InternalError => true,
            Self::HttpStatus(status) => *status >= 500,
            _ => false,
        }
    }

    /// Whether a lookup failing with this code means "no such resource for
    /// this caller": it does not exist, is not shared, or is not of the
    /// kind the endpoint serves.
    pub fn is_missing_resource(&self) -> bool {
        matches!(
            self,
            Self::ObjectNotFound | Self::RestrictedResource | Self::ValidationFailed
        )
    }
}

impl fmt::Display for NotionErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RateLimited => write!(f, "rate_limited"),
            Self::ObjectNotFound => write!(f, "object_not_found"),
            Self::Unauthorized => write!(f, "unauthorized"),
            Self::RestrictedResource => write!(f, "restricted_resource"),
            Self::InvalidJson => write!(f, "invalid_json"),
            Self::ValidationFailed => write!(f, "validation_error"),
            Self::Conflict => write!(f, "conflict_error"),
            Self::InternalError => write!(f, "internal_server_error"),
            Self::ServiceUnavailable => write!(f, "service_unavailable"),
            Self::HttpStatus(code) => write!(f, "http_{}", code),
            Self::Unknown(code) => write!(f, "{}", code),
        }
    }
}

/// Main application error type.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Missing configuration: {0}")]
    MissingConfiguration(String),

    #[error("Invalid reference '{input}': {reason}")]
    InvalidReference { input: String, reason: String },

    #[error("Resource {reference} not found or not shared with the integration")]
    ResourceNotFound { reference: NotionId },

    #[error("Notion returned a partial {object} for {reference}; the integration lacks access to the full object")]
    PartialObject {
        reference: NotionId,
        object: &'static str,
    },

    #[error("Failed to fetch {reference}: {source}")]
    RemoteFetch {
        reference: NotionId,
        #[source]
        source: Box<AppError>,
    },

    #[error("Database {reference} has no data sources")]
    NoDataSource { reference: NotionId },

    #[error("Network failure: {0}")]
    NetworkFailure(#[from] reqwest::Error),

    #[error("Notion API returned an error ({code}): {message}")]
    NotionService {
        code: NotionErrorCode,
        message: String,
        status: u16,
    },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Filesystem IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV encoding error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Validation error: {0}")]
    Validation(ValidationError),
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        match err {
            ValidationError::InvalidReference { input, reason } => {
                AppError::InvalidReference { input, reason }
            }
            other => AppError::Validation(other),
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::MalformedResponse(err.to_string())
    }
}

impl AppError {
    /// Attributes a gateway failure to the resource being fetched.
    ///
    /// API responses meaning "no such resource" become `ResourceNotFound`;
    /// transport failures and other service errors become `RemoteFetch`.
    /// Errors that already name a resource pass through unchanged.
    pub fn tagged(self, reference: &NotionId) -> AppError {
        match self {
            AppError::NotionService { ref code, .. } if code.is_missing_resource() => {
                AppError::ResourceNotFound {
                    reference: reference.clone(),
                }
            }
            AppError::NotionService { .. }
            | AppError::NetworkFailure(_)
            | AppError::MalformedResponse(_) => AppError::RemoteFetch {
                reference: reference.clone(),
                source: Box::new(self),
            },
            already_attributed => already_attributed,
        }
    }

    /// `ResourceNotFound` and `PartialObject` are handled identically.
    pub fn is_resource_missing(&self) -> bool {
        matches!(
            self,
            AppError::ResourceNotFound { .. } | AppError::PartialObject { .. }
        )
    }

    /// Whether retrying the same request might succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            AppError::NotionService { code, .. } => code.is_retryable(),
            AppError::NetworkFailure(err) => err.is_timeout() || err.is_connect(),
            _ => false,
        }
    }
}
