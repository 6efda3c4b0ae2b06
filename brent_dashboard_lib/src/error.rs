//! Error types for the library layer.

use std::fmt;

use brent_api::Resource;

/// Errors produced by the library layer, wrapping upstream API errors
/// and adding payload normalization, input validation, and re-entrancy failures.
#[derive(Debug)]
pub enum DashboardError {
    /// An error from the underlying API client.
    Api(brent_api::Error),
    /// A resource payload was well-formed JSON but a field could not be normalized.
    Adapter { resource: Resource, message: String },
    /// User-provided input failed validation.
    InvalidInput(String),
    /// A fetch was requested while another one was still loading.
    Busy,
}

impl fmt::Display for DashboardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Api(e) => write!(f, "API error: {}", e),
            Self::Adapter { resource, message } => {
                write!(f, "Invalid {} payload: {}", resource, message)
            }
            Self::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            Self::Busy => write!(f, "A request is already loading"),
        }
    }
}

impl std::error::Error for DashboardError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Api(e) => Some(e),
            _ => None,
        }
    }
}

impl From<brent_api::Error> for DashboardError {
    fn from(e: brent_api::Error) -> Self {
        Self::Api(e)
    }
}

/// The single human-readable message a failed fetch is surfaced with.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("{reason}")]
pub struct FetchFailure {
    pub reason: String,
}

impl From<&DashboardError> for FetchFailure {
    fn from(e: &DashboardError) -> Self {
        let reason = match e {
            DashboardError::Api(api) => api.server_message().unwrap_or_else(|| api.to_string()),
            other => other.to_string(),
        };
        Self { reason }
    }
}
