//! Error types for the API client.

use crate::types::Resource;

/// Errors that can occur when retrieving one of the dashboard resources.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The request could not be sent or its body could not be read
    /// (network error, timeout, invalid URL).
    #[error("Request to {resource} failed")]
    RequestFailed { resource: Resource },
    /// The API returned a non-success status with a body snippet.
    #[error("Request to {resource} failed with status {status}")]
    HttpStatus {
        resource: Resource,
        status: u16,
        body: String,
    },
    /// The response body was not a valid `{ "data": ... }` envelope for the resource.
    #[error("Malformed {resource} payload: {message}")]
    Parse { resource: Resource, message: String },
}

impl Error {
    /// The resource whose retrieval failed.
    pub fn resource(&self) -> Resource {
        match self {
            Error::RequestFailed { resource }
            | Error::HttpStatus { resource, .. }
            | Error::Parse { resource, .. } => *resource,
        }
    }

    /// The `message` field of a JSON error body, when the server sent one.
    pub fn server_message(&self) -> Option<String> {
        let Error::HttpStatus { body, .. } = self else {
            return None;
        };
        let value: serde_json::Value = serde_json::from_str(body).ok()?;
        value
            .get("message")
            .and_then(|m| m.as_str())
            .filter(|m| !m.trim().is_empty())
            .map(|m| m.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_message_from_json_body() {
        let err = Error::HttpStatus {
            resource: Resource::Stats,
            status: 400,
            body: r#"{"message": "start must be before end"}"#.to_string(),
        };
        assert_eq!(err.server_message().as_deref(), Some("start must be before end"));
    }

    #[test]
    fn server_message_absent_for_plain_body() {
        let err = Error::HttpStatus {
            resource: Resource::Prices,
            status: 500,
            body: "Internal Server Error".to_string(),
        };
        assert_eq!(err.server_message(), None);
        assert_eq!(
            Error::RequestFailed {
                resource: Resource::Events
            }
            .server_message(),
            None
        );
    }

    #[test]
    fn display_names_the_resource() {
        let err = Error::HttpStatus {
            resource: Resource::ChangePoint,
            status: 503,
            body: String::new(),
        };
        assert_eq!(err.to_string(), "Request to change-point failed with status 503");
        assert_eq!(err.resource(), Resource::ChangePoint);
    }
}
