// Error handling module for the MCP server
//
// This module defines the error types used throughout the MCP server.
// Every invocation-level error maps onto a JSON-RPC error code so both
// transports report failures the same way.

use thiserror::Error;
use actix_web::{HttpResponse, ResponseError};
use serde::Serialize;

/// JSON-RPC error codes used by the dispatcher
pub mod codes {
    pub const PARSE_ERROR: i32 = -32700;
    pub const INVALID_REQUEST: i32 = -32600;
    pub const METHOD_NOT_FOUND: i32 = -32601;
    pub const INVALID_PARAMS: i32 = -32602;
    pub const INTERNAL_ERROR: i32 = -32603;
}

/// API error response format
#[derive(Serialize)]
pub struct ErrorResponse {
    pub status: String,
    pub message: String,
    pub code: Option<String>,
}

/// Process-level errors (startup and the HTTP transport)
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failures of the single outbound call to the Desk3 API
#[derive(Error, Debug)]
pub enum UpstreamError {
    #[error("Upstream returned {status} for {url}: {message}")]
    Status {
        status: u16,
        url: String,
        message: String,
    },

    #[error("Upstream request to {url} failed: {message}")]
    Transport {
        url: String,
        message: String,
    },

    #[error("Failed to decode upstream response from {url}: {message}")]
    Decode {
        url: String,
        message: String,
    },

    #[error("Invalid upstream URL: {0}")]
    InvalidUrl(String),
}

/// Tool-specific errors
#[derive(Error, Debug)]
pub enum ToolError {
    #[error("Unsupported tool: {0}")]
    NotFound(String),

    #[error("Invalid tool parameters: {0}")]
    InvalidParameters(String),

    #[error("Tool registration failed: {0}")]
    RegistrationFailed(String),

    #[error(transparent)]
    Upstream(#[from] UpstreamError),
}

/// Resource-specific errors
#[derive(Error, Debug)]
pub enum ResourceError {
    #[error("Invalid resource URI '{0}'")]
    InvalidUri(String),

    #[error("Unsupported scheme: {0}")]
    UnsupportedScheme(String),

    #[error("Unsupported resource: {0}")]
    UnknownResource(String),

    #[error("Missing required query param: {0}")]
    MissingParameter(String),

    #[error(transparent)]
    Upstream(#[from] UpstreamError),
}

/// Catalog consistency errors, raised while the catalog is assembled
#[derive(Error, Debug, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Duplicate operation id: {0}")]
    DuplicateOperation(String),

    #[error("Duplicate tool name: {0}")]
    DuplicateTool(String),

    #[error("Duplicate resource URI: {0}")]
    DuplicateResource(String),

    #[error("Invalid resource URI for operation '{operation}': {uri}")]
    InvalidResourceUri {
        operation: String,
        uri: String,
    },
}

impl ToolError {
    /// JSON-RPC error code for this failure
    pub fn rpc_code(&self) -> i32 {
        match self {
            ToolError::NotFound(_) | ToolError::InvalidParameters(_) => codes::INVALID_PARAMS,
            ToolError::RegistrationFailed(_) | ToolError::Upstream(_) => codes::INTERNAL_ERROR,
        }
    }
}

impl ResourceError {
    /// JSON-RPC error code for this failure
    pub fn rpc_code(&self) -> i32 {
        match self {
            ResourceError::Upstream(_) => codes::INTERNAL_ERROR,
            _ => codes::INVALID_PARAMS,
        }
    }
}

// Implement ResponseError for ServerError to convert it to HTTP responses
impl ResponseError for ServerError {
    fn error_response(&self) -> HttpResponse {
        match self {
            ServerError::BadRequest(msg) => {
                HttpResponse::BadRequest().json(ErrorResponse {
                    status: "error".to_string(),
                    message: msg.clone(),
                    code: Some("BAD_REQUEST".to_string()),
                })
            },
            ServerError::NotFound(msg) => {
                HttpResponse::NotFound().json(ErrorResponse {
                    status: "error".to_string(),
                    message: msg.clone(),
                    code: Some("NOT_FOUND".to_string()),
                })
            },
            _ => {
                HttpResponse::InternalServerError().json(ErrorResponse {
                    status: "error".to_string(),
                    message: self.to_string(),
                    code: Some("INTERNAL_ERROR".to_string()),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;

    #[test]
    fn test_invalid_requests_map_to_invalid_params() {
        assert_eq!(ToolError::NotFound("x".into()).rpc_code(), codes::INVALID_PARAMS);
        assert_eq!(ToolError::InvalidParameters("x".into()).rpc_code(), codes::INVALID_PARAMS);
        assert_eq!(ResourceError::UnsupportedScheme("http".into()).rpc_code(), codes::INVALID_PARAMS);
        assert_eq!(ResourceError::MissingParameter("chainid".into()).rpc_code(), codes::INVALID_PARAMS);
    }

    #[test]
    fn test_upstream_failures_map_to_internal_error() {
        let err = UpstreamError::Status {
            status: 500,
            url: "http://localhost/market/price".into(),
            message: "boom".into(),
        };
        assert!(err.to_string().contains("500"));
        assert_eq!(ToolError::from(err).rpc_code(), codes::INTERNAL_ERROR);
    }

    #[test]
    fn test_server_error_status_codes() {
        assert_eq!(
            ServerError::NotFound("session".into()).error_response().status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ServerError::BadRequest("body".into()).error_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ServerError::Config("missing".into()).error_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
