// API handlers for the MCP server
//
// This module contains the request handlers for the SSE transport.

pub mod sse;

/// Response body of the health endpoint
#[derive(serde::Serialize)]
pub struct HealthResponse {
    /// Always "ok" while the process serves
    pub status: String,
    /// Crate version
    pub version: String,
    /// Number of registered tools
    pub tools: usize,
    /// Number of open SSE sessions
    pub sessions: usize,
}
