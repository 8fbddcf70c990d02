// desk3-mcp: Model Context Protocol Server for the Desk3 market-data API
//
// This library implements a Model Context Protocol (MCP) server which exposes
// a fixed catalog of read-only Desk3 endpoints as MCP resources and tools,
// over stdio or over HTTP server-sent events.

pub mod api;
pub mod catalog;
pub mod config;
pub mod errors;
pub mod mcp;
pub mod resources;
pub mod stdio;
pub mod tools;
pub mod upstream;

/// Version reported in `serverInfo` and on the health endpoint
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default server configuration constants
pub mod defaults {
    /// Default port for the SSE transport
    pub const SERVER_PORT: u16 = 8100;
    /// Default host address to bind to
    pub const SERVER_HOST: &str = "0.0.0.0";
    /// Default base URL of the Desk3 API
    pub const UPSTREAM_BASE_URL: &str = "https://mcp.desk3.io/v1";
}
