// API module for the MCP server
//
// This module contains the HTTP (SSE) transport: server setup, routes,
// handlers and the session table.

mod routes;
pub mod handlers;
pub mod sessions;

use actix_web::{web, App, HttpServer, HttpResponse, middleware};
use actix_cors::Cors;
use std::sync::Arc;
use log::info;

use crate::config::Settings;
use crate::mcp::Dispatcher;
use handlers::HealthResponse;
use sessions::SessionRegistry;

/// Initialize the API server with the appropriate routes and middleware
pub async fn init_server(settings: Arc<Settings>, dispatcher: Arc<Dispatcher>) -> std::io::Result<()> {
    let sessions = Arc::new(SessionRegistry::new());
    let server = settings.server.clone();

    info!("Starting MCP SSE server on {}:{}", server.host, server.port);

    let cors_origins = server.cors_origins.clone();
    let cors_enabled = server.cors_enabled;

    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .wrap(middleware::Condition::new(cors_enabled, build_cors(&cors_origins)))
            .app_data(web::Data::new(dispatcher.clone()))
            .app_data(web::Data::new(sessions.clone()))
            .configure(configure_routes)
    })
    .workers(server.workers.max(1))
    .bind((server.host.as_str(), server.port))?
    .run()
    .await
}

/// Define the API routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    routes::configure(cfg);
}

fn build_cors(origins: &[String]) -> Cors {
    if origins.iter().any(|o| o == "*") {
        return Cors::permissive();
    }
    origins
        .iter()
        .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
        .allow_any_method()
        .allow_any_header()
}

/// Health check handler
pub async fn health_check(
    dispatcher: web::Data<Arc<Dispatcher>>,
    sessions: web::Data<Arc<SessionRegistry>>,
) -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse {
        status: "ok".to_string(),
        version: crate::VERSION.to_string(),
        tools: dispatcher.tool_count(),
        sessions: sessions.len(),
    })
}
