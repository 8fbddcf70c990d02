// SSE transport handlers
//
// `GET /sse` opens a long-lived event stream and announces the POST
// endpoint for the session. `POST /messages/?session_id=..` accepts one
// JSON-RPC message; the response is delivered on the event stream.

use actix_web::http::header;
use actix_web::{web, HttpResponse, Responder};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;
use log::{debug, error, info, warn};

use crate::api::sessions::{event_stream, SessionRegistry, SseEvent};
use crate::errors::ServerError;
use crate::mcp::protocol::JsonRpcRequest;
use crate::mcp::Dispatcher;

/// Path clients POST their messages to
pub const MESSAGES_PATH: &str = "/messages/";

/// Query parameters of the message endpoint
#[derive(Deserialize)]
pub struct MessageQuery {
    pub session_id: String,
}

/// Handler opening a new SSE session
pub async fn connect(sessions: web::Data<Arc<SessionRegistry>>) -> impl Responder {
    let (session_id, rx) = sessions.open();
    let endpoint = format!("{}?session_id={}", MESSAGES_PATH, session_id.simple());
    sessions.send(&session_id, SseEvent::endpoint(endpoint));

    info!("Opened SSE session {}", session_id);

    HttpResponse::Ok()
        .insert_header((header::CONTENT_TYPE, "text/event-stream"))
        .insert_header((header::CACHE_CONTROL, "no-cache"))
        .streaming(event_stream(sessions.get_ref().clone(), session_id, rx))
}

/// Handler accepting a client message for an open session
pub async fn post_message(
    dispatcher: web::Data<Arc<Dispatcher>>,
    sessions: web::Data<Arc<SessionRegistry>>,
    query: web::Query<MessageQuery>,
    body: web::Bytes,
) -> Result<HttpResponse, ServerError> {
    let session_id = Uuid::parse_str(&query.session_id)
        .map_err(|_| ServerError::BadRequest("Invalid session ID".to_string()))?;

    if !sessions.contains(&session_id) {
        return Err(ServerError::NotFound(format!("Could not find session {}", query.session_id)));
    }

    let request: JsonRpcRequest = serde_json::from_slice(&body)
        .map_err(|e| ServerError::BadRequest(format!("Could not parse message: {}", e)))?;

    debug!("SSE session {} received {}", session_id, request.method);

    let dispatcher = dispatcher.get_ref().clone();
    let sessions = sessions.get_ref().clone();
    actix_web::rt::spawn(async move {
        let Some(response) = dispatcher.handle_request(request).await else {
            return;
        };
        match serde_json::to_string(&response) {
            Ok(json) => {
                if !sessions.send(&session_id, SseEvent::message(json)) {
                    warn!("SSE session {} closed before its response was sent", session_id);
                }
            },
            Err(e) => error!("Failed to serialize MCP response: {}", e),
        }
    });

    Ok(HttpResponse::Accepted().body("Accepted"))
}
