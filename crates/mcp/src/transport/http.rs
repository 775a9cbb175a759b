// Streamable HTTP transport: many sessions behind one axum router

use super::session::{SessionError, SessionId, SessionManager, SessionTransport};
use crate::config::HttpConfig;
use crate::protocol::{is_initialize_request, JsonRpcError, JsonRpcResponse};
use crate::server::McpServer;
use anyhow::Result;
use axum::{
    body::Bytes,
    extract::{Request, State},
    http::{header, HeaderMap, HeaderName, HeaderValue, Method, StatusCode},
    middleware::{self, Next},
    response::{
        sse::{Event, KeepAlive, Sse},
        IntoResponse, Response,
    },
    routing::get,
    Json, Router,
};
use futures::StreamExt;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::any::Any;
use std::convert::Infallible;
use std::sync::Arc;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{AllowOrigin, CorsLayer},
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};

pub const SESSION_HEADER: &str = "mcp-session-id";

#[derive(Clone)]
pub struct AppState {
    pub sessions: Arc<SessionManager>,
    pub allowed_hosts: Arc<Vec<String>>,
}

/// Bind and serve until Ctrl-C, then close every session.
pub async fn serve(server: Arc<McpServer>, config: &HttpConfig) -> Result<()> {
    let sessions = Arc::new(SessionManager::new(server));
    let app = router(sessions.clone(), config.allowed_hosts.clone());

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("MCP HTTP server listening on {}", addr);
    tracing::info!("MCP endpoint: http://{}/mcp", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(sessions))
        .await?;

    tracing::info!("MCP HTTP server stopped");
    Ok(())
}

async fn shutdown_signal(sessions: Arc<SessionManager>) {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
    tracing::info!("Shutting down, closing {} sessions", sessions.len().await);
    sessions.shutdown();
}

/// Create the MCP router
pub fn router(sessions: Arc<SessionManager>, allowed_hosts: Vec<String>) -> Router {
    let state = AppState {
        sessions,
        allowed_hosts: Arc::new(allowed_hosts),
    };

    let mcp = Router::new()
        .route("/mcp", get(handle_get).post(handle_post).delete(handle_delete))
        .route_layer(middleware::from_fn_with_state(state.clone(), check_host));

    let routes = Router::new()
        .route("/health", get(health_check))
        .merge(mcp)
        .with_state(state);
    with_http_layers(routes)
}

/// Apply the panic, tracing and CORS layers shared by every route.
pub fn with_http_layers(routes: Router) -> Router {
    routes
        .layer(middleware::from_fn(mark_request_scope))
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().include_headers(true))
                .on_response(DefaultOnResponse::new().include_headers(true)),
        )
        .layer(cors_layer())
}

tokio::task_local! {
    static REQUEST_SCOPE: ();
}

/// True while running inside an HTTP request handler. A panic there is
/// answered with a 500 instead of ending the process.
pub fn in_request_scope() -> bool {
    REQUEST_SCOPE.try_with(|_| ()).is_ok()
}

async fn mark_request_scope(request: Request, next: Next) -> Response {
    REQUEST_SCOPE.scope((), next.run(request)).await
}

fn cors_layer() -> CorsLayer {
    let session_header = HeaderName::from_static(SESSION_HEADER);
    CorsLayer::new()
        .allow_origin(AllowOrigin::mirror_request())
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, session_header.clone()])
        .expose_headers([session_header])
}

/// Health check endpoint
async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
    }))
}

/// HTTP error body
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }

    fn with_status(self, status: StatusCode) -> Response {
        (status, Json(self)).into_response()
    }
}

fn handle_panic(_panic: Box<dyn Any + Send + 'static>) -> Response {
    tracing::error!("Request handler panicked");
    ErrorResponse::new("Internal server error").with_status(StatusCode::INTERNAL_SERVER_ERROR)
}

/// Reject requests whose `Host` is not a loopback name from the allow-list.
async fn check_host(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let host = request
        .headers()
        .get(header::HOST)
        .and_then(|value| value.to_str().ok())
        .map(|value| hostname(value).to_string());

    let allowed = host
        .as_deref()
        .is_some_and(|host| state.allowed_hosts.iter().any(|allowed| allowed == host));
    if !allowed {
        tracing::warn!(host = ?host, "Rejected request from disallowed host");
        return ErrorResponse::new("Forbidden: host not allowed").with_status(StatusCode::FORBIDDEN);
    }

    next.run(request).await
}

/// Hostname part of a `Host` header value, without the port.
fn hostname(host: &str) -> &str {
    if let Some(rest) = host.strip_prefix('[') {
        return rest.split(']').next().unwrap_or(rest);
    }
    host.split(':').next().unwrap_or(host)
}

fn session_id(headers: &HeaderMap) -> Option<SessionId> {
    headers
        .get(SESSION_HEADER)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.parse().ok())
}

async fn find_session(state: &AppState, headers: &HeaderMap) -> Option<Arc<SessionTransport>> {
    let id = session_id(headers)?;
    state.sessions.get(&id).await
}

fn invalid_session() -> Response {
    ErrorResponse::new("Invalid or missing session ID").with_status(StatusCode::BAD_REQUEST)
}

fn rpc_error(status: StatusCode, id: Value, error: JsonRpcError) -> Response {
    (status, Json(JsonRpcResponse::error(id, error))).into_response()
}

/// 200 with the response, or 202 for notifications
fn rpc_reply(response: Option<JsonRpcResponse>) -> Response {
    match response {
        Some(response) => (StatusCode::OK, Json(response)).into_response(),
        None => StatusCode::ACCEPTED.into_response(),
    }
}

fn session_error(error: SessionError, id: Value) -> Response {
    match error {
        SessionError::AlreadyInitialized | SessionError::NotInitialized => rpc_error(
            StatusCode::BAD_REQUEST,
            id,
            JsonRpcError::invalid_request(error.to_string()),
        ),
        SessionError::Closed => invalid_session(),
    }
}

async fn handle_post(State(state): State<AppState>, headers: HeaderMap, body: Bytes) -> Response {
    let message: Value = match serde_json::from_slice(&body) {
        Ok(message) => message,
        Err(e) => {
            tracing::warn!("Unparsable request body: {}", e);
            return rpc_error(StatusCode::BAD_REQUEST, Value::Null, JsonRpcError::parse_error());
        }
    };
    let request_id = message.get("id").cloned().unwrap_or(Value::Null);

    if headers.contains_key(SESSION_HEADER) {
        let Some(session) = find_session(&state, &headers).await else {
            return no_valid_session();
        };
        return match session.handle(message).await {
            Ok(response) => rpc_reply(response),
            Err(e) => session_error(e, request_id),
        };
    }

    if !is_initialize_request(&message) {
        return no_valid_session();
    }

    let (session, response) = match state.sessions.create(message).await {
        Ok(created) => created,
        Err(e) => return session_error(e, request_id),
    };

    let Some(response) = response.filter(|r| r.is_success()) else {
        return rpc_error(
            StatusCode::BAD_REQUEST,
            request_id,
            JsonRpcError::invalid_request("Initialization failed"),
        );
    };

    let mut reply = (StatusCode::OK, Json(response)).into_response();
    match HeaderValue::from_str(&session.id().to_string()) {
        Ok(value) => {
            reply.headers_mut().insert(SESSION_HEADER, value);
            reply
        }
        Err(e) => {
            tracing::error!("Session ID is not a valid header value: {}", e);
            ErrorResponse::new("Internal server error")
                .with_status(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

fn no_valid_session() -> Response {
    ErrorResponse::new("Bad Request: No valid session ID").with_status(StatusCode::BAD_REQUEST)
}

/// Event stream for server-initiated messages. This server sends none, so the
/// stream only carries keep-alives until the session closes.
async fn handle_get(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let Some(session) = find_session(&state, &headers).await else {
        return invalid_session();
    };

    let closed = session.close_token().cancelled_owned();
    let events = futures::stream::pending::<Result<Event, Infallible>>().take_until(closed);

    Sse::new(events)
        .keep_alive(KeepAlive::default())
        .into_response()
}

async fn handle_delete(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let Some(id) = session_id(&headers) else {
        return invalid_session();
    };
    if state.sessions.close(&id).await {
        StatusCode::OK.into_response()
    } else {
        invalid_session()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hostname_strips_port() {
        assert_eq!(hostname("localhost:3000"), "localhost");
        assert_eq!(hostname("127.0.0.1"), "127.0.0.1");
        assert_eq!(hostname("[::1]:3000"), "::1");
        assert_eq!(hostname("evil.example.com:3000"), "evil.example.com");
    }

    #[test]
    fn test_session_id_header() {
        let mut headers = HeaderMap::new();
        assert!(session_id(&headers).is_none());

        headers.insert(SESSION_HEADER, HeaderValue::from_static("garbage"));
        assert!(session_id(&headers).is_none());

        let id = SessionId::new();
        headers.insert(SESSION_HEADER, HeaderValue::from_str(&id.to_string()).unwrap());
        assert_eq!(session_id(&headers), Some(id));
    }
}
