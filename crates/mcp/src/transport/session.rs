// Session table for the streamable HTTP transport

use crate::protocol::{is_initialize_request, JsonRpcResponse};
use crate::server::McpServer;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

/// Session identifier carried in the `mcp-session-id` header
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for SessionId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s.trim())?))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Created for an initialize request that has not completed yet
    Pending,
    Active,
    Closed,
}

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Server already initialized")]
    AlreadyInitialized,

    #[error("Server not initialized")]
    NotInitialized,

    #[error("Session closed")]
    Closed,
}

/// One client session. Requests are handled one at a time.
pub struct SessionTransport {
    id: SessionId,
    server: Arc<McpServer>,
    // Held for the duration of each request
    state: Mutex<SessionState>,
    token: CancellationToken,
}

impl std::fmt::Debug for SessionTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionTransport")
            .field("id", &self.id)
            .finish_non_exhaustive()
    }
}

impl SessionTransport {
    fn new(id: SessionId, server: Arc<McpServer>, token: CancellationToken) -> Self {
        Self {
            id,
            server,
            state: Mutex::new(SessionState::Pending),
            token,
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub async fn state(&self) -> SessionState {
        if self.token.is_cancelled() {
            return SessionState::Closed;
        }
        *self.state.lock().await
    }

    /// Token cancelled when this session closes
    pub fn close_token(&self) -> CancellationToken {
        self.token.clone()
    }

    /// Dispatch one message through the protocol server.
    pub async fn handle(&self, message: Value) -> Result<Option<JsonRpcResponse>, SessionError> {
        let mut state = self.state.lock().await;
        if self.token.is_cancelled() {
            *state = SessionState::Closed;
        }

        let initialize = is_initialize_request(&message);
        match (*state, initialize) {
            (SessionState::Closed, _) => return Err(SessionError::Closed),
            (SessionState::Active, true) => return Err(SessionError::AlreadyInitialized),
            (SessionState::Pending, false) => return Err(SessionError::NotInitialized),
            _ => {}
        }

        let response = self.server.handle_message(message).await;

        if *state == SessionState::Pending {
            if response.as_ref().is_some_and(|r| r.is_success()) {
                *state = SessionState::Active;
                tracing::info!(session = %self.id, "Session initialized");
            } else {
                *state = SessionState::Closed;
                self.token.cancel();
            }
        }
        Ok(response)
    }

    /// Close the session without waiting for an in-flight request. Later
    /// requests see the cancelled token and fail with [`SessionError::Closed`].
    pub fn close(&self) {
        self.token.cancel();
    }
}

/// Maps session IDs to live sessions
pub struct SessionManager {
    server: Arc<McpServer>,
    sessions: Arc<RwLock<HashMap<SessionId, Arc<SessionTransport>>>>,
    root: CancellationToken,
}

impl SessionManager {
    pub fn new(server: Arc<McpServer>) -> Self {
        Self {
            server,
            sessions: Arc::new(RwLock::new(HashMap::new())),
            root: CancellationToken::new(),
        }
    }

    pub async fn get(&self, id: &SessionId) -> Option<Arc<SessionTransport>> {
        self.sessions.read().await.get(id).cloned()
    }

    /// Run an initialize request in a fresh session.
    ///
    /// The session is registered only if initialization succeeds; otherwise the
    /// returned transport is already closed and the table is unchanged.
    pub async fn create(
        &self,
        message: Value,
    ) -> Result<(Arc<SessionTransport>, Option<JsonRpcResponse>), SessionError> {
        let id = SessionId::new();
        let transport = Arc::new(SessionTransport::new(
            id,
            self.server.clone(),
            self.root.child_token(),
        ));

        let response = transport.handle(message).await?;
        if transport.state().await != SessionState::Active {
            tracing::warn!(session = %id, "Initialization failed, session discarded");
            return Ok((transport, response));
        }

        self.sessions.write().await.insert(id, transport.clone());
        self.watch(id, transport.close_token());
        Ok((transport, response))
    }

    // Drop the entry once its token fires, whatever closed it.
    fn watch(&self, id: SessionId, token: CancellationToken) {
        let sessions = self.sessions.clone();
        tokio::spawn(async move {
            token.cancelled().await;
            if sessions.write().await.remove(&id).is_some() {
                tracing::info!(session = %id, "Session closed");
            }
        });
    }

    /// Close and forget a session. Returns false if it was not known.
    pub async fn close(&self, id: &SessionId) -> bool {
        let removed = self.sessions.write().await.remove(id);
        match removed {
            Some(transport) => {
                transport.close();
                tracing::info!(session = %id, "Session terminated by client");
                true
            }
            None => false,
        }
    }

    /// Close every session, current and future.
    pub fn shutdown(&self) {
        self.root.cancel();
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::ResourceRegistry;
    use crate::tools::ToolRegistry;
    use serde_json::json;
    use std::time::Duration;

    fn manager() -> SessionManager {
        let server = McpServer::new(ToolRegistry::new(), ResourceRegistry::new());
        SessionManager::new(Arc::new(server))
    }

    fn initialize() -> Value {
        json!({
            "jsonrpc": "2.0",
            "id": 0,
            "method": "initialize",
            "params": {
                "protocolVersion": "2025-06-18",
                "capabilities": {},
                "clientInfo": {"name": "test", "version": "1.0"}
            }
        })
    }

    async fn wait_until_empty(manager: &SessionManager) {
        for _ in 0..100 {
            if manager.is_empty().await {
                return;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!("session was not removed");
    }

    #[test]
    fn test_session_id_parse() {
        let id = SessionId::new();
        let parsed: SessionId = id.to_string().parse().unwrap();
        assert_eq!(parsed, id);
        assert!("not-a-uuid".parse::<SessionId>().is_err());
    }

    #[tokio::test]
    async fn test_create_registers_active_session() {
        let manager = manager();

        let (transport, response) = manager.create(initialize()).await.unwrap();
        assert!(response.unwrap().is_success());
        assert_eq!(transport.state().await, SessionState::Active);
        assert!(manager.get(&transport.id()).await.is_some());

        let (other, _) = manager.create(initialize()).await.unwrap();
        assert_ne!(other.id(), transport.id());
        assert_eq!(manager.len().await, 2);
    }

    #[tokio::test]
    async fn test_failed_initialize_leaves_table_untouched() {
        let manager = manager();

        let bad = json!({"jsonrpc": "2.0", "id": 1, "method": "ping"});
        let err = manager.create(bad).await.unwrap_err();
        assert!(matches!(err, SessionError::NotInitialized));
        assert!(manager.is_empty().await);
    }

    #[tokio::test]
    async fn test_second_initialize_rejected() {
        let manager = manager();
        let (transport, _) = manager.create(initialize()).await.unwrap();

        let err = transport.handle(initialize()).await.unwrap_err();
        assert!(matches!(err, SessionError::AlreadyInitialized));

        let ping = json!({"jsonrpc": "2.0", "id": 2, "method": "ping"});
        assert!(transport.handle(ping).await.unwrap().unwrap().is_success());
    }

    #[tokio::test]
    async fn test_close_is_not_repeatable() {
        let manager = manager();
        let (transport, _) = manager.create(initialize()).await.unwrap();
        let id = transport.id();

        assert!(manager.close(&id).await);
        assert!(!manager.close(&id).await);
        assert_eq!(transport.state().await, SessionState::Closed);

        let ping = json!({"jsonrpc": "2.0", "id": 3, "method": "ping"});
        assert!(matches!(transport.handle(ping).await, Err(SessionError::Closed)));
    }

    #[tokio::test]
    async fn test_shutdown_closes_all_sessions() {
        let manager = manager();
        let (first, _) = manager.create(initialize()).await.unwrap();
        let (second, _) = manager.create(initialize()).await.unwrap();

        manager.shutdown();
        wait_until_empty(&manager).await;

        assert_eq!(first.state().await, SessionState::Closed);
        assert!(second.close_token().is_cancelled());
    }
}
