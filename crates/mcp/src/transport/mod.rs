pub mod http;
pub mod session;
pub mod stdio;

pub use session::{SessionError, SessionId, SessionManager, SessionState, SessionTransport};
