// MCP (Model Context Protocol) server for the Mono banking API.
// Exposes account, customer, company registry and verification endpoints as
// tools over stdio or streamable HTTP.

pub mod config;
pub mod protocol;
pub mod resources;
pub mod server;
pub mod tools;
pub mod transport;

pub use config::McpConfig;
pub use server::McpServer;
