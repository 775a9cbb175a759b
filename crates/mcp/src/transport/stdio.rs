// Newline-delimited JSON-RPC over stdin/stdout: one implicit session per process

use crate::protocol::{JsonRpcError, JsonRpcResponse};
use crate::server::McpServer;
use anyhow::{Context, Result};
use futures::{SinkExt, StreamExt};
use serde_json::Value;
use std::sync::Arc;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio_util::codec::{FramedRead, FramedWrite, LinesCodec};

/// Serve on the process stdio until stdin reaches EOF.
pub async fn run(server: Arc<McpServer>) -> Result<()> {
    tracing::info!("Serving MCP over stdio");
    serve(server, tokio::io::stdin(), tokio::io::stdout()).await
}

/// Serve one peer over any reader/writer pair. Returns when the reader closes.
pub async fn serve<R, W>(server: Arc<McpServer>, reader: R, writer: W) -> Result<()>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = FramedRead::new(reader, LinesCodec::new());
    let mut sink = FramedWrite::new(writer, LinesCodec::new());

    while let Some(line) = lines.next().await {
        let line = line.context("Failed to read from stdin")?;
        if line.trim().is_empty() {
            continue;
        }

        let response = match serde_json::from_str::<Value>(&line) {
            Ok(message) => server.handle_message(message).await,
            Err(e) => {
                tracing::warn!("Unparsable message on stdin: {}", e);
                Some(JsonRpcResponse::error(Value::Null, JsonRpcError::parse_error()))
            }
        };

        if let Some(response) = response {
            let encoded = serde_json::to_string(&response)?;
            sink.send(encoded).await.context("Failed to write to stdout")?;
        }
    }

    tracing::info!("stdin closed, shutting down");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::ResourceRegistry;
    use crate::tools::ToolRegistry;
    use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

    fn empty_server() -> Arc<McpServer> {
        Arc::new(McpServer::new(ToolRegistry::new(), ResourceRegistry::new()))
    }

    #[tokio::test]
    async fn test_request_response_over_pipe() {
        let (client, server_io) = tokio::io::duplex(4096);
        let (server_read, server_write) = tokio::io::split(server_io);
        let task = tokio::spawn(serve(empty_server(), server_read, server_write));

        let (client_read, mut client_write) = tokio::io::split(client);
        let mut responses = BufReader::new(client_read).lines();

        client_write
            .write_all(b"{\"jsonrpc\":\"2.0\",\"id\":1,\"method\":\"ping\"}\n")
            .await
            .unwrap();
        let line = responses.next_line().await.unwrap().unwrap();
        let response: Value = serde_json::from_str(&line).unwrap();
        assert_eq!(response["id"], 1);
        assert_eq!(response["result"], serde_json::json!({}));

        // Notifications produce no output; the next line answers the following request
        client_write
            .write_all(b"{\"jsonrpc\":\"2.0\",\"method\":\"notifications/initialized\"}\n")
            .await
            .unwrap();
        client_write.write_all(b"not json\n").await.unwrap();
        let line = responses.next_line().await.unwrap().unwrap();
        let response: Value = serde_json::from_str(&line).unwrap();
        assert_eq!(response["error"]["code"], -32700);
        assert_eq!(response["id"], Value::Null);

        // The loop keeps going after a parse error
        client_write
            .write_all(b"{\"jsonrpc\":\"2.0\",\"id\":2,\"method\":\"tools/list\"}\n")
            .await
            .unwrap();
        let line = responses.next_line().await.unwrap().unwrap();
        let response: Value = serde_json::from_str(&line).unwrap();
        assert_eq!(response["id"], 2);
        assert_eq!(response["result"]["tools"], serde_json::json!([]));

        drop(client_write);
        drop(responses);
        task.await.unwrap().unwrap();
    }
}
