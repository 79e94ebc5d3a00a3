//! STDIO transport implementation.
//!
//! The desktop assistant launches the server and talks to it over
//! stdin/stdout until it closes the pipe.

use rmcp::{RoleServer, ServiceExt, transport::IntoTransport};
use tracing::info;

use super::{TransportError, TransportResult};
use crate::core::ClaudeLightServer;

/// STDIO transport handler.
pub struct StdioTransport;

impl StdioTransport {
    /// Serve until the host closes stdin.
    pub async fn run(server: ClaudeLightServer) -> TransportResult<()> {
        info!("Ready - communicating via stdin/stdout");
        Self::serve_on(server, rmcp::transport::stdio()).await?;
        info!("STDIO transport finished");
        Ok(())
    }

    /// Serve one session over `transport` until the peer hangs up.
    pub async fn serve_on<T, E, A>(server: ClaudeLightServer, transport: T) -> TransportResult<()>
    where
        T: IntoTransport<RoleServer, E, A>,
        E: std::error::Error + Send + Sync + 'static,
    {
        let service = server
            .serve(transport)
            .await
            .map_err(|e| TransportError::init(e.to_string()))?;

        service
            .waiting()
            .await
            .map_err(|e| TransportError::service(e.to_string()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::definitions::AboutTool;
    use serde_json::{Value, json};
    use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

    async fn send(writer: &mut (impl AsyncWriteExt + Unpin), message: Value) {
        let mut line = message.to_string();
        line.push('\n');
        writer.write_all(line.as_bytes()).await.unwrap();
    }

    async fn receive(lines: &mut tokio::io::Lines<impl tokio::io::AsyncBufRead + Unpin>) -> Value {
        let line = lines.next_line().await.unwrap().expect("server closed the stream");
        serde_json::from_str(&line).unwrap()
    }

    #[tokio::test]
    async fn test_serves_about_over_a_session() {
        let (host, server_side) = tokio::io::duplex(64 * 1024);
        let session = tokio::spawn(StdioTransport::serve_on(
            ClaudeLightServer::default(),
            server_side,
        ));

        let (read, mut write) = tokio::io::split(host);
        let mut lines = BufReader::new(read).lines();

        send(
            &mut write,
            json!({
                "jsonrpc": "2.0",
                "id": 1,
                "method": "initialize",
                "params": {
                    "protocolVersion": "2024-11-05",
                    "capabilities": {},
                    "clientInfo": { "name": "host", "version": "0.0.0" }
                }
            }),
        )
        .await;
        let init = receive(&mut lines).await;
        assert_eq!(init["id"], 1);
        assert!(init["result"]["capabilities"]["tools"].is_object());

        send(&mut write, json!({ "jsonrpc": "2.0", "method": "notifications/initialized" })).await;
        send(
            &mut write,
            json!({
                "jsonrpc": "2.0",
                "id": 2,
                "method": "tools/call",
                "params": { "name": "about", "arguments": {} }
            }),
        )
        .await;
        let about = receive(&mut lines).await;
        assert_eq!(about["id"], 2);
        assert_eq!(about["result"]["content"][0]["text"], AboutTool::TEXT);

        // Hanging up ends the session cleanly.
        drop(write);
        drop(lines);
        session.await.unwrap().unwrap();
    }
}
