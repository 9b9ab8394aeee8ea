use std::sync::Arc;

use tokio::io::{
    AsyncBufRead, AsyncBufReadExt, AsyncReadExt, AsyncWrite, AsyncWriteExt, BufReader,
};
use tokio::sync::mpsc;

use crate::handlers;
use crate::protocol::{JsonRpcError, JsonRpcRequest, JsonRpcResponse};
use crate::registry::ToolRegistry;

/// Maximum bytes per JSON-RPC message (1 MiB).
const MAX_MESSAGE_BYTES: usize = 1024 * 1024;

#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("transport I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode response: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("response writer stopped unexpectedly")]
    WriterStopped,
}

/// MCP server that communicates over stdio using newline-delimited JSON-RPC 2.0.
///
/// `tools/call` requests run as independent tasks; a single writer emits
/// responses in completion order.
pub struct McpServer {
    registry: Arc<ToolRegistry>,
    initialized: bool,
}

impl McpServer {
    pub fn new(registry: ToolRegistry) -> Self {
        Self {
            registry: Arc::new(registry),
            initialized: false,
        }
    }

    pub async fn run(&mut self) -> Result<(), ServerError> {
        let reader = BufReader::new(tokio::io::stdin());
        self.serve(reader, tokio::io::stdout()).await
    }

    /// Serve one session until `reader` reaches EOF and every in-flight call
    /// has been answered.
    pub async fn serve<R, W>(&mut self, mut reader: R, writer: W) -> Result<(), ServerError>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin + Send + 'static,
    {
        let (tx, rx) = mpsc::unbounded_channel();
        let writer_task = tokio::spawn(write_responses(rx, writer));
        let mut raw = Vec::new();

        loop {
            if tx.is_closed() {
                break;
            }

            raw.clear();
            let n = (&mut reader)
                .take(MAX_MESSAGE_BYTES as u64 + 1)
                .read_until(b'\n', &mut raw)
                .await?;
            if n == 0 {
                break;
            }

            if n > MAX_MESSAGE_BYTES {
                if raw.last() != Some(&b'\n') {
                    discard_line(&mut reader).await?;
                }
                tracing::warn!(limit = MAX_MESSAGE_BYTES, "message too large");
                send(&tx, JsonRpcResponse::error(None, JsonRpcError::parse_error()));
                continue;
            }

            let trimmed = match std::str::from_utf8(&raw) {
                Ok(s) => s.trim(),
                Err(_) => {
                    send(&tx, JsonRpcResponse::error(None, JsonRpcError::parse_error()));
                    continue;
                }
            };

            if trimmed.is_empty() {
                continue;
            }

            let req: JsonRpcRequest = match serde_json::from_str(trimmed) {
                Ok(r) => r,
                Err(e) => {
                    tracing::warn!(error = %e, "parse error");
                    send(&tx, JsonRpcResponse::error(None, JsonRpcError::parse_error()));
                    continue;
                }
            };

            if req.jsonrpc != "2.0" {
                send(&tx, JsonRpcResponse::error(req.id.clone(), JsonRpcError::invalid_request()));
                continue;
            }

            // Only `initialize` is allowed before the handshake completes
            if !self.initialized && req.method != "initialize" {
                if req.id.is_none() {
                    continue;
                }
                send(
                    &tx,
                    JsonRpcResponse::error(
                        req.id.clone(),
                        JsonRpcError::invalid_request_with("Server not initialized"),
                    ),
                );
                continue;
            }

            // Notifications run for their side effects but are never answered
            if req.method == "tools/call" {
                let registry = Arc::clone(&self.registry);
                let tx = tx.clone();
                tokio::spawn(async move {
                    let resp = handlers::dispatch(&req, &registry).await;
                    if let (Some(resp), Some(_)) = (resp, &req.id) {
                        send(&tx, resp);
                    }
                });
                continue;
            }

            let resp = handlers::dispatch(&req, &self.registry).await;
            if let (Some(resp), Some(_)) = (resp, &req.id) {
                send(&tx, resp);
            }

            if req.method == "initialize" {
                self.initialized = true;
            }
        }

        // The writer finishes once every in-flight call has dropped its sender.
        drop(tx);
        match writer_task.await {
            Ok(result) => result,
            Err(e) => {
                tracing::error!(error = %e, "response writer task failed");
                Err(ServerError::WriterStopped)
            }
        }
    }
}

/// Skip the rest of an oversized line, up to and including its newline.
async fn discard_line<R>(reader: &mut R) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
{
    loop {
        let buf = reader.fill_buf().await?;
        if buf.is_empty() {
            return Ok(());
        }
        match buf.iter().position(|&b| b == b'\n') {
            Some(pos) => {
                reader.consume(pos + 1);
                return Ok(());
            }
            None => {
                let len = buf.len();
                reader.consume(len);
            }
        }
    }
}

fn send(tx: &mpsc::UnboundedSender<JsonRpcResponse>, resp: JsonRpcResponse) {
    if tx.send(resp).is_err() {
        tracing::warn!("dropping response, writer has stopped");
    }
}

async fn write_responses<W>(
    mut rx: mpsc::UnboundedReceiver<JsonRpcResponse>,
    mut writer: W,
) -> Result<(), ServerError>
where
    W: AsyncWrite + Unpin,
{
    while let Some(resp) = rx.recv().await {
        let out = serde_json::to_string(&resp)?;
        writer.write_all(out.as_bytes()).await?;
        writer.write_all(b"\n").await?;
        writer.flush().await?;
    }
    Ok(())
}
