// Stdio transport
//
// Newline-delimited JSON-RPC over stdin/stdout. Each message is handled on
// its own task; a single writer task serializes responses back out, one per
// line. Logging goes to stderr so stdout only ever carries protocol traffic.

use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::sync::mpsc;
use log::{debug, error, info, warn};
use serde_json::Value;

use crate::errors::ServerError;
use crate::mcp::protocol::{JsonRpcError, JsonRpcResponse};
use crate::mcp::Dispatcher;

/// Serve MCP on the process's stdin/stdout until stdin closes
pub async fn run(dispatcher: Arc<Dispatcher>) -> Result<(), ServerError> {
    info!("Starting MCP server on stdio");
    serve(dispatcher, tokio::io::stdin(), tokio::io::stdout()).await?;
    info!("MCP server stopped");
    Ok(())
}

/// Serve MCP over an arbitrary reader/writer pair
pub async fn serve<R, W>(dispatcher: Arc<Dispatcher>, reader: R, writer: W) -> Result<(), ServerError>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin + Send + 'static,
{
    let (tx, rx) = mpsc::unbounded_channel::<JsonRpcResponse>();
    let writer_task = tokio::spawn(write_responses(rx, writer));

    let mut reader = BufReader::new(reader);
    let mut buf = Vec::new();
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf).await? == 0 {
            break;
        }

        let line = match std::str::from_utf8(&buf) {
            Ok(line) => line.trim().to_string(),
            Err(e) => {
                warn!("Discarding MCP message that is not valid UTF-8: {}", e);
                let error = JsonRpcError::parse_error(e.to_string());
                let _ = tx.send(JsonRpcResponse::error(Value::Null, error));
                continue;
            }
        };
        if line.is_empty() {
            continue;
        }

        debug!("MCP request: {}", line);

        let dispatcher = dispatcher.clone();
        let tx = tx.clone();
        tokio::spawn(async move {
            if let Some(response) = dispatcher.handle_message(&line).await {
                // The writer only goes away after every sender is dropped.
                let _ = tx.send(response);
            }
        });
    }

    // In-flight requests keep their own senders, so their responses still
    // get written before the writer task finishes.
    drop(tx);
    writer_task
        .await
        .map_err(|e| ServerError::Internal(format!("Writer task failed: {}", e)))?
}

async fn write_responses<W>(
    mut rx: mpsc::UnboundedReceiver<JsonRpcResponse>,
    mut writer: W,
) -> Result<(), ServerError>
where
    W: AsyncWrite + Unpin,
{
    while let Some(response) = rx.recv().await {
        let line = match serde_json::to_string(&response) {
            Ok(line) => line,
            Err(e) => {
                error!("Failed to serialize MCP response: {}", e);
                continue;
            }
        };

        debug!("MCP response: {}", line);

        writer.write_all(line.as_bytes()).await?;
        writer.write_all(b"\n").await?;
        writer.flush().await?;
    }
    Ok(())
}
