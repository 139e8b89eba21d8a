//! MCP server over stdio.
//!
//! Messages are newline-delimited JSON-RPC 2.0 frames. Requests are handled
//! one at a time in arrival order; notifications never get a reply.

use crate::handlers::dispatch_tool;
use crate::protocol::{
    JsonRpcRequest, JsonRpcResponse, ToolCallParams, DEFAULT_PROTOCOL_VERSION, INVALID_PARAMS,
    INVALID_REQUEST, METHOD_NOT_FOUND, PARSE_ERROR, SERVER_NAME,
};
use crate::tools::tool_registry;
use crate::wrapper::{wrap_tool_error, wrap_tool_result};
use docassemble_core::DocassembleClient;
use serde_json::{json, Value};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{debug, info, warn};

/// Application state shared across handlers.
pub struct AppState {
    pub client: DocassembleClient,
}

/// Serve MCP on the process's stdin and stdout until stdin closes.
pub async fn run_stdio(state: AppState) -> anyhow::Result<()> {
    let stdin = BufReader::new(tokio::io::stdin());
    let stdout = tokio::io::stdout();
    serve(&state, stdin, stdout).await
}

/// Read frames from `reader` and write replies to `writer`.
pub async fn serve<R, W>(state: &AppState, reader: R, mut writer: W) -> anyhow::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    info!("MCP server ready on stdio");
    let mut lines = reader.lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if let Some(response) = handle_message(state, line).await {
            let mut frame = serde_json::to_string(&response)?;
            frame.push('\n');
            writer.write_all(frame.as_bytes()).await?;
            writer.flush().await?;
        }
    }
    info!("stdin closed, shutting down");
    Ok(())
}

/// Handle one frame. Returns `None` when no reply is due.
pub async fn handle_message(state: &AppState, line: &str) -> Option<JsonRpcResponse> {
    let value: Value = match serde_json::from_str(line) {
        Ok(value) => value,
        Err(e) => {
            warn!("Unparsable frame: {}", e);
            return Some(JsonRpcResponse::error(None, PARSE_ERROR, "Parse error".to_string()));
        }
    };

    let request: JsonRpcRequest = match serde_json::from_value(value.clone()) {
        Ok(request) => request,
        Err(e) => {
            let id = value.get("id").cloned();
            return Some(JsonRpcResponse::error(
                id,
                INVALID_REQUEST,
                format!("Invalid request: {}", e),
            ));
        }
    };

    if request.jsonrpc != "2.0" {
        debug!("Frame without jsonrpc 2.0 marker: {}", request.method);
    }

    if request.is_notification() {
        debug!("Notification: {}", request.method);
        return None;
    }

    let id = request.id.clone();
    let params = request.params.unwrap_or_else(|| json!({}));

    let response = match request.method.as_str() {
        "initialize" => JsonRpcResponse::success(id, initialize_result(&params)),
        "ping" => JsonRpcResponse::success(id, json!({})),
        "tools/list" => {
            let tools = tool_registry();
            JsonRpcResponse::success(id, json!({ "tools": tools }))
        }
        "tools/call" => call_tool(state, id, params).await,
        other => {
            warn!("Unknown method: {}", other);
            JsonRpcResponse::error(id, METHOD_NOT_FOUND, "Method not found".to_string())
        }
    };
    Some(response)
}

fn initialize_result(params: &Value) -> Value {
    let protocol_version = params
        .get("protocolVersion")
        .and_then(|v| v.as_str())
        .unwrap_or(DEFAULT_PROTOCOL_VERSION);

    json!({
        "protocolVersion": protocol_version,
        "capabilities": {
            "tools": { "listChanged": false }
        },
        "serverInfo": {
            "name": SERVER_NAME,
            "version": env!("CARGO_PKG_VERSION"),
        }
    })
}

async fn call_tool(state: &AppState, id: Option<Value>, params: Value) -> JsonRpcResponse {
    let call: ToolCallParams = match serde_json::from_value(params) {
        Ok(call) => call,
        Err(e) => {
            return JsonRpcResponse::error(id, INVALID_PARAMS, format!("Invalid params: {}", e));
        }
    };
    let args = call.arguments.unwrap_or_else(|| json!({}));

    match dispatch_tool(&state.client, &call.name, &args).await {
        Ok(result) => JsonRpcResponse::success(id, wrap_tool_result(&result)),
        Err(e) => match wrap_tool_error(&e) {
            Some(wrapped) => {
                warn!("Tool {} failed: {}", call.name, e);
                JsonRpcResponse::success(id, wrapped)
            }
            None => JsonRpcResponse::error(id, e.to_rpc_error_code(), e.to_string()),
        },
    }
}
