//! Tool result wrapping.
//!
//! MCP clients expect `tools/call` results as a list of content blocks. A
//! successful call becomes one pretty-printed JSON text block; a failure
//! reported by the server becomes a text block flagged with `isError`, so the
//! model can read the status code and response body.

use docassemble_core::DocassembleError;
use serde_json::{json, Value};

/// Wrap a successful handler result.
pub fn wrap_tool_result(result: &Value) -> Value {
    let text = serde_json::to_string_pretty(result).unwrap_or_else(|_| result.to_string());
    text_content(text, false)
}

/// Wrap a failed handler call.
///
/// Returns `None` for errors that belong on the JSON-RPC error channel
/// (unknown tool, invalid arguments).
pub fn wrap_tool_error(err: &DocassembleError) -> Option<Value> {
    match err {
        DocassembleError::UnknownTool(_) | DocassembleError::InvalidParams { .. } => None,
        DocassembleError::Api {
            message,
            status_code,
            response_data,
        } => {
            let mut text = format!("Docassemble API error: {}", message);
            if let Some(code) = status_code {
                text.push_str(&format!(" (Status: {})", code));
            }
            if let Some(body) = response_data.as_deref().filter(|b| !b.is_empty()) {
                text.push_str(&format!("\nResponse: {}", body));
            }
            Some(text_content(text, true))
        }
        other => Some(text_content(format!("Error: {}", other), true)),
    }
}

fn text_content(text: String, is_error: bool) -> Value {
    json!({
        "content": [{"type": "text", "text": text}],
        "isError": is_error,
    })
}
