//! Connection information.

use crate::tools::{Schema, ToolDescriptor};
use docassemble_core::{DocassembleClient, Result};
use serde_json::Value;

pub(crate) fn tools() -> Vec<ToolDescriptor> {
    vec![ToolDescriptor::new(
        "get_version_info",
        "Server version, detected features and client settings of this connection.",
        Schema::new(),
    )]
}

pub async fn get_version_info(client: &DocassembleClient, _args: &Value) -> Result<Value> {
    Ok(client.version_info())
}
