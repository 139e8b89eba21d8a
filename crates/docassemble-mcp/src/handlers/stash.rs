//! Stash handlers.

use super::parse_args;
use crate::tools::{Schema, ToolDescriptor};
use docassemble_core::{DocassembleClient, Result, RetrieveStash, StashData};
use serde_json::Value;

pub(crate) fn tools() -> Vec<ToolDescriptor> {
    vec![
        ToolDescriptor::new(
            "stash_data",
            "Store data temporarily in encrypted form. Returns stash_key and secret.",
            Schema::new()
                .any("data", "Data to store")
                .integer("expire", "Lifetime in seconds")
                .boolean("raw", "Store values without conversion")
                .required(&["data"]),
        ),
        ToolDescriptor::new(
            "retrieve_stashed_data",
            "Read stashed data.",
            Schema::new()
                .string("stash_key", "Key returned by stash_data")
                .string("secret", "Secret returned by stash_data")
                .boolean("delete", "Delete the data after reading")
                .integer("refresh", "New lifetime in seconds")
                .required(&["stash_key", "secret"]),
        ),
    ]
}

pub async fn stash_data(client: &DocassembleClient, args: &Value) -> Result<Value> {
    let req: StashData = parse_args(args)?;
    client.stash_data(&req).await
}

pub async fn retrieve_stashed_data(client: &DocassembleClient, args: &Value) -> Result<Value> {
    let req: RetrieveStash = parse_args(args)?;
    client.retrieve_stashed_data(&req).await
}
