//! API key handlers for the current user and for other users.

use super::{parse_args, require_i64_param, require_str_param};
use crate::tools::{Schema, ToolDescriptor};
use docassemble_core::{ApiKeyFilter, CreateApiKey, DocassembleClient, Result, UpdateApiKey};
use serde_json::Value;

const METHODS: &[&str] = &["ip", "referer", "none"];

fn filter_schema() -> Schema {
    Schema::new()
        .string("api_key", "Select this key")
        .string("name", "Select the key with this name")
}

fn create_schema() -> Schema {
    Schema::new()
        .string("name", "Name of the new key")
        .enumeration("method", METHODS, "Origin restriction (default: none)")
        .strings("allowed", "Allowed IP addresses or referer URLs")
        .strings("permissions", "Restrict the key to these permissions")
        .required(&["name"])
}

fn update_schema() -> Schema {
    Schema::new()
        .string("api_key", "Key to modify")
        .string("name", "New name")
        .enumeration("method", METHODS, "Origin restriction")
        .strings("allowed", "Replace the allowed list")
        .string_or_strings("add_to_allowed", "Entries to add to the allowed list")
        .string_or_strings("remove_from_allowed", "Entries to remove from the allowed list")
        .strings("permissions", "Replace the permission list")
        .string_or_strings("add_to_permissions", "Permissions to add")
        .string_or_strings("remove_from_permissions", "Permissions to remove")
}

pub(crate) fn tools() -> Vec<ToolDescriptor> {
    vec![
        ToolDescriptor::new(
            "get_user_api_keys",
            "List the API keys of the current user, or one key by value or name.",
            filter_schema(),
        ),
        ToolDescriptor::new(
            "delete_user_api_key",
            "Delete one of the current user's API keys.",
            Schema::new()
                .string("api_key", "Key to delete")
                .required(&["api_key"]),
        ),
        ToolDescriptor::new(
            "create_user_api_key",
            "Create an API key for the current user.",
            create_schema(),
        ),
        ToolDescriptor::new(
            "update_user_api_key",
            "Modify one of the current user's API keys; the key in use when api_key is omitted.",
            update_schema(),
        ),
        ToolDescriptor::new(
            "get_user_api_keys_by_id",
            "List the API keys of a user.",
            filter_schema()
                .integer("user_id", "User id")
                .required(&["user_id"]),
        ),
        ToolDescriptor::new(
            "delete_user_api_key_by_id",
            "Delete one of a user's API keys.",
            Schema::new()
                .integer("user_id", "User id")
                .string("api_key", "Key to delete")
                .required(&["user_id", "api_key"]),
        ),
        ToolDescriptor::new(
            "create_user_api_key_by_id",
            "Create an API key for a user.",
            create_schema()
                .integer("user_id", "User id")
                .required(&["user_id"]),
        ),
        ToolDescriptor::new(
            "update_user_api_key_by_id",
            "Modify one of a user's API keys.",
            update_schema()
                .integer("user_id", "User id")
                .required(&["user_id", "api_key"]),
        ),
    ]
}

pub async fn get_user_api_keys(client: &DocassembleClient, args: &Value) -> Result<Value> {
    let filter: ApiKeyFilter = parse_args(args)?;
    client.get_user_api_keys(&filter).await
}

pub async fn delete_user_api_key(client: &DocassembleClient, args: &Value) -> Result<Value> {
    let api_key = require_str_param(args, "api_key")?;
    client.delete_user_api_key(api_key).await
}

pub async fn create_user_api_key(client: &DocassembleClient, args: &Value) -> Result<Value> {
    let req: CreateApiKey = parse_args(args)?;
    client.create_user_api_key(&req).await
}

pub async fn update_user_api_key(client: &DocassembleClient, args: &Value) -> Result<Value> {
    let req: UpdateApiKey = parse_args(args)?;
    client.update_user_api_key(&req).await
}

pub async fn get_user_api_keys_by_id(client: &DocassembleClient, args: &Value) -> Result<Value> {
    let user_id = require_i64_param(args, "user_id")?;
    let filter: ApiKeyFilter = parse_args(args)?;
    client.get_user_api_keys_by_id(user_id, &filter).await
}

pub async fn delete_user_api_key_by_id(client: &DocassembleClient, args: &Value) -> Result<Value> {
    let user_id = require_i64_param(args, "user_id")?;
    let api_key = require_str_param(args, "api_key")?;
    client.delete_user_api_key_by_id(user_id, api_key).await
}

pub async fn create_user_api_key_by_id(client: &DocassembleClient, args: &Value) -> Result<Value> {
    let user_id = require_i64_param(args, "user_id")?;
    let req: CreateApiKey = parse_args(args)?;
    client.create_user_api_key_by_id(user_id, &req).await
}

pub async fn update_user_api_key_by_id(client: &DocassembleClient, args: &Value) -> Result<Value> {
    let user_id = require_i64_param(args, "user_id")?;
    let req: UpdateApiKey = parse_args(args)?;
    client.update_user_api_key_by_id(user_id, &req).await
}
