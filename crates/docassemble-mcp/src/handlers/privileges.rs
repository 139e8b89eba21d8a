//! Privilege handlers.

use super::{require_i64_param, require_str_param};
use crate::tools::{Schema, ToolDescriptor};
use docassemble_core::{DocassembleClient, Result};
use serde_json::Value;

pub(crate) fn tools() -> Vec<ToolDescriptor> {
    vec![
        ToolDescriptor::new(
            "list_privileges",
            "List the privileges defined on the server.",
            Schema::new(),
        ),
        ToolDescriptor::new(
            "add_privilege_to_role",
            "Define a new privilege.",
            Schema::new()
                .string("privilege", "Name of the privilege")
                .required(&["privilege"]),
        ),
        ToolDescriptor::new(
            "give_user_privilege",
            "Grant a privilege to a user.",
            Schema::new()
                .integer("user_id", "User id")
                .string("privilege", "Name of the privilege")
                .required(&["user_id", "privilege"]),
        ),
        ToolDescriptor::new(
            "remove_user_privilege",
            "Take a privilege away from a user.",
            Schema::new()
                .integer("user_id", "User id")
                .string("privilege", "Name of the privilege")
                .required(&["user_id", "privilege"]),
        ),
    ]
}

pub async fn list_privileges(client: &DocassembleClient, _args: &Value) -> Result<Value> {
    client.list_privileges().await
}

pub async fn add_privilege_to_role(client: &DocassembleClient, args: &Value) -> Result<Value> {
    let privilege = require_str_param(args, "privilege")?;
    client.add_privilege_to_role(privilege).await
}

pub async fn give_user_privilege(client: &DocassembleClient, args: &Value) -> Result<Value> {
    let user_id = require_i64_param(args, "user_id")?;
    let privilege = require_str_param(args, "privilege")?;
    client.give_user_privilege(user_id, privilege).await
}

pub async fn remove_user_privilege(client: &DocassembleClient, args: &Value) -> Result<Value> {
    let user_id = require_i64_param(args, "user_id")?;
    let privilege = require_str_param(args, "privilege")?;
    client.remove_user_privilege(user_id, privilege).await
}
