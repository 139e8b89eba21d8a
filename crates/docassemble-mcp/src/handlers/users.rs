//! User management handlers.

use super::{get_str_param, parse_args, require_i64_param, require_str_param};
use crate::tools::{Schema, ToolDescriptor};
use docassemble_core::{
    CreateUser, DocassembleClient, InviteUsers, ListUsers, Result, UserProfile,
};
use serde_json::Value;

fn profile_schema() -> Schema {
    Schema::new()
        .string("first_name", "First name")
        .string("last_name", "Last name")
        .string("country", "Country code, e.g. US")
        .string("subdivisionfirst", "State or province")
        .string("subdivisionsecond", "County")
        .string("subdivisionthird", "Municipality")
        .string("organization", "Organization")
        .string("timezone", "Time zone, e.g. America/New_York")
        .string("language", "Language code, e.g. en")
        .string("password", "New password")
        .string("old_password", "Previous password, needed to keep encrypted answers readable")
}

pub(crate) fn tools() -> Vec<ToolDescriptor> {
    vec![
        ToolDescriptor::new(
            "create_user",
            "Create a user account. Returns the new user_id and password.",
            Schema::new()
                .string("username", "E-mail address of the new user")
                .string("password", "Password; generated when omitted")
                .strings("privileges", "Privileges to grant, e.g. [\"developer\"]")
                .string("first_name", "First name")
                .string("last_name", "Last name")
                .string("country", "Country code")
                .string("subdivisionfirst", "State or province")
                .string("subdivisionsecond", "County")
                .string("subdivisionthird", "Municipality")
                .string("organization", "Organization")
                .string("timezone", "Time zone")
                .string("language", "Language code")
                .required(&["username"]),
        ),
        ToolDescriptor::new(
            "invite_users",
            "Invite users by e-mail.",
            Schema::new()
                .strings("email_addresses", "Addresses to invite")
                .string("privilege", "Privilege of the invited users (default: user)")
                .boolean("send_emails", "Send invitation e-mails (default: true)")
                .required(&["email_addresses"]),
        ),
        ToolDescriptor::new(
            "list_users",
            "List registered users, one page at a time.",
            Schema::new()
                .boolean("include_inactive", "Include deactivated users")
                .string("next_id", "Cursor returned by the previous page"),
        ),
        ToolDescriptor::new(
            "get_user_by_username",
            "Look up a user by e-mail address.",
            Schema::new()
                .string("username", "E-mail address")
                .required(&["username"]),
        ),
        ToolDescriptor::new(
            "get_current_user",
            "Information about the owner of the API key.",
            Schema::new(),
        ),
        ToolDescriptor::new(
            "update_current_user",
            "Update the profile of the API key owner.",
            profile_schema(),
        ),
        ToolDescriptor::new(
            "get_user_by_id",
            "Look up a user by numeric id.",
            Schema::new()
                .integer("user_id", "User id")
                .required(&["user_id"]),
        ),
        ToolDescriptor::new(
            "deactivate_user",
            "Deactivate a user, or delete the account with `remove`.",
            Schema::new()
                .integer("user_id", "User id")
                .enumeration(
                    "remove",
                    &["account", "account_and_shared"],
                    "Delete the account instead of deactivating it",
                )
                .required(&["user_id"]),
        ),
        ToolDescriptor::new(
            "update_user",
            "Update another user's profile or active status.",
            profile_schema()
                .integer("user_id", "User id")
                .boolean("active", "Whether the account is active")
                .required(&["user_id"]),
        ),
    ]
}

pub async fn create_user(client: &DocassembleClient, args: &Value) -> Result<Value> {
    let req: CreateUser = parse_args(args)?;
    client.create_user(&req).await
}

pub async fn invite_users(client: &DocassembleClient, args: &Value) -> Result<Value> {
    let req: InviteUsers = parse_args(args)?;
    client.invite_users(&req).await
}

pub async fn list_users(client: &DocassembleClient, args: &Value) -> Result<Value> {
    let req: ListUsers = parse_args(args)?;
    client.list_users(&req).await
}

pub async fn get_user_by_username(client: &DocassembleClient, args: &Value) -> Result<Value> {
    let username = require_str_param(args, "username")?;
    client.get_user_by_username(username).await
}

pub async fn get_current_user(client: &DocassembleClient, _args: &Value) -> Result<Value> {
    client.get_current_user().await
}

pub async fn update_current_user(client: &DocassembleClient, args: &Value) -> Result<Value> {
    let profile: UserProfile = parse_args(args)?;
    client.update_current_user(&profile).await
}

pub async fn get_user_by_id(client: &DocassembleClient, args: &Value) -> Result<Value> {
    let user_id = require_i64_param(args, "user_id")?;
    client.get_user_by_id(user_id).await
}

pub async fn deactivate_user(client: &DocassembleClient, args: &Value) -> Result<Value> {
    let user_id = require_i64_param(args, "user_id")?;
    client
        .deactivate_user(user_id, get_str_param(args, "remove"))
        .await
}

pub async fn update_user(client: &DocassembleClient, args: &Value) -> Result<Value> {
    let user_id = require_i64_param(args, "user_id")?;
    let profile: UserProfile = parse_args(args)?;
    client.update_user(user_id, &profile).await
}
