//! Session listing, deletion and temporary URL handlers.

use super::{get_bool_param, get_str_param, parse_args, require_i64_param, require_str_param};
use crate::tools::{Schema, ToolDescriptor};
use docassemble_core::{
    DocassembleClient, LoginUrl, RedirectUrl, Result, ResumeUrl, SessionFilter, SessionListing,
};
use serde_json::Value;

fn filter_schema() -> Schema {
    Schema::new()
        .string("i", "Interview file name, e.g. docassemble.demo:data/questions/questions.yml")
        .string("session", "Session id")
        .string("query", "Session query expression")
        .string("tag", "Interview tag")
}

fn listing_schema() -> Schema {
    filter_schema()
        .string("secret", "Decryption secret for encrypted sessions")
        .boolean("include_dictionary", "Include the interview answers")
        .string("next_id", "Cursor returned by the previous page")
}

pub(crate) fn tools() -> Vec<ToolDescriptor> {
    vec![
        ToolDescriptor::new(
            "list_interview_sessions",
            "List interview sessions on the server, one page at a time.",
            listing_schema(),
        ),
        ToolDescriptor::new(
            "delete_interview_sessions",
            "Delete interview sessions on the server matching the filters.",
            filter_schema(),
        ),
        ToolDescriptor::new(
            "list_user_interview_sessions",
            "List the API key owner's interview sessions.",
            listing_schema(),
        ),
        ToolDescriptor::new(
            "delete_user_interview_sessions",
            "Delete the API key owner's interview sessions matching the filters.",
            filter_schema(),
        ),
        ToolDescriptor::new(
            "list_user_sessions_by_id",
            "List the interview sessions of a user.",
            listing_schema()
                .integer("user_id", "User id")
                .required(&["user_id"]),
        ),
        ToolDescriptor::new(
            "delete_user_sessions_by_id",
            "Delete interview sessions of a user.",
            filter_schema()
                .integer("user_id", "User id")
                .required(&["user_id"]),
        ),
        ToolDescriptor::new(
            "list_advertised_interviews",
            "List the interviews shown on the server's interview list page.",
            Schema::new()
                .string("tag", "Only interviews with this tag")
                .boolean("absolute_urls", "Return absolute URLs (default: true)"),
        ),
        ToolDescriptor::new(
            "get_user_secret",
            "Obtain the decryption secret for a user's encrypted sessions.",
            Schema::new()
                .string("username", "E-mail address")
                .string("password", "Password")
                .required(&["username", "password"]),
        ),
        ToolDescriptor::new(
            "get_login_url",
            "Create a temporary URL that logs a user in.",
            Schema::new()
                .string("username", "E-mail address")
                .string("password", "Password")
                .string("i", "Interview to open after login")
                .string("session", "Session to resume after login")
                .boolean("resume_existing", "Resume an existing session of the interview")
                .integer("expire", "Lifetime in seconds (default: 15)")
                .object("url_args", "Extra URL arguments")
                .string("next", "Page to show after login instead of an interview")
                .required(&["username", "password"]),
        ),
        ToolDescriptor::new(
            "get_resume_url",
            "Create a temporary URL that resumes an interview session.",
            Schema::new()
                .string("i", "Interview file name")
                .string("session", "Session id")
                .integer("expire", "Lifetime in seconds (default: 15)")
                .object("url_args", "Extra URL arguments")
                .required(&["i", "session"]),
        ),
        ToolDescriptor::new(
            "get_redirect_url",
            "Create a temporary URL that redirects to another URL.",
            Schema::new()
                .string("url", "Target URL")
                .integer("expire", "Lifetime in seconds (default: 3600)")
                .boolean("one_time", "The URL works only once")
                .required(&["url"]),
        ),
    ]
}

pub async fn list_interview_sessions(client: &DocassembleClient, args: &Value) -> Result<Value> {
    let req: SessionListing = parse_args(args)?;
    client.list_interview_sessions(&req).await
}

pub async fn delete_interview_sessions(client: &DocassembleClient, args: &Value) -> Result<Value> {
    let filter: SessionFilter = parse_args(args)?;
    client.delete_interview_sessions(&filter).await
}

pub async fn list_user_interview_sessions(
    client: &DocassembleClient,
    args: &Value,
) -> Result<Value> {
    let req: SessionListing = parse_args(args)?;
    client.list_user_interview_sessions(&req).await
}

pub async fn delete_user_interview_sessions(
    client: &DocassembleClient,
    args: &Value,
) -> Result<Value> {
    let filter: SessionFilter = parse_args(args)?;
    client.delete_user_interview_sessions(&filter).await
}

pub async fn list_user_sessions_by_id(client: &DocassembleClient, args: &Value) -> Result<Value> {
    let user_id = require_i64_param(args, "user_id")?;
    let req: SessionListing = parse_args(args)?;
    client.list_user_sessions_by_id(user_id, &req).await
}

pub async fn delete_user_sessions_by_id(client: &DocassembleClient, args: &Value) -> Result<Value> {
    let user_id = require_i64_param(args, "user_id")?;
    let filter: SessionFilter = parse_args(args)?;
    client.delete_user_sessions_by_id(user_id, &filter).await
}

pub async fn list_advertised_interviews(client: &DocassembleClient, args: &Value) -> Result<Value> {
    let absolute_urls = get_bool_param(args, "absolute_urls").unwrap_or(true);
    client
        .list_advertised_interviews(get_str_param(args, "tag"), absolute_urls)
        .await
}

pub async fn get_user_secret(client: &DocassembleClient, args: &Value) -> Result<Value> {
    let username = require_str_param(args, "username")?;
    let password = require_str_param(args, "password")?;
    client.get_user_secret(username, password).await
}

pub async fn get_login_url(client: &DocassembleClient, args: &Value) -> Result<Value> {
    let req: LoginUrl = parse_args(args)?;
    client.get_login_url(&req).await
}

pub async fn get_resume_url(client: &DocassembleClient, args: &Value) -> Result<Value> {
    let req: ResumeUrl = parse_args(args)?;
    client.get_resume_url(&req).await
}

pub async fn get_redirect_url(client: &DocassembleClient, args: &Value) -> Result<Value> {
    let req: RedirectUrl = parse_args(args)?;
    client.get_redirect_url(&req).await
}
