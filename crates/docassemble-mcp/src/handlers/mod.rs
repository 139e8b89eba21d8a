//! Tool handlers, split by domain.
//!
//! Every handler takes the tool arguments as a JSON object, turns them into
//! the typed request of the client method and returns the raw JSON result.
//! Argument problems surface as [`DocassembleError::InvalidParams`].

pub mod admin;
pub mod api_keys;
pub mod files;
pub mod interviews;
pub mod playground;
pub mod privileges;
pub mod sessions;
pub mod stash;
pub mod users;
pub mod version;

use crate::tools::TOOL_PREFIX;
use docassemble_core::{DocassembleClient, DocassembleError, Result, Upload};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::path::Path;
use tracing::{debug, warn};

// ============================================================================
// Parameter extraction helpers
// ============================================================================

/// Deserialize the whole argument object into a typed request.
pub(crate) fn parse_args<T: DeserializeOwned>(args: &Value) -> Result<T> {
    serde_json::from_value(args.clone()).map_err(|e| DocassembleError::InvalidParams {
        message: e.to_string(),
    })
}

/// Extract an optional string parameter.
pub(crate) fn get_str_param<'a>(args: &'a Value, key: &str) -> Option<&'a str> {
    args.get(key).and_then(|v| v.as_str()).filter(|s| !s.is_empty())
}

/// Extract a required string parameter or return an error.
pub(crate) fn require_str_param<'a>(args: &'a Value, key: &str) -> Result<&'a str> {
    get_str_param(args, key).ok_or_else(|| missing(key))
}

/// Extract an optional integer; numeric strings are accepted too.
pub(crate) fn get_i64_param(args: &Value, key: &str) -> Option<i64> {
    let value = args.get(key)?;
    value
        .as_i64()
        .or_else(|| value.as_str().and_then(|s| s.trim().parse().ok()))
}

pub(crate) fn require_i64_param(args: &Value, key: &str) -> Result<i64> {
    get_i64_param(args, key).ok_or_else(|| missing(key))
}

/// Extract an optional bool parameter.
pub(crate) fn get_bool_param(args: &Value, key: &str) -> Option<bool> {
    args.get(key).and_then(|v| v.as_bool())
}

pub(crate) fn require_object_param(
    args: &Value,
    key: &str,
) -> Result<serde_json::Map<String, Value>> {
    args.get(key)
        .and_then(|v| v.as_object())
        .cloned()
        .ok_or_else(|| missing(key))
}

fn missing(key: &str) -> DocassembleError {
    DocassembleError::InvalidParams {
        message: format!("Missing required parameter: {}", key),
    }
}

// ============================================================================
// Local file helpers
// ============================================================================

/// Read local files into uploads. One file is sent as `file`, several as `files`.
pub(crate) async fn uploads_from_paths(args: &Value, key: &str) -> Result<Vec<Upload>> {
    let paths: Vec<String> = match args.get(key) {
        Some(Value::String(path)) => vec![path.clone()],
        Some(value @ Value::Array(_)) => parse_args(value)?,
        _ => return Err(missing(key)),
    };
    if paths.is_empty() {
        return Err(missing(key));
    }

    let field = if paths.len() == 1 { "file" } else { "files" };
    let mut uploads = Vec::with_capacity(paths.len());
    for path in &paths {
        uploads.push(Upload::from_path(field, Path::new(path)).await?);
    }
    Ok(uploads)
}

/// Read an optional single local file into an upload.
pub(crate) async fn optional_upload(args: &Value, key: &str, field: &str) -> Result<Option<Upload>> {
    match get_str_param(args, key) {
        Some(path) => Ok(Some(Upload::from_path(field, path).await?)),
        None => Ok(None),
    }
}

// ============================================================================
// Tool dispatcher
// ============================================================================

/// Dispatch a tool call to the appropriate domain handler.
pub async fn dispatch_tool(client: &DocassembleClient, name: &str, args: &Value) -> Result<Value> {
    let Some(method) = name.strip_prefix(TOOL_PREFIX) else {
        warn!("Unknown tool requested: {}", name);
        return Err(DocassembleError::UnknownTool(name.to_string()));
    };
    debug!("Tool call: {}({})", method, args);

    match method {
        // Users
        "create_user" => users::create_user(client, args).await,
        "invite_users" => users::invite_users(client, args).await,
        "list_users" => users::list_users(client, args).await,
        "get_user_by_username" => users::get_user_by_username(client, args).await,
        "get_current_user" => users::get_current_user(client, args).await,
        "update_current_user" => users::update_current_user(client, args).await,
        "get_user_by_id" => users::get_user_by_id(client, args).await,
        "deactivate_user" => users::deactivate_user(client, args).await,
        "update_user" => users::update_user(client, args).await,

        // Privileges
        "list_privileges" => privileges::list_privileges(client, args).await,
        "add_privilege_to_role" => privileges::add_privilege_to_role(client, args).await,
        "give_user_privilege" => privileges::give_user_privilege(client, args).await,
        "remove_user_privilege" => privileges::remove_user_privilege(client, args).await,

        // Sessions & URLs
        "list_interview_sessions" => sessions::list_interview_sessions(client, args).await,
        "delete_interview_sessions" => sessions::delete_interview_sessions(client, args).await,
        "list_user_interview_sessions" => {
            sessions::list_user_interview_sessions(client, args).await
        }
        "delete_user_interview_sessions" => {
            sessions::delete_user_interview_sessions(client, args).await
        }
        "list_user_sessions_by_id" => sessions::list_user_sessions_by_id(client, args).await,
        "delete_user_sessions_by_id" => sessions::delete_user_sessions_by_id(client, args).await,
        "list_advertised_interviews" => sessions::list_advertised_interviews(client, args).await,
        "get_user_secret" => sessions::get_user_secret(client, args).await,
        "get_login_url" => sessions::get_login_url(client, args).await,
        "get_resume_url" => sessions::get_resume_url(client, args).await,
        "get_redirect_url" => sessions::get_redirect_url(client, args).await,

        // Interview operations
        "start_interview" => interviews::start_interview(client, args).await,
        "get_interview_variables" => interviews::get_interview_variables(client, args).await,
        "set_interview_variables" => interviews::set_interview_variables(client, args).await,
        "get_current_question" => interviews::get_current_question(client, args).await,
        "run_interview_action" => interviews::run_interview_action(client, args).await,
        "go_back_in_interview" => interviews::go_back_in_interview(client, args).await,
        "delete_interview_session" => interviews::delete_interview_session(client, args).await,
        "retrieve_stored_file" => interviews::retrieve_stored_file(client, args).await,

        // Playground
        "list_playground_files" => playground::list_playground_files(client, args).await,
        "delete_playground_file" => playground::delete_playground_file(client, args).await,
        "upload_playground_files" => playground::upload_playground_files(client, args).await,
        "install_playground_packages" => {
            playground::install_playground_packages(client, args).await
        }
        "list_playground_projects" => playground::list_playground_projects(client, args).await,
        "delete_playground_project" => playground::delete_playground_project(client, args).await,
        "create_playground_project" => playground::create_playground_project(client, args).await,
        "pull_package_to_playground" => {
            playground::pull_package_to_playground(client, args).await
        }
        "clear_interview_cache" => playground::clear_interview_cache(client, args).await,

        // Administration
        "get_server_config" => admin::get_server_config(client, args).await,
        "write_server_config" => admin::write_server_config(client, args).await,
        "update_server_config" => admin::update_server_config(client, args).await,
        "list_installed_packages" => admin::list_installed_packages(client, args).await,
        "install_or_update_package" => admin::install_or_update_package(client, args).await,
        "install_package" => admin::install_package(client, args).await,
        "uninstall_package" => admin::uninstall_package(client, args).await,
        "get_package_update_status" => admin::get_package_update_status(client, args).await,
        "trigger_server_restart" => admin::trigger_server_restart(client, args).await,
        "get_restart_status" => admin::get_restart_status(client, args).await,

        // API keys
        "get_user_api_keys" => api_keys::get_user_api_keys(client, args).await,
        "delete_user_api_key" => api_keys::delete_user_api_key(client, args).await,
        "create_user_api_key" => api_keys::create_user_api_key(client, args).await,
        "update_user_api_key" => api_keys::update_user_api_key(client, args).await,
        "get_user_api_keys_by_id" => api_keys::get_user_api_keys_by_id(client, args).await,
        "delete_user_api_key_by_id" => api_keys::delete_user_api_key_by_id(client, args).await,
        "create_user_api_key_by_id" => api_keys::create_user_api_key_by_id(client, args).await,
        "update_user_api_key_by_id" => api_keys::update_user_api_key_by_id(client, args).await,

        // Files
        "extract_template_fields" => files::extract_template_fields(client, args).await,
        "get_interview_data" => files::get_interview_data(client, args).await,

        // Stash
        "stash_data" => stash::stash_data(client, args).await,
        "retrieve_stashed_data" => stash::retrieve_stashed_data(client, args).await,

        // Connection
        "get_version_info" => version::get_version_info(client, args).await,

        _ => {
            warn!("Unknown tool requested: {}", name);
            Err(DocassembleError::UnknownTool(name.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::tool_registry;
    use docassemble_core::ClientConfig;
    use serde_json::json;

    fn offline_client() -> DocassembleClient {
        // Nothing listens on the discard port, so any request fails fast.
        DocassembleClient::new(
            ClientConfig::new("http://127.0.0.1:9", "key")
                .with_timeout(std::time::Duration::from_millis(500)),
        )
        .unwrap()
    }

    #[test]
    fn test_param_helpers() {
        let args = json!({"user_id": "12", "name": "", "active": false, "n": 3});
        assert_eq!(get_i64_param(&args, "user_id"), Some(12));
        assert_eq!(get_i64_param(&args, "n"), Some(3));
        assert_eq!(get_str_param(&args, "name"), None);
        assert_eq!(get_bool_param(&args, "active"), Some(false));
        assert!(matches!(
            require_str_param(&args, "name"),
            Err(DocassembleError::InvalidParams { .. })
        ));
    }

    #[tokio::test]
    async fn test_unknown_tool() {
        let client = offline_client();
        let err = dispatch_tool(&client, "docassemble_nope", &json!({}))
            .await
            .unwrap_err();
        assert!(matches!(err, DocassembleError::UnknownTool(_)));

        let err = dispatch_tool(&client, "other_tool", &json!({}))
            .await
            .unwrap_err();
        assert!(matches!(err, DocassembleError::UnknownTool(_)));
    }

    #[tokio::test]
    async fn test_every_registered_tool_is_dispatchable() {
        let client = offline_client();
        for tool in tool_registry() {
            let result = dispatch_tool(&client, &tool.name, &json!({})).await;
            assert!(
                !matches!(result, Err(DocassembleError::UnknownTool(_))),
                "{} is registered but not dispatched",
                tool.name
            );
        }
    }

    #[tokio::test]
    async fn test_missing_required_argument() {
        let client = offline_client();
        let err = dispatch_tool(&client, "docassemble_get_interview_variables", &json!({"i": "a.yml"}))
            .await
            .unwrap_err();
        assert!(matches!(err, DocassembleError::InvalidParams { .. }));
    }

    #[tokio::test]
    async fn test_uploads_from_missing_file() {
        let err = uploads_from_paths(&json!({"file_paths": ["/nonexistent/x.yml"]}), "file_paths")
            .await
            .unwrap_err();
        assert!(matches!(err, DocassembleError::Io { .. }));
    }
}
