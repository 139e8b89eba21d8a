//! Server configuration, package and restart handlers.

use super::{optional_upload, parse_args, require_object_param, require_str_param};
use crate::tools::{Schema, ToolDescriptor};
use docassemble_core::{
    DocassembleClient, InstallPackage, PackageInstall, Result, UninstallPackage,
};
use serde_json::Value;

pub(crate) fn tools() -> Vec<ToolDescriptor> {
    vec![
        ToolDescriptor::new(
            "get_server_config",
            "Read the server configuration.",
            Schema::new(),
        ),
        ToolDescriptor::new(
            "write_server_config",
            "Replace the whole server configuration. The server restarts.",
            Schema::new()
                .object("config", "Complete configuration")
                .required(&["config"]),
        ),
        ToolDescriptor::new(
            "update_server_config",
            "Change individual configuration directives. The server restarts.",
            Schema::new()
                .object("config_changes", "Directives to set")
                .required(&["config_changes"]),
        ),
        ToolDescriptor::new(
            "list_installed_packages",
            "List the Python packages installed on the server.",
            Schema::new(),
        ),
        ToolDescriptor::new(
            "install_or_update_package",
            "Install or update a package from GitHub, PyPI or a local ZIP file. Returns a task_id.",
            Schema::new()
                .string("update", "Name of an installed package to update")
                .string("github_url", "GitHub repository URL")
                .string("branch", "Git branch")
                .string("pip", "PyPI package name")
                .string("zip_path", "Local path of a package ZIP file")
                .boolean("restart", "Restart the server afterwards (default: true)"),
        ),
        ToolDescriptor::new(
            "install_package",
            "Install a package given a GitHub URL or a PyPI name. Returns a task_id.",
            Schema::new()
                .string("package", "GitHub URL or PyPI package name")
                .string("github_url", "GitHub repository URL")
                .string("branch", "Git branch")
                .string("pip", "PyPI package name")
                .string("zip_path", "Local path of a package ZIP file")
                .boolean("restart", "Restart the server afterwards (default: true)"),
        ),
        ToolDescriptor::new(
            "uninstall_package",
            "Uninstall a package. Returns a task_id.",
            Schema::new()
                .string("package", "Package name")
                .boolean("restart", "Restart the server afterwards (default: true)")
                .required(&["package"]),
        ),
        ToolDescriptor::new(
            "get_package_update_status",
            "Poll the status of a package install or uninstall.",
            Schema::new()
                .string("task_id", "Task id returned by the install call")
                .required(&["task_id"]),
        ),
        ToolDescriptor::new(
            "trigger_server_restart",
            "Restart the server. Returns a task_id.",
            Schema::new(),
        ),
        ToolDescriptor::new(
            "get_restart_status",
            "Poll the status of a server restart.",
            Schema::new()
                .string("task_id", "Task id returned by the restart call")
                .required(&["task_id"]),
        ),
    ]
}

pub async fn get_server_config(client: &DocassembleClient, _args: &Value) -> Result<Value> {
    client.get_server_config().await
}

pub async fn write_server_config(client: &DocassembleClient, args: &Value) -> Result<Value> {
    let config = require_object_param(args, "config")?;
    client.write_server_config(config).await
}

pub async fn update_server_config(client: &DocassembleClient, args: &Value) -> Result<Value> {
    let changes = require_object_param(args, "config_changes")?;
    client.update_server_config(changes).await
}

pub async fn list_installed_packages(client: &DocassembleClient, _args: &Value) -> Result<Value> {
    client.list_installed_packages().await
}

pub async fn install_or_update_package(client: &DocassembleClient, args: &Value) -> Result<Value> {
    let req: PackageInstall = parse_args(args)?;
    let zip = optional_upload(args, "zip_path", "zip").await?;
    client.install_or_update_package(&req, zip).await
}

pub async fn install_package(client: &DocassembleClient, args: &Value) -> Result<Value> {
    let req: InstallPackage = parse_args(args)?;
    let zip = optional_upload(args, "zip_path", "zip").await?;
    client.install_package(&req, zip).await
}

pub async fn uninstall_package(client: &DocassembleClient, args: &Value) -> Result<Value> {
    let req: UninstallPackage = parse_args(args)?;
    client.uninstall_package(&req).await
}

pub async fn get_package_update_status(client: &DocassembleClient, args: &Value) -> Result<Value> {
    let task_id = require_str_param(args, "task_id")?;
    client.get_package_update_status(task_id).await
}

pub async fn trigger_server_restart(client: &DocassembleClient, _args: &Value) -> Result<Value> {
    client.trigger_server_restart().await
}

pub async fn get_restart_status(client: &DocassembleClient, args: &Value) -> Result<Value> {
    let task_id = require_str_param(args, "task_id")?;
    client.get_restart_status(task_id).await
}
