//! Playground handlers.

use super::{get_i64_param, parse_args, uploads_from_paths};
use crate::tools::{Schema, ToolDescriptor};
use docassemble_core::{
    DocassembleClient, InstallPlaygroundPackages, PlaygroundFiles, PlaygroundProject, PullPackage,
    Result, UploadPlaygroundFiles,
};
use serde_json::Value;

const FOLDERS: &[&str] = &[
    "questions",
    "sources",
    "static",
    "templates",
    "modules",
    "packages",
];

fn location_schema() -> Schema {
    Schema::new()
        .enumeration("folder", FOLDERS, "Playground folder (default: static)")
        .string("project", "Playground project (default: default)")
        .integer("user_id", "Owner of the playground, for admins")
}

pub(crate) fn tools() -> Vec<ToolDescriptor> {
    vec![
        ToolDescriptor::new(
            "list_playground_files",
            "List the files in a playground folder, or fetch one file with filename.",
            location_schema().string("filename", "File to fetch"),
        ),
        ToolDescriptor::new(
            "delete_playground_file",
            "Delete a file from a playground folder.",
            location_schema()
                .string("filename", "File to delete")
                .required(&["filename"]),
        ),
        ToolDescriptor::new(
            "upload_playground_files",
            "Upload local files into a playground folder.",
            location_schema()
                .string_or_strings("file_paths", "Local path or list of paths to upload")
                .required(&["file_paths"]),
        ),
        ToolDescriptor::new(
            "install_playground_packages",
            "Install package ZIP files into the playground.",
            Schema::new()
                .string_or_strings("file_paths", "Local path or list of paths of ZIP files")
                .string("project", "Playground project (default: default)")
                .integer("user_id", "Owner of the playground, for admins")
                .boolean("restart", "Restart the server afterwards (default: true)")
                .required(&["file_paths"]),
        ),
        ToolDescriptor::new(
            "list_playground_projects",
            "List the projects in a playground.",
            Schema::new().integer("user_id", "Owner of the playground, for admins"),
        ),
        ToolDescriptor::new(
            "delete_playground_project",
            "Delete a playground project.",
            Schema::new()
                .string("name", "Project name")
                .integer("user_id", "Owner of the playground, for admins")
                .required(&["name"]),
        ),
        ToolDescriptor::new(
            "create_playground_project",
            "Create a playground project.",
            Schema::new()
                .string("name", "Project name")
                .integer("user_id", "Owner of the playground, for admins")
                .required(&["name"]),
        ),
        ToolDescriptor::new(
            "pull_package_to_playground",
            "Pull a package from GitHub or PyPI into a playground project.",
            Schema::new()
                .string("project", "Playground project (default: default)")
                .integer("user_id", "Owner of the playground, for admins")
                .string("github_url", "GitHub repository URL")
                .string("branch", "Git branch")
                .string("pip", "PyPI package name")
                .boolean("restart", "Restart the server afterwards (default: true)"),
        ),
        ToolDescriptor::new(
            "clear_interview_cache",
            "Clear the server's interview cache.",
            Schema::new(),
        ),
    ]
}

pub async fn list_playground_files(client: &DocassembleClient, args: &Value) -> Result<Value> {
    let req: PlaygroundFiles = parse_args(args)?;
    client.list_playground_files(&req).await
}

pub async fn delete_playground_file(client: &DocassembleClient, args: &Value) -> Result<Value> {
    let req: PlaygroundFiles = parse_args(args)?;
    client.delete_playground_file(&req).await
}

pub async fn upload_playground_files(client: &DocassembleClient, args: &Value) -> Result<Value> {
    let req: UploadPlaygroundFiles = parse_args(args)?;
    let files = uploads_from_paths(args, "file_paths").await?;
    client.upload_playground_files(&req, files).await
}

pub async fn install_playground_packages(
    client: &DocassembleClient,
    args: &Value,
) -> Result<Value> {
    let req: InstallPlaygroundPackages = parse_args(args)?;
    let packages = uploads_from_paths(args, "file_paths").await?;
    client.install_playground_packages(&req, packages).await
}

pub async fn list_playground_projects(client: &DocassembleClient, args: &Value) -> Result<Value> {
    client
        .list_playground_projects(get_i64_param(args, "user_id"))
        .await
}

pub async fn delete_playground_project(client: &DocassembleClient, args: &Value) -> Result<Value> {
    let project: PlaygroundProject = parse_args(args)?;
    client.delete_playground_project(&project).await
}

pub async fn create_playground_project(client: &DocassembleClient, args: &Value) -> Result<Value> {
    let project: PlaygroundProject = parse_args(args)?;
    client.create_playground_project(&project).await
}

pub async fn pull_package_to_playground(client: &DocassembleClient, args: &Value) -> Result<Value> {
    let req: PullPackage = parse_args(args)?;
    client.pull_package_to_playground(&req).await
}

pub async fn clear_interview_cache(client: &DocassembleClient, _args: &Value) -> Result<Value> {
    client.clear_interview_cache().await
}
