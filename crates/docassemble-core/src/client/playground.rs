//! Playground endpoints: files, projects and package pulls.

use super::{default_true, DocassembleClient};
use crate::http::{ApiRequest, Params, Upload};
use crate::{DocassembleError, Result};
use serde::Deserialize;
use serde_json::Value;
use tracing::info;

/// Playground folder used when none is given.
pub const DEFAULT_FOLDER: &str = "static";
/// Playground project used when none is given.
pub const DEFAULT_PROJECT: &str = "default";

fn default_folder() -> String {
    DEFAULT_FOLDER.to_string()
}

fn default_project() -> String {
    DEFAULT_PROJECT.to_string()
}

/// Location of playground files: folder, project and owner.
///
/// With `filename` set, listing downloads that file instead.
#[derive(Debug, Clone, Deserialize)]
pub struct PlaygroundFiles {
    /// Another user's playground (admins only).
    pub user_id: Option<i64>,
    /// One of `questions`, `sources`, `static`, `templates`, `modules`, `packages`.
    #[serde(default = "default_folder")]
    pub folder: String,
    #[serde(default = "default_project")]
    pub project: String,
    pub filename: Option<String>,
}

impl Default for PlaygroundFiles {
    fn default() -> Self {
        Self {
            user_id: None,
            folder: default_folder(),
            project: default_project(),
            filename: None,
        }
    }
}

/// Target of `POST /api/playground`; the files themselves are passed separately.
#[derive(Debug, Clone, Deserialize)]
pub struct UploadPlaygroundFiles {
    pub user_id: Option<i64>,
    #[serde(default = "default_folder")]
    pub folder: String,
    #[serde(default = "default_project")]
    pub project: String,
}

impl Default for UploadPlaygroundFiles {
    fn default() -> Self {
        Self {
            user_id: None,
            folder: default_folder(),
            project: default_project(),
        }
    }
}

/// Target of `POST /api/playground_install`.
#[derive(Debug, Clone, Deserialize)]
pub struct InstallPlaygroundPackages {
    pub user_id: Option<i64>,
    #[serde(default = "default_project")]
    pub project: String,
    /// Restart the server after installation.
    #[serde(default = "default_true")]
    pub restart: bool,
}

impl Default for InstallPlaygroundPackages {
    fn default() -> Self {
        Self {
            user_id: None,
            project: default_project(),
            restart: true,
        }
    }
}

/// A playground project, for creation and deletion.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlaygroundProject {
    pub name: String,
    pub user_id: Option<i64>,
}

/// Arguments for `POST /api/playground/pull`.
#[derive(Debug, Clone, Deserialize)]
pub struct PullPackage {
    pub user_id: Option<i64>,
    #[serde(default = "default_project")]
    pub project: String,
    pub github_url: Option<String>,
    pub branch: Option<String>,
    /// Package name on PyPI.
    pub pip: Option<String>,
    #[serde(default = "default_true")]
    pub restart: bool,
}

impl Default for PullPackage {
    fn default() -> Self {
        Self {
            user_id: None,
            project: default_project(),
            github_url: None,
            branch: None,
            pip: None,
            restart: true,
        }
    }
}

impl DocassembleClient {
    /// List the files of a playground folder, or download one with `filename`.
    pub async fn list_playground_files(&self, req: &PlaygroundFiles) -> Result<Value> {
        let params = Params::new()
            .insert("folder", req.folder.as_str())
            .insert("project", req.project.as_str())
            .opt("user_id", req.user_id)
            .opt("filename", req.filename.as_deref());

        self.request(ApiRequest::get("/api/playground").query(params))
            .await
    }

    /// Delete `req.filename` from a playground folder.
    pub async fn delete_playground_file(&self, req: &PlaygroundFiles) -> Result<Value> {
        let filename = req
            .filename
            .as_deref()
            .filter(|f| !f.is_empty())
            .ok_or_else(|| DocassembleError::InvalidParams {
                message: "filename is required to delete a playground file".to_string(),
            })?;

        let params = Params::new()
            .insert("filename", filename)
            .insert("folder", req.folder.as_str())
            .insert("project", req.project.as_str())
            .opt("user_id", req.user_id);

        info!("Deleting playground file {}/{}", req.folder, filename);
        self.request(ApiRequest::delete("/api/playground").query(params))
            .await
    }

    pub async fn upload_playground_files(
        &self,
        req: &UploadPlaygroundFiles,
        files: Vec<Upload>,
    ) -> Result<Value> {
        let fields = Params::new()
            .insert("folder", req.folder.as_str())
            .insert("project", req.project.as_str())
            .opt("user_id", req.user_id);

        info!(
            "Uploading {} file(s) to playground folder {}",
            files.len(),
            req.folder
        );
        self.request(ApiRequest::post("/api/playground").multipart(fields, files))
            .await
    }

    /// Install package ZIP files into the playground.
    pub async fn install_playground_packages(
        &self,
        req: &InstallPlaygroundPackages,
        packages: Vec<Upload>,
    ) -> Result<Value> {
        let fields = Params::new()
            .insert("project", req.project.as_str())
            .opt("user_id", req.user_id)
            .flag_off("restart", req.restart);

        self.request(ApiRequest::post("/api/playground_install").multipart(fields, packages))
            .await
    }

    pub async fn list_playground_projects(&self, user_id: Option<i64>) -> Result<Value> {
        let params = Params::new().opt("user_id", user_id);
        self.request(ApiRequest::get("/api/playground/project").query(params))
            .await
    }

    pub async fn delete_playground_project(&self, project: &PlaygroundProject) -> Result<Value> {
        let params = Params::new()
            .insert("name", project.name.as_str())
            .opt("user_id", project.user_id);
        self.request(ApiRequest::delete("/api/projects").query(params))
            .await
    }

    pub async fn create_playground_project(&self, project: &PlaygroundProject) -> Result<Value> {
        let data = Params::new()
            .insert("name", project.name.as_str())
            .opt("user_id", project.user_id);
        self.request(ApiRequest::post("/api/projects").json(data)).await
    }

    /// Pull a package from GitHub or PyPI into a playground project.
    pub async fn pull_package_to_playground(&self, req: &PullPackage) -> Result<Value> {
        let data = Params::new()
            .insert("project", req.project.as_str())
            .opt("user_id", req.user_id)
            .opt("github_url", req.github_url.as_deref())
            .opt("branch", req.branch.as_deref())
            .opt("pip", req.pip.as_deref())
            .flag_off("restart", req.restart);

        self.request(ApiRequest::post("/api/playground/pull").json(data))
            .await
    }

    pub async fn clear_interview_cache(&self) -> Result<Value> {
        self.request(ApiRequest::post("/api/clear_cache").json(Params::new()))
            .await
    }
}
