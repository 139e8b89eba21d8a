//! Server configuration, package management and restarts.

use super::{default_true, DocassembleClient};
use crate::http::{ApiRequest, Params, Upload};
use crate::Result;
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::info;

/// Arguments for `POST /api/package`.
#[derive(Debug, Clone, Deserialize)]
pub struct PackageInstall {
    /// Name of an installed package to update.
    pub update: Option<String>,
    pub github_url: Option<String>,
    pub branch: Option<String>,
    pub pip: Option<String>,
    #[serde(default = "default_true")]
    pub restart: bool,
}

impl Default for PackageInstall {
    fn default() -> Self {
        Self {
            update: None,
            github_url: None,
            branch: None,
            pip: None,
            restart: true,
        }
    }
}

/// Arguments for the package install shortcut.
///
/// `package` is interpreted as a GitHub URL when it starts with `http`,
/// otherwise as a PyPI name unless `pip` or `github_url` is already set.
#[derive(Debug, Clone, Deserialize)]
pub struct InstallPackage {
    pub package: Option<String>,
    pub github_url: Option<String>,
    pub branch: Option<String>,
    pub pip: Option<String>,
    #[serde(default = "default_true")]
    pub restart: bool,
}

impl Default for InstallPackage {
    fn default() -> Self {
        Self {
            package: None,
            github_url: None,
            branch: None,
            pip: None,
            restart: true,
        }
    }
}

impl InstallPackage {
    /// Resolve `package` into the explicit install form.
    pub fn resolve(&self) -> PackageInstall {
        let mut github_url = self.github_url.clone();
        let mut pip = self.pip.clone();

        match self.package.as_deref().filter(|p| !p.is_empty()) {
            Some(package) if package.starts_with("http") => {
                github_url = Some(package.to_string());
            }
            Some(package) if pip.is_none() && github_url.is_none() => {
                pip = Some(package.to_string());
            }
            _ => {}
        }

        PackageInstall {
            update: None,
            github_url,
            branch: self.branch.clone(),
            pip,
            restart: self.restart,
        }
    }
}

/// Arguments for `DELETE /api/package`.
#[derive(Debug, Clone, Deserialize)]
pub struct UninstallPackage {
    pub package: String,
    #[serde(default = "default_true")]
    pub restart: bool,
}

impl Default for UninstallPackage {
    fn default() -> Self {
        Self {
            package: String::new(),
            restart: true,
        }
    }
}

impl DocassembleClient {
    pub async fn get_server_config(&self) -> Result<Value> {
        self.request(ApiRequest::get("/api/config")).await
    }

    /// Replace the whole server configuration. Triggers a restart.
    pub async fn write_server_config(&self, config: Map<String, Value>) -> Result<Value> {
        info!("Writing server configuration");
        let data = Params::new().insert("config", config);
        self.request(ApiRequest::post("/api/config").json(data)).await
    }

    /// Change individual configuration directives. Triggers a restart.
    pub async fn update_server_config(&self, config_changes: Map<String, Value>) -> Result<Value> {
        info!("Updating {} server configuration directive(s)", config_changes.len());
        let data = Params::new().insert("config_changes", config_changes);
        self.request(ApiRequest::patch("/api/config").json(data)).await
    }

    pub async fn list_installed_packages(&self) -> Result<Value> {
        self.request(ApiRequest::get("/api/package")).await
    }

    /// Install or update a package from GitHub, PyPI or an uploaded ZIP.
    ///
    /// Returns a `task_id` for [`get_package_update_status`](Self::get_package_update_status).
    pub async fn install_or_update_package(
        &self,
        req: &PackageInstall,
        zip: Option<Upload>,
    ) -> Result<Value> {
        let fields = Params::new()
            .opt("update", req.update.as_deref())
            .opt("github_url", req.github_url.as_deref())
            .opt("branch", req.branch.as_deref())
            .opt("pip", req.pip.as_deref())
            .flag_off("restart", req.restart);
        let files = zip
            .map(|upload| Upload {
                field: "zip".to_string(),
                ..upload
            })
            .into_iter()
            .collect();

        self.request(ApiRequest::post("/api/package").form_or_json(fields, files))
            .await
    }

    pub async fn install_package(&self, req: &InstallPackage, zip: Option<Upload>) -> Result<Value> {
        self.install_or_update_package(&req.resolve(), zip).await
    }

    pub async fn uninstall_package(&self, req: &UninstallPackage) -> Result<Value> {
        let params = Params::new()
            .insert("package", req.package.as_str())
            .flag_off("restart", req.restart);

        info!("Uninstalling package {}", req.package);
        self.request(ApiRequest::delete("/api/package").query(params))
            .await
    }

    pub async fn get_package_update_status(&self, task_id: &str) -> Result<Value> {
        let params = Params::new().insert("task_id", task_id);
        self.request(ApiRequest::get("/api/package_update_status").query(params))
            .await
    }

    pub async fn trigger_server_restart(&self) -> Result<Value> {
        info!("Requesting server restart");
        self.request(ApiRequest::post("/api/restart").json(Params::new()))
            .await
    }

    pub async fn get_restart_status(&self, task_id: &str) -> Result<Value> {
        let params = Params::new().insert("task_id", task_id);
        self.request(ApiRequest::get("/api/restart_status").query(params))
            .await
    }
}
