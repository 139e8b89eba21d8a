//! Server version detection and graceful degradation.
//!
//! After [`DocassembleClient::connect`] the client knows the server version
//! (or `"unknown"`) and a table of features believed to work on it. The
//! `enhanced_*` helpers use that table, together with
//! [`ClientConfig::enable_fallbacks`](crate::ClientConfig::enable_fallbacks)
//! and [`ClientConfig::auto_retry`](crate::ClientConfig::auto_retry), to turn
//! some failures into placeholder payloads or a single retry.

use crate::client::{DocassembleClient, SessionRef, StartInterview, CLIENT_VERSION};
use crate::config::NetworkConfig;
use crate::http::{build_url, ApiRequest};
use crate::{DocassembleError, Result};
use regex::Regex;
use serde::Serialize;
use serde_json::{json, Value};
use std::collections::BTreeMap;
use std::sync::LazyLock;
use tracing::{debug, info, warn};

/// Reported when the version cannot be determined.
pub const UNKNOWN_VERSION: &str = "unknown";

static HTML_VERSION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"Docassemble[^0-9]*([0-9]+\.[0-9]+[^"<\s]*)"#)
        .expect("version regex must compile")
});

/// Marker the server puts in 404 pages for endpoints it does not know.
const HTML_ERROR_PAGE: &str = "HTML_ERROR_PAGE";

/// Which optional features are expected to work on the connected server.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FeatureSupport {
    table: BTreeMap<String, bool>,
}

impl Default for FeatureSupport {
    fn default() -> Self {
        let table = [
            ("convert_file_to_markdown", false),
            ("extract_template_fields", true),
            ("retrieve_stored_file", false),
            ("get_redirect_url", false),
            ("get_login_url", false),
            ("pull_package_to_playground", false),
            ("create_playground_project", true),
            ("advanced_session_management", true),
            ("session_variables", true),
            ("install_or_update_package", true),
            ("package_management", true),
        ]
        .into_iter()
        .map(|(name, supported)| (name.to_string(), supported))
        .collect();
        Self { table }
    }
}

impl FeatureSupport {
    /// Feature table for a detected server version.
    ///
    /// Major version 1 and above enables markdown conversion and redirect URLs.
    pub fn for_version(version: &str) -> Self {
        let mut features = Self::default();
        if let Some(major) = parse_major(version) {
            if major >= 1 {
                features.set("convert_file_to_markdown", true);
                features.set("get_redirect_url", true);
            }
            info!("Configured features for Docassemble version {}", version);
        }
        features
    }

    /// Features not in the table are assumed to be supported.
    pub fn is_supported(&self, feature: &str) -> bool {
        self.table.get(feature).copied().unwrap_or(true)
    }

    pub fn set(&mut self, feature: &str, supported: bool) {
        self.table.insert(feature.to_string(), supported);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
        self.table.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

fn parse_major(version: &str) -> Option<u64> {
    if version == UNKNOWN_VERSION {
        return None;
    }
    let stripped = version.replace('v', "");
    match stripped.split('.').next()?.trim().parse() {
        Ok(major) => Some(major),
        Err(_) => {
            debug!("Could not parse major version from '{}'", version);
            None
        }
    }
}

/// Extract a version number from the server's HTML landing page.
pub fn version_from_html(html: &str) -> Option<String> {
    if !html.contains("Docassemble") {
        return None;
    }
    HTML_VERSION
        .captures(html)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}

fn version_from_config(config: &Value) -> Option<String> {
    ["version", "build", "da_version"]
        .iter()
        .filter_map(|key| config.get(*key))
        .find_map(|value| match value {
            Value::Null | Value::Bool(false) => None,
            Value::String(s) if s.is_empty() => None,
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        })
}

impl DocassembleClient {
    /// Detect the server version and configure the feature table.
    ///
    /// Never fails; an undetectable version is recorded as `"unknown"`.
    pub async fn detect_capabilities(&mut self) {
        let version = self.detect_version().await;
        self.features = FeatureSupport::for_version(&version);
        self.da_version = Some(version);
    }

    /// Query `/api/config`, then the landing page, for a version string.
    pub async fn detect_version(&self) -> String {
        match self.get_server_config().await {
            Ok(config) => {
                if let Some(version) = version_from_config(&config) {
                    info!("Detected Docassemble version: {}", version);
                    return version;
                }
            }
            Err(e) => debug!("Could not detect version via config: {}", e),
        }

        let url = build_url(self.base_url(), "/");
        let page = self
            .http()
            .get(&url)
            .timeout(NetworkConfig::VERSION_CHECK_TIMEOUT)
            .send()
            .await;
        match page {
            Ok(response) => match response.text().await {
                Ok(html) => {
                    if let Some(version) = version_from_html(&html) {
                        info!("Detected Docassemble version from HTML: {}", version);
                        return version;
                    }
                }
                Err(e) => debug!("Could not read landing page: {}", e),
            },
            Err(e) => debug!("Could not detect version via HTML: {}", e),
        }

        warn!("Could not detect Docassemble version, using default compatibility");
        UNKNOWN_VERSION.to_string()
    }

    /// Detected server version, if [`detect_capabilities`](Self::detect_capabilities) ran.
    pub fn da_version(&self) -> Option<&str> {
        self.da_version.as_deref()
    }

    pub fn features(&self) -> &FeatureSupport {
        &self.features
    }

    pub fn is_feature_supported(&self, feature: &str) -> bool {
        self.features.is_supported(feature)
    }

    /// Placeholder result for a feature the server cannot provide.
    ///
    /// Returns [`DocassembleError::UnsupportedFeature`] when fallbacks are off.
    pub fn graceful_fallback(&self, feature: &str, message: Option<&str>) -> Result<Value> {
        if !self.config().enable_fallbacks {
            return Err(DocassembleError::UnsupportedFeature {
                feature: feature.to_string(),
                message: message
                    .unwrap_or("not supported in this Docassemble version")
                    .to_string(),
            });
        }

        warn!("Feature '{}' not available, using fallback", feature);
        Ok(json!({
            "status": "unsupported",
            "feature": feature,
            "message": message.unwrap_or("Feature not available in this version"),
            "version": self.da_version,
            "fallback": true,
        }))
    }

    /// [`request`](Self::request) with fallbacks for missing endpoints and a
    /// single retry on gateway errors.
    pub async fn enhanced_request(&self, request: ApiRequest) -> Result<Value> {
        let err = match self.request(request.clone()).await {
            Ok(value) => return Ok(value),
            Err(e) => e,
        };

        let missing_endpoint = err.status_code() == Some(404)
            && err
                .response_data()
                .is_some_and(|body| body.contains(HTML_ERROR_PAGE));
        if missing_endpoint && self.config().enable_fallbacks {
            let feature = request
                .endpoint
                .rsplit('/')
                .next()
                .unwrap_or(&request.endpoint)
                .to_string();
            let message = format!(
                "API endpoint '{}' not available in this version",
                request.endpoint
            );
            return self.graceful_fallback(&feature, Some(&message));
        }

        if self.config().auto_retry && err.is_retryable() {
            warn!("Retrying request to {} after error: {}", request.endpoint, err);
            tokio::time::sleep(NetworkConfig::RETRY_DELAY).await;
            if let Ok(value) = self.request(request).await {
                return Ok(value);
            }
        }

        Err(err)
    }

    /// Start an interview and annotate the result with session metadata.
    pub async fn enhanced_start_interview(&self, req: &StartInterview) -> Result<Value> {
        match self.start_interview(req).await {
            Ok(mut result) => {
                if let Some(obj) = result.as_object_mut().filter(|o| o.contains_key("session")) {
                    obj.insert(
                        "session_timeout".to_string(),
                        json!(self.config().session_timeout.as_secs()),
                    );
                    obj.insert("client_version".to_string(), json!(CLIENT_VERSION));
                    obj.insert("da_version".to_string(), json!(self.da_version));
                    obj.insert("enhanced".to_string(), json!(true));
                }
                Ok(result)
            }
            Err(e) => {
                tracing::error!("Enhanced interview start failed: {}", e);
                if self.config().enable_fallbacks {
                    let message = format!("Could not start interview '{}': {}", req.i, e);
                    self.graceful_fallback("start_interview", Some(&message))
                } else {
                    Err(e)
                }
            }
        }
    }

    /// Fetch interview variables, reporting expired sessions as a placeholder.
    pub async fn enhanced_get_interview_variables(&self, session: &SessionRef) -> Result<Value> {
        if !self.is_feature_supported("session_variables") {
            return self.graceful_fallback("get_interview_variables", None);
        }

        match self.get_interview_variables(session).await {
            Err(e)
                if self.config().enable_fallbacks
                    && e.to_string().contains("Unable to obtain interview") =>
            {
                warn!(
                    "Session {} expired or invalid, providing fallback",
                    session.session
                );
                Ok(json!({
                    "variables": {},
                    "status": "session_expired",
                    "message": "Session expired or invalid",
                    "session": session.session,
                    "fallback": true,
                }))
            }
            other => other,
        }
    }

    /// Version and capability summary of this connection.
    pub fn version_info(&self) -> Value {
        json!({
            "docassemble_version": self.da_version,
            "client_version": CLIENT_VERSION,
            "features_supported": self.features,
            "fallbacks_enabled": self.config().enable_fallbacks,
            "session_timeout": self.config().session_timeout.as_secs(),
            "base_url": self.base_url(),
        })
    }
}
