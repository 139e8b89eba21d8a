//! HTTP client for the Docassemble REST API.
//!
//! One method per remote endpoint, grouped by domain in the submodules.
//! Methods with optional arguments take a request struct deriving
//! `Default` and `Deserialize`, so callers can either fill the fields in code
//! or deserialize them straight from JSON tool arguments. Every method builds
//! its parameter dictionary with the "include if supplied" rule of
//! [`Params`](crate::http::Params) and goes through [`DocassembleClient::request`].
//!
//! Authentication uses the `X-API-Key` header on every request.

mod admin;
mod api_keys;
mod files;
mod interviews;
mod playground;
mod privileges;
mod sessions;
mod stash;
mod users;

pub use admin::{InstallPackage, PackageInstall, UninstallPackage};
pub use api_keys::{ApiKeyFilter, CreateApiKey, StringOrList, UpdateApiKey};
pub use files::ExtractTemplateFields;
pub use interviews::{
    GoBack, InterviewAction, SessionRef, SetInterviewVariables, StartInterview,
};
pub use playground::{
    InstallPlaygroundPackages, PlaygroundFiles, PlaygroundProject, PullPackage,
    UploadPlaygroundFiles,
};
pub use sessions::{
    LoginUrl, RedirectUrl, ResumeUrl, SessionFilter, SessionListing,
};
pub use stash::{RetrieveStash, StashData};
pub use users::{CreateUser, InviteUsers, ListUsers, UserProfile};

use crate::config::{ClientConfig, NetworkConfig};
use crate::features::FeatureSupport;
use crate::http::{build_form, build_url, map_bytes_response, map_response, ApiRequest, RequestBody};
use crate::{DocassembleError, Result};
use reqwest::header::{HeaderMap, HeaderValue};
use serde_json::Value;
use tracing::debug;

/// Version string reported by this client in enhanced payloads.
pub const CLIENT_VERSION: &str = env!("CARGO_PKG_VERSION");

pub(crate) fn default_true() -> bool {
    true
}

/// Client for one Docassemble server.
pub struct DocassembleClient {
    config: ClientConfig,
    http: reqwest::Client,
    /// Server version found by [`detect_capabilities`](Self::detect_capabilities).
    pub(crate) da_version: Option<String>,
    pub(crate) features: FeatureSupport,
}

impl DocassembleClient {
    /// Create a client without contacting the server.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let mut key = HeaderValue::from_str(&config.api_key).map_err(|_| DocassembleError::Config {
            message: "API key contains characters not allowed in an HTTP header".to_string(),
        })?;
        key.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(NetworkConfig::API_KEY_HEADER, key);

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(NetworkConfig::USER_AGENT)
            .default_headers(headers)
            .build()
            .map_err(|e| DocassembleError::Network {
                message: format!("Failed to create HTTP client: {}", e),
                cause: None,
            })?;

        Ok(Self {
            config,
            http,
            da_version: None,
            features: FeatureSupport::default(),
        })
    }

    /// Create a client and detect the server version and feature support.
    pub async fn connect(config: ClientConfig) -> Result<Self> {
        let mut client = Self::new(config)?;
        client.detect_capabilities().await;
        Ok(client)
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    pub fn api_key(&self) -> &str {
        &self.config.api_key
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.http
    }

    /// Send a request and return the mapped payload as JSON.
    ///
    /// `204` becomes `null`, non-JSON bodies become a JSON string, and any
    /// status outside `2xx` is a [`DocassembleError::Api`].
    pub async fn request(&self, request: ApiRequest) -> Result<Value> {
        let response = self.send(request).await?;
        Ok(map_response(response, self.config.timeout)
            .await?
            .into_value())
    }

    /// Send a request and return the raw response body.
    pub async fn request_bytes(&self, request: ApiRequest) -> Result<bytes::Bytes> {
        let response = self.send(request).await?;
        map_bytes_response(response, self.config.timeout).await
    }

    async fn send(&self, request: ApiRequest) -> Result<reqwest::Response> {
        let url = build_url(&self.config.base_url, &request.endpoint);
        debug!("{} {}", request.method, url);

        let mut builder = self.http.request(request.method, &url);
        if !request.query.is_empty() {
            builder = builder.query(&request.query.to_query());
        }
        builder = match request.body {
            RequestBody::None => builder,
            RequestBody::Json(params) => builder.json(&params.into_json()),
            RequestBody::Multipart { fields, files } => builder.multipart(build_form(fields, files)?),
        };

        builder
            .send()
            .await
            .map_err(|e| DocassembleError::from_reqwest(e, self.config.timeout))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_stores_base_url_and_key() {
        let client =
            DocassembleClient::new(ClientConfig::new("https://example.com", "dummy")).unwrap();
        assert_eq!(client.base_url(), "https://example.com");
        assert_eq!(client.api_key(), "dummy");
        assert!(client.da_version.is_none());
    }

    #[test]
    fn test_client_rejects_header_unsafe_key() {
        let result = DocassembleClient::new(ClientConfig::new("https://example.com", "bad\nkey"));
        assert!(matches!(result, Err(DocassembleError::Config { .. })));
    }
}
