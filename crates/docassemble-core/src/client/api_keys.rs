//! API key management for the current user and for other users.

use super::DocassembleClient;
use crate::http::{ApiRequest, Params};
use crate::{DocassembleError, Result};
use serde::Deserialize;
use serde_json::Value;
use tracing::info;

/// A single item or a list of items.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum StringOrList {
    One(String),
    Many(Vec<String>),
}

impl From<StringOrList> for Value {
    fn from(value: StringOrList) -> Self {
        match value {
            StringOrList::One(s) => Value::String(s),
            StringOrList::Many(items) => items.into(),
        }
    }
}

/// Select one key by value or by name; empty selects all keys.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ApiKeyFilter {
    pub api_key: Option<String>,
    pub name: Option<String>,
}

impl ApiKeyFilter {
    fn params(&self) -> Params {
        Params::new()
            .opt("api_key", self.api_key.as_deref())
            .opt("name", self.name.as_deref())
    }
}

fn default_method() -> String {
    "none".to_string()
}

/// Arguments for creating an API key.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateApiKey {
    pub name: String,
    /// Origin restriction: `ip`, `referer` or `none`.
    #[serde(default = "default_method")]
    pub method: String,
    /// Allowed IP addresses or referer URLs.
    pub allowed: Option<Vec<String>>,
    /// Restricted permission list (admins only).
    pub permissions: Option<Vec<String>>,
}

impl Default for CreateApiKey {
    fn default() -> Self {
        Self {
            name: String::new(),
            method: default_method(),
            allowed: None,
            permissions: None,
        }
    }
}

impl CreateApiKey {
    fn params(&self) -> Params {
        Params::new()
            .insert("name", self.name.as_str())
            .insert("method", self.method.as_str())
            .opt("allowed", self.allowed.clone())
            .opt("permissions", self.permissions.clone())
    }
}

/// Arguments for modifying an API key.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UpdateApiKey {
    /// Key to modify; the key in use when omitted (current user only).
    pub api_key: Option<String>,
    pub name: Option<String>,
    pub method: Option<String>,
    pub allowed: Option<Vec<String>>,
    pub add_to_allowed: Option<StringOrList>,
    pub remove_from_allowed: Option<StringOrList>,
    pub permissions: Option<Vec<String>>,
    pub add_to_permissions: Option<StringOrList>,
    pub remove_from_permissions: Option<StringOrList>,
}

impl UpdateApiKey {
    fn params(&self) -> Params {
        Params::new()
            .opt("api_key", self.api_key.as_deref())
            .opt("name", self.name.as_deref())
            .opt("method", self.method.as_deref())
            .opt("allowed", self.allowed.clone())
            .opt("add_to_allowed", self.add_to_allowed.clone())
            .opt("remove_from_allowed", self.remove_from_allowed.clone())
            .opt("permissions", self.permissions.clone())
            .opt("add_to_permissions", self.add_to_permissions.clone())
            .opt("remove_from_permissions", self.remove_from_permissions.clone())
    }
}

impl DocassembleClient {
    pub async fn get_user_api_keys(&self, filter: &ApiKeyFilter) -> Result<Value> {
        self.request(ApiRequest::get("/api/user/api").query(filter.params()))
            .await
    }

    pub async fn delete_user_api_key(&self, api_key: &str) -> Result<Value> {
        let params = Params::new().insert("api_key", api_key);
        self.request(ApiRequest::delete("/api/user/api").query(params))
            .await
    }

    /// Create a key for the current user. Returns the new key.
    pub async fn create_user_api_key(&self, req: &CreateApiKey) -> Result<Value> {
        info!("Creating API key '{}'", req.name);
        self.request(ApiRequest::post("/api/user/api").json(req.params()))
            .await
    }

    pub async fn update_user_api_key(&self, req: &UpdateApiKey) -> Result<Value> {
        self.request(ApiRequest::patch("/api/user/api").json(req.params()))
            .await
    }

    pub async fn get_user_api_keys_by_id(
        &self,
        user_id: i64,
        filter: &ApiKeyFilter,
    ) -> Result<Value> {
        self.request(ApiRequest::get(format!("/api/user/{}/api", user_id)).query(filter.params()))
            .await
    }

    pub async fn delete_user_api_key_by_id(&self, user_id: i64, api_key: &str) -> Result<Value> {
        let params = Params::new().insert("api_key", api_key);
        self.request(ApiRequest::delete(format!("/api/user/{}/api", user_id)).query(params))
            .await
    }

    pub async fn create_user_api_key_by_id(
        &self,
        user_id: i64,
        req: &CreateApiKey,
    ) -> Result<Value> {
        info!("Creating API key '{}' for user {}", req.name, user_id);
        self.request(ApiRequest::post(format!("/api/user/{}/api", user_id)).json(req.params()))
            .await
    }

    /// Modify another user's key; `api_key` must be set.
    pub async fn update_user_api_key_by_id(
        &self,
        user_id: i64,
        req: &UpdateApiKey,
    ) -> Result<Value> {
        if req.api_key.as_deref().map_or(true, str::is_empty) {
            return Err(DocassembleError::InvalidParams {
                message: "api_key is required to update another user's API key".to_string(),
            });
        }
        self.request(ApiRequest::patch(format!("/api/user/{}/api", user_id)).json(req.params()))
            .await
    }
}
