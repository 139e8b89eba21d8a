//! Request/response mapping for the Docassemble REST API.
//!
//! An [`ApiRequest`] describes one call: method, endpoint path, query
//! parameters and an optional JSON or multipart body. Responses are mapped
//! onto [`ApiPayload`]:
//!
//! - `204 No Content` -> [`ApiPayload::Empty`]
//! - other `2xx` with a JSON content type -> [`ApiPayload::Json`]
//! - other `2xx` -> [`ApiPayload::Text`]
//! - anything else -> [`DocassembleError::Api`] with status and raw body

use crate::{DocassembleError, Result};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Method, StatusCode};
use serde_json::{Map, Value};
use std::path::Path;

/// Join a base URL and an endpoint path with exactly one slash.
pub fn build_url(base_url: &str, endpoint: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        endpoint.trim_start_matches('/')
    )
}

/// Parameter dictionary assembled from optional arguments.
///
/// Optional values are only included when the caller supplied something:
/// `None`, empty strings, empty arrays and empty objects are skipped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Params {
    entries: Map<String, Value>,
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value unconditionally.
    pub fn insert(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.entries.insert(key.to_string(), value.into());
        self
    }

    /// Insert a value only if it is present and non-empty.
    pub fn opt<V: Into<Value>>(mut self, key: &str, value: Option<V>) -> Self {
        if let Some(value) = value {
            let value = value.into();
            if !is_blank(&value) {
                self.entries.insert(key.to_string(), value);
            }
        }
        self
    }

    /// Insert `"1"` when `enabled` is true (server flags that default off).
    pub fn flag(self, key: &str, enabled: bool) -> Self {
        if enabled {
            self.insert(key, "1")
        } else {
            self
        }
    }

    /// Insert `"0"` when `enabled` is false (server flags that default on).
    pub fn flag_off(self, key: &str, enabled: bool) -> Self {
        if enabled {
            self
        } else {
            self.insert(key, "0")
        }
    }

    /// Merge extra entries, skipping blank values.
    pub fn extend(mut self, extra: Map<String, Value>) -> Self {
        for (key, value) in extra {
            if !is_blank(&value) {
                self.entries.insert(key, value);
            }
        }
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Render as query-string pairs.
    pub fn to_query(&self) -> Vec<(String, String)> {
        self.entries
            .iter()
            .filter_map(|(k, v)| render_scalar(v).map(|s| (k.clone(), s)))
            .collect()
    }

    /// Render as multipart text fields.
    pub fn to_form_fields(&self) -> Vec<(String, String)> {
        self.to_query()
    }

    /// Render as a JSON object body.
    pub fn into_json(self) -> Value {
        Value::Object(self.entries)
    }
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
        _ => false,
    }
}

/// Strings pass through and numbers use their display form. Bools are
/// spelled `True`/`False`, which is how interview url arguments compare them
/// on the server. Arrays and objects are JSON-encoded, which is what the
/// server expects for structured form fields such as `variables`.
fn render_scalar(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(if *b { "True" } else { "False" }.to_string()),
        Value::Number(n) => Some(n.to_string()),
        other => Some(other.to_string()),
    }
}

/// A file attached to a multipart request.
#[derive(Debug, Clone, PartialEq)]
pub struct Upload {
    /// Form field name (e.g. `file`, `template`, `zip`).
    pub field: String,
    pub file_name: String,
    pub bytes: Vec<u8>,
    pub mime: Option<String>,
}

impl Upload {
    pub fn from_bytes(field: &str, file_name: &str, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            field: field.to_string(),
            file_name: file_name.to_string(),
            bytes: bytes.into(),
            mime: None,
        }
    }

    /// Read a local file into an upload, using its file name.
    pub async fn from_path(field: &str, path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| DocassembleError::io_with_path(e, path))?;
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("upload")
            .to_string();
        Ok(Self {
            field: field.to_string(),
            file_name,
            bytes,
            mime: None,
        })
    }

    pub fn with_mime(mut self, mime: &str) -> Self {
        self.mime = Some(mime.to_string());
        self
    }

    fn into_part(self) -> Result<reqwest::multipart::Part> {
        let part = reqwest::multipart::Part::bytes(self.bytes).file_name(self.file_name);
        match self.mime {
            Some(mime) => part.mime_str(&mime).map_err(|e| DocassembleError::InvalidParams {
                message: format!("Invalid MIME type '{}': {}", mime, e),
            }),
            None => Ok(part),
        }
    }
}

/// Body of an outgoing request.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum RequestBody {
    #[default]
    None,
    Json(Params),
    Multipart {
        fields: Params,
        files: Vec<Upload>,
    },
}

/// One call against the REST API.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub endpoint: String,
    pub query: Params,
    pub body: RequestBody,
}

impl ApiRequest {
    pub fn new(method: Method, endpoint: impl Into<String>) -> Self {
        Self {
            method,
            endpoint: endpoint.into(),
            query: Params::new(),
            body: RequestBody::None,
        }
    }

    pub fn get(endpoint: impl Into<String>) -> Self {
        Self::new(Method::GET, endpoint)
    }

    pub fn post(endpoint: impl Into<String>) -> Self {
        Self::new(Method::POST, endpoint)
    }

    pub fn patch(endpoint: impl Into<String>) -> Self {
        Self::new(Method::PATCH, endpoint)
    }

    pub fn delete(endpoint: impl Into<String>) -> Self {
        Self::new(Method::DELETE, endpoint)
    }

    pub fn query(mut self, params: Params) -> Self {
        self.query = params;
        self
    }

    pub fn json(mut self, params: Params) -> Self {
        self.body = RequestBody::Json(params);
        self
    }

    /// Send `fields` as JSON when there are no files, multipart otherwise.
    pub fn form_or_json(mut self, fields: Params, files: Vec<Upload>) -> Self {
        self.body = if files.is_empty() {
            RequestBody::Json(fields)
        } else {
            RequestBody::Multipart { fields, files }
        };
        self
    }

    pub fn multipart(mut self, fields: Params, files: Vec<Upload>) -> Self {
        self.body = RequestBody::Multipart { fields, files };
        self
    }
}

/// Build a multipart form from text fields and file uploads.
pub(crate) fn build_form(fields: Params, files: Vec<Upload>) -> Result<reqwest::multipart::Form> {
    let mut form = reqwest::multipart::Form::new();
    for (key, value) in fields.to_form_fields() {
        form = form.text(key, value);
    }
    for upload in files {
        let field = upload.field.clone();
        form = form.part(field, upload.into_part()?);
    }
    Ok(form)
}

/// Successful response payload.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiPayload {
    Empty,
    Json(Value),
    Text(String),
}

impl ApiPayload {
    /// Flatten into a JSON value (`Empty` becomes `null`).
    pub fn into_value(self) -> Value {
        match self {
            ApiPayload::Empty => Value::Null,
            ApiPayload::Json(v) => v,
            ApiPayload::Text(s) => Value::String(s),
        }
    }
}

/// Classify a response by status code and content type.
pub(crate) fn classify(
    status: StatusCode,
    content_type: Option<&str>,
    body: String,
) -> Result<ApiPayload> {
    if status == StatusCode::NO_CONTENT {
        return Ok(ApiPayload::Empty);
    }

    if status.is_success() {
        let is_json = content_type
            .map(|ct| ct.starts_with("application/json"))
            .unwrap_or(false);
        if is_json {
            let value = serde_json::from_str(&body)?;
            return Ok(ApiPayload::Json(value));
        }
        return Ok(ApiPayload::Text(body));
    }

    Err(DocassembleError::api(status.as_u16(), body))
}

/// Read a response and map it onto an [`ApiPayload`].
pub(crate) async fn map_response(
    response: reqwest::Response,
    timeout: std::time::Duration,
) -> Result<ApiPayload> {
    let status = response.status();
    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let body = response
        .text()
        .await
        .map_err(|e| DocassembleError::from_reqwest(e, timeout))?;
    classify(status, content_type.as_deref(), body)
}

/// Read a response body as raw bytes, applying the same status mapping.
pub(crate) async fn map_bytes_response(
    response: reqwest::Response,
    timeout: std::time::Duration,
) -> Result<bytes::Bytes> {
    let status = response.status();
    if status.is_success() {
        return response
            .bytes()
            .await
            .map_err(|e| DocassembleError::from_reqwest(e, timeout));
    }
    let body = response.text().await.unwrap_or_default();
    Err(DocassembleError::api(status.as_u16(), body))
}
