//! Temporary encrypted data storage.

use super::DocassembleClient;
use crate::http::{ApiRequest, Params};
use crate::Result;
use serde::Deserialize;
use serde_json::Value;

/// Arguments for `POST /api/stash_data`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StashData {
    pub data: Value,
    /// Lifetime in seconds (server default: 90 days).
    pub expire: Option<u64>,
    /// Store the data without date/object conversion.
    #[serde(default)]
    pub raw: bool,
}

/// Arguments for `GET /api/retrieve_stashed_data`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RetrieveStash {
    pub stash_key: String,
    pub secret: String,
    /// Remove the data after it has been read.
    #[serde(default)]
    pub delete: bool,
    /// New lifetime in seconds.
    pub refresh: Option<u64>,
}

impl DocassembleClient {
    /// Stash data. Returns `stash_key` and `secret`.
    pub async fn stash_data(&self, req: &StashData) -> Result<Value> {
        let data = Params::new()
            .insert("data", req.data.clone())
            .opt("expire", req.expire)
            .flag("raw", req.raw);
        self.request(ApiRequest::post("/api/stash_data").json(data))
            .await
    }

    pub async fn retrieve_stashed_data(&self, req: &RetrieveStash) -> Result<Value> {
        let params = Params::new()
            .insert("stash_key", req.stash_key.as_str())
            .insert("secret", req.secret.as_str())
            .flag("delete", req.delete)
            .opt("refresh", req.refresh);
        self.request(ApiRequest::get("/api/retrieve_stashed_data").query(params))
            .await
    }
}
