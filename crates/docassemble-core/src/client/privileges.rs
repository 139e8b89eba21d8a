//! Privilege endpoints.

use super::DocassembleClient;
use crate::http::{ApiRequest, Params};
use crate::Result;
use serde_json::Value;
use tracing::info;

impl DocassembleClient {
    /// Names of all privileges defined on the server.
    pub async fn list_privileges(&self) -> Result<Value> {
        self.request(ApiRequest::get("/api/privileges")).await
    }

    pub async fn add_privilege_to_role(&self, privilege: &str) -> Result<Value> {
        info!("Adding privilege '{}'", privilege);
        let data = Params::new().insert("privilege", privilege);
        self.request(ApiRequest::post("/api/privileges").json(data))
            .await
    }

    pub async fn give_user_privilege(&self, user_id: i64, privilege: &str) -> Result<Value> {
        let data = Params::new().insert("privilege", privilege);
        self.request(ApiRequest::post(format!("/api/user/{}/privileges", user_id)).json(data))
            .await
    }

    pub async fn remove_user_privilege(&self, user_id: i64, privilege: &str) -> Result<Value> {
        let params = Params::new().insert("privilege", privilege);
        self.request(ApiRequest::delete(format!("/api/user/{}/privileges", user_id)).query(params))
            .await
    }
}
