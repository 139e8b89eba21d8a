//! User management endpoints.

use super::{default_true, DocassembleClient};
use crate::http::{ApiRequest, Params};
use crate::Result;
use serde::Deserialize;
use serde_json::Value;
use tracing::info;

/// Arguments for `POST /api/user/new`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateUser {
    /// E-mail address used as the login name.
    pub username: String,
    /// Generated by the server when omitted.
    pub password: Option<String>,
    pub privileges: Option<Vec<String>>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub country: Option<String>,
    pub subdivisionfirst: Option<String>,
    pub subdivisionsecond: Option<String>,
    pub subdivisionthird: Option<String>,
    pub organization: Option<String>,
    pub timezone: Option<String>,
    pub language: Option<String>,
}

/// Arguments for `POST /api/user_invite`.
#[derive(Debug, Clone, Deserialize)]
pub struct InviteUsers {
    pub email_addresses: Vec<String>,
    /// Single privilege granted to every invitee (server default: `user`).
    pub privilege: Option<String>,
    #[serde(default = "default_true")]
    pub send_emails: bool,
}

impl Default for InviteUsers {
    fn default() -> Self {
        Self {
            email_addresses: Vec::new(),
            privilege: None,
            send_emails: true,
        }
    }
}

/// Arguments for `GET /api/user_list`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ListUsers {
    pub include_inactive: bool,
    /// Pagination cursor from a previous page.
    pub next_id: Option<String>,
}

/// Profile fields shared by the two user update endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserProfile {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub country: Option<String>,
    pub subdivisionfirst: Option<String>,
    pub subdivisionsecond: Option<String>,
    pub subdivisionthird: Option<String>,
    pub organization: Option<String>,
    pub timezone: Option<String>,
    pub language: Option<String>,
    pub password: Option<String>,
    /// Previous password, needed to re-encrypt stored interview answers.
    pub old_password: Option<String>,
    /// Only honored by [`DocassembleClient::update_user`].
    pub active: Option<bool>,
}

impl UserProfile {
    fn params(&self) -> Params {
        Params::new()
            .opt("first_name", self.first_name.as_deref())
            .opt("last_name", self.last_name.as_deref())
            .opt("country", self.country.as_deref())
            .opt("subdivisionfirst", self.subdivisionfirst.as_deref())
            .opt("subdivisionsecond", self.subdivisionsecond.as_deref())
            .opt("subdivisionthird", self.subdivisionthird.as_deref())
            .opt("organization", self.organization.as_deref())
            .opt("timezone", self.timezone.as_deref())
            .opt("language", self.language.as_deref())
            .opt("password", self.password.as_deref())
            .opt("old_password", self.old_password.as_deref())
    }
}

impl DocassembleClient {
    /// Create a user. Returns the new `user_id` and `password`.
    pub async fn create_user(&self, req: &CreateUser) -> Result<Value> {
        let data = Params::new()
            .insert("username", req.username.as_str())
            .opt("password", req.password.as_deref())
            .opt("privileges", req.privileges.clone())
            .opt("first_name", req.first_name.as_deref())
            .opt("last_name", req.last_name.as_deref())
            .opt("country", req.country.as_deref())
            .opt("subdivisionfirst", req.subdivisionfirst.as_deref())
            .opt("subdivisionsecond", req.subdivisionsecond.as_deref())
            .opt("subdivisionthird", req.subdivisionthird.as_deref())
            .opt("organization", req.organization.as_deref())
            .opt("timezone", req.timezone.as_deref())
            .opt("language", req.language.as_deref());

        info!("Creating Docassemble user '{}'", req.username);
        self.request(ApiRequest::post("/api/user/new").json(data)).await
    }

    /// Invite users by e-mail.
    pub async fn invite_users(&self, req: &InviteUsers) -> Result<Value> {
        let data = Params::new()
            .insert("email_addresses", req.email_addresses.clone())
            .opt("privilege", req.privilege.as_deref())
            .flag_off("send_emails", req.send_emails);

        self.request(ApiRequest::post("/api/user_invite").json(data)).await
    }

    /// List registered users, one page at a time.
    pub async fn list_users(&self, req: &ListUsers) -> Result<Value> {
        let params = Params::new()
            .flag("include_inactive", req.include_inactive)
            .opt("next_id", req.next_id.as_deref());

        self.request(ApiRequest::get("/api/user_list").query(params)).await
    }

    pub async fn get_user_by_username(&self, username: &str) -> Result<Value> {
        let params = Params::new().insert("username", username);
        self.request(ApiRequest::get("/api/user_info").query(params)).await
    }

    /// Information about the owner of the API key.
    pub async fn get_current_user(&self) -> Result<Value> {
        self.request(ApiRequest::get("/api/user")).await
    }

    pub async fn update_current_user(&self, profile: &UserProfile) -> Result<Value> {
        self.request(ApiRequest::patch("/api/user").json(profile.params()))
            .await
    }

    pub async fn get_user_by_id(&self, user_id: i64) -> Result<Value> {
        self.request(ApiRequest::get(format!("/api/user/{}", user_id)))
            .await
    }

    /// Deactivate a user, or delete it when `remove` is `account` or
    /// `account_and_shared`.
    pub async fn deactivate_user(&self, user_id: i64, remove: Option<&str>) -> Result<Value> {
        let params = Params::new().opt("remove", remove);
        info!("Deactivating Docassemble user {}", user_id);
        self.request(ApiRequest::delete(format!("/api/user/{}", user_id)).query(params))
            .await
    }

    pub async fn update_user(&self, user_id: i64, profile: &UserProfile) -> Result<Value> {
        let data = profile.params().opt("active", profile.active);
        self.request(ApiRequest::patch(format!("/api/user/{}", user_id)).json(data))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_invite_users_defaults_to_sending_emails() {
        let req: InviteUsers =
            serde_json::from_value(json!({"email_addresses": ["a@example.com"]})).unwrap();
        assert!(req.send_emails);
        assert!(req.privilege.is_none());
    }

    #[test]
    fn test_create_user_requires_username() {
        let result: std::result::Result<CreateUser, _> =
            serde_json::from_value(json!({"password": "x"}));
        assert!(result.is_err());
    }

    #[test]
    fn test_profile_params_skip_active() {
        let profile = UserProfile {
            first_name: Some("Ada".into()),
            active: Some(false),
            ..Default::default()
        };
        let params = profile.params();
        assert_eq!(params.get("first_name"), Some(&json!("Ada")));
        assert!(params.get("active").is_none());
    }
}
