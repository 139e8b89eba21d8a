//! Session listing, deletion and temporary URL endpoints.

use super::DocassembleClient;
use crate::config::SessionConfig;
use crate::http::{ApiRequest, Params};
use crate::Result;
use serde::Deserialize;
use serde_json::{Map, Value};

/// Filters for listing interview sessions.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SessionListing {
    /// Decryption secret for encrypted sessions.
    pub secret: Option<String>,
    /// Interview file name.
    pub i: Option<String>,
    pub session: Option<String>,
    pub query: Option<String>,
    pub tag: Option<String>,
    /// Include the interview answers of each session.
    pub include_dictionary: bool,
    pub next_id: Option<String>,
}

impl SessionListing {
    fn params(&self) -> Params {
        Params::new()
            .opt("secret", self.secret.as_deref())
            .opt("i", self.i.as_deref())
            .opt("session", self.session.as_deref())
            .opt("query", self.query.as_deref())
            .opt("tag", self.tag.as_deref())
            .flag("include_dictionary", self.include_dictionary)
            .opt("next_id", self.next_id.as_deref())
    }
}

/// Filters for deleting interview sessions.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SessionFilter {
    pub i: Option<String>,
    pub session: Option<String>,
    pub query: Option<String>,
    pub tag: Option<String>,
}

impl SessionFilter {
    fn params(&self) -> Params {
        Params::new()
            .opt("i", self.i.as_deref())
            .opt("session", self.session.as_deref())
            .opt("query", self.query.as_deref())
            .opt("tag", self.tag.as_deref())
    }
}

fn default_url_expire() -> u64 {
    SessionConfig::DEFAULT_URL_EXPIRE_SECS
}

fn default_temp_url_expire() -> u64 {
    SessionConfig::DEFAULT_TEMP_URL_EXPIRE_SECS
}

/// Arguments for `POST /api/login_url`.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginUrl {
    pub username: String,
    pub password: String,
    pub i: Option<String>,
    pub session: Option<String>,
    #[serde(default)]
    pub resume_existing: bool,
    /// Lifetime in seconds.
    #[serde(default = "default_url_expire")]
    pub expire: u64,
    pub url_args: Option<Map<String, Value>>,
    /// Page to show after login instead of an interview.
    pub next: Option<String>,
}

impl Default for LoginUrl {
    fn default() -> Self {
        Self {
            username: String::new(),
            password: String::new(),
            i: None,
            session: None,
            resume_existing: false,
            expire: default_url_expire(),
            url_args: None,
            next: None,
        }
    }
}

/// Arguments for `POST /api/resume_url`.
#[derive(Debug, Clone, Deserialize)]
pub struct ResumeUrl {
    pub i: String,
    pub session: String,
    #[serde(default = "default_url_expire")]
    pub expire: u64,
    pub url_args: Option<Map<String, Value>>,
}

impl Default for ResumeUrl {
    fn default() -> Self {
        Self {
            i: String::new(),
            session: String::new(),
            expire: default_url_expire(),
            url_args: None,
        }
    }
}

/// Arguments for `GET /api/temp_url`.
#[derive(Debug, Clone, Deserialize)]
pub struct RedirectUrl {
    pub url: String,
    #[serde(default = "default_temp_url_expire")]
    pub expire: u64,
    /// The URL stops working after the first visit.
    #[serde(default)]
    pub one_time: bool,
}

impl Default for RedirectUrl {
    fn default() -> Self {
        Self {
            url: String::new(),
            expire: default_temp_url_expire(),
            one_time: false,
        }
    }
}

/// `expire` is only sent when it differs from the server default.
fn expire_param(params: Params, expire: u64, server_default: u64) -> Params {
    if expire != server_default {
        params.insert("expire", expire)
    } else {
        params
    }
}

impl DocassembleClient {
    /// All sessions on the server, one page at a time.
    pub async fn list_interview_sessions(&self, req: &SessionListing) -> Result<Value> {
        self.request(ApiRequest::get("/api/interviews").query(req.params()))
            .await
    }

    pub async fn delete_interview_sessions(&self, filter: &SessionFilter) -> Result<Value> {
        self.request(ApiRequest::delete("/api/interviews").query(filter.params()))
            .await
    }

    /// Sessions owned by the API key's user.
    pub async fn list_user_interview_sessions(&self, req: &SessionListing) -> Result<Value> {
        self.request(ApiRequest::get("/api/user/interviews").query(req.params()))
            .await
    }

    pub async fn delete_user_interview_sessions(&self, filter: &SessionFilter) -> Result<Value> {
        self.request(ApiRequest::delete("/api/user/interviews").query(filter.params()))
            .await
    }

    pub async fn list_user_sessions_by_id(
        &self,
        user_id: i64,
        req: &SessionListing,
    ) -> Result<Value> {
        let endpoint = format!("/api/user/{}/interviews", user_id);
        self.request(ApiRequest::get(endpoint).query(req.params()))
            .await
    }

    pub async fn delete_user_sessions_by_id(
        &self,
        user_id: i64,
        filter: &SessionFilter,
    ) -> Result<Value> {
        let endpoint = format!("/api/user/{}/interviews", user_id);
        self.request(ApiRequest::delete(endpoint).query(filter.params()))
            .await
    }

    /// Interviews listed on the server's interview index page.
    pub async fn list_advertised_interviews(
        &self,
        tag: Option<&str>,
        absolute_urls: bool,
    ) -> Result<Value> {
        let params = Params::new()
            .opt("tag", tag)
            .flag_off("absolute_urls", absolute_urls);
        self.request(ApiRequest::get("/api/list").query(params)).await
    }

    /// Decryption secret derived from a user's credentials.
    pub async fn get_user_secret(&self, username: &str, password: &str) -> Result<Value> {
        let params = Params::new()
            .insert("username", username)
            .insert("password", password);
        self.request(ApiRequest::get("/api/secret").query(params)).await
    }

    /// Temporary URL that logs the user in.
    pub async fn get_login_url(&self, req: &LoginUrl) -> Result<Value> {
        let data = Params::new()
            .insert("username", req.username.as_str())
            .insert("password", req.password.as_str())
            .opt("i", req.i.as_deref())
            .opt("session", req.session.as_deref())
            .flag("resume_existing", req.resume_existing);
        let data = expire_param(data, req.expire, SessionConfig::DEFAULT_URL_EXPIRE_SECS)
            .opt("url_args", req.url_args.clone())
            .opt("next", req.next.as_deref());

        self.request(ApiRequest::post("/api/login_url").json(data)).await
    }

    /// Temporary URL that resumes an existing session.
    pub async fn get_resume_url(&self, req: &ResumeUrl) -> Result<Value> {
        let data = Params::new()
            .insert("i", req.i.as_str())
            .insert("session", req.session.as_str());
        let data = expire_param(data, req.expire, SessionConfig::DEFAULT_URL_EXPIRE_SECS)
            .opt("url_args", req.url_args.clone());

        self.request(ApiRequest::post("/api/resume_url").json(data))
            .await
    }

    /// Temporary redirect to an arbitrary URL.
    pub async fn get_redirect_url(&self, req: &RedirectUrl) -> Result<Value> {
        let params = Params::new().insert("url", req.url.as_str());
        let mut params =
            expire_param(params, req.expire, SessionConfig::DEFAULT_TEMP_URL_EXPIRE_SECS);
        if req.one_time {
            params = params.insert("one_time", 1);
        }

        self.request(ApiRequest::get("/api/temp_url").query(params)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_listing_params_only_supplied() {
        let req = SessionListing {
            i: Some("docassemble.demo:data/questions/questions.yml".into()),
            include_dictionary: true,
            ..Default::default()
        };
        let params = req.params();
        assert_eq!(params.len(), 2);
        assert_eq!(params.get("include_dictionary"), Some(&json!("1")));
    }

    #[test]
    fn test_url_defaults_from_json() {
        let req: LoginUrl =
            serde_json::from_value(json!({"username": "u", "password": "p"})).unwrap();
        assert_eq!(req.expire, 15);

        let req: RedirectUrl = serde_json::from_value(json!({"url": "https://x"})).unwrap();
        assert_eq!(req.expire, 3600);
        assert!(!req.one_time);
    }

    #[test]
    fn test_expire_param_skips_default() {
        let params = expire_param(Params::new(), 15, 15);
        assert!(params.get("expire").is_none());
        let params = expire_param(Params::new(), 60, 15);
        assert_eq!(params.get("expire"), Some(&json!(60)));
    }
}
