//! Interview session operations.

use super::{default_true, DocassembleClient};
use crate::http::{ApiRequest, Params, Upload};
use crate::Result;
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::info;

/// Identifies one interview session.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SessionRef {
    /// Interview file name, e.g. `docassemble.demo:data/questions/questions.yml`.
    pub i: String,
    pub session: String,
    /// Decryption secret for encrypted sessions.
    pub secret: Option<String>,
}

impl SessionRef {
    pub fn new(i: impl Into<String>, session: impl Into<String>) -> Self {
        Self {
            i: i.into(),
            session: session.into(),
            secret: None,
        }
    }

    pub fn with_secret(mut self, secret: impl Into<String>) -> Self {
        self.secret = Some(secret.into());
        self
    }

    fn params(&self) -> Params {
        Params::new()
            .insert("i", self.i.as_str())
            .insert("session", self.session.as_str())
            .opt("secret", self.secret.as_deref())
    }
}

/// Arguments for `GET /api/session/new`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StartInterview {
    pub i: String,
    pub secret: Option<String>,
    /// Any other key is forwarded to the interview as a URL argument.
    #[serde(flatten)]
    pub url_args: Map<String, Value>,
}

impl StartInterview {
    pub fn new(i: impl Into<String>) -> Self {
        Self {
            i: i.into(),
            ..Default::default()
        }
    }
}

/// Arguments for `POST /api/session`.
#[derive(Debug, Clone, Deserialize)]
pub struct SetInterviewVariables {
    pub i: String,
    pub session: String,
    pub secret: Option<String>,
    pub variables: Option<Map<String, Value>>,
    #[serde(default)]
    pub raw: bool,
    /// Name of the question being answered.
    pub question_name: Option<String>,
    /// Evaluate the interview and return the next question.
    #[serde(default = "default_true")]
    pub question: bool,
    pub delete_variables: Option<Vec<String>>,
    pub event_list: Option<Vec<Value>>,
    pub file_variables: Option<Map<String, Value>>,
}

impl Default for SetInterviewVariables {
    fn default() -> Self {
        Self {
            i: String::new(),
            session: String::new(),
            secret: None,
            variables: None,
            raw: false,
            question_name: None,
            question: true,
            delete_variables: None,
            event_list: None,
            file_variables: None,
        }
    }
}

/// Arguments for `POST /api/session/action`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InterviewAction {
    pub i: String,
    pub session: String,
    pub action: String,
    pub secret: Option<String>,
    #[serde(default)]
    pub persistent: bool,
    pub arguments: Option<Map<String, Value>>,
    #[serde(default)]
    pub overwrite: bool,
    #[serde(default)]
    pub read_only: bool,
}

/// Arguments for `POST /api/session/back`.
#[derive(Debug, Clone, Deserialize)]
pub struct GoBack {
    pub i: String,
    pub session: String,
    pub secret: Option<String>,
    #[serde(default = "default_true")]
    pub question: bool,
}

impl Default for GoBack {
    fn default() -> Self {
        Self {
            i: String::new(),
            session: String::new(),
            secret: None,
            question: true,
        }
    }
}

impl DocassembleClient {
    /// Start a new session. The result carries `session`, `encrypted` and
    /// possibly `secret`.
    pub async fn start_interview(&self, req: &StartInterview) -> Result<Value> {
        let params = Params::new()
            .insert("i", req.i.as_str())
            .opt("secret", req.secret.as_deref())
            .extend(req.url_args.clone());

        info!("Starting interview {}", req.i);
        self.request(ApiRequest::get("/api/session/new").query(params))
            .await
    }

    /// The interview answers of a session.
    pub async fn get_interview_variables(&self, session: &SessionRef) -> Result<Value> {
        self.request(ApiRequest::get("/api/session").query(session.params()))
            .await
    }

    /// Set variables, optionally uploading files into file variables.
    ///
    /// The body is JSON unless `files` is non-empty, in which case it is
    /// sent as multipart form data.
    pub async fn set_interview_variables(
        &self,
        req: &SetInterviewVariables,
        files: Vec<Upload>,
    ) -> Result<Value> {
        let mut data = Params::new()
            .insert("i", req.i.as_str())
            .insert("session", req.session.as_str())
            .opt("secret", req.secret.as_deref())
            .opt("variables", req.variables.clone());
        // raw mode is signalled with "0"
        if req.raw {
            data = data.insert("raw", "0");
        }
        let data = data
            .opt("question_name", req.question_name.as_deref())
            .flag_off("question", req.question)
            .opt("delete_variables", req.delete_variables.clone())
            .opt("event_list", req.event_list.clone())
            .opt("file_variables", req.file_variables.clone());

        self.request(ApiRequest::post("/api/session").form_or_json(data, files))
            .await
    }

    pub async fn get_current_question(&self, session: &SessionRef) -> Result<Value> {
        self.request(ApiRequest::get("/api/session/question").query(session.params()))
            .await
    }

    pub async fn run_interview_action(&self, req: &InterviewAction) -> Result<Value> {
        let data = Params::new()
            .insert("i", req.i.as_str())
            .insert("session", req.session.as_str())
            .insert("action", req.action.as_str())
            .opt("secret", req.secret.as_deref())
            .flag("persistent", req.persistent)
            .opt("arguments", req.arguments.clone())
            .flag("overwrite", req.overwrite)
            .flag("read_only", req.read_only);

        self.request(ApiRequest::post("/api/session/action").json(data))
            .await
    }

    /// Undo the last answered question.
    pub async fn go_back_in_interview(&self, req: &GoBack) -> Result<Value> {
        let data = Params::new()
            .insert("i", req.i.as_str())
            .insert("session", req.session.as_str())
            .opt("secret", req.secret.as_deref())
            .flag_off("question", req.question);

        self.request(ApiRequest::post("/api/session/back").json(data))
            .await
    }

    pub async fn delete_interview_session(&self, i: &str, session: &str) -> Result<Value> {
        let params = Params::new().insert("i", i).insert("session", session);
        info!("Deleting session {} of {}", session, i);
        self.request(ApiRequest::delete("/api/session").query(params))
            .await
    }

    /// Download a stored file by its number.
    pub async fn retrieve_stored_file(&self, file_number: u64) -> Result<bytes::Bytes> {
        self.request_bytes(ApiRequest::get(format!("/api/file/{}", file_number)))
            .await
    }
}
