//! Interview session handlers.

use super::{get_str_param, parse_args, require_i64_param, require_str_param};
use crate::tools::{Schema, ToolDescriptor};
use docassemble_core::{
    DocassembleClient, DocassembleError, GoBack, InterviewAction, Result, SessionRef,
    SetInterviewVariables, StartInterview, Upload,
};
use serde_json::{json, Value};
use tracing::info;

fn session_schema() -> Schema {
    Schema::new()
        .string("i", "Interview file name, e.g. docassemble.demo:data/questions/questions.yml")
        .string("session", "Session id")
        .string("secret", "Decryption secret, for encrypted sessions")
        .required(&["i", "session"])
}

pub(crate) fn tools() -> Vec<ToolDescriptor> {
    vec![
        ToolDescriptor::new(
            "start_interview",
            "Start a new interview session. Extra arguments are passed to the interview as URL arguments.",
            Schema::new()
                .string("i", "Interview file name, e.g. docassemble.demo:data/questions/questions.yml")
                .string("secret", "Encryption secret for the new session")
                .required(&["i"])
                .allow_additional(),
        ),
        ToolDescriptor::new(
            "get_interview_variables",
            "Read all variables of an interview session.",
            session_schema(),
        ),
        ToolDescriptor::new(
            "set_interview_variables",
            "Set variables in an interview session, optionally uploading files.",
            session_schema()
                .object("variables", "Variable names and values")
                .boolean("raw", "Skip date and object conversion of values")
                .string("question_name", "Name of the question being answered")
                .boolean("question", "Return the next question (default: true)")
                .strings("delete_variables", "Variables to undefine")
                .any("event_list", "Event list of the question being answered")
                .object("file_variables", "Map of upload field names to variable names")
                .object("files", "Map of upload field names to local file paths"),
        ),
        ToolDescriptor::new(
            "get_current_question",
            "Describe the current question of an interview session.",
            session_schema(),
        ),
        ToolDescriptor::new(
            "run_interview_action",
            "Run an action in an interview session.",
            session_schema()
                .string("action", "Name of the action")
                .boolean("persistent", "Show the question the action leads to")
                .object("arguments", "Action arguments")
                .boolean("overwrite", "Replace the stored answers")
                .boolean("read_only", "Do not save the answers")
                .required(&["action"]),
        ),
        ToolDescriptor::new(
            "go_back_in_interview",
            "Undo the last answered question of a session.",
            session_schema().boolean("question", "Return the current question (default: true)"),
        ),
        ToolDescriptor::new(
            "delete_interview_session",
            "Delete one interview session.",
            Schema::new()
                .string("i", "Interview file name")
                .string("session", "Session id")
                .required(&["i", "session"]),
        ),
        ToolDescriptor::new(
            "retrieve_stored_file",
            "Download a stored file by number. Text files are returned inline; use output_path to save any file locally.",
            Schema::new()
                .integer("file_number", "File number")
                .string("output_path", "Local path to write the file to")
                .required(&["file_number"]),
        ),
    ]
}

pub async fn start_interview(client: &DocassembleClient, args: &Value) -> Result<Value> {
    let req: StartInterview = parse_args(args)?;
    if req.i.is_empty() {
        return Err(DocassembleError::InvalidParams {
            message: "Missing required parameter: i".to_string(),
        });
    }
    client.start_interview(&req).await
}

pub async fn get_interview_variables(client: &DocassembleClient, args: &Value) -> Result<Value> {
    let session: SessionRef = parse_args(args)?;
    client.get_interview_variables(&session).await
}

pub async fn set_interview_variables(client: &DocassembleClient, args: &Value) -> Result<Value> {
    let req: SetInterviewVariables = parse_args(args)?;

    let mut files = Vec::new();
    if let Some(map) = args.get("files").and_then(|v| v.as_object()) {
        for (field, path) in map {
            let path = path.as_str().ok_or_else(|| DocassembleError::InvalidParams {
                message: format!("files.{} must be a local file path", field),
            })?;
            files.push(Upload::from_path(field, path).await?);
        }
    }

    client.set_interview_variables(&req, files).await
}

pub async fn get_current_question(client: &DocassembleClient, args: &Value) -> Result<Value> {
    let session: SessionRef = parse_args(args)?;
    client.get_current_question(&session).await
}

pub async fn run_interview_action(client: &DocassembleClient, args: &Value) -> Result<Value> {
    let req: InterviewAction = parse_args(args)?;
    client.run_interview_action(&req).await
}

pub async fn go_back_in_interview(client: &DocassembleClient, args: &Value) -> Result<Value> {
    let req: GoBack = parse_args(args)?;
    client.go_back_in_interview(&req).await
}

pub async fn delete_interview_session(client: &DocassembleClient, args: &Value) -> Result<Value> {
    let i = require_str_param(args, "i")?;
    let session = require_str_param(args, "session")?;
    client.delete_interview_session(i, session).await
}

pub async fn retrieve_stored_file(client: &DocassembleClient, args: &Value) -> Result<Value> {
    let file_number = require_i64_param(args, "file_number")?;
    let file_number = u64::try_from(file_number).map_err(|_| DocassembleError::InvalidParams {
        message: "file_number must not be negative".to_string(),
    })?;
    let bytes = client.retrieve_stored_file(file_number).await?;

    if let Some(output_path) = get_str_param(args, "output_path") {
        tokio::fs::write(output_path, &bytes)
            .await
            .map_err(|e| DocassembleError::io_with_path(e, output_path))?;
        info!("Saved stored file {} to {}", file_number, output_path);
        return Ok(json!({
            "file_number": file_number,
            "saved_to": output_path,
            "size": bytes.len(),
        }));
    }

    match std::str::from_utf8(&bytes) {
        Ok(text) => Ok(Value::String(text.to_string())),
        Err(_) => Ok(json!({
            "file_number": file_number,
            "size": bytes.len(),
            "binary": true,
            "message": "Binary content; pass output_path to save the file",
        })),
    }
}
