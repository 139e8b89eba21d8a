//! Template field extraction and interview metadata.

use super::{parse_args, require_str_param};
use crate::tools::{Schema, ToolDescriptor};
use docassemble_core::{DocassembleClient, ExtractTemplateFields, Result, Upload};
use serde_json::Value;

pub(crate) fn tools() -> Vec<ToolDescriptor> {
    vec![
        ToolDescriptor::new(
            "extract_template_fields",
            "Extract the fillable fields of a local PDF or DOCX template.",
            Schema::new()
                .string("template_path", "Local path of the template")
                .enumeration("format", &["json", "yaml"], "Output format (default: json)")
                .required(&["template_path"]),
        ),
        ToolDescriptor::new(
            "get_interview_data",
            "Metadata and variable names of an interview file.",
            Schema::new()
                .string("i", "Interview file name")
                .required(&["i"]),
        ),
    ]
}

pub async fn extract_template_fields(client: &DocassembleClient, args: &Value) -> Result<Value> {
    let path = require_str_param(args, "template_path")?;
    let options: ExtractTemplateFields = parse_args(args)?;
    let template = Upload::from_path("template", path).await?;
    client.extract_template_fields(template, &options).await
}

pub async fn get_interview_data(client: &DocassembleClient, args: &Value) -> Result<Value> {
    let i = require_str_param(args, "i")?;
    client.get_interview_data(i).await
}
