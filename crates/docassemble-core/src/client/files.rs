//! Template and interview introspection.

use super::DocassembleClient;
use crate::http::{ApiRequest, Params, Upload};
use crate::Result;
use serde::Deserialize;
use serde_json::Value;

fn default_format() -> String {
    "json".to_string()
}

/// Options for `POST /api/fields`.
#[derive(Debug, Clone, Deserialize)]
pub struct ExtractTemplateFields {
    /// `json` or `yaml`.
    #[serde(default = "default_format")]
    pub format: String,
}

impl Default for ExtractTemplateFields {
    fn default() -> Self {
        Self {
            format: default_format(),
        }
    }
}

impl DocassembleClient {
    /// Extract the fillable fields of a PDF or DOCX template.
    pub async fn extract_template_fields(
        &self,
        template: Upload,
        options: &ExtractTemplateFields,
    ) -> Result<Value> {
        let mut fields = Params::new();
        if options.format != "json" {
            fields = fields.insert("format", options.format.as_str());
        }
        let template = Upload {
            field: "template".to_string(),
            ..template
        };

        self.request(ApiRequest::post("/api/fields").multipart(fields, vec![template]))
            .await
    }

    /// Names, variables and other metadata of an interview file.
    pub async fn get_interview_data(&self, i: &str) -> Result<Value> {
        let params = Params::new().insert("i", i);
        self.request(ApiRequest::get("/api/interview_data").query(params))
            .await
    }
}
