//! Tool descriptors advertised through `tools/list`.
//!
//! Each handler domain contributes its own descriptors; [`tool_registry`]
//! concatenates them in a stable order.

use crate::handlers;
use serde::Serialize;
use serde_json::{json, Map, Value};

/// Prefix shared by every tool name.
pub const TOOL_PREFIX: &str = "docassemble_";

/// One MCP tool: name, description and JSON Schema of its arguments.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolDescriptor {
    pub name: String,
    pub description: String,
    pub input_schema: Value,
}

impl ToolDescriptor {
    /// `method` is the client method name without the tool prefix.
    pub fn new(method: &str, description: &str, schema: Schema) -> Self {
        Self {
            name: format!("{}{}", TOOL_PREFIX, method),
            description: description.to_string(),
            input_schema: schema.build(),
        }
    }
}

/// Builder for flat JSON object schemas.
#[derive(Debug, Default)]
pub struct Schema {
    properties: Map<String, Value>,
    required: Vec<String>,
    additional: bool,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    fn prop(mut self, name: &str, mut spec: Value, description: &str) -> Self {
        if !description.is_empty() {
            spec["description"] = json!(description);
        }
        self.properties.insert(name.to_string(), spec);
        self
    }

    pub fn string(self, name: &str, description: &str) -> Self {
        self.prop(name, json!({"type": "string"}), description)
    }

    pub fn integer(self, name: &str, description: &str) -> Self {
        self.prop(name, json!({"type": "integer"}), description)
    }

    pub fn boolean(self, name: &str, description: &str) -> Self {
        self.prop(name, json!({"type": "boolean"}), description)
    }

    pub fn object(self, name: &str, description: &str) -> Self {
        self.prop(name, json!({"type": "object"}), description)
    }

    pub fn strings(self, name: &str, description: &str) -> Self {
        self.prop(
            name,
            json!({"type": "array", "items": {"type": "string"}}),
            description,
        )
    }

    /// A single string or a list of strings.
    pub fn string_or_strings(self, name: &str, description: &str) -> Self {
        self.prop(
            name,
            json!({"oneOf": [
                {"type": "string"},
                {"type": "array", "items": {"type": "string"}}
            ]}),
            description,
        )
    }

    /// Any JSON value.
    pub fn any(self, name: &str, description: &str) -> Self {
        self.prop(name, json!({}), description)
    }

    pub fn enumeration(self, name: &str, values: &[&str], description: &str) -> Self {
        self.prop(name, json!({"type": "string", "enum": values}), description)
    }

    pub fn required(mut self, names: &[&str]) -> Self {
        for name in names {
            if !self.required.iter().any(|r| r == name) {
                self.required.push(name.to_string());
            }
        }
        self
    }

    /// Accept properties not listed in the schema.
    pub fn allow_additional(mut self) -> Self {
        self.additional = true;
        self
    }

    pub fn build(self) -> Value {
        let mut schema = json!({
            "type": "object",
            "properties": Value::Object(self.properties),
        });
        if !self.required.is_empty() {
            schema["required"] = json!(self.required);
        }
        if self.additional {
            schema["additionalProperties"] = json!(true);
        }
        schema
    }
}

/// All tools, grouped by domain.
pub fn tool_registry() -> Vec<ToolDescriptor> {
    let mut tools = Vec::new();
    tools.extend(handlers::users::tools());
    tools.extend(handlers::privileges::tools());
    tools.extend(handlers::sessions::tools());
    tools.extend(handlers::interviews::tools());
    tools.extend(handlers::playground::tools());
    tools.extend(handlers::admin::tools());
    tools.extend(handlers::api_keys::tools());
    tools.extend(handlers::files::tools());
    tools.extend(handlers::stash::tools());
    tools.extend(handlers::version::tools());
    tools
}
