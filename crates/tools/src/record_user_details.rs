//! record_user_details: notify the owner that a visitor wants to be in touch.

use async_trait::async_trait;
use persona_core::error::ToolError;
use persona_core::tool::{Tool, ToolResult};
use persona_core::Notifier;
use serde::Deserialize;
use std::sync::Arc;
use tracing::warn;

const DEFAULT_NAME: &str = "Name not provided";
const DEFAULT_NOTES: &str = "not provided";

pub struct RecordUserDetailsTool {
    notifier: Arc<dyn Notifier>,
}

impl RecordUserDetailsTool {
    pub fn new(notifier: Arc<dyn Notifier>) -> Self {
        Self { notifier }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct Args {
    email: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    notes: Option<String>,
}

#[async_trait]
impl Tool for RecordUserDetailsTool {
    fn name(&self) -> &str {
        "record_user_details"
    }

    fn description(&self) -> &str {
        "Use this tool to record that a user is interested in being in touch and provided an email address"
    }

    fn parameters_schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "email": {
                    "type": "string",
                    "description": "The email address of this user"
                },
                "name": {
                    "type": "string",
                    "description": "The user's name, if provided"
                },
                "notes": {
                    "type": "string",
                    "description": "Additional conversation details"
                }
            },
            "required": ["email"],
            "additionalProperties": false
        })
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<ToolResult, ToolError> {
        let args: Args = serde_json::from_value(arguments).map_err(|e| ToolError::InvalidArguments {
            tool_name: self.name().into(),
            reason: e.to_string(),
        })?;

        let name = args.name.as_deref().unwrap_or(DEFAULT_NAME);
        let notes = args.notes.as_deref().unwrap_or(DEFAULT_NOTES);
        let text = format!("Recording {name} with email {} and notes {notes}", args.email);

        if let Err(e) = self.notifier.notify(&text).await {
            warn!(tool = self.name(), error = %e, "Notification failed");
        }

        Ok(crate::recorded_ok())
    }
}
