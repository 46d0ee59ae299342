//! record_unknown_question: notify the owner about a question the assistant couldn't answer.

use async_trait::async_trait;
use persona_core::error::ToolError;
use persona_core::tool::{Tool, ToolResult};
use persona_core::Notifier;
use serde::Deserialize;
use std::sync::Arc;
use tracing::warn;

pub struct RecordUnknownQuestionTool {
    notifier: Arc<dyn Notifier>,
}

impl RecordUnknownQuestionTool {
    pub fn new(notifier: Arc<dyn Notifier>) -> Self {
        Self { notifier }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct Args {
    question: String,
}

#[async_trait]
impl Tool for RecordUnknownQuestionTool {
    fn name(&self) -> &str {
        "record_unknown_question"
    }

    fn description(&self) -> &str {
        "Always use this tool to record any question that couldn't be answered"
    }

    fn parameters_schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "question": {
                    "type": "string",
                    "description": "The unanswered question"
                }
            },
            "required": ["question"],
            "additionalProperties": false
        })
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<ToolResult, ToolError> {
        let args: Args = serde_json::from_value(arguments).map_err(|e| ToolError::InvalidArguments {
            tool_name: self.name().into(),
            reason: e.to_string(),
        })?;

        if let Err(e) = self.notifier.notify(&format!("Recording {}", args.question)).await {
            warn!(tool = self.name(), error = %e, "Notification failed");
        }

        Ok(crate::recorded_ok())
    }
}
