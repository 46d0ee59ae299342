//! Shared test helpers for loop tests.

use persona_core::error::{ProviderError, ToolError};
use persona_core::message::{Message, MessageToolCall};
use persona_core::provider::{Provider, ProviderRequest, ProviderResponse, StopReason};
use persona_core::tool::{Tool, ToolResult};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// A provider that replays scripted results and records every request.
///
/// Panics if more calls are made than results provided.
pub struct ScriptedProvider {
    script: Mutex<VecDeque<Result<ProviderResponse, ProviderError>>>,
    requests: Mutex<Vec<ProviderRequest>>,
}

impl ScriptedProvider {
    pub fn new(script: Vec<Result<ProviderResponse, ProviderError>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn requests(&self) -> Vec<ProviderRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl Provider for ScriptedProvider {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn complete(&self, request: ProviderRequest) -> Result<ProviderResponse, ProviderError> {
        let call = {
            let mut requests = self.requests.lock().unwrap();
            requests.push(request);
            requests.len()
        };
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| panic!("ScriptedProvider: no response scripted for call #{call}"))
    }
}

pub fn text_response(text: &str, stop_reason: StopReason) -> ProviderResponse {
    ProviderResponse {
        message: Message::assistant(text),
        stop_reason,
        usage: None,
        model: "mock-model".into(),
    }
}

pub fn tool_call_response(calls: Vec<MessageToolCall>) -> ProviderResponse {
    ProviderResponse {
        message: Message::assistant_tool_calls("", calls),
        stop_reason: StopReason::ToolCalls,
        usage: None,
        model: "mock-model".into(),
    }
}

pub fn tool_call(id: &str, name: &str, arguments: &str) -> MessageToolCall {
    MessageToolCall {
        id: id.into(),
        name: name.into(),
        arguments: arguments.into(),
    }
}

/// A tool that appends its name to a shared log and returns `{"ok":true}`.
pub struct CountingTool {
    name: &'static str,
    pub log: Arc<Mutex<Vec<String>>>,
}

impl CountingTool {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            log: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn sharing_log(mut self, log: &Arc<Mutex<Vec<String>>>) -> Self {
        self.log = log.clone();
        self
    }
}

#[async_trait::async_trait]
impl Tool for CountingTool {
    fn name(&self) -> &str {
        self.name
    }

    fn description(&self) -> &str {
        "Counts invocations"
    }

    fn parameters_schema(&self) -> serde_json::Value {
        serde_json::json!({"type": "object", "properties": {}})
    }

    async fn execute(&self, _arguments: serde_json::Value) -> Result<ToolResult, ToolError> {
        self.log.lock().unwrap().push(self.name.to_string());
        Ok(ToolResult::new(serde_json::json!({"ok": true})))
    }
}
