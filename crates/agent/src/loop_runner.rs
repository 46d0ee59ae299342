//! The conversation loop implementation.

use std::sync::Arc;
use persona_config::AppConfig;
use persona_core::error::{Error, ProviderError, ToolError};
use persona_core::identity::Identity;
use persona_core::message::{Message, MessageToolCall, Transcript};
use persona_core::provider::{Provider, ProviderRequest};
use persona_core::tool::{ToolCall, ToolRegistry};
use tracing::{debug, error, info};

/// Where a turn currently is.
#[derive(Debug)]
enum LoopState {
    AwaitingModel,
    ExecutingTools(Vec<MessageToolCall>),
    Done(String),
}

/// Orchestrates model calls and tool execution for one turn at a time.
///
/// Holds only shared, immutable state, so one instance can serve many
/// concurrent turns.
pub struct AgentLoop {
    /// The LLM provider to use
    provider: Arc<dyn Provider>,

    /// The model to use
    model: String,

    /// Temperature setting
    temperature: f32,

    /// Max tokens per response
    max_tokens: Option<u32>,

    /// Tool registry
    tools: Arc<ToolRegistry>,

    /// Who the assistant speaks as
    identity: Arc<Identity>,

    /// Bound on model calls per turn. `None` is unbounded.
    max_iterations: Option<u32>,
}

impl AgentLoop {
    /// Create a new agent loop.
    pub fn new(
        provider: Arc<dyn Provider>,
        model: impl Into<String>,
        temperature: f32,
        tools: Arc<ToolRegistry>,
        identity: Arc<Identity>,
    ) -> Self {
        Self {
            provider,
            model: model.into(),
            temperature,
            max_tokens: None,
            tools,
            identity,
            max_iterations: None,
        }
    }

    /// Create an agent loop with the model settings from configuration.
    pub fn from_config(
        config: &AppConfig,
        provider: Arc<dyn Provider>,
        tools: Arc<ToolRegistry>,
        identity: Arc<Identity>,
    ) -> Self {
        let agent = Self::new(provider, &config.model, config.temperature, tools, identity)
            .with_max_tokens(config.max_tokens);
        match config.max_iterations {
            Some(max) => agent.with_max_iterations(max),
            None => agent,
        }
    }

    /// Bound the number of model calls per turn.
    pub fn with_max_iterations(mut self, max: u32) -> Self {
        self.max_iterations = Some(max);
        self
    }

    /// Set the max tokens per LLM response.
    pub fn with_max_tokens(mut self, max: u32) -> Self {
        self.max_tokens = Some(max);
        self
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Run one turn and return the model's final text.
    ///
    /// System entries in `history` are ignored; the identity's system prompt
    /// always leads the transcript. Any provider error, malformed tool
    /// argument payload, or exceeded iteration bound aborts the turn.
    pub async fn process(&self, history: Vec<Message>, message: &str) -> Result<String, Error> {
        let mut transcript = Transcript::for_turn(&self.identity.system_prompt, history, message);
        let tool_definitions = self.tools.definitions();
        let mut model_calls: u32 = 0;
        let mut state = LoopState::AwaitingModel;

        loop {
            state = match state {
                LoopState::AwaitingModel => {
                    if let Some(limit) = self.max_iterations
                        && model_calls >= limit
                    {
                        return Err(Error::IterationLimit { limit });
                    }
                    model_calls += 1;

                    debug!(
                        iteration = model_calls,
                        messages = transcript.len(),
                        model = %self.model,
                        "Agent loop iteration"
                    );

                    let request = ProviderRequest {
                        model: self.model.clone(),
                        messages: transcript.messages().to_vec(),
                        temperature: self.temperature,
                        max_tokens: self.max_tokens,
                        tools: tool_definitions.clone(),
                    };

                    let response = self.provider.complete(request).await?;

                    if response.stop_reason.is_tool_calls() {
                        if response.message.tool_calls.is_empty() {
                            return Err(ProviderError::MalformedResponse(
                                "finish_reason tool_calls without tool_calls".into(),
                            )
                            .into());
                        }
                        let calls = response.message.tool_calls.clone();
                        transcript.push(response.message);
                        LoopState::ExecutingTools(calls)
                    } else {
                        debug!(stop_reason = ?response.stop_reason, "Model finished");
                        LoopState::Done(response.message.content)
                    }
                }
                LoopState::ExecutingTools(calls) => {
                    for tc in calls {
                        let arguments = serde_json::from_str(&tc.arguments).map_err(|e| {
                            ToolError::InvalidArguments {
                                tool_name: tc.name.clone(),
                                reason: e.to_string(),
                            }
                        })?;
                        info!(tool = %tc.name, "Tool called");

                        let call = ToolCall {
                            id: tc.id,
                            name: tc.name,
                            arguments,
                        };
                        let result = self.tools.execute(&call).await?;
                        transcript.push(Message::tool_result(&call.id, result.to_content()));
                    }
                    LoopState::AwaitingModel
                }
                LoopState::Done(text) => return Ok(text),
            };
        }
    }

    /// Run one turn, turning any failure into a reply the user can read.
    pub async fn chat(&self, history: Vec<Message>, message: &str) -> String {
        match self.process(history, message).await {
            Ok(reply) => reply,
            Err(e) => {
                error!(error = %e, "Turn failed");
                format!("Error occurred: {e}. Possible cause: insufficient credits or API issue.")
            }
        }
    }
}
