//! Wires the loop's collaborators together from configuration.

use std::sync::Arc;
use persona_config::AppConfig;
use persona_core::error::Error;
use persona_core::identity::Identity;
use tracing::info;
use crate::loop_runner::AgentLoop;

/// Build the process-wide agent: identity, notifier, tools and provider,
/// each constructed exactly once.
///
/// Fails only when the completion client cannot be built (no API key).
pub fn build_agent(config: &AppConfig) -> Result<AgentLoop, Error> {
    let provider = persona_providers::build_from_config(config)?;

    let identity = Arc::new(Identity::load(&config.identity_source()));
    let notifier = persona_channels::build_notifier(&config.notify);
    let notifier_enabled = notifier.is_enabled();
    let tools = Arc::new(persona_tools::default_registry(notifier));

    info!(
        name = %identity.name,
        tools = tools.len(),
        notifier_enabled,
        "Agent assembled"
    );

    Ok(AgentLoop::from_config(config, provider, tools, identity))
}
