//! Outbound notification channels for Persona.
//!
//! The assistant only ever pushes one-way messages to its owner. Which
//! channel is live is decided once, when the notifier is built:
//!
//! - **Pushover**: form POST to the Pushover messages API
//! - **Disabled**: silent no-op, used when credentials are missing

pub mod disabled;
pub mod pushover;

use std::sync::Arc;
use persona_config::NotifyConfig;
use persona_core::Notifier;
use tracing::info;

pub use disabled::DisabledNotifier;
pub use pushover::PushoverNotifier;

/// Build the notifier for this process.
///
/// Only when both the Pushover token and user key are present is the
/// result a live client; otherwise every notification is dropped.
pub fn build_notifier(config: &NotifyConfig) -> Arc<dyn Notifier> {
    match (&config.pushover_token, &config.pushover_user) {
        (Some(token), Some(user)) if config.is_configured() => {
            info!(api_url = %config.api_url, "Pushover notifications enabled");
            Arc::new(PushoverNotifier::new(token, user).with_api_url(&config.api_url))
        }
        _ => {
            info!("Pushover credentials not set, notifications disabled");
            Arc::new(DisabledNotifier)
        }
    }
}
