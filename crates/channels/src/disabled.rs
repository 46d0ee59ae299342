//! The notifier used when no delivery channel is configured.

use async_trait::async_trait;
use persona_core::error::NotifyError;
use persona_core::Notifier;
use tracing::debug;

/// Accepts every notification and sends nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct DisabledNotifier;

#[async_trait]
impl Notifier for DisabledNotifier {
    fn name(&self) -> &str {
        "disabled"
    }

    fn is_enabled(&self) -> bool {
        false
    }

    async fn notify(&self, text: &str) -> Result<(), NotifyError> {
        debug!(len = text.len(), "Notification dropped (disabled)");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn notify_is_a_no_op() {
        assert!(DisabledNotifier.notify("Recording hello").await.is_ok());
    }
}
