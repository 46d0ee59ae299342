//! Notifier trait: outbound one-way notifications to the site owner.
//!
//! Implementations live in `persona-channels`. Tools hold an
//! `Arc<dyn Notifier>` and never know whether it is live or disabled.

use async_trait::async_trait;
use crate::error::NotifyError;

#[async_trait]
pub trait Notifier: Send + Sync {
    /// Short name for diagnostics (e.g., "pushover", "disabled").
    fn name(&self) -> &str;

    /// Whether notifications actually leave the process.
    fn is_enabled(&self) -> bool {
        true
    }

    /// Deliver a text notification. The response body is ignored.
    async fn notify(&self, text: &str) -> std::result::Result<(), NotifyError>;
}
