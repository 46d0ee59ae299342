//! Pushover notification channel.
//!
//! Sends a form-encoded `token`/`user`/`message` POST to the Pushover
//! messages API. The response body is not inspected.

use async_trait::async_trait;
use persona_config::PUSHOVER_API_URL;
use persona_core::error::NotifyError;
use persona_core::Notifier;
use tracing::debug;

/// A live Pushover client.
pub struct PushoverNotifier {
    token: String,
    user: String,
    api_url: String,
    client: reqwest::Client,
}

impl PushoverNotifier {
    pub fn new(token: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            user: user.into(),
            api_url: PUSHOVER_API_URL.into(),
            client: reqwest::Client::new(),
        }
    }

    /// Point the client at a different messages endpoint.
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }
}

impl std::fmt::Debug for PushoverNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PushoverNotifier")
            .field("token", &"[REDACTED]")
            .field("user", &"[REDACTED]")
            .field("api_url", &self.api_url)
            .finish()
    }
}

#[async_trait]
impl Notifier for PushoverNotifier {
    fn name(&self) -> &str {
        "pushover"
    }

    async fn notify(&self, text: &str) -> Result<(), NotifyError> {
        debug!(len = text.len(), "Sending Pushover notification");

        let response = self
            .client
            .post(&self.api_url)
            .form(&[
                ("token", self.token.as_str()),
                ("user", self.user.as_str()),
                ("message", text),
            ])
            .send()
            .await
            .map_err(|e| NotifyError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(NotifyError::Rejected(status.as_u16()));
        }
        Ok(())
    }
}
