//! Built-in tool implementations for Persona.
//!
//! Both tools capture something the site owner should hear about and push
//! it through the shared [`Notifier`]:
//!
//! - **record_user_details**: a visitor left an email address
//! - **record_unknown_question**: the assistant could not answer something

pub mod record_unknown_question;
pub mod record_user_details;

use std::sync::Arc;
use persona_core::tool::ToolRegistry;
use persona_core::Notifier;

pub use record_unknown_question::RecordUnknownQuestionTool;
pub use record_user_details::RecordUserDetailsTool;

/// The result every recording tool hands back to the model.
pub(crate) fn recorded_ok() -> persona_core::ToolResult {
    persona_core::ToolResult::new(serde_json::json!({ "recorded": "ok" }))
}

/// Create the tool registry with both recording tools, in the order the
/// model sees them.
pub fn default_registry(notifier: Arc<dyn Notifier>) -> ToolRegistry {
    let mut registry = ToolRegistry::new();
    registry.register(Box::new(RecordUserDetailsTool::new(notifier.clone())));
    registry.register(Box::new(RecordUnknownQuestionTool::new(notifier)));
    registry
}


#[cfg(test)]
mod tests {
    use super::*;
    use persona_channels::{build_notifier, DisabledNotifier};
    use persona_core::tool::ToolCall;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn definitions_are_in_fixed_order() {
        let registry = default_registry(Arc::new(DisabledNotifier));
        let names: Vec<String> = registry.definitions().into_iter().map(|d| d.name).collect();
        assert_eq!(names, vec!["record_user_details", "record_unknown_question"]);
    }

    #[tokio::test]
    async fn no_credentials_means_no_outbound_request() {
        let server = MockServer::start().await;
        Mock::given(wiremock::matchers::any())
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let config = persona_config::NotifyConfig {
            api_url: server.uri(),
            ..Default::default()
        };
        let registry = default_registry(build_notifier(&config));

        let details = ToolCall {
            id: "call_1".into(),
            name: "record_user_details".into(),
            arguments: serde_json::json!({"email": "ada@example.com"}),
        };
        let question = ToolCall {
            id: "call_2".into(),
            name: "record_unknown_question".into(),
            arguments: serde_json::json!({"question": "What is your favourite colour?"}),
        };

        for call in [details, question] {
            let result = registry.execute(&call).await.unwrap();
            assert_eq!(result.to_content(), r#"{"recorded":"ok"}"#);
        }
        // MockServer verifies `expect(0)` on drop
    }
}
