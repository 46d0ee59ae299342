//! HTTP chat gateway for Persona.
//!
//! Exposes the chat endpoint used by the embedded web widget, plus
//! health and persona metadata. The gateway keeps no conversation state:
//! the widget sends its full history with every message.
//!
//! Built on Axum.

pub mod frontend;

use axum::extract::DefaultBodyLimit;
use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::Json,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::info;

use persona_agent::AgentLoop;
use persona_config::AppConfig;
use persona_core::message::{Message, Role};

/// Shared application state for the gateway.
pub struct GatewayState {
    pub agent: Arc<AgentLoop>,
}

type SharedState = Arc<GatewayState>;

/// Build the Axum router with all gateway routes and the embedded frontend.
///
/// Layers applied:
/// - CORS limited to GET/POST with JSON bodies
/// - Request body size limit (1 MB)
/// - HTTP trace logging
pub fn build_router(state: SharedState) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([axum::http::Method::GET, axum::http::Method::POST])
        .allow_headers([axum::http::header::CONTENT_TYPE])
        .max_age(std::time::Duration::from_secs(3600));

    Router::new()
        .route("/health", get(health_handler))
        .route("/api/persona", get(persona_handler))
        .route("/api/chat", post(chat_handler))
        .with_state(state)
        .merge(frontend::frontend_router())
        .layer(DefaultBodyLimit::max(1024 * 1024))
        .layer(cors)
        .layer(tower_http::trace::TraceLayer::new_for_http())
}

/// Start the gateway HTTP server.
///
/// The agent (provider, tools, identity) is built once and shared by every request.
pub async fn start(config: AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let addr = format!("{}:{}", config.gateway.host, config.gateway.port);

    let agent = Arc::new(persona_agent::build_agent(&config)?);
    let app = build_router(Arc::new(GatewayState { agent }));

    info!(addr = %addr, persona = %config.identity.name, "Gateway starting");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

// --- Handlers ---

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

#[derive(Serialize)]
struct PersonaResponse {
    name: String,
    model: String,
}

async fn persona_handler(State(state): State<SharedState>) -> Json<PersonaResponse> {
    Json(PersonaResponse {
        name: state.agent.identity().name.clone(),
        model: state.agent.model().to_string(),
    })
}

/// One prior exchange entry as the widget stores it.
#[derive(Debug, Deserialize)]
struct HistoryEntry {
    role: Role,
    #[serde(default)]
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatRequest {
    message: String,
    #[serde(default)]
    history: Vec<HistoryEntry>,
}

#[derive(Serialize)]
struct ChatResponse {
    reply: String,
}

/// Keep only user and assistant turns; the loop supplies its own system prompt.
fn to_history(entries: Vec<HistoryEntry>) -> Vec<Message> {
    entries
        .into_iter()
        .filter_map(|entry| match entry.role {
            Role::User => Some(Message::user(entry.content)),
            Role::Assistant => Some(Message::assistant(entry.content)),
            Role::System | Role::Tool => None,
        })
        .collect()
}

async fn chat_handler(
    State(state): State<SharedState>,
    Json(payload): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, (StatusCode, Json<serde_json::Value>)> {
    if payload.message.trim().is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({ "error": "message must not be empty" })),
        ));
    }

    info!(
        message_len = payload.message.len(),
        history_len = payload.history.len(),
        "Chat message received"
    );

    let history = to_history(payload.history);
    let reply = state.agent.chat(history, &payload.message).await;
    Ok(Json(ChatResponse { reply }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use persona_core::error::ProviderError;
    use persona_core::identity::{Identity, IdentitySource};
    use persona_core::provider::{Provider, ProviderRequest, ProviderResponse, StopReason};
    use persona_core::tool::ToolRegistry;
    use std::sync::Mutex;
    use tower::ServiceExt;

    /// Answers with the number of messages it was sent, or fails.
    struct EchoCountProvider {
        fail: bool,
        seen: Mutex<Vec<Vec<Role>>>,
    }

    #[async_trait::async_trait]
    impl Provider for EchoCountProvider {
        fn name(&self) -> &str {
            "echo-count"
        }

        async fn complete(&self, request: ProviderRequest) -> Result<ProviderResponse, ProviderError> {
            self.seen
                .lock()
                .unwrap()
                .push(request.messages.iter().map(|m| m.role).collect());
            if self.fail {
                return Err(ProviderError::ApiError {
                    status_code: 402,
                    message: "Insufficient credits".into(),
                });
            }
            Ok(ProviderResponse {
                message: Message::assistant(format!("seen {}", request.messages.len())),
                stop_reason: StopReason::Stop,
                usage: None,
                model: "mock-model".into(),
            })
        }
    }

    fn test_app(fail: bool) -> (Router, Arc<EchoCountProvider>) {
        let provider = Arc::new(EchoCountProvider {
            fail,
            seen: Mutex::new(Vec::new()),
        });
        let missing = std::env::temp_dir().join("persona-gateway-tests-missing");
        let identity = Identity::load(&IdentitySource {
            name: "Ada Lovelace".into(),
            resume_path: missing.join("resume.pdf"),
            summary_path: missing.join("summary.txt"),
            system_prompt_override: None,
        });
        let agent = AgentLoop::new(
            provider.clone(),
            "mock-model",
            0.7,
            Arc::new(ToolRegistry::new()),
            Arc::new(identity),
        );
        let app = build_router(Arc::new(GatewayState { agent: Arc::new(agent) }));
        (app, provider)
    }

    async fn post_chat(app: Router, body: serde_json::Value) -> (StatusCode, serde_json::Value) {
        let req = Request::builder()
            .method("POST")
            .uri("/api/chat")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let response = app.oneshot(req).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null))
    }

    #[tokio::test]
    async fn health_endpoint() {
        let (app, _) = test_app(false);
        let req = Request::builder().uri("/health").body(Body::empty()).unwrap();
        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["status"], "ok");
    }

    #[tokio::test]
    async fn persona_endpoint_reports_name() {
        let (app, _) = test_app(false);
        let req = Request::builder().uri("/api/persona").body(Body::empty()).unwrap();
        let response = app.oneshot(req).await.unwrap();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["name"], "Ada Lovelace");
        assert_eq!(json["model"], "mock-model");
    }

    #[tokio::test]
    async fn chat_threads_history_into_transcript() {
        let (app, provider) = test_app(false);
        let (status, json) = post_chat(
            app,
            serde_json::json!({
                "message": "Where did you study?",
                "history": [
                    {"role": "system", "content": "ignored"},
                    {"role": "user", "content": "Hi"},
                    {"role": "assistant", "content": "Hello!"}
                ]
            }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["reply"], "seen 4");
        let seen = provider.seen.lock().unwrap();
        assert_eq!(seen[0], vec![Role::System, Role::User, Role::Assistant, Role::User]);
    }

    #[tokio::test]
    async fn chat_without_history() {
        let (app, _) = test_app(false);
        let (status, json) = post_chat(app, serde_json::json!({"message": "Hello"})).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["reply"], "seen 2");
    }

    #[tokio::test]
    async fn provider_failure_is_a_formatted_reply() {
        let (app, _) = test_app(true);
        let (status, json) = post_chat(app, serde_json::json!({"message": "Hello"})).await;

        assert_eq!(status, StatusCode::OK);
        let reply = json["reply"].as_str().unwrap();
        assert!(reply.starts_with("Error occurred: "));
        assert!(reply.contains("Insufficient credits"));
    }

    #[tokio::test]
    async fn blank_message_is_rejected() {
        let (app, provider) = test_app(false);
        let (status, json) = post_chat(app, serde_json::json!({"message": "   "})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json["error"].as_str().unwrap().contains("empty"));
        assert!(provider.seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn frontend_is_mounted() {
        let (app, _) = test_app(false);
        let req = Request::builder().uri("/").body(Body::empty()).unwrap();
        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
