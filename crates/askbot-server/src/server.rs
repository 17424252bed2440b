use askbot_chat::AnswerGateway;
use axum::{
    http::HeaderValue,
    routing::{delete, get, post},
    Router,
};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::config::ServerConfig;
use crate::error::{Result, ServerError};
use crate::routes;
use crate::state::AppState;

pub struct Server {
    config: ServerConfig,
    state: AppState,
}

impl Server {
    pub fn new(config: ServerConfig, gateway: AnswerGateway) -> Self {
        Self {
            config,
            state: AppState::new(gateway),
        }
    }

    fn cors(&self) -> CorsLayer {
        let origins: Vec<HeaderValue> = self
            .config
            .cors_origins
            .iter()
            .filter_map(|o| match HeaderValue::from_str(o) {
                Ok(value) => Some(value),
                Err(_) => {
                    warn!(origin = %o, "ignoring invalid CORS origin");
                    None
                }
            })
            .collect();

        let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
        if origins.is_empty() {
            layer.allow_origin(Any)
        } else {
            layer.allow_origin(AllowOrigin::list(origins))
        }
    }

    pub fn router(&self) -> Router {
        Router::new()
            .route("/", get(routes::index))
            .route("/health", get(routes::health))
            .route("/ready", get(routes::ready))
            .route("/api/v1/chat", post(routes::chat))
            .route("/api/v1/sessions", post(routes::create_session))
            .route("/api/v1/sessions/:id", delete(routes::delete_session))
            .route(
                "/api/v1/sessions/:id/transcript",
                get(routes::transcript).delete(routes::clear_transcript),
            )
            .layer(self.cors())
            .layer(TraceLayer::new_for_http())
            .with_state(self.state.clone())
    }

    pub async fn run(self) -> Result<()> {
        self.run_with_shutdown(std::future::pending()).await
    }

    pub async fn run_with_shutdown<F>(self, shutdown: F) -> Result<()>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let addr = self.config.socket_addr()?;
        let listener = tokio::net::TcpListener::bind(addr).await.map_err(|e| {
            ServerError::internal(format!("Failed to bind to {}: {}", addr, e))
        })?;

        info!("Server listening on {}", addr);

        let sweeper = self.spawn_session_sweeper();
        let served = axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(|e| ServerError::internal(e.to_string()));

        if let Some(sweeper) = sweeper {
            sweeper.abort();
        }
        served
    }

    /// Periodically drops sessions idle past the configured timeout.
    /// Returns `None` when idle sessions are kept forever.
    pub fn spawn_session_sweeper(&self) -> Option<JoinHandle<()>> {
        let max_idle = self.config.session_idle_timeout()?;
        let mut ticker = tokio::time::interval(self.config.sweep_interval());
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        let state = self.state.clone();

        Some(tokio::spawn(async move {
            loop {
                ticker.tick().await;
                state.evict_idle(max_idle).await;
            }
        }))
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }
}

pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}

#[cfg(test)]
mod tests {
    use super::*;
    use askbot_llm::{ChatRequest, ChatResponse, LlmError, LlmProvider};
    use async_trait::async_trait;
    use axum::body::{to_bytes, Body};
    use axum::http::{Method, Request, StatusCode};
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tower::ServiceExt;

    struct MockLlm;

    #[async_trait]
    impl LlmProvider for MockLlm {
        fn name(&self) -> &str {
            "mock"
        }

        async fn chat(&self, request: ChatRequest) -> askbot_llm::Result<ChatResponse> {
            match request.message.as_str() {
                "What is 2+2?" => Ok(ChatResponse::new("4")),
                "fail" => Err(LlmError::AuthenticationFailed("401 Unauthorized".into())),
                other => Ok(ChatResponse::new(format!("echo {}", other))),
            }
        }

        fn default_model(&self) -> &str {
            "mock"
        }
    }

    fn test_server() -> Server {
        let gateway = AnswerGateway::builder()
            .llm(Arc::new(MockLlm))
            .build()
            .unwrap();
        Server::new(ServerConfig::new(), gateway)
    }

    async fn send(router: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(value) => {
                builder = builder.header("content-type", "application/json");
                Body::from(value.to_string())
            }
            None => Body::empty(),
        };

        let response = router
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, value)
    }

    #[tokio::test]
    async fn test_index_serves_chat_page() {
        let router = test_server().router();
        let response = router
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let html = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(html.contains("Clear Chat History"));
    }

    #[tokio::test]
    async fn test_chat_round_trip() {
        let router = test_server().router();

        let (status, body) = send(
            &router,
            Method::POST,
            "/api/v1/chat",
            Some(json!({"message": "What is 2+2?"})),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "answered");
        assert_eq!(body["answer"], "4");
        assert_eq!(body["is_error"], false);
        assert_eq!(body["turns"][0]["role"], "user");
        assert_eq!(body["turns"][0]["content"], "What is 2+2?");
        assert_eq!(body["turns"][1]["role"], "assistant");
        assert_eq!(body["turns"][1]["content"], "4");
        assert_eq!(body["turns"][1]["failed"], false);

        let session_id = body["session_id"].as_str().unwrap().to_string();
        let (status, body) = send(
            &router,
            Method::GET,
            &format!("/api/v1/sessions/{}/transcript", session_id),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["turns"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_chat_empty_message_is_ignored() {
        let router = test_server().router();

        let (_, created) = send(&router, Method::POST, "/api/v1/sessions", None).await;
        let session_id = created["session_id"].as_str().unwrap().to_string();

        let (status, body) = send(
            &router,
            Method::POST,
            "/api/v1/chat",
            Some(json!({"session_id": session_id, "message": "   "})),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ignored");
        assert!(body["turns"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_chat_provider_failure_is_error_turn() {
        let router = test_server().router();

        let (status, body) = send(
            &router,
            Method::POST,
            "/api/v1/chat",
            Some(json!({"message": "fail"})),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["is_error"], true);
        assert!(body["answer"].as_str().unwrap().starts_with("Error: "));
        assert_eq!(body["turns"].as_array().unwrap().len(), 2);
        assert_eq!(body["turns"][1]["failed"], true);
    }

    #[tokio::test]
    async fn test_clear_history() {
        let server = test_server();
        let router = server.router();

        let (_, body) = send(
            &router,
            Method::POST,
            "/api/v1/chat",
            Some(json!({"message": "hello"})),
        )
        .await;
        let session_id = body["session_id"].as_str().unwrap().to_string();
        let uri = format!("/api/v1/sessions/{}/transcript", session_id);

        let (status, body) = send(&router, Method::DELETE, &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["turns"].as_array().unwrap().is_empty());

        let (_, body) = send(&router, Method::GET, &uri, None).await;
        assert!(body["turns"].as_array().unwrap().is_empty());
        assert_eq!(server.state().session_count().await, 1);
    }

    #[tokio::test]
    async fn test_end_keyword_removes_session() {
        let server = test_server();
        let router = server.router();

        let (_, body) = send(
            &router,
            Method::POST,
            "/api/v1/chat",
            Some(json!({"message": "hello"})),
        )
        .await;
        let session_id = body["session_id"].as_str().unwrap().to_string();

        let (status, body) = send(
            &router,
            Method::POST,
            "/api/v1/chat",
            Some(json!({"session_id": session_id, "message": "Quit"})),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ended");
        assert_eq!(body["turns"].as_array().unwrap().len(), 2);
        assert_eq!(server.state().session_count().await, 0);
    }

    #[tokio::test]
    async fn test_chat_busy_session_conflicts() {
        let server = test_server();
        let router = server.router();

        let session = server.state().create_session().await;
        let _held = session.try_begin().unwrap();

        let (status, body) = send(
            &router,
            Method::POST,
            "/api/v1/chat",
            Some(json!({"session_id": session.id().to_string(), "message": "hello"})),
        )
        .await;

        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["code"], 409);
    }

    #[tokio::test]
    async fn test_unknown_and_invalid_sessions() {
        let router = test_server().router();

        let (status, _) = send(
            &router,
            Method::GET,
            "/api/v1/sessions/not-a-uuid/transcript",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let missing = askbot_core::SessionId::new();
        let (status, _) = send(
            &router,
            Method::DELETE,
            &format!("/api/v1/sessions/{}", missing),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_sweeper_evicts_idle_sessions() {
        let gateway = AnswerGateway::builder()
            .llm(Arc::new(MockLlm))
            .build()
            .unwrap();
        let server = Server::new(ServerConfig::new().with_session_idle_secs(1), gateway);
        let router = server.router();

        let (_, body) = send(
            &router,
            Method::POST,
            "/api/v1/chat",
            Some(json!({"message": "hello"})),
        )
        .await;
        let session_id = body["session_id"].as_str().unwrap().to_string();
        assert_eq!(server.state().session_count().await, 1);

        let sweeper = server.spawn_session_sweeper().unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(2500)).await;
        sweeper.abort();

        assert_eq!(server.state().session_count().await, 0);
        let (status, _) = send(
            &router,
            Method::GET,
            &format!("/api/v1/sessions/{}/transcript", session_id),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_configured_cors_origins() {
        let gateway = AnswerGateway::builder()
            .llm(Arc::new(MockLlm))
            .build()
            .unwrap();
        let config = ServerConfig::new().with_cors_origin("http://localhost:3000");
        let router = Server::new(config, gateway).router();

        let request = |origin: &str| {
            Request::builder()
                .uri("/health")
                .header("origin", origin)
                .body(Body::empty())
                .unwrap()
        };

        let response = router
            .clone()
            .oneshot(request("http://localhost:3000"))
            .await
            .unwrap();
        assert_eq!(
            response.headers().get("access-control-allow-origin").unwrap(),
            "http://localhost:3000"
        );

        let response = router.oneshot(request("http://evil.test")).await.unwrap();
        assert!(response.headers().get("access-control-allow-origin").is_none());
    }

    #[test]
    fn test_sweeper_disabled_without_timeout() {
        let gateway = AnswerGateway::builder()
            .llm(Arc::new(MockLlm))
            .build()
            .unwrap();
        let server = Server::new(ServerConfig::new().with_session_idle_secs(0), gateway);
        assert!(server.spawn_session_sweeper().is_none());
    }

    #[tokio::test]
    async fn test_ready_reports_gateway() {
        let router = test_server().router();
        let (status, body) = send(&router, Method::GET, "/ready", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["provider"], "mock");
        assert_eq!(body["model"], "command-a-03-2025");
        assert_eq!(body["sessions"], 0);
    }
}
