use std::sync::Arc;

use axum::{routing::get, Router};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config::AppConfig;
use crate::greeting::{Greeting, GreetingClient};
use crate::handlers;

/// Shared, read-only state handed to every handler
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub greeting_client: GreetingClient,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        Self {
            config: Arc::new(config),
            greeting_client: GreetingClient::default(),
        }
    }

    /// Greetings served by `/api/greetings`
    pub fn greeting_list(&self) -> Vec<Greeting> {
        self.config
            .greetings
            .texts
            .iter()
            .map(Greeting::new)
            .collect()
    }
}

pub fn app(state: AppState) -> Router {
    let request_logging = state.config.server.request_logging;

    let router = Router::new()
        // Page
        .route("/", get(handlers::landing_page))
        // API
        .route("/api/greetings", get(handlers::greetings_list))
        .route("/api/greetings/random", get(handlers::greetings_random))
        // Ops
        .route("/health", get(handlers::health))
        .fallback(handlers::not_found)
        .with_state(state)
        .layer(CorsLayer::permissive());

    if request_logging {
        router.layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
    } else {
        router
    }
}

/// Bind the configured port and serve until the process is stopped
pub async fn serve(config: AppConfig) -> anyhow::Result<()> {
    let bind_addr = format!("0.0.0.0:{}", config.server.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .map_err(|e| anyhow::anyhow!("failed to bind {}: {}", bind_addr, e))?;

    tracing::info!(
        "Listening on http://{} ({:?}, platform managed: {}, bypass secret: {})",
        bind_addr,
        config.runtime.environment,
        config.runtime.platform_managed,
        config.runtime.automation_bypass_secret.is_some()
    );

    axum::serve(listener, app(AppState::new(config))).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use std::collections::HashMap;
    use tower::ServiceExt;

    fn state_with(vars: &[(&str, &str)]) -> AppState {
        let vars: HashMap<String, String> = vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        AppState::new(AppConfig::from_vars(&vars))
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn test_greetings_list_serves_configured_texts() {
        let (status, body) = get_json(app(state_with(&[("GREETINGS", "hello,hi")])), "/api/greetings").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, serde_json::json!([{"text": "hello"}, {"text": "hi"}]));
    }

    #[tokio::test]
    async fn test_random_greeting_unavailable_when_empty() {
        let (status, body) = get_json(app(state_with(&[("GREETINGS", "")])), "/api/greetings/random").await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["code"], "SERVICE_UNAVAILABLE");
    }

    #[tokio::test]
    async fn test_random_greeting_from_list() {
        let (status, body) = get_json(app(state_with(&[("GREETINGS", "howdy")])), "/api/greetings/random").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["text"], "howdy");
    }

    #[tokio::test]
    async fn test_unknown_route_is_json_404() {
        let (status, body) = get_json(app(state_with(&[])), "/nope").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "Route not found: /nope");
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = get_json(app(state_with(&[])), "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["status"], "ok");
    }
}
