mod common;

use std::collections::{HashMap, HashSet};

use anyhow::Result;
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::{routing::get, Json, Router};
use serde_json::json;

use checkly_starter::bypass::PROTECTION_BYPASS_HEADER;
use checkly_starter::config::{Environment, RuntimeEnv};
use checkly_starter::greeting::{Greeting, GreetingClient, Origin};
use checkly_starter::handlers::resolve_page_state;
use checkly_starter::page::PageState;

fn runtime(environment: Environment, platform_managed: bool) -> RuntimeEnv {
    RuntimeEnv {
        environment,
        platform_managed,
        automation_bypass_secret: None,
    }
}

fn host_headers(addr: std::net::SocketAddr) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert("host", HeaderValue::from_str(&addr.to_string()).unwrap());
    headers.insert("x-forwarded-proto", HeaderValue::from_static("http"));
    headers
}

async fn mock_greetings(body: serde_json::Value) -> Result<std::net::SocketAddr> {
    let router = Router::new().route("/api/greetings", get(move || async move { Json(body) }));
    common::spawn_mock(router).await
}

#[tokio::test]
async fn single_greeting_is_rendered() -> Result<()> {
    let addr = mock_greetings(json!([{"text": "hello"}])).await?;

    let state = resolve_page_state(
        &GreetingClient::default(),
        &runtime(Environment::Production, false),
        &host_headers(addr),
        &HashMap::new(),
    )
    .await;

    assert_eq!(state, PageState::Greeted(Greeting::new("hello")));
    Ok(())
}

#[tokio::test]
async fn picked_greeting_is_always_from_the_list() -> Result<()> {
    let addr = mock_greetings(json!([{"text": "a"}, {"text": "b"}, {"text": "c"}])).await?;
    let client = GreetingClient::default();
    let origin = Origin::from_headers(&host_headers(addr)).unwrap();

    let mut seen = HashSet::new();
    for _ in 0..200 {
        let greeting = client.fetch_one(&origin, None).await.expect("greeting");
        assert!(["a", "b", "c"].contains(&greeting.text.as_str()));
        seen.insert(greeting.text);
    }
    assert_eq!(seen.len(), 3);
    Ok(())
}

#[tokio::test]
async fn empty_list_in_production_gets_env_banner() -> Result<()> {
    let addr = mock_greetings(json!([])).await?;

    let state = resolve_page_state(
        &GreetingClient::default(),
        &runtime(Environment::Production, false),
        &host_headers(addr),
        &HashMap::new(),
    )
    .await;

    assert_eq!(state, PageState::EnvVarsNotExposed);
    Ok(())
}

#[tokio::test]
async fn unreachable_endpoint_on_platform_without_bypass_gets_protection_banner() -> Result<()> {
    let addr = common::closed_addr()?;

    let state = resolve_page_state(
        &GreetingClient::default(),
        &runtime(Environment::Production, true),
        &host_headers(addr),
        &HashMap::new(),
    )
    .await;

    assert_eq!(state, PageState::NoProtectionBypass);
    Ok(())
}

#[tokio::test]
async fn server_error_and_bad_payload_degrade_to_no_greeting() -> Result<()> {
    let router = Router::new()
        .route("/api/greetings", get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }));
    let failing = common::spawn_mock(router).await?;
    let malformed = mock_greetings(json!({"text": "not a list"})).await?;

    for addr in [failing, malformed] {
        let state = resolve_page_state(
            &GreetingClient::default(),
            &runtime(Environment::Development, false),
            &host_headers(addr),
            &HashMap::new(),
        )
        .await;
        assert_eq!(state, PageState::Bare);
    }
    Ok(())
}

#[tokio::test]
async fn missing_host_skips_fetch() -> Result<()> {
    let state = resolve_page_state(
        &GreetingClient::default(),
        &runtime(Environment::Production, false),
        &HeaderMap::new(),
        &HashMap::new(),
    )
    .await;

    assert_eq!(state, PageState::EnvVarsNotExposed);
    Ok(())
}

#[tokio::test]
async fn resolved_bypass_is_forwarded_to_greetings_endpoint() -> Result<()> {
    // Stands in for a protected deployment: 401 unless the bypass header matches
    let router = Router::new().route(
        "/api/greetings",
        get(|headers: HeaderMap| async move {
            match headers.get(PROTECTION_BYPASS_HEADER).and_then(|v| v.to_str().ok()) {
                Some("letmein") => (StatusCode::OK, Json(json!([{"text": "welcome"}]))),
                _ => (StatusCode::UNAUTHORIZED, Json(json!({"error": "protected"}))),
            }
        }),
    );
    let addr = common::spawn_mock(router).await?;
    let client = GreetingClient::default();
    let platform = runtime(Environment::Production, true);

    // No bypass anywhere: request is rejected and the banner shows
    let state = resolve_page_state(&client, &platform, &host_headers(addr), &HashMap::new()).await;
    assert_eq!(state, PageState::NoProtectionBypass);

    // Query parameter is forwarded as the header
    let mut query = HashMap::new();
    query.insert(PROTECTION_BYPASS_HEADER.to_string(), "letmein".to_string());
    let state = resolve_page_state(&client, &platform, &host_headers(addr), &query).await;
    assert_eq!(state, PageState::Greeted(Greeting::new("welcome")));

    // Environment secret is used when nothing arrives on the request
    let with_secret = RuntimeEnv {
        automation_bypass_secret: Some("letmein".to_string()),
        ..platform.clone()
    };
    let state = resolve_page_state(&client, &with_secret, &host_headers(addr), &HashMap::new()).await;
    assert_eq!(state, PageState::Greeted(Greeting::new("welcome")));

    // A wrong header outranks a correct environment secret
    let mut headers = host_headers(addr);
    headers.insert(PROTECTION_BYPASS_HEADER, HeaderValue::from_static("wrong"));
    let state = resolve_page_state(&client, &with_secret, &headers, &HashMap::new()).await;
    assert_eq!(state, PageState::Bare);
    Ok(())
}
