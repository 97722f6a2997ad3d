// handlers/landing.rs - GET / handler

use std::collections::HashMap;

use axum::{
    extract::{Query, State},
    http::HeaderMap,
    response::Html,
};

use crate::bypass::BypassSources;
use crate::config::RuntimeEnv;
use crate::greeting::{GreetingClient, Origin};
use crate::page::{self, PageState};
use crate::server::AppState;

pub async fn landing_page(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> Html<String> {
    let page_state = resolve_page_state(&state.greeting_client, &state.config.runtime, &headers, &query).await;
    tracing::debug!("Rendering landing page: {:?}", page_state);
    Html(page::render(&page_state))
}

/// Resolve the bypass, fetch a greeting from the request's own origin, and
/// pick what the page should show. Never fails.
///
/// The origin comes from the client-supplied `Host` header. When the token is
/// the environment secret, it is sent to that host, so a standalone server
/// should sit behind a proxy that pins `Host`.
pub async fn resolve_page_state(
    client: &GreetingClient,
    runtime: &RuntimeEnv,
    headers: &HeaderMap,
    query: &HashMap<String, String>,
) -> PageState {
    let sources = BypassSources::from_request(headers, query, runtime.automation_bypass_secret.as_deref());
    let bypass = sources.resolve();

    let greeting = match Origin::from_headers(headers) {
        Some(origin) => {
            if !runtime.platform_managed && sources.resolves_from_env() && !origin.is_local() {
                tracing::warn!(
                    "Forwarding the automation bypass secret to non-local host {}; pin the Host header upstream",
                    origin.host
                );
            }
            client.fetch_one(&origin, bypass.as_ref()).await
        }
        None => {
            tracing::warn!("Request has no host header; skipping greeting fetch");
            None
        }
    };

    PageState::decide(greeting, runtime, bypass.as_ref())
}
