use anyhow::Context;
use serde_json::json;

use crate::bypass::BypassSources;
use crate::cli::utils::output_success;
use crate::cli::OutputFormat;
use crate::config::AppConfig;
use crate::greeting::{pick_random, GreetingClient, Origin};

pub async fn handle(url: Option<String>, config: &AppConfig, output_format: OutputFormat) -> anyhow::Result<()> {
    let base = url
        .or_else(|| config.check.target_url.clone())
        .context("No target URL configured (set ENVIRONMENT_URL or PRODUCTION_URL, or pass --url)")?;
    let origin = Origin::from_base_url(&base)?;

    let bypass = BypassSources {
        env: config.runtime.automation_bypass_secret.as_deref(),
        ..Default::default()
    }
    .resolve();

    let greetings = GreetingClient::default()
        .fetch_all(&origin, bypass.as_ref())
        .await
        .with_context(|| format!("Failed to fetch greetings from {}", base))?;

    let greeting = pick_random(&greetings, &mut rand::thread_rng())
        .context("Greetings endpoint returned an empty list")?;

    output_success(
        &output_format,
        &greeting.text,
        Some(json!({ "greeting": &greeting, "available": greetings.len() })),
    )
}
