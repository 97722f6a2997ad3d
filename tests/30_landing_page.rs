mod common;

use anyhow::Result;
use reqwest::StatusCode;

use checkly_starter::bypass::PROTECTION_BYPASS_HEADER;
use checkly_starter::page::REPO_BUTTON_TEXT;

const ENV_BANNER: &str = "Vercel system environment variables";
const BYPASS_BANNER: &str = "Deployment Protection enabled, but no bypass set";

async fn landing(base_url: &str, bypass_header: Option<&str>) -> Result<(StatusCode, String)> {
    let mut request = reqwest::Client::new().get(format!("{}/", base_url));
    if let Some(secret) = bypass_header {
        request = request.header(PROTECTION_BYPASS_HEADER, secret);
    }
    let res = request.send().await?;
    let status = res.status();
    Ok((status, res.text().await?))
}

#[tokio::test]
async fn greeting_renders_with_success_instructions() -> Result<()> {
    let server = common::TestServer::start_with(&[("GREETINGS", "hello")]).await?;

    let (status, html) = landing(&server.base_url, None).await?;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("<span>Hello</span>, this is the"), "missing greeting: {}", html);
    assert!(html.contains(REPO_BUTTON_TEXT));
    assert!(!html.contains(ENV_BANNER));
    assert!(!html.contains(BYPASS_BANNER));
    Ok(())
}

#[tokio::test]
async fn empty_list_in_production_shows_env_banner() -> Result<()> {
    let server = common::TestServer::start_with(&[("GREETINGS", ""), ("NODE_ENV", "production")]).await?;

    let (status, html) = landing(&server.base_url, None).await?;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains(ENV_BANNER));
    assert!(!html.contains(BYPASS_BANNER));
    assert!(!html.contains(REPO_BUTTON_TEXT));
    Ok(())
}

#[tokio::test]
async fn platform_without_greeting_or_bypass_shows_protection_banner() -> Result<()> {
    let server = common::TestServer::start_with(&[("GREETINGS", ""), ("VERCEL", "1")]).await?;

    let (_, html) = landing(&server.base_url, None).await?;
    assert!(html.contains(BYPASS_BANNER));
    assert!(!html.contains(ENV_BANNER));
    Ok(())
}

#[tokio::test]
async fn bypass_from_header_or_query_suppresses_protection_banner() -> Result<()> {
    let server = common::TestServer::start_with(&[("GREETINGS", ""), ("VERCEL", "1")]).await?;

    let (_, html) = landing(&server.base_url, Some("from-header")).await?;
    assert!(!html.contains(BYPASS_BANNER));

    let res = reqwest::Client::new()
        .get(format!("{}/", server.base_url))
        .query(&[(PROTECTION_BYPASS_HEADER, "from-query")])
        .send()
        .await?;
    let html = res.text().await?;
    assert!(!html.contains(BYPASS_BANNER));
    assert!(!html.contains(ENV_BANNER));
    Ok(())
}

#[tokio::test]
async fn bypass_secret_from_environment_suppresses_protection_banner() -> Result<()> {
    let server = common::TestServer::start_with(&[
        ("GREETINGS", ""),
        ("VERCEL", "1"),
        ("VERCEL_AUTOMATION_BYPASS_SECRET", "from-env"),
    ])
    .await?;

    let (status, html) = landing(&server.base_url, None).await?;
    assert_eq!(status, StatusCode::OK);
    assert!(!html.contains(BYPASS_BANNER));
    assert!(!html.contains(REPO_BUTTON_TEXT));
    Ok(())
}
