//! Deployment checks: the landing page loads and the greetings API responds.
//!
//! Each check runs against a deployed base URL and carries the deployment
//! protection bypass header so protected previews can be probed.

pub mod greetings_api;
pub mod landing_page;
pub mod playwright;

use std::path::PathBuf;
use std::time::Instant;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::bypass::PROTECTION_BYPASS_HEADER;
use crate::config::AppConfig;
use crate::error::{CheckError, CheckResult};

pub use greetings_api::GreetingsApiCheck;
pub use landing_page::LandingPageCheck;
pub use playwright::{Browser, LandingPageBrowserCheck};

/// Where a check points and the bypass secret it presents
#[derive(Debug, Clone)]
pub struct CheckTarget {
    pub base_url: Url,
    pub bypass_secret: Option<String>,
}

impl CheckTarget {
    pub fn new(base_url: &str, bypass_secret: Option<String>) -> CheckResult<Self> {
        let base_url = Url::parse(base_url).map_err(|e| CheckError::InvalidTarget {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self { base_url, bypass_secret })
    }

    /// Explicit URL first, then ENVIRONMENT_URL / PRODUCTION_URL from config
    pub fn from_config(config: &AppConfig, url_override: Option<&str>) -> CheckResult<Self> {
        let url = url_override
            .or(config.check.target_url.as_deref())
            .ok_or(CheckError::MissingTarget)?;
        Self::new(url, config.runtime.automation_bypass_secret.clone())
    }

    /// The header is always sent, empty when no secret is configured
    pub fn bypass_header(&self) -> (&'static str, &str) {
        (PROTECTION_BYPASS_HEADER, self.bypass_secret.as_deref().unwrap_or(""))
    }
}

/// What a successful check observed
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CheckOutcome {
    pub status: Option<u16>,
    pub detail: Option<String>,
    pub screenshot: Option<PathBuf>,
}

/// Result of running one check, success or not
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckReport {
    pub name: String,
    pub success: bool,
    pub duration_ms: u64,
    pub outcome: Option<CheckOutcome>,
    pub error: Option<String>,
}

#[async_trait]
pub trait Check: Send + Sync {
    fn name(&self) -> &'static str;

    async fn run(&self) -> CheckResult<CheckOutcome>;
}

/// Run a check and capture timing and failure as a report
pub async fn execute(check: &dyn Check) -> CheckReport {
    let start = Instant::now();
    tracing::info!("Running check: {}", check.name());

    let result = check.run().await;
    let duration_ms = start.elapsed().as_millis() as u64;

    match result {
        Ok(outcome) => {
            tracing::info!("Check {} passed in {}ms", check.name(), duration_ms);
            CheckReport {
                name: check.name().to_string(),
                success: true,
                duration_ms,
                outcome: Some(outcome),
                error: None,
            }
        }
        Err(e) => {
            tracing::warn!("Check {} failed: {}", check.name(), e);
            CheckReport {
                name: check.name().to_string(),
                success: false,
                duration_ms,
                outcome: None,
                error: Some(e.to_string()),
            }
        }
    }
}

/// Run several checks concurrently, reports in input order
pub async fn execute_all(checks: &[Box<dyn Check>]) -> Vec<CheckReport> {
    futures::future::join_all(checks.iter().map(|check| execute(check.as_ref()))).await
}
