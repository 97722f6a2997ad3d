// checks/landing_page.rs - landing page loads and shows the repo button

use async_trait::async_trait;

use super::{Check, CheckOutcome, CheckTarget};
use crate::error::{CheckError, CheckResult};
use crate::page::REPO_BUTTON_TEXT;

/// HTTP probe of the landing page: status below 400 and the expected text in the body
pub struct LandingPageCheck {
    target: CheckTarget,
    expected_text: String,
    http: reqwest::Client,
}

impl LandingPageCheck {
    pub fn new(target: CheckTarget) -> Self {
        Self {
            target,
            expected_text: REPO_BUTTON_TEXT.to_string(),
            http: reqwest::Client::new(),
        }
    }

    pub fn with_expected_text(mut self, text: impl Into<String>) -> Self {
        self.expected_text = text.into();
        self
    }
}

#[async_trait]
impl Check for LandingPageCheck {
    fn name(&self) -> &'static str {
        "landing-page"
    }

    async fn run(&self) -> CheckResult<CheckOutcome> {
        let (header, secret) = self.target.bypass_header();
        let url = self.target.base_url.clone();

        let response = self.http.get(url.clone()).header(header, secret).send().await?;
        let status = response.status().as_u16();
        if status >= 400 {
            return Err(CheckError::Status { url: url.to_string(), status });
        }

        let body = response.text().await?;
        if !body.contains(&self.expected_text) {
            return Err(CheckError::TextNotFound(self.expected_text.clone()));
        }

        Ok(CheckOutcome {
            status: Some(status),
            detail: Some(format!("found '{}'", self.expected_text)),
            screenshot: None,
        })
    }
}
