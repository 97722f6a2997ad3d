// checks/greetings_api.rs - greetings endpoint answers with a list of greetings

use async_trait::async_trait;

use super::{Check, CheckOutcome, CheckTarget};
use crate::error::{CheckError, CheckResult};
use crate::greeting::{Greeting, GREETINGS_PATH};

pub struct GreetingsApiCheck {
    target: CheckTarget,
    http: reqwest::Client,
}

impl GreetingsApiCheck {
    pub fn new(target: CheckTarget) -> Self {
        Self {
            target,
            http: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl Check for GreetingsApiCheck {
    fn name(&self) -> &'static str {
        "greetings-api"
    }

    async fn run(&self) -> CheckResult<CheckOutcome> {
        let url = self.target.base_url.join(GREETINGS_PATH).map_err(|e| CheckError::InvalidTarget {
            url: self.target.base_url.to_string(),
            reason: e.to_string(),
        })?;
        let (header, secret) = self.target.bypass_header();

        let response = self.http.get(url.clone()).header(header, secret).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(CheckError::Status { url: url.to_string(), status: status.as_u16() });
        }

        let body = response.bytes().await?;
        let greetings: Vec<Greeting> = serde_json::from_slice(&body)
            .map_err(|e| CheckError::Payload(format!("expected a list of greetings: {}", e)))?;

        Ok(CheckOutcome {
            status: Some(status.as_u16()),
            detail: Some(format!("{} greetings", greetings.len())),
            screenshot: None,
        })
    }
}
