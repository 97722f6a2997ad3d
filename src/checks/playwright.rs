//! Playwright browser check for the landing page

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;

use super::{Check, CheckOutcome, CheckTarget};
use crate::error::{CheckError, CheckResult};
use crate::page::REPO_BUTTON_TEXT;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum Browser {
    #[default]
    Chromium,
    Firefox,
    Webkit,
}

impl Browser {
    fn as_str(&self) -> &'static str {
        match self {
            Browser::Chromium => "chromium",
            Browser::Firefox => "firefox",
            Browser::Webkit => "webkit",
        }
    }
}

/// Loads the page in a real browser, screenshots it, and waits for the repo button
pub struct LandingPageBrowserCheck {
    target: CheckTarget,
    screenshot_path: PathBuf,
    browser: Browser,
    timeout_ms: u64,
}

impl LandingPageBrowserCheck {
    pub fn new(target: CheckTarget, screenshot_path: PathBuf) -> Self {
        Self {
            target,
            screenshot_path,
            browser: Browser::default(),
            timeout_ms: 10_000,
        }
    }

    pub fn with_browser(mut self, browser: Browser) -> Self {
        self.browser = browser;
        self
    }

    /// Generate the Node script driving Playwright.
    /// Every interpolated value is emitted as a JSON string literal.
    pub fn build_script(&self) -> String {
        let (header, secret) = self.target.bypass_header();
        let literal = |s: &str| serde_json::Value::from(s).to_string();

        format!(
            r#"
const {{ {browser} }} = require('playwright');

(async () => {{
  const browser = await {browser}.launch({{ headless: true }});
  const context = await browser.newContext({{
    extraHTTPHeaders: {{ {header}: {secret} }}
  }});
  const page = await context.newPage();

  try {{
    const response = await page.goto({url});
    const status = response ? response.status() : 0;
    if (status >= 400 || status === 0) {{
      throw new Error('unexpected status ' + status);
    }}
    await page.screenshot({{ path: {screenshot} }});
    await page.getByText({text}).waitFor({{ state: 'visible', timeout: {timeout} }});
    console.log(JSON.stringify({{ success: true, status }}));
  }} catch (error) {{
    console.error(JSON.stringify({{ success: false, error: error.message }}));
    process.exit(1);
  }} finally {{
    await browser.close();
  }}
}})();
"#,
            browser = self.browser.as_str(),
            header = literal(header),
            secret = literal(secret),
            url = literal(self.target.base_url.as_str()),
            screenshot = literal(&self.screenshot_path.to_string_lossy()),
            text = literal(REPO_BUTTON_TEXT),
            timeout = self.timeout_ms,
        )
    }

    async fn check_playwright_installed() -> CheckResult<()> {
        let status = Command::new("npx")
            .args(["playwright", "--version"])
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await;

        match status {
            Ok(status) if status.success() => Ok(()),
            _ => Err(CheckError::PlaywrightNotFound),
        }
    }

    /// Pull the reported status out of the script's success line
    fn parse_status(stdout: &str) -> Option<u16> {
        stdout
            .lines()
            .filter_map(|line| serde_json::from_str::<serde_json::Value>(line).ok())
            .find_map(|value| value.get("status").and_then(|s| s.as_u64()))
            .and_then(|status| u16::try_from(status).ok())
    }
}

/// Project `node_modules` first, then any inherited NODE_PATH entries
fn node_path(project_dir: &Path, inherited: Option<OsString>) -> OsString {
    let mut paths = vec![project_dir.join("node_modules")];
    if let Some(inherited) = inherited {
        paths.extend(std::env::split_paths(&inherited));
    }
    std::env::join_paths(paths).unwrap_or_else(|_| project_dir.join("node_modules").into_os_string())
}

#[async_trait]
impl Check for LandingPageBrowserCheck {
    fn name(&self) -> &'static str {
        "landing-page-browser"
    }

    async fn run(&self) -> CheckResult<CheckOutcome> {
        Self::check_playwright_installed().await?;

        if let Some(dir) = self.screenshot_path.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir)?;
        }

        // Under the project so `require('playwright')` sees a local install
        let project_dir = std::env::current_dir()?;
        let temp_dir = tempfile::Builder::new().prefix(".playwright-check").tempdir_in(&project_dir)?;
        let script_path = temp_dir.path().join("landing-page.js");
        std::fs::write(&script_path, self.build_script())?;
        tracing::debug!("Running Playwright script: {}", script_path.display());

        let output = Command::new("node")
            .arg(&script_path)
            .current_dir(&project_dir)
            .env("NODE_PATH", node_path(&project_dir, std::env::var_os("NODE_PATH")))
            .output()
            .await?;
        let stdout = String::from_utf8_lossy(&output.stdout);

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(CheckError::Playwright(format!(
                "Script failed:\nstdout: {}\nstderr: {}",
                stdout, stderr
            )));
        }

        Ok(CheckOutcome {
            status: Self::parse_status(&stdout),
            detail: Some(format!("'{}' visible in {}", REPO_BUTTON_TEXT, self.browser.as_str())),
            screenshot: Some(self.screenshot_path.clone()),
        })
    }
}
