use std::path::PathBuf;

use clap::Subcommand;

use crate::checks::{self, Browser, Check, CheckTarget, GreetingsApiCheck, LandingPageBrowserCheck, LandingPageCheck};
use crate::cli::utils::output_reports;
use crate::cli::OutputFormat;
use crate::config::AppConfig;

#[derive(Subcommand)]
pub enum CheckCommands {
    #[command(about = "Verify the landing page loads and shows the repo button")]
    LandingPage {
        #[arg(long, help = "Base URL (defaults to ENVIRONMENT_URL, then PRODUCTION_URL)")]
        url: Option<String>,
        #[arg(long, help = "Drive a real browser through Playwright")]
        browser: bool,
        #[arg(long, value_enum, default_value_t = Browser::Chromium, help = "Browser engine for --browser")]
        engine: Browser,
        #[arg(long, help = "Screenshot path for --browser")]
        screenshot: Option<PathBuf>,
        #[arg(long, help = "Text the page must contain (HTTP mode)")]
        expect: Option<String>,
    },

    #[command(about = "Verify the greetings API responds with a list")]
    Api {
        #[arg(long, help = "Base URL (defaults to ENVIRONMENT_URL, then PRODUCTION_URL)")]
        url: Option<String>,
    },

    #[command(about = "Run the landing page and API checks")]
    All {
        #[arg(long, help = "Base URL (defaults to ENVIRONMENT_URL, then PRODUCTION_URL)")]
        url: Option<String>,
    },
}

pub async fn handle(cmd: CheckCommands, config: &AppConfig, output_format: OutputFormat) -> anyhow::Result<()> {
    let checks: Vec<Box<dyn Check>> = match cmd {
        CheckCommands::LandingPage { url, browser, engine, screenshot, expect } => {
            let target = CheckTarget::from_config(config, url.as_deref())?;
            if browser {
                let screenshot = screenshot.unwrap_or_else(|| config.check.screenshot_path.clone());
                vec![Box::new(LandingPageBrowserCheck::new(target, screenshot).with_browser(engine)) as Box<dyn Check>]
            } else {
                let check = match expect {
                    Some(text) => LandingPageCheck::new(target).with_expected_text(text),
                    None => LandingPageCheck::new(target),
                };
                vec![Box::new(check) as Box<dyn Check>]
            }
        }
        CheckCommands::Api { url } => {
            let target = CheckTarget::from_config(config, url.as_deref())?;
            vec![Box::new(GreetingsApiCheck::new(target)) as Box<dyn Check>]
        }
        CheckCommands::All { url } => {
            let target = CheckTarget::from_config(config, url.as_deref())?;
            vec![
                Box::new(LandingPageCheck::new(target.clone())) as Box<dyn Check>,
                Box::new(GreetingsApiCheck::new(target)),
            ]
        }
    };

    let reports = checks::execute_all(&checks).await;
    let failed = output_reports(&output_format, &reports)?;
    if failed > 0 {
        anyhow::bail!("{} of {} checks failed", failed, reports.len());
    }
    Ok(())
}
