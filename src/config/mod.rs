use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub runtime: RuntimeEnv,
    pub server: ServerConfig,
    pub greetings: GreetingsConfig,
    pub check: CheckConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Production,
}

/// Ambient deployment context consumed by the landing page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuntimeEnv {
    pub environment: Environment,
    /// True only when running under the hosting platform's managed runtime
    pub platform_managed: bool,
    #[serde(skip_serializing)]
    pub automation_bypass_secret: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
    pub request_logging: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GreetingsConfig {
    pub texts: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckConfig {
    pub target_url: Option<String>,
    pub screenshot_path: PathBuf,
}

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_SCREENSHOT_PATH: &str = "test-results/screenshot/landing-page.jpg";
pub const DEFAULT_GREETINGS: &[&str] = &["hello", "hi", "hey", "howdy", "greetings"];

impl RuntimeEnv {
    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_vars(&env::vars().collect())
    }

    /// Build a config from an explicit environment snapshot
    pub fn from_vars(vars: &HashMap<String, String>) -> Self {
        let get = |key: &str| vars.get(key).map(String::as_str);
        let non_empty = |key: &str| get(key).map(str::trim).filter(|v| !v.is_empty());
        // Platform values are opaque: no trimming
        let defined = |key: &str| get(key).filter(|v| !v.is_empty());

        // APP_ENV wins over NODE_ENV so deployments can pin the mode explicitly
        let environment = match non_empty("APP_ENV") {
            Some("production") | Some("prod") => Environment::Production,
            Some(_) => Environment::Development,
            None => match non_empty("NODE_ENV") {
                Some("production") => Environment::Production,
                _ => Environment::Development,
            },
        };

        let mut config = Self::defaults(environment);

        config.runtime.platform_managed = defined("VERCEL").is_some();
        config.runtime.automation_bypass_secret =
            defined("VERCEL_AUTOMATION_BYPASS_SECRET").map(String::from);

        // Port overrides
        let parse_port = |key: &str| non_empty(key).and_then(|v| v.parse::<u16>().ok());
        if let Some(port) = parse_port("STARTER_PORT").or_else(|| parse_port("PORT")) {
            config.server.port = port;
        }
        if let Some(v) = non_empty("SERVER_ENABLE_REQUEST_LOGGING") {
            config.server.request_logging = v.parse().unwrap_or(config.server.request_logging);
        }

        // An explicitly empty GREETINGS serves an empty list
        if let Some(v) = get("GREETINGS") {
            config.greetings.texts = v
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect();
        }

        config.check.target_url = non_empty("ENVIRONMENT_URL")
            .or_else(|| non_empty("PRODUCTION_URL"))
            .map(String::from);
        if let Some(v) = non_empty("CHECK_SCREENSHOT_PATH") {
            config.check.screenshot_path = PathBuf::from(v);
        }

        config
    }

    fn defaults(environment: Environment) -> Self {
        Self {
            runtime: RuntimeEnv {
                environment,
                platform_managed: false,
                automation_bypass_secret: None,
            },
            server: ServerConfig {
                port: DEFAULT_PORT,
                request_logging: environment == Environment::Development,
            },
            greetings: GreetingsConfig {
                texts: DEFAULT_GREETINGS.iter().map(|s| s.to_string()).collect(),
            },
            check: CheckConfig {
                target_url: None,
                screenshot_path: PathBuf::from(DEFAULT_SCREENSHOT_PATH),
            },
        }
    }
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

// Convenience function for accessing config
pub fn config() -> &'static AppConfig {
    &CONFIG
}
