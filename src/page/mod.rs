//! Landing page state selection and HTML rendering.

use crate::bypass::BypassToken;
use crate::config::RuntimeEnv;
use crate::greeting::{Greeting, GREETINGS_PATH};

pub const REPO_URL: &str = "https://github.com/checkly/nextjs-checkly-starter-template";
pub const CHECKLY_URL: &str = "https://checklyhq.com";
pub const LOGO_URL: &str = "https://www.checklyhq.com/images/racoon_logo.svg";
pub const SYSTEM_ENV_DOCS_URL: &str = "https://vercel.com/docs/environment-variables/system-environment-variables";

/// Literal the landing page check looks for
pub const REPO_BUTTON_TEXT: &str = "Go to the GitHub repo";
pub const TITLE: &str = "Rust &amp; Checkly starter template";

/// What the landing page shows, decided once per render
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageState {
    /// Greeting text plus the success instructions
    Greeted(Greeting),
    /// Production build without platform system variables
    EnvVarsNotExposed,
    /// Platform deployment protection is on but no bypass is available
    NoProtectionBypass,
    /// Layout only
    Bare,
}

impl PageState {
    pub fn decide(greeting: Option<Greeting>, runtime: &RuntimeEnv, bypass: Option<&BypassToken>) -> Self {
        match greeting {
            Some(greeting) => PageState::Greeted(greeting),
            // The environment banner is checked first
            None if runtime.is_production() && !runtime.platform_managed => PageState::EnvVarsNotExposed,
            None if runtime.platform_managed && bypass.is_none() => PageState::NoProtectionBypass,
            None => PageState::Bare,
        }
    }

    pub fn greeting(&self) -> Option<&Greeting> {
        match self {
            PageState::Greeted(greeting) => Some(greeting),
            _ => None,
        }
    }
}

/// Render the full landing page document
pub fn render(state: &PageState) -> String {
    let greeting = state
        .greeting()
        .map(render_greeting)
        .unwrap_or_default();

    let body = match state {
        PageState::Greeted(_) => SUCCESS.to_string(),
        PageState::EnvVarsNotExposed => render_env_vars_not_exposed(),
        PageState::NoProtectionBypass => NO_PROTECTION_BYPASS.to_string(),
        PageState::Bare => String::new(),
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>{title}</title>
  <style>{style}</style>
</head>
<body>
  <div class="page">
    <main>
      <div>
        <a href="{checkly}" target="_blank"><img src="{logo}" alt="Checkly logomark" width="40" height="40" class="logo"></a>
        {greeting}
        <h1>{title}</h1>
      </div>
      {body}
    </main>
    <footer>
      <a href="{repo}" target="_blank" rel="noopener noreferrer">GitHub Repo</a>
      <a href="{checkly}" target="_blank" rel="noopener noreferrer">Go to checklyhq.com →</a>
    </footer>
  </div>
</body>
</html>
"#,
        title = TITLE,
        style = STYLE,
        checkly = CHECKLY_URL,
        logo = LOGO_URL,
        repo = REPO_URL,
        greeting = greeting,
        body = body,
    )
}

fn render_greeting(greeting: &Greeting) -> String {
    format!(
        r#"<div class="greeting"><span>{}</span>, this is the</div>"#,
        escape_html(&capitalize(&greeting.text))
    )
}

fn render_env_vars_not_exposed() -> String {
    format!(
        r#"<p class="banner">Almost there! Please check the README for instructions on how to expose your <a href="{}" target="_blank">Vercel system environment variables</a>.</p>"#,
        SYSTEM_ENV_DOCS_URL
    )
}

const NO_PROTECTION_BYPASS: &str = r#"<p class="banner">Almost there! It looks like you have Vercel Deployment Protection enabled, but no bypass set. Please check the README for instructions on how to provide one.</p>"#;

static SUCCESS: once_cell::sync::Lazy<String> = once_cell::sync::Lazy::new(|| {
    format!(
        r#"<p>This is a simple Rust app with a Checkly integration. In a nutshell, it does three things:</p>
      <ol>
        <li>The app fetches data from the <code>{api}</code> endpoint and displays it on this landing page.</li>
        <li>Checkly verifies if the page loads, using Playwright, and if the API responds correctly.</li>
        <li>Checkly checks can run after deployment and deployed as monitors using the Checkly CLI.</li>
      </ol>
      <p>To get going, <a href="{repo}" target="_blank">go to the repo</a> and follow the instructions in the README.md file.</p>
      <div class="actions"><a class="button" href="{repo}" target="_blank" rel="noopener noreferrer">{button}</a></div>"#,
        api = GREETINGS_PATH,
        repo = REPO_URL,
        button = REPO_BUTTON_TEXT,
    )
});

const STYLE: &str = "body{margin:0;font-family:system-ui,sans-serif}\
.page{display:grid;grid-template-rows:20px 1fr 20px;justify-items:center;min-height:100vh;padding:2rem 2rem 5rem;gap:4rem}\
main{display:flex;flex-direction:column;gap:2rem;grid-row-start:2}\
h1{font-size:2.25rem;font-weight:700}\
.greeting{margin-bottom:1rem;color:#6b7280}\
.banner{border:1px solid #3b82f6;border-radius:.375rem;padding:1rem;color:#3b82f6;background:#eff6ff;max-width:65ch}\
.button{border-radius:9999px;background:#171717;color:#fff;padding:.75rem 1.25rem;text-decoration:none}\
footer{grid-row-start:3;display:flex;gap:1.5rem;flex-wrap:wrap;justify-content:center}";

/// Uppercase the first letter of every word
fn capitalize(text: &str) -> String {
    let mut capitalized = String::with_capacity(text.len());
    let mut word_start = true;
    for c in text.chars() {
        if word_start {
            capitalized.extend(c.to_uppercase());
        } else {
            capitalized.push(c);
        }
        word_start = c.is_whitespace();
    }
    capitalized
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
