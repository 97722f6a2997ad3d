//! Greeting records and the same-origin client that fetches them.

use axum::http::HeaderMap;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::bypass::{BypassToken, PROTECTION_BYPASS_HEADER};
use crate::error::GreetingError;

pub const GREETINGS_PATH: &str = "/api/greetings";
pub const FORWARDED_PROTO_HEADER: &str = "x-forwarded-proto";

/// A short display string served by the greetings endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Greeting {
    pub text: String,
}

impl Greeting {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// Scheme and authority the inbound request was addressed to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Origin {
    pub protocol: String,
    pub host: String,
}

impl Origin {
    /// Build from the `host` and `x-forwarded-proto` headers.
    ///
    /// Returns `None` when there is no host to talk back to. A missing
    /// forwarded protocol means the request reached us directly, so `http`.
    pub fn from_headers(headers: &HeaderMap) -> Option<Self> {
        let header = |name: &str| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::trim)
                .filter(|v| !v.is_empty())
        };

        let host = header("host")?;
        // Proxies may chain values: "https, http"
        let protocol = header(FORWARDED_PROTO_HEADER)
            .and_then(|v| v.split(',').next())
            .map(str::trim)
            .unwrap_or("http");

        Some(Self {
            protocol: protocol.to_ascii_lowercase(),
            host: host.to_string(),
        })
    }

    /// Parse a base URL such as `https://example.com`
    pub fn from_base_url(base: &str) -> Result<Self, GreetingError> {
        let url = Url::parse(base).map_err(|e| GreetingError::InvalidOrigin(format!("{}: {}", base, e)))?;
        let host = url
            .host_str()
            .ok_or_else(|| GreetingError::InvalidOrigin(format!("{}: missing host", base)))?;
        let host = match url.port() {
            Some(port) => format!("{}:{}", host, port),
            None => host.to_string(),
        };
        Ok(Self {
            protocol: url.scheme().to_string(),
            host,
        })
    }

    /// Loopback hosts (`localhost`, `127.0.0.0/8`, `::1`), port ignored
    pub fn is_local(&self) -> bool {
        let host = match self.host.strip_prefix('[') {
            Some(rest) => rest.split(']').next().unwrap_or(rest),
            None => match self.host.rsplit_once(':') {
                Some((name, port)) if port.chars().all(|c| c.is_ascii_digit()) => name,
                _ => self.host.as_str(),
            },
        };
        host.eq_ignore_ascii_case("localhost")
            || host.parse::<std::net::IpAddr>().is_ok_and(|ip| ip.is_loopback())
    }

    /// `{protocol}://{host}/api/greetings`
    pub fn api_url(&self) -> Result<Url, GreetingError> {
        let raw = format!("{}://{}{}", self.protocol, self.host, GREETINGS_PATH);
        Url::parse(&raw).map_err(|e| GreetingError::InvalidOrigin(format!("{}: {}", raw, e)))
    }
}

/// Uniform random pick; an empty list means no greeting
pub fn pick_random<R: Rng + ?Sized>(greetings: &[Greeting], rng: &mut R) -> Option<Greeting> {
    greetings.choose(rng).cloned()
}

/// HTTP client for the sibling greetings endpoint
#[derive(Debug, Clone, Default)]
pub struct GreetingClient {
    http: reqwest::Client,
}

impl GreetingClient {
    pub fn new(http: reqwest::Client) -> Self {
        Self { http }
    }

    /// One GET against the origin's greetings endpoint.
    /// The bypass header is attached only when a token was resolved.
    pub async fn fetch_all(
        &self,
        origin: &Origin,
        bypass: Option<&BypassToken>,
    ) -> Result<Vec<Greeting>, GreetingError> {
        let url = origin.api_url()?;
        tracing::debug!("Fetching greetings from {} (bypass: {})", url, bypass.is_some());

        let mut request = self.http.get(url);
        if let Some(token) = bypass {
            request = request.header(PROTECTION_BYPASS_HEADER, token.as_str());
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(GreetingError::Status(status.as_u16()));
        }

        let body = response.bytes().await?;
        serde_json::from_slice::<Vec<Greeting>>(&body).map_err(|e| GreetingError::Decode(e.to_string()))
    }

    /// Fetch and pick one greeting. Every failure degrades to `None`.
    pub async fn fetch_one(&self, origin: &Origin, bypass: Option<&BypassToken>) -> Option<Greeting> {
        let greetings = match self.fetch_all(origin, bypass).await {
            Ok(greetings) => greetings,
            Err(e) => {
                tracing::warn!("Greeting unavailable: {}", e);
                return None;
            }
        };
        pick_random(&greetings, &mut rand::thread_rng())
    }
}
