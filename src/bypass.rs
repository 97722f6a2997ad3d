//! Deployment-protection bypass resolution.
//!
//! A bypass token may arrive on the inbound request header, on the page's
//! query string, or from the process environment. The first non-empty value
//! wins, in that order.

use std::collections::HashMap;
use std::fmt;

use axum::http::HeaderMap;

/// Header (and query key) carrying the deployment protection bypass secret
pub const PROTECTION_BYPASS_HEADER: &str = "x-vercel-protection-bypass";

/// Opaque credential that lets a request past deployment protection
#[derive(Clone, PartialEq, Eq)]
pub struct BypassToken(String);

impl BypassToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Secrets stay out of logs
impl fmt::Debug for BypassToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BypassToken(***)")
    }
}

/// The three candidate locations for a bypass token, already extracted
#[derive(Debug, Default, Clone, Copy)]
pub struct BypassSources<'a> {
    pub header: Option<&'a str>,
    pub query: Option<&'a str>,
    pub env: Option<&'a str>,
}

impl<'a> BypassSources<'a> {
    /// Pull candidates out of request headers, query parameters and the configured secret
    pub fn from_request(
        headers: &'a HeaderMap,
        query: &'a HashMap<String, String>,
        env: Option<&'a str>,
    ) -> Self {
        Self {
            header: headers
                .get(PROTECTION_BYPASS_HEADER)
                .and_then(|value| value.to_str().ok()),
            query: query.get(PROTECTION_BYPASS_HEADER).map(String::as_str),
            env,
        }
    }

    /// Header, then query parameter, then environment. Empty values are skipped.
    pub fn resolve(&self) -> Option<BypassToken> {
        [self.header, self.query, self.env]
            .into_iter()
            .flatten()
            .find(|value| !value.is_empty())
            .map(|value| BypassToken(value.to_string()))
    }

    /// True when the token resolves from the environment secret alone
    pub fn resolves_from_env(&self) -> bool {
        let given = |value: Option<&str>| value.is_some_and(|v| !v.is_empty());
        !given(self.header) && !given(self.query) && given(self.env)
    }
}

/// Resolve a bypass token for one inbound request
pub fn resolve(
    headers: &HeaderMap,
    query: &HashMap<String, String>,
    env: Option<&str>,
) -> Option<BypassToken> {
    BypassSources::from_request(headers, query, env).resolve()
}
