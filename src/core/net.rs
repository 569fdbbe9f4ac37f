// src/core/net.rs
//
// Blocking HTTP with a shared cookie jar and bounded retries.
// One `Transport` lives for the whole run so the session cookie set by the
// homepage is replayed on every panel and label request.

use std::fmt;
use std::thread;
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, ORIGIN, REFERER, USER_AGENT};
use thiserror::Error;

use crate::config::consts::{BACKOFF_STEP_MS, MAX_ATTEMPTS, REQUEST_TIMEOUT_SECS, USER_AGENT as UA};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Method::Get => "GET",
            Method::Post => "POST",
        })
    }
}

/// `attempts` tries in total; the wait before try `n + 1` is `backoff_step * n`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub attempts: u32,
    pub backoff_step: Duration,
}

impl RetryPolicy {
    pub fn backoff(&self, attempt: u32) -> Duration {
        self.backoff_step * attempt
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            attempts: MAX_ATTEMPTS,
            backoff_step: Duration::from_millis(BACKOFF_STEP_MS),
        }
    }
}

#[derive(Debug, Error)]
pub enum NetError {
    #[error("{method} {url} failed after {attempts} attempt(s): {reason}")]
    Exhausted {
        method: Method,
        url: String,
        attempts: u32,
        reason: String,
    },

    #[error("HTTP client setup failed: {0}")]
    Client(String),
}

/// Run `op` until it succeeds or the policy runs out of attempts.
/// `op` receives the 1-based attempt number.
pub fn with_retry<T, E: fmt::Display>(
    policy: RetryPolicy,
    method: Method,
    url: &str,
    mut op: impl FnMut(u32) -> Result<T, E>,
) -> Result<T, NetError> {
    let attempts = policy.attempts.max(1);
    let mut last = s!();
    for attempt in 1..=attempts {
        match op(attempt) {
            Ok(v) => return Ok(v),
            Err(e) => {
                last = e.to_string();
                logw!("{method} {url} attempt {attempt}/{attempts} failed: {last}");
                if attempt < attempts {
                    thread::sleep(policy.backoff(attempt));
                }
            }
        }
    }
    Err(NetError::Exhausted { method, url: s!(url), attempts, reason: last })
}

/// Scheme and authority of `url`: `https://host/a/b` → `https://host`.
pub fn origin_of(url: &str) -> &str {
    let after_scheme = url.find("://").map(|i| i + 3).unwrap_or(0);
    match url[after_scheme..].find('/') {
        Some(i) => &url[..after_scheme + i],
        None => url,
    }
}

pub struct Transport {
    client: Client,
    ajax: HeaderMap,
    policy: RetryPolicy,
}

impl Transport {
    pub fn new(base_url: &str, policy: RetryPolicy) -> Result<Self, NetError> {
        let referer = header_value(base_url)?;

        let mut defaults = HeaderMap::new();
        defaults.insert(USER_AGENT, HeaderValue::from_static(UA));
        defaults.insert(REFERER, referer.clone());

        let client = Client::builder()
            .default_headers(defaults)
            .cookie_store(true)
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| NetError::Client(e.to_string()))?;

        let mut ajax = HeaderMap::new();
        ajax.insert("x-requested-with", HeaderValue::from_static("XMLHttpRequest"));
        ajax.insert(ORIGIN, header_value(origin_of(base_url))?);
        ajax.insert(REFERER, referer);

        Ok(Self { client, ajax, policy })
    }

    /// GET sends `params` as the query string; POST sends them as a form body
    /// with the XHR headers the site's own scripts send.
    pub fn fetch(&self, method: Method, url: &str, params: &[(&str, String)]) -> Result<String, NetError> {
        with_retry(self.policy, method, url, |attempt| {
            logd!("{method} {url} (attempt {attempt})");
            let req = match method {
                Method::Get => self.client.get(url).query(params),
                Method::Post => self.client.post(url).headers(self.ajax.clone()).form(params),
            };
            req.send()
                .and_then(|r| r.error_for_status())
                .and_then(|r| r.text())
        })
    }
}

fn header_value(s: &str) -> Result<HeaderValue, NetError> {
    HeaderValue::from_str(s).map_err(|e| NetError::Client(format!("bad header value {s:?}: {e}")))
}
