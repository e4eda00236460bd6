//! Minimal HTTP client for fetching text documents with safe logging.
//!
//! - Request options: per-request timeout and absolute-URL passthrough
//! - One attempt per call; retry policy belongs to the caller
//! - Typed errors that separate timeouts, transport failures and HTTP status
//! - Optional *raw* request/response logging via `WIKIDAY_HTTP_RAW=1`
//!
//! Example (no_run):
//! ```rust
//! # async fn demo() -> Result<(), wikiday_http::HttpError> {
//! let client = wikiday_http::HttpClient::new("https://en.wikipedia.org/wiki/")?;
//! let html = client
//!     .get_text("March_14", wikiday_http::RequestOpts::default())
//!     .await?;
//! # let _ = html;
//! # Ok(()) }
//! ```
//!
//! Observability: structured `tracing` events are emitted for request start,
//! response headers, body snippets (truncated), final errors, and (optionally)
//! raw request/response lines (target `http.raw`) when `WIKIDAY_HTTP_RAW=1`.

use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use reqwest::{Client, Method, StatusCode};
use std::env;
use std::time::{Duration, Instant};
use thiserror::Error;

pub use reqwest::Url;
pub use reqwest::header;

/// Sent on every request unless replaced with [`HttpClient::with_user_agent`].
pub const DEFAULT_USER_AGENT: &str = concat!(
    "wikiday/",
    env!("CARGO_PKG_VERSION"),
    " (+https://example.invalid/wikiday)"
);

// ==============================
// Raw logging toggles
// ==============================

const RAW_ENV: &str = "WIKIDAY_HTTP_RAW";
const RAW_MAX_BODY: usize = 64 * 1024; // cap raw body logs (64 KiB)
const SNIPPET_MAX: usize = 500;

fn raw_enabled() -> bool {
    matches!(
        env::var(RAW_ENV).as_deref(),
        Ok("1") | Ok("true") | Ok("yes")
    )
}

/// Render a best-effort curl command for repro/debug, with secrets redacted.
fn make_curl(method: &Method, url: &Url, headers: &HeaderMap) -> String {
    let mut parts = vec!["curl".to_string(), format!("-X{}", method)];
    for (key, val) in redact_headers(headers) {
        parts.push(format!("-H '{}: {}'", key, val.replace('\'', r"'\''")));
    }
    parts.push(format!("'{}'", url.as_str()));
    parts.join(" ")
}

/// Redact sensitive headers for logging
fn redact_headers(h: &HeaderMap) -> Vec<(String, String)> {
    h.iter()
        .map(|(k, v)| {
            let key = k.as_str().to_string();
            let val = if is_secret_header(&key) {
                "<redacted>".to_string()
            } else {
                v.to_str().unwrap_or("").to_string()
            };
            (key, val)
        })
        .collect()
}

fn is_secret_header(name: &str) -> bool {
    matches!(
        name.to_ascii_lowercase().as_str(),
        "authorization" | "cookie" | "set-cookie" | "proxy-authorization"
    )
}

// ==============================
// Errors
// ==============================

#[derive(Debug, Error)]
pub enum HttpError {
    #[error("invalid URL: {0}")]
    Url(String),
    #[error("request build failed: {0}")]
    Build(String),
    #[error("request to {url} timed out after {timeout_ms} ms")]
    Timeout { url: String, timeout_ms: u64 },
    #[error("network error: {0}")]
    Network(String),
    #[error("server returned {status} for {url}: {body_snippet}")]
    Status {
        status: StatusCode,
        url: String,
        body_snippet: String,
    },
}

// ==============================
// Request Options
// ==============================

/// Per-request tuning knobs for the HTTP client.
///
/// ```
/// use wikiday_http::RequestOpts;
/// use std::time::Duration;
///
/// let opts = RequestOpts {
///     timeout: Some(Duration::from_millis(2500)),
///     ..Default::default()
/// };
///
/// assert_eq!(opts.timeout.unwrap().as_millis(), 2500);
/// assert!(!opts.allow_absolute);
/// ```
#[derive(Clone, Debug, Default)]
pub struct RequestOpts {
    pub timeout: Option<Duration>,
    /// If true and `path` is an absolute URL, use it as-is (ignore base).
    pub allow_absolute: bool,
}

// ==============================
// Client
// ==============================

#[derive(Clone, Debug)]
pub struct HttpClient {
    base: Url,
    inner: Client,
    /// Headers baked into `inner`; mirrored here for the raw curl log.
    default_headers: HeaderMap,
    pub default_timeout: Duration,
}

impl HttpClient {
    /// Construct a client anchored to a base URL.
    ///
    /// ```no_run
    /// use wikiday_http::{HttpClient, HttpError};
    /// use std::time::Duration;
    ///
    /// let client = HttpClient::new("https://en.wikipedia.org/wiki/")?;
    /// assert_eq!(client.default_timeout, Duration::from_secs(15));
    /// # Ok::<(), HttpError>(())
    /// ```
    pub fn new(base: &str) -> Result<Self, HttpError> {
        let base = Url::parse(base).map_err(|e| HttpError::Url(e.to_string()))?;
        let default_headers = default_headers(DEFAULT_USER_AGENT)?;
        Ok(Self {
            base,
            inner: build_inner(default_headers.clone())?,
            default_headers,
            default_timeout: Duration::from_secs(15),
        })
    }

    /// Replace the `User-Agent` sent with every request.
    pub fn with_user_agent(mut self, user_agent: &str) -> Result<Self, HttpError> {
        let headers = default_headers(user_agent)?;
        self.inner = build_inner(headers.clone())?;
        self.default_headers = headers;
        Ok(self)
    }

    /// Resolve `path` against the base URL.
    ///
    /// ```
    /// use wikiday_http::HttpClient;
    ///
    /// let client = HttpClient::new("https://en.wikipedia.org/wiki/").unwrap();
    /// let url = client.resolve("July_20", false).unwrap();
    /// assert_eq!(url.as_str(), "https://en.wikipedia.org/wiki/July_20");
    /// ```
    pub fn resolve(&self, path: &str, allow_absolute: bool) -> Result<Url, HttpError> {
        if allow_absolute {
            if let Ok(abs) = Url::parse(path) {
                return Ok(abs);
            }
        }
        self.base
            .join(path)
            .map_err(|e| HttpError::Url(e.to_string()))
    }

    /// GET `path` and return the body as text. Non-2xx statuses are errors.
    pub async fn get_text(&self, path: &str, opts: RequestOpts) -> Result<String, HttpError> {
        let url = self.resolve(path, opts.allow_absolute)?;
        let method = Method::GET;
        let timeout = opts.timeout.unwrap_or(self.default_timeout);
        let timeout_ms = timeout.as_millis() as u64;

        let rb = self
            .inner
            .request(method.clone(), url.clone())
            .timeout(timeout);

        tracing::debug!(
            method=%method,
            host_path=%format!("{}{}", url.host_str().unwrap_or("-"), url.path()),
            timeout_ms,
            "http.request.start"
        );

        if raw_enabled() {
            let curl = make_curl(&method, &url, &self.default_headers);
            tracing::debug!(target: "http.raw", %curl, "request");
        }

        // ----- Send -----
        let t0 = Instant::now();
        let resp = rb
            .send()
            .await
            .map_err(|err| transport_error(err, &url, timeout_ms, "send"))?;
        let status = resp.status();
        let headers = resp.headers().clone();
        let body = resp
            .text()
            .await
            .map_err(|err| transport_error(err, &url, timeout_ms, "body"))?;
        let dur_ms = t0.elapsed().as_millis() as u64;

        tracing::debug!(
            %status,
            duration_ms=dur_ms,
            body_len=body.len(),
            content_type=?headers.get(header::CONTENT_TYPE).and_then(|v| v.to_str().ok()),
            "http.response.headers"
        );

        if raw_enabled() {
            let hdrs = redact_headers(&headers);
            let mut end = body.len().min(RAW_MAX_BODY);
            while !body.is_char_boundary(end) {
                end -= 1;
            }
            tracing::info!(
                target: "http.raw",
                status=%status,
                duration_ms=dur_ms,
                headers=?hdrs,
                body=%&body[..end],
                truncated=end < body.len()
            );
        }

        let snippet = snip_body(&body);
        tracing::trace!(body_snippet=%snippet, "http.response.body_snippet");

        if status.is_success() {
            return Ok(body);
        }

        tracing::warn!(
            %status,
            url=%url,
            body_snippet=%snippet,
            "http.error"
        );
        Err(HttpError::Status {
            status,
            url: url.to_string(),
            body_snippet: snippet,
        })
    }
}

// ==============================
// Helpers
// ==============================

fn default_headers(user_agent: &str) -> Result<HeaderMap, HttpError> {
    let mut defaults = HeaderMap::new();
    let ua = HeaderValue::from_str(user_agent)
        .map_err(|e| HttpError::Build(format!("invalid User-Agent: {e}")))?;
    defaults.insert(USER_AGENT, ua);
    Ok(defaults)
}

fn build_inner(defaults: HeaderMap) -> Result<Client, HttpError> {
    Client::builder()
        .connect_timeout(Duration::from_secs(5))
        .default_headers(defaults)
        .build()
        .map_err(|e| HttpError::Build(e.to_string()))
}

fn transport_error(err: reqwest::Error, url: &Url, timeout_ms: u64, stage: &str) -> HttpError {
    if err.is_timeout() {
        tracing::warn!(url=%url, timeout_ms, stage, "http.timeout");
        return HttpError::Timeout {
            url: url.to_string(),
            timeout_ms,
        };
    }
    let message = err.to_string();
    tracing::warn!(url=%url, stage, message=%message, "http.network_error");
    HttpError::Network(message)
}

fn snip_body(body: &str) -> String {
    if body.len() <= SNIPPET_MAX {
        return body.to_string();
    }
    let mut end = SNIPPET_MAX;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &body[..end])
}
