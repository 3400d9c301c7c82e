//! HTTP client for the Jenkins build JSON API.
//!
//! Provides a thin wrapper around `reqwest::blocking::Client` that addresses
//! one configuration of the nova gate matrix. Each fetch is a single GET with
//! no timeout, no retry and no authentication.

use anyhow::{Context, Result};
use std::time::Duration;

use crate::config::JOB_NAME;
use crate::params::BuildDescription;

/// User-Agent header sent with every request.
const USER_AGENT: &str = concat!("grab-build-params/", env!("CARGO_PKG_VERSION"));

/// Fixed matrix axes; `{platform}` selects the instance image.
const BUILD_TYPE_AXIS: &str = "mini-ha";
const LABEL_AXIS: &str = "nova";

/// Longest error body excerpt included in a failure message.
const MAX_ERROR_BODY_LEN: usize = 200;

// ---------------------------------------------------------------------------
// CiClient
// ---------------------------------------------------------------------------

/// Blocking client for one Jenkins server.
pub struct CiClient {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl CiClient {
    /// Create a client for the server at `base_url`.
    ///
    /// `base_url` is trimmed and stripped of trailing slashes so endpoint
    /// paths can be appended directly.
    pub fn new(base_url: &str) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(None::<Duration>)
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self {
            client,
            base_url: base_url.trim().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// URL of the JSON description for `build_number` on `platform`.
    ///
    /// Both values are inserted as-is.
    pub fn build_json_url(&self, build_number: &str, platform: &str) -> String {
        format!(
            "{}/job/{JOB_NAME}/BUILD_TYPE={BUILD_TYPE_AXIS},INSTANCE_IMAGE=jenkins-{platform}-v2,label={LABEL_AXIS}/{build_number}/api/json",
            self.base_url
        )
    }

    /// Fetch and decode the build description.
    pub fn fetch_build(&self, build_number: &str, platform: &str) -> Result<BuildDescription> {
        let url = self.build_json_url(build_number, platform);
        self.fetch_build_from(&url)
    }

    /// Fetch and decode the build description at an already built URL.
    pub fn fetch_build_from(&self, url: &str) -> Result<BuildDescription> {
        let resp = self
            .client
            .get(url)
            .send()
            .with_context(|| format!("failed to connect to CI server at {url}"))?;

        let body = map_http_error(resp)?;
        serde_json::from_str(&body).context("failed to parse build description JSON")
    }
}

// ---------------------------------------------------------------------------
// HTTP error mapping
// ---------------------------------------------------------------------------

/// Read a response body, or map a non-success status to a readable error.
fn map_http_error(resp: reqwest::blocking::Response) -> Result<String> {
    let status = resp.status();
    if status.is_success() {
        return resp.text().context("failed to read response body");
    }

    let body = resp.text().unwrap_or_default();
    let detail = error_excerpt(&body);

    match status.as_u16() {
        404 => anyhow::bail!("Build not found (check the build number and platform): {detail}"),
        500..=599 => anyhow::bail!("CI server error (HTTP {status}): {detail}"),
        _ => anyhow::bail!("Unexpected response (HTTP {status}): {detail}"),
    }
}

/// Truncate an error body for display. Jenkins error pages are HTML and long.
fn error_excerpt(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return "no details provided".to_string();
    }

    match trimmed.char_indices().nth(MAX_ERROR_BODY_LEN) {
        Some((cut, _)) => format!("{}...", &trimmed[..cut]),
        None => trimmed.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
