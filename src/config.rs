//! Compile-time defaults and CI base URL resolution.
//!
//! There is no config file. The only runtime setting is the CI server base
//! URL, resolved in layers: `--ci-url` flag, then the
//! `GRAB_BUILD_PARAMS_CI_URL` environment variable, then `DEFAULT_CI_URL`.

/// Jenkins server hosting the nova gate matrix.
pub const DEFAULT_CI_URL: &str = "http://build.monkeypuppetlabs.com:8080";

/// Environment variable name for overriding the CI base URL.
pub const CI_URL_ENV_VAR: &str = "GRAB_BUILD_PARAMS_CI_URL";

/// Matrix job whose builds are queried.
pub const JOB_NAME: &str = "gate-nova-matrix";

/// Platform used when none is given on the command line.
pub const DEFAULT_PLATFORM: &str = "precise";

/// Result of resolving the effective CI base URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedCiUrl {
    /// Base URL without trailing slash.
    pub url: String,
    /// True when a flag or env var replaced the compiled default.
    pub is_override: bool,
}

/// Resolve the CI base URL from the CLI flag, the environment and the default.
pub fn resolve_ci_url(cli_override: Option<&str>) -> ResolvedCiUrl {
    resolve_ci_url_with_env(cli_override, std::env::var(CI_URL_ENV_VAR).ok())
}

/// Internal resolver that accepts the env var value as a parameter for testability.
fn resolve_ci_url_with_env(
    cli_override: Option<&str>,
    env_value: Option<String>,
) -> ResolvedCiUrl {
    let chosen = non_empty_trimmed(cli_override.map(|s| s.to_string()))
        .or_else(|| non_empty_trimmed(env_value));

    match chosen {
        Some(url) => {
            let url = url.trim_end_matches('/').to_string();
            let is_override = url != DEFAULT_CI_URL;
            ResolvedCiUrl { url, is_override }
        }
        None => ResolvedCiUrl {
            url: DEFAULT_CI_URL.to_string(),
            is_override: false,
        },
    }
}

fn non_empty_trimmed(value: Option<String>) -> Option<String> {
    value.and_then(|v| {
        let trimmed = v.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
