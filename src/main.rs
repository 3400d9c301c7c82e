use anyhow::Result;
use clap::Parser;
use std::io;
use std::process;

use grab_build_params::ci_client::CiClient;
use grab_build_params::config::{self, DEFAULT_PLATFORM};
use grab_build_params::output;

/// Print a gate-nova-matrix build's parameters as NAME=VALUE lines.
///
/// Paste the output into a shell to re-run tests with the same build
/// environment.
#[derive(Parser, Debug)]
#[command(
    name = "grab-build-params",
    version,
    about,
    after_help = "Examples:\n  grab-build-params 4521\n  grab-build-params 4521 trusty\n  grab-build-params --ci-url http://localhost:8080 4521"
)]
struct Cli {
    /// Build number of the matrix run (inserted into the URL as-is).
    build_number: String,

    /// Platform selecting the jenkins-<platform>-v2 instance image.
    #[arg(default_value = DEFAULT_PLATFORM)]
    platform: String,

    /// CI server base URL (overrides GRAB_BUILD_PARAMS_CI_URL).
    #[arg(long)]
    ci_url: Option<String>,

    /// Print the request URL to stderr.
    #[arg(short, long)]
    verbose: bool,
}

fn run(cli: &Cli) -> Result<()> {
    output::set_verbose(cli.verbose);

    let resolved = config::resolve_ci_url(cli.ci_url.as_deref());
    if resolved.is_override {
        output::note(&format!("using CI server {}", resolved.url));
    }

    let client = CiClient::new(&resolved.url)?;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    grab_build_params::grab_build_params(&client, &cli.build_number, &cli.platform, &mut out)
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        output::fail("error:", &format!("{e:#}"));
        process::exit(1);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
