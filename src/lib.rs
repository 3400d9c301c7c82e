//! Library entrypoint for grab-build-params.
//!
//! The primary interface is the `grab-build-params` binary. This lib target
//! exposes the fetch-and-print flow to integration tests.

pub mod ci_client;
pub mod config;
pub mod output;
pub mod params;

use anyhow::Result;
use std::io::Write;

use crate::ci_client::CiClient;

/// Print the header, fetch the build, then print its parameters and footer.
///
/// The header is written before the request is made. On any failure no
/// parameter lines are written.
pub fn grab_build_params(
    client: &CiClient,
    build_number: &str,
    platform: &str,
    out: &mut dyn Write,
) -> Result<()> {
    params::write_header(out, build_number, platform)?;
    out.flush()?;

    let url = client.build_json_url(build_number, platform);
    output::action("GET", &url);
    let description = client.fetch_build_from(&url)?;
    let parameters = description.parameters()?;

    params::write_parameters(out, parameters)?;
    params::write_footer(out)?;
    out.flush()?;
    Ok(())
}
