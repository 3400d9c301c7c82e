//! Jenkins build description model and `NAME=VALUE` rendering.
//!
//! Only the `actions` array of the `/api/json` payload is modeled. Jenkins
//! emits many action kinds (causes, git data, test reports, often plain `{}`);
//! the build parameters are expected on the first one.

use anyhow::{Result, bail};
use serde::Deserialize;
use serde_json::Value;
use std::io::Write;

/// Decoded `/api/json` response for a single build.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct BuildDescription {
    pub actions: Vec<Action>,
}

/// One entry of the build's `actions` array.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Action {
    #[serde(default)]
    pub parameters: Option<Vec<BuildParameter>>,
}

/// A named value recorded against the build invocation.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct BuildParameter {
    pub name: String,
    pub value: Value,
}

impl BuildDescription {
    /// Parameters of `actions[0]`, in document order.
    pub fn parameters(&self) -> Result<&[BuildParameter]> {
        let Some(first) = self.actions.first() else {
            bail!("build description has no actions");
        };
        match &first.parameters {
            Some(params) => Ok(params),
            None => bail!("first action of the build description has no parameters"),
        }
    }
}

impl BuildParameter {
    /// Text placed after `=`.
    ///
    /// Strings are printed verbatim, null as nothing, anything else as
    /// compact JSON.
    pub fn value_text(&self) -> String {
        match &self.value {
            Value::String(s) => s.clone(),
            Value::Null => String::new(),
            other => other.to_string(),
        }
    }
}

pub fn write_header(w: &mut dyn Write, build_number: &str, platform: &str) -> Result<()> {
    writeln!(
        w,
        "# grabbing build env for build # {build_number} for platform {platform}"
    )?;
    Ok(())
}

pub fn write_parameters(w: &mut dyn Write, params: &[BuildParameter]) -> Result<()> {
    for param in params {
        writeln!(w, "{}={}", param.name, param.value_text())?;
    }
    Ok(())
}

pub fn write_footer(w: &mut dyn Write) -> Result<()> {
    writeln!(w, "# paste the above in your terminal to re-test")?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
