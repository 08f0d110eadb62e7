//! Project configuration (`.eolrc.json` or the `"eol-check"` key of `package.json`).

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::domain::{EolError, Result};

pub const RC_FILE: &str = ".eolrc.json";
pub const PACKAGE_JSON_KEY: &str = "eol-check";

/// Behaviour switches for a check run. Missing keys take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EolCheckConfig {
    pub fail_on_eol: bool,
    pub fail_on_warning: bool,
    pub scan_ai: bool,
    pub scan_docker: bool,
    pub scan_infra: bool,
    pub verbose: bool,
    /// Component names to skip. A trailing `*` makes the entry a prefix match.
    pub excludes: Vec<String>,
}

impl Default for EolCheckConfig {
    fn default() -> Self {
        Self {
            fail_on_eol: true,
            fail_on_warning: false,
            scan_ai: false,
            scan_docker: false,
            scan_infra: false,
            verbose: false,
            excludes: Vec::new(),
        }
    }
}

impl EolCheckConfig {
    /// Parse a config object from JSON text.
    pub fn from_json(raw: &str) -> Result<Self> {
        serde_json::from_str(raw).map_err(|e| EolError::Config(e.to_string()))
    }

    pub fn is_excluded(&self, component: &str) -> bool {
        self.excludes.iter().any(|pattern| match pattern.strip_suffix('*') {
            Some(prefix) => component.starts_with(prefix),
            None => pattern == component,
        })
    }
}

/// Load the configuration that applies to `dir`.
///
/// `.eolrc.json` wins when it exists; a malformed one is reported and
/// ignored. Otherwise the `"eol-check"` key of `package.json` is used.
pub fn load_config(dir: &Path) -> EolCheckConfig {
    let rc_path = dir.join(RC_FILE);
    if rc_path.exists() {
        return match std::fs::read_to_string(&rc_path)
            .map_err(EolError::from)
            .and_then(|raw| EolCheckConfig::from_json(&raw))
        {
            Ok(config) => config,
            Err(e) => {
                warn!(path = %rc_path.display(), error = %e, "failed to parse .eolrc.json, using defaults");
                EolCheckConfig::default()
            }
        };
    }

    from_package_json(&dir.join("package.json")).unwrap_or_default()
}

fn from_package_json(path: &Path) -> Option<EolCheckConfig> {
    let raw = std::fs::read_to_string(path).ok()?;
    let mut pkg: serde_json::Value = serde_json::from_str(&raw).ok()?;
    let section = pkg.get_mut(PACKAGE_JSON_KEY)?.take();
    serde_json::from_value(section).ok()
}
