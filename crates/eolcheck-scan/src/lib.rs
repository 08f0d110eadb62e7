//! eolcheck-scan: discovers what a project and its host run on
//!
//! - [`dependency`]: package manifests (npm, Composer, pip, Go, Bundler)
//! - [`docker`]: Dockerfile base images
//! - [`infrastructure`]: serverless runtime declarations
//! - [`ai`]: AI SDKs and model references
//! - [`environment`]: Node.js, OS and service versions on the host
//!
//! Scanners only fail when the scan root itself cannot be read. A manifest
//! that cannot be read or parsed is logged and skipped.

pub mod ai;
pub mod dependency;
pub mod docker;
pub mod environment;
pub mod error;
pub mod infrastructure;

use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;

pub use ai::{scan_ai, scan_ai_sdks, scan_model_usage, AiScan, AiSdk, DetectedModel};
pub use dependency::{clean_version, scan_dependencies, Dependency, DependencyKind};
pub use docker::{parse_from_line, scan_dockerfile, BaseImage};
pub use environment::{scan_environment, EnvironmentScan, Service};
pub use error::ScanError;
pub use infrastructure::{parse_aws_runtime, scan_infrastructure};

/// Result type for scanner operations
pub type Result<T> = std::result::Result<T, ScanError>;

/// Fail unless `dir` is a readable directory.
pub(crate) fn ensure_dir(dir: &Path) -> Result<()> {
    std::fs::read_dir(dir)
        .map(|_| ())
        .map_err(|source| ScanError::Directory {
            path: dir.to_path_buf(),
            source,
        })
}

/// Contents of `dir/file`, or `None` when it is absent or unreadable.
pub(crate) fn read_manifest(dir: &Path, file: &str) -> Option<String> {
    let path = dir.join(file);
    if !path.is_file() {
        return None;
    }
    match std::fs::read_to_string(&path) {
        Ok(raw) => Some(raw),
        Err(source) => {
            let err = ScanError::Read { path, source };
            tracing::warn!(error = %err, "skipping manifest");
            None
        }
    }
}

/// Lazily compiled regex for a fixed pattern.
pub(crate) fn pattern(cell: &'static OnceLock<Option<Regex>>, source: &str) -> Option<&'static Regex> {
    cell.get_or_init(|| Regex::new(source).ok()).as_ref()
}
