//! Dockerfile base image scanning.

use std::path::Path;

use crate::dependency::{Dependency, DependencyKind};
use crate::{ensure_dir, read_manifest, Result};

/// A `FROM` reference split into image and tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseImage {
    pub image: String,
    pub tag: String,
}

/// Parse one Dockerfile line. Returns `None` for anything but a `FROM`.
///
/// `--platform=...` flags are skipped and a trailing `AS name` is dropped.
/// A missing tag reads as `latest`; digests (`@sha256:...`) are cut off.
pub fn parse_from_line(line: &str) -> Option<BaseImage> {
    let mut words = line.split_whitespace();
    if !words.next()?.eq_ignore_ascii_case("FROM") {
        return None;
    }

    let reference = words.find(|w| !w.starts_with("--"))?;
    let reference = reference.split('@').next().unwrap_or(reference);

    // A colon before the last slash belongs to a registry port.
    let name_start = reference.rfind('/').map(|i| i + 1).unwrap_or(0);
    let (image, tag) = match reference[name_start..].rfind(':') {
        Some(i) => {
            let split = name_start + i;
            (&reference[..split], &reference[split + 1..])
        }
        None => (reference, "latest"),
    };

    if image.is_empty() || image.eq_ignore_ascii_case("scratch") {
        return None;
    }

    Some(BaseImage {
        image: image.to_string(),
        tag: if tag.is_empty() { "latest" } else { tag }.to_string(),
    })
}

/// All base images referenced by `Dockerfile` in `dir`.
pub fn scan_dockerfile(dir: &Path) -> Result<Vec<Dependency>> {
    ensure_dir(dir)?;
    let Some(raw) = read_manifest(dir, "Dockerfile") else {
        return Ok(Vec::new());
    };

    let images = raw
        .lines()
        .filter_map(|line| parse_from_line(line.trim()))
        .map(|base| Dependency::new(base.image, base.tag, DependencyKind::Docker, "Dockerfile"))
        .collect::<Vec<_>>();

    tracing::debug!(count = images.len(), "dockerfile scanned");
    Ok(images)
}
