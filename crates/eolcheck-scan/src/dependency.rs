//! Project manifest scanning: package.json, composer.json, requirements.txt,
//! go.mod and Gemfile.

use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ScanError;
use crate::{ensure_dir, pattern, read_manifest, Result};

/// Ecosystem a dependency was declared in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DependencyKind {
    Npm,
    Composer,
    Python,
    Go,
    Ruby,
    Docker,
    Infrastructure,
}

/// One declared dependency, version as written in the manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dependency {
    pub name: String,
    pub version: String,
    pub kind: DependencyKind,
    /// Manifest file name relative to the scanned directory.
    pub file: String,
}

impl Dependency {
    pub fn new(
        name: impl Into<String>,
        version: impl Into<String>,
        kind: DependencyKind,
        file: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            kind,
            file: file.into(),
        }
    }
}

/// First dotted numeric run in `version` (`"^1.2.3"` -> `"1.2.3"`,
/// `"18-alpine"` -> `"18"`), or the input when it has no digits.
pub fn clean_version(version: &str) -> String {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    pattern(&RE, r"\d+(\.\d+)*")
        .and_then(|re| re.find(version))
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| version.to_string())
}

/// Collect dependencies from every supported manifest in `dir`.
///
/// Unparsable manifests are logged and skipped.
pub fn scan_dependencies(dir: &Path) -> Result<Vec<Dependency>> {
    ensure_dir(dir)?;
    let mut deps = Vec::new();

    if let Some(raw) = read_manifest(dir, "package.json") {
        let parsed = parse_json_sections(
            &raw,
            "package.json",
            &["dependencies", "devDependencies"],
            DependencyKind::Npm,
        );
        collect(&mut deps, "package.json", parsed);
    }
    if let Some(raw) = read_manifest(dir, "composer.json") {
        let parsed = parse_json_sections(
            &raw,
            "composer.json",
            &["require", "require-dev"],
            DependencyKind::Composer,
        );
        collect(&mut deps, "composer.json", parsed);
    }
    if let Some(raw) = read_manifest(dir, "requirements.txt") {
        deps.extend(parse_requirements(&raw));
    }
    if let Some(raw) = read_manifest(dir, "go.mod") {
        deps.extend(parse_go_mod(&raw));
    }
    if let Some(raw) = read_manifest(dir, "Gemfile") {
        deps.extend(parse_gemfile(&raw));
    }

    Ok(deps)
}

fn collect(deps: &mut Vec<Dependency>, file: &str, parsed: Result<Vec<Dependency>>) {
    match parsed {
        Ok(found) => deps.extend(found),
        Err(e) => tracing::warn!(file = %file, error = %e, "skipping manifest"),
    }
}

/// Merge the named object sections of a JSON manifest. A later section
/// overrides an earlier one for the same name.
pub fn parse_json_sections(
    raw: &str,
    file: &str,
    sections: &[&str],
    kind: DependencyKind,
) -> Result<Vec<Dependency>> {
    let manifest: Value = serde_json::from_str(raw).map_err(|e| ScanError::parse(file, e))?;
    let mut deps: Vec<Dependency> = Vec::new();

    for section in sections {
        let Some(entries) = manifest.get(*section).and_then(Value::as_object) else {
            continue;
        };
        for (name, version) in entries {
            let version = match version {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            match deps.iter_mut().find(|d| &d.name == name) {
                Some(existing) => existing.version = version,
                None => deps.push(Dependency::new(name.clone(), version, kind, file)),
            }
        }
    }

    Ok(deps)
}

/// `name==1.2`, `name>=1.2`, `name~=1.2`; comments and bare names are skipped.
pub fn parse_requirements(raw: &str) -> Vec<Dependency> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    let Some(re) = pattern(&RE, r"^([a-zA-Z0-9_-]+)[=<>!~]+([0-9a-zA-Z.]+)") else {
        return Vec::new();
    };

    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| re.captures(line))
        .map(|caps| {
            Dependency::new(&caps[1], &caps[2], DependencyKind::Python, "requirements.txt")
        })
        .collect()
}

/// The `go` directive plus `module vX.Y.Z` require lines.
pub fn parse_go_mod(raw: &str) -> Vec<Dependency> {
    let mut deps = Vec::new();
    for line in raw.lines().map(str::trim) {
        if let Some(rest) = line.strip_prefix("go ") {
            if let Some(version) = rest.split_whitespace().next() {
                deps.push(Dependency::new("go", version, DependencyKind::Go, "go.mod"));
            }
            continue;
        }

        let line = line.strip_prefix("require ").unwrap_or(line);
        let mut parts = line.split_whitespace();
        if let (Some(module), Some(version)) = (parts.next(), parts.next()) {
            if let Some(version) = version.strip_prefix('v') {
                deps.push(Dependency::new(module, version, DependencyKind::Go, "go.mod"));
            }
        }
    }
    deps
}

/// `gem 'name', 'constraint'` (constraint defaults to `latest`) and `ruby 'x.y'`.
pub fn parse_gemfile(raw: &str) -> Vec<Dependency> {
    let mut deps = Vec::new();
    for line in raw.lines().map(str::trim) {
        if line.starts_with("gem ") {
            let mut args = line[4..].split(',');
            let Some(name) = args.next().and_then(quoted) else {
                continue;
            };
            let version = args.next().and_then(quoted).unwrap_or("latest");
            deps.push(Dependency::new(name, version, DependencyKind::Ruby, "Gemfile"));
        } else if line.starts_with("ruby ") {
            if let Some(version) = quoted(&line[5..]) {
                deps.push(Dependency::new("ruby", version, DependencyKind::Ruby, "Gemfile"));
            }
        }
    }
    deps
}

/// Contents of the first single- or double-quoted string in `text`.
fn quoted(text: &str) -> Option<&str> {
    let start = text.find(['\'', '"'])?;
    let quote = text[start..].chars().next()?;
    let rest = &text[start + 1..];
    let end = rest.find(quote)?;
    Some(&rest[..end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_version_examples() {
        assert_eq!(clean_version("^1.2.3"), "1.2.3");
        assert_eq!(clean_version("~1.2"), "1.2");
        assert_eq!(clean_version(">=1.0.0"), "1.0.0");
        assert_eq!(clean_version("18-alpine"), "18");
        assert_eq!(clean_version("3.9-slim"), "3.9");
        assert_eq!(clean_version("latest"), "latest");
    }

    #[test]
    fn package_json_dev_overrides_runtime() {
        let raw = r#"{
            "dependencies": {"react": "^18.2.0", "vue": "3.4.0"},
            "devDependencies": {"react": "18.3.1", "jest": "^29.0.0"}
        }"#;
        let deps = parse_json_sections(
            raw,
            "package.json",
            &["dependencies", "devDependencies"],
            DependencyKind::Npm,
        )
        .unwrap();
        assert_eq!(deps.len(), 3);
        let react = deps.iter().find(|d| d.name == "react").unwrap();
        assert_eq!(react.version, "18.3.1");
        assert!(deps.iter().all(|d| d.kind == DependencyKind::Npm));
    }

    #[test]
    fn malformed_json_is_parse_error() {
        let err = parse_json_sections("{", "composer.json", &["require"], DependencyKind::Composer)
            .unwrap_err();
        assert!(matches!(err, ScanError::Parse { ref file, .. } if file == "composer.json"));
    }

    #[test]
    fn requirements_lines() {
        let raw = "# pinned\ndjango==4.2.7\nflask>=2.0\nrequests\n\npytest~=7.4.0\n";
        let deps = parse_requirements(raw);
        let names: Vec<(&str, &str)> = deps
            .iter()
            .map(|d| (d.name.as_str(), d.version.as_str()))
            .collect();
        assert_eq!(
            names,
            vec![("django", "4.2.7"), ("flask", "2.0"), ("pytest", "7.4.0")]
        );
    }

    #[test]
    fn go_mod_directive_and_requires() {
        let raw = "module example.com/app\n\ngo 1.22\n\nrequire (\n\tgithub.com/gin-gonic/gin v1.9.1\n\tgithub.com/gofiber/fiber v2.52.0 // indirect\n)\nrequire golang.org/x/text v0.14.0\n";
        let deps = parse_go_mod(raw);
        let pairs: Vec<(&str, &str)> = deps
            .iter()
            .map(|d| (d.name.as_str(), d.version.as_str()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("go", "1.22"),
                ("github.com/gin-gonic/gin", "1.9.1"),
                ("github.com/gofiber/fiber", "2.52.0"),
                ("golang.org/x/text", "0.14.0"),
            ]
        );
    }

    #[test]
    fn gemfile_gems_and_ruby() {
        let raw = "source 'https://rubygems.org'\nruby '3.2.0'\ngem 'rails', '~> 7.1'\ngem \"puma\"\n";
        let deps = parse_gemfile(raw);
        let pairs: Vec<(&str, &str)> = deps
            .iter()
            .map(|d| (d.name.as_str(), d.version.as_str()))
            .collect();
        assert_eq!(
            pairs,
            vec![("ruby", "3.2.0"), ("rails", "~> 7.1"), ("puma", "latest")]
        );
    }
}
