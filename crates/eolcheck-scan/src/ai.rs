//! AI SDK and model reference detection.
//!
//! SDKs come from package manifests. Model references are found by walking
//! source and config files for the identifiers in
//! [`eolcheck_data::MODEL_PATTERNS`].

use std::collections::HashSet;
use std::path::Path;

use regex::Regex;
use serde::{Deserialize, Serialize};
use walkdir::{DirEntry, WalkDir};

use eolcheck_data::{model_patterns, python_sdk_provider, sdk_provider, ModelPattern};

use crate::dependency::{parse_json_sections, DependencyKind};
use crate::{ensure_dir, read_manifest, Result};

/// Directories never descended into.
pub const SKIP_DIRS: &[&str] = &[
    "node_modules",
    ".git",
    "dist",
    "build",
    "__pycache__",
    ".next",
    "venv",
    "target",
];

/// File extensions searched for model references (plus any `.env*` file).
pub const SCAN_EXTENSIONS: &[&str] = &["ts", "tsx", "js", "jsx", "py", "env", "yaml", "yml", "json"];

/// Larger files are not searched.
pub const MAX_FILE_BYTES: u64 = 500_000;

/// Directory levels below the root that are still searched.
pub const MAX_DEPTH: usize = 3;

/// An AI SDK package found in a manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AiSdk {
    pub sdk: String,
    pub provider: String,
    pub version: String,
    pub file: String,
}

/// A model identifier referenced from project files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectedModel {
    pub provider: String,
    pub model: String,
    /// Date stamp, `latest` or `preview` as written next to the model name.
    pub version: String,
    /// File the reference was first seen in, relative to the scan root.
    pub source: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AiScan {
    pub sdks: Vec<AiSdk>,
    pub models: Vec<DetectedModel>,
}

/// SDKs and model references for the project at `dir`.
pub fn scan_ai(dir: &Path) -> Result<AiScan> {
    Ok(AiScan {
        sdks: scan_ai_sdks(dir)?,
        models: scan_model_usage(dir)?,
    })
}

/// AI SDKs declared in `package.json`, `requirements.txt` or `pyproject.toml`.
pub fn scan_ai_sdks(dir: &Path) -> Result<Vec<AiSdk>> {
    ensure_dir(dir)?;
    let mut sdks = Vec::new();

    if let Some(raw) = read_manifest(dir, "package.json") {
        match parse_json_sections(
            &raw,
            "package.json",
            &["dependencies", "devDependencies"],
            DependencyKind::Npm,
        ) {
            Ok(deps) => {
                for dep in deps {
                    if let Some(provider) = sdk_provider(&dep.name) {
                        sdks.push(AiSdk {
                            sdk: dep.name,
                            provider: provider.to_string(),
                            version: dep.version,
                            file: "package.json".to_string(),
                        });
                    }
                }
            }
            Err(e) => tracing::warn!(error = %e, "package.json skipped for AI SDK scan"),
        }
    }

    if let Some(raw) = read_manifest(dir, "requirements.txt") {
        sdks.extend(python_sdks(requirement_lines(&raw), "requirements.txt"));
    }

    if let Some(raw) = read_manifest(dir, "pyproject.toml") {
        sdks.extend(python_sdks(pyproject_requirements(&raw), "pyproject.toml"));
    }

    Ok(sdks)
}

fn python_sdks(requirements: Vec<(String, String)>, file: &str) -> Vec<AiSdk> {
    requirements
        .into_iter()
        .filter_map(|(name, version)| {
            let provider = python_sdk_provider(&name)?;
            Some(AiSdk {
                sdk: name,
                provider: provider.to_string(),
                version,
                file: file.to_string(),
            })
        })
        .collect()
}

/// Split a PEP 508 requirement into a lowercased name and its version
/// constraint (`unknown` when none is given).
fn split_requirement(requirement: &str) -> Option<(String, String)> {
    let spec = requirement.trim();
    let end = spec
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.'))
        .unwrap_or(spec.len());
    if end == 0 {
        return None;
    }
    let name = spec[..end].to_ascii_lowercase();

    let rest = spec[end..].trim();
    let rest = match rest.strip_prefix('[') {
        Some(extras) => extras.split_once(']').map(|(_, r)| r).unwrap_or("").trim(),
        None => rest,
    };
    let version = rest
        .split([',', ';'])
        .next()
        .unwrap_or("")
        .trim_start_matches(['=', '<', '>', '!', '~', '^'])
        .trim();
    let version = if version.is_empty() { "unknown" } else { version };
    Some((name, version.to_string()))
}

fn requirement_lines(raw: &str) -> Vec<(String, String)> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#') && !line.starts_with('-'))
        .filter_map(split_requirement)
        .collect()
}

/// Requirements listed in a `pyproject.toml`: the `[project]` dependencies
/// array, `[project.optional-dependencies]` arrays and
/// `[tool.poetry.dependencies]` keys.
fn pyproject_requirements(raw: &str) -> Vec<(String, String)> {
    let mut found = Vec::new();
    let mut table = String::new();
    let mut in_array = false;

    for line in raw.lines() {
        let line = line.split('#').next().unwrap_or("").trim();
        if line.is_empty() {
            continue;
        }
        if line.starts_with('[') && !in_array {
            table = line.trim_matches(|c| c == '[' || c == ']').trim().to_string();
            continue;
        }

        match table.as_str() {
            "project" | "project.optional-dependencies" | "project.dependencies" => {
                let opens = table != "project" || line.starts_with("dependencies");
                if line.contains('[') && opens {
                    in_array = true;
                }
                if in_array || table == "project.dependencies" {
                    found.extend(quoted_strings(line).filter_map(split_requirement));
                }
                if line.contains(']') && in_array {
                    in_array = false;
                }
            }
            "tool.poetry.dependencies" => {
                if let Some((key, value)) = line.split_once('=') {
                    let name = key.trim().trim_matches('"').to_ascii_lowercase();
                    let version = quoted_strings(value).next().unwrap_or("unknown");
                    let version = version.trim_start_matches(['=', '<', '>', '!', '~', '^']);
                    found.push((name, version.to_string()));
                }
            }
            _ => {}
        }
    }
    found
}

fn quoted_strings(line: &str) -> impl Iterator<Item = &str> {
    line.split(['"', '\'']).skip(1).step_by(2)
}

/// Compiled matcher for one model pattern.
struct PatternMatcher {
    pattern: &'static ModelPattern,
    regex: Regex,
}

impl PatternMatcher {
    fn new(pattern: &'static ModelPattern) -> Option<Self> {
        let source = format!(
            r#"(?i)(?:['"`]|model['":= \t]+['"`]?)({})(?:[-_]?(\d{{8}}|\d{{4}}-\d{{2}}-\d{{2}}|latest|preview))?"#,
            regex::escape(pattern.pattern)
        );
        Regex::new(&source).ok().map(|regex| Self { pattern, regex })
    }

    /// Version of the first reference in `content`, if any.
    ///
    /// A hit directly followed by more identifier characters is a different
    /// model (`gpt-4o` inside `gpt-4o-mini`) and is ignored.
    fn find(&self, content: &str) -> Option<String> {
        self.regex.captures_iter(content).find_map(|caps| {
            let whole = caps.get(0)?;
            let next = content[whole.end()..].chars().next();
            if next.is_some_and(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_')) {
                return None;
            }
            Some(
                caps.get(2)
                    .map(|v| v.as_str().to_ascii_lowercase())
                    .unwrap_or_else(|| "latest".to_string()),
            )
        })
    }
}

fn is_skipped_dir(entry: &DirEntry) -> bool {
    entry.depth() > 0
        && entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| SKIP_DIRS.contains(&name))
}

fn is_env_file(name: &str) -> bool {
    name.starts_with(".env")
}

fn is_candidate(entry: &DirEntry) -> bool {
    if !entry.file_type().is_file() {
        return false;
    }
    let name = entry.file_name().to_string_lossy();
    if is_env_file(&name) {
        return true;
    }
    entry
        .path()
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| SCAN_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
}

/// Model identifiers referenced anywhere under `dir`, one per provider/model.
pub fn scan_model_usage(dir: &Path) -> Result<Vec<DetectedModel>> {
    ensure_dir(dir)?;

    let matchers: Vec<PatternMatcher> = model_patterns()
        .into_iter()
        .filter_map(PatternMatcher::new)
        .collect();
    let mut seen: HashSet<(&str, &str)> = HashSet::new();
    let mut models = Vec::new();

    let walker = WalkDir::new(dir)
        .max_depth(MAX_DEPTH + 1)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| !is_skipped_dir(e));

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::debug!(error = %e, "walk entry skipped");
                continue;
            }
        };
        if !is_candidate(&entry) {
            continue;
        }
        if entry.metadata().map(|m| m.len() > MAX_FILE_BYTES).unwrap_or(true) {
            continue;
        }
        let Ok(content) = std::fs::read_to_string(entry.path()) else {
            continue;
        };
        let source = entry
            .path()
            .strip_prefix(dir)
            .unwrap_or(entry.path())
            .to_string_lossy()
            .replace('\\', "/");

        for matcher in &matchers {
            let key = (matcher.pattern.provider, matcher.pattern.model);
            if seen.contains(&key) {
                continue;
            }
            if let Some(version) = matcher.find(&content) {
                seen.insert(key);
                models.push(DetectedModel {
                    provider: key.0.to_string(),
                    model: key.1.to_string(),
                    version,
                    source: source.clone(),
                });
            }
        }

        if is_env_file(&entry.file_name().to_string_lossy()) {
            for value in env_model_values(&content) {
                let Some(matcher) = matchers
                    .iter()
                    .find(|m| value.contains(&m.pattern.pattern.to_ascii_lowercase()))
                else {
                    continue;
                };
                let key = (matcher.pattern.provider, matcher.pattern.model);
                if seen.insert(key) {
                    models.push(DetectedModel {
                        provider: key.0.to_string(),
                        model: key.1.to_string(),
                        version: "latest".to_string(),
                        source: source.clone(),
                    });
                }
            }
        }
    }

    tracing::debug!(count = models.len(), "model references scanned");
    Ok(models)
}

/// Lowercased values of `*MODEL=` assignments in an env file.
fn env_model_values(content: &str) -> Vec<String> {
    content
        .lines()
        .filter_map(|line| {
            let line = line.trim().trim_start_matches("export ").trim();
            let (key, value) = line.split_once('=')?;
            if !key.trim().to_ascii_uppercase().ends_with("MODEL") {
                return None;
            }
            let value = value.trim().trim_matches(|c| c == '"' || c == '\'');
            (!value.is_empty()).then(|| value.to_ascii_lowercase())
        })
        .collect()
}
