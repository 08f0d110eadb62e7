//! Serverless runtime declarations: Serverless Framework, AWS SAM /
//! CloudFormation templates and Terraform.

use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;

use crate::dependency::{Dependency, DependencyKind};
use crate::error::ScanError;
use crate::{ensure_dir, pattern, read_manifest, Result};

/// Runtime family and version from an AWS Lambda runtime id.
///
/// `nodejs18.x` -> (nodejs, 18), `java8.al2` -> (java, 8),
/// `dotnetcore3.1` -> (dotnet, 3.1), `go1.x` -> (go, 1). Custom runtimes
/// such as `provided.al2` yield `None`.
pub fn parse_aws_runtime(runtime: &str) -> Option<(&'static str, String)> {
    let r = runtime.trim().to_ascii_lowercase();

    let parsed = if let Some(rest) = r.strip_prefix("nodejs") {
        ("nodejs", rest.trim_end_matches(".x").to_string())
    } else if let Some(rest) = r.strip_prefix("python") {
        ("python", rest.to_string())
    } else if let Some(rest) = r.strip_prefix("java") {
        ("java", rest.split('.').next().unwrap_or(rest).to_string())
    } else if let Some(rest) = r.strip_prefix("dotnet") {
        ("dotnet", rest.trim_start_matches("core").to_string())
    } else if let Some(rest) = r.strip_prefix("ruby") {
        ("ruby", rest.to_string())
    } else if r.starts_with("go") {
        ("go", "1".to_string())
    } else {
        return None;
    };

    if parsed.1.is_empty() {
        return None;
    }
    Some(parsed)
}

/// Value of a `key: value` YAML line, comment stripped.
fn yaml_value<'a>(line: &'a str, key: &str) -> Option<&'a str> {
    let rest = line.strip_prefix(key)?.strip_prefix(':')?;
    let value = rest.split('#').next().unwrap_or(rest).trim();
    let value = value.trim_matches(|c| c == '"' || c == '\'');
    (!value.is_empty()).then_some(value)
}

fn push_runtime(deps: &mut Vec<Dependency>, runtime: &str, file: &str) {
    match parse_aws_runtime(runtime) {
        Some((name, version)) => {
            deps.push(Dependency::new(name, version, DependencyKind::Infrastructure, file))
        }
        None => tracing::debug!(runtime = %runtime, file = %file, "unsupported runtime ignored"),
    }
}

/// Runtimes declared by `runtime:` / `Runtime:` keys in a YAML document.
pub fn parse_yaml_runtimes(raw: &str, key: &str, file: &str) -> Vec<Dependency> {
    let mut deps = Vec::new();
    for line in raw.lines() {
        if let Some(runtime) = yaml_value(line.trim(), key) {
            push_runtime(&mut deps, runtime, file);
        }
    }
    deps
}

/// Runtimes declared by `runtime = "..."` attributes in a Terraform file.
pub fn parse_terraform_runtimes(raw: &str, file: &str) -> Vec<Dependency> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    let Some(re) = pattern(&RE, r#"^runtime\s*=\s*["']([^"']+)["']"#) else {
        return Vec::new();
    };

    let mut deps = Vec::new();
    for line in raw.lines() {
        if let Some(caps) = re.captures(line.trim()) {
            push_runtime(&mut deps, &caps[1], file);
        }
    }
    deps
}

/// All runtime declarations found directly in `dir`.
pub fn scan_infrastructure(dir: &Path) -> Result<Vec<Dependency>> {
    ensure_dir(dir)?;
    let mut deps = Vec::new();

    for file in ["serverless.yml", "serverless.yaml"] {
        if let Some(raw) = read_manifest(dir, file) {
            deps.extend(parse_yaml_runtimes(&raw, "runtime", file));
        }
    }
    for file in ["template.yaml", "template.yml"] {
        if let Some(raw) = read_manifest(dir, file) {
            deps.extend(parse_yaml_runtimes(&raw, "Runtime", file));
        }
    }

    let entries = std::fs::read_dir(dir).map_err(|source| ScanError::Directory {
        path: dir.to_path_buf(),
        source,
    })?;
    let mut tf_files: Vec<String> = entries
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.path().is_file())
        .filter_map(|entry| entry.file_name().into_string().ok())
        .filter(|name| name.ends_with(".tf"))
        .collect();
    tf_files.sort();

    for file in &tf_files {
        if let Some(raw) = read_manifest(dir, file) {
            deps.extend(parse_terraform_runtimes(&raw, file));
        }
    }

    Ok(deps)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aws_runtime_ids() {
        let cases = [
            ("nodejs18.x", Some(("nodejs", "18"))),
            ("nodejs20.x", Some(("nodejs", "20"))),
            ("python3.9", Some(("python", "3.9"))),
            ("java17", Some(("java", "17"))),
            ("java8.al2", Some(("java", "8"))),
            ("dotnet6", Some(("dotnet", "6"))),
            ("dotnetcore3.1", Some(("dotnet", "3.1"))),
            ("ruby3.2", Some(("ruby", "3.2"))),
            ("go1.x", Some(("go", "1"))),
            ("provided.al2", None),
            ("nodejs", None),
        ];
        for (input, expected) in cases {
            let got = parse_aws_runtime(input);
            assert_eq!(
                got.as_ref().map(|(n, v)| (*n, v.as_str())),
                expected,
                "{input}"
            );
        }
    }

    #[test]
    fn serverless_runtime_with_comment() {
        let raw = "provider:\n  name: aws\n  runtime: nodejs16.x # upgrade soon\nfunctions:\n  hello:\n    runtime: python3.12\n";
        let deps = parse_yaml_runtimes(raw, "runtime", "serverless.yml");
        let pairs: Vec<(&str, &str)> = deps
            .iter()
            .map(|d| (d.name.as_str(), d.version.as_str()))
            .collect();
        assert_eq!(pairs, vec![("nodejs", "16"), ("python", "3.12")]);
        assert!(deps.iter().all(|d| d.kind == DependencyKind::Infrastructure));
    }

    #[test]
    fn sam_template_key_is_case_sensitive() {
        let raw = "Resources:\n  Fn:\n    Properties:\n      Runtime: java11\n      runtime: ruby3.2\n";
        let deps = parse_yaml_runtimes(raw, "Runtime", "template.yaml");
        assert_eq!(deps.len(), 1);
        assert_eq!(deps[0].name, "java");
        assert_eq!(deps[0].version, "11");
    }

    #[test]
    fn terraform_attribute() {
        let raw = "resource \"aws_lambda_function\" \"f\" {\n  runtime = \"nodejs18.x\"\n  runtime_management_config {}\n}\n";
        let deps = parse_terraform_runtimes(raw, "main.tf");
        assert_eq!(deps.len(), 1);
        assert_eq!(deps[0].file, "main.tf");
        assert_eq!(deps[0].version, "18");
    }
}
