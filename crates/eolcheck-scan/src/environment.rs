//! Host runtime, operating system and service detection.

use std::path::Path;
use std::process::Command;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::pattern;

/// A service binary and how to ask it for its version.
#[derive(Debug, Clone, Copy)]
pub struct ServiceCommand {
    pub name: &'static str,
    pub product: &'static str,
    pub program: &'static str,
    pub args: &'static [&'static str],
}

/// Services detected on the host. `nginx -v` reports on stderr.
pub const SERVICE_COMMANDS: &[ServiceCommand] = &[
    ServiceCommand {
        name: "PostgreSQL",
        product: "postgresql",
        program: "postgres",
        args: &["--version"],
    },
    ServiceCommand {
        name: "Redis",
        product: "redis",
        program: "redis-server",
        args: &["--version"],
    },
    ServiceCommand {
        name: "Nginx",
        product: "nginx",
        program: "nginx",
        args: &["-v"],
    },
    ServiceCommand {
        name: "Docker",
        product: "docker-engine",
        program: "docker",
        args: &["--version"],
    },
    ServiceCommand {
        name: "MySQL",
        product: "mysql",
        program: "mysql",
        args: &["--version"],
    },
    ServiceCommand {
        name: "MongoDB",
        product: "mongodb",
        program: "mongod",
        args: &["--version"],
    },
];

/// A detected service with the lifecycle product it maps to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Service {
    pub name: String,
    pub version: String,
    pub product: String,
}

/// What was found on the host.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvironmentScan {
    /// `node --version` output without the leading `v`.
    pub node_version: Option<String>,
    /// `PRETTY_NAME` from `/etc/os-release`.
    pub os: Option<String>,
    pub services: Vec<Service>,
}

/// First dotted version number (`x.y` or `x.y.z`) in command output.
pub fn extract_version(output: &str) -> Option<String> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    pattern(&RE, r"\d+\.\d+(\.\d+)?")?
        .find(output)
        .map(|m| m.as_str().to_string())
}

/// `PRETTY_NAME` value of an os-release document.
pub fn parse_os_release(raw: &str) -> Option<String> {
    raw.lines().find_map(|line| {
        let value = line.trim().strip_prefix("PRETTY_NAME=")?;
        let value = value.trim().trim_matches('"');
        (!value.is_empty()).then(|| value.to_string())
    })
}

/// Stdout and stderr of `program args`, or `None` when it cannot run.
fn command_output(program: &str, args: &[&str]) -> Option<String> {
    let output = Command::new(program).args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }
    let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
    text.push_str(&String::from_utf8_lossy(&output.stderr));
    Some(text)
}

pub fn detect_node_version() -> Option<String> {
    let out = command_output("node", &["--version"])?;
    let version = out.trim().trim_start_matches('v');
    (!version.is_empty()).then(|| version.to_string())
}

pub fn detect_os() -> Option<String> {
    let raw = std::fs::read_to_string(Path::new("/etc/os-release")).ok()?;
    parse_os_release(&raw)
}

/// Run one version command; unavailable binaries yield `None`.
pub fn detect_service(cmd: &ServiceCommand) -> Option<Service> {
    let out = command_output(cmd.program, cmd.args)?;
    let version = extract_version(&out)?;
    Some(Service {
        name: cmd.name.to_string(),
        version,
        product: cmd.product.to_string(),
    })
}

pub fn detect_services() -> Vec<Service> {
    SERVICE_COMMANDS.iter().filter_map(detect_service).collect()
}

/// Inspect the current host.
pub fn scan_environment() -> EnvironmentScan {
    let scan = EnvironmentScan {
        node_version: detect_node_version(),
        os: detect_os(),
        services: detect_services(),
    };
    tracing::debug!(
        node = ?scan.node_version,
        os = ?scan.os,
        services = scan.services.len(),
        "environment scanned"
    );
    scan
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn versions_from_command_output() {
        assert_eq!(
            extract_version("postgres (PostgreSQL) 15.4").as_deref(),
            Some("15.4")
        );
        assert_eq!(
            extract_version("Redis server v=7.2.3 sha=00000000:0 malloc=jemalloc-5.3.0")
                .as_deref(),
            Some("7.2.3")
        );
        assert_eq!(
            extract_version("nginx version: nginx/1.24.0").as_deref(),
            Some("1.24.0")
        );
        assert_eq!(
            extract_version("Docker version 24.0.7, build afdd53b").as_deref(),
            Some("24.0.7")
        );
        assert_eq!(extract_version("no digits here"), None);
    }

    #[test]
    fn os_release_pretty_name() {
        let raw = "NAME=\"Ubuntu\"\nVERSION_ID=\"22.04\"\nPRETTY_NAME=\"Ubuntu 22.04.4 LTS\"\nID=ubuntu\n";
        assert_eq!(parse_os_release(raw).as_deref(), Some("Ubuntu 22.04.4 LTS"));
        assert_eq!(parse_os_release("ID=alpine\n"), None);
    }

    #[test]
    fn missing_binary_is_skipped() {
        let cmd = ServiceCommand {
            name: "Ghost",
            product: "ghost",
            program: "eolcheck-definitely-not-installed",
            args: &["--version"],
        };
        assert_eq!(detect_service(&cmd), None);
    }
}
