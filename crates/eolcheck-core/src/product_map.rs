//! Mapping from discovered component names to endoflife.date product slugs.

use std::collections::HashMap;
use std::sync::OnceLock;

/// Package / tool name to lifecycle product slug.
pub const PRODUCT_MAP: &[(&str, &str)] = &[
    // npm frameworks and libraries
    ("react", "react"),
    ("vue", "vue"),
    ("@angular/core", "angular"),
    ("@nestjs/core", "nestjs"),
    ("next", "nextjs"),
    ("nuxt", "nuxt"),
    ("ember-source", "ember"),
    ("svelte", "svelte"),
    ("jquery", "jquery"),
    ("bootstrap", "bootstrap"),
    ("tailwindcss", "tailwindcss"),
    ("electron", "electron"),
    ("native-base", "native-base"),
    ("react-native", "react-native"),
    ("expo", "expo"),
    ("expo-cli", "expo"),
    ("express", "express"),
    // runtimes and package managers
    ("node", "nodejs"),
    ("nodejs", "nodejs"),
    ("npm", "npm"),
    ("yarn", "yarn"),
    ("pnpm", "pnpm"),
    ("bun", "bun"),
    // test frameworks
    ("jest", "jest"),
    ("mocha", "mocha"),
    ("cypress", "cypress"),
    ("playwright", "playwright"),
    ("@playwright/test", "playwright"),
    ("jasmine", "jasmine"),
    ("jasmine-core", "jasmine"),
    ("karma", "karma"),
    ("protractor", "protractor"),
    ("ava", "ava"),
    ("vitest", "vitest"),
    // build tooling
    ("webpack", "webpack"),
    ("vite", "vite"),
    ("rollup", "rollup"),
    ("parcel", "parcel"),
    ("parcel-bundler", "parcel"),
    ("esbuild", "esbuild"),
    ("@turbo/gen", "turborepo"),
    ("turbo", "turborepo"),
    ("eslint", "eslint"),
    ("prettier", "prettier"),
    ("typescript", "typescript"),
    // databases and their drivers
    ("postgresql", "postgresql"),
    ("postgres", "postgresql"),
    ("pg", "postgresql"),
    ("mysql", "mysql"),
    ("mysql2", "mysql"),
    ("mongodb", "mongodb"),
    ("mongoose", "mongodb"),
    ("redis", "redis"),
    ("ioredis", "redis"),
    ("mariadb", "mariadb"),
    ("elasticsearch", "elasticsearch"),
    ("@elastic/elasticsearch", "elasticsearch"),
    ("memcached", "memcached"),
    ("cassandra-driver", "cassandra"),
    ("neo4j-driver", "neo4j"),
    ("sqlite3", "sqlite"),
    ("better-sqlite3", "sqlite"),
    ("couchdb", "couchdb"),
    ("nano", "couchdb"),
    // composer
    ("laravel/framework", "laravel"),
    ("symfony/symfony", "symfony"),
    ("drupal/core", "drupal"),
    ("magento/product-community-edition", "magento"),
    ("typo3/cms-core", "typo3"),
    ("php", "php"),
    ("composer", "composer"),
    // python
    ("django", "django"),
    ("flask", "flask"),
    ("python", "python"),
    ("ansible", "ansible"),
    ("kubernetes", "kubernetes"),
    ("pytest", "pytest"),
    // go
    ("go", "go"),
    ("github.com/gofiber/fiber", "fiber"),
    ("github.com/gin-gonic/gin", "gin"),
    // ruby
    ("ruby", "ruby"),
    ("rails", "rails"),
    ("jekyll", "jekyll"),
    ("bundler", "bundler"),
    // jvm and generic build tools
    ("gradle", "gradle"),
    ("maven", "maven"),
    ("ant", "ant"),
    ("bazel", "bazel"),
    ("grunt", "grunt"),
    // containers
    ("docker", "docker-engine"),
    ("containerd", "containerd"),
    ("podman", "podman"),
    // cloud SDKs
    ("aws-sdk", "amazon-eks"),
    ("@aws-sdk/client-s3", "amazon-eks"),
    ("@azure/storage-blob", "azuredevops"),
    ("@google-cloud/storage", "google-kubernetes-engine"),
];

/// Official Docker image names whose product slug differs from the image name.
const DOCKER_IMAGE_MAP: &[(&str, &str)] = &[
    ("node", "nodejs"),
    ("golang", "go"),
    ("postgres", "postgresql"),
    ("mongo", "mongodb"),
    ("httpd", "apache-http-server"),
    ("amazoncorretto", "amazon-corretto"),
    ("eclipse-temurin", "eclipse-temurin"),
    ("ubuntu", "ubuntu"),
    ("alpine", "alpine"),
    ("debian", "debian"),
    ("nginx", "nginx"),
    ("sdk", "dotnet"),
    ("aspnet", "dotnet"),
];

fn package_index() -> &'static HashMap<&'static str, &'static str> {
    static INDEX: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();
    INDEX.get_or_init(|| PRODUCT_MAP.iter().copied().collect())
}

/// Lifecycle product for a package name, if one is known.
pub fn map_package_to_product(name: &str) -> Option<&'static str> {
    package_index().get(name).copied()
}

/// Lifecycle product and version for an OS description such as
/// `"Ubuntu 22.04.5 LTS"`.
///
/// The version is the first `N` or `N.N` run in the description.
pub fn os_product(os: &str) -> Option<(&'static str, String)> {
    let lower = os.to_ascii_lowercase();
    let product = ["ubuntu", "alpine", "debian"]
        .into_iter()
        .find(|p| lower.contains(p))?;
    let version = leading_version(os, 2)?;
    Some((product, version))
}

/// Lifecycle product for a Docker image reference (`registry/path/name`).
///
/// Only the last path segment is considered.
pub fn docker_image_product(image: &str) -> Option<&'static str> {
    let name = image.rsplit('/').next().unwrap_or(image);
    DOCKER_IMAGE_MAP
        .iter()
        .find(|(candidate, _)| *candidate == name)
        .map(|(_, product)| *product)
        .or_else(|| map_package_to_product(name))
}

/// Lifecycle product for a runtime family parsed from an AWS runtime id.
pub fn infra_runtime_product(runtime: &str) -> Option<&'static str> {
    match runtime {
        "nodejs" => Some("nodejs"),
        "python" => Some("python"),
        "java" => Some("amazon-corretto"),
        "dotnet" => Some("dotnet"),
        "ruby" => Some("ruby"),
        "go" => Some("go"),
        _ => None,
    }
}

/// First run of digits with at most `max_parts` dot-separated components.
fn leading_version(text: &str, max_parts: usize) -> Option<String> {
    let start = text.find(|c: char| c.is_ascii_digit())?;
    let mut parts: Vec<&str> = Vec::new();
    for piece in text[start..].split('.') {
        let digits_end = piece
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(piece.len());
        if digits_end == 0 {
            break;
        }
        parts.push(&piece[..digits_end]);
        if digits_end < piece.len() || parts.len() == max_parts {
            break;
        }
    }
    Some(parts.join("."))
}
