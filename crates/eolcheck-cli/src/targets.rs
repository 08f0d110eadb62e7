//! Turn scanner findings into check targets.

use eolcheck_core::{
    docker_image_product, infra_runtime_product, map_package_to_product, os_product,
    AiModelTarget, Category, CheckTarget, EolCheckConfig,
};
use eolcheck_data::{model_cycles, provider_display_name};
use eolcheck_scan::{clean_version, Dependency, DependencyKind, DetectedModel, EnvironmentScan};
use tracing::debug;

/// Node.js, the OS and detected services.
pub fn environment_targets(env: &EnvironmentScan) -> Vec<CheckTarget> {
    let mut targets = Vec::new();

    if let Some(node) = &env.node_version {
        targets.push(CheckTarget::new("Node.js", node, "nodejs", Category::Runtime));
    }

    if let Some(os) = &env.os {
        match os_product(os) {
            Some((product, version)) => {
                targets.push(CheckTarget::new(os, version, product, Category::Os))
            }
            None => debug!(os = %os, "operating system not tracked"),
        }
    }

    for service in &env.services {
        targets.push(CheckTarget::new(
            &service.name,
            &service.version,
            &service.product,
            Category::Service,
        ));
    }

    targets
}

/// Manifest, Dockerfile and infrastructure findings that map to a lifecycle product.
pub fn dependency_targets(deps: &[Dependency]) -> Vec<CheckTarget> {
    deps.iter().filter_map(dependency_target).collect()
}

fn dependency_target(dep: &Dependency) -> Option<CheckTarget> {
    let (product, category) = match dep.kind {
        DependencyKind::Docker => (docker_image_product(&dep.name), Category::Infrastructure),
        DependencyKind::Infrastructure => {
            (infra_runtime_product(&dep.name), Category::Infrastructure)
        }
        _ => (map_package_to_product(&dep.name), Category::Dependency),
    };
    let Some(product) = product else {
        debug!(name = %dep.name, file = %dep.file, "no lifecycle product");
        return None;
    };

    let version = clean_version(&dep.version);
    if !version.starts_with(|c: char| c.is_ascii_digit()) {
        debug!(name = %dep.name, version = %dep.version, "no concrete version");
        return None;
    }

    Some(CheckTarget::new(&dep.name, version, product, category).with_source(&dep.file))
}

/// Detected models that the catalog knows about.
pub fn ai_targets(models: &[DetectedModel]) -> Vec<AiModelTarget> {
    models
        .iter()
        .filter_map(|m| {
            let Some(cycles) = model_cycles(&m.provider, &m.model) else {
                debug!(provider = %m.provider, model = %m.model, "model not in catalog");
                return None;
            };
            Some(AiModelTarget {
                provider: provider_display_name(&m.provider)
                    .map(str::to_string)
                    .unwrap_or_else(|| m.provider.clone()),
                model: m.model.clone(),
                version: m.version.clone(),
                cycles,
                source: Some(m.source.clone()),
            })
        })
        .collect()
}

/// Drop targets named in the config's `excludes`.
pub fn without_excluded(targets: Vec<CheckTarget>, config: &EolCheckConfig) -> Vec<CheckTarget> {
    targets
        .into_iter()
        .filter(|t| {
            let excluded = config.is_excluded(&t.component);
            if excluded {
                debug!(component = %t.component, "excluded by config");
            }
            !excluded
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use eolcheck_scan::Service;

    #[test]
    fn environment_becomes_targets() {
        let env = EnvironmentScan {
            node_version: Some("20.11.0".into()),
            os: Some("Ubuntu 22.04.4 LTS".into()),
            services: vec![Service {
                name: "Redis".into(),
                version: "7.2.3".into(),
                product: "redis".into(),
            }],
        };
        let targets = environment_targets(&env);
        assert_eq!(targets.len(), 3);
        assert_eq!(targets[0].product, "nodejs");
        assert_eq!(targets[1].product, "ubuntu");
        assert_eq!(targets[1].version, "22.04");
        assert_eq!(targets[1].category, Category::Os);
        assert_eq!(targets[2].category, Category::Service);
    }

    #[test]
    fn unknown_os_is_dropped() {
        let env = EnvironmentScan {
            os: Some("Arch Linux".into()),
            ..Default::default()
        };
        assert!(environment_targets(&env).is_empty());
    }

    #[test]
    fn dependencies_map_and_clean() {
        let deps = vec![
            Dependency::new("react", "^18.2.0", DependencyKind::Npm, "package.json"),
            Dependency::new("left-pad", "1.3.0", DependencyKind::Npm, "package.json"),
            Dependency::new("node", "18-alpine", DependencyKind::Docker, "Dockerfile"),
            Dependency::new("ubuntu", "latest", DependencyKind::Docker, "Dockerfile"),
            Dependency::new("java", "17", DependencyKind::Infrastructure, "main.tf"),
        ];
        let targets = dependency_targets(&deps);
        let seen: Vec<(&str, &str, &str)> = targets
            .iter()
            .map(|t| (t.component.as_str(), t.product.as_str(), t.version.as_str()))
            .collect();
        assert_eq!(
            seen,
            vec![
                ("react", "react", "18.2.0"),
                ("node", "nodejs", "18"),
                ("java", "amazon-corretto", "17"),
            ]
        );
        assert_eq!(targets[0].source.as_deref(), Some("package.json"));
        assert_eq!(targets[1].category, Category::Infrastructure);
    }

    #[test]
    fn uncatalogued_models_are_skipped() {
        let models = vec![
            DetectedModel {
                provider: "anthropic".into(),
                model: "claude-3.5-sonnet".into(),
                version: "20241022".into(),
                source: "src/chat.ts".into(),
            },
            DetectedModel {
                provider: "openai".into(),
                model: "gpt-99".into(),
                version: "latest".into(),
                source: "src/x.ts".into(),
            },
        ];
        let targets = ai_targets(&models);
        assert_eq!(targets.len(), 1);
        assert_eq!(targets[0].provider, "Anthropic");
        assert!(!targets[0].cycles.is_empty());
    }

    #[test]
    fn excludes_filter_by_component() {
        let config = EolCheckConfig {
            excludes: vec!["react".into(), "@types/*".into()],
            ..Default::default()
        };
        let targets = vec![
            CheckTarget::new("react", "18", "react", Category::Dependency),
            CheckTarget::new("@types/node", "20", "nodejs", Category::Dependency),
            CheckTarget::new("vue", "3", "vue", Category::Dependency),
        ];
        let kept = without_excluded(targets, &config);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].component, "vue");
    }
}
