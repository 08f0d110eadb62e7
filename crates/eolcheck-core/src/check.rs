//! Check orchestration: resolve lifecycle data for many components at once.
//!
//! [`Checker`] refreshes a [`LifecycleRepository`] for every distinct product
//! among its targets (fetches run concurrently), then evaluates each target
//! against the resulting snapshot. A product that fails to load only drops
//! the components that depend on it.

use chrono::{DateTime, Utc};

use crate::domain::{AiModelCycle, Category, EvaluationResult};
use crate::evaluator::{evaluate_ai_model_at, evaluate_version_at};
use crate::obs::{emit_component_skipped, emit_evaluated};
use crate::source::{FetchFailure, LifecycleRepository};

/// One component instance to check against a lifecycle product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckTarget {
    /// Label shown in results (e.g. `"Node.js"`, `"react"`).
    pub component: String,
    /// Raw version string as discovered.
    pub version: String,
    /// Lifecycle product key (e.g. `"nodejs"`).
    pub product: String,
    pub category: Category,
    /// Where the component was discovered.
    pub source: Option<String>,
}

impl CheckTarget {
    pub fn new(
        component: impl Into<String>,
        version: impl Into<String>,
        product: impl Into<String>,
        category: Category,
    ) -> Self {
        Self {
            component: component.into(),
            version: version.into(),
            product: product.into(),
            category,
            source: None,
        }
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}

/// One AI model reference with its resolved lifecycle records.
#[derive(Debug, Clone)]
pub struct AiModelTarget {
    /// Provider display name (e.g. `"Anthropic"`).
    pub provider: String,
    pub model: String,
    pub version: String,
    pub cycles: Vec<AiModelCycle>,
    pub source: Option<String>,
}

/// Results of a check run plus the products that could not be loaded.
#[derive(Debug, Default)]
pub struct CheckOutcome {
    pub results: Vec<EvaluationResult>,
    pub failures: Vec<FetchFailure>,
    /// Components skipped because their product had no records.
    pub skipped: Vec<String>,
}

/// Evaluates batches of targets against a caller-owned repository.
pub struct Checker {
    repository: LifecycleRepository,
}

impl Checker {
    pub fn new(repository: LifecycleRepository) -> Self {
        Self { repository }
    }

    /// Refresh every product referenced by `targets` and evaluate them at `now`.
    pub async fn run(&mut self, targets: &[CheckTarget], now: DateTime<Utc>) -> CheckOutcome {
        let products: Vec<String> = targets.iter().map(|t| t.product.clone()).collect();
        let report = self.repository.refresh(&products).await;

        let mut outcome = CheckOutcome {
            failures: report.failures,
            ..Default::default()
        };

        for target in targets {
            match report.snapshot.get(&target.product) {
                Some(cycles) if !cycles.is_empty() => {
                    let mut result =
                        evaluate_version_at(&target.component, &target.version, &cycles, now)
                            .with_category(target.category);
                    if let Some(source) = &target.source {
                        result = result.with_source(source.clone());
                    }
                    emit_evaluated(&result);
                    outcome.results.push(result);
                }
                _ => {
                    emit_component_skipped(&target.component, &target.product);
                    outcome.skipped.push(target.component.clone());
                }
            }
        }

        outcome
    }
}

/// Evaluate AI model targets; they carry their own records, so nothing is fetched.
pub fn evaluate_ai_targets(targets: &[AiModelTarget], now: DateTime<Utc>) -> Vec<EvaluationResult> {
    targets
        .iter()
        .map(|t| {
            let result = evaluate_ai_model_at(
                &t.provider,
                &t.model,
                &t.version,
                &t.cycles,
                t.source.as_deref(),
                now,
            );
            emit_evaluated(&result);
            result
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DateOrFlag, Status};
    use chrono::TimeZone;

    #[test]
    fn ai_targets_are_tagged() {
        let now = Utc.with_ymd_and_hms(2025, 12, 1, 0, 0, 0).unwrap();
        let targets = vec![AiModelTarget {
            provider: "OpenAI".to_string(),
            model: "gpt-4".to_string(),
            version: "0613".to_string(),
            cycles: vec![AiModelCycle::new(
                "0613",
                DateOrFlag::Date("2024-06-13".to_string()),
            )],
            source: Some("src/app.ts".to_string()),
        }];
        let results = evaluate_ai_targets(&targets, now);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].status, Status::Err);
        assert_eq!(results[0].category, Some(Category::AiModel));
        assert_eq!(results[0].source.as_deref(), Some("src/app.ts"));
    }

    #[test]
    fn target_builder() {
        let target = CheckTarget::new("react", "^18.2.0", "react", Category::Dependency)
            .with_source("package.json");
        assert_eq!(target.source.as_deref(), Some("package.json"));
    }
}
