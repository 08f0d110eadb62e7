//! Engine entry points.
//!
//! Each call runs normalize -> match -> classify -> assemble over immutable
//! inputs. Nothing is cached or mutated between calls, and no failure mode
//! escapes as an error: insufficient data is reported as a WARN result.

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::ai::{classify_model, match_model_cycle, unmatched_model};
use crate::classify::{classify_cycle, unmatched};
use crate::domain::{assemble, AiModelCycle, Category, EvaluationResult, LifecycleCycle};
use crate::matcher::{available_hint, match_cycle};
use crate::normalize::NormalizedVersion;

/// Evaluate a component version against its product's lifecycle records.
pub fn evaluate_version(
    component: &str,
    raw_version: &str,
    cycles: &[LifecycleCycle],
) -> EvaluationResult {
    evaluate_version_at(component, raw_version, cycles, Utc::now())
}

/// [`evaluate_version`] with an explicit reference instant.
pub fn evaluate_version_at(
    component: &str,
    raw_version: &str,
    cycles: &[LifecycleCycle],
    now: DateTime<Utc>,
) -> EvaluationResult {
    let version = NormalizedVersion::parse(raw_version);

    let verdict = match match_cycle(&version, cycles) {
        Some((cycle, rule)) => {
            debug!(
                component = %component,
                version = %version.full(),
                cycle = %cycle.cycle,
                rule = rule.as_str(),
                "matched lifecycle cycle"
            );
            classify_cycle(cycle, now)
        }
        None => unmatched(version.full(), &available_hint(cycles)),
    };

    assemble(component, version.full(), verdict, None, None)
}

/// Evaluate an AI model version against the model's lifecycle records.
///
/// The result's component is `"<provider>/<model>"`, its category is
/// [`Category::AiModel`], and its version is the matched record identifier
/// (or the input when nothing matched).
pub fn evaluate_ai_model(
    provider: &str,
    model: &str,
    version: &str,
    cycles: &[AiModelCycle],
    source: Option<&str>,
) -> EvaluationResult {
    evaluate_ai_model_at(provider, model, version, cycles, source, Utc::now())
}

/// [`evaluate_ai_model`] with an explicit reference instant.
pub fn evaluate_ai_model_at(
    provider: &str,
    model: &str,
    version: &str,
    cycles: &[AiModelCycle],
    source: Option<&str>,
    now: DateTime<Utc>,
) -> EvaluationResult {
    let component = format!("{}/{}", provider, model);

    match match_model_cycle(version, cycles) {
        Some(cycle) => assemble(
            &component,
            &cycle.cycle,
            classify_model(cycle, now),
            Some(Category::AiModel),
            source,
        ),
        None => assemble(
            &component,
            version,
            unmatched_model(version, &available_hint(cycles)),
            Some(Category::AiModel),
            source,
        ),
    }
}
