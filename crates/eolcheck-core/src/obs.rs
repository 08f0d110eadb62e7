//! Structured observability hooks for eol-check.
//!
//! - `CheckSpan`: RAII guard scoping log lines to one check run
//! - Emission functions for evaluation, fetch and snapshot events
//!
//! Every event carries an `event` field so log pipelines can filter on it.

use tracing::{debug, info, warn};

use crate::domain::{EvaluationResult, Status};

/// RAII guard that enters a check-scoped tracing span.
///
/// ```ignore
/// let _span = CheckSpan::enter("/srv/app");
/// // tracing calls now carry target_dir = "/srv/app"
/// ```
pub struct CheckSpan {
    _span: tracing::span::EnteredSpan,
}

impl CheckSpan {
    pub fn enter(target_dir: &str) -> Self {
        let span = tracing::info_span!("eolcheck.check", target_dir = %target_dir);
        Self {
            _span: span.entered(),
        }
    }
}

/// Emit event: one component evaluated. ERR results are logged at info,
/// everything else at debug.
pub fn emit_evaluated(result: &EvaluationResult) {
    match result.status {
        Status::Err => info!(
            event = "evaluation.completed",
            component = %result.component,
            version = %result.version,
            status = %result.status,
        ),
        _ => debug!(
            event = "evaluation.completed",
            component = %result.component,
            version = %result.version,
            status = %result.status,
        ),
    }
}

/// Emit event: lifecycle data for a product could not be fetched.
pub fn emit_fetch_failed(product: &str, error: &dyn std::fmt::Display) {
    warn!(event = "lifecycle.fetch_failed", product = %product, error = %error);
}

/// Emit event: a repository snapshot was rebuilt.
pub fn emit_snapshot_refreshed(refreshed: usize, failed: usize) {
    info!(
        event = "lifecycle.snapshot_refreshed",
        refreshed = refreshed,
        failed = failed,
    );
}

/// Emit event: a component was skipped because no lifecycle data exists for it.
pub fn emit_component_skipped(component: &str, product: &str) {
    debug!(event = "check.skipped", component = %component, product = %product);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{assemble, Verdict};

    #[test]
    fn emitters_do_not_panic_without_subscriber() {
        let _span = CheckSpan::enter("/tmp/project");
        let result = assemble("Node.js", "16", Verdict::new(Status::Err, "EOL"), None, None);
        emit_evaluated(&result);
        emit_fetch_failed("nodejs", &"timeout");
        emit_snapshot_refreshed(3, 1);
        emit_component_skipped("left-pad", "left-pad");
    }
}
