//! Aggregate view over a batch of evaluation results.

use serde::{Deserialize, Serialize};

use crate::config::EolCheckConfig;
use crate::domain::{EvaluationResult, Status};

/// Per-status counts for one check run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckSummary {
    pub total: usize,
    pub ok: usize,
    pub warn: usize,
    pub err: usize,
}

impl CheckSummary {
    pub fn from_results(results: &[EvaluationResult]) -> Self {
        results.iter().fold(Self::default(), |mut acc, r| {
            acc.total += 1;
            match r.status {
                Status::Ok => acc.ok += 1,
                Status::Warn => acc.warn += 1,
                Status::Err => acc.err += 1,
            }
            acc
        })
    }

    /// Highest severity seen, `None` for an empty run.
    pub fn worst(&self) -> Option<Status> {
        if self.err > 0 {
            Some(Status::Err)
        } else if self.warn > 0 {
            Some(Status::Warn)
        } else if self.ok > 0 {
            Some(Status::Ok)
        } else {
            None
        }
    }

    /// Whether the run should exit non-zero under `config`.
    pub fn should_fail(&self, config: &EolCheckConfig) -> bool {
        (config.fail_on_eol && self.err > 0) || (config.fail_on_warning && self.warn > 0)
    }
}

impl std::fmt::Display for CheckSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Total: {} | OK: {} | WARN: {} | ERR: {}",
            self.total, self.ok, self.warn, self.err
        )
    }
}

/// Stable sort putting the most severe results first.
pub fn sort_by_severity(results: &mut [EvaluationResult]) {
    results.sort_by(|a, b| b.status.cmp(&a.status));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{assemble, Verdict};

    fn result(component: &str, status: Status) -> EvaluationResult {
        assemble(component, "1", Verdict::new(status, "m"), None, None)
    }

    #[test]
    fn counts_and_worst() {
        let results = vec![
            result("a", Status::Ok),
            result("b", Status::Warn),
            result("c", Status::Ok),
        ];
        let summary = CheckSummary::from_results(&results);
        assert_eq!(summary.total, 3);
        assert_eq!(summary.ok, 2);
        assert_eq!(summary.warn, 1);
        assert_eq!(summary.worst(), Some(Status::Warn));
        assert_eq!(summary.to_string(), "Total: 3 | OK: 2 | WARN: 1 | ERR: 0");
        assert_eq!(CheckSummary::default().worst(), None);
    }

    #[test]
    fn failure_policy() {
        let config = EolCheckConfig::default();
        let warn_only = CheckSummary {
            total: 1,
            warn: 1,
            ..Default::default()
        };
        let with_err = CheckSummary {
            total: 1,
            err: 1,
            ..Default::default()
        };
        assert!(!warn_only.should_fail(&config));
        assert!(with_err.should_fail(&config));

        let strict = EolCheckConfig {
            fail_on_warning: true,
            ..Default::default()
        };
        assert!(warn_only.should_fail(&strict));

        let lenient = EolCheckConfig {
            fail_on_eol: false,
            ..Default::default()
        };
        assert!(!with_err.should_fail(&lenient));
    }

    #[test]
    fn severity_sort_is_stable() {
        let mut results = vec![
            result("a", Status::Ok),
            result("b", Status::Err),
            result("c", Status::Warn),
            result("d", Status::Err),
        ];
        sort_by_severity(&mut results);
        let order: Vec<&str> = results.iter().map(|r| r.component.as_str()).collect();
        assert_eq!(order, vec!["b", "d", "c", "a"]);
    }
}
