//! Integration tests for repository refresh and batch checks.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use eolcheck_core::{
    sort_by_severity, Category, CheckSummary, CheckTarget, Checker, EolCheckConfig, EolError,
    LifecycleCycle, LifecycleRepository, LifecycleSource, Result, Status,
};

struct StaticSource {
    products: HashMap<&'static str, Vec<LifecycleCycle>>,
    calls: AtomicUsize,
}

impl StaticSource {
    fn new() -> Self {
        let mut products = HashMap::new();
        products.insert(
            "nodejs",
            vec![
                LifecycleCycle::with_eol_date("18", "2026-10-30"),
                LifecycleCycle::with_eol_date("16", "2023-09-11"),
            ],
        );
        products.insert(
            "react",
            vec![LifecycleCycle::with_eol_date("17", "2026-03-01")],
        );
        products.insert("empty", vec![]);
        Self {
            products,
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl LifecycleSource for StaticSource {
    async fn fetch(&self, product: &str) -> Result<Vec<LifecycleCycle>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if product == "flaky" {
            return Err(EolError::fetch(product, "HTTP 503"));
        }
        self.products
            .get(product)
            .cloned()
            .ok_or_else(|| EolError::ProductNotFound(product.to_string()))
    }
}

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 12, 15, 0, 0, 0).unwrap()
}

#[tokio::test]
async fn failed_fetch_only_skips_its_components() {
    let source = Arc::new(StaticSource::new());
    let mut checker = Checker::new(LifecycleRepository::new(source.clone()));

    let targets = vec![
        CheckTarget::new("Node.js", "v16.20.0", "nodejs", Category::Runtime),
        CheckTarget::new("react", "^17.0.2", "react", Category::Dependency)
            .with_source("package.json"),
        CheckTarget::new("flaky-lib", "1.0.0", "flaky", Category::Dependency),
        CheckTarget::new("ghost", "1.0.0", "does-not-exist", Category::Dependency),
        CheckTarget::new("hollow", "1.0.0", "empty", Category::Dependency),
        CheckTarget::new("Node.js (Docker)", "18", "nodejs", Category::Infrastructure),
    ];

    let outcome = checker.run(&targets, now()).await;

    // nodejs is shared by two targets but fetched once.
    assert_eq!(source.calls.load(Ordering::SeqCst), 5);
    assert_eq!(outcome.results.len(), 3);
    assert_eq!(outcome.failures.len(), 2);
    let failed: Vec<&str> = outcome.failures.iter().map(|f| f.product.as_str()).collect();
    assert_eq!(failed, vec!["does-not-exist", "flaky"]);
    assert_eq!(outcome.skipped, vec!["flaky-lib", "ghost", "hollow"]);

    let node = &outcome.results[0];
    assert_eq!(node.status, Status::Err);
    assert_eq!(node.category, Some(Category::Runtime));

    let react = &outcome.results[1];
    assert_eq!(react.version, "^17.0.2");
    assert_eq!(react.source.as_deref(), Some("package.json"));
}

#[tokio::test]
async fn refresh_keeps_previous_records_on_failure() {
    struct Toggle {
        fail: std::sync::atomic::AtomicBool,
    }

    #[async_trait]
    impl LifecycleSource for Toggle {
        async fn fetch(&self, product: &str) -> Result<Vec<LifecycleCycle>> {
            if self.fail.load(Ordering::SeqCst) {
                Err(EolError::fetch(product, "offline"))
            } else {
                Ok(vec![LifecycleCycle::with_eol_date("3.12", "2028-10-31")])
            }
        }
    }

    let source = Arc::new(Toggle {
        fail: std::sync::atomic::AtomicBool::new(false),
    });
    let mut repo = LifecycleRepository::new(source.clone());

    let first = repo.refresh(&["python".to_string()]).await;
    assert!(first.failures.is_empty());
    let held = repo.snapshot();

    source.fail.store(true, Ordering::SeqCst);
    let second = repo.refresh(&["python".to_string()]).await;
    assert_eq!(second.failures.len(), 1);
    assert!(second.snapshot.get("python").is_some());
    assert!(Arc::ptr_eq(&held, &first.snapshot));
    assert!(!Arc::ptr_eq(&held, &second.snapshot));
}

#[tokio::test]
async fn summary_and_exit_policy_over_a_run() {
    let source = Arc::new(StaticSource::new());
    let mut checker = Checker::new(LifecycleRepository::new(source));
    let targets = vec![
        CheckTarget::new("react", "17", "react", Category::Dependency),
        CheckTarget::new("Node.js", "18.19.0", "nodejs", Category::Runtime),
        CheckTarget::new("Node.js", "16", "nodejs", Category::Runtime),
    ];

    let mut results = checker.run(&targets, now()).await.results;
    sort_by_severity(&mut results);
    let statuses: Vec<Status> = results.iter().map(|r| r.status).collect();
    assert_eq!(statuses, vec![Status::Err, Status::Warn, Status::Ok]);

    let summary = CheckSummary::from_results(&results);
    assert_eq!(summary.worst(), Some(Status::Err));
    assert!(summary.should_fail(&EolCheckConfig::default()));
}
