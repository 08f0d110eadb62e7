//! Lifecycle data sources and caller-owned snapshots.
//!
//! The engine never fetches anything; callers hand it record slices. This
//! module defines the capability seam for obtaining those records
//! ([`LifecycleSource`]) and a [`LifecycleRepository`] that holds an
//! immutable [`LifecycleSnapshot`]. A refresh builds a new snapshot and
//! swaps it in; readers that already hold an `Arc` to the old snapshot keep a
//! consistent view.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::task::JoinSet;

use crate::domain::{EolError, LifecycleCycle, Result};
use crate::obs::{emit_fetch_failed, emit_snapshot_refreshed};

/// Injectable provider of lifecycle records for a product key.
///
/// Implement this for remote APIs, on-disk caches, static tables or test stubs.
#[async_trait]
pub trait LifecycleSource: Send + Sync {
    /// Fetch the ordered lifecycle records for `product`.
    async fn fetch(&self, product: &str) -> Result<Vec<LifecycleCycle>>;
}

/// Immutable view of lifecycle records keyed by product.
#[derive(Debug, Clone, Default)]
pub struct LifecycleSnapshot {
    products: HashMap<String, Arc<[LifecycleCycle]>>,
    taken_at: Option<DateTime<Utc>>,
}

impl LifecycleSnapshot {
    /// Records for `product`, if the snapshot holds any.
    pub fn get(&self, product: &str) -> Option<Arc<[LifecycleCycle]>> {
        self.products.get(product).cloned()
    }

    pub fn contains(&self, product: &str) -> bool {
        self.products.contains_key(product)
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// When the snapshot was built (`None` for the initial empty snapshot).
    pub fn taken_at(&self) -> Option<DateTime<Utc>> {
        self.taken_at
    }
}

/// A product whose records could not be refreshed.
#[derive(Debug)]
pub struct FetchFailure {
    pub product: String,
    pub error: EolError,
}

/// Outcome of [`LifecycleRepository::refresh`].
#[derive(Debug)]
pub struct RefreshReport {
    /// The snapshot now installed in the repository.
    pub snapshot: Arc<LifecycleSnapshot>,
    /// Products that failed; they keep their previous records if any existed.
    pub failures: Vec<FetchFailure>,
}

/// Caller-owned holder of the current lifecycle snapshot.
pub struct LifecycleRepository {
    source: Arc<dyn LifecycleSource>,
    snapshot: Arc<LifecycleSnapshot>,
}

impl LifecycleRepository {
    pub fn new(source: Arc<dyn LifecycleSource>) -> Self {
        Self {
            source,
            snapshot: Arc::new(LifecycleSnapshot::default()),
        }
    }

    /// The current snapshot.
    pub fn snapshot(&self) -> Arc<LifecycleSnapshot> {
        Arc::clone(&self.snapshot)
    }

    /// Records for `product` in the current snapshot.
    pub fn get(&self, product: &str) -> Option<Arc<[LifecycleCycle]>> {
        self.snapshot.get(product)
    }

    /// Fetch `products` concurrently and install a new snapshot.
    ///
    /// A failing product never blocks the others. Duplicate keys are fetched once.
    pub async fn refresh(&mut self, products: &[String]) -> RefreshReport {
        let unique: BTreeSet<&str> = products.iter().map(String::as_str).collect();

        let mut join_set = JoinSet::new();
        for product in unique.into_iter().map(str::to_string) {
            let source = Arc::clone(&self.source);
            join_set.spawn(async move {
                let fetched = source.fetch(&product).await;
                (product, fetched)
            });
        }

        let mut next = self.snapshot.products.clone();
        let mut failures = Vec::new();
        let mut refreshed = 0usize;

        while let Some(joined) = join_set.join_next().await {
            match joined {
                Ok((product, Ok(records))) => {
                    next.insert(product, Arc::from(records));
                    refreshed += 1;
                }
                Ok((product, Err(error))) => {
                    emit_fetch_failed(&product, &error);
                    failures.push(FetchFailure { product, error });
                }
                Err(join_err) => {
                    let error = EolError::fetch("<task>", format!("fetch task join error: {join_err}"));
                    emit_fetch_failed("<task>", &error);
                    failures.push(FetchFailure {
                        product: "<task>".to_string(),
                        error,
                    });
                }
            }
        }

        failures.sort_by(|a, b| a.product.cmp(&b.product));
        emit_snapshot_refreshed(refreshed, failures.len());

        let snapshot = Arc::new(LifecycleSnapshot {
            products: next,
            taken_at: Some(Utc::now()),
        });
        self.snapshot = Arc::clone(&snapshot);

        RefreshReport { snapshot, failures }
    }
}
