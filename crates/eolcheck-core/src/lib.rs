//! eol-check core library
//!
//! Version-to-lifecycle evaluation engine plus the pieces every front end
//! shares: lifecycle source seam, snapshot repository, check orchestration,
//! configuration, product mapping and report artifacts.

pub mod ai;
pub mod check;
pub mod classify;
pub mod config;
pub mod domain;
pub mod evaluator;
pub mod matcher;
pub mod normalize;
pub mod obs;
pub mod product_map;
pub mod reporting;
pub mod source;
pub mod summary;
pub mod telemetry;

pub use domain::{
    assemble, AiModelCycle, Category, CycleId, DateOrFlag, EolError, EvaluationResult,
    LifecycleCycle, Result, Status, Verdict,
};

pub use evaluator::{evaluate_ai_model, evaluate_ai_model_at, evaluate_version, evaluate_version_at};

pub use check::{evaluate_ai_targets, AiModelTarget, CheckOutcome, CheckTarget, Checker};
pub use config::{load_config, EolCheckConfig};
pub use matcher::MatchRule;
pub use normalize::NormalizedVersion;
pub use product_map::{
    docker_image_product, infra_runtime_product, map_package_to_product, os_product,
};
pub use reporting::{
    render_report_md, write_report_json, write_report_md, CheckReportArtifact,
};
pub use source::{
    FetchFailure, LifecycleRepository, LifecycleSnapshot, LifecycleSource, RefreshReport,
};
pub use summary::{sort_by_severity, CheckSummary};
pub use telemetry::init_tracing;

/// Crate version, used in user agents and report output.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
