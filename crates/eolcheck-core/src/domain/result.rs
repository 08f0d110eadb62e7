//! Evaluation outcomes and the result assembler.

use serde::{Deserialize, Serialize};

/// Severity of an evaluation. Ordered `Ok < Warn < Err`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Status {
    #[serde(rename = "OK")]
    Ok,
    #[serde(rename = "WARN")]
    Warn,
    #[serde(rename = "ERR")]
    Err,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Ok => "OK",
            Status::Warn => "WARN",
            Status::Err => "ERR",
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Caller-assigned classification of the checked component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Runtime Environment")]
    Runtime,
    #[serde(rename = "Operating System")]
    Os,
    #[serde(rename = "System Services")]
    Service,
    #[serde(rename = "Project Dependencies")]
    Dependency,
    #[serde(rename = "AI/ML Models")]
    AiModel,
    #[serde(rename = "Infrastructure")]
    Infrastructure,
}

impl Category {
    pub fn label(&self) -> &'static str {
        match self {
            Category::Runtime => "Runtime Environment",
            Category::Os => "Operating System",
            Category::Service => "System Services",
            Category::Dependency => "Project Dependencies",
            Category::AiModel => "AI/ML Models",
            Category::Infrastructure => "Infrastructure",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Classifier output: a severity plus its explanation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    pub status: Status,
    pub message: String,
}

impl Verdict {
    pub fn new(status: Status, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }
}

/// Final, caller-facing evaluation of one component instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationResult {
    pub component: String,
    pub version: String,
    pub status: Status,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl EvaluationResult {
    /// Attach a category tag.
    pub fn with_category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    /// Attach provenance (e.g. the file the component was discovered in).
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}

/// Package a verdict with identity, category and provenance. No decisions
/// are made here.
pub fn assemble(
    component: &str,
    version: &str,
    verdict: Verdict,
    category: Option<Category>,
    source: Option<&str>,
) -> EvaluationResult {
    EvaluationResult {
        component: component.to_string(),
        version: version.to_string(),
        status: verdict.status,
        message: verdict.message,
        category,
        source: source.map(str::to_string),
    }
}
