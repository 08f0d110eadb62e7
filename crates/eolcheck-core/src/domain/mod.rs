//! Domain models for eol-check.
//!
//! - `LifecycleCycle` / `AiModelCycle`: provider-supplied lifecycle records
//! - `EvaluationResult`: classified outcome for one component
//! - `EolError`: failures of the collaborators around the engine

pub mod cycle;
pub mod error;
pub mod result;

pub use cycle::{parse_date, AiModelCycle, CycleId, DateOrFlag, DateValue, LifecycleCycle};
pub use error::{EolError, Result};
pub use result::{assemble, Category, EvaluationResult, Status, Verdict};
