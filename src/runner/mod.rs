//! Step ordering and execution.

pub mod dependency;
pub mod filter;
pub mod orchestrator;
pub mod report;

pub use dependency::{
    collect_constraints, resolve_order, DependencyGraph, DependencyGraphBuilder, ExecutionPlan,
    OrderingConstraint,
};
pub use filter::{GroupFilter, ALL_GROUPS};
pub use orchestrator::{RunConfig, RunPolicy, StepOrchestrator};
pub use report::{format_duration, RunReport, StepOutcome, StepStatus};
