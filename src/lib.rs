//! steprunner - ordered build steps with hooks, group filters and
//! failure policies.
//!
//! A run file declares steps (scripts), the groups they belong to and how
//! they must be ordered relative to each other. steprunner resolves a single
//! execution order, then runs each eligible step wrapped in its pre-steps
//! and post-steps.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Run file loading, parsing, and validation
//! - [`error`] - Error types and result aliases
//! - [`runner`] - Ordering resolution and step orchestration
//! - [`shell`] - Shell command execution
//! - [`steps`] - Step descriptors, metadata, and invokers
//! - [`ui`] - Terminal output
//!
//! # Example
//!
//! ```
//! use steprunner::runner::{RunConfig, StepOrchestrator};
//! use steprunner::steps::{RecordingInvoker, StepDescriptor};
//! use steprunner::ui::MockUI;
//!
//! let config = RunConfig::new(vec![
//!     StepDescriptor::new("test.sh").after("build.sh"),
//!     StepDescriptor::new("build.sh"),
//! ]);
//!
//! let mut invoker = RecordingInvoker::new();
//! let mut ui = MockUI::new();
//! let report = StepOrchestrator::new(&mut invoker, &mut ui).run(&config);
//!
//! assert!(report.success);
//! assert_eq!(invoker.identities(), vec!["build.sh", "test.sh"]);
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod runner;
pub mod shell;
pub mod steps;
pub mod ui;

pub use error::{Result, StepRunnerError};
