//! Step descriptors, metadata, and invocation.
//!
//! - [`StepDescriptor`] - One planned unit of work
//! - [`MetadataTable`] - Display metadata keyed by file name
//! - [`StepInvoker`] - The seam through which steps actually run
//!
//! # Example
//!
//! ```
//! use steprunner::config::Properties;
//! use steprunner::steps::{RecordingInvoker, StepDescriptor, StepInvoker};
//!
//! let step = StepDescriptor::new("scripts/Build.sh")
//!     .with_groups(["build"])
//!     .after("restore.sh");
//! assert_eq!(step.identity, "build.sh");
//!
//! let mut invoker = RecordingInvoker::new();
//! invoker.invoke(&step, &Properties::parse("a=b")).unwrap();
//! assert_eq!(invoker.identities(), vec!["build.sh"]);
//! ```

pub mod descriptor;
pub mod invoker;
pub mod metadata;

pub use descriptor::{identity_for, StepDescriptor};
pub use invoker::{DryRunInvoker, Invocation, RecordingInvoker, ShellInvoker, StepInvoker};
pub use metadata::{MetadataTable, StepDisplay, StepMetadata};
