//! Run file loading, parsing, and validation.
//!
//! - Schema definitions in [`schema`]
//! - File discovery and loading in [`loader`]
//! - Validation in [`validator`]
//! - `key=value;` property bags in [`properties`]
//!
//! # Example
//!
//! ```
//! use steprunner::config::{load_config, Properties};
//! use tempfile::TempDir;
//! use std::fs;
//!
//! let temp = TempDir::new().unwrap();
//! fs::write(
//!     temp.path().join("steps.yml"),
//!     "settings:\n  properties: \"Configuration=Release;\"\nsteps:\n  - path: build.sh\n",
//! )
//! .unwrap();
//!
//! let config = load_config(temp.path(), None).unwrap();
//! assert_eq!(config.steps.len(), 1);
//! assert_eq!(config.settings.properties, Properties::parse("Configuration=Release"));
//! ```

pub mod loader;
pub mod properties;
pub mod schema;
pub mod validator;

pub use loader::{find_config, load_config, load_config_file, parse_config, DEFAULT_CONFIG_NAMES};
pub use properties::Properties;
pub use schema::{HookConfig, MetadataEntry, RunnerConfig, Settings, StepConfig};
pub use validator::{validate, validate_config, ValidationError};
