//! Configuration schema definitions.
//!
//! This module contains the struct definitions that map to the YAML run
//! file format (`steps.yml`).

use serde::{Deserialize, Serialize};

use super::properties::Properties;

/// Root configuration structure for a run file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnerConfig {
    /// Run-wide policy and defaults.
    pub settings: Settings,

    /// Display metadata keyed by step file name.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub metadata: Vec<MetadataEntry>,

    /// Primary steps, in declaration order.
    #[serde(default)]
    pub steps: Vec<StepConfig>,

    /// Steps run before every primary step.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub pre_steps: Vec<HookConfig>,

    /// Steps run after every primary step.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub post_steps: Vec<HookConfig>,

    /// Steps run once when the run has failed.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub failure_steps: Vec<HookConfig>,
}

/// Run-wide settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Abort the run as soon as a primary step fails.
    pub stop_on_first_failure: bool,

    /// Abort the run when a pre-step fails.
    pub stop_on_pre_step_failure: bool,

    /// Abort the run when a post-step fails.
    pub stop_on_post_step_failure: bool,

    /// Report pre-step failures as errors (otherwise warnings).
    pub fail_on_pre_step_failure: bool,

    /// Report post-step failures as errors (otherwise warnings).
    pub fail_on_post_step_failure: bool,

    /// Properties passed to every invocation.
    #[serde(default, skip_serializing_if = "Properties::is_empty")]
    pub properties: Properties,

    /// Default group filter.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub groups: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            stop_on_first_failure: true,
            stop_on_pre_step_failure: false,
            stop_on_post_step_failure: false,
            fail_on_pre_step_failure: true,
            fail_on_post_step_failure: true,
            properties: Properties::new(),
            groups: Vec::new(),
        }
    }
}

/// A metadata record for steps with a given file name.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MetadataEntry {
    /// File name the record applies to (matched case-insensitively).
    pub file: String,

    /// Identifier shown in place of the file name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Human-readable name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Longer description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A single step definition.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StepConfig {
    /// Script or project path.
    pub path: String,

    /// Identity override (defaults to the path's file name).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Display name override.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Description override.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Group tags.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub groups: Vec<String>,

    /// Steps this one must run before.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub execute_before: Vec<String>,

    /// Steps this one must run after.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub execute_after: Vec<String>,

    /// Hooks run before this step only.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub pre_steps: Vec<HookConfig>,

    /// Hooks run after this step only.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub post_steps: Vec<HookConfig>,

    /// Step-local property overrides.
    #[serde(default, skip_serializing_if = "Properties::is_empty")]
    pub properties: Properties,
}

/// A hook or failure step: either a bare path or a full step definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum HookConfig {
    /// Just a path, everything else defaulted.
    Path(String),
    /// A complete step definition.
    Step(Box<StepConfig>),
}

impl HookConfig {
    /// View this hook as a full step definition.
    pub fn to_step_config(&self) -> StepConfig {
        match self {
            HookConfig::Path(path) => StepConfig {
                path: path.clone(),
                ..Default::default()
            },
            HookConfig::Step(config) => (**config).clone(),
        }
    }
}
