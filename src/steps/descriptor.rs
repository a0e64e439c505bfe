//! Step descriptors.
//!
//! A [`StepDescriptor`] is one planned unit of work: where the script lives,
//! which groups it belongs to, how it must be ordered relative to other
//! steps, and which hooks wrap it.

use std::collections::BTreeSet;
use std::path::Path;

use crate::config::{Properties, StepConfig};

/// Derive a step identity from a path-like string.
///
/// The identity is the lower-cased file name, so `Scripts\Build.ps1` and
/// `scripts/build.ps1` are the same step. Both `/` and `\` separate
/// components regardless of platform.
pub fn identity_for(path: &str) -> String {
    let trimmed = path.trim().trim_end_matches(['/', '\\']);
    trimmed
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(trimmed)
        .to_lowercase()
}

/// A fully described step ready for ordering and execution.
#[derive(Debug, Clone, PartialEq)]
pub struct StepDescriptor {
    /// Path the step was declared with.
    pub path: String,

    /// Stable key used for ordering references and duplicate detection.
    pub identity: String,

    /// Explicit id override (also the identity when set).
    pub id: Option<String>,

    /// Display name override.
    pub name: Option<String>,

    /// Description override.
    pub description: Option<String>,

    /// Lower-cased group tags. Empty means untagged.
    pub groups: BTreeSet<String>,

    /// Identities of steps this one must precede.
    pub execute_before: Vec<String>,

    /// Identities of steps this one must follow.
    pub execute_after: Vec<String>,

    /// Hooks run before this step only.
    pub local_pre_steps: Vec<StepDescriptor>,

    /// Hooks run after this step only.
    pub local_post_steps: Vec<StepDescriptor>,

    /// Step-local properties; these win over global ones.
    pub properties: Properties,
}

impl StepDescriptor {
    /// Create an untagged, unconstrained step for a path.
    pub fn new(path: impl Into<String>) -> Self {
        let path = path.into();
        Self {
            identity: identity_for(&path),
            path,
            id: None,
            name: None,
            description: None,
            groups: BTreeSet::new(),
            execute_before: Vec::new(),
            execute_after: Vec::new(),
            local_pre_steps: Vec::new(),
            local_post_steps: Vec::new(),
            properties: Properties::new(),
        }
    }

    /// Build a descriptor (and its local hooks) from config.
    pub fn from_config(config: &StepConfig) -> Self {
        let mut step = Self::new(config.path.clone())
            .with_groups(config.groups.iter().map(String::as_str))
            .with_properties(config.properties.clone());

        if let Some(id) = &config.id {
            step = step.with_id(id.clone());
        }
        step.name = config.name.clone();
        step.description = config.description.clone();

        for target in &config.execute_before {
            step = step.before(target);
        }
        for target in &config.execute_after {
            step = step.after(target);
        }

        step.local_pre_steps = config
            .pre_steps
            .iter()
            .map(|h| Self::from_config(&h.to_step_config()))
            .collect();
        step.local_post_steps = config
            .post_steps
            .iter()
            .map(|h| Self::from_config(&h.to_step_config()))
            .collect();

        step
    }

    /// Override the identity with an explicit id.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        let id = id.into();
        self.identity = identity_for(&id);
        self.id = Some(id);
        self
    }

    /// Set the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Add group tags (lower-cased, blanks ignored).
    pub fn with_groups<'a>(mut self, groups: impl IntoIterator<Item = &'a str>) -> Self {
        self.groups.extend(
            groups
                .into_iter()
                .map(|g| g.trim().to_lowercase())
                .filter(|g| !g.is_empty()),
        );
        self
    }

    /// Require this step to run before `target`.
    pub fn before(mut self, target: &str) -> Self {
        self.execute_before.push(identity_for(target));
        self
    }

    /// Require this step to run after `target`.
    pub fn after(mut self, target: &str) -> Self {
        self.execute_after.push(identity_for(target));
        self
    }

    /// Add a local pre-step.
    pub fn with_pre_step(mut self, hook: StepDescriptor) -> Self {
        self.local_pre_steps.push(hook);
        self
    }

    /// Add a local post-step.
    pub fn with_post_step(mut self, hook: StepDescriptor) -> Self {
        self.local_post_steps.push(hook);
        self
    }

    /// Replace the step-local properties.
    pub fn with_properties(mut self, properties: Properties) -> Self {
        self.properties = properties;
        self
    }

    /// The file name component of the path, as declared.
    pub fn file_name(&self) -> &str {
        let trimmed = self.path.trim().trim_end_matches(['/', '\\']);
        trimmed.rsplit(['/', '\\']).next().unwrap_or(trimmed)
    }

    /// Whether the step carries no group tags.
    pub fn is_untagged(&self) -> bool {
        self.groups.is_empty()
    }

    /// Whether the step declares any ordering constraint.
    pub fn has_constraints(&self) -> bool {
        !self.execute_before.is_empty() || !self.execute_after.is_empty()
    }

    /// Resolve the path against a base directory.
    pub fn resolve_path(&self, base: &Path) -> std::path::PathBuf {
        let path = Path::new(self.path.trim());
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            base.join(path)
        }
    }
}
