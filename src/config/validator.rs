//! Configuration validation rules.
//!
//! Checks only what the run file itself can get wrong. Ordering problems
//! (unknown references, cycles) are reported by the resolver at run time,
//! because group filters and CLI overrides change what a run contains.

use crate::config::schema::{HookConfig, RunnerConfig};
use crate::error::{Result, StepRunnerError};

/// Validation error with context.
#[derive(Debug, Clone)]
pub struct ValidationError {
    /// Rule identifier
    pub rule: String,
    /// Human-readable error message
    pub message: String,
}

/// Validate a configuration and return all errors.
pub fn validate_config(config: &RunnerConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    for (index, step) in config.steps.iter().enumerate() {
        if step.path.trim().is_empty() {
            errors.push(ValidationError {
                rule: "missing-path".to_string(),
                message: format!("Step #{} has no 'path'", index + 1),
            });
        }
        errors.extend(validate_hooks(&step.pre_steps, "pre_steps"));
        errors.extend(validate_hooks(&step.post_steps, "post_steps"));
    }

    errors.extend(validate_hooks(&config.pre_steps, "pre_steps"));
    errors.extend(validate_hooks(&config.post_steps, "post_steps"));
    errors.extend(validate_hooks(&config.failure_steps, "failure_steps"));

    for entry in &config.metadata {
        if entry.file.trim().is_empty() {
            errors.push(ValidationError {
                rule: "missing-metadata-file".to_string(),
                message: "Metadata entry has no 'file'".to_string(),
            });
        }
    }

    errors
}

fn validate_hooks(hooks: &[HookConfig], field: &str) -> Vec<ValidationError> {
    hooks
        .iter()
        .filter(|hook| hook.to_step_config().path.trim().is_empty())
        .map(|_| ValidationError {
            rule: "missing-path".to_string(),
            message: format!("An entry in '{}' has no path", field),
        })
        .collect()
}

/// Validate a configuration, failing on the first problem found.
pub fn validate(config: &RunnerConfig) -> Result<()> {
    match validate_config(config).into_iter().next() {
        Some(error) => Err(StepRunnerError::ConfigValidationError {
            message: error.message,
        }),
        None => Ok(()),
    }
}
