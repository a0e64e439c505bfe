//! Step invocation.
//!
//! The orchestrator never runs anything itself; it hands each step and its
//! merged properties to a [`StepInvoker`]. [`ShellInvoker`] runs scripts,
//! [`DryRunInvoker`] only reports, and [`RecordingInvoker`] records calls
//! for tests.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::config::Properties;
use crate::error::{Result, StepRunnerError};
use crate::shell::{execute, quote_path, script_interpreter, CommandOptions};

use super::descriptor::StepDescriptor;

/// Runs a single step.
///
/// `Ok(())` is success; any `Err` is a step failure whose message is
/// reported by the caller.
pub trait StepInvoker {
    fn invoke(&mut self, step: &StepDescriptor, properties: &Properties) -> Result<()>;
}

/// Runs step scripts through the system shell.
///
/// Properties are exported to the script as environment variables.
#[derive(Debug, Clone)]
pub struct ShellInvoker {
    working_dir: PathBuf,
}

impl ShellInvoker {
    /// Create an invoker that resolves step paths against `working_dir`.
    pub fn new(working_dir: impl Into<PathBuf>) -> Self {
        Self {
            working_dir: working_dir.into(),
        }
    }

    /// The directory steps run in.
    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }

    fn command_for(script: &Path) -> String {
        match script_interpreter(script) {
            Some(interpreter) => format!("{} {}", interpreter, quote_path(script)),
            None => quote_path(script),
        }
    }
}

impl StepInvoker for ShellInvoker {
    fn invoke(&mut self, step: &StepDescriptor, properties: &Properties) -> Result<()> {
        let script = step.resolve_path(&self.working_dir);
        if !script.is_file() {
            return Err(StepRunnerError::StepNotFound { path: script });
        }

        let command = Self::command_for(&script);
        let env: HashMap<String, String> = properties
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();

        let options = CommandOptions {
            cwd: Some(self.working_dir.clone()),
            env,
            capture_stdout: true,
            capture_stderr: true,
        };

        debug!("Executing {}", command);
        let result = execute(&command, &options)?;

        for line in result.stdout.lines() {
            debug!(step = %step.identity, "{}", line);
        }

        if result.success {
            return Ok(());
        }

        if let Some(line) = result.last_output_line() {
            warn!(step = %step.identity, "{}", line);
        }
        Err(StepRunnerError::CommandFailed {
            command,
            code: result.exit_code,
        })
    }
}

/// Reports what would run without running anything.
#[derive(Debug, Clone, Default)]
pub struct DryRunInvoker;

impl StepInvoker for DryRunInvoker {
    fn invoke(&mut self, step: &StepDescriptor, properties: &Properties) -> Result<()> {
        if properties.is_empty() {
            info!("Would run {}", step.path);
        } else {
            info!("Would run {} with {}", step.path, properties);
        }
        Ok(())
    }
}

/// One recorded call to a [`RecordingInvoker`].
#[derive(Debug, Clone, PartialEq)]
pub struct Invocation {
    pub identity: String,
    pub path: String,
    pub properties: Properties,
}

/// Test invoker that records every call and fails chosen steps.
#[derive(Debug, Clone, Default)]
pub struct RecordingInvoker {
    invocations: Vec<Invocation>,
    failing: HashSet<String>,
}

impl RecordingInvoker {
    /// Create an invoker where every step succeeds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the step with this identity (or path) fail.
    pub fn fail_on(mut self, step: &str) -> Self {
        self.failing.insert(super::descriptor::identity_for(step));
        self
    }

    /// All recorded calls, in order.
    pub fn invocations(&self) -> &[Invocation] {
        &self.invocations
    }

    /// Identities of recorded calls, in order.
    pub fn identities(&self) -> Vec<&str> {
        self.invocations
            .iter()
            .map(|i| i.identity.as_str())
            .collect()
    }

    /// Number of recorded calls.
    pub fn count(&self) -> usize {
        self.invocations.len()
    }

    /// Properties passed on the first call for a step.
    pub fn properties_for(&self, step: &str) -> Option<&Properties> {
        let identity = super::descriptor::identity_for(step);
        self.invocations
            .iter()
            .find(|i| i.identity == identity)
            .map(|i| &i.properties)
    }
}

impl StepInvoker for RecordingInvoker {
    fn invoke(&mut self, step: &StepDescriptor, properties: &Properties) -> Result<()> {
        self.invocations.push(Invocation {
            identity: step.identity.clone(),
            path: step.path.clone(),
            properties: properties.clone(),
        });

        if self.failing.contains(&step.identity) {
            return Err(StepRunnerError::StepExecutionError {
                step: step.identity.clone(),
                message: "configured to fail".to_string(),
            });
        }
        Ok(())
    }
}
