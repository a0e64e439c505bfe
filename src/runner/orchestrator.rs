//! Step orchestration.
//!
//! [`StepOrchestrator`] walks a resolved order and, for every eligible step,
//! runs global pre-steps, local pre-steps, the step, local post-steps and
//! global post-steps. [`RunPolicy`] decides whether a hook failure is an
//! error or a warning and whether any failure ends the run. When an
//! error-level failure was logged, the configured failure steps run once.

use std::collections::HashMap;
use std::time::Instant;

use tracing::{debug, info, warn};

use crate::config::{HookConfig, Properties, RunnerConfig, Settings};
use crate::error::StepRunnerError;
use crate::steps::{MetadataTable, StepDescriptor, StepDisplay, StepInvoker};
use crate::ui::UserInterface;

use super::dependency::resolve_order;
use super::filter::GroupFilter;
use super::report::{RunReport, StepOutcome, StepStatus};

/// Failure policy for a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunPolicy {
    /// Abort when a primary step fails.
    pub stop_on_first_failure: bool,
    /// Abort when a pre-step fails.
    pub stop_on_pre_step_failure: bool,
    /// Abort when a post-step fails.
    pub stop_on_post_step_failure: bool,
    /// Pre-step failures are errors rather than warnings.
    pub fail_on_pre_step_failure: bool,
    /// Post-step failures are errors rather than warnings.
    pub fail_on_post_step_failure: bool,
}

impl Default for RunPolicy {
    fn default() -> Self {
        Self::from(&Settings::default())
    }
}

impl From<&Settings> for RunPolicy {
    fn from(settings: &Settings) -> Self {
        Self {
            stop_on_first_failure: settings.stop_on_first_failure,
            stop_on_pre_step_failure: settings.stop_on_pre_step_failure,
            stop_on_post_step_failure: settings.stop_on_post_step_failure,
            fail_on_pre_step_failure: settings.fail_on_pre_step_failure,
            fail_on_post_step_failure: settings.fail_on_post_step_failure,
        }
    }
}

/// Everything a run needs.
#[derive(Debug, Clone, Default)]
pub struct RunConfig {
    /// Primary steps, in declaration order.
    pub steps: Vec<StepDescriptor>,
    /// Display metadata.
    pub metadata: MetadataTable,
    /// Which steps are eligible.
    pub filter: GroupFilter,
    /// Hooks run before every primary step.
    pub pre_steps: Vec<StepDescriptor>,
    /// Hooks run after every primary step.
    pub post_steps: Vec<StepDescriptor>,
    /// Steps run once if the run fails.
    pub failure_steps: Vec<StepDescriptor>,
    /// Properties passed to every invocation.
    pub properties: Properties,
    /// Failure policy.
    pub policy: RunPolicy,
}

impl RunConfig {
    /// A run over these steps with default policy and no hooks.
    pub fn new(steps: Vec<StepDescriptor>) -> Self {
        Self {
            steps,
            ..Default::default()
        }
    }

    /// Build a run from a loaded configuration file.
    pub fn from_config(config: &RunnerConfig) -> Self {
        Self {
            steps: config.steps.iter().map(StepDescriptor::from_config).collect(),
            metadata: MetadataTable::from_entries(&config.metadata),
            filter: GroupFilter::new(&config.settings.groups),
            pre_steps: hook_descriptors(&config.pre_steps),
            post_steps: hook_descriptors(&config.post_steps),
            failure_steps: hook_descriptors(&config.failure_steps),
            properties: config.settings.properties.clone(),
            policy: RunPolicy::from(&config.settings),
        }
    }

    pub fn with_filter(mut self, filter: GroupFilter) -> Self {
        self.filter = filter;
        self
    }

    pub fn with_policy(mut self, policy: RunPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_properties(mut self, properties: Properties) -> Self {
        self.properties = properties;
        self
    }

    pub fn with_pre_step(mut self, hook: StepDescriptor) -> Self {
        self.pre_steps.push(hook);
        self
    }

    pub fn with_post_step(mut self, hook: StepDescriptor) -> Self {
        self.post_steps.push(hook);
        self
    }

    pub fn with_failure_step(mut self, step: StepDescriptor) -> Self {
        self.failure_steps.push(step);
        self
    }

    pub fn with_metadata(mut self, metadata: MetadataTable) -> Self {
        self.metadata = metadata;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HookPhase {
    Pre,
    Post,
}

impl HookPhase {
    fn label(self) -> &'static str {
        match self {
            HookPhase::Pre => "Pre-step",
            HookPhase::Post => "Post-step",
        }
    }
}

/// Running totals owned by the run loop.
#[derive(Debug, Default)]
struct RunState {
    errors: usize,
    warnings: usize,
    failed: bool,
    aborted: bool,
}

/// Drives a run against an invoker, reporting to a UI.
pub struct StepOrchestrator<'a> {
    invoker: &'a mut dyn StepInvoker,
    ui: &'a mut dyn UserInterface,
}

impl<'a> StepOrchestrator<'a> {
    /// Create an orchestrator.
    pub fn new(invoker: &'a mut dyn StepInvoker, ui: &'a mut dyn UserInterface) -> Self {
        Self { invoker, ui }
    }

    /// Run every eligible step and return the report.
    ///
    /// Never returns an error: resolution problems and step failures are
    /// reported through the UI and reflected in [`RunReport::success`].
    pub fn run(&mut self, config: &RunConfig) -> RunReport {
        let start = Instant::now();
        let mut report = RunReport::default();

        let plan = match resolve_order(&config.steps) {
            Ok(plan) => plan,
            Err(e) => {
                warn!("Could not resolve step order: {}", e);
                self.ui.error(&e.to_string());
                report.resolution_error = Some(e.to_string());
                report.errors = 1;
                report.duration = start.elapsed();
                return report;
            }
        };

        debug!("Resolved order: {}", plan.order().join(", "));
        self.ui
            .detail(&format!("Execution order: {}", plan.order().join(", ")));

        let by_identity: HashMap<&str, &StepDescriptor> = config
            .steps
            .iter()
            .map(|s| (s.identity.as_str(), s))
            .collect();

        let mut state = RunState::default();

        for identity in plan.order() {
            let Some(step) = by_identity.get(identity.as_str()).copied() else {
                continue;
            };
            let display = config.metadata.describe(step);

            if !config.filter.matches(step) {
                debug!(step = %step.identity, "Skipping, not in groups {}", config.filter);
                self.ui.detail(&format!(
                    "Skipping {} (not in groups {})",
                    display.name, config.filter
                ));
                report.steps.push(outcome(step, &display, StepStatus::Skipped));
                continue;
            }

            if state.aborted {
                report.steps.push(outcome(step, &display, StepStatus::Aborted));
                continue;
            }

            let result = self.run_step(step, &display, config, &mut state);
            report.steps.push(result);
        }

        if state.errors > 0 && !config.failure_steps.is_empty() {
            report.failure_steps_ran = self.run_failure_steps(config, &mut state);
        }

        report.success = !state.failed;
        report.aborted = state.aborted;
        report.errors = state.errors;
        report.warnings = state.warnings;
        report.duration = start.elapsed();

        info!(
            success = report.success,
            errors = report.errors,
            warnings = report.warnings,
            "Run finished"
        );
        report
    }

    fn run_step(
        &mut self,
        step: &StepDescriptor,
        display: &StepDisplay,
        config: &RunConfig,
        state: &mut RunState,
    ) -> StepOutcome {
        let start = Instant::now();
        let mut result = outcome(step, display, StepStatus::Completed);
        let context = step_context(step, display);

        let pre = config.pre_steps.iter().chain(&step.local_pre_steps);
        self.run_hooks(HookPhase::Pre, pre, display, &context, config, state, &mut result);
        if state.aborted {
            result.status = StepStatus::Aborted;
            result.duration = start.elapsed();
            return result;
        }

        self.ui.message(&format!("Running {}", display.name));
        let properties = config.properties.merged(&step.properties);
        debug!(step = %step.identity, properties = %properties, "Invoking step");

        match self.invoker.invoke(step, &properties) {
            Ok(()) => {
                self.ui.success(&display.name);
            }
            Err(e) => {
                let reason = failure_reason(&e);
                self.ui
                    .error(&format!("Step '{}' failed: {}", display.name, reason));
                state.errors += 1;
                state.failed = true;
                result.status = StepStatus::Failed;
                result.error = Some(reason);

                if config.policy.stop_on_first_failure {
                    state.aborted = true;
                    result.duration = start.elapsed();
                    return result;
                }
            }
        }

        let post = step.local_post_steps.iter().chain(&config.post_steps);
        self.run_hooks(HookPhase::Post, post, display, &context, config, state, &mut result);

        result.duration = start.elapsed();
        result
    }

    #[allow(clippy::too_many_arguments)]
    fn run_hooks<'h>(
        &mut self,
        phase: HookPhase,
        hooks: impl Iterator<Item = &'h StepDescriptor>,
        display: &StepDisplay,
        context: &Properties,
        config: &RunConfig,
        state: &mut RunState,
        result: &mut StepOutcome,
    ) {
        let (is_error, stop) = match phase {
            HookPhase::Pre => (
                config.policy.fail_on_pre_step_failure,
                config.policy.stop_on_pre_step_failure,
            ),
            HookPhase::Post => (
                config.policy.fail_on_post_step_failure,
                config.policy.stop_on_post_step_failure,
            ),
        };

        for hook in hooks {
            let properties = config
                .properties
                .merged(context)
                .merged(&hook.properties);
            let step_id = &display.id;
            debug!(hook = %hook.identity, step = %step_id, "Invoking {}", phase.label());

            let Err(e) = self.invoker.invoke(hook, &properties) else {
                continue;
            };

            let msg = format!(
                "{} '{}' for '{}' failed: {}",
                phase.label(),
                hook.identity,
                display.name,
                failure_reason(&e)
            );
            if is_error {
                self.ui.error(&msg);
                state.errors += 1;
                state.failed = true;
            } else {
                self.ui.warning(&msg);
                state.warnings += 1;
            }
            result.failed_hooks.push(hook.identity.clone());

            if stop {
                state.failed = true;
                state.aborted = true;
                return;
            }
        }
    }

    /// Returns whether any failure step was invoked.
    fn run_failure_steps(&mut self, config: &RunConfig, state: &mut RunState) -> bool {
        self.ui.message("Running failure steps");
        let mut ran = false;

        for step in &config.failure_steps {
            let display = config.metadata.describe(step);
            if !config.filter.matches(step) {
                self.ui.detail(&format!(
                    "Skipping failure step {} (not in groups {})",
                    display.name, config.filter
                ));
                continue;
            }

            ran = true;
            let properties = config.properties.merged(&step.properties);
            if let Err(e) = self.invoker.invoke(step, &properties) {
                self.ui.error(&format!(
                    "Failure step '{}' failed: {}",
                    display.name,
                    failure_reason(&e)
                ));
                state.errors += 1;
                if config.policy.stop_on_first_failure {
                    break;
                }
            }
        }

        ran
    }
}

/// The failure text without a repeated step prefix.
fn failure_reason(error: &StepRunnerError) -> String {
    match error {
        StepRunnerError::StepExecutionError { message, .. } => message.clone(),
        other => other.to_string(),
    }
}

fn hook_descriptors(hooks: &[HookConfig]) -> Vec<StepDescriptor> {
    hooks
        .iter()
        .map(|h| StepDescriptor::from_config(&h.to_step_config()))
        .collect()
}

fn outcome(step: &StepDescriptor, display: &StepDisplay, status: StepStatus) -> StepOutcome {
    StepOutcome {
        identity: step.identity.clone(),
        name: display.name.clone(),
        status,
        failed_hooks: Vec::new(),
        error: None,
        duration: Default::default(),
    }
}

/// Properties describing the primary step, handed to its hooks.
fn step_context(step: &StepDescriptor, display: &StepDisplay) -> Properties {
    let mut context = Properties::new();
    context.insert("StepId", display.id.clone());
    context.insert("StepName", display.name.clone());
    context.insert("StepPath", step.path.clone());
    if let Some(description) = &display.description {
        context.insert("StepDescription", description.clone());
    }
    context
}
