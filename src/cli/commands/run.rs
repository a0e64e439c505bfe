//! Run command implementation.
//!
//! The `steprunner run` command loads the run file, applies command-line
//! overrides and hands the steps to the orchestrator.

use std::path::{Path, PathBuf};

use crate::cli::args::RunArgs;
use crate::config::{Properties, RunnerConfig};
use crate::error::Result;
use crate::runner::{GroupFilter, RunConfig, RunReport, StepOrchestrator, StepStatus};
use crate::steps::{DryRunInvoker, ShellInvoker, StepInvoker};
use crate::ui::UserInterface;

use super::dispatcher::{load_or_report, Command, CommandResult, EXIT_NO_CONFIG};

/// The run command implementation.
pub struct RunCommand {
    project_root: PathBuf,
    config_path: Option<PathBuf>,
    args: RunArgs,
}

impl RunCommand {
    /// Create a new run command.
    pub fn new(project_root: &Path, config_path: Option<&Path>, args: RunArgs) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            config_path: config_path.map(Path::to_path_buf),
            args,
        }
    }

    /// Get the command arguments.
    pub fn args(&self) -> &RunArgs {
        &self.args
    }

    /// Build the run from the file plus command-line overrides.
    fn build_run(&self, config: &RunnerConfig) -> RunConfig {
        let mut run = RunConfig::from_config(config);

        if !self.args.groups.is_empty() {
            run.filter = GroupFilter::new(&self.args.groups);
        }
        for props in &self.args.properties {
            run.properties.extend_from(&Properties::parse(props));
        }
        if self.args.no_stop {
            run.policy.stop_on_first_failure = false;
        }

        run
    }

    fn report(&self, report: &RunReport, ui: &mut dyn UserInterface) {
        if report.resolution_error.is_some() {
            return;
        }

        ui.message("");
        for outcome in &report.steps {
            match outcome.status {
                StepStatus::Skipped => ui.detail(&outcome.summary_line()),
                _ => ui.message(&outcome.summary_line()),
            }
        }
        ui.message("");

        if report.success {
            ui.success(&format!("Run complete: {}", report.summary()));
        } else {
            ui.error(&format!("Run failed: {}", report.summary()));
        }
    }
}

impl Command for RunCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let Some(config) = load_or_report(&self.project_root, self.config_path.as_deref(), ui)?
        else {
            return Ok(CommandResult::failure(EXIT_NO_CONFIG));
        };

        let run = self.build_run(&config);
        tracing::debug!(
            steps = run.steps.len(),
            groups = %run.filter,
            dry_run = self.args.dry_run,
            "Starting run"
        );

        let title = if self.args.dry_run {
            format!("Dry run ({})", run.filter)
        } else {
            format!("Running steps ({})", run.filter)
        };
        ui.show_header(&title);

        let mut invoker: Box<dyn StepInvoker> = if self.args.dry_run {
            Box::new(DryRunInvoker)
        } else {
            Box::new(ShellInvoker::new(&self.project_root))
        };

        let report = StepOrchestrator::new(invoker.as_mut(), &mut *ui).run(&run);
        self.report(&report, ui);

        if report.success {
            Ok(CommandResult::success())
        } else {
            Ok(CommandResult::failure(1))
        }
    }
}
