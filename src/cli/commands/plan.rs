//! Plan command implementation.
//!
//! The `steprunner plan` command prints the resolved execution order and
//! whether each step would run under the group filter.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::cli::args::PlanArgs;
use crate::error::{Result, StepRunnerError};
use crate::runner::{resolve_order, GroupFilter, RunConfig};
use crate::steps::StepDescriptor;
use crate::ui::UserInterface;

use super::dispatcher::{load_or_report, Command, CommandResult, EXIT_NO_CONFIG};

/// One row of the plan.
#[derive(Debug, Clone, Serialize)]
pub struct PlanEntry {
    pub position: usize,
    pub identity: String,
    pub name: String,
    pub groups: Vec<String>,
    pub eligible: bool,
}

/// The plan command implementation.
pub struct PlanCommand {
    project_root: PathBuf,
    config_path: Option<PathBuf>,
    args: PlanArgs,
}

impl PlanCommand {
    /// Create a new plan command.
    pub fn new(project_root: &Path, config_path: Option<&Path>, args: PlanArgs) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            config_path: config_path.map(Path::to_path_buf),
            args,
        }
    }

    /// Resolve the plan rows for a run.
    pub fn entries(run: &RunConfig) -> Result<Vec<PlanEntry>> {
        let plan = resolve_order(&run.steps)?;
        let by_identity: HashMap<&str, &StepDescriptor> = run
            .steps
            .iter()
            .map(|s| (s.identity.as_str(), s))
            .collect();

        Ok(plan
            .order()
            .iter()
            .filter_map(|id| by_identity.get(id.as_str()).copied())
            .enumerate()
            .map(|(i, step)| PlanEntry {
                position: i + 1,
                identity: step.identity.clone(),
                name: run.metadata.describe(step).name,
                groups: step.groups.iter().cloned().collect(),
                eligible: run.filter.matches(step),
            })
            .collect())
    }
}

impl Command for PlanCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let Some(config) = load_or_report(&self.project_root, self.config_path.as_deref(), ui)?
        else {
            return Ok(CommandResult::failure(EXIT_NO_CONFIG));
        };

        let mut run = RunConfig::from_config(&config);
        if !self.args.groups.is_empty() {
            run.filter = GroupFilter::new(&self.args.groups);
        }

        let entries = match Self::entries(&run) {
            Ok(entries) => entries,
            Err(e) if e.is_resolution_error() => {
                ui.error(&e.to_string());
                return Ok(CommandResult::failure(1));
            }
            Err(e) => return Err(e),
        };

        if self.args.json {
            let json = serde_json::to_string_pretty(&entries)
                .map_err(|e| StepRunnerError::Other(e.into()))?;
            ui.message(&json);
            return Ok(CommandResult::success());
        }

        let theme = ui.theme();
        ui.show_header(&format!("Execution plan ({})", run.filter));
        for entry in &entries {
            let groups = if entry.groups.is_empty() {
                String::new()
            } else {
                format!(" [{}]", entry.groups.join(", "))
            };
            let line = format!("{:>3}. {}{}", entry.position, entry.name, groups);
            if entry.eligible {
                ui.message(&line);
            } else {
                ui.message(&format!(
                    "{} {}",
                    theme.dim.apply_to(line),
                    theme.dim.apply_to("(skipped)")
                ));
            }
        }

        Ok(CommandResult::success())
    }
}
