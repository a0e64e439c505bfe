//! List command implementation.
//!
//! The `steprunner list` command lists declared steps with their identity,
//! display name and groups.

use std::path::{Path, PathBuf};

use crate::cli::args::ListArgs;
use crate::error::Result;
use crate::runner::{GroupFilter, RunConfig};
use crate::ui::{Theme, UserInterface};

use super::dispatcher::{load_or_report, Command, CommandResult, EXIT_NO_CONFIG};

/// The list command implementation.
pub struct ListCommand {
    project_root: PathBuf,
    config_path: Option<PathBuf>,
    args: ListArgs,
}

impl ListCommand {
    /// Create a new list command.
    pub fn new(project_root: &Path, config_path: Option<&Path>, args: ListArgs) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            config_path: config_path.map(Path::to_path_buf),
            args,
        }
    }
}

impl Command for ListCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let Some(config) = load_or_report(&self.project_root, self.config_path.as_deref(), ui)?
        else {
            return Ok(CommandResult::failure(EXIT_NO_CONFIG));
        };

        let run = RunConfig::from_config(&config);
        let filter = GroupFilter::new(&self.args.groups);
        let theme = Theme::new();

        ui.message(&format!("  {}", theme.highlight.apply_to("Steps:")));
        for step in run.steps.iter().filter(|s| filter.matches(s)) {
            let display = run.metadata.describe(step);
            let groups = if step.is_untagged() {
                "untagged".to_string()
            } else {
                step.groups.iter().cloned().collect::<Vec<_>>().join(", ")
            };
            ui.message(&format!(
                "    {} {} {}",
                theme.highlight.apply_to(&display.id),
                display.name,
                theme.dim.apply_to(format!("[{}]", groups))
            ));
            if let Some(description) = &display.description {
                ui.message(&format!("      {}", theme.dim.apply_to(description)));
            }
            if step.has_constraints() {
                let mut order = Vec::new();
                if !step.execute_after.is_empty() {
                    order.push(format!("after: {}", step.execute_after.join(", ")));
                }
                if !step.execute_before.is_empty() {
                    order.push(format!("before: {}", step.execute_before.join(", ")));
                }
                ui.message(&format!(
                    "      {}",
                    theme.dim.apply_to(format!("└── {}", order.join("; ")))
                ));
            }
        }

        if !run.pre_steps.is_empty() || !run.post_steps.is_empty() {
            ui.message("");
            ui.message(&format!("  {}", theme.highlight.apply_to("Hooks:")));
            for hook in &run.pre_steps {
                ui.message(&format!("    pre:  {}", hook.path));
            }
            for hook in &run.post_steps {
                ui.message(&format!("    post: {}", hook.path));
            }
        }

        Ok(CommandResult::success())
    }
}
