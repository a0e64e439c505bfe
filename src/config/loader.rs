//! Run file discovery and loading.

use crate::config::schema::RunnerConfig;
use crate::error::{Result, StepRunnerError};
use std::fs;
use std::path::{Path, PathBuf};

/// File names probed, in order, when no explicit path is given.
pub const DEFAULT_CONFIG_NAMES: &[&str] = &["steps.yml", "steps.yaml", ".steprunner/steps.yml"];

/// Locate the run file for a project.
///
/// An explicit path is resolved against `project_root` when relative and
/// returned whether or not it exists, so loading reports it by name.
/// Without one, the first existing [`DEFAULT_CONFIG_NAMES`] entry wins.
pub fn find_config(project_root: &Path, explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(if path.is_absolute() {
            path.to_path_buf()
        } else {
            project_root.join(path)
        });
    }

    DEFAULT_CONFIG_NAMES
        .iter()
        .map(|name| project_root.join(name))
        .find(|p| p.is_file())
}

/// Load a single run file and parse it into [`RunnerConfig`].
///
/// # Errors
///
/// Returns `ConfigNotFound` if the file doesn't exist.
/// Returns `ConfigParseError` if the YAML is invalid.
pub fn load_config_file(path: &Path) -> Result<RunnerConfig> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            StepRunnerError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            StepRunnerError::Io(e)
        }
    })?;

    parse_config(&content, path)
}

/// Parse YAML content into [`RunnerConfig`].
///
/// # Arguments
///
/// * `content` - The YAML content to parse
/// * `source_path` - Path for error reporting
pub fn parse_config(content: &str, source_path: &Path) -> Result<RunnerConfig> {
    // An empty file is a valid, empty run.
    if content.trim().is_empty() {
        return Ok(RunnerConfig::default());
    }

    serde_yaml::from_str(content).map_err(|e| StepRunnerError::ConfigParseError {
        path: source_path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Find, load, and validate the run file for a project.
pub fn load_config(project_root: &Path, explicit: Option<&Path>) -> Result<RunnerConfig> {
    let path = find_config(project_root, explicit).ok_or_else(|| {
        StepRunnerError::ConfigNotFound {
            path: project_root.join(DEFAULT_CONFIG_NAMES[0]),
        }
    })?;

    tracing::debug!("Loading run file {}", path.display());
    let config = load_config_file(&path)?;
    super::validator::validate(&config)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn find_config_prefers_steps_yml() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("steps.yml"), "").unwrap();
        fs::write(temp.path().join("steps.yaml"), "").unwrap();

        let found = find_config(temp.path(), None).unwrap();
        assert!(found.ends_with("steps.yml"));
    }

    #[test]
    fn find_config_checks_hidden_directory() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join(".steprunner")).unwrap();
        fs::write(temp.path().join(".steprunner").join("steps.yml"), "").unwrap();

        let found = find_config(temp.path(), None).unwrap();
        assert!(found.ends_with(".steprunner/steps.yml"));
    }

    #[test]
    fn find_config_returns_none_when_missing() {
        let temp = TempDir::new().unwrap();
        assert!(find_config(temp.path(), None).is_none());
    }

    #[test]
    fn find_config_resolves_explicit_relative_path() {
        let temp = TempDir::new().unwrap();
        let found = find_config(temp.path(), Some(Path::new("ci/run.yml"))).unwrap();
        assert_eq!(found, temp.path().join("ci/run.yml"));
    }

    #[test]
    fn load_config_file_parses_valid_yaml() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("steps.yml");
        fs::write(&path, "steps:\n  - path: build.sh\n").unwrap();

        let config = load_config_file(&path).unwrap();
        assert_eq!(config.steps.len(), 1);
    }

    #[test]
    fn load_config_file_reports_missing_file() {
        let temp = TempDir::new().unwrap();
        let result = load_config_file(&temp.path().join("nope.yml"));
        assert!(matches!(result, Err(StepRunnerError::ConfigNotFound { .. })));
    }

    #[test]
    fn parse_config_reports_invalid_yaml() {
        let result = parse_config("steps: [unclosed", Path::new("steps.yml"));
        match result {
            Err(StepRunnerError::ConfigParseError { path, .. }) => {
                assert_eq!(path, PathBuf::from("steps.yml"));
            }
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn parse_config_accepts_empty_content() {
        let config = parse_config("   \n", Path::new("steps.yml")).unwrap();
        assert!(config.steps.is_empty());
    }

    #[test]
    fn load_config_without_file_is_not_found() {
        let temp = TempDir::new().unwrap();
        let result = load_config(temp.path(), None);
        assert!(matches!(result, Err(StepRunnerError::ConfigNotFound { .. })));
    }

    #[test]
    fn load_config_validates() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("steps.yml"), "steps:\n  - groups: [a]\n").unwrap();

        let result = load_config(temp.path(), None);
        assert!(matches!(
            result,
            Err(StepRunnerError::ConfigValidationError { .. })
        ));
    }
}
