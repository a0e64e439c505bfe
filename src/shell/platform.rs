//! Platform-specific shell detection.

use std::path::{Path, PathBuf};

/// Shell used to run step scripts.
///
/// Steps run non-interactively, so this is the system shell rather than the
/// user's login shell.
pub fn detect_shell() -> PathBuf {
    if cfg!(target_os = "windows") {
        std::env::var("COMSPEC")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("cmd.exe"))
    } else {
        PathBuf::from("/bin/sh")
    }
}

/// Flag that passes a command string to [`detect_shell`].
pub fn shell_flag() -> &'static str {
    if cfg!(target_os = "windows") {
        "/C"
    } else {
        "-c"
    }
}

/// Interpreter prefix for a script, chosen by file extension.
///
/// `None` means the file is run directly (it must be executable).
pub fn script_interpreter(path: &Path) -> Option<&'static str> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())?;

    match ext.as_str() {
        "sh" => Some("sh"),
        "bash" => Some("bash"),
        "zsh" => Some("zsh"),
        "ps1" => Some("pwsh -NoProfile -File"),
        "py" => Some("python3"),
        "cmd" | "bat" => Some("cmd /C"),
        _ => None,
    }
}

/// Quote a path for use inside a shell command string.
pub fn quote_path(path: &Path) -> String {
    let raw = path.display().to_string();
    if cfg!(target_os = "windows") {
        format!("\"{}\"", raw)
    } else {
        format!("'{}'", raw.replace('\'', "'\\''"))
    }
}

/// Check if running in a CI environment.
///
/// Checks common CI environment variables: `CI`, `GITHUB_ACTIONS`,
/// `GITLAB_CI`, `CIRCLECI`, `TRAVIS`, `JENKINS_URL`, `TF_BUILD`.
pub fn is_ci() -> bool {
    std::env::var("CI").is_ok()
        || std::env::var("GITHUB_ACTIONS").is_ok()
        || std::env::var("GITLAB_CI").is_ok()
        || std::env::var("CIRCLECI").is_ok()
        || std::env::var("TRAVIS").is_ok()
        || std::env::var("JENKINS_URL").is_ok()
        || std::env::var("TF_BUILD").is_ok()
}
