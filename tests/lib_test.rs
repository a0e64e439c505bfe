//! Library integration tests.

use steprunner::StepRunnerError;

#[test]
fn error_types_are_public() {
    let err = StepRunnerError::DuplicateStep {
        step: "build.sh".into(),
    };
    assert!(err.to_string().contains("build.sh"));
}

#[test]
fn result_type_alias_is_public() {
    fn test_fn() -> steprunner::Result<()> {
        Ok(())
    }
    assert!(test_fn().is_ok());
}

#[test]
fn cli_types_are_public() {
    use clap::Parser;
    use steprunner::cli::{Cli, Commands};

    let cli = Cli::parse_from(["steprunner", "plan", "--json"]);

    if let Some(Commands::Plan(args)) = cli.command {
        assert!(args.json);
    } else {
        panic!("Expected Plan command");
    }
}

#[test]
fn ui_types_are_public() {
    use steprunner::ui::{MockUI, OutputMode, UserInterface};

    let mut ui = MockUI::with_mode(OutputMode::Verbose);
    ui.detail("resolved");
    assert!(ui.has_detail("resolved"));
}
