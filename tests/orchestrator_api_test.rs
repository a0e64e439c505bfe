//! Orchestrator integration tests against the public API.

use steprunner::config::Properties;
use steprunner::runner::{GroupFilter, RunConfig, RunPolicy, RunReport, StepOrchestrator, StepStatus};
use steprunner::steps::{RecordingInvoker, StepDescriptor};
use steprunner::ui::MockUI;

fn run(config: &RunConfig, invoker: &mut RecordingInvoker) -> (RunReport, MockUI) {
    let mut ui = MockUI::new();
    let report = StepOrchestrator::new(invoker, &mut ui).run(config);
    (report, ui)
}

fn step(path: &str) -> StepDescriptor {
    StepDescriptor::new(path)
}

#[test]
fn only_filtered_group_is_invoked() {
    let config = RunConfig::new(vec![
        step("a.sh").with_groups(["a"]),
        step("b.sh").with_groups(["b"]),
    ])
    .with_filter(GroupFilter::new(["b"]));

    let mut invoker = RecordingInvoker::new();
    let (report, _) = run(&config, &mut invoker);

    assert!(report.success);
    assert_eq!(invoker.count(), 1);
    assert_eq!(invoker.identities(), vec!["b.sh"]);
}

#[test]
fn all_sentinel_is_case_insensitive() {
    let config = RunConfig::new(vec![
        step("a.sh").with_groups(["a"]),
        step("b.sh").with_groups(["b"]),
    ])
    .with_filter(GroupFilter::new(["All"]));

    let mut invoker = RecordingInvoker::new();
    run(&config, &mut invoker);

    assert_eq!(invoker.identities(), vec!["a.sh", "b.sh"]);
}

#[test]
fn hook_sequence_around_step() {
    let config = RunConfig::new(vec![step("step.sh").with_post_step(step("local-post.sh"))])
        .with_pre_step(step("global-pre.sh"))
        .with_post_step(step("global-post.sh"));

    let mut invoker = RecordingInvoker::new();
    run(&config, &mut invoker);

    assert_eq!(
        invoker.identities(),
        vec!["global-pre.sh", "step.sh", "local-post.sh", "global-post.sh"]
    );
}

#[test]
fn hooks_run_for_every_eligible_step() {
    let config = RunConfig::new(vec![step("a.sh"), step("b.sh").with_groups(["x"]), step("c.sh")])
        .with_filter(GroupFilter::new(["all"]))
        .with_pre_step(step("pre.sh"));

    let mut invoker = RecordingInvoker::new();
    run(&config, &mut invoker);

    assert_eq!(
        invoker.identities(),
        vec!["pre.sh", "a.sh", "pre.sh", "b.sh", "pre.sh", "c.sh"]
    );
}

#[test]
fn first_failure_stops_the_run() {
    let config = RunConfig::new(vec![step("a.sh"), step("b.sh")]);
    let mut invoker = RecordingInvoker::new().fail_on("a.sh");
    let (report, _) = run(&config, &mut invoker);

    assert!(!report.success);
    assert_eq!(invoker.count(), 1);
    assert_eq!(report.count(StepStatus::Aborted), 1);
}

#[test]
fn continue_on_failure_invokes_all_and_fails() {
    let policy = RunPolicy {
        stop_on_first_failure: false,
        ..Default::default()
    };
    let config = RunConfig::new(vec![step("a.sh"), step("b.sh")]).with_policy(policy);
    let mut invoker = RecordingInvoker::new().fail_on("a.sh");
    let (report, ui) = run(&config, &mut invoker);

    assert!(!report.success);
    assert_eq!(invoker.count(), 2);
    assert_eq!(ui.errors().len(), 1);
}

#[test]
fn local_property_wins_over_global() {
    let config = RunConfig::new(vec![step("a.sh").with_properties(Properties::parse("y=3"))])
        .with_properties(Properties::parse("x=1;y=2"));
    let mut invoker = RecordingInvoker::new();
    run(&config, &mut invoker);

    let props = invoker.properties_for("a.sh").unwrap();
    assert_eq!(props.to_string(), "x=1;y=3");
}

#[test]
fn resolution_failure_is_one_error_and_no_invocations() {
    let config = RunConfig::new(vec![step("a.sh"), step("a.sh")]);
    let mut invoker = RecordingInvoker::new();
    let (report, ui) = run(&config, &mut invoker);

    assert!(!report.success);
    assert_eq!(invoker.count(), 0);
    assert_eq!(ui.errors().len(), 1);
    assert!(ui.has_error("Duplicate step"));
}

#[test]
fn failure_pass_runs_once() {
    let config = RunConfig::new(vec![step("a.sh")])
        .with_failure_step(step("notify.sh"))
        .with_post_step(step("post.sh"));
    let mut invoker = RecordingInvoker::new().fail_on("a.sh").fail_on("notify.sh");
    let (report, _) = run(&config, &mut invoker);

    assert!(report.failure_steps_ran);
    assert_eq!(invoker.identities(), vec!["a.sh", "notify.sh"]);
}

#[test]
fn report_serializes() {
    let config = RunConfig::new(vec![step("a.sh"), step("b.sh").with_groups(["x"])])
        .with_filter(GroupFilter::new(["y"]));
    let mut invoker = RecordingInvoker::new();
    let (report, _) = run(&config, &mut invoker);

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["success"], true);
    assert_eq!(json["steps"][0]["status"], "skipped");
    assert_eq!(json["steps"][1]["status"], "skipped");
}
