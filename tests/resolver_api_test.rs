//! Ordering resolution through the public API.

use steprunner::runner::{collect_constraints, resolve_order};
use steprunner::steps::StepDescriptor;
use steprunner::StepRunnerError;

fn step(path: &str) -> StepDescriptor {
    StepDescriptor::new(path)
}

#[test]
fn before_and_after_scenario() {
    let steps = vec![
        step("S1").after("S3"),
        step("S2"),
        step("S3").before("S2"),
    ];
    let plan = resolve_order(&steps).unwrap();
    assert_eq!(plan.order(), ["s3", "s1", "s2"]);
}

#[test]
fn same_edge_declared_from_both_sides_is_not_a_cycle() {
    let steps = vec![step("A").after("C"), step("B"), step("C").before("A")];
    let plan = resolve_order(&steps).unwrap();
    assert_eq!(plan.order(), ["c", "a", "b"]);
}

#[test]
fn contradictory_after_is_a_cycle() {
    let steps = vec![step("S1").after("S3"), step("S2"), step("S3").after("S1")];
    let err = resolve_order(&steps).unwrap_err();
    assert!(matches!(err, StepRunnerError::CircularDependency { .. }));
}

#[test]
fn unknown_reference_names_both_steps() {
    let steps = vec![step("scripts/build.sh").after("Restore.sh")];
    match resolve_order(&steps) {
        Err(StepRunnerError::UnknownDependency { step, dependency }) => {
            assert_eq!(step, "build.sh");
            assert_eq!(dependency, "restore.sh");
        }
        other => panic!("expected UnknownDependency, got {:?}", other),
    }
}

#[test]
fn plan_covers_input_and_satisfies_constraints() {
    let steps = vec![
        step("deploy.sh").after("test.sh").after("package.sh"),
        step("test.sh").after("build.sh"),
        step("package.sh").after("build.sh"),
        step("lint.sh").before("build.sh"),
        step("build.sh"),
    ];
    let plan = resolve_order(&steps).unwrap();

    assert_eq!(plan.len(), steps.len());
    for s in &steps {
        assert!(plan.contains(&s.identity));
    }
    assert!(plan.satisfies(&collect_constraints(&steps)));
}

#[test]
fn unconstrained_order_is_preserved() {
    let steps = vec![step("c.sh"), step("a.sh"), step("b.sh")];
    let plan = resolve_order(&steps).unwrap();
    assert_eq!(plan.order(), ["c.sh", "a.sh", "b.sh"]);
}

#[test]
fn self_reference_is_a_cycle() {
    let steps = vec![step("a.sh").before("a.sh")];
    assert!(matches!(
        resolve_order(&steps),
        Err(StepRunnerError::CircularDependency { .. })
    ));
}
