//! Execution ordering for steps.
//!
//! Ordering starts from declaration order and applies each step's
//! `execute_before` / `execute_after` references as insertion moves: the
//! step is pulled to sit immediately before (or after) the referenced step's
//! current position. Moves run in declaration order, all `before` moves
//! first and then all `after` moves, and a later move overrides the position
//! an earlier one chose.
//!
//! Moves alone can undo an earlier constraint, so the moved order is passed
//! through a stable topological repair that keeps it untouched whenever it
//! already satisfies every constraint. Unknown references and cycles are
//! rejected before any move happens.

use std::collections::{BTreeSet, HashMap, HashSet};

use crate::error::{Result, StepRunnerError};
use crate::steps::StepDescriptor;

/// A directed precedence edge: `first` must run before `then`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OrderingConstraint {
    pub first: String,
    pub then: String,
}

impl OrderingConstraint {
    pub fn new(first: impl Into<String>, then: impl Into<String>) -> Self {
        Self {
            first: first.into(),
            then: then.into(),
        }
    }
}

/// Normalize every step's references into precedence edges.
///
/// `A.execute_before = [B]` and `B.execute_after = [A]` both become `A → B`.
/// Duplicate edges are dropped; order follows declaration order.
pub fn collect_constraints(steps: &[StepDescriptor]) -> Vec<OrderingConstraint> {
    let mut seen = HashSet::new();
    let mut constraints = Vec::new();

    for step in steps {
        let edges = step
            .execute_before
            .iter()
            .map(|target| OrderingConstraint::new(step.identity.clone(), target.clone()))
            .chain(
                step.execute_after
                    .iter()
                    .map(|target| OrderingConstraint::new(target.clone(), step.identity.clone())),
            );
        for edge in edges {
            if seen.insert(edge.clone()) {
                constraints.push(edge);
            }
        }
    }

    constraints
}

/// A resolved total order of step identities.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionPlan {
    order: Vec<String>,
}

impl ExecutionPlan {
    /// Step identities in execution order.
    pub fn order(&self) -> &[String] {
        &self.order
    }

    /// Position of a step in the plan.
    pub fn position(&self, identity: &str) -> Option<usize> {
        self.order.iter().position(|s| s == identity)
    }

    /// Whether the plan contains a step.
    pub fn contains(&self, identity: &str) -> bool {
        self.position(identity).is_some()
    }

    /// Number of steps in the plan.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether the plan is empty.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Whether every constraint whose endpoints are both planned holds.
    pub fn satisfies(&self, constraints: &[OrderingConstraint]) -> bool {
        constraints.iter().all(|c| {
            match (self.position(&c.first), self.position(&c.then)) {
                (Some(a), Some(b)) => a < b,
                _ => true,
            }
        })
    }

    /// Consume the plan, returning the ordered identities.
    pub fn into_order(self) -> Vec<String> {
        self.order
    }
}

/// Represents the precedence relationships between steps.
#[derive(Debug, Clone)]
pub struct DependencyGraph {
    /// Map of step to the steps that must run before it.
    dependencies: HashMap<String, Vec<String>>,
    /// Map of step to the steps that must run after it.
    dependents: HashMap<String, Vec<String>>,
    /// All steps, in declaration order.
    steps: Vec<String>,
}

impl DependencyGraph {
    /// Create a new dependency graph builder.
    pub fn builder() -> DependencyGraphBuilder {
        DependencyGraphBuilder::new()
    }

    /// Build the graph for a list of steps from their constraints.
    pub fn from_steps(steps: &[StepDescriptor]) -> Result<Self> {
        let mut builder = steps
            .iter()
            .fold(Self::builder(), |b, step| b.add_step(step.identity.clone(), Vec::new()));
        for constraint in collect_constraints(steps) {
            builder = builder.add_step(constraint.then, vec![constraint.first]);
        }
        builder.build()
    }

    /// Get the steps that must run before `step`.
    pub fn dependencies_of(&self, step: &str) -> Option<&[String]> {
        self.dependencies.get(step).map(Vec::as_slice)
    }

    /// Get the steps that must run after `step`.
    pub fn dependents_of(&self, step: &str) -> Option<&[String]> {
        self.dependents.get(step).map(Vec::as_slice)
    }

    /// Check if a step exists in the graph.
    pub fn contains(&self, step: &str) -> bool {
        self.dependencies.contains_key(step)
    }

    /// All steps in declaration order.
    pub fn steps(&self) -> &[String] {
        &self.steps
    }

    /// Get the number of steps in the graph.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Check if the graph is empty.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Find a cycle in the graph, returning the path if one exists.
    ///
    /// The path starts and ends with the same step. Search follows
    /// declaration order, so the reported cycle is deterministic.
    pub fn find_cycle(&self) -> Option<Vec<String>> {
        #[derive(Clone, Copy, PartialEq)]
        enum State {
            Unvisited,
            Visiting,
            Visited,
        }

        fn dfs<'a>(
            node: &'a str,
            graph: &'a DependencyGraph,
            state: &mut HashMap<&'a str, State>,
            path: &mut Vec<&'a str>,
        ) -> Option<Vec<String>> {
            state.insert(node, State::Visiting);
            path.push(node);

            for dep in graph.dependencies_of(node).unwrap_or(&[]) {
                match state.get(dep.as_str()) {
                    Some(State::Visiting) => {
                        let start = path.iter().position(|s| *s == dep.as_str()).unwrap_or(0);
                        let mut cycle: Vec<String> =
                            path[start..].iter().map(|s| s.to_string()).collect();
                        cycle.push(dep.clone());
                        return Some(cycle);
                    }
                    Some(State::Unvisited) | None => {
                        if let Some(cycle) = dfs(dep, graph, state, path) {
                            return Some(cycle);
                        }
                    }
                    Some(State::Visited) => {}
                }
            }

            path.pop();
            state.insert(node, State::Visited);
            None
        }

        let mut state: HashMap<&str, State> = self
            .steps
            .iter()
            .map(|s| (s.as_str(), State::Unvisited))
            .collect();
        let mut path = Vec::new();

        for step in &self.steps {
            if state.get(step.as_str()) == Some(&State::Unvisited) {
                if let Some(cycle) = dfs(step, self, &mut state, &mut path) {
                    return Some(cycle);
                }
            }
        }

        None
    }

    /// Topological order that stays as close as possible to `preferred`.
    ///
    /// At every point the ready step that appears earliest in `preferred`
    /// is emitted next, so a `preferred` order that already satisfies every
    /// edge is returned unchanged. Steps missing from `preferred` sort last,
    /// in declaration order.
    pub fn stable_order(&self, preferred: &[String]) -> Result<Vec<String>> {
        let rank: HashMap<&str, usize> = preferred
            .iter()
            .chain(self.steps.iter())
            .enumerate()
            .fold(HashMap::new(), |mut acc, (i, s)| {
                acc.entry(s.as_str()).or_insert(i);
                acc
            });

        let mut in_degree: HashMap<&str, usize> = self
            .steps
            .iter()
            .map(|s| (s.as_str(), self.dependencies.get(s).map_or(0, Vec::len)))
            .collect();

        let mut ready: BTreeSet<(usize, &str)> = in_degree
            .iter()
            .filter(|(_, &d)| d == 0)
            .map(|(s, _)| (rank[s], *s))
            .collect();

        let mut result = Vec::with_capacity(self.steps.len());

        while let Some(next) = ready.pop_first() {
            let (_, step) = next;
            result.push(step.to_string());

            for dependent in self.dependents_of(step).unwrap_or(&[]) {
                if let Some(degree) = in_degree.get_mut(dependent.as_str()) {
                    *degree -= 1;
                    if *degree == 0 {
                        ready.insert((rank[dependent.as_str()], dependent.as_str()));
                    }
                }
            }
        }

        if result.len() != self.steps.len() {
            let cycle = self.find_cycle().unwrap_or_else(|| {
                in_degree
                    .iter()
                    .filter(|(_, &d)| d > 0)
                    .map(|(s, _)| s.to_string())
                    .collect()
            });
            return Err(StepRunnerError::CircularDependency {
                cycle: cycle.join(" -> "),
            });
        }

        Ok(result)
    }
}

/// Builder for constructing a DependencyGraph.
#[derive(Debug, Default)]
pub struct DependencyGraphBuilder {
    dependencies: HashMap<String, Vec<String>>,
    steps: Vec<String>,
}

impl DependencyGraphBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a step with steps that must precede it.
    ///
    /// Adding the same step again extends its dependencies.
    pub fn add_step(mut self, name: impl Into<String>, depends_on: Vec<String>) -> Self {
        let name = name.into();
        if !self.dependencies.contains_key(&name) {
            self.steps.push(name.clone());
        }
        let deps = self.dependencies.entry(name).or_default();
        for dep in depends_on {
            if !deps.contains(&dep) {
                deps.push(dep);
            }
        }
        self
    }

    /// Build the dependency graph.
    ///
    /// Returns an error if any dependency references a non-existent step.
    pub fn build(self) -> Result<DependencyGraph> {
        for step in &self.steps {
            for dep in &self.dependencies[step] {
                if !self.dependencies.contains_key(dep) {
                    return Err(StepRunnerError::UnknownDependency {
                        step: step.clone(),
                        dependency: dep.clone(),
                    });
                }
            }
        }

        let mut dependents: HashMap<String, Vec<String>> = self
            .steps
            .iter()
            .map(|s| (s.clone(), Vec::new()))
            .collect();
        for step in &self.steps {
            for dep in &self.dependencies[step] {
                if let Some(list) = dependents.get_mut(dep) {
                    list.push(step.clone());
                }
            }
        }

        Ok(DependencyGraph {
            dependencies: self.dependencies,
            dependents,
            steps: self.steps,
        })
    }
}

/// Index-based list with a position map, for insertion moves.
struct Placement {
    order: Vec<String>,
    positions: HashMap<String, usize>,
}

impl Placement {
    fn new(order: Vec<String>) -> Self {
        let positions = order
            .iter()
            .enumerate()
            .map(|(i, s)| (s.clone(), i))
            .collect();
        Self { order, positions }
    }

    fn reindex(&mut self, from: usize, to: usize) {
        for i in from..=to {
            self.positions.insert(self.order[i].clone(), i);
        }
    }

    /// Move `step` so it sits at `anchor`'s position plus `offset` (0 or 1),
    /// measured after `step` has been taken out of the list.
    fn move_relative(&mut self, step: &str, anchor: &str, offset: usize) {
        if step == anchor {
            return;
        }
        let (Some(&from), Some(&anchor_pos)) = (self.positions.get(step), self.positions.get(anchor))
        else {
            return;
        };

        let item = self.order.remove(from);
        let anchor_pos = if anchor_pos > from {
            anchor_pos - 1
        } else {
            anchor_pos
        };
        let to = anchor_pos + offset;
        self.order.insert(to, item);
        self.reindex(from.min(to), from.max(to));
    }

    fn move_before(&mut self, step: &str, anchor: &str) {
        self.move_relative(step, anchor, 0);
    }

    fn move_after(&mut self, step: &str, anchor: &str) {
        self.move_relative(step, anchor, 1);
    }
}

/// Compute the execution order for a set of steps.
///
/// # Errors
///
/// - `DuplicateStep` if two steps share an identity
/// - `UnknownDependency` if a reference names a step not in `steps`
/// - `CircularDependency` if the references cannot all hold
pub fn resolve_order(steps: &[StepDescriptor]) -> Result<ExecutionPlan> {
    let mut known = HashSet::new();
    for step in steps {
        if !known.insert(step.identity.as_str()) {
            return Err(StepRunnerError::DuplicateStep {
                step: step.identity.clone(),
            });
        }
    }

    for step in steps {
        for target in step.execute_after.iter().chain(step.execute_before.iter()) {
            if !known.contains(target.as_str()) {
                return Err(StepRunnerError::UnknownDependency {
                    step: step.identity.clone(),
                    dependency: target.clone(),
                });
            }
        }
    }

    let graph = DependencyGraph::from_steps(steps)?;
    if let Some(cycle) = graph.find_cycle() {
        return Err(StepRunnerError::CircularDependency {
            cycle: cycle.join(" -> "),
        });
    }

    let mut placement = Placement::new(steps.iter().map(|s| s.identity.clone()).collect());
    for step in steps {
        for target in &step.execute_before {
            placement.move_before(&step.identity, target);
        }
    }
    for step in steps {
        for target in &step.execute_after {
            placement.move_after(&step.identity, target);
        }
    }

    let order = graph.stable_order(&placement.order)?;
    if order != placement.order {
        tracing::debug!(
            "Insertion moves left constraints unmet; repaired {:?} to {:?}",
            placement.order,
            order
        );
    }

    Ok(ExecutionPlan { order })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step(path: &str) -> StepDescriptor {
        StepDescriptor::new(path)
    }

    fn order_of(steps: &[StepDescriptor]) -> Vec<String> {
        resolve_order(steps).unwrap().into_order()
    }

    #[test]
    fn builder_creates_empty_graph() {
        let graph = DependencyGraph::builder().build().unwrap();
        assert!(graph.is_empty());
    }

    #[test]
    fn builder_tracks_dependents() {
        let graph = DependencyGraph::builder()
            .add_step("step1", vec![])
            .add_step("step2", vec!["step1".to_string()])
            .add_step("step3", vec!["step1".to_string()])
            .build()
            .unwrap();

        let dependents = graph.dependents_of("step1").unwrap();
        assert_eq!(dependents, ["step2".to_string(), "step3".to_string()]);
        assert_eq!(graph.dependencies_of("step2").unwrap(), ["step1".to_string()]);
    }

    #[test]
    fn builder_rejects_unknown_dependency() {
        let result = DependencyGraph::builder()
            .add_step("step1", vec!["nonexistent".to_string()])
            .build();

        assert!(matches!(
            result,
            Err(StepRunnerError::UnknownDependency { .. })
        ));
    }

    #[test]
    fn constraints_normalize_both_directions() {
        let steps = vec![step("a").before("b"), step("b").after("a"), step("c").after("b")];
        let constraints = collect_constraints(&steps);
        assert_eq!(
            constraints,
            vec![
                OrderingConstraint::new("a", "b"),
                OrderingConstraint::new("b", "c"),
            ]
        );
    }

    #[test]
    fn no_constraints_keeps_declaration_order() {
        let steps = vec![step("c"), step("a"), step("b")];
        assert_eq!(order_of(&steps), vec!["c", "a", "b"]);
    }

    #[test]
    fn empty_input_gives_empty_plan() {
        let plan = resolve_order(&[]).unwrap();
        assert!(plan.is_empty());
    }

    #[test]
    fn after_moves_step_directly_behind_target() {
        let steps = vec![step("s1"), step("s2"), step("s3").after("s1")];
        assert_eq!(order_of(&steps), vec!["s1", "s3", "s2"]);
    }

    #[test]
    fn before_moves_step_directly_ahead_of_target() {
        let steps = vec![step("s1"), step("s2"), step("s3").before("s1")];
        assert_eq!(order_of(&steps), vec!["s3", "s1", "s2"]);
    }

    #[test]
    fn mixed_before_and_after_scenario() {
        let steps = vec![step("S1").after("S3"), step("S2"), step("S3").before("S2")];
        assert_eq!(order_of(&steps), vec!["s3", "s1", "s2"]);
    }

    #[test]
    fn later_after_move_wins() {
        let steps = vec![
            step("a"),
            step("b"),
            step("c"),
            step("x").after("a").after("b"),
        ];
        assert_eq!(order_of(&steps), vec!["a", "b", "x", "c"]);
    }

    #[test]
    fn conflicting_moves_are_repaired() {
        // The before move is undone by the after move; repair restores both.
        let steps = vec![step("a").after("b").before("c"), step("c"), step("b")];
        let plan = resolve_order(&steps).unwrap();
        assert!(plan.satisfies(&collect_constraints(&steps)));
        assert_eq!(plan.order(), ["b", "a", "c"]);
    }

    #[test]
    fn chain_of_constraints_is_satisfied() {
        let steps = vec![
            step("deploy").after("test"),
            step("test").after("build"),
            step("build").after("restore"),
            step("restore"),
            step("lint").before("build"),
        ];
        let plan = resolve_order(&steps).unwrap();
        assert_eq!(plan.len(), 5);
        assert!(plan.satisfies(&collect_constraints(&steps)));
    }

    #[test]
    fn every_step_appears_exactly_once() {
        let steps = vec![
            step("a").after("d"),
            step("b").before("a"),
            step("c"),
            step("d").after("c"),
            step("e").before("c").after("b"),
        ];
        let plan = resolve_order(&steps).unwrap();
        let mut sorted = plan.order().to_vec();
        sorted.sort();
        assert_eq!(sorted, vec!["a", "b", "c", "d", "e"]);
        assert!(plan.satisfies(&collect_constraints(&steps)));
    }

    #[test]
    fn unknown_after_reference_fails() {
        let steps = vec![step("a").after("ghost"), step("b")];
        match resolve_order(&steps) {
            Err(StepRunnerError::UnknownDependency { step, dependency }) => {
                assert_eq!(step, "a");
                assert_eq!(dependency, "ghost");
            }
            other => panic!("expected unknown dependency, got {:?}", other),
        }
    }

    #[test]
    fn unknown_before_reference_fails() {
        let steps = vec![step("a"), step("b").before("ghost")];
        assert!(matches!(
            resolve_order(&steps),
            Err(StepRunnerError::UnknownDependency { .. })
        ));
    }

    #[test]
    fn two_step_cycle_fails() {
        let steps = vec![step("S1").after("S3"), step("S2"), step("S3").after("S1")];
        match resolve_order(&steps) {
            Err(StepRunnerError::CircularDependency { cycle }) => {
                assert!(cycle.contains("s1"));
                assert!(cycle.contains("s3"));
            }
            other => panic!("expected cycle, got {:?}", other),
        }
    }

    #[test]
    fn three_step_cycle_fails() {
        let steps = vec![step("a").after("c"), step("b").after("a"), step("c").after("b")];
        assert!(matches!(
            resolve_order(&steps),
            Err(StepRunnerError::CircularDependency { .. })
        ));
    }

    #[test]
    fn before_and_after_same_step_fails() {
        let steps = vec![step("a").before("b").after("b"), step("b")];
        assert!(matches!(
            resolve_order(&steps),
            Err(StepRunnerError::CircularDependency { .. })
        ));
    }

    #[test]
    fn self_reference_fails() {
        let steps = vec![step("a").after("a")];
        assert!(matches!(
            resolve_order(&steps),
            Err(StepRunnerError::CircularDependency { .. })
        ));
    }

    #[test]
    fn duplicate_identity_fails() {
        let steps = vec![step("one/build.sh"), step("two/Build.sh")];
        assert!(matches!(
            resolve_order(&steps),
            Err(StepRunnerError::DuplicateStep { .. })
        ));
    }

    #[test]
    fn cycle_path_starts_and_ends_on_same_step() {
        let graph = DependencyGraph::builder()
            .add_step("a", vec!["b".to_string()])
            .add_step("b", vec!["a".to_string()])
            .build()
            .unwrap();

        let path = graph.find_cycle().unwrap();
        assert!(path.len() >= 2);
        assert_eq!(path.first(), path.last());
    }

    #[test]
    fn stable_order_keeps_valid_preference() {
        let graph = DependencyGraph::builder()
            .add_step("a", vec![])
            .add_step("b", vec!["a".to_string()])
            .add_step("c", vec![])
            .build()
            .unwrap();

        let preferred = vec!["c".to_string(), "a".to_string(), "b".to_string()];
        assert_eq!(graph.stable_order(&preferred).unwrap(), preferred);
    }
}
