//! Group filtering.

use std::collections::BTreeSet;

use crate::steps::StepDescriptor;

/// Filter entry that selects every step.
pub const ALL_GROUPS: &str = "all";

/// Selects which steps take part in a run.
///
/// An empty filter, or one containing [`ALL_GROUPS`], matches every step.
/// Otherwise a step matches when it shares at least one group with the
/// filter; untagged steps only match the empty or `all` filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupFilter {
    groups: BTreeSet<String>,
}

impl GroupFilter {
    /// A filter that matches everything.
    pub fn any() -> Self {
        Self::default()
    }

    /// Build a filter from group names (case-insensitive, blanks ignored).
    pub fn new<I, S>(groups: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            groups: groups
                .into_iter()
                .map(|g| g.as_ref().trim().to_lowercase())
                .filter(|g| !g.is_empty())
                .collect(),
        }
    }

    /// Whether this filter lets every step through.
    pub fn matches_all(&self) -> bool {
        self.groups.is_empty() || self.groups.contains(ALL_GROUPS)
    }

    /// Whether a step is eligible under this filter.
    pub fn matches(&self, step: &StepDescriptor) -> bool {
        self.matches_all() || step.groups.iter().any(|g| self.groups.contains(g))
    }

    /// The normalized group names.
    pub fn groups(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(String::as_str)
    }
}

impl std::fmt::Display for GroupFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.groups.is_empty() {
            write!(f, "{}", ALL_GROUPS)
        } else {
            let names: Vec<&str> = self.groups().collect();
            write!(f, "{}", names.join(","))
        }
    }
}
