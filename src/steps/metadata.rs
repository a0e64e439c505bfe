//! Display metadata for steps.
//!
//! Metadata is keyed by file name, matched case-insensitively, so two steps
//! with the same file name in different directories share a record unless
//! they carry their own overrides.

use std::collections::HashMap;

use crate::config::MetadataEntry;

use super::descriptor::StepDescriptor;

/// Descriptive record for a step file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StepMetadata {
    /// Identifier shown for the step.
    pub id: Option<String>,
    /// Human-readable name.
    pub name: Option<String>,
    /// Longer description.
    pub description: Option<String>,
}

/// How a step is presented, after overrides and metadata are applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepDisplay {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
}

/// Read-only metadata lookup table.
#[derive(Debug, Clone, Default)]
pub struct MetadataTable {
    entries: HashMap<String, StepMetadata>,
}

impl MetadataTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from config entries. Later entries for the same file win.
    pub fn from_entries(entries: &[MetadataEntry]) -> Self {
        let mut table = Self::new();
        for entry in entries {
            table.insert(
                &entry.file,
                StepMetadata {
                    id: entry.id.clone(),
                    name: entry.name.clone(),
                    description: entry.description.clone(),
                },
            );
        }
        table
    }

    /// Add or replace the record for a file name.
    pub fn insert(&mut self, file: &str, metadata: StepMetadata) {
        self.entries.insert(file.trim().to_lowercase(), metadata);
    }

    /// Find the record for a file name, ignoring case.
    pub fn lookup(&self, file: &str) -> Option<&StepMetadata> {
        self.entries.get(&file.trim().to_lowercase())
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Resolve how a step should be displayed.
    ///
    /// Per-step overrides beat the table; the table beats the step's
    /// identity and file name.
    pub fn describe(&self, step: &StepDescriptor) -> StepDisplay {
        let meta = self.lookup(step.file_name());

        let id = step
            .id
            .clone()
            .or_else(|| meta.and_then(|m| m.id.clone()))
            .unwrap_or_else(|| step.identity.clone());
        let name = step
            .name
            .clone()
            .or_else(|| meta.and_then(|m| m.name.clone()))
            .unwrap_or_else(|| step.file_name().to_string());
        let description = step
            .description
            .clone()
            .or_else(|| meta.and_then(|m| m.description.clone()));

        StepDisplay {
            id,
            name,
            description,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> MetadataTable {
        MetadataTable::from_entries(&[MetadataEntry {
            file: "Build.sh".to_string(),
            id: Some("BLD".to_string()),
            name: Some("Build everything".to_string()),
            description: Some("Compiles all projects".to_string()),
        }])
    }

    #[test]
    fn lookup_is_case_insensitive() {
        let table = table();
        assert!(table.lookup("build.sh").is_some());
        assert!(table.lookup("BUILD.SH").is_some());
        assert!(table.lookup("test.sh").is_none());
    }

    #[test]
    fn describe_uses_metadata_by_file_name_only() {
        let table = table();
        let a = table.describe(&StepDescriptor::new("one/build.sh"));
        let b = table.describe(&StepDescriptor::new("two/BUILD.sh"));
        assert_eq!(a, b);
        assert_eq!(a.id, "BLD");
        assert_eq!(a.name, "Build everything");
    }

    #[test]
    fn step_overrides_beat_metadata() {
        let table = table();
        let step = StepDescriptor::new("build.sh")
            .with_name("Custom build")
            .with_description("Just the core");
        let display = table.describe(&step);
        assert_eq!(display.id, "BLD");
        assert_eq!(display.name, "Custom build");
        assert_eq!(display.description.as_deref(), Some("Just the core"));
    }

    #[test]
    fn describe_falls_back_to_step_itself() {
        let display = MetadataTable::new().describe(&StepDescriptor::new("scripts/Lint.sh"));
        assert_eq!(display.id, "lint.sh");
        assert_eq!(display.name, "Lint.sh");
        assert!(display.description.is_none());
    }
}
