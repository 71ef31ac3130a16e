//! Class labels and advisory text.
//!
//! The label order is the model's output order: index `i` of a probability
//! vector belongs to `labels[i]`. Nothing in this module reorders labels.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::error::{CatalogError, CatalogResult};

/// Ordered, immutable index → name mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassLabels {
    labels: Vec<String>,
}

impl ClassLabels {
    /// Validate and freeze a label list (non-empty, no blanks, no duplicates).
    pub fn new<I, S>(labels: I) -> CatalogResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let labels: Vec<String> = labels.into_iter().map(Into::into).collect();
        if labels.is_empty() {
            return Err(CatalogError::EmptyLabels);
        }

        let mut seen = HashSet::with_capacity(labels.len());
        for (i, label) in labels.iter().enumerate() {
            if label.trim().is_empty() {
                return Err(CatalogError::BlankLabel(i));
            }
            if !seen.insert(label.as_str()) {
                return Err(CatalogError::DuplicateLabel(label.clone()));
            }
        }

        Ok(Self { labels })
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.labels.get(index).map(String::as_str)
    }

    pub fn contains(&self, label: &str) -> bool {
        self.labels.iter().any(|l| l == label)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.labels.iter().map(String::as_str)
    }
}

/// Static description/remediation text for one label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdvisoryEntry {
    pub description: String,
    pub cure: String,
}

impl AdvisoryEntry {
    pub fn new(description: impl Into<String>, cure: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            cure: cure.into(),
        }
    }

    fn is_complete(&self) -> bool {
        !self.description.trim().is_empty() && !self.cure.trim().is_empty()
    }
}

/// Label name → advisory entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdvisoryTable {
    entries: BTreeMap<String, AdvisoryEntry>,
}

impl AdvisoryTable {
    pub fn new(entries: BTreeMap<String, AdvisoryEntry>) -> Self {
        Self { entries }
    }

    pub fn insert(&mut self, label: impl Into<String>, entry: AdvisoryEntry) {
        self.entries.insert(label.into(), entry);
    }

    /// Look up the advisory for `label`.
    ///
    /// Never falls back to a default entry.
    pub fn lookup(&self, label: &str) -> CatalogResult<&AdvisoryEntry> {
        self.entries
            .get(label)
            .ok_or_else(|| CatalogError::unknown_label(label))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

impl FromIterator<(String, AdvisoryEntry)> for AdvisoryTable {
    fn from_iter<T: IntoIterator<Item = (String, AdvisoryEntry)>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// Labels and advisories, checked against each other.
///
/// Invariants (enforced by [`DiseaseCatalog::new`]):
/// - every label has a complete advisory entry
/// - every advisory entry belongs to a label
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiseaseCatalog {
    labels: ClassLabels,
    advisory: AdvisoryTable,
}

impl DiseaseCatalog {
    pub fn new(labels: ClassLabels, advisory: AdvisoryTable) -> CatalogResult<Self> {
        for label in labels.iter() {
            let entry = advisory
                .entries
                .get(label)
                .ok_or_else(|| CatalogError::MissingAdvisory(label.to_string()))?;
            if !entry.is_complete() {
                return Err(CatalogError::EmptyAdvisory(label.to_string()));
            }
        }

        if let Some(orphan) = advisory.labels().find(|l| !labels.contains(l)) {
            return Err(CatalogError::OrphanAdvisory(orphan.to_string()));
        }

        Ok(Self { labels, advisory })
    }

    pub fn labels(&self) -> &ClassLabels {
        &self.labels
    }

    pub fn class_count(&self) -> usize {
        self.labels.len()
    }

    pub fn label(&self, index: usize) -> Option<&str> {
        self.labels.get(index)
    }

    pub fn lookup(&self, label: &str) -> CatalogResult<&AdvisoryEntry> {
        self.advisory.lookup(label)
    }
}
