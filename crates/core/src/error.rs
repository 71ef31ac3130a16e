//! Domain error model.

use thiserror::Error;

/// Result type used by catalog lookups and validation.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Label list / advisory table failures.
///
/// Everything except `UnknownLabel` is a startup failure: a catalog that
/// constructs successfully can only fail lookups for labels it never had.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// The class list is empty.
    #[error("class label list is empty")]
    EmptyLabels,

    /// A label is blank (empty or whitespace only).
    #[error("class label at index {0} is blank")]
    BlankLabel(usize),

    /// The same label appears twice in the class list.
    #[error("duplicate class label: {0}")]
    DuplicateLabel(String),

    /// A class label has no advisory entry.
    #[error("no advisory entry for class label: {0}")]
    MissingAdvisory(String),

    /// The advisory table has an entry for a label the model cannot produce.
    #[error("advisory entry for unknown class label: {0}")]
    OrphanAdvisory(String),

    /// An advisory entry has an empty description or cure.
    #[error("advisory entry for {0} has an empty description or cure")]
    EmptyAdvisory(String),

    /// Lookup for a label not in the catalog.
    #[error("unknown class label: {0}")]
    UnknownLabel(String),
}

impl CatalogError {
    pub fn unknown_label(label: impl Into<String>) -> Self {
        Self::UnknownLabel(label.into())
    }
}

/// Invalid classifier output.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ProbabilityError {
    #[error("probability vector is empty")]
    Empty,

    #[error("probability vector has {actual} entries, expected {expected}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("probability at index {index} is not finite")]
    NotFinite { index: usize },

    #[error("probability at index {index} is out of range: {value}")]
    OutOfRange { index: usize, value: f32 },
}

/// Deployment profile loading failures.
#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("unknown built-in profile: {0}")]
    UnknownBuiltin(String),

    #[error("failed to read profile {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse profile: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid input size {0} (must be > 0)")]
    InvalidInputSize(u32),

    #[error("profile {profile} is inconsistent: {source}")]
    Catalog {
        profile: String,
        #[source]
        source: CatalogError,
    },
}
