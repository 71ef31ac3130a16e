//! `leafscan-core`: leaf-disease prediction domain.
//!
//! This crate contains **pure** logic (no image decoding, no model runtime, no
//! HTTP): label catalogs, probability validation, ranking, confidence bands and
//! deployment profiles.

pub mod catalog;
pub mod confidence;
pub mod error;
pub mod prediction;
pub mod probability;
pub mod profile;
pub mod ranking;

pub use catalog::{AdvisoryEntry, AdvisoryTable, ClassLabels, DiseaseCatalog};
pub use confidence::ConfidenceBand;
pub use error::{CatalogError, CatalogResult, ProbabilityError, ProfileError};
pub use prediction::{PredictionResult, RankedLabel, ResolveOptions, resolve};
pub use probability::ProbabilityVector;
pub use profile::{BUILTIN_PROFILES, DeploymentProfile, DisplayOptions};
