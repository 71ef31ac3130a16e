//! Deployment profiles: one artifact per trained model.
//!
//! A profile carries the label list (in model output order), the advisory table
//! and the display switches that used to differ between forked app copies.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use crate::catalog::{AdvisoryEntry, AdvisoryTable, ClassLabels, DiseaseCatalog};
use crate::error::{CatalogError, ProfileError};
use crate::prediction::ResolveOptions;

pub const DEFAULT_INPUT_SIZE: u32 = 224;

const PLANT_VILLAGE_16: &str = include_str!("../profiles/plant-village-16.toml");
const LEAF_DISEASE_3: &str = include_str!("../profiles/leaf-disease-3.toml");

/// Names accepted by [`DeploymentProfile::builtin`].
pub const BUILTIN_PROFILES: &[&str] = &["plant-village-16", "leaf-disease-3"];

/// Presentation switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DisplayOptions {
    /// Show the second-best class next to the winner.
    pub report_runner_up: bool,
    /// Show the confidence band message.
    pub show_confidence_message: bool,
    /// Serve the static `/login` and `/register` pages.
    pub account_pages: bool,
}

impl DisplayOptions {
    pub fn resolve_options(&self) -> ResolveOptions {
        ResolveOptions {
            report_runner_up: self.report_runner_up,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ProfileFile {
    name: String,
    #[serde(default = "default_input_size")]
    input_size: u32,
    #[serde(default)]
    report_runner_up: bool,
    #[serde(default)]
    show_confidence_message: bool,
    #[serde(default)]
    account_pages: bool,
    labels: Vec<String>,
    #[serde(default)]
    advisory: BTreeMap<String, AdvisoryEntry>,
}

fn default_input_size() -> u32 {
    DEFAULT_INPUT_SIZE
}

/// A validated profile. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentProfile {
    name: String,
    input_size: u32,
    display: DisplayOptions,
    catalog: DiseaseCatalog,
}

impl DeploymentProfile {
    /// Parse and validate a TOML profile.
    pub fn from_toml_str(source: &str) -> Result<Self, ProfileError> {
        let file: ProfileFile = toml::from_str(source)?;

        if file.input_size == 0 {
            return Err(ProfileError::InvalidInputSize(file.input_size));
        }

        let catalog = build_catalog(file.labels, file.advisory).map_err(|source| {
            ProfileError::Catalog {
                profile: file.name.clone(),
                source,
            }
        })?;

        tracing::debug!(
            profile = %file.name,
            classes = catalog.class_count(),
            "deployment profile validated"
        );

        Ok(Self {
            name: file.name,
            input_size: file.input_size,
            display: DisplayOptions {
                report_runner_up: file.report_runner_up,
                show_confidence_message: file.show_confidence_message,
                account_pages: file.account_pages,
            },
            catalog,
        })
    }

    /// One of [`BUILTIN_PROFILES`].
    pub fn builtin(name: &str) -> Result<Self, ProfileError> {
        match name {
            "plant-village-16" => Self::from_toml_str(PLANT_VILLAGE_16),
            "leaf-disease-3" => Self::from_toml_str(LEAF_DISEASE_3),
            other => Err(ProfileError::UnknownBuiltin(other.to_string())),
        }
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ProfileError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ProfileError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&source)
    }

    /// A built-in name, or else a path to a TOML file.
    pub fn load(name_or_path: &str) -> Result<Self, ProfileError> {
        if BUILTIN_PROFILES.contains(&name_or_path) {
            Self::builtin(name_or_path)
        } else {
            Self::from_path(name_or_path)
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn input_size(&self) -> u32 {
        self.input_size
    }

    pub fn display(&self) -> DisplayOptions {
        self.display
    }

    pub fn catalog(&self) -> &DiseaseCatalog {
        &self.catalog
    }
}

fn build_catalog(
    labels: Vec<String>,
    advisory: BTreeMap<String, AdvisoryEntry>,
) -> Result<DiseaseCatalog, CatalogError> {
    let labels = ClassLabels::new(labels)?;
    DiseaseCatalog::new(labels, AdvisoryTable::new(advisory))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_profiles_load_and_are_consistent() {
        for name in BUILTIN_PROFILES {
            let profile = DeploymentProfile::builtin(name).unwrap();
            assert_eq!(profile.name(), *name);
            assert_eq!(profile.input_size(), DEFAULT_INPUT_SIZE);

            let catalog = profile.catalog();
            for label in catalog.labels().iter() {
                let advisory = catalog.lookup(label).unwrap();
                assert!(!advisory.description.is_empty(), "{label}");
                assert!(!advisory.cure.is_empty(), "{label}");
            }
        }
    }

    #[test]
    fn plant_village_keeps_model_order() {
        let profile = DeploymentProfile::builtin("plant-village-16").unwrap();
        let catalog = profile.catalog();
        assert_eq!(catalog.class_count(), 16);
        assert_eq!(catalog.label(0), Some("Bacterial Spot"));
        assert_eq!(catalog.label(4), Some("Healthy"));
        assert_eq!(catalog.label(15), Some("Target Spot"));
        assert!(!profile.display().report_runner_up);
    }

    #[test]
    fn three_class_profile_enables_extras() {
        let profile = DeploymentProfile::builtin("leaf-disease-3").unwrap();
        assert_eq!(
            profile.catalog().labels().iter().collect::<Vec<_>>(),
            vec!["Healthy", "Powdery", "Rust"]
        );
        let display = profile.display();
        assert!(display.report_runner_up);
        assert!(display.show_confidence_message);
        assert!(display.account_pages);
    }

    #[test]
    fn unknown_builtin_is_rejected() {
        assert!(matches!(
            DeploymentProfile::builtin("corn-only"),
            Err(ProfileError::UnknownBuiltin(name)) if name == "corn-only"
        ));
    }

    #[test]
    fn desynchronized_tables_fail_at_load() {
        let missing = r#"
            name = "broken"
            labels = ["Healthy", "Rust"]

            [advisory.Healthy]
            description = "Fine."
            cure = "None."
        "#;
        match DeploymentProfile::from_toml_str(missing) {
            Err(ProfileError::Catalog { profile, source }) => {
                assert_eq!(profile, "broken");
                assert_eq!(source, CatalogError::MissingAdvisory("Rust".into()));
            }
            other => panic!("expected catalog error, got {other:?}"),
        }

        let orphan = r#"
            name = "broken"
            labels = ["Healthy"]

            [advisory.Healthy]
            description = "Fine."
            cure = "None."

            [advisory."Leaf Mold"]
            description = "Mold."
            cure = "Ventilate."
        "#;
        assert!(matches!(
            DeploymentProfile::from_toml_str(orphan),
            Err(ProfileError::Catalog { source: CatalogError::OrphanAdvisory(_), .. })
        ));
    }

    #[test]
    fn zero_input_size_is_rejected() {
        let src = r#"
            name = "tiny"
            input_size = 0
            labels = ["Healthy"]

            [advisory.Healthy]
            description = "Fine."
            cure = "None."
        "#;
        assert!(matches!(
            DeploymentProfile::from_toml_str(src),
            Err(ProfileError::InvalidInputSize(0))
        ));
    }

    #[test]
    fn unknown_keys_are_parse_errors() {
        let src = r#"
            name = "typo"
            label = ["Healthy"]
        "#;
        assert!(matches!(
            DeploymentProfile::from_toml_str(src),
            Err(ProfileError::Parse(_))
        ));
    }

    #[test]
    fn load_reads_profile_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(
            &path,
            r#"
                name = "custom"
                input_size = 160
                labels = ["Healthy"]

                [advisory.Healthy]
                description = "Fine."
                cure = "None."
            "#,
        )
        .unwrap();

        let profile = DeploymentProfile::load(path.to_str().unwrap()).unwrap();
        assert_eq!(profile.name(), "custom");
        assert_eq!(profile.input_size(), 160);

        let missing = dir.path().join("missing.toml");
        assert!(matches!(
            DeploymentProfile::load(missing.to_str().unwrap()),
            Err(ProfileError::Io { .. })
        ));
    }
}
