//! Rank resolution + confidence bucketing + advisory lookup, as one pure step.

use serde::Serialize;

use crate::catalog::{AdvisoryEntry, DiseaseCatalog};
use crate::confidence::ConfidenceBand;
use crate::error::CatalogError;
use crate::probability::ProbabilityVector;
use crate::ranking::{self, Rank};

/// What to report beyond the winning label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ResolveOptions {
    pub report_runner_up: bool,
}

/// A class with its display confidence.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedLabel {
    pub index: usize,
    pub label: String,
    pub confidence_pct: f64,
}

/// Outcome of one classification request. Built per request, never stored.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionResult {
    pub top: RankedLabel,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub runner_up: Option<RankedLabel>,
    pub confidence: ConfidenceBand,
    pub confidence_message: &'static str,
    pub advisory: AdvisoryEntry,
}

/// Turn a validated probability vector into a [`PredictionResult`].
///
/// `probs` must be index-aligned with `catalog` (see
/// [`ProbabilityVector::for_classes`]); an index the catalog cannot name is
/// reported as `UnknownLabel`.
pub fn resolve(
    catalog: &DiseaseCatalog,
    probs: &ProbabilityVector,
    options: ResolveOptions,
) -> Result<PredictionResult, CatalogError> {
    let (top, second) = if options.report_runner_up {
        ranking::top_two(probs)
    } else {
        (ranking::top_one(probs), None)
    };

    let top = ranked_label(catalog, top)?;
    let runner_up = second.map(|r| ranked_label(catalog, r)).transpose()?;
    let advisory = catalog.lookup(&top.label)?.clone();
    let confidence = ConfidenceBand::from_pct(top.confidence_pct);

    Ok(PredictionResult {
        top,
        runner_up,
        confidence,
        confidence_message: confidence.message(),
        advisory,
    })
}

fn ranked_label(catalog: &DiseaseCatalog, rank: Rank) -> Result<RankedLabel, CatalogError> {
    let label = catalog
        .label(rank.index)
        .ok_or_else(|| CatalogError::unknown_label(format!("#{}", rank.index)))?;
    Ok(RankedLabel {
        index: rank.index,
        label: label.to_string(),
        confidence_pct: rank.confidence_pct(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{AdvisoryTable, ClassLabels};

    fn three_class_catalog() -> DiseaseCatalog {
        let labels = ClassLabels::new(["Healthy", "Powdery", "Rust"]).unwrap();
        let advisory: AdvisoryTable = ["Healthy", "Powdery", "Rust"]
            .iter()
            .map(|l| (l.to_string(), AdvisoryEntry::new(format!("{l} desc"), format!("{l} cure"))))
            .collect();
        DiseaseCatalog::new(labels, advisory).unwrap()
    }

    fn probs(values: &[f32]) -> ProbabilityVector {
        ProbabilityVector::for_classes(values.to_vec(), 3).unwrap()
    }

    #[test]
    fn confident_rust_prediction() {
        let catalog = three_class_catalog();
        let result = resolve(&catalog, &probs(&[0.1, 0.05, 0.85]), ResolveOptions::default()).unwrap();

        assert_eq!(result.top.label, "Rust");
        assert_eq!(result.top.confidence_pct, 85.0);
        assert_eq!(result.confidence, ConfidenceBand::High);
        assert_eq!(result.confidence_message, "High confidence prediction.");
        assert_eq!(result.advisory.description, "Rust desc");
        assert!(result.runner_up.is_none());
    }

    #[test]
    fn low_confidence_prediction_with_runner_up() {
        let catalog = three_class_catalog();
        let options = ResolveOptions {
            report_runner_up: true,
        };
        let result = resolve(&catalog, &probs(&[0.3, 0.3, 0.4]), options).unwrap();

        assert_eq!(result.top.label, "Rust");
        assert_eq!(result.top.confidence_pct, 40.0);
        assert_eq!(result.confidence, ConfidenceBand::Low);
        assert!(result.confidence_message.starts_with("Low confidence"));

        let runner_up = result.runner_up.unwrap();
        assert_eq!(runner_up.label, "Healthy");
        assert_eq!(runner_up.confidence_pct, 30.0);
    }

    #[test]
    fn vector_wider_than_catalog_reports_unknown_label() {
        let catalog = three_class_catalog();
        let wide = ProbabilityVector::new(vec![0.1, 0.1, 0.1, 0.7]).unwrap();

        let err = resolve(&catalog, &wide, ResolveOptions::default()).unwrap_err();
        assert_eq!(err, CatalogError::UnknownLabel("#3".into()));
    }

    #[test]
    fn serializes_without_absent_runner_up() {
        let catalog = three_class_catalog();
        let result = resolve(&catalog, &probs(&[0.6, 0.2, 0.2]), ResolveOptions::default()).unwrap();

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["top"]["label"], "Healthy");
        assert_eq!(json["confidence"], "moderate");
        assert!(json.get("runner_up").is_none());
    }
}
