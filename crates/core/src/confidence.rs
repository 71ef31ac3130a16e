use serde::Serialize;

/// Lower bound (inclusive) of the high band, in percent.
pub const HIGH_THRESHOLD_PCT: f64 = 75.0;

/// Lower bound (inclusive) of the moderate band, in percent.
pub const MODERATE_THRESHOLD_PCT: f64 = 50.0;

/// Qualitative bucket for the winning confidence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfidenceBand {
    High,
    Moderate,
    Low,
}

impl ConfidenceBand {
    pub fn from_pct(confidence_pct: f64) -> Self {
        if confidence_pct >= HIGH_THRESHOLD_PCT {
            Self::High
        } else if confidence_pct >= MODERATE_THRESHOLD_PCT {
            Self::Moderate
        } else {
            Self::Low
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Self::High => "High confidence prediction.",
            Self::Moderate => "Moderate confidence. A clearer image may improve accuracy.",
            Self::Low => "Low confidence. Diseases may look similar or image quality may be low.",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Moderate => "moderate",
            Self::Low => "low",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lower_bounds_are_inclusive() {
        assert_eq!(ConfidenceBand::from_pct(100.0), ConfidenceBand::High);
        assert_eq!(ConfidenceBand::from_pct(75.0), ConfidenceBand::High);
        assert_eq!(ConfidenceBand::from_pct(74.99), ConfidenceBand::Moderate);
        assert_eq!(ConfidenceBand::from_pct(50.0), ConfidenceBand::Moderate);
        assert_eq!(ConfidenceBand::from_pct(49.99), ConfidenceBand::Low);
        assert_eq!(ConfidenceBand::from_pct(0.0), ConfidenceBand::Low);
    }

    #[test]
    fn messages() {
        assert_eq!(ConfidenceBand::High.message(), "High confidence prediction.");
        assert!(ConfidenceBand::Moderate.message().starts_with("Moderate confidence."));
        assert!(ConfidenceBand::Low.message().starts_with("Low confidence."));
    }
}
