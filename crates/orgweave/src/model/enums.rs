//! Shared ordinal enums and the risk matrix.
//!
//! These enums carry a total ordering (derive `Ord`) because the model
//! invariants compare them: residual risk must never exceed inherent
//! risk, and severity drives relationship weights.

use serde::{Deserialize, Serialize};

/// Five-point risk scale used for likelihood, impact, and derived levels.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    VeryLow,
    Low,
    Medium,
    High,
    VeryHigh,
}

impl RiskLevel {
    pub const ALL: [RiskLevel; 5] = [
        RiskLevel::VeryLow,
        RiskLevel::Low,
        RiskLevel::Medium,
        RiskLevel::High,
        RiskLevel::VeryHigh,
    ];

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::VeryLow => "very_low",
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
            RiskLevel::VeryHigh => "very_high",
        }
    }

    /// Zero-based position on the five-point scale.
    #[must_use]
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Level lowered by `steps`, saturating at `very_low`.
    #[must_use]
    pub fn lowered_by(&self, steps: usize) -> RiskLevel {
        RiskLevel::ALL[self.index().saturating_sub(steps)]
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fixed 5x5 lookup producing a risk level from (likelihood, impact).
///
/// Rows are likelihood, columns are impact, both indexed very_low..very_high.
pub const RISK_MATRIX: [[RiskLevel; 5]; 5] = {
    use RiskLevel::{High, Low, Medium, VeryHigh, VeryLow};
    [
        // impact:  very_low  low      medium   high     very_high
        /* vl */ [VeryLow, VeryLow, Low, Low, Medium],
        /* l  */ [VeryLow, Low, Low, Medium, Medium],
        /* m  */ [Low, Low, Medium, High, High],
        /* h  */ [Low, Medium, High, High, VeryHigh],
        /* vh */ [Medium, Medium, High, VeryHigh, VeryHigh],
    ]
};

/// Look up the inherent risk level for a (likelihood, impact) pair.
#[must_use]
pub fn inherent_risk(likelihood: RiskLevel, impact: RiskLevel) -> RiskLevel {
    RISK_MATRIX[likelihood.index()][impact.index()]
}

/// Technical severity scale (vulnerabilities, threats, incidents).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    pub const ALL: [Severity; 4] = [
        Severity::Low,
        Severity::Medium,
        Severity::High,
        Severity::Critical,
    ];

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
            Severity::Critical => "critical",
        }
    }

    /// Relationship weight contribution for severity-derived edges.
    #[must_use]
    pub fn edge_weight(&self) -> f64 {
        match self {
            Severity::Low => 0.3,
            Severity::Medium => 0.5,
            Severity::High => 0.8,
            Severity::Critical => 1.0,
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Business criticality of a system, product, or capability.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Criticality {
    Low,
    Medium,
    High,
    Critical,
}

impl Criticality {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Criticality::Low => "low",
            Criticality::Medium => "medium",
            Criticality::High => "high",
            Criticality::Critical => "critical",
        }
    }
}

impl std::fmt::Display for Criticality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Data sensitivity classification.
///
/// Ordering matters: anything at `Confidential` or above must be
/// encrypted in transit.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum DataClassification {
    Public,
    Internal,
    Confidential,
    Restricted,
}

impl DataClassification {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            DataClassification::Public => "public",
            DataClassification::Internal => "internal",
            DataClassification::Confidential => "confidential",
            DataClassification::Restricted => "restricted",
        }
    }

    /// True for classifications that mandate encryption in transit.
    #[must_use]
    pub fn requires_encryption(&self) -> bool {
        *self >= DataClassification::Confidential
    }
}

impl std::fmt::Display for DataClassification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Physical security tier of a site or location.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum SecurityTier {
    Public,
    Internal,
    Restricted,
}

impl SecurityTier {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            SecurityTier::Public => "public",
            SecurityTier::Internal => "internal",
            SecurityTier::Restricted => "restricted",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_risk_level_ordering() {
        assert!(RiskLevel::VeryLow < RiskLevel::Low);
        assert!(RiskLevel::Medium < RiskLevel::VeryHigh);
        assert_eq!(RiskLevel::High.index(), 3);
    }

    #[test]
    fn test_risk_matrix_is_monotone_in_both_axes() {
        // Raising likelihood or impact never lowers the derived level.
        for l in 0..5 {
            for i in 0..4 {
                assert!(RISK_MATRIX[l][i] <= RISK_MATRIX[l][i + 1]);
                assert!(RISK_MATRIX[i][l] <= RISK_MATRIX[i + 1][l]);
            }
        }
    }

    #[test]
    fn test_risk_matrix_corners() {
        assert_eq!(
            inherent_risk(RiskLevel::VeryLow, RiskLevel::VeryLow),
            RiskLevel::VeryLow
        );
        assert_eq!(
            inherent_risk(RiskLevel::VeryHigh, RiskLevel::VeryHigh),
            RiskLevel::VeryHigh
        );
        assert_eq!(
            inherent_risk(RiskLevel::VeryLow, RiskLevel::VeryHigh),
            RiskLevel::Medium
        );
    }

    #[test]
    fn test_lowered_by_saturates() {
        assert_eq!(RiskLevel::Low.lowered_by(4), RiskLevel::VeryLow);
        assert_eq!(RiskLevel::VeryHigh.lowered_by(2), RiskLevel::Medium);
    }

    #[test]
    fn test_severity_edge_weights() {
        assert_eq!(Severity::Low.edge_weight(), 0.3);
        assert_eq!(Severity::Critical.edge_weight(), 1.0);
    }

    #[test]
    fn test_classification_encryption_threshold() {
        assert!(!DataClassification::Public.requires_encryption());
        assert!(!DataClassification::Internal.requires_encryption());
        assert!(DataClassification::Confidential.requires_encryption());
        assert!(DataClassification::Restricted.requires_encryption());
    }

    #[test]
    fn test_serde_snake_case() {
        let json = serde_json::to_string(&RiskLevel::VeryHigh).unwrap();
        assert_eq!(json, "\"very_high\"");
        let back: RiskLevel = serde_json::from_str("\"very_low\"").unwrap();
        assert_eq!(back, RiskLevel::VeryLow);
    }
}
