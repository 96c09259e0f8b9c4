//! Research-backed scaling: employee count to per-kind entity counts.
//!
//! Each non-derived kind gets an industry coefficient (employees per
//! entity), a floor, and a ceiling. The tier multiplier widens counts
//! for larger organisations; the final count is drawn uniformly from the
//! computed `(low, high)` range with the profile's seeded RNG. Derived
//! kinds (departments, roles, networks, vulnerabilities, people) are
//! computed by their generators and can never be overridden.

use std::collections::BTreeMap;

use rand::rngs::StdRng;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{GraphError, Result};
use crate::model::EntityKind;

/// Industries with dedicated coefficient tables. Anything else falls
/// back to the technology defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Industry {
    Technology,
    FinancialServices,
    Healthcare,
}

impl Industry {
    /// Lenient name lookup; unknown industries map to technology.
    #[must_use]
    pub fn from_name(name: &str) -> Industry {
        match name.to_ascii_lowercase().as_str() {
            "financial_services" | "financial" | "finance" | "banking" => {
                Industry::FinancialServices
            }
            "healthcare" | "health" | "pharma" => Industry::Healthcare,
            _ => Industry::Technology,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Industry::Technology => "technology",
            Industry::FinancialServices => "financial_services",
            Industry::Healthcare => "healthcare",
        }
    }

    /// Employees-per-site divisor for the location formula.
    #[must_use]
    pub fn employees_per_location(&self) -> u32 {
        match self {
            Industry::Technology => 400,
            Industry::FinancialServices => 300,
            Industry::Healthcare => 200,
        }
    }
}

impl std::fmt::Display for Industry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Generation input: who the organisation is and how big.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrgProfile {
    pub name: String,
    pub industry: Industry,
    pub employee_count: u32,
    /// Replaces the industry coefficient table when set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coefficients: Option<ScalingCoefficients>,
    /// Verbatim per-kind count overrides, clamped to floor/ceiling.
    /// Derived kinds in an override map are a validation error.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub overrides: BTreeMap<EntityKind, u32>,
    pub seed: u64,
}

impl OrgProfile {
    #[must_use]
    pub fn new(name: impl Into<String>, industry: Industry, employee_count: u32) -> Self {
        Self {
            name: name.into(),
            industry,
            employee_count,
            coefficients: None,
            overrides: BTreeMap::new(),
            seed: 42,
        }
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    #[must_use]
    pub fn with_override(mut self, kind: EntityKind, count: u32) -> Self {
        self.overrides.insert(kind, count);
        self
    }

    /// Reject overrides on derived kinds before generation starts.
    pub fn validate(&self) -> Result<()> {
        if self.employee_count == 0 {
            return Err(GraphError::Validation(
                "employee_count must be at least 1".to_string(),
            ));
        }
        for kind in self.overrides.keys() {
            if is_derived(*kind) {
                return Err(GraphError::Validation(format!(
                    "count override not allowed for derived kind {kind}"
                )));
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn coefficients(&self) -> ScalingCoefficients {
        self.coefficients
            .unwrap_or_else(|| ScalingCoefficients::for_industry(self.industry))
    }
}

/// Kinds whose counts are computed by their generators, never scaled or
/// overridden directly.
#[must_use]
pub fn is_derived(kind: EntityKind) -> bool {
    matches!(
        kind,
        EntityKind::Department
            | EntityKind::Role
            | EntityKind::Network
            | EntityKind::Vulnerability
            | EntityKind::Person
    )
}

/// Employees-per-entity divisors, one field per non-derived kind.
/// `location` is absent: its count uses the per-industry site formula.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ScalingCoefficients {
    pub policy: u32,
    pub regulation: u32,
    pub control: u32,
    pub risk: u32,
    pub threat: u32,
    pub threat_actor: u32,
    pub incident: u32,
    pub system: u32,
    pub integration: u32,
    pub data_asset: u32,
    pub data_domain: u32,
    pub data_flow: u32,
    pub organizational_unit: u32,
    pub business_capability: u32,
    pub site: u32,
    pub geography: u32,
    pub jurisdiction: u32,
    pub product_portfolio: u32,
    pub product: u32,
    pub market_segment: u32,
    pub customer: u32,
    pub vendor: u32,
    pub contract: u32,
    pub initiative: u32,
}

/// Technology industry defaults.
pub const TECHNOLOGY_COEFFICIENTS: ScalingCoefficients = ScalingCoefficients {
    policy: 150,
    regulation: 400,
    control: 100,
    risk: 150,
    threat: 250,
    threat_actor: 2000,
    incident: 300,
    system: 40,
    integration: 80,
    data_asset: 50,
    data_domain: 500,
    data_flow: 60,
    organizational_unit: 1500,
    business_capability: 250,
    site: 800,
    geography: 600,
    jurisdiction: 800,
    product_portfolio: 3000,
    product: 400,
    market_segment: 700,
    customer: 30,
    vendor: 100,
    contract: 90,
    initiative: 300,
};

/// Financial services: heavier governance surface, denser controls.
pub const FINANCIAL_COEFFICIENTS: ScalingCoefficients = ScalingCoefficients {
    policy: 100,
    regulation: 250,
    control: 70,
    risk: 100,
    threat: 220,
    threat_actor: 1800,
    incident: 250,
    system: 50,
    integration: 70,
    data_asset: 45,
    data_domain: 450,
    data_flow: 55,
    organizational_unit: 1200,
    business_capability: 220,
    site: 700,
    geography: 500,
    jurisdiction: 500,
    product_portfolio: 2800,
    product: 500,
    market_segment: 650,
    customer: 25,
    vendor: 110,
    contract: 85,
    initiative: 280,
};

/// Healthcare: data-heavy, fewer customer-facing products.
pub const HEALTHCARE_COEFFICIENTS: ScalingCoefficients = ScalingCoefficients {
    policy: 120,
    regulation: 300,
    control: 80,
    risk: 120,
    threat: 240,
    threat_actor: 2200,
    incident: 220,
    system: 55,
    integration: 75,
    data_asset: 40,
    data_domain: 400,
    data_flow: 50,
    organizational_unit: 1300,
    business_capability: 240,
    site: 500,
    geography: 650,
    jurisdiction: 700,
    product_portfolio: 3500,
    product: 700,
    market_segment: 900,
    customer: 60,
    vendor: 95,
    contract: 80,
    initiative: 320,
};

impl ScalingCoefficients {
    #[must_use]
    pub fn for_industry(industry: Industry) -> ScalingCoefficients {
        match industry {
            Industry::Technology => TECHNOLOGY_COEFFICIENTS,
            Industry::FinancialServices => FINANCIAL_COEFFICIENTS,
            Industry::Healthcare => HEALTHCARE_COEFFICIENTS,
        }
    }

    /// Divisor for a non-derived, non-location kind; `None` for kinds
    /// outside the coefficient table.
    #[must_use]
    pub fn for_kind(&self, kind: EntityKind) -> Option<u32> {
        match kind {
            EntityKind::Policy => Some(self.policy),
            EntityKind::Regulation => Some(self.regulation),
            EntityKind::Control => Some(self.control),
            EntityKind::Risk => Some(self.risk),
            EntityKind::Threat => Some(self.threat),
            EntityKind::ThreatActor => Some(self.threat_actor),
            EntityKind::Incident => Some(self.incident),
            EntityKind::System => Some(self.system),
            EntityKind::Integration => Some(self.integration),
            EntityKind::DataAsset => Some(self.data_asset),
            EntityKind::DataDomain => Some(self.data_domain),
            EntityKind::DataFlow => Some(self.data_flow),
            EntityKind::OrganizationalUnit => Some(self.organizational_unit),
            EntityKind::BusinessCapability => Some(self.business_capability),
            EntityKind::Site => Some(self.site),
            EntityKind::Geography => Some(self.geography),
            EntityKind::Jurisdiction => Some(self.jurisdiction),
            EntityKind::ProductPortfolio => Some(self.product_portfolio),
            EntityKind::Product => Some(self.product),
            EntityKind::MarketSegment => Some(self.market_segment),
            EntityKind::Customer => Some(self.customer),
            EntityKind::Vendor => Some(self.vendor),
            EntityKind::Contract => Some(self.contract),
            EntityKind::Initiative => Some(self.initiative),
            _ => None,
        }
    }
}

/// Floor and ceiling for each scaled kind.
#[must_use]
pub fn bounds(kind: EntityKind) -> (u32, u32) {
    match kind {
        EntityKind::Policy => (8, 60),
        EntityKind::Regulation => (5, 30),
        EntityKind::Control => (10, 120),
        EntityKind::Risk => (8, 80),
        EntityKind::Threat => (6, 40),
        EntityKind::ThreatActor => (4, 12),
        EntityKind::Incident => (4, 50),
        EntityKind::System => (10, 400),
        EntityKind::Integration => (6, 200),
        EntityKind::DataAsset => (10, 300),
        EntityKind::DataDomain => (4, 25),
        EntityKind::DataFlow => (8, 250),
        EntityKind::OrganizationalUnit => (2, 12),
        EntityKind::BusinessCapability => (6, 60),
        EntityKind::Site => (2, 40),
        EntityKind::Geography => (3, 25),
        EntityKind::Jurisdiction => (3, 20),
        EntityKind::ProductPortfolio => (2, 8),
        EntityKind::Product => (4, 60),
        EntityKind::MarketSegment => (3, 12),
        EntityKind::Customer => (8, 500),
        EntityKind::Vendor => (8, 150),
        EntityKind::Contract => (8, 180),
        EntityKind::Initiative => (5, 40),
        // Derived kinds and locations are computed elsewhere; bounds are
        // only meaningful for the scaled set.
        _ => (1, 1000),
    }
}

/// Size-tier multiplier.
#[must_use]
pub fn tier_multiplier(employee_count: u32) -> f64 {
    match employee_count {
        0..=249 => 0.7,
        250..=1999 => 1.0,
        2000..=9999 => 1.2,
        _ => 1.4,
    }
}

/// Compute the `(low, high)` count range for one kind.
#[must_use]
pub fn scaled_range(employee_count: u32, coefficient: u32, floor: u32, ceiling: u32) -> (u32, u32) {
    let tier = tier_multiplier(employee_count);
    let raw = (f64::from(employee_count) / f64::from(coefficient.max(1))) * tier;
    let base = (raw as u32).max(floor);
    let low = ((f64::from(base) * 0.8) as u32)
        .max(floor)
        .min(ceiling.saturating_sub(1));
    let high = ((f64::from(base) * 1.2) as u32).max(low + 1).min(ceiling);
    (low, high)
}

/// Draw the generated count for one scaled kind, honouring overrides.
pub fn scaled_count(profile: &OrgProfile, kind: EntityKind, rng: &mut StdRng) -> Result<u32> {
    if is_derived(kind) {
        return Err(GraphError::Internal(format!(
            "scaled_count called for derived kind {kind}"
        )));
    }
    let (floor, ceiling) = bounds(kind);
    if let Some(&value) = profile.overrides.get(&kind) {
        return Ok(value.clamp(floor, ceiling));
    }
    if kind == EntityKind::Location {
        return Ok(location_count(profile));
    }
    let coefficient = profile.coefficients().for_kind(kind).ok_or_else(|| {
        GraphError::Internal(format!("no scaling coefficient for kind {kind}"))
    })?;
    let (low, high) = scaled_range(profile.employee_count, coefficient, floor, ceiling);
    Ok(rng.gen_range(low..=high))
}

/// Profile-specific dynamic location formula.
#[must_use]
pub fn location_count(profile: &OrgProfile) -> u32 {
    let per_location = profile.industry.employees_per_location();
    let (_, ceiling) = bounds(EntityKind::Site);
    (profile.employee_count / per_location + 1).clamp(1, ceiling)
}

/// People are a representative sample above 500 employees, capped so the
/// graph stays resident at the largest profiles.
#[must_use]
pub fn person_count(employee_count: u32) -> u32 {
    if employee_count <= 500 {
        employee_count
    } else {
        (500 + (employee_count - 500) / 5).min(3000)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_tier_multiplier_breakpoints() {
        assert_eq!(tier_multiplier(100), 0.7);
        assert_eq!(tier_multiplier(250), 1.0);
        assert_eq!(tier_multiplier(2000), 1.2);
        assert_eq!(tier_multiplier(10_000), 1.4);
    }

    #[test]
    fn test_scaled_range_small_org_sits_at_floor() {
        // 100 employees with a coefficient of 150 computes below the
        // floor; the range collapses to (floor, floor + 1).
        let (low, high) = scaled_range(100, 150, 8, 60);
        assert_eq!((low, high), (8, 9));
    }

    #[test]
    fn test_scaled_range_grows_with_employees() {
        let (low_small, high_small) = scaled_range(1000, 40, 10, 400);
        let (low_large, high_large) = scaled_range(10_000, 40, 10, 400);
        assert!(low_large > low_small);
        assert!(high_large > high_small);
        assert!(high_large <= 400);
    }

    #[test]
    fn test_scaled_range_ceiling_clamps() {
        let (low, high) = scaled_range(200_000, 40, 10, 400);
        assert!(low <= 399);
        assert_eq!(high, 400);
        assert!(low < high);
    }

    #[test]
    fn test_scaled_count_is_deterministic_per_seed() {
        let profile = OrgProfile::new("Acme", Industry::Technology, 5000).with_seed(7);
        let mut a = StdRng::seed_from_u64(profile.seed);
        let mut b = StdRng::seed_from_u64(profile.seed);
        assert_eq!(
            scaled_count(&profile, EntityKind::System, &mut a).unwrap(),
            scaled_count(&profile, EntityKind::System, &mut b).unwrap()
        );
    }

    #[test]
    fn test_override_is_verbatim_but_clamped() {
        let profile = OrgProfile::new("Acme", Industry::Technology, 5000)
            .with_override(EntityKind::System, 25)
            .with_override(EntityKind::Product, 9999);
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(
            scaled_count(&profile, EntityKind::System, &mut rng).unwrap(),
            25
        );
        // Clamped to the product ceiling.
        assert_eq!(
            scaled_count(&profile, EntityKind::Product, &mut rng).unwrap(),
            60
        );
    }

    #[test]
    fn test_derived_kinds_reject_overrides() {
        let profile =
            OrgProfile::new("Acme", Industry::Technology, 5000).with_override(EntityKind::Person, 10);
        assert!(profile.validate().is_err());
        let mut rng = StdRng::seed_from_u64(1);
        assert!(scaled_count(&profile, EntityKind::Person, &mut rng).is_err());
    }

    #[test]
    fn test_location_formula_per_industry() {
        let tech = OrgProfile::new("T", Industry::Technology, 1200);
        let fin = OrgProfile::new("F", Industry::FinancialServices, 1200);
        let health = OrgProfile::new("H", Industry::Healthcare, 1200);
        assert_eq!(location_count(&tech), 4);
        assert_eq!(location_count(&fin), 5);
        assert_eq!(location_count(&health), 7);
        let tiny = OrgProfile::new("S", Industry::Technology, 50);
        assert_eq!(location_count(&tiny), 1);
    }

    #[test]
    fn test_unknown_industry_falls_back_to_technology() {
        assert_eq!(Industry::from_name("agriculture"), Industry::Technology);
        assert_eq!(
            Industry::from_name("financial_services"),
            Industry::FinancialServices
        );
    }

    #[test]
    fn test_person_count_sampling() {
        assert_eq!(person_count(100), 100);
        assert_eq!(person_count(500), 500);
        assert_eq!(person_count(14_000), 3000);
        assert_eq!(person_count(1000), 600);
    }
}
