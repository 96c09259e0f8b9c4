//! Kind-specific entity payloads.
//!
//! One struct per entity kind, carried inside [`EntityBody`]. Mirror
//! fields (denormalisations the weaver maintains, e.g.
//! `PersonBody::holds_roles`) are declared here so they are part of the
//! closed schema, never dynamic extras.

use serde::{Deserialize, Serialize};

use super::enums::{Criticality, DataClassification, RiskLevel, SecurityTier, Severity};

/// Kind of physical facility, shared by `location` and `site`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FacilityKind {
    Headquarters,
    Office,
    DataCenter,
    Warehouse,
    Lab,
    Distribution,
    Colocation,
}

/// System archetype; drives the technology-coherence quality check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SystemKind {
    Application,
    Database,
    Appliance,
    Middleware,
    Saas,
    Infrastructure,
}

/// Vulnerability remediation state; correlated with `patch_available`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VulnStatus {
    Open,
    InRemediation,
    Patched,
    Accepted,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LocationBody {
    pub facility: Option<FacilityKind>,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub capacity: u32,
    pub physical_security_tier: Option<SecurityTier>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PolicyBody {
    #[serde(default)]
    pub policy_area: String,
    #[serde(default)]
    pub review_cycle: String,
    #[serde(default)]
    pub enforcement: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_role: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RegulationBody {
    #[serde(default)]
    pub authority: String,
    #[serde(default)]
    pub domain: String,
    #[serde(default)]
    pub scope: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_penalty: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ControlBody {
    #[serde(default)]
    pub control_class: String,
    #[serde(default)]
    pub automation: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub framework_refs: Vec<String>,
    #[serde(default)]
    pub maturity: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskBody {
    pub likelihood: RiskLevel,
    pub impact: RiskLevel,
    pub inherent_level: RiskLevel,
    pub residual_level: RiskLevel,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub treatment: String,
}

impl Default for RiskBody {
    fn default() -> Self {
        Self {
            likelihood: RiskLevel::Low,
            impact: RiskLevel::Low,
            inherent_level: RiskLevel::Low,
            residual_level: RiskLevel::Low,
            category: String::new(),
            treatment: String::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ThreatBody {
    #[serde(default)]
    pub threat_class: String,
    pub severity: Option<Severity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vector: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VulnerabilityBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cve_id: Option<String>,
    pub severity: Option<Severity>,
    #[serde(default)]
    pub cvss_score: f64,
    pub status: Option<VulnStatus>,
    #[serde(default)]
    pub patch_available: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub affected_component: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ThreatActorBody {
    #[serde(default)]
    pub actor_class: String,
    #[serde(default)]
    pub sophistication: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub known_aliases: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IncidentBody {
    #[serde(default)]
    pub incident_class: String,
    pub severity: Option<Severity>,
    #[serde(default)]
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root_cause: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NetworkBody {
    #[serde(default)]
    pub network_zone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cidr: Option<String>,
    #[serde(default)]
    pub internet_facing: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SystemBody {
    pub system_kind: Option<SystemKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operating_system: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tech_stack: Vec<String>,
    pub criticality: Option<Criticality>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ports: Vec<u16>,
    #[serde(default)]
    pub internet_facing: bool,
    #[serde(default)]
    pub environment: String,
    /// Mirror of the system's `runs_on` edge.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attached_network: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IntegrationBody {
    #[serde(default)]
    pub integration_style: String,
    #[serde(default)]
    pub protocol: String,
    #[serde(default)]
    pub direction: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_method: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataAssetBody {
    pub classification: Option<DataClassification>,
    #[serde(default)]
    pub format: String,
    #[serde(default)]
    pub contains_pii: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub record_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retention_days: Option<u32>,
    /// Mirror of inbound `stores` edges.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub stored_in_systems: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataDomainBody {
    #[serde(default)]
    pub domain_area: String,
    #[serde(default)]
    pub governance_tier: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataFlowBody {
    pub classification: Option<DataClassification>,
    #[serde(default)]
    pub encryption_in_transit: bool,
    #[serde(default)]
    pub frequency: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume_gb_per_day: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DepartmentBody {
    #[serde(default)]
    pub headcount: u32,
    #[serde(default)]
    pub function: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost_center: Option<String>,
    /// Set on sub-departments produced by subdivision; `None` on roots.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_department_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrganizationalUnitBody {
    #[serde(default)]
    pub unit_kind: String,
    #[serde(default)]
    pub headcount: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersonBody {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub employment: String,
    /// Mirror of the person's outgoing `has_role` edges.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub holds_roles: Vec<String>,
    /// Mirror of the person's `located_at` edge.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub located_at: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoleBody {
    #[serde(default)]
    pub role_level: String,
    #[serde(default)]
    pub role_family: String,
    /// Mirror of inbound `has_role` edges.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub filled_by_persons: Vec<String>,
    /// Mirror: `filled_by_persons.len()` kept as an integer for cheap reads.
    #[serde(default)]
    pub headcount_filled: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BusinessCapabilityBody {
    #[serde(default)]
    pub capability_tier: String,
    #[serde(default)]
    pub maturity: u8,
    pub criticality: Option<Criticality>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SiteBody {
    pub facility: Option<FacilityKind>,
    pub physical_security_tier: Option<SecurityTier>,
    #[serde(default)]
    pub capacity: u32,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub country: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeographyBody {
    #[serde(default)]
    pub geo_scope: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iso_code: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JurisdictionBody {
    #[serde(default)]
    pub legal_system: String,
    #[serde(default)]
    pub regulatory_density: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductPortfolioBody {
    #[serde(default)]
    pub lifecycle: String,
    #[serde(default)]
    pub revenue_share: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductBody {
    #[serde(default)]
    pub stage: String,
    pub criticality: Option<Criticality>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annual_revenue: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MarketSegmentBody {
    #[serde(default)]
    pub segment_size: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vertical: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CustomerBody {
    #[serde(default)]
    pub tier: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annual_value: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VendorBody {
    #[serde(default)]
    pub tier: String,
    #[serde(default)]
    pub service_category: String,
    pub risk_rating: Option<RiskLevel>,
    #[serde(default)]
    pub data_access: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContractBody {
    #[serde(default)]
    pub contract_kind: String,
    #[serde(default)]
    pub annual_value: f64,
    #[serde(default)]
    pub auto_renew: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InitiativeBody {
    #[serde(default)]
    pub initiative_class: String,
    #[serde(default)]
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_body_serde_roundtrip() {
        let body = SystemBody {
            system_kind: Some(SystemKind::Database),
            operating_system: Some("Ubuntu 22.04".to_string()),
            tech_stack: vec!["PostgreSQL".to_string()],
            criticality: Some(Criticality::Critical),
            ports: vec![5432],
            internet_facing: false,
            environment: "production".to_string(),
            attached_network: None,
        };
        let json = serde_json::to_string(&body).unwrap();
        let back: SystemBody = serde_json::from_str(&json).unwrap();
        assert_eq!(body, back);
    }

    #[test]
    fn test_empty_mirror_fields_are_skipped() {
        let body = PersonBody::default();
        let json = serde_json::to_value(&body).unwrap();
        assert!(json.get("holds_roles").is_none());
        assert!(json.get("located_at").is_none());
    }

    #[test]
    fn test_facility_kind_snake_case() {
        let json = serde_json::to_string(&FacilityKind::DataCenter).unwrap();
        assert_eq!(json, "\"data_center\"");
    }

    #[test]
    fn test_vuln_status_snake_case() {
        let back: VulnStatus = serde_json::from_str("\"in_remediation\"").unwrap();
        assert_eq!(back, VulnStatus::InRemediation);
    }
}
