//! Entity and relationship data model.
//!
//! Entities are a closed tagged-variant set: one [`Entity`] struct
//! carrying base identity and temporal fields, plus an [`EntityBody`]
//! enum with one variant per kind. The discriminant is the lowercase
//! `entity_type` field on the wire. Unknown fields encountered on import
//! are routed to an explicit `extra` string bag and never silently mixed
//! into the schema; strict-mode imports reject them outright.

pub mod bodies;
pub mod enums;

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use serde::de::Error as _;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub use bodies::*;
pub use enums::*;

use crate::error::{GraphError, Result};

/// Current UTC time truncated to millisecond resolution.
///
/// All model timestamps go through this so equality survives a JSON
/// round-trip (the canonical format stores milliseconds).
#[must_use]
pub fn now_ms() -> DateTime<Utc> {
    let now = Utc::now();
    DateTime::from_timestamp_millis(now.timestamp_millis()).unwrap_or(now)
}

/// Round to two decimal places (edge weights and confidences).
#[must_use]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Check the shared id format: 1-128 chars of `[A-Za-z0-9_-]`.
#[must_use]
pub fn is_valid_id(id: &str) -> bool {
    !id.is_empty()
        && id.len() <= 128
        && id
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
}

/// The thirty entity kinds, grouped by generation layer L00-L11.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    // L00 foundation
    Location,
    // L01 compliance
    Policy,
    Regulation,
    Control,
    Risk,
    Threat,
    Vulnerability,
    ThreatActor,
    Incident,
    // L02 technology
    Network,
    System,
    Integration,
    // L03 data
    DataAsset,
    DataDomain,
    DataFlow,
    // L04 organization
    Department,
    OrganizationalUnit,
    // L05 people
    Person,
    Role,
    // L06 capabilities
    BusinessCapability,
    // L07 locations
    Site,
    Geography,
    Jurisdiction,
    // L08 products
    ProductPortfolio,
    Product,
    // L09 customers
    MarketSegment,
    Customer,
    // L10 vendors
    Vendor,
    Contract,
    // L11 initiatives
    Initiative,
}

impl EntityKind {
    pub const ALL: [EntityKind; 30] = [
        EntityKind::Location,
        EntityKind::Policy,
        EntityKind::Regulation,
        EntityKind::Control,
        EntityKind::Risk,
        EntityKind::Threat,
        EntityKind::Vulnerability,
        EntityKind::ThreatActor,
        EntityKind::Incident,
        EntityKind::Network,
        EntityKind::System,
        EntityKind::Integration,
        EntityKind::DataAsset,
        EntityKind::DataDomain,
        EntityKind::DataFlow,
        EntityKind::Department,
        EntityKind::OrganizationalUnit,
        EntityKind::Person,
        EntityKind::Role,
        EntityKind::BusinessCapability,
        EntityKind::Site,
        EntityKind::Geography,
        EntityKind::Jurisdiction,
        EntityKind::ProductPortfolio,
        EntityKind::Product,
        EntityKind::MarketSegment,
        EntityKind::Customer,
        EntityKind::Vendor,
        EntityKind::Contract,
        EntityKind::Initiative,
    ];

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Location => "location",
            EntityKind::Policy => "policy",
            EntityKind::Regulation => "regulation",
            EntityKind::Control => "control",
            EntityKind::Risk => "risk",
            EntityKind::Threat => "threat",
            EntityKind::Vulnerability => "vulnerability",
            EntityKind::ThreatActor => "threat_actor",
            EntityKind::Incident => "incident",
            EntityKind::Network => "network",
            EntityKind::System => "system",
            EntityKind::Integration => "integration",
            EntityKind::DataAsset => "data_asset",
            EntityKind::DataDomain => "data_domain",
            EntityKind::DataFlow => "data_flow",
            EntityKind::Department => "department",
            EntityKind::OrganizationalUnit => "organizational_unit",
            EntityKind::Person => "person",
            EntityKind::Role => "role",
            EntityKind::BusinessCapability => "business_capability",
            EntityKind::Site => "site",
            EntityKind::Geography => "geography",
            EntityKind::Jurisdiction => "jurisdiction",
            EntityKind::ProductPortfolio => "product_portfolio",
            EntityKind::Product => "product",
            EntityKind::MarketSegment => "market_segment",
            EntityKind::Customer => "customer",
            EntityKind::Vendor => "vendor",
            EntityKind::Contract => "contract",
            EntityKind::Initiative => "initiative",
        }
    }

    /// Generation layer (0-11). Layer L(n) is fully generated before any
    /// L(m > n) generator runs.
    #[must_use]
    pub fn layer(&self) -> u8 {
        match self {
            EntityKind::Location => 0,
            EntityKind::Policy
            | EntityKind::Regulation
            | EntityKind::Control
            | EntityKind::Risk
            | EntityKind::Threat
            | EntityKind::Vulnerability
            | EntityKind::ThreatActor
            | EntityKind::Incident => 1,
            EntityKind::Network | EntityKind::System | EntityKind::Integration => 2,
            EntityKind::DataAsset | EntityKind::DataDomain | EntityKind::DataFlow => 3,
            EntityKind::Department | EntityKind::OrganizationalUnit => 4,
            EntityKind::Person | EntityKind::Role => 5,
            EntityKind::BusinessCapability => 6,
            EntityKind::Site | EntityKind::Geography | EntityKind::Jurisdiction => 7,
            EntityKind::ProductPortfolio | EntityKind::Product => 8,
            EntityKind::MarketSegment | EntityKind::Customer => 9,
            EntityKind::Vendor | EntityKind::Contract => 10,
            EntityKind::Initiative => 11,
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for EntityKind {
    type Err = GraphError;

    fn from_str(s: &str) -> Result<Self> {
        EntityKind::ALL
            .iter()
            .find(|k| k.as_str() == s)
            .copied()
            .ok_or_else(|| GraphError::Validation(format!("unknown entity type: {s}")))
    }
}

/// Kind-specific payload, tagged with `entity_type` on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "entity_type", rename_all = "snake_case")]
pub enum EntityBody {
    Location(LocationBody),
    Policy(PolicyBody),
    Regulation(RegulationBody),
    Control(ControlBody),
    Risk(RiskBody),
    Threat(ThreatBody),
    Vulnerability(VulnerabilityBody),
    ThreatActor(ThreatActorBody),
    Incident(IncidentBody),
    Network(NetworkBody),
    System(SystemBody),
    Integration(IntegrationBody),
    DataAsset(DataAssetBody),
    DataDomain(DataDomainBody),
    DataFlow(DataFlowBody),
    Department(DepartmentBody),
    OrganizationalUnit(OrganizationalUnitBody),
    Person(PersonBody),
    Role(RoleBody),
    BusinessCapability(BusinessCapabilityBody),
    Site(SiteBody),
    Geography(GeographyBody),
    Jurisdiction(JurisdictionBody),
    ProductPortfolio(ProductPortfolioBody),
    Product(ProductBody),
    MarketSegment(MarketSegmentBody),
    Customer(CustomerBody),
    Vendor(VendorBody),
    Contract(ContractBody),
    Initiative(InitiativeBody),
}

impl EntityBody {
    /// Discriminant for this payload.
    #[must_use]
    pub fn kind(&self) -> EntityKind {
        match self {
            EntityBody::Location(_) => EntityKind::Location,
            EntityBody::Policy(_) => EntityKind::Policy,
            EntityBody::Regulation(_) => EntityKind::Regulation,
            EntityBody::Control(_) => EntityKind::Control,
            EntityBody::Risk(_) => EntityKind::Risk,
            EntityBody::Threat(_) => EntityKind::Threat,
            EntityBody::Vulnerability(_) => EntityKind::Vulnerability,
            EntityBody::ThreatActor(_) => EntityKind::ThreatActor,
            EntityBody::Incident(_) => EntityKind::Incident,
            EntityBody::Network(_) => EntityKind::Network,
            EntityBody::System(_) => EntityKind::System,
            EntityBody::Integration(_) => EntityKind::Integration,
            EntityBody::DataAsset(_) => EntityKind::DataAsset,
            EntityBody::DataDomain(_) => EntityKind::DataDomain,
            EntityBody::DataFlow(_) => EntityKind::DataFlow,
            EntityBody::Department(_) => EntityKind::Department,
            EntityBody::OrganizationalUnit(_) => EntityKind::OrganizationalUnit,
            EntityBody::Person(_) => EntityKind::Person,
            EntityBody::Role(_) => EntityKind::Role,
            EntityBody::BusinessCapability(_) => EntityKind::BusinessCapability,
            EntityBody::Site(_) => EntityKind::Site,
            EntityBody::Geography(_) => EntityKind::Geography,
            EntityBody::Jurisdiction(_) => EntityKind::Jurisdiction,
            EntityBody::ProductPortfolio(_) => EntityKind::ProductPortfolio,
            EntityBody::Product(_) => EntityKind::Product,
            EntityBody::MarketSegment(_) => EntityKind::MarketSegment,
            EntityBody::Customer(_) => EntityKind::Customer,
            EntityBody::Vendor(_) => EntityKind::Vendor,
            EntityBody::Contract(_) => EntityKind::Contract,
            EntityBody::Initiative(_) => EntityKind::Initiative,
        }
    }
}

/// A node in the organisation graph.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Entity {
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(skip_serializing_if = "BTreeSet::is_empty")]
    pub tags: BTreeSet<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: BTreeMap<String, serde_json::Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub valid_from: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub valid_until: Option<DateTime<Utc>>,
    pub version: u32,
    #[serde(flatten)]
    pub body: EntityBody,
    /// Unknown fields carried through from a lenient import. String-coerced
    /// and kept out of the typed schema; an empty bag flattens to nothing.
    #[serde(flatten)]
    pub extra: BTreeMap<String, String>,
}

impl Entity {
    /// Create an entity with a random id and fresh timestamps.
    #[must_use]
    pub fn new(name: impl Into<String>, body: EntityBody) -> Self {
        let now = now_ms();
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            description: String::new(),
            tags: BTreeSet::new(),
            metadata: BTreeMap::new(),
            created_at: now,
            updated_at: now,
            valid_from: None,
            valid_until: None,
            version: 1,
            body,
            extra: BTreeMap::new(),
        }
    }

    /// Replace the generated id with a caller-chosen one.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    #[must_use]
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Discriminant of this entity's body.
    #[must_use]
    pub fn kind(&self) -> EntityKind {
        self.body.kind()
    }

    /// Validate structural invariants: id format, temporal ordering,
    /// version floor, risk math, and the encryption/classification rule.
    pub fn validate(&self) -> Result<()> {
        if !is_valid_id(&self.id) {
            return Err(GraphError::Validation(format!(
                "invalid entity id format: {:?}",
                self.id
            )));
        }
        if self.name.trim().is_empty() {
            return Err(GraphError::Validation(format!(
                "entity {} has an empty name",
                self.id
            )));
        }
        if self.version < 1 {
            return Err(GraphError::Validation(format!(
                "entity {} has version 0",
                self.id
            )));
        }
        if self.updated_at < self.created_at {
            return Err(GraphError::Temporal(format!(
                "entity {}: updated_at precedes created_at",
                self.id
            )));
        }
        let horizon = now_ms() + chrono::Duration::seconds(1);
        if self.created_at > horizon || self.updated_at > horizon {
            return Err(GraphError::Temporal(format!(
                "entity {}: timestamp in the future",
                self.id
            )));
        }
        match &self.body {
            EntityBody::Risk(risk) => {
                let expected = inherent_risk(risk.likelihood, risk.impact);
                if risk.inherent_level != expected {
                    return Err(GraphError::Validation(format!(
                        "risk {}: inherent level {} does not match matrix entry {}",
                        self.id, risk.inherent_level, expected
                    )));
                }
                if risk.residual_level > risk.inherent_level {
                    return Err(GraphError::Validation(format!(
                        "risk {}: residual level exceeds inherent level",
                        self.id
                    )));
                }
            }
            EntityBody::DataFlow(flow) => {
                if let Some(classification) = flow.classification {
                    if classification.requires_encryption() && !flow.encryption_in_transit {
                        return Err(GraphError::Validation(format!(
                            "data_flow {}: {} classification requires encryption in transit",
                            self.id, classification
                        )));
                    }
                }
            }
            _ => {}
        }
        Ok(())
    }
}

impl<'de> Deserialize<'de> for Entity {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        // The body is internally tagged and shares the top level with the
        // base fields, so deserialization goes through a raw pass that
        // splits base fields from the remainder, parses the remainder as
        // the tagged body, and routes anything the schema does not claim
        // into the string-coerced extra bag.
        #[derive(Deserialize)]
        struct Raw {
            #[serde(default)]
            id: Option<String>,
            name: String,
            #[serde(default)]
            description: String,
            #[serde(default)]
            tags: BTreeSet<String>,
            #[serde(default)]
            metadata: BTreeMap<String, serde_json::Value>,
            #[serde(default)]
            created_at: Option<DateTime<Utc>>,
            #[serde(default)]
            updated_at: Option<DateTime<Utc>>,
            #[serde(default)]
            valid_from: Option<DateTime<Utc>>,
            #[serde(default)]
            valid_until: Option<DateTime<Utc>>,
            #[serde(default)]
            version: Option<u32>,
            #[serde(flatten)]
            rest: serde_json::Map<String, serde_json::Value>,
        }

        let raw = Raw::deserialize(deserializer)?;
        let body: EntityBody =
            serde_json::from_value(serde_json::Value::Object(raw.rest.clone()))
                .map_err(D::Error::custom)?;

        // Everything the typed body did not claim becomes extra.
        let claimed = serde_json::to_value(&body).map_err(D::Error::custom)?;
        let claimed_keys: BTreeSet<String> = match claimed {
            serde_json::Value::Object(map) => map.keys().cloned().collect(),
            _ => BTreeSet::new(),
        };
        let mut extra = BTreeMap::new();
        for (key, value) in &raw.rest {
            if key == "entity_type" || claimed_keys.contains(key) {
                continue;
            }
            let coerced = match value {
                serde_json::Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            extra.insert(key.clone(), coerced);
        }

        let now = now_ms();
        Ok(Entity {
            id: raw.id.unwrap_or_else(|| Uuid::new_v4().to_string()),
            name: raw.name,
            description: raw.description,
            tags: raw.tags,
            metadata: raw.metadata,
            created_at: raw.created_at.unwrap_or(now),
            updated_at: raw.updated_at.or(raw.created_at).unwrap_or(now),
            valid_from: raw.valid_from,
            valid_until: raw.valid_until,
            version: raw.version.unwrap_or(1),
            body,
            extra,
        })
    }
}

/// A directed, typed edge between two entities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Relationship {
    pub id: String,
    #[serde(rename = "relationship_type")]
    pub kind: crate::schema::RelationshipKind,
    pub source_id: String,
    pub target_id: String,
    pub weight: f64,
    pub confidence: f64,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<String, serde_json::Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Relationship {
    /// Create a relationship with a random id, full weight, and the
    /// default organisational-fact confidence.
    #[must_use]
    pub fn new(
        kind: crate::schema::RelationshipKind,
        source_id: impl Into<String>,
        target_id: impl Into<String>,
    ) -> Self {
        let now = now_ms();
        Self {
            id: Uuid::new_v4().to_string(),
            kind,
            source_id: source_id.into(),
            target_id: target_id.into(),
            weight: 1.0,
            confidence: 0.9,
            properties: BTreeMap::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace the generated id with a caller-chosen one.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Set the weight, clamped to [0, 1] and rounded to two decimals.
    #[must_use]
    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = round2(weight.clamp(0.0, 1.0));
        self
    }

    /// Set the confidence, clamped to [0, 1] and rounded to two decimals.
    #[must_use]
    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = round2(confidence.clamp(0.0, 1.0));
        self
    }

    #[must_use]
    pub fn with_property(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.properties.insert(key.into(), value);
        self
    }

    /// Validate id formats, metric ranges, and temporal ordering.
    ///
    /// Unlike the builder setters this rejects out-of-range metrics
    /// rather than clamping: the write path must refuse bad input, not
    /// repair it.
    pub fn validate(&self) -> Result<()> {
        for (label, id) in [
            ("id", &self.id),
            ("source_id", &self.source_id),
            ("target_id", &self.target_id),
        ] {
            if !is_valid_id(id) {
                return Err(GraphError::Validation(format!(
                    "invalid relationship {label} format: {id:?}"
                )));
            }
        }
        if !(0.0..=1.0).contains(&self.weight) {
            return Err(GraphError::Validation(format!(
                "relationship {}: weight {} outside [0, 1]",
                self.id, self.weight
            )));
        }
        if !(0.0..=1.0).contains(&self.confidence) {
            return Err(GraphError::Validation(format!(
                "relationship {}: confidence {} outside [0, 1]",
                self.id, self.confidence
            )));
        }
        if self.updated_at < self.created_at {
            return Err(GraphError::Temporal(format!(
                "relationship {}: updated_at precedes created_at",
                self.id
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_system() -> Entity {
        Entity::new(
            "Billing API",
            EntityBody::System(SystemBody {
                system_kind: Some(SystemKind::Application),
                operating_system: Some("Debian 12".to_string()),
                tech_stack: vec!["Rust".to_string(), "PostgreSQL".to_string()],
                criticality: Some(Criticality::High),
                ports: vec![443],
                internet_facing: true,
                environment: "production".to_string(),
                attached_network: None,
            }),
        )
        .with_description("Customer billing and invoicing service handling payment events")
    }

    #[test]
    fn test_entity_serde_roundtrip_preserves_fields() {
        let entity = sample_system();
        let json = serde_json::to_string(&entity).unwrap();
        let back: Entity = serde_json::from_str(&json).unwrap();
        assert_eq!(entity, back);
    }

    #[test]
    fn test_entity_type_tag_is_top_level() {
        let entity = sample_system();
        let value = serde_json::to_value(&entity).unwrap();
        assert_eq!(value["entity_type"], "system");
        assert_eq!(value["tech_stack"][0], "Rust");
    }

    #[test]
    fn test_unknown_fields_route_to_extra() {
        let json = serde_json::json!({
            "id": "sys-1",
            "name": "Inventory",
            "entity_type": "system",
            "environment": "production",
            "legacy_owner": "ops-team",
            "rack_units": 4,
        });
        let entity: Entity = serde_json::from_value(json).unwrap();
        assert_eq!(entity.kind(), EntityKind::System);
        assert_eq!(entity.extra.get("legacy_owner").map(String::as_str), Some("ops-team"));
        assert_eq!(entity.extra.get("rack_units").map(String::as_str), Some("4"));
        assert!(!entity.extra.contains_key("environment"));
    }

    #[test]
    fn test_entity_validate_rejects_bad_id() {
        let entity = sample_system().with_id("no spaces allowed");
        assert!(matches!(
            entity.validate(),
            Err(GraphError::Validation(_))
        ));
    }

    #[test]
    fn test_entity_validate_rejects_reversed_timestamps() {
        let mut entity = sample_system();
        entity.updated_at = entity.created_at - chrono::Duration::seconds(5);
        assert!(matches!(entity.validate(), Err(GraphError::Temporal(_))));
    }

    #[test]
    fn test_risk_math_validation() {
        let mut risk = Entity::new(
            "Ransomware exposure",
            EntityBody::Risk(RiskBody {
                likelihood: RiskLevel::High,
                impact: RiskLevel::VeryHigh,
                inherent_level: inherent_risk(RiskLevel::High, RiskLevel::VeryHigh),
                residual_level: RiskLevel::Medium,
                category: "cyber".to_string(),
                treatment: "mitigate".to_string(),
            }),
        );
        assert!(risk.validate().is_ok());

        if let EntityBody::Risk(body) = &mut risk.body {
            body.inherent_level = RiskLevel::VeryLow;
        }
        assert!(risk.validate().is_err());
    }

    #[test]
    fn test_data_flow_encryption_rule() {
        let flow = Entity::new(
            "payments-to-ledger",
            EntityBody::DataFlow(DataFlowBody {
                classification: Some(DataClassification::Restricted),
                encryption_in_transit: false,
                frequency: "realtime".to_string(),
                volume_gb_per_day: None,
            }),
        );
        assert!(flow.validate().is_err());
    }

    #[test]
    fn test_relationship_weight_clamped_and_rounded() {
        let rel = Relationship::new(
            crate::schema::RelationshipKind::DependsOn,
            "a",
            "b",
        )
        .with_id("rel-1")
        .with_weight(0.876)
        .with_confidence(1.7);
        assert_eq!(rel.id, "rel-1");
        assert_eq!(rel.weight, 0.88);
        assert_eq!(rel.confidence, 1.0);
    }

    #[test]
    fn test_relationship_validate_rejects_out_of_range() {
        let mut rel = Relationship::new(crate::schema::RelationshipKind::Stores, "a", "b");
        rel.weight = 1.5;
        assert!(rel.validate().is_err());
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(0.333_333), 0.33);
        assert_eq!(round2(0.995), 1.0);
    }

    #[test]
    fn test_is_valid_id() {
        assert!(is_valid_id("abc-123_XYZ"));
        assert!(!is_valid_id(""));
        assert!(!is_valid_id("has space"));
        assert!(!is_valid_id(&"x".repeat(129)));
    }

    #[test]
    fn test_entity_kind_from_str_roundtrip() {
        for kind in EntityKind::ALL {
            let parsed: EntityKind = kind.as_str().parse().unwrap();
            assert_eq!(parsed, kind);
        }
        assert!("mainframe".parse::<EntityKind>().is_err());
    }

    #[test]
    fn test_layers_are_monotone_over_catalog_order() {
        let mut last = 0;
        for kind in EntityKind::ALL {
            assert!(kind.layer() >= last);
            last = kind.layer();
        }
        assert_eq!(last, 11);
    }
}
