//! Relationship catalog: the closed set of edge types with their
//! declared domains and ranges.
//!
//! This table is the single source of truth for schema conformance. The
//! weaver, the write tools, the import validator, and the test suite all
//! consult it; nothing else may decide which endpoint kinds an edge
//! accepts.

use serde::{Deserialize, Serialize};

use crate::error::{GraphError, Result};
use crate::model::EntityKind;

/// The fifty-two relationship kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationshipKind {
    // organisation
    WorksIn,
    Manages,
    HasRole,
    ReportsTo,
    MemberOf,
    ParentOf,
    LocatedAt,
    BasedIn,
    OperatesIn,
    Owns,
    // technology
    DependsOn,
    RunsOn,
    HostedAt,
    ConnectsTo,
    IntegratesWith,
    // data
    Stores,
    Processes,
    FlowsTo,
    BelongsToDomain,
    StewardedBy,
    ResidesIn,
    // governance
    Governs,
    Implements,
    Mitigates,
    Monitors,
    Secures,
    SubjectTo,
    AppliesIn,
    // threat landscape
    Threatens,
    Exploits,
    Targets,
    AttributedTo,
    Affects,
    IncidentAffects,
    TriggeredBy,
    Introduces,
    AssignedTo,
    // capabilities and products
    Supports,
    Enables,
    Delivers,
    Requires,
    PartOf,
    Serves,
    // customers
    Purchases,
    BelongsToSegment,
    // vendors
    Supplies,
    ManagesVendor,
    ContractedUnder,
    Covers,
    // initiatives
    Sponsors,
    Impacts,
    // access
    Accesses,
}

/// Declared endpoint sets for one relationship kind.
#[derive(Debug, Clone, Copy)]
pub struct RelationshipSchema {
    pub kind: RelationshipKind,
    pub sources: &'static [EntityKind],
    pub targets: &'static [EntityKind],
}

use EntityKind as K;
use RelationshipKind as R;

/// The full `(type, source kinds, target kinds)` catalog.
pub const RELATIONSHIP_SCHEMA: &[RelationshipSchema] = &[
    RelationshipSchema { kind: R::WorksIn, sources: &[K::Person], targets: &[K::Department] },
    RelationshipSchema { kind: R::Manages, sources: &[K::Person], targets: &[K::Person, K::Department] },
    RelationshipSchema { kind: R::HasRole, sources: &[K::Person], targets: &[K::Role] },
    RelationshipSchema { kind: R::ReportsTo, sources: &[K::Person], targets: &[K::Person] },
    RelationshipSchema { kind: R::MemberOf, sources: &[K::Department], targets: &[K::OrganizationalUnit] },
    RelationshipSchema { kind: R::ParentOf, sources: &[K::Department], targets: &[K::Department] },
    RelationshipSchema { kind: R::LocatedAt, sources: &[K::Person, K::Department, K::System], targets: &[K::Location, K::Site] },
    RelationshipSchema { kind: R::BasedIn, sources: &[K::OrganizationalUnit], targets: &[K::Geography] },
    RelationshipSchema { kind: R::OperatesIn, sources: &[K::OrganizationalUnit, K::Vendor], targets: &[K::Jurisdiction, K::Geography] },
    RelationshipSchema { kind: R::Owns, sources: &[K::Department], targets: &[K::System, K::DataAsset, K::Product] },
    RelationshipSchema { kind: R::DependsOn, sources: &[K::System], targets: &[K::System] },
    RelationshipSchema { kind: R::RunsOn, sources: &[K::System], targets: &[K::Network] },
    RelationshipSchema { kind: R::HostedAt, sources: &[K::System, K::Network], targets: &[K::Site, K::Location] },
    RelationshipSchema { kind: R::ConnectsTo, sources: &[K::Integration], targets: &[K::System] },
    RelationshipSchema { kind: R::IntegratesWith, sources: &[K::System], targets: &[K::System] },
    RelationshipSchema { kind: R::Stores, sources: &[K::System], targets: &[K::DataAsset] },
    RelationshipSchema { kind: R::Processes, sources: &[K::System], targets: &[K::DataAsset] },
    RelationshipSchema { kind: R::FlowsTo, sources: &[K::DataFlow, K::DataAsset], targets: &[K::System, K::DataAsset] },
    RelationshipSchema { kind: R::BelongsToDomain, sources: &[K::DataAsset], targets: &[K::DataDomain] },
    RelationshipSchema { kind: R::StewardedBy, sources: &[K::DataDomain], targets: &[K::Role] },
    RelationshipSchema { kind: R::ResidesIn, sources: &[K::DataAsset], targets: &[K::Geography, K::Site] },
    RelationshipSchema { kind: R::Governs, sources: &[K::Policy], targets: &[K::System, K::DataAsset, K::Department] },
    RelationshipSchema { kind: R::Implements, sources: &[K::Control], targets: &[K::Regulation, K::Policy] },
    RelationshipSchema { kind: R::Mitigates, sources: &[K::Control], targets: &[K::Risk, K::Vulnerability, K::Threat] },
    RelationshipSchema { kind: R::Monitors, sources: &[K::Control], targets: &[K::System] },
    RelationshipSchema { kind: R::Secures, sources: &[K::Control], targets: &[K::System, K::Network, K::DataAsset] },
    RelationshipSchema { kind: R::SubjectTo, sources: &[K::System, K::Vendor, K::DataAsset, K::Product], targets: &[K::Regulation, K::Jurisdiction] },
    RelationshipSchema { kind: R::AppliesIn, sources: &[K::Regulation], targets: &[K::Jurisdiction] },
    RelationshipSchema { kind: R::Threatens, sources: &[K::Threat], targets: &[K::System, K::DataAsset, K::BusinessCapability] },
    RelationshipSchema { kind: R::Exploits, sources: &[K::Threat, K::ThreatActor], targets: &[K::Vulnerability] },
    RelationshipSchema { kind: R::Targets, sources: &[K::ThreatActor], targets: &[K::System, K::DataAsset, K::Person] },
    RelationshipSchema { kind: R::AttributedTo, sources: &[K::Incident], targets: &[K::ThreatActor] },
    RelationshipSchema { kind: R::Affects, sources: &[K::Vulnerability], targets: &[K::System] },
    RelationshipSchema { kind: R::IncidentAffects, sources: &[K::Incident], targets: &[K::System, K::DataAsset] },
    RelationshipSchema { kind: R::TriggeredBy, sources: &[K::Incident], targets: &[K::Vulnerability, K::Threat] },
    RelationshipSchema { kind: R::Introduces, sources: &[K::Vendor, K::System], targets: &[K::Risk] },
    RelationshipSchema { kind: R::AssignedTo, sources: &[K::Risk], targets: &[K::Department] },
    RelationshipSchema { kind: R::Supports, sources: &[K::System], targets: &[K::BusinessCapability] },
    RelationshipSchema { kind: R::Enables, sources: &[K::BusinessCapability], targets: &[K::BusinessCapability] },
    RelationshipSchema { kind: R::Delivers, sources: &[K::BusinessCapability], targets: &[K::Product] },
    RelationshipSchema { kind: R::Requires, sources: &[K::Product], targets: &[K::BusinessCapability] },
    RelationshipSchema { kind: R::PartOf, sources: &[K::Product], targets: &[K::ProductPortfolio] },
    RelationshipSchema { kind: R::Serves, sources: &[K::Product], targets: &[K::MarketSegment] },
    RelationshipSchema { kind: R::Purchases, sources: &[K::Customer], targets: &[K::Product] },
    RelationshipSchema { kind: R::BelongsToSegment, sources: &[K::Customer], targets: &[K::MarketSegment] },
    RelationshipSchema { kind: R::Supplies, sources: &[K::Vendor], targets: &[K::Department, K::System] },
    RelationshipSchema { kind: R::ManagesVendor, sources: &[K::Department], targets: &[K::Vendor] },
    RelationshipSchema { kind: R::ContractedUnder, sources: &[K::Vendor], targets: &[K::Contract] },
    RelationshipSchema { kind: R::Covers, sources: &[K::Contract], targets: &[K::System, K::Product] },
    RelationshipSchema { kind: R::Sponsors, sources: &[K::Department], targets: &[K::Initiative] },
    RelationshipSchema { kind: R::Impacts, sources: &[K::Initiative], targets: &[K::System, K::Product, K::BusinessCapability, K::Risk] },
    RelationshipSchema { kind: R::Accesses, sources: &[K::Person, K::Vendor], targets: &[K::System, K::DataAsset] },
];

impl RelationshipKind {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            R::WorksIn => "works_in",
            R::Manages => "manages",
            R::HasRole => "has_role",
            R::ReportsTo => "reports_to",
            R::MemberOf => "member_of",
            R::ParentOf => "parent_of",
            R::LocatedAt => "located_at",
            R::BasedIn => "based_in",
            R::OperatesIn => "operates_in",
            R::Owns => "owns",
            R::DependsOn => "depends_on",
            R::RunsOn => "runs_on",
            R::HostedAt => "hosted_at",
            R::ConnectsTo => "connects_to",
            R::IntegratesWith => "integrates_with",
            R::Stores => "stores",
            R::Processes => "processes",
            R::FlowsTo => "flows_to",
            R::BelongsToDomain => "belongs_to_domain",
            R::StewardedBy => "stewarded_by",
            R::ResidesIn => "resides_in",
            R::Governs => "governs",
            R::Implements => "implements",
            R::Mitigates => "mitigates",
            R::Monitors => "monitors",
            R::Secures => "secures",
            R::SubjectTo => "subject_to",
            R::AppliesIn => "applies_in",
            R::Threatens => "threatens",
            R::Exploits => "exploits",
            R::Targets => "targets",
            R::AttributedTo => "attributed_to",
            R::Affects => "affects",
            R::IncidentAffects => "incident_affects",
            R::TriggeredBy => "triggered_by",
            R::Introduces => "introduces",
            R::AssignedTo => "assigned_to",
            R::Supports => "supports",
            R::Enables => "enables",
            R::Delivers => "delivers",
            R::Requires => "requires",
            R::PartOf => "part_of",
            R::Serves => "serves",
            R::Purchases => "purchases",
            R::BelongsToSegment => "belongs_to_segment",
            R::Supplies => "supplies",
            R::ManagesVendor => "manages_vendor",
            R::ContractedUnder => "contracted_under",
            R::Covers => "covers",
            R::Sponsors => "sponsors",
            R::Impacts => "impacts",
            R::Accesses => "accesses",
        }
    }

    /// All catalogued kinds, in table order.
    #[must_use]
    pub fn all() -> impl Iterator<Item = RelationshipKind> {
        RELATIONSHIP_SCHEMA.iter().map(|s| s.kind)
    }
}

impl std::fmt::Display for RelationshipKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for RelationshipKind {
    type Err = GraphError;

    fn from_str(s: &str) -> Result<Self> {
        RelationshipKind::all()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| GraphError::SchemaViolation(format!("unknown relationship type: {s}")))
    }
}

/// Look up the declared schema for a relationship kind.
#[must_use]
pub fn schema_for(kind: RelationshipKind) -> &'static RelationshipSchema {
    // The catalog covers every enum variant; the linear scan is over a
    // 52-entry const table.
    #[allow(clippy::unwrap_used)]
    RELATIONSHIP_SCHEMA.iter().find(|s| s.kind == kind).unwrap()
}

/// Reject endpoint kinds outside the declared domain/range.
pub fn validate_endpoints(
    kind: RelationshipKind,
    source: EntityKind,
    target: EntityKind,
) -> Result<()> {
    let schema = schema_for(kind);
    if !schema.sources.contains(&source) {
        return Err(GraphError::SchemaViolation(format!(
            "{kind}: source kind {source} not in declared domain"
        )));
    }
    if !schema.targets.contains(&target) {
        return Err(GraphError::SchemaViolation(format!(
            "{kind}: target kind {target} not in declared range"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_has_52_kinds_without_duplicates() {
        assert_eq!(RELATIONSHIP_SCHEMA.len(), 52);
        let mut seen = std::collections::BTreeSet::new();
        for schema in RELATIONSHIP_SCHEMA {
            assert!(seen.insert(schema.kind), "duplicate entry for {}", schema.kind);
        }
    }

    #[test]
    fn test_every_kind_has_nonempty_domain_and_range() {
        for schema in RELATIONSHIP_SCHEMA {
            assert!(!schema.sources.is_empty(), "{} has no sources", schema.kind);
            assert!(!schema.targets.is_empty(), "{} has no targets", schema.kind);
        }
    }

    #[test]
    fn test_as_str_parse_roundtrip() {
        for kind in RelationshipKind::all() {
            let parsed: RelationshipKind = kind.as_str().parse().unwrap();
            assert_eq!(parsed, kind);
        }
    }

    #[test]
    fn test_unknown_kind_is_schema_violation() {
        let err = "sends_memo".parse::<RelationshipKind>().unwrap_err();
        assert_eq!(err.kind(), "schema_violation");
    }

    #[test]
    fn test_governs_rejects_person_source() {
        assert!(validate_endpoints(
            RelationshipKind::Governs,
            EntityKind::Policy,
            EntityKind::System
        )
        .is_ok());
        assert!(validate_endpoints(
            RelationshipKind::Governs,
            EntityKind::Person,
            EntityKind::System
        )
        .is_err());
    }

    #[test]
    fn test_subject_to_domain_matches_spec() {
        for src in [
            EntityKind::System,
            EntityKind::Vendor,
            EntityKind::DataAsset,
            EntityKind::Product,
        ] {
            assert!(
                validate_endpoints(RelationshipKind::SubjectTo, src, EntityKind::Regulation)
                    .is_ok()
            );
        }
        assert!(validate_endpoints(
            RelationshipKind::SubjectTo,
            EntityKind::Person,
            EntityKind::Regulation
        )
        .is_err());
    }

    #[test]
    fn test_serde_names_match_as_str() {
        for kind in RelationshipKind::all() {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.as_str()));
        }
    }
}
