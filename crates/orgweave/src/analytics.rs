//! Security analytics built on top of the engine: per-entity risk
//! scoring and attack-path queries. Centrality and blast radius live on
//! the engine itself; this module composes them.

use serde::{Deserialize, Serialize};

use crate::engine::{Direction, GraphEngine};
use crate::error::Result;
use crate::model::{EntityBody, EntityKind, Severity};

/// Breakdown behind a composite risk score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskScore {
    pub entity_id: String,
    /// Composite score clamped to [0, 100].
    pub score: f64,
    pub connected_vulnerabilities: usize,
    pub critical_vulnerabilities: usize,
    pub degree: usize,
    pub internet_exposed_edges: usize,
}

/// Composite exposure score:
/// `10*v + 25*crit_v + 2*deg + 20*internet_edges`, clamped to [0, 100].
pub fn risk_score(engine: &dyn GraphEngine, entity_id: &str) -> Result<RiskScore> {
    let neighbors = engine.neighbors(entity_id, Direction::Both, None, None)?;
    let degree = engine
        .relationships_of(entity_id, Direction::Both, None)?
        .len();

    let mut connected_vulnerabilities = 0;
    let mut critical_vulnerabilities = 0;
    let mut internet_exposed_edges = 0;
    for neighbor in neighbors {
        match &neighbor.body {
            EntityBody::Vulnerability(body) => {
                connected_vulnerabilities += 1;
                if body.severity == Some(Severity::Critical) {
                    critical_vulnerabilities += 1;
                }
            }
            EntityBody::System(body) if body.internet_facing => internet_exposed_edges += 1,
            EntityBody::Network(body) if body.internet_facing => internet_exposed_edges += 1,
            _ => {}
        }
    }

    let raw = 10.0 * connected_vulnerabilities as f64
        + 25.0 * critical_vulnerabilities as f64
        + 2.0 * degree as f64
        + 20.0 * internet_exposed_edges as f64;

    Ok(RiskScore {
        entity_id: entity_id.to_string(),
        score: raw.clamp(0.0, 100.0),
        connected_vulnerabilities,
        critical_vulnerabilities,
        degree,
        internet_exposed_edges,
    })
}

/// Shortest path between two entities, or `None` when no route exists.
/// The multigraph is treated as undirected, consistent with blast-radius
/// reachability.
pub fn attack_path(
    engine: &dyn GraphEngine,
    source: &str,
    target: &str,
) -> Result<Option<Vec<String>>> {
    engine.shortest_path(source, target)
}

/// The entities with the highest composite risk, descending.
pub fn riskiest_entities(
    engine: &dyn GraphEngine,
    kind: Option<EntityKind>,
    top_n: usize,
) -> Result<Vec<RiskScore>> {
    let mut scores = Vec::new();
    for entity in engine.list_entities(kind, None) {
        scores.push(risk_score(engine, &entity.id)?);
    }
    scores.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
    scores.truncate(top_n);
    Ok(scores)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::engine::default_engine;
    use crate::model::{
        Entity, NetworkBody, Relationship, SystemBody, VulnerabilityBody,
    };
    use crate::schema::RelationshipKind;

    fn exposed_engine() -> Box<dyn GraphEngine> {
        let mut engine = default_engine();
        engine
            .add_entities_bulk(vec![
                Entity::new(
                    "Portal",
                    EntityBody::System(SystemBody {
                        internet_facing: true,
                        ..SystemBody::default()
                    }),
                )
                .with_id("portal"),
                Entity::new("Backend", EntityBody::System(SystemBody::default()))
                    .with_id("backend"),
                Entity::new(
                    "DMZ",
                    EntityBody::Network(NetworkBody {
                        internet_facing: true,
                        ..NetworkBody::default()
                    }),
                )
                .with_id("dmz"),
                Entity::new(
                    "CVE-2024-12345",
                    EntityBody::Vulnerability(VulnerabilityBody {
                        severity: Some(Severity::Critical),
                        ..VulnerabilityBody::default()
                    }),
                )
                .with_id("vuln-crit"),
                Entity::new(
                    "CVE-2024-22222",
                    EntityBody::Vulnerability(VulnerabilityBody {
                        severity: Some(Severity::Medium),
                        ..VulnerabilityBody::default()
                    }),
                )
                .with_id("vuln-med"),
            ])
            .unwrap();
        for (kind, src, tgt) in [
            (RelationshipKind::Affects, "vuln-crit", "backend"),
            (RelationshipKind::Affects, "vuln-med", "backend"),
            (RelationshipKind::DependsOn, "backend", "portal"),
            (RelationshipKind::RunsOn, "backend", "dmz"),
        ] {
            engine
                .add_relationship(Relationship::new(kind, src, tgt).with_weight(0.8))
                .unwrap();
        }
        engine
    }

    #[test]
    fn test_risk_score_components() {
        let engine = exposed_engine();
        let score = risk_score(engine.as_ref(), "backend").unwrap();
        assert_eq!(score.connected_vulnerabilities, 2);
        assert_eq!(score.critical_vulnerabilities, 1);
        assert_eq!(score.degree, 4);
        assert_eq!(score.internet_exposed_edges, 2);
        // 10*2 + 25*1 + 2*4 + 20*2 = 93.
        assert_eq!(score.score, 93.0);
    }

    #[test]
    fn test_risk_score_clamps_at_100() {
        let mut engine = exposed_engine();
        for i in 0..6 {
            let id = format!("extra-vuln-{i}");
            engine
                .add_entity(
                    Entity::new(
                        format!("CVE-2023-0000{i}"),
                        EntityBody::Vulnerability(VulnerabilityBody {
                            severity: Some(Severity::Critical),
                            ..VulnerabilityBody::default()
                        }),
                    )
                    .with_id(&id),
                )
                .unwrap();
            engine
                .add_relationship(Relationship::new(RelationshipKind::Affects, &id, "backend"))
                .unwrap();
        }
        let score = risk_score(engine.as_ref(), "backend").unwrap();
        assert_eq!(score.score, 100.0);
    }

    #[test]
    fn test_attack_path_exists() {
        let engine = exposed_engine();
        let path = attack_path(engine.as_ref(), "vuln-crit", "portal")
            .unwrap()
            .unwrap();
        assert_eq!(path.first().map(String::as_str), Some("vuln-crit"));
        assert_eq!(path.last().map(String::as_str), Some("portal"));
    }

    #[test]
    fn test_riskiest_entities_ordering() {
        let engine = exposed_engine();
        let ranked = riskiest_entities(engine.as_ref(), Some(EntityKind::System), 2).unwrap();
        assert_eq!(ranked[0].entity_id, "backend");
    }
}
