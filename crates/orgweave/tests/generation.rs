//! End-to-end pipeline tests: scale expectations, determinism, and the
//! universal graph invariants over fully generated organisations.

#![allow(clippy::unwrap_used)]

use std::collections::HashSet;

use orgweave::engine::Direction;
use orgweave::generate::{GenerationOutcome, Orchestrator};
use orgweave::model::{inherent_risk, round2, EntityBody, EntityKind};
use orgweave::scaling::{Industry, OrgProfile};
use orgweave::schema::validate_endpoints;

fn generate(employees: u32, seed: u64) -> GenerationOutcome {
    let profile =
        OrgProfile::new("Invariant Test Corp", Industry::Technology, employees).with_seed(seed);
    Orchestrator::new().generate(profile).unwrap()
}

#[test]
fn test_small_org_scale_and_quality() {
    let outcome = generate(100, 42);
    let stats = outcome.engine.statistics();
    assert!(
        (250..=360).contains(&stats.entity_count),
        "entity count {} outside expected band",
        stats.entity_count
    );
    assert!(
        (550..=1000).contains(&stats.relationship_count),
        "relationship count {} outside expected band",
        stats.relationship_count
    );
    assert!(
        outcome.quality.overall >= 0.95,
        "quality {} below bar",
        outcome.quality.overall
    );
}

#[test]
fn test_same_seed_reproduces_ids() {
    let a = generate(100, 42);
    let b = generate(100, 42);
    let ids_a: Vec<String> = a.engine.entities().iter().map(|e| e.id.clone()).collect();
    let ids_b: Vec<String> = b.engine.entities().iter().map(|e| e.id.clone()).collect();
    assert_eq!(ids_a, ids_b);
    let rels_a: Vec<String> = a
        .engine
        .relationships()
        .iter()
        .map(|r| r.id.clone())
        .collect();
    let rels_b: Vec<String> = b
        .engine
        .relationships()
        .iter()
        .map(|r| r.id.clone())
        .collect();
    assert_eq!(rels_a, rels_b);
}

#[test]
fn test_different_seed_differs() {
    let a = generate(100, 42);
    let b = generate(100, 43);
    let ids_a: Vec<String> = a.engine.entities().iter().map(|e| e.id.clone()).collect();
    let ids_b: Vec<String> = b.engine.entities().iter().map(|e| e.id.clone()).collect();
    assert_ne!(ids_a, ids_b);
}

#[test]
fn test_universal_invariants_hold() {
    let outcome = generate(1000, 7);
    let entities = outcome.engine.entities();
    let relationships = outcome.engine.relationships();

    // Id uniqueness.
    let entity_ids: HashSet<&String> = entities.iter().map(|e| &e.id).collect();
    assert_eq!(entity_ids.len(), entities.len());
    let relationship_ids: HashSet<&String> = relationships.iter().map(|r| &r.id).collect();
    assert_eq!(relationship_ids.len(), relationships.len());

    for relationship in &relationships {
        // Referential integrity.
        assert!(entity_ids.contains(&relationship.source_id));
        assert!(entity_ids.contains(&relationship.target_id));
        // Schema conformance against the shared catalog.
        let source = outcome.engine.get_entity(&relationship.source_id).unwrap();
        let target = outcome.engine.get_entity(&relationship.target_id).unwrap();
        validate_endpoints(relationship.kind, source.kind(), target.kind()).unwrap();
        // Metadata range, two-decimal rounded.
        assert!((0.0..=1.0).contains(&relationship.weight));
        assert!((0.0..=1.0).contains(&relationship.confidence));
        assert_eq!(relationship.weight, round2(relationship.weight));
        assert_eq!(relationship.confidence, round2(relationship.confidence));
        // Temporal.
        assert!(relationship.updated_at >= relationship.created_at);
    }

    for entity in &entities {
        assert!(entity.updated_at >= entity.created_at);
        assert!(entity.version >= 1);
        if let EntityBody::Risk(body) = &entity.body {
            assert_eq!(body.inherent_level, inherent_risk(body.likelihood, body.impact));
            assert!(body.residual_level <= body.inherent_level);
        }
        if let EntityBody::DataFlow(body) = &entity.body {
            if body.classification.is_some_and(|c| c.requires_encryption()) {
                assert!(body.encryption_in_transit);
            }
        }
    }
}

#[test]
fn test_department_subdivision_at_14k() {
    let outcome = generate(14_000, 42);
    let departments = outcome
        .engine
        .list_entities(Some(EntityKind::Department), None);

    let engineering = departments
        .iter()
        .find(|d| d.name == "Engineering")
        .expect("engineering root exists");
    let engineering_body = match &engineering.body {
        EntityBody::Department(body) => body,
        _ => unreachable!(),
    };
    assert!(engineering_body.parent_department_id.is_none());

    let children: Vec<_> = departments
        .iter()
        .filter(|d| match &d.body {
            EntityBody::Department(body) => {
                body.parent_department_id.as_deref() == Some(engineering.id.as_str())
            }
            _ => false,
        })
        .collect();
    assert!(
        children.len() >= 5,
        "expected at least 5 engineering sub-departments, got {}",
        children.len()
    );

    // Each sub-department grew at least one Senior or Staff role.
    let roles = outcome.engine.list_entities(Some(EntityKind::Role), None);
    for child in &children {
        let suffix = format!("- {}", child.name);
        assert!(
            roles.iter().any(|r| {
                (r.name.starts_with("Senior ") || r.name.starts_with("Staff "))
                    && r.name.ends_with(&suffix)
            }),
            "no senior/staff role for {}",
            child.name
        );
    }
}

#[test]
fn test_people_carry_mirror_fields() {
    let outcome = generate(400, 11);
    let people = outcome.engine.list_entities(Some(EntityKind::Person), None);
    assert!(!people.is_empty());
    for person in people {
        let EntityBody::Person(body) = &person.body else {
            unreachable!()
        };
        // The weaver assigned a role and a location to every person and
        // mirrored them onto the entity.
        assert!(!body.holds_roles.is_empty(), "{} has no role", person.name);
        assert!(body.located_at.is_some(), "{} has no location", person.name);
        let role_edges = outcome
            .engine
            .relationships_of(
                &person.id,
                Direction::Out,
                Some(orgweave::RelationshipKind::HasRole),
            )
            .unwrap();
        assert_eq!(role_edges.len(), body.holds_roles.len());
    }
}

#[test]
fn test_remove_entity_cascade_after_generation() {
    let outcome = generate(100, 42);
    let mut engine = outcome.engine;
    let victim = engine.list_entities(Some(EntityKind::System), None)[0]
        .id
        .clone();
    assert!(engine.remove_entity(&victim).unwrap());
    for relationship in engine.relationships() {
        assert_ne!(relationship.source_id, victim);
        assert_ne!(relationship.target_id, victim);
    }
}

#[test]
fn test_override_changes_one_kind_only() {
    let profile = OrgProfile::new("Override Corp", Industry::Technology, 1000)
        .with_seed(42)
        .with_override(EntityKind::Customer, 10);
    let outcome = Orchestrator::new().generate(profile).unwrap();
    assert_eq!(
        outcome
            .engine
            .list_entities(Some(EntityKind::Customer), None)
            .len(),
        10
    );
}
