//! Canonical JSON round-trip, per-type shard split/merge, and the
//! write-only GraphML export.
//!
//! Canonical JSON is the durable format:
//! `{"entities": [...], "relationships": [...], "statistics": {...}}`.
//! Export then import reproduces the same entity and relationship sets
//! with ids, timestamps, mirror fields, and property maps intact. The
//! shard layout is the contract with the external sync tooling: one JSON
//! array per observed type under `entities/` and `relationships/`,
//! sorted by id for deterministic diffs.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::engine::{default_engine, GraphEngine, GraphStatistics};
use crate::error::{GraphError, Result};
use crate::model::{Entity, EntityKind, Relationship};
use crate::schema::RelationshipKind;

/// The canonical on-disk shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphDocument {
    pub entities: Vec<Entity>,
    pub relationships: Vec<Relationship>,
    #[serde(default)]
    pub statistics: GraphStatistics,
}

/// Snapshot the engine into an owned document.
#[must_use]
pub fn export_document(engine: &dyn GraphEngine) -> GraphDocument {
    GraphDocument {
        entities: engine.entities().into_iter().cloned().collect(),
        relationships: engine.relationships().into_iter().cloned().collect(),
        statistics: engine.statistics(),
    }
}

/// Canonical JSON text for an engine snapshot.
pub fn export_json(engine: &dyn GraphEngine) -> Result<String> {
    Ok(serde_json::to_string_pretty(&export_document(engine))?)
}

/// Populate a caller-provided (empty) engine from a document, running
/// the same schema and domain/range validation as the write tools.
///
/// In strict mode any entity that arrived with unknown fields (captured
/// in its `extra` bag during parsing) is rejected.
pub fn import_document_into(
    mut engine: Box<dyn GraphEngine>,
    document: GraphDocument,
    strict: bool,
) -> Result<Box<dyn GraphEngine>> {
    if strict {
        for entity in &document.entities {
            if !entity.extra.is_empty() {
                let keys: Vec<&str> = entity.extra.keys().map(String::as_str).collect();
                return Err(GraphError::Validation(format!(
                    "entity {} carries unknown fields: {}",
                    entity.id,
                    keys.join(", ")
                )));
            }
        }
    }
    engine.add_entities_bulk(document.entities)?;
    engine.add_relationships_bulk(document.relationships)?;
    Ok(engine)
}

/// [`import_document_into`] with the default in-memory backend.
pub fn import_document(document: GraphDocument, strict: bool) -> Result<Box<dyn GraphEngine>> {
    import_document_into(default_engine(), document, strict)
}

/// Parse canonical JSON without building an engine.
pub fn parse_document(text: &str) -> Result<GraphDocument> {
    serde_json::from_str(text)
        .map_err(|e| GraphError::Persistence(format!("canonical JSON parse: {e}")))
}

/// Parse canonical JSON text into a fresh engine.
pub fn import_json(text: &str, strict: bool) -> Result<Box<dyn GraphEngine>> {
    import_document(parse_document(text)?, strict)
}

/// Load a canonical graph file.
pub fn load_graph_file(path: &Path, strict: bool) -> Result<Box<dyn GraphEngine>> {
    let text = fs::read_to_string(path)
        .map_err(|e| GraphError::Persistence(format!("{}: {e}", path.display())))?;
    import_json(&text, strict)
}

/// Write canonical JSON to a file (non-atomic; the state service owns
/// the atomic persist path).
pub fn write_graph_file(engine: &dyn GraphEngine, path: &Path) -> Result<()> {
    fs::write(path, export_json(engine)?)
        .map_err(|e| GraphError::Persistence(format!("{}: {e}", path.display())))?;
    Ok(())
}

// -- per-type shards ----------------------------------------------------

/// Write one JSON array per observed type:
/// `<root>/entities/<entity_type>.json` and
/// `<root>/relationships/<relationship_type>.json`. Arrays are sorted by
/// id; absent types produce no file.
pub fn split_shards(engine: &dyn GraphEngine, root: &Path) -> Result<()> {
    let entity_dir = root.join("entities");
    let relationship_dir = root.join("relationships");
    fs::create_dir_all(&entity_dir)?;
    fs::create_dir_all(&relationship_dir)?;

    for kind in EntityKind::ALL {
        let mut shard: Vec<Entity> = engine
            .list_entities(Some(kind), None)
            .into_iter()
            .cloned()
            .collect();
        if shard.is_empty() {
            continue;
        }
        shard.sort_by(|a, b| a.id.cmp(&b.id));
        let path = entity_dir.join(format!("{}.json", kind.as_str()));
        fs::write(&path, serde_json::to_string_pretty(&shard)?)
            .map_err(|e| GraphError::Persistence(format!("{}: {e}", path.display())))?;
    }

    for kind in RelationshipKind::all() {
        let mut shard: Vec<Relationship> = engine
            .relationships()
            .into_iter()
            .filter(|r| r.kind == kind)
            .cloned()
            .collect();
        if shard.is_empty() {
            continue;
        }
        shard.sort_by(|a, b| a.id.cmp(&b.id));
        let path = relationship_dir.join(format!("{}.json", kind.as_str()));
        fs::write(&path, serde_json::to_string_pretty(&shard)?)
            .map_err(|e| GraphError::Persistence(format!("{}: {e}", path.display())))?;
    }
    Ok(())
}

fn read_shard_arrays<T: serde::de::DeserializeOwned>(dir: &Path) -> Result<Vec<T>> {
    let mut items = Vec::new();
    if !dir.exists() {
        return Ok(items);
    }
    let mut paths: Vec<_> = fs::read_dir(dir)?
        .filter_map(std::result::Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
        .collect();
    paths.sort();
    for path in paths {
        let text = fs::read_to_string(&path)
            .map_err(|e| GraphError::Persistence(format!("{}: {e}", path.display())))?;
        let mut shard: Vec<T> = serde_json::from_str(&text)
            .map_err(|e| GraphError::Persistence(format!("{}: {e}", path.display())))?;
        items.append(&mut shard);
    }
    Ok(items)
}

/// Merge rule for the shard repository: read every shard file,
/// concatenate the arrays, and import with full validation.
pub fn build_from_shards(root: &Path, strict: bool) -> Result<Box<dyn GraphEngine>> {
    let entities: Vec<Entity> = read_shard_arrays(&root.join("entities"))?;
    let relationships: Vec<Relationship> = read_shard_arrays(&root.join("relationships"))?;
    import_document(
        GraphDocument {
            entities,
            relationships,
            statistics: GraphStatistics::default(),
        },
        strict,
    )
}

// -- GraphML ------------------------------------------------------------

/// Write-only GraphML export for visualisers (NetworkX-compatible;
/// every attribute is string-coerced).
pub fn export_graphml(engine: &dyn GraphEngine) -> Result<String> {
    use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
    use quick_xml::Writer;

    fn scalar_attrs(value: &serde_json::Value) -> Vec<(String, String)> {
        let serde_json::Value::Object(map) = value else {
            return Vec::new();
        };
        map.iter()
            .filter(|(key, _)| *key != "id")
            .filter_map(|(key, value)| {
                let coerced = match value {
                    serde_json::Value::String(s) => s.clone(),
                    serde_json::Value::Null => return None,
                    other => other.to_string(),
                };
                Some((key.clone(), coerced))
            })
            .collect()
    }

    let entities = engine.entities();
    let relationships = engine.relationships();

    // GraphML wants every attribute declared up front.
    let mut node_keys: std::collections::BTreeSet<String> = std::collections::BTreeSet::new();
    let mut node_rows = Vec::with_capacity(entities.len());
    for entity in &entities {
        let value = serde_json::to_value(entity)?;
        let attrs = scalar_attrs(&value);
        for (key, _) in &attrs {
            node_keys.insert(key.clone());
        }
        node_rows.push((entity.id.clone(), attrs));
    }
    let mut edge_keys: std::collections::BTreeSet<String> = std::collections::BTreeSet::new();
    let mut edge_rows = Vec::with_capacity(relationships.len());
    for relationship in &relationships {
        let value = serde_json::to_value(relationship)?;
        let attrs: Vec<(String, String)> = scalar_attrs(&value)
            .into_iter()
            .filter(|(key, _)| key != "source_id" && key != "target_id")
            .collect();
        for (key, _) in &attrs {
            edge_keys.insert(key.clone());
        }
        edge_rows.push((
            relationship.source_id.clone(),
            relationship.target_id.clone(),
            attrs,
        ));
    }

    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    let xml = (|| -> std::result::Result<Vec<u8>, quick_xml::Error> {
        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
        let mut graphml = BytesStart::new("graphml");
        graphml.push_attribute(("xmlns", "http://graphml.graphdrawing.org/xmlns"));
        writer.write_event(Event::Start(graphml))?;

        for (scope, keys) in [("node", &node_keys), ("edge", &edge_keys)] {
            for key in keys {
                let mut decl = BytesStart::new("key");
                decl.push_attribute(("id", format!("{scope}_{key}").as_str()));
                decl.push_attribute(("for", scope));
                decl.push_attribute(("attr.name", key.as_str()));
                decl.push_attribute(("attr.type", "string"));
                writer.write_event(Event::Empty(decl))?;
            }
        }

        let mut graph = BytesStart::new("graph");
        graph.push_attribute(("id", "G"));
        graph.push_attribute(("edgedefault", "directed"));
        writer.write_event(Event::Start(graph))?;

        for (id, attrs) in &node_rows {
            let mut node = BytesStart::new("node");
            node.push_attribute(("id", id.as_str()));
            writer.write_event(Event::Start(node))?;
            for (key, value) in attrs {
                let mut data = BytesStart::new("data");
                data.push_attribute(("key", format!("node_{key}").as_str()));
                writer.write_event(Event::Start(data))?;
                writer.write_event(Event::Text(BytesText::new(value)))?;
                writer.write_event(Event::End(BytesEnd::new("data")))?;
            }
            writer.write_event(Event::End(BytesEnd::new("node")))?;
        }

        for (source, target, attrs) in &edge_rows {
            let mut edge = BytesStart::new("edge");
            edge.push_attribute(("source", source.as_str()));
            edge.push_attribute(("target", target.as_str()));
            writer.write_event(Event::Start(edge))?;
            for (key, value) in attrs {
                let mut data = BytesStart::new("data");
                data.push_attribute(("key", format!("edge_{key}").as_str()));
                writer.write_event(Event::Start(data))?;
                writer.write_event(Event::Text(BytesText::new(value)))?;
                writer.write_event(Event::End(BytesEnd::new("data")))?;
            }
            writer.write_event(Event::End(BytesEnd::new("edge")))?;
        }

        writer.write_event(Event::End(BytesEnd::new("graph")))?;
        writer.write_event(Event::End(BytesEnd::new("graphml")))?;
        Ok(writer.into_inner())
    })()
    .map_err(|e| GraphError::Persistence(format!("graphml: {e}")))?;

    String::from_utf8(xml).map_err(|e| GraphError::Persistence(format!("graphml: {e}")))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::model::{DataAssetBody, EntityBody, SystemBody};

    fn small_engine() -> Box<dyn GraphEngine> {
        let mut engine = default_engine();
        engine
            .add_entities_bulk(vec![
                Entity::new("Orders API", EntityBody::System(SystemBody::default()))
                    .with_id("sys-orders")
                    .with_description("Order intake service"),
                Entity::new("Ledger DB", EntityBody::System(SystemBody::default()))
                    .with_id("sys-ledger"),
                Entity::new(
                    "Customer Master",
                    EntityBody::DataAsset(DataAssetBody::default()),
                )
                .with_id("asset-cust"),
            ])
            .unwrap();
        engine
            .add_relationship(
                Relationship::new(RelationshipKind::DependsOn, "sys-orders", "sys-ledger")
                    .with_weight(0.8)
                    .with_property("dependency_type", serde_json::json!("data")),
            )
            .unwrap();
        engine
            .add_relationship(Relationship::new(
                RelationshipKind::Stores,
                "sys-ledger",
                "asset-cust",
            ))
            .unwrap();
        engine
    }

    #[test]
    fn test_canonical_roundtrip_preserves_everything() {
        let engine = small_engine();
        let json = export_json(engine.as_ref()).unwrap();
        let restored = import_json(&json, true).unwrap();

        let original = export_document(engine.as_ref());
        let roundtripped = export_document(restored.as_ref());
        assert_eq!(original.entities, roundtripped.entities);
        assert_eq!(original.relationships, roundtripped.relationships);
    }

    #[test]
    fn test_import_rejects_schema_violations() {
        let engine = small_engine();
        let mut document = export_document(engine.as_ref());
        // governs from a system source violates the catalog.
        document.relationships.push(Relationship::new(
            RelationshipKind::Governs,
            "sys-orders",
            "asset-cust",
        ));
        let err = match import_document(document, false) {
            Err(e) => e,
            Ok(_) => panic!("expected import to fail"),
        };
        assert_eq!(err.kind(), "batch_rejected");
    }

    #[test]
    fn test_strict_import_rejects_unknown_fields() {
        let json = serde_json::json!({
            "entities": [{
                "id": "sys-1",
                "name": "Thing",
                "entity_type": "system",
                "mystery_field": 7,
            }],
            "relationships": [],
        })
        .to_string();
        assert!(import_json(&json, false).is_ok());
        let err = match import_json(&json, true) {
            Err(e) => e,
            Ok(_) => panic!("expected import to fail"),
        };
        assert!(err.to_string().contains("mystery_field"));
    }

    #[test]
    fn test_shard_split_then_build_reproduces_graph() {
        let engine = small_engine();
        let dir = tempfile::tempdir().unwrap();
        split_shards(engine.as_ref(), dir.path()).unwrap();

        assert!(dir.path().join("entities/system.json").exists());
        assert!(dir.path().join("entities/data_asset.json").exists());
        assert!(dir.path().join("relationships/depends_on.json").exists());
        // Absent types produce no file.
        assert!(!dir.path().join("entities/person.json").exists());

        let rebuilt = build_from_shards(dir.path(), true).unwrap();
        let original = export_document(engine.as_ref());
        let merged = export_document(rebuilt.as_ref());
        let mut original_ids: Vec<&String> = original.entities.iter().map(|e| &e.id).collect();
        let mut merged_ids: Vec<&String> = merged.entities.iter().map(|e| &e.id).collect();
        original_ids.sort();
        merged_ids.sort();
        assert_eq!(original_ids, merged_ids);
        assert_eq!(original.relationships.len(), merged.relationships.len());
    }

    #[test]
    fn test_shard_arrays_are_sorted_by_id() {
        let engine = small_engine();
        let dir = tempfile::tempdir().unwrap();
        split_shards(engine.as_ref(), dir.path()).unwrap();
        let text = fs::read_to_string(dir.path().join("entities/system.json")).unwrap();
        let shard: Vec<Entity> = serde_json::from_str(&text).unwrap();
        let ids: Vec<&String> = shard.iter().map(|e| &e.id).collect();
        let mut sorted = ids.clone();
        sorted.sort();
        assert_eq!(ids, sorted);
    }

    #[test]
    fn test_graphml_is_wellformed_and_string_coerced() {
        let engine = small_engine();
        let xml = export_graphml(engine.as_ref()).unwrap();
        assert!(xml.starts_with("<?xml"));
        assert!(xml.contains("graphml"));
        assert!(xml.contains("sys-orders"));
        // Numeric weight appears as text content, not a float attribute.
        assert!(xml.contains("0.8"));
    }
}
