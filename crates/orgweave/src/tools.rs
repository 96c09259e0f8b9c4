//! Tool dispatcher: the fixed registry of thirteen tools shared by the
//! ATP pipe and the REST adapter.
//!
//! Every invocation walks the same stages: resolve the tool, require a
//! loaded graph, validate arguments, execute, compact-serialise the
//! result. Write tools validate every field before any mutation; batches
//! are all-or-nothing with a per-item error report, and a successful
//! write ends with a single persist of the loaded path.

use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::analytics;
use crate::engine::{Direction, GraphEngine};
use crate::error::{GraphError, Result};
use crate::model::{is_valid_id, Entity, EntityKind, Relationship};
use crate::schema::RelationshipKind;
use crate::search;
use crate::state::GraphState;

/// Largest accepted relationship batch.
pub const MAX_BATCH: usize = 500;

/// Registry entry: name, human description, argument schema, and the
/// read/write classification the transports use for locking and routing.
#[derive(Debug, Clone, Serialize)]
pub struct ToolSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub read_only: bool,
    pub parameters: Value,
}

fn schema_of<T: JsonSchema>() -> Value {
    serde_json::to_value(schemars::schema_for!(T)).unwrap_or_else(|_| json!({"type": "object"}))
}

/// The thirteen tools, in registry order.
#[must_use]
pub fn tool_specs() -> Vec<ToolSpec> {
    vec![
        ToolSpec {
            name: "load_graph",
            description: "Load a canonical graph JSON file and serve it",
            read_only: false,
            parameters: schema_of::<LoadGraphArgs>(),
        },
        ToolSpec {
            name: "get_statistics",
            description: "Counts by type, density, and weak connectivity",
            read_only: true,
            parameters: schema_of::<EmptyArgs>(),
        },
        ToolSpec {
            name: "list_entities",
            description: "List entities, optionally filtered by type",
            read_only: true,
            parameters: schema_of::<ListEntitiesArgs>(),
        },
        ToolSpec {
            name: "get_entity",
            description: "Fetch one entity by id (falls back to exact name match)",
            read_only: true,
            parameters: schema_of::<GetEntityArgs>(),
        },
        ToolSpec {
            name: "get_neighbors",
            description: "Adjacent entities with direction and type filters",
            read_only: true,
            parameters: schema_of::<GetNeighborsArgs>(),
        },
        ToolSpec {
            name: "find_shortest_path",
            description: "Shortest undirected path between two entities",
            read_only: true,
            parameters: schema_of::<FindShortestPathArgs>(),
        },
        ToolSpec {
            name: "get_blast_radius",
            description: "Entities reachable within N hops, grouped by depth",
            read_only: true,
            parameters: schema_of::<GetBlastRadiusArgs>(),
        },
        ToolSpec {
            name: "compute_centrality",
            description: "Degree, betweenness, or pagerank centrality",
            read_only: true,
            parameters: schema_of::<ComputeCentralityArgs>(),
        },
        ToolSpec {
            name: "find_most_connected",
            description: "Entities ranked by raw degree",
            read_only: true,
            parameters: schema_of::<FindMostConnectedArgs>(),
        },
        ToolSpec {
            name: "search_entities",
            description: "Fuzzy search over entity names",
            read_only: true,
            parameters: schema_of::<SearchEntitiesArgs>(),
        },
        ToolSpec {
            name: "add_relationship_tool",
            description: "Validate and add one relationship, then persist",
            read_only: false,
            parameters: schema_of::<AddRelationshipArgs>(),
        },
        ToolSpec {
            name: "add_relationships_batch",
            description: "All-or-nothing batch of relationships (max 500)",
            read_only: false,
            parameters: schema_of::<AddRelationshipsBatchArgs>(),
        },
        ToolSpec {
            name: "remove_relationship_tool",
            description: "Remove one relationship by id, then persist",
            read_only: false,
            parameters: schema_of::<RemoveRelationshipArgs>(),
        },
    ]
}

/// Whether a registered tool only reads graph state.
pub fn is_read_only(tool: &str) -> Option<bool> {
    tool_specs()
        .iter()
        .find(|spec| spec.name == tool)
        .map(|spec| spec.read_only)
}

// -- argument types ------------------------------------------------------

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct EmptyArgs {}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct LoadGraphArgs {
    /// Path to a canonical graph JSON file.
    pub path: String,
}

fn default_list_limit() -> usize {
    50
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct ListEntitiesArgs {
    /// Entity type filter (lowercase catalog name).
    #[serde(default, rename = "type")]
    pub entity_type: Option<String>,
    #[serde(default = "default_list_limit")]
    pub limit: usize,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct GetEntityArgs {
    pub id: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct GetNeighborsArgs {
    pub id: String,
    /// One of `in`, `out`, `both` (default `both`).
    #[serde(default)]
    pub direction: Option<String>,
    #[serde(default)]
    pub relationship_type: Option<String>,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct FindShortestPathArgs {
    pub source_id: String,
    pub target_id: String,
}

fn default_blast_depth() -> usize {
    3
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct GetBlastRadiusArgs {
    pub id: String,
    #[serde(default = "default_blast_depth")]
    pub max_depth: usize,
}

fn default_centrality_top_n() -> usize {
    20
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct ComputeCentralityArgs {
    /// One of `degree`, `betweenness`, `pagerank`.
    pub metric: String,
    #[serde(default = "default_centrality_top_n")]
    pub top_n: usize,
}

fn default_most_connected_top_n() -> usize {
    10
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct FindMostConnectedArgs {
    #[serde(default = "default_most_connected_top_n")]
    pub top_n: usize,
}

fn default_search_limit() -> usize {
    10
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct SearchEntitiesArgs {
    pub query: String,
    #[serde(default, rename = "type")]
    pub entity_type: Option<String>,
    #[serde(default = "default_search_limit")]
    pub limit: usize,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct AddRelationshipArgs {
    pub relationship_type: String,
    pub source_id: String,
    pub target_id: String,
    #[serde(default)]
    pub weight: Option<f64>,
    #[serde(default)]
    pub confidence: Option<f64>,
    #[serde(default)]
    pub properties: Option<BTreeMap<String, Value>>,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct AddRelationshipsBatchArgs {
    pub relationships: Vec<AddRelationshipArgs>,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct RemoveRelationshipArgs {
    pub id: String,
}

// -- compact serialisation ----------------------------------------------

/// Fields the compact transform always strips.
const COMPACT_STRIPPED: &[&str] = &[
    "created_at",
    "updated_at",
    "valid_from",
    "valid_until",
    "version",
    "metadata",
];

fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        _ => false,
    }
}

/// Response-shaping transform: drop internal/temporal fields and every
/// null, empty-string, or empty-collection value. Exports keep full
/// fidelity; only tool responses go through this.
#[must_use]
pub fn compact(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let compacted: serde_json::Map<String, Value> = map
                .into_iter()
                .filter(|(key, _)| !COMPACT_STRIPPED.contains(&key.as_str()))
                .filter(|(_, value)| !is_empty_value(value))
                .collect();
            Value::Object(compacted)
        }
        other => other,
    }
}

fn compact_entity(entity: &Entity) -> Result<Value> {
    Ok(compact(serde_json::to_value(entity)?))
}

// -- argument helpers ----------------------------------------------------

fn parse_args<T: serde::de::DeserializeOwned>(arguments: &Value) -> Result<T> {
    serde_json::from_value(arguments.clone())
        .map_err(|e| GraphError::Validation(format!("invalid arguments: {e}")))
}

fn require_id(label: &str, id: &str) -> Result<()> {
    if is_valid_id(id) {
        Ok(())
    } else {
        Err(GraphError::Validation(format!("invalid {label} format")))
    }
}

fn parse_kind(value: &Option<String>) -> Result<Option<EntityKind>> {
    value.as_deref().map(str::parse).transpose()
}

fn parse_direction(value: &Option<String>) -> Result<Direction> {
    value
        .as_deref()
        .map_or(Ok(Direction::Both), str::parse)
}

fn metric_in_unit_interval(label: &str, value: Option<f64>) -> Result<()> {
    if let Some(v) = value {
        if !(0.0..=1.0).contains(&v) {
            return Err(GraphError::Validation(format!(
                "{label} {v} outside [0, 1]"
            )));
        }
    }
    Ok(())
}

/// Build and pre-validate a relationship from tool arguments. Every
/// check runs before the engine sees anything.
fn relationship_from_args(
    engine: &dyn GraphEngine,
    args: &AddRelationshipArgs,
) -> Result<Relationship> {
    let kind: RelationshipKind = args.relationship_type.parse()?;
    require_id("source_id", &args.source_id)?;
    require_id("target_id", &args.target_id)?;
    metric_in_unit_interval("weight", args.weight)?;
    metric_in_unit_interval("confidence", args.confidence)?;
    let source = engine.get_entity(&args.source_id)?;
    let target = engine.get_entity(&args.target_id)?;
    crate::schema::validate_endpoints(kind, source.kind(), target.kind())?;

    let mut relationship = Relationship::new(kind, &args.source_id, &args.target_id);
    if let Some(weight) = args.weight {
        relationship = relationship.with_weight(weight);
    }
    if let Some(confidence) = args.confidence {
        relationship = relationship.with_confidence(confidence);
    }
    if let Some(properties) = &args.properties {
        relationship.properties = properties.clone();
    }
    Ok(relationship)
}

fn relationship_reply(relationship: &Relationship) -> Value {
    json!({
        "id": relationship.id,
        "relationship_type": relationship.kind.as_str(),
        "source_id": relationship.source_id,
        "target_id": relationship.target_id,
        "weight": relationship.weight,
        "confidence": relationship.confidence,
    })
}

// -- dispatch ------------------------------------------------------------

/// Execute one tool call against the shared state.
///
/// Stage order per invocation: resolve tool, require graph, validate
/// arguments, execute, compact-serialise. Any stage failure becomes an
/// error reply; the dispatcher itself never panics across this boundary.
pub fn dispatch(state: &GraphState, tool: &str, arguments: &Value) -> Result<Value> {
    match tool {
        "load_graph" => {
            let args: LoadGraphArgs = parse_args(arguments)?;
            let (entity_count, relationship_count) =
                state.load(std::path::Path::new(&args.path))?;
            Ok(json!({
                "entity_count": entity_count,
                "relationship_count": relationship_count,
                "path": args.path,
            }))
        }
        "get_statistics" => state.with_graph(|engine| {
            Ok(serde_json::to_value(engine.statistics())?)
        }),
        "list_entities" => {
            let args: ListEntitiesArgs = parse_args(arguments)?;
            let kind = parse_kind(&args.entity_type)?;
            state.with_graph(|engine| {
                engine
                    .list_entities(kind, Some(args.limit))
                    .into_iter()
                    .map(compact_entity)
                    .collect::<Result<Vec<Value>>>()
                    .map(Value::Array)
            })
        }
        "get_entity" => {
            let args: GetEntityArgs = parse_args(arguments)?;
            state.with_graph(|engine| {
                match engine.get_entity(&args.id) {
                    Ok(entity) => compact_entity(entity),
                    // Agents frequently hold a name, not an id.
                    Err(GraphError::NotFound(_)) => {
                        let by_name = engine
                            .entities()
                            .into_iter()
                            .find(|e| e.name == args.id)
                            .ok_or_else(|| GraphError::NotFound(format!("entity {}", args.id)))?;
                        compact_entity(by_name)
                    }
                    Err(err) => Err(err),
                }
            })
        }
        "get_neighbors" => {
            let args: GetNeighborsArgs = parse_args(arguments)?;
            require_id("id", &args.id)?;
            let direction = parse_direction(&args.direction)?;
            let relationship_kind: Option<RelationshipKind> =
                args.relationship_type.as_deref().map(str::parse).transpose()?;
            state.with_graph(|engine| {
                engine
                    .neighbors(&args.id, direction, relationship_kind, None)?
                    .into_iter()
                    .map(compact_entity)
                    .collect::<Result<Vec<Value>>>()
                    .map(Value::Array)
            })
        }
        "find_shortest_path" => {
            let args: FindShortestPathArgs = parse_args(arguments)?;
            require_id("source_id", &args.source_id)?;
            require_id("target_id", &args.target_id)?;
            state.with_graph(|engine| {
                // Bare id array; null when no route exists.
                let path = analytics::attack_path(engine, &args.source_id, &args.target_id)?;
                Ok(serde_json::to_value(path)?)
            })
        }
        "get_blast_radius" => {
            let args: GetBlastRadiusArgs = parse_args(arguments)?;
            require_id("id", &args.id)?;
            state.with_graph(|engine| {
                let layers = engine.blast_radius(&args.id, args.max_depth)?;
                let mut reply = serde_json::Map::new();
                for (depth, ids) in layers {
                    let entities: Vec<Value> = ids
                        .iter()
                        .filter_map(|id| engine.get_entity(id).ok())
                        .map(compact_entity)
                        .collect::<Result<Vec<Value>>>()?;
                    reply.insert(depth.to_string(), Value::Array(entities));
                }
                Ok(Value::Object(reply))
            })
        }
        "compute_centrality" => {
            let args: ComputeCentralityArgs = parse_args(arguments)?;
            state.with_graph(|engine| {
                let scores = match args.metric.as_str() {
                    "degree" => engine.degree_centrality(),
                    "betweenness" => engine.betweenness_centrality()?,
                    "pagerank" => engine.pagerank()?,
                    other => {
                        return Err(GraphError::Validation(format!(
                            "unknown centrality metric: {other}"
                        )))
                    }
                };
                // Insertion order breaks score ties.
                let mut ranked: Vec<(String, String, f64)> = engine
                    .entities()
                    .into_iter()
                    .filter_map(|e| {
                        scores
                            .get(&e.id)
                            .map(|score| (e.id.clone(), e.name.clone(), *score))
                    })
                    .collect();
                ranked.sort_by(|a, b| {
                    b.2.partial_cmp(&a.2).unwrap_or(std::cmp::Ordering::Equal)
                });
                ranked.truncate(args.top_n);
                Ok(Value::Array(
                    ranked
                        .into_iter()
                        .map(|(id, name, score)| {
                            json!({"id": id, "name": name, "score": score})
                        })
                        .collect(),
                ))
            })
        }
        "find_most_connected" => {
            let args: FindMostConnectedArgs = parse_args(arguments)?;
            state.with_graph(|engine| {
                Ok(Value::Array(
                    engine
                        .most_connected(args.top_n)
                        .into_iter()
                        .filter_map(|(id, degree)| {
                            engine.get_entity(&id).ok().map(|e| {
                                json!({"id": id, "name": e.name, "degree": degree})
                            })
                        })
                        .collect(),
                ))
            })
        }
        "search_entities" => {
            let args: SearchEntitiesArgs = parse_args(arguments)?;
            let kind = parse_kind(&args.entity_type)?;
            state.with_graph(|engine| {
                let hits = search::search_entities(engine, &args.query, kind, args.limit);
                Ok(serde_json::to_value(hits)?)
            })
        }
        "add_relationship_tool" => {
            let args: AddRelationshipArgs = parse_args(arguments)?;
            state.with_graph_mut(|engine| {
                let relationship = relationship_from_args(engine, &args)?;
                let reply = relationship_reply(&relationship);
                engine.add_relationship(relationship)?;
                Ok(reply)
            })
        }
        "add_relationships_batch" => {
            let args: AddRelationshipsBatchArgs = parse_args(arguments)?;
            if args.relationships.is_empty() {
                return Err(GraphError::Validation("empty batch".to_string()));
            }
            if args.relationships.len() > MAX_BATCH {
                return Err(GraphError::Validation(format!(
                    "batch of {} exceeds the maximum of {MAX_BATCH}",
                    args.relationships.len()
                )));
            }
            state.with_graph_mut(|engine| {
                // Build phase collects per-item failures instead of
                // stopping at the first, so the whole batch is reported.
                let mut built = Vec::with_capacity(args.relationships.len());
                let mut errors = Vec::new();
                for (index, item) in args.relationships.iter().enumerate() {
                    match relationship_from_args(engine, item) {
                        Ok(relationship) => built.push(relationship),
                        Err(err) => errors.push(crate::error::BatchItemError {
                            index,
                            kind: err.kind().to_string(),
                            message: err.to_string(),
                        }),
                    }
                }
                if !errors.is_empty() {
                    return Err(GraphError::BatchRejected { errors });
                }
                let ids = engine.add_relationships_bulk(built)?;
                Ok(json!({ "added": ids.len(), "ids": ids }))
            })
        }
        "remove_relationship_tool" => {
            let args: RemoveRelationshipArgs = parse_args(arguments)?;
            require_id("id", &args.id)?;
            state.with_graph_mut(|engine| {
                let removed = engine.remove_relationship(&args.id)?;
                if !removed {
                    return Err(GraphError::NotFound(format!("relationship {}", args.id)));
                }
                Ok(json!({ "removed": args.id }))
            })
        }
        other => Err(GraphError::Validation(format!("unknown tool: {other}"))),
    }
}

/// Tool definitions in OpenAI function-calling shape, for agent clients
/// that speak that dialect.
#[must_use]
pub fn openai_tool_definitions() -> Value {
    Value::Array(
        tool_specs()
            .into_iter()
            .map(|spec| {
                json!({
                    "type": "function",
                    "function": {
                        "name": spec.name,
                        "description": spec.description,
                        "parameters": spec.parameters,
                    }
                })
            })
            .collect(),
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::engine::default_engine;
    use crate::model::{DataAssetBody, EntityBody, PersonBody, PolicyBody, SystemBody};

    fn loaded_state() -> GraphState {
        let mut engine = default_engine();
        engine
            .add_entities_bulk(vec![
                Entity::new("Orders API", EntityBody::System(SystemBody::default()))
                    .with_id("sys-1"),
                Entity::new("Ledger DB", EntityBody::System(SystemBody::default()))
                    .with_id("sys-2"),
                Entity::new("Customer Master", EntityBody::DataAsset(DataAssetBody::default()))
                    .with_id("asset-1"),
                Entity::new("Ada Lovelace", EntityBody::Person(PersonBody::default()))
                    .with_id("person-1"),
                Entity::new("Access Policy", EntityBody::Policy(PolicyBody::default()))
                    .with_id("policy-1"),
            ])
            .unwrap();
        engine
            .add_relationship(Relationship::new(
                RelationshipKind::DependsOn,
                "sys-1",
                "sys-2",
            ))
            .unwrap();
        engine
            .add_relationship(Relationship::new(
                RelationshipKind::Stores,
                "sys-2",
                "asset-1",
            ))
            .unwrap();
        let state = GraphState::new(false);
        state.adopt(engine, None);
        state
    }

    #[test]
    fn test_registry_has_thirteen_tools() {
        let specs = tool_specs();
        assert_eq!(specs.len(), 13);
        assert_eq!(specs.iter().filter(|s| s.read_only).count(), 10);
        assert_eq!(is_read_only("get_statistics"), Some(true));
        assert_eq!(is_read_only("add_relationship_tool"), Some(false));
        assert_eq!(is_read_only("no_such_tool"), None);
    }

    #[test]
    fn test_no_graph_loaded() {
        let state = GraphState::new(false);
        let err = dispatch(&state, "get_statistics", &json!({})).unwrap_err();
        assert_eq!(err.kind(), "no_graph_loaded");
    }

    #[test]
    fn test_unknown_tool() {
        let state = loaded_state();
        let err = dispatch(&state, "drop_table", &json!({})).unwrap_err();
        assert_eq!(err.kind(), "validation");
    }

    #[test]
    fn test_statistics_and_list() {
        let state = loaded_state();
        let stats = dispatch(&state, "get_statistics", &json!({})).unwrap();
        assert_eq!(stats["entity_count"], 5);
        let systems =
            dispatch(&state, "list_entities", &json!({"type": "system"})).unwrap();
        assert_eq!(systems.as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_compact_strips_internal_fields() {
        let state = loaded_state();
        let entity = dispatch(&state, "get_entity", &json!({"id": "sys-1"})).unwrap();
        for stripped in COMPACT_STRIPPED {
            assert!(
                entity.get(*stripped).is_none(),
                "compact output leaked {stripped}"
            );
        }
        assert_eq!(entity["id"], "sys-1");
        assert_eq!(entity["entity_type"], "system");
        // Empty description was dropped too.
        assert!(entity.get("description").is_none());
    }

    #[test]
    fn test_get_entity_falls_back_to_name() {
        let state = loaded_state();
        let entity =
            dispatch(&state, "get_entity", &json!({"id": "Ledger DB"})).unwrap();
        assert_eq!(entity["id"], "sys-2");
    }

    #[test]
    fn test_schema_violation_rejected_without_mutation() {
        let state = loaded_state();
        let before = dispatch(&state, "get_statistics", &json!({})).unwrap();
        let err = dispatch(
            &state,
            "add_relationship_tool",
            &json!({
                "relationship_type": "governs",
                "source_id": "person-1",
                "target_id": "sys-1",
            }),
        )
        .unwrap_err();
        assert_eq!(err.kind(), "schema_violation");
        let after = dispatch(&state, "get_statistics", &json!({})).unwrap();
        assert_eq!(before, after);
    }

    #[test]
    fn test_add_relationship_success() {
        let state = loaded_state();
        let reply = dispatch(
            &state,
            "add_relationship_tool",
            &json!({
                "relationship_type": "governs",
                "source_id": "policy-1",
                "target_id": "sys-1",
                "weight": 0.75,
                "properties": {"enforcement": "mandatory"},
            }),
        )
        .unwrap();
        assert_eq!(reply["relationship_type"], "governs");
        assert_eq!(reply["weight"], 0.75);
        let stats = dispatch(&state, "get_statistics", &json!({})).unwrap();
        assert_eq!(stats["relationship_count"], 3);
    }

    #[test]
    fn test_out_of_range_weight_is_rejected_not_clamped() {
        let state = loaded_state();
        let err = dispatch(
            &state,
            "add_relationship_tool",
            &json!({
                "relationship_type": "depends_on",
                "source_id": "sys-1",
                "target_id": "sys-2",
                "weight": 1.4,
            }),
        )
        .unwrap_err();
        assert_eq!(err.kind(), "validation");
    }

    #[test]
    fn test_batch_atomicity_with_item_report() {
        let state = loaded_state();
        let before = dispatch(&state, "get_statistics", &json!({})).unwrap();
        let err = dispatch(
            &state,
            "add_relationships_batch",
            &json!({"relationships": [
                {"relationship_type": "depends_on", "source_id": "sys-2", "target_id": "sys-1"},
                {"relationship_type": "depends_on", "source_id": "sys-1", "target_id": "ghost"},
                {"relationship_type": "stores", "source_id": "sys-1", "target_id": "asset-1"},
            ]}),
        )
        .unwrap_err();
        match err {
            GraphError::BatchRejected { errors } => {
                assert_eq!(errors.len(), 1);
                assert_eq!(errors[0].index, 1);
            }
            other => panic!("expected BatchRejected, got {other:?}"),
        }
        let after = dispatch(&state, "get_statistics", &json!({})).unwrap();
        assert_eq!(before, after);
    }

    #[test]
    fn test_batch_size_cap() {
        let state = loaded_state();
        let items: Vec<Value> = (0..501)
            .map(|_| {
                json!({"relationship_type": "depends_on", "source_id": "sys-1", "target_id": "sys-2"})
            })
            .collect();
        let err = dispatch(
            &state,
            "add_relationships_batch",
            &json!({"relationships": items}),
        )
        .unwrap_err();
        assert_eq!(err.kind(), "validation");
    }

    #[test]
    fn test_remove_relationship() {
        let state = loaded_state();
        let rel_id = state
            .with_graph(|engine| Ok(engine.relationships()[0].id.clone()))
            .unwrap();
        let reply = dispatch(
            &state,
            "remove_relationship_tool",
            &json!({"id": rel_id}),
        )
        .unwrap();
        assert_eq!(reply["removed"], rel_id.as_str());
        let err = dispatch(
            &state,
            "remove_relationship_tool",
            &json!({"id": rel_id}),
        )
        .unwrap_err();
        assert_eq!(err.kind(), "not_found");
    }

    #[test]
    fn test_shortest_path_is_bare_array_or_null() {
        let state = loaded_state();
        let path = dispatch(
            &state,
            "find_shortest_path",
            &json!({"source_id": "sys-1", "target_id": "asset-1"}),
        )
        .unwrap();
        assert_eq!(
            path.as_array().unwrap(),
            &[json!("sys-1"), json!("sys-2"), json!("asset-1")]
        );
        // No route between disconnected entities: nothing, not a wrapper.
        let none = dispatch(
            &state,
            "find_shortest_path",
            &json!({"source_id": "sys-1", "target_id": "person-1"}),
        )
        .unwrap();
        assert!(none.is_null());
    }

    #[test]
    fn test_blast_radius_shape() {
        let state = loaded_state();
        let radius = dispatch(
            &state,
            "get_blast_radius",
            &json!({"id": "sys-1", "max_depth": 2}),
        )
        .unwrap();
        assert_eq!(radius["0"][0]["id"], "sys-1");
        assert_eq!(radius["1"][0]["id"], "sys-2");
        assert_eq!(radius["2"][0]["id"], "asset-1");
    }

    #[test]
    fn test_centrality_and_most_connected() {
        let state = loaded_state();
        let degree = dispatch(
            &state,
            "compute_centrality",
            &json!({"metric": "degree", "top_n": 3}),
        )
        .unwrap();
        assert_eq!(degree[0]["id"], "sys-2");
        let unknown = dispatch(
            &state,
            "compute_centrality",
            &json!({"metric": "eigenvector"}),
        )
        .unwrap_err();
        assert_eq!(unknown.kind(), "validation");
        let top = dispatch(&state, "find_most_connected", &json!({})).unwrap();
        assert_eq!(top[0]["degree"], 2);
    }

    #[test]
    fn test_search_tool() {
        let state = loaded_state();
        let hits = dispatch(
            &state,
            "search_entities",
            &json!({"query": "ledger", "limit": 5}),
        )
        .unwrap();
        assert_eq!(hits[0]["id"], "sys-2");
    }

    #[test]
    fn test_openai_definitions_shape() {
        let definitions = openai_tool_definitions();
        let list = definitions.as_array().unwrap();
        assert_eq!(list.len(), 13);
        assert_eq!(list[0]["type"], "function");
        assert!(list[0]["function"]["parameters"].is_object());
    }
}
