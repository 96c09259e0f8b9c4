//! Dispatcher-level scenarios: write persistence, auto-reload on
//! external change, and batch atomicity observed through the tools.

#![allow(clippy::unwrap_used)]

use std::time::SystemTime;

use orgweave::export;
use orgweave::generate::Orchestrator;
use orgweave::model::{Entity, EntityBody, SystemBody};
use orgweave::scaling::{Industry, OrgProfile};
use orgweave::state::GraphState;
use orgweave::tools::dispatch;
use serde_json::json;

fn engine_with(ids: &[&str]) -> Box<dyn orgweave::GraphEngine> {
    let mut engine = orgweave::default_engine();
    for id in ids {
        engine
            .add_entity(
                Entity::new(format!("system {id}"), EntityBody::System(SystemBody::default()))
                    .with_id(*id),
            )
            .unwrap();
    }
    engine
}

fn bump_mtime(path: &std::path::Path) {
    let file = std::fs::File::options().append(true).open(path).unwrap();
    file.set_modified(SystemTime::now() + std::time::Duration::from_secs(2))
        .unwrap();
}

#[test]
fn test_load_graph_tool_then_read() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("graph.json");
    export::write_graph_file(engine_with(&["a", "b"]).as_ref(), &path).unwrap();

    let state = GraphState::new(false);
    let loaded = dispatch(
        &state,
        "load_graph",
        &json!({"path": path.to_string_lossy()}),
    )
    .unwrap();
    assert_eq!(loaded["entity_count"], 2);

    let stats = dispatch(&state, "get_statistics", &json!({})).unwrap();
    assert_eq!(stats["entity_count"], 2);
}

#[test]
fn test_external_overwrite_visible_on_next_call() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("graph.json");
    export::write_graph_file(engine_with(&["a"]).as_ref(), &path).unwrap();

    let state = GraphState::new(false);
    dispatch(&state, "load_graph", &json!({"path": path.to_string_lossy()})).unwrap();

    // The previous call saw the old count...
    let stats = dispatch(&state, "get_statistics", &json!({})).unwrap();
    assert_eq!(stats["entity_count"], 1);

    // ...an external writer replaces the file...
    export::write_graph_file(engine_with(&["a", "b", "c"]).as_ref(), &path).unwrap();
    bump_mtime(&path);

    // ...and the very next tool call serves the new graph.
    let stats = dispatch(&state, "get_statistics", &json!({})).unwrap();
    assert_eq!(stats["entity_count"], 3);
}

#[test]
fn test_write_tool_persists_to_loaded_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("graph.json");
    export::write_graph_file(engine_with(&["a", "b"]).as_ref(), &path).unwrap();

    let state = GraphState::new(false);
    dispatch(&state, "load_graph", &json!({"path": path.to_string_lossy()})).unwrap();
    dispatch(
        &state,
        "add_relationship_tool",
        &json!({
            "relationship_type": "depends_on",
            "source_id": "a",
            "target_id": "b",
        }),
    )
    .unwrap();

    // The file on disk has the new edge without any explicit save.
    let reloaded = export::load_graph_file(&path, false).unwrap();
    assert_eq!(reloaded.statistics().relationship_count, 1);

    // And the write did not self-trigger a reload that loses anything.
    let stats = dispatch(&state, "get_statistics", &json!({})).unwrap();
    assert_eq!(stats["relationship_count"], 1);
}

#[test]
fn test_failed_batch_leaves_persisted_file_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("graph.json");
    export::write_graph_file(engine_with(&["a", "b"]).as_ref(), &path).unwrap();
    let before = std::fs::read_to_string(&path).unwrap();

    let state = GraphState::new(false);
    dispatch(&state, "load_graph", &json!({"path": path.to_string_lossy()})).unwrap();
    let err = dispatch(
        &state,
        "add_relationships_batch",
        &json!({"relationships": [
            {"relationship_type": "depends_on", "source_id": "a", "target_id": "b"},
            {"relationship_type": "depends_on", "source_id": "a", "target_id": "ghost"},
        ]}),
    )
    .unwrap_err();
    assert_eq!(err.kind(), "batch_rejected");

    let after = std::fs::read_to_string(&path).unwrap();
    assert_eq!(before, after, "rejected batch must not rewrite the file");
}

#[test]
fn test_generated_graph_served_through_tools() {
    let profile = OrgProfile::new("Served Corp", Industry::Technology, 100).with_seed(42);
    let outcome = Orchestrator::new().generate(profile).unwrap();
    let state = GraphState::new(false);
    state.adopt(outcome.engine, None);

    let stats = dispatch(&state, "get_statistics", &json!({})).unwrap();
    assert!(stats["entity_count"].as_u64().unwrap() > 200);

    // Blast radius over the generated graph keeps the depth-0 contract.
    let people = dispatch(&state, "list_entities", &json!({"type": "person", "limit": 1})).unwrap();
    let person_id = people[0]["id"].as_str().unwrap().to_string();
    let radius = dispatch(
        &state,
        "get_blast_radius",
        &json!({"id": person_id, "max_depth": 1}),
    )
    .unwrap();
    assert_eq!(radius["0"][0]["id"], person_id.as_str());
    assert!(!radius["1"].as_array().unwrap().is_empty());
}
