//! Engine abstraction: the single point of access to the graph.
//!
//! Every consumer (generator, weaver, analytics, tools, exporters) goes
//! through [`GraphEngine`]. The default backend is the in-process
//! multigraph in [`memory`]; a process-wide factory maps backend names
//! to constructors so a second backend can be slotted in without
//! touching any consumer.

pub mod memory;

use std::collections::{BTreeMap, HashMap};
use std::sync::OnceLock;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::error::{GraphError, Result};
use crate::model::{Entity, EntityBody, EntityKind, Relationship};
use crate::schema::RelationshipKind;

/// Traversal direction for neighbour and relationship queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    In,
    Out,
    #[default]
    Both,
}

impl std::str::FromStr for Direction {
    type Err = GraphError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "in" => Ok(Direction::In),
            "out" => Ok(Direction::Out),
            "both" => Ok(Direction::Both),
            other => Err(GraphError::Validation(format!(
                "direction must be in, out, or both (got {other:?})"
            ))),
        }
    }
}

/// Sparse update applied by [`GraphEngine::update_entity`].
///
/// Unset fields leave the stored value untouched. A submitted `body`
/// replaces the kind payload wholesale and must keep the same kind.
#[derive(Debug, Clone, Default)]
pub struct EntityPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub tags: Option<std::collections::BTreeSet<String>>,
    pub metadata: Option<BTreeMap<String, serde_json::Value>>,
    pub valid_from: Option<Option<chrono::DateTime<chrono::Utc>>>,
    pub valid_until: Option<Option<chrono::DateTime<chrono::Utc>>>,
    pub body: Option<EntityBody>,
}

impl EntityPatch {
    #[must_use]
    pub fn body(body: EntityBody) -> Self {
        Self {
            body: Some(body),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.tags.is_none()
            && self.metadata.is_none()
            && self.valid_from.is_none()
            && self.valid_until.is_none()
            && self.body.is_none()
    }
}

/// Aggregate counts and connectivity measures.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GraphStatistics {
    pub entity_count: usize,
    pub relationship_count: usize,
    pub entities_by_type: BTreeMap<String, usize>,
    pub relationships_by_type: BTreeMap<String, usize>,
    /// Directed multigraph density: `E / (N * (N - 1))`, 0 for N < 2.
    pub density: f64,
    pub weakly_connected_components: usize,
    pub is_weakly_connected: bool,
}

/// Uniform access to the organisation graph.
///
/// Mutation methods validate before mutating and never leave the graph
/// half-written; bulk inserts are atomic (all or none).
pub trait GraphEngine: Send + Sync {
    /// Name the backend registers under in the factory.
    fn backend_name(&self) -> &'static str;

    // -- entities ------------------------------------------------------

    fn add_entity(&mut self, entity: Entity) -> Result<String>;

    /// Insert a batch atomically: every entity is validated (including
    /// id collisions inside the batch) before the first write.
    fn add_entities_bulk(&mut self, entities: Vec<Entity>) -> Result<Vec<String>>;

    fn get_entity(&self, id: &str) -> Result<&Entity>;

    /// Copy-validate-write: applies the patch to a copy, validates it,
    /// and only then replaces the stored entity, bumping `version` by
    /// one and refreshing `updated_at`.
    fn update_entity(&mut self, id: &str, patch: EntityPatch) -> Result<Entity>;

    /// Remove an entity and cascade to every incident relationship.
    /// Returns false when the id is unknown.
    fn remove_entity(&mut self, id: &str) -> Result<bool>;

    /// Entities in stable insertion order, optionally filtered by kind
    /// and truncated to `limit`.
    fn list_entities(&self, kind: Option<EntityKind>, limit: Option<usize>) -> Vec<&Entity>;

    /// Every entity, insertion-ordered (export path).
    fn entities(&self) -> Vec<&Entity>;

    // -- relationships -------------------------------------------------

    fn add_relationship(&mut self, relationship: Relationship) -> Result<String>;

    /// Validate-all-before-commit batch insert. On any failure returns
    /// [`GraphError::BatchRejected`] with per-item errors and applies
    /// nothing.
    fn add_relationships_bulk(&mut self, relationships: Vec<Relationship>) -> Result<Vec<String>>;

    fn get_relationship(&self, id: &str) -> Result<&Relationship>;

    fn remove_relationship(&mut self, id: &str) -> Result<bool>;

    /// Every relationship, insertion-ordered (export path).
    fn relationships(&self) -> Vec<&Relationship>;

    /// Relationships incident to an entity, filtered by direction and
    /// optionally by kind.
    fn relationships_of(
        &self,
        id: &str,
        direction: Direction,
        kind: Option<RelationshipKind>,
    ) -> Result<Vec<&Relationship>>;

    // -- traversal -----------------------------------------------------

    /// Adjacent entities, deduplicated, filtered by edge direction,
    /// relationship kind, and neighbour entity kind.
    fn neighbors(
        &self,
        id: &str,
        direction: Direction,
        relationship_kind: Option<RelationshipKind>,
        entity_kind: Option<EntityKind>,
    ) -> Result<Vec<&Entity>>;

    /// Shortest path treating edges as undirected; `None` when the
    /// target is unreachable. `shortest_path(v, v)` is `[v]`.
    fn shortest_path(&self, source: &str, target: &str) -> Result<Option<Vec<String>>>;

    /// Layered undirected BFS bounded by `max_depth`. Depth 0 holds the
    /// source itself.
    fn blast_radius(&self, id: &str, max_depth: usize) -> Result<BTreeMap<usize, Vec<String>>> {
        let _ = self.get_entity(id)?;
        let mut layers: BTreeMap<usize, Vec<String>> = BTreeMap::new();
        layers.insert(0, vec![id.to_string()]);
        let mut visited: std::collections::HashSet<String> =
            std::collections::HashSet::from([id.to_string()]);
        let mut frontier = vec![id.to_string()];
        for depth in 1..=max_depth {
            let mut next = Vec::new();
            for node in &frontier {
                for neighbor in self.neighbors(node, Direction::Both, None, None)? {
                    if visited.insert(neighbor.id.clone()) {
                        next.push(neighbor.id.clone());
                    }
                }
            }
            if next.is_empty() {
                break;
            }
            layers.insert(depth, next.clone());
            frontier = next;
        }
        Ok(layers)
    }

    // -- analytics -----------------------------------------------------

    /// Normalised degree centrality `deg(v) / (n - 1)`. The base
    /// implementation enumerates incident relationships per entity.
    fn degree_centrality(&self) -> HashMap<String, f64> {
        let entities = self.entities();
        let n = entities.len();
        if n < 2 {
            return entities.into_iter().map(|e| (e.id.clone(), 0.0)).collect();
        }
        let denom = (n - 1) as f64;
        entities
            .into_iter()
            .map(|e| {
                let degree = self
                    .relationships_of(&e.id, Direction::Both, None)
                    .map(|rels| rels.len())
                    .unwrap_or(0);
                (e.id.clone(), degree as f64 / denom)
            })
            .collect()
    }

    /// Betweenness centrality; lightweight backends may return
    /// [`GraphError::Unsupported`].
    fn betweenness_centrality(&self) -> Result<HashMap<String, f64>> {
        Err(GraphError::Unsupported(
            "betweenness centrality; use degree centrality instead".to_string(),
        ))
    }

    /// PageRank; lightweight backends may return [`GraphError::Unsupported`].
    fn pagerank(&self) -> Result<HashMap<String, f64>> {
        Err(GraphError::Unsupported(
            "pagerank; use degree centrality instead".to_string(),
        ))
    }

    /// The `top_n` entities by raw degree, descending, ties broken by
    /// insertion order.
    fn most_connected(&self, top_n: usize) -> Vec<(String, usize)> {
        let mut degrees: Vec<(String, usize)> = self
            .entities()
            .into_iter()
            .map(|e| {
                let degree = self
                    .relationships_of(&e.id, Direction::Both, None)
                    .map(|rels| rels.len())
                    .unwrap_or(0);
                (e.id.clone(), degree)
            })
            .collect();
        degrees.sort_by(|a, b| b.1.cmp(&a.1));
        degrees.truncate(top_n);
        degrees
    }

    fn statistics(&self) -> GraphStatistics;

    fn clear(&mut self);
}

type BackendConstructor = fn() -> Box<dyn GraphEngine>;

static BACKEND_FACTORY: OnceLock<RwLock<HashMap<String, BackendConstructor>>> = OnceLock::new();

fn factory() -> &'static RwLock<HashMap<String, BackendConstructor>> {
    BACKEND_FACTORY.get_or_init(|| RwLock::new(HashMap::new()))
}

/// Register a backend constructor under a name. Later registrations for
/// the same name win.
pub fn register_backend(name: impl Into<String>, constructor: BackendConstructor) {
    factory().write().insert(name.into(), constructor);
}

/// Register the built-in backends. Called once during process
/// initialisation; calling it again is harmless.
pub fn register_default_backends() {
    register_backend(memory::BACKEND_NAME, || {
        Box::new(memory::MemoryGraph::new())
    });
}

/// Construct an engine by backend name.
pub fn create_engine(name: &str) -> Result<Box<dyn GraphEngine>> {
    register_default_backends();
    let map = factory().read();
    let constructor = map
        .get(name)
        .ok_or_else(|| GraphError::Validation(format!("unknown graph backend: {name}")))?;
    Ok(constructor())
}

/// Construct the default in-memory multigraph engine.
#[must_use]
pub fn default_engine() -> Box<dyn GraphEngine> {
    Box::new(memory::MemoryGraph::new())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_parse() {
        assert_eq!("in".parse::<Direction>().unwrap(), Direction::In);
        assert_eq!("both".parse::<Direction>().unwrap(), Direction::Both);
        assert!("sideways".parse::<Direction>().is_err());
    }

    #[test]
    fn test_factory_knows_memory_backend() {
        let engine = create_engine("memory").unwrap();
        assert_eq!(engine.backend_name(), "memory");
        assert!(create_engine("neo5j").is_err());
    }

    #[test]
    fn test_patch_is_empty() {
        assert!(EntityPatch::default().is_empty());
        let patch = EntityPatch {
            description: Some("x".to_string()),
            ..EntityPatch::default()
        };
        assert!(!patch.is_empty());
    }
}
