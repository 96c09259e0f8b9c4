//! Default in-process multigraph backend.
//!
//! Storage is a petgraph `StableDiGraph` whose node and edge weights are
//! entity/relationship ids, paired with id-keyed maps for O(1) lookup
//! and per-kind inverted indexes for filtered listing. Stable indices
//! matter: removals must not invalidate the id maps.

use std::collections::{BTreeMap, HashMap, HashSet, VecDeque};

use petgraph::stable_graph::{EdgeIndex, NodeIndex, StableDiGraph};
use petgraph::visit::{EdgeRef, IntoEdgeReferences};
use petgraph::Direction as PetDirection;

use crate::error::{BatchItemError, GraphError, Result};
use crate::model::{now_ms, Entity, EntityKind, Relationship};
use crate::schema::{validate_endpoints, RelationshipKind};

use super::{Direction, EntityPatch, GraphEngine, GraphStatistics};

/// Factory name of this backend.
pub const BACKEND_NAME: &str = "memory";

/// In-memory directed multigraph engine.
#[derive(Debug, Default)]
pub struct MemoryGraph {
    graph: StableDiGraph<String, String>,
    nodes: HashMap<String, NodeIndex>,
    edges: HashMap<String, EdgeIndex>,
    entities: HashMap<String, Entity>,
    relationships: HashMap<String, Relationship>,
    entity_order: Vec<String>,
    relationship_order: Vec<String>,
    by_kind: HashMap<EntityKind, Vec<String>>,
    by_rel_kind: HashMap<RelationshipKind, Vec<String>>,
}

impl MemoryGraph {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn node_of(&self, id: &str) -> Result<NodeIndex> {
        self.nodes
            .get(id)
            .copied()
            .ok_or_else(|| GraphError::NotFound(format!("entity {id}")))
    }

    fn insert_entity_unchecked(&mut self, entity: Entity) -> String {
        let id = entity.id.clone();
        let kind = entity.kind();
        let node = self.graph.add_node(id.clone());
        self.nodes.insert(id.clone(), node);
        self.entity_order.push(id.clone());
        self.by_kind.entry(kind).or_default().push(id.clone());
        self.entities.insert(id.clone(), entity);
        id
    }

    fn validate_new_entity(&self, entity: &Entity) -> Result<()> {
        entity.validate()?;
        if self.entities.contains_key(&entity.id) {
            return Err(GraphError::IdCollision(format!("entity {}", entity.id)));
        }
        Ok(())
    }

    fn insert_relationship_unchecked(&mut self, relationship: Relationship) -> String {
        let id = relationship.id.clone();
        // Endpoint presence was validated; the map lookups cannot miss.
        let (source, target) = (
            self.nodes[&relationship.source_id],
            self.nodes[&relationship.target_id],
        );
        let edge = self.graph.add_edge(source, target, id.clone());
        self.edges.insert(id.clone(), edge);
        self.relationship_order.push(id.clone());
        self.by_rel_kind
            .entry(relationship.kind)
            .or_default()
            .push(id.clone());
        self.relationships.insert(id.clone(), relationship);
        id
    }

    fn validate_new_relationship(&self, relationship: &Relationship) -> Result<()> {
        relationship.validate()?;
        if self.relationships.contains_key(&relationship.id) {
            return Err(GraphError::IdCollision(format!(
                "relationship {}",
                relationship.id
            )));
        }
        let source = self
            .entities
            .get(&relationship.source_id)
            .ok_or_else(|| GraphError::NotFound(format!("entity {}", relationship.source_id)))?;
        let target = self
            .entities
            .get(&relationship.target_id)
            .ok_or_else(|| GraphError::NotFound(format!("entity {}", relationship.target_id)))?;
        validate_endpoints(relationship.kind, source.kind(), target.kind())
    }

    fn remove_relationship_internal(&mut self, id: &str) -> bool {
        let Some(edge) = self.edges.remove(id) else {
            return false;
        };
        self.graph.remove_edge(edge);
        if let Some(rel) = self.relationships.remove(id) {
            if let Some(ids) = self.by_rel_kind.get_mut(&rel.kind) {
                ids.retain(|r| r != id);
            }
        }
        self.relationship_order.retain(|r| r != id);
        true
    }

    /// Incident relationship ids, deduplicated (a self-loop shows up on
    /// both sides of the node).
    fn incident_relationship_ids(&self, node: NodeIndex, direction: Direction) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut out = Vec::new();
        let mut push = |rel_id: &String| {
            if seen.insert(rel_id.clone()) {
                out.push(rel_id.clone());
            }
        };
        if matches!(direction, Direction::Out | Direction::Both) {
            for edge in self.graph.edges_directed(node, PetDirection::Outgoing) {
                push(edge.weight());
            }
        }
        if matches!(direction, Direction::In | Direction::Both) {
            for edge in self.graph.edges_directed(node, PetDirection::Incoming) {
                push(edge.weight());
            }
        }
        out
    }

    /// Undirected neighbour sets keyed by node index, deduplicated.
    /// Shared by the path and centrality algorithms.
    fn undirected_adjacency(&self) -> HashMap<NodeIndex, Vec<NodeIndex>> {
        let mut adjacency: HashMap<NodeIndex, HashSet<NodeIndex>> = HashMap::new();
        for node in self.graph.node_indices() {
            adjacency.entry(node).or_default();
        }
        for edge in self.graph.edge_references() {
            let (a, b) = (edge.source(), edge.target());
            if a == b {
                continue;
            }
            adjacency.entry(a).or_default().insert(b);
            adjacency.entry(b).or_default().insert(a);
        }
        adjacency
            .into_iter()
            .map(|(node, set)| {
                let mut list: Vec<NodeIndex> = set.into_iter().collect();
                list.sort_by_key(|n| n.index());
                (node, list)
            })
            .collect()
    }
}

impl GraphEngine for MemoryGraph {
    fn backend_name(&self) -> &'static str {
        BACKEND_NAME
    }

    fn add_entity(&mut self, entity: Entity) -> Result<String> {
        self.validate_new_entity(&entity)?;
        Ok(self.insert_entity_unchecked(entity))
    }

    fn add_entities_bulk(&mut self, entities: Vec<Entity>) -> Result<Vec<String>> {
        let mut batch_ids = HashSet::new();
        for entity in &entities {
            self.validate_new_entity(entity)?;
            if !batch_ids.insert(entity.id.clone()) {
                return Err(GraphError::IdCollision(format!(
                    "entity {} repeated in batch",
                    entity.id
                )));
            }
        }
        Ok(entities
            .into_iter()
            .map(|e| self.insert_entity_unchecked(e))
            .collect())
    }

    fn get_entity(&self, id: &str) -> Result<&Entity> {
        self.entities
            .get(id)
            .ok_or_else(|| GraphError::NotFound(format!("entity {id}")))
    }

    fn update_entity(&mut self, id: &str, patch: EntityPatch) -> Result<Entity> {
        let current = self.get_entity(id)?;
        let mut updated = current.clone();
        if let Some(name) = patch.name {
            updated.name = name;
        }
        if let Some(description) = patch.description {
            updated.description = description;
        }
        if let Some(tags) = patch.tags {
            updated.tags = tags;
        }
        if let Some(metadata) = patch.metadata {
            updated.metadata = metadata;
        }
        if let Some(valid_from) = patch.valid_from {
            updated.valid_from = valid_from;
        }
        if let Some(valid_until) = patch.valid_until {
            updated.valid_until = valid_until;
        }
        if let Some(body) = patch.body {
            if body.kind() != updated.kind() {
                return Err(GraphError::Validation(format!(
                    "entity {id}: patch changes kind from {} to {}",
                    updated.kind(),
                    body.kind()
                )));
            }
            updated.body = body;
        }
        updated.version += 1;
        updated.updated_at = now_ms().max(updated.created_at);
        updated.validate()?;
        self.entities.insert(id.to_string(), updated.clone());
        Ok(updated)
    }

    fn remove_entity(&mut self, id: &str) -> Result<bool> {
        let Some(node) = self.nodes.get(id).copied() else {
            return Ok(false);
        };
        for rel_id in self.incident_relationship_ids(node, Direction::Both) {
            self.remove_relationship_internal(&rel_id);
        }
        self.graph.remove_node(node);
        self.nodes.remove(id);
        if let Some(entity) = self.entities.remove(id) {
            if let Some(ids) = self.by_kind.get_mut(&entity.kind()) {
                ids.retain(|e| e != id);
            }
        }
        self.entity_order.retain(|e| e != id);
        Ok(true)
    }

    fn list_entities(&self, kind: Option<EntityKind>, limit: Option<usize>) -> Vec<&Entity> {
        let ids: &[String] = match kind {
            Some(kind) => self.by_kind.get(&kind).map(Vec::as_slice).unwrap_or(&[]),
            None => &self.entity_order,
        };
        let take = limit.unwrap_or(usize::MAX);
        ids.iter()
            .filter_map(|id| self.entities.get(id))
            .take(take)
            .collect()
    }

    fn entities(&self) -> Vec<&Entity> {
        self.entity_order
            .iter()
            .filter_map(|id| self.entities.get(id))
            .collect()
    }

    fn add_relationship(&mut self, relationship: Relationship) -> Result<String> {
        self.validate_new_relationship(&relationship)?;
        Ok(self.insert_relationship_unchecked(relationship))
    }

    fn add_relationships_bulk(&mut self, relationships: Vec<Relationship>) -> Result<Vec<String>> {
        let mut errors = Vec::new();
        let mut batch_ids = HashSet::new();
        for (index, relationship) in relationships.iter().enumerate() {
            let item_result = self.validate_new_relationship(relationship).and_then(|()| {
                if batch_ids.insert(relationship.id.clone()) {
                    Ok(())
                } else {
                    Err(GraphError::IdCollision(format!(
                        "relationship {} repeated in batch",
                        relationship.id
                    )))
                }
            });
            if let Err(err) = item_result {
                errors.push(BatchItemError {
                    index,
                    kind: err.kind().to_string(),
                    message: err.to_string(),
                });
            }
        }
        if !errors.is_empty() {
            return Err(GraphError::BatchRejected { errors });
        }
        Ok(relationships
            .into_iter()
            .map(|r| self.insert_relationship_unchecked(r))
            .collect())
    }

    fn get_relationship(&self, id: &str) -> Result<&Relationship> {
        self.relationships
            .get(id)
            .ok_or_else(|| GraphError::NotFound(format!("relationship {id}")))
    }

    fn remove_relationship(&mut self, id: &str) -> Result<bool> {
        Ok(self.remove_relationship_internal(id))
    }

    fn relationships(&self) -> Vec<&Relationship> {
        self.relationship_order
            .iter()
            .filter_map(|id| self.relationships.get(id))
            .collect()
    }

    fn relationships_of(
        &self,
        id: &str,
        direction: Direction,
        kind: Option<RelationshipKind>,
    ) -> Result<Vec<&Relationship>> {
        let node = self.node_of(id)?;
        Ok(self
            .incident_relationship_ids(node, direction)
            .iter()
            .filter_map(|rel_id| self.relationships.get(rel_id))
            .filter(|rel| kind.map_or(true, |k| rel.kind == k))
            .collect())
    }

    fn neighbors(
        &self,
        id: &str,
        direction: Direction,
        relationship_kind: Option<RelationshipKind>,
        entity_kind: Option<EntityKind>,
    ) -> Result<Vec<&Entity>> {
        let rels = self.relationships_of(id, direction, relationship_kind)?;
        let mut seen = HashSet::new();
        let mut out = Vec::new();
        for rel in rels {
            let other = if rel.source_id == id {
                &rel.target_id
            } else {
                &rel.source_id
            };
            if !seen.insert(other.clone()) {
                continue;
            }
            if let Some(entity) = self.entities.get(other) {
                if entity_kind.map_or(true, |k| entity.kind() == k) {
                    out.push(entity);
                }
            }
        }
        Ok(out)
    }

    fn shortest_path(&self, source: &str, target: &str) -> Result<Option<Vec<String>>> {
        let start = self.node_of(source)?;
        let goal = self.node_of(target)?;
        if start == goal {
            return Ok(Some(vec![source.to_string()]));
        }
        let adjacency = self.undirected_adjacency();
        let mut predecessor: HashMap<NodeIndex, NodeIndex> = HashMap::new();
        let mut queue = VecDeque::from([start]);
        let mut found = false;
        'bfs: while let Some(node) = queue.pop_front() {
            if let Some(neighbors) = adjacency.get(&node) {
                for &next in neighbors {
                    if next == start || predecessor.contains_key(&next) {
                        continue;
                    }
                    predecessor.insert(next, node);
                    if next == goal {
                        found = true;
                        break 'bfs;
                    }
                    queue.push_back(next);
                }
            }
        }
        if !found {
            return Ok(None);
        }
        let mut path = vec![goal];
        let mut cursor = goal;
        while let Some(&prev) = predecessor.get(&cursor) {
            path.push(prev);
            cursor = prev;
            if cursor == start {
                break;
            }
        }
        path.reverse();
        Ok(Some(
            path.into_iter().map(|n| self.graph[n].clone()).collect(),
        ))
    }

    fn betweenness_centrality(&self) -> Result<HashMap<String, f64>> {
        // Brandes (2001) on the undirected projection; O(V * E).
        let adjacency = self.undirected_adjacency();
        let nodes: Vec<NodeIndex> = self.graph.node_indices().collect();
        let n = nodes.len();
        if n > 1000 {
            tracing::warn!(entities = n, "betweenness centrality on a large graph is O(V*E)");
        }
        let mut centrality: HashMap<NodeIndex, f64> = nodes.iter().map(|&v| (v, 0.0)).collect();

        for &source in &nodes {
            let mut stack = Vec::new();
            let mut predecessors: HashMap<NodeIndex, Vec<NodeIndex>> = HashMap::new();
            let mut sigma: HashMap<NodeIndex, f64> = HashMap::new();
            let mut distance: HashMap<NodeIndex, i64> = HashMap::new();
            sigma.insert(source, 1.0);
            distance.insert(source, 0);
            let mut queue = VecDeque::from([source]);
            while let Some(v) = queue.pop_front() {
                stack.push(v);
                let d_v = distance[&v];
                if let Some(neighbors) = adjacency.get(&v) {
                    for &w in neighbors {
                        if !distance.contains_key(&w) {
                            distance.insert(w, d_v + 1);
                            queue.push_back(w);
                        }
                        if distance[&w] == d_v + 1 {
                            *sigma.entry(w).or_insert(0.0) += sigma[&v];
                            predecessors.entry(w).or_default().push(v);
                        }
                    }
                }
            }
            let mut delta: HashMap<NodeIndex, f64> = HashMap::new();
            while let Some(w) = stack.pop() {
                if let Some(preds) = predecessors.get(&w) {
                    for &v in preds {
                        let contribution =
                            (sigma[&v] / sigma[&w]) * (1.0 + delta.get(&w).copied().unwrap_or(0.0));
                        *delta.entry(v).or_insert(0.0) += contribution;
                    }
                }
                if w != source {
                    *centrality.entry(w).or_insert(0.0) +=
                        delta.get(&w).copied().unwrap_or(0.0);
                }
            }
        }

        // Undirected: every pair was counted twice; normalise to [0, 1].
        let scale = if n > 2 {
            1.0 / ((n - 1) as f64 * (n - 2) as f64)
        } else {
            1.0
        };
        Ok(centrality
            .into_iter()
            .map(|(node, score)| (self.graph[node].clone(), score * scale))
            .collect())
    }

    fn pagerank(&self) -> Result<HashMap<String, f64>> {
        const DAMPING: f64 = 0.85;
        const EPSILON: f64 = 1e-6;
        const MAX_ITERATIONS: usize = 100;

        let nodes: Vec<NodeIndex> = self.graph.node_indices().collect();
        let n = nodes.len();
        if n == 0 {
            return Ok(HashMap::new());
        }
        // Parallel edges count as repeated endorsements.
        let mut out_edges: HashMap<NodeIndex, Vec<NodeIndex>> = HashMap::new();
        for edge in self.graph.edge_references() {
            out_edges.entry(edge.source()).or_default().push(edge.target());
        }

        let uniform = 1.0 / n as f64;
        let mut rank: HashMap<NodeIndex, f64> = nodes.iter().map(|&v| (v, uniform)).collect();
        let mut converged = false;
        for _ in 0..MAX_ITERATIONS {
            let mut next: HashMap<NodeIndex, f64> =
                nodes.iter().map(|&v| (v, (1.0 - DAMPING) / n as f64)).collect();
            let mut dangling_mass = 0.0;
            for &v in &nodes {
                let r = rank[&v];
                match out_edges.get(&v) {
                    Some(targets) if !targets.is_empty() => {
                        let share = DAMPING * r / targets.len() as f64;
                        for &t in targets {
                            *next.entry(t).or_insert(0.0) += share;
                        }
                    }
                    _ => dangling_mass += DAMPING * r,
                }
            }
            let dangling_share = dangling_mass / n as f64;
            for value in next.values_mut() {
                *value += dangling_share;
            }
            let diff: f64 = nodes.iter().map(|v| (next[v] - rank[v]).abs()).sum();
            rank = next;
            if diff < EPSILON {
                converged = true;
                break;
            }
        }
        if !converged {
            tracing::warn!(
                iterations = MAX_ITERATIONS,
                "pagerank did not converge; returning last iterate"
            );
        }
        Ok(rank
            .into_iter()
            .map(|(node, score)| (self.graph[node].clone(), score))
            .collect())
    }

    fn statistics(&self) -> GraphStatistics {
        let n = self.entities.len();
        let e = self.relationships.len();
        let mut entities_by_type = BTreeMap::new();
        for (kind, ids) in &self.by_kind {
            if !ids.is_empty() {
                entities_by_type.insert(kind.as_str().to_string(), ids.len());
            }
        }
        let mut relationships_by_type = BTreeMap::new();
        for (kind, ids) in &self.by_rel_kind {
            if !ids.is_empty() {
                relationships_by_type.insert(kind.as_str().to_string(), ids.len());
            }
        }
        let density = if n > 1 {
            e as f64 / (n as f64 * (n as f64 - 1.0))
        } else {
            0.0
        };

        // Weak connectivity via BFS over the undirected projection.
        let adjacency = self.undirected_adjacency();
        let mut visited: HashSet<NodeIndex> = HashSet::new();
        let mut components = 0;
        for node in self.graph.node_indices() {
            if visited.contains(&node) {
                continue;
            }
            components += 1;
            let mut queue = VecDeque::from([node]);
            visited.insert(node);
            while let Some(v) = queue.pop_front() {
                if let Some(neighbors) = adjacency.get(&v) {
                    for &w in neighbors {
                        if visited.insert(w) {
                            queue.push_back(w);
                        }
                    }
                }
            }
        }

        GraphStatistics {
            entity_count: n,
            relationship_count: e,
            entities_by_type,
            relationships_by_type,
            density,
            weakly_connected_components: components,
            is_weakly_connected: components <= 1,
        }
    }

    fn clear(&mut self) {
        self.graph.clear();
        self.nodes.clear();
        self.edges.clear();
        self.entities.clear();
        self.relationships.clear();
        self.entity_order.clear();
        self.relationship_order.clear();
        self.by_kind.clear();
        self.by_rel_kind.clear();
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::model::{
        DataAssetBody, DepartmentBody, EntityBody, PersonBody, SystemBody,
    };

    fn system(id: &str) -> Entity {
        Entity::new(format!("system {id}"), EntityBody::System(SystemBody::default())).with_id(id)
    }

    fn person(id: &str) -> Entity {
        Entity::new(format!("person {id}"), EntityBody::Person(PersonBody::default())).with_id(id)
    }

    fn department(id: &str) -> Entity {
        Entity::new(
            format!("department {id}"),
            EntityBody::Department(DepartmentBody::default()),
        )
        .with_id(id)
    }

    fn data_asset(id: &str) -> Entity {
        Entity::new(
            format!("asset {id}"),
            EntityBody::DataAsset(DataAssetBody::default()),
        )
        .with_id(id)
    }

    fn seeded() -> MemoryGraph {
        let mut g = MemoryGraph::new();
        g.add_entities_bulk(vec![system("s1"), system("s2"), data_asset("d1")])
            .unwrap();
        g.add_relationship(Relationship::new(RelationshipKind::DependsOn, "s1", "s2"))
            .unwrap();
        g.add_relationship(Relationship::new(RelationshipKind::Stores, "s2", "d1"))
            .unwrap();
        g
    }

    #[test]
    fn test_add_and_get_entity() {
        let mut g = MemoryGraph::new();
        let id = g.add_entity(system("s1")).unwrap();
        assert_eq!(id, "s1");
        assert_eq!(g.get_entity("s1").unwrap().name, "system s1");
        assert!(matches!(
            g.get_entity("nope"),
            Err(GraphError::NotFound(_))
        ));
    }

    #[test]
    fn test_id_collision_rejected() {
        let mut g = MemoryGraph::new();
        g.add_entity(system("s1")).unwrap();
        assert!(matches!(
            g.add_entity(system("s1")),
            Err(GraphError::IdCollision(_))
        ));
    }

    #[test]
    fn test_bulk_entities_atomic_on_internal_duplicate() {
        let mut g = MemoryGraph::new();
        let result = g.add_entities_bulk(vec![system("a"), system("b"), system("a")]);
        assert!(result.is_err());
        assert_eq!(g.entities().len(), 0);
    }

    #[test]
    fn test_multigraph_allows_parallel_edges() {
        let mut g = seeded();
        // Same (source, target, type) triple a second time: allowed.
        g.add_relationship(Relationship::new(RelationshipKind::DependsOn, "s1", "s2"))
            .unwrap();
        let rels = g
            .relationships_of("s1", Direction::Out, Some(RelationshipKind::DependsOn))
            .unwrap();
        assert_eq!(rels.len(), 2);
    }

    #[test]
    fn test_relationship_requires_live_endpoints() {
        let mut g = MemoryGraph::new();
        g.add_entity(system("s1")).unwrap();
        let err = g
            .add_relationship(Relationship::new(RelationshipKind::DependsOn, "s1", "ghost"))
            .unwrap_err();
        assert!(matches!(err, GraphError::NotFound(_)));
    }

    #[test]
    fn test_relationship_schema_enforced() {
        let mut g = MemoryGraph::new();
        g.add_entities_bulk(vec![person("p1"), system("s1")]).unwrap();
        let err = g
            .add_relationship(Relationship::new(RelationshipKind::Governs, "p1", "s1"))
            .unwrap_err();
        assert!(matches!(err, GraphError::SchemaViolation(_)));
    }

    #[test]
    fn test_batch_rejection_reports_index_and_mutates_nothing() {
        let mut g = seeded();
        let before = g.statistics();
        let batch = vec![
            Relationship::new(RelationshipKind::DependsOn, "s2", "s1"),
            Relationship::new(RelationshipKind::Stores, "s1", "missing"),
            Relationship::new(RelationshipKind::IntegratesWith, "s1", "s2"),
        ];
        let err = g.add_relationships_bulk(batch).unwrap_err();
        match err {
            GraphError::BatchRejected { errors } => {
                assert_eq!(errors.len(), 1);
                assert_eq!(errors[0].index, 1);
                assert_eq!(errors[0].kind, "not_found");
            }
            other => panic!("expected BatchRejected, got {other:?}"),
        }
        let after = g.statistics();
        assert_eq!(before.relationship_count, after.relationship_count);
    }

    #[test]
    fn test_update_entity_bumps_version_once() {
        let mut g = seeded();
        let before = g.get_entity("s1").unwrap().version;
        let updated = g
            .update_entity(
                "s1",
                EntityPatch {
                    description: Some("primary ordering service".to_string()),
                    ..EntityPatch::default()
                },
            )
            .unwrap();
        assert_eq!(updated.version, before + 1);
        assert_eq!(
            g.get_entity("s1").unwrap().description,
            "primary ordering service"
        );
    }

    #[test]
    fn test_update_entity_rejects_kind_change() {
        let mut g = seeded();
        let err = g
            .update_entity("s1", EntityPatch::body(EntityBody::Person(PersonBody::default())))
            .unwrap_err();
        assert!(matches!(err, GraphError::Validation(_)));
        // Version unchanged after the rejected patch.
        assert_eq!(g.get_entity("s1").unwrap().version, 1);
    }

    #[test]
    fn test_remove_entity_cascades() {
        let mut g = seeded();
        assert!(g.remove_entity("s2").unwrap());
        assert_eq!(g.relationships().len(), 0);
        assert!(!g.remove_entity("s2").unwrap());
        for rel in g.relationships() {
            assert_ne!(rel.source_id, "s2");
            assert_ne!(rel.target_id, "s2");
        }
    }

    #[test]
    fn test_list_entities_stable_order_and_filters() {
        let mut g = MemoryGraph::new();
        g.add_entities_bulk(vec![
            system("s1"),
            department("eng"),
            system("s2"),
            department("sales"),
        ])
        .unwrap();
        let all: Vec<&str> = g
            .list_entities(None, None)
            .iter()
            .map(|e| e.id.as_str())
            .collect();
        assert_eq!(all, vec!["s1", "eng", "s2", "sales"]);
        let departments: Vec<&str> = g
            .list_entities(Some(EntityKind::Department), Some(1))
            .iter()
            .map(|e| e.id.as_str())
            .collect();
        assert_eq!(departments, vec!["eng"]);
    }

    #[test]
    fn test_neighbors_directional_filters() {
        let g = seeded();
        let out: Vec<&str> = g
            .neighbors("s2", Direction::Out, None, None)
            .unwrap()
            .iter()
            .map(|e| e.id.as_str())
            .collect();
        assert_eq!(out, vec!["d1"]);
        let inbound: Vec<&str> = g
            .neighbors("s2", Direction::In, None, None)
            .unwrap()
            .iter()
            .map(|e| e.id.as_str())
            .collect();
        assert_eq!(inbound, vec!["s1"]);
        let both = g.neighbors("s2", Direction::Both, None, None).unwrap();
        assert_eq!(both.len(), 2);
        let assets = g
            .neighbors("s2", Direction::Both, None, Some(EntityKind::DataAsset))
            .unwrap();
        assert_eq!(assets.len(), 1);
    }

    #[test]
    fn test_shortest_path_undirected_and_degenerate() {
        let g = seeded();
        // d1 -> s1 requires walking both edges against their direction.
        let path = g.shortest_path("d1", "s1").unwrap().unwrap();
        assert_eq!(path, vec!["d1", "s2", "s1"]);
        assert_eq!(g.shortest_path("s1", "s1").unwrap().unwrap(), vec!["s1"]);
    }

    #[test]
    fn test_shortest_path_unreachable_is_none() {
        let mut g = seeded();
        g.add_entity(system("island")).unwrap();
        assert!(g.shortest_path("s1", "island").unwrap().is_none());
        assert!(g.shortest_path("s1", "ghost").is_err());
    }

    #[test]
    fn test_blast_radius_layers() {
        let g = seeded();
        let radius = g.blast_radius("s1", 2).unwrap();
        assert_eq!(radius[&0], vec!["s1"]);
        assert_eq!(radius[&1], vec!["s2"]);
        assert_eq!(radius[&2], vec!["d1"]);
        let shallow = g.blast_radius("s1", 1).unwrap();
        assert!(!shallow.contains_key(&2));
        let zero = g.blast_radius("s1", 0).unwrap();
        assert_eq!(zero.len(), 1);
        assert_eq!(zero[&0], vec!["s1"]);
    }

    #[test]
    fn test_degree_centrality_normalised() {
        let g = seeded();
        let scores = g.degree_centrality();
        // s2 touches both edges; n - 1 == 2.
        assert!((scores["s2"] - 1.0).abs() < 1e-9);
        assert!((scores["s1"] - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_most_connected_ranks_by_degree() {
        let g = seeded();
        let top = g.most_connected(2);
        assert_eq!(top[0].0, "s2");
        assert_eq!(top[0].1, 2);
    }

    #[test]
    fn test_betweenness_middle_node_dominates() {
        let g = seeded();
        let scores = g.betweenness_centrality().unwrap();
        assert!(scores["s2"] > scores["s1"]);
        assert!(scores["s2"] > scores["d1"]);
    }

    #[test]
    fn test_pagerank_sums_to_one() {
        let g = seeded();
        let scores = g.pagerank().unwrap();
        let total: f64 = scores.values().sum();
        assert!((total - 1.0).abs() < 1e-3);
        // Sink of the chain accumulates the most rank.
        assert!(scores["d1"] > scores["s1"]);
    }

    #[test]
    fn test_statistics() {
        let g = seeded();
        let stats = g.statistics();
        assert_eq!(stats.entity_count, 3);
        assert_eq!(stats.relationship_count, 2);
        assert_eq!(stats.entities_by_type["system"], 2);
        assert_eq!(stats.relationships_by_type["depends_on"], 1);
        assert!(stats.is_weakly_connected);
        assert!((stats.density - 2.0 / 6.0).abs() < 1e-9);
    }

    #[test]
    fn test_statistics_counts_components() {
        let mut g = seeded();
        g.add_entity(system("island")).unwrap();
        let stats = g.statistics();
        assert_eq!(stats.weakly_connected_components, 2);
        assert!(!stats.is_weakly_connected);
    }

    #[test]
    fn test_clear() {
        let mut g = seeded();
        g.clear();
        assert_eq!(g.entities().len(), 0);
        assert_eq!(g.relationships().len(), 0);
        assert_eq!(g.statistics().entity_count, 0);
    }
}
