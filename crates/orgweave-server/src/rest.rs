//! REST adapter: the tool registry mapped onto HTTP routes.
//!
//! Every handler funnels into the same dispatcher the ATP pipe uses, so
//! the two surfaces cannot drift. Path identifiers are validated against
//! the shared id format and rejected with a generic message that never
//! echoes the input.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use orgweave::{model::is_valid_id, tools, GraphError, GraphState};
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::net::TcpListener;

use crate::error::ApiError;

type AppState = Arc<GraphState>;
type ApiResult = Result<Json<Value>, ApiError>;

/// Server configuration.
#[derive(Debug, Clone)]
pub struct RestConfig {
    pub bind_addr: SocketAddr,
}

impl Default for RestConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 7430)),
        }
    }
}

impl RestConfig {
    #[must_use]
    pub fn with_port(mut self, port: u16) -> Self {
        self.bind_addr.set_port(port);
        self
    }
}

/// REST server over shared graph state.
pub struct RestServer {
    config: RestConfig,
    state: AppState,
}

impl RestServer {
    #[must_use]
    pub fn new(state: AppState, config: RestConfig) -> Self {
        Self { config, state }
    }

    /// Build the full route table.
    #[must_use]
    pub fn router(&self) -> Router {
        build_router(Arc::clone(&self.state))
    }

    /// Bind and serve until the process ends.
    pub async fn run(self) -> std::io::Result<()> {
        let listener = TcpListener::bind(self.config.bind_addr).await?;
        tracing::info!(addr = %self.config.bind_addr, "REST adapter listening");
        axum::serve(listener, self.router()).await
    }
}

/// Route table shared by the server and the handler tests.
#[must_use]
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/statistics", get(statistics))
        .route("/entities", get(list_entities))
        .route("/entities/:id", get(get_entity))
        .route("/entities/:id/neighbors", get(get_neighbors))
        .route("/path/:source/:target", get(shortest_path))
        .route("/blast-radius/:id", get(blast_radius))
        .route("/centrality", get(centrality))
        .route("/most-connected", get(most_connected))
        .route("/search", get(search))
        .route("/ask", post(ask))
        .route("/load", post(load))
        .route("/openai/tools", get(openai_tools))
        .route("/openai/call", post(openai_call))
        .layer(tower_http::trace::TraceLayer::new_for_http())
        .with_state(state)
}

/// Reject malformed path identifiers without echoing them back.
fn checked_id(id: &str) -> Result<(), ApiError> {
    if is_valid_id(id) {
        Ok(())
    } else {
        Err(ApiError(GraphError::Validation(
            "invalid identifier".to_string(),
        )))
    }
}

fn run_tool(state: &GraphState, tool: &str, arguments: Value) -> ApiResult {
    Ok(Json(tools::dispatch(state, tool, &arguments)?))
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

async fn statistics(State(state): State<AppState>) -> ApiResult {
    run_tool(&state, "get_statistics", json!({}))
}

#[derive(Debug, Deserialize)]
struct ListParams {
    #[serde(rename = "type")]
    entity_type: Option<String>,
    limit: Option<usize>,
}

async fn list_entities(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> ApiResult {
    let mut arguments = json!({});
    if let Some(entity_type) = params.entity_type {
        arguments["type"] = json!(entity_type);
    }
    if let Some(limit) = params.limit {
        arguments["limit"] = json!(limit);
    }
    run_tool(&state, "list_entities", arguments)
}

async fn get_entity(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult {
    checked_id(&id)?;
    run_tool(&state, "get_entity", json!({ "id": id }))
}

#[derive(Debug, Deserialize)]
struct NeighborParams {
    direction: Option<String>,
    relationship_type: Option<String>,
}

async fn get_neighbors(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(params): Query<NeighborParams>,
) -> ApiResult {
    checked_id(&id)?;
    let mut arguments = json!({ "id": id });
    if let Some(direction) = params.direction {
        arguments["direction"] = json!(direction);
    }
    if let Some(relationship_type) = params.relationship_type {
        arguments["relationship_type"] = json!(relationship_type);
    }
    run_tool(&state, "get_neighbors", arguments)
}

async fn shortest_path(
    State(state): State<AppState>,
    Path((source, target)): Path<(String, String)>,
) -> ApiResult {
    checked_id(&source)?;
    checked_id(&target)?;
    run_tool(
        &state,
        "find_shortest_path",
        json!({ "source_id": source, "target_id": target }),
    )
}

#[derive(Debug, Deserialize)]
struct BlastParams {
    max_depth: Option<usize>,
}

async fn blast_radius(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(params): Query<BlastParams>,
) -> ApiResult {
    checked_id(&id)?;
    let mut arguments = json!({ "id": id });
    if let Some(max_depth) = params.max_depth {
        arguments["max_depth"] = json!(max_depth);
    }
    run_tool(&state, "get_blast_radius", arguments)
}

#[derive(Debug, Deserialize)]
struct CentralityParams {
    metric: Option<String>,
    top_n: Option<usize>,
}

async fn centrality(
    State(state): State<AppState>,
    Query(params): Query<CentralityParams>,
) -> ApiResult {
    let mut arguments = json!({ "metric": params.metric.unwrap_or_else(|| "degree".to_string()) });
    if let Some(top_n) = params.top_n {
        arguments["top_n"] = json!(top_n);
    }
    run_tool(&state, "compute_centrality", arguments)
}

#[derive(Debug, Deserialize)]
struct TopNParams {
    top_n: Option<usize>,
}

async fn most_connected(
    State(state): State<AppState>,
    Query(params): Query<TopNParams>,
) -> ApiResult {
    let mut arguments = json!({});
    if let Some(top_n) = params.top_n {
        arguments["top_n"] = json!(top_n);
    }
    run_tool(&state, "find_most_connected", arguments)
}

#[derive(Debug, Deserialize)]
struct SearchParams {
    q: String,
    #[serde(rename = "type")]
    entity_type: Option<String>,
    limit: Option<usize>,
}

async fn search(State(state): State<AppState>, Query(params): Query<SearchParams>) -> ApiResult {
    let mut arguments = json!({ "query": params.q });
    if let Some(entity_type) = params.entity_type {
        arguments["type"] = json!(entity_type);
    }
    if let Some(limit) = params.limit {
        arguments["limit"] = json!(limit);
    }
    run_tool(&state, "search_entities", arguments)
}

#[derive(Debug, Deserialize)]
struct AskBody {
    question: String,
    #[serde(default)]
    limit: Option<usize>,
}

/// Thin wrapper over search plus one hop of neighbour expansion: the
/// best-matching entity comes back with its immediate context.
async fn ask(State(state): State<AppState>, Json(body): Json<AskBody>) -> ApiResult {
    let limit = body.limit.unwrap_or(5);
    let matches = tools::dispatch(
        &state,
        "search_entities",
        &json!({ "query": body.question, "limit": limit }),
    )?;
    let context = matches
        .as_array()
        .and_then(|hits| hits.first())
        .and_then(|hit| hit.get("id"))
        .and_then(Value::as_str)
        .map(|id| {
            let entity = tools::dispatch(&state, "get_entity", &json!({ "id": id }))?;
            let neighbors = tools::dispatch(&state, "get_neighbors", &json!({ "id": id }))?;
            Ok::<Value, GraphError>(json!({ "entity": entity, "neighbors": neighbors }))
        })
        .transpose()?;
    Ok(Json(json!({ "matches": matches, "context": context })))
}

#[derive(Debug, Deserialize)]
struct LoadBody {
    path: String,
}

async fn load(State(state): State<AppState>, Json(body): Json<LoadBody>) -> ApiResult {
    run_tool(&state, "load_graph", json!({ "path": body.path }))
}

async fn openai_tools() -> Json<Value> {
    Json(tools::openai_tool_definitions())
}

#[derive(Debug, Deserialize)]
struct OpenAiCallBody {
    name: String,
    #[serde(default)]
    arguments: Value,
}

async fn openai_call(State(state): State<AppState>, Json(body): Json<OpenAiCallBody>) -> ApiResult {
    let arguments = if body.arguments.is_null() {
        json!({})
    } else {
        body.arguments
    };
    run_tool(&state, &body.name, arguments)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use orgweave::model::{Entity, EntityBody, Relationship, SystemBody};
    use orgweave::RelationshipKind;
    use tower::util::ServiceExt;

    fn loaded_router() -> Router {
        let mut engine = orgweave::default_engine();
        engine
            .add_entities_bulk(vec![
                Entity::new("Orders API", EntityBody::System(SystemBody::default()))
                    .with_id("sys-1"),
                Entity::new("Ledger DB", EntityBody::System(SystemBody::default()))
                    .with_id("sys-2"),
            ])
            .unwrap();
        engine
            .add_relationship(Relationship::new(
                RelationshipKind::DependsOn,
                "sys-1",
                "sys-2",
            ))
            .unwrap();
        let state = GraphState::new(false);
        state.adopt(engine, None);
        build_router(Arc::new(state))
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_statistics_route() {
        let router = loaded_router();
        let response = router
            .oneshot(Request::builder().uri("/statistics").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let value = body_json(response).await;
        assert_eq!(value["entity_count"], 2);
    }

    #[tokio::test]
    async fn test_entity_route_and_compact_shape() {
        let router = loaded_router();
        let response = router
            .oneshot(
                Request::builder()
                    .uri("/entities/sys-1")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let value = body_json(response).await;
        assert_eq!(value["entity_type"], "system");
        assert!(value.get("created_at").is_none());
    }

    #[tokio::test]
    async fn test_bad_path_id_is_generic_400() {
        let router = loaded_router();
        let response = router
            .oneshot(
                Request::builder()
                    .uri("/entities/definitely%20not%20ok")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let value = body_json(response).await;
        assert_eq!(value["error"]["message"], "invalid identifier");
    }

    #[tokio::test]
    async fn test_unknown_entity_is_404() {
        let router = loaded_router();
        let response = router
            .oneshot(
                Request::builder()
                    .uri("/entities/missing-id")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_path_route_returns_bare_id_array() {
        let router = loaded_router();
        let response = router
            .oneshot(
                Request::builder()
                    .uri("/path/sys-1/sys-2")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let value = body_json(response).await;
        assert_eq!(value[0], "sys-1");
        assert_eq!(value[1], "sys-2");
    }

    #[tokio::test]
    async fn test_no_graph_is_503() {
        let router = build_router(Arc::new(GraphState::new(false)));
        let response = router
            .oneshot(Request::builder().uri("/statistics").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_openai_call_roundtrip() {
        let router = loaded_router();
        let response = router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/openai/call")
                    .header("content-type", "application/json")
                    .body(Body::from(
                        serde_json::to_vec(&json!({
                            "name": "get_statistics",
                            "arguments": {}
                        }))
                        .unwrap(),
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let value = body_json(response).await;
        assert_eq!(value["relationship_count"], 1);
    }

    #[tokio::test]
    async fn test_ask_returns_context() {
        let router = loaded_router();
        let response = router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/ask")
                    .header("content-type", "application/json")
                    .body(Body::from(
                        serde_json::to_vec(&json!({"question": "orders api"})).unwrap(),
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let value = body_json(response).await;
        assert_eq!(value["context"]["entity"]["id"], "sys-1");
        assert_eq!(value["context"]["neighbors"][0]["id"], "sys-2");
    }
}
