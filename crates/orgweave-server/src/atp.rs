//! ATP transport: line-delimited JSON tool calls on stdio.
//!
//! One request per line, one response per line. Request shape is
//! `{"tool": "...", "arguments": {...}}`; the reply is either
//! `{"result": ...}` or `{"error": {"kind": ..., "message": ...}}` with
//! the closed error-kind set. The loop ends when the peer closes stdin.

use std::sync::Arc;

use orgweave::{tools, GraphState};
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

#[derive(Debug, Deserialize)]
struct AtpRequest {
    tool: String,
    #[serde(default)]
    arguments: Value,
}

/// Handle one request line, producing one reply line (without the
/// trailing newline).
#[must_use]
pub fn handle_line(state: &GraphState, line: &str) -> String {
    let reply = match serde_json::from_str::<AtpRequest>(line) {
        Ok(request) => {
            let arguments = if request.arguments.is_null() {
                json!({})
            } else {
                request.arguments
            };
            match tools::dispatch(state, &request.tool, &arguments) {
                Ok(result) => json!({ "result": result }),
                Err(err) => {
                    tracing::debug!(tool = %request.tool, %err, "tool call failed");
                    json!({ "error": { "kind": err.kind(), "message": err.public_message() } })
                }
            }
        }
        Err(err) => {
            tracing::debug!(%err, "unparseable request line");
            json!({ "error": { "kind": "validation", "message": "malformed request" } })
        }
    };
    reply.to_string()
}

/// Serve tool calls over stdin/stdout until the pipe closes.
pub async fn serve_stdio(state: Arc<GraphState>) -> std::io::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();
    tracing::info!("ATP pipe ready on stdio");
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        let reply = handle_line(&state, line.trim());
        stdout.write_all(reply.as_bytes()).await?;
        stdout.write_all(b"\n").await?;
        stdout.flush().await?;
    }
    tracing::info!("ATP pipe closed");
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use orgweave::model::{Entity, EntityBody, SystemBody};

    fn loaded_state() -> GraphState {
        let mut engine = orgweave::default_engine();
        engine
            .add_entity(
                Entity::new("Orders API", EntityBody::System(SystemBody::default()))
                    .with_id("sys-1"),
            )
            .unwrap();
        let state = GraphState::new(false);
        state.adopt(engine, None);
        state
    }

    #[test]
    fn test_success_reply_shape() {
        let state = loaded_state();
        let reply = handle_line(&state, r#"{"tool": "get_statistics"}"#);
        let value: Value = serde_json::from_str(&reply).unwrap();
        assert_eq!(value["result"]["entity_count"], 1);
        assert!(value.get("error").is_none());
    }

    #[test]
    fn test_error_reply_carries_kind() {
        let state = GraphState::new(false);
        let reply = handle_line(&state, r#"{"tool": "get_statistics"}"#);
        let value: Value = serde_json::from_str(&reply).unwrap();
        assert_eq!(value["error"]["kind"], "no_graph_loaded");
    }

    #[test]
    fn test_malformed_line_does_not_echo_input() {
        let state = loaded_state();
        let reply = handle_line(&state, "{\"tool\": \"get_entity\", \"arguments\": ");
        let value: Value = serde_json::from_str(&reply).unwrap();
        assert_eq!(value["error"]["kind"], "validation");
        assert_eq!(value["error"]["message"], "malformed request");
    }

    #[test]
    fn test_one_line_one_json_object() {
        let state = loaded_state();
        let reply = handle_line(
            &state,
            r#"{"tool": "list_entities", "arguments": {"type": "system"}}"#,
        );
        assert!(!reply.contains('\n'));
        let value: Value = serde_json::from_str(&reply).unwrap();
        assert_eq!(value["result"][0]["id"], "sys-1");
    }
}
