//! Graph state service: the process-wide holder of the loaded engine.
//!
//! A [`GraphState`] value is owned by the process and handed to every
//! transport handler; there is no module-level singleton. A
//! single-writer / multi-reader lock protects the engine: read tools
//! take the shared lock for their serialisation pass, write tools take
//! the exclusive lock for validate-mutate-persist, and the mtime reload
//! path takes the exclusive lock to swap engines.
//!
//! Staleness is detected synchronously: every access stats the loaded
//! path and, when the mtime moved, re-imports into a fresh engine before
//! serving. No background thread, no file watcher. Any failure on the
//! reload path keeps the previously loaded graph.

use std::fs;
use std::io::Write as _;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use parking_lot::RwLock;

use crate::config::Config;
use crate::engine::GraphEngine;
use crate::error::{GraphError, Result};
use crate::export;

struct StateInner {
    engine: Option<Box<dyn GraphEngine>>,
    loaded_path: Option<PathBuf>,
    loaded_mtime: Option<SystemTime>,
}

/// Shared, lock-protected graph state.
pub struct GraphState {
    inner: RwLock<StateInner>,
    strict: bool,
    backend: String,
}

impl GraphState {
    #[must_use]
    pub fn new(strict: bool) -> Self {
        Self {
            inner: RwLock::new(StateInner {
                engine: None,
                loaded_path: None,
                loaded_mtime: None,
            }),
            strict,
            backend: crate::engine::memory::BACKEND_NAME.to_string(),
        }
    }

    /// Use a named factory backend for imports instead of the default.
    #[must_use]
    pub fn with_backend(mut self, backend: impl Into<String>) -> Self {
        self.backend = backend.into();
        self
    }

    /// Build state from ambient configuration and try the default path.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        let state = Self::new(config.strict).with_backend(config.backend.clone());
        state.auto_load_default(config);
        state
    }

    /// Read and import the canonical file through the configured backend.
    fn import_file(&self, path: &Path) -> Result<Box<dyn GraphEngine>> {
        let text = fs::read_to_string(path)
            .map_err(|e| GraphError::Persistence(format!("{}: {e}", path.display())))?;
        let document = export::parse_document(&text)?;
        export::import_document_into(crate::engine::create_engine(&self.backend)?, document, self.strict)
    }

    /// Load the configured default graph if it exists; a missing file is
    /// not an error, the process simply starts with no graph.
    pub fn auto_load_default(&self, config: &Config) {
        let Some(path) = &config.default_path else {
            return;
        };
        if !path.exists() {
            tracing::debug!(path = %path.display(), "default graph file absent; starting empty");
            return;
        }
        match self.load(path) {
            Ok((entities, relationships)) => {
                tracing::info!(
                    path = %path.display(),
                    entities,
                    relationships,
                    "loaded default graph"
                );
            }
            Err(err) => {
                tracing::warn!(path = %path.display(), %err, "failed to load default graph");
            }
        }
    }

    /// Import a canonical graph file and make it the served graph.
    /// Returns `(entity_count, relationship_count)`.
    pub fn load(&self, path: &Path) -> Result<(usize, usize)> {
        let engine = self.import_file(path)?;
        let stats = engine.statistics();
        let mtime = fs::metadata(path).and_then(|m| m.modified()).ok();
        let mut inner = self.inner.write();
        inner.engine = Some(engine);
        inner.loaded_path = Some(path.to_path_buf());
        inner.loaded_mtime = mtime;
        Ok((stats.entity_count, stats.relationship_count))
    }

    /// Adopt an already-built engine (e.g. fresh out of the generator).
    pub fn adopt(&self, engine: Box<dyn GraphEngine>, path: Option<PathBuf>) {
        let mtime = path
            .as_deref()
            .and_then(|p| fs::metadata(p).and_then(|m| m.modified()).ok());
        let mut inner = self.inner.write();
        inner.engine = Some(engine);
        inner.loaded_path = path;
        inner.loaded_mtime = mtime;
    }

    /// Path of the currently served graph file, if any.
    #[must_use]
    pub fn loaded_path(&self) -> Option<PathBuf> {
        self.inner.read().loaded_path.clone()
    }

    /// Run a read-only closure against the current graph under the
    /// shared lock, reloading first if the file changed on disk.
    pub fn with_graph<R>(&self, f: impl FnOnce(&dyn GraphEngine) -> Result<R>) -> Result<R> {
        self.reload_if_stale();
        let inner = self.inner.read();
        let engine = inner.engine.as_deref().ok_or(GraphError::NoGraphLoaded)?;
        f(engine)
    }

    /// Run a mutating closure under the exclusive lock, then persist the
    /// result to the loaded path. If the closure fails nothing is
    /// persisted; if persistence fails the error surfaces to the caller.
    pub fn with_graph_mut<R>(
        &self,
        f: impl FnOnce(&mut dyn GraphEngine) -> Result<R>,
    ) -> Result<R> {
        self.reload_if_stale();
        let mut guard = self.inner.write();
        let inner = &mut *guard;
        let engine = inner.engine.as_deref_mut().ok_or(GraphError::NoGraphLoaded)?;
        let result = f(engine)?;
        if let Some(path) = &inner.loaded_path {
            let engine = inner
                .engine
                .as_deref()
                .ok_or_else(|| GraphError::Internal("engine vanished during write".to_string()))?;
            inner.loaded_mtime = Some(persist_graph(engine, path)?);
        }
        Ok(result)
    }

    /// Step 2-3 of the access protocol: stat the loaded path and swap in
    /// a freshly imported engine when the file changed underneath us.
    fn reload_if_stale(&self) {
        let (path, known_mtime) = {
            let inner = self.inner.read();
            (inner.loaded_path.clone(), inner.loaded_mtime)
        };
        let Some(path) = path else {
            return;
        };
        let disk_mtime = match fs::metadata(&path).and_then(|m| m.modified()) {
            Ok(mtime) => mtime,
            Err(err) => {
                // Keep serving the resident graph rather than dropping
                // state over a transient stat failure.
                tracing::warn!(path = %path.display(), %err, "stat failed; keeping loaded graph");
                return;
            }
        };
        if known_mtime == Some(disk_mtime) {
            return;
        }
        match self.import_file(&path) {
            Ok(engine) => {
                let mut inner = self.inner.write();
                // Another thread may have raced the reload; last parse wins.
                inner.engine = Some(engine);
                inner.loaded_mtime = Some(disk_mtime);
                tracing::info!(path = %path.display(), "reloaded graph after external change");
            }
            Err(err) => {
                tracing::warn!(
                    path = %path.display(),
                    %err,
                    "external change failed to parse; keeping loaded graph"
                );
            }
        }
    }
}

/// Atomic persist: canonical JSON into a temporary sibling, fsync,
/// rename over the target, then report the post-rename mtime.
///
/// Updating the recorded mtime only after the rename is what keeps our
/// own writes from looking like external changes on the next stat.
pub fn persist_graph(engine: &dyn GraphEngine, path: &Path) -> Result<SystemTime> {
    let json = export::export_json(engine)?;
    let parent = path.parent().unwrap_or_else(|| Path::new("."));
    let temp_path = parent.join(format!(
        ".{}.tmp",
        path.file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "graph.json".to_string())
    ));
    {
        let mut file = fs::File::create(&temp_path)
            .map_err(|e| GraphError::Persistence(format!("{}: {e}", temp_path.display())))?;
        file.write_all(json.as_bytes())
            .map_err(|e| GraphError::Persistence(format!("{}: {e}", temp_path.display())))?;
        file.sync_all()
            .map_err(|e| GraphError::Persistence(format!("{}: {e}", temp_path.display())))?;
    }
    fs::rename(&temp_path, path)
        .map_err(|e| GraphError::Persistence(format!("{}: {e}", path.display())))?;
    fs::metadata(path)
        .and_then(|m| m.modified())
        .map_err(|e| GraphError::Persistence(format!("{}: {e}", path.display())))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::engine::default_engine;
    use crate::model::{Entity, EntityBody, SystemBody};

    fn engine_with(ids: &[&str]) -> Box<dyn GraphEngine> {
        let mut engine = default_engine();
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

    #[test]
    fn test_no_graph_loaded() {
        let state = GraphState::new(false);
        let err = state.with_graph(|_| Ok(())).unwrap_err();
        assert!(matches!(err, GraphError::NoGraphLoaded));
    }

    #[test]
    fn test_load_and_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("graph.json");
        export::write_graph_file(engine_with(&["a", "b"]).as_ref(), &path).unwrap();

        let state = GraphState::new(false);
        let (entities, relationships) = state.load(&path).unwrap();
        assert_eq!((entities, relationships), (2, 0));
        let count = state
            .with_graph(|engine| Ok(engine.statistics().entity_count))
            .unwrap();
        assert_eq!(count, 2);
    }

    #[test]
    fn test_external_change_is_picked_up() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("graph.json");
        export::write_graph_file(engine_with(&["a"]).as_ref(), &path).unwrap();

        let state = GraphState::new(false);
        state.load(&path).unwrap();
        assert_eq!(
            state.with_graph(|e| Ok(e.statistics().entity_count)).unwrap(),
            1
        );

        // Overwrite externally with a different valid graph and force a
        // distinct mtime.
        export::write_graph_file(engine_with(&["a", "b", "c"]).as_ref(), &path).unwrap();
        let bumped = SystemTime::now() + std::time::Duration::from_secs(2);
        let file = fs::File::options().append(true).open(&path).unwrap();
        file.set_modified(bumped).unwrap();

        assert_eq!(
            state.with_graph(|e| Ok(e.statistics().entity_count)).unwrap(),
            3
        );
    }

    #[test]
    fn test_parse_failure_keeps_previous_graph() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("graph.json");
        export::write_graph_file(engine_with(&["a", "b"]).as_ref(), &path).unwrap();

        let state = GraphState::new(false);
        state.load(&path).unwrap();

        fs::write(&path, "{ this is not json").unwrap();
        let bumped = SystemTime::now() + std::time::Duration::from_secs(2);
        let file = fs::File::options().append(true).open(&path).unwrap();
        file.set_modified(bumped).unwrap();

        // Old graph still served.
        assert_eq!(
            state.with_graph(|e| Ok(e.statistics().entity_count)).unwrap(),
            2
        );
    }

    #[test]
    fn test_write_persists_and_mtime_tracks() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("graph.json");
        export::write_graph_file(engine_with(&["a"]).as_ref(), &path).unwrap();

        let state = GraphState::new(false);
        state.load(&path).unwrap();
        state
            .with_graph_mut(|engine| {
                engine.add_entity(
                    Entity::new("added", EntityBody::System(SystemBody::default()))
                        .with_id("b"),
                )
            })
            .unwrap();

        // The persisted file reflects the mutation...
        let reloaded = export::load_graph_file(&path, false).unwrap();
        assert_eq!(reloaded.statistics().entity_count, 2);
        // ...and the recorded mtime matches the file, so the next read
        // does not self-trigger a reload.
        assert_eq!(
            state.with_graph(|e| Ok(e.statistics().entity_count)).unwrap(),
            2
        );
    }

    #[test]
    fn test_auto_load_missing_default_is_silent() {
        let config = Config {
            default_path: Some(PathBuf::from("/nonexistent/graph.json")),
            strict: false,
            backend: "memory".to_string(),
        };
        let state = GraphState::from_config(&config);
        assert!(matches!(
            state.with_graph(|_| Ok(())).unwrap_err(),
            GraphError::NoGraphLoaded
        ));
    }

    #[test]
    fn test_adopted_engine_without_path_skips_persistence() {
        let state = GraphState::new(false);
        state.adopt(engine_with(&["a"]), None);
        state
            .with_graph_mut(|engine| {
                engine.add_entity(
                    Entity::new("b", EntityBody::System(SystemBody::default())).with_id("b"),
                )
            })
            .unwrap();
        assert_eq!(
            state.with_graph(|e| Ok(e.statistics().entity_count)).unwrap(),
            2
        );
    }
}
