//! Ambient configuration from the environment.

use std::path::PathBuf;

/// Canonical graph file loaded at process start.
pub const ENV_DEFAULT_PATH: &str = "GRAPH_DEFAULT_PATH";
/// Truthy values make imports reject unknown entity fields.
pub const ENV_STRICT: &str = "GRAPH_STRICT";
/// Backend name for the engine factory.
pub const ENV_BACKEND: &str = "GRAPH_BACKEND";

/// Resolved ambient configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub default_path: Option<PathBuf>,
    pub strict: bool,
    pub backend: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_path: None,
            strict: false,
            backend: crate::engine::memory::BACKEND_NAME.to_string(),
        }
    }
}

fn truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

impl Config {
    /// Read the three ambient variables once, at startup.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            default_path: std::env::var_os(ENV_DEFAULT_PATH).map(PathBuf::from),
            strict: std::env::var(ENV_STRICT).map_or(false, |v| truthy(&v)),
            backend: std::env::var(ENV_BACKEND)
                .unwrap_or_else(|_| crate::engine::memory::BACKEND_NAME.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truthy_values() {
        assert!(truthy("1"));
        assert!(truthy("TRUE"));
        assert!(truthy(" yes "));
        assert!(!truthy("0"));
        assert!(!truthy("off"));
        assert!(!truthy(""));
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.default_path.is_none());
        assert!(!config.strict);
        assert_eq!(config.backend, "memory");
    }
}
