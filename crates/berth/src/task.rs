//! Task file parsing.

use std::path::Path;

use berth_mount::MountSpec;
use serde::{Deserialize, Serialize};

/// A task file listing the mounts a task requests.
///
/// ```yaml
/// name: web
/// mounts:
///   - type: bind
///     source: /srv/www
///     target: /usr/share/nginx/html
///   - type: tmpfs
///     target: /run
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaskSpec {
    /// Task name.
    #[serde(default)]
    pub name: Option<String>,

    /// Mount declarations, in order.
    #[serde(default)]
    pub mounts: Vec<MountSpec>,
}

impl TaskSpec {
    /// Parse from YAML.
    pub fn from_yaml(yaml: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }

    /// Parse from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Parse from file. Files ending in `.json` are read as JSON, anything
    /// else as YAML.
    pub fn from_file(path: &Path) -> Result<Self, TaskSpecError> {
        let content = std::fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        let spec = if is_json {
            Self::from_json(&content)?
        } else {
            Self::from_yaml(&content)?
        };
        tracing::debug!(
            path = %path.display(),
            mounts = spec.mounts.len(),
            "Loaded task file"
        );
        Ok(spec)
    }

    /// Get the task name.
    pub fn task_name(&self) -> &str {
        self.name.as_deref().unwrap_or("default")
    }
}

/// Task file parsing errors.
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum TaskSpecError {
    /// I/O error.
    #[error("Failed to read task file: {0}")]
    #[diagnostic(code(berth::task::io))]
    Io(#[from] std::io::Error),
    /// YAML parse error.
    #[error("Failed to parse task file: {0}")]
    #[diagnostic(code(berth::task::parse))]
    Yaml(#[from] serde_yaml::Error),
    /// JSON parse error.
    #[error("Failed to parse task file: {0}")]
    #[diagnostic(code(berth::task::parse))]
    Json(#[from] serde_json::Error),
}
