use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use eventform::EventTemplate;

/// Project context for eventform operations
pub struct ProjectContext {
    /// Directory the context was resolved against
    #[allow(dead_code)]
    pub project_root: PathBuf,
    /// Path to .eventform directory
    pub eventform_dir: PathBuf,
    /// Path to config file
    pub config_path: PathBuf,
    /// Directory holding admin-authored template JSON files
    pub templates_dir: PathBuf,
    /// Loaded configuration
    pub config: Option<EventformConfig>,
}

/// Configuration stored in .eventform/config.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventformConfig {
    #[serde(default)]
    pub eventform: EventformSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventformSettings {
    #[serde(default = "default_templates_dir")]
    pub templates_dir: String,
}

impl Default for EventformSettings {
    fn default() -> Self {
        Self {
            templates_dir: default_templates_dir(),
        }
    }
}

fn default_templates_dir() -> String {
    ".eventform/templates".to_string()
}

impl ProjectContext {
    /// Find and load project context from current directory or ancestors
    pub fn find() -> Result<Self> {
        let current_dir = std::env::current_dir().context("Failed to get current directory")?;
        Self::find_from(&current_dir)
    }

    /// Find project context starting from the given directory
    pub fn find_from(start: &Path) -> Result<Self> {
        let project_root = Self::find_project_root(start);
        Self::from_root(project_root)
    }

    /// Create context from a known project root
    pub fn from_root(project_root: PathBuf) -> Result<Self> {
        let eventform_dir = project_root.join(".eventform");
        let config_path = eventform_dir.join("config.toml");

        // Load config if it exists
        let config = if config_path.exists() {
            let content = std::fs::read_to_string(&config_path).context("Failed to read config.toml")?;
            let config: EventformConfig = toml::from_str(&content).context("Failed to parse config.toml")?;
            Some(config)
        } else {
            None
        };

        let templates_dir = if let Some(ref cfg) = config {
            project_root.join(&cfg.eventform.templates_dir)
        } else {
            eventform_dir.join("templates")
        };

        Ok(Self {
            project_root,
            eventform_dir,
            config_path,
            templates_dir,
            config,
        })
    }

    /// Find the nearest ancestor carrying a .eventform directory; commands
    /// that only read the built-in catalog work from anywhere, so the start
    /// directory is the fallback rather than an error.
    fn find_project_root(start: &Path) -> PathBuf {
        let mut current = start.to_path_buf();

        loop {
            if current.join(".eventform").exists() {
                return current;
            }

            if !current.pop() {
                return start.to_path_buf();
            }
        }
    }

    /// Check if eventform is initialized in this project
    pub fn is_initialized(&self) -> bool {
        self.eventform_dir.exists() && self.config_path.exists()
    }

    /// Load admin-authored templates stored as JSON files next to the
    /// config. Missing directory means no extra templates, not an error.
    pub async fn load_local_templates(&self) -> Result<Vec<EventTemplate>> {
        if !self.templates_dir.exists() {
            return Ok(Vec::new());
        }

        let mut templates = Vec::new();
        let mut entries = tokio::fs::read_dir(&self.templates_dir)
            .await
            .with_context(|| format!("Failed to read {}", self.templates_dir.display()))?;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }
            let content = tokio::fs::read_to_string(&path)
                .await
                .with_context(|| format!("Failed to read {}", path.display()))?;
            let template: EventTemplate =
                serde_json::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))?;
            templates.push(template);
        }
        templates.sort_by(|a, b| a.key.cmp(&b.key));
        Ok(templates)
    }
}
