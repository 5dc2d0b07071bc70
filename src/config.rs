// src/config.rs
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

pub const DEFAULT_CONFIG_FILE: &str = "config.yaml";
pub const DEFAULT_TEMPLATE_FILE: &str = "resume_template.html";
pub const TEMPLATES_ENV: &str = "CV_RENDERER_TEMPLATES";
pub const RASTERIZER_ENV: &str = "CV_RENDERER_RASTERIZER";

/// External HTML to PDF program. `{input}` and `{output}` in `args` are
/// replaced with the HTML and PDF paths.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RasterizerConfig {
    pub program: String,
    pub args: Vec<String>,
}

impl Default for RasterizerConfig {
    fn default() -> Self {
        Self {
            program: "weasyprint".to_string(),
            args: vec!["{input}".to_string(), "{output}".to_string()],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RendererConfig {
    pub templates_path: PathBuf,
    pub template_file: String,
    pub rasterizer: RasterizerConfig,
    pub log_path: Option<PathBuf>,
    pub log_level: String,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            templates_path: PathBuf::from("templates"),
            template_file: DEFAULT_TEMPLATE_FILE.to_string(),
            rasterizer: RasterizerConfig::default(),
            log_path: None,
            log_level: "info".to_string(),
        }
    }
}

impl RendererConfig {
    /// Load `config.yaml` from the current directory, falling back to
    /// defaults when it does not exist.
    pub fn load() -> Result<Self> {
        Self::load_from(Path::new(DEFAULT_CONFIG_FILE))
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        let config = if config_path.exists() {
            info!("Loading configuration from {}", config_path.display());
            let content = std::fs::read_to_string(config_path)
                .with_context(|| format!("Failed to read {}", config_path.display()))?;
            Self::from_yaml(&content)
                .with_context(|| format!("Failed to parse {}", config_path.display()))?
        } else {
            info!(
                "No configuration at {}, using defaults",
                config_path.display()
            );
            Self::default()
        };

        config.with_env_overrides(|key| std::env::var(key).ok())
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        // An empty file deserializes to unit, not to a mapping.
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content).context("Invalid renderer configuration")
    }

    /// Apply environment overrides and make relative paths absolute.
    pub fn with_env_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        if let Some(templates) = lookup(TEMPLATES_ENV).filter(|v| !v.trim().is_empty()) {
            self.templates_path = PathBuf::from(templates);
        }
        if let Some(program) = lookup(RASTERIZER_ENV).filter(|v| !v.trim().is_empty()) {
            self.rasterizer.program = program;
        }

        self.templates_path = resolve_path(&self.templates_path)?;
        if let Some(log_path) = self.log_path.take() {
            self.log_path = Some(resolve_path(&log_path)?);
        }
        Ok(self)
    }

    pub fn template_path(&self) -> PathBuf {
        self.templates_path.join(&self.template_file)
    }
}

fn resolve_path(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        let current_dir = std::env::current_dir().context("Failed to get current directory")?;
        Ok(current_dir.join(path))
    }
}
