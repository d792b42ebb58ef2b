//! Configuration System
//!
//! Layered configuration for the external tool, discovery, package layout,
//! and logging. Sources are merged by [`ConfigLoader`] with environment
//! overrides on top.

use crate::discover::{WalkerConfig, DEFAULT_SUFFIX};
use crate::error::SitegenError;
use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

mod facade;
mod merge;
mod sources;

pub use facade::ConfigLoader;
pub use sources::workspace_file::WORKSPACE_CONFIG_FILE;

/// Default external conversion executable.
pub const DEFAULT_TOOL: &str = "building_map_generator";

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SitegenConfig {
    /// External conversion executable
    #[serde(default)]
    pub tool: ToolConfig,

    /// Site-description discovery
    #[serde(default)]
    pub discovery: DiscoveryConfig,

    /// Package layout
    #[serde(default)]
    pub package: PackageConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolConfig {
    #[serde(default = "default_tool")]
    pub program: PathBuf,
}

fn default_tool() -> PathBuf {
    PathBuf::from(DEFAULT_TOOL)
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            program: default_tool(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscoveryConfig {
    /// Compound suffix of site descriptions
    #[serde(default = "default_suffix")]
    pub suffix: String,

    /// Directory or file names skipped during discovery
    #[serde(default = "default_ignore_patterns")]
    pub ignore_patterns: Vec<String>,

    #[serde(default)]
    pub follow_symlinks: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_depth: Option<usize>,
}

fn default_suffix() -> String {
    DEFAULT_SUFFIX.to_string()
}

fn default_ignore_patterns() -> Vec<String> {
    WalkerConfig::default().ignore_patterns
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            suffix: default_suffix(),
            ignore_patterns: default_ignore_patterns(),
            follow_symlinks: false,
            max_depth: None,
        }
    }
}

impl DiscoveryConfig {
    pub fn walker_config(&self) -> WalkerConfig {
        WalkerConfig {
            suffix: self.suffix.clone(),
            follow_symlinks: self.follow_symlinks,
            ignore_patterns: self.ignore_patterns.clone(),
            max_depth: self.max_depth,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PackageConfig {
    /// Per-site maps root. Relative paths resolve against the package output dir.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maps_dir: Option<PathBuf>,
}

impl PackageConfig {
    /// Maps root for a package output dir, if one is configured.
    pub fn maps_root(&self, output_package_dir: &Path) -> Option<PathBuf> {
        self.maps_dir.as_ref().map(|dir| {
            if dir.is_absolute() {
                dir.clone()
            } else {
                output_package_dir.join(dir)
            }
        })
    }
}

/// Configuration validation errors
#[derive(Debug, Clone)]
pub enum ValidationError {
    Tool(String),
    Discovery(String),
    Logging(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::Tool(msg) => write!(f, "Tool: {}", msg),
            ValidationError::Discovery(msg) => write!(f, "Discovery: {}", msg),
            ValidationError::Logging(msg) => write!(f, "Logging: {}", msg),
        }
    }
}

impl std::error::Error for ValidationError {}

impl SitegenConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if self.tool.program.as_os_str().is_empty() {
            errors.push(ValidationError::Tool("program cannot be empty".to_string()));
        }

        let suffix = &self.discovery.suffix;
        if !suffix.starts_with('.') || suffix.matches('.').count() < 2 || suffix.ends_with('.') {
            errors.push(ValidationError::Discovery(format!(
                "suffix '{}' must be a compound extension such as '.building.yaml'",
                suffix
            )));
        }
        if self
            .discovery
            .ignore_patterns
            .iter()
            .any(|p| p.trim().is_empty())
        {
            errors.push(ValidationError::Discovery(
                "ignore patterns cannot be empty".to_string(),
            ));
        }

        if let Err(e) = self.logging.validate() {
            errors.push(ValidationError::Logging(e));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Validate, folding every problem into one configuration error.
    pub fn validated(self) -> Result<Self, SitegenError> {
        self.validate().map_err(|errors| {
            let msgs: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            SitegenError::Config(format!(
                "Configuration validation failed:\n{}",
                msgs.join("\n")
            ))
        })?;
        Ok(self)
    }

    /// Effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, SitegenError> {
        toml::to_string_pretty(self)
            .map_err(|e| SitegenError::Config(format!("Failed to render configuration: {}", e)))
    }
}
