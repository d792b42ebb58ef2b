//! Workspace config file source: sitegen.toml and sitegen.{env}.toml

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::ConfigError;
use config::File;
use std::path::{Path, PathBuf};

pub const WORKSPACE_CONFIG_FILE: &str = "sitegen.toml";

/// Workspace config files in load order.
/// Precedence: sitegen.toml (base) then sitegen.{SITEGEN_ENV}.toml when SITEGEN_ENV is set.
pub fn workspace_config_paths(workspace_root: &Path) -> Vec<PathBuf> {
    let mut paths = vec![workspace_root.join(WORKSPACE_CONFIG_FILE)];
    if let Ok(env_name) = std::env::var("SITEGEN_ENV") {
        if !env_name.trim().is_empty() {
            paths.push(workspace_root.join(format!("sitegen.{}.toml", env_name.trim())));
        }
    }
    paths
}

/// Add workspace config files to builder.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
    workspace_root: &Path,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let mut builder = builder;

    for path in workspace_config_paths(workspace_root) {
        if path.exists() {
            builder = builder.add_source(File::from(path).required(false));
        }
    }

    Ok(builder)
}
