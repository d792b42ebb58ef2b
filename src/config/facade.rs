//! ConfigLoader: single entry point for layered configuration loading.

use crate::config::merge::merge_policy::builder_with_defaults;
use crate::config::sources::{environment, global_file, workspace_file};
use crate::config::SitegenConfig;
use crate::error::SitegenError;
use config::File;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Loads [`SitegenConfig`] from defaults, files, and environment.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration for a workspace.
    ///
    /// Precedence (lowest to highest): defaults, global file, workspace
    /// files, `SITEGEN__*` environment variables.
    pub fn load(workspace_root: &Path) -> Result<SitegenConfig, SitegenError> {
        let builder = builder_with_defaults()?;
        let builder = global_file::add_to_builder(builder)?;
        let builder = workspace_file::add_to_builder(builder, workspace_root)?;
        let builder = environment::add_to_builder(builder)?;

        let config: SitegenConfig = builder.build()?.try_deserialize()?;
        debug!(workspace = %workspace_root.display(), "Loaded configuration");
        Ok(config)
    }

    /// Load configuration from one explicit file (plus defaults and environment).
    pub fn load_from_file(path: &Path) -> Result<SitegenConfig, SitegenError> {
        if !path.is_file() {
            return Err(SitegenError::Config(format!(
                "Configuration file not found: {}",
                path.display()
            )));
        }
        let builder = builder_with_defaults()?.add_source(File::from(path).required(true));
        let builder = environment::add_to_builder(builder)?;

        let config: SitegenConfig = builder.build()?.try_deserialize()?;
        debug!(path = %path.display(), "Loaded configuration file");
        Ok(config)
    }

    /// Global config file location, if one can be determined.
    pub fn global_config_path() -> Option<PathBuf> {
        global_file::global_config_path()
    }

    /// Defaults only.
    pub fn default() -> SitegenConfig {
        SitegenConfig::default()
    }
}
