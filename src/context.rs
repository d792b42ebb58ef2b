//! Explicit configuration context passed into every pipeline stage.

use crate::config::SitegenConfig;
use crate::discover::WalkerConfig;
use std::path::PathBuf;

/// Everything the pipeline needs besides the request itself.
#[derive(Debug, Clone)]
pub struct BuildContext {
    /// External conversion executable.
    pub tool: PathBuf,
    /// Discovery settings for package assembly.
    pub walker: WalkerConfig,
}

impl BuildContext {
    pub fn new(tool: impl Into<PathBuf>) -> Self {
        Self {
            tool: tool.into(),
            walker: WalkerConfig::default(),
        }
    }

    pub fn with_walker(mut self, walker: WalkerConfig) -> Self {
        self.walker = walker;
        self
    }

    pub fn from_config(config: &SitegenConfig) -> Self {
        Self {
            tool: config.tool.program.clone(),
            walker: config.discovery.walker_config(),
        }
    }
}
