//! Merge rules: defaults, override order, conflict handling.

use crate::config::DEFAULT_TOOL;
use crate::discover::DEFAULT_SUFFIX;
use config::Config;
use config::ConfigBuilder;
use config::ConfigError;

/// Create a Config builder with merge policy defaults applied.
pub fn builder_with_defaults() -> Result<ConfigBuilder<config::builder::DefaultState>, ConfigError>
{
    Config::builder()
        .set_default("tool.program", DEFAULT_TOOL)?
        .set_default("discovery.suffix", DEFAULT_SUFFIX)?
        .set_default("discovery.follow_symlinks", false)
}
