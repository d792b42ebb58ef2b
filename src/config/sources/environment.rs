//! Environment source: SITEGEN__SECTION__KEY variables.

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::ConfigError;
use config::Environment;

/// Add the environment source, highest file-independent precedence.
///
/// `SITEGEN__TOOL__PROGRAM=/opt/bin/gen` sets `tool.program`;
/// `discovery.ignore_patterns` accepts a comma-separated list.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Ok(builder.add_source(
        Environment::with_prefix("SITEGEN")
            .prefix_separator("__")
            .separator("__")
            .try_parsing(true)
            .list_separator(",")
            .with_list_parse_key("discovery.ignore_patterns"),
    ))
}
