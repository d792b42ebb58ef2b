//! CLI help and command-name contract for logging and routing.

use crate::cli::parse::Commands;

/// Command name string for log spans (e.g. "site", "package").
pub fn command_name(command: &Commands) -> &'static str {
    match command {
        Commands::Site { .. } => "site",
        Commands::Package { .. } => "package",
        Commands::Discover { .. } => "discover",
        Commands::Config => "config",
    }
}
