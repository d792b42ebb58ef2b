//! CLI parse: clap types for sitegen. No behavior; definitions only.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Sitegen CLI - build rules for site generation
#[derive(Parser)]
#[command(name = "sitegen")]
#[command(about = "Register site generation actions and emit the resulting build graph")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Workspace root directory
    #[arg(long, default_value = ".")]
    pub workspace: PathBuf,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// External generator executable (overrides tool.program)
    #[arg(long)]
    pub tool: Option<PathBuf>,

    /// Enable verbose logging (default: off)
    #[arg(long, default_value = "false")]
    pub verbose: bool,

    /// Disable logging entirely
    #[arg(long, default_value = "false")]
    pub quiet: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file, file+stderr)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output includes "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Graph rendering (text, json, ninja)
    #[arg(long, default_value = "text")]
    pub emit: String,

    /// Write the rendered graph here instead of stdout (only rewritten when changed)
    #[arg(long)]
    pub graph_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Register generation for one site description
    Site {
        /// Site description file (INPUT)
        #[arg(long)]
        input: Option<String>,
        /// Output world file (OUTPUT_WORLD)
        #[arg(long)]
        output_world: Option<String>,
        /// Output navigation graph directory (OUTPUT_NAV_DIR)
        #[arg(long)]
        output_nav_dir: Option<String>,
        /// Extra dependencies: file paths or registered action identifiers (DEPENDS)
        #[arg(long = "depends", value_delimiter = ';')]
        depends: Vec<String>,
    },
    /// Register generation for every site description under a directory
    Package {
        /// Root directory searched for *.building.yaml (INPUT)
        #[arg(long)]
        input: Option<String>,
        /// Package output directory (OUTPUT_PACKAGE_DIR)
        #[arg(long)]
        output_package_dir: Option<String>,
        /// Package name (PACKAGE_NAME)
        #[arg(long)]
        package_name: Option<String>,
        /// Root for per-site worlds and nav graphs (MAPS_DIR)
        #[arg(long)]
        maps_dir: Option<String>,
        /// Extra dependencies applied to every site (DEPENDS)
        #[arg(long = "depends", value_delimiter = ';')]
        depends: Vec<String>,
    },
    /// List the site descriptions a package would pick up
    Discover {
        /// Root directory to search
        #[arg(long)]
        input: PathBuf,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Print the effective configuration as TOML
    Config,
}
