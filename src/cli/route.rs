//! CLI route: single route table and run context. Dispatches to domain services and presentation.

use crate::cli::command_name;
use crate::cli::parse::Commands;
use crate::cli::presentation::{
    format_discover_result, format_graph_text, format_package_summary, format_site_summary,
};
use crate::config::{ConfigLoader, SitegenConfig};
use crate::context::BuildContext;
use crate::discover::Walker;
use crate::error::SitegenError;
use crate::graph::emit::{
    render_ninja, write_if_changed, write_manifest_if_changed, GraphFormat, GraphManifest,
};
use crate::graph::InMemoryGraph;
use crate::package::assemble_package;
use crate::pipeline::generate_site;
use crate::validate::{validate_package, PackageArgs, SiteArgs};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info};

/// How the registered graph leaves the process.
#[derive(Debug, Clone)]
pub struct EmitOptions {
    pub format: GraphFormat,
    /// When set, the rendering goes here and stdout only gets a summary.
    pub graph_file: Option<PathBuf>,
}

impl Default for EmitOptions {
    fn default() -> Self {
        Self {
            format: GraphFormat::Text,
            graph_file: None,
        }
    }
}

/// Runtime context for CLI execution: loaded config, build context, and emit options.
/// Built from workspace path and optional config path using ConfigLoader only.
pub struct RunContext {
    config: SitegenConfig,
    build: BuildContext,
    emit: EmitOptions,
}

impl RunContext {
    /// Create run context from workspace root and optional config path.
    pub fn new(
        workspace_root: PathBuf,
        config_path: Option<PathBuf>,
        tool_override: Option<PathBuf>,
    ) -> Result<Self, SitegenError> {
        let mut config = if let Some(ref cfg_path) = config_path {
            ConfigLoader::load_from_file(cfg_path)?
        } else {
            ConfigLoader::load(&workspace_root)?
        };
        if let Some(tool) = tool_override {
            config.tool.program = tool;
        }
        let config = config.validated()?;
        let build = BuildContext::from_config(&config);

        Ok(Self {
            config,
            build,
            emit: EmitOptions::default(),
        })
    }

    pub fn with_emit(mut self, emit: EmitOptions) -> Self {
        self.emit = emit;
        self
    }

    /// Execute a CLI command via the single route table.
    pub fn execute(&self, command: &Commands) -> Result<String, SitegenError> {
        let started = Instant::now();
        let name = command_name(command);
        debug!(command = name, "Executing command");
        let result = self.execute_inner(command);
        info!(
            command = name,
            ok = result.is_ok(),
            duration_ms = started.elapsed().as_millis() as u64,
            "Command finished"
        );
        result
    }

    fn execute_inner(&self, command: &Commands) -> Result<String, SitegenError> {
        match command {
            Commands::Site {
                input,
                output_world,
                output_nav_dir,
                depends,
            } => {
                let args = SiteArgs {
                    input: input.clone(),
                    output_world: output_world.clone(),
                    output_nav_dir: output_nav_dir.clone(),
                    depends: depends.clone(),
                };
                let mut graph = InMemoryGraph::new();
                let handle = generate_site(&mut graph, &self.build, &args)?;
                self.render(&graph, format_site_summary(&handle))
            }
            Commands::Package {
                input,
                output_package_dir,
                package_name,
                maps_dir,
                depends,
            } => {
                let mut args = PackageArgs {
                    input: input.clone(),
                    output_package_dir: output_package_dir.clone(),
                    package_name: package_name.clone(),
                    maps_dir: maps_dir.clone(),
                    depends: depends.clone(),
                };
                if args.maps_dir.is_none() {
                    if let Some(output_dir) = args.output_package_dir.as_deref() {
                        args.maps_dir = self
                            .config
                            .package
                            .maps_root(Path::new(output_dir))
                            .map(|root| root.to_string_lossy().into_owned());
                    }
                }
                let spec = validate_package(&args)?;
                let mut graph = InMemoryGraph::new();
                let outcome = assemble_package(&mut graph, &self.build, &spec)?;
                self.render(&graph, format_package_summary(&outcome))
            }
            Commands::Discover { input, format } => {
                let walker = Walker::with_config(input.clone(), self.build.walker.clone());
                let inputs = walker.walk()?;
                format_discover_result(&inputs, format)
            }
            Commands::Config => self.config.to_toml(),
        }
    }

    /// Render the graph per the emit options.
    ///
    /// Without a graph file, text output is the summary followed by the graph;
    /// json and ninja output is the bare rendering.
    fn render(&self, graph: &InMemoryGraph, summary: String) -> Result<String, SitegenError> {
        let actions = graph.actions();
        let Some(ref path) = self.emit.graph_file else {
            return match self.emit.format {
                GraphFormat::Text => Ok(format!("{}\n\n{}", summary, format_graph_text(actions))),
                GraphFormat::Json => GraphManifest::new(actions).to_json(),
                GraphFormat::Ninja => render_ninja(actions),
            };
        };

        let written = match self.emit.format {
            GraphFormat::Text => write_if_changed(path, &format_graph_text(actions))?,
            GraphFormat::Json => write_manifest_if_changed(path, &GraphManifest::new(actions))?,
            GraphFormat::Ninja => write_if_changed(path, &render_ninja(actions)?)?,
        };
        let status = if written { "Wrote" } else { "Unchanged" };
        Ok(format!("{}\n{} {}", summary, status, path.display()))
    }
}
