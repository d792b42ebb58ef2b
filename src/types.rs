//! Core data model: requests, actions, and package specs.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Registration namespace of an action identifier.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    /// One site-description input.
    Site,
    /// A whole package of discovered sites.
    Package,
}

impl Scope {
    pub fn suffix(self) -> &'static str {
        match self {
            Scope::Site => "_site",
            Scope::Package => "_package",
        }
    }
}

/// An extra dependency of an action: a file, or another registered action.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum Dependency {
    Path(PathBuf),
    Action(String),
}

impl Dependency {
    pub fn display(&self) -> String {
        match self {
            Dependency::Path(path) => path.display().to_string(),
            Dependency::Action(identifier) => identifier.clone(),
        }
    }
}

/// One request to convert a single site-description input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub input_path: PathBuf,
    pub output_world_path: PathBuf,
    pub output_nav_dir: PathBuf,
    /// Raw `DEPENDS` entries, trimmed and de-duplicated in first-seen order.
    /// Resolved into [`Dependency`] values at registration time.
    pub extra_dependencies: Vec<String>,
}

/// Output locations derived by the path planner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedOutputs {
    /// Directory that will contain the world file.
    pub world_dir: PathBuf,
    pub world_path: PathBuf,
    pub nav_dir: PathBuf,
}

/// Invocation of the external conversion executable.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CommandLine {
    pub program: PathBuf,
    pub args: Vec<String>,
}

impl CommandLine {
    /// `<tool> <input> --export-world <world> --export-nav <nav_dir>`
    pub fn site_generator(program: &Path, input: &Path, world: &Path, nav_dir: &Path) -> Self {
        Self {
            program: program.to_path_buf(),
            args: vec![
                input.display().to_string(),
                "--export-world".to_string(),
                world.display().to_string(),
                "--export-nav".to_string(),
                nav_dir.display().to_string(),
            ],
        }
    }

    /// All argv entries, program first.
    pub fn argv(&self) -> Vec<String> {
        let mut argv = Vec::with_capacity(self.args.len() + 1);
        argv.push(self.program.display().to_string());
        argv.extend(self.args.iter().cloned());
        argv
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ActionKind {
    /// Runs the external generator.
    Command { command: CommandLine },
    /// Groups other actions; runs nothing itself.
    Aggregate,
}

/// A registered unit of work in the host build graph.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GenerationAction {
    pub identifier: String,
    pub scope: Scope,
    #[serde(flatten)]
    pub kind: ActionKind,
    pub inputs: Vec<Dependency>,
    pub outputs: Vec<PathBuf>,
}

impl GenerationAction {
    pub fn command(&self) -> Option<&CommandLine> {
        match &self.kind {
            ActionKind::Command { command } => Some(command),
            ActionKind::Aggregate => None,
        }
    }
}

/// Returned by a build graph for every accepted registration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct ActionHandle {
    pub identifier: String,
    /// Zero-based registration order within the graph.
    pub index: usize,
}

/// A batch of site requests sharing one output root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageSpec {
    pub input_root: PathBuf,
    pub output_package_dir: PathBuf,
    pub package_name: String,
    /// Root for per-site world files and nav graph directories.
    pub maps_root: PathBuf,
    pub extra_dependencies: Vec<String>,
}

impl PackageSpec {
    pub fn worlds_dir(&self) -> PathBuf {
        self.output_package_dir.join("worlds")
    }

    pub fn nav_graphs_dir(&self) -> PathBuf {
        self.output_package_dir.join("nav_graphs")
    }

    /// `<output_package_dir>/worlds/<package_name>.sdf`
    pub fn package_world_path(&self) -> PathBuf {
        self.worlds_dir().join(format!("{}.sdf", self.package_name))
    }
}
