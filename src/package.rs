//! Package assembly: discover every site description under a root and run
//! the single-site pipeline once per input under a shared output layout.

use crate::context::BuildContext;
use crate::discover::{SiteInput, Walker};
use crate::error::SitegenError;
use crate::graph::BuildGraph;
use crate::planner::{plan_outputs, prepare_dir};
use crate::registrar::{identifier_for_name, package_world_identifier, Registrar};
use crate::types::{ActionHandle, GenerationAction, PackageSpec, Scope};
use crate::validate::site_request;
use serde::Serialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument, warn};

/// One site configured as part of a package.
#[derive(Debug, Clone, Serialize)]
pub struct SiteOutcome {
    pub input: PathBuf,
    pub world_name: String,
    pub world_path: PathBuf,
    pub nav_dir: PathBuf,
    pub handle: ActionHandle,
}

/// Result of a package configuration pass.
#[derive(Debug, Clone, Serialize)]
pub struct PackageOutcome {
    pub package: ActionHandle,
    pub package_world: PathBuf,
    pub worlds_dir: PathBuf,
    pub nav_graphs_dir: PathBuf,
    pub sites: Vec<SiteOutcome>,
}

/// `<maps_root>/<world_name>.world`
pub fn site_world_path(maps_root: &Path, world_name: &str) -> PathBuf {
    maps_root.join(format!("{}.world", world_name))
}

/// `<maps_root>/<world_name>/nav_graphs`
pub fn site_nav_dir(maps_root: &Path, world_name: &str) -> PathBuf {
    maps_root.join(world_name).join("nav_graphs")
}

/// Discover site inputs for `spec`, failing when there are none.
pub fn discover_inputs(
    context: &BuildContext,
    spec: &PackageSpec,
) -> Result<Vec<SiteInput>, SitegenError> {
    let walker = Walker::with_config(spec.input_root.clone(), context.walker.clone());
    let inputs = walker.walk()?;
    if inputs.is_empty() {
        warn!(
            root = %spec.input_root.display(),
            suffix = %walker.suffix(),
            "No site descriptions found"
        );
        return Err(SitegenError::NoInputsFound {
            root: spec.input_root.clone(),
            suffix: walker.suffix().to_string(),
        });
    }
    debug!(count = inputs.len(), "Discovered site descriptions");
    Ok(inputs)
}

/// Reject inputs whose identifiers collide with each other or with the graph.
fn check_identifiers(
    graph: &dyn BuildGraph,
    inputs: &[SiteInput],
    package_identifier: &str,
) -> Result<Vec<String>, SitegenError> {
    if graph.contains(package_identifier) {
        return Err(SitegenError::DuplicateActionIdentifier {
            identifier: package_identifier.to_string(),
            first: "an earlier registration".to_string(),
            second: "this package".to_string(),
        });
    }

    let mut seen: HashMap<String, &Path> = HashMap::new();
    let mut identifiers = Vec::with_capacity(inputs.len());
    for input in inputs {
        let identifier = identifier_for_name(&input.world_name, Scope::Package);
        if let Some(first) = seen.get(&identifier) {
            return Err(SitegenError::DuplicateActionIdentifier {
                identifier,
                first: first.display().to_string(),
                second: input.path.display().to_string(),
            });
        }
        if graph.contains(&identifier) {
            return Err(SitegenError::DuplicateActionIdentifier {
                identifier,
                first: "an earlier registration".to_string(),
                second: input.path.display().to_string(),
            });
        }
        seen.insert(identifier.clone(), input.path.as_path());
        identifiers.push(identifier);
    }
    Ok(identifiers)
}

/// Assemble a package: one site action per discovered input plus the
/// package-level aggregate.
///
/// Identifier collisions and missing inputs are detected before the first
/// registration, so a failed pass leaves the graph as it was.
#[instrument(skip_all, fields(package = %spec.package_name))]
pub fn assemble_package(
    graph: &mut dyn BuildGraph,
    context: &BuildContext,
    spec: &PackageSpec,
) -> Result<PackageOutcome, SitegenError> {
    let inputs = discover_inputs(context, spec)?;
    let package_identifier = package_world_identifier(&spec.package_name);
    let identifiers = check_identifiers(&*graph, &inputs, &package_identifier)?;

    let worlds_dir = spec.worlds_dir();
    let nav_graphs_dir = spec.nav_graphs_dir();
    prepare_dir(&worlds_dir)?;
    prepare_dir(&nav_graphs_dir)?;

    let registrar = Registrar::new(context);
    let mut staged: Vec<(GenerationAction, &SiteInput)> = Vec::with_capacity(inputs.len());
    for (input, identifier) in inputs.iter().zip(identifiers) {
        let request = site_request(
            input.path.clone(),
            site_world_path(&spec.maps_root, &input.world_name),
            site_nav_dir(&spec.maps_root, &input.world_name),
            &spec.extra_dependencies,
        )?;
        let planned = plan_outputs(&request)?;
        let action =
            registrar.site_action(&*graph, identifier, Scope::Package, &request, &planned)?;
        staged.push((action, input));
    }

    let mut sites = Vec::with_capacity(staged.len());
    for (action, input) in staged {
        let world_path = action.outputs[0].clone();
        let nav_dir = action.outputs[1].clone();
        let handle = graph.register(action)?;
        sites.push(SiteOutcome {
            input: input.path.clone(),
            world_name: input.world_name.clone(),
            world_path,
            nav_dir,
            handle,
        });
    }

    let members: Vec<ActionHandle> = sites.iter().map(|site| site.handle.clone()).collect();
    let package_world = spec.package_world_path();
    let package = registrar.register_package(graph, &spec.package_name, &members, &package_world)?;

    info!(
        identifier = %package.identifier,
        sites = sites.len(),
        "Package generation configured"
    );

    Ok(PackageOutcome {
        package,
        package_world,
        worlds_dir,
        nav_graphs_dir,
        sites,
    })
}
