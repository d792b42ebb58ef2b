//! Action registration: identifier derivation, dependency resolution, and
//! emission of one action per request into the host build graph.

use crate::context::BuildContext;
use crate::discover::path::file_stem_prefix;
use crate::error::SitegenError;
use crate::graph::BuildGraph;
use crate::types::{
    ActionHandle, ActionKind, CommandLine, Dependency, GenerationAction, GenerationRequest,
    PlannedOutputs, Scope,
};
use std::path::{Path, PathBuf};
use tracing::debug;

/// `generate_<name><scope suffix>`
pub fn identifier_for_name(name: &str, scope: Scope) -> String {
    format!("generate_{}{}", name, scope.suffix())
}

/// `generate_<package>_package_world`, the aggregate over a package's sites.
///
/// Ends in `_world`, so it never equals a `_site` or `_package` identifier.
pub fn package_world_identifier(package_name: &str) -> String {
    format!("generate_{}{}_world", package_name, Scope::Package.suffix())
}

/// Identifier derived from the final component of `input`, up to its first dot.
pub fn action_identifier(input: &Path, scope: Scope) -> Result<String, SitegenError> {
    let stem = file_stem_prefix(input).ok_or_else(|| SitegenError::InvalidArgument {
        name: "INPUT",
        reason: format!("cannot derive an action name from {:?}", input),
    })?;
    Ok(identifier_for_name(&stem, scope))
}

/// Resolve raw `DEPENDS` entries: names of registered actions become action
/// edges, anything else is a file dependency.
pub fn resolve_dependencies(graph: &dyn BuildGraph, raw: &[String]) -> Vec<Dependency> {
    raw.iter()
        .map(|entry| {
            if graph.contains(entry) {
                Dependency::Action(entry.clone())
            } else {
                Dependency::Path(PathBuf::from(entry))
            }
        })
        .collect()
}

/// Builds and registers generation actions.
pub struct Registrar<'a> {
    context: &'a BuildContext,
}

impl<'a> Registrar<'a> {
    pub fn new(context: &'a BuildContext) -> Self {
        Self { context }
    }

    /// Build the action for `request` without registering it.
    pub fn site_action(
        &self,
        graph: &dyn BuildGraph,
        identifier: String,
        scope: Scope,
        request: &GenerationRequest,
        planned: &PlannedOutputs,
    ) -> Result<GenerationAction, SitegenError> {
        if !request.input_path.is_file() {
            return Err(SitegenError::InputNotFound {
                path: request.input_path.clone(),
            });
        }

        let command = CommandLine::site_generator(
            &self.context.tool,
            &request.input_path,
            &planned.world_path,
            &planned.nav_dir,
        );

        let mut inputs = vec![Dependency::Path(request.input_path.clone())];
        for dep in resolve_dependencies(graph, &request.extra_dependencies) {
            if !inputs.contains(&dep) {
                inputs.push(dep);
            }
        }

        Ok(GenerationAction {
            identifier,
            scope,
            kind: ActionKind::Command { command },
            inputs,
            outputs: vec![planned.world_path.clone(), planned.nav_dir.clone()],
        })
    }

    /// Register `request` under the identifier derived from its input name.
    pub fn register_site(
        &self,
        graph: &mut dyn BuildGraph,
        request: &GenerationRequest,
        planned: &PlannedOutputs,
    ) -> Result<ActionHandle, SitegenError> {
        let identifier = action_identifier(&request.input_path, Scope::Site)?;
        self.register_site_as(graph, identifier, request, planned)
    }

    /// Register `request` under an explicitly derived identifier.
    pub fn register_site_as(
        &self,
        graph: &mut dyn BuildGraph,
        identifier: String,
        request: &GenerationRequest,
        planned: &PlannedOutputs,
    ) -> Result<ActionHandle, SitegenError> {
        let action = self.site_action(&*graph, identifier, Scope::Site, request, planned)?;
        debug!(identifier = %action.identifier, input = %request.input_path.display(), "Registering site action");
        graph.register(action)
    }

    /// Register the package-level aggregate over `members` under
    /// [`package_world_identifier`].
    pub fn register_package(
        &self,
        graph: &mut dyn BuildGraph,
        package_name: &str,
        members: &[ActionHandle],
        package_world: &Path,
    ) -> Result<ActionHandle, SitegenError> {
        let action = GenerationAction {
            identifier: package_world_identifier(package_name),
            scope: Scope::Package,
            kind: ActionKind::Aggregate,
            inputs: members
                .iter()
                .map(|handle| Dependency::Action(handle.identifier.clone()))
                .collect(),
            outputs: vec![package_world.to_path_buf()],
        };
        graph.register(action)
    }
}
