//! Single-site pipeline: validate, plan, register.

use crate::context::BuildContext;
use crate::error::SitegenError;
use crate::graph::BuildGraph;
use crate::planner::plan_outputs;
use crate::registrar::Registrar;
use crate::types::ActionHandle;
use crate::validate::{validate_site, SiteArgs};
use tracing::{info, instrument};

/// Turn one raw site request into a registered generation action.
///
/// Output directories are created before registration and stay in place even
/// if registration then fails.
#[instrument(skip_all, fields(input = ?args.input))]
pub fn generate_site(
    graph: &mut dyn BuildGraph,
    context: &BuildContext,
    args: &SiteArgs,
) -> Result<ActionHandle, SitegenError> {
    let request = validate_site(args)?;
    let planned = plan_outputs(&request)?;
    let handle = Registrar::new(context).register_site(graph, &request, &planned)?;
    info!(identifier = %handle.identifier, "Site generation configured");
    Ok(handle)
}
