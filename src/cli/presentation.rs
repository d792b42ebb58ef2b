//! CLI presentation: text and json formatters per command family.

use crate::discover::SiteInput;
use crate::error::SitegenError;
use crate::package::PackageOutcome;
use crate::types::{ActionHandle, GenerationAction};

pub fn format_site_summary(handle: &ActionHandle) -> String {
    format!("Registered {} (action #{})", handle.identifier, handle.index)
}

pub fn format_package_summary(outcome: &PackageOutcome) -> String {
    let mut s = format!(
        "Registered {} with {} site(s):\n  Package world: {}\n  Worlds dir: {}\n  Nav graphs dir: {}",
        outcome.package.identifier,
        outcome.sites.len(),
        outcome.package_world.display(),
        outcome.worlds_dir.display(),
        outcome.nav_graphs_dir.display(),
    );
    for site in &outcome.sites {
        s.push_str(&format!(
            "\n  - {} <- {}",
            site.handle.identifier,
            site.input.display()
        ));
    }
    s
}

/// One block per action, in registration order.
pub fn format_graph_text(actions: &[GenerationAction]) -> String {
    if actions.is_empty() {
        return "No actions registered.".to_string();
    }
    let mut blocks = Vec::with_capacity(actions.len());
    for action in actions {
        let mut block = format!("{} [{:?}]", action.identifier, action.scope);
        if let Some(command) = action.command() {
            block.push_str(&format!("\n  command: {}", command.argv().join(" ")));
        }
        for input in &action.inputs {
            block.push_str(&format!("\n  input:   {}", input.display()));
        }
        for output in &action.outputs {
            block.push_str(&format!("\n  output:  {}", output.display()));
        }
        blocks.push(block);
    }
    blocks.join("\n\n")
}

pub fn format_discover_result(inputs: &[SiteInput], format: &str) -> Result<String, SitegenError> {
    match format {
        "json" => serde_json::to_string_pretty(inputs)
            .map_err(|e| SitegenError::Config(format!("Failed to serialize inputs: {}", e))),
        "text" => {
            if inputs.is_empty() {
                return Ok("No site descriptions found.".to_string());
            }
            let mut lines: Vec<String> = inputs
                .iter()
                .enumerate()
                .map(|(i, input)| {
                    format!("  {}. {} ({})", i + 1, input.world_name, input.path.display())
                })
                .collect();
            lines.insert(0, format!("Site descriptions ({}):", inputs.len()));
            Ok(lines.join("\n"))
        }
        other => Err(SitegenError::InvalidArgument {
            name: "FORMAT",
            reason: format!("unknown format '{}' (expected text or json)", other),
        }),
    }
}
