//! Path planning: derive output locations and make sure they exist before any
//! action that writes to them is registered.

use crate::error::SitegenError;
use crate::types::{GenerationRequest, PlannedOutputs};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Create `path` and any missing parents.
///
/// Existing directories are left untouched. A path component that exists as
/// a file, or a permission denial, yields `DirectoryCreateFailed`.
pub fn prepare_dir(path: &Path) -> Result<(), SitegenError> {
    if path.is_dir() {
        return Ok(());
    }
    std::fs::create_dir_all(path).map_err(|source| SitegenError::DirectoryCreateFailed {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), "Created directory");
    Ok(())
}

/// Directory holding the world file. A bare file name lives in `.`.
pub fn world_dir(world_path: &Path) -> PathBuf {
    match world_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// Compute output locations for `request` and create their directories.
pub fn plan_outputs(request: &GenerationRequest) -> Result<PlannedOutputs, SitegenError> {
    let planned = PlannedOutputs {
        world_dir: world_dir(&request.output_world_path),
        world_path: request.output_world_path.clone(),
        nav_dir: request.output_nav_dir.clone(),
    };

    prepare_dir(&planned.world_dir)?;
    prepare_dir(&planned.nav_dir)?;

    Ok(planned)
}
