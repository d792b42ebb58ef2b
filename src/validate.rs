//! Request validation: raw configuration-interface arguments in, normalized
//! requests out. The filesystem is only consulted to tell whether an input
//! and an output name the same location.

use crate::discover::path::same_location;
use crate::error::SitegenError;
use crate::types::{GenerationRequest, PackageSpec};
use std::path::PathBuf;
use tracing::debug;

/// Subdirectory of the package output dir used for per-site maps when no
/// explicit `MAPS_DIR` is given.
pub const DEFAULT_MAPS_SUBDIR: &str = "maps";

/// Raw single-site arguments (`INPUT`, `OUTPUT_WORLD`, `OUTPUT_NAV_DIR`, `DEPENDS`).
#[derive(Debug, Clone, Default)]
pub struct SiteArgs {
    pub input: Option<String>,
    pub output_world: Option<String>,
    pub output_nav_dir: Option<String>,
    pub depends: Vec<String>,
}

/// Raw package arguments (`INPUT`, `OUTPUT_PACKAGE_DIR`, `PACKAGE_NAME`, `MAPS_DIR`, `DEPENDS`).
#[derive(Debug, Clone, Default)]
pub struct PackageArgs {
    pub input: Option<String>,
    pub output_package_dir: Option<String>,
    pub package_name: Option<String>,
    pub maps_dir: Option<String>,
    pub depends: Vec<String>,
}

fn required(value: Option<&str>, name: &'static str) -> Result<String, SitegenError> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        _ => Err(SitegenError::MissingArgument { name }),
    }
}

fn optional(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Trim entries, drop empty ones, keep first occurrence of each.
pub fn normalize_depends(depends: &[String]) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(depends.len());
    for dep in depends {
        let dep = dep.trim();
        if dep.is_empty() || out.iter().any(|d| d == dep) {
            continue;
        }
        out.push(dep.to_string());
    }
    out
}

/// Validate a single-site request.
pub fn validate_site(args: &SiteArgs) -> Result<GenerationRequest, SitegenError> {
    let input = required(args.input.as_deref(), "INPUT")?;
    let output_world = required(args.output_world.as_deref(), "OUTPUT_WORLD")?;
    let output_nav_dir = required(args.output_nav_dir.as_deref(), "OUTPUT_NAV_DIR")?;

    site_request(
        PathBuf::from(input),
        PathBuf::from(output_world),
        PathBuf::from(output_nav_dir),
        &args.depends,
    )
}

/// Build a request from already-present paths.
///
/// Used where paths come from discovery rather than configuration strings,
/// so non-UTF-8 file names pass through untouched.
pub fn site_request(
    input_path: PathBuf,
    output_world_path: PathBuf,
    output_nav_dir: PathBuf,
    depends: &[String],
) -> Result<GenerationRequest, SitegenError> {
    if same_location(&input_path, &output_world_path) {
        return Err(SitegenError::InvalidArgument {
            name: "OUTPUT_WORLD",
            reason: format!(
                "output world path {} is the input itself",
                output_world_path.display()
            ),
        });
    }
    if same_location(&input_path, &output_nav_dir) {
        return Err(SitegenError::InvalidArgument {
            name: "OUTPUT_NAV_DIR",
            reason: format!(
                "nav graph directory {} is the input itself",
                output_nav_dir.display()
            ),
        });
    }

    let request = GenerationRequest {
        input_path,
        output_world_path,
        output_nav_dir,
        extra_dependencies: normalize_depends(depends),
    };
    debug!(input = %request.input_path.display(), "Validated site request");
    Ok(request)
}

/// Validate a package request.
pub fn validate_package(args: &PackageArgs) -> Result<PackageSpec, SitegenError> {
    let input = required(args.input.as_deref(), "INPUT")?;
    let output_package_dir = required(args.output_package_dir.as_deref(), "OUTPUT_PACKAGE_DIR")?;
    let package_name = required(args.package_name.as_deref(), "PACKAGE_NAME")?;

    if package_name.contains('/') || package_name.contains('\\') {
        return Err(SitegenError::InvalidArgument {
            name: "PACKAGE_NAME",
            reason: format!("'{}' must not contain path separators", package_name),
        });
    }

    let output_package_dir = PathBuf::from(output_package_dir);
    let maps_root = match optional(args.maps_dir.as_deref()) {
        Some(dir) => PathBuf::from(dir),
        None => output_package_dir.join(DEFAULT_MAPS_SUBDIR),
    };

    let spec = PackageSpec {
        input_root: PathBuf::from(input),
        output_package_dir,
        package_name,
        maps_root,
        extra_dependencies: normalize_depends(&args.depends),
    };
    debug!(package = %spec.package_name, root = %spec.input_root.display(), "Validated package spec");
    Ok(spec)
}
