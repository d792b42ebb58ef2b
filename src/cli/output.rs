//! CLI output: error mapping from domain errors to stable CLI surface.

use crate::error::SitegenError;

/// Map domain errors to a string for CLI output, prefixed with a stable category.
pub fn map_error(e: &SitegenError) -> String {
    format!("error[{}]: {}", e.kind(), e)
}
