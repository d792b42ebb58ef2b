//! Filesystem walker for site-description discovery

use crate::discover::path::world_name;
use crate::error::SitegenError;
use serde::Serialize;
use std::path::PathBuf;
use walkdir::{DirEntry, WalkDir};

/// A discovered site-description input
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SiteInput {
    /// Path to the input file (rooted at the walk root)
    pub path: PathBuf,
    /// File name with the compound suffix stripped
    pub world_name: String,
}

/// Discovery configuration
#[derive(Debug, Clone)]
pub struct WalkerConfig {
    /// Compound suffix identifying site descriptions (e.g. ".building.yaml")
    pub suffix: String,
    /// Whether to follow symbolic links (default: false for determinism)
    pub follow_symlinks: bool,
    /// Directory or file names to skip (e.g. ".git", "build")
    pub ignore_patterns: Vec<String>,
    /// Maximum depth to traverse (None = unlimited)
    pub max_depth: Option<usize>,
}

pub const DEFAULT_SUFFIX: &str = ".building.yaml";

impl Default for WalkerConfig {
    fn default() -> Self {
        Self {
            suffix: DEFAULT_SUFFIX.to_string(),
            follow_symlinks: false,
            ignore_patterns: vec![
                ".git".to_string(),
                "target".to_string(),
                "build".to_string(),
                "install".to_string(),
            ],
            max_depth: None,
        }
    }
}

/// Recursive site-description walker
pub struct Walker {
    root: PathBuf,
    config: WalkerConfig,
}

impl Walker {
    /// Create a new walker for the given root path
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            config: WalkerConfig::default(),
        }
    }

    /// Create a walker with custom configuration
    pub fn with_config(root: PathBuf, config: WalkerConfig) -> Self {
        Self { root, config }
    }

    pub fn suffix(&self) -> &str {
        &self.config.suffix
    }

    /// Walk the root and collect every matching file
    ///
    /// Returns inputs sorted by path for determinism. A missing or unreadable
    /// root is a discovery error, not an empty result.
    pub fn walk(&self) -> Result<Vec<SiteInput>, SitegenError> {
        if !self.root.is_dir() {
            return Err(SitegenError::Discovery {
                root: self.root.clone(),
                message: "input root is not a directory".to_string(),
            });
        }

        let mut inputs = Vec::new();

        let walker = WalkDir::new(&self.root)
            .follow_links(self.config.follow_symlinks)
            .max_depth(self.config.max_depth.unwrap_or(usize::MAX))
            .into_iter()
            .filter_entry(|entry| entry.depth() == 0 || !self.should_ignore(entry));

        for entry in walker {
            let entry = entry.map_err(|e| SitegenError::Discovery {
                root: self.root.clone(),
                message: e.to_string(),
            })?;

            if !entry.file_type().is_file() {
                continue;
            }

            if let Some(name) = world_name(entry.path(), &self.config.suffix) {
                inputs.push(SiteInput {
                    path: entry.path().to_path_buf(),
                    world_name: name,
                });
            }
        }

        // Sort by path for determinism
        inputs.sort_by(|a, b| a.path.cmp(&b.path));

        Ok(inputs)
    }

    /// Check if an entry should be skipped based on ignore patterns
    fn should_ignore(&self, entry: &DirEntry) -> bool {
        let name = entry.file_name().to_string_lossy();
        self.config
            .ignore_patterns
            .iter()
            .any(|pattern| name == pattern.as_str())
    }
}
