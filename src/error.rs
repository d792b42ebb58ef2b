//! Error types for the sitegen build-rule generator.
//!
//! Every variant is fatal for the configuration pass that raised it; messages
//! always name the parameter or path at fault.

use std::path::PathBuf;
use thiserror::Error;

/// Configuration-pass errors
#[derive(Debug, Error)]
pub enum SitegenError {
    #[error("Missing required argument: {name}")]
    MissingArgument { name: &'static str },

    #[error("Invalid argument {name}: {reason}")]
    InvalidArgument { name: &'static str, reason: String },

    #[error("Input not found: {path:?}")]
    InputNotFound { path: PathBuf },

    #[error("Failed to create directory {path:?}: {source}")]
    DirectoryCreateFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Duplicate action identifier '{identifier}' (from {first} and {second})")]
    DuplicateActionIdentifier {
        identifier: String,
        first: String,
        second: String,
    },

    #[error("No inputs matching '*{suffix}' found under {root:?}")]
    NoInputsFound { root: PathBuf, suffix: String },

    #[error("Failed to walk {root:?}: {message}")]
    Discovery { root: PathBuf, message: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl From<config::ConfigError> for SitegenError {
    fn from(err: config::ConfigError) -> Self {
        SitegenError::Config(err.to_string())
    }
}

impl SitegenError {
    /// Short stable category name, used for log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            SitegenError::MissingArgument { .. } => "missing_argument",
            SitegenError::InvalidArgument { .. } => "invalid_argument",
            SitegenError::InputNotFound { .. } => "input_not_found",
            SitegenError::DirectoryCreateFailed { .. } => "directory_create_failed",
            SitegenError::DuplicateActionIdentifier { .. } => "duplicate_action_identifier",
            SitegenError::NoInputsFound { .. } => "no_inputs_found",
            SitegenError::Discovery { .. } => "discovery",
            SitegenError::Config(_) => "config",
            SitegenError::Io { .. } => "io",
        }
    }
}
