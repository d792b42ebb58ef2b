//! Graph emission: JSON manifests and Ninja build files for the host engine.
//!
//! Emitted files are rewritten only when their content changes, so repeated
//! configuration over unchanged sources never bumps their mtime.

use crate::error::SitegenError;
use crate::types::{ActionKind, Dependency, GenerationAction};
use blake3::Hasher;
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use shell_escape::escape;
use std::borrow::Cow;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::debug;

/// Name of the Ninja rule that runs the external generator.
pub const NINJA_RULE: &str = "sitegen_generate";

/// Rendering of a registered graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphFormat {
    Text,
    Json,
    Ninja,
}

impl FromStr for GraphFormat {
    type Err = SitegenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(GraphFormat::Text),
            "json" => Ok(GraphFormat::Json),
            "ninja" => Ok(GraphFormat::Ninja),
            other => Err(SitegenError::InvalidArgument {
                name: "EMIT",
                reason: format!("unknown graph format '{}' (expected text, json, or ninja)", other),
            }),
        }
    }
}

/// Serialized action set with its fingerprint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphManifest {
    /// RFC 3339; not part of the fingerprint.
    pub generated_at: String,
    pub fingerprint: String,
    pub actions: Vec<GenerationAction>,
}

impl GraphManifest {
    pub fn new(actions: &[GenerationAction]) -> Self {
        Self {
            generated_at: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
            fingerprint: fingerprint(actions),
            actions: actions.to_vec(),
        }
    }

    pub fn to_json(&self) -> Result<String, SitegenError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| SitegenError::Config(format!("Failed to serialize manifest: {}", e)))
    }
}

fn hash_field(hasher: &mut Hasher, value: &str) {
    hasher.update(&(value.len() as u64).to_be_bytes());
    hasher.update(value.as_bytes());
}

/// Deterministic BLAKE3 fingerprint of an action set, hex encoded.
///
/// fingerprint = hash(count || for each action: id || scope || kind || inputs || outputs)
/// with every string length-prefixed. Order matters.
pub fn fingerprint(actions: &[GenerationAction]) -> String {
    let mut hasher = Hasher::new();
    hasher.update(&(actions.len() as u64).to_be_bytes());

    for action in actions {
        hash_field(&mut hasher, &action.identifier);
        hash_field(&mut hasher, action.scope.suffix());
        match &action.kind {
            ActionKind::Command { command } => {
                hasher.update(b"command");
                let argv = command.argv();
                hasher.update(&(argv.len() as u64).to_be_bytes());
                for arg in &argv {
                    hash_field(&mut hasher, arg);
                }
            }
            ActionKind::Aggregate => {
                hasher.update(b"aggregate");
            }
        }
        hasher.update(&(action.inputs.len() as u64).to_be_bytes());
        for input in &action.inputs {
            match input {
                Dependency::Path(path) => {
                    hasher.update(b"p");
                    hash_field(&mut hasher, &path.to_string_lossy());
                }
                Dependency::Action(identifier) => {
                    hasher.update(b"a");
                    hash_field(&mut hasher, identifier);
                }
            }
        }
        hasher.update(&(action.outputs.len() as u64).to_be_bytes());
        for output in &action.outputs {
            hash_field(&mut hasher, &output.to_string_lossy());
        }
    }

    hex::encode(hasher.finalize().as_bytes())
}

/// Ninja has no escape for a newline inside a value; `$` followed by a
/// newline is a line continuation.
fn single_line(value: &str) -> Result<&str, SitegenError> {
    if value.contains('\n') || value.contains('\r') {
        return Err(SitegenError::InvalidArgument {
            name: "EMIT",
            reason: format!("{:?} contains a line break and cannot be written to Ninja", value),
        });
    }
    Ok(value)
}

/// Escape a path for a Ninja `build` line.
fn ninja_path(path: &str) -> Result<String, SitegenError> {
    let path = single_line(path)?;
    let mut out = String::with_capacity(path.len());
    for ch in path.chars() {
        match ch {
            '$' => out.push_str("$$"),
            ' ' => out.push_str("$ "),
            ':' => out.push_str("$:"),
            _ => out.push(ch),
        }
    }
    Ok(out)
}

fn shell_quote(arg: &str) -> Result<String, SitegenError> {
    Ok(escape(Cow::Borrowed(single_line(arg)?)).into_owned())
}

fn dependency_ref(dep: &Dependency) -> Result<String, SitegenError> {
    match dep {
        Dependency::Path(path) => ninja_path(&path.to_string_lossy()),
        Dependency::Action(identifier) => ninja_path(identifier),
    }
}

/// Render actions as a Ninja build file.
///
/// Command actions get a real build edge plus a phony alias named after the
/// identifier; aggregates become phony targets over their members. Any path,
/// identifier, or argument containing a line break is rejected.
pub fn render_ninja(actions: &[GenerationAction]) -> Result<String, SitegenError> {
    let mut out = String::new();
    let _ = writeln!(out, "# Generated by sitegen. Do not edit.");
    let _ = writeln!(out, "# fingerprint {}", fingerprint(actions));
    let _ = writeln!(out, "ninja_required_version = 1.3");
    let _ = writeln!(out);
    let _ = writeln!(out, "rule {}", NINJA_RULE);
    let _ = writeln!(out, "  command = $cmd");
    let _ = writeln!(out, "  description = Generating $id");

    for action in actions {
        let _ = writeln!(out);
        let id = ninja_path(&action.identifier)?;
        match &action.kind {
            ActionKind::Command { command } => {
                let outputs = action
                    .outputs
                    .iter()
                    .map(|p| ninja_path(&p.to_string_lossy()))
                    .collect::<Result<Vec<_>, _>>()?;
                let mut inputs = action.inputs.iter();
                let explicit = match inputs.next() {
                    Some(dep) => dependency_ref(dep)?,
                    None => String::new(),
                };
                let implicit = inputs.map(dependency_ref).collect::<Result<Vec<_>, _>>()?;

                let _ = write!(out, "build {}: {} {}", outputs.join(" "), NINJA_RULE, explicit);
                if !implicit.is_empty() {
                    let _ = write!(out, " | {}", implicit.join(" "));
                }
                let _ = writeln!(out);

                let cmd = command
                    .argv()
                    .iter()
                    .map(|a| shell_quote(a))
                    .collect::<Result<Vec<_>, _>>()?;
                let _ = writeln!(out, "  cmd = {}", cmd.join(" ").replace('$', "$$"));
                let _ = writeln!(out, "  id = {}", action.identifier.replace('$', "$$"));
                let _ = writeln!(out, "build {}: phony {}", id, outputs.join(" "));
            }
            ActionKind::Aggregate => {
                let members = action
                    .inputs
                    .iter()
                    .map(dependency_ref)
                    .collect::<Result<Vec<_>, _>>()?;
                let _ = writeln!(out, "build {}: phony {}", id, members.join(" "));
            }
        }
    }

    Ok(out)
}

/// Write `contents` to `path` unless the file already holds exactly that.
///
/// Returns whether the file was written.
pub fn write_if_changed(path: &Path, contents: &str) -> Result<bool, SitegenError> {
    if let Ok(existing) = std::fs::read_to_string(path) {
        if existing == contents {
            debug!(path = %path.display(), "Emitted file unchanged");
            return Ok(false);
        }
    }
    write_file(path, contents)?;
    Ok(true)
}

/// Write a manifest unless an existing one carries the same fingerprint.
pub fn write_manifest_if_changed(
    path: &Path,
    manifest: &GraphManifest,
) -> Result<bool, SitegenError> {
    if let Ok(existing) = std::fs::read_to_string(path) {
        if let Ok(previous) = serde_json::from_str::<GraphManifest>(&existing) {
            if previous.fingerprint == manifest.fingerprint {
                debug!(path = %path.display(), "Manifest fingerprint unchanged");
                return Ok(false);
            }
        }
    }
    write_file(path, &manifest.to_json()?)?;
    Ok(true)
}

fn write_file(path: &Path, contents: &str) -> Result<(), SitegenError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            crate::planner::prepare_dir(parent)?;
        }
    }
    std::fs::write(path, contents).map_err(|source| SitegenError::Io {
        path: PathBuf::from(path),
        source,
    })?;
    debug!(path = %path.display(), "Wrote emitted file");
    Ok(())
}
