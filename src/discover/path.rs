//! Path canonicalization, normalization, and name derivation utilities

use crate::error::SitegenError;
use std::ffi::OsString;
use std::path::{Component, Path, PathBuf};
use unicode_normalization::UnicodeNormalization;

/// Canonicalize an existing path for stable display and comparison
///
/// This function:
/// 1. Canonicalizes the path (resolves symlinks, `..`, `.`)
/// 2. Normalizes Unicode to NFC (UTF-8 paths only)
/// 3. Removes trailing slashes (except root)
pub fn canonicalize_path(path: &Path) -> Result<PathBuf, SitegenError> {
    // Use dunce for cross-platform canonicalization
    let canonical = dunce::canonicalize(path).map_err(|e| SitegenError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    match canonical.to_str() {
        Some(text) => Ok(PathBuf::from(normalize_path_string(text))),
        // Non-UTF-8 paths have nothing to NFC-normalize.
        None => Ok(canonical),
    }
}

/// Normalize a path string without filesystem access
///
/// NFC-normalizes Unicode and strips trailing separators (except root).
pub fn normalize_path_string(path: &str) -> String {
    let normalized: String = path.nfc().collect();

    let mut result = normalized;
    if result.len() > 1 {
        while result.len() > 1 && (result.ends_with('/') || result.ends_with('\\')) {
            result.pop();
        }
    }

    result
}

/// Resolve `.` and `..` without touching the filesystem.
///
/// Name components are NFC-normalized when they are valid UTF-8 and kept
/// byte-for-byte otherwise. A leading `..` on a relative path is kept; one
/// above the root is dropped.
pub fn lexical_normalize(path: &Path) -> PathBuf {
    let mut parts: Vec<Component> = Vec::new();
    let mut names: Vec<OsString> = Vec::new();
    let mut out = PathBuf::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match parts.last() {
                Some(Component::Normal(_)) => {
                    parts.pop();
                    names.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => {
                    parts.push(Component::ParentDir);
                    names.push(OsString::from(".."));
                }
            },
            Component::Normal(name) => {
                parts.push(component);
                names.push(match name.to_str() {
                    Some(utf8) => OsString::from(utf8.nfc().collect::<String>()),
                    None => name.to_os_string(),
                });
            }
            Component::RootDir | Component::Prefix(_) => {
                parts.push(component);
                names.push(component.as_os_str().to_os_string());
            }
        }
    }

    for name in names {
        out.push(name);
    }
    if out.as_os_str().is_empty() {
        out.push(".");
    }
    out
}

/// Best-effort canonical location: the path itself when it exists, else its
/// existing parent with the final component appended.
fn resolved_location(path: &Path) -> Option<PathBuf> {
    if path.exists() {
        return canonicalize_path(path).ok();
    }
    let name = path.file_name()?;
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    canonicalize_path(parent).ok().map(|dir| dir.join(name))
}

/// Whether `a` and `b` name the same location.
///
/// Lexically equal paths always match. Otherwise both are resolved through
/// the filesystem as far as they exist, so `./b.yaml`, `out/../b.yaml`, and
/// symlinked spellings of an existing file compare equal.
pub fn same_location(a: &Path, b: &Path) -> bool {
    if lexical_normalize(a) == lexical_normalize(b) {
        return true;
    }
    match (resolved_location(a), resolved_location(b)) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}

/// Final path component, NFC-normalized. `None` for paths ending in `..` or root.
pub fn file_name(path: &Path) -> Option<String> {
    path.file_name()
        .map(|name| name.to_string_lossy().nfc().collect())
}

/// Final path component up to its first `.`, ignoring leading dots.
///
/// `lobby.building.yaml` -> `lobby`, `sub/dir/b.yaml` -> `b`, `.hidden.yaml` -> `hidden`.
pub fn file_stem_prefix(path: &Path) -> Option<String> {
    let name = file_name(path)?;
    let trimmed = name.trim_start_matches('.');
    let stem = trimmed.split('.').next().unwrap_or_default();
    if stem.is_empty() {
        None
    } else {
        Some(stem.to_string())
    }
}

/// Strip exactly the compound `suffix` from the final path component.
///
/// Directory components never contribute to the result, and only the
/// recognized suffix is removed: `a.b.building.yaml` -> `a.b`. Returns `None`
/// when the file name does not end with the suffix or nothing precedes it.
pub fn world_name(path: &Path, suffix: &str) -> Option<String> {
    let name = file_name(path)?;
    let bare = name.strip_suffix(suffix)?;
    if bare.is_empty() {
        None
    } else {
        Some(bare.to_string())
    }
}
