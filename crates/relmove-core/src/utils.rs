//! Shared path and bookkeeping helpers used across relmove crates.
//!
//! Provides:
//! - Vault path normalisation (`/` separators, no leading/trailing slash)
//! - Relative link path resolution
//! - Path validation against the vault root
//! - Batch tracking (id + elapsed time)

use crate::{Error, Result};
use std::path::{Component, Path, PathBuf};
use std::time::Instant;

/// Normalise a vault-relative path.
///
/// Backslashes become `/`, repeated separators collapse, `.` segments are
/// dropped, and leading/trailing slashes are removed. The vault root
/// normalises to the empty string.
pub fn normalize_path(path: &str) -> String {
    path.split(['/', '\\'])
        .filter(|segment| !segment.is_empty() && *segment != ".")
        .collect::<Vec<_>>()
        .join("/")
}

/// Join a folder and a child name, treating an empty folder as the vault root
pub fn join_path(folder: &str, name: &str) -> String {
    if folder.is_empty() {
        name.to_string()
    } else {
        format!("{}/{}", folder, name)
    }
}

/// Containing folder of a vault path (`a/b/c.md` -> `a/b`, `c.md` -> ``)
pub fn parent_folder(path: &str) -> &str {
    match path.rfind('/') {
        Some(idx) => &path[..idx],
        None => "",
    }
}

/// Resolve `relative` against `base_folder`, honouring `.` and `..`.
///
/// Returns `None` when the result would climb above the vault root.
pub fn resolve_relative(base_folder: &str, relative: &str) -> Option<String> {
    let mut parts: Vec<&str> = if relative.starts_with('/') {
        Vec::new()
    } else {
        base_folder.split('/').filter(|s| !s.is_empty()).collect()
    };

    for segment in relative.split(['/', '\\']) {
        match segment {
            "" | "." => {}
            ".." => {
                parts.pop()?;
            }
            other => parts.push(other),
        }
    }

    Some(parts.join("/"))
}

/// Path validation helpers
pub struct PathValidator;

impl PathValidator {
    /// Ensure a vault-relative path stays within the vault root (prevents directory traversal)
    pub fn validate_path_in_vault(vault_root: &Path, path: &Path) -> Result<PathBuf> {
        if path.is_absolute() {
            return Err(Error::path_traversal(path));
        }

        let full_path = vault_root.join(path);

        let mut depth: usize = 0;
        for component in path.components() {
            match component {
                Component::ParentDir => {
                    if depth == 0 {
                        return Err(Error::path_traversal(full_path));
                    }
                    depth -= 1;
                }
                Component::Normal(_) => depth += 1,
                Component::CurDir => {}
                Component::RootDir | Component::Prefix(_) => {
                    return Err(Error::path_traversal(full_path));
                }
            }
        }

        // Existing paths are also checked after symlink resolution
        if let (Ok(canonical_full), Ok(canonical_vault)) =
            (full_path.canonicalize(), vault_root.canonicalize())
            && !canonical_full.starts_with(&canonical_vault)
        {
            return Err(Error::path_traversal(full_path));
        }

        Ok(full_path)
    }
}

/// Batch tracking: a unique id for log correlation plus elapsed time
pub struct BatchTracker {
    batch_id: String,
    start_time: Instant,
}

impl BatchTracker {
    /// Start tracking a new batch
    pub fn new() -> Self {
        Self {
            batch_id: uuid::Uuid::new_v4().to_string(),
            start_time: Instant::now(),
        }
    }

    /// Get the batch ID
    pub fn batch_id(&self) -> &str {
        &self.batch_id
    }

    /// Get elapsed time in milliseconds
    pub fn elapsed_ms(&self) -> u64 {
        self.start_time.elapsed().as_millis() as u64
    }
}

impl Default for BatchTracker {
    fn default() -> Self {
        Self::new()
    }
}
