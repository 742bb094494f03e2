//! Maps a client supplied filename to a path inside the storage root.
//!
//! The name is first checked for shape alone: it must be a single normal path component. Only
//! then is the candidate path canonicalized and compared against the root, which catches
//! symlinks inside the root that point elsewhere.
use std::path::{
    Component,
    Path,
    PathBuf,
};

use log::debug;

use crate::error::FileError;
use crate::storage::StorageRoot;


fn check_shape(filename: &str) -> Result<(), FileError> {
    let invalid = || FileError::InvalidFilename(filename.to_string());

    if filename.trim().is_empty() {
        return Err(invalid());
    }
    if filename.contains('\0') || filename.contains('/') || filename.contains('\\') {
        return Err(invalid());
    }

    let p = Path::new(filename);
    if p.is_absolute() || p.has_root() {
        return Err(invalid());
    }

    let mut components = p.components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) => Ok(()),
        _ => Err(invalid()),
    }
}

fn canonical_candidate(candidate: &Path) -> Option<PathBuf> {
    if candidate.symlink_metadata().is_ok() {
        return candidate.canonicalize().ok();
    }
    let parent = candidate.parent()?.canonicalize().ok()?;
    let name = candidate.file_name()?;
    Some(parent.join(name))
}

/// Resolve `filename` to a path directly inside the storage root.
///
/// A symlink whose target is missing is rejected, since writing through it would create the
/// target wherever it points. Such links cannot be deleted through the service.
///
/// # Arguments
///
/// * `root` - The storage root.
/// * `filename` - Filename as given by the client.
pub fn resolve_path(root: &StorageRoot, filename: &str) -> Result<PathBuf, FileError> {
    check_shape(filename)?;

    let candidate = root.path().join(filename);
    let confined = match canonical_candidate(&candidate) {
        Some(v) => {
            v.starts_with(root.path()) && v != root.path()
        },
        None => {
            false
        },
    };
    if !confined {
        debug!("filename {:?} escapes storage root", filename);
        return Err(FileError::InvalidFilename(filename.to_string()));
    }

    debug!("filename {:?} resolved to {:?}", filename, &candidate);
    Ok(candidate)
}
