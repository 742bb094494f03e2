//! The storage root is the one flat directory all managed files live in.
//!
//! It is created on startup if absent and kept as a canonical absolute path, so that resolved
//! file paths can be checked against it component by component.
use std::fs::{
    create_dir_all,
    metadata,
};
use std::io;
use std::path::{
    Path,
    PathBuf,
};

use log::{debug, info};

/// Default storage directory, relative to the working directory.
pub const STORAGE_DIR: &str = "uploads";

#[derive(Debug, Clone)]
pub struct StorageRoot {
    path: PathBuf,
}

impl StorageRoot {

    /// Open the storage directory, creating it if it does not exist.
    ///
    /// # Arguments
    ///
    /// * `path` - Storage directory, absolute or relative to the working directory.
    pub fn init(path: &Path) -> Result<StorageRoot, io::Error> {
        if !path.exists() {
            create_dir_all(path)?;
            info!("created storage directory {}", path.display());
        }

        let path_canon = path.canonicalize()?;
        let m = metadata(&path_canon)?;
        if !m.is_dir() {
            return Err(io::Error::new(
                io::ErrorKind::Other,
                format!("storage path {} is not a directory", path_canon.display()),
            ));
        }
        if m.permissions().readonly() {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                format!("storage directory {} is not writable", path_canon.display()),
            ));
        }

        debug!("storage root is {}", path_canon.display());
        Ok(StorageRoot{
            path: path_canon,
        })
    }

    pub fn path(&self) -> &Path {
        self.path.as_path()
    }
}
