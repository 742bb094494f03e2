use std::fs::{
    read,
    read_dir,
    remove_file,
    write,
};
use std::io;
use std::path::Path;

use mime::Mime;

use log::{debug, info, error};

use crate::error::FileError;
use crate::storage::StorageRoot;

#[derive(Debug, PartialEq)]
pub enum RequestResultType {
    Found,
    Changed,
    InputError,
    RecordError,
    ReadError,
    WriteError,
    ServerError,
    RouteError,
}

/// Outcome of a request, ready to be turned into a response.
///
/// `v` is the response body, `m` the content type of the body if not plain text.
pub struct RequestResult {
    pub typ: RequestResultType,
    pub v: Option<String>,
    pub m: Option<Mime>,
}

impl RequestResult {
    pub fn new(typ: RequestResultType, v: &str) -> RequestResult {
        RequestResult{
            typ: typ,
            v: Some(v.to_string()),
            m: None,
        }
    }
}


/// Write `content` to `path`, replacing any existing content.
pub fn put(path: &Path, content: &str) -> Result<(), FileError> {
    match write(path, content.as_bytes()) {
        Ok(_) => {
            info!("wrote {} bytes to {}", content.len(), path.display());
            Ok(())
        },
        Err(e) => {
            error!("cannot write {}: {}", path.display(), e);
            Err(FileError::WriteFailed(e))
        },
    }
}

/// Store a new file. An existing file of the same name is overwritten.
pub fn create(path: &Path, content: &str) -> Result<(), FileError> {
    put(path, content)
}

/// Overwrite a file. A missing file is created.
pub fn modify(path: &Path, content: &str) -> Result<(), FileError> {
    put(path, content)
}

/// List the names of the regular files in the storage root, sorted.
pub fn list(root: &StorageRoot) -> Result<Vec<String>, FileError> {
    let entries = match read_dir(root.path()) {
        Ok(v) => {
            v
        },
        Err(e) => {
            error!("cannot list {}: {}", root.path().display(), e);
            return Err(FileError::ListFailed(e));
        },
    };

    let mut names: Vec<String> = vec!();
    for entry in entries {
        let entry = match entry {
            Ok(v) => v,
            Err(e) => {
                error!("cannot list {}: {}", root.path().display(), e);
                return Err(FileError::ListFailed(e));
            },
        };
        match entry.file_type() {
            Ok(t) if t.is_file() => {
                names.push(entry.file_name().to_string_lossy().into_owned());
            },
            Ok(_) => {},
            Err(e) => {
                debug!("skipping {:?}: {}", entry.path(), e);
            },
        }
    }
    names.sort();
    Ok(names)
}

/// Read the whole content of a file as text.
pub fn get(path: &Path) -> Result<String, FileError> {
    match read(path) {
        Ok(v) => {
            Ok(String::from_utf8_lossy(&v).into_owned())
        },
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!("no file at {}", path.display());
            Err(FileError::NotFound(path.to_path_buf()))
        },
        Err(e) => {
            error!("cannot read {}: {}", path.display(), e);
            Err(FileError::ReadFailed(e))
        },
    }
}

/// Delete a single file.
pub fn remove(path: &Path) -> Result<(), FileError> {
    match remove_file(path) {
        Ok(_) => {
            info!("deleted {}", path.display());
            Ok(())
        },
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!("no file at {}", path.display());
            Err(FileError::NotFound(path.to_path_buf()))
        },
        Err(e) => {
            error!("cannot delete {}: {}", path.display(), e);
            Err(FileError::DeleteFailed(e))
        },
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::thread;
    use tempfile::tempdir;

    use super::{
        create,
        modify,
        list,
        get,
        remove,
    };
    use crate::error::FileError;
    use crate::storage::StorageRoot;

    #[test]
    fn test_create_then_get() {
        let d = tempdir().unwrap();
        let root = StorageRoot::init(d.path()).unwrap();
        let p = root.path().join("a.txt");

        create(&p, "hi").unwrap();
        assert_eq!(get(&p).unwrap(), "hi");

        create(&p, "hi again").unwrap();
        assert_eq!(get(&p).unwrap(), "hi again");
    }

    #[test]
    fn test_create_is_idempotent() {
        let d = tempdir().unwrap();
        let root = StorageRoot::init(d.path()).unwrap();
        let p = root.path().join("a.txt");

        create(&p, "same").unwrap();
        create(&p, "same").unwrap();
        assert_eq!(get(&p).unwrap(), "same");
        assert_eq!(list(&root).unwrap(), vec!("a.txt"));
    }

    #[test]
    fn test_modify_truncates() {
        let d = tempdir().unwrap();
        let root = StorageRoot::init(d.path()).unwrap();
        let p = root.path().join("a.txt");

        create(&p, "a much longer first version").unwrap();
        modify(&p, "short").unwrap();
        assert_eq!(get(&p).unwrap(), "short");

        let q = root.path().join("new.txt");
        modify(&q, "made by modify").unwrap();
        assert_eq!(get(&q).unwrap(), "made by modify");
    }

    #[test]
    fn test_get_missing() {
        let d = tempdir().unwrap();
        let root = StorageRoot::init(d.path()).unwrap();
        let p = root.path().join("missing.txt");

        match get(&p) {
            Err(FileError::NotFound(v)) => {
                assert_eq!(v, p);
            },
            other => {
                panic!("expected not found, got {:?}", other);
            },
        }
        assert!(!p.exists());
    }

    #[test]
    fn test_remove() {
        let d = tempdir().unwrap();
        let root = StorageRoot::init(d.path()).unwrap();
        let p = root.path().join("a.txt");

        create(&p, "hi").unwrap();
        remove(&p).unwrap();
        match get(&p) {
            Err(FileError::NotFound(_)) => {},
            other => {
                panic!("expected not found, got {:?}", other);
            },
        }
        match remove(&p) {
            Err(FileError::NotFound(_)) => {},
            other => {
                panic!("expected not found, got {:?}", other);
            },
        }
    }

    #[test]
    fn test_list() {
        let d = tempdir().unwrap();
        let root = StorageRoot::init(d.path()).unwrap();

        assert!(list(&root).unwrap().is_empty());

        create(&root.path().join("b.txt"), "b").unwrap();
        create(&root.path().join("a.txt"), "a").unwrap();
        std::fs::create_dir(root.path().join("subdir")).unwrap();
        assert_eq!(list(&root).unwrap(), vec!("a.txt", "b.txt"));

        remove(&root.path().join("a.txt")).unwrap();
        assert_eq!(list(&root).unwrap(), vec!("b.txt"));
    }

    #[test]
    fn test_get_directory_fails() {
        let d = tempdir().unwrap();
        let root = StorageRoot::init(d.path()).unwrap();
        let p = root.path().join("subdir");
        std::fs::create_dir(&p).unwrap();

        match get(&p) {
            Err(FileError::ReadFailed(_)) => {},
            other => {
                panic!("expected read failure, got {:?}", other);
            },
        }
    }

    // Concurrent writers to one name are not coordinated. One complete write survives.
    #[test]
    fn test_concurrent_writes_last_wins() {
        let d = tempdir().unwrap();
        let root = StorageRoot::init(d.path()).unwrap();
        let p = Arc::new(root.path().join("race.txt"));

        let contents: Vec<String> = (0..8).map(|i| format!("writer {}", i).repeat(64)).collect();
        let handles: Vec<_> = contents.iter().cloned().map(|c| {
            let p = Arc::clone(&p);
            thread::spawn(move || {
                modify(&p, &c).unwrap();
            })
        }).collect();
        for h in handles {
            h.join().unwrap();
        }

        let r = get(&p).unwrap();
        assert!(contents.contains(&r));
        assert_eq!(list(&root).unwrap(), vec!("race.txt"));
    }
}
