use std::error::Error;
use std::fmt;
use std::io;
use std::path::PathBuf;

/// Failure kinds for a single file request.
///
/// Client errors stop a request before the filesystem is touched, or report that the named file
/// is absent. All other variants carry the underlying I/O error for the server log.
#[derive(Debug)]
pub enum FileError {
    /// One or more required request fields are absent.
    MissingField(Vec<&'static str>),
    /// The request body could not be decoded.
    MalformedBody(String),
    /// The filename would not resolve to a file directly inside the storage root.
    InvalidFilename(String),
    /// The named file does not exist.
    NotFound(PathBuf),
    ReadFailed(io::Error),
    WriteFailed(io::Error),
    ListFailed(io::Error),
    DeleteFailed(io::Error),
}

impl FileError {
    /// True if the failure was caused by the request rather than by the server.
    pub fn is_client_error(&self) -> bool {
        match self {
            FileError::MissingField(_) => true,
            FileError::MalformedBody(_) => true,
            FileError::InvalidFilename(_) => true,
            FileError::NotFound(_) => true,
            _ => false,
        }
    }
}

impl fmt::Display for FileError {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileError::MissingField(v) => write!(fmt, "missing field(s): {}", v.join(", ")),
            FileError::MalformedBody(v) => write!(fmt, "malformed request body: {}", v),
            FileError::InvalidFilename(v) => write!(fmt, "invalid filename: {:?}", v),
            FileError::NotFound(v) => write!(fmt, "file not found: {}", v.display()),
            FileError::ReadFailed(e) => write!(fmt, "read failed: {}", e),
            FileError::WriteFailed(e) => write!(fmt, "write failed: {}", e),
            FileError::ListFailed(e) => write!(fmt, "list failed: {}", e),
            FileError::DeleteFailed(e) => write!(fmt, "delete failed: {}", e),
        }
    }
}

impl Error for FileError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            FileError::ReadFailed(e) => Some(e),
            FileError::WriteFailed(e) => Some(e),
            FileError::ListFailed(e) => Some(e),
            FileError::DeleteFailed(e) => Some(e),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io;
    use std::path::PathBuf;
    use super::FileError;

    #[test]
    fn test_client_error_split() {
        assert!(FileError::MissingField(vec!("filename")).is_client_error());
        assert!(FileError::InvalidFilename(String::from("../x")).is_client_error());
        assert!(FileError::NotFound(PathBuf::from("x")).is_client_error());

        let e = io::Error::new(io::ErrorKind::PermissionDenied, "denied");
        assert!(!FileError::WriteFailed(e).is_client_error());
    }

    #[test]
    fn test_missing_field_display() {
        let e = FileError::MissingField(vec!("filename", "content"));
        assert_eq!(format!("{}", e), "missing field(s): filename, content");
    }
}
