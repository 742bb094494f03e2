#![crate_name = "filestore"]

//! filestore is an HTTP service for creating, listing, reading, updating and deleting text files
//! in a single server managed directory.
//!
//! Files are stored flat under their client given names. There is no index or metadata beyond
//! what the filesystem keeps; a file exists if and only if it is present in the directory.
//!
//! ## Running the daemon
//!
//! The filestore daemon will listen to all ip addresses on port 8000 by default, and store files
//! in the `uploads` directory below the current directory, creating it if needed. This behavior
//! can be modified by the argument options. See `cargo run -- --help` for details.
//!
//! ## Endpoints
//!
//! | Method   | Path          | Input                           |
//! |----------|---------------|---------------------------------|
//! | `POST`   | `/createFile` | JSON body `filename`, `content` |
//! | `GET`    | `/getFiles`   |                                 |
//! | `GET`    | `/getFile`    | query `filename`                |
//! | `PUT`    | `/modifyFile` | JSON body `filename`, `content` |
//! | `DELETE` | `/deleteFile` | query `filename`                |
//!
//! Create and modify both overwrite unconditionally. Concurrent writes to the same filename are
//! not coordinated; the last write wins.
//!
//! Filenames must be a single path component. Names that would resolve outside the storage
//! directory are rejected before any file is touched.

/// Command line settings for the daemon.
pub mod arg;

/// Failure kinds for file requests.
pub mod error;

/// The storage directory.
pub mod storage;

/// Filename to path resolution, confined to the storage directory.
pub mod resolve;

/// Presence checks on request fields.
pub mod validate;

/// File operations against the storage directory.
pub mod record;

/// Encapsulates an incoming remote request.
pub mod request;

/// Encapsulates an outgoing response to remote.
pub mod response;

/// The request loop.
pub mod server;
