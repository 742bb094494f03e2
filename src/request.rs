use std::io::Read;
use std::panic::{
    catch_unwind,
    AssertUnwindSafe,
};

use tiny_http::Method;

use crate::error::FileError;
use crate::record::{
    create,
    modify,
    list,
    get,
    remove,
    RequestResult,
    RequestResultType,
};
use crate::resolve::resolve_path;
use crate::storage::StorageRoot;
use crate::validate::{
    body_fields,
    query_fields,
    write_request,
    name_request,
};

use log::{
    debug,
    error,
};

/// The file operations exposed over HTTP.
#[derive(Debug, PartialEq, Clone, Copy)]
pub enum Route {
    CreateFile,
    GetFiles,
    GetFile,
    ModifyFile,
    DeleteFile,
}

impl Route {
    pub fn from_request(method: &Method, path: &str) -> Option<Route> {
        match (method, path) {
            (Method::Post, "/createFile") => Some(Route::CreateFile),
            (Method::Get, "/getFiles") => Some(Route::GetFiles),
            (Method::Get, "/getFile") => Some(Route::GetFile),
            (Method::Put, "/modifyFile") => Some(Route::ModifyFile),
            (Method::Delete, "/deleteFile") => Some(Route::DeleteFile),
            _ => None,
        }
    }

    fn failure_message(&self) -> &'static str {
        match self {
            Route::CreateFile => "Failed to create file.",
            Route::GetFiles => "Failed to get files.",
            Route::GetFile => "Failed to read file.",
            Route::ModifyFile => "Failed to modify file.",
            Route::DeleteFile => "Failed to delete file.",
        }
    }
}

fn error_result(route: Route, e: &FileError) -> RequestResult {
    if e.is_client_error() {
        debug!("rejected {:?}: {}", route, e);
    }
    match e {
        FileError::MissingField(_) => {
            let v = match route {
                Route::CreateFile | Route::ModifyFile => "Both filename and content are required.",
                _ => "Filename is required.",
            };
            RequestResult::new(RequestResultType::InputError, v)
        },
        FileError::MalformedBody(_) => {
            RequestResult::new(RequestResultType::InputError, "Malformed request body.")
        },
        FileError::InvalidFilename(_) => {
            RequestResult::new(RequestResultType::InputError, "Invalid filename.")
        },
        FileError::NotFound(_) => {
            RequestResult::new(RequestResultType::RecordError, "File not found.")
        },
        FileError::ReadFailed(_) | FileError::ListFailed(_) => {
            RequestResult::new(RequestResultType::ReadError, route.failure_message())
        },
        FileError::WriteFailed(_) | FileError::DeleteFailed(_) => {
            RequestResult::new(RequestResultType::WriteError, route.failure_message())
        },
    }
}

fn read_body(mut f: impl Read) -> Result<String, FileError> {
    let mut body = String::new();
    match f.read_to_string(&mut body) {
        Ok(_) => {
            debug!("request body: {}", &body);
            Ok(body)
        },
        Err(e) => {
            Err(FileError::MalformedBody(e.to_string()))
        },
    }
}

fn exec_route(route: Route, query: &str, f: impl Read, root: &StorageRoot) -> Result<RequestResult, FileError> {
    match route {
        Route::CreateFile | Route::ModifyFile => {
            let fields = body_fields(&read_body(f)?)?;
            let req = write_request(&fields)?;
            let path = resolve_path(root, &req.filename)?;
            let content = req.content.unwrap_or_default();
            let v = if route == Route::CreateFile {
                create(&path, &content)?;
                "File created successfully."
            } else {
                modify(&path, &content)?;
                "File modified successfully."
            };
            Ok(RequestResult::new(RequestResultType::Changed, v))
        },
        Route::GetFiles => {
            let names = list(root)?;
            let v = serde_json::to_string(&names)
                .map_err(|e| FileError::ListFailed(e.into()))?;
            Ok(RequestResult{
                typ: RequestResultType::Found,
                v: Some(v),
                m: Some(mime::APPLICATION_JSON),
            })
        },
        Route::GetFile => {
            let req = name_request(&query_fields(query))?;
            let path = resolve_path(root, &req.filename)?;
            let v = get(&path)?;
            Ok(RequestResult{
                typ: RequestResultType::Found,
                v: Some(v),
                m: None,
            })
        },
        Route::DeleteFile => {
            let req = name_request(&query_fields(query))?;
            let path = resolve_path(root, &req.filename)?;
            remove(&path)?;
            Ok(RequestResult::new(RequestResultType::Changed, "File deleted successfully."))
        },
    }
}

/// Handle client input by method type.
///
/// Failures of any kind become a result with a status class and a plain message. A panic in
/// a handler is caught here and reported as a generic server error.
///
/// # Arguments
///
/// * `method` - The HTTP method of the client request.
/// * `url` - The local part of the URL of the client request, including the query string.
/// * `f` - Reader providing the content body of the client request.
/// * `root` - The storage root.
pub fn process_method(method: &Method, url: &str, f: impl Read, root: &StorageRoot) -> RequestResult {
    let (path, query) = match url.split_once('?') {
        Some((p, q)) => (p, q),
        None => (url, ""),
    };

    let route = match Route::from_request(method, path) {
        Some(v) => v,
        None => {
            debug!("no route for {} {}", method, path);
            return RequestResult::new(RequestResultType::RouteError, "Not found.");
        },
    };

    let r = catch_unwind(AssertUnwindSafe(|| {
        exec_route(route, query, f, root)
    }));
    match r {
        Ok(Ok(v)) => {
            v
        },
        Ok(Err(e)) => {
            error_result(route, &e)
        },
        Err(_) => {
            error!("handler for {:?} panicked", route);
            RequestResult::new(RequestResultType::ServerError, "Something went wrong!")
        },
    }
}
