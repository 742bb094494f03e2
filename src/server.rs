use tiny_http::{
    Server,
    Request,
};

use log::{info, error};

use crate::request::process_method;
use crate::response::exec_response;
use crate::storage::StorageRoot;


/// Process a single request to completion and send the response.
pub fn handle_request(mut req: Request, root: &StorageRoot) {
    let method = req.method().clone();
    let url = req.url().to_string();
    info!("{} {}", method, url);

    let res = process_method(&method, &url, req.as_reader(), root);
    exec_response(req, res);
}

/// Serve requests one at a time until the server stops accepting.
pub fn serve(srv: &Server, root: &StorageRoot) {
    loop {
        let req = match srv.recv() {
            Ok(v) => v,
            Err(e) => {
                error!("{}", e);
                break;
            }
        };
        handle_request(req, root);
    }
}
