use tiny_http::Server;
use std::process::exit;

use env_logger;

use log::{info, error};

use filestore::arg::Settings;
use filestore::server::serve;
use filestore::storage::StorageRoot;


fn main() {
    env_logger::init();

    let settings = match Settings::from_args() {
        Ok(v) => v,
        Err(e) => {
            error!("invalid port: {}", e);
            exit(1);
        },
    };

    let root = match StorageRoot::init(&settings.dir) {
        Ok(v) => v,
        Err(e) => {
            error!("cannot use storage directory {}: {}", settings.dir.display(), e);
            exit(1);
        },
    };

    let srv = match Server::http((settings.host.as_str(), settings.port)) {
        Ok(v) => v,
        Err(e) => {
            error!("cannot bind {}:{}: {}", settings.host, settings.port, e);
            exit(1);
        },
    };

    info!("server running at http://{}:{}, storing files in {}", settings.host, settings.port, root.path().display());
    serve(&srv, &root);
}
