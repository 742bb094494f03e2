use std::str::FromStr;

use log::{debug, error};

use tiny_http::{
    StatusCode,
    Request,
    Response,
    Header,
    HeaderField,
};
use ascii::AsciiString;

use mime::Mime;

use crate::record::{
    RequestResult,
    RequestResultType,
};


fn header(k: &str, v: &str) -> Option<Header> {
    let field = HeaderField::from_str(k).ok()?;
    let value = AsciiString::from_ascii(v).ok()?;
    Some(Header{
        field: field,
        value: value,
    })
}

/// Headers added to every response.
pub fn security_headers() -> Vec<Header> {
    let server_header_v = format!("filestore/{}, tiny_http (Rust)", env!("CARGO_PKG_VERSION"));
    let pairs = [
        ("X-Content-Type-Options", "nosniff"),
        ("X-Frame-Options", "SAMEORIGIN"),
        ("Content-Security-Policy", "default-src 'self'"),
        ("Cross-Origin-Resource-Policy", "same-origin"),
        ("Referrer-Policy", "no-referrer"),
        ("Server", server_header_v.as_str()),
    ];
    pairs.iter()
        .filter_map(|(k, v)| header(k, v))
        .collect()
}

/// HTTP status for a result type.
pub fn status_for(typ: &RequestResultType) -> StatusCode {
    match typ {
        RequestResultType::Found => StatusCode(200),
        RequestResultType::Changed => StatusCode(200),
        RequestResultType::InputError => StatusCode(400),
        RequestResultType::RecordError => StatusCode(400),
        RequestResultType::RouteError => StatusCode(404),
        RequestResultType::ReadError => StatusCode(500),
        RequestResultType::WriteError => StatusCode(500),
        RequestResultType::ServerError => StatusCode(500),
    }
}

fn content_type(m: Option<Mime>) -> String {
    match m {
        Some(v) => {
            v.to_string()
        },
        None => {
            mime::TEXT_PLAIN_UTF_8.to_string()
        },
    }
}

pub fn exec_response(req: Request, r: RequestResult) {
    let res_status = status_for(&r.typ);

    let body = r.v.unwrap_or_default();
    let mut res = Response::from_data(body.into_bytes());
    res = res.with_status_code(res_status);
    if let Some(h) = header("Content-Type", &content_type(r.m)) {
        res.add_header(h);
    }
    for h in security_headers() {
        res.add_header(h);
    }

    match req.respond(res) {
        Ok(_) => {
            debug!("responded {:?}", r.typ);
        },
        Err(e) => {
            error!("cannot send response: {}", e);
        },
    }
}
