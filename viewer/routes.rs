use std::io::Cursor;
use tiny_http::{Header, Method, Request, Response, StatusCode};
use tracing::debug;

use crate::handlers;
use crate::state::SharedState;
use crate::util::url::percent_decode;

// ---------------------------------------------------------------------------
// Response helpers
// ---------------------------------------------------------------------------

fn header(name: &str, value: &str) -> Option<Header> {
    Header::from_bytes(name.as_bytes(), value.as_bytes()).ok()
}

fn respond_with(status: u16, headers: Vec<Option<Header>>, body: Vec<u8>) -> Response<Cursor<Vec<u8>>> {
    let len = body.len();
    Response::new(
        StatusCode(status),
        headers.into_iter().flatten().collect(),
        Cursor::new(body),
        Some(len),
        None,
    )
}

pub fn html_response(body: String) -> Response<Cursor<Vec<u8>>> {
    respond_with(200, vec![header("Content-Type", "text/html; charset=utf-8")], body.into_bytes())
}

pub fn json_download_response(body: String, filename: &str) -> Response<Cursor<Vec<u8>>> {
    let disposition = format!("attachment; filename=\"{}\"", filename);
    respond_with(
        200,
        vec![
            header("Content-Type", "application/json"),
            header("Content-Disposition", &disposition),
        ],
        body.into_bytes(),
    )
}

pub fn not_found() -> Response<Cursor<Vec<u8>>> {
    plain_status(404, "404 Not Found")
}

pub fn bad_request(reason: &str) -> Response<Cursor<Vec<u8>>> {
    plain_status(400, &format!("400 Bad Request: {}", reason))
}

pub fn server_error(reason: &str) -> Response<Cursor<Vec<u8>>> {
    plain_status(500, &format!("500 Internal Server Error: {}", reason))
}

fn plain_status(status: u16, text: &str) -> Response<Cursor<Vec<u8>>> {
    respond_with(status, vec![header("Content-Type", "text/plain; charset=utf-8")], text.as_bytes().to_vec())
}

// ---------------------------------------------------------------------------
// Request dispatcher
// ---------------------------------------------------------------------------

/// A parsed request target.
#[derive(Debug, PartialEq)]
pub enum Route {
    Index,
    Genome(String),
    GenomeJson(String),
    NotFound,
}

/// Maps a method and URL (query string ignored) to a route.
pub fn route(method: &Method, url: &str) -> Route {
    if *method != Method::Get {
        return Route::NotFound;
    }
    let path = url.split('?').next().unwrap_or("");

    match path {
        "/" | "/index" => Route::Index,
        _ => match path.strip_prefix("/genome/") {
            Some(rest) => match rest.strip_suffix("/json") {
                Some(name) if !name.is_empty() => Route::GenomeJson(percent_decode(name)),
                _ if !rest.is_empty() && !rest.contains('/') => Route::Genome(percent_decode(rest)),
                _ => Route::NotFound,
            },
            None => Route::NotFound,
        },
    }
}

pub fn dispatch(request: Request, state: SharedState) {
    let method = request.method().clone();
    let url = request.url().to_owned();
    let route = route(&method, &url);
    debug!(%method, %url, ?route, "request");

    let response = match route {
        Route::Index => handlers::index::handle_get(&state),
        Route::Genome(name) => handlers::genome::handle_get(&name, &state),
        Route::GenomeJson(name) => handlers::genome::handle_download(&name, &state),
        Route::NotFound => not_found(),
    };

    let _ = request.respond(response);
}
