use std::io::Cursor;
use std::time::Instant;

use serde_json::Value;
use tiny_http::{Header, Method, Request, Response, Server};
use tracing::{error, info, warn};

use crate::error::ApiError;
use crate::handlers;
use crate::state::{AppState, SharedState};
use crate::util::body::read_body;

// ---------------------------------------------------------------------------
// Response helpers
// ---------------------------------------------------------------------------

/// Status code plus JSON body, before it is written to the socket.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Value,
}

impl ApiResponse {
    pub fn ok(body: Value) -> Self {
        ApiResponse { status: 200, body }
    }
}

impl From<ApiError> for ApiResponse {
    fn from(err: ApiError) -> Self {
        ApiResponse { status: err.status_code(), body: err.body() }
    }
}

pub fn json_response(resp: &ApiResponse) -> Response<Cursor<Vec<u8>>> {
    let response = Response::from_data(resp.body.to_string().into_bytes())
        .with_status_code(resp.status);
    match Header::from_bytes(&b"Content-Type"[..], &b"application/json"[..]) {
        Ok(header) => response.with_header(header),
        Err(()) => response,
    }
}

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

fn into_response(result: Result<Value, ApiError>) -> ApiResponse {
    match result {
        Ok(body) => ApiResponse::ok(body),
        Err(err) => {
            match &err {
                ApiError::Internal(msg) => error!("request failed: {}", msg),
                other => warn!("request rejected: {}", other),
            }
            err.into()
        }
    }
}

/// Maps a method, path (query string already removed) and body to a response.
pub fn route(method: &Method, path: &str, body: &[u8], state: &AppState) -> ApiResponse {
    match (method, path) {
        (Method::Post, "/crop-disease/detect") => into_response(handlers::detect::handle(body, state)),
        (Method::Post, "/crop-disease/info")   => into_response(handlers::info::handle(body, state)),
        (Method::Get,  "/crop-disease/health") => ApiResponse::ok(handlers::health::handle()),
        (Method::Get,  "/crop-disease/crops")  => into_response(handlers::crops::handle(state)),
        _ => ApiError::NotFound.into(),
    }
}

// ---------------------------------------------------------------------------
// Request dispatcher
// ---------------------------------------------------------------------------

/// Reads the request, routes it, writes the response and logs the outcome.
pub fn dispatch(mut request: Request, state: SharedState) {
    let started = Instant::now();
    let method = request.method().clone();
    let url = request.url().to_owned();
    let path = url.split_once('?').map(|(p, _)| p).unwrap_or(&url).to_owned();

    let response = match read_body(&mut request, state.config.max_body_bytes) {
        Ok(body) => route(&method, &path, &body, &state),
        Err(err) => into_response(Err(err)),
    };

    let status = response.status;
    if let Err(e) = request.respond(json_response(&response)) {
        warn!("failed to write response: {}", e);
    }

    info!(
        method = %method,
        path = %path,
        status,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "request"
    );
}

/// Serves requests until the server is dropped. Each request runs on its
/// own thread; the state is shared read-only.
pub fn serve(server: Server, state: SharedState) {
    for request in server.incoming_requests() {
        let state_clone = state.clone();
        std::thread::spawn(move || {
            dispatch(request, state_clone);
        });
    }
}
