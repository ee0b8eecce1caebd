//! Embedded web dashboard.
//!
//! A lightweight HTTP server (sync, via `tiny_http`) that serves:
//! - A single-page dashboard: connection status, record browser, charts
//! - JSON API endpoints over the session's fetched record set
//!
//! Launched via `metapress web`. Requests are handled sequentially; every
//! handler receives the one [`Session`] by mutable reference, so the fetched
//! set mutated by one action is what the next action reads.

mod api;
mod frontend;

use std::io::{Cursor, Read};

use anyhow::Result;
use tiny_http::{Header, Method, Response, Server, StatusCode};

use crate::config::ManagerConfig;
use crate::session::Session;

// ---------------------------------------------------------------------------
// Server entry point
// ---------------------------------------------------------------------------

/// Start the dashboard server on the given address. Blocks the current
/// thread; per-request errors are answered as JSON and never crash the
/// server.
pub fn serve(addr: &str, config: ManagerConfig) -> Result<()> {
    let server = Server::http(addr)
        .map_err(|e| anyhow::anyhow!("failed to start HTTP server on {addr}: {e}"))?;

    let mut session = Session::new(config);

    println!("metapress dashboard running at http://{addr}");
    println!("Press Ctrl+C to stop.\n");

    for mut request in server.incoming_requests() {
        let method = request.method().clone();
        let url = request.url().to_string();

        let body = if matches!(method, Method::Put | Method::Post) {
            let mut buf = String::new();
            let _ = request.as_reader().read_to_string(&mut buf);
            Some(buf)
        } else {
            None
        };

        let result = dispatch(&mut session, &method, &url, body.as_deref());

        match result {
            Ok(resp) => {
                let _ = request.respond(resp);
            }
            Err(e) => {
                let body = serde_json::json!({ "error": e.to_string() }).to_string();
                let resp = Response::from_data(body.into_bytes())
                    .with_header(content_type_json())
                    .with_status_code(StatusCode(500));
                let _ = request.respond(resp);
            }
        }

        println!(
            "{} {} {}",
            method,
            url,
            chrono::Local::now().format("%H:%M:%S")
        );
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

/// Dispatch an incoming request to the appropriate handler.
fn dispatch(
    session: &mut Session,
    method: &Method,
    url: &str,
    body: Option<&str>,
) -> Result<Response<Cursor<Vec<u8>>>> {
    let path = url.split('?').next().unwrap_or(url);

    match (method, path) {
        // Frontend
        (&Method::Get, "/") | (&Method::Get, "/index.html") => Ok(serve_frontend()),

        // Connection
        (&Method::Get, "/api/health") => api::get_health(session),

        // Records
        (&Method::Get, "/api/records") => api::get_records(session, url),
        (&Method::Post, "/api/records") => api::post_record(session, body.unwrap_or("{}")),
        (&Method::Delete, path) if path.starts_with("/api/records/") => {
            api::delete_record(session, path, url)
        }

        // Aggregates over the fetched set
        (&Method::Get, "/api/aggregates/status") => api::get_status_aggregate(session),
        (&Method::Get, "/api/aggregates/timeline") => api::get_timeline_aggregate(session),
        (&Method::Get, "/api/aggregates/field") => api::get_field_aggregate(session, url),

        // Templates and samples
        (&Method::Get, "/api/templates") => api::get_templates(),
        (&Method::Get, "/api/templates/show") => api::get_template(url),
        (&Method::Get, "/api/samples") => api::get_samples(url),

        _ => Ok(not_found()),
    }
}

fn serve_frontend() -> Response<Cursor<Vec<u8>>> {
    Response::from_data(frontend::INDEX_HTML.as_bytes().to_vec())
        .with_header(
            Header::from_bytes(&b"Content-Type"[..], &b"text/html; charset=utf-8"[..])
                .expect("static header"),
        )
        .with_status_code(StatusCode(200))
}

fn not_found() -> Response<Cursor<Vec<u8>>> {
    Response::from_data(b"{\"error\":\"not found\"}".to_vec())
        .with_header(content_type_json())
        .with_status_code(StatusCode(404))
}

pub(crate) fn content_type_json() -> Header {
    Header::from_bytes(&b"Content-Type"[..], &b"application/json"[..]).expect("static header")
}
