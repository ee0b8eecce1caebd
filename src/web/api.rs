//! JSON API handlers for the web dashboard.
//!
//! Each handler corresponds to an API endpoint and returns a
//! `Response<Cursor<Vec<u8>>>` with JSON content. Handlers that talk to the
//! remote site translate an [`ApiError`](crate::api::ApiError) into a JSON
//! error body with a 502 status; everything else operates purely on the
//! session's fetched set.

use std::io::Cursor;

use anyhow::{Context, Result};
use serde::Serialize;
use tiny_http::{Response, StatusCode};

use crate::api::{ApiError, Draft, ListQuery};
use crate::session::Session;
use crate::templates;
use crate::viz::{self, samples};

use super::content_type_json;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Build a JSON success response.
fn json_response<T: Serialize>(data: &T) -> Result<Response<Cursor<Vec<u8>>>> {
    let body = serde_json::to_string(data).context("failed to serialize JSON response")?;
    Ok(Response::from_data(body.into_bytes())
        .with_header(content_type_json())
        .with_status_code(StatusCode(200)))
}

/// Build a JSON error response for a failed upstream request.
fn upstream_error(error: &ApiError) -> Result<Response<Cursor<Vec<u8>>>> {
    let code = match error {
        ApiError::Status { code, .. } => *code,
        _ => 502,
    };
    let body = serde_json::json!({ "error": error.to_string() }).to_string();
    Ok(Response::from_data(body.into_bytes())
        .with_header(content_type_json())
        .with_status_code(StatusCode(code)))
}

/// Extract a query parameter from a URL, percent-decoding the basics.
fn query_param(url: &str, name: &str) -> Option<String> {
    url.split('?').nth(1)?.split('&').find_map(|pair| {
        let (k, v) = pair.split_once('=')?;
        if k == name {
            Some(percent_decode(v))
        } else {
            None
        }
    })
}

/// Minimal decode: `+` and `%XX` escapes, enough for names and search terms.
fn percent_decode(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let bytes = raw.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'+' => {
                out.push(' ');
                i += 1;
            }
            b'%' => {
                if let Some(hex) = raw.get(i + 1..i + 3)
                    && let Ok(code) = u8::from_str_radix(hex, 16)
                {
                    out.push(code as char);
                    i += 3;
                } else {
                    out.push('%');
                    i += 1;
                }
            }
            b => {
                out.push(b as char);
                i += 1;
            }
        }
    }
    out
}

// ---------------------------------------------------------------------------
// Connection
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct HealthResponse {
    connected: bool,
    base_url: String,
    post_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// `GET /api/health` - run the reachability probe and report the result.
pub fn get_health(session: &mut Session) -> Result<Response<Cursor<Vec<u8>>>> {
    let client = session.client();
    let error = match client.probe() {
        Ok(()) => {
            session.connected = true;
            None
        }
        Err(e) => {
            session.connected = false;
            Some(e.to_string())
        }
    };
    json_response(&HealthResponse {
        connected: session.connected,
        base_url: client.base_url().to_string(),
        post_type: session.post_type().to_string(),
        error,
    })
}

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// `GET /api/records?search=&status=&per_page=` - fetch and replace the
/// session set, then return it.
pub fn get_records(session: &mut Session, url: &str) -> Result<Response<Cursor<Vec<u8>>>> {
    let query = ListQuery {
        per_page: query_param(url, "per_page")
            .and_then(|v| v.parse().ok())
            .unwrap_or(session.config.content.per_page),
        search: query_param(url, "search").filter(|s| !s.is_empty()),
        status: query_param(url, "status").filter(|s| !s.is_empty()),
    };

    let post_type = session.post_type().to_string();
    match session.client().list(&post_type, &query) {
        Ok(records) => {
            session.records.replace_all(records);
            json_response(&session.records.records())
        }
        Err(e) => upstream_error(&e),
    }
}

/// `POST /api/records` - create a record from a draft body and splice it
/// into the session set.
pub fn post_record(session: &mut Session, body: &str) -> Result<Response<Cursor<Vec<u8>>>> {
    let draft: Draft = match serde_json::from_str(body) {
        Ok(draft) => draft,
        Err(e) => {
            let body = serde_json::json!({ "error": format!("invalid draft: {e}") }).to_string();
            return Ok(Response::from_data(body.into_bytes())
                .with_header(content_type_json())
                .with_status_code(StatusCode(400)));
        }
    };

    let post_type = session.post_type().to_string();
    match session.client().create(&post_type, &draft) {
        Ok(record) => {
            let response = json_response(&record);
            session.records.upsert(record);
            response
        }
        Err(e) => upstream_error(&e),
    }
}

/// `DELETE /api/records/{id}?force=` - delete remotely, then drop the
/// record from the session set.
pub fn delete_record(
    session: &mut Session,
    path: &str,
    url: &str,
) -> Result<Response<Cursor<Vec<u8>>>> {
    let id: u64 = match path.rsplit('/').next().and_then(|s| s.parse().ok()) {
        Some(id) => id,
        None => {
            let body = serde_json::json!({ "error": "bad record id" }).to_string();
            return Ok(Response::from_data(body.into_bytes())
                .with_header(content_type_json())
                .with_status_code(StatusCode(400)));
        }
    };
    let force = query_param(url, "force").is_some_and(|v| v == "true" || v == "1");

    let post_type = session.post_type().to_string();
    match session.client().delete(&post_type, id, force) {
        Ok(ack) => {
            session.records.remove(id);
            json_response(&ack)
        }
        Err(e) => upstream_error(&e),
    }
}

// ---------------------------------------------------------------------------
// Aggregates
// ---------------------------------------------------------------------------

/// `GET /api/aggregates/status` - status distribution of the fetched set.
pub fn get_status_aggregate(session: &Session) -> Result<Response<Cursor<Vec<u8>>>> {
    json_response(&viz::status_distribution(session.records.records()))
}

/// `GET /api/aggregates/timeline` - per-month counts of the fetched set.
pub fn get_timeline_aggregate(session: &Session) -> Result<Response<Cursor<Vec<u8>>>> {
    json_response(&viz::monthly_distribution(session.records.records()))
}

#[derive(Serialize)]
struct FieldAggregateResponse {
    #[serde(rename = "box")]
    box_name: String,
    field: String,
    distribution: viz::FieldDistribution,
}

/// `GET /api/aggregates/field?box=&field=` - one field's value distribution.
pub fn get_field_aggregate(session: &Session, url: &str) -> Result<Response<Cursor<Vec<u8>>>> {
    let box_name = query_param(url, "box").unwrap_or_default();
    let field = query_param(url, "field").unwrap_or_default();
    let distribution =
        viz::field_distribution(session.records.records(), &box_name, &field);
    json_response(&FieldAggregateResponse {
        box_name,
        field,
        distribution,
    })
}

// ---------------------------------------------------------------------------
// Templates and samples
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct TemplateListResponse {
    categories: Vec<TemplateCategoryResponse>,
}

#[derive(Serialize)]
struct TemplateCategoryResponse {
    category: String,
    names: Vec<String>,
}

/// `GET /api/templates` - the catalog listing.
pub fn get_templates() -> Result<Response<Cursor<Vec<u8>>>> {
    let categories = templates::catalog()
        .iter()
        .map(|(category, names)| TemplateCategoryResponse {
            category: category.to_string(),
            names: names.iter().map(|n| n.to_string()).collect(),
        })
        .collect();
    json_response(&TemplateListResponse { categories })
}

/// `GET /api/templates/show?category=&name=` - one skeleton as draft JSON.
/// Unknown keys return the empty skeleton, same as everywhere else.
pub fn get_template(url: &str) -> Result<Response<Cursor<Vec<u8>>>> {
    let category = query_param(url, "category").unwrap_or_default();
    let name = query_param(url, "name").unwrap_or_default();
    let template = templates::lookup(&category, &name);
    json_response(&template.to_draft().wire_value())
}

/// `GET /api/samples?category=` - illustrative charts for a category.
pub fn get_samples(url: &str) -> Result<Response<Cursor<Vec<u8>>>> {
    let category = query_param(url, "category").unwrap_or_default();
    json_response(&samples::sample_charts(&category))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
