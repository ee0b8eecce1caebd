//! Export projections and import parsing.
//!
//! Three export projections over a record slice:
//!
//! - **Full JSON** - verbatim pretty-printed array, lossless.
//! - **Simplified JSON** - `{id, title, status, date, content, acpt}` with
//!   title/content reduced to their text.
//! - **CSV** - one row per record: fixed `id,title,status,date` columns
//!   plus dynamically discovered metadata columns keyed `box_field` in
//!   first-seen order. List values are joined with `", "`. Only flat meta
//!   entries contribute columns; nested read-back groups do not.
//!
//! Import parses a JSON array (or a single object) and validates the
//! structural keys the API needs. Malformed input aborts the whole
//! operation before any request is sent.

use chrono::Local;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::api::{AcptData, Record};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("invalid JSON: {0}")]
    Json(String),
    #[error("expected a JSON array of objects")]
    NotAnArray,
    #[error("item {index} is missing required key '{key}'")]
    MissingKey { index: usize, key: &'static str },
}

// ---------------------------------------------------------------------------
// JSON projections
// ---------------------------------------------------------------------------

/// Verbatim pretty-printed export. Round-trips through import unchanged.
pub fn full_json(records: &[Record]) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(records)?)
}

/// The essential-fields projection.
#[derive(Debug, Serialize)]
struct SimplifiedRecord<'a> {
    id: Option<u64>,
    title: &'a str,
    status: &'a str,
    date: &'a str,
    content: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    acpt: Option<&'a AcptData>,
}

/// Reduce each record to id/title/status/date/content/metadata.
pub fn simplified_json(records: &[Record]) -> anyhow::Result<String> {
    let simplified: Vec<SimplifiedRecord<'_>> = records
        .iter()
        .map(|r| SimplifiedRecord {
            id: r.id,
            title: r.title_text(),
            status: &r.status,
            date: r.date_str(),
            content: r.content_text(),
            acpt: r.acpt.as_ref(),
        })
        .collect();
    Ok(serde_json::to_string_pretty(&simplified)?)
}

// ---------------------------------------------------------------------------
// CSV projection
// ---------------------------------------------------------------------------

/// Metadata columns discovered across the set, keyed `box_field`, in
/// first-seen order.
pub fn meta_columns(records: &[Record]) -> Vec<String> {
    let mut columns: Vec<String> = Vec::new();
    for record in records {
        for entry in record.flat_meta() {
            let key = format!("{}_{}", entry.box_name, entry.field);
            if !columns.contains(&key) {
                columns.push(key);
            }
        }
    }
    columns
}

/// Flatten the set into CSV with dynamic metadata columns.
pub fn csv(records: &[Record]) -> anyhow::Result<String> {
    let columns = meta_columns(records);

    let mut writer = csv::Writer::from_writer(Vec::new());
    let mut header = vec![
        "id".to_string(),
        "title".to_string(),
        "status".to_string(),
        "date".to_string(),
    ];
    header.extend(columns.iter().cloned());
    writer.write_record(&header)?;

    for record in records {
        let mut row = vec![
            record.id.map(|id| id.to_string()).unwrap_or_default(),
            record.title_text().to_string(),
            record.status.clone(),
            record.date_str().to_string(),
        ];
        for column in &columns {
            let cell = record
                .flat_meta()
                .find(|e| format!("{}_{}", e.box_name, e.field) == *column)
                .map(|e| value_text(&e.value))
                .unwrap_or_default();
            row.push(cell);
        }
        writer.write_record(&row)?;
    }

    Ok(String::from_utf8(writer.into_inner()?)?)
}

/// Render a metadata value for flat display: lists join with `", "`,
/// strings stay unquoted, everything else prints its JSON form.
pub fn value_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(value_text)
            .collect::<Vec<_>>()
            .join(", "),
        other => other.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Import
// ---------------------------------------------------------------------------

/// Parse import text into a list of items. A single object counts as a
/// one-element batch; anything else non-array is rejected.
pub fn parse_import(text: &str) -> Result<Vec<Value>, ImportError> {
    let parsed: Value = serde_json::from_str(text).map_err(|e| ImportError::Json(e.to_string()))?;
    match parsed {
        Value::Array(items) => Ok(items),
        Value::Object(_) => Ok(vec![parsed]),
        _ => Err(ImportError::NotAnArray),
    }
}

/// A post payload must carry `title` and `acpt`.
pub fn validate_post(item: &Value, index: usize) -> Result<(), ImportError> {
    for key in ["title", "acpt"] {
        if item.get(key).is_none() {
            return Err(ImportError::MissingKey { index, key });
        }
    }
    Ok(())
}

/// A template payload must carry `title`, `content`, and `acpt`.
pub fn validate_template(item: &Value, index: usize) -> Result<(), ImportError> {
    for key in ["title", "content", "acpt"] {
        if item.get(key).is_none() {
            return Err(ImportError::MissingKey { index, key });
        }
    }
    Ok(())
}

/// Parse and structurally validate a whole import batch of posts.
/// Any failure aborts before a single request is made.
pub fn parse_post_batch(text: &str) -> Result<Vec<Value>, ImportError> {
    let items = parse_import(text)?;
    for (index, item) in items.iter().enumerate() {
        validate_post(item, index)?;
    }
    Ok(items)
}

// ---------------------------------------------------------------------------
// File names
// ---------------------------------------------------------------------------

/// Timestamped default export file name, e.g. `property_export_20230715_103000.json`.
pub fn export_file_name(post_type: &str, ext: &str) -> String {
    format!(
        "{}_export_{}.{}",
        post_type,
        Local::now().format("%Y%m%d_%H%M%S"),
        ext
    )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn property_records() -> Vec<Record> {
        serde_json::from_value(json!([
            {
                "id": 1,
                "title": {"rendered": "Lakeside Cottage"},
                "status": "draft",
                "date": "2023-03-01T09:00:00",
                "content": {"rendered": "<p>Cozy.</p>"},
                "acpt": {"meta": [
                    {"box": "pricing", "field": "price", "value": 450000},
                    {"box": "features", "field": "amenities", "value": ["Garage", "Pool"]},
                ]},
            },
            {
                "id": 2,
                "title": {"rendered": "Downtown, \"Office\""},
                "status": "publish",
                "date": "2023-01-15T12:00:00",
                "acpt": {"meta": [
                    {"box": "pricing", "field": "price", "value": 1200000},
                    {"box": "pricing", "field": "lease_option", "value": "Available"},
                ]},
            },
        ]))
        .unwrap()
    }

    #[test]
    fn full_json_round_trips_through_import() {
        let records = property_records();
        let exported = full_json(&records).unwrap();

        let reimported: Vec<Record> = serde_json::from_str(&exported).unwrap();
        let again = full_json(&reimported).unwrap();
        assert_eq!(exported, again);
        assert_eq!(
            serde_json::from_str::<Value>(&exported).unwrap(),
            serde_json::to_value(&records).unwrap()
        );
    }

    #[test]
    fn simplified_projection_reduces_rendered_fields() {
        let records = property_records();
        let out: Value = serde_json::from_str(&simplified_json(&records).unwrap()).unwrap();

        assert_eq!(out[0]["title"], "Lakeside Cottage");
        assert_eq!(out[0]["content"], "<p>Cozy.</p>");
        assert_eq!(out[1]["content"], "");
        assert!(out[0]["acpt"]["meta"].is_array());
        assert!(out[0].get("link").is_none());
    }

    #[test]
    fn csv_joins_lists_with_comma_space() {
        let records = property_records();
        let out = csv(&records).unwrap();
        assert!(out.contains("Garage, Pool"));
    }

    #[test]
    fn csv_discovers_columns_in_first_seen_order() {
        let records = property_records();
        assert_eq!(
            meta_columns(&records),
            [
                "pricing_price",
                "features_amenities",
                "pricing_lease_option"
            ]
        );

        let header = csv(&records).unwrap();
        let first_line = header.lines().next().unwrap().to_string();
        assert_eq!(
            first_line,
            "id,title,status,date,pricing_price,features_amenities,pricing_lease_option"
        );
    }

    #[test]
    fn csv_quotes_awkward_titles() {
        let records = property_records();
        let out = csv(&records).unwrap();
        // Embedded comma and quotes force CSV quoting on the title cell.
        assert!(out.contains("\"Downtown, \"\"Office\"\"\""));
    }

    #[test]
    fn value_text_renders_scalars() {
        assert_eq!(value_text(&json!("plain")), "plain");
        assert_eq!(value_text(&json!(42)), "42");
        assert_eq!(value_text(&json!(2.5)), "2.5");
        assert_eq!(value_text(&json!(true)), "true");
        assert_eq!(value_text(&json!(null)), "");
        assert_eq!(value_text(&json!(["Garage", "Pool"])), "Garage, Pool");
    }

    #[test]
    fn import_accepts_array_or_single_object() {
        assert_eq!(parse_import("[{}, {}]").unwrap().len(), 2);
        assert_eq!(parse_import("{\"title\": \"x\"}").unwrap().len(), 1);
        assert!(matches!(
            parse_import("\"just a string\""),
            Err(ImportError::NotAnArray)
        ));
        assert!(matches!(
            parse_import("{not json"),
            Err(ImportError::Json(_))
        ));
    }

    #[test]
    fn post_batch_validation_aborts_on_missing_keys() {
        let ok = r#"[{"title": "A", "acpt": {"meta": []}}]"#;
        assert_eq!(parse_post_batch(ok).unwrap().len(), 1);

        let missing = r#"[{"title": "A", "acpt": {}}, {"title": "B"}]"#;
        let err = parse_post_batch(missing).unwrap_err();
        assert!(matches!(
            err,
            ImportError::MissingKey { index: 1, key: "acpt" }
        ));
    }

    #[test]
    fn template_validation_requires_content() {
        let v = json!({"title": "T", "acpt": {"meta": []}});
        assert!(matches!(
            validate_template(&v, 0),
            Err(ImportError::MissingKey { key: "content", .. })
        ));
        let v = json!({"title": "T", "content": "", "acpt": {"meta": []}});
        assert!(validate_template(&v, 0).is_ok());
    }

    #[test]
    fn export_file_name_shape() {
        let name = export_file_name("property", "csv");
        assert!(name.starts_with("property_export_"));
        assert!(name.ends_with(".csv"));
    }
}
