//! Wire types for the WordPress REST API with the ACPT custom-meta shape.
//!
//! A record carries `title`, `content`, `status`, and `acpt.meta`. The meta
//! list comes in two incompatible shapes:
//!
//! - **Flat** (`{box, field, value}`) - the shape the API accepts on write.
//! - **Nested** (`{meta_box, meta_fields: [{name, type, value}]}`) - a shape
//!   the API may return on read. Nested groups are displayed as-is and are
//!   never converted back into flat entries.
//!
//! All read types keep a flattened catch-all map so a fetched record
//! re-serializes with every field the server sent - the "Full JSON" export
//! is lossless.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// ---------------------------------------------------------------------------
// Records (read shape)
// ---------------------------------------------------------------------------

/// One remote content entity, as returned by the API.
///
/// Every field the dashboard does not interpret lands in `extra` and is
/// written back verbatim on export.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Record {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<TextField>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<TextField>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub acpt: Option<AcptData>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Record {
    /// Title text, regardless of which wire shape it arrived in.
    pub fn title_text(&self) -> &str {
        self.title.as_ref().map(TextField::text).unwrap_or("")
    }

    /// Body text, regardless of which wire shape it arrived in.
    pub fn content_text(&self) -> &str {
        self.content.as_ref().map(TextField::text).unwrap_or("")
    }

    /// Record date as sent by the server (RFC 3339-ish), or `""`.
    pub fn date_str(&self) -> &str {
        self.date.as_deref().unwrap_or("")
    }

    /// Flat meta entries, skipping nested read-only groups.
    pub fn flat_meta(&self) -> impl Iterator<Item = &MetaEntry> {
        self.acpt
            .iter()
            .flat_map(|a| a.meta.iter())
            .filter_map(|item| match item {
                MetaItem::Entry(entry) => Some(entry),
                _ => None,
            })
    }

    /// Nested read-only meta groups, skipping flat entries.
    pub fn meta_groups(&self) -> impl Iterator<Item = &MetaGroup> {
        self.acpt
            .iter()
            .flat_map(|a| a.meta.iter())
            .filter_map(|item| match item {
                MetaItem::Group(group) => Some(group),
                _ => None,
            })
    }
}

/// A text field that is `{"rendered": "..."}` on read but a plain string
/// on write. Both shapes parse and re-serialize unchanged.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TextField {
    Rendered {
        rendered: String,
        #[serde(flatten)]
        extra: Map<String, Value>,
    },
    Plain(String),
}

impl TextField {
    pub fn text(&self) -> &str {
        match self {
            TextField::Rendered { rendered, .. } => rendered,
            TextField::Plain(text) => text,
        }
    }
}

impl From<String> for TextField {
    fn from(text: String) -> Self {
        TextField::Plain(text)
    }
}

// ---------------------------------------------------------------------------
// ACPT metadata
// ---------------------------------------------------------------------------

/// The `acpt` block of a record. `extra` carries whatever else the plugin
/// attaches (e.g. WooCommerce product data).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AcptData {
    #[serde(default)]
    pub meta: Vec<MetaItem>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One element of `acpt.meta`, in whichever wire shape it arrived.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetaItem {
    Entry(MetaEntry),
    Group(MetaGroup),
    Other(Value),
}

/// Flat metadata triple - the write shape.
///
/// `value` is a dynamically typed JSON scalar, list of scalars, or boolean;
/// the editor assigns it an explicit kind on load.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetaEntry {
    #[serde(rename = "box")]
    pub box_name: String,
    pub field: String,
    #[serde(default)]
    pub value: Value,
}

impl MetaEntry {
    pub fn new(box_name: impl Into<String>, field: impl Into<String>, value: Value) -> Self {
        Self {
            box_name: box_name.into(),
            field: field.into(),
            value,
        }
    }

    /// An entry must carry both a box and a field name to be sent.
    pub fn is_complete(&self) -> bool {
        !self.box_name.is_empty() && !self.field.is_empty()
    }
}

/// Nested read-back shape. Rendered read-only; never re-flattened.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetaGroup {
    pub meta_box: String,
    #[serde(default)]
    pub meta_fields: Vec<MetaGroupField>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A single field inside a nested meta group.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetaGroupField {
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub value: Value,
}

// ---------------------------------------------------------------------------
// Drafts (write shape)
// ---------------------------------------------------------------------------

/// The payload sent on create/update: plain strings plus flat meta triples.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Draft {
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default = "default_status")]
    pub status: String,
    #[serde(default)]
    pub acpt: DraftMeta,
}

fn default_status() -> String {
    "draft".to_string()
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DraftMeta {
    #[serde(default)]
    pub meta: Vec<MetaEntry>,
}

impl Draft {
    pub fn empty() -> Self {
        Self {
            title: String::new(),
            content: String::new(),
            status: "draft".to_string(),
            acpt: DraftMeta::default(),
        }
    }

    /// The JSON body actually sent over the wire. Entries missing either a
    /// box or a field name are dropped silently.
    pub fn wire_value(&self) -> Value {
        let mut wire = self.clone();
        wire.acpt.meta.retain(MetaEntry::is_complete);
        serde_json::to_value(&wire).unwrap_or(Value::Null)
    }
}

/// Partial update payload. Only the fields present are changed remotely;
/// bulk updates send just the overrides the user asked for.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RecordPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub acpt: Option<DraftMeta>,
}

impl RecordPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.content.is_none()
            && self.status.is_none()
            && self.acpt.is_none()
    }

    /// The JSON body sent over the wire, with incomplete entries dropped.
    pub fn wire_value(&self) -> Value {
        let mut wire = self.clone();
        if let Some(acpt) = wire.acpt.as_mut() {
            acpt.meta.retain(MetaEntry::is_complete);
        }
        serde_json::to_value(&wire).unwrap_or(Value::Null)
    }
}

impl From<&Draft> for RecordPatch {
    fn from(draft: &Draft) -> Self {
        Self {
            title: Some(draft.title.clone()),
            content: Some(draft.content.clone()),
            status: Some(draft.status.clone()),
            acpt: Some(draft.acpt.clone()),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn record_parses_rendered_title() {
        let record: Record = serde_json::from_value(json!({
            "id": 42,
            "date": "2023-07-01T10:00:00",
            "status": "publish",
            "title": {"rendered": "Hello"},
            "content": {"rendered": "<p>Body</p>", "protected": false},
        }))
        .unwrap();

        assert_eq!(record.id, Some(42));
        assert_eq!(record.title_text(), "Hello");
        assert_eq!(record.content_text(), "<p>Body</p>");
    }

    #[test]
    fn record_parses_plain_title() {
        let record: Record = serde_json::from_value(json!({
            "title": "Imported Draft",
            "acpt": {"meta": []},
        }))
        .unwrap();

        assert_eq!(record.title_text(), "Imported Draft");
        assert_eq!(record.status, "");
    }

    #[test]
    fn content_extra_keys_survive_round_trip() {
        let original = json!({"rendered": "<p>x</p>", "protected": false});
        let field: TextField = serde_json::from_value(original.clone()).unwrap();
        assert_eq!(serde_json::to_value(&field).unwrap(), original);
    }

    #[test]
    fn meta_item_distinguishes_flat_and_nested() {
        let items: Vec<MetaItem> = serde_json::from_value(json!([
            {"box": "pricing", "field": "price", "value": 450000},
            {"meta_box": "pricing", "meta_fields": [
                {"name": "price", "type": "number", "value": 450000}
            ]},
        ]))
        .unwrap();

        assert!(matches!(items[0], MetaItem::Entry(_)));
        assert!(matches!(items[1], MetaItem::Group(_)));
    }

    #[test]
    fn flat_meta_skips_nested_groups() {
        let record: Record = serde_json::from_value(json!({
            "title": "t",
            "acpt": {"meta": [
                {"box": "a", "field": "x", "value": 1},
                {"meta_box": "b", "meta_fields": []},
                {"box": "a", "field": "y", "value": 2},
            ]},
        }))
        .unwrap();

        let fields: Vec<&str> = record.flat_meta().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, ["x", "y"]);
        assert_eq!(record.meta_groups().count(), 1);
    }

    #[test]
    fn draft_wire_drops_incomplete_entries() {
        let mut draft = Draft::empty();
        draft.title = "t".to_string();
        draft.acpt.meta = vec![
            MetaEntry::new("pricing", "price", json!(100)),
            MetaEntry::new("", "orphan", json!(1)),
            MetaEntry::new("pricing", "", json!(2)),
        ];

        let wire = draft.wire_value();
        let meta = wire["acpt"]["meta"].as_array().unwrap();
        assert_eq!(meta.len(), 1);
        assert_eq!(meta[0]["field"], "price");
    }

    #[test]
    fn patch_serializes_only_present_fields() {
        let patch = RecordPatch {
            status: Some("publish".to_string()),
            ..RecordPatch::default()
        };

        let wire = patch.wire_value();
        let obj = wire.as_object().unwrap();
        assert_eq!(obj.len(), 1);
        assert_eq!(obj["status"], "publish");
    }

    #[test]
    fn unknown_record_fields_survive_round_trip() {
        let original = json!({
            "id": 7,
            "title": {"rendered": "T"},
            "status": "draft",
            "slug": "t",
            "meta_custom": {"anything": [1, 2, 3]},
        });

        let record: Record = serde_json::from_value(original.clone()).unwrap();
        let back = serde_json::to_value(&record).unwrap();
        assert_eq!(back["slug"], "t");
        assert_eq!(back["meta_custom"]["anything"][2], 3);
    }
}
