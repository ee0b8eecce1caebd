//! Draft editor for ACPT metadata.
//!
//! Converts between the flat `(box, field, value)` triple list and a
//! grouped-by-box structure, and applies authoring operations to it:
//!
//! - **Load**: group triples by box of first occurrence, then field of first
//!   occurrence. Entries missing either name are skipped; a duplicate field
//!   name inside a box keeps the first occurrence. Each field is assigned an
//!   explicit [`FieldKind`] exactly once, inferred from the runtime type of
//!   its loaded value - the kind is carried from then on, never re-inferred.
//! - **Author**: add/remove boxes and fields (duplicates rejected), edit
//!   values (date fields round-trip a fixed `YYYY-MM-DD` format).
//! - **Submit**: re-flatten to triples in box-then-field insertion order,
//!   silently dropping entries with an empty box or field name.

use chrono::NaiveDate;
use serde_json::Value;
use thiserror::Error;

use crate::api::{Draft, DraftMeta, MetaEntry, Record};
use crate::templates::Template;

/// Fixed wire format for date-kind field values.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

// ---------------------------------------------------------------------------
// Field kinds
// ---------------------------------------------------------------------------

/// Explicit input kind of a metadata field, assigned at authoring time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Textarea,
    Number,
    Select,
    MultiSelect,
    Checkbox,
    Radio,
    Date,
    Url,
    Email,
}

impl FieldKind {
    /// Inference rule applied once when a value is loaded from the wire:
    /// integer → Number, list → MultiSelect, boolean → Checkbox, everything
    /// else (strings, floats, null) → Text.
    pub fn infer(value: &Value) -> Self {
        match value {
            Value::Bool(_) => FieldKind::Checkbox,
            Value::Number(n) if n.is_i64() || n.is_u64() => FieldKind::Number,
            Value::Array(_) => FieldKind::MultiSelect,
            _ => FieldKind::Text,
        }
    }

    /// Default value for a freshly added field of this kind.
    pub fn default_value(self) -> Value {
        match self {
            FieldKind::Number => Value::from(0),
            FieldKind::MultiSelect => Value::Array(Vec::new()),
            FieldKind::Checkbox => Value::Bool(false),
            _ => Value::String(String::new()),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FieldKind::Text => "Text",
            FieldKind::Textarea => "Textarea",
            FieldKind::Number => "Number",
            FieldKind::Select => "Select",
            FieldKind::MultiSelect => "Select Multiple",
            FieldKind::Checkbox => "Checkbox",
            FieldKind::Radio => "Radio",
            FieldKind::Date => "Date",
            FieldKind::Url => "URL",
            FieldKind::Email => "Email",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Some(FieldKind::Text),
            "textarea" => Some(FieldKind::Textarea),
            "number" => Some(FieldKind::Number),
            "select" => Some(FieldKind::Select),
            "multiselect" | "multi-select" | "select-multiple" => Some(FieldKind::MultiSelect),
            "checkbox" => Some(FieldKind::Checkbox),
            "radio" => Some(FieldKind::Radio),
            "date" => Some(FieldKind::Date),
            "url" => Some(FieldKind::Url),
            "email" => Some(FieldKind::Email),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Editor structures
// ---------------------------------------------------------------------------

/// One field inside a meta box, with its explicit kind and current value.
#[derive(Debug, Clone)]
pub struct FieldDraft {
    pub name: String,
    pub kind: FieldKind,
    pub value: Value,
}

/// A named group of fields. Order of fields is insertion order.
#[derive(Debug, Clone)]
pub struct MetaBoxDraft {
    pub name: String,
    pub fields: Vec<FieldDraft>,
}

/// Editable draft state: basic fields plus metadata grouped by box.
/// Box order is insertion order.
#[derive(Debug, Clone)]
pub struct DraftEditor {
    pub title: String,
    pub content: String,
    pub status: String,
    pub boxes: Vec<MetaBoxDraft>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EditorError {
    #[error("meta box '{0}' already exists")]
    DuplicateBox(String),
    #[error("field '{1}' already exists in meta box '{0}'")]
    DuplicateField(String, String),
    #[error("no meta box named '{0}'")]
    UnknownBox(String),
    #[error("no field named '{1}' in meta box '{0}'")]
    UnknownField(String, String),
    #[error("invalid date '{0}': expected YYYY-MM-DD")]
    InvalidDate(String),
}

impl DraftEditor {
    pub fn empty() -> Self {
        Self {
            title: String::new(),
            content: String::new(),
            status: "draft".to_string(),
            boxes: Vec::new(),
        }
    }

    /// Start a draft from a template skeleton.
    pub fn from_template(template: &Template) -> Self {
        let mut editor = Self {
            title: template.title.clone(),
            content: template.content.clone(),
            status: template.status.clone(),
            boxes: Vec::new(),
        };
        editor.load_entries(template.meta.iter());
        editor
    }

    /// Start a draft from a fetched record (edit / duplicate flows).
    ///
    /// Only flat entries are loaded; nested read-back groups stay out of the
    /// editor and are shown read-only elsewhere.
    pub fn from_record(record: &Record) -> Self {
        let mut editor = Self {
            title: record.title_text().to_string(),
            content: record.content_text().to_string(),
            status: if record.status.is_empty() {
                "draft".to_string()
            } else {
                record.status.clone()
            },
            boxes: Vec::new(),
        };
        editor.load_entries(record.flat_meta());
        editor
    }

    /// Group flat entries into boxes. First occurrence wins for both box
    /// order and duplicate field names; incomplete entries are skipped.
    fn load_entries<'a>(&mut self, entries: impl Iterator<Item = &'a MetaEntry>) {
        for entry in entries {
            if !entry.is_complete() {
                continue;
            }
            let slot = match self.boxes.iter().position(|b| b.name == entry.box_name) {
                Some(slot) => slot,
                None => {
                    self.boxes.push(MetaBoxDraft {
                        name: entry.box_name.clone(),
                        fields: Vec::new(),
                    });
                    self.boxes.len() - 1
                }
            };
            let box_draft = &mut self.boxes[slot];
            if box_draft.fields.iter().any(|f| f.name == entry.field) {
                continue;
            }
            box_draft.fields.push(FieldDraft {
                name: entry.field.clone(),
                kind: FieldKind::infer(&entry.value),
                value: entry.value.clone(),
            });
        }
    }

    // -- authoring operations ------------------------------------------------

    /// Add an empty meta box. Rejected if the name is already present.
    pub fn add_box(&mut self, name: &str) -> Result<(), EditorError> {
        if self.boxes.iter().any(|b| b.name == name) {
            return Err(EditorError::DuplicateBox(name.to_string()));
        }
        self.boxes.push(MetaBoxDraft {
            name: name.to_string(),
            fields: Vec::new(),
        });
        Ok(())
    }

    /// Add a field to a box with the kind's default value. The box is
    /// created on demand; a duplicate field name is rejected.
    pub fn add_field(
        &mut self,
        box_name: &str,
        field: &str,
        kind: FieldKind,
    ) -> Result<(), EditorError> {
        if self
            .box_fields(box_name)
            .is_some_and(|fields| fields.iter().any(|f| f.name == field))
        {
            return Err(EditorError::DuplicateField(
                box_name.to_string(),
                field.to_string(),
            ));
        }
        let slot = match self.boxes.iter().position(|b| b.name == box_name) {
            Some(slot) => slot,
            None => {
                self.boxes.push(MetaBoxDraft {
                    name: box_name.to_string(),
                    fields: Vec::new(),
                });
                self.boxes.len() - 1
            }
        };
        self.boxes[slot].fields.push(FieldDraft {
            name: field.to_string(),
            kind,
            value: kind.default_value(),
        });
        Ok(())
    }

    /// Set the value of an existing field. Date fields are validated
    /// against the fixed `YYYY-MM-DD` format.
    pub fn set_value(
        &mut self,
        box_name: &str,
        field: &str,
        value: Value,
    ) -> Result<(), EditorError> {
        let field_draft = self.field_mut(box_name, field)?;
        if field_draft.kind == FieldKind::Date {
            let text = value.as_str().unwrap_or_default();
            if NaiveDate::parse_from_str(text, DATE_FORMAT).is_err() {
                return Err(EditorError::InvalidDate(text.to_string()));
            }
        }
        field_draft.value = value;
        Ok(())
    }

    /// Remove a field from a box.
    pub fn remove_field(&mut self, box_name: &str, field: &str) -> Result<(), EditorError> {
        let box_draft = self
            .boxes
            .iter_mut()
            .find(|b| b.name == box_name)
            .ok_or_else(|| EditorError::UnknownBox(box_name.to_string()))?;
        let before = box_draft.fields.len();
        box_draft.fields.retain(|f| f.name != field);
        if box_draft.fields.len() == before {
            return Err(EditorError::UnknownField(
                box_name.to_string(),
                field.to_string(),
            ));
        }
        Ok(())
    }

    /// Remove a whole box and its fields.
    pub fn remove_box(&mut self, name: &str) -> Result<(), EditorError> {
        let before = self.boxes.len();
        self.boxes.retain(|b| b.name != name);
        if self.boxes.len() == before {
            return Err(EditorError::UnknownBox(name.to_string()));
        }
        Ok(())
    }

    /// Set a field from a raw CLI literal, creating it if absent.
    ///
    /// The literal is parsed as JSON first (so `3`, `true`, `["a","b"]`
    /// work); anything that doesn't parse is taken as a plain string. For a
    /// new field the kind is assigned from the parsed literal - the one
    /// authoring-time inference.
    pub fn set_literal(
        &mut self,
        box_name: &str,
        field: &str,
        literal: &str,
    ) -> Result<(), EditorError> {
        let value = parse_literal(literal);
        if self.field_mut(box_name, field).is_ok() {
            self.set_value(box_name, field, value)
        } else {
            self.add_field(box_name, field, FieldKind::infer(&value))?;
            self.set_value(box_name, field, value)
        }
    }

    // -- accessors -----------------------------------------------------------

    pub fn box_fields(&self, box_name: &str) -> Option<&[FieldDraft]> {
        self.boxes
            .iter()
            .find(|b| b.name == box_name)
            .map(|b| b.fields.as_slice())
    }

    fn field_mut(&mut self, box_name: &str, field: &str) -> Result<&mut FieldDraft, EditorError> {
        let box_draft = self
            .boxes
            .iter_mut()
            .find(|b| b.name == box_name)
            .ok_or_else(|| EditorError::UnknownBox(box_name.to_string()))?;
        box_draft
            .fields
            .iter_mut()
            .find(|f| f.name == field)
            .ok_or_else(|| EditorError::UnknownField(box_name.to_string(), field.to_string()))
    }

    // -- submission ----------------------------------------------------------

    /// Re-flatten to the wire shape in box-then-field insertion order.
    /// Entries with an empty box or field name are dropped silently.
    pub fn to_draft(&self) -> Draft {
        let meta = self
            .boxes
            .iter()
            .flat_map(|b| {
                b.fields
                    .iter()
                    .map(|f| MetaEntry::new(b.name.clone(), f.name.clone(), f.value.clone()))
            })
            .filter(MetaEntry::is_complete)
            .collect();

        Draft {
            title: self.title.clone(),
            content: self.content.clone(),
            status: self.status.clone(),
            acpt: DraftMeta { meta },
        }
    }
}

/// Parse a CLI literal: JSON if it parses, plain string otherwise.
fn parse_literal(literal: &str) -> Value {
    serde_json::from_str(literal).unwrap_or_else(|_| Value::String(literal.to_string()))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
