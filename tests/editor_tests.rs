/// Integration tests for the draft editor.
///
/// These exercise the full authoring pipeline the create/update commands
/// use: template or fetched record → grouped editor → authoring operations
/// → re-flattened wire payload.
use serde_json::{Value, json};

use metapress::api::Record;
use metapress::editor::{DraftEditor, EditorError, FieldKind};
use metapress::templates;

fn fetched_record() -> Record {
    serde_json::from_value(json!({
        "id": 7,
        "date": "2023-05-01T08:00:00",
        "status": "publish",
        "title": {"rendered": "Lakeside Cottage"},
        "content": {"rendered": "<p>Cozy.</p>", "protected": false},
        "acpt": {"meta": [
            {"box": "pricing", "field": "price", "value": 450000},
            {"box": "pricing", "field": "negotiable", "value": true},
            {"box": "features", "field": "amenities", "value": ["Garage", "Pool"]},
            // nested read-back shape: stays out of the editor
            {"meta_box": "inspection", "meta_fields": [
                {"name": "passed", "type": "checkbox", "value": true}
            ]},
        ]},
    }))
    .unwrap()
}

#[test]
fn group_then_flatten_reproduces_template_triples_exactly() {
    for (category, names) in templates::catalog() {
        for name in *names {
            let template = templates::lookup(category, name);
            let draft = DraftEditor::from_template(&template).to_draft();

            let original: Vec<(String, String, Value)> = template
                .meta
                .iter()
                .map(|e| (e.box_name.clone(), e.field.clone(), e.value.clone()))
                .collect();
            let rebuilt: Vec<(String, String, Value)> = draft
                .acpt
                .meta
                .iter()
                .map(|e| (e.box_name.clone(), e.field.clone(), e.value.clone()))
                .collect();
            assert_eq!(original, rebuilt, "{category}/{name}");
        }
    }
}

#[test]
fn editing_a_fetched_record_keeps_flat_entries_and_drops_groups() {
    let record = fetched_record();
    let editor = DraftEditor::from_record(&record);

    assert_eq!(editor.title, "Lakeside Cottage");
    assert_eq!(editor.status, "publish");

    let boxes: Vec<&str> = editor.boxes.iter().map(|b| b.name.as_str()).collect();
    assert_eq!(boxes, ["pricing", "features"]);

    // The nested "inspection" group is read-only display data, not editable.
    assert!(editor.box_fields("inspection").is_none());

    let draft = editor.to_draft();
    assert_eq!(draft.acpt.meta.len(), 3);
}

#[test]
fn authoring_flow_add_edit_remove_then_submit() {
    let mut editor = DraftEditor::from_record(&fetched_record());

    editor.add_box("open_house").unwrap();
    editor
        .add_field("open_house", "date", FieldKind::Date)
        .unwrap();
    editor
        .set_value("open_house", "date", json!("2023-06-15"))
        .unwrap();
    editor.set_literal("pricing", "price", "475000").unwrap();
    editor.remove_field("features", "amenities").unwrap();

    let draft = editor.to_draft();
    let triples: Vec<(String, String)> = draft
        .acpt
        .meta
        .iter()
        .map(|e| (e.box_name.clone(), e.field.clone()))
        .collect();
    assert_eq!(
        triples,
        [
            ("pricing".to_string(), "price".to_string()),
            ("pricing".to_string(), "negotiable".to_string()),
            ("open_house".to_string(), "date".to_string()),
        ]
    );
    assert_eq!(draft.acpt.meta[0].value, json!(475000));
}

#[test]
fn duplicate_rejections_surface_as_editor_errors() {
    let mut editor = DraftEditor::from_record(&fetched_record());

    assert_eq!(
        editor.add_box("pricing"),
        Err(EditorError::DuplicateBox("pricing".to_string()))
    );
    assert_eq!(
        editor.add_field("pricing", "price", FieldKind::Number),
        Err(EditorError::DuplicateField(
            "pricing".to_string(),
            "price".to_string()
        ))
    );
}

#[test]
fn date_round_trip_uses_the_fixed_format() {
    let mut editor = DraftEditor::empty();
    editor.add_field("info", "published", FieldKind::Date).unwrap();
    editor
        .set_value("info", "published", json!("2023-07-15"))
        .unwrap();

    let draft = editor.to_draft();
    assert_eq!(draft.acpt.meta[0].value, json!("2023-07-15"));

    // Re-loading the flattened draft infers Text (a date is just a string
    // on the wire) but preserves the value byte-for-byte.
    let record: Record = serde_json::from_value(json!({
        "title": "x",
        "acpt": {"meta": serde_json::to_value(&draft.acpt.meta).unwrap()},
    }))
    .unwrap();
    let second = DraftEditor::from_record(&record);
    assert_eq!(
        second.box_fields("info").unwrap()[0].value,
        json!("2023-07-15")
    );
}

#[test]
fn incomplete_entries_never_reach_the_wire() {
    let record: Record = serde_json::from_value(json!({
        "title": "x",
        "acpt": {"meta": [
            {"box": "a", "field": "keep", "value": 1},
            {"box": "", "field": "dropped", "value": 2},
            {"box": "a", "field": "", "value": 3},
        ]},
    }))
    .unwrap();

    let wire = DraftEditor::from_record(&record).to_draft().wire_value();
    let meta = wire["acpt"]["meta"].as_array().unwrap();
    assert_eq!(meta.len(), 1);
    assert_eq!(meta[0]["field"], "keep");
}
