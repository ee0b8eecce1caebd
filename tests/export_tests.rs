/// Integration tests for the store and the export projections.
///
/// Exercises the flow the list/export commands use: fetch-shaped JSON →
/// record set → filtered view → projection, plus the import path back.
use serde_json::{Value, json};

use metapress::api::Record;
use metapress::export;
use metapress::store::{Filter, RecordSet, SortKey};

fn fetch_payload() -> Value {
    json!([
        {
            "id": 11,
            "date": "2023-02-01T09:00:00",
            "status": "draft",
            "title": {"rendered": "Lakeside Cottage"},
            "content": {"rendered": "<p>Cozy.</p>"},
            "link": "https://example.com/?p=11",
            "acpt": {"meta": [
                {"box": "pricing", "field": "price", "value": 450000},
                {"box": "features", "field": "amenities", "value": ["Garage", "Pool"]},
            ]},
        },
        {
            "id": 12,
            "date": "2023-03-10T10:00:00",
            "status": "publish",
            "title": {"rendered": "Downtown Office"},
            "content": {"rendered": "<p>Busy.</p>"},
            "acpt": {"meta": [
                {"box": "pricing", "field": "price", "value": 1200000},
            ]},
        },
        {
            "id": 13,
            "date": "2023-03-20T11:00:00",
            "status": "draft",
            "title": {"rendered": "Suburban Duplex"},
        },
        {
            "id": 14,
            "date": "2023-04-05T12:00:00",
            "status": "pending",
            "title": {"rendered": "Retail Space"},
        },
    ])
}

fn fetched_set() -> RecordSet {
    let records: Vec<Record> = serde_json::from_value(fetch_payload()).unwrap();
    let mut set = RecordSet::new();
    set.replace_all(records);
    set
}

#[test]
fn status_filter_picks_exactly_the_drafts_in_order() {
    let set = fetched_set();
    let filter = Filter {
        status: Some("draft".to_string()),
        ..Filter::default()
    };

    let ids: Vec<u64> = set
        .records()
        .iter()
        .filter(|r| filter.matches(r))
        .map(|r| r.id.unwrap())
        .collect();
    assert_eq!(ids, [11, 13]);
}

#[test]
fn full_json_export_import_is_the_identity_on_content() {
    let set = fetched_set();
    let exported = export::full_json(set.records()).unwrap();

    let reimported: Vec<Record> = serde_json::from_str(&exported).unwrap();
    assert_eq!(
        serde_json::to_value(set.records()).unwrap(),
        serde_json::to_value(&reimported).unwrap()
    );

    // And the original fetch payload survives too, field for field.
    assert_eq!(
        serde_json::from_str::<Value>(&exported).unwrap(),
        serde_json::to_value(&reimported).unwrap()
    );
}

#[test]
fn simplified_projection_keeps_only_the_essential_fields() {
    let set = fetched_set();
    let out: Value =
        serde_json::from_str(&export::simplified_json(set.records()).unwrap()).unwrap();

    let first = out[0].as_object().unwrap();
    let mut keys: Vec<&str> = first.keys().map(String::as_str).collect();
    keys.sort_unstable();
    assert_eq!(keys, ["acpt", "content", "date", "id", "status", "title"]);
    assert_eq!(first["title"], "Lakeside Cottage");

    // Records without metadata omit the acpt key entirely.
    assert!(out[2].get("acpt").is_none());
}

#[test]
fn csv_projection_flattens_metadata_columns() {
    let set = fetched_set();
    let out = export::csv(set.records()).unwrap();
    let mut lines = out.lines();

    assert_eq!(
        lines.next().unwrap(),
        "id,title,status,date,pricing_price,features_amenities"
    );
    let first = lines.next().unwrap();
    assert!(first.starts_with("11,Lakeside Cottage,draft,"));
    assert!(first.ends_with("450000,\"Garage, Pool\""));

    // Records without a given field leave the cell empty.
    let third = lines.nth(1).unwrap();
    assert!(third.starts_with("13,Suburban Duplex,draft,"));
    assert!(third.ends_with(",,"));
}

#[test]
fn sorted_views_leave_the_set_intact_for_export() {
    let set = fetched_set();
    let view = set.view(&Filter::default(), SortKey::TitleDesc);
    assert_eq!(view[0].id, Some(13));

    // Export still sees fetch order.
    let exported: Value =
        serde_json::from_str(&export::full_json(set.records()).unwrap()).unwrap();
    assert_eq!(exported[0]["id"], 11);
}

#[test]
fn import_validation_aborts_before_anything_is_sent() {
    // Malformed JSON
    assert!(export::parse_post_batch("{oops").is_err());

    // Wrong top-level shape
    assert!(export::parse_post_batch("42").is_err());

    // Structural failure names the offending item
    let batch = json!([
        {"title": "ok", "acpt": {"meta": []}},
        {"content": "no title here", "acpt": {"meta": []}},
    ]);
    let err = export::parse_post_batch(&batch.to_string()).unwrap_err();
    assert!(err.to_string().contains("item 1"));
    assert!(err.to_string().contains("title"));

    // A previously exported simplified projection imports cleanly.
    let set = fetched_set();
    let simplified = export::simplified_json(&set.records()[..2]).unwrap();
    assert_eq!(export::parse_post_batch(&simplified).unwrap().len(), 2);
}
