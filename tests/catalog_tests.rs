/// Integration tests for the template catalog.
///
/// Unit tests for lookup internals live in `src/templates/mod.rs`. These
/// tests exercise the catalog through the same paths the commands use:
/// catalog → draft → wire payload.
use serde_json::{Value, json};

use metapress::templates::{self, Template};

#[test]
fn unknown_keys_always_yield_the_canonical_empty_template() {
    let cases = [
        ("Real Estate", "Rental Listing"),
        ("Real Estate", "Land Listing"),
        ("Stock Market", "Portfolio Summary"),
        ("DISC Assessment", "Leadership Profile"),
        ("Product Catalog", "Physical Product"),
        ("Event Management", "Conference"),
        ("", ""),
        ("real estate", "residential property"), // keys are exact
    ];

    for (category, name) in cases {
        let t = templates::lookup(category, name);
        assert!(t.title.is_empty(), "{category}/{name}");
        assert!(t.content.is_empty(), "{category}/{name}");
        assert_eq!(t.status, "draft", "{category}/{name}");
        assert!(t.meta.is_empty(), "{category}/{name}");
    }
}

#[test]
fn catalog_drafts_serialize_to_the_flat_wire_shape() {
    for (category, names) in templates::catalog() {
        for name in *names {
            let draft = templates::lookup(category, name).to_draft();
            let wire = draft.wire_value();

            assert_eq!(wire["status"], "draft");
            let meta = wire["acpt"]["meta"].as_array().unwrap();
            assert!(!meta.is_empty(), "{category}/{name}");
            for item in meta {
                assert!(item["box"].is_string(), "{category}/{name}: {item}");
                assert!(item["field"].is_string(), "{category}/{name}: {item}");
                assert!(item.get("value").is_some(), "{category}/{name}: {item}");
            }
        }
    }
}

#[test]
fn residential_property_matches_the_documented_skeleton() {
    let draft = templates::lookup("Real Estate", "Residential Property").to_draft();
    let wire = draft.wire_value();

    assert_eq!(wire["title"], "Sample Residential Property");
    let meta = wire["acpt"]["meta"].as_array().unwrap();
    assert_eq!(meta.len(), 17);
    assert_eq!(
        meta[0],
        json!({"box": "property_details", "field": "property_type", "value": "Residential"})
    );
    let amenities = meta
        .iter()
        .find(|m| m["field"] == "amenities")
        .unwrap();
    assert_eq!(
        amenities["value"],
        json!(["Garage", "Swimming Pool", "Garden", "Fireplace"])
    );
}

#[test]
fn empty_template_draft_is_still_sendable() {
    let draft = Template::empty().to_draft();
    let wire = draft.wire_value();
    let obj: &serde_json::Map<String, Value> = wire.as_object().unwrap();
    assert_eq!(obj["title"], "");
    assert_eq!(obj["status"], "draft");
    assert_eq!(obj["acpt"]["meta"], json!([]));
}
