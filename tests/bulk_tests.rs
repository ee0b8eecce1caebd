/// Integration tests for the bulk loops and the transport seams they run
/// over: title numbering, failure tallies, auth precedence, endpoint URLs.
use std::time::Duration;

use metapress::api::{ApiError, Auth, Client, Record};
use metapress::bulk;
use metapress::templates;

// ---------------------------------------------------------------------------
// Bulk creation properties
// ---------------------------------------------------------------------------

#[test]
fn bulk_create_numbers_titles_from_one_to_n() {
    let drafts = bulk::numbered_drafts("Spring Listing", "", "draft", 8, None);
    assert_eq!(drafts.len(), 8);
    assert_eq!(drafts[0].title, "Spring Listing 1");
    assert_eq!(drafts[7].title, "Spring Listing 8");
}

#[test]
fn one_simulated_failure_leaves_n_minus_one_successes() {
    let n = 10;
    let k = 4; // the failing item
    let drafts = bulk::numbered_drafts("Listing", "", "draft", n, None);

    let mut sent: Vec<String> = Vec::new();
    let mut reported = 0usize;

    let outcome = bulk::run(
        &drafts,
        |draft| {
            sent.push(draft.title.clone());
            if sent.len() == k {
                Err(ApiError::Status {
                    code: 500,
                    body: "boom".to_string(),
                })
            } else {
                Ok(draft.title.clone())
            }
        },
        |progress, _| {
            // Progress is reported incrementally after each item.
            reported += 1;
            assert_eq!(progress.index, reported);
            assert_eq!(progress.total, n);
        },
    );

    assert_eq!(outcome.succeeded, n - 1);
    assert_eq!(outcome.failed, 1);
    // The loop continued through the final item.
    assert_eq!(sent.len(), n);
    assert_eq!(sent.last().unwrap(), &format!("Listing {n}"));
}

#[test]
fn bulk_drafts_seeded_from_a_template_share_its_metadata() {
    let template = templates::lookup("DISC Assessment", "Individual Assessment");
    let drafts = bulk::numbered_drafts(
        "Assessment",
        &template.content,
        &template.status,
        3,
        Some(&template),
    );

    for draft in &drafts {
        assert_eq!(draft.acpt.meta.len(), template.meta.len());
        assert_eq!(draft.status, "draft");
        assert_eq!(draft.content, template.content);
    }
    // Seeded metadata is copied, not shared: titles differ per draft.
    assert_ne!(drafts[0].title, drafts[1].title);
}

// ---------------------------------------------------------------------------
// Transport seams
// ---------------------------------------------------------------------------

#[test]
fn bearer_token_beats_basic_credentials() {
    let auth = Auth::resolve("jwt-abc", "admin", "hunter2");
    assert_eq!(auth.header().unwrap(), "Bearer jwt-abc");

    // Without a token, basic credentials apply; without either, nothing.
    assert!(
        Auth::resolve("", "admin", "hunter2")
            .header()
            .unwrap()
            .starts_with("Basic ")
    );
    assert!(Auth::resolve("", "", "").header().is_none());
}

#[test]
fn client_builds_namespaced_endpoints() {
    let client = Client::new(
        "https://example.com/",
        Auth::None,
        Duration::from_secs(10),
    );

    assert_eq!(client.probe_url(), "https://example.com/wp-json/");
    assert_eq!(
        client.resource_url("assessment"),
        "https://example.com/wp-json/wp/v2/assessment"
    );
    assert_eq!(
        client.record_url("assessment", 311),
        "https://example.com/wp-json/wp/v2/assessment/311"
    );
}

#[test]
fn transport_errors_carry_their_cause() {
    let status = ApiError::Status {
        code: 403,
        body: "{\"code\":\"rest_forbidden\"}".to_string(),
    };
    assert_eq!(status.status_code(), Some(403));
    assert!(status.to_string().contains("rest_forbidden"));

    let transport = ApiError::Transport("dns error".to_string());
    assert_eq!(transport.status_code(), None);

    // A bulk loop over failing transport calls tallies without stopping.
    let items = [1u64, 2, 3];
    let outcome = bulk::run(
        &items,
        |_| Err::<Record, _>(ApiError::Transport("connection refused".to_string())),
        |_, _| {},
    );
    assert_eq!(outcome.failed, 3);
    assert_eq!(outcome.succeeded, 0);
}
