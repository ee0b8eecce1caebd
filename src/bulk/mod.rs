//! Sequential batch loops for create, update, and delete.
//!
//! Every batch runs one request at a time. A failing item is tallied and
//! the loop continues; only the aggregate outcome is reported at the end.
//! The actual request is injected as a closure so the loops stay
//! independent of the transport.

use crate::api::{Draft, MetaEntry};
use crate::templates::Template;

// ---------------------------------------------------------------------------
// Outcome tally
// ---------------------------------------------------------------------------

/// Aggregate result of a batch run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BulkOutcome {
    pub succeeded: usize,
    pub failed: usize,
}

impl BulkOutcome {
    pub fn total(&self) -> usize {
        self.succeeded + self.failed
    }
}

/// Per-item progress report passed to the caller after each request.
#[derive(Debug)]
pub struct Progress<'a, E> {
    /// 1-based position in the batch.
    pub index: usize,
    pub total: usize,
    pub error: Option<&'a E>,
}

// ---------------------------------------------------------------------------
// The loop
// ---------------------------------------------------------------------------

/// Run `op` over every item in order, tallying successes and failures.
///
/// `progress` fires after each item so callers can report incrementally.
/// A failure never halts the loop.
pub fn run<T, R, E>(
    items: &[T],
    mut op: impl FnMut(&T) -> Result<R, E>,
    mut progress: impl FnMut(Progress<'_, E>, Option<&R>),
) -> BulkOutcome {
    let total = items.len();
    let mut outcome = BulkOutcome::default();

    for (i, item) in items.iter().enumerate() {
        match op(item) {
            Ok(result) => {
                outcome.succeeded += 1;
                progress(
                    Progress {
                        index: i + 1,
                        total,
                        error: None,
                    },
                    Some(&result),
                );
            }
            Err(error) => {
                outcome.failed += 1;
                progress(
                    Progress {
                        index: i + 1,
                        total,
                        error: Some(&error),
                    },
                    None,
                );
            }
        }
    }

    outcome
}

// ---------------------------------------------------------------------------
// Draft generation
// ---------------------------------------------------------------------------

/// Build `count` drafts titled `"{base} 1"` … `"{base} count"`, sharing the
/// given content/status and (optionally) a template's metadata.
pub fn numbered_drafts(
    base_title: &str,
    content: &str,
    status: &str,
    count: usize,
    template: Option<&Template>,
) -> Vec<Draft> {
    let meta: Vec<MetaEntry> = template
        .map(|t| t.meta.iter().filter(|e| e.is_complete()).cloned().collect())
        .unwrap_or_default();

    (1..=count)
        .map(|i| {
            let mut draft = Draft::empty();
            draft.title = format!("{base_title} {i}");
            draft.content = content.to_string();
            draft.status = status.to_string();
            draft.acpt.meta = meta.clone();
            draft
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::templates;

    #[test]
    fn numbered_titles_run_from_one() {
        let drafts = numbered_drafts("Open House", "", "draft", 5, None);
        let titles: Vec<&str> = drafts.iter().map(|d| d.title.as_str()).collect();
        assert_eq!(
            titles,
            [
                "Open House 1",
                "Open House 2",
                "Open House 3",
                "Open House 4",
                "Open House 5"
            ]
        );
    }

    #[test]
    fn numbered_drafts_copy_template_meta() {
        let template = templates::lookup("Real Estate", "Residential Property");
        let drafts = numbered_drafts("Listing", "<p>x</p>", "draft", 2, Some(&template));
        assert_eq!(drafts[0].acpt.meta.len(), template.meta.len());
        assert_eq!(drafts[1].acpt.meta.len(), template.meta.len());
        assert_eq!(drafts[0].content, "<p>x</p>");
    }

    #[test]
    fn single_failure_is_tallied_and_loop_continues() {
        let drafts = numbered_drafts("Listing", "", "draft", 6, None);
        let mut attempted: Vec<String> = Vec::new();

        let outcome = run(
            &drafts,
            |d| {
                attempted.push(d.title.clone());
                if d.title.ends_with('3') {
                    Err("server said no")
                } else {
                    Ok(d.title.clone())
                }
            },
            |_, _| {},
        );

        assert_eq!(outcome.succeeded, 5);
        assert_eq!(outcome.failed, 1);
        assert_eq!(outcome.total(), 6);
        // The loop reached every item despite the failure at item 3.
        assert_eq!(attempted.last().unwrap(), "Listing 6");
    }

    #[test]
    fn progress_reports_every_item_in_order() {
        let items = [1, 2, 3];
        let mut seen: Vec<(usize, bool)> = Vec::new();

        run(
            &items,
            |n| if *n == 2 { Err(()) } else { Ok(*n) },
            |p, result| seen.push((p.index, result.is_some())),
        );

        assert_eq!(seen, [(1, true), (2, false), (3, true)]);
    }

    #[test]
    fn empty_batch_is_a_no_op() {
        let outcome = run(&[] as &[u32], |_| Ok::<_, ()>(()), |_, _| {});
        assert_eq!(outcome, BulkOutcome::default());
    }
}
