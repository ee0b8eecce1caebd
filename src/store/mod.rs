//! In-memory fetched record set.
//!
//! Holds the result of the most recent successful list query for the rest
//! of the session. The set is replaced wholesale on each fetch; create,
//! update, and delete splice individual entries in place by id. Filtered
//! and sorted views are computed - they never mutate the stored set.

use crate::api::Record;

// ---------------------------------------------------------------------------
// Filter and sort
// ---------------------------------------------------------------------------

/// Client-side filter over the fetched set.
///
/// Title matching is a plain substring test on the needle as typed - no
/// trimming or normalization. Status matching is exact.
#[derive(Debug, Clone, Default)]
pub struct Filter {
    pub title: Option<String>,
    pub ignore_case: bool,
    pub status: Option<String>,
}

impl Filter {
    pub fn matches(&self, record: &Record) -> bool {
        if let Some(needle) = self.title.as_deref() {
            let title = record.title_text();
            let hit = if self.ignore_case {
                title.to_lowercase().contains(&needle.to_lowercase())
            } else {
                title.contains(needle)
            };
            if !hit {
                return false;
            }
        }
        if let Some(status) = self.status.as_deref()
            && record.status != status
        {
            return false;
        }
        true
    }
}

/// Sort order for list views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    DateDesc,
    DateAsc,
    TitleAsc,
    TitleDesc,
}

impl SortKey {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "date-desc" | "newest" => Some(SortKey::DateDesc),
            "date-asc" | "oldest" => Some(SortKey::DateAsc),
            "title-asc" | "title" => Some(SortKey::TitleAsc),
            "title-desc" => Some(SortKey::TitleDesc),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Record set
// ---------------------------------------------------------------------------

/// Ordered collection of the last-fetched records.
#[derive(Debug, Default)]
pub struct RecordSet {
    records: Vec<Record>,
}

impl RecordSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole set with a fresh fetch result.
    pub fn replace_all(&mut self, records: Vec<Record>) {
        self.records = records;
    }

    /// Splice a created or updated record in: replace the entry with the
    /// same id, or append if it isn't present.
    pub fn upsert(&mut self, record: Record) {
        match record
            .id
            .and_then(|id| self.records.iter_mut().find(|r| r.id == Some(id)))
        {
            Some(slot) => *slot = record,
            None => self.records.push(record),
        }
    }

    /// Drop the record with the given id. Returns whether anything was
    /// removed.
    pub fn remove(&mut self, id: u64) -> bool {
        let before = self.records.len();
        self.records.retain(|r| r.id != Some(id));
        self.records.len() != before
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn find(&self, id: u64) -> Option<&Record> {
        self.records.iter().find(|r| r.id == Some(id))
    }

    /// Computed view: filter then sort, leaving the stored order untouched.
    pub fn view(&self, filter: &Filter, sort: SortKey) -> Vec<&Record> {
        let mut view: Vec<&Record> = self.records.iter().filter(|r| filter.matches(r)).collect();
        sort_records(&mut view, sort);
        view
    }
}

/// Sort a view. Dates compare as the server sent them (RFC 3339-ish strings
/// order chronologically); titles compare lexicographically.
pub fn sort_records(view: &mut [&Record], sort: SortKey) {
    match sort {
        SortKey::DateDesc => view.sort_by(|a, b| b.date_str().cmp(a.date_str())),
        SortKey::DateAsc => view.sort_by(|a, b| a.date_str().cmp(b.date_str())),
        SortKey::TitleAsc => view.sort_by(|a, b| a.title_text().cmp(b.title_text())),
        SortKey::TitleDesc => view.sort_by(|a, b| b.title_text().cmp(a.title_text())),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(id: u64, title: &str, status: &str, date: &str) -> Record {
        serde_json::from_value(json!({
            "id": id,
            "title": {"rendered": title},
            "status": status,
            "date": date,
        }))
        .unwrap()
    }

    fn sample_set() -> RecordSet {
        let mut set = RecordSet::new();
        set.replace_all(vec![
            record(1, "Lakeside Cottage", "draft", "2023-03-01T09:00:00"),
            record(2, "Downtown Office", "publish", "2023-01-15T12:00:00"),
            record(3, "Suburban Duplex", "draft", "2023-02-20T10:30:00"),
            record(4, "Retail Space", "pending", "2023-04-02T08:00:00"),
        ]);
        set
    }

    #[test]
    fn status_filter_is_exact_and_order_preserving() {
        let set = sample_set();
        let filter = Filter {
            status: Some("draft".to_string()),
            ..Filter::default()
        };

        let view: Vec<u64> = set
            .records()
            .iter()
            .filter(|r| filter.matches(r))
            .map(|r| r.id.unwrap())
            .collect();
        assert_eq!(view, [1, 3]);
    }

    #[test]
    fn title_filter_is_substring_as_typed() {
        let set = sample_set();
        let exact = Filter {
            title: Some("side".to_string()),
            ..Filter::default()
        };
        assert_eq!(set.view(&exact, SortKey::TitleAsc).len(), 1);

        // Case matters unless ignore_case is set.
        let wrong_case = Filter {
            title: Some("lakeside".to_string()),
            ..Filter::default()
        };
        assert!(set.view(&wrong_case, SortKey::TitleAsc).is_empty());

        let relaxed = Filter {
            title: Some("lakeside".to_string()),
            ignore_case: true,
            ..Filter::default()
        };
        assert_eq!(set.view(&relaxed, SortKey::TitleAsc).len(), 1);
    }

    #[test]
    fn sort_orders() {
        let set = sample_set();
        let all = Filter::default();

        let newest: Vec<u64> = set
            .view(&all, SortKey::DateDesc)
            .iter()
            .map(|r| r.id.unwrap())
            .collect();
        assert_eq!(newest, [4, 1, 3, 2]);

        let titles: Vec<u64> = set
            .view(&all, SortKey::TitleAsc)
            .iter()
            .map(|r| r.id.unwrap())
            .collect();
        assert_eq!(titles, [2, 1, 4, 3]);
    }

    #[test]
    fn view_never_mutates_the_stored_order() {
        let set = sample_set();
        let _ = set.view(&Filter::default(), SortKey::TitleDesc);
        let ids: Vec<u64> = set.records().iter().map(|r| r.id.unwrap()).collect();
        assert_eq!(ids, [1, 2, 3, 4]);
    }

    #[test]
    fn upsert_replaces_by_id_or_appends() {
        let mut set = sample_set();
        set.upsert(record(3, "Suburban Duplex (sold)", "publish", "2023-02-21T10:30:00"));
        assert_eq!(set.len(), 4);
        assert_eq!(set.find(3).unwrap().title_text(), "Suburban Duplex (sold)");

        set.upsert(record(9, "New Listing", "draft", "2023-05-01T00:00:00"));
        assert_eq!(set.len(), 5);
    }

    #[test]
    fn remove_drops_by_id() {
        let mut set = sample_set();
        assert!(set.remove(2));
        assert!(!set.remove(2));
        assert_eq!(set.len(), 3);
    }
}
