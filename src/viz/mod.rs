//! Client-side aggregation over the fetched record set.
//!
//! Three aggregations, all computed from whatever the session last fetched:
//!
//! - **Status distribution** - count by status.
//! - **Temporal distribution** - count by `YYYY-MM` of the record date;
//!   unparsable dates are skipped.
//! - **Per-field value distribution** - shape depends on the value type of
//!   the first occurrence: numeric → histogram buckets plus summary
//!   statistics, string → top-10 frequency, list → flattened top-10
//!   frequency.
//!
//! [`samples`] provides the per-category illustrative datasets that need no
//! remote data at all.

pub mod samples;

use chrono::NaiveDate;
use serde::Serialize;
use serde_json::Value;

use crate::api::Record;
use crate::export::value_text;

/// How many distinct values the frequency charts keep.
const TOP_VALUES: usize = 10;

/// Bucket count for numeric histograms.
const HISTOGRAM_BUCKETS: usize = 10;

// ---------------------------------------------------------------------------
// Counts
// ---------------------------------------------------------------------------

/// One labelled tally in a distribution.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Count {
    pub label: String,
    pub count: usize,
}

/// Count records by status, most frequent first (ties by label).
pub fn status_distribution(records: &[Record]) -> Vec<Count> {
    let mut counts: Vec<Count> = Vec::new();
    for record in records {
        let status = if record.status.is_empty() {
            "unknown"
        } else {
            record.status.as_str()
        };
        match counts.iter_mut().find(|c| c.label == status) {
            Some(c) => c.count += 1,
            None => counts.push(Count {
                label: status.to_string(),
                count: 1,
            }),
        }
    }
    counts.sort_by(|a, b| b.count.cmp(&a.count).then(a.label.cmp(&b.label)));
    counts
}

/// Count records by year-month of their date, chronologically.
/// Records with a missing or unparsable date are skipped.
pub fn monthly_distribution(records: &[Record]) -> Vec<Count> {
    let mut counts: Vec<Count> = Vec::new();
    for record in records {
        let Some(month) = year_month(record.date_str()) else {
            continue;
        };
        match counts.iter_mut().find(|c| c.label == month) {
            Some(c) => c.count += 1,
            None => counts.push(Count {
                label: month,
                count: 1,
            }),
        }
    }
    counts.sort_by(|a, b| a.label.cmp(&b.label));
    counts
}

/// `YYYY-MM` of an RFC 3339-ish date string, if it parses.
fn year_month(date: &str) -> Option<String> {
    let day_part = date.split('T').next()?;
    let parsed = NaiveDate::parse_from_str(day_part, "%Y-%m-%d").ok()?;
    Some(parsed.format("%Y-%m").to_string())
}

// ---------------------------------------------------------------------------
// Per-field distribution
// ---------------------------------------------------------------------------

/// Summary statistics over a numeric field.
#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    pub count: usize,
    pub mean: f64,
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
}

/// One histogram bucket over `[lo, hi)` (the last bucket is inclusive).
#[derive(Debug, Clone, Serialize)]
pub struct Bucket {
    pub lo: f64,
    pub hi: f64,
    pub count: usize,
}

/// Value distribution of one `(box, field)` across the set. The shape is
/// chosen from the type of the first value found.
#[derive(Debug, Serialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum FieldDistribution {
    Numeric {
        summary: Summary,
        buckets: Vec<Bucket>,
    },
    Text {
        top: Vec<Count>,
    },
    List {
        top: Vec<Count>,
    },
    Empty,
}

/// Aggregate the values of one metadata field across the set.
pub fn field_distribution(records: &[Record], box_name: &str, field: &str) -> FieldDistribution {
    let values: Vec<&Value> = records
        .iter()
        .flat_map(Record::flat_meta)
        .filter(|e| e.box_name == box_name && e.field == field)
        .map(|e| &e.value)
        .collect();

    let Some(first) = values.first() else {
        return FieldDistribution::Empty;
    };

    match first {
        Value::Number(_) => {
            let numbers: Vec<f64> = values.iter().filter_map(|v| v.as_f64()).collect();
            FieldDistribution::Numeric {
                summary: summarize(&numbers),
                buckets: histogram(&numbers, HISTOGRAM_BUCKETS),
            }
        }
        Value::String(_) => FieldDistribution::Text {
            top: top_frequencies(values.iter().filter(|v| v.is_string()).copied()),
        },
        Value::Array(_) => FieldDistribution::List {
            top: top_frequencies(
                values
                    .iter()
                    .filter_map(|v| v.as_array())
                    .flatten(),
            ),
        },
        _ => FieldDistribution::Empty,
    }
}

/// Boxes and fields discovered across the set, in first-seen order.
pub fn meta_field_index(records: &[Record]) -> Vec<(String, Vec<String>)> {
    let mut index: Vec<(String, Vec<String>)> = Vec::new();
    for entry in records.iter().flat_map(Record::flat_meta) {
        match index.iter_mut().find(|(b, _)| *b == entry.box_name) {
            Some((_, fields)) => {
                if !fields.contains(&entry.field) {
                    fields.push(entry.field.clone());
                }
            }
            None => index.push((entry.box_name.clone(), vec![entry.field.clone()])),
        }
    }
    index
}

fn top_frequencies<'a>(values: impl Iterator<Item = &'a Value>) -> Vec<Count> {
    let mut counts: Vec<Count> = Vec::new();
    for value in values {
        let label = value_text(value);
        match counts.iter_mut().find(|c| c.label == label) {
            Some(c) => c.count += 1,
            None => counts.push(Count { label, count: 1 }),
        }
    }
    counts.sort_by(|a, b| b.count.cmp(&a.count).then(a.label.cmp(&b.label)));
    counts.truncate(TOP_VALUES);
    counts
}

fn summarize(numbers: &[f64]) -> Summary {
    let count = numbers.len();
    if count == 0 {
        return Summary {
            count: 0,
            mean: 0.0,
            std_dev: 0.0,
            min: 0.0,
            max: 0.0,
        };
    }
    let mean = numbers.iter().sum::<f64>() / count as f64;
    let variance = numbers.iter().map(|n| (n - mean).powi(2)).sum::<f64>() / count as f64;
    let min = numbers.iter().copied().fold(f64::INFINITY, f64::min);
    let max = numbers.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    Summary {
        count,
        mean,
        std_dev: variance.sqrt(),
        min,
        max,
    }
}

fn histogram(numbers: &[f64], buckets: usize) -> Vec<Bucket> {
    if numbers.is_empty() || buckets == 0 {
        return Vec::new();
    }
    let min = numbers.iter().copied().fold(f64::INFINITY, f64::min);
    let max = numbers.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if min == max {
        return vec![Bucket {
            lo: min,
            hi: max,
            count: numbers.len(),
        }];
    }

    let width = (max - min) / buckets as f64;
    let mut out: Vec<Bucket> = (0..buckets)
        .map(|i| Bucket {
            lo: min + width * i as f64,
            hi: min + width * (i + 1) as f64,
            count: 0,
        })
        .collect();

    for &n in numbers {
        let mut slot = ((n - min) / width) as usize;
        if slot >= buckets {
            slot = buckets - 1;
        }
        out[slot].count += 1;
    }
    out
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
