//! Terminal chart commands: status, timeline, per-field, and sample charts.
//!
//! CLI invocations are single-shot sessions, so each chart command fetches
//! the record set it aggregates over, then renders colored bar charts.

use anyhow::{Context, Result};
use colored::Colorize;

use crate::api::{ListQuery, Record};
use crate::viz::{self, Count, FieldDistribution, samples};

use super::{OutputFormat, connected_client, effective_post_type};

/// Width of the widest bar, in characters.
const BAR_WIDTH: usize = 40;

// ---------------------------------------------------------------------------
// Fetch helper
// ---------------------------------------------------------------------------

fn fetch_records(
    post_type: Option<&str>,
    search: Option<&str>,
    status: Option<&str>,
) -> Result<Vec<Record>> {
    let (config, client) = connected_client()?;
    let post_type = effective_post_type(&config, post_type);
    let query = ListQuery {
        per_page: config.content.per_page,
        search: search.map(str::to_string),
        status: status.map(str::to_string),
    };
    client
        .list(&post_type, &query)
        .with_context(|| format!("failed to fetch {post_type} records"))
}

// ---------------------------------------------------------------------------
// metapress viz status / timeline
// ---------------------------------------------------------------------------

pub fn run_status(
    post_type: Option<&str>,
    search: Option<&str>,
    format: OutputFormat,
) -> Result<()> {
    let records = fetch_records(post_type, search, None)?;
    let distribution = viz::status_distribution(&records);

    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&distribution)?);
        return Ok(());
    }

    println!("{}", "Status distribution".bold().cyan());
    print_counts(&distribution);
    Ok(())
}

pub fn run_timeline(
    post_type: Option<&str>,
    search: Option<&str>,
    format: OutputFormat,
) -> Result<()> {
    let records = fetch_records(post_type, search, None)?;
    let distribution = viz::monthly_distribution(&records);

    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&distribution)?);
        return Ok(());
    }

    println!("{}", "Records by month".bold().cyan());
    print_counts(&distribution);
    Ok(())
}

// ---------------------------------------------------------------------------
// metapress viz field
// ---------------------------------------------------------------------------

pub fn run_field(
    post_type: Option<&str>,
    box_name: &str,
    field: &str,
    format: OutputFormat,
) -> Result<()> {
    let records = fetch_records(post_type, None, None)?;
    let distribution = viz::field_distribution(&records, box_name, field);

    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&distribution)?);
        return Ok(());
    }

    match distribution {
        FieldDistribution::Numeric { summary, buckets } => {
            println!(
                "{}",
                format!("Distribution of {box_name}.{field}").bold().cyan()
            );
            println!(
                "  count {}  mean {:.2}  std {:.2}  min {:.2}  max {:.2}",
                summary.count, summary.mean, summary.std_dev, summary.min, summary.max
            );
            let max_count = buckets.iter().map(|b| b.count).max().unwrap_or(1);
            for bucket in &buckets {
                println!(
                    "  {:>12.1} .. {:<12.1} {} {}",
                    bucket.lo,
                    bucket.hi,
                    bar(bucket.count, max_count),
                    bucket.count
                );
            }
        }
        FieldDistribution::Text { top } | FieldDistribution::List { top } => {
            println!(
                "{}",
                format!("Most common {box_name}.{field} values").bold().cyan()
            );
            print_counts(&top);
        }
        FieldDistribution::Empty => {
            println!(
                "{}",
                format!("No values found for {box_name}.{field}.").yellow()
            );
            let index = viz::meta_field_index(&records);
            if !index.is_empty() {
                println!("Available fields:");
                for (box_name, fields) in index {
                    println!("  {box_name}: {}", fields.join(", "));
                }
            }
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// metapress viz sample
// ---------------------------------------------------------------------------

/// Render the illustrative dataset for a template category. Needs no
/// connection at all.
pub fn run_sample(category: &str, format: OutputFormat) -> Result<()> {
    let charts = samples::sample_charts(category);
    if charts.is_empty() {
        println!(
            "{}",
            format!("No sample charts for category '{category}'.").yellow()
        );
        println!("Known categories: Real Estate, Stock Market, DISC Assessment");
        return Ok(());
    }

    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&charts)?);
        return Ok(());
    }

    for chart in &charts {
        println!("{}", chart.title.bold().cyan());
        for series in &chart.series {
            if chart.series.len() > 1 {
                println!("  {}", series.name.bold());
            }
            let max = series
                .points
                .iter()
                .map(|p| p.value.abs())
                .fold(0.0_f64, f64::max);
            for point in &series.points {
                let len = scaled(point.value.abs(), max);
                let bar_str = "█".repeat(len);
                let bar_colored = if point.value < 0.0 {
                    bar_str.red()
                } else {
                    bar_str.normal()
                };
                println!("  {:<24} {} {}", point.label, bar_colored, point.value);
            }
        }
        println!();
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Bar rendering
// ---------------------------------------------------------------------------

fn print_counts(counts: &[Count]) {
    if counts.is_empty() {
        println!("{}", "  (no data)".dimmed());
        return;
    }
    let max = counts.iter().map(|c| c.count).max().unwrap_or(1);
    for count in counts {
        println!(
            "  {:<16} {} {}",
            count.label,
            bar(count.count, max),
            count.count
        );
    }
}

fn bar(count: usize, max: usize) -> String {
    "█".repeat(scaled(count as f64, max as f64))
}

fn scaled(value: f64, max: f64) -> usize {
    if max <= 0.0 || value <= 0.0 {
        return 0;
    }
    ((value / max) * BAR_WIDTH as f64).round().max(1.0) as usize
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bars_scale_to_the_maximum() {
        assert_eq!(scaled(10.0, 10.0), BAR_WIDTH);
        assert_eq!(scaled(5.0, 10.0), BAR_WIDTH / 2);
        // Non-zero values always get at least one block.
        assert_eq!(scaled(1.0, 10_000.0), 1);
        assert_eq!(scaled(0.0, 10.0), 0);
        assert_eq!(scaled(3.0, 0.0), 0);
    }
}
