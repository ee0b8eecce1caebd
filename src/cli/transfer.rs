//! Export and import commands.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use colored::Colorize;

use crate::api::ListQuery;
use crate::bulk;
use crate::export;

use super::{connected_client, effective_post_type};

// ---------------------------------------------------------------------------
// metapress export
// ---------------------------------------------------------------------------

/// Which projection to write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Full,
    Simplified,
    Csv,
}

impl ExportFormat {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "full" | "json" => Some(Self::Full),
            "simplified" | "simple" => Some(Self::Simplified),
            "csv" => Some(Self::Csv),
            _ => None,
        }
    }

    fn extension(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            _ => "json",
        }
    }
}

pub struct ExportArgs {
    pub post_type: Option<String>,
    pub format: ExportFormat,
    pub search: Option<String>,
    pub status: Option<String>,
    pub limit: Option<u32>,
    /// Write here; with no path, print to stdout. An empty path means
    /// "pick a timestamped name".
    pub output: Option<PathBuf>,
}

/// Run the query, project the result, and write it out.
pub fn run_export(args: ExportArgs) -> Result<()> {
    let (config, client) = connected_client()?;
    let post_type = effective_post_type(&config, args.post_type.as_deref());

    let query = ListQuery {
        per_page: args.limit.unwrap_or(config.content.per_page),
        search: args.search.clone(),
        status: args.status.clone(),
    };
    let records = client
        .list(&post_type, &query)
        .with_context(|| format!("failed to fetch {post_type} records"))?;

    if records.is_empty() {
        println!("{}", "Query returned no results.".yellow());
        return Ok(());
    }

    let body = match args.format {
        ExportFormat::Full => export::full_json(&records)?,
        ExportFormat::Simplified => export::simplified_json(&records)?,
        ExportFormat::Csv => export::csv(&records)?,
    };

    match args.output {
        Some(path) => {
            let path = if path.as_os_str().is_empty() {
                PathBuf::from(export::export_file_name(
                    &post_type,
                    args.format.extension(),
                ))
            } else {
                path
            };
            fs::write(&path, body)
                .with_context(|| format!("failed to write {}", path.display()))?;
            println!(
                "{} {} record(s) to {}",
                "Exported".green().bold(),
                records.len(),
                path.display()
            );
        }
        None => print!("{body}"),
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// metapress import
// ---------------------------------------------------------------------------

/// Bulk import a JSON array of posts. The whole file is validated before
/// the first request; a failing item mid-batch is tallied and skipped.
pub fn run_import(post_type: Option<&str>, file: &PathBuf) -> Result<()> {
    let text =
        fs::read_to_string(file).with_context(|| format!("failed to read {}", file.display()))?;
    let items = export::parse_post_batch(&text)?;

    let (config, client) = connected_client()?;
    let post_type = effective_post_type(&config, post_type);

    println!("Importing {} item(s) into {post_type} ...", items.len());

    let outcome = bulk::run(
        &items,
        |item| client.create_raw(&post_type, item),
        |progress, result| match (result, progress.error) {
            (Some(record), _) => println!(
                "  [{}/{}] {} id {}",
                progress.index,
                progress.total,
                "created".green(),
                record.id.map(|id| id.to_string()).unwrap_or_default()
            ),
            (None, Some(error)) => println!(
                "  [{}/{}] {} {}",
                progress.index,
                progress.total,
                "failed:".red(),
                error
            ),
            _ => {}
        },
    );

    println!(
        "{} {} successful, {} failed",
        "Import completed:".bold(),
        outcome.succeeded,
        outcome.failed
    );
    Ok(())
}
