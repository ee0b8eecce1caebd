//! Batch operation commands: bulk create, bulk update, bulk delete.
//!
//! Every batch first resolves its target set, then loops sequentially with
//! per-item progress. A failing item never halts the loop; the aggregate
//! tally is printed at the end.

use anyhow::{Context, Result};
use colored::Colorize;

use crate::api::{Client, DraftMeta, ListQuery, MetaEntry, Record, RecordPatch};
use crate::bulk::{self, BulkOutcome, Progress};
use crate::templates;

use super::{connected_client, effective_post_type, truncate};

// ---------------------------------------------------------------------------
// Selection
// ---------------------------------------------------------------------------

/// Which fetched records a bulk update/delete applies to.
#[derive(Debug, Default)]
pub struct Selection {
    /// Exact status to match, e.g. `draft`.
    pub status: Option<String>,
    /// Explicit ids. Combined with `status`, both must be given the
    /// records they name.
    pub ids: Vec<u64>,
}

impl Selection {
    fn is_empty(&self) -> bool {
        self.status.is_none() && self.ids.is_empty()
    }

    fn pick<'a>(&self, records: &'a [Record]) -> Vec<&'a Record> {
        records
            .iter()
            .filter(|r| {
                if let Some(status) = self.status.as_deref()
                    && r.status != status
                {
                    return false;
                }
                if !self.ids.is_empty()
                    && !r.id.map(|id| self.ids.contains(&id)).unwrap_or(false)
                {
                    return false;
                }
                true
            })
            .collect()
    }
}

fn fetch_selection(
    client: &Client,
    post_type: &str,
    per_page: u32,
    selection: &Selection,
) -> Result<Vec<Record>> {
    let query = ListQuery {
        per_page,
        search: None,
        status: selection.status.clone(),
    };
    let records = client
        .list(post_type, &query)
        .with_context(|| format!("failed to fetch {post_type} records"))?;
    Ok(selection
        .pick(&records)
        .into_iter()
        .cloned()
        .collect())
}

fn print_progress<E: std::fmt::Display>(label: &str, progress: &Progress<'_, E>) {
    match progress.error {
        None => println!(
            "  [{}/{}] {}",
            progress.index,
            progress.total,
            label.green()
        ),
        Some(error) => println!(
            "  [{}/{}] {} {}",
            progress.index,
            progress.total,
            "failed:".red(),
            error
        ),
    }
}

fn print_outcome(operation: &str, outcome: BulkOutcome) {
    println!(
        "{} {} successful, {} failed",
        format!("Bulk {operation} completed:").bold(),
        outcome.succeeded,
        outcome.failed
    );
}

// ---------------------------------------------------------------------------
// metapress bulk create
// ---------------------------------------------------------------------------

pub struct BulkCreateArgs {
    pub post_type: Option<String>,
    pub count: usize,
    pub base_title: String,
    pub content: Option<String>,
    pub status: Option<String>,
    pub category: Option<String>,
    pub name: Option<String>,
    pub dry_run: bool,
}

/// Create `count` drafts titled `"{base} 1"` … `"{base} count"`, optionally
/// seeded from a template.
pub fn run_bulk_create(args: BulkCreateArgs) -> Result<()> {
    if args.base_title.is_empty() {
        anyhow::bail!("a base title is required");
    }

    let template = match (args.category.as_deref(), args.name.as_deref()) {
        (Some(category), Some(name)) => Some(templates::lookup(category, name)),
        _ => None,
    };
    let content = args
        .content
        .as_deref()
        .or(template.as_ref().map(|t| t.content.as_str()))
        .unwrap_or("");
    let status = args
        .status
        .as_deref()
        .or(template.as_ref().map(|t| t.status.as_str()))
        .unwrap_or("draft");

    let drafts = bulk::numbered_drafts(
        &args.base_title,
        content,
        status,
        args.count,
        template.as_ref(),
    );

    if args.dry_run {
        println!("{}", "Preview of posts to be created".bold().cyan());
        for draft in drafts.iter().take(3) {
            println!("  {} [{}] {} meta entries", draft.title, draft.status, draft.acpt.meta.len());
        }
        if drafts.len() > 3 {
            println!("  ... and {} more", drafts.len() - 3);
        }
        return Ok(());
    }

    let (config, client) = connected_client()?;
    let post_type = effective_post_type(&config, args.post_type.as_deref());

    println!("Creating {} {post_type} record(s) ...", drafts.len());
    let outcome = bulk::run(
        &drafts,
        |draft| client.create(&post_type, draft),
        |progress, result| {
            let label = result
                .map(|r| format!("created id {}", r.id.map(|id| id.to_string()).unwrap_or_default()))
                .unwrap_or_default();
            print_progress(&label, &progress);
        },
    );
    print_outcome("creation", outcome);
    Ok(())
}

// ---------------------------------------------------------------------------
// metapress bulk update
// ---------------------------------------------------------------------------

pub struct BulkUpdateArgs {
    pub post_type: Option<String>,
    pub selection: Selection,
    pub title: Option<String>,
    pub content: Option<String>,
    pub status: Option<String>,
    /// Repeatable `box.field=value` metadata overrides.
    pub set: Vec<String>,
}

/// Apply the same overrides to every selected record, one request each.
pub fn run_bulk_update(args: BulkUpdateArgs) -> Result<()> {
    if args.selection.is_empty() {
        anyhow::bail!("select records with --status and/or --id");
    }

    let meta_updates = parse_meta_updates(&args.set)?;
    let patch = RecordPatch {
        title: args.title.clone(),
        content: args.content.clone(),
        status: args.status.clone(),
        acpt: if meta_updates.is_empty() {
            None
        } else {
            Some(DraftMeta { meta: meta_updates })
        },
    };
    if patch.is_empty() {
        anyhow::bail!("nothing to update: pass --title, --content, --status, or --set");
    }

    let (config, client) = connected_client()?;
    let post_type = effective_post_type(&config, args.post_type.as_deref());
    let selected = fetch_selection(&client, &post_type, config.content.per_page, &args.selection)?;
    if selected.is_empty() {
        println!("{}", "No records matched the selection.".yellow());
        return Ok(());
    }

    println!("Updating {} {post_type} record(s) ...", selected.len());
    let outcome = bulk::run(
        &selected,
        |record| {
            let id = record.id.context("record has no id")?;
            client
                .update(&post_type, id, &patch)
                .map_err(anyhow::Error::from)
        },
        |progress, result| {
            let label = result
                .map(|r| format!("updated '{}'", truncate(r.title_text(), 40)))
                .unwrap_or_default();
            print_progress(&label, &progress);
        },
    );
    print_outcome("update", outcome);
    Ok(())
}

/// Parse `box.field=value` literals into flat meta entries.
fn parse_meta_updates(assignments: &[String]) -> Result<Vec<MetaEntry>> {
    assignments
        .iter()
        .map(|assignment| {
            let (target, literal) = assignment
                .split_once('=')
                .with_context(|| format!("expected box.field=value, got '{assignment}'"))?;
            let (box_name, field) = target
                .split_once('.')
                .context("field reference must be box.field")?;
            let value = serde_json::from_str(literal)
                .unwrap_or_else(|_| serde_json::Value::String(literal.to_string()));
            Ok(MetaEntry::new(box_name, field, value))
        })
        .collect()
}

// ---------------------------------------------------------------------------
// metapress bulk delete
// ---------------------------------------------------------------------------

pub struct BulkDeleteArgs {
    pub post_type: Option<String>,
    pub selection: Selection,
    pub force: bool,
    pub yes: bool,
}

pub fn run_bulk_delete(args: BulkDeleteArgs) -> Result<()> {
    if args.selection.is_empty() {
        anyhow::bail!("select records with --status and/or --id");
    }
    if !args.yes {
        anyhow::bail!("bulk deletion cannot be undone; pass --yes to confirm");
    }

    let (config, client) = connected_client()?;
    let post_type = effective_post_type(&config, args.post_type.as_deref());
    let selected = fetch_selection(&client, &post_type, config.content.per_page, &args.selection)?;
    if selected.is_empty() {
        println!("{}", "No records matched the selection.".yellow());
        return Ok(());
    }

    println!("Deleting {} {post_type} record(s) ...", selected.len());
    let outcome = bulk::run(
        &selected,
        |record| {
            let id = record.id.context("record has no id")?;
            client
                .delete(&post_type, id, args.force)
                .map_err(anyhow::Error::from)
        },
        |progress, result| {
            let label = result.map(|_| "deleted".to_string()).unwrap_or_default();
            print_progress(&label, &progress);
        },
    );
    print_outcome("deletion", outcome);
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
