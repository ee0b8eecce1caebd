//! Record CRUD commands: list, get, create, update, duplicate, delete.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use colored::Colorize;
use serde_json::Value;

use crate::api::{ListQuery, Record, RecordPatch};
use crate::editor::DraftEditor;
use crate::export;
use crate::store::{Filter, RecordSet, SortKey};
use crate::templates;

use super::{OutputFormat, connected_client, effective_post_type, truncate};

// ---------------------------------------------------------------------------
// metapress list
// ---------------------------------------------------------------------------

pub struct ListArgs {
    pub post_type: Option<String>,
    pub search: Option<String>,
    pub status: Option<String>,
    pub title: Option<String>,
    pub ignore_case: bool,
    pub sort: Option<String>,
    pub format: OutputFormat,
    pub save: Option<PathBuf>,
}

/// Fetch records, apply the client-side filter/sort, and render them.
pub fn run_list(args: ListArgs) -> Result<()> {
    let (config, client) = connected_client()?;
    let post_type = effective_post_type(&config, args.post_type.as_deref());

    let query = ListQuery {
        per_page: config.content.per_page,
        search: args.search.clone(),
        status: args.status.clone(),
    };
    let fetched = client
        .list(&post_type, &query)
        .with_context(|| format!("failed to fetch {post_type} records"))?;

    let mut set = RecordSet::new();
    set.replace_all(fetched);

    // Server-side search/status narrowing already happened; the title filter
    // here is the client-side pass over whatever came back.
    let filter = Filter {
        title: args.title.clone(),
        ignore_case: args.ignore_case,
        status: args.status.clone(),
    };
    let sort = args
        .sort
        .as_deref()
        .and_then(SortKey::parse)
        .unwrap_or_default();
    let view: Vec<&Record> = set.view(&filter, sort);

    if view.is_empty() {
        println!(
            "{}",
            format!("No {post_type} records matched your criteria.").yellow()
        );
        return Ok(());
    }

    match args.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&view)?);
        }
        OutputFormat::Csv => {
            let owned: Vec<Record> = view.iter().map(|r| (*r).clone()).collect();
            print!("{}", export::csv(&owned)?);
        }
        OutputFormat::Table => print_record_table(&view),
    }

    if let Some(path) = args.save {
        let owned: Vec<Record> = view.iter().map(|r| (*r).clone()).collect();
        let path = if path.as_os_str().is_empty() {
            PathBuf::from(export::export_file_name(&post_type, "json"))
        } else {
            path
        };
        fs::write(&path, export::full_json(&owned)?)
            .with_context(|| format!("failed to write {}", path.display()))?;
        println!("{} {}", "Saved to".green(), path.display());
    }

    Ok(())
}

fn print_record_table(view: &[&Record]) {
    println!(
        "{}",
        format!("{} record(s)", view.len()).bold().cyan()
    );
    println!("  {:<8} {:<42} {:<10} Date", "ID", "Title", "Status");
    println!("  {}", "-".repeat(76));
    for record in view {
        println!(
            "  {:<8} {:<42} {:<10} {}",
            record.id.map(|id| id.to_string()).unwrap_or_default(),
            truncate(record.title_text(), 42),
            record.status,
            record.date_str(),
        );
    }
}

// ---------------------------------------------------------------------------
// metapress get
// ---------------------------------------------------------------------------

pub fn run_get(post_type: Option<&str>, id: u64, raw: bool) -> Result<()> {
    let (config, client) = connected_client()?;
    let post_type = effective_post_type(&config, post_type);

    let record = client
        .get(&post_type, id)
        .with_context(|| format!("failed to fetch {post_type} {id}"))?;

    if raw {
        println!("{}", serde_json::to_string_pretty(&record)?);
        return Ok(());
    }

    println!("{}", record.title_text().bold().cyan());
    println!("  Status: {}", record.status);
    println!("  Date:   {}", record.date_str());
    if let Some(link) = record.link.as_deref() {
        println!("  Link:   {link}");
    }
    if !record.content_text().is_empty() {
        println!();
        println!("{}", record.content_text());
    }

    // Flat entries, grouped the same way the editor groups them.
    let editor = DraftEditor::from_record(&record);
    for meta_box in &editor.boxes {
        println!();
        println!("{}", meta_box.name.bold());
        for field in &meta_box.fields {
            println!(
                "  {} ({}): {}",
                field.name.bold(),
                field.kind.label(),
                export::value_text(&field.value)
            );
        }
    }

    // Nested read-back groups are shown as the server sent them.
    for group in record.meta_groups() {
        println!();
        println!("{} {}", group.meta_box.bold(), "(read-only)".dimmed());
        for field in &group.meta_fields {
            println!(
                "  {} ({}): {}",
                field.name.bold(),
                field.kind,
                export::value_text(&field.value)
            );
        }
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// metapress create / update
// ---------------------------------------------------------------------------

/// Draft sources and edits shared by create and update.
#[derive(Debug, Default)]
pub struct DraftArgs {
    pub category: Option<String>,
    pub name: Option<String>,
    pub file: Option<PathBuf>,
    pub title: Option<String>,
    pub content: Option<String>,
    pub status: Option<String>,
    /// Repeatable `box.field=value` assignments.
    pub set: Vec<String>,
    /// Repeatable `box.field` removals.
    pub remove: Vec<String>,
    pub dry_run: bool,
}

/// Build the editor from the chosen source, then apply overrides and
/// field edits in order.
fn build_editor(args: &DraftArgs, base: Option<&Record>) -> Result<DraftEditor> {
    let mut editor = if let Some(path) = args.file.as_deref() {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let value: Value = serde_json::from_str(&text).context("invalid JSON in draft file")?;
        export::validate_post(&value, 0)?;
        let record: Record = serde_json::from_value(value).context("unrecognized draft shape")?;
        DraftEditor::from_record(&record)
    } else if let (Some(category), Some(name)) = (args.category.as_deref(), args.name.as_deref()) {
        // Unknown keys intentionally come back as the empty template.
        DraftEditor::from_template(&templates::lookup(category, name))
    } else if let Some(record) = base {
        DraftEditor::from_record(record)
    } else {
        DraftEditor::empty()
    };

    if let Some(title) = args.title.as_deref() {
        editor.title = title.to_string();
    }
    if let Some(content) = args.content.as_deref() {
        editor.content = content.to_string();
    }
    if let Some(status) = args.status.as_deref() {
        editor.status = status.to_string();
    }

    for assignment in &args.set {
        let (target, literal) = assignment
            .split_once('=')
            .with_context(|| format!("expected box.field=value, got '{assignment}'"))?;
        let (box_name, field) = split_target(target)?;
        editor.set_literal(box_name, field, literal)?;
    }
    for target in &args.remove {
        let (box_name, field) = split_target(target)?;
        editor.remove_field(box_name, field)?;
    }

    Ok(editor)
}

fn split_target(target: &str) -> Result<(&str, &str)> {
    target
        .split_once('.')
        .context("field reference must be box.field")
}

pub fn run_create(post_type: Option<&str>, args: DraftArgs) -> Result<()> {
    let editor = build_editor(&args, None)?;
    let draft = editor.to_draft();

    if draft.title.is_empty() {
        anyhow::bail!("the draft has no title. Pass --title or a template/file that sets one.");
    }

    if args.dry_run {
        println!("{}", serde_json::to_string_pretty(&draft.wire_value())?);
        return Ok(());
    }

    let (config, client) = connected_client()?;
    let post_type = effective_post_type(&config, post_type);
    let created = client
        .create(&post_type, &draft)
        .context("create request failed")?;

    println!(
        "{} id {}",
        "Created".green().bold(),
        created.id.map(|id| id.to_string()).unwrap_or_default()
    );
    println!("{}", serde_json::to_string_pretty(&created)?);
    Ok(())
}

pub fn run_update(post_type: Option<&str>, id: u64, args: DraftArgs) -> Result<()> {
    let (config, client) = connected_client()?;
    let post_type = effective_post_type(&config, post_type);

    // Without an explicit source, edit the record as it currently stands.
    let base = if args.file.is_none() && args.category.is_none() {
        Some(
            client
                .get(&post_type, id)
                .with_context(|| format!("failed to fetch {post_type} {id}"))?,
        )
    } else {
        None
    };

    let editor = build_editor(&args, base.as_ref())?;
    let draft = editor.to_draft();

    if args.dry_run {
        println!("{}", serde_json::to_string_pretty(&draft.wire_value())?);
        return Ok(());
    }

    let updated = client
        .update(&post_type, id, &RecordPatch::from(&draft))
        .context("update request failed")?;

    println!("{} id {id}", "Updated".green().bold());
    println!("{}", serde_json::to_string_pretty(&updated)?);
    Ok(())
}

// ---------------------------------------------------------------------------
// metapress duplicate
// ---------------------------------------------------------------------------

/// Fetch a record, retitle it `Copy of {title}`, and create the copy.
pub fn run_duplicate(post_type: Option<&str>, id: u64) -> Result<()> {
    let (config, client) = connected_client()?;
    let post_type = effective_post_type(&config, post_type);

    let original = client
        .get(&post_type, id)
        .with_context(|| format!("failed to fetch {post_type} {id}"))?;

    let mut editor = DraftEditor::from_record(&original);
    editor.title = format!("Copy of {}", original.title_text());
    let draft = editor.to_draft();

    let created = client
        .create(&post_type, &draft)
        .context("create request failed")?;
    println!(
        "{} '{}' as id {}",
        "Duplicated".green().bold(),
        original.title_text(),
        created.id.map(|id| id.to_string()).unwrap_or_default()
    );
    Ok(())
}

// ---------------------------------------------------------------------------
// metapress delete
// ---------------------------------------------------------------------------

pub fn run_delete(post_type: Option<&str>, id: u64, force: bool, yes: bool) -> Result<()> {
    if !yes {
        anyhow::bail!("deletion is permanent with --force; pass --yes to confirm");
    }

    let (config, client) = connected_client()?;
    let post_type = effective_post_type(&config, post_type);

    let ack = client
        .delete(&post_type, id, force)
        .with_context(|| format!("failed to delete {post_type} {id}"))?;

    println!("{} id {id}", "Deleted".green().bold());
    println!("{}", serde_json::to_string_pretty(&ack)?);
    Ok(())
}

// ---------------------------------------------------------------------------
// metapress templates / template
// ---------------------------------------------------------------------------

pub fn run_templates() -> Result<()> {
    println!("{}", "Template catalog".bold().cyan());
    for (category, names) in templates::catalog() {
        println!("  {}", category.bold());
        for name in *names {
            println!("    {name}");
        }
    }
    Ok(())
}

/// Show one skeleton as the draft JSON it would produce.
pub fn run_template(category: &str, name: &str) -> Result<()> {
    let template = templates::lookup(category, name);
    if template.is_empty() {
        println!(
            "{}",
            format!("No template '{category} / {name}' - showing the empty skeleton.").yellow()
        );
    }
    println!(
        "{}",
        serde_json::to_string_pretty(&template.to_draft().wire_value())?
    );
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn build_editor_from_template_with_overrides() {
        let args = DraftArgs {
            category: Some("Real Estate".to_string()),
            name: Some("Residential Property".to_string()),
            title: Some("14 Elm Street".to_string()),
            status: Some("pending".to_string()),
            set: vec!["pricing.price=465000".to_string()],
            ..DraftArgs::default()
        };

        let editor = build_editor(&args, None).unwrap();
        assert_eq!(editor.title, "14 Elm Street");
        assert_eq!(editor.status, "pending");
        let price = editor
            .box_fields("pricing")
            .unwrap()
            .iter()
            .find(|f| f.name == "price")
            .unwrap();
        assert_eq!(price.value, json!(465000));
    }

    #[test]
    fn build_editor_unknown_template_is_empty() {
        let args = DraftArgs {
            category: Some("Real Estate".to_string()),
            name: Some("Moon Base".to_string()),
            title: Some("Still works".to_string()),
            ..DraftArgs::default()
        };

        let editor = build_editor(&args, None).unwrap();
        assert_eq!(editor.title, "Still works");
        assert!(editor.boxes.is_empty());
    }

    #[test]
    fn build_editor_set_and_remove() {
        let args = DraftArgs {
            category: Some("Stock Market".to_string()),
            name: Some("Stock Profile".to_string()),
            set: vec!["stock_info.ticker=MSFT".to_string()],
            remove: vec!["media.price_chart".to_string()],
            ..DraftArgs::default()
        };

        let editor = build_editor(&args, None).unwrap();
        let ticker = editor
            .box_fields("stock_info")
            .unwrap()
            .iter()
            .find(|f| f.name == "ticker")
            .unwrap();
        assert_eq!(ticker.value, json!("MSFT"));
        assert!(
            editor
                .box_fields("media")
                .unwrap()
                .iter()
                .all(|f| f.name != "price_chart")
        );
    }

    #[test]
    fn bad_set_syntax_is_rejected() {
        let args = DraftArgs {
            set: vec!["no-equals-sign".to_string()],
            ..DraftArgs::default()
        };
        assert!(build_editor(&args, None).is_err());

        let args = DraftArgs {
            set: vec!["nodot=5".to_string()],
            ..DraftArgs::default()
        };
        assert!(build_editor(&args, None).is_err());
    }
}
