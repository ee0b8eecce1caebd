use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use metapress::cli::{
    self, OutputFormat,
    batch::{BulkCreateArgs, BulkDeleteArgs, BulkUpdateArgs, Selection},
    charts,
    records::{self, DraftArgs, ListArgs},
    transfer::{self, ExportArgs, ExportFormat},
};
use metapress::config;
use metapress::web;

#[derive(Debug, Parser)]
#[command(name = "metapress")]
#[command(about = "Manage WordPress ACPT custom-meta content from the terminal")]
struct App {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Check that the site's REST API is reachable
    Probe,
    /// Fetch records and show them with client-side filter/sort
    List {
        /// Post type slug (defaults to the configured one)
        #[arg(long)]
        post_type: Option<String>,
        /// Free-text search passed to the server
        #[arg(long)]
        search: Option<String>,
        /// Exact status filter: publish, draft, pending, private
        #[arg(long)]
        status: Option<String>,
        /// Client-side substring filter on the title, as typed
        #[arg(long)]
        title: Option<String>,
        /// Make the title filter case-insensitive
        #[arg(long)]
        ignore_case: bool,
        /// Sort: newest (default), oldest, title-asc, title-desc
        #[arg(long)]
        sort: Option<String>,
        /// Output format: table (default), json, csv
        #[arg(long, default_value = "table")]
        format: String,
        /// Also save the full JSON to this file ("" picks a timestamped name)
        #[arg(long)]
        save: Option<PathBuf>,
    },
    /// Show one record: content, metadata, read-only groups
    Get {
        id: u64,
        #[arg(long)]
        post_type: Option<String>,
        /// Print the raw JSON instead of the formatted view
        #[arg(long)]
        raw: bool,
    },
    /// Create a record from a template, a JSON file, or flags
    Create {
        #[arg(long)]
        post_type: Option<String>,
        /// Template category, e.g. "Real Estate"
        #[arg(long)]
        category: Option<String>,
        /// Template name, e.g. "Residential Property"
        #[arg(long)]
        name: Option<String>,
        /// JSON file with a draft or previously exported record
        #[arg(long)]
        file: Option<PathBuf>,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        content: Option<String>,
        /// draft, publish, pending, or private
        #[arg(long)]
        status: Option<String>,
        /// Set a metadata field: box.field=value (repeatable; value may be JSON)
        #[arg(long = "set")]
        set: Vec<String>,
        /// Remove a metadata field: box.field (repeatable)
        #[arg(long = "remove")]
        remove: Vec<String>,
        /// Print the JSON payload instead of sending it
        #[arg(long)]
        dry_run: bool,
    },
    /// Update a record in place (fetches it first unless --file/--category)
    Update {
        id: u64,
        #[arg(long)]
        post_type: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        file: Option<PathBuf>,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        content: Option<String>,
        #[arg(long)]
        status: Option<String>,
        #[arg(long = "set")]
        set: Vec<String>,
        #[arg(long = "remove")]
        remove: Vec<String>,
        #[arg(long)]
        dry_run: bool,
    },
    /// Fetch a record and create a copy titled "Copy of …"
    Duplicate {
        id: u64,
        #[arg(long)]
        post_type: Option<String>,
    },
    /// Delete a record by id
    Delete {
        id: u64,
        #[arg(long)]
        post_type: Option<String>,
        /// Bypass trash and remove permanently
        #[arg(long)]
        force: bool,
        /// Confirm the deletion
        #[arg(long)]
        yes: bool,
    },
    /// List the template catalog
    Templates,
    /// Show one template skeleton as draft JSON
    Template { category: String, name: String },
    /// Query records and write a projection: full, simplified, or csv
    Export {
        #[arg(long)]
        post_type: Option<String>,
        /// Projection: full (default), simplified, csv
        #[arg(long, default_value = "full")]
        format: String,
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        status: Option<String>,
        /// Number of records to fetch (default: configured per_page)
        #[arg(long)]
        limit: Option<u32>,
        /// Write here instead of stdout ("" picks a timestamped name)
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Bulk-create records from a JSON array file
    Import {
        file: PathBuf,
        #[arg(long)]
        post_type: Option<String>,
    },
    /// Sequential batch operations
    Bulk {
        #[command(subcommand)]
        command: BulkCommands,
    },
    /// Aggregate the fetched set into terminal charts
    Viz {
        #[command(subcommand)]
        command: VizCommands,
    },
    /// Serve the embedded web dashboard
    Web {
        /// Bind address (default: configured web.addr)
        #[arg(long)]
        addr: Option<String>,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Debug, Subcommand)]
enum BulkCommands {
    /// Create N records titled "{base} 1" … "{base} N"
    Create {
        /// Number of records to create
        #[arg(long, default_value = "5")]
        count: usize,
        /// Base title; each record appends its 1-based index
        #[arg(long)]
        base_title: String,
        #[arg(long)]
        content: Option<String>,
        #[arg(long)]
        status: Option<String>,
        /// Seed content/status/metadata from this template category…
        #[arg(long)]
        category: Option<String>,
        /// …and name
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        post_type: Option<String>,
        /// Preview the first few records instead of sending
        #[arg(long)]
        dry_run: bool,
    },
    /// Apply the same overrides to every selected record
    Update {
        /// Select records with this exact status
        #[arg(long)]
        status: Option<String>,
        /// Select records by id (repeatable)
        #[arg(long = "id")]
        ids: Vec<u64>,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        content: Option<String>,
        /// New status to apply to the selection
        #[arg(long)]
        new_status: Option<String>,
        /// Metadata override: box.field=value (repeatable)
        #[arg(long = "set")]
        set: Vec<String>,
        #[arg(long)]
        post_type: Option<String>,
    },
    /// Delete every selected record
    Delete {
        #[arg(long)]
        status: Option<String>,
        #[arg(long = "id")]
        ids: Vec<u64>,
        #[arg(long)]
        force: bool,
        /// Confirm the deletion
        #[arg(long)]
        yes: bool,
        #[arg(long)]
        post_type: Option<String>,
    },
}

#[derive(Debug, Subcommand)]
enum VizCommands {
    /// Count records by status
    Status {
        #[arg(long)]
        post_type: Option<String>,
        #[arg(long)]
        search: Option<String>,
        #[arg(long, default_value = "table")]
        format: String,
    },
    /// Count records by year-month
    Timeline {
        #[arg(long)]
        post_type: Option<String>,
        #[arg(long)]
        search: Option<String>,
        #[arg(long, default_value = "table")]
        format: String,
    },
    /// Distribution of one metadata field's values
    Field {
        /// Meta box name
        box_name: String,
        /// Field name
        field: String,
        #[arg(long)]
        post_type: Option<String>,
        #[arg(long, default_value = "table")]
        format: String,
    },
    /// Illustrative charts for a template category (no connection needed)
    Sample {
        /// "Real Estate", "Stock Market", or "DISC Assessment"
        category: String,
        #[arg(long, default_value = "table")]
        format: String,
    },
}

#[derive(Debug, Subcommand)]
enum ConfigCommands {
    /// Show the effective, fully resolved configuration
    Show,
    /// Write the annotated default config to ~/.metapress/config.toml
    Init {
        #[arg(long)]
        force: bool,
    },
    /// Set one key, e.g. `config set connection.base_url https://example.com`
    Set { key: String, value: String },
    /// Overwrite the global config with defaults
    Reset,
}

fn main() -> Result<()> {
    let app = App::parse();

    match app.command {
        Commands::Probe => cli::run_probe(),
        Commands::List {
            post_type,
            search,
            status,
            title,
            ignore_case,
            sort,
            format,
            save,
        } => records::run_list(ListArgs {
            post_type,
            search,
            status,
            title,
            ignore_case,
            sort,
            format: OutputFormat::from_str_opt(Some(&format)),
            save,
        }),
        Commands::Get { id, post_type, raw } => records::run_get(post_type.as_deref(), id, raw),
        Commands::Create {
            post_type,
            category,
            name,
            file,
            title,
            content,
            status,
            set,
            remove,
            dry_run,
        } => records::run_create(
            post_type.as_deref(),
            DraftArgs {
                category,
                name,
                file,
                title,
                content,
                status,
                set,
                remove,
                dry_run,
            },
        ),
        Commands::Update {
            id,
            post_type,
            category,
            name,
            file,
            title,
            content,
            status,
            set,
            remove,
            dry_run,
        } => records::run_update(
            post_type.as_deref(),
            id,
            DraftArgs {
                category,
                name,
                file,
                title,
                content,
                status,
                set,
                remove,
                dry_run,
            },
        ),
        Commands::Duplicate { id, post_type } => records::run_duplicate(post_type.as_deref(), id),
        Commands::Delete {
            id,
            post_type,
            force,
            yes,
        } => records::run_delete(post_type.as_deref(), id, force, yes),
        Commands::Templates => records::run_templates(),
        Commands::Template { category, name } => records::run_template(&category, &name),
        Commands::Export {
            post_type,
            format,
            search,
            status,
            limit,
            output,
        } => {
            let format = ExportFormat::parse(&format)
                .ok_or_else(|| anyhow::anyhow!("unknown export format '{format}'"))?;
            transfer::run_export(ExportArgs {
                post_type,
                format,
                search,
                status,
                limit,
                output,
            })
        }
        Commands::Import { file, post_type } => {
            transfer::run_import(post_type.as_deref(), &file)
        }
        Commands::Bulk { command } => match command {
            BulkCommands::Create {
                count,
                base_title,
                content,
                status,
                category,
                name,
                post_type,
                dry_run,
            } => cli::batch::run_bulk_create(BulkCreateArgs {
                post_type,
                count,
                base_title,
                content,
                status,
                category,
                name,
                dry_run,
            }),
            BulkCommands::Update {
                status,
                ids,
                title,
                content,
                new_status,
                set,
                post_type,
            } => cli::batch::run_bulk_update(BulkUpdateArgs {
                post_type,
                selection: Selection { status, ids },
                title,
                content,
                status: new_status,
                set,
            }),
            BulkCommands::Delete {
                status,
                ids,
                force,
                yes,
                post_type,
            } => cli::batch::run_bulk_delete(BulkDeleteArgs {
                post_type,
                selection: Selection { status, ids },
                force,
                yes,
            }),
        },
        Commands::Viz { command } => match command {
            VizCommands::Status {
                post_type,
                search,
                format,
            } => charts::run_status(
                post_type.as_deref(),
                search.as_deref(),
                OutputFormat::from_str_opt(Some(&format)),
            ),
            VizCommands::Timeline {
                post_type,
                search,
                format,
            } => charts::run_timeline(
                post_type.as_deref(),
                search.as_deref(),
                OutputFormat::from_str_opt(Some(&format)),
            ),
            VizCommands::Field {
                box_name,
                field,
                post_type,
                format,
            } => charts::run_field(
                post_type.as_deref(),
                &box_name,
                &field,
                OutputFormat::from_str_opt(Some(&format)),
            ),
            VizCommands::Sample { category, format } => {
                charts::run_sample(&category, OutputFormat::from_str_opt(Some(&format)))
            }
        },
        Commands::Web { addr } => {
            let config = config::load();
            let addr = addr.unwrap_or_else(|| config.web.addr.clone());
            web::serve(&addr, config)
        }
        Commands::Config { command } => match command {
            ConfigCommands::Show => cli::run_config_show(),
            ConfigCommands::Init { force } => cli::run_config_init(force),
            ConfigCommands::Set { key, value } => cli::run_config_set(&key, &value),
            ConfigCommands::Reset => cli::run_config_reset(),
        },
    }
}
