//! CLI command implementations.
//!
//! Provides subcommand handlers for:
//! - `metapress probe` - one-shot connection check
//! - `metapress list|get|create|update|duplicate|delete` - record CRUD
//! - `metapress templates|template` - the compiled-in catalog
//! - `metapress export|import` - projections and validated bulk import
//! - `metapress bulk create|update|delete` - sequential batch loops
//! - `metapress viz status|timeline|field|sample` - terminal charts
//! - `metapress config show|init|set|reset` - configuration management

pub mod batch;
pub mod charts;
pub mod records;
pub mod transfer;

use anyhow::{Context, Result};
use colored::Colorize;

use crate::api::Client;
use crate::config::{self, ManagerConfig};

// ---------------------------------------------------------------------------
// Output format
// ---------------------------------------------------------------------------

/// Output format for reporting commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
}

impl OutputFormat {
    pub fn from_str_opt(s: Option<&str>) -> Self {
        match s {
            Some("json") => Self::Json,
            Some("csv") => Self::Csv,
            _ => Self::Table,
        }
    }
}

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

/// Load config and build a client, requiring a configured site URL.
pub(crate) fn connected_client() -> Result<(ManagerConfig, Client)> {
    let config = config::load();
    if config.connection.base_url.is_empty() {
        anyhow::bail!(
            "no site URL configured. Set connection.base_url with \
             `metapress config set connection.base_url https://example.com` \
             or export METAPRESS_URL."
        );
    }
    let client = Client::from_config(&config);
    Ok((config, client))
}

/// The post type a command operates on: the CLI override, else the config.
pub(crate) fn effective_post_type(config: &ManagerConfig, cli: Option<&str>) -> String {
    cli.map(str::to_string)
        .unwrap_or_else(|| config.content.post_type.clone())
}

pub(crate) fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{cut}…")
    }
}

// ---------------------------------------------------------------------------
// metapress probe
// ---------------------------------------------------------------------------

/// One-shot reachability probe against the API discovery root.
pub fn run_probe() -> Result<()> {
    let (config, client) = connected_client()?;

    println!("Probing {} ...", client.probe_url());
    match client.probe() {
        Ok(()) => {
            println!("{}", "Connection successful.".green().bold());
            let auth = if !config.connection.token.is_empty() {
                "bearer token"
            } else if !config.connection.username.is_empty() {
                "basic credentials"
            } else {
                "unauthenticated"
            };
            println!("  Auth: {auth}");
            Ok(())
        }
        Err(e) => {
            println!("{} {}", "Connection failed:".red().bold(), e);
            anyhow::bail!("site not reachable")
        }
    }
}

// ---------------------------------------------------------------------------
// metapress config …
// ---------------------------------------------------------------------------

pub fn run_config_show() -> Result<()> {
    let toml = config::show_effective_config()?;
    if let Some(path) = config::global_config_file() {
        println!("{} {}", "Global config:".bold(), path.display());
    }
    println!();
    println!("{toml}");
    Ok(())
}

pub fn run_config_init(force: bool) -> Result<()> {
    let path = config::init_config(force).context("failed to initialize config")?;
    println!("{} {}", "Wrote default config to".green(), path.display());
    Ok(())
}

pub fn run_config_set(key: &str, value: &str) -> Result<()> {
    config::set_config_value(key, value)?;
    println!("{} {key} = {value}", "Set".green());
    Ok(())
}

pub fn run_config_reset() -> Result<()> {
    let path = config::reset_config()?;
    println!("{} {}", "Reset config at".green(), path.display());
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_format_parsing() {
        assert_eq!(OutputFormat::from_str_opt(None), OutputFormat::Table);
        assert_eq!(OutputFormat::from_str_opt(Some("json")), OutputFormat::Json);
        assert_eq!(OutputFormat::from_str_opt(Some("csv")), OutputFormat::Csv);
        assert_eq!(
            OutputFormat::from_str_opt(Some("unknown")),
            OutputFormat::Table
        );
    }

    #[test]
    fn truncate_keeps_short_strings() {
        assert_eq!(truncate("short", 20), "short");
        assert_eq!(truncate("a very long title indeed", 10), "a very lo…");
    }

    #[test]
    fn effective_post_type_prefers_cli() {
        let config = ManagerConfig::default();
        assert_eq!(effective_post_type(&config, None), "post");
        assert_eq!(effective_post_type(&config, Some("property")), "property");
    }
}
