/// Configuration system for metapress.
///
/// Provides a layered configuration hierarchy:
///
/// 1. **Built-in defaults** - hardcoded in [`schema::ManagerConfig::default()`]
/// 2. **User global config** - `~/.metapress/config.toml`
/// 3. **Project local config** - `.metapress.toml` in the current working directory
/// 4. **Environment variables** - `METAPRESS_*` overrides (highest precedence)
///
/// Later layers override earlier ones. Missing sections in a TOML file fall
/// back to the previous layer's values. The connection is never validated at
/// load time; `metapress probe` performs the one-shot reachability check.
pub mod schema;

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};

pub use schema::ManagerConfig;

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Load the fully resolved metapress configuration.
///
/// Merges all layers in order: defaults → global TOML → project TOML → env
/// vars. This is the primary entry point for all commands that need a
/// connection.
pub fn load() -> ManagerConfig {
    let mut config = ManagerConfig::default();

    // Layer 2: user global config (~/.metapress/config.toml)
    if let Some(global) = load_toml_file(global_config_path()) {
        config = global;
    }

    // Layer 3: project local config (.metapress.toml)
    if let Some(project) = load_toml_file(project_config_path()) {
        config = project;
    }

    // Layer 4: environment variable overrides
    apply_env_overrides(&mut config);

    config
}

/// Load a TOML config file from the given path (if it exists).
///
/// Returns `None` if the path is `None`, the file doesn't exist, or the
/// content is malformed. A malformed file never aborts the session.
fn load_toml_file(path: Option<PathBuf>) -> Option<ManagerConfig> {
    let path = path?;
    let content = fs::read_to_string(&path).ok()?;
    toml::from_str(&content).ok()
}

// ---------------------------------------------------------------------------
// File paths
// ---------------------------------------------------------------------------

/// Path to the user global config: `~/.metapress/config.toml`.
fn global_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".metapress").join("config.toml"))
}

/// Path to the project local config: `.metapress.toml` in the current directory.
fn project_config_path() -> Option<PathBuf> {
    std::env::current_dir()
        .ok()
        .map(|cwd| cwd.join(".metapress.toml"))
}

/// Return the path to the global config file for display/init purposes.
pub fn global_config_file() -> Option<PathBuf> {
    global_config_path()
}

// ---------------------------------------------------------------------------
// Environment variable overrides
// ---------------------------------------------------------------------------

/// Apply environment variable overrides (highest precedence layer).
///
/// Supported variables:
/// - `METAPRESS_URL` - site root
/// - `METAPRESS_USERNAME` / `METAPRESS_PASSWORD` - basic credentials
/// - `METAPRESS_TOKEN` - bearer token
/// - `METAPRESS_TIMEOUT_SECS` - request timeout
/// - `METAPRESS_POST_TYPE` - default post type slug
/// - `METAPRESS_PER_PAGE` - list page size
fn apply_env_overrides(config: &mut ManagerConfig) {
    if let Ok(val) = std::env::var("METAPRESS_URL")
        && !val.is_empty()
    {
        config.connection.base_url = val;
    }
    if let Ok(val) = std::env::var("METAPRESS_USERNAME")
        && !val.is_empty()
    {
        config.connection.username = val;
    }
    if let Ok(val) = std::env::var("METAPRESS_PASSWORD")
        && !val.is_empty()
    {
        config.connection.password = val;
    }
    if let Ok(val) = std::env::var("METAPRESS_TOKEN")
        && !val.is_empty()
    {
        config.connection.token = val;
    }
    if let Ok(val) = std::env::var("METAPRESS_TIMEOUT_SECS")
        && let Ok(secs) = val.parse::<u64>()
    {
        config.connection.timeout_secs = secs;
    }
    if let Ok(val) = std::env::var("METAPRESS_POST_TYPE")
        && !val.is_empty()
    {
        config.content.post_type = val;
    }
    if let Ok(val) = std::env::var("METAPRESS_PER_PAGE")
        && let Ok(n) = val.parse::<u32>()
    {
        config.content.per_page = n;
    }
}

// ---------------------------------------------------------------------------
// Config init / set / reset
// ---------------------------------------------------------------------------

/// Write the default annotated config to `~/.metapress/config.toml`.
///
/// Creates the `~/.metapress/` directory if it doesn't exist. Returns an
/// error if the file already exists (use `force = true` to overwrite).
pub fn init_config(force: bool) -> Result<PathBuf> {
    let path = global_config_path().context("could not determine home directory")?;

    if path.exists() && !force {
        anyhow::bail!(
            "config file already exists at {}. Use --force to overwrite.",
            path.display()
        );
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("failed to create ~/.metapress/ directory")?;
    }

    fs::write(&path, ManagerConfig::default_toml()).context("failed to write config file")?;

    Ok(path)
}

/// Set a single config key to a value in the global config file.
///
/// Reads the current global config (or defaults), updates the specified key,
/// and writes the result back. Supports dotted keys like
/// `connection.base_url`.
pub fn set_config_value(key: &str, value: &str) -> Result<()> {
    let path = global_config_path().context("could not determine home directory")?;

    let content = if path.exists() {
        fs::read_to_string(&path).context("failed to read config file")?
    } else {
        toml::to_string_pretty(&ManagerConfig::default())
            .context("failed to serialize default config")?
    };

    let mut root: toml::Value =
        toml::from_str(&content).context("failed to parse config as TOML value")?;

    set_toml_value(&mut root, key, value)?;

    let output = toml::to_string_pretty(&root).context("failed to serialize config")?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("failed to create config directory")?;
    }
    fs::write(&path, output).context("failed to write config file")?;

    Ok(())
}

/// Set a value in a TOML value tree using a dotted key path.
fn set_toml_value(root: &mut toml::Value, key: &str, raw_value: &str) -> Result<()> {
    let parts: Vec<&str> = key.split('.').collect();
    if parts.is_empty() {
        anyhow::bail!("empty config key");
    }

    // Navigate to the parent table
    let mut current = root;
    for &part in &parts[..parts.len() - 1] {
        current = current
            .get_mut(part)
            .with_context(|| format!("config key not found: section '{part}' in '{key}'"))?;
    }

    let leaf = parts[parts.len() - 1];

    let table = current.as_table_mut().with_context(|| {
        format!(
            "expected table at '{}'",
            key.rsplit_once('.').map(|(s, _)| s).unwrap_or("")
        )
    })?;

    // Determine the type of the existing value to parse correctly
    let existing = table.get(leaf);
    let new_value = match existing {
        Some(toml::Value::Boolean(_)) => toml::Value::Boolean(matches!(
            raw_value.to_ascii_lowercase().as_str(),
            "1" | "true" | "yes" | "on"
        )),
        Some(toml::Value::Integer(_)) => {
            let n: i64 = raw_value
                .parse()
                .with_context(|| format!("expected integer for '{key}', got '{raw_value}'"))?;
            toml::Value::Integer(n)
        }
        _ => toml::Value::String(raw_value.to_string()),
    };

    table.insert(leaf.to_string(), new_value);
    Ok(())
}

/// Reset the global config to defaults (overwrite the file).
pub fn reset_config() -> Result<PathBuf> {
    init_config(true)
}

/// Show the effective (fully resolved) config as TOML.
pub fn show_effective_config() -> Result<String> {
    let config = load();
    toml::to_string_pretty(&config).context("failed to serialize effective config")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
