/// Configuration schema and defaults for metapress.
///
/// Defines the TOML-serializable configuration structure with sections
/// `[connection]`, `[content]`, and `[web]`. Every field has a built-in
/// default; users only set the values they want to override.
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// Top-level metapress configuration.
///
/// Maps directly to the `~/.metapress/config.toml` and `.metapress.toml`
/// file schemas. All sections and fields are optional - missing values fall
/// back to built-in defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ManagerConfig {
    pub connection: ConnectionConfig,
    pub content: ContentConfig,
    pub web: WebConfig,
}

// ---------------------------------------------------------------------------
// [connection]
// ---------------------------------------------------------------------------

/// Target site and credentials.
///
/// Nothing here is validated at load time; the optional `metapress probe`
/// command performs the one-shot reachability check.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectionConfig {
    /// Site root, e.g. `https://example.com`. A trailing slash is tolerated.
    pub base_url: String,
    /// Username for HTTP Basic auth (application passwords work here too).
    pub username: String,
    /// Password for HTTP Basic auth.
    pub password: String,
    /// Bearer token (JWT/OAuth). When set, it is always used in preference
    /// to the username/password pair.
    pub token: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            username: String::new(),
            password: String::new(),
            token: String::new(),
            timeout_secs: 10,
        }
    }
}

// ---------------------------------------------------------------------------
// [content]
// ---------------------------------------------------------------------------

/// Which resource the commands operate on by default.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentConfig {
    /// Post type slug: `post`, `page`, `product`, `property`, `stock`,
    /// `assessment`, or any custom slug registered on the site.
    pub post_type: String,
    /// Page size for list queries.
    pub per_page: u32,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            post_type: "post".to_string(),
            per_page: 100,
        }
    }
}

// ---------------------------------------------------------------------------
// [web]
// ---------------------------------------------------------------------------

/// Embedded dashboard server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WebConfig {
    /// Bind address for `metapress web`.
    pub addr: String,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            addr: "127.0.0.1:9294".to_string(),
        }
    }
}

impl ManagerConfig {
    /// Annotated default config written by `metapress config init`.
    pub fn default_toml() -> &'static str {
        r#"# metapress configuration
#
# Layering (later overrides earlier):
#   built-in defaults -> ~/.metapress/config.toml -> ./.metapress.toml
#   -> METAPRESS_* environment variables

[connection]
# Site root, e.g. "https://example.com"
base_url = ""
# HTTP Basic credentials (WordPress application passwords work here).
username = ""
password = ""
# Bearer token (JWT/OAuth). When set, it is used instead of the
# username/password pair.
token = ""
# Per-request timeout in seconds.
timeout_secs = 10

[content]
# Post type slug the commands operate on: post, page, product, property,
# stock, assessment, or any custom slug.
post_type = "post"
# Page size for list queries.
per_page = 100

[web]
# Bind address for `metapress web`.
addr = "127.0.0.1:9294"
"#
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
