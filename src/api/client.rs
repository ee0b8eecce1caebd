//! Synchronous WordPress REST client.
//!
//! Every operation is one blocking request against
//! `{base_url}/wp-json/wp/v2/{post_type}` using `ureq`:
//!
//! - **Probe**: GET `{base_url}/wp-json/` - HTTP 200 means "connected".
//! - **List / Get**: GET with `per_page` / `search` / `status` parameters.
//! - **Create / Update / Delete**: POST, PUT by id, DELETE by id with an
//!   optional force flag.
//!
//! Authentication is attached per request. A configured bearer token always
//! wins over basic credentials; with neither, requests go out
//! unauthenticated.

use std::time::Duration;

use serde_json::Value;

use crate::config::ManagerConfig;

use super::error::ApiError;
use super::types::{Draft, Record, RecordPatch};

/// Namespace prefix of the content API under the site root.
const API_ROOT: &str = "wp-json";

/// Resource namespace for post-type endpoints.
const API_NAMESPACE: &str = "wp-json/wp/v2";

// ---------------------------------------------------------------------------
// Auth
// ---------------------------------------------------------------------------

/// Per-request authentication descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Auth {
    None,
    Basic { username: String, password: String },
    Bearer(String),
}

impl Auth {
    /// Resolve from whatever credentials are configured. A bearer token is
    /// always used in preference to basic credentials.
    pub fn resolve(token: &str, username: &str, password: &str) -> Self {
        if !token.is_empty() {
            Auth::Bearer(token.to_string())
        } else if !username.is_empty() && !password.is_empty() {
            Auth::Basic {
                username: username.to_string(),
                password: password.to_string(),
            }
        } else {
            Auth::None
        }
    }

    /// The `Authorization` header value, if any.
    pub fn header(&self) -> Option<String> {
        use base64::Engine;
        match self {
            Auth::None => None,
            Auth::Basic { username, password } => {
                let credentials = base64::engine::general_purpose::STANDARD
                    .encode(format!("{username}:{password}"));
                Some(format!("Basic {credentials}"))
            }
            Auth::Bearer(token) => Some(format!("Bearer {token}")),
        }
    }
}

// ---------------------------------------------------------------------------
// List query
// ---------------------------------------------------------------------------

/// Query parameters for the list endpoint.
#[derive(Debug, Clone)]
pub struct ListQuery {
    pub per_page: u32,
    pub search: Option<String>,
    pub status: Option<String>,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            per_page: 100,
            search: None,
            status: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// Blocking REST client. Created per session from the resolved config and
/// reused for every request that session makes.
#[derive(Debug, Clone)]
pub struct Client {
    base_url: String,
    auth: Auth,
    timeout: Duration,
}

impl Client {
    pub fn new(base_url: &str, auth: Auth, timeout: Duration) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            auth,
            timeout,
        }
    }

    pub fn from_config(config: &ManagerConfig) -> Self {
        let conn = &config.connection;
        Self::new(
            &conn.base_url,
            Auth::resolve(&conn.token, &conn.username, &conn.password),
            Duration::from_secs(conn.timeout_secs),
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// URL of the API discovery root, used by the reachability probe.
    pub fn probe_url(&self) -> String {
        format!("{}/{}/", self.base_url, API_ROOT)
    }

    /// URL of the collection endpoint for a post type.
    pub fn resource_url(&self, post_type: &str) -> String {
        format!("{}/{}/{}", self.base_url, API_NAMESPACE, post_type)
    }

    /// URL of a single record.
    pub fn record_url(&self, post_type: &str, id: u64) -> String {
        format!("{}/{}", self.resource_url(post_type), id)
    }

    fn request(&self, method: &str, url: &str) -> ureq::Request {
        let mut req = ureq::request(method, url)
            .timeout(self.timeout)
            .set("Content-Type", "application/json");
        if let Some(header) = self.auth.header() {
            req = req.set("Authorization", &header);
        }
        req
    }

    /// One-shot reachability probe against the API discovery root.
    /// Anything other than HTTP 200 counts as not connected.
    pub fn probe(&self) -> Result<(), ApiError> {
        let response = self.request("GET", &self.probe_url()).call()?;
        if response.status() == 200 {
            Ok(())
        } else {
            Err(ApiError::Status {
                code: response.status(),
                body: response.into_string().unwrap_or_default(),
            })
        }
    }

    /// Fetch records matching the query.
    pub fn list(&self, post_type: &str, query: &ListQuery) -> Result<Vec<Record>, ApiError> {
        let mut req = self
            .request("GET", &self.resource_url(post_type))
            .query("per_page", &query.per_page.to_string());
        if let Some(search) = query.search.as_deref()
            && !search.is_empty()
        {
            req = req.query("search", search);
        }
        if let Some(status) = query.status.as_deref()
            && !status.is_empty()
        {
            req = req.query("status", status);
        }

        let response = req.call()?;
        response
            .into_json::<Vec<Record>>()
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// Fetch a single record by id.
    pub fn get(&self, post_type: &str, id: u64) -> Result<Record, ApiError> {
        let response = self.request("GET", &self.record_url(post_type, id)).call()?;
        response
            .into_json::<Record>()
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// Create a record from a draft. Returns the record as the server
    /// stored it.
    pub fn create(&self, post_type: &str, draft: &Draft) -> Result<Record, ApiError> {
        let response = self
            .request("POST", &self.resource_url(post_type))
            .send_json(draft.wire_value())?;
        response
            .into_json::<Record>()
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// Create a record from an arbitrary JSON payload (bulk import sends
    /// previously exported records back as-is).
    pub fn create_raw(&self, post_type: &str, payload: &Value) -> Result<Record, ApiError> {
        let response = self
            .request("POST", &self.resource_url(post_type))
            .send_json(payload.clone())?;
        response
            .into_json::<Record>()
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// Update a record in place. Only the fields present in the patch
    /// change remotely.
    pub fn update(
        &self,
        post_type: &str,
        id: u64,
        patch: &RecordPatch,
    ) -> Result<Record, ApiError> {
        let response = self
            .request("PUT", &self.record_url(post_type, id))
            .send_json(patch.wire_value())?;
        response
            .into_json::<Record>()
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// Delete a record by id. With `force`, the record bypasses trash and
    /// is removed permanently.
    pub fn delete(&self, post_type: &str, id: u64, force: bool) -> Result<Value, ApiError> {
        let mut req = self.request("DELETE", &self.record_url(post_type, id));
        if force {
            req = req.query("force", "true");
        }
        let response = req.call()?;
        response
            .into_json::<Value>()
            .map_err(|e| ApiError::Decode(e.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn client(auth: Auth) -> Client {
        Client::new("https://example.com/", auth, Duration::from_secs(10))
    }

    #[test]
    fn base_url_strips_trailing_slash() {
        let c = client(Auth::None);
        assert_eq!(c.base_url(), "https://example.com");
    }

    #[test]
    fn endpoint_urls() {
        let c = client(Auth::None);
        assert_eq!(c.probe_url(), "https://example.com/wp-json/");
        assert_eq!(
            c.resource_url("property"),
            "https://example.com/wp-json/wp/v2/property"
        );
        assert_eq!(
            c.record_url("property", 42),
            "https://example.com/wp-json/wp/v2/property/42"
        );
    }

    #[test]
    fn auth_resolution_prefers_bearer() {
        // Both a token and basic credentials configured: bearer wins.
        let auth = Auth::resolve("tok123", "admin", "secret");
        assert_eq!(auth, Auth::Bearer("tok123".to_string()));
        assert_eq!(auth.header().unwrap(), "Bearer tok123");
    }

    #[test]
    fn auth_resolution_falls_back_to_basic() {
        let auth = Auth::resolve("", "admin", "secret");
        assert!(matches!(auth, Auth::Basic { .. }));
        // base64("admin:secret")
        assert_eq!(auth.header().unwrap(), "Basic YWRtaW46c2VjcmV0");
    }

    #[test]
    fn auth_resolution_unauthenticated_without_credentials() {
        assert_eq!(Auth::resolve("", "", ""), Auth::None);
        assert_eq!(Auth::resolve("", "admin", ""), Auth::None);
        assert!(Auth::resolve("", "", "").header().is_none());
    }
}
