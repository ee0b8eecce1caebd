//! Explicit per-session application state.
//!
//! One `Session` is created when an interactive surface starts (the web
//! dashboard; CLI commands are single-shot sessions) and passed by mutable
//! reference into every action. It owns the resolved configuration and the
//! last-fetched record set; nothing lives in globals and nothing outlives
//! the session.

use crate::api::Client;
use crate::config::ManagerConfig;
use crate::store::RecordSet;

#[derive(Debug)]
pub struct Session {
    pub config: ManagerConfig,
    pub records: RecordSet,
    /// Set by a successful reachability probe, cleared by a failed one.
    /// Purely informational - requests are attempted either way.
    pub connected: bool,
}

impl Session {
    pub fn new(config: ManagerConfig) -> Self {
        Self {
            config,
            records: RecordSet::new(),
            connected: false,
        }
    }

    /// A client over this session's connection settings.
    pub fn client(&self) -> Client {
        Client::from_config(&self.config)
    }

    /// The post type commands operate on unless overridden per call.
    pub fn post_type(&self) -> &str {
        &self.config.content.post_type
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_session_starts_empty_and_unverified() {
        let session = Session::new(ManagerConfig::default());
        assert!(session.records.is_empty());
        assert!(!session.connected);
        assert_eq!(session.post_type(), "post");
    }
}
