//! metapress - manage WordPress ACPT custom-meta content from the terminal.
//!
//! The crate is organized around the flow of a single editing session:
//! [`config`] resolves the connection, [`api`] talks to the WordPress REST
//! API, [`templates`] supplies industry document skeletons, [`editor`]
//! shapes a draft's metadata, [`store`] holds the last-fetched record set,
//! and [`export`], [`bulk`], and [`viz`] operate on whatever that session
//! has in memory. [`web`] serves the same operations as an embedded
//! single-page dashboard.

pub mod api;
pub mod bulk;
pub mod cli;
pub mod config;
pub mod editor;
pub mod export;
pub mod session;
pub mod store;
pub mod templates;
pub mod viz;
pub mod web;
