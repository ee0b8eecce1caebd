//! WordPress REST API transport: wire types, client, and error taxonomy.

pub mod client;
pub mod error;
pub mod types;

pub use client::{Auth, Client, ListQuery};
pub use error::ApiError;
pub use types::{
    AcptData, Draft, DraftMeta, MetaEntry, MetaGroup, MetaGroupField, MetaItem, Record,
    RecordPatch, TextField,
};
