//! Persistence for campaigns and influencers.
//!
//! Three JSON documents live in a [`KeyValueBackend`]: the campaign list,
//! the active campaign id, and one flat list of every influencer across all
//! campaigns. [`Store`] layers the CRUD operations and the one-time legacy
//! migration on top.

pub mod backend;
pub mod error;
pub mod store;

pub use backend::{FileBackend, KeyValueBackend, MemoryBackend};
pub use error::StoreError;
pub use store::{
    generate_id, Scope, Store, ACTIVE_CAMPAIGN_KEY, CAMPAIGNS_KEY, DEFAULT_CAMPAIGN_DESCRIPTION,
    DEFAULT_CAMPAIGN_NAME, INFLUENCERS_KEY,
};
