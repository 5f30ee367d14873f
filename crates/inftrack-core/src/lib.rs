//! Domain model and view engine for the influencer campaign tracker.
//!
//! Everything here is a pure computation over values the caller owns: the
//! filter evaluator, the sort comparator, the view pipeline that composes
//! them, and the metric calculators behind the campaign dashboard. The only
//! I/O is loading [`AppConfig`] and the bundled sample data.

pub mod app_config;
pub mod campaigns;
pub mod config;
pub mod filter;
pub mod influencers;
pub mod metrics;
pub mod sample;
pub mod sort;
pub mod view;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use campaigns::{Campaign, CampaignUpdate};
pub use config::{load_app_config, load_app_config_from_env};
pub use filter::{filter_influencers, FilterSpec, Predicate};
pub use influencers::{
    Influencer, InfluencerUpdate, NewInfluencer, Platform, Status, VideoSlot, VideoSlotUpdate,
    TOTAL_VIEWS_MULTIPLIER, VIDEO_SLOTS,
};
pub use metrics::{
    campaign_current_views, campaign_total_views, completion_rate, format_number,
    status_breakdown, total_views, CampaignTotals, StatusBreakdown,
};
pub use sample::load_sample_influencers;
pub use sort::{compare, sort_influencers, SortDirection, SortField, SortSpec};
pub use view::apply;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("username must be non-empty")]
    EmptyUsername,
    #[error("campaign name must be non-empty")]
    EmptyCampaignName,
    #[error("video slot {0} is out of range; slots are numbered 0 to 3")]
    SlotOutOfRange(usize),
    #[error("invalid platform: {0}")]
    InvalidPlatform(String),
    #[error("invalid status: {0}")]
    InvalidStatus(String),
    #[error("invalid sort field: {0}")]
    InvalidSortField(String),
    #[error("invalid sort direction: {0}")]
    InvalidSortDirection(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read sample file {path}: {source}")]
    SampleFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse sample file: {0}")]
    SampleFileParse(#[from] serde_yaml::Error),

    #[error("invalid sample influencer '{username}': {source}")]
    SampleValidation {
        username: String,
        #[source]
        source: CoreError,
    },
}
