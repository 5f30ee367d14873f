use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::CoreError;

/// Number of video slots every influencer carries.
pub const VIDEO_SLOTS: usize = 4;

/// Projected total views are the median times this factor.
///
/// Only [`VIDEO_SLOTS`] videos are tracked, but dashboards and completion
/// rates are baselined on five, so the constant stays at 5.
pub const TOTAL_VIEWS_MULTIPLIER: u64 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Platform {
    Instagram,
    TikTok,
    Both,
}

impl Platform {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Platform::Instagram => "Instagram",
            Platform::TikTok => "TikTok",
            Platform::Both => "Both",
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Platform {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "instagram" => Ok(Platform::Instagram),
            "tiktok" => Ok(Platform::TikTok),
            "both" => Ok(Platform::Both),
            _ => Err(CoreError::InvalidPlatform(s.to_string())),
        }
    }
}

/// Workflow status of an influencer or of one of their videos.
///
/// Variant order is the sort priority: `Script Needed` first, `Paid` last.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Status {
    #[default]
    #[serde(rename = "Script Needed")]
    ScriptNeeded,
    #[serde(rename = "Approve Needed")]
    ApproveNeeded,
    Posted,
    Paid,
}

impl Status {
    pub const ALL: [Status; 4] = [
        Status::ScriptNeeded,
        Status::ApproveNeeded,
        Status::Posted,
        Status::Paid,
    ];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Status::ScriptNeeded => "Script Needed",
            Status::ApproveNeeded => "Approve Needed",
            Status::Posted => "Posted",
            Status::Paid => "Paid",
        }
    }

    /// Sort priority used by the `status` sort field.
    #[must_use]
    pub fn rank(self) -> u8 {
        match self {
            Status::ScriptNeeded => 0,
            Status::ApproveNeeded => 1,
            Status::Posted => 2,
            Status::Paid => 3,
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Status {
    type Err = CoreError;

    /// Accepts the display label or a kebab/snake-case form, ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['-', '_'], " ");
        match normalized.as_str() {
            "script needed" => Ok(Status::ScriptNeeded),
            "approve needed" => Ok(Status::ApproveNeeded),
            "posted" => Ok(Status::Posted),
            "paid" => Ok(Status::Paid),
            _ => Err(CoreError::InvalidStatus(s.to_string())),
        }
    }
}

/// One of the four posting slots of an influencer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VideoSlot {
    /// Video URL, empty until posted.
    pub link: String,
    pub title: String,
    /// ISO date (`"2025-01-04"`) or timestamp; empty when not yet posted.
    pub posted_on: String,
    pub status: Status,
}

impl VideoSlot {
    #[must_use]
    pub fn has_posted_date(&self) -> bool {
        !self.posted_on.is_empty()
    }
}

/// An influencer tracked within a campaign.
///
/// `total_views` is not stored: it is always derived from `views_median`
/// through [`Influencer::total_views`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "StoredInfluencer", into = "StoredInfluencer")]
pub struct Influencer {
    pub id: String,
    pub username: String,
    pub profile_link: String,
    pub platform: Platform,
    /// Typical per-video view count.
    pub views_median: u64,
    /// Latest measured view count.
    pub views_now: u64,
    pub videos: [VideoSlot; VIDEO_SLOTS],
    /// Overall status, set independently of the per-video statuses.
    pub status: Status,
    pub created_at: DateTime<Utc>,
    /// Owning campaign. Empty for legacy records that predate campaigns.
    pub campaign_id: String,
}

impl Influencer {
    /// Build a new influencer from form data.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::EmptyUsername`] if the username is blank.
    pub fn new(
        id: String,
        campaign_id: String,
        created_at: DateTime<Utc>,
        form: NewInfluencer,
    ) -> Result<Self, CoreError> {
        let username = validate_username(&form.username)?;
        Ok(Self {
            id,
            username,
            profile_link: form.profile_link,
            platform: form.platform,
            views_median: form.views_median,
            views_now: form.views_now,
            videos: form.videos,
            status: form.status,
            created_at,
            campaign_id,
        })
    }

    #[must_use]
    pub fn total_views(&self) -> u64 {
        crate::metrics::total_views(self.views_median)
    }

    /// Non-empty posted dates, in slot order.
    pub fn posted_dates(&self) -> impl Iterator<Item = &str> {
        self.videos
            .iter()
            .filter(|v| v.has_posted_date())
            .map(|v| v.posted_on.as_str())
    }

    /// `true` for records not yet assigned to a campaign.
    #[must_use]
    pub fn is_orphaned(&self) -> bool {
        self.campaign_id.is_empty()
    }

    /// Apply a partial update.
    ///
    /// The update is validated in full before any field changes, so a
    /// rejected update leaves the record untouched.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::EmptyUsername`] for a blank username and
    /// [`CoreError::SlotOutOfRange`] for a slot index of 4 or more.
    pub fn apply(&mut self, update: InfluencerUpdate) -> Result<(), CoreError> {
        let username = update
            .username
            .as_deref()
            .map(validate_username)
            .transpose()?;
        if let Some(bad) = update.videos.iter().find(|v| v.slot >= VIDEO_SLOTS) {
            return Err(CoreError::SlotOutOfRange(bad.slot));
        }

        if let Some(username) = username {
            self.username = username;
        }
        if let Some(profile_link) = update.profile_link {
            self.profile_link = profile_link;
        }
        if let Some(platform) = update.platform {
            self.platform = platform;
        }
        if let Some(views_median) = update.views_median {
            self.views_median = views_median;
        }
        if let Some(views_now) = update.views_now {
            self.views_now = views_now;
        }
        if let Some(status) = update.status {
            self.status = status;
        }
        for video in update.videos {
            let slot = video.slot;
            video.apply_to(&mut self.videos[slot]);
        }
        Ok(())
    }
}

fn validate_username(raw: &str) -> Result<String, CoreError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(CoreError::EmptyUsername);
    }
    Ok(trimmed.to_string())
}

/// Form data for a new influencer: everything the system does not assign.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewInfluencer {
    pub username: String,
    #[serde(default)]
    pub profile_link: String,
    pub platform: Platform,
    #[serde(default)]
    pub views_median: u64,
    #[serde(default)]
    pub views_now: u64,
    #[serde(default)]
    pub videos: [VideoSlot; VIDEO_SLOTS],
    #[serde(default)]
    pub status: Status,
}

impl NewInfluencer {
    #[must_use]
    pub fn new(username: impl Into<String>, platform: Platform) -> Self {
        Self {
            username: username.into(),
            profile_link: String::new(),
            platform,
            views_median: 0,
            views_now: 0,
            videos: Default::default(),
            status: Status::default(),
        }
    }
}

/// Partial update of an influencer. `None` fields are left unchanged.
///
/// Identity, creation time and campaign membership cannot be updated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InfluencerUpdate {
    pub username: Option<String>,
    pub profile_link: Option<String>,
    pub platform: Option<Platform>,
    pub views_median: Option<u64>,
    pub views_now: Option<u64>,
    pub status: Option<Status>,
    pub videos: Vec<VideoSlotUpdate>,
}

impl InfluencerUpdate {
    /// True when applying the update would change nothing. Slot updates
    /// that carry no fields count as empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.username.is_none()
            && self.profile_link.is_none()
            && self.platform.is_none()
            && self.views_median.is_none()
            && self.views_now.is_none()
            && self.status.is_none()
            && self.videos.iter().all(VideoSlotUpdate::is_empty)
    }
}

/// Partial update of a single video slot, addressed by index `0..4`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VideoSlotUpdate {
    pub slot: usize,
    pub link: Option<String>,
    pub title: Option<String>,
    pub posted_on: Option<String>,
    pub status: Option<Status>,
}

impl VideoSlotUpdate {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.link.is_none()
            && self.title.is_none()
            && self.posted_on.is_none()
            && self.status.is_none()
    }

    fn apply_to(self, slot: &mut VideoSlot) {
        if let Some(link) = self.link {
            slot.link = link;
        }
        if let Some(title) = self.title {
            slot.title = title;
        }
        if let Some(posted_on) = self.posted_on {
            slot.posted_on = posted_on;
        }
        if let Some(status) = self.status {
            slot.status = status;
        }
    }
}

/// Persisted layout: camelCase keys with four index-aligned arrays, as
/// found in exported tracker data.
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredInfluencer {
    id: String,
    username: String,
    #[serde(default)]
    profile_link: String,
    platform: Platform,
    #[serde(default)]
    views_median: u64,
    // Written for readers of the raw JSON; recomputed on load.
    #[serde(default)]
    total_views: u64,
    #[serde(default)]
    views_now: u64,
    #[serde(default)]
    video_links: [String; VIDEO_SLOTS],
    #[serde(default)]
    video_titles: [String; VIDEO_SLOTS],
    #[serde(default)]
    posted_on: [String; VIDEO_SLOTS],
    #[serde(default)]
    video_statuses: [Status; VIDEO_SLOTS],
    status: Status,
    created_at: DateTime<Utc>,
    #[serde(default)]
    campaign_id: String,
}

impl From<StoredInfluencer> for Influencer {
    fn from(stored: StoredInfluencer) -> Self {
        let StoredInfluencer {
            id,
            username,
            profile_link,
            platform,
            views_median,
            total_views: _,
            views_now,
            video_links,
            video_titles,
            posted_on,
            video_statuses,
            status,
            created_at,
            campaign_id,
        } = stored;

        let mut slots = video_links
            .into_iter()
            .zip(video_titles)
            .zip(posted_on)
            .zip(video_statuses)
            .map(|(((link, title), posted_on), status)| VideoSlot {
                link,
                title,
                posted_on,
                status,
            });
        let videos = std::array::from_fn(|_| slots.next().unwrap_or_default());

        Self {
            id,
            username,
            profile_link,
            platform,
            views_median,
            views_now,
            videos,
            status,
            created_at,
            campaign_id,
        }
    }
}

impl From<Influencer> for StoredInfluencer {
    fn from(influencer: Influencer) -> Self {
        let total_views = influencer.total_views();
        let slots = influencer.videos;
        Self {
            id: influencer.id,
            username: influencer.username,
            profile_link: influencer.profile_link,
            platform: influencer.platform,
            views_median: influencer.views_median,
            total_views,
            views_now: influencer.views_now,
            video_links: slots.clone().map(|s| s.link),
            video_titles: slots.clone().map(|s| s.title),
            posted_on: slots.clone().map(|s| s.posted_on),
            video_statuses: slots.map(|s| s.status),
            status: influencer.status,
            created_at: influencer.created_at,
            campaign_id: influencer.campaign_id,
        }
    }
}

#[cfg(test)]
#[path = "influencers_test.rs"]
mod tests;
