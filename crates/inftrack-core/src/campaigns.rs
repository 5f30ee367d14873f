use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::CoreError;

/// A marketing campaign. Influencers belong to exactly one campaign.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Campaign {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub is_active: bool,
}

impl Campaign {
    /// Create an active campaign. Name and description are trimmed; a blank
    /// description is dropped.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::EmptyCampaignName`] if the name is blank.
    pub fn new(
        id: String,
        name: &str,
        description: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<Self, CoreError> {
        Ok(Self {
            id,
            name: validate_name(name)?,
            description: normalize_description(description),
            created_at: now,
            updated_at: now,
            is_active: true,
        })
    }

    /// Apply a partial update and bump `updated_at`.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::EmptyCampaignName`] if the new name is blank; the
    /// campaign is left unchanged in that case.
    pub fn apply(&mut self, update: CampaignUpdate, now: DateTime<Utc>) -> Result<(), CoreError> {
        let name = update.name.as_deref().map(validate_name).transpose()?;

        if let Some(name) = name {
            self.name = name;
        }
        if let Some(description) = update.description {
            self.description = normalize_description(description.as_deref());
        }
        if let Some(is_active) = update.is_active {
            self.is_active = is_active;
        }
        self.updated_at = now;
        Ok(())
    }
}

/// Partial update of a campaign. `description: Some(None)` clears it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CampaignUpdate {
    pub name: Option<String>,
    pub description: Option<Option<String>>,
    pub is_active: Option<bool>,
}

fn validate_name(raw: &str) -> Result<String, CoreError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(CoreError::EmptyCampaignName);
    }
    Ok(trimmed.to_string())
}

fn normalize_description(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
}
