use chrono::Utc;
use inftrack_core::{Campaign, CampaignUpdate, Influencer, InfluencerUpdate, NewInfluencer};
use serde::de::DeserializeOwned;
use serde::Serialize;
use uuid::Uuid;

use crate::backend::KeyValueBackend;
use crate::StoreError;

pub const CAMPAIGNS_KEY: &str = "influencer-tracker-campaigns";
pub const ACTIVE_CAMPAIGN_KEY: &str = "influencer-tracker-active-campaign";
pub const INFLUENCERS_KEY: &str = "influencer-tracker-data";

pub const DEFAULT_CAMPAIGN_NAME: &str = "My First Campaign";
pub const DEFAULT_CAMPAIGN_DESCRIPTION: &str = "Welcome to your influencer tracker!";

/// Fresh random identifier: a UUID v4 without hyphens.
#[must_use]
pub fn generate_id() -> String {
    Uuid::new_v4().simple().to_string()
}

/// Which influencers an operation covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope<'a> {
    All,
    Campaign(&'a str),
}

impl Scope<'_> {
    fn includes(self, influencer: &Influencer) -> bool {
        match self {
            Scope::All => true,
            Scope::Campaign(id) => influencer.campaign_id == id,
        }
    }
}

/// Campaign and influencer persistence over a [`KeyValueBackend`].
///
/// Every operation reads the current document, changes it, and writes it
/// back, so a `Store` holds no cached state of its own.
#[derive(Debug)]
pub struct Store<B> {
    backend: B,
}

impl<B: KeyValueBackend> Store<B> {
    #[must_use]
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    #[must_use]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    fn read<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StoreError> {
        let Some(raw) = self.backend.get(key)? else {
            return Ok(None);
        };
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|source| StoreError::Decode {
                key: key.to_string(),
                source,
            })
    }

    fn write<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) -> Result<(), StoreError> {
        let raw = serde_json::to_string(value).map_err(|source| StoreError::Encode {
            key: key.to_string(),
            source,
        })?;
        self.backend.set(key, &raw)
    }

    // ---------------------------------------------------------------------
    // Campaigns
    // ---------------------------------------------------------------------

    /// All campaigns in creation order. An empty store yields an empty list.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Decode`] if the stored list is corrupt, or a
    /// backend error.
    pub fn load_campaigns(&self) -> Result<Vec<Campaign>, StoreError> {
        let campaigns: Vec<Campaign> = self.read(CAMPAIGNS_KEY)?.unwrap_or_default();
        tracing::debug!(count = campaigns.len(), "loaded campaigns");
        Ok(campaigns)
    }

    /// # Errors
    ///
    /// Returns a backend or encode error.
    pub fn save_campaigns(&mut self, campaigns: &[Campaign]) -> Result<(), StoreError> {
        self.write(CAMPAIGNS_KEY, campaigns)?;
        tracing::debug!(count = campaigns.len(), "saved campaigns");
        Ok(())
    }

    /// Create and persist a new active campaign. The active-campaign pointer
    /// is not changed.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Validation`] for a blank name, or a storage
    /// error.
    pub fn create_campaign(
        &mut self,
        name: &str,
        description: Option<&str>,
    ) -> Result<Campaign, StoreError> {
        let campaign = Campaign::new(generate_id(), name, description, Utc::now())?;

        let mut campaigns = self.load_campaigns()?;
        campaigns.push(campaign.clone());
        self.save_campaigns(&campaigns)?;

        tracing::info!(campaign_id = %campaign.id, name = %campaign.name, "created campaign");
        Ok(campaign)
    }

    /// Apply `update` to the campaign with `id`. Returns `None` when no such
    /// campaign exists.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Validation`] for a blank new name, or a storage
    /// error.
    pub fn update_campaign(
        &mut self,
        id: &str,
        update: CampaignUpdate,
    ) -> Result<Option<Campaign>, StoreError> {
        let mut campaigns = self.load_campaigns()?;
        let Some(campaign) = campaigns.iter_mut().find(|c| c.id == id) else {
            tracing::warn!(campaign_id = id, "campaign not found; update skipped");
            return Ok(None);
        };

        campaign.apply(update, Utc::now())?;
        let updated = campaign.clone();
        self.save_campaigns(&campaigns)?;

        tracing::info!(campaign_id = id, "updated campaign");
        Ok(Some(updated))
    }

    /// Delete a campaign together with all of its influencers. Clears the
    /// active pointer if it referenced the campaign.
    ///
    /// Returns `false` without touching anything when `id` is unknown.
    ///
    /// # Errors
    ///
    /// Returns a storage error.
    pub fn delete_campaign(&mut self, id: &str) -> Result<bool, StoreError> {
        let mut campaigns = self.load_campaigns()?;
        let before = campaigns.len();
        campaigns.retain(|c| c.id != id);
        if campaigns.len() == before {
            tracing::warn!(campaign_id = id, "campaign not found; delete skipped");
            return Ok(false);
        }
        self.save_campaigns(&campaigns)?;

        let mut influencers = self.load_influencers(Scope::All)?;
        let total = influencers.len();
        influencers.retain(|inf| inf.campaign_id != id);
        let removed = total - influencers.len();
        self.save_influencers(&influencers)?;

        if self.active_campaign_id()?.as_deref() == Some(id) {
            self.clear_active_campaign()?;
        }

        tracing::info!(
            campaign_id = id,
            removed_influencers = removed,
            "deleted campaign"
        );
        Ok(true)
    }

    // ---------------------------------------------------------------------
    // Active campaign pointer
    // ---------------------------------------------------------------------

    /// # Errors
    ///
    /// Returns [`StoreError::Decode`] if the stored pointer is corrupt, or a
    /// backend error.
    pub fn active_campaign_id(&self) -> Result<Option<String>, StoreError> {
        self.read(ACTIVE_CAMPAIGN_KEY)
    }

    /// Point at `id`. Existence is not checked; a dangling pointer makes
    /// [`Store::active_campaign`] return `None`.
    ///
    /// # Errors
    ///
    /// Returns a backend or encode error.
    pub fn set_active_campaign(&mut self, id: &str) -> Result<(), StoreError> {
        self.write(ACTIVE_CAMPAIGN_KEY, id)?;
        tracing::info!(campaign_id = id, "set active campaign");
        Ok(())
    }

    /// # Errors
    ///
    /// Returns a backend error.
    pub fn clear_active_campaign(&mut self) -> Result<(), StoreError> {
        self.backend.remove(ACTIVE_CAMPAIGN_KEY)?;
        tracing::debug!("cleared active campaign");
        Ok(())
    }

    /// The campaign the active pointer references, if both exist.
    ///
    /// # Errors
    ///
    /// Returns a storage error.
    pub fn active_campaign(&self) -> Result<Option<Campaign>, StoreError> {
        let Some(id) = self.active_campaign_id()? else {
            return Ok(None);
        };
        Ok(self.load_campaigns()?.into_iter().find(|c| c.id == id))
    }

    // ---------------------------------------------------------------------
    // Influencers
    // ---------------------------------------------------------------------

    /// Influencers in `scope`, in stored order.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Decode`] if the stored list is corrupt, or a
    /// backend error.
    pub fn load_influencers(&self, scope: Scope<'_>) -> Result<Vec<Influencer>, StoreError> {
        let mut influencers: Vec<Influencer> = self.read(INFLUENCERS_KEY)?.unwrap_or_default();
        influencers.retain(|inf| scope.includes(inf));
        tracing::debug!(count = influencers.len(), ?scope, "loaded influencers");
        Ok(influencers)
    }

    /// Replace the full influencer list across all campaigns.
    ///
    /// # Errors
    ///
    /// Returns a backend or encode error.
    pub fn save_influencers(&mut self, influencers: &[Influencer]) -> Result<(), StoreError> {
        self.write(INFLUENCERS_KEY, influencers)?;
        tracing::debug!(count = influencers.len(), "saved influencers");
        Ok(())
    }

    /// Create an influencer in `campaign_id` with a fresh id and the current
    /// time as `created_at`, and append it to the stored list.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Validation`] for a blank username, or a storage
    /// error.
    pub fn add_influencer(
        &mut self,
        form: NewInfluencer,
        campaign_id: &str,
    ) -> Result<Influencer, StoreError> {
        let influencer = Influencer::new(generate_id(), campaign_id.to_string(), Utc::now(), form)?;

        let mut influencers = self.load_influencers(Scope::All)?;
        influencers.push(influencer.clone());
        self.save_influencers(&influencers)?;

        tracing::info!(
            influencer_id = %influencer.id,
            username = %influencer.username,
            campaign_id,
            "added influencer"
        );
        Ok(influencer)
    }

    /// Add several influencers to `campaign_id` in one write. Nothing is
    /// stored if any entry is invalid.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Validation`] for the first blank username, or a
    /// storage error.
    pub fn add_influencers(
        &mut self,
        forms: Vec<NewInfluencer>,
        campaign_id: &str,
    ) -> Result<Vec<Influencer>, StoreError> {
        let now = Utc::now();
        let added = forms
            .into_iter()
            .map(|form| Influencer::new(generate_id(), campaign_id.to_string(), now, form))
            .collect::<Result<Vec<_>, _>>()?;

        let mut influencers = self.load_influencers(Scope::All)?;
        influencers.extend(added.iter().cloned());
        self.save_influencers(&influencers)?;

        tracing::info!(count = added.len(), campaign_id, "added influencers");
        Ok(added)
    }

    /// Apply a partial update to the influencer with `id`. Returns `None`
    /// when no such influencer exists.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Validation`] if the update is invalid (the
    /// stored record is left unchanged), or a storage error.
    pub fn update_influencer(
        &mut self,
        id: &str,
        update: InfluencerUpdate,
    ) -> Result<Option<Influencer>, StoreError> {
        let mut influencers = self.load_influencers(Scope::All)?;
        let Some(influencer) = influencers.iter_mut().find(|inf| inf.id == id) else {
            tracing::warn!(influencer_id = id, "influencer not found; update skipped");
            return Ok(None);
        };

        influencer.apply(update)?;
        let updated = influencer.clone();
        self.save_influencers(&influencers)?;

        tracing::info!(influencer_id = id, "updated influencer");
        Ok(Some(updated))
    }

    /// Returns `false` when no influencer has `id`.
    ///
    /// # Errors
    ///
    /// Returns a storage error.
    pub fn delete_influencer(&mut self, id: &str) -> Result<bool, StoreError> {
        let mut influencers = self.load_influencers(Scope::All)?;
        let before = influencers.len();
        influencers.retain(|inf| inf.id != id);
        if influencers.len() == before {
            tracing::warn!(influencer_id = id, "influencer not found; delete skipped");
            return Ok(false);
        }
        self.save_influencers(&influencers)?;

        tracing::info!(influencer_id = id, "deleted influencer");
        Ok(true)
    }

    /// Remove every influencer in `scope` and return how many were removed.
    ///
    /// # Errors
    ///
    /// Returns a storage error.
    pub fn clear_influencers(&mut self, scope: Scope<'_>) -> Result<usize, StoreError> {
        let mut influencers = self.load_influencers(Scope::All)?;
        let before = influencers.len();
        influencers.retain(|inf| !scope.includes(inf));
        let removed = before - influencers.len();

        if influencers.is_empty() {
            self.backend.remove(INFLUENCERS_KEY)?;
        } else {
            self.save_influencers(&influencers)?;
        }

        tracing::info!(removed, ?scope, "cleared influencers");
        Ok(removed)
    }

    // ---------------------------------------------------------------------
    // Migration
    // ---------------------------------------------------------------------

    /// One-time migration for data written before campaigns existed.
    ///
    /// When no campaigns are stored, creates the default campaign, makes it
    /// active, and moves every orphaned influencer into it. Returns the
    /// created campaign, or `None` if campaigns were already present.
    ///
    /// # Errors
    ///
    /// Returns a storage error.
    pub fn ensure_default_campaign(&mut self) -> Result<Option<Campaign>, StoreError> {
        if !self.load_campaigns()?.is_empty() {
            return Ok(None);
        }

        let campaign =
            self.create_campaign(DEFAULT_CAMPAIGN_NAME, Some(DEFAULT_CAMPAIGN_DESCRIPTION))?;
        self.set_active_campaign(&campaign.id)?;

        let mut influencers = self.load_influencers(Scope::All)?;
        let mut adopted = 0usize;
        for influencer in influencers.iter_mut().filter(|inf| inf.is_orphaned()) {
            influencer.campaign_id.clone_from(&campaign.id);
            adopted += 1;
        }
        if adopted > 0 {
            self.save_influencers(&influencers)?;
        }

        tracing::info!(
            campaign_id = %campaign.id,
            adopted,
            "created default campaign"
        );
        Ok(Some(campaign))
    }
}
