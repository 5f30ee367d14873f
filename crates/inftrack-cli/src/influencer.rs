//! Influencer command handlers.
//!
//! New influencers always land in the active campaign. Updates and deletes
//! address records by id regardless of campaign.

use anyhow::{anyhow, bail};
use clap::{Args, Subcommand};
use inftrack_core::{InfluencerUpdate, NewInfluencer, Platform, Status, VideoSlotUpdate};
use inftrack_store::{KeyValueBackend, Store};

use crate::campaign::require_active_campaign;

/// Sub-commands available under `influencer`.
#[derive(Debug, Subcommand)]
pub enum InfluencerCommands {
    /// Add an influencer to the active campaign
    Add(AddArgs),
    /// Change an influencer's profile, view counts, or status
    Update {
        id: String,
        #[command(flatten)]
        fields: UpdateArgs,
    },
    /// Record details of one of the four videos
    Video {
        id: String,
        /// Video slot, 1 to 4
        #[arg(long, value_parser = clap::value_parser!(u8).range(1..=4))]
        slot: u8,
        #[arg(long)]
        link: Option<String>,
        #[arg(long)]
        title: Option<String>,
        /// Posting date, e.g. 2025-01-14
        #[arg(long)]
        posted_on: Option<String>,
        #[arg(long)]
        status: Option<Status>,
    },
    /// Remove an influencer
    Delete { id: String },
}

#[derive(Debug, Args)]
pub struct AddArgs {
    #[arg(long)]
    pub username: String,
    /// instagram, tiktok, or both
    #[arg(long)]
    pub platform: Platform,
    #[arg(long)]
    pub profile_link: Option<String>,
    #[arg(long, default_value_t = 0)]
    pub views_median: u64,
    #[arg(long, default_value_t = 0)]
    pub views_now: u64,
    /// Defaults to script-needed
    #[arg(long)]
    pub status: Option<Status>,
}

impl AddArgs {
    fn into_form(self) -> NewInfluencer {
        let mut form = NewInfluencer::new(self.username, self.platform);
        form.profile_link = self.profile_link.unwrap_or_default();
        form.views_median = self.views_median;
        form.views_now = self.views_now;
        form.status = self.status.unwrap_or_default();
        form
    }
}

#[derive(Debug, Args)]
pub struct UpdateArgs {
    #[arg(long)]
    pub username: Option<String>,
    #[arg(long)]
    pub platform: Option<Platform>,
    #[arg(long)]
    pub profile_link: Option<String>,
    #[arg(long)]
    pub views_median: Option<u64>,
    #[arg(long)]
    pub views_now: Option<u64>,
    #[arg(long)]
    pub status: Option<Status>,
}

impl From<UpdateArgs> for InfluencerUpdate {
    fn from(args: UpdateArgs) -> Self {
        InfluencerUpdate {
            username: args.username,
            profile_link: args.profile_link,
            platform: args.platform,
            views_median: args.views_median,
            views_now: args.views_now,
            status: args.status,
            videos: Vec::new(),
        }
    }
}

pub(crate) fn run<B: KeyValueBackend>(
    store: &mut Store<B>,
    command: InfluencerCommands,
) -> anyhow::Result<()> {
    match command {
        InfluencerCommands::Add(args) => run_add(store, args),
        InfluencerCommands::Update { id, fields } => run_update(store, &id, fields.into()),
        InfluencerCommands::Video {
            id,
            slot,
            link,
            title,
            posted_on,
            status,
        } => {
            let update = InfluencerUpdate {
                videos: vec![VideoSlotUpdate {
                    slot: usize::from(slot - 1),
                    link,
                    title,
                    posted_on,
                    status,
                }],
                ..InfluencerUpdate::default()
            };
            run_update(store, &id, update)
        }
        InfluencerCommands::Delete { id } => {
            if !store.delete_influencer(&id)? {
                bail!("influencer '{id}' not found");
            }
            println!("deleted influencer {id}");
            Ok(())
        }
    }
}

fn run_add<B: KeyValueBackend>(store: &mut Store<B>, args: AddArgs) -> anyhow::Result<()> {
    let campaign = require_active_campaign(store)?;
    let influencer = store.add_influencer(args.into_form(), &campaign.id)?;
    println!(
        "added {} ({}) to '{}'",
        influencer.username, influencer.id, campaign.name
    );
    Ok(())
}

fn run_update<B: KeyValueBackend>(
    store: &mut Store<B>,
    id: &str,
    update: InfluencerUpdate,
) -> anyhow::Result<()> {
    if update.is_empty() {
        bail!("nothing to update; pass at least one field");
    }
    let influencer = store
        .update_influencer(id, update)?
        .ok_or_else(|| anyhow!("influencer '{id}' not found"))?;
    println!("updated {} ({})", influencer.username, influencer.id);
    Ok(())
}
