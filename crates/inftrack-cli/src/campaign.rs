//! Campaign command handlers.

use anyhow::{anyhow, bail};
use clap::Subcommand;
use inftrack_core::{Campaign, CampaignUpdate};
use inftrack_store::{KeyValueBackend, Scope, Store};

/// Sub-commands available under `campaign`.
#[derive(Debug, Subcommand)]
pub enum CampaignCommands {
    /// List every campaign; the active one is marked with `*`
    List,
    /// Create a campaign and make it active
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        description: Option<String>,
    },
    /// Rename a campaign or change its description
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        /// Pass an empty string to clear the description
        #[arg(long)]
        description: Option<String>,
    },
    /// Delete a campaign and every influencer in it
    Delete { id: String },
    /// Switch the active campaign
    Activate { id: String },
    /// Show the active campaign
    Current,
}

pub(crate) fn run<B: KeyValueBackend>(
    store: &mut Store<B>,
    command: CampaignCommands,
) -> anyhow::Result<()> {
    match command {
        CampaignCommands::List => run_list(store),
        CampaignCommands::Create { name, description } => {
            run_create(store, &name, description.as_deref())
        }
        CampaignCommands::Update {
            id,
            name,
            description,
        } => run_update(store, &id, name, description),
        CampaignCommands::Delete { id } => run_delete(store, &id),
        CampaignCommands::Activate { id } => run_activate(store, &id),
        CampaignCommands::Current => {
            let campaign = require_active_campaign(store)?;
            println!("{}", describe(&campaign));
            Ok(())
        }
    }
}

/// The active campaign, or an error telling the user how to pick one.
///
/// # Errors
///
/// Returns an error if no campaign is active or the store read fails.
pub(crate) fn require_active_campaign<B: KeyValueBackend>(
    store: &Store<B>,
) -> anyhow::Result<Campaign> {
    store.active_campaign()?.ok_or_else(|| {
        anyhow!("no active campaign; run `inftrack campaign activate <id>` or create one")
    })
}

fn describe(campaign: &Campaign) -> String {
    match &campaign.description {
        Some(description) => format!("{} ({}): {description}", campaign.name, campaign.id),
        None => format!("{} ({})", campaign.name, campaign.id),
    }
}

fn run_list<B: KeyValueBackend>(store: &Store<B>) -> anyhow::Result<()> {
    let campaigns = store.load_campaigns()?;
    if campaigns.is_empty() {
        println!("no campaigns; run `inftrack campaign create --name <name>`");
        return Ok(());
    }

    let active = store.active_campaign_id()?;
    let influencers = store.load_influencers(Scope::All)?;

    println!(
        "  {:<34}{:<28}{:>12}  CREATED",
        "ID", "NAME", "INFLUENCERS"
    );
    for campaign in &campaigns {
        let marker = if active.as_deref() == Some(campaign.id.as_str()) {
            '*'
        } else {
            ' '
        };
        let count = influencers
            .iter()
            .filter(|inf| inf.campaign_id == campaign.id)
            .count();
        println!(
            "{marker} {:<34}{:<28}{:>12}  {}",
            campaign.id,
            campaign.name,
            count,
            campaign.created_at.format("%Y-%m-%d")
        );
    }
    Ok(())
}

fn run_create<B: KeyValueBackend>(
    store: &mut Store<B>,
    name: &str,
    description: Option<&str>,
) -> anyhow::Result<()> {
    let campaign = store.create_campaign(name, description)?;
    store.set_active_campaign(&campaign.id)?;
    println!("created and activated {}", describe(&campaign));
    Ok(())
}

fn run_update<B: KeyValueBackend>(
    store: &mut Store<B>,
    id: &str,
    name: Option<String>,
    description: Option<String>,
) -> anyhow::Result<()> {
    if name.is_none() && description.is_none() {
        bail!("nothing to update; pass --name and/or --description");
    }
    let update = CampaignUpdate {
        name,
        description: description.map(Some),
        ..CampaignUpdate::default()
    };
    let campaign = store
        .update_campaign(id, update)?
        .ok_or_else(|| anyhow!("campaign '{id}' not found"))?;
    println!("updated {}", describe(&campaign));
    Ok(())
}

/// Deleting the last campaign is refused. When the active campaign is
/// deleted, the first remaining campaign becomes active.
fn run_delete<B: KeyValueBackend>(store: &mut Store<B>, id: &str) -> anyhow::Result<()> {
    let campaigns = store.load_campaigns()?;
    if !campaigns.iter().any(|c| c.id == id) {
        bail!("campaign '{id}' not found");
    }
    if campaigns.len() <= 1 {
        bail!("cannot delete the last campaign; create another one first");
    }

    let was_active = store.active_campaign_id()?.as_deref() == Some(id);
    store.delete_campaign(id)?;
    println!("deleted campaign {id}");

    if was_active {
        if let Some(next) = store.load_campaigns()?.into_iter().next() {
            store.set_active_campaign(&next.id)?;
            println!("active campaign is now {}", describe(&next));
        }
    }
    Ok(())
}

fn run_activate<B: KeyValueBackend>(store: &mut Store<B>, id: &str) -> anyhow::Result<()> {
    let campaign = store
        .load_campaigns()?
        .into_iter()
        .find(|c| c.id == id)
        .ok_or_else(|| anyhow!("campaign '{id}' not found"))?;
    store.set_active_campaign(&campaign.id)?;
    println!("active campaign is now {}", describe(&campaign));
    Ok(())
}
