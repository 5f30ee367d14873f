mod campaign;
mod influencer;
mod report;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use inftrack_store::{FileBackend, KeyValueBackend, Scope, Store};
use tracing_subscriber::EnvFilter;

use crate::campaign::{require_active_campaign, CampaignCommands};
use crate::influencer::InfluencerCommands;
use crate::report::ListArgs;

#[derive(Debug, Parser)]
#[command(name = "inftrack")]
#[command(about = "Influencer campaign tracker")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Create, switch between, and remove campaigns
    Campaign {
        #[command(subcommand)]
        command: CampaignCommands,
    },
    /// Add, edit, and remove influencers in the active campaign
    Influencer {
        #[command(subcommand)]
        command: InfluencerCommands,
    },
    /// Print the filtered, sorted influencer table
    List(ListArgs),
    /// Print the campaign dashboard totals
    Totals {
        /// Aggregate over every campaign instead of the active one
        #[arg(long)]
        all_campaigns: bool,
    },
    /// Add the sample influencers to the active campaign
    Seed {
        /// Sample YAML file (defaults to `INFTRACK_SAMPLE_PATH`)
        #[arg(long)]
        path: Option<PathBuf>,
    },
    /// Remove all influencers from the active campaign
    Clear {
        /// Remove influencers from every campaign
        #[arg(long)]
        all_campaigns: bool,
    },
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = inftrack_core::load_app_config_from_env()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let Some(command) = cli.command else {
        println!("inftrack: no command given; run `inftrack --help` for usage");
        return Ok(());
    };

    tracing::debug!(
        env = %config.env,
        data_dir = %config.data_dir.display(),
        "opening store"
    );
    let mut store = Store::new(FileBackend::new(&config.data_dir));
    store.ensure_default_campaign()?;

    match command {
        Commands::Campaign { command } => campaign::run(&mut store, command),
        Commands::Influencer { command } => influencer::run(&mut store, command),
        Commands::List(args) => report::run_list(&store, &args),
        Commands::Totals { all_campaigns } => report::run_totals(&store, all_campaigns),
        Commands::Seed { path } => {
            run_seed(&mut store, path.as_deref().unwrap_or(&config.sample_path))
        }
        Commands::Clear { all_campaigns } => run_clear(&mut store, all_campaigns),
    }
}

/// Load the sample roster and add every entry to the active campaign.
///
/// # Errors
///
/// Returns an error if there is no active campaign, the sample file cannot be
/// loaded, or the store write fails.
fn run_seed<B: KeyValueBackend>(store: &mut Store<B>, path: &Path) -> anyhow::Result<()> {
    let campaign = require_active_campaign(store)?;
    let roster = inftrack_core::load_sample_influencers(path)?;
    let added = store.add_influencers(roster, &campaign.id)?;
    println!(
        "seeded {} influencers into '{}' from {}",
        added.len(),
        campaign.name,
        path.display()
    );
    Ok(())
}

fn run_clear<B: KeyValueBackend>(store: &mut Store<B>, all_campaigns: bool) -> anyhow::Result<()> {
    let removed = if all_campaigns {
        store.clear_influencers(Scope::All)?
    } else {
        let campaign = require_active_campaign(store)?;
        store.clear_influencers(Scope::Campaign(&campaign.id))?
    };
    println!("removed {removed} influencers");
    Ok(())
}
