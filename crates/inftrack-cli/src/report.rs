//! Read-only views: the influencer table and the campaign totals.

use clap::Args;
use inftrack_core::{
    format_number, CampaignTotals, FilterSpec, Influencer, Platform, SortDirection, SortField,
    SortSpec, Status, VIDEO_SLOTS,
};
use inftrack_store::{KeyValueBackend, Scope, Store};

use crate::campaign::require_active_campaign;

/// Filters and ordering for `inftrack list`. Omitted flags impose no
/// constraint.
#[derive(Debug, Args)]
pub struct ListArgs {
    /// Case-insensitive username substring
    #[arg(long, default_value = "")]
    pub search: String,
    #[arg(long)]
    pub platform: Option<Platform>,
    #[arg(long)]
    pub status: Option<Status>,
    #[arg(long)]
    pub views_median_min: Option<u64>,
    #[arg(long)]
    pub views_median_max: Option<u64>,
    #[arg(long)]
    pub total_views_min: Option<u64>,
    #[arg(long)]
    pub total_views_max: Option<u64>,
    #[arg(long)]
    pub views_now_min: Option<u64>,
    #[arg(long)]
    pub views_now_max: Option<u64>,
    /// Earliest posting date, e.g. 2025-01-10
    #[arg(long)]
    pub date_from: Option<String>,
    /// Latest posting date, e.g. 2025-01-20
    #[arg(long)]
    pub date_to: Option<String>,
    /// username, platform, views-median, total-views, views-now, status, or created-at
    #[arg(long, default_value = "username")]
    pub sort_by: SortField,
    /// Sort descending
    #[arg(long)]
    pub desc: bool,
    /// Show influencers from every campaign
    #[arg(long)]
    pub all_campaigns: bool,
}

impl ListArgs {
    fn filter_spec(&self) -> FilterSpec {
        FilterSpec {
            search: self.search.clone(),
            platform: self.platform,
            status: self.status,
            views_median_min: self.views_median_min,
            views_median_max: self.views_median_max,
            total_views_min: self.total_views_min,
            total_views_max: self.total_views_max,
            views_now_min: self.views_now_min,
            views_now_max: self.views_now_max,
            date_from: self.date_from.clone(),
            date_to: self.date_to.clone(),
        }
    }

    fn sort_spec(&self) -> SortSpec {
        let direction = if self.desc {
            SortDirection::Desc
        } else {
            SortDirection::Asc
        };
        SortSpec::new(self.sort_by, direction)
    }
}

/// Load the records a report covers, with a heading naming their scope.
fn load_scope<B: KeyValueBackend>(
    store: &Store<B>,
    all_campaigns: bool,
) -> anyhow::Result<(String, Vec<Influencer>)> {
    if all_campaigns {
        return Ok((
            "All campaigns".to_string(),
            store.load_influencers(Scope::All)?,
        ));
    }
    let campaign = require_active_campaign(store)?;
    let records = store.load_influencers(Scope::Campaign(&campaign.id))?;
    Ok((campaign.name, records))
}

pub(crate) fn run_list<B: KeyValueBackend>(
    store: &Store<B>,
    args: &ListArgs,
) -> anyhow::Result<()> {
    let (heading, records) = load_scope(store, args.all_campaigns)?;
    let rows = inftrack_core::apply(&records, &args.filter_spec(), &args.sort_spec());

    tracing::debug!(shown = rows.len(), total = records.len(), "rendered table");
    println!("{heading}: {} of {} influencers", rows.len(), records.len());
    if !rows.is_empty() {
        print!("{}", render_table(&rows));
    }
    Ok(())
}

pub(crate) fn run_totals<B: KeyValueBackend>(
    store: &Store<B>,
    all_campaigns: bool,
) -> anyhow::Result<()> {
    let (heading, records) = load_scope(store, all_campaigns)?;
    let totals = CampaignTotals::from_records(&records);
    print!("{}", render_totals(&heading, &totals));
    Ok(())
}

fn render_table(rows: &[&Influencer]) -> String {
    let mut out = format!(
        "{:<28}{:<11}{:>9}{:>9}{:>9}  {:<16}{:<8}ID\n",
        "USERNAME", "PLATFORM", "MEDIAN", "TOTAL", "NOW", "STATUS", "POSTED"
    );
    for inf in rows {
        let posted = format!("{}/{VIDEO_SLOTS}", inf.posted_dates().count());
        out.push_str(&format!(
            "{:<28}{:<11}{:>9}{:>9}{:>9}  {:<16}{:<8}{}\n",
            inf.username,
            inf.platform.label(),
            format_number(inf.views_median),
            format_number(inf.total_views()),
            format_number(inf.views_now),
            inf.status.label(),
            posted,
            inf.id
        ));
    }
    out
}

fn render_totals(heading: &str, totals: &CampaignTotals) -> String {
    let mut lines = vec![
        heading.to_string(),
        totals_line("Influencers", &totals.influencer_count.to_string()),
        totals_line("Expected views", &format_number(totals.expected_views)),
        totals_line("Current views", &format_number(totals.current_views)),
        totals_line("Completion", &format!("{}%", totals.completion_rate)),
    ];
    lines.extend(Status::ALL.into_iter().map(|status| {
        totals_line(
            status.label(),
            &totals.status_breakdown.count(status).to_string(),
        )
    }));

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

fn totals_line(label: &str, value: &str) -> String {
    format!("  {label:<16}{value}")
}
