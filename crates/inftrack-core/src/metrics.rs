//! Derived view-count metrics for a campaign dashboard.
//!
//! All calculators accept any iterator of borrowed influencers, so they run
//! equally over a full campaign or over a filtered view.

use std::collections::BTreeMap;

use crate::influencers::{Influencer, Status, TOTAL_VIEWS_MULTIPLIER};

/// Projected total views for a given median.
#[must_use]
pub fn total_views(views_median: u64) -> u64 {
    views_median.saturating_mul(TOTAL_VIEWS_MULTIPLIER)
}

/// Sum of projected total views. Empty input yields 0.
pub fn campaign_total_views<'a, I>(records: I) -> u64
where
    I: IntoIterator<Item = &'a Influencer>,
{
    records
        .into_iter()
        .fold(0, |acc, inf| acc.saturating_add(inf.total_views()))
}

/// Sum of current views. Empty input yields 0.
pub fn campaign_current_views<'a, I>(records: I) -> u64
where
    I: IntoIterator<Item = &'a Influencer>,
{
    records
        .into_iter()
        .fold(0, |acc, inf| acc.saturating_add(inf.views_now))
}

/// Current views as a whole percentage of the projection, rounded half up.
///
/// Returns 0 when the projection is 0. Not capped at 100.
#[must_use]
pub fn completion_rate(total_views: u64, current_views: u64) -> u64 {
    if total_views == 0 {
        return 0;
    }
    let total = u128::from(total_views);
    let scaled = u128::from(current_views) * 200 + total;
    u64::try_from(scaled / (total * 2)).unwrap_or(u64::MAX)
}

/// Compact human-readable rendering: `1.5K`, `2.5M`, or `999`.
///
/// One decimal place with ties rounded up, so `999_950` renders as
/// `1000.0K` rather than switching to millions.
#[must_use]
pub fn format_number(n: u64) -> String {
    const THOUSAND: u64 = 1_000;
    const MILLION: u64 = 1_000_000;

    if n >= MILLION {
        return format_tenths(n, MILLION, 'M');
    }
    if n >= THOUSAND {
        return format_tenths(n, THOUSAND, 'K');
    }
    n.to_string()
}

fn format_tenths(n: u64, unit: u64, suffix: char) -> String {
    let tenth = unit / 10;
    let tenths = (u128::from(n) + u128::from(tenth / 2)) / u128::from(tenth);
    format!("{}.{}{suffix}", tenths / 10, tenths % 10)
}

/// Tally of overall statuses. Statuses with no records are absent from the
/// map; use [`StatusBreakdown::count`] for a zero-filled lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusBreakdown(BTreeMap<Status, usize>);

impl StatusBreakdown {
    #[must_use]
    pub fn count(&self, status: Status) -> usize {
        self.0.get(&status).copied().unwrap_or(0)
    }

    /// Present statuses in priority order.
    pub fn iter(&self) -> impl Iterator<Item = (Status, usize)> + '_ {
        self.0.iter().map(|(s, n)| (*s, *n))
    }

    #[must_use]
    pub fn as_map(&self) -> &BTreeMap<Status, usize> {
        &self.0
    }
}

pub fn status_breakdown<'a, I>(records: I) -> StatusBreakdown
where
    I: IntoIterator<Item = &'a Influencer>,
{
    let mut map = BTreeMap::new();
    for inf in records {
        *map.entry(inf.status).or_insert(0) += 1;
    }
    StatusBreakdown(map)
}

/// Dashboard summary of one record set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CampaignTotals {
    pub influencer_count: usize,
    /// Sum of projected total views.
    pub expected_views: u64,
    pub current_views: u64,
    /// Percentage of expected views reached so far.
    pub completion_rate: u64,
    pub status_breakdown: StatusBreakdown,
}

impl CampaignTotals {
    pub fn from_records<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a Influencer>,
    {
        let records: Vec<&Influencer> = records.into_iter().collect();
        let expected_views = campaign_total_views(records.iter().copied());
        let current_views = campaign_current_views(records.iter().copied());
        Self {
            influencer_count: records.len(),
            expected_views,
            current_views,
            completion_rate: completion_rate(expected_views, current_views),
            status_breakdown: status_breakdown(records.iter().copied()),
        }
    }
}
