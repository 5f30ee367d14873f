//! Per-record inclusion decisions for the influencer table.
//!
//! A [`FilterSpec`] is the user-facing description of the active filters.
//! [`FilterSpec::compile`] turns it into a [`Predicate`] once per pass so the
//! search needle is lowercased and the date bounds are parsed a single time,
//! not once per record.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::influencers::{Influencer, Platform, Status};

/// Active table filters. Every field left at its default imposes no
/// constraint; set fields are AND-combined.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterSpec {
    /// Case-insensitive substring of the username. Empty matches everything.
    pub search: String,
    /// `None` means all platforms; serialized as `"all"`.
    #[serde(with = "all_or")]
    pub platform: Option<Platform>,
    /// `None` means all statuses; serialized as `"all"`.
    #[serde(with = "all_or")]
    pub status: Option<Status>,
    /// Inclusive lower bound on `views_median`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub views_median_min: Option<u64>,
    /// Inclusive upper bound on `views_median`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub views_median_max: Option<u64>,
    /// Inclusive lower bound on the derived total views.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_views_min: Option<u64>,
    /// Inclusive upper bound on the derived total views.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_views_max: Option<u64>,
    /// Inclusive lower bound on `views_now`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub views_now_min: Option<u64>,
    /// Inclusive upper bound on `views_now`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub views_now_max: Option<u64>,
    /// Inclusive earliest posted date. An empty string counts as unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_from: Option<String>,
    /// Inclusive latest posted date. An empty string counts as unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_to: Option<String>,
}

impl FilterSpec {
    #[must_use]
    pub fn compile(&self) -> Predicate<'_> {
        Predicate {
            spec: self,
            needle: self.search.to_lowercase(),
            dates: DateWindow::from_bounds(self.date_from.as_deref(), self.date_to.as_deref()),
        }
    }

    /// Convenience for a single record. Prefer [`FilterSpec::compile`] when
    /// evaluating many.
    #[must_use]
    pub fn matches(&self, influencer: &Influencer) -> bool {
        self.compile().matches(influencer)
    }
}

/// A compiled [`FilterSpec`], ready to evaluate records.
#[derive(Debug, Clone)]
pub struct Predicate<'a> {
    spec: &'a FilterSpec,
    needle: String,
    dates: DateWindow,
}

impl Predicate<'_> {
    #[must_use]
    pub fn matches(&self, inf: &Influencer) -> bool {
        let spec = self.spec;

        if !self.needle.is_empty() && !inf.username.to_lowercase().contains(&self.needle) {
            return false;
        }
        if spec.platform.is_some_and(|p| p != inf.platform) {
            return false;
        }
        if spec.status.is_some_and(|s| s != inf.status) {
            return false;
        }

        within(inf.views_median, spec.views_median_min, spec.views_median_max)
            && within(inf.total_views(), spec.total_views_min, spec.total_views_max)
            && within(inf.views_now, spec.views_now_min, spec.views_now_max)
            && self.dates.admits(inf)
    }
}

fn within(value: u64, min: Option<u64>, max: Option<u64>) -> bool {
    min.is_none_or(|lo| value >= lo) && max.is_none_or(|hi| value <= hi)
}

/// Date-range constraint over the posted dates of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DateWindow {
    /// Neither bound set.
    Unbounded,
    /// A bound was set but could not be parsed; no date lies inside it.
    Unsatisfiable,
    Range {
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
    },
}

impl DateWindow {
    fn from_bounds(from: Option<&str>, to: Option<&str>) -> Self {
        let from = from.filter(|s| !s.trim().is_empty());
        let to = to.filter(|s| !s.trim().is_empty());
        if from.is_none() && to.is_none() {
            return DateWindow::Unbounded;
        }

        match (from.map(parse_instant), to.map(parse_instant)) {
            (Some(None), _) | (_, Some(None)) => DateWindow::Unsatisfiable,
            (from, to) => DateWindow::Range {
                from: from.flatten(),
                to: to.flatten(),
            },
        }
    }

    /// A record passes when at least one of its posted dates lies in range.
    /// Records with no posted dates, or only unparseable ones, never pass a
    /// bounded window.
    fn admits(self, inf: &Influencer) -> bool {
        match self {
            DateWindow::Unbounded => true,
            DateWindow::Unsatisfiable => false,
            DateWindow::Range { from, to } => inf
                .posted_dates()
                .filter_map(parse_instant)
                .any(|at| from.is_none_or(|f| at >= f) && to.is_none_or(|t| at <= t)),
        }
    }
}

/// Parse a posted date or bound. Accepts RFC 3339 timestamps, bare
/// `YYYY-MM-DD` dates (midnight UTC), and zone-less `YYYY-MM-DDTHH:MM:SS`
/// (read as UTC).
fn parse_instant(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(at) = DateTime::parse_from_rfc3339(raw) {
        return Some(at.with_timezone(&Utc));
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|dt| dt.and_utc())
}

/// Filter a record sequence, preserving relative order.
pub fn filter_influencers<'a, I>(records: I, spec: &FilterSpec) -> Vec<&'a Influencer>
where
    I: IntoIterator<Item = &'a Influencer>,
{
    let predicate = spec.compile();
    records
        .into_iter()
        .filter(|inf| predicate.matches(inf))
        .collect()
}

/// Serde adapter mapping `None` to the literal `"all"`.
mod all_or {
    use std::fmt::Display;
    use std::str::FromStr;

    use serde::{de, Deserialize, Deserializer, Serializer};

    const ALL: &str = "all";

    #[allow(clippy::ref_option)]
    pub fn serialize<T, S>(value: &Option<T>, serializer: S) -> Result<S::Ok, S::Error>
    where
        T: Display,
        S: Serializer,
    {
        match value {
            Some(v) => serializer.collect_str(v),
            None => serializer.serialize_str(ALL),
        }
    }

    pub fn deserialize<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
    where
        T: FromStr,
        T::Err: Display,
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        match raw.as_deref() {
            None | Some(ALL) => Ok(None),
            Some(s) => s.parse().map(Some).map_err(de::Error::custom),
        }
    }
}

#[cfg(test)]
#[path = "filter_test.rs"]
mod tests;
