use crate::filter::{filter_influencers, FilterSpec};
use crate::influencers::Influencer;
use crate::sort::{sort_influencers, SortSpec};

/// The rows a table renders: `records` filtered by `filter`, then sorted by
/// `sort`.
///
/// Recomputed from scratch on every call. Callers pass the authoritative
/// record set, typically one campaign's influencers.
pub fn apply<'a, I>(records: I, filter: &FilterSpec, sort: &SortSpec) -> Vec<&'a Influencer>
where
    I: IntoIterator<Item = &'a Influencer>,
{
    let filtered = filter_influencers(records, filter);
    sort_influencers(filtered, sort)
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::influencers::{NewInfluencer, Platform, Status};
    use crate::sort::{SortDirection, SortField};

    fn make(username: &str, platform: Platform, views_median: u64, status: Status) -> Influencer {
        let mut form = NewInfluencer::new(username, platform);
        form.views_median = views_median;
        form.status = status;
        Influencer::new(username.to_string(), "camp".into(), Utc::now(), form).unwrap()
    }

    fn sample() -> Vec<Influencer> {
        vec![
            make("@melheavenwalking", Platform::Instagram, 17_500, Status::Posted),
            make("@imbigz", Platform::TikTok, 16_400, Status::Posted),
            make("@multi_platform_star", Platform::Both, 28_000, Status::ApproveNeeded),
            make("@dafnefox_halfmoon", Platform::TikTok, 42_600, Status::Posted),
            make("@thehappycanuck", Platform::Instagram, 7_200, Status::ScriptNeeded),
        ]
    }

    #[test]
    fn filters_before_sorting() {
        let records = sample();
        let filter = FilterSpec {
            platform: Some(Platform::TikTok),
            ..FilterSpec::default()
        };
        let sort = SortSpec::new(SortField::ViewsMedian, SortDirection::Desc);
        let rows = apply(&records, &filter, &sort);
        let names: Vec<&str> = rows.iter().map(|i| i.username.as_str()).collect();
        assert_eq!(names, vec!["@dafnefox_halfmoon", "@imbigz"]);
    }

    #[test]
    fn default_specs_sort_everything_by_username() {
        let records = sample();
        let rows = apply(&records, &FilterSpec::default(), &SortSpec::default());
        let names: Vec<&str> = rows.iter().map(|i| i.username.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "@dafnefox_halfmoon",
                "@imbigz",
                "@melheavenwalking",
                "@multi_platform_star",
                "@thehappycanuck"
            ]
        );
    }

    #[test]
    fn band_filter_then_status_sort() {
        let records = sample();
        let filter = FilterSpec {
            views_median_min: Some(15_000),
            views_median_max: Some(50_000),
            ..FilterSpec::default()
        };
        let sort = SortSpec::new(SortField::Status, SortDirection::Asc);
        let rows = apply(&records, &filter, &sort);
        let names: Vec<&str> = rows.iter().map(|i| i.username.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "@multi_platform_star",
                "@melheavenwalking",
                "@imbigz",
                "@dafnefox_halfmoon"
            ]
        );
    }

    #[test]
    fn empty_result_when_nothing_matches() {
        let records = sample();
        let filter = FilterSpec {
            search: "nobody".to_string(),
            ..FilterSpec::default()
        };
        assert!(apply(&records, &filter, &SortSpec::default()).is_empty());
    }
}
