use chrono::{Duration, TimeZone, Utc};

use super::*;
use crate::influencers::{NewInfluencer, Platform, Status};

fn make(id: &str, username: &str, views_median: u64, status: Status) -> Influencer {
    let mut form = NewInfluencer::new(username, Platform::Instagram);
    form.views_median = views_median;
    form.status = status;
    Influencer::new(id.to_string(), "camp".into(), Utc::now(), form).unwrap()
}

fn ids(records: &[&Influencer]) -> Vec<String> {
    records.iter().map(|i| i.id.clone()).collect()
}

#[test]
fn status_sort_follows_priority_order() {
    let records = vec![
        make("a", "@a", 10, Status::ScriptNeeded),
        make("b", "@b", 20, Status::Posted),
        make("c", "@c", 30, Status::ApproveNeeded),
    ];
    let sorted = sort_influencers(&records, &SortSpec::new(SortField::Status, SortDirection::Asc));
    let medians: Vec<u64> = sorted.iter().map(|i| i.views_median).collect();
    assert_eq!(medians, vec![10, 30, 20]);
}

#[test]
fn paid_ranks_after_posted() {
    let records = vec![
        make("paid", "@p", 1, Status::Paid),
        make("posted", "@q", 1, Status::Posted),
        make("script", "@r", 1, Status::ScriptNeeded),
    ];
    let sorted = sort_influencers(&records, &SortSpec::new(SortField::Status, SortDirection::Asc));
    assert_eq!(ids(&sorted), vec!["script", "posted", "paid"]);
}

#[test]
fn username_sort_ignores_case() {
    let records = vec![
        make("1", "@Zed", 0, Status::Posted),
        make("2", "@alpha", 0, Status::Posted),
        make("3", "@Mike", 0, Status::Posted),
    ];
    let sorted = sort_influencers(&records, &SortSpec::default());
    assert_eq!(ids(&sorted), vec!["2", "3", "1"]);
}

#[test]
fn platform_sort_is_by_label() {
    let mut records = vec![
        make("ig", "@a", 0, Status::Posted),
        make("tt", "@b", 0, Status::Posted),
        make("both", "@c", 0, Status::Posted),
    ];
    records[1].platform = Platform::TikTok;
    records[2].platform = Platform::Both;
    let sorted = sort_influencers(
        &records,
        &SortSpec::new(SortField::Platform, SortDirection::Asc),
    );
    assert_eq!(ids(&sorted), vec!["both", "ig", "tt"]);
}

#[test]
fn numeric_fields_sort_numerically() {
    let mut records = vec![
        make("a", "@a", 900, Status::Posted),
        make("b", "@b", 10_000, Status::Posted),
        make("c", "@c", 85, Status::Posted),
    ];
    records[0].views_now = 5;
    records[1].views_now = 1;
    records[2].views_now = 3;

    let by_median = sort_influencers(
        &records,
        &SortSpec::new(SortField::ViewsMedian, SortDirection::Asc),
    );
    assert_eq!(ids(&by_median), vec!["c", "a", "b"]);

    let by_total = sort_influencers(
        &records,
        &SortSpec::new(SortField::TotalViews, SortDirection::Desc),
    );
    assert_eq!(ids(&by_total), vec!["b", "a", "c"]);

    let by_now = sort_influencers(
        &records,
        &SortSpec::new(SortField::ViewsNow, SortDirection::Asc),
    );
    assert_eq!(ids(&by_now), vec!["b", "c", "a"]);
}

#[test]
fn created_at_sorts_chronologically() {
    let base = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
    let mut records = vec![
        make("mid", "@a", 0, Status::Posted),
        make("late", "@b", 0, Status::Posted),
        make("early", "@c", 0, Status::Posted),
    ];
    records[0].created_at = base + Duration::hours(1);
    records[1].created_at = base + Duration::days(3);
    records[2].created_at = base;

    let sorted = sort_influencers(
        &records,
        &SortSpec::new(SortField::CreatedAt, SortDirection::Asc),
    );
    assert_eq!(ids(&sorted), vec!["early", "mid", "late"]);
}

#[test]
fn sort_is_stable_for_equal_keys() {
    let records = vec![
        make("first", "@a", 500, Status::Posted),
        make("other", "@b", 100, Status::Posted),
        make("second", "@c", 500, Status::Posted),
        make("third", "@d", 500, Status::Posted),
    ];
    let asc = sort_influencers(
        &records,
        &SortSpec::new(SortField::ViewsMedian, SortDirection::Asc),
    );
    assert_eq!(ids(&asc), vec!["other", "first", "second", "third"]);

    let desc = sort_influencers(
        &records,
        &SortSpec::new(SortField::ViewsMedian, SortDirection::Desc),
    );
    assert_eq!(ids(&desc), vec!["first", "second", "third", "other"]);
}

#[test]
fn toggling_direction_reverses_distinct_keys() {
    let records = vec![
        make("a", "@a", 40, Status::Posted),
        make("b", "@b", 10, Status::Posted),
        make("c", "@c", 30, Status::Posted),
        make("d", "@d", 20, Status::Posted),
    ];
    let asc_spec = SortSpec::new(SortField::ViewsMedian, SortDirection::Asc);
    let asc = sort_influencers(&records, &asc_spec);
    let desc = sort_influencers(
        &records,
        &SortSpec::new(asc_spec.field, asc_spec.direction.reversed()),
    );

    let mut reversed = ids(&asc);
    reversed.reverse();
    assert_eq!(ids(&desc), reversed);
}

#[test]
fn unrecognized_field_keeps_input_order() {
    let records = vec![
        make("z", "@z", 3, Status::Paid),
        make("a", "@a", 1, Status::ScriptNeeded),
        make("m", "@m", 2, Status::Posted),
    ];
    for direction in [SortDirection::Asc, SortDirection::Desc] {
        let sorted = sort_influencers(&records, &SortSpec::new(SortField::Unrecognized, direction));
        assert_eq!(ids(&sorted), vec!["z", "a", "m"]);
    }
}

#[test]
fn sorting_leaves_input_untouched() {
    let records = vec![
        make("b", "@b", 2, Status::Posted),
        make("a", "@a", 1, Status::Posted),
    ];
    let before = records.clone();
    let _ = sort_influencers(&records, &SortSpec::new(SortField::ViewsMedian, SortDirection::Asc));
    assert_eq!(records, before);
}

#[test]
fn compare_desc_is_reverse_of_asc() {
    let a = make("a", "@a", 1, Status::Posted);
    let b = make("b", "@b", 2, Status::Posted);
    let asc = compare(&a, &b, &SortSpec::new(SortField::ViewsMedian, SortDirection::Asc));
    let desc = compare(&a, &b, &SortSpec::new(SortField::ViewsMedian, SortDirection::Desc));
    assert_eq!(asc, Ordering::Less);
    assert_eq!(desc, asc.reverse());
}

#[test]
fn toggled_flips_only_on_same_field() {
    let spec = SortSpec::default();
    let flipped = spec.toggled(SortField::Username);
    assert_eq!(flipped.direction, SortDirection::Desc);

    let back = flipped.toggled(SortField::Username);
    assert_eq!(back.direction, SortDirection::Asc);

    let other = flipped.toggled(SortField::ViewsNow);
    assert_eq!(other, SortSpec::new(SortField::ViewsNow, SortDirection::Asc));
}

#[test]
fn sort_field_parses_wire_and_cli_names() {
    assert_eq!("viewsMedian".parse::<SortField>(), Ok(SortField::ViewsMedian));
    assert_eq!("views-now".parse::<SortField>(), Ok(SortField::ViewsNow));
    assert_eq!("created_at".parse::<SortField>(), Ok(SortField::CreatedAt));
    assert!("followers".parse::<SortField>().is_err());
}

#[test]
fn unknown_field_deserializes_as_unrecognized() {
    let spec: SortSpec =
        serde_json::from_str(r#"{"field": "followers", "direction": "desc"}"#).unwrap();
    assert_eq!(spec.field, SortField::Unrecognized);
    assert_eq!(spec.direction, SortDirection::Desc);

    let spec: SortSpec =
        serde_json::from_str(r#"{"field": "totalViews", "direction": "asc"}"#).unwrap();
    assert_eq!(spec.field, SortField::TotalViews);
}
