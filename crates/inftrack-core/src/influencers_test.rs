use chrono::TimeZone;

use super::*;

fn make_influencer() -> Influencer {
    let mut form = NewInfluencer::new("@joycecruz", Platform::Instagram);
    form.profile_link = "https://www.instagram.com/joycecruz".to_string();
    form.views_median = 56_400;
    form.views_now = 78_300;
    form.videos[0] = VideoSlot {
        link: "https://www.instagram.com/p/C2xYz1A2bcd/".to_string(),
        title: "Morning Routine with Brand Products".to_string(),
        posted_on: "2025-01-04".to_string(),
        status: Status::Posted,
    };
    form.status = Status::Posted;
    Influencer::new(
        "inf-1".to_string(),
        "camp-1".to_string(),
        Utc.with_ymd_and_hms(2025, 1, 1, 12, 0, 0).unwrap(),
        form,
    )
    .expect("valid form")
}

#[test]
fn status_parses_labels_and_kebab_case() {
    assert_eq!("Script Needed".parse::<Status>(), Ok(Status::ScriptNeeded));
    assert_eq!("approve-needed".parse::<Status>(), Ok(Status::ApproveNeeded));
    assert_eq!("POSTED".parse::<Status>(), Ok(Status::Posted));
    assert_eq!("paid".parse::<Status>(), Ok(Status::Paid));
    assert!(matches!(
        "shipped".parse::<Status>(),
        Err(CoreError::InvalidStatus(ref s)) if s == "shipped"
    ));
}

#[test]
fn platform_parses_case_insensitively() {
    assert_eq!("tiktok".parse::<Platform>(), Ok(Platform::TikTok));
    assert_eq!(" Instagram ".parse::<Platform>(), Ok(Platform::Instagram));
    assert_eq!("BOTH".parse::<Platform>(), Ok(Platform::Both));
    assert!("youtube".parse::<Platform>().is_err());
}

#[test]
fn status_rank_follows_workflow_order() {
    let ranks: Vec<u8> = Status::ALL.iter().map(|s| s.rank()).collect();
    assert_eq!(ranks, vec![0, 1, 2, 3]);
    assert!(Status::ScriptNeeded < Status::Paid);
}

#[test]
fn display_uses_labels() {
    assert_eq!(Status::ApproveNeeded.to_string(), "Approve Needed");
    assert_eq!(Platform::TikTok.to_string(), "TikTok");
}

#[test]
fn new_rejects_blank_username() {
    let form = NewInfluencer::new("   ", Platform::TikTok);
    let err = Influencer::new("x".into(), "c".into(), Utc::now(), form).unwrap_err();
    assert_eq!(err, CoreError::EmptyUsername);
}

#[test]
fn new_trims_username() {
    let form = NewInfluencer::new("  @imbigz ", Platform::TikTok);
    let inf = Influencer::new("x".into(), "c".into(), Utc::now(), form).unwrap();
    assert_eq!(inf.username, "@imbigz");
}

#[test]
fn total_views_tracks_views_median() {
    let mut inf = make_influencer();
    assert_eq!(inf.total_views(), 282_000);

    inf.apply(InfluencerUpdate {
        views_median: Some(10_000),
        ..InfluencerUpdate::default()
    })
    .unwrap();
    assert_eq!(inf.total_views(), 50_000);
}

#[test]
fn apply_updates_only_given_fields() {
    let mut inf = make_influencer();
    inf.apply(InfluencerUpdate {
        views_now: Some(90_000),
        status: Some(Status::Paid),
        ..InfluencerUpdate::default()
    })
    .unwrap();

    assert_eq!(inf.views_now, 90_000);
    assert_eq!(inf.status, Status::Paid);
    assert_eq!(inf.username, "@joycecruz");
    assert_eq!(inf.views_median, 56_400);
    assert_eq!(inf.campaign_id, "camp-1");
}

#[test]
fn apply_updates_single_video_slot() {
    let mut inf = make_influencer();
    inf.apply(InfluencerUpdate {
        videos: vec![VideoSlotUpdate {
            slot: 2,
            posted_on: Some("2025-01-12".to_string()),
            status: Some(Status::Posted),
            ..VideoSlotUpdate::default()
        }],
        ..InfluencerUpdate::default()
    })
    .unwrap();

    assert_eq!(inf.videos[2].posted_on, "2025-01-12");
    assert_eq!(inf.videos[2].status, Status::Posted);
    assert!(inf.videos[2].link.is_empty());
    assert_eq!(inf.videos[0].posted_on, "2025-01-04");
}

#[test]
fn apply_updates_several_slots_in_one_pass() {
    let mut inf = make_influencer();
    inf.apply(InfluencerUpdate {
        videos: vec![
            VideoSlotUpdate {
                slot: 1,
                title: Some("second".to_string()),
                ..VideoSlotUpdate::default()
            },
            VideoSlotUpdate {
                slot: 3,
                link: Some("https://www.instagram.com/p/xyz".to_string()),
                ..VideoSlotUpdate::default()
            },
        ],
        ..InfluencerUpdate::default()
    })
    .unwrap();

    assert_eq!(inf.videos[1].title, "second");
    assert_eq!(inf.videos[3].link, "https://www.instagram.com/p/xyz");
}

#[test]
fn update_with_only_blank_slot_changes_is_empty() {
    let update = InfluencerUpdate {
        videos: vec![VideoSlotUpdate {
            slot: 1,
            ..VideoSlotUpdate::default()
        }],
        ..InfluencerUpdate::default()
    };
    assert!(update.is_empty());

    let update = InfluencerUpdate {
        videos: vec![VideoSlotUpdate {
            slot: 1,
            status: Some(Status::Posted),
            ..VideoSlotUpdate::default()
        }],
        ..InfluencerUpdate::default()
    };
    assert!(!update.is_empty());
}

#[test]
fn apply_rejects_out_of_range_slot_without_mutating() {
    let mut inf = make_influencer();
    let before = inf.clone();
    let err = inf
        .apply(InfluencerUpdate {
            views_now: Some(1),
            videos: vec![VideoSlotUpdate {
                slot: 4,
                ..VideoSlotUpdate::default()
            }],
            ..InfluencerUpdate::default()
        })
        .unwrap_err();

    assert_eq!(err, CoreError::SlotOutOfRange(4));
    assert_eq!(inf, before);
}

#[test]
fn apply_rejects_blank_username_without_mutating() {
    let mut inf = make_influencer();
    let before = inf.clone();
    let err = inf
        .apply(InfluencerUpdate {
            username: Some(String::new()),
            views_now: Some(1),
            ..InfluencerUpdate::default()
        })
        .unwrap_err();
    assert_eq!(err, CoreError::EmptyUsername);
    assert_eq!(inf, before);
}

#[test]
fn posted_dates_skips_empty_slots() {
    let mut inf = make_influencer();
    inf.videos[3].posted_on = "2025-01-16".to_string();
    let dates: Vec<&str> = inf.posted_dates().collect();
    assert_eq!(dates, vec!["2025-01-04", "2025-01-16"]);
}

#[test]
fn serializes_to_parallel_array_layout() {
    let inf = make_influencer();
    let value = serde_json::to_value(&inf).unwrap();

    assert_eq!(value["totalViews"], 282_000);
    assert_eq!(value["campaignId"], "camp-1");
    assert_eq!(value["postedOn"], serde_json::json!(["2025-01-04", "", "", ""]));
    assert_eq!(
        value["videoStatuses"],
        serde_json::json!(["Posted", "Script Needed", "Script Needed", "Script Needed"])
    );
    assert!(value.get("videos").is_none());
}

#[test]
fn deserialize_recomputes_total_views_and_accepts_missing_campaign() {
    let raw = r#"{
        "id": "legacy-1",
        "username": "@daveyguide",
        "profileLink": "https://www.instagram.com/daveyguide",
        "platform": "Instagram",
        "viewsMedian": 1300,
        "totalViews": 999,
        "viewsNow": 0,
        "videoLinks": ["", "", "", ""],
        "videoTitles": ["", "", "", ""],
        "postedOn": ["", "", "", ""],
        "videoStatuses": ["Approve Needed", "Approve Needed", "Approve Needed", "Approve Needed"],
        "status": "Approve Needed",
        "createdAt": "2025-01-02T08:30:00.000Z"
    }"#;

    let inf: Influencer = serde_json::from_str(raw).unwrap();
    assert_eq!(inf.total_views(), 6_500);
    assert!(inf.is_orphaned());
    assert_eq!(inf.videos[1].status, Status::ApproveNeeded);
    assert_eq!(inf.posted_dates().count(), 0);
}

#[test]
fn json_layout_is_stable_across_reload() {
    let inf = make_influencer();
    let json = serde_json::to_string(&inf).unwrap();
    let back: Influencer = serde_json::from_str(&json).unwrap();
    assert_eq!(back, inf);
}
