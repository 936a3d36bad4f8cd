//! Integration tests playing whole scenarios through a session.

use farm_sim::events::{EventLogger, EventType};
use farm_sim::query::{QueryFilters, query_events};
use farm_sim::scenario::{Scenario, create_standard_scenarios};
use farm_sim::{LandUse, Session};
use rust_decimal_macros::dec;

fn play(key: &str, seed: u64) -> Session {
    let scenario = create_standard_scenarios().remove(key).unwrap();
    Session::from_scenario(&scenario, seed).unwrap()
}

#[test]
fn test_basic_farm_scenario() {
    let session = play("basic", 42);
    let state = session.state();

    assert_eq!(state.week, 5);
    assert_eq!(state.days_elapsed, 35);
    // 10 pigs eat 70 kg a week from the 400 kg bought
    assert_eq!(state.feed_stock_kg, dec!(120));
    assert_eq!(state.average_pig_weight_kg, dec!(60));
    assert_eq!(state.funds, dec!(6500));
    assert_eq!(state.crop_growth, dec!(0.48));
    assert_eq!(session.grid().count(LandUse::Corn), 50);

    let shortages = session
        .events()
        .get_events()
        .iter()
        .filter(|e| matches!(e.event_type, EventType::FeedShortage { .. }))
        .count();
    assert_eq!(shortages, 0);
}

#[test]
fn test_feed_shortage_scenario() {
    let session = play("shortage", 5);
    let state = session.state();

    assert_eq!(state.feed_stock_kg, dec!(0));
    // VM2 pig multiplier 1.5, halved every week: 20 + 3 * 7.5
    assert_eq!(state.average_pig_weight_kg, dec!(42.5));

    let shortage_weeks: Vec<u32> = session
        .events()
        .get_events()
        .iter()
        .filter(|e| matches!(e.event_type, EventType::FeedShortage { .. }))
        .map(|e| e.week)
        .collect();
    assert_eq!(shortage_weeks, vec![1, 2, 3]);
}

#[test]
fn test_crops_scenario_ripens() {
    let session = play("crops", 1);
    assert_eq!(session.state().crop_growth, dec!(1));

    let summary = session.summary();
    assert_eq!(summary.corn_kg, 8000);
    assert_eq!(summary.total_pigs, 0);
    assert_eq!(summary.unused_units, 0);
}

#[test]
fn test_events_round_trip_through_query() {
    let session = play("shortage", 9);
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("events.json");
    session.events().save_to_file(&path).unwrap();

    let loaded = EventLogger::load_from_file(&path).unwrap();
    assert_eq!(loaded.get_events().len(), session.events().get_events().len());

    let filtered = query_events(
        &path,
        &QueryFilters {
            event_type: Some("shortage".to_string()),
            week_range: Some((2, 3)),
            ..Default::default()
        },
    )
    .unwrap();
    assert_eq!(filtered.len(), 2);
}

#[test]
fn test_csv_export_of_played_scenario() {
    let session = play("basic", 3);
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("map.csv");
    session.write_csv(&path).unwrap();

    let csv = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 201);
    assert_eq!(lines[0], "index,row,col,type,label");
    assert_eq!(lines[1], "1,1,1,corn,Corn");
    assert_eq!(lines[101], "101,7,11,pig,Pig Pen");
    assert_eq!(lines[200], "200,14,5,empty,Unused");
}

#[test]
fn test_scenario_file_matches_builtin() {
    let builtin = create_standard_scenarios().remove("piggery").unwrap();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("piggery.yaml");
    builtin.save_to_file(&path).unwrap();

    let loaded = Scenario::load_from_file(&path).unwrap();
    let a = Session::from_scenario(&builtin, 77).unwrap();
    let b = Session::from_scenario(&loaded, 77).unwrap();
    assert_eq!(a.state(), b.state());
}
