use backplan::core::types::DaySpec;
use backplan::errors::Error;
use backplan::scheduler::ItemKind;
use chrono::Duration;
use std::fs;

use crate::common::{at, build_planner, make_temp_dir, write_valid_config};

#[test]
fn full_pass_over_a_week_of_work() {
    let dir = make_temp_dir("backplan-planner");
    write_valid_config(&dir);
    let mut planner = build_planner(&dir);

    let slides = planner
        .add_task("slides", "quarterly review", "work", at(7, 12, 0), Duration::hours(2))
        .unwrap();
    let taxes = planner
        .add_task("taxes", "", "home", at(6, 17, 0), Duration::hours(4))
        .unwrap();
    planner
        .add_reserved_interval(
            "dentist",
            DaySpec::try_from_str("2099-01-06 AM").unwrap(),
            DaySpec::try_from_str("2099-01-06 AM").unwrap(),
        )
        .unwrap();
    assert!(planner.update_task_at("taxes", "home", 25, at(5, 8, 0)).unwrap());

    let placed = planner.run_placement_at(at(5, 8, 0)).unwrap();
    assert_eq!(placed.len(), 3);

    // slides: Wed 10-12; taxes (3h left): Tue 14-17; dentist: Tue 9-12
    let p = planner.task(slides).unwrap().placement().unwrap();
    assert_eq!((p.start, p.end), (at(7, 10, 0), at(7, 12, 0)));
    let p = planner.task(taxes).unwrap().placement().unwrap();
    assert_eq!((p.start, p.end), (at(6, 14, 0), at(6, 17, 0)));
    assert!(p.gap_before_next);

    assert_eq!(placed[0].kind, ItemKind::Reserved);
    assert_eq!(placed[0].placement.start, at(6, 9, 0));
    assert_eq!(placed[0].placement.end, at(6, 12, 0));
    assert!(placed[0].placement.gap_before_next);

    for pair in placed.windows(2) {
        assert!(pair[0].placement.end <= pair[1].placement.start);
    }

    let log = fs::read_to_string(planner.logger().log_path().unwrap()).unwrap();
    assert!(log.contains("'slides'"));
    assert!(log.contains("Reserved interval 'dentist'"));
}

#[test]
fn placement_failure_is_logged_and_returned() {
    let dir = make_temp_dir("backplan-planner");
    write_valid_config(&dir);
    let mut planner = build_planner(&dir);
    planner
        .add_task("night shift", "", "work", at(7, 3, 0), Duration::hours(1))
        .unwrap();

    let err = planner.run_placement_at(at(5, 8, 0)).unwrap_err();
    assert!(matches!(err, Error::NonWorkInstant { .. }));
    assert!(err.to_string().contains("night shift"));

    let log = fs::read_to_string(planner.logger().log_path().unwrap()).unwrap();
    assert!(log.contains("ERROR"));
    assert!(log.contains("Placement aborted"));
}

#[test]
fn report_reflects_progress() {
    let dir = make_temp_dir("backplan-planner");
    write_valid_config(&dir);
    let mut planner = build_planner(&dir);
    planner
        .add_task("slides", "", "work", at(6, 16, 0), Duration::hours(2))
        .unwrap();
    planner
        .add_task("laundry", "", "home", at(7, 12, 0), Duration::hours(1))
        .unwrap();

    {
        let report = planner.report_at(at(6, 15, 0));
        assert_eq!(report.emergencies.len(), 1);
        assert_eq!(report.total_hours(), 3.0);
    }

    planner.update_task_at("slides", "work", 75, at(6, 15, 0)).unwrap();
    assert_eq!(planner.count(), 2);
    let report = planner.report_at(at(6, 15, 0));
    assert!(report.emergencies.is_empty());
    assert_eq!(report.total_hours(), 1.5);
    assert_eq!(report.ranked[0].title, "slides");
}
