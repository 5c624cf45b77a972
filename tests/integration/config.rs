use backplan::config::{Config, ConfigKey};
use backplan::errors::Error;
use chrono::Duration;

use crate::common::{at, build_planner, make_temp_dir, write_valid_config};

#[test]
fn planner_picks_up_configured_domains_and_calendar() {
    let dir = make_temp_dir("backplan-config");
    write_valid_config(&dir);
    let planner = build_planner(&dir);

    let domains: Vec<&str> = planner.domains().map(|d| d.as_str()).collect();
    assert_eq!(domains, ["home", "work"]);
    assert_eq!(planner.calendar().periods().len(), 3);
    assert_eq!(planner.calendar().weekly_work_time(), Duration::hours(11));
    assert_eq!(planner.capacity_today(at(6, 16, 0)), 2.0);
}

#[test]
fn edited_calendar_applies_to_next_planner() {
    let dir = make_temp_dir("backplan-config");
    write_valid_config(&dir);
    let mut cfg = Config::load_from(dir.join("config.json")).unwrap();
    cfg.set_key(ConfigKey::WorkPeriods, "MON 8AM-12PM").unwrap();
    cfg.set("domains", "garden").unwrap();

    let mut planner = build_planner(&dir);
    assert!(matches!(
        planner.add_task("weed", "", "work", at(5, 12, 0), Duration::hours(1)),
        Err(Error::UnknownDomain(_))
    ));
    let id = planner
        .add_task("weed", "", "garden", at(5, 12, 0), Duration::hours(5))
        .unwrap();

    // 4h on Monday, 1h the Monday before
    planner.run_placement_at(at(1, 8, 0)).unwrap();
    let p = planner.task(id).unwrap().placement().unwrap();
    assert_eq!(p.start, at(5, 8, 0) - Duration::weeks(1) + Duration::hours(3));
    assert_eq!(p.end, at(5, 12, 0));
}

#[test]
fn planner_respects_disabled_file_logging() {
    let dir = make_temp_dir("backplan-config");
    write_valid_config(&dir);
    let mut cfg = Config::load_from(dir.join("config.json")).unwrap();
    cfg.set_key(ConfigKey::FileLoggingEnabled, "False").unwrap();

    let mut planner = build_planner(&dir);
    planner
        .add_task("draft", "", "work", at(7, 12, 0), Duration::hours(1))
        .unwrap();
    planner.run_placement_at(at(5, 8, 0)).unwrap();
    assert!(!planner.logger().file_logging_enabled());
    assert!(planner.logger().log_path().is_none());
}
