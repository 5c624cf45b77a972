use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use backplan::config::Config;
use backplan::logging::Logger;
use backplan::scheduler::Planner;
use chrono::{NaiveDate, NaiveDateTime};

static COUNTER: AtomicUsize = AtomicUsize::new(0);

pub fn make_temp_dir(prefix: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "{prefix}-{}-{}",
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos(),
        COUNTER.fetch_add(1, Ordering::Relaxed)
    ));
    let _ = fs::create_dir_all(&dir);
    dir
}

pub fn write_valid_config(dir: &Path) {
    let cfg = r#"{
      "work_periods": {
        "value": ["TUE 9AM-12PM", "TUE 1PM-6PM", "WED 9AM-12PM"],
        "description": "Weekly work cycle"
      },
      "day_end": { "value": "18:00:00", "description": "End of day" },
      "domains": { "value": ["work", "home"], "description": "Task domains" },
      "file_logging_enabled": { "value": "True", "description": "file logging" }
    }"#;
    fs::write(dir.join("config.json"), cfg).unwrap();
}

pub fn build_planner(dir: &Path) -> Planner {
    let config = Config::load_from(dir.join("config.json")).expect("config should load");
    let logger = Logger::new();
    logger.set_log_dir(dir.join("logs"));
    Planner::from_config(&config, logger).expect("planner should build")
}

// 2099-01-05 is a Monday.
pub fn at(day: u32, hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2099, 1, day)
        .unwrap()
        .and_hms_opt(hour, minute, 0)
        .unwrap()
}
