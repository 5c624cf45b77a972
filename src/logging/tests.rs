use crate::logging::{LogTarget, Logger};
use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};

static DIR_COUNTER: AtomicUsize = AtomicUsize::new(0);

fn temp_log_dir() -> PathBuf {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let uniq = DIR_COUNTER.fetch_add(1, Ordering::Relaxed);
    std::env::temp_dir().join(format!("backplan-logs-{nanos}-{uniq}"))
}

fn logger() -> Logger {
    let logger = Logger::new();
    logger.set_log_dir(temp_log_dir());
    logger
}

#[test]
fn logger_defers_file_creation_until_needed() {
    let logger = logger();
    assert!(logger.log_path().is_none());

    logger.info("console only", LogTarget::ConsoleOnly);
    assert!(logger.log_path().is_none());

    logger.info("placed 'draft'", LogTarget::FileOnly);
    let path = logger.log_path().expect("log path should be set");
    let contents = fs::read_to_string(&path).unwrap();
    assert!(contents.contains("placed 'draft'"));
    assert!(contents.contains("INFO"));
}

#[test]
fn logger_writes_levels_and_combined_targets() {
    let logger = logger();

    logger.warn("warn line", LogTarget::FileOnly);
    logger.error("error line", LogTarget::ConsoleAndFile);

    let path = logger.log_path().expect("log path should be set");
    let contents = fs::read_to_string(&path).unwrap();
    assert!(contents.contains("WARN"));
    assert!(contents.contains("warn line"));
    assert!(contents.contains("ERROR"));
    assert!(contents.contains("error line"));
}

#[test]
fn logger_skips_file_logging_when_disabled() {
    let logger = logger();
    logger.set_file_logging_enabled(false);

    logger.info("file should not exist", LogTarget::ConsoleAndFile);
    assert!(logger.log_path().is_none());

    logger.set_file_logging_enabled(true);
    logger.info("now write", LogTarget::FileOnly);
    assert!(logger.log_path().is_some());
}

#[test]
fn clones_share_one_session_file() {
    let logger = logger();
    let clone = logger.clone();
    logger.info("first", LogTarget::FileOnly);
    clone.info("second", LogTarget::FileOnly);

    assert_eq!(logger.log_path(), clone.log_path());
    let contents = fs::read_to_string(logger.log_path().unwrap()).unwrap();
    assert!(contents.contains("first"));
    assert!(contents.contains("second"));
}

#[test]
fn log_dir_is_fixed_once_file_exists() {
    let logger = logger();
    logger.info("open", LogTarget::FileOnly);
    let before = logger.log_path().unwrap();
    logger.set_log_dir(temp_log_dir());
    logger.info("still here", LogTarget::FileOnly);
    assert_eq!(logger.log_path().unwrap(), before);
}

#[test]
fn scoped_logger_prefixes_lines_and_shares_the_file() {
    let logger = logger();
    let placement = logger.scoped("placement");
    placement.info("placed 'draft'", LogTarget::FileOnly);
    logger.warn("plain", LogTarget::FileOnly);

    assert_eq!(placement.log_path(), logger.log_path());
    let contents = fs::read_to_string(logger.log_path().unwrap()).unwrap();
    assert!(contents.contains("[placement] placed 'draft'"));
    assert!(contents.contains("WARN  plain"));
}

#[test]
fn unusable_log_dir_falls_back_to_console() {
    let blocker = temp_log_dir();
    fs::write(&blocker, "not a directory").unwrap();

    let logger = Logger::new();
    logger.set_log_dir(blocker.join("logs"));
    logger.error("nowhere to go", LogTarget::ConsoleAndFile);
    assert!(logger.log_path().is_none());

    // the failure is remembered, so no later retry
    logger.set_log_dir(temp_log_dir());
    logger.info("still console", LogTarget::FileOnly);
    assert!(logger.log_path().is_none());
}
