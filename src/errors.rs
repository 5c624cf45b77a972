use chrono::{Duration, NaiveDateTime};
use thiserror::Error;

/// Result alias returned by every fallible call in the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can go wrong while ranking and placing work.
#[derive(Error, Debug)]
pub enum Error {
    // ---- Input --------------------------------------------------------------
    /// Rejected input at a mutating call (percentages, designators, calendar shape).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Text that could not be turned into a date, time or day.
    #[error("Parse error: {0}")]
    Parse(String),

    // ---- Placement ----------------------------------------------------------
    /// A deadline or computed boundary lands outside every configured work period.
    #[error("'{item}': {} is not inside any work period.", .instant.format("%a %Y-%m-%d %H:%M"))]
    NonWorkInstant { item: String, instant: NaiveDateTime },

    /// Zero denominator while computing a priority. Never leaves the priority module.
    #[error(
        "Degenerate priority interval: remaining {remaining}, time to deadline {to_deadline}."
    )]
    DegenerateInterval {
        remaining: Duration,
        to_deadline: Duration,
    },

    /// A task was filed under a domain nobody created.
    #[error("Unknown domain: '{0}'. Create it before adding tasks to it.")]
    UnknownDomain(String),

    // ---- Config -------------------------------------------------------------
    /// Config file missing, unreadable or malformed, or an unknown key.
    #[error("Config error: {0}")]
    Config(String),

    // ---- Wrapped ------------------------------------------------------------
    /// Reading or writing config and log files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Encoding the config file back to JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

// ---- Constructors -----------------------------------------------------------

impl Error {
    pub fn validation<S: Into<String>>(msg: S) -> Self {
        Error::Validation(msg.into())
    }
    pub fn parse<S: Into<String>>(msg: S) -> Self {
        Error::Parse(msg.into())
    }
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Error::Config(msg.into())
    }
    pub fn non_work_instant<S: Into<String>>(item: S, instant: NaiveDateTime) -> Self {
        Error::NonWorkInstant {
            item: item.into(),
            instant,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn validation_constructor_wraps_message() {
        let err = Error::validation("bad percent");
        match err {
            Error::Validation(msg) => assert_eq!(msg, "bad percent"),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn parse_constructor_wraps_message() {
        let err = Error::parse("bad clock");
        assert_eq!(err.to_string(), "Parse error: bad clock");
        assert!(matches!(err, Error::Parse(ref msg) if msg == "bad clock"));
    }

    #[test]
    fn config_constructor_wraps_message() {
        let err = Error::config("config missing");
        match err {
            Error::Config(msg) => assert_eq!(msg, "config missing"),
            other => panic!("expected config error, got {other:?}"),
        }
    }

    #[test]
    fn non_work_instant_formats_message() {
        let instant = NaiveDate::from_ymd_opt(2099, 1, 6)
            .unwrap()
            .and_hms_opt(3, 0, 0)
            .unwrap();
        let err = Error::non_work_instant("report", instant);
        assert_eq!(
            err.to_string(),
            "'report': Tue 2099-01-06 03:00 is not inside any work period."
        );
    }

    #[test]
    fn unknown_domain_formats_message() {
        let err = Error::UnknownDomain("garden".to_string());
        assert_eq!(
            err.to_string(),
            "Unknown domain: 'garden'. Create it before adding tasks to it."
        );
    }

    #[test]
    fn io_error_formats_message() {
        let raw = std::io::Error::new(std::io::ErrorKind::Other, "disk");
        let err = Error::from(raw);
        assert_eq!(err.to_string(), "I/O error: disk");
    }

    #[test]
    fn json_error_formats_message() {
        let raw = serde_json::from_str::<serde_json::Value>("not-json").unwrap_err();
        let expected = format!("JSON error: {}", raw);
        let err = Error::from(raw);
        assert_eq!(err.to_string(), expected);
    }
}
