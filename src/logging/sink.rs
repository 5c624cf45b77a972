use std::fmt;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::Local;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Warn,
    Error,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
        };
        // honour width flags such as `{:<5}`
        f.pad(name)
    }
}

pub(super) trait LogSink {
    fn write_line(&mut self, level: LogLevel, line: &str);
}

/// Info to stdout, warnings and errors to stderr.
pub(super) struct ConsoleSink;

impl LogSink for ConsoleSink {
    fn write_line(&mut self, level: LogLevel, line: &str) {
        match level {
            LogLevel::Info => println!("{line}"),
            LogLevel::Warn | LogLevel::Error => eprintln!("{line}"),
        }
    }
}

/// One `plan-<stamp>.log` file per session.
pub(super) struct FileSink {
    file: File,
    path: PathBuf,
}

impl FileSink {
    pub(super) fn create_in(dir: &Path) -> io::Result<Self> {
        fs::create_dir_all(dir)?;
        let stamp = Local::now().format("%Y%m%d-%H%M%S%.3f");
        let path = dir.join(format!("plan-{stamp}.log"));
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        Ok(Self { file, path })
    }

    pub(super) fn path(&self) -> &Path {
        &self.path
    }
}

impl LogSink for FileSink {
    fn write_line(&mut self, level: LogLevel, line: &str) {
        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");
        let _ = writeln!(self.file, "[{timestamp}] {level:<5} {line}");
    }
}
