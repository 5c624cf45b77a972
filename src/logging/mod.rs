//! Console plus per-session file logging.
//!
//! The log file is opened on the first line routed to it, so sessions that
//! only print to the console leave nothing behind on disk.

mod sink;
#[cfg(test)]
mod tests;

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

pub use sink::LogLevel;
use sink::{ConsoleSink, FileSink, LogSink};

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum LogTarget {
    ConsoleOnly,
    #[default]
    ConsoleAndFile,
    FileOnly,
}

impl LogTarget {
    fn console(self) -> bool {
        self != LogTarget::FileOnly
    }

    fn file(self) -> bool {
        self != LogTarget::ConsoleOnly
    }
}

enum SessionFile {
    Pending(PathBuf),
    Open(FileSink),
    /// Opening failed once; the session carries on console-only.
    Unavailable,
}

impl SessionFile {
    fn write_line(&mut self, level: LogLevel, line: &str) {
        if let SessionFile::Pending(dir) = self {
            let next = match FileSink::create_in(dir) {
                Ok(sink) => SessionFile::Open(sink),
                Err(err) => {
                    eprintln!("WARN: File logging unavailable; continuing without a log file. ({err})");
                    SessionFile::Unavailable
                }
            };
            *self = next;
        }
        if let SessionFile::Open(sink) = self {
            sink.write_line(level, line);
        }
    }
}

/// Cheap-to-clone handle. Clones, scoped or not, share one session file.
#[derive(Clone)]
pub struct Logger {
    scope: Option<Arc<str>>,
    session: Arc<Mutex<SessionFile>>,
    file_enabled: Arc<AtomicBool>,
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl Logger {
    pub fn new() -> Self {
        Self {
            scope: None,
            session: Arc::new(Mutex::new(SessionFile::Pending(PathBuf::from("logs")))),
            file_enabled: Arc::new(AtomicBool::new(true)),
        }
    }

    /// A handle whose lines are prefixed with `[scope]`.
    pub fn scoped(&self, scope: &str) -> Self {
        Self {
            scope: Some(Arc::from(scope)),
            ..self.clone()
        }
    }

    fn log(&self, level: LogLevel, message: &str, target: LogTarget) {
        let line = match &self.scope {
            Some(scope) => format!("[{scope}] {message}"),
            None => message.to_string(),
        };

        if target.console() {
            ConsoleSink.write_line(level, &line);
        }
        if target.file() && self.file_logging_enabled() {
            if let Ok(mut session) = self.session.lock() {
                session.write_line(level, &line);
            }
        }
    }

    pub fn info(&self, message: impl AsRef<str>, target: LogTarget) {
        self.log(LogLevel::Info, message.as_ref(), target);
    }

    pub fn warn(&self, message: impl AsRef<str>, target: LogTarget) {
        self.log(LogLevel::Warn, message.as_ref(), target);
    }

    pub fn error(&self, message: impl AsRef<str>, target: LogTarget) {
        self.log(LogLevel::Error, message.as_ref(), target);
    }

    pub fn set_file_logging_enabled(&self, enabled: bool) {
        self.file_enabled.store(enabled, Ordering::SeqCst);
    }

    pub fn file_logging_enabled(&self) -> bool {
        self.file_enabled.load(Ordering::SeqCst)
    }

    /// Only takes effect before the session file is opened.
    pub fn set_log_dir(&self, dir: impl AsRef<Path>) {
        if let Ok(mut session) = self.session.lock() {
            if let SessionFile::Pending(current) = &mut *session {
                *current = dir.as_ref().to_path_buf();
            }
        }
    }

    pub fn log_path(&self) -> Option<PathBuf> {
        let session = self.session.lock().ok()?;
        match &*session {
            SessionFile::Open(sink) => Some(sink.path().to_path_buf()),
            SessionFile::Pending(_) | SessionFile::Unavailable => None,
        }
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("scope", &self.scope)
            .field("log_path", &self.log_path())
            .field("file_enabled", &self.file_logging_enabled())
            .finish()
    }
}
