//! Buffered run log.
//!
//! Stage payloads are collected in memory and written to `run_log.json` in a
//! single pass by [`RunLog::flush`], rather than rewriting the file on every
//! entry.

use std::path::{Path, PathBuf};

use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use serde_json::Value;

use crate::error::ReportError;
use crate::output::write_json;

pub const RUN_LOG_FILE: &str = "run_log.json";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogEntry {
    /// RFC 3339 UTC timestamp.
    pub ts: String,
    pub source: String,
    pub payload: Value,
}

#[derive(Debug)]
pub struct RunLog {
    path: PathBuf,
    entries: Vec<LogEntry>,
}

impl RunLog {
    /// A log that will be written to `<logs_dir>/run_log.json`.
    #[must_use]
    pub fn new(logs_dir: &Path) -> Self {
        Self {
            path: logs_dir.join(RUN_LOG_FILE),
            entries: Vec::new(),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    /// Append a stage payload. A payload that fails to serialize is recorded
    /// as an error string instead.
    pub fn record<T: Serialize + ?Sized>(&mut self, source: &str, payload: &T) {
        let payload = serde_json::to_value(payload).unwrap_or_else(|e| {
            tracing::warn!(source, error = %e, "run log payload could not be serialized");
            Value::String(format!("unserializable payload: {e}"))
        });
        tracing::debug!(source, entry = self.entries.len(), "run log entry recorded");
        self.entries.push(LogEntry {
            ts: Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true),
            source: source.to_string(),
            payload,
        });
    }

    /// Write every buffered entry to disk, replacing any previous file.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError`] if the log directory or file cannot be written.
    pub fn flush(&self) -> Result<(), ReportError> {
        if let Some(dir) = self.path.parent() {
            std::fs::create_dir_all(dir).map_err(|e| ReportError::Io {
                path: dir.display().to_string(),
                source: e,
            })?;
        }
        write_json(&self.path, "run log", &self.entries)?;
        tracing::info!(path = %self.path.display(), entries = self.entries.len(), "run log written");
        Ok(())
    }
}
