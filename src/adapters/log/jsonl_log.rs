//! JSONL execution log.
//!
//! One serialized event per line. Each append is a single write of the
//! full line, so concurrent sessions can share a log file without partial
//! records; the mutex only serializes writers within this process.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::ports::{EventLog, EventLogError, ExecutionEvent};

/// Append-only JSONL event log backed by a file.
pub struct JsonlEventLog {
    file: Mutex<File>,
    path: PathBuf,
}

impl JsonlEventLog {
    /// Opens (or creates) the log file in append mode.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, EventLogError> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        Ok(Self {
            file: Mutex::new(file),
            path,
        })
    }

    /// The log file path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl EventLog for JsonlEventLog {
    fn append(&self, event: &ExecutionEvent) -> Result<(), EventLogError> {
        let mut line = serde_json::to_string(event)?;
        line.push('\n');
        let mut file = self.file.lock().expect("event log mutex poisoned");
        file.write_all(line.as_bytes())?;
        file.flush()?;
        Ok(())
    }
}

/// Event log that drops everything; for tests and one-off tooling.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullEventLog;

impl EventLog for NullEventLog {
    fn append(&self, _event: &ExecutionEvent) -> Result<(), EventLogError> {
        Ok(())
    }
}
