//! File-backed session archive.
//!
//! Conversation records are written as one pretty-printed JSON file per
//! session; escalations append to a shared JSONL file, one object per
//! line.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::domain::case::ConversationRecord;
use crate::domain::escalation::EscalationLogEntry;
use crate::ports::{ArchiveError, SessionArchive};

/// Default file name of the escalation log within the archive directory.
const ESCALATION_LOG_FILE: &str = "escalations.jsonl";

/// Stores session artifacts under one directory.
pub struct FileSessionArchive {
    dir: PathBuf,
    escalation_lock: Mutex<()>,
}

impl FileSessionArchive {
    /// Creates the archive, creating the directory if needed.
    pub fn new(dir: impl AsRef<Path>) -> Result<Self, ArchiveError> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        Ok(Self {
            dir,
            escalation_lock: Mutex::new(()),
        })
    }

    /// Path a conversation record is stored under.
    pub fn conversation_path(&self, record: &ConversationRecord) -> PathBuf {
        self.dir
            .join(format!("conversation_{}.json", record.session_id))
    }

    /// Path of the escalation log.
    pub fn escalation_log_path(&self) -> PathBuf {
        self.dir.join(ESCALATION_LOG_FILE)
    }
}

impl SessionArchive for FileSessionArchive {
    fn store_conversation(&self, record: &ConversationRecord) -> Result<(), ArchiveError> {
        let json = serde_json::to_string_pretty(record)?;
        fs::write(self.conversation_path(record), json)?;
        Ok(())
    }

    fn append_escalation(&self, entry: &EscalationLogEntry) -> Result<(), ArchiveError> {
        let mut line = serde_json::to_string(entry)?;
        line.push('\n');
        let _guard = self
            .escalation_lock
            .lock()
            .expect("escalation log mutex poisoned");
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.escalation_log_path())?;
        file.write_all(line.as_bytes())?;
        file.flush()?;
        Ok(())
    }
}
