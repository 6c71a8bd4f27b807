use anyhow::{Context, Result};
use chrono::Local;
use serde::{Deserialize, Serialize};
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, ErrorKind, Write};
use std::path::{Path, PathBuf};
use tracing::warn;

/// Format of [`LogEvent::timestamp`]
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One accepted command line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEvent {
    pub action: String,
    pub timestamp: String,
}

impl LogEvent {
    /// Stamp `action` with the current local time
    pub fn now(action: &str) -> Self {
        Self {
            action: action.to_string(),
            timestamp: Local::now().format(TIMESTAMP_FORMAT).to_string(),
        }
    }
}

/// Sink for accepted command lines.
///
/// Recording is best-effort: implementations swallow their own failures so
/// a broken log never ends a session.
pub trait ActionLog {
    fn record(&mut self, action: &str);
}

/// Discards everything
pub struct NullJournal;

impl ActionLog for NullJournal {
    fn record(&mut self, _action: &str) {}
}

/// Keeps events in memory
#[derive(Debug, Default)]
pub struct MemoryJournal {
    pub events: Vec<LogEvent>,
}

impl ActionLog for MemoryJournal {
    fn record(&mut self, action: &str) {
        self.events.push(LogEvent::now(action));
    }
}

/// Appends one JSON object per line to a file
pub struct JsonlJournal {
    path: PathBuf,
}

impl JsonlJournal {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn append(&self, event: &LogEvent) -> Result<()> {
        let line = serde_json::to_string(event).context("Failed to serialize log event")?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("Failed to open {}", self.path.display()))?;
        writeln!(file, "{}", line).context("Failed to append log event")?;
        Ok(())
    }

    /// Load every well-formed event from a journal file.
    ///
    /// A missing file reads as empty; malformed lines are skipped.
    pub fn read_events(path: &Path) -> Result<Vec<LogEvent>> {
        let file = match File::open(path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to open {}", path.display()))
            }
        };

        let mut events = Vec::new();
        for (number, line) in BufReader::new(file).lines().enumerate() {
            let line = line.with_context(|| format!("Failed to read {}", path.display()))?;
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<LogEvent>(&line) {
                Ok(event) => events.push(event),
                Err(e) => warn!(line = number + 1, error = %e, "skipping malformed log event"),
            }
        }
        Ok(events)
    }
}

impl ActionLog for JsonlJournal {
    fn record(&mut self, action: &str) {
        if let Err(e) = self.append(&LogEvent::now(action)) {
            warn!(path = %self.path.display(), error = %format!("{:#}", e), "failed to record action");
        }
    }
}
