use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Cumulative win/loss tally. Pushes touch neither counter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub wins: u32,
    pub losses: u32,
}

#[derive(Debug, Error)]
pub enum RecordStoreError {
    #[error("failed to write record: {0}")]
    Io(#[from] io::Error),
}

/// Persistence backend for the win/loss record. The table takes a store
/// handle at construction, so tests and alternate backends plug in without
/// touching the engine.
pub trait RecordStore {
    /// Loads the stored record, defaulting to zero counts when no record
    /// exists or the stored data is malformed. Never fails.
    fn load(&self) -> Record;

    /// Overwrites the stored record wholesale.
    fn save(&mut self, record: Record) -> Result<(), RecordStoreError>;
}

/// Flat-file backend. Two lines of text:
///
/// ```text
/// wins=12
/// losses=7
/// ```
pub struct FileRecordStore {
    path: PathBuf,
}

impl FileRecordStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn parse(contents: &str) -> Record {
        let mut record = Record::default();
        for line in contents.lines() {
            if let Some(rest) = line.strip_prefix("wins=") {
                record.wins = rest.trim().parse().unwrap_or(0);
            } else if let Some(rest) = line.strip_prefix("losses=") {
                record.losses = rest.trim().parse().unwrap_or(0);
            }
        }
        record
    }
}

impl RecordStore for FileRecordStore {
    fn load(&self) -> Record {
        match fs::read_to_string(&self.path) {
            Ok(contents) => Self::parse(&contents),
            Err(_) => Record::default(),
        }
    }

    fn save(&mut self, record: Record) -> Result<(), RecordStoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(
            &self.path,
            format!("wins={}\nlosses={}\n", record.wins, record.losses),
        )?;
        Ok(())
    }
}

/// In-process backend for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryRecordStore {
    record: Record,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RecordStore for MemoryRecordStore {
    fn load(&self) -> Record {
        self.record
    }

    fn save(&mut self, record: Record) -> Result<(), RecordStoreError> {
        self.record = record;
        Ok(())
    }
}
