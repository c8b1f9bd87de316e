//! Analysis history
//!
//! A bounded, most-recent-first list of past analyses. Each record keeps the
//! raw input and a summary of the document statistics. The store is either
//! purely in memory or backed by a JSON file that is rewritten after every
//! change.
//!
//! A history file that cannot be decoded is treated as empty and removed.

use crate::analysis::constants::DEFAULT_HISTORY_LIMIT;
use crate::analysis::DocumentStats;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("cannot access history file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot encode history: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Counts stored with each record
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistorySummary {
    pub tokens: usize,
    pub symbols: usize,
    pub errors: usize,
    pub valid: usize,
}

impl From<&DocumentStats> for HistorySummary {
    fn from(stats: &DocumentStats) -> Self {
        Self {
            tokens: stats.tokens,
            symbols: stats.symbols,
            errors: stats.errors,
            valid: stats.valid,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub id: String,
    pub input: String,
    /// Milliseconds since the Unix epoch
    pub timestamp: u64,
    pub summary: HistorySummary,
}

#[derive(Debug)]
pub struct HistoryStore {
    path: Option<PathBuf>,
    limit: usize,
    records: Vec<HistoryRecord>,
}

impl HistoryStore {
    /// A store that never touches the filesystem. The limit is at least 1.
    pub fn in_memory(limit: usize) -> Self {
        Self {
            path: None,
            limit: limit.max(1),
            records: Vec::new(),
        }
    }

    /// Load the store backed by `path`. A missing file starts empty.
    pub fn open(path: impl AsRef<Path>, limit: usize) -> Result<Self, HistoryError> {
        let path = path.as_ref().to_path_buf();
        let records = load_records(&path)?;
        debug!(path = %path.display(), records = records.len(), "history loaded");

        let mut store = Self {
            path: Some(path),
            limit: limit.max(1),
            records,
        };
        store.records.truncate(store.limit);
        Ok(store)
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Records, newest first
    pub fn list(&self) -> &[HistoryRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Prepend a record for `input` and drop the oldest beyond the limit.
    pub fn add(
        &mut self,
        input: impl Into<String>,
        summary: HistorySummary,
    ) -> Result<HistoryRecord, HistoryError> {
        let timestamp = now_millis();
        let record = HistoryRecord {
            id: self.unique_id(timestamp),
            input: input.into(),
            timestamp,
            summary,
        };

        self.records.insert(0, record.clone());
        self.records.truncate(self.limit);
        self.save()?;
        Ok(record)
    }

    pub fn clear(&mut self) -> Result<(), HistoryError> {
        self.records.clear();
        if let Some(path) = &self.path {
            match fs::remove_file(path) {
                Ok(()) => {}
                Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                Err(source) => {
                    return Err(HistoryError::Io {
                        path: path.clone(),
                        source,
                    })
                }
            }
        }
        Ok(())
    }

    fn save(&self) -> Result<(), HistoryError> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let json = serde_json::to_string_pretty(&self.records)?;
        fs::write(path, json).map_err(|source| HistoryError::Io {
            path: path.clone(),
            source,
        })
    }

    fn unique_id(&self, timestamp: u64) -> String {
        let mut id = timestamp.to_string();
        let mut suffix = 1;
        while self.records.iter().any(|r| r.id == id) {
            id = format!("{}-{}", timestamp, suffix);
            suffix += 1;
        }
        id
    }
}

impl Default for HistoryStore {
    fn default() -> Self {
        Self::in_memory(DEFAULT_HISTORY_LIMIT)
    }
}

fn load_records(path: &Path) -> Result<Vec<HistoryRecord>, HistoryError> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(source) => {
            return Err(HistoryError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    match serde_json::from_str(&text) {
        Ok(records) => Ok(records),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "discarding corrupt history file");
            if let Err(e) = fs::remove_file(path) {
                warn!(path = %path.display(), error = %e, "cannot remove corrupt history file");
            }
            Ok(Vec::new())
        }
    }
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(valid: usize) -> HistorySummary {
        HistorySummary {
            tokens: 3,
            symbols: 2,
            errors: 0,
            valid,
        }
    }

    #[test]
    fn test_newest_first_and_bounded() {
        let mut store = HistoryStore::in_memory(3);
        for i in 0..5 {
            store.add(format!("{} + 1", i), summary(1)).unwrap();
        }
        let inputs: Vec<_> = store.list().iter().map(|r| r.input.as_str()).collect();
        assert_eq!(inputs, vec!["4 + 1", "3 + 1", "2 + 1"]);
    }

    #[test]
    fn test_ids_are_unique() {
        let mut store = HistoryStore::default();
        for _ in 0..10 {
            store.add("a", summary(1)).unwrap();
        }
        let mut ids: Vec<_> = store.list().iter().map(|r| r.id.clone()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 10);
    }

    #[test]
    fn test_clear() {
        let mut store = HistoryStore::in_memory(5);
        store.add("x", summary(0)).unwrap();
        store.clear().unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_summary_from_stats() {
        let stats = DocumentStats {
            lines: 2,
            tokens: 6,
            symbols: 4,
            errors: 1,
            valid: 1,
        };
        let summary = HistorySummary::from(&stats);
        assert_eq!((summary.tokens, summary.symbols, summary.errors, summary.valid), (6, 4, 1, 1));
    }
}
