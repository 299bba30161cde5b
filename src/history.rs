//! Bounded history of completed submissions, most recent first.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::logging::debug;
use crate::rating::Rating;
use crate::scoring::CategoryScore;

/// Entries kept; recording past this drops the oldest.
pub const MAX_HISTORY_ENTRIES: usize = 10;

/// Display format for [`HistoryEntry::date`].
const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S UTC";

/// Snapshot of one completed submission. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    /// Creation time in milliseconds since the Unix epoch; unique within a
    /// history.
    pub id: i64,
    /// Human-readable creation time.
    pub date: String,
    /// Ranked scores at submission time.
    pub category_scores: Vec<CategoryScore>,
    /// Every answer at submission time.
    pub ratings: Vec<Option<Rating>>,
}

impl HistoryEntry {
    /// Creation time reconstructed from the id.
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.id)
    }

    /// Highest ranked category.
    pub fn top_category(&self) -> Option<&CategoryScore> {
        self.category_scores.first()
    }
}

/// Ordered list of past results, newest at the front.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct History {
    entries: Vec<HistoryEntry>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap entries loaded from storage, enforcing the size bound.
    pub fn from_entries(mut entries: Vec<HistoryEntry>) -> Self {
        entries.truncate(MAX_HISTORY_ENTRIES);
        Self { entries }
    }

    /// Prepend a new entry stamped with `now` and drop anything past
    /// [`MAX_HISTORY_ENTRIES`]. Returns a copy of the new entry.
    pub fn record(
        &mut self,
        category_scores: Vec<CategoryScore>,
        ratings: Vec<Option<Rating>>,
        now: DateTime<Utc>,
    ) -> HistoryEntry {
        let mut id = now.timestamp_millis();
        if let Some(latest) = self.entries.first()
            && id <= latest.id
        {
            id = latest.id + 1;
        }

        let entry = HistoryEntry {
            id,
            date: now.format(DATE_FORMAT).to_string(),
            category_scores,
            ratings,
        };
        self.entries.insert(0, entry.clone());

        if self.entries.len() > MAX_HISTORY_ENTRIES {
            debug!(
                dropped = self.entries.len() - MAX_HISTORY_ENTRIES,
                "evicting oldest history entries"
            );
            self.entries.truncate(MAX_HISTORY_ENTRIES);
        }

        debug!(id = id, entries = self.entries.len(), "history entry recorded");
        entry
    }

    /// Entries, most recent first.
    pub fn list(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn get(&self, id: i64) -> Option<&HistoryEntry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    pub fn latest(&self) -> Option<&HistoryEntry> {
        self.entries.first()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
