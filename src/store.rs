//! Typed survey documents on top of a [`Storage`] backend.
//!
//! Progress and history are JSON documents; the theme is the bare string
//! `light` or `dark`. Reads fail soft: a document that no longer parses is
//! logged and treated as missing, so a damaged store never blocks the
//! survey. Backend errors still propagate.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::history::{History, HistoryEntry};
use crate::logging::{debug, warn};
use crate::rating::Rating;
use crate::storage::{Storage, StorageError};
use crate::survey::Answers;
use crate::theme::Theme;

/// Key of the in-progress snapshot.
pub const PROGRESS_KEY: &str = "survey-progress";
/// Key of the result history.
pub const HISTORY_KEY: &str = "survey-history";
/// Key of the display theme.
pub const THEME_KEY: &str = "theme";

/// Resumable in-progress answers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressSnapshot {
    pub ratings: Vec<Option<Rating>>,
    pub current_index: usize,
    pub saved_at: DateTime<Utc>,
}

impl ProgressSnapshot {
    pub fn answers(&self) -> Answers {
        Answers::from_slots(self.ratings.clone())
    }

    pub fn has_answers(&self) -> bool {
        self.ratings.iter().any(Option::is_some)
    }
}

/// Progress, history and theme persistence over any [`Storage`].
#[derive(Debug)]
pub struct SurveyStore<S> {
    storage: S,
}

impl<S: Storage> SurveyStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn into_inner(self) -> S {
        self.storage
    }

    /// Overwrite the progress snapshot.
    pub fn save_progress(
        &mut self,
        answers: &Answers,
        current_index: usize,
        now: DateTime<Utc>,
    ) -> Result<(), StorageError> {
        let snapshot = ProgressSnapshot {
            ratings: answers.as_slice().to_vec(),
            current_index,
            saved_at: now,
        };
        self.write(PROGRESS_KEY, &snapshot)?;
        debug!(
            answered = answers.answered_count(),
            current_index = current_index,
            "progress saved"
        );
        Ok(())
    }

    /// The saved snapshot, or `None` if absent or unreadable.
    pub fn load_progress(&self) -> Result<Option<ProgressSnapshot>, StorageError> {
        self.read(PROGRESS_KEY)
    }

    pub fn clear_progress(&mut self) -> Result<(), StorageError> {
        self.storage.delete(PROGRESS_KEY)?;
        debug!("progress cleared");
        Ok(())
    }

    pub fn save_history(&mut self, history: &History) -> Result<(), StorageError> {
        self.write(HISTORY_KEY, history.list())
    }

    /// The saved history; empty if absent or unreadable.
    pub fn load_history(&self) -> Result<History, StorageError> {
        let entries: Option<Vec<HistoryEntry>> = self.read(HISTORY_KEY)?;
        Ok(entries.map(History::from_entries).unwrap_or_default())
    }

    pub fn clear_history(&mut self) -> Result<(), StorageError> {
        self.storage.delete(HISTORY_KEY)?;
        debug!("history cleared");
        Ok(())
    }

    pub fn save_theme(&mut self, theme: Theme) -> Result<(), StorageError> {
        self.storage.set(THEME_KEY, theme.as_str())
    }

    /// The saved theme, or the default if absent or unknown.
    ///
    /// A JSON-quoted value (`"dark"`) is accepted as well.
    pub fn load_theme(&self) -> Result<Theme, StorageError> {
        let Some(raw) = self.storage.get(THEME_KEY)? else {
            return Ok(Theme::default());
        };
        match raw.trim().trim_matches('"').parse::<Theme>() {
            Ok(theme) => Ok(theme),
            Err(_e) => {
                warn!(key = THEME_KEY, error = %_e, "ignoring unknown stored theme");
                Ok(Theme::default())
            }
        }
    }

    fn write<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) -> Result<(), StorageError> {
        let json = serde_json::to_string(value)
            .map_err(|e| StorageError::InvalidFormat(format!("cannot encode '{}': {}", key, e)))?;
        self.storage.set(key, &json)
    }

    fn read<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StorageError> {
        let Some(json) = self.storage.get(key)? else {
            return Ok(None);
        };
        match serde_json::from_str(&json) {
            Ok(value) => Ok(Some(value)),
            Err(_e) => {
                warn!(key = key, error = %_e, "discarding malformed stored value");
                Ok(None)
            }
        }
    }
}
