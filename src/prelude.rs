//! Convenient re-exports for common usage patterns.
//!
//! ```ignore
//! use gift_survey::prelude::*;
//!
//! let catalog = Catalog::load("questions.json")?;
//! let mut session = Session::open(catalog, MemoryStorage::new())?;
//! session.select_current(3)?;
//! ```

// Unified error handling
pub use crate::error::{Error, Result};

// Survey model
pub use crate::catalog::{Catalog, CatalogError, Category, Question};
pub use crate::history::{History, HistoryEntry, MAX_HISTORY_ENTRIES};
pub use crate::rating::Rating;
pub use crate::scoring::{CategoryScore, ScoreBand, Tier};
pub use crate::survey::{Answers, IncompleteSubmission, Survey, SurveyError, SurveyState};
pub use crate::theme::Theme;

// Session and persistence
pub use crate::session::{Session, SessionError, View};
#[cfg(feature = "kv")]
pub use crate::storage::FjallStore;
pub use crate::storage::{MemoryStorage, Storage, StorageError};
pub use crate::store::{ProgressSnapshot, SurveyStore};
