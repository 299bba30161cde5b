//! A Likert questionnaire engine with category scoring.
//!
//! The library presents a fixed sequence of questions, records one
//! [`Rating`] per question, scores the answers into ranked per-category
//! results, and keeps resumable progress plus a bounded history of past
//! results in a key/value [`storage`] backend.
//!
//! # Quick Start
//!
//! ```ignore
//! use gift_survey::prelude::*;
//!
//! let catalog = Catalog::load("questions.json")?;
//! let mut session = Session::open(catalog, FjallStore::init(".gift-survey")?)?;
//!
//! session.select_current(3)?;
//! session.next();
//! // ... answer the rest ...
//! let entry = session.submit()?;
//! for score in &entry.category_scores {
//!     println!("{}: {}/{} ({})", score.name, score.score, score.max_score, score.tier());
//! }
//! ```
//!
//! # Modules
//!
//! - [`catalog`] - Question catalog loading and validation
//! - [`survey`] - Answer store and navigation state machine
//! - [`scoring`] - Category scoring, ranking and tiers
//! - [`history`] - Bounded history of completed submissions
//! - [`storage`] - Key/value backends (in-memory, fjall with the `kv` feature)
//! - [`store`] - Typed progress/history/theme documents over a backend
//! - [`session`] - The state owner that front ends drive
//! - [`cli`] - Command-line front end support (requires `cli` feature)
//!
//! # Feature Flags
//!
//! - `kv` - Enable the fjall storage backend (enabled by default)
//! - `logging` - Enable library-level tracing (consumers provide their own subscriber)
//! - `cli` - Enable the command-line interface binary
//! - `full` - Enable all features

pub mod catalog;
#[cfg(feature = "cli")]
pub mod cli;
pub mod history;
mod logging;
pub mod prelude;
pub mod rating;
pub mod scoring;
pub mod session;
pub mod storage;
pub mod store;
pub mod survey;
pub mod theme;

mod error;

// Re-export the unified error type
pub use error::{Error, Result};

// Re-export the main types at crate root for convenience
pub use catalog::{Catalog, CatalogError, Category, Question};
pub use history::{History, HistoryEntry, MAX_HISTORY_ENTRIES};
pub use rating::Rating;
pub use scoring::{CATEGORY_STRIDE, CategoryScore, MAX_CATEGORY_SCORE, ROTATIONS, Tier, score};
pub use session::{Session, SessionError, View};
pub use survey::{Answers, IncompleteSubmission, Survey, SurveyError, SurveyState};
pub use theme::Theme;
