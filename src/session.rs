//! The survey session: the single owner of all survey state.
//!
//! A [`Session`] ties the catalog, the live [`Survey`], the result
//! [`History`], the display [`Theme`] and persistence together, and exposes
//! the accessors and mutators a front end needs. Front ends translate user
//! gestures into these calls and render from the accessors; they hold no
//! survey data of their own.
//!
//! Viewing a past result never touches the live answers.

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::catalog::{Catalog, Question};
use crate::history::{History, HistoryEntry};
use crate::logging::{debug, info, warn};
use crate::rating::Rating;
use crate::scoring::{self, CategoryScore};
use crate::storage::{Storage, StorageError};
use crate::store::SurveyStore;
use crate::survey::{Survey, SurveyError, SurveyState};
use crate::theme::Theme;

/// Errors from session operations.
#[derive(Error, Debug)]
pub enum SessionError {
    #[error(transparent)]
    Survey(#[from] SurveyError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("History entry {0} not found")]
    HistoryEntryNotFound(i64),
}

impl SessionError {
    /// Returns `true` for a recoverable validation failure (unanswered
    /// questions).
    pub fn is_incomplete(&self) -> bool {
        matches!(self, Self::Survey(SurveyError::Incomplete(_)))
    }
}

/// What the front end should currently display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// The question at the current index.
    Survey,
    /// Ranked scores of the live submission.
    Results,
    /// The list of past results.
    History,
    /// One past result, read-only.
    HistoryEntry(i64),
}

type Clock = Box<dyn Fn() -> DateTime<Utc>>;

/// One user's survey session over a storage backend.
pub struct Session<S: Storage> {
    catalog: Catalog,
    survey: Survey,
    history: History,
    theme: Theme,
    view: View,
    store: SurveyStore<S>,
    clock: Clock,
}

impl<S: Storage> Session<S> {
    /// Start a session, restoring saved progress, history and theme.
    ///
    /// Saved progress is used only if it matches the catalog's question
    /// count and has at least one answer.
    pub fn open(catalog: Catalog, storage: S) -> Result<Self, SessionError> {
        let store = SurveyStore::new(storage);
        let question_count = catalog.question_count();

        let survey = match store.load_progress()? {
            Some(snapshot) if snapshot.ratings.len() != question_count => {
                warn!(
                    saved = snapshot.ratings.len(),
                    expected = question_count,
                    "ignoring progress saved for a different catalog"
                );
                Survey::new(question_count)
            }
            Some(snapshot) if snapshot.has_answers() => {
                info!(
                    answered = snapshot.answers().answered_count(),
                    current_index = snapshot.current_index,
                    "resuming saved progress"
                );
                Survey::resume(snapshot.answers(), snapshot.current_index)
            }
            _ => Survey::new(question_count),
        };

        let history = store.load_history()?;
        let theme = store.load_theme()?;
        debug!(history = history.len(), theme = %theme, "session opened");

        Ok(Self {
            catalog,
            survey,
            history,
            theme,
            view: View::Survey,
            store,
            clock: Box::new(Utc::now),
        })
    }

    /// Replace the time source used for snapshots and history ids.
    pub fn with_clock(mut self, clock: impl Fn() -> DateTime<Utc> + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    // Accessors

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn survey(&self) -> &Survey {
        &self.survey
    }

    pub fn store(&self) -> &SurveyStore<S> {
        &self.store
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn state(&self) -> SurveyState {
        self.survey.state()
    }

    pub fn current_index(&self) -> Option<usize> {
        self.survey.current_index()
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.current_index()
            .and_then(|index| self.catalog.question(index))
    }

    pub fn question_count(&self) -> usize {
        self.survey.question_count()
    }

    /// Fraction of questions answered, in `0.0..=1.0`.
    pub fn progress(&self) -> f64 {
        self.survey.progress()
    }

    pub fn is_answered(&self, index: usize) -> bool {
        self.survey.is_answered(index)
    }

    pub fn selected(&self, index: usize) -> Option<Rating> {
        self.survey.selected(index)
    }

    pub fn can_go_prev(&self) -> bool {
        self.survey.can_go_prev()
    }

    pub fn can_go_next(&self) -> bool {
        self.survey.can_go_next()
    }

    /// Submit is offered on the last question.
    pub fn can_submit(&self) -> bool {
        self.survey.is_last_question()
    }

    /// Ranked scores of the live answers.
    pub fn scores(&self) -> Vec<CategoryScore> {
        scoring::score(self.survey.answers().as_slice(), self.catalog.categories())
    }

    /// Past results, most recent first.
    pub fn history(&self) -> &[HistoryEntry] {
        self.history.list()
    }

    pub fn history_entry(&self, id: i64) -> Option<&HistoryEntry> {
        self.history.get(id)
    }

    // Mutators

    /// Rate question `index` and save progress.
    pub fn select_rating(&mut self, index: usize, value: i64) -> Result<(), SessionError> {
        if self.survey.select_rating(index, value)? {
            self.save_progress()?;
        }
        Ok(())
    }

    /// Rate the current question and save progress.
    pub fn select_current(&mut self, value: i64) -> Result<(), SessionError> {
        if self.survey.select_current(value)? {
            self.save_progress()?;
        }
        Ok(())
    }

    pub fn go_to(&mut self, index: usize) -> bool {
        self.survey.go_to(index)
    }

    pub fn next(&mut self) -> bool {
        self.survey.next()
    }

    pub fn prev(&mut self) -> bool {
        self.survey.prev()
    }

    /// Write the current answers and position. No-op once submitted.
    pub fn save_progress(&mut self) -> Result<(), SessionError> {
        let Some(current) = self.survey.current_index() else {
            return Ok(());
        };
        let now = (self.clock)();
        self.store
            .save_progress(self.survey.answers(), current, now)?;
        Ok(())
    }

    /// Validate and submit the live answers.
    ///
    /// The new history entry is written first; only once it is stored does
    /// the survey lock and the view switch to [`View::Results`]. If
    /// validation or the history write fails, nothing changes and the
    /// submission can be retried. A failure to delete the progress snapshot
    /// afterwards is only logged: the result is already recorded, and the
    /// leftover answers reopen as a finished but unsubmitted survey.
    pub fn submit(&mut self) -> Result<HistoryEntry, SessionError> {
        let scores = self.survey.check_submission(self.catalog.categories())?;
        let ratings = self.survey.answers().as_slice().to_vec();
        let now = (self.clock)();

        let mut history = self.history.clone();
        let entry = history.record(scores, ratings, now);
        self.store.save_history(&history)?;

        self.history = history;
        self.survey.submit(self.catalog.categories())?;
        self.view = View::Results;

        if let Err(_e) = self.store.clear_progress() {
            warn!(error = %_e, "could not clear progress after submit");
        }

        info!(
            id = entry.id,
            top = entry.top_category().map(|s| s.name.as_str()).unwrap_or(""),
            "survey submitted"
        );
        Ok(entry)
    }

    /// Clear the live answers and return to the first question. History is
    /// kept.
    ///
    /// The progress snapshot is overwritten with the empty state, which is
    /// never restored on open.
    pub fn restart(&mut self) -> Result<(), SessionError> {
        self.survey.restart();
        self.view = View::Survey;
        self.save_progress()?;
        debug!("survey restarted");
        Ok(())
    }

    /// Show the list of past results.
    pub fn show_history(&mut self) {
        self.view = View::History;
    }

    /// Show one past result without touching the live answers.
    pub fn show_history_entry(&mut self, id: i64) -> Result<&HistoryEntry, SessionError> {
        let entry = self
            .history
            .get(id)
            .ok_or(SessionError::HistoryEntryNotFound(id))?;
        self.view = View::HistoryEntry(id);
        Ok(entry)
    }

    /// Leave the history views, back to the results of the live submission
    /// or to the current question.
    pub fn hide_history(&mut self) {
        self.view = if self.survey.is_submitted() {
            View::Results
        } else {
            View::Survey
        };
    }

    /// Delete every past result. Callers confirm with the user first.
    pub fn clear_history(&mut self) -> Result<(), SessionError> {
        self.history.clear();
        self.store.clear_history()?;
        if matches!(self.view, View::HistoryEntry(_)) {
            self.view = View::History;
        }
        info!("history cleared");
        Ok(())
    }

    pub fn set_theme(&mut self, theme: Theme) -> Result<(), SessionError> {
        self.theme = theme;
        self.store.save_theme(theme)?;
        Ok(())
    }

    pub fn toggle_theme(&mut self) -> Result<Theme, SessionError> {
        let theme = self.theme.toggled();
        self.set_theme(theme)?;
        Ok(theme)
    }

    /// Give back the storage backend.
    pub fn into_storage(self) -> S {
        self.store.into_inner()
    }
}
