//! Answer store and navigation state machine.
//!
//! A [`Survey`] is either in progress (with a current question) or
//! submitted. All mutators are no-ops once submitted, until
//! [`Survey::restart`].

use thiserror::Error;

use crate::catalog::Category;
use crate::logging::{debug, trace};
use crate::rating::Rating;
use crate::scoring::{self, CategoryScore};

/// How many missing question numbers a user-facing message lists.
pub const MISSING_PREVIEW_LEN: usize = 10;

/// Errors from survey operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SurveyError {
    #[error("Question index {index} out of range (survey has {count} questions)")]
    QuestionOutOfRange { index: usize, count: usize },

    #[error("Survey already submitted")]
    AlreadySubmitted,

    #[error(transparent)]
    Incomplete(#[from] IncompleteSubmission),
}

/// Submission rejected because some questions are unanswered.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Please answer every question before submitting. Unanswered: {}", preview(.missing))]
pub struct IncompleteSubmission {
    missing: Vec<usize>,
}

impl IncompleteSubmission {
    /// All unanswered question numbers (1-based, ascending).
    pub fn missing(&self) -> &[usize] {
        &self.missing
    }

    /// The first [`MISSING_PREVIEW_LEN`] missing numbers.
    pub fn shown(&self) -> &[usize] {
        let end = self.missing.len().min(MISSING_PREVIEW_LEN);
        self.missing.get(..end).unwrap_or_default()
    }

    /// Whether [`shown`](Self::shown) leaves some numbers out.
    pub fn is_truncated(&self) -> bool {
        self.missing.len() > MISSING_PREVIEW_LEN
    }

    /// `"2, 3, 4"`, or the first ten followed by `"..."` when truncated.
    pub fn preview(&self) -> String {
        preview(&self.missing)
    }
}

fn preview(missing: &[usize]) -> String {
    let mut text = missing
        .iter()
        .take(MISSING_PREVIEW_LEN)
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    if missing.len() > MISSING_PREVIEW_LEN {
        text.push_str("...");
    }
    text
}

/// Fixed-length answer slots, one per question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Answers {
    slots: Vec<Option<Rating>>,
}

impl Answers {
    /// `len` unset slots.
    pub fn new(len: usize) -> Self {
        Self {
            slots: vec![None; len],
        }
    }

    pub fn from_slots(slots: Vec<Option<Rating>>) -> Self {
        Self { slots }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<Rating> {
        self.slots.get(index).copied().flatten()
    }

    pub fn as_slice(&self) -> &[Option<Rating>] {
        &self.slots
    }

    pub fn answered_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn is_complete(&self) -> bool {
        self.slots.iter().all(Option::is_some)
    }

    /// 1-based numbers of unanswered questions, ascending.
    pub fn unanswered(&self) -> Vec<usize> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.is_none())
            .map(|(index, _)| index + 1)
            .collect()
    }

    fn set(&mut self, index: usize, rating: Rating) -> Result<(), SurveyError> {
        let count = self.slots.len();
        let slot = self
            .slots
            .get_mut(index)
            .ok_or(SurveyError::QuestionOutOfRange { index, count })?;
        *slot = Some(rating);
        Ok(())
    }

    fn reset(&mut self) {
        self.slots.iter_mut().for_each(|slot| *slot = None);
    }
}

/// Where the survey is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurveyState {
    InProgress { current: usize },
    Submitted,
}

/// Ratings plus navigation for one pass through the questionnaire.
#[derive(Debug, Clone)]
pub struct Survey {
    answers: Answers,
    state: SurveyState,
}

impl Survey {
    /// Fresh survey over `question_count` questions, positioned at the first.
    pub fn new(question_count: usize) -> Self {
        Self {
            answers: Answers::new(question_count),
            state: SurveyState::InProgress { current: 0 },
        }
    }

    /// Resume from saved answers. A current index past the end falls back
    /// to the first question.
    pub fn resume(answers: Answers, current: usize) -> Self {
        let current = if current < answers.len() { current } else { 0 };
        Self {
            answers,
            state: SurveyState::InProgress { current },
        }
    }

    pub fn state(&self) -> SurveyState {
        self.state
    }

    pub fn is_submitted(&self) -> bool {
        self.state == SurveyState::Submitted
    }

    pub fn answers(&self) -> &Answers {
        &self.answers
    }

    pub fn question_count(&self) -> usize {
        self.answers.len()
    }

    /// Current question, or `None` once submitted.
    pub fn current_index(&self) -> Option<usize> {
        match self.state {
            SurveyState::InProgress { current } => Some(current),
            SurveyState::Submitted => None,
        }
    }

    pub fn is_answered(&self, index: usize) -> bool {
        self.answers.get(index).is_some()
    }

    pub fn selected(&self, index: usize) -> Option<Rating> {
        self.answers.get(index)
    }

    /// Fraction of questions answered, in `0.0..=1.0`.
    pub fn progress(&self) -> f64 {
        if self.answers.is_empty() {
            return 0.0;
        }
        self.answers.answered_count() as f64 / self.answers.len() as f64
    }

    pub fn can_go_prev(&self) -> bool {
        matches!(self.state, SurveyState::InProgress { current } if current > 0)
    }

    pub fn can_go_next(&self) -> bool {
        matches!(self.state, SurveyState::InProgress { current } if current + 1 < self.question_count())
    }

    /// On the last question the front end offers submit instead of next.
    pub fn is_last_question(&self) -> bool {
        matches!(self.state, SurveyState::InProgress { current } if current + 1 == self.question_count())
    }

    /// Set the rating for question `index`, clamping `value` to the rating
    /// range.
    ///
    /// Returns `Ok(true)` when the answer store changed and `Ok(false)` when
    /// the survey is already submitted.
    pub fn select_rating(&mut self, index: usize, value: i64) -> Result<bool, SurveyError> {
        if self.is_submitted() {
            trace!(index = index, "ignoring rating on submitted survey");
            return Ok(false);
        }
        let rating = Rating::clamped(value);
        self.answers.set(index, rating)?;
        debug!(index = index, rating = rating.value(), "rating selected");
        Ok(true)
    }

    /// [`select_rating`](Self::select_rating) on the current question.
    pub fn select_current(&mut self, value: i64) -> Result<bool, SurveyError> {
        match self.state {
            SurveyState::InProgress { current } => self.select_rating(current, value),
            SurveyState::Submitted => Ok(false),
        }
    }

    /// Jump to question `index`. Out-of-range targets are ignored.
    ///
    /// Returns whether the current question changed.
    pub fn go_to(&mut self, index: usize) -> bool {
        let SurveyState::InProgress { current } = self.state else {
            return false;
        };
        if index >= self.question_count() {
            trace!(index = index, "ignoring out-of-range navigation");
            return false;
        }
        self.state = SurveyState::InProgress { current: index };
        current != index
    }

    pub fn next(&mut self) -> bool {
        match self.state {
            SurveyState::InProgress { current } if current + 1 < self.question_count() => {
                self.go_to(current + 1)
            }
            _ => false,
        }
    }

    pub fn prev(&mut self) -> bool {
        match self.state {
            SurveyState::InProgress { current } if current > 0 => self.go_to(current - 1),
            _ => false,
        }
    }

    /// Validate completeness and rank the categories without locking.
    pub fn check_submission(&self, categories: &[Category]) -> Result<Vec<CategoryScore>, SurveyError> {
        if self.is_submitted() {
            return Err(SurveyError::AlreadySubmitted);
        }
        let missing = self.answers.unanswered();
        if !missing.is_empty() {
            debug!(missing = missing.len(), "submission rejected");
            return Err(IncompleteSubmission { missing }.into());
        }
        Ok(scoring::score(self.answers.as_slice(), categories))
    }

    /// Validate completeness, then lock the survey and rank the categories.
    pub fn submit(&mut self, categories: &[Category]) -> Result<Vec<CategoryScore>, SurveyError> {
        let scores = self.check_submission(categories)?;
        self.state = SurveyState::Submitted;
        Ok(scores)
    }

    /// Clear every answer and go back to the first question.
    pub fn restart(&mut self) {
        self.answers.reset();
        self.state = SurveyState::InProgress { current: 0 };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn categories(count: usize) -> Vec<Category> {
        (0..count)
            .map(|i| Category {
                name: format!("gift-{i}"),
                description: None,
            })
            .collect()
    }

    fn answered(count: usize, value: i64) -> Survey {
        let mut survey = Survey::new(count);
        for index in 0..count {
            survey.select_rating(index, value).unwrap();
        }
        survey
    }

    #[test]
    fn test_initial_state() {
        let survey = Survey::new(125);
        assert_eq!(survey.state(), SurveyState::InProgress { current: 0 });
        assert_eq!(survey.answers().answered_count(), 0);
        assert!(!survey.can_go_prev());
        assert!(survey.can_go_next());
        assert!(!survey.is_last_question());
        assert_eq!(survey.progress(), 0.0);
    }

    #[test]
    fn test_select_rating() {
        let mut survey = Survey::new(4);
        assert_eq!(survey.select_rating(2, 3), Ok(true));
        assert_eq!(survey.selected(2).map(Rating::value), Some(3));
        assert!(survey.is_answered(2));
        assert!(!survey.is_answered(1));
        assert_eq!(survey.progress(), 0.25);
    }

    #[test]
    fn test_select_rating_clamps() {
        let mut survey = Survey::new(2);
        survey.select_rating(0, 9).unwrap();
        survey.select_rating(1, -1).unwrap();
        assert_eq!(survey.selected(0).map(Rating::value), Some(3));
        assert_eq!(survey.selected(1).map(Rating::value), Some(0));
    }

    #[test]
    fn test_select_rating_out_of_range() {
        let mut survey = Survey::new(2);
        assert_eq!(
            survey.select_rating(2, 1),
            Err(SurveyError::QuestionOutOfRange { index: 2, count: 2 })
        );
        assert_eq!(survey.answers().answered_count(), 0);
    }

    #[test]
    fn test_select_current() {
        let mut survey = Survey::new(3);
        survey.go_to(1);
        survey.select_current(2).unwrap();
        assert_eq!(survey.selected(1).map(Rating::value), Some(2));
    }

    #[test]
    fn test_navigation_clamps() {
        let mut survey = Survey::new(3);
        assert!(!survey.prev());
        assert!(survey.next());
        assert!(survey.next());
        assert!(survey.is_last_question());
        assert!(!survey.next());
        assert_eq!(survey.current_index(), Some(2));
        assert!(survey.prev());
        assert_eq!(survey.current_index(), Some(1));
    }

    #[test]
    fn test_go_to_out_of_range_is_ignored() {
        let mut survey = Survey::new(3);
        survey.go_to(1);
        assert!(!survey.go_to(3));
        assert!(!survey.go_to(usize::MAX));
        assert_eq!(survey.current_index(), Some(1));
    }

    #[test]
    fn test_submit_incomplete() {
        let mut survey = Survey::new(5);
        survey.select_rating(0, 1).unwrap();
        survey.select_rating(3, 1).unwrap();
        let err = survey.submit(&categories(1)).unwrap_err();
        let SurveyError::Incomplete(incomplete) = err else {
            panic!("expected incomplete submission");
        };
        assert_eq!(incomplete.missing(), &[2, 3, 5]);
        assert!(!incomplete.is_truncated());
        assert_eq!(incomplete.preview(), "2, 3, 5");
        assert!(!survey.is_submitted());
    }

    #[test]
    fn test_missing_preview_truncates() {
        let mut survey = Survey::new(125);
        survey.select_rating(0, 2).unwrap();
        let Err(SurveyError::Incomplete(incomplete)) = survey.submit(&categories(25)) else {
            panic!("expected incomplete submission");
        };
        assert_eq!(incomplete.missing().len(), 124);
        assert_eq!(incomplete.shown(), &[2, 3, 4, 5, 6, 7, 8, 9, 10, 11]);
        assert!(incomplete.is_truncated());
        assert_eq!(incomplete.preview(), "2, 3, 4, 5, 6, 7, 8, 9, 10, 11...");
    }

    #[test]
    fn test_submit_complete_locks_survey() {
        let mut survey = answered(25, 2);
        let scores = survey.submit(&categories(25)).unwrap();
        assert_eq!(scores.len(), 25);
        assert!(survey.is_submitted());
        assert_eq!(survey.current_index(), None);

        assert_eq!(survey.select_rating(0, 0), Ok(false));
        assert_eq!(survey.selected(0).map(Rating::value), Some(2));
        assert!(!survey.go_to(3));
        assert!(!survey.next());
        assert!(!survey.prev());
        assert_eq!(
            survey.submit(&categories(25)),
            Err(SurveyError::AlreadySubmitted)
        );
    }

    #[test]
    fn test_check_submission_does_not_lock() {
        let mut survey = answered(3, 1);
        let scores = survey.check_submission(&categories(3)).unwrap();
        assert!(!survey.is_submitted());
        assert_eq!(survey.submit(&categories(3)), Ok(scores));
    }

    #[test]
    fn test_restart() {
        let mut survey = answered(4, 3);
        survey.submit(&categories(4)).unwrap();
        survey.restart();
        assert_eq!(survey.state(), SurveyState::InProgress { current: 0 });
        assert_eq!(survey.answers().answered_count(), 0);
        assert_eq!(survey.question_count(), 4);
    }

    #[test]
    fn test_resume_resets_bad_index() {
        let answers = Answers::from_slots(vec![Some(Rating::clamped(1)), None]);
        let survey = Survey::resume(answers.clone(), 1);
        assert_eq!(survey.current_index(), Some(1));
        let survey = Survey::resume(answers, 7);
        assert_eq!(survey.current_index(), Some(0));
    }
}
