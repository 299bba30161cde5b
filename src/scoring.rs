//! Category scoring.
//!
//! Questions are laid out in [`ROTATIONS`] passes over the categories: the
//! first 25 questions cover categories 0..25 once, the next 25 cover them
//! again, and so on. Category `g` therefore owns the answers at
//! `g, g + 25, g + 50, g + 75, g + 100`. The stride is a property of the
//! catalog ordering and is not configurable.

use serde::{Deserialize, Serialize};

use crate::catalog::Category;
use crate::rating::Rating;

/// Distance between two questions of the same category.
pub const CATEGORY_STRIDE: usize = 25;

/// Questions per category.
pub const ROTATIONS: usize = 5;

/// Best possible category score (every member question rated `Rating::MAX`).
pub const MAX_CATEGORY_SCORE: u32 = ROTATIONS as u32 * Rating::MAX as u32;

/// Score of one category for one set of answers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryScore {
    pub name: String,
    pub score: u32,
    pub max_score: u32,
    pub percentage: u32,
}

impl CategoryScore {
    /// Build a score, deriving the percentage.
    pub fn new(name: impl Into<String>, score: u32) -> Self {
        Self {
            name: name.into(),
            score,
            max_score: MAX_CATEGORY_SCORE,
            percentage: percentage(score),
        }
    }

    pub fn tier(&self) -> Tier {
        Tier::from_score(self.score)
    }

    pub fn band(&self) -> ScoreBand {
        ScoreBand::from_score(self.score)
    }
}

/// Qualitative bucket for a category score. Lower bounds are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Tier {
    /// `score < 6`
    Low,
    /// `6 <= score < 9`
    Medium,
    /// `9 <= score < 12`
    High,
    /// `score >= 12`
    Top,
}

impl Tier {
    pub fn from_score(score: u32) -> Self {
        match score {
            12.. => Tier::Top,
            9..=11 => Tier::High,
            6..=8 => Tier::Medium,
            _ => Tier::Low,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Tier::Top => "top",
            Tier::High => "high",
            Tier::Medium => "medium",
            Tier::Low => "low",
        }
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coarser three-way band used for the score badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ScoreBand {
    Low,
    Medium,
    High,
}

impl ScoreBand {
    pub fn from_score(score: u32) -> Self {
        match score {
            12.. => ScoreBand::High,
            6..=11 => ScoreBand::Medium,
            _ => ScoreBand::Low,
        }
    }
}

/// `round(score / MAX_CATEGORY_SCORE * 100)`, halves rounded up.
pub fn percentage(score: u32) -> u32 {
    (score * 200 + MAX_CATEGORY_SCORE) / (2 * MAX_CATEGORY_SCORE)
}

/// Answer indices that belong to category `category`, limited to
/// `question_count`.
pub fn member_indices(category: usize, question_count: usize) -> impl Iterator<Item = usize> {
    (0..ROTATIONS)
        .map(move |rotation| category + rotation * CATEGORY_STRIDE)
        .filter(move |&index| index < question_count)
}

/// Raw score of one category. Unset answers count as zero.
pub fn category_total(answers: &[Option<Rating>], category: usize) -> u32 {
    member_indices(category, answers.len())
        .filter_map(|index| answers.get(index).copied().flatten())
        .map(u32::from)
        .sum()
}

/// Score every category and rank them, highest first.
///
/// Ties keep catalog order.
pub fn score(answers: &[Option<Rating>], categories: &[Category]) -> Vec<CategoryScore> {
    let mut scores: Vec<CategoryScore> = categories
        .iter()
        .enumerate()
        .map(|(index, category)| {
            CategoryScore::new(category.name.clone(), category_total(answers, index))
        })
        .collect();

    // `sort_by` is stable.
    scores.sort_by(|a, b| b.score.cmp(&a.score));
    scores
}
