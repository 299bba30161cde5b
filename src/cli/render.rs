//! Plain-text rendering of session state.

use std::fmt::Write;

use crate::catalog::Catalog;
use crate::history::HistoryEntry;
use crate::rating::Rating;
use crate::scoring::{CategoryScore, ScoreBand, Tier};
use crate::session::Session;
use crate::storage::Storage;
use crate::survey::IncompleteSubmission;

const PROGRESS_BAR_WIDTH: usize = 30;
const NO_DEFINITION: &str = "No definition available";

/// `[#######.......] 12/125 answered`
pub fn progress_bar(answered: usize, total: usize) -> String {
    let filled = if total == 0 {
        0
    } else {
        (answered * PROGRESS_BAR_WIDTH / total).min(PROGRESS_BAR_WIDTH)
    };
    format!(
        "[{}{}] {}/{} answered",
        "#".repeat(filled),
        ".".repeat(PROGRESS_BAR_WIDTH - filled),
        answered,
        total
    )
}

/// The current question with its rating options and navigation hints.
pub fn question<S: Storage>(session: &Session<S>) -> String {
    let Some(question) = session.current_question() else {
        return "Survey submitted. Run `results` to see your ranking or `restart` to begin again.\n"
            .to_string();
    };

    let mut out = String::new();
    let total = session.question_count();
    let answered = session.survey().answers().answered_count();
    let _ = writeln!(out, "Question {} of {}", question.number(), total);
    let _ = writeln!(out, "{}", progress_bar(answered, total));
    let _ = writeln!(out);
    let _ = writeln!(out, "  {}", question.text);
    let _ = writeln!(out);

    let selected = session.selected(question.index);
    let options: Vec<String> = Rating::all()
        .map(|rating| {
            if selected == Some(rating) {
                format!("({})", rating)
            } else {
                format!(" {} ", rating)
            }
        })
        .collect();
    let _ = writeln!(out, "  {}", options.join(" "));

    let mut hints = Vec::new();
    if session.can_go_prev() {
        hints.push("prev");
    }
    if session.can_go_next() {
        hints.push("next");
    }
    if session.can_submit() {
        hints.push("submit");
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "  available: {}", hints.join(", "));
    out
}

/// One line per question number, marking answered and current.
pub fn question_map<S: Storage>(session: &Session<S>) -> String {
    let current = session.current_index();
    let cells: Vec<String> = (0..session.question_count())
        .map(|index| {
            let number = index + 1;
            match (Some(index) == current, session.selected(index)) {
                (true, _) => format!(">{number}<"),
                (false, Some(rating)) => format!("{number}:{rating}"),
                (false, None) => format!("{number}:-"),
            }
        })
        .collect();
    let mut out = String::new();
    for row in cells.chunks(10) {
        let _ = writeln!(out, "{}", row.join("  "));
    }
    out
}

fn tier_marker(tier: Tier) -> &'static str {
    match tier {
        Tier::Top => "***",
        Tier::High => "** ",
        Tier::Medium => "*  ",
        Tier::Low => "   ",
    }
}

fn band_label(band: ScoreBand) -> &'static str {
    match band {
        ScoreBand::High => "high",
        ScoreBand::Medium => "medium",
        ScoreBand::Low => "low",
    }
}

/// Ranked scores with tiers and, optionally, category descriptions.
pub fn ranking(scores: &[CategoryScore], catalog: &Catalog, with_definitions: bool) -> String {
    let mut out = String::new();
    for (rank, score) in scores.iter().enumerate() {
        let _ = writeln!(
            out,
            "{} {:>2}. {:<28} {:>2}/{} ({:>3}%)  [{}, {}]",
            tier_marker(score.tier()),
            rank + 1,
            score.name,
            score.score,
            score.max_score,
            score.percentage,
            score.tier(),
            band_label(score.band()),
        );
        if with_definitions {
            let definition = catalog.description(&score.name).unwrap_or(NO_DEFINITION);
            let _ = writeln!(out, "        {}", definition);
        }
    }
    out
}

/// A past result with its header.
pub fn history_entry(entry: &HistoryEntry, catalog: &Catalog, with_definitions: bool) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Result {} ({})", entry.id, entry.date);
    let _ = writeln!(out);
    out.push_str(&ranking(&entry.category_scores, catalog, with_definitions));
    out
}

/// Summary list of past results.
pub fn history_list(entries: &[HistoryEntry]) -> String {
    if entries.is_empty() {
        return "No saved results.\n".to_string();
    }
    let mut out = String::new();
    for entry in entries {
        let top: Vec<&str> = entry
            .category_scores
            .iter()
            .take(3)
            .map(|score| score.name.as_str())
            .collect();
        let _ = writeln!(out, "{}  {}  top: {}", entry.id, entry.date, top.join(", "));
    }
    out
}

/// User-facing message for a rejected submission.
pub fn incomplete(err: &IncompleteSubmission) -> String {
    format!(
        "{} question(s) unanswered: {}\n",
        err.missing().len(),
        err.preview()
    )
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::storage::MemoryStorage;

    fn catalog() -> Catalog {
        let mut definitions = HashMap::new();
        definitions.insert("Teaching".to_string(), "Explaining clearly.".to_string());
        Catalog::new(
            vec!["First?".to_string(), "Second?".to_string()],
            vec!["Teaching".to_string(), "Mercy".to_string()],
            definitions,
        )
        .unwrap()
    }

    #[test]
    fn test_progress_bar() {
        assert_eq!(
            progress_bar(0, 10),
            format!("[{}] 0/10 answered", ".".repeat(30))
        );
        assert_eq!(
            progress_bar(10, 10),
            format!("[{}] 10/10 answered", "#".repeat(30))
        );
        assert!(progress_bar(0, 0).ends_with("0/0 answered"));
    }

    #[test]
    fn test_question_marks_selection() {
        let mut session = Session::open(catalog(), MemoryStorage::new()).unwrap();
        session.select_current(2).unwrap();
        let text = question(&session);
        assert!(text.starts_with("Question 1 of 2"));
        assert!(text.contains("First?"));
        assert!(text.contains("(2)"));
        assert!(text.contains("available: next"));

        session.next();
        let text = question(&session);
        assert!(text.contains("available: prev, submit"));
    }

    #[test]
    fn test_question_map() {
        let mut session = Session::open(catalog(), MemoryStorage::new()).unwrap();
        session.select_rating(1, 3).unwrap();
        assert_eq!(question_map(&session), ">1<  2:3\n");
    }

    #[test]
    fn test_ranking_with_definitions() {
        let scores = vec![
            CategoryScore::new("Teaching", 12),
            CategoryScore::new("Mercy", 4),
        ];
        let text = ranking(&scores, &catalog(), true);
        assert!(text.contains("12/15 ( 80%)  [top, high]"));
        assert!(text.contains("Explaining clearly."));
        assert!(text.contains(NO_DEFINITION));
    }

    #[test]
    fn test_history_list_empty() {
        assert_eq!(history_list(&[]), "No saved results.\n");
    }
}
