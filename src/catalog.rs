//! Question catalog: the ordered prompts and the categories they score.
//!
//! The catalog is loaded once from a JSON document of the form
//!
//! ```json
//! {
//!   "questions": ["I enjoy ...", "..."],
//!   "spiritualGifts": ["Teaching", "..."],
//!   "giftDefinitions": { "Teaching": "The ability to ..." }
//! }
//! ```
//!
//! Question order is part of the contract: category `g` is scored from the
//! questions at `g`, `g + 25`, `g + 50`, ... (see [`crate::scoring`]).

use std::collections::{HashMap, HashSet};
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::logging::{debug, info};
use crate::scoring::CATEGORY_STRIDE;

/// Errors raised while loading a catalog. All of them are fatal to startup.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to read catalog '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed catalog document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Catalog has no questions")]
    NoQuestions,

    #[error("Catalog has no categories")]
    NoCategories,

    #[error("Duplicate category name: {0}")]
    DuplicateCategory(String),

    #[error("Catalog has {count} categories, at most {max} are supported")]
    TooManyCategories { count: usize, max: usize },
}

/// One prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    /// 0-based position in the catalog.
    pub index: usize,
    pub text: String,
}

impl Question {
    /// 1-based number shown to the user.
    pub fn number(&self) -> usize {
        self.index + 1
    }
}

/// A scored trait ("gift").
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub name: String,
    pub description: Option<String>,
}

/// Raw document shape.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CatalogDocument {
    questions: Vec<String>,
    spiritual_gifts: Vec<String>,
    #[serde(default)]
    gift_definitions: HashMap<String, String>,
}

/// Immutable, validated question catalog.
#[derive(Debug, Clone)]
pub struct Catalog {
    questions: Vec<Question>,
    categories: Vec<Category>,
}

impl Catalog {
    /// Build a catalog from already-parsed parts.
    ///
    /// `definitions` may omit categories; those get no description.
    pub fn new(
        questions: Vec<String>,
        categories: Vec<String>,
        mut definitions: HashMap<String, String>,
    ) -> Result<Self, CatalogError> {
        if questions.is_empty() {
            return Err(CatalogError::NoQuestions);
        }
        if categories.is_empty() {
            return Err(CatalogError::NoCategories);
        }
        if categories.len() > CATEGORY_STRIDE {
            return Err(CatalogError::TooManyCategories {
                count: categories.len(),
                max: CATEGORY_STRIDE,
            });
        }

        let mut seen = HashSet::new();
        for name in &categories {
            if !seen.insert(name.as_str()) {
                return Err(CatalogError::DuplicateCategory(name.clone()));
            }
        }

        let questions = questions
            .into_iter()
            .enumerate()
            .map(|(index, text)| Question { index, text })
            .collect();
        let categories = categories
            .into_iter()
            .map(|name| {
                let description = definitions.remove(&name);
                Category { name, description }
            })
            .collect();

        Ok(Self {
            questions,
            categories,
        })
    }

    /// Parse and validate a catalog document.
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let doc: CatalogDocument = serde_json::from_str(json)?;
        debug!(
            questions = doc.questions.len(),
            categories = doc.spiritual_gifts.len(),
            definitions = doc.gift_definitions.len(),
            "parsed catalog document"
        );
        Self::new(doc.questions, doc.spiritual_gifts, doc.gift_definitions)
    }

    /// Read, parse and validate a catalog file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let catalog = Self::from_json_str(&json)?;
        info!(
            path = %path.display(),
            questions = catalog.question_count(),
            categories = catalog.categories.len(),
            "catalog loaded"
        );
        Ok(catalog)
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn question(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    pub fn question_count(&self) -> usize {
        self.questions.len()
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Look up a category by name.
    pub fn category(&self, name: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.name == name)
    }

    /// Description for a category name, if the catalog defines one.
    pub fn description(&self, name: &str) -> Option<&str> {
        self.category(name).and_then(|c| c.description.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = r#"{
        "questions": ["Q1", "Q2", "Q3"],
        "spiritualGifts": ["Teaching", "Mercy"],
        "giftDefinitions": { "Teaching": "Explaining truth clearly." }
    }"#;

    #[test]
    fn test_parse_document() {
        let catalog = Catalog::from_json_str(DOC).unwrap();
        assert_eq!(catalog.question_count(), 3);
        assert_eq!(catalog.question(2).unwrap().text, "Q3");
        assert_eq!(catalog.question(2).unwrap().number(), 3);
        assert_eq!(catalog.categories().len(), 2);
        assert_eq!(catalog.description("Teaching"), Some("Explaining truth clearly."));
        assert_eq!(catalog.description("Mercy"), None);
        assert!(catalog.category("Prophecy").is_none());
    }

    #[test]
    fn test_missing_definitions_are_allowed() {
        let catalog =
            Catalog::from_json_str(r#"{"questions": ["Q"], "spiritualGifts": ["A"]}"#).unwrap();
        assert_eq!(catalog.description("A"), None);
    }

    #[test]
    fn test_rejects_empty_parts() {
        let err = Catalog::from_json_str(r#"{"questions": [], "spiritualGifts": ["A"]}"#)
            .unwrap_err();
        assert!(matches!(err, CatalogError::NoQuestions));

        let err = Catalog::from_json_str(r#"{"questions": ["Q"], "spiritualGifts": []}"#)
            .unwrap_err();
        assert!(matches!(err, CatalogError::NoCategories));
    }

    #[test]
    fn test_rejects_duplicate_category() {
        let err =
            Catalog::from_json_str(r#"{"questions": ["Q"], "spiritualGifts": ["A", "B", "A"]}"#)
                .unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateCategory(name) if name == "A"));
    }

    #[test]
    fn test_rejects_too_many_categories() {
        let names: Vec<String> = (0..26).map(|i| format!("gift-{i}")).collect();
        let err = Catalog::new(vec!["Q".to_string()], names, HashMap::new()).unwrap_err();
        assert!(matches!(
            err,
            CatalogError::TooManyCategories { count: 26, max: 25 }
        ));
    }

    #[test]
    fn test_malformed_json() {
        let err = Catalog::from_json_str("{\"questions\": 3}").unwrap_err();
        assert!(matches!(err, CatalogError::Json(_)));
    }

    #[test]
    fn test_load_missing_file() {
        let err = Catalog::load("/nonexistent/questions.json").unwrap_err();
        assert!(matches!(err, CatalogError::Io { .. }));
    }
}
