//! Unified error type for the gift-survey library.
//!
//! Each module has its own error enum; [`Error`] wraps all of them so
//! application code can use a single error type.
//!
//! ```ignore
//! use gift_survey::{Catalog, Result, Session};
//! use gift_survey::storage::FjallStore;
//!
//! fn resume() -> Result<()> {
//!     let catalog = Catalog::load("questions.json")?;
//!     let mut session = Session::open(catalog, FjallStore::open(".gift-survey")?)?;
//!     session.select_current(2)?;
//!     Ok(())
//! }
//! ```

use thiserror::Error;

use crate::catalog::CatalogError;
use crate::session::SessionError;
use crate::storage::StorageError;
use crate::survey::SurveyError;

/// Unified error type for all gift-survey operations.
#[derive(Error, Debug)]
pub enum Error {
    /// The question catalog could not be loaded.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// A survey operation was rejected.
    #[error(transparent)]
    Survey(#[from] SurveyError),

    /// The storage backend failed.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// A session operation failed.
    #[error(transparent)]
    Session(#[from] SessionError),
}

/// A [`Result`] type alias using the unified [`Error`] type.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Returns `true` if the catalog failed to load.
    pub fn is_catalog(&self) -> bool {
        matches!(self, Self::Catalog(_))
    }

    /// Returns `true` if this is a storage error, directly or through a
    /// session operation.
    pub fn is_storage(&self) -> bool {
        matches!(
            self,
            Self::Storage(_) | Self::Session(SessionError::Storage(_))
        )
    }

    /// Returns `true` for a submission rejected because of unanswered
    /// questions.
    pub fn is_incomplete(&self) -> bool {
        match self {
            Self::Survey(SurveyError::Incomplete(_)) => true,
            Self::Session(e) => e.is_incomplete(),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification() {
        let err: Error = CatalogError::NoQuestions.into();
        assert!(err.is_catalog());
        assert!(!err.is_storage());

        let err: Error = SessionError::Storage(StorageError::InvalidFormat("x".into())).into();
        assert!(err.is_storage());

        let err: Error = SurveyError::AlreadySubmitted.into();
        assert!(!err.is_incomplete());
    }
}
