//! The question cursor between CLI invocations.
//!
//! Each command runs in a fresh process. A session only resumes its
//! position from a progress snapshot that holds at least one answer, so
//! `goto 4` on an untouched survey would otherwise be forgotten before the
//! next `answer`. The CLI keeps its own cursor under [`CURSOR_KEY`] and
//! reapplies it after opening the session.

use crate::logging::{debug, warn};
use crate::session::Session;
use crate::storage::{Storage, StorageError};

/// Key holding the 0-based index of the question the CLI is on.
pub const CURSOR_KEY: &str = "cli-cursor";

/// The saved cursor, or `None` if absent or unreadable.
pub fn load<S: Storage>(storage: &S) -> Result<Option<usize>, StorageError> {
    let Some(raw) = storage.get(CURSOR_KEY)? else {
        return Ok(None);
    };
    match raw.trim().parse() {
        Ok(index) => Ok(Some(index)),
        Err(_e) => {
            warn!(value = %raw, error = %_e, "ignoring malformed cursor");
            Ok(None)
        }
    }
}

/// Remember `index`, or forget the cursor when there is no current
/// question (the survey is submitted).
pub fn save<S: Storage>(storage: &mut S, index: Option<usize>) -> Result<(), StorageError> {
    match index {
        Some(index) => storage.set(CURSOR_KEY, &index.to_string()),
        None => storage.delete(CURSOR_KEY),
    }
}

/// Move `session` to the saved cursor. Out-of-range cursors (from another
/// catalog) are ignored.
pub fn restore<S: Storage>(session: &mut Session<S>, cursor: Option<usize>) {
    if let Some(index) = cursor
        && session.go_to(index)
    {
        debug!(index = index, "cursor restored");
    }
}
