use thiserror::Error;

use super::types::{EntryPatch, NewEntry, WordEntry};

/// Failures reported by an entry store.
///
/// "Not found" is never an error here: lookups return `Ok(None)` and deletes `Ok(false)`.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("invalid entry: {0}")]
    InvalidInput(String),
    #[error("word '{0}' already exists")]
    Conflict(String),
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Keyed storage for word entries, addressed by normalized word.
///
/// Implementations normalize every word argument themselves and must enforce
/// uniqueness atomically inside `insert`.
pub trait EntryStore: Send + Sync + 'static {
    /// Stores a new entry with defaults applied.
    ///
    /// # Returns
    /// * `Err(StoreError::Conflict)` if the normalized word already exists. Nothing is overwritten.
    /// * `Err(StoreError::InvalidInput)` if word or meaning is blank.
    fn insert(&self, entry: NewEntry) -> Result<WordEntry, StoreError>;

    fn find_by_word(&self, word: &str) -> Result<Option<WordEntry>, StoreError>;

    /// Applies `patch` to the entry for `word`. `Ok(None)` if there is no such entry.
    fn update(&self, word: &str, patch: &EntryPatch) -> Result<Option<WordEntry>, StoreError>;

    /// Removes the entry for `word`. `Ok(false)` if there was nothing to remove.
    fn delete(&self, word: &str) -> Result<bool, StoreError>;

    /// Returns up to `limit` stored words starting with the normalized `prefix`.
    fn search_by_prefix(&self, prefix: &str, limit: usize) -> Result<Vec<String>, StoreError>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
