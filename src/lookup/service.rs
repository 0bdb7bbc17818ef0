use std::sync::Arc;

use super::error::LookupError;
use super::types::AddRequest;
use crate::entries::store::EntryStore;
use crate::entries::types::{EntryPatch, NewEntry, WordEntry, normalize_word};

/// Queries shorter than this (after trimming) get no suggestions and no storage call.
pub const SUGGEST_MIN_CHARS: usize = 2;
/// Upper bound on the number of suggestions returned.
pub const SUGGEST_LIMIT: usize = 5;

/// Validation and orchestration over an `EntryStore`.
///
/// Holds no state of its own between requests.
pub struct LookupService<S> {
    store: Arc<S>,
}

impl<S: EntryStore> LookupService<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Creates a new entry.
    ///
    /// # Returns
    /// * `InvalidInput` if word or meaning is missing or blank.
    /// * `Conflict` if the normalized word already exists. The stored entry is untouched.
    pub fn add(&self, req: AddRequest) -> Result<WordEntry, LookupError> {
        let (Some(word), Some(meaning)) = (required(&req.word), required(&req.meaning)) else {
            return Err(LookupError::InvalidInput(
                "word and meaning are required".to_string(),
            ));
        };

        let key = normalize_word(word);
        if self.store.find_by_word(&key)?.is_some() {
            tracing::debug!("Rejected duplicate word '{}'", key);
            return Err(LookupError::Conflict(key));
        }

        // The store re-checks uniqueness under its own lock, so a concurrent add
        // that slipped past the check above still ends in Conflict.
        let entry = self.store.insert(NewEntry {
            word: key,
            meaning: meaning.to_string(),
            language: req.language,
            added_by: req.added_by,
        })?;

        tracing::info!("Added word '{}' ({})", entry.word, entry.language);
        Ok(entry)
    }

    pub fn define(&self, word: &str) -> Result<WordEntry, LookupError> {
        let key = normalize_word(word);
        if key.is_empty() {
            return Err(LookupError::NotFound(key));
        }
        tracing::debug!("Define '{}'", key);

        self.store
            .find_by_word(&key)?
            .ok_or(LookupError::NotFound(key))
    }

    pub fn update(&self, word: &str, patch: &EntryPatch) -> Result<WordEntry, LookupError> {
        let key = normalize_word(word);
        if key.is_empty() {
            return Err(LookupError::NotFound(key));
        }

        let entry = self
            .store
            .update(&key, patch)?
            .ok_or_else(|| LookupError::NotFound(key.clone()))?;

        tracing::info!("Updated word '{}'", entry.word);
        Ok(entry)
    }

    /// Removes an entry, returning its normalized word.
    pub fn delete(&self, word: &str) -> Result<String, LookupError> {
        let key = normalize_word(word);
        if key.is_empty() || !self.store.delete(&key)? {
            return Err(LookupError::NotFound(key));
        }

        tracing::info!("Deleted word '{}'", key);
        Ok(key)
    }

    /// Returns up to `SUGGEST_LIMIT` words starting with `q`.
    ///
    /// Never fails: short queries and storage errors both yield an empty list.
    pub fn suggest(&self, q: &str) -> Vec<String> {
        let trimmed = q.trim();
        if trimmed.chars().count() < SUGGEST_MIN_CHARS {
            return Vec::new();
        }

        match self
            .store
            .search_by_prefix(&normalize_word(trimmed), SUGGEST_LIMIT)
        {
            Ok(mut words) => {
                words.truncate(SUGGEST_LIMIT);
                words
            }
            Err(e) => {
                tracing::warn!("Suggest for '{}' degraded to empty: {}", trimmed, e);
                Vec::new()
            }
        }
    }

    pub fn entry_count(&self) -> usize {
        self.store.len()
    }
}

fn required(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}
