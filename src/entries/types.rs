//! Word Entry Types
//!
//! The persisted `WordEntry` record plus the input shapes used to create and patch it.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::store::StoreError;

/// Language recorded when the contributor does not name one.
pub const DEFAULT_LANGUAGE: &str = "unknown";
/// Contributor recorded when the caller stays anonymous.
pub const DEFAULT_CONTRIBUTOR: &str = "anonymous";

/// Trims surrounding whitespace and lowercases a word.
///
/// This is the only form in which words are stored, compared or looked up.
pub fn normalize_word(word: &str) -> String {
    word.trim().to_lowercase()
}

/// A single dictionary entry as stored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct WordEntry {
    /// Document id assigned at insert. Never changes afterwards.
    pub id: Uuid,
    /// Normalized word, the storage key.
    pub word: String,
    pub meaning: String,
    pub language: String,
    pub added_by: String,
}

/// Fields supplied when creating an entry.
///
/// `language` and `added_by` fall back to their defaults when absent or blank.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEntry {
    pub word: String,
    pub meaning: String,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub added_by: Option<String>,
}

impl NewEntry {
    pub fn new(word: impl Into<String>, meaning: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            meaning: meaning.into(),
            language: None,
            added_by: None,
        }
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    pub fn with_added_by(mut self, added_by: impl Into<String>) -> Self {
        self.added_by = Some(added_by.into());
        self
    }

    /// Validates the input and builds the record that will be stored.
    pub fn into_entry(self) -> Result<WordEntry, StoreError> {
        let word = normalize_word(&self.word);
        if word.is_empty() {
            return Err(StoreError::InvalidInput("word is required".to_string()));
        }
        let meaning = self.meaning.trim();
        if meaning.is_empty() {
            return Err(StoreError::InvalidInput("meaning is required".to_string()));
        }

        Ok(WordEntry {
            id: Uuid::new_v4(),
            word,
            meaning: meaning.to_string(),
            language: non_blank(self.language).unwrap_or_else(|| DEFAULT_LANGUAGE.to_string()),
            added_by: non_blank(self.added_by).unwrap_or_else(|| DEFAULT_CONTRIBUTOR.to_string()),
        })
    }
}

/// A partial update. `None` leaves the stored field unchanged.
///
/// The word itself is the key and cannot be changed through a patch.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EntryPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meaning: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub added_by: Option<String>,
}

impl EntryPatch {
    pub fn is_empty(&self) -> bool {
        self.meaning.is_none() && self.language.is_none() && self.added_by.is_none()
    }

    /// Applies the supplied fields to `entry`.
    ///
    /// Validation runs before anything is written, so a rejected patch leaves `entry` untouched.
    pub fn apply(&self, entry: &mut WordEntry) -> Result<(), StoreError> {
        let meaning = match &self.meaning {
            Some(meaning) if meaning.trim().is_empty() => {
                return Err(StoreError::InvalidInput("meaning cannot be empty".to_string()));
            }
            Some(meaning) => Some(meaning.trim().to_string()),
            None => None,
        };

        if let Some(meaning) = meaning {
            entry.meaning = meaning;
        }
        if let Some(language) = non_blank(self.language.clone()) {
            entry.language = language;
        }
        if let Some(added_by) = non_blank(self.added_by.clone()) {
            entry.added_by = added_by;
        }
        Ok(())
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
