use super::store::{EntryStore, StoreError};
use super::types::{EntryPatch, NewEntry, WordEntry, normalize_word};

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use std::collections::BTreeSet;
use std::fs;
use std::ops::Bound;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// In-memory entry store with an ordered prefix index and optional JSON snapshot.
///
/// Entries live in a sharded `DashMap` keyed by normalized word. The uniqueness check
/// and the write of an insert run under the same shard lock, which makes the map itself
/// the authoritative unique constraint.
///
/// With a snapshot attached, each mutation holds the snapshot write lock from the map
/// change through the file write and any rollback, so a snapshot never captures another
/// writer's uncommitted change.
pub struct MemoryEntryStore {
    entries: DashMap<String, WordEntry>,
    prefix_index: RwLock<BTreeSet<String>>,
    snapshot: Option<SnapshotFile>,
}

struct SnapshotFile {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl MemoryEntryStore {
    /// Creates an empty store that lives only in memory.
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
            prefix_index: RwLock::new(BTreeSet::new()),
            snapshot: None,
        }
    }

    /// Opens a store backed by the snapshot file at `path`.
    ///
    /// A missing file starts an empty store; the file is created on the first write.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let mut store = Self::new();

        if path.exists() {
            let bytes = fs::read(&path).map_err(|e| {
                StoreError::Unavailable(format!("failed to read {}: {}", path.display(), e))
            })?;
            let entries: Vec<WordEntry> = serde_json::from_slice(&bytes).map_err(|e| {
                StoreError::Unavailable(format!("corrupt snapshot {}: {}", path.display(), e))
            })?;
            store.restore(entries)?;
            tracing::info!(
                "Loaded {} entries from snapshot {}",
                store.entries.len(),
                path.display()
            );
        } else {
            tracing::info!("No snapshot at {}, starting empty", path.display());
        }

        store.snapshot = Some(SnapshotFile {
            path,
            write_lock: Mutex::new(()),
        });
        Ok(store)
    }

    /// Loads entries into an empty store, re-normalizing their keys.
    fn restore(&self, entries: Vec<WordEntry>) -> Result<(), StoreError> {
        for mut entry in entries {
            entry.word = normalize_word(&entry.word);
            if entry.word.is_empty() || entry.meaning.trim().is_empty() {
                return Err(StoreError::Unavailable(
                    "snapshot contains an entry without word or meaning".to_string(),
                ));
            }
            match self.entries.entry(entry.word.clone()) {
                Entry::Occupied(_) => {
                    return Err(StoreError::Unavailable(format!(
                        "snapshot contains duplicate word '{}'",
                        entry.word
                    )));
                }
                Entry::Vacant(slot) => {
                    self.index_write().insert(entry.word.clone());
                    slot.insert(entry);
                }
            }
        }
        Ok(())
    }

    /// Returns every stored entry, ordered by word.
    pub fn dump(&self) -> Vec<WordEntry> {
        let mut entries: Vec<WordEntry> = self
            .entries
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        entries.sort_by(|a, b| a.word.cmp(&b.word));
        entries
    }

    pub fn snapshot_path(&self) -> Option<&Path> {
        self.snapshot.as_ref().map(|s| s.path.as_path())
    }

    /// Serializes mutations while a snapshot is attached. Pure in-memory stores skip it.
    fn write_guard(&self) -> Option<MutexGuard<'_, ()>> {
        self.snapshot.as_ref().map(|snapshot| {
            snapshot
                .write_lock
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
        })
    }

    /// Rewrites the snapshot. Callers must hold the guard from `write_guard`.
    fn persist(&self) -> Result<(), StoreError> {
        let Some(snapshot) = &self.snapshot else {
            return Ok(());
        };

        let bytes = serde_json::to_vec_pretty(&self.dump())
            .map_err(|e| StoreError::Unavailable(format!("failed to encode snapshot: {}", e)))?;

        let tmp_path = snapshot.path.with_extension("tmp");
        fs::write(&tmp_path, bytes)
            .and_then(|_| fs::rename(&tmp_path, &snapshot.path))
            .map_err(|e| {
                tracing::error!("Failed to write snapshot {}: {}", snapshot.path.display(), e);
                if tmp_path.exists() {
                    let _ = fs::remove_file(&tmp_path);
                }
                StoreError::Unavailable(format!(
                    "failed to write {}: {}",
                    snapshot.path.display(),
                    e
                ))
            })
    }

    fn index_read(&self) -> RwLockReadGuard<'_, BTreeSet<String>> {
        self.prefix_index
            .read()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn index_write(&self) -> RwLockWriteGuard<'_, BTreeSet<String>> {
        self.prefix_index
            .write()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for MemoryEntryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl EntryStore for MemoryEntryStore {
    fn insert(&self, entry: NewEntry) -> Result<WordEntry, StoreError> {
        let entry = entry.into_entry()?;
        let key = entry.word.clone();
        let _guard = self.write_guard();

        match self.entries.entry(key.clone()) {
            Entry::Occupied(_) => return Err(StoreError::Conflict(key)),
            Entry::Vacant(slot) => {
                self.index_write().insert(key.clone());
                slot.insert(entry.clone());
            }
        }

        if let Err(e) = self.persist() {
            if let Entry::Occupied(slot) = self.entries.entry(key.clone()) {
                self.index_write().remove(&key);
                slot.remove();
            }
            return Err(e);
        }

        tracing::debug!("Inserted entry '{}'", key);
        Ok(entry)
    }

    fn find_by_word(&self, word: &str) -> Result<Option<WordEntry>, StoreError> {
        let key = normalize_word(word);
        Ok(self.entries.get(&key).map(|entry| entry.value().clone()))
    }

    fn update(&self, word: &str, patch: &EntryPatch) -> Result<Option<WordEntry>, StoreError> {
        let key = normalize_word(word);
        let _guard = self.write_guard();

        let (previous, updated) = match self.entries.get_mut(&key) {
            Some(mut slot) => {
                let previous = slot.value().clone();
                patch.apply(slot.value_mut())?;
                (previous, slot.value().clone())
            }
            None => return Ok(None),
        };

        if let Err(e) = self.persist() {
            if let Some(mut slot) = self.entries.get_mut(&key) {
                *slot = previous;
            }
            return Err(e);
        }

        Ok(Some(updated))
    }

    fn delete(&self, word: &str) -> Result<bool, StoreError> {
        let key = normalize_word(word);
        let _guard = self.write_guard();

        let removed = match self.entries.entry(key.clone()) {
            Entry::Occupied(slot) => {
                self.index_write().remove(&key);
                slot.remove()
            }
            Entry::Vacant(_) => return Ok(false),
        };

        if let Err(e) = self.persist() {
            if let Entry::Vacant(slot) = self.entries.entry(key.clone()) {
                self.index_write().insert(key);
                slot.insert(removed);
            }
            return Err(e);
        }

        Ok(true)
    }

    fn search_by_prefix(&self, prefix: &str, limit: usize) -> Result<Vec<String>, StoreError> {
        let prefix = normalize_word(prefix);
        let index = self.index_read();

        Ok(index
            .range::<str, _>((Bound::Included(prefix.as_str()), Bound::Unbounded))
            .take_while(|word| word.starts_with(&prefix))
            .take(limit)
            .cloned()
            .collect())
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}
