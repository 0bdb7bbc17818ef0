//! Debounced Suggestions
//!
//! Turns a stream of partially typed queries into suggestion lookups. Each new query
//! cancels the pending one; a lookup only runs once a query has been left unchanged for
//! the debounce window.

use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use super::http::DictionaryClient;

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// Type-erased asynchronous suggestion lookup.
pub type SuggestFn =
    Arc<dyn Fn(String) -> Pin<Box<dyn Future<Output = Vec<String>> + Send>> + Send + Sync>;

/// The latest settled suggestions and the query they answer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Suggestions {
    pub query: String,
    pub words: Vec<String>,
}

pub struct SuggestDebouncer {
    delay: Duration,
    lookup: SuggestFn,
    pending: Mutex<Option<JoinHandle<()>>>,
    /// Bumped on every push; a lookup only publishes while its generation is current.
    generation: Arc<AtomicU64>,
    results: Arc<watch::Sender<Suggestions>>,
}

impl SuggestDebouncer {
    pub fn new<F, Fut>(delay: Duration, lookup: F) -> Self
    where
        F: Fn(String) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Vec<String>> + Send + 'static,
    {
        let lookup: SuggestFn = Arc::new(move |query: String| {
            Box::pin(lookup(query)) as Pin<Box<dyn Future<Output = Vec<String>> + Send>>
        });
        let (results, _) = watch::channel(Suggestions::default());

        Self {
            delay,
            lookup,
            pending: Mutex::new(None),
            generation: Arc::new(AtomicU64::new(0)),
            results: Arc::new(results),
        }
    }

    /// Debouncer backed by a server. Request failures show up as no suggestions.
    pub fn for_client(client: DictionaryClient, delay: Duration) -> Self {
        let client = Arc::new(client);
        Self::new(delay, move |query: String| {
            let client = client.clone();
            async move {
                match client.suggest(&query).await {
                    Ok(words) => words,
                    Err(e) => {
                        tracing::warn!("Suggestion request for '{}' failed: {}", query, e);
                        Vec::new()
                    }
                }
            }
        })
    }

    pub fn subscribe(&self) -> watch::Receiver<Suggestions> {
        self.results.subscribe()
    }

    /// Records the current input. Must be called from within a tokio runtime.
    ///
    /// A blank query clears the suggestions immediately.
    pub fn push(&self, query: &str) {
        let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(handle) = pending.take() {
            handle.abort();
        }
        let current = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        if query.trim().is_empty() {
            self.results.send_replace(Suggestions {
                query: query.to_string(),
                words: Vec::new(),
            });
            return;
        }

        let delay = self.delay;
        let lookup = self.lookup.clone();
        let results = self.results.clone();
        let generation = self.generation.clone();
        let query = query.to_string();

        // `abort` cannot stop a task that is already past its last await, hence the
        // generation check at publish time.
        *pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let words = lookup(query.clone()).await;
            publish_if_current(&results, &generation, current, Suggestions { query, words });
        }));
    }
}

/// Publishes `suggestions` unless a newer push has happened since `expected` was taken.
///
/// The check runs under the channel's lock, so a newer push either sees this value and
/// replaces it or makes this call a no-op.
pub(super) fn publish_if_current(
    results: &watch::Sender<Suggestions>,
    generation: &AtomicU64,
    expected: u64,
    suggestions: Suggestions,
) -> bool {
    results.send_if_modified(|latest| {
        if generation.load(Ordering::SeqCst) != expected {
            return false;
        }
        *latest = suggestions;
        true
    })
}

impl Drop for SuggestDebouncer {
    fn drop(&mut self) {
        let pending = self.pending.get_mut().unwrap_or_else(PoisonError::into_inner);
        if let Some(handle) = pending.take() {
            handle.abort();
        }
    }
}
