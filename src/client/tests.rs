//! Client Module Tests
//!
//! ## Test Scopes
//! - **Debouncer**: Only settled queries are looked up; superseded ones are cancelled.
//! - **HTTP Client**: Round trips against a real router bound to an ephemeral port.

#[cfg(test)]
mod tests {
    use crate::client::debounce::{SuggestDebouncer, Suggestions, publish_if_current};
    use crate::client::http::{ClientError, DictionaryClient};
    use crate::entries::memory::MemoryEntryStore;
    use crate::entries::types::EntryPatch;
    use crate::lookup::router::build_router;
    use crate::lookup::service::LookupService;
    use crate::lookup::types::AddRequest;
    use std::sync::atomic::AtomicU64;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    fn recording_debouncer(delay: Duration) -> (SuggestDebouncer, Arc<Mutex<Vec<String>>>) {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let recorded = calls.clone();
        let debouncer = SuggestDebouncer::new(delay, move |query: String| {
            let recorded = recorded.clone();
            async move {
                recorded.lock().unwrap().push(query.clone());
                vec![format!("{}-hit", query)]
            }
        });
        (debouncer, calls)
    }

    // ============================================================
    // DEBOUNCER
    // ============================================================

    #[tokio::test(start_paused = true)]
    async fn test_debouncer_looks_up_only_the_settled_query() {
        let (debouncer, calls) = recording_debouncer(Duration::from_millis(300));
        let mut rx = debouncer.subscribe();

        debouncer.push("c");
        debouncer.push("ca");
        debouncer.push("cat");
        rx.changed().await.unwrap();

        assert_eq!(
            *rx.borrow(),
            Suggestions {
                query: "cat".to_string(),
                words: vec!["cat-hit".to_string()],
            }
        );
        assert_eq!(*calls.lock().unwrap(), vec!["cat".to_string()]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_debouncer_pauses_longer_than_window_each_trigger_lookup() {
        let (debouncer, calls) = recording_debouncer(Duration::from_millis(300));

        debouncer.push("ca");
        tokio::time::sleep(Duration::from_millis(400)).await;
        debouncer.push("car");
        tokio::time::sleep(Duration::from_millis(400)).await;

        assert_eq!(
            *calls.lock().unwrap(),
            vec!["ca".to_string(), "car".to_string()]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_debouncer_blank_query_clears_without_lookup() {
        let (debouncer, calls) = recording_debouncer(Duration::from_millis(300));
        let rx = debouncer.subscribe();

        debouncer.push("ca");
        debouncer.push("   ");
        tokio::time::sleep(Duration::from_millis(400)).await;

        assert!(calls.lock().unwrap().is_empty());
        assert!(rx.borrow().words.is_empty());
    }

    #[test]
    fn test_superseded_lookup_does_not_publish() {
        let (results, rx) = tokio::sync::watch::channel(Suggestions::default());
        let generation = AtomicU64::new(2);
        let stale = Suggestions {
            query: "ca".to_string(),
            words: vec!["cat".to_string()],
        };
        let fresh = Suggestions {
            query: "cab".to_string(),
            words: vec!["cabin".to_string()],
        };

        assert!(!publish_if_current(&results, &generation, 1, stale));
        assert_eq!(*rx.borrow(), Suggestions::default());

        assert!(publish_if_current(&results, &generation, 2, fresh.clone()));
        assert_eq!(*rx.borrow(), fresh);
    }

    // ============================================================
    // HTTP CLIENT
    // ============================================================

    async fn spawn_server() -> DictionaryClient {
        let service = LookupService::new(Arc::new(MemoryEntryStore::new()));
        let app = build_router(Arc::new(service));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        DictionaryClient::new(&addr.to_string())
    }

    #[tokio::test]
    async fn test_client_add_define_suggest() {
        let client = spawn_server().await;

        let added = client
            .add(&AddRequest {
                language: Some("English".to_string()),
                ..AddRequest::new("Harbor", "a sheltered port")
            })
            .await
            .unwrap();
        client
            .add(&AddRequest::new("harvest", "the gathering of crops"))
            .await
            .unwrap();

        let defined = client.define(" HARBOR ").await.unwrap();
        let suggestions = client.suggest("har").await.unwrap();

        assert_eq!(defined, Some(added));
        assert_eq!(suggestions, vec!["harbor", "harvest"]);
    }

    #[tokio::test]
    async fn test_client_define_missing_is_none() {
        let client = spawn_server().await;

        assert_eq!(client.define("nothing").await.unwrap(), None);
        assert_eq!(client.define("  ").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_client_define_on_wrong_base_path_is_error() {
        let server = spawn_server().await;
        let client = DictionaryClient::new(&format!("{}/nope", server.base_url()));

        let result = client.define("anything").await;

        assert!(matches!(result, Err(ClientError::Api { status: 404, .. })));
    }

    #[tokio::test]
    async fn test_client_surfaces_api_errors() {
        let client = spawn_server().await;
        client
            .add(&AddRequest::new("unique", "one of a kind"))
            .await
            .unwrap();

        let conflict = client.add(&AddRequest::new("Unique", "again")).await;
        let missing = client.delete("absent").await;
        let invalid = client.add(&AddRequest::new("word", " ")).await;

        assert!(matches!(conflict, Err(ClientError::Api { status: 409, .. })));
        assert_eq!(missing.unwrap_err().kind(), Some("not_found"));
        assert_eq!(invalid.unwrap_err().kind(), Some("invalid_input"));
    }

    #[tokio::test]
    async fn test_client_update_and_delete() {
        let client = spawn_server().await;
        client
            .add(&AddRequest::new("ember", "a glowing coal"))
            .await
            .unwrap();

        let updated = client
            .update(
                "Ember",
                &EntryPatch {
                    added_by: Some("poet".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        let deleted = client.delete("ember").await.unwrap();

        assert_eq!(updated.added_by, "poet");
        assert_eq!(deleted, "ember");
        assert_eq!(client.define("ember").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_client_debouncer_against_server() {
        let client = spawn_server().await;
        for word in ["lime", "limit", "limb"] {
            client.add(&AddRequest::new(word, "m")).await.unwrap();
        }
        let debouncer = SuggestDebouncer::for_client(client, Duration::from_millis(20));
        let mut rx = debouncer.subscribe();

        debouncer.push("li");
        debouncer.push("lim");
        rx.changed().await.unwrap();

        let settled = rx.borrow().clone();
        assert_eq!(settled.query, "lim");
        assert_eq!(settled.words, vec!["limb", "lime", "limit"]);
    }
}
