//! Storage Module Tests
//!
//! Validates the document stores and seed loading.
//!
//! ## Test Scopes
//! - **MemoryStore**: id generation, searchable field derivation, ordering and limits.
//! - **Seed**: demo dataset integrity, seed file loading and rejection of bad documents.
//! - **HttpDocumentStore**: reads against a real node bound to a local port, and failures.

#[cfg(test)]
mod tests {
    use crate::routes::build_router;
    use crate::search::engine::search;
    use crate::storage::handlers::handle_list_specimens;
    use crate::storage::memory::MemoryStore;
    use crate::storage::protocol::{CollectionParams, ENDPOINT_BIOBANKS};
    use crate::storage::remote::HttpDocumentStore;
    use crate::storage::seed::{demo_dataset, load_seed_file, parse_seed};
    use crate::storage::types::{Biobank, DocumentStore, Specimen};
    use axum::extract::{Extension, Query};
    use axum::http::StatusCode;
    use axum::routing::get;
    use axum::{Json, Router};
    use std::collections::HashSet;
    use std::net::SocketAddr;
    use std::sync::Arc;
    use std::time::Duration;

    fn test_specimen(id: &str, biobank_id: &str) -> Specimen {
        Specimen {
            id: id.to_string(),
            external_id: format!("EXT-{}", id),
            biobank_id: biobank_id.to_string(),
            specimen_type: "Blood".to_string(),
            diagnosis: "Diabetes Type 2".to_string(),
            gender: "Female".to_string(),
            age_at_collection: 68,
            ethnicity: "Hispanic".to_string(),
            preservation_method: "Frozen".to_string(),
            quantity: "2 mL".to_string(),
            available: true,
            searchable_fields: Vec::new(),
        }
    }

    fn test_biobank(id: &str, name: &str) -> Biobank {
        Biobank {
            id: id.to_string(),
            name: name.to_string(),
            location: "Denver, CO".to_string(),
            institution_type: "Academic".to_string(),
        }
    }

    async fn spawn_server(app: Router) -> SocketAddr {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        addr
    }

    // ============================================================
    // MEMORY STORE TESTS
    // ============================================================

    #[tokio::test]
    async fn test_insert_specimen_generates_missing_id() {
        let store = MemoryStore::new();

        let id = store.insert_specimen(test_specimen("", "bb-1")).await;

        assert!(uuid::Uuid::parse_str(&id).is_ok(), "Expected a UUID, got {}", id);
        assert_eq!(store.specimen_count().await, 1);
    }

    #[tokio::test]
    async fn test_insert_specimen_keeps_given_id() {
        let store = MemoryStore::new();
        assert_eq!(
            store.insert_specimen(test_specimen("spec-9", "bb-1")).await,
            "spec-9"
        );
    }

    #[tokio::test]
    async fn test_concurrent_inserts_and_reads() {
        let store = Arc::new(MemoryStore::new());

        let mut handles = Vec::new();
        for i in 0..20 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                store
                    .insert_specimen(test_specimen(&format!("s{}", i), "bb-1"))
                    .await;
                store.list_specimens(usize::MAX).await.unwrap().len()
            }));
        }
        for handle in handles {
            assert!(handle.await.unwrap() >= 1);
        }

        assert_eq!(store.specimen_count().await, 20);
    }

    #[test]
    fn test_insert_biobank_generates_missing_id() {
        let store = MemoryStore::new();

        let id = store.insert_biobank(test_biobank("", "Front Range Biobank"));

        assert!(uuid::Uuid::parse_str(&id).is_ok());
        assert_eq!(store.get_biobank(&id).unwrap().name, "Front Range Biobank");
        assert_eq!(store.biobank_count(), 1);
    }

    #[test]
    fn test_derive_searchable_fields() {
        let fields = test_specimen("s1", "bb-1").derive_searchable_fields();

        for expected in [
            "blood",
            "diabetes type 2",
            "diabetes",
            "type",
            "2",
            "female",
            "hispanic",
            "frozen",
        ] {
            assert!(fields.contains(&expected.to_string()), "missing {}", expected);
        }

        let unique: HashSet<&String> = fields.iter().collect();
        assert_eq!(unique.len(), fields.len(), "fields must not repeat");
        assert!(fields.iter().all(|f| *f == f.to_lowercase()));
    }

    #[tokio::test]
    async fn test_insert_specimen_fills_searchable_fields() {
        let store = MemoryStore::new();
        let mut explicit = test_specimen("explicit", "bb-1");
        explicit.searchable_fields = vec!["custom".to_string()];

        store.insert_specimen(test_specimen("derived", "bb-1")).await;
        store.insert_specimen(explicit).await;

        let specimens = store.list_specimens(10).await.unwrap();
        assert!(specimens[0].searchable_fields.contains(&"blood".to_string()));
        assert_eq!(specimens[1].searchable_fields, vec!["custom"]);
    }

    #[tokio::test]
    async fn test_list_specimens_keeps_insertion_order_and_limit() {
        let store = MemoryStore::new();
        for i in 0..10 {
            store
                .insert_specimen(test_specimen(&format!("s{}", i), "bb-1"))
                .await;
        }

        let all = store.list_specimens(usize::MAX).await.unwrap();
        let ids: Vec<String> = all.iter().map(|s| s.id.clone()).collect();
        assert_eq!(ids, (0..10).map(|i| format!("s{}", i)).collect::<Vec<_>>());

        let first_three = store.list_specimens(3).await.unwrap();
        assert_eq!(first_three.len(), 3);
        assert_eq!(first_three[2].id, "s2");

        assert!(store.list_specimens(0).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_biobanks() {
        let store = MemoryStore::new();
        store.insert_biobank(test_biobank("bb-1", "One"));
        store.insert_biobank(test_biobank("bb-2", "Two"));
        // Same id replaces.
        store.insert_biobank(test_biobank("bb-2", "Two Renamed"));

        let mut names: Vec<String> = store
            .list_biobanks()
            .await
            .unwrap()
            .into_iter()
            .map(|b| b.name)
            .collect();
        names.sort();

        assert_eq!(names, vec!["One", "Two Renamed"]);
    }

    // ============================================================
    // SEED TESTS
    // ============================================================

    #[tokio::test]
    async fn test_demo_dataset_is_consistent() {
        let seed = demo_dataset().unwrap();
        assert!(!seed.biobanks.is_empty());
        assert!(seed.specimens.len() >= 10);

        let biobank_ids: HashSet<&str> = seed.biobanks.iter().map(|b| b.id.as_str()).collect();
        for specimen in &seed.specimens {
            assert!(
                biobank_ids.contains(specimen.biobank_id.as_str()),
                "{} references unknown biobank {}",
                specimen.id,
                specimen.biobank_id
            );
        }

        let store = MemoryStore::from_seed(seed).await;
        assert_eq!(store.biobank_count(), 4);
        assert_eq!(store.specimen_count().await, 12);
    }

    #[test]
    fn test_parse_seed_accepts_type_field_and_defaults() {
        let json = r#"{
            "specimens": [{
                "external_id": "X-1",
                "biobank_id": "bb-1",
                "type": "Urine",
                "diagnosis": "Healthy",
                "gender": "Male",
                "age_at_collection": 30,
                "preservation_method": "Frozen"
            }]
        }"#;

        let seed = parse_seed(json).unwrap();

        assert!(seed.biobanks.is_empty());
        let specimen = &seed.specimens[0];
        assert_eq!(specimen.specimen_type, "Urine");
        assert!(specimen.id.is_empty());
        assert!(!specimen.available);
        assert!(specimen.searchable_fields.is_empty());
    }

    #[test]
    fn test_parse_seed_rejects_invalid_document() {
        assert!(parse_seed("{ \"specimens\": [ { \"type\": 5 } ] }").is_err());
        assert!(parse_seed("not json").is_err());
    }

    #[test]
    fn test_load_seed_file() {
        let path = std::env::temp_dir().join(format!("seed-{}.json", uuid::Uuid::new_v4()));
        let seed = serde_json::json!({
            "biobanks": [test_biobank("bb-1", "File Biobank")],
            "specimens": [test_specimen("s1", "bb-1"), test_specimen("s2", "bb-1")],
        });
        std::fs::write(&path, seed.to_string()).unwrap();

        let loaded = load_seed_file(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(loaded.biobanks.len(), 1);
        assert_eq!(loaded.specimens.len(), 2);
        assert_eq!(loaded.specimens[1].id, "s2");
    }

    #[test]
    fn test_load_missing_seed_file_is_error() {
        let path = std::env::temp_dir().join(format!("missing-{}.json", uuid::Uuid::new_v4()));
        assert!(load_seed_file(&path).is_err());
    }

    // ============================================================
    // COLLECTION HANDLER TESTS
    // ============================================================

    #[tokio::test]
    async fn test_handle_list_specimens_limit() {
        let store = Arc::new(MemoryStore::from_seed(demo_dataset().unwrap()).await);

        let (status, Json(limited)) = handle_list_specimens(
            Extension(store.clone()),
            Query(CollectionParams { limit: Some(2) }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(limited.len(), 2);

        let (_, Json(all)) =
            handle_list_specimens(Extension(store), Query(CollectionParams { limit: None })).await;
        assert_eq!(all.len(), 12);
    }

    // ============================================================
    // HTTP DOCUMENT STORE TESTS
    // ============================================================

    #[tokio::test]
    async fn test_http_store_reads_peer_collections() {
        let local = Arc::new(MemoryStore::from_seed(demo_dataset().unwrap()).await);
        let addr = spawn_server(build_router(local.clone())).await;
        let remote = HttpDocumentStore::new(&format!("http://{}/", addr));

        assert_eq!(remote.base_url(), format!("http://{}", addr));

        let biobanks = remote.list_biobanks().await.unwrap();
        assert_eq!(biobanks.len(), 4);

        let remote_specimens = remote.list_specimens(3).await.unwrap();
        let local_specimens = local.list_specimens(3).await.unwrap();
        assert_eq!(remote_specimens, local_specimens);
    }

    #[tokio::test]
    async fn test_search_through_http_store() {
        let local = Arc::new(MemoryStore::from_seed(demo_dataset().unwrap()).await);
        let addr = spawn_server(build_router(local)).await;
        let remote = HttpDocumentStore::new(&format!("http://{}", addr));

        let (_, results) = search("blood diabetes female over 60", &remote).await.unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].specimen.external_id, "SP-1001");
        assert_eq!(results[0].biobank_name, "Northwell Biorepository");
    }

    #[tokio::test]
    async fn test_http_store_peer_error_status() {
        let app = Router::new().route(
            ENDPOINT_BIOBANKS,
            get(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
        );
        let addr = spawn_server(app).await;
        let remote = HttpDocumentStore::new(&format!("http://{}", addr));

        assert!(remote.list_biobanks().await.is_err());
        // Unrouted path answers 404.
        assert!(remote.list_specimens(10).await.is_err());
    }

    #[tokio::test]
    async fn test_http_store_unreachable_peer() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let remote =
            HttpDocumentStore::with_timeout(&format!("http://{}", addr), Duration::from_millis(300));

        assert!(remote.list_biobanks().await.is_err());
        assert!(search("blood", &remote).await.is_err());
    }
}
