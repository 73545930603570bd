//! End-to-end preparation runs against the local store and a failing store

use async_trait::async_trait;
use serde_json::json;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use kb_prep::config::BackendProvider;
use kb_prep::processing::{run, RecordKind};
use kb_prep::providers::{object_store_from_config, ObjectStoreProvider};
use kb_prep::{Error, MetadataSidecar, PrepConfig, PrepareSummary, Result};

const LONG_TEXT: &str =
    "A sufficiently long sentence of filler text exceeding fifty characters total.";

/// Fails every upload after the first `allowed` calls
struct FailingStore {
    allowed: usize,
    calls: AtomicUsize,
}

impl FailingStore {
    fn new(allowed: usize) -> Self {
        Self {
            allowed,
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl ObjectStoreProvider for FailingStore {
    async fn put_object(&self, key: &str, _body: Vec<u8>, _content_type: &str) -> Result<String> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        if call < self.allowed {
            Ok(format!("memory://{}", key))
        } else {
            Err(Error::object_store(format!("upload of {} refused", key)))
        }
    }

    async fn health_check(&self) -> Result<bool> {
        Ok(false)
    }

    fn name(&self) -> &str {
        "failing"
    }
}

fn local_config(root: &Path) -> PrepConfig {
    let mut config = PrepConfig {
        backend: BackendProvider::Local,
        ..Default::default()
    };
    config.output.events_input = root.join("global_events.json");
    config.output.locations_input = root.join("global_locations.json");
    config.output.root = root.join("documents_to_upload");
    config.output.mirror_dir = root.join("mirror");
    config
}

fn write_json(path: &Path, value: serde_json::Value) {
    std::fs::write(path, serde_json::to_string_pretty(&value).unwrap()).unwrap();
}

fn names_in(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .map(|entries| {
            entries
                .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
                .collect()
        })
        .unwrap_or_default();
    names.sort();
    names
}

#[tokio::test]
async fn events_run_writes_local_and_mirrored_pairs() {
    let dir = tempfile::tempdir().unwrap();
    let config = local_config(dir.path());
    write_json(
        &config.output.events_input,
        json!({
            "data": {
                "evt-1": {
                    "eventHash": "e1",
                    "articleHashes": ["h1"],
                    "linkedLocationId": "loc-1",
                    "linkedLocationName": "Harbour Bar",
                    "category": "",
                    "__collections__": {"contextual_mentions": {
                        "h1": {"mentions": [{"chunkText": LONG_TEXT}]}
                    }}
                },
                "evt-2": {
                    "__collections__": {"contextual_mentions": {
                        "h1": {"mentions": [{"chunkText": "short"}]}
                    }}
                }
            }
        }),
    );

    let store = object_store_from_config(&config).await.unwrap();
    let summary = run(RecordKind::Events, &config, store).await.unwrap();

    assert_eq!(
        summary,
        PrepareSummary {
            processed: 1,
            skipped: 1,
            documents_written: 1
        }
    );

    let local = config.output.root.join("events");
    assert_eq!(names_in(&local), vec!["e1.txt", "e1.txt.metadata.json"]);
    assert_eq!(
        names_in(&config.output.mirror_dir.join("events")),
        vec!["e1.txt", "e1.txt.metadata.json"]
    );

    let sidecar = MetadataSidecar::from_json(
        &std::fs::read_to_string(local.join("e1.txt.metadata.json")).unwrap(),
    )
    .unwrap();
    let attrs = sidecar.metadata_attributes;
    assert_eq!(attrs.location_id, "loc-1");
    assert_eq!(attrs.display_name, "Harbour Bar");
    assert_eq!(attrs.categories, vec!["general"]);
}

#[tokio::test]
async fn locations_run_writes_one_pair_per_mention_group() {
    let dir = tempfile::tempdir().unwrap();
    let config = local_config(dir.path());
    let categories: Vec<String> = (0..12).map(|i| format!("cat-{}", i)).collect();
    write_json(
        &config.output.locations_input,
        json!({
            "loc-1": {
                "displayName": "Harbour Bar",
                "categories": categories,
                "address": {"city": "Lisbon", "country": ""},
                "coordinates": {"latitude": 38.7223, "longitude": -9.1393},
                "__collections__": {"contextual_mentions": {
                    "h1": {"chunks": [{"chunkText": "first"}, {"chunkText": "second"}]},
                    "h2": {"chunks": [{"chunkText": "third"}]}
                }}
            }
        }),
    );

    let store = object_store_from_config(&config).await.unwrap();
    let summary = run(RecordKind::Locations, &config, store).await.unwrap();

    assert_eq!(summary.processed, 1);
    assert_eq!(summary.documents_written, 2);

    let local = config.output.root.join("locations");
    let names = names_in(&local);
    assert_eq!(names.len(), 4);

    let mut hashes = Vec::new();
    for name in names.iter().filter(|n| n.ends_with(".txt.metadata.json")) {
        let sidecar =
            MetadataSidecar::from_json(&std::fs::read_to_string(local.join(name)).unwrap())
                .unwrap();
        let attrs = sidecar.metadata_attributes;
        assert_eq!(attrs.location_id, "loc-1");
        assert_eq!(attrs.categories.len(), 10);
        assert_eq!(attrs.city.as_deref(), Some("Lisbon"));
        assert_eq!(attrs.country.as_deref(), Some("unknown"));
        assert_eq!(attrs.latitude, Some(38.7223));
        hashes.push(attrs.article_hash.clone());

        let doc_name = name.trim_end_matches(".metadata.json");
        let content = std::fs::read_to_string(local.join(doc_name)).unwrap();
        match attrs.article_hash.as_str() {
            "h1" => assert_eq!(content, "first\nsecond"),
            "h2" => assert_eq!(content, "third"),
            other => panic!("unexpected article hash {}", other),
        }
    }
    hashes.sort();
    assert_eq!(hashes, vec!["h1", "h2"]);
}

#[tokio::test]
async fn upload_failure_skips_record_and_leaves_local_files() {
    let dir = tempfile::tempdir().unwrap();
    let config = local_config(dir.path());
    write_json(
        &config.output.events_input,
        json!({
            "evt-1": {"__collections__": {"contextual_mentions": {
                "h1": {"mentions": [{"chunkText": LONG_TEXT}]}
            }}},
            "evt-2": {"__collections__": {"contextual_mentions": {
                "h1": {"mentions": [{"chunkText": LONG_TEXT}]}
            }}}
        }),
    );

    // evt-1 uploads both objects, evt-2 fails on its first upload
    let store: Arc<dyn ObjectStoreProvider> = Arc::new(FailingStore::new(2));
    let summary = run(RecordKind::Events, &config, store).await.unwrap();

    assert_eq!(summary.processed, 1);
    assert_eq!(summary.skipped, 1);
    assert_eq!(
        names_in(&config.output.root.join("events")),
        vec![
            "evt-1.txt",
            "evt-1.txt.metadata.json",
            "evt-2.txt",
            "evt-2.txt.metadata.json"
        ]
    );
}

#[tokio::test]
async fn location_upload_failure_keeps_earlier_groups_and_continues() {
    let dir = tempfile::tempdir().unwrap();
    let config = local_config(dir.path());
    write_json(
        &config.output.locations_input,
        json!({
            "loc-1": {"__collections__": {"contextual_mentions": {
                "h1": {"chunks": [{"chunkText": "uploaded"}]},
                "h2": {"chunks": [{"chunkText": "refused"}]}
            }}},
            "loc-2": {"displayName": "No Mentions"}
        }),
    );

    // h1 uploads both objects, h2 fails on its first upload
    let store: Arc<dyn ObjectStoreProvider> = Arc::new(FailingStore::new(2));
    let summary = run(RecordKind::Locations, &config, store).await.unwrap();

    assert_eq!(
        summary,
        PrepareSummary {
            processed: 1,
            skipped: 1,
            documents_written: 1
        }
    );

    let local = config.output.root.join("locations");
    let names = names_in(&local);
    assert_eq!(names.len(), 4);
    let mut contents: Vec<String> = names
        .iter()
        .filter(|name| name.ends_with(".txt"))
        .map(|name| std::fs::read_to_string(local.join(name)).unwrap())
        .collect();
    contents.sort();
    assert_eq!(contents, vec!["refused", "uploaded"]);
}

#[tokio::test]
async fn missing_export_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let config = local_config(dir.path());

    let store = object_store_from_config(&config).await.unwrap();
    let err = run(RecordKind::Locations, &config, store).await.unwrap_err();

    assert!(err.is_fatal());
    assert!(matches!(err, Error::RecordLoad { .. }));
}
