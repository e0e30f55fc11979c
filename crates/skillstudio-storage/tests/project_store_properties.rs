//! Property tests for the project virtual file store
//!
//! - Idempotence: `replace_all(t, F)` then `get(t)` yields exactly `F`
//! - No orphans: after `replace_all` the project's keys are exactly the image of `F`
//! - Round-trip: decoding the key of a saved path yields the path

use std::collections::BTreeSet;
use std::sync::Arc;

use proptest::prelude::*;
use skillstudio_config::StorageSettings;
use skillstudio_storage::memory::{InMemoryDocumentStore, InMemoryObjectStore};
use skillstudio_storage::{path, KeyCodec, NewProject, ProjectFileSet, ProjectFileStore};
use tempfile::TempDir;

fn segment_strategy() -> impl Strategy<Value = String> {
    r"[a-zA-Z0-9_][a-zA-Z0-9_.-]{0,11}".prop_filter("no dot-only segments", |s| {
        s != "." && s != ".."
    })
}

fn path_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(segment_strategy(), 1..4).prop_map(|segments| format!("/{}", segments.join("/")))
}

fn file_set_strategy() -> impl Strategy<Value = ProjectFileSet> {
    prop::collection::btree_map(path_strategy(), r"[ -~\n]{0,40}", 0..8)
        .prop_map(ProjectFileSet::from)
}

fn harness() -> (Arc<InMemoryObjectStore>, ProjectFileStore, TempDir) {
    let legacy = TempDir::new().unwrap();
    let settings = StorageSettings {
        legacy_root: legacy.path().to_path_buf(),
        ..StorageSettings::default()
    };
    let objects = Arc::new(InMemoryObjectStore::new());
    let store = ProjectFileStore::new(
        objects.clone(),
        Arc::new(InMemoryDocumentStore::new()),
        &settings,
    );
    (objects, store, legacy)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_replace_then_get_is_identity(
        initial in file_set_strategy(),
        replacement in file_set_strategy().prop_filter("non-empty", |f| !f.is_empty()),
    ) {
        let (objects, store, _legacy) = harness();
        tokio_test::block_on(async {
            store
                .save(NewProject::new("t1", "u1", "Demo").with_files(initial))
                .await
                .unwrap();
            store.replace_all("t1", &replacement).await.unwrap();

            let data = store.get("t1").await.unwrap().unwrap();
            prop_assert_eq!(&data.files, &replacement);

            let codec = KeyCodec::default();
            let expected: BTreeSet<String> = replacement
                .paths()
                .map(|p| codec.encode("t1", p).unwrap())
                .collect();
            let actual: BTreeSet<String> = objects.keys().into_iter().collect();
            prop_assert_eq!(actual, expected);
            Ok(())
        })?;
    }

    #[test]
    fn prop_key_round_trip(path in path_strategy(), token in r"[0-9a-f]{32}") {
        let codec = KeyCodec::default();
        let key = codec.encode(&token, &path).unwrap();
        prop_assert_eq!(codec.decode(&token, &key).unwrap(), path);
    }

    #[test]
    fn prop_normalize_is_idempotent(raw in r"[a-z/\\. ]{1,24}") {
        if let Ok(once) = path::normalize(&raw) {
            prop_assert!(once.starts_with('/'));
            prop_assert!(!once.contains("//"));
            prop_assert!(!once.split('/').any(|s| s == ".."));
            prop_assert_eq!(path::normalize(&once).unwrap(), once);
        }
    }
}
