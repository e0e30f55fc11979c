//! Integration tests for the project virtual file store: layout migration, bootstrap,
//! reconciliation and listing.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{Duration, Utc};
use skillstudio_config::StorageSettings;
use skillstudio_storage::memory::{InMemoryDocumentStore, InMemoryObjectStore};
use skillstudio_storage::{
    default_project_files, DocumentStore, NewProject, ProjectDocument, ProjectFileSet,
    ProjectFileStore, ProjectRecord, StorageError,
};
use tempfile::TempDir;

struct Harness {
    objects: Arc<InMemoryObjectStore>,
    documents: Arc<InMemoryDocumentStore>,
    store: ProjectFileStore,
    legacy_root: TempDir,
}

fn harness() -> Harness {
    let legacy_root = TempDir::new().unwrap();
    let settings = StorageSettings {
        legacy_root: legacy_root.path().to_path_buf(),
        ..StorageSettings::default()
    };
    let objects = Arc::new(InMemoryObjectStore::new());
    let documents = Arc::new(InMemoryDocumentStore::new());
    let store = ProjectFileStore::new(objects.clone(), documents.clone(), &settings);
    Harness {
        objects,
        documents,
        store,
        legacy_root,
    }
}

fn record(token: &str, owner: &str) -> ProjectRecord {
    let now = Utc::now();
    ProjectRecord {
        token: token.to_string(),
        name: format!("Project {}", token),
        template: "react".to_string(),
        owner_id: owner.to_string(),
        dependencies: BTreeMap::new(),
        compile_info: None,
        created_at: now,
        updated_at: now,
    }
}

fn files(pairs: &[(&str, &str)]) -> ProjectFileSet {
    pairs.iter().copied().collect()
}

#[tokio::test]
async fn test_replace_removes_dropped_files() {
    let h = harness();
    h.store
        .save(NewProject::new("t1", "u1", "Demo").with_files(files(&[("/a.txt", "1"), ("/b.txt", "2")])))
        .await
        .unwrap();

    h.store.replace_all("t1", &files(&[("/a.txt", "1")])).await.unwrap();

    let data = h.store.get("t1").await.unwrap().unwrap();
    assert_eq!(data.files, files(&[("/a.txt", "1")]));
    assert!(data.files.get("/b.txt").is_none());
    assert_eq!(h.objects.keys(), vec!["projects/t1/files/a.txt"]);
}

#[tokio::test]
async fn test_replace_normalizes_paths() {
    let h = harness();
    h.store.save(NewProject::new("t1", "u1", "Demo")).await.unwrap();
    h.store
        .replace_all("t1", &files(&[("src//App.js", "app"), ("\\styles.css", "css")]))
        .await
        .unwrap();

    let data = h.store.get("t1").await.unwrap().unwrap();
    let paths: Vec<_> = data.files.paths().collect();
    assert_eq!(paths, vec!["/src/App.js", "/styles.css"]);
}

#[tokio::test]
async fn test_replace_invalid_path_touches_nothing() {
    let h = harness();
    h.store
        .save(NewProject::new("t1", "u1", "Demo").with_files(files(&[("/a.txt", "1")])))
        .await
        .unwrap();
    let before = h.objects.operation_count();

    let err = h
        .store
        .replace_all("t1", &files(&[("/ok.txt", "x"), ("/../../etc/passwd", "y")]))
        .await
        .unwrap_err();
    assert!(matches!(err, StorageError::InvalidPath { .. }));
    assert_eq!(h.objects.operation_count(), before);
    assert_eq!(h.objects.keys(), vec!["projects/t1/files/a.txt"]);
}

#[tokio::test]
async fn test_save_duplicate_token_fails() {
    let h = harness();
    h.store.save(NewProject::new("t1", "u1", "First")).await.unwrap();
    let err = h
        .store
        .save(NewProject::new("t1", "u2", "Second"))
        .await
        .unwrap_err();
    assert!(matches!(err, StorageError::DuplicateToken { .. }));
    assert_eq!(h.documents.peek("t1").unwrap().record.owner_id, "u1");
}

#[tokio::test]
async fn test_embedded_layout_is_migrated() {
    let h = harness();
    let mut embedded = BTreeMap::new();
    embedded.insert("/index.js".to_string(), "legacy index".to_string());
    embedded.insert("App.js".to_string(), "legacy app".to_string());
    h.documents
        .insert_one(ProjectDocument::embedded(record("t1", "u1"), embedded))
        .await
        .unwrap();

    let data = h.store.get("t1").await.unwrap().unwrap();
    assert_eq!(data.files.get("/index.js"), Some("legacy index"));
    assert_eq!(data.files.get("/App.js"), Some("legacy app"));

    let doc = h.documents.peek("t1").unwrap();
    assert!(doc.files.is_none());
    assert_eq!(doc.files_path.as_deref(), Some("projects/t1/files"));
    assert_eq!(h.objects.len(), 2);

    // Second read is served from the object store only
    let again = h.store.get("t1").await.unwrap().unwrap();
    assert_eq!(again.files, data.files);
}

#[tokio::test]
async fn test_legacy_directory_is_migrated_and_removed() {
    let h = harness();
    let dir = h.legacy_root.path().join("t1");
    std::fs::create_dir_all(dir.join("src")).unwrap();
    std::fs::write(dir.join("src/main.js"), "main").unwrap();
    std::fs::write(dir.join("package.json"), "{}").unwrap();
    h.documents
        .insert_one(ProjectDocument {
            record: record("t1", "u1"),
            files_path: None,
            files: None,
        })
        .await
        .unwrap();

    let data = h.store.get("t1").await.unwrap().unwrap();
    assert_eq!(data.files, files(&[("/package.json", "{}"), ("/src/main.js", "main")]));
    assert!(!dir.exists());
    assert_eq!(
        h.objects.keys(),
        vec!["projects/t1/files/package.json", "projects/t1/files/src/main.js"]
    );
    assert!(h.documents.peek("t1").unwrap().files_path.is_some());
}

#[tokio::test]
async fn test_leftover_legacy_directory_is_cleaned() {
    let h = harness();
    h.store
        .save(NewProject::new("t1", "u1", "Demo").with_files(files(&[("/a.txt", "1")])))
        .await
        .unwrap();
    let dir = h.legacy_root.path().join("t1");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("stale.txt"), "old").unwrap();

    let data = h.store.get("t1").await.unwrap().unwrap();
    assert_eq!(data.files, files(&[("/a.txt", "1")]));
    assert!(!dir.exists());
}

#[tokio::test]
async fn test_empty_project_is_bootstrapped_once() {
    let h = harness();
    h.store.save(NewProject::new("t1", "u1", "Demo")).await.unwrap();
    assert!(!h.store.has_files("t1").await.unwrap());

    let data = h.store.get("t1").await.unwrap().unwrap();
    assert_eq!(data.files, default_project_files());
    assert!(h.store.has_files("t1").await.unwrap());

    // User edits survive later reads; the bootstrap does not run again
    h.store.replace_all("t1", &files(&[("/only.js", "x")])).await.unwrap();
    let data = h.store.get("t1").await.unwrap().unwrap();
    assert_eq!(data.files, files(&[("/only.js", "x")]));
}

#[tokio::test]
async fn test_list_projects_newest_first() {
    let h = harness();
    let now = Utc::now();
    let mut older = record("old", "u1");
    older.updated_at = now - Duration::hours(2);
    let mut newer = record("new", "u1");
    newer.updated_at = now;
    let other = record("foreign", "u2");
    for doc in [older, newer, other] {
        h.documents
            .insert_one(ProjectDocument::migrated(doc.clone(), format!("projects/{}/files", doc.token)))
            .await
            .unwrap();
    }

    let listed = h.store.list_projects("u1").await.unwrap();
    let tokens: Vec<_> = listed.iter().map(|p| p.token.as_str()).collect();
    assert_eq!(tokens, vec!["new", "old"]);

    assert!(h.store.list_projects("  ").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_delete_removes_objects() {
    let h = harness();
    h.store
        .save(NewProject::new("t1", "u1", "Demo").with_files(files(&[("/a.txt", "1")])))
        .await
        .unwrap();
    h.store
        .save(NewProject::new("t2", "u1", "Other").with_files(files(&[("/b.txt", "2")])))
        .await
        .unwrap();

    h.store.delete("t1").await.unwrap();
    assert_eq!(h.objects.keys(), vec!["projects/t2/files/b.txt"]);
    assert_eq!(h.documents.count(), 1);
}

#[tokio::test]
async fn test_non_utf8_object_fails_loudly() {
    let h = harness();
    h.store
        .save(NewProject::new("t1", "u1", "Demo").with_files(files(&[("/a.txt", "1")])))
        .await
        .unwrap();
    h.objects.seed("projects/t1/files/logo.bin", vec![0xff, 0xfe, 0x00]);

    let err = h.store.get("t1").await.unwrap_err();
    match err {
        StorageError::Backend { operation, message } => {
            assert_eq!(operation, "get");
            assert!(message.contains("projects/t1/files/logo.bin"), "{}", message);
        }
        other => panic!("expected a backend error, got {:?}", other),
    }
    assert_eq!(h.objects.keys().len(), 2);
}
