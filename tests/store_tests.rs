use std::fs::OpenOptions;
use std::io::Write;
use medialib_search::core::config::Config;
use medialib_search::core::error::ErrorKind;
use medialib_search::core::store::IndexStore;
use medialib_search::core::types::{Document, FieldValue};
use medialib_search::search::query::Query;
use tempfile::TempDir;

fn track(key: &str, title: &str) -> Document {
    Document::new(key)
        .with_field("id", key)
        .with_field("title", title)
        .with_field("year", 1975u32)
}

fn keys(store: &IndexStore, term: &str) -> Vec<String> {
    store.search(&Query::from_term(term), 0)
        .unwrap()
        .into_iter()
        .map(|hit| hit.key)
        .collect()
}

#[test]
fn upsert_replaces_by_key() {
    let dir = TempDir::new().unwrap();
    let config = Config::with_root(dir.path());
    let store = IndexStore::open(dir.path().join("tracks.idx"), &config).unwrap();

    store.upsert(track("t1", "Bohemian Rhapsody")).unwrap();
    store.upsert(track("t1", "Radio Ga Ga")).unwrap();

    assert_eq!(store.len(), 1);
    assert!(keys(&store, "bohemian").is_empty());
    assert_eq!(keys(&store, "radio"), vec!["t1"]);
    assert_eq!(
        store.get("t1").unwrap().get_field("title"),
        Some(&FieldValue::Text("Radio Ga Ga".into()))
    );
}

#[test]
fn empty_key_is_rejected() {
    let dir = TempDir::new().unwrap();
    let config = Config::with_root(dir.path());
    let store = IndexStore::open(dir.path().join("tracks.idx"), &config).unwrap();

    let err = store.upsert(track("", "Nameless")).unwrap_err();
    assert_eq!(err.kind, ErrorKind::IndexWrite);
    assert!(store.is_empty());
}

#[test]
fn documents_survive_close_and_reopen() {
    let dir = TempDir::new().unwrap();
    let config = Config::with_root(dir.path());
    let path = dir.path().join("tracks.idx");

    let store = IndexStore::open(path.clone(), &config).unwrap();
    store.upsert(track("t1", "Bohemian Rhapsody")).unwrap();
    store.upsert(track("t2", "Killer Queen")).unwrap();
    store.close().unwrap();
    assert!(path.join("snapshot.bin").exists());

    let store = IndexStore::open(path, &config).unwrap();
    assert_eq!(store.len(), 2);
    assert_eq!(keys(&store, "killer"), vec!["t2"]);
    assert_eq!(store.get("t1").unwrap().get_field("year"), Some(&FieldValue::Integer(1975)));
}

#[test]
fn wal_is_replayed_without_a_snapshot() {
    let dir = TempDir::new().unwrap();
    let config = Config::with_root(dir.path());
    let path = dir.path().join("tracks.idx");

    {
        let store = IndexStore::open(path.clone(), &config).unwrap();
        store.upsert(track("t1", "Bohemian Rhapsody")).unwrap();
        store.upsert(track("t1", "Radio Ga Ga")).unwrap();
        store.flush().unwrap();
        // Dropped without close: nothing compacted.
    }
    assert!(!path.join("snapshot.bin").exists());

    let store = IndexStore::open(path, &config).unwrap();
    assert_eq!(store.len(), 1);
    assert_eq!(keys(&store, "radio"), vec!["t1"]);
}

#[test]
fn torn_wal_tail_is_discarded() {
    let dir = TempDir::new().unwrap();
    let config = Config::with_root(dir.path());
    let path = dir.path().join("tracks.idx");

    {
        let store = IndexStore::open(path.clone(), &config).unwrap();
        store.upsert(track("t1", "Bohemian Rhapsody")).unwrap();
        store.flush().unwrap();
    }

    let mut wal = OpenOptions::new().append(true).open(path.join("wal.log")).unwrap();
    wal.write_all(&[0x20, 0x00, 0x00]).unwrap();
    drop(wal);

    let store = IndexStore::open(path.clone(), &config).unwrap();
    assert_eq!(store.len(), 1);

    store.upsert(track("t2", "Somebody to Love")).unwrap();
    store.flush().unwrap();
    drop(store);

    let store = IndexStore::open(path, &config).unwrap();
    assert_eq!(store.len(), 2);
}

#[test]
fn compaction_folds_the_wal() {
    let dir = TempDir::new().unwrap();
    let config = Config { compact_after: 5, ..Config::with_root(dir.path()) };
    let path = dir.path().join("tracks.idx");

    let store = IndexStore::open(path.clone(), &config).unwrap();
    for i in 0..12 {
        store.upsert(track(&format!("t{}", i), "Track")).unwrap();
    }
    assert!(path.join("snapshot.bin").exists());
    drop(store);

    let store = IndexStore::open(path, &config).unwrap();
    assert_eq!(store.len(), 12);
}

#[test]
fn corrupt_snapshot_fails_to_open() {
    let dir = TempDir::new().unwrap();
    let config = Config::with_root(dir.path());
    let path = dir.path().join("tracks.idx");

    let store = IndexStore::open(path.clone(), &config).unwrap();
    store.upsert(track("t1", "Bohemian Rhapsody")).unwrap();
    store.close().unwrap();

    std::fs::write(path.join("snapshot.bin"), b"\x02\x00").unwrap();

    let err = IndexStore::open(path, &config).err().unwrap();
    assert_eq!(err.kind, ErrorKind::StoreOpen);
}

#[cfg(unix)]
#[test]
fn second_open_of_a_locked_store_fails() {
    let dir = TempDir::new().unwrap();
    let config = Config::with_root(dir.path());
    let path = dir.path().join("albums.idx");

    let first = IndexStore::open(path.clone(), &config).unwrap();
    let err = IndexStore::open(path.clone(), &config).err().unwrap();
    assert_eq!(err.kind, ErrorKind::StoreOpen);

    drop(first);
    assert!(IndexStore::open(path, &config).is_ok());
}

#[test]
fn oversized_document_is_rejected_and_later_writes_survive() {
    let dir = TempDir::new().unwrap();
    let config = Config::with_root(dir.path());
    let path = dir.path().join("tracks.idx");

    {
        let store = IndexStore::open(path.clone(), &config).unwrap();
        store.upsert(track("before", "Bohemian Rhapsody")).unwrap();

        let big = track("big", "Huge").with_field("lyrics", "la ".repeat(22 * 1024 * 1024));
        let err = store.upsert(big).unwrap_err();
        assert_eq!(err.kind, ErrorKind::IndexWrite);
        assert!(store.get("big").is_none());

        store.upsert(track("after", "Radio Ga Ga")).unwrap();
        store.flush().unwrap();
        assert_eq!(store.len(), 2);
    }

    let store = IndexStore::open(path, &config).unwrap();
    assert_eq!(store.len(), 2);
    assert!(store.get("before").is_some());
    assert!(store.get("after").is_some());
    assert!(store.get("big").is_none());
}

#[test]
fn searches_run_alongside_writes() {
    let dir = TempDir::new().unwrap();
    let config = Config::with_root(dir.path());
    let store = IndexStore::open(dir.path().join("tracks.idx"), &config).unwrap();
    store.upsert(track("t0", "Bohemian Rhapsody")).unwrap();

    std::thread::scope(|scope| {
        scope.spawn(|| {
            for i in 1..50 {
                store.upsert(track(&format!("t{}", i), "Killer Queen")).unwrap();
            }
        });
        for _ in 0..4 {
            scope.spawn(|| {
                for _ in 0..50 {
                    assert_eq!(keys(&store, "bohemian rhapsody"), vec!["t0"]);
                    assert_eq!(keys(&store, "bohem"), vec!["t0"]);
                }
            });
        }
    });

    assert_eq!(keys(&store, "killer").len(), 49);
}
