use shardkv_store::codec::{BytesValueCodec, StringKeyCodec};
use shardkv_store::storage_engine::SingleFileStore;
use tempfile::tempdir;

fn open(dir: &tempfile::TempDir, name: &str) -> SingleFileStore<StringKeyCodec, BytesValueCodec> {
    SingleFileStore::open(dir.path().join(name), StringKeyCodec, BytesValueCodec, false).unwrap()
}

#[test]
fn put_then_get_returns_the_last_value_written() {
    let dir = tempdir().unwrap();
    let store = open(&dir, "store.log");

    store.put(&"alpha".to_string(), &b"one".to_vec()).unwrap();
    store.put(&"beta".to_string(), &b"two".to_vec()).unwrap();
    store.put(&"alpha".to_string(), &b"ONE".to_vec()).unwrap();
    assert!(store.delete(&"beta".to_string()).unwrap());

    store.flush().unwrap();
    drop(store);

    let store = open(&dir, "store.log");
    assert_eq!(store.get(&"alpha".to_string()).unwrap(), Some(b"ONE".to_vec()));
    assert_eq!(store.get(&"beta".to_string()).unwrap(), None);
    assert_eq!(store.len(), 1);
}

#[test]
fn deleted_key_stays_absent_until_put_again() {
    let dir = tempdir().unwrap();
    let store = open(&dir, "store.log");

    store.put(&"k".to_string(), &b"v".to_vec()).unwrap();
    store.delete(&"k".to_string()).unwrap();
    assert_eq!(store.get(&"k".to_string()).unwrap(), None);

    store.put(&"k".to_string(), &b"v2".to_vec()).unwrap();
    assert_eq!(store.get(&"k".to_string()).unwrap(), Some(b"v2".to_vec()));
}

#[test]
fn delete_of_absent_key_returns_false_and_is_a_no_op() {
    let dir = tempdir().unwrap();
    let store = open(&dir, "store.log");

    assert!(!store.delete(&"nope".to_string()).unwrap());
    let size_before = store.get_storage_size();
    assert!(!store.delete(&"nope".to_string()).unwrap());
    assert_eq!(store.get_storage_size(), size_before);
}

#[test]
fn repeated_put_of_the_same_value_is_idempotent_in_effect() {
    let dir = tempdir().unwrap();
    let store = open(&dir, "store.log");

    store.put(&"k".to_string(), &b"v".to_vec()).unwrap();
    store.put(&"k".to_string(), &b"v".to_vec()).unwrap();
    assert_eq!(store.get(&"k".to_string()).unwrap(), Some(b"v".to_vec()));
    assert_eq!(store.len(), 1);
}

#[test]
fn empty_value_round_trips_and_differs_from_absence() {
    let dir = tempdir().unwrap();
    let store = open(&dir, "store.log");

    store.put(&"empty".to_string(), &Vec::new()).unwrap();
    assert_eq!(store.get(&"empty".to_string()).unwrap(), Some(Vec::new()));
    assert_ne!(store.get(&"empty".to_string()).unwrap(), None);
}

#[test]
fn zero_length_key_is_legal() {
    let dir = tempdir().unwrap();
    let store = open(&dir, "store.log");

    store.put(&String::new(), &b"v".to_vec()).unwrap();
    assert_eq!(store.get(&String::new()).unwrap(), Some(b"v".to_vec()));
}

#[test]
fn opening_a_fresh_file_yields_an_empty_store() {
    let dir = tempdir().unwrap();
    let store = open(&dir, "store.log");

    assert!(store.is_empty());
    assert_eq!(store.len(), 0);
    assert_eq!(store.get(&"anything".to_string()).unwrap(), None);
}
