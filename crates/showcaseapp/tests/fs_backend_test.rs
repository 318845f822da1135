use showcaseapp::model::{ServiceDraft, ServiceProduct};
use showcaseapp::store::backend::StorageBackend;
use showcaseapp::store::fs::FileStore;
use showcaseapp::store::fs_backend::FsBackend;
use showcaseapp::store::{DataStore, SERVICES_KEY};
use std::cell::Cell;
use std::fs;
use std::rc::Rc;
use tempfile::TempDir;

fn setup() -> (TempDir, FsBackend) {
    let dir = TempDir::new().unwrap();
    let backend = FsBackend::new(dir.path().join("storage"));
    (dir, backend)
}

#[test]
fn test_fs_backend_basic_item_io() {
    let (_dir, backend) = setup();

    // 1. Missing
    assert_eq!(backend.get_item("servicesData").unwrap(), None);

    // 2. Write and read
    backend.set_item("servicesData", "[]").unwrap();
    assert_eq!(
        backend.get_item("servicesData").unwrap(),
        Some("[]".to_string())
    );

    // 3. Remove
    backend.remove_item("servicesData").unwrap();
    assert_eq!(backend.get_item("servicesData").unwrap(), None);
}

#[test]
fn test_fs_backend_atomic_write_artifacts() {
    let (dir, backend) = setup();
    backend.set_item("theme", "dark").unwrap();

    let expected_path = dir.path().join("storage").join("theme.item");
    assert_eq!(fs::read_to_string(&expected_path).unwrap(), "dark");

    for entry in fs::read_dir(dir.path().join("storage")).unwrap() {
        let path = entry.unwrap().path();
        let name = path.file_name().unwrap().to_str().unwrap();
        assert!(!name.ends_with(".tmp"), "Found leftover tmp file: {}", name);
    }
}

#[test]
fn test_fs_backend_lists_keys() {
    let (_dir, backend) = setup();
    assert!(backend.keys().unwrap().is_empty());

    backend.set_item("servicesData", "[]").unwrap();
    backend.set_item("featuredData", "[]").unwrap();
    let mut keys = backend.keys().unwrap();
    keys.sort();
    assert_eq!(keys, vec!["featuredData", "servicesData"]);
}

#[test]
fn test_fs_backend_rejects_path_like_keys() {
    let (_dir, backend) = setup();
    assert!(backend.set_item("../escape", "x").is_err());
    assert!(backend.get_item("").is_err());
}

#[test]
fn test_file_store_survives_reopen() {
    let dir = TempDir::new().unwrap();
    let root = dir.path().join("storage");

    let mut store = FileStore::new_fs(root.clone());
    let product = ServiceProduct::from_draft(1, 0, ServiceDraft::new("Persisted", "pic/a.png"));
    store.save_services(&[product.clone()]).unwrap();
    drop(store);

    let reopened = FileStore::new_fs(root);
    assert_eq!(reopened.load_services().unwrap(), vec![product]);
}

#[test]
fn test_file_store_masks_corrupt_file() {
    let dir = TempDir::new().unwrap();
    let root = dir.path().join("storage");
    let store = FileStore::new_fs(root.clone());
    store.backend().set_item(SERVICES_KEY, "{not json").unwrap();

    assert!(store.load_services().unwrap().is_empty());
    assert!(matches!(
        store.read::<ServiceProduct>(SERVICES_KEY).unwrap(),
        showcaseapp::store::CollectionRead::Corrupt(_)
    ));
}

#[test]
fn test_file_store_notifies_on_write() {
    let dir = TempDir::new().unwrap();
    let mut store = FileStore::new_fs(dir.path().join("storage"));
    let count = Rc::new(Cell::new(0));
    let seen = Rc::clone(&count);
    store.notifier().subscribe(move || seen.set(seen.get() + 1));

    store.save_services(&[]).unwrap();
    store.save_featured(&[]).unwrap();
    assert_eq!(count.get(), 2);
}
