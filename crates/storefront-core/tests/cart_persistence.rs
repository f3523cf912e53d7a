//! Restart round trips for the cart across the real backends
//!
//! Each test builds a cart, drops the store (the "process exit"), then opens a
//! fresh store over the same backend and checks what came back.

use storefront_core::{
    BackendConfig, CartStore, Catalog, FileStore, KeyValueStore, PersistMode, SqliteStore,
    StoreConfig,
};

fn fill(store: &mut CartStore<impl KeyValueStore>) {
    let catalog = Catalog::builtin();
    let headphones = catalog.get("1").unwrap().to_product();
    let speaker = catalog.get("5").unwrap().to_product();

    store.add_item(headphones.clone()).unwrap();
    store.add_item(speaker).unwrap();
    store.add_item(headphones).unwrap();
    store.toggle_cart().unwrap();
}

#[test]
fn file_backend_survives_restart() {
    let dir = tempfile::tempdir().unwrap();

    let before = {
        let mut store = CartStore::load(FileStore::open(dir.path()).unwrap()).unwrap();
        fill(&mut store);
        store.state().clone()
    };

    let store = CartStore::load(FileStore::open(dir.path()).unwrap()).unwrap();
    assert_eq!(store.state(), &before);
    assert_eq!(store.total_items(), 3);
    assert!((store.total_price() - (2.0 * 299.0 + 89.0)).abs() < 1e-9);
    assert!(store.is_open());
}

#[test]
fn sqlite_backend_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("storefront.db");

    let before = {
        let mut store = CartStore::load(SqliteStore::open(&db).unwrap()).unwrap();
        fill(&mut store);
        store.decrement_item("1").unwrap();
        store.state().clone()
    };

    let store = CartStore::load(SqliteStore::open(&db).unwrap()).unwrap();
    assert_eq!(store.state(), &before);
    assert_eq!(store.items()[0].quantity, 1);
}

#[test]
fn config_driven_store_with_deferred_writes() {
    let dir = tempfile::tempdir().unwrap();
    let config = StoreConfig::new()
        .with_backend(BackendConfig::File {
            dir: dir.path().to_path_buf(),
        })
        .with_persist_mode(PersistMode::Deferred);

    {
        let mut store = CartStore::open(&config).unwrap();
        fill(&mut store);
        assert!(store.is_dirty());
        assert!(!dir.path().join("cart-storage.json").exists());
    }

    assert!(dir.path().join("cart-storage.json").exists());
    let store = CartStore::open(&config).unwrap();
    assert_eq!(store.total_items(), 3);
}

#[test]
fn removed_items_stay_removed_after_restart() {
    let dir = tempfile::tempdir().unwrap();

    {
        let mut store = CartStore::load(FileStore::open(dir.path()).unwrap()).unwrap();
        fill(&mut store);
        store.remove_item("5").unwrap();
        store.remove_item("5").unwrap();
    }

    let store = CartStore::load(FileStore::open(dir.path()).unwrap()).unwrap();
    let ids: Vec<&str> = store.items().iter().map(|i| i.id()).collect();
    assert_eq!(ids, vec!["1"]);
}

#[test]
fn corrupt_file_starts_empty() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("cart-storage.json"), "{\"state\":").unwrap();

    let store = CartStore::load(FileStore::open(dir.path()).unwrap()).unwrap();
    assert!(store.items().is_empty());
    assert!(!store.is_open());
}

#[test]
fn reset_removes_file() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = CartStore::load(FileStore::open(dir.path()).unwrap()).unwrap();
    fill(&mut store);
    assert!(dir.path().join("cart-storage.json").exists());

    store.reset().unwrap();
    assert!(!dir.path().join("cart-storage.json").exists());
}
