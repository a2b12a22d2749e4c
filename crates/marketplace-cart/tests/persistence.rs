//! End-to-end cart persistence across store restarts.

use std::sync::Arc;

use marketplace_cart::prelude::*;
use marketplace_kv::{FileStore, KeyValueStore, MemoryStore};

fn shirt() -> Product {
    Product::new("a", "Shirt", "x", 10.0)
}

#[tokio::test]
async fn restart_from_file_restores_cart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("device-storage.json");

    let cart = CartStore::open(FileStore::open(&path), CartConfig::default()).await;
    cart.add_to_cart(shirt());
    cart.add_to_cart(Product::new("b", "Hat", "y", 4.5));
    assert_eq!(cart.increment(&ProductId::new("a")).wait().await, WriteOutcome::Written);
    let before = cart.products();
    drop(cart);

    let reopened = CartStore::open(FileStore::open(&path), CartConfig::default()).await;
    let products = reopened.products();
    assert_eq!(products, before);
    assert_eq!(products.quantity_of(&ProductId::new("a")), 2);

    let order: Vec<&str> = products.iter().map(|item| item.id.as_str()).collect();
    assert_eq!(order, vec!["a", "b"]);
}

#[tokio::test]
async fn reads_list_written_by_previous_app_version() {
    let stored = r#"[
        {"id":"a","title":"Shirt","image_url":"x","price":10,"quantity":2},
        {"id":"b","title":"Hat","image_url":"y","price":4.5,"quantity":0}
    ]"#;
    let store = MemoryStore::with_entries([("marketplace:", stored)]);

    let provider = CartProvider::mount(store, CartConfig::default()).await;
    let cart = use_cart(&provider.provide(&Scope::root())).unwrap();

    assert_eq!(cart.products.len(), 2);
    assert_eq!(cart.products.quantity_of(&ProductId::new("a")), 2);
    assert_eq!(cart.products.quantity_of(&ProductId::new("b")), 0);
}

#[tokio::test]
async fn concurrent_mutations_settle_on_latest_list() {
    let store = MemoryStore::new();
    let cart = CartStore::open(store.clone(), CartConfig::default()).await;
    cart.add_to_cart(shirt()).wait().await;

    let mut tasks = Vec::new();
    for _ in 0..20 {
        let cart = cart.clone();
        tasks.push(tokio::spawn(async move {
            cart.increment(&ProductId::new("a")).wait().await
        }));
    }
    for task in tasks {
        task.await.unwrap();
    }

    let latest = cart.products();
    assert_eq!(latest.quantity_of(&ProductId::new("a")), 21);

    let text = store.get_item(DEFAULT_STORAGE_KEY).await.unwrap().unwrap();
    assert_eq!(Arc::new(CartList::from_json(&text).unwrap()), latest);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn fire_and_forget_writes_from_many_threads() {
    let store = MemoryStore::new();
    let cart = CartStore::open(store.clone(), CartConfig::default()).await;

    let handles: Vec<_> = (0..4)
        .map(|n| {
            let cart = cart.clone();
            std::thread::spawn(move || {
                cart.add_to_cart(Product::new(format!("p{n}"), "Item", "z", 1.0))
            })
        })
        .collect();

    let mut writes = Vec::new();
    for handle in handles {
        writes.push(handle.join().unwrap());
    }
    for write in writes {
        write.wait().await;
    }

    assert_eq!(cart.products().len(), 4);
    let text = store.get_item(DEFAULT_STORAGE_KEY).await.unwrap().unwrap();
    assert_eq!(CartList::from_json(&text).unwrap().len(), 4);
}
