//! End-to-end cart flows over the in-memory backend.
//!
//! These tests drive `CartStore` the way the mobile screens do: add products
//! from the catalog, adjust quantities from the cart screen, and watch for
//! updates.

use go_marketplace_cart::{CartError, CartState, CartStore, KeyValueStore, MemoryStore};
use go_marketplace_core::{Price, ProductId};
use go_marketplace_integration_tests::{CART_KEY, product};

async fn persisted(storage: &MemoryStore) -> CartState {
    let json = storage
        .get_item(CART_KEY)
        .await
        .expect("Failed to read storage")
        .expect("Cart was never written");
    CartState::from_json(&json).expect("Stored cart is not valid")
}

// =============================================================================
// Quantity Scenario
// =============================================================================

#[tokio::test]
async fn test_add_add_decrement_decrement() {
    let storage = MemoryStore::new();
    let store = CartStore::open(storage.clone(), CART_KEY)
        .await
        .expect("Failed to open store");
    let a = ProductId::new("A");

    let cart = store.add_to_cart(product("A", 1000)).await.unwrap();
    assert_eq!(cart.len(), 1);
    assert_eq!(cart.get(&a).unwrap().quantity, 1);

    let cart = store.add_to_cart(product("A", 1000)).await.unwrap();
    assert_eq!(cart.len(), 1);
    assert_eq!(cart.get(&a).unwrap().quantity, 2);

    let cart = store.decrement(&a).await.unwrap();
    assert_eq!(cart.get(&a).unwrap().quantity, 1);

    let cart = store.decrement(&a).await.unwrap();
    assert_eq!(cart.len(), 1, "zero-quantity line stays in the cart");
    assert_eq!(cart.get(&a).unwrap().quantity, 0);

    assert_eq!(persisted(&storage).await, cart);
    assert_eq!(storage.write_count(), 4);
}

#[tokio::test]
async fn test_order_is_preserved_across_updates() {
    let store = CartStore::open(MemoryStore::new(), CART_KEY).await.unwrap();

    store.add_to_cart(product("first", 100)).await.unwrap();
    store.add_to_cart(product("second", 200)).await.unwrap();
    store.add_to_cart(product("third", 300)).await.unwrap();
    store.add_to_cart(product("first", 100)).await.unwrap();
    store.increment(&ProductId::new("second")).await.unwrap();
    let cart = store.decrement(&ProductId::new("third")).await.unwrap();

    let ids: Vec<&str> = cart.iter().map(|item| item.id.as_str()).collect();
    assert_eq!(ids, ["first", "second", "third"]);
    let quantities: Vec<u32> = cart.iter().map(|item| item.quantity).collect();
    assert_eq!(quantities, [2, 2, 0]);
    assert_eq!(cart.total_quantity(), 4);
    assert_eq!(cart.subtotal(), Price::from_cents(600));
}

#[tokio::test]
async fn test_readding_keeps_first_descriptor() {
    let store = CartStore::open(MemoryStore::new(), CART_KEY).await.unwrap();
    store.add_to_cart(product("A", 1000)).await.unwrap();

    let mut changed = product("A", 9999);
    changed.title = "Renamed".to_string();
    let cart = store.add_to_cart(changed).await.unwrap();

    let item = cart.get(&ProductId::new("A")).unwrap();
    assert_eq!(item.quantity, 2);
    assert_eq!(item.title, "Product A");
    assert_eq!(item.price, Price::from_cents(1000));
}

// =============================================================================
// No-op Writes
// =============================================================================

#[tokio::test]
async fn test_noop_mutations_still_write() {
    let storage = MemoryStore::new();
    let store = CartStore::open(storage.clone(), CART_KEY).await.unwrap();
    store.add_to_cart(product("A", 1000)).await.unwrap();
    let before = store.items();

    let cart = store.increment(&ProductId::new("ghost")).await.unwrap();
    assert_eq!(cart, before);
    assert_eq!(storage.write_count(), 2);

    store.decrement(&ProductId::new("A")).await.unwrap();
    store.decrement(&ProductId::new("A")).await.unwrap();
    assert_eq!(storage.write_count(), 4);
    assert_eq!(persisted(&storage).await, store.items());
}

// =============================================================================
// Lifecycle
// =============================================================================

#[tokio::test]
async fn test_usage_errors_outside_ready_phase() {
    let storage = MemoryStore::new();
    let store = CartStore::new(storage.clone(), CART_KEY);

    let err = store.decrement(&ProductId::new("A")).await.unwrap_err();
    assert!(err.is_usage_error());
    assert!(matches!(err, CartError::NotInitialized));

    store.initialize().await.unwrap();
    store.add_to_cart(product("A", 1000)).await.unwrap();
    store.shutdown().await;

    let err = store.add_to_cart(product("B", 1000)).await.unwrap_err();
    assert!(matches!(err, CartError::Closed));
    assert_eq!(storage.write_count(), 1);
}

#[tokio::test]
async fn test_subscriber_follows_mutations() {
    let store = CartStore::open(MemoryStore::new(), CART_KEY).await.unwrap();
    let mut updates = store.subscribe();

    let producer = store.clone();
    let task = tokio::spawn(async move {
        producer.add_to_cart(product("A", 500)).await.unwrap();
        producer.add_to_cart(product("B", 500)).await.unwrap();
    });

    let mut last_len = 0;
    while last_len < 2 {
        updates.changed().await.expect("Store dropped");
        last_len = updates.borrow_and_update().len();
    }
    task.await.unwrap();

    assert_eq!(store.items().len(), 2);
}

#[tokio::test]
async fn test_concurrent_adds_are_serialized() {
    let storage = MemoryStore::new();
    let store = CartStore::open(storage.clone(), CART_KEY).await.unwrap();

    let mut tasks = Vec::new();
    for _ in 0..20 {
        let handle = store.clone();
        tasks.push(tokio::spawn(async move {
            handle.add_to_cart(product("A", 100)).await.unwrap();
        }));
    }
    for task in tasks {
        task.await.unwrap();
    }

    assert_eq!(store.items().get(&ProductId::new("A")).unwrap().quantity, 20);
    assert_eq!(storage.write_count(), 20);
    assert_eq!(persisted(&storage).await, store.items());
}
