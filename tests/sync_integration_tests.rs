//! Integration Tests for the Synchronization Layer
//!
//! Drives SyncStore over the real HTTP path against an in-process mock of
//! the remote order-management API.

use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;

use order_sync::models::{CreateOrderRequest, Order, OrderedProduct, Product, UpdateOrderRequest};
use order_sync::{Config, SyncStore, SyncError};

// == Mock Remote API ==

struct MockApi {
    orders: Mutex<Vec<Order>>,
    products: Vec<Product>,
    next_id: AtomicI64,
    /// Total requests served, for the no-network-call assertions
    requests: AtomicUsize,
}

impl MockApi {
    fn new() -> Self {
        Self {
            orders: Mutex::new(Vec::new()),
            products: vec![
                product(1, "Milk"),
                product(2, "Bread"),
                product(3, "Coffee"),
                product(4, "Tea"),
            ],
            next_id: AtomicI64::new(1),
            requests: AtomicUsize::new(0),
        }
    }

    fn build_order(&self, id: i64, description: &str, product_ids: &[i64]) -> Order {
        Order {
            id,
            description: description.to_string(),
            ordered_products: product_ids
                .iter()
                .enumerate()
                .filter_map(|(i, pid)| {
                    self.products.iter().find(|p| p.id == *pid).map(|p| OrderedProduct {
                        id: i as i64 + 1,
                        product: p.clone(),
                    })
                })
                .collect(),
            date: Utc::now(),
        }
    }
}

fn product(id: i64, name: &str) -> Product {
    Product {
        id,
        product_name: name.to_string(),
        description: format!("{name} from the catalog"),
    }
}

async fn mock_list_orders(State(api): State<Arc<MockApi>>) -> Json<Vec<Order>> {
    api.requests.fetch_add(1, Ordering::SeqCst);
    Json(api.orders.lock().unwrap().clone())
}

async fn mock_list_products(State(api): State<Arc<MockApi>>) -> Json<Vec<Product>> {
    api.requests.fetch_add(1, Ordering::SeqCst);
    Json(api.products.clone())
}

async fn mock_create_order(
    State(api): State<Arc<MockApi>>,
    Json(request): Json<CreateOrderRequest>,
) -> Json<Order> {
    api.requests.fetch_add(1, Ordering::SeqCst);
    let id = api.next_id.fetch_add(1, Ordering::SeqCst);
    let order = api.build_order(id, &request.order_data.description, &request.product_ids);
    api.orders.lock().unwrap().push(order.clone());
    Json(order)
}

async fn mock_update_order(
    State(api): State<Arc<MockApi>>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateOrderRequest>,
) -> Result<Json<Order>, (StatusCode, String)> {
    api.requests.fetch_add(1, Ordering::SeqCst);
    let replacement = api.build_order(id, &request.order_data.description, &request.product_ids);
    let mut orders = api.orders.lock().unwrap();
    match orders.iter_mut().find(|o| o.id == id) {
        Some(existing) => {
            let replacement = Order {
                date: existing.date,
                ..replacement
            };
            *existing = replacement.clone();
            Ok(Json(replacement))
        }
        None => Err((StatusCode::NOT_FOUND, format!("order {id} not found"))),
    }
}

async fn mock_delete_order(
    State(api): State<Arc<MockApi>>,
    Path(id): Path<i64>,
) -> Result<StatusCode, (StatusCode, String)> {
    api.requests.fetch_add(1, Ordering::SeqCst);
    let mut orders = api.orders.lock().unwrap();
    if orders.iter().any(|o| o.id == id) {
        orders.retain(|o| o.id != id);
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err((StatusCode::NOT_FOUND, format!("order {id} not found")))
    }
}

// == Helper Functions ==

/// Serves the mock API on an OS-assigned port and returns a store wired to it.
async fn spawn_store() -> (SyncStore, Arc<MockApi>) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "order_sync=debug".into()),
        )
        .try_init();

    let api = Arc::new(MockApi::new());
    let app = Router::new()
        .route("/orders", get(mock_list_orders).post(mock_create_order))
        .route(
            "/orders/:id",
            axum::routing::put(mock_update_order).delete(mock_delete_order),
        )
        .route("/product", get(mock_list_products))
        .with_state(api.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let config = Config {
        base_url: format!("http://{addr}"),
        stale_window_secs: 30,
        request_timeout_secs: 5,
        refresh_interval_secs: 60,
    };
    (SyncStore::from_config(&config).unwrap(), api)
}

// == Product Read Tests ==

#[tokio::test]
async fn test_list_products_round_trip() {
    let (store, _api) = spawn_store().await;

    let products = store.products().await.unwrap();
    assert_eq!(products.len(), 4);
    assert_eq!(products[0].product_name, "Milk");
}

#[tokio::test]
async fn test_repeated_product_reads_hit_the_cache() {
    let (store, api) = spawn_store().await;

    store.products().await.unwrap();
    let served = api.requests.load(Ordering::SeqCst);

    store.products().await.unwrap();
    store.products().await.unwrap();
    assert_eq!(api.requests.load(Ordering::SeqCst), served);
}

// == Create Tests ==

#[tokio::test]
async fn test_create_then_list_round_trip() {
    let (store, _api) = spawn_store().await;

    let order = store.create_order("Groceries", vec![1, 3]).await.unwrap();
    assert!(order.id >= 1);
    assert_eq!(order.description, "Groceries");
    assert_eq!(order.product_ids(), vec![1, 3]);
    assert_eq!(order.ordered_products[0].product.product_name, "Milk");
    assert_eq!(order.ordered_products[1].product.product_name, "Coffee");

    // First read after the mutation fetches fresh and includes the order
    let orders = store.orders().await.unwrap();
    assert!(orders
        .iter()
        .any(|o| o.id == order.id && o.description == "Groceries"));
}

#[tokio::test]
async fn test_invalidated_read_serves_stale_then_fresh() {
    let (store, _api) = spawn_store().await;

    // Warm the cache before mutating
    assert!(store.orders().await.unwrap().is_empty());
    let order = store.create_order("Groceries", vec![1]).await.unwrap();

    // The invalidated read serves the retained snapshot without waiting
    let stale = store.orders().await.unwrap();
    assert!(stale.is_empty());

    // Once the background refresh lands, the order is visible
    store.settled().await;
    let fresh = store.orders().await.unwrap();
    assert_eq!(fresh.len(), 1);
    assert_eq!(fresh[0].id, order.id);
}

#[tokio::test]
async fn test_create_with_empty_description_makes_no_request() {
    let (store, api) = spawn_store().await;
    let before = api.requests.load(Ordering::SeqCst);

    let err = store.create_order("  ", vec![1]).await.unwrap_err();
    assert!(matches!(err, SyncError::Validation(_)));
    assert_eq!(api.requests.load(Ordering::SeqCst), before);
}

// == Update Tests ==

#[tokio::test]
async fn test_update_replaces_description_and_products() {
    let (store, _api) = spawn_store().await;

    let order = store.create_order("Groceries", vec![1]).await.unwrap();
    let updated = store
        .update_order(order.id, "Weekly groceries", vec![2, 4])
        .await
        .unwrap();
    assert_eq!(updated.id, order.id);
    assert_eq!(updated.description, "Weekly groceries");
    assert_eq!(updated.product_ids(), vec![2, 4]);

    let orders = store.orders().await.unwrap();
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0].description, "Weekly groceries");
}

#[tokio::test]
async fn test_update_nonexistent_order_is_remote_error() {
    let (store, _api) = spawn_store().await;

    let err = store
        .update_order(999, "Groceries", vec![1])
        .await
        .unwrap_err();
    assert!(err.is_not_found());
    assert!(err.to_string().contains("order 999 not found"));
}

#[tokio::test]
async fn test_update_with_empty_description_makes_no_request() {
    let (store, api) = spawn_store().await;
    let before = api.requests.load(Ordering::SeqCst);

    let err = store.update_order(2, "", vec![1]).await.unwrap_err();
    assert!(matches!(err, SyncError::Validation(_)));
    assert_eq!(api.requests.load(Ordering::SeqCst), before);
}

// == Delete Tests ==

#[tokio::test]
async fn test_delete_removes_order() {
    let (store, _api) = spawn_store().await;

    let order = store.create_order("Groceries", vec![1]).await.unwrap();
    store.delete_order(order.id).await.unwrap();

    let orders = store.orders().await.unwrap();
    assert!(orders.is_empty());
}

#[tokio::test]
async fn test_delete_nonexistent_leaves_cache_untouched() {
    let (store, api) = spawn_store().await;

    // Warm the orders cache
    store.orders().await.unwrap();
    let before = api.requests.load(Ordering::SeqCst);

    let err = store.delete_order(5).await.unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(store.orders_stats().invalidations, 0);

    // The next read is served from the intact cache entry
    store.orders().await.unwrap();
    assert_eq!(
        api.requests.load(Ordering::SeqCst),
        before + 1, // only the failed DELETE itself
    );
}
