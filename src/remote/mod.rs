//! Remote Store Module
//!
//! Typed operations against the remote order-management API.
//!
//! # Operations
//! - `GET /orders` - list orders
//! - `GET /product` - list products
//! - `POST /orders` - create an order
//! - `PUT /orders/{id}` - update an order
//! - `DELETE /orders/{id}` - delete an order

mod http;

pub use http::HttpRemoteStore;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{CreateOrderRequest, Order, Product, UpdateOrderRequest};

// == Remote Store Trait ==
/// The five typed operations of the remote API.
///
/// Every failure is surfaced immediately as a `SyncError::Remote`; there are
/// no client-side retries. The trait is the seam where tests inject fake
/// stores.
#[async_trait]
pub trait RemoteStore: Send + Sync {
    /// Fetches all orders.
    async fn list_orders(&self) -> Result<Vec<Order>>;

    /// Fetches all products.
    async fn list_products(&self) -> Result<Vec<Product>>;

    /// Creates an order; the server assigns id and date.
    async fn create_order(&self, request: &CreateOrderRequest) -> Result<Order>;

    /// Replaces an order's description and product set. A nonexistent id is
    /// an ordinary remote failure (404), not a crash.
    async fn update_order(&self, request: &UpdateOrderRequest) -> Result<Order>;

    /// Deletes an order by id.
    async fn delete_order(&self, id: i64) -> Result<()>;
}
