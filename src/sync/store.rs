//! Sync Store Module
//!
//! The process-wide store presentation code talks to: cached reads of orders
//! and products, and coordinated mutations that invalidate the orders cache
//! on success.

use std::sync::Arc;

use tracing::info;

use crate::cache::{Clock, QueryCache, QueryStats, SystemClock, ORDERS_KEY, PRODUCTS_KEY};
use crate::config::Config;
use crate::error::{Result, SyncError};
use crate::models::{CreateOrderRequest, Order, Product, UpdateOrderRequest};
use crate::remote::{HttpRemoteStore, RemoteStore};
use crate::sync::MutationCoordinator;

// == Sync Store ==
/// Keeps local views of orders and products consistent with the remote API.
///
/// Reads go through per-key stale-while-revalidate caches; mutations run one
/// at a time and invalidate the `orders` key on success only. Failures are
/// returned as values and never leave the store unusable.
pub struct SyncStore {
    remote: Arc<dyn RemoteStore>,
    order_cache: QueryCache<Vec<Order>>,
    product_cache: QueryCache<Vec<Product>>,
    mutations: MutationCoordinator,
}

impl SyncStore {
    // == Constructors ==
    /// Creates a store from an injected remote client and clock.
    pub fn new(remote: Arc<dyn RemoteStore>, clock: Arc<dyn Clock>, stale_window_ms: u64) -> Self {
        Self {
            remote,
            order_cache: QueryCache::new(ORDERS_KEY, stale_window_ms, clock.clone()),
            product_cache: QueryCache::new(PRODUCTS_KEY, stale_window_ms, clock),
            mutations: MutationCoordinator::new(),
        }
    }

    /// Creates a store talking HTTP to the configured base URL.
    pub fn from_config(config: &Config) -> Result<Self> {
        let remote = Arc::new(HttpRemoteStore::new(config)?);
        Ok(Self::new(
            remote,
            Arc::new(SystemClock),
            config.stale_window_ms(),
        ))
    }

    // == Reads ==
    /// Returns the known orders, fetching only when necessary.
    pub async fn orders(&self) -> Result<Vec<Order>> {
        let remote = Arc::clone(&self.remote);
        self.order_cache
            .read(move || async move { remote.list_orders().await })
            .await
    }

    /// Returns the known products, fetching only when necessary.
    pub async fn products(&self) -> Result<Vec<Product>> {
        let remote = Arc::clone(&self.remote);
        self.product_cache
            .read(move || async move { remote.list_products().await })
            .await
    }

    // == Mutations ==
    /// Creates an order and invalidates the orders cache.
    ///
    /// The description is validated locally first; while another mutation is
    /// pending the call fails with `Busy`. In both cases no request is made.
    pub async fn create_order(&self, description: &str, product_ids: Vec<i64>) -> Result<Order> {
        let request = CreateOrderRequest::new(description, product_ids);
        if let Some(message) = request.validate() {
            return Err(SyncError::Validation(message));
        }

        let _guard = self.mutations.try_begin()?;
        let order = self.remote.create_order(&request).await?;
        self.order_cache.invalidate();
        info!(order_id = order.id, "order created");
        Ok(order)
    }

    /// Replaces an order's description and product set, then invalidates the
    /// orders cache.
    pub async fn update_order(
        &self,
        id: i64,
        description: &str,
        product_ids: Vec<i64>,
    ) -> Result<Order> {
        let request = UpdateOrderRequest::new(id, description, product_ids);
        if let Some(message) = request.validate() {
            return Err(SyncError::Validation(message));
        }

        let _guard = self.mutations.try_begin()?;
        let order = self.remote.update_order(&request).await?;
        self.order_cache.invalidate();
        info!(order_id = order.id, "order updated");
        Ok(order)
    }

    /// Deletes an order by id, then invalidates the orders cache.
    ///
    /// Confirmation prompts are the caller's concern; the delete is assumed
    /// intentional once invoked.
    pub async fn delete_order(&self, id: i64) -> Result<()> {
        let _guard = self.mutations.try_begin()?;
        self.remote.delete_order(id).await?;
        self.order_cache.invalidate();
        info!(order_id = id, "order deleted");
        Ok(())
    }

    // == Invalidation ==
    /// Forces the next orders read to revalidate.
    pub fn invalidate_orders(&self) {
        self.order_cache.invalidate();
    }

    /// Forces the next products read to revalidate.
    pub fn invalidate_products(&self) {
        self.product_cache.invalidate();
    }

    // == Introspection ==
    /// Waits for any in-flight fetch on either key to complete.
    pub async fn settled(&self) {
        self.order_cache.settled().await;
        self.product_cache.settled().await;
    }

    /// Returns true while a mutation is pending.
    pub fn mutation_pending(&self) -> bool {
        self.mutations.is_pending()
    }

    /// Counters for the orders cache.
    pub fn orders_stats(&self) -> QueryStats {
        self.order_cache.stats()
    }

    /// Counters for the products cache.
    pub fn products_stats(&self) -> QueryStats {
        self.product_cache.stats()
    }
}
