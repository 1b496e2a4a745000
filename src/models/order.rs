//! Order Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::Product;

/// A product line inside an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderedProduct {
    /// Server-assigned id of the order line itself
    pub id: i64,
    pub product: Product,
}

/// Order entity, as returned by `GET /orders`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Server-assigned unique id
    pub id: i64,
    pub description: String,
    pub ordered_products: Vec<OrderedProduct>,
    /// Server-assigned creation timestamp
    pub date: DateTime<Utc>,
}

impl Order {
    // == Product Ids ==
    /// Returns the ids of the products referenced by this order, in line
    /// order. The edit flow seeds its product selection from this.
    pub fn product_ids(&self) -> Vec<i64> {
        self.ordered_products
            .iter()
            .map(|line| line.product.id)
            .collect()
    }
}

// == Description Filter ==
/// Filters orders by a case-insensitive description substring.
///
/// An empty query matches every order.
pub fn filter_by_description<'a>(orders: &'a [Order], query: &str) -> Vec<&'a Order> {
    let needle = query.to_lowercase();
    orders
        .iter()
        .filter(|order| order.description.to_lowercase().contains(&needle))
        .collect()
}
