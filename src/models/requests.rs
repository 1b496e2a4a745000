//! Request DTOs for the remote order API
//!
//! Defines the structure of outgoing HTTP request bodies. Deserialize is
//! derived as well so test doubles of the remote API can parse them.

use serde::{Deserialize, Serialize};

/// Request body for order creation (POST /orders)
///
/// # Fields
/// - `order_data`: the new order's description
/// - `product_ids`: ids of the products the order references
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub order_data: NewOrderData,
    pub product_ids: Vec<i64>,
}

/// Payload nested under `orderData` on creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewOrderData {
    pub description: String,
}

impl CreateOrderRequest {
    /// Creates a new CreateOrderRequest
    pub fn new(description: impl Into<String>, product_ids: Vec<i64>) -> Self {
        Self {
            order_data: NewOrderData {
                description: description.into(),
            },
            product_ids,
        }
    }

    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        validate_description(&self.order_data.description)
    }
}

/// Request body for order update (PUT /orders/{id})
///
/// The target id appears both in the URL path and in `order_data`, as the
/// remote API expects.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOrderRequest {
    pub order_data: UpdateOrderData,
    pub product_ids: Vec<i64>,
}

/// Payload nested under `orderData` on update.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateOrderData {
    pub id: i64,
    pub description: String,
}

impl UpdateOrderRequest {
    /// Creates a new UpdateOrderRequest
    pub fn new(id: i64, description: impl Into<String>, product_ids: Vec<i64>) -> Self {
        Self {
            order_data: UpdateOrderData {
                id,
                description: description.into(),
            },
            product_ids,
        }
    }

    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        validate_description(&self.order_data.description)
    }
}

/// Shared description check: non-empty after trimming.
fn validate_description(description: &str) -> Option<String> {
    if description.trim().is_empty() {
        return Some("Description cannot be empty".to_string());
    }
    None
}
