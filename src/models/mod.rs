//! Data models for the synchronization layer
//!
//! This module defines the remote entities (orders, products) and the
//! request DTOs (Data Transfer Objects) used for serializing HTTP request
//! bodies, matching the remote API's camelCase wire format.

pub mod order;
pub mod product;
pub mod requests;

// Re-export commonly used types
pub use order::{filter_by_description, Order, OrderedProduct};
pub use product::Product;
pub use requests::{CreateOrderRequest, UpdateOrderRequest};
