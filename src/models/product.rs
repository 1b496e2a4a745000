//! Product Model

use serde::{Deserialize, Serialize};

/// Product entity, as returned by `GET /product`.
///
/// Products are immutable from the client's perspective; only the server
/// creates or modifies them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Server-assigned unique id
    pub id: i64,
    pub product_name: String,
    pub description: String,
}
