//! Shared query parameter types for API handlers.

use serde::Deserialize;

/// Query parameters for `GET /orders` (`?status=&page=&limit=`).
///
/// Values are clamped by `orderdesk_core::pagination::PageRequest`.
#[derive(Debug, Default, Deserialize)]
pub struct OrderListParams {
    pub status: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}
