//! Order entity model and DTOs.

use orderdesk_core::types::{DbId, Timestamp};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;

/// Full order row from the `orders` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Order {
    pub id: DbId,
    pub user_id: DbId,
    pub description: String,
    pub category: String,
    pub estimated_budget: Decimal,
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// An order joined with its owner's public details, for the admin listing.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct OrderWithOwner {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub order: Order,
    pub user_name: String,
    pub user_email: String,
}

/// DTO for creating a new order. Fields are expected to be validated already.
#[derive(Debug, Clone)]
pub struct CreateOrder {
    pub user_id: DbId,
    pub description: String,
    pub category: String,
    pub estimated_budget: Decimal,
}
