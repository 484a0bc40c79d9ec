//! Repository for the `orders` table.

use orderdesk_core::order_status::INITIAL_STATUS;
use orderdesk_core::types::DbId;
use sqlx::PgPool;

use crate::models::order::{CreateOrder, Order, OrderWithOwner};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, description, category, estimated_budget, status, \
                       created_at, updated_at";

/// Same columns qualified with the `o` alias, for joined queries.
const JOINED_COLUMNS: &str = "o.id, o.user_id, o.description, o.category, o.estimated_budget, \
                              o.status, o.created_at, o.updated_at, \
                              u.name AS user_name, u.email AS user_email";

/// Provides create, list, and status-update operations for orders.
pub struct OrderRepo;

impl OrderRepo {
    /// Insert a new order in the initial status, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateOrder) -> Result<Order, sqlx::Error> {
        let query = format!(
            "INSERT INTO orders (user_id, description, category, estimated_budget, status)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Order>(&query)
            .bind(input.user_id)
            .bind(&input.description)
            .bind(&input.category)
            .bind(input.estimated_budget)
            .bind(INITIAL_STATUS)
            .fetch_one(pool)
            .await
    }

    /// Find an order by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Order>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM orders WHERE id = $1");
        sqlx::query_as::<_, Order>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// All orders owned by `user_id`, newest first.
    pub async fn list_by_user(pool: &PgPool, user_id: DbId) -> Result<Vec<Order>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM orders
             WHERE user_id = $1
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Order>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// One page of all orders, optionally restricted to an exact status,
    /// newest first, with each owner's name and email.
    pub async fn list_all(
        pool: &PgPool,
        status: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<OrderWithOwner>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS}
             FROM orders o
             JOIN users u ON u.id = o.user_id
             WHERE ($1::TEXT IS NULL OR o.status = $1)
             ORDER BY o.created_at DESC, o.id DESC
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, OrderWithOwner>(&query)
            .bind(status)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Number of orders matching the same filter as [`OrderRepo::list_all`],
    /// ignoring the page window.
    pub async fn count_all(pool: &PgPool, status: Option<&str>) -> Result<i64, sqlx::Error> {
        let row: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM orders WHERE ($1::TEXT IS NULL OR status = $1)")
                .bind(status)
                .fetch_one(pool)
                .await?;
        Ok(row.0)
    }

    /// Set an order's status and refresh `updated_at`.
    ///
    /// The status must already be validated. Returns `None` if no row with
    /// the given `id` exists. Concurrent updates are last-write-wins.
    pub async fn update_status(
        pool: &PgPool,
        id: DbId,
        status: &str,
    ) -> Result<Option<Order>, sqlx::Error> {
        let query = format!(
            "UPDATE orders SET status = $2, updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Order>(&query)
            .bind(id)
            .bind(status)
            .fetch_optional(pool)
            .await
    }
}
