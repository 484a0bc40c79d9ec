//! Handlers for the `/orders` resource.
//!
//! Users create and list their own orders; admins list every order and move
//! orders between statuses. There is no transition graph: any of the five
//! statuses may replace any other.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use orderdesk_core::error::CoreError;
use orderdesk_core::order_status::{normalize_status_filter, validate_status};
use orderdesk_core::orders::validate_new_order;
use orderdesk_core::pagination::{Page, PageRequest};
use orderdesk_core::roles::ROLE_ADMIN;
use orderdesk_core::types::DbId;
use orderdesk_db::models::order::{CreateOrder, Order, OrderWithOwner};
use orderdesk_db::repositories::OrderRepo;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::query::OrderListParams;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /orders`.
///
/// `estimated_budget` is kept raw so numeric strings can be coerced.
#[derive(Debug, Deserialize)]
pub struct CreateOrderRequest {
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub estimated_budget: serde_json::Value,
}

/// Request body for `PATCH /orders/{id}/status`.
#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    #[serde(default)]
    pub status: String,
}

#[derive(Debug, Serialize)]
pub struct OrderEnvelope {
    pub order: Order,
}

#[derive(Debug, Serialize)]
pub struct OrderListResponse {
    pub orders: Vec<Order>,
}

/// Admin listing: one page plus totals for the whole filtered set.
#[derive(Debug, Serialize)]
pub struct PagedOrdersResponse {
    pub orders: Vec<OrderWithOwner>,
    pub total: i64,
    pub page: i64,
    #[serde(rename = "totalPages")]
    pub total_pages: i64,
}

impl From<Page<OrderWithOwner>> for PagedOrdersResponse {
    fn from(page: Page<OrderWithOwner>) -> Self {
        Self {
            orders: page.items,
            total: page.total,
            page: page.page,
            total_pages: page.total_pages,
        }
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/orders
///
/// Create an order owned by the caller, starting in the initial status.
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    payload: Result<Json<CreateOrderRequest>, JsonRejection>,
) -> AppResult<(StatusCode, Json<OrderEnvelope>)> {
    let Json(input) = payload?;
    let valid = validate_new_order(&input.description, &input.category, &input.estimated_budget)?;

    let order = OrderRepo::create(
        &state.pool,
        &CreateOrder {
            user_id: auth.user_id,
            description: valid.description,
            category: valid.category,
            estimated_budget: valid.estimated_budget,
        },
    )
    .await?;

    tracing::info!(order_id = order.id, user_id = auth.user_id, "Order created");

    Ok((StatusCode::CREATED, Json(OrderEnvelope { order })))
}

/// GET /api/orders/my-orders
///
/// Every order owned by the caller, newest first. Not paginated.
pub async fn my_orders(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<OrderListResponse>> {
    let orders = OrderRepo::list_by_user(&state.pool, auth.user_id).await?;
    Ok(Json(OrderListResponse { orders }))
}

/// GET /api/orders?status=&page=&limit=
///
/// Admin-only paginated listing with an optional exact status filter.
pub async fn list_all(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    params: Result<Query<OrderListParams>, QueryRejection>,
) -> AppResult<Json<PagedOrdersResponse>> {
    let Query(params) = params?;
    let request = PageRequest::new(params.page, params.limit);
    let status = normalize_status_filter(params.status.as_deref());

    let orders =
        OrderRepo::list_all(&state.pool, status, request.limit, request.offset()).await?;
    let total = OrderRepo::count_all(&state.pool, status).await?;

    Ok(Json(Page::new(orders, total, request).into()))
}

/// GET /api/orders/{id}
///
/// A single order, visible to its owner and to admins.
pub async fn get_by_id(
    State(state): State<AppState>,
    auth: AuthUser,
    id: Result<Path<DbId>, PathRejection>,
) -> AppResult<Json<OrderEnvelope>> {
    let Path(id) = id?;
    let order = OrderRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Order", id }))?;

    if order.user_id != auth.user_id && auth.role != ROLE_ADMIN {
        return Err(AppError::Core(CoreError::Forbidden(
            "You do not have access to this order".into(),
        )));
    }

    Ok(Json(OrderEnvelope { order }))
}

/// PATCH /api/orders/{id}/status
///
/// Admin-only. The new status must be one of the five labels; re-applying
/// the current status is allowed and refreshes `updated_at`. Concurrent
/// updates are last-write-wins.
pub async fn update_status(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    id: Result<Path<DbId>, PathRejection>,
    payload: Result<Json<UpdateStatusRequest>, JsonRejection>,
) -> AppResult<Json<OrderEnvelope>> {
    let Path(id) = id?;
    let Json(input) = payload?;
    validate_status(&input.status)?;

    let order = OrderRepo::update_status(&state.pool, id, &input.status)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Order", id }))?;

    tracing::info!(
        order_id = order.id,
        admin_id = admin.user_id,
        status = %order.status,
        "Order status updated"
    );

    Ok(Json(OrderEnvelope { order }))
}
