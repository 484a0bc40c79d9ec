//! Order status labels and validation.
//!
//! The five labels are stored verbatim in `orders.status` and must match the
//! `ck_orders_status` check constraint. There is no transition graph: an
//! admin may move an order from any status to any other status, including
//! the one it already has.

use crate::error::CoreError;

/// Order was submitted and awaits review. Every new order starts here.
pub const STATUS_UNDER_REVIEW: &str = "Em análise";

/// Order was accepted by an admin.
pub const STATUS_APPROVED: &str = "Aprovado";

/// Order was declined by an admin.
pub const STATUS_REJECTED: &str = "Rejeitado";

/// Work on the order has started.
pub const STATUS_IN_PROGRESS: &str = "Em andamento";

/// Work on the order is finished.
pub const STATUS_COMPLETED: &str = "Concluído";

/// Status assigned on creation.
pub const INITIAL_STATUS: &str = STATUS_UNDER_REVIEW;

/// All valid status values, in display order.
pub const VALID_STATUSES: &[&str] = &[
    STATUS_UNDER_REVIEW,
    STATUS_APPROVED,
    STATUS_REJECTED,
    STATUS_IN_PROGRESS,
    STATUS_COMPLETED,
];

/// Validate that a status string is one of the five accepted labels.
///
/// Matching is exact: no trimming, no case folding.
pub fn validate_status(status: &str) -> Result<(), CoreError> {
    if VALID_STATUSES.contains(&status) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid status '{status}'. Must be one of: {}",
            VALID_STATUSES.join(", ")
        )))
    }
}

/// Normalize an optional list filter: a missing or blank value means "all".
pub fn normalize_status_filter(status: Option<&str>) -> Option<&str> {
    status.filter(|s| !s.trim().is_empty())
}
